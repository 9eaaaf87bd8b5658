//! rtlflags library crate.
//!
//! Turns command-line flags into setter calls on an rtl-sdr style [`Radio`].
//! Only flags the user supplied are applied, in ascending name order, and the
//! first rejected setting stops the run.

pub mod cli;
pub mod config;
pub mod context;
pub mod flags;
pub mod radio;
pub mod value;

pub use context::{register_flags, ApplyError, Context, Settings};
pub use flags::{Flag, FlagSet};
pub use radio::{DryRunRadio, Radio, RadioCall};
pub use value::{FlagValue, SamplingMode, ScientificNotation, ValueError};
