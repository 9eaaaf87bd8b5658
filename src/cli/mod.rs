//! Command-line interface definitions and helpers.
//!
//! This module contains the binary's argument parsing and subcommand handlers.
//! The radio flags themselves are registered by [`crate::context::register_flags`].

mod args;
mod commands;

pub use args::{command, parse_from, Args, Command, ConfigAction};
pub use commands::{apply_flags, describe_preset, handle_config_action, RunError};
