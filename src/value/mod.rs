//! Parseable value types for radio flags.
//!
//! Both types follow the same contract: `FromStr` to read user input,
//! `Display` for the help/default string, and [`FlagValue::as_integer`] for
//! the number handed to the device.

mod sampling;
mod si;

pub use sampling::SamplingMode;
pub use si::ScientificNotation;

/// Coercion of a parsed flag value into the integer a [`crate::Radio`] setter takes.
pub trait FlagValue: std::str::FromStr + std::fmt::Display {
    fn as_integer(&self) -> i64;
}

/// Errors produced while parsing a flag value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    #[error("invalid {kind}: {input:?}")]
    InvalidFormat {
        /// What was being parsed, e.g. "sampling mode"
        kind: &'static str,
        /// The rejected text
        input: String,
    },
}

impl ValueError {
    pub(crate) fn invalid(kind: &'static str, input: &str) -> Self {
        ValueError::InvalidFormat {
            kind,
            input: input.to_string(),
        }
    }
}
