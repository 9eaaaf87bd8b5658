//! Direct-sampling mode selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use super::{FlagValue, ValueError};

/// Which ADC branch the tuner feeds when bypassing the quadrature mixer.
///
/// Input spellings (`none`, `inphase`, `quadrature`) differ from the display
/// labels (`None`, `In-Phase ADC`, `Quadrature ADC`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SamplingMode {
    #[default]
    None,
    InPhase,
    Quadrature,
    /// Never produced by parsing
    Unknown,
}

impl SamplingMode {
    /// Numeric code for the device's direct-sampling setter.
    pub fn ordinal(&self) -> i32 {
        match self {
            SamplingMode::None => 0,
            SamplingMode::InPhase => 1,
            SamplingMode::Quadrature => 2,
            SamplingMode::Unknown => 3,
        }
    }
}

impl FlagValue for SamplingMode {
    fn as_integer(&self) -> i64 {
        i64::from(self.ordinal())
    }
}

impl FromStr for SamplingMode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(SamplingMode::None),
            "inphase" => Ok(SamplingMode::InPhase),
            "quadrature" => Ok(SamplingMode::Quadrature),
            _ => Err(ValueError::invalid("sampling mode", s)),
        }
    }
}

impl fmt::Display for SamplingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SamplingMode::None => "None",
            SamplingMode::InPhase => "In-Phase ADC",
            SamplingMode::Quadrature => "Quadrature ADC",
            SamplingMode::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

impl<'de> Deserialize<'de> for SamplingMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("NONE".parse::<SamplingMode>().unwrap(), SamplingMode::None);
        assert_eq!(
            "InPhase".parse::<SamplingMode>().unwrap(),
            SamplingMode::InPhase
        );
        assert_eq!(
            "QUADRATURE".parse::<SamplingMode>().unwrap(),
            SamplingMode::Quadrature
        );
    }

    #[test]
    fn test_parse_rejects_other_input() {
        let err = "in-phase".parse::<SamplingMode>().unwrap_err();
        assert_eq!(err.to_string(), "invalid sampling mode: \"in-phase\"");
        assert!("unknown".parse::<SamplingMode>().is_err());
        assert!("".parse::<SamplingMode>().is_err());
        assert!(" none".parse::<SamplingMode>().is_err());
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(SamplingMode::None.to_string(), "None");
        assert_eq!(SamplingMode::InPhase.to_string(), "In-Phase ADC");
        assert_eq!(SamplingMode::Quadrature.to_string(), "Quadrature ADC");
        assert_eq!(SamplingMode::Unknown.to_string(), "Unknown");
    }

    #[test]
    fn test_ordinals() {
        assert_eq!(SamplingMode::None.as_integer(), 0);
        assert_eq!(SamplingMode::InPhase.as_integer(), 1);
        assert_eq!(SamplingMode::Quadrature.as_integer(), 2);
        assert_eq!(SamplingMode::Unknown.as_integer(), 3);
    }

    #[test]
    fn test_default_is_none() {
        assert_eq!(SamplingMode::default(), SamplingMode::None);
    }
}
