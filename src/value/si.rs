//! Numeric values with an optional SI magnitude suffix (`100k`, `2.4M`, `1G`).

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserialize, Deserializer, Visitor};

use super::{FlagValue, ValueError};

/// Magnitude suffixes, largest first so formatting picks the biggest that fits.
const SUFFIXES: &[(char, f64)] = &[('T', 1e12), ('G', 1e9), ('M', 1e6), ('k', 1e3)];

fn multiplier(suffix: char) -> Option<f64> {
    SUFFIXES
        .iter()
        .find(|(c, _)| *c == suffix)
        .map(|(_, m)| *m)
}

/// A real quantity such as a frequency in Hz, written with an SI suffix.
///
/// The unit is owned by the caller: `ScientificNotation` only knows about
/// magnitudes. `"2.4M"` parses to 2,400,000 and formats back as `2.4M`.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct ScientificNotation(f64);

impl ScientificNotation {
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    /// The raw magnitude.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl FlagValue for ScientificNotation {
    /// Nearest integer, saturating at the `i64` range.
    fn as_integer(&self) -> i64 {
        self.0.round() as i64
    }
}

impl FromStr for ScientificNotation {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let invalid = || ValueError::invalid("scientific notation", s);

        let (mantissa, scale) = match text.chars().last() {
            Some(c) if c.is_ascii_alphabetic() => match multiplier(c) {
                Some(m) => (&text[..text.len() - 1], m),
                // A trailing exponent digit is never alphabetic, so any
                // letter left here is an unknown suffix or junk like "inf".
                None => return Err(invalid()),
            },
            Some(_) => (text, 1.0),
            None => return Err(invalid()),
        };

        let base: f64 = mantissa.parse().map_err(|_| invalid())?;
        let value = base * scale;
        if !value.is_finite() {
            return Err(invalid());
        }
        Ok(Self(value))
    }
}

impl fmt::Display for ScientificNotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = self.0.abs();
        for (suffix, scale) in SUFFIXES {
            if magnitude >= *scale {
                return write!(f, "{}{}", self.0 / scale, suffix);
            }
        }
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for ScientificNotation {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SiVisitor;

        impl Visitor<'_> for SiVisitor {
            type Value = ScientificNotation;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a number or a string such as \"2.4M\"")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(ScientificNotation(v as f64))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(ScientificNotation(v as f64))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                Ok(ScientificNotation(v))
            }
        }

        deserializer.deserialize_any(SiVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> i64 {
        s.parse::<ScientificNotation>().unwrap().as_integer()
    }

    #[test]
    fn test_parse_suffixes() {
        assert_eq!(parse("2.4M"), 2_400_000);
        assert_eq!(parse("100k"), 100_000);
        assert_eq!(parse("1G"), 1_000_000_000);
        assert_eq!(parse("1.5T"), 1_500_000_000_000);
        assert_eq!(parse("0"), 0);
    }

    #[test]
    fn test_parse_plain_and_exponent() {
        assert_eq!(parse("1024"), 1024);
        assert_eq!(parse("433.92e6"), 433_920_000);
        assert_eq!(parse("+3.2M"), 3_200_000);
        assert_eq!(parse("-50k"), -50_000);
        assert_eq!(parse(" 2.048M "), 2_048_000);
    }

    #[test]
    fn test_parse_rejects_unknown_suffix() {
        let err = "10m".parse::<ScientificNotation>().unwrap_err();
        assert_eq!(
            err,
            ValueError::InvalidFormat {
                kind: "scientific notation",
                input: "10m".to_string()
            }
        );
        assert!("10x".parse::<ScientificNotation>().is_err());
        assert!("1.2.3M".parse::<ScientificNotation>().is_err());
    }

    #[test]
    fn test_parse_rejects_empty_and_non_finite() {
        assert!("".parse::<ScientificNotation>().is_err());
        assert!("M".parse::<ScientificNotation>().is_err());
        assert!("inf".parse::<ScientificNotation>().is_err());
        assert!("NaN".parse::<ScientificNotation>().is_err());
        assert!("1e400".parse::<ScientificNotation>().is_err());
    }

    #[test]
    fn test_display_uses_largest_suffix() {
        assert_eq!(ScientificNotation::new(100e6).to_string(), "100M");
        assert_eq!(ScientificNotation::new(2.4e6).to_string(), "2.4M");
        assert_eq!(ScientificNotation::new(1e9).to_string(), "1G");
        assert_eq!(ScientificNotation::new(1500.0).to_string(), "1.5k");
        assert_eq!(ScientificNotation::new(999.0).to_string(), "999");
        assert_eq!(ScientificNotation::new(0.0).to_string(), "0");
        assert_eq!(ScientificNotation::new(-2e6).to_string(), "-2M");
    }

    #[test]
    fn test_display_round_trips() {
        for text in ["100M", "2.4M", "1G", "250k", "7"] {
            let value: ScientificNotation = text.parse().unwrap();
            assert_eq!(value.to_string(), text);
            let reparsed: ScientificNotation = value.to_string().parse().unwrap();
            assert_eq!(reparsed, value);
        }
    }

    #[test]
    fn test_as_integer_rounds() {
        assert_eq!(ScientificNotation::new(1.6).as_integer(), 2);
        assert_eq!(ScientificNotation::new(1.4).as_integer(), 1);
        assert_eq!(ScientificNotation::new(f64::MAX).as_integer(), i64::MAX);
    }
}
