//! Preset file handling for rtlflags.
//!
//! Loads presets from `~/.config/rtlflags/config.toml` or a custom path.
//! A preset supplies values for flags not given on the command line.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::flags::{Flag, FlagSet};
use crate::value::{SamplingMode, ScientificNotation};

/// Preset file structure.
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub radio: RadioPreset,
}

/// The `[radio]` table. Keys are flag names; absent keys are not applied.
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RadioPreset {
    pub agcmode: Option<bool>,
    pub centerfreq: Option<ScientificNotation>,
    pub directsampling: Option<SamplingMode>,
    pub freqcorrection: Option<i32>,
    pub offsettuning: Option<bool>,
    pub samplerate: Option<ScientificNotation>,
    pub testmode: Option<bool>,
    pub tunerbandwidth: Option<ScientificNotation>,
    pub tunergain: Option<f64>,
    pub tunergainmode: Option<bool>,
}

impl RadioPreset {
    /// Flags this preset has a value for.
    pub fn flags(&self) -> FlagSet {
        let present = [
            (Flag::AgcMode, self.agcmode.is_some()),
            (Flag::CenterFreq, self.centerfreq.is_some()),
            (Flag::DirectSampling, self.directsampling.is_some()),
            (Flag::FreqCorrection, self.freqcorrection.is_some()),
            (Flag::OffsetTuning, self.offsettuning.is_some()),
            (Flag::SampleRate, self.samplerate.is_some()),
            (Flag::TestMode, self.testmode.is_some()),
            (Flag::TunerBandwidth, self.tunerbandwidth.is_some()),
            (Flag::TunerGain, self.tunergain.is_some()),
            (Flag::TunerGainMode, self.tunergainmode.is_some()),
        ];
        present
            .into_iter()
            .filter_map(|(flag, set)| set.then_some(flag))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.flags().is_empty()
    }
}

/// Errors that can occur when loading or creating a preset file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Config file '{}' not found", .path.display())]
    NotFound { path: PathBuf },
    #[error("Config file already exists: {}", .path.display())]
    AlreadyExists { path: PathBuf },
}

/// Commented preset written by `config init`.
pub const TEMPLATE: &str = r#"# rtlflags preset
#
# Values here are applied as if given on the command line.
# Flags given on the command line take precedence.

[radio]
# Center frequency in Hz, SI suffixes allowed
# centerfreq = "100M"
# Sample rate in Hz
# samplerate = "2.4M"
# Tuner bandwidth in Hz
# tunerbandwidth = "2.4M"
# Direct sampling: none, inphase, quadrature
# directsampling = "none"
# Frequency correction in ppm
# freqcorrection = 0
# Tuner gain in dB
# tunergain = 0.0
# Manual gain mode
# tunergainmode = false
# rtl2832u AGC
# agcmode = false
# Offset tuning
# offsettuning = false
# Test mode
# testmode = false
"#;

impl Config {
    /// Load configuration from a file path.
    ///
    /// With no path, the default location is used and a missing file yields
    /// an empty config. An explicit path that does not exist is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let explicit = path.is_some();
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if !path.exists() {
            if explicit {
                return Err(ConfigError::NotFound { path });
            }
            log::debug!("no config file at {}", path.display());
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;
        let config = Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.clone(),
            source: e,
        })?;
        log::info!(
            "loaded {} preset value(s) from {}",
            config.radio.flags().len(),
            path.display()
        );
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Write [`TEMPLATE`] to `path`, creating parent directories.
    pub fn init(path: &Path) -> Result<(), ConfigError> {
        if path.exists() {
            return Err(ConfigError::AlreadyExists {
                path: path.to_path_buf(),
            });
        }

        let io_err = |e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(path, TEMPLATE).map_err(io_err)
    }
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("rtlflags").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/rtlflags/config.toml")
        })
}
