//! Handlers for the default apply action and the config subcommands.

use clap::ArgMatches;
use std::path::{Path, PathBuf};

use super::args::{Args, ConfigAction};
use crate::config::{default_path, Config, ConfigError, RadioPreset};
use crate::context::{ApplyError, Context};
use crate::flags::{Flag, FlagSet};
use crate::radio::Radio;

/// Errors that end a run.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Apply(#[from] ApplyError),
}

/// Apply supplied flags, then preset values, to `radio`.
///
/// Returns the flags that were applied.
pub fn apply_flags<R: Radio>(
    args: &Args,
    matches: &ArgMatches,
    radio: &mut R,
) -> Result<FlagSet, RunError> {
    let mut ctx = Context::new(radio);
    let mut supplied = ctx.update_from_matches(matches);

    if args.no_config {
        log::debug!("preset loading disabled");
    } else {
        let config = Config::load(args.config.as_deref())?;
        ctx.apply_preset(&config.radio, &mut supplied);
    }

    ctx.handle_flags(&supplied)?;
    Ok(supplied)
}

/// Handle config subcommand actions.
pub fn handle_config_action(action: ConfigAction, path: Option<&Path>) -> Result<(), RunError> {
    let config_path = path.map(PathBuf::from).unwrap_or_else(default_path);

    match action {
        ConfigAction::Show => {
            if config_path.exists() {
                println!("Config file: {} (exists)", config_path.display());
            } else {
                println!("Config file: {} (not found)", config_path.display());
            }

            let config = Config::load(path)?;
            print!("{}", describe_preset(&config.radio));
        }
        ConfigAction::Init => {
            Config::init(&config_path)?;
            println!("Created config file: {}", config_path.display());
        }
    }
    Ok(())
}

/// Human-readable listing of preset values, one per line.
pub fn describe_preset(preset: &RadioPreset) -> String {
    let flags = preset.flags();
    if flags.is_empty() {
        return "No preset values.\n".to_string();
    }

    let mut out = String::from("Preset values:\n");
    for flag in flags.iter() {
        if let Some(value) = preset_value(preset, flag) {
            out.push_str(&format!("  {} = {}\n", flag, value));
        }
    }
    out
}

fn preset_value(preset: &RadioPreset, flag: Flag) -> Option<String> {
    match flag {
        Flag::AgcMode => preset.agcmode.map(|v| v.to_string()),
        Flag::CenterFreq => preset.centerfreq.map(|v| v.to_string()),
        Flag::DirectSampling => preset.directsampling.map(|v| v.to_string()),
        Flag::FreqCorrection => preset.freqcorrection.map(|v| v.to_string()),
        Flag::OffsetTuning => preset.offsettuning.map(|v| v.to_string()),
        Flag::SampleRate => preset.samplerate.map(|v| v.to_string()),
        Flag::TestMode => preset.testmode.map(|v| v.to_string()),
        Flag::TunerBandwidth => preset.tunerbandwidth.map(|v| v.to_string()),
        Flag::TunerGain => preset.tunergain.map(|v| v.to_string()),
        Flag::TunerGainMode => preset.tunergainmode.map(|v| v.to_string()),
    }
}
