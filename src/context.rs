//! Applies supplied radio flags to a device.
//!
//! [`register_flags`] declares the flags on a `clap::Command`. After parsing,
//! [`Context::update_from_matches`] copies the supplied values into
//! [`Settings`] and [`Context::handle_flags`] dispatches one setter per
//! supplied flag, stopping at the first one the device rejects.

use clap::{ArgMatches, Command};

use crate::config::RadioPreset;
use crate::flags::{Flag, FlagSet};
use crate::radio::Radio;
use crate::value::{FlagValue, SamplingMode, ScientificNotation};

/// Returned by [`Context::handle_flags`] when a setter fails.
#[derive(Debug, thiserror::Error)]
pub enum ApplyError {
    #[error("failed to set {flag}: {source}")]
    DeviceRejected {
        flag: Flag,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ApplyError {
    /// The flag whose setter failed.
    pub fn flag(&self) -> Flag {
        match self {
            ApplyError::DeviceRejected { flag, .. } => *flag,
        }
    }
}

/// One pending value per configurable property.
///
/// `Settings::default()` is all zeros; the defaults shown in `--help` are
/// never stored here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub agc_mode: bool,
    pub center_freq: ScientificNotation,
    pub direct_sampling: SamplingMode,
    /// Parts per million
    pub freq_correction: i32,
    pub offset_tuning: bool,
    pub sample_rate: ScientificNotation,
    pub test_mode: bool,
    pub tuner_bandwidth: ScientificNotation,
    /// dB
    pub tuner_gain: f64,
    pub tuner_gain_mode: bool,
}

impl Settings {
    /// Tuner gain as the device expects it: tenths of a dB, truncated.
    pub fn tuner_gain_tenths(&self) -> i32 {
        (self.tuner_gain * 10.0) as i32
    }
}

/// Declare every radio flag on `cmd`.
pub fn register_flags(cmd: Command) -> Command {
    Flag::ALL.iter().fold(cmd, |cmd, flag| cmd.arg(flag.arg()))
}

/// Holds the pending settings and the radio they are applied to.
///
/// The radio is borrowed for the lifetime of the context: nothing else can
/// drive it while flags are being applied.
pub struct Context<'a, R: Radio> {
    radio: &'a mut R,
    settings: Settings,
}

impl<'a, R: Radio> Context<'a, R> {
    pub fn new(radio: &'a mut R) -> Self {
        Self::with_settings(radio, Settings::default())
    }

    pub fn with_settings(radio: &'a mut R, settings: Settings) -> Self {
        Self { radio, settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Copy command-line values into the settings.
    ///
    /// `matches` must come from a command passed through [`register_flags`].
    /// Returns the flags that were supplied; defaults are left untouched.
    pub fn update_from_matches(&mut self, matches: &ArgMatches) -> FlagSet {
        let supplied = FlagSet::from_matches(matches);
        let s = &mut self.settings;

        for flag in supplied.iter() {
            let name = flag.name();
            match flag {
                Flag::AgcMode => s.agc_mode = get(matches, name, s.agc_mode),
                Flag::CenterFreq => s.center_freq = get(matches, name, s.center_freq),
                Flag::DirectSampling => s.direct_sampling = get(matches, name, s.direct_sampling),
                Flag::FreqCorrection => s.freq_correction = get(matches, name, s.freq_correction),
                Flag::OffsetTuning => s.offset_tuning = get(matches, name, s.offset_tuning),
                Flag::SampleRate => s.sample_rate = get(matches, name, s.sample_rate),
                Flag::TestMode => s.test_mode = get(matches, name, s.test_mode),
                Flag::TunerBandwidth => s.tuner_bandwidth = get(matches, name, s.tuner_bandwidth),
                Flag::TunerGain => s.tuner_gain = get(matches, name, s.tuner_gain),
                Flag::TunerGainMode => s.tuner_gain_mode = get(matches, name, s.tuner_gain_mode),
            }
            log::debug!("--{} supplied on command line", name);
        }

        supplied
    }

    /// Fill in preset values for flags not already in `supplied`.
    ///
    /// The command line always wins; each preset value taken is added to
    /// `supplied` so it gets applied like a typed flag.
    pub fn apply_preset(&mut self, preset: &RadioPreset, supplied: &mut FlagSet) {
        let s = &mut self.settings;

        for flag in preset.flags().iter() {
            if supplied.contains(flag) {
                log::warn!("--{} given on command line, ignoring preset value", flag);
                continue;
            }
            match flag {
                Flag::AgcMode => s.agc_mode = preset.agcmode.unwrap_or(s.agc_mode),
                Flag::CenterFreq => s.center_freq = preset.centerfreq.unwrap_or(s.center_freq),
                Flag::DirectSampling => {
                    s.direct_sampling = preset.directsampling.unwrap_or(s.direct_sampling)
                }
                Flag::FreqCorrection => {
                    s.freq_correction = preset.freqcorrection.unwrap_or(s.freq_correction)
                }
                Flag::OffsetTuning => s.offset_tuning = preset.offsettuning.unwrap_or(s.offset_tuning),
                Flag::SampleRate => s.sample_rate = preset.samplerate.unwrap_or(s.sample_rate),
                Flag::TestMode => s.test_mode = preset.testmode.unwrap_or(s.test_mode),
                Flag::TunerBandwidth => {
                    s.tuner_bandwidth = preset.tunerbandwidth.unwrap_or(s.tuner_bandwidth)
                }
                Flag::TunerGain => s.tuner_gain = preset.tunergain.unwrap_or(s.tuner_gain),
                Flag::TunerGainMode => {
                    s.tuner_gain_mode = preset.tunergainmode.unwrap_or(s.tuner_gain_mode)
                }
            }
            supplied.insert(flag);
            log::debug!("--{} taken from preset", flag);
        }
    }

    /// Apply the supplied flags to the radio in ascending name order.
    ///
    /// Must be called after argument parsing. Stops at the first setter
    /// error; settings already applied stay applied.
    pub fn handle_flags(&mut self, supplied: &FlagSet) -> Result<(), ApplyError> {
        for flag in supplied.iter() {
            if let Err(e) = self.dispatch(flag) {
                return Err(ApplyError::DeviceRejected {
                    flag,
                    source: Box::new(e),
                });
            }
        }
        Ok(())
    }

    fn dispatch(&mut self, flag: Flag) -> Result<(), R::Error> {
        let s = &self.settings;
        let radio = &mut *self.radio;

        match flag {
            Flag::AgcMode => {
                log::info!("agc mode: {}", s.agc_mode);
                radio.set_agc_mode(s.agc_mode)
            }
            Flag::CenterFreq => {
                log::info!("center frequency: {}Hz", s.center_freq);
                radio.set_center_freq(s.center_freq.as_integer())
            }
            Flag::DirectSampling => {
                log::info!("direct sampling: {}", s.direct_sampling);
                radio.set_direct_sampling(s.direct_sampling.ordinal())
            }
            Flag::FreqCorrection => {
                log::info!("frequency correction: {} ppm", s.freq_correction);
                radio.set_freq_correction(s.freq_correction)
            }
            Flag::OffsetTuning => {
                log::info!("offset tuning: {}", s.offset_tuning);
                radio.set_offset_tuning(s.offset_tuning)
            }
            Flag::SampleRate => {
                log::info!("sample rate: {}Hz", s.sample_rate);
                radio.set_sample_rate(s.sample_rate.as_integer())
            }
            Flag::TestMode => {
                log::info!("test mode: {}", s.test_mode);
                radio.set_test_mode(s.test_mode)
            }
            Flag::TunerBandwidth => {
                log::info!("tuner bandwidth: {}Hz", s.tuner_bandwidth);
                radio.set_tuner_bw(s.tuner_bandwidth.as_integer())
            }
            Flag::TunerGain => {
                log::info!("tuner gain: {} dB", s.tuner_gain);
                radio.set_tuner_gain(s.tuner_gain_tenths())
            }
            Flag::TunerGainMode => {
                log::info!("manual gain mode: {}", s.tuner_gain_mode);
                radio.set_tuner_gain_mode(s.tuner_gain_mode)
            }
        }
    }
}

fn get<T: Clone + Send + Sync + 'static>(matches: &ArgMatches, name: &str, current: T) -> T {
    matches.get_one::<T>(name).cloned().unwrap_or(current)
}
