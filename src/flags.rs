//! The radio flag table and the record of which flags were supplied.

use std::collections::BTreeSet;
use std::fmt;

use clap::parser::ValueSource;
use clap::{value_parser, Arg, ArgMatches};

use crate::value::{SamplingMode, ScientificNotation};

/// A configurable radio property, exposed as `--<name>`.
///
/// Variants are declared in ascending name order; the derived `Ord` is the
/// order in which supplied flags are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Flag {
    AgcMode,
    CenterFreq,
    DirectSampling,
    FreqCorrection,
    OffsetTuning,
    SampleRate,
    TestMode,
    TunerBandwidth,
    TunerGain,
    TunerGainMode,
}

#[derive(Clone, Copy)]
enum Kind {
    Bool,
    Int,
    Float,
    Scientific,
    Sampling,
}

impl Flag {
    pub const ALL: [Flag; 10] = [
        Flag::AgcMode,
        Flag::CenterFreq,
        Flag::DirectSampling,
        Flag::FreqCorrection,
        Flag::OffsetTuning,
        Flag::SampleRate,
        Flag::TestMode,
        Flag::TunerBandwidth,
        Flag::TunerGain,
        Flag::TunerGainMode,
    ];

    /// Command-line name, also the key used in preset files.
    pub fn name(&self) -> &'static str {
        match self {
            Flag::AgcMode => "agcmode",
            Flag::CenterFreq => "centerfreq",
            Flag::DirectSampling => "directsampling",
            Flag::FreqCorrection => "freqcorrection",
            Flag::OffsetTuning => "offsettuning",
            Flag::SampleRate => "samplerate",
            Flag::TestMode => "testmode",
            Flag::TunerBandwidth => "tunerbandwidth",
            Flag::TunerGain => "tunergain",
            Flag::TunerGainMode => "tunergainmode",
        }
    }

    pub fn help(&self) -> &'static str {
        match self {
            Flag::AgcMode => "Enable rtl2832u AGC",
            Flag::CenterFreq => "Center frequency to receive on",
            Flag::DirectSampling => "Set sampling mode: none, inphase, quadrature",
            Flag::FreqCorrection => "Frequency correction in ppm",
            Flag::OffsetTuning => "Enable offset tuning",
            Flag::SampleRate => "Sample rate",
            Flag::TestMode => "Enable test mode",
            Flag::TunerBandwidth => "Tuner bandwidth",
            Flag::TunerGain => "Set tuner gain in dB",
            Flag::TunerGainMode => "Enable manual gain",
        }
    }

    /// Default shown in `--help`. Display only: the in-memory value stays zero.
    pub fn default_display(&self) -> &'static str {
        match self {
            Flag::CenterFreq => "100M",
            Flag::SampleRate | Flag::TunerBandwidth => "2.4M",
            Flag::DirectSampling => "none",
            Flag::FreqCorrection => "0",
            Flag::TunerGain => "0.0",
            Flag::AgcMode | Flag::OffsetTuning | Flag::TestMode | Flag::TunerGainMode => "false",
        }
    }

    fn kind(&self) -> Kind {
        match self {
            Flag::AgcMode | Flag::OffsetTuning | Flag::TestMode | Flag::TunerGainMode => Kind::Bool,
            Flag::FreqCorrection => Kind::Int,
            Flag::TunerGain => Kind::Float,
            Flag::CenterFreq | Flag::SampleRate | Flag::TunerBandwidth => Kind::Scientific,
            Flag::DirectSampling => Kind::Sampling,
        }
    }

    /// The clap argument for this flag.
    ///
    /// Booleans accept `--flag` or `--flag=false`, so an explicit `false`
    /// still counts as supplied. A repeated flag keeps its last value.
    pub fn arg(&self) -> Arg {
        let arg = Arg::new(self.name())
            .long(self.name())
            .help(self.help())
            .overrides_with(self.name())
            .default_value(self.default_display());

        match self.kind() {
            Kind::Bool => arg
                .value_name("BOOL")
                .num_args(0..=1)
                .require_equals(true)
                .default_missing_value("true")
                .value_parser(value_parser!(bool)),
            Kind::Int => arg
                .value_name("PPM")
                .allow_negative_numbers(true)
                .value_parser(value_parser!(i32)),
            Kind::Float => arg
                .value_name("DB")
                .allow_negative_numbers(true)
                .value_parser(value_parser!(f64)),
            Kind::Scientific => arg
                .value_name("HZ")
                .value_parser(value_parser!(ScientificNotation)),
            Kind::Sampling => arg
                .value_name("MODE")
                .value_parser(value_parser!(SamplingMode)),
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Flags the user actually supplied, iterated in application order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagSet(BTreeSet<Flag>);

impl FlagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the flags whose value came from the command line.
    ///
    /// Values clap filled in from `default_value` are not counted.
    pub fn from_matches(matches: &ArgMatches) -> Self {
        Flag::ALL
            .into_iter()
            .filter(|flag| matches.value_source(flag.name()) == Some(ValueSource::CommandLine))
            .collect()
    }

    /// Returns `false` if the flag was already present.
    pub fn insert(&mut self, flag: Flag) -> bool {
        self.0.insert(flag)
    }

    pub fn contains(&self, flag: Flag) -> bool {
        self.0.contains(&flag)
    }

    pub fn iter(&self) -> impl Iterator<Item = Flag> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Flag> for FlagSet {
    fn from_iter<I: IntoIterator<Item = Flag>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
