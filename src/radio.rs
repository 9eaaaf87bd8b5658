//! Device capability set for RTL-SDR style receivers.
//!
//! The crate never talks to hardware itself. Drivers implement [`Radio`];
//! [`DryRunRadio`] stands in when there is no device and records what would
//! have been sent.

use std::convert::Infallible;
use std::fmt;

/// Setters common to rtl-sdr receivers.
///
/// Each call either applies the setting or reports why the device refused it.
pub trait Radio {
    type Error: std::error::Error + Send + Sync + 'static;

    fn set_agc_mode(&mut self, on: bool) -> Result<(), Self::Error>;
    /// Center frequency in Hz
    fn set_center_freq(&mut self, hz: i64) -> Result<(), Self::Error>;
    fn set_direct_sampling(&mut self, mode: i32) -> Result<(), Self::Error>;
    fn set_freq_correction(&mut self, ppm: i32) -> Result<(), Self::Error>;
    fn set_offset_tuning(&mut self, on: bool) -> Result<(), Self::Error>;
    /// Sample rate in Hz
    fn set_sample_rate(&mut self, hz: i64) -> Result<(), Self::Error>;
    fn set_test_mode(&mut self, on: bool) -> Result<(), Self::Error>;
    /// Tuner bandwidth in Hz
    fn set_tuner_bw(&mut self, hz: i64) -> Result<(), Self::Error>;
    /// Gain in tenths of a dB
    fn set_tuner_gain(&mut self, tenth_db: i32) -> Result<(), Self::Error>;
    fn set_tuner_gain_mode(&mut self, manual: bool) -> Result<(), Self::Error>;
}

/// One setter invocation with its argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadioCall {
    AgcMode(bool),
    CenterFreq(i64),
    DirectSampling(i32),
    FreqCorrection(i32),
    OffsetTuning(bool),
    SampleRate(i64),
    TestMode(bool),
    TunerBw(i64),
    TunerGain(i32),
    TunerGainMode(bool),
}

impl fmt::Display for RadioCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RadioCall::AgcMode(v) => write!(f, "set_agc_mode({})", v),
            RadioCall::CenterFreq(v) => write!(f, "set_center_freq({})", v),
            RadioCall::DirectSampling(v) => write!(f, "set_direct_sampling({})", v),
            RadioCall::FreqCorrection(v) => write!(f, "set_freq_correction({})", v),
            RadioCall::OffsetTuning(v) => write!(f, "set_offset_tuning({})", v),
            RadioCall::SampleRate(v) => write!(f, "set_sample_rate({})", v),
            RadioCall::TestMode(v) => write!(f, "set_test_mode({})", v),
            RadioCall::TunerBw(v) => write!(f, "set_tuner_bw({})", v),
            RadioCall::TunerGain(v) => write!(f, "set_tuner_gain({})", v),
            RadioCall::TunerGainMode(v) => write!(f, "set_tuner_gain_mode({})", v),
        }
    }
}

/// A radio that accepts every setting and remembers the calls in order.
#[derive(Debug, Default)]
pub struct DryRunRadio {
    calls: Vec<RadioCall>,
}

impl DryRunRadio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls received so far, oldest first.
    pub fn calls(&self) -> &[RadioCall] {
        &self.calls
    }

    fn record(&mut self, call: RadioCall) -> Result<(), Infallible> {
        log::debug!("dry run: {}", call);
        self.calls.push(call);
        Ok(())
    }
}

impl Radio for DryRunRadio {
    type Error = Infallible;

    fn set_agc_mode(&mut self, on: bool) -> Result<(), Self::Error> {
        self.record(RadioCall::AgcMode(on))
    }

    fn set_center_freq(&mut self, hz: i64) -> Result<(), Self::Error> {
        self.record(RadioCall::CenterFreq(hz))
    }

    fn set_direct_sampling(&mut self, mode: i32) -> Result<(), Self::Error> {
        self.record(RadioCall::DirectSampling(mode))
    }

    fn set_freq_correction(&mut self, ppm: i32) -> Result<(), Self::Error> {
        self.record(RadioCall::FreqCorrection(ppm))
    }

    fn set_offset_tuning(&mut self, on: bool) -> Result<(), Self::Error> {
        self.record(RadioCall::OffsetTuning(on))
    }

    fn set_sample_rate(&mut self, hz: i64) -> Result<(), Self::Error> {
        self.record(RadioCall::SampleRate(hz))
    }

    fn set_test_mode(&mut self, on: bool) -> Result<(), Self::Error> {
        self.record(RadioCall::TestMode(on))
    }

    fn set_tuner_bw(&mut self, hz: i64) -> Result<(), Self::Error> {
        self.record(RadioCall::TunerBw(hz))
    }

    fn set_tuner_gain(&mut self, tenth_db: i32) -> Result<(), Self::Error> {
        self.record(RadioCall::TunerGain(tenth_db))
    }

    fn set_tuner_gain_mode(&mut self, manual: bool) -> Result<(), Self::Error> {
        self.record(RadioCall::TunerGainMode(manual))
    }
}
