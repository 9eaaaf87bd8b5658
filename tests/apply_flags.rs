//! Integration tests for applying supplied flags to a radio.
//!
//! Covers:
//! - only supplied flags reach the radio
//! - tuner gain is sent in tenths of a dB
//! - the first rejected setting stops the run

use clap::Command;
use rtlflags::{register_flags, ApplyError, Context, Flag, Radio, RadioCall};

/// Error returned by [`ScriptedRadio`] for a refused setting.
#[derive(Debug, thiserror::Error)]
#[error("device refused {0}")]
struct Refused(RadioCall);

/// Test helper: records calls and refuses the ones matching `reject`.
#[derive(Default)]
struct ScriptedRadio {
    calls: Vec<RadioCall>,
    reject: Option<fn(&RadioCall) -> bool>,
}

impl ScriptedRadio {
    fn rejecting(reject: fn(&RadioCall) -> bool) -> Self {
        Self {
            calls: Vec::new(),
            reject: Some(reject),
        }
    }

    fn record(&mut self, call: RadioCall) -> Result<(), Refused> {
        self.calls.push(call);
        match self.reject {
            Some(reject) if reject(&call) => Err(Refused(call)),
            _ => Ok(()),
        }
    }
}

impl Radio for ScriptedRadio {
    type Error = Refused;

    fn set_agc_mode(&mut self, on: bool) -> Result<(), Refused> {
        self.record(RadioCall::AgcMode(on))
    }
    fn set_center_freq(&mut self, hz: i64) -> Result<(), Refused> {
        self.record(RadioCall::CenterFreq(hz))
    }
    fn set_direct_sampling(&mut self, mode: i32) -> Result<(), Refused> {
        self.record(RadioCall::DirectSampling(mode))
    }
    fn set_freq_correction(&mut self, ppm: i32) -> Result<(), Refused> {
        self.record(RadioCall::FreqCorrection(ppm))
    }
    fn set_offset_tuning(&mut self, on: bool) -> Result<(), Refused> {
        self.record(RadioCall::OffsetTuning(on))
    }
    fn set_sample_rate(&mut self, hz: i64) -> Result<(), Refused> {
        self.record(RadioCall::SampleRate(hz))
    }
    fn set_test_mode(&mut self, on: bool) -> Result<(), Refused> {
        self.record(RadioCall::TestMode(on))
    }
    fn set_tuner_bw(&mut self, hz: i64) -> Result<(), Refused> {
        self.record(RadioCall::TunerBw(hz))
    }
    fn set_tuner_gain(&mut self, tenth_db: i32) -> Result<(), Refused> {
        self.record(RadioCall::TunerGain(tenth_db))
    }
    fn set_tuner_gain_mode(&mut self, manual: bool) -> Result<(), Refused> {
        self.record(RadioCall::TunerGainMode(manual))
    }
}

/// Test helper: parse `args` and apply them to `radio`.
fn apply(radio: &mut ScriptedRadio, args: &[&str]) -> Result<(), ApplyError> {
    let matches = register_flags(Command::new("rtl")).get_matches_from(args);
    let mut ctx = Context::new(radio);
    let supplied = ctx.update_from_matches(&matches);
    ctx.handle_flags(&supplied)
}

#[test]
fn test_only_supplied_flags_are_applied() {
    let mut radio = ScriptedRadio::default();
    apply(&mut radio, &["rtl", "--samplerate", "3.2M", "--agcmode=true"]).unwrap();

    assert_eq!(
        radio.calls,
        vec![RadioCall::AgcMode(true), RadioCall::SampleRate(3_200_000)]
    );
}

#[test]
fn test_no_flags_no_calls() {
    let mut radio = ScriptedRadio::default();
    apply(&mut radio, &["rtl"]).unwrap();
    assert!(radio.calls.is_empty());
}

#[test]
fn test_order_is_by_name_not_position() {
    let mut radio = ScriptedRadio::default();
    apply(
        &mut radio,
        &["rtl", "--tunergain", "10", "--centerfreq", "1G", "--freqcorrection", "2"],
    )
    .unwrap();

    assert_eq!(
        radio.calls,
        vec![
            RadioCall::CenterFreq(1_000_000_000),
            RadioCall::FreqCorrection(2),
            RadioCall::TunerGain(100),
        ]
    );
}

#[test]
fn test_tuner_gain_sent_in_tenths() {
    let mut radio = ScriptedRadio::default();
    apply(&mut radio, &["rtl", "--tunergain", "1.5"]).unwrap();
    assert_eq!(radio.calls, vec![RadioCall::TunerGain(15)]);
}

#[test]
fn test_sampling_mode_sent_as_ordinal() {
    let mut radio = ScriptedRadio::default();
    apply(&mut radio, &["rtl", "--directsampling", "QUADRATURE"]).unwrap();
    assert_eq!(radio.calls, vec![RadioCall::DirectSampling(2)]);
}

#[test]
fn test_explicit_default_value_is_still_applied() {
    let mut radio = ScriptedRadio::default();
    apply(&mut radio, &["rtl", "--centerfreq", "100M", "--testmode=false"]).unwrap();
    assert_eq!(
        radio.calls,
        vec![RadioCall::CenterFreq(100_000_000), RadioCall::TestMode(false)]
    );
}

#[test]
fn test_repeated_flag_dispatches_last_value_once() {
    let mut radio = ScriptedRadio::default();
    apply(
        &mut radio,
        &["rtl", "--samplerate", "1M", "--agcmode", "--samplerate", "2M", "--agcmode=false"],
    )
    .unwrap();

    assert_eq!(
        radio.calls,
        vec![RadioCall::AgcMode(false), RadioCall::SampleRate(2_000_000)]
    );
}

#[test]
fn test_rejection_stops_remaining_flags() {
    let mut radio =
        ScriptedRadio::rejecting(|call| matches!(call, RadioCall::FreqCorrection(_)));
    let err = apply(
        &mut radio,
        &["rtl", "--agcmode", "--freqcorrection", "900", "--samplerate", "2M"],
    )
    .unwrap_err();

    assert_eq!(err.flag(), Flag::FreqCorrection);
    assert_eq!(
        err.to_string(),
        "failed to set freqcorrection: device refused set_freq_correction(900)"
    );
    assert_eq!(
        radio.calls,
        vec![RadioCall::AgcMode(true), RadioCall::FreqCorrection(900)]
    );
}

#[test]
fn test_rejection_on_first_flag() {
    let mut radio = ScriptedRadio::rejecting(|_| true);
    let err = apply(&mut radio, &["rtl", "--testmode", "--tunergainmode"]).unwrap_err();

    assert_eq!(err.flag(), Flag::TestMode);
    assert_eq!(radio.calls, vec![RadioCall::TestMode(true)]);
}
