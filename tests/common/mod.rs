//! Shared test utilities and fixtures

#![allow(dead_code)]

use std::time::Duration;

use longmul_core::{Advance, Sequencer, StepTimeline};
use longmul_engine::{Playback, SpeedFactor, Timings};

pub fn timeline(multiplicand: &str, multiplier: &str) -> StepTimeline {
    StepTimeline::parse(multiplicand, multiplier).expect("test fixture must use valid operands")
}

pub fn sequencer(multiplicand: &str, multiplier: &str) -> Sequencer {
    Sequencer::parse(multiplicand, multiplier).expect("test fixture must use valid operands")
}

pub fn playback(multiplicand: &str, multiplier: &str) -> Playback {
    Playback::new(
        sequencer(multiplicand, multiplier),
        Timings::default(),
        SpeedFactor::NORMAL,
    )
}

/// Advance and settle one entry at a time until the sequencer finishes.
pub fn run_to_end(sequencer: &mut Sequencer) {
    while !sequencer.is_finished() {
        match sequencer.advance() {
            Advance::Applied { .. } => {
                sequencer.settle();
            }
            other => panic!("expected applied advance, got {other:?}"),
        }
    }
}

/// Decimal digits of `value`, most significant first.
pub fn decimal_digits(value: u128) -> Vec<u8> {
    value.to_string().bytes().map(|b| b - b'0').collect()
}

pub fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

/// Operand pairs beyond the small exhaustive grid: long operands, zeros in
/// the middle, all-nines.
pub const SELECTED_PAIRS: &[(&str, &str)] = &[
    ("999", "999"),
    ("1001", "909"),
    ("123456789", "987654321"),
    ("99999", "9"),
    ("5", "100000"),
    ("4294967295", "4294967295"),
    ("18446744073709551615", "18446744073709551615"),
    ("7070", "6060"),
];
