//! Timed playback through the public engine surface.

use crate::common::{ms, playback};
use longmul_engine::{Action, Fired, SequencerState, SpeedFactor, StepPhase};

/// Time from one step's start to the next at 1x.
const STEP: u64 = 2000;

#[test]
fn a_step_starts_every_interval() {
    let mut playback = playback("23", "45");
    playback.play();
    for expected_cursor in 1..=4 {
        let fired = playback.tick(ms(STEP));
        let advanced: Vec<usize> = fired
            .iter()
            .filter_map(|fired| match fired {
                Fired::Advanced { cursor, .. } => Some(*cursor),
                _ => None,
            })
            .collect();
        assert_eq!(advanced, vec![expected_cursor]);
    }
}

#[test]
fn small_frames_add_up_to_the_same_schedule() {
    let mut coarse = playback("407", "38");
    let mut fine = playback("407", "38");
    coarse.play();
    fine.play();

    let total = ms(STEP) * u32::try_from(coarse.sequencer().total_steps()).unwrap();
    coarse.tick(total);
    let frames = total.as_millis() / 16 + 1;
    for _ in 0..frames {
        fine.tick(ms(16));
    }

    assert!(coarse.is_finished());
    assert!(fine.is_finished());
    assert_eq!(coarse.sequencer().view(), fine.sequencer().view());
}

#[test]
fn doubling_speed_halves_the_run() {
    let mut playback = playback("23", "45");
    playback.set_speed(SpeedFactor::new(2.0).unwrap());
    playback.play();
    let total = playback.sequencer().total_steps();
    playback.tick(ms(STEP / 2) * u32::try_from(total).unwrap());
    assert!(playback.is_finished());
}

#[test]
fn half_speed_is_half_way_at_the_normal_end() {
    let mut playback = playback("23", "45");
    playback.set_speed(SpeedFactor::new(0.5).unwrap());
    playback.play();
    playback.tick(ms(STEP) * 5);
    assert!(!playback.is_finished());
    assert_eq!(playback.sequencer().cursor(), 2);
}

#[test]
fn pausing_between_steps_freezes_the_cursor() {
    let mut playback = playback("23", "45");
    playback.play();
    playback.tick(ms(STEP * 2));
    playback.tick(ms(900));
    assert_eq!(playback.sequencer().phase(), StepPhase::Cleared);
    playback.pause();
    playback.tick(ms(60_000));
    assert_eq!(playback.sequencer().cursor(), 2);

    playback.play();
    let next = playback.next_action().expect("playing again");
    assert_eq!(next.action, Action::Advance);
    playback.tick(next.delay);
    assert_eq!(playback.sequencer().cursor(), 3);
}

#[test]
fn reset_mid_reveal_discards_the_pending_phase() {
    let mut playback = playback("99", "99");
    playback.play();
    playback.tick(ms(STEP));
    let pending = playback.next_action().expect("reveal pending");
    playback.reset();
    assert_eq!(playback.fire(pending.action), Fired::Ignored);
    assert_eq!(playback.state(), SequencerState::NotStarted);
    assert!(playback.tick(ms(60_000)).is_empty());
}

#[test]
fn randomize_uses_the_configured_range() {
    let mut playback = playback("23", "45");
    for _ in 0..50 {
        let (a, b) = playback.randomize();
        assert!((10..=99).contains(&a.value()));
        assert!((10..=99).contains(&b.value()));
        assert_eq!(playback.sequencer().cursor(), 0);
        assert!(!playback.is_playing());
    }
}
