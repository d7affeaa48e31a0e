//! Sequencer playback contract: cursor movement, reset, stale tickets.

use crate::common::{SELECTED_PAIRS, run_to_end, sequencer, timeline};
use longmul_core::{Advance, CarryLane, Highlight, PhaseOutcome, ViewChange, view_at};
use longmul_types::{SequencerState, StepPhase};

#[test]
fn reset_is_idempotent() {
    let mut sequencer = sequencer("407", "38");
    let first = sequencer.timeline().clone();
    for _ in 0..3 {
        sequencer.reset();
        assert_eq!(sequencer.timeline(), &first);
        assert_eq!(sequencer.cursor(), 0);
        assert_eq!(sequencer.state(), SequencerState::NotStarted);
    }
    assert_eq!(sequencer.generation().value(), 3);
}

#[test]
fn states_visit_every_phase_in_order() {
    let mut sequencer = sequencer("23", "45");
    let mut seen = vec![sequencer.state()];
    while !sequencer.is_finished() {
        let Advance::Applied { next, .. } = sequencer.advance() else {
            panic!("advance must apply while not finished");
        };
        let mut ticket = Some(next);
        while let Some(current) = ticket {
            let PhaseOutcome::Applied { next, .. } = sequencer.complete_phase(current) else {
                panic!("fresh ticket must apply");
            };
            ticket = next;
        }
        if seen.last() != Some(&sequencer.state()) {
            seen.push(sequencer.state());
        }
    }
    assert_eq!(
        seen,
        vec![
            SequencerState::NotStarted,
            SequencerState::Multiplying,
            SequencerState::MultiplicationDone,
            SequencerState::Adding,
            SequencerState::AdditionDone,
            SequencerState::Finished,
        ]
    );
}

#[test]
fn advance_past_the_end_is_a_noop() {
    let mut sequencer = sequencer("12", "3");
    run_to_end(&mut sequencer);
    let view = sequencer.view().clone();
    for _ in 0..3 {
        assert_eq!(sequencer.advance(), Advance::AtEnd);
    }
    assert_eq!(sequencer.view(), &view);
}

#[test]
fn first_step_highlights_then_reveals() {
    let mut sequencer = sequencer("23", "45");
    let Advance::Applied { changes, next, .. } = sequencer.advance() else {
        panic!("first advance must apply");
    };
    assert_eq!(
        changes,
        vec![ViewChange::Highlight {
            target: Highlight::Pair {
                multiplier_index: 1,
                multiplicand_index: 1,
            }
        }]
    );
    let PhaseOutcome::Applied { changes, .. } = sequencer.complete_phase(next) else {
        panic!("fresh ticket must apply");
    };
    assert!(changes.contains(&ViewChange::RevealRowDigit {
        multiplier_index: 1,
        column: 0,
        digit: 5,
    }));
    assert_eq!(sequencer.view().carries_in(CarryLane::Row(1)).collect::<Vec<_>>(), vec![(1, 1)]);
}

#[test]
fn multiplication_keeps_only_the_newest_carry() {
    let mut sequencer = sequencer("99", "9");
    for _ in 0..2 {
        let Advance::Applied { .. } = sequencer.advance() else {
            panic!("advance must apply");
        };
        sequencer.settle();
        assert_eq!(sequencer.view().carries_in(CarryLane::Row(0)).count(), 1);
    }
}

#[test]
fn addition_phase_starts_without_carries() {
    for (a, b) in SELECTED_PAIRS {
        let timeline = timeline(a, b);
        let view = view_at(&timeline, timeline.multiplication_len() + 1, StepPhase::Cleared)
            .expect("product divider is within the timeline");
        assert!(view.carries.is_empty(), "{a} x {b}");
        assert!(view.highlight.is_none());
    }
}

#[test]
fn finished_view_matches_product() {
    for (a, b) in SELECTED_PAIRS {
        let mut sequencer = sequencer(a, b);
        run_to_end(&mut sequencer);
        let view = sequencer.view();
        assert_eq!(
            view.final_result.as_deref(),
            Some(sequencer.timeline().result_digits().as_slice())
        );
        assert!(view.carries.is_empty());
        assert!(view.highlight.is_none());
    }
}

#[test]
fn changes_at_rejects_cursor_out_of_range() {
    let sequencer = sequencer("5", "5");
    assert!(sequencer.changes_at(0).is_err());
    assert!(sequencer.changes_at(sequencer.total_steps()).is_ok());
    assert!(sequencer.changes_at(sequencer.total_steps() + 1).is_err());
}

#[test]
fn ticket_from_previous_operands_is_stale() {
    let mut sequencer = sequencer("23", "45");
    let Advance::Applied { next, .. } = sequencer.advance() else {
        panic!("first advance must apply");
    };
    sequencer
        .set_operands_text("67", "89")
        .expect("valid operands");
    let Advance::Applied { .. } = sequencer.advance() else {
        panic!("advance on fresh operands must apply");
    };
    assert_eq!(sequencer.complete_phase(next), PhaseOutcome::Stale);
    assert_eq!(sequencer.phase(), StepPhase::Highlighting);
}
