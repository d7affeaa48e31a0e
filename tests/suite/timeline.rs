//! Properties of generated step timelines.

use crate::common::{SELECTED_PAIRS, decimal_digits, timeline};
use longmul_core::StepTimeline;
use longmul_types::{DividerKind, MultiplicandSlot, Operand, TimelineEntry};

fn all_pairs() -> impl Iterator<Item = StepTimeline> {
    let grid = (0..=120_u64).flat_map(|a| {
        (0..=120_u64).map(move |b| StepTimeline::generate(&Operand::new(a), &Operand::new(b)))
    });
    let selected = SELECTED_PAIRS.iter().map(|(a, b)| timeline(a, b));
    grid.chain(selected)
}

#[test]
fn addition_digits_spell_the_product() {
    for timeline in all_pairs() {
        assert_eq!(
            timeline.result_digits(),
            decimal_digits(timeline.product()),
            "{} x {}",
            timeline.multiplicand(),
            timeline.multiplier()
        );
    }
}

#[test]
fn multiplication_carries_chain_within_each_row() {
    for timeline in all_pairs() {
        let mut row = None;
        let mut carry = 0;
        for step in timeline.multiplication_steps() {
            if row != Some(step.multiplier_index()) {
                assert_eq!(carry, 0, "previous row left a carry");
                row = Some(step.multiplier_index());
                carry = 0;
            }
            if step.is_flush() {
                assert_eq!(step.product(), carry);
                assert_eq!(step.produced_carry(), 0);
            } else {
                assert_eq!(step.used_carry(), carry);
            }
            carry = step.produced_carry();
        }
        assert_eq!(carry, 0);
        assert!(timeline.pending_carries().is_empty());
    }
}

#[test]
fn multiplication_steps_satisfy_digit_arithmetic() {
    for timeline in all_pairs() {
        for step in timeline.multiplication_steps() {
            assert_eq!(step.display_digit(), step.product() % 10);
            assert_eq!(step.produced_carry(), step.product() / 10);
            if let MultiplicandSlot::Digit(index) = step.multiplicand() {
                let a = timeline.multiplicand().digit(index);
                let b = timeline.multiplier().digit(step.multiplier_index());
                assert_eq!(step.product(), a * b + step.used_carry());
            }
        }
    }
}

#[test]
fn addition_carries_chain_across_columns() {
    for timeline in all_pairs() {
        let mut carry = 0;
        for step in timeline.addition_steps() {
            assert_eq!(step.used_carry(), carry);
            let addend_sum: u32 = step.addends().iter().map(|&d| u32::from(d)).sum();
            assert_eq!(step.sum(), addend_sum + step.used_carry());
            assert_eq!(u32::from(step.display_digit()), step.sum() % 10);
            assert_eq!(step.produced_carry(), step.sum() / 10);
            carry = step.produced_carry();
        }
        assert_eq!(carry, 0, "final column must absorb every carry");
    }
}

#[test]
fn step_count_formula_holds() {
    for timeline in all_pairs() {
        let a_len = timeline.multiplicand().len();
        let b_len = timeline.multiplier().len();
        assert_eq!(
            timeline.multiplication_len(),
            a_len * b_len + timeline.overflowed_rows()
        );
        assert_eq!(
            timeline.len(),
            timeline.multiplication_len() + 1 + timeline.addition_len() + 1
        );
        assert_eq!(timeline.rows().len(), b_len);
    }
}

#[test]
fn columns_cover_the_width_without_gaps() {
    for timeline in all_pairs() {
        let columns: Vec<usize> = timeline
            .addition_steps()
            .map(|step| step.column_index())
            .collect();
        let width = timeline.width();
        assert!(columns.len() == width || columns.len() == width + 1);
        assert!(columns.iter().copied().eq(0..columns.len()));
    }
}

#[test]
fn dividers_separate_the_phases() {
    for timeline in all_pairs() {
        let entries = timeline.entries();
        let product_divider = timeline.multiplication_len();
        assert!(entries[..product_divider]
            .iter()
            .all(|entry| matches!(entry, TimelineEntry::Multiply(_))));
        assert_eq!(
            entries[product_divider],
            TimelineEntry::Divider {
                divider: DividerKind::Product
            }
        );
        assert!(entries[product_divider + 1..entries.len() - 1]
            .iter()
            .all(|entry| matches!(entry, TimelineEntry::Add(_))));
        assert_eq!(
            entries.last(),
            Some(&TimelineEntry::Divider {
                divider: DividerKind::Sum
            })
        );
    }
}

#[test]
fn generation_is_deterministic() {
    for (a, b) in SELECTED_PAIRS {
        assert_eq!(timeline(a, b), timeline(a, b));
    }
}

#[test]
fn scenario_23_times_45() {
    let timeline = timeline("23", "45");
    assert_eq!(timeline.result_digits(), vec![1, 0, 3, 5]);
    let first = timeline
        .multiplication_steps()
        .next()
        .expect("at least one step");
    assert_eq!(first.multiplier_index(), 1);
    assert_eq!(first.multiplicand(), MultiplicandSlot::Digit(1));
    assert_eq!(first.product(), 15);
    assert_eq!(first.used_carry(), 0);
    assert_eq!(first.produced_carry(), 1);
    assert_eq!(first.display_digit(), 5);
}

#[test]
fn scenario_9_times_9_flushes_its_carry() {
    let timeline = timeline("9", "9");
    let steps: Vec<_> = timeline.multiplication_steps().collect();
    assert_eq!(steps.len(), 2);
    assert_eq!(steps[0].display_digit(), 1);
    assert_eq!(steps[0].produced_carry(), 8);
    assert!(steps[1].is_flush());
    assert_eq!(steps[1].display_digit(), 8);
    assert_eq!(timeline.result_digits(), vec![8, 1]);
}

#[test]
fn scenario_10_times_10_keeps_the_zero_row() {
    let timeline = timeline("10", "10");
    let ones_row = timeline.row(1).expect("row for the multiplier's ones digit");
    assert!(ones_row.digits().iter().all(|&d| d == 0));
    assert_eq!(timeline.result_digits(), vec![1, 0, 0]);
}

#[test]
fn scenario_zero_operand() {
    let timeline = timeline("0", "7");
    assert_eq!(timeline.product(), 0);
    assert_eq!(timeline.result_digits(), vec![0]);
}

#[test]
fn scenario_99_times_99_sums_overlapping_rows() {
    let timeline = timeline("99", "99");
    assert_eq!(timeline.result_digits(), vec![9, 8, 0, 1]);
    let column_two = timeline
        .addition_steps()
        .find(|step| step.column_index() == 2)
        .expect("column 2 exists");
    assert_eq!(column_two.addends(), &[8, 9]);
    assert_eq!(column_two.used_carry(), 1);
    assert_eq!(column_two.sum(), 18);
}

#[test]
fn three_rows_overlap_in_one_column() {
    let timeline = timeline("987", "999");
    let column_two = timeline
        .addition_steps()
        .find(|step| step.column_index() == 2)
        .expect("column 2 exists");
    assert_eq!(column_two.addends().len(), 3);
    assert_eq!(timeline.product(), 986_013);
    assert_eq!(timeline.result_digits(), decimal_digits(986_013));
}

#[test]
fn timeline_serializes_entries_with_kind_tags() {
    let json = serde_json::to_value(timeline("9", "9")).expect("timeline serializes");
    let entries = json["entries"].as_array().expect("entries array");
    assert_eq!(entries.len(), 6);
    assert_eq!(entries[0]["kind"], "multiply");
    assert_eq!(entries[2]["kind"], "divider");
    assert_eq!(entries[3]["kind"], "add");
}
