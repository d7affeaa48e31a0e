//! Text presenter snapshots.

use insta::assert_snapshot;

use crate::common::{run_to_end, sequencer, timeline};
use longmul_core::view_at;
use longmul_engine::text::{narrate, render_grid};
use longmul_types::StepPhase;

fn narration(multiplicand: &str, multiplier: &str) -> String {
    let timeline = timeline(multiplicand, multiplier);
    (1..=timeline.len())
        .map(|cursor| narrate(&timeline, cursor).expect("cursor within timeline"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn finished_grid(multiplicand: &str, multiplier: &str) -> String {
    let mut sequencer = sequencer(multiplicand, multiplier);
    run_to_end(&mut sequencer);
    render_grid(sequencer.timeline(), sequencer.view())
}

#[test]
fn snapshot_narration_99_times_99() {
    assert_snapshot!(narration("99", "99"), @r"
    9 x 9 = 81, write 1 carry 8
    9 x 9 + 8 = 89, write 9 carry 8
    write carry 8
    9 x 9 = 81, write 1 carry 8
    9 x 9 + 8 = 89, write 9 carry 8
    write carry 8
    partial products done
    column 0: 1 + 0 = 1, write 1
    column 1: 9 + 1 = 10, write 0 carry 1
    column 2: 8 + 9 + carry 1 = 18, write 8 carry 1
    column 3: 8 + carry 1 = 9, write 9
    99 x 99 = 9801
    ");
}

#[test]
fn snapshot_narration_with_zero_digit() {
    assert_snapshot!(narration("10", "10"), @r"
    0 x 0 = 0, write 0
    1 x 0 = 0, write 0
    0 x 1 = 0, write 0
    1 x 1 = 1, write 1
    partial products done
    column 0: 0 + 0 = 0, write 0
    column 1: 0 + 0 = 0, write 0
    column 2: 1 = 1, write 1
    10 x 10 = 100
    ");
}

#[test]
fn snapshot_grid_23_times_45() {
    assert_snapshot!(finished_grid("23", "45"), @r"
      23
    x 45
    ----
     115
     920
    ----
    1035
    ");
}

#[test]
fn snapshot_grid_987_times_999() {
    assert_snapshot!(finished_grid("987", "999"), @r"
       987
    x  999
    ------
      8883
     88830
    888300
    ------
    986013
    ");
}

#[test]
fn snapshot_grid_single_digits() {
    assert_snapshot!(finished_grid("7", "8"), @r"
      7
    x 8
    ---
     56
    ---
     56
    ");
}

#[test]
fn snapshot_grid_mid_multiplication() {
    let timeline = timeline("407", "38");
    let view = view_at(&timeline, 6, StepPhase::Cleared).expect("within timeline");
    assert_snapshot!(render_grid(&timeline, &view), @r"
      407
    x  38
    -----
     3256
      210
    ");
}
