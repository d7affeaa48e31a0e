//! Plain-text presentation: one line of narration per timeline entry and an
//! ASCII grid of the worked solution as far as it has been revealed.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use longmul_core::{CarryLane, RevealedDigit, StepTimeline, TimelineError, ViewState};
use longmul_types::{AdditionStep, DividerKind, MultiplicationStep, TimelineEntry};

/// One sentence describing the entry at `cursor` (1-based).
pub fn narrate(timeline: &StepTimeline, cursor: usize) -> Result<String, TimelineError> {
    let line = match timeline.entry_for_cursor(cursor)? {
        TimelineEntry::Multiply(step) => narrate_multiplication(timeline, step),
        TimelineEntry::Divider {
            divider: DividerKind::Product,
        } => "partial products done".to_string(),
        TimelineEntry::Add(step) => narrate_addition(step),
        TimelineEntry::Divider {
            divider: DividerKind::Sum,
        } => format!(
            "{} x {} = {}",
            timeline.multiplicand(),
            timeline.multiplier(),
            digits_to_string(&timeline.result_digits())
        ),
    };
    Ok(line)
}

fn narrate_multiplication(timeline: &StepTimeline, step: &MultiplicationStep) -> String {
    let Some(multiplicand_index) = step.multiplicand().index() else {
        return format!("write carry {}", step.display_digit());
    };
    let a = timeline.multiplicand().digit(multiplicand_index);
    let b = timeline.multiplier().digit(step.multiplier_index());

    let mut line = format!("{a} x {b}");
    if step.used_carry() > 0 {
        let _ = write!(line, " + {}", step.used_carry());
    }
    let _ = write!(line, " = {}, write {}", step.product(), step.display_digit());
    if step.produced_carry() > 0 {
        let _ = write!(line, " carry {}", step.produced_carry());
    }
    line
}

fn narrate_addition(step: &AdditionStep) -> String {
    let mut terms: Vec<String> = step.addends().iter().map(u8::to_string).collect();
    if step.used_carry() > 0 {
        terms.push(format!("carry {}", step.used_carry()));
    }
    let mut line = format!(
        "column {}: {} = {}, write {}",
        step.column_index(),
        terms.join(" + "),
        step.sum(),
        step.display_digit()
    );
    if step.produced_carry() > 0 {
        let _ = write!(line, " carry {}", step.produced_carry());
    }
    line
}

/// Render the operands, every revealed partial-product digit, the drawn
/// dividers, pending column-sum carries and the result.
///
/// Rows show their place-value padding zeros once their first digit is
/// revealed. The final result replaces the column-by-column reveal once the
/// sum divider is drawn.
#[must_use]
pub fn render_grid(timeline: &StepTimeline, view: &ViewState) -> String {
    let multiplicand = timeline.multiplicand().to_string();
    let multiplier = timeline.multiplier().to_string();
    let sum_carries = carry_cells(view.carries_in(CarryLane::Sum));
    let width = multiplicand
        .len()
        .max(multiplier.len() + 2)
        .max(timeline.width())
        .max(timeline.addition_len())
        .max(sum_carries.keys().next_back().map_or(0, |&column| column + 1));
    let place = timeline.place();

    let mut lines = vec![
        format!("{multiplicand:>width$}"),
        format!("x {multiplier:>w$}", w = width - 2),
        "-".repeat(width),
    ];

    for row in timeline.rows() {
        let Some(revealed) = view
            .rows
            .get(&row.multiplier_index())
            .filter(|digits| !digits.is_empty())
        else {
            continue;
        };
        let shift = place.row_shift(row.multiplier_index());
        lines.push(cells(width, |column| {
            find_digit(revealed, column).or((column < shift).then_some('0'))
        }));
    }

    if view.dividers.contains(&DividerKind::Product) {
        lines.push("-".repeat(width));
    }

    if !sum_carries.is_empty() {
        lines.push(cells(width, |column| sum_carries.get(&column).copied()));
    }

    if let Some(result) = &view.final_result {
        let result = digits_to_string(result);
        lines.push(format!("{result:>width$}"));
    } else if !view.result.is_empty() {
        lines.push(cells(width, |column| find_digit(&view.result, column)));
    }

    lines.join("\n")
}

fn cells(width: usize, mut at: impl FnMut(usize) -> Option<char>) -> String {
    (0..width).rev().map(|column| at(column).unwrap_or(' ')).collect()
}

/// Lay carries out by place value: a carry of 12 aimed at column 3 writes 2
/// in column 3 and 1 in column 4. Where digits overlap the higher column wins.
fn carry_cells(carries: impl Iterator<Item = (usize, u32)>) -> BTreeMap<usize, char> {
    let mut carries: Vec<_> = carries.collect();
    carries.sort_unstable_by_key(|&(column, _)| column);
    let mut cells = BTreeMap::new();
    for (column, value) in carries {
        for (offset, digit) in value.to_string().chars().rev().enumerate() {
            cells.insert(column + offset, digit);
        }
    }
    cells
}

fn find_digit(digits: &[RevealedDigit], column: usize) -> Option<char> {
    digits
        .iter()
        .find(|d| d.column == column)
        .map(|d| char::from(b'0' + d.digit))
}

fn digits_to_string(digits: &[u8]) -> String {
    digits.iter().map(|&d| char::from(b'0' + d)).collect()
}
