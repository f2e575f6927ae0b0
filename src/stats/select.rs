//! Aggregate selection over a group of entries

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{
    statistics::{SelectedValues, Selection},
    Entry,
};

/// Round to cents, halves away from zero
fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn average(values: &[Decimal]) -> Decimal {
    if values.is_empty() {
        return Decimal::ZERO;
    }
    let sum: Decimal = values.iter().sum();
    round_cents(sum / Decimal::from(values.len()))
}

/// Median of `values`, averaging the two middle values for even lengths
pub fn median(values: &[Decimal]) -> Decimal {
    if values.is_empty() {
        return Decimal::ZERO;
    }
    let mut sorted = values.to_vec();
    sorted.sort();

    let mid = sorted.len() / 2;
    let median = if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / Decimal::TWO
    };
    round_cents(median)
}

/// Compute every requested selection over `entries`.
///
/// Cost entries are negated first unless `dont_negate_cost` is set.
pub fn select_values(
    entries: &[&Entry],
    selections: &[Selection],
    dont_negate_cost: bool,
) -> SelectedValues {
    let values: Vec<Decimal> = entries
        .iter()
        .map(|e| e.normalized_value(dont_negate_cost))
        .collect();

    selections
        .iter()
        .map(|selection| {
            let value = match selection {
                Selection::Count => Decimal::from(values.len()),
                Selection::Min => values.iter().min().copied().unwrap_or_default(),
                Selection::Max => values.iter().max().copied().unwrap_or_default(),
                Selection::Sum => values.iter().sum(),
                Selection::Average => average(&values),
                Selection::Median => median(&values),
            };
            (*selection, value)
        })
        .collect()
}
