//! Calendar-aware time buckets anchored on a reference date

use chrono::{DateTime, Days, Months, NaiveDate, Utc};

use crate::{
    error::{AppError, AppResult},
    models::{
        statistics::{IntervalUnit, TimeIntervalProperties},
        Entry,
    },
};

use super::{start_of_day, tick};

/// Non-empty bucket of entries between two inclusive instants
#[derive(Debug)]
pub struct TimeBucket<'a> {
    pub date_from: DateTime<Utc>,
    pub date_to: DateTime<Utc>,
    pub entries: Vec<&'a Entry>,
}

/// Move `date` by `steps` units (negative goes back in time).
/// Month and year steps clamp to the last day of shorter months.
pub fn shift(date: NaiveDate, unit: IntervalUnit, steps: i64) -> Option<NaiveDate> {
    match unit {
        IntervalUnit::Day => {
            let days = Days::new(steps.unsigned_abs());
            if steps >= 0 {
                date.checked_add_days(days)
            } else {
                date.checked_sub_days(days)
            }
        }
        IntervalUnit::Month => shift_months(date, steps),
        IntervalUnit::Year => shift_months(date, steps.checked_mul(12)?),
    }
}

fn shift_months(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let delta = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        date.checked_add_months(delta)
    } else {
        date.checked_sub_months(delta)
    }
}

/// Move a period start one interval forward (`direction` 1) or back (-1).
/// Each step clamps against the previous start, so a Mar 31 start walks back
/// to Feb 28 and then Jan 28.
fn step(
    start: NaiveDate,
    props: &TimeIntervalProperties,
    direction: i64,
) -> AppResult<NaiveDate> {
    shift(
        start,
        props.interval_unit,
        direction * i64::from(props.interval_length),
    )
    .ok_or_else(|| {
        AppError::Validation("time interval exceeds the supported date range".to_string())
    })
}

/// Split `entries` into consecutive buckets of `interval_length` units.
///
/// The period start walks back from `reference_date` one interval at a time
/// until it is at or before the oldest entry, then forward one interval at a
/// time until a bucket reaches the newest entry. Empty buckets are skipped.
pub fn time_buckets<'a>(
    entries: &[&'a Entry],
    props: &TimeIntervalProperties,
) -> AppResult<Vec<TimeBucket<'a>>> {
    let (Some(min_date), Some(max_date)) = (
        entries.iter().map(|e| e.date).min(),
        entries.iter().map(|e| e.date).max(),
    ) else {
        return Ok(Vec::new());
    };

    let mut period_start = props.reference_date;
    while start_of_day(period_start) > min_date {
        period_start = step(period_start, props, -1)?;
    }

    let mut buckets = Vec::new();
    loop {
        let next_start = step(period_start, props, 1)?;
        let date_from = start_of_day(period_start);
        let date_to = start_of_day(next_start)
            .checked_sub_signed(tick())
            .ok_or_else(|| AppError::Internal("period end underflow".to_string()))?;

        let members: Vec<&Entry> = entries
            .iter()
            .copied()
            .filter(|e| e.date >= date_from && e.date <= date_to)
            .collect();
        if !members.is_empty() {
            buckets.push(TimeBucket {
                date_from,
                date_to,
                entries: members,
            });
        }

        if date_to >= max_date {
            break;
        }
        period_start = next_start;
    }

    Ok(buckets)
}
