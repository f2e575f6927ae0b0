//! In-memory statistics engine
//!
//! Turns a user's entries and a [`StatisticsRequest`](crate::models::StatisticsRequest)
//! into a [`StatisticsReport`](crate::models::StatisticsReport):
//! validation, filtering, recursive grouping and aggregate selection.
//! Everything here is synchronous and works on borrowed entries.

pub mod filter;
pub mod grouping;
pub mod interval;
pub mod report;
pub mod select;
pub mod validate;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

pub use filter::filter_entries;
pub use grouping::group_and_select;
pub use report::build_report;
pub use select::select_values;
pub use validate::validate_request;

/// Smallest representable step between two instants
pub fn tick() -> Duration {
    Duration::nanoseconds(1)
}

/// Midnight (UTC) at the start of `date`
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// Last representable instant of `date`; `None` for the last calendar day
/// chrono can represent
pub fn end_of_day(date: NaiveDate) -> Option<DateTime<Utc>> {
    start_of_day(date.succ_opt()?).checked_sub_signed(tick())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::models::Entry;

    pub const SALARY: (&str, bool, i32) = ("salary", true, 1);
    pub const GIFT: (&str, bool, i32) = ("gift", true, 2);
    pub const FOOD: (&str, bool, i32) = ("food", false, 3);
    pub const TRANSPORT: (&str, bool, i32) = ("transport", false, 4);

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    pub fn entry(
        date: DateTime<Utc>,
        category: (&str, bool, i32),
        value: Decimal,
        tags: &[&str],
    ) -> Entry {
        Entry {
            date,
            value,
            category_keyword: category.0.to_string(),
            category_is_income: category.1,
            category_order_on_list: category.2,
            tag_names: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Six entries between 2022-05-12 and 2022-07-02, two of them untagged
    pub fn sample_entries() -> Vec<Entry> {
        vec![
            entry(at(2022, 5, 12, 9, 0), SALARY, dec!(3200), &["Work"]),
            entry(at(2022, 5, 14, 18, 30), FOOD, dec!(60.45), &["Family", "shopping"]),
            entry(at(2022, 5, 20, 7, 45), TRANSPORT, dec!(20.00), &[]),
            entry(at(2022, 6, 3, 12, 0), FOOD, dec!(17.65), &["Shopping"]),
            entry(at(2022, 6, 16, 10, 15), GIFT, dec!(59.56), &["Family"]),
            entry(at(2022, 7, 2, 20, 0), FOOD, dec!(2.51), &[]),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::date;
    use super::*;

    #[test]
    fn test_day_bounds() {
        let day = date(2022, 6, 1);
        assert_eq!(start_of_day(day).to_rfc3339(), "2022-06-01T00:00:00+00:00");
        assert_eq!(end_of_day(day).unwrap() + tick(), start_of_day(date(2022, 6, 2)));
    }

    #[test]
    fn test_end_of_last_day_is_none() {
        assert_eq!(end_of_day(NaiveDate::MAX), None);
        assert!(end_of_day(NaiveDate::MIN).is_some());
    }
}
