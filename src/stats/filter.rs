//! Filter stage: narrows a user's entries according to the request filters

use crate::models::{statistics::StatisticsRequest, Entry};

use super::{end_of_day, start_of_day};

fn contains_ignore_case(values: &[String], needle: &str) -> bool {
    let needle = needle.to_lowercase();
    values.iter().any(|v| v.to_lowercase() == needle)
}

/// Apply the request filters (date range, entry type, category, tag) in that
/// order. Filters that are not set are skipped; the others are AND-ed.
pub fn filter_entries<'a>(entries: &'a [Entry], request: &StatisticsRequest) -> Vec<&'a Entry> {
    let mut filtered: Vec<&Entry> = entries.iter().collect();

    if let Some(range) = &request.date_range_filter {
        let from = start_of_day(range.from);
        // No end of day past chrono's last date: every later entry is in range
        let to = end_of_day(range.to);
        filtered.retain(|e| e.date >= from && to.map_or(true, |to| e.date <= to));
    }

    if let Some(entry_type) = request.entry_type_filter {
        filtered.retain(|e| entry_type.matches(e.category_is_income));
    }

    if let Some(categories) = &request.category_filter {
        filtered.retain(|e| contains_ignore_case(categories, &e.category_keyword));
    }

    if let Some(tags) = &request.tag_filter {
        filtered.retain(|e| e.tag_names.iter().any(|t| contains_ignore_case(tags, t)));
    }

    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::statistics::{DateRangeFilter, EntryType, Selection};
    use crate::stats::fixtures::{at, date, entry, sample_entries, FOOD};
    use rust_decimal_macros::dec;

    fn request() -> StatisticsRequest {
        StatisticsRequest {
            select_values: vec![Selection::Count],
            ..Default::default()
        }
    }

    fn values(entries: &[&Entry]) -> Vec<String> {
        entries.iter().map(|e| e.value.to_string()).collect()
    }

    #[test]
    fn test_no_filters_keeps_everything() {
        let entries = sample_entries();
        assert_eq!(filter_entries(&entries, &request()).len(), entries.len());
    }

    #[test]
    fn test_date_range_is_inclusive_to_end_of_day() {
        let entries = vec![
            entry(at(2022, 5, 31, 23, 59), FOOD, dec!(1), &[]),
            entry(at(2022, 6, 1, 0, 0), FOOD, dec!(2), &[]),
            entry(at(2022, 6, 30, 23, 59), FOOD, dec!(3), &[]),
            entry(at(2022, 7, 1, 0, 0), FOOD, dec!(4), &[]),
        ];
        let mut req = request();
        req.date_range_filter = Some(DateRangeFilter {
            from: date(2022, 6, 1),
            to: date(2022, 6, 30),
        });

        assert_eq!(values(&filter_entries(&entries, &req)), vec!["2", "3"]);
    }

    #[test]
    fn test_date_range_up_to_last_supported_day() {
        let entries = sample_entries();
        let mut req = request();
        req.date_range_filter = Some(DateRangeFilter {
            from: date(2022, 6, 1),
            to: chrono::NaiveDate::MAX,
        });

        assert_eq!(filter_entries(&entries, &req).len(), 3);
    }

    #[test]
    fn test_entry_type_filter() {
        let entries = sample_entries();
        let mut req = request();

        req.entry_type_filter = Some(EntryType::Income);
        let income = filter_entries(&entries, &req);
        assert_eq!(values(&income), vec!["3200", "59.56"]);

        req.entry_type_filter = Some(EntryType::Cost);
        let cost = filter_entries(&entries, &req);
        assert_eq!(cost.len(), 4);
        assert!(cost.iter().all(|e| !e.category_is_income));
    }

    #[test]
    fn test_category_filter_ignores_case() {
        let entries = sample_entries();
        let mut req = request();
        req.category_filter = Some(vec!["FOOD".to_string(), "unknown".to_string()]);

        assert_eq!(values(&filter_entries(&entries, &req)), vec!["60.45", "17.65", "2.51"]);
    }

    #[test]
    fn test_tag_filter_matches_any_tag() {
        let entries = sample_entries();
        let mut req = request();
        req.tag_filter = Some(vec!["SHOPPING".to_string(), "work".to_string()]);

        assert_eq!(values(&filter_entries(&entries, &req)), vec!["3200", "60.45", "17.65"]);
    }

    #[test]
    fn test_unknown_values_filter_to_empty() {
        let entries = sample_entries();
        let mut req = request();
        req.tag_filter = Some(vec!["holiday".to_string()]);
        assert!(filter_entries(&entries, &req).is_empty());
    }

    #[test]
    fn test_combined_filters_equal_sequential_application() {
        let entries = sample_entries();

        let mut combined = request();
        combined.entry_type_filter = Some(EntryType::Cost);
        combined.tag_filter = Some(vec!["family".to_string()]);
        let at_once = filter_entries(&entries, &combined);

        let mut by_type = request();
        by_type.entry_type_filter = Some(EntryType::Cost);
        let first: Vec<Entry> = filter_entries(&entries, &by_type)
            .into_iter()
            .cloned()
            .collect();
        let mut by_tag = request();
        by_tag.tag_filter = Some(vec!["family".to_string()]);
        let sequential = filter_entries(&first, &by_tag);

        assert_eq!(values(&at_once), values(&sequential));
        assert_eq!(values(&at_once), vec!["60.45"]);
        assert!(at_once.iter().all(|e| entries.contains(e)));
    }
}
