//! Report assembly: filter, group, and echo the request back

use crate::{
    error::AppResult,
    models::{
        statistics::{StatisticsReport, StatisticsRequest},
        Entry,
    },
};

use super::{end_of_day, filter::filter_entries, grouping::group_and_select, start_of_day};

/// Compute the statistics report for an already validated request
pub fn build_report(entries: &[Entry], request: &StatisticsRequest) -> AppResult<StatisticsReport> {
    let filtered = filter_entries(entries, request);
    let dont_negate_cost = request.entry_type_filter.is_some();
    let rows = group_and_select(&filtered, request, 0, dont_negate_cost)?;

    Ok(StatisticsReport {
        entries_count: filtered.len(),
        date_from_filter: request.date_range_filter.map(|r| start_of_day(r.from)),
        date_to_filter: request.date_range_filter.and_then(|r| end_of_day(r.to)),
        entry_type_filter: request.entry_type_filter,
        category_filter: request.category_filter.clone(),
        tag_filter: request.tag_filter.clone(),
        select_values: request.select_values.clone(),
        rows,
    })
}
