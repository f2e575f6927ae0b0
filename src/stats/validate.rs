//! Request validation, run before any entry is fetched

use std::collections::HashSet;
use std::hash::Hash;

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::statistics::{GroupBy, StatisticsRequest},
};

fn has_duplicates<T: Eq + Hash>(values: &[T]) -> bool {
    let mut seen = HashSet::with_capacity(values.len());
    values.iter().any(|v| !seen.insert(v))
}

/// Reject structurally invalid statistics requests
pub fn validate_request(request: &StatisticsRequest) -> AppResult<()> {
    request.validate()?;

    if has_duplicates(&request.select_values) {
        return Err(AppError::Validation(
            "select_values must not contain duplicates".to_string(),
        ));
    }

    if let Some(range) = &request.date_range_filter {
        if range.from > range.to {
            return Err(AppError::Validation(format!(
                "date_range_filter: from ({}) is after to ({})",
                range.from, range.to
            )));
        }
        if range.to.succ_opt().is_none() {
            return Err(AppError::Validation(format!(
                "date_range_filter: to ({}) is out of the supported date range",
                range.to
            )));
        }
    }

    let grouping = request.grouping();
    if has_duplicates(grouping) {
        return Err(AppError::Validation(
            "group_by must not contain duplicates".to_string(),
        ));
    }

    if grouping.contains(&GroupBy::TimeInterval)
        && request.group_by_time_interval_properties.is_none()
    {
        return Err(AppError::Validation(
            "group_by_time_interval_properties is required when grouping by time_interval"
                .to_string(),
        ));
    }

    if let Some(props) = &request.group_by_time_interval_properties {
        if props.interval_length < 1 {
            return Err(AppError::Validation(
                "interval_length must be at least 1".to_string(),
            ));
        }
    }

    Ok(())
}
