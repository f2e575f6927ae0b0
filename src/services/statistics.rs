//! Statistics service

use std::sync::Arc;

use crate::{
    error::AppResult,
    models::statistics::{StatisticsReport, StatisticsRequest},
    repository::EntrySource,
    stats,
};

#[derive(Clone)]
pub struct StatisticsService {
    source: Arc<dyn EntrySource>,
}

impl StatisticsService {
    pub fn new(source: Arc<dyn EntrySource>) -> Self {
        Self { source }
    }

    /// Validate the request, load the user's entries and compute the report.
    /// Entries are not loaded when the request is invalid.
    pub async fn generate_statistics(
        &self,
        user_id: i32,
        request: &StatisticsRequest,
    ) -> AppResult<StatisticsReport> {
        stats::validate_request(request)?;

        let entries = self.source.get_all_by_user_id(user_id).await?;
        let report = stats::build_report(&entries, request)?;

        tracing::debug!(
            "Statistics for user {}: {} of {} entries, {} top-level rows",
            user_id,
            report.entries_count,
            entries.len(),
            report.rows.len()
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::statistics::{GroupBy, Selection};
    use crate::repository::entries::MockEntrySource;
    use crate::stats::fixtures::sample_entries;
    use mockall::predicate::eq;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_invalid_request_does_not_load_entries() {
        let mut source = MockEntrySource::new();
        source.expect_get_all_by_user_id().times(0);
        let service = StatisticsService::new(Arc::new(source));

        let request = StatisticsRequest {
            select_values: vec![],
            ..Default::default()
        };
        let result = service.generate_statistics(7, &request).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_loads_entries_of_requesting_user() {
        let mut source = MockEntrySource::new();
        source
            .expect_get_all_by_user_id()
            .with(eq(7))
            .times(1)
            .returning(|_| Ok(sample_entries()));
        let service = StatisticsService::new(Arc::new(source));

        let request = StatisticsRequest {
            group_by: Some(vec![GroupBy::EntryType]),
            select_values: vec![Selection::Sum],
            ..Default::default()
        };
        let report = service.generate_statistics(7, &request).await.unwrap();

        assert_eq!(report.entries_count, 6);
        assert_eq!(report.rows.len(), 2);
        let income = report.rows[1].values.as_ref().unwrap();
        assert_eq!(income[&Selection::Sum], dec!(3259.56));
    }

    #[tokio::test]
    async fn test_source_errors_propagate() {
        let mut source = MockEntrySource::new();
        source
            .expect_get_all_by_user_id()
            .returning(|_| Err(AppError::Internal("boom".to_string())));
        let service = StatisticsService::new(Arc::new(source));

        let request = StatisticsRequest {
            select_values: vec![Selection::Count],
            ..Default::default()
        };
        let result = service.generate_statistics(1, &request).await;

        assert!(matches!(result, Err(AppError::Internal(_))));
    }
}
