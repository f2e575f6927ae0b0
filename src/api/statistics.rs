//! Statistics API endpoint

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::statistics::{
        EntryType, GroupKey, SelectedValues, Selection, StatisticsReport, StatisticsRequest,
        StatisticsRow,
    },
    AppState,
};

use super::AuthenticatedUser;

/// Statistics report
#[derive(Debug, Serialize, ToSchema)]
pub struct StatisticsResponse {
    /// Number of entries left after filtering
    pub entries_count: usize,
    pub date_from_filter: Option<DateTime<Utc>>,
    pub date_to_filter: Option<DateTime<Utc>>,
    pub entry_type_filter: Option<EntryType>,
    pub category_filter: Option<Vec<String>>,
    pub tag_filter: Option<Vec<String>>,
    pub select_values: Vec<Selection>,
    pub rows: Vec<StatisticsRowResponse>,
}

/// Node of the statistics tree; at most one group key is set
#[derive(Debug, Serialize, ToSchema)]
pub struct StatisticsRowResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_type: Option<EntryType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_keyword: Option<String>,
    /// Empty for the group of untagged entries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_name: Option<String>,
    /// Decimal values keyed by selection, in the requested order
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub values: Option<SelectedValues>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_rows: Option<Vec<StatisticsRowResponse>>,
}

impl From<StatisticsRow> for StatisticsRowResponse {
    fn from(row: StatisticsRow) -> Self {
        let mut response = StatisticsRowResponse {
            date_from: None,
            date_to: None,
            entry_type: None,
            category_keyword: None,
            tag_name: None,
            values: row.values,
            sub_rows: row
                .sub_rows
                .map(|rows| rows.into_iter().map(Into::into).collect()),
        };

        match row.key {
            Some(GroupKey::TimeInterval { date_from, date_to }) => {
                response.date_from = Some(date_from);
                response.date_to = Some(date_to);
            }
            Some(GroupKey::EntryType(entry_type)) => response.entry_type = Some(entry_type),
            Some(GroupKey::Category(keyword)) => response.category_keyword = Some(keyword),
            Some(GroupKey::Tag(name)) => response.tag_name = Some(name),
            None => {}
        }

        response
    }
}

impl From<StatisticsReport> for StatisticsResponse {
    fn from(report: StatisticsReport) -> Self {
        StatisticsResponse {
            entries_count: report.entries_count,
            date_from_filter: report.date_from_filter,
            date_to_filter: report.date_to_filter,
            entry_type_filter: report.entry_type_filter,
            category_filter: report.category_filter,
            tag_filter: report.tag_filter,
            select_values: report.select_values,
            rows: report.rows.into_iter().map(Into::into).collect(),
        }
    }
}

/// Compute statistics over the caller's entries
#[utoipa::path(
    post,
    path = "/statistics",
    tag = "statistics",
    security(("bearer_auth" = [])),
    request_body = StatisticsRequest,
    responses(
        (status = 200, description = "Statistics report", body = StatisticsResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse)
    )
)]
pub async fn generate_statistics(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<StatisticsRequest>,
) -> AppResult<Json<StatisticsResponse>> {
    let report = state
        .services
        .statistics
        .generate_statistics(claims.user_id, &request)
        .await?;
    Ok(Json(report.into()))
}
