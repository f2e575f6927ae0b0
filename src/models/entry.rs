//! Entry model (one income or cost transaction)

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Entry as consumed by the statistics engine.
///
/// `value` is the stored magnitude (always positive); the category decides
/// whether it counts as income or cost.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Entry {
    pub date: DateTime<Utc>,
    pub value: Decimal,
    pub category_keyword: String,
    pub category_is_income: bool,
    pub category_order_on_list: i32,
    pub tag_names: Vec<String>,
}

impl Entry {
    /// Value with cost entries negated unless `dont_negate_cost` is set
    pub fn normalized_value(&self, dont_negate_cost: bool) -> Decimal {
        if dont_negate_cost || self.category_is_income {
            self.value
        } else {
            -self.value
        }
    }
}

/// Entry record with its category and tags, as returned by the entries API
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EntryDetails {
    pub id: i32,
    pub category_id: i32,
    /// Keyword of the entry's category
    pub category_keyword: String,
    /// Whether the category is an income category
    pub is_income: bool,
    pub date: DateTime<Utc>,
    /// Positive magnitude of the transaction
    #[schema(value_type = String)]
    pub value: Decimal,
    pub description: Option<String>,
    /// Tag names, sorted case-insensitively
    pub tag_names: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create entry request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEntry {
    pub category_id: i32,
    pub date: DateTime<Utc>,
    /// Positive magnitude of the transaction
    #[schema(value_type = String)]
    pub value: Decimal,
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,
    /// IDs of tags attached to the entry
    #[serde(default)]
    pub tag_ids: Vec<i32>,
}

/// Update entry request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateEntry {
    pub category_id: Option<i32>,
    pub date: Option<DateTime<Utc>>,
    #[schema(value_type = Option<String>)]
    pub value: Option<Decimal>,
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,
    /// Replaces the entry's tags when present
    pub tag_ids: Option<Vec<i32>>,
}

/// Query parameters for entries
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct EntryQuery {
    /// Filter by start date (YYYY-MM-DD)
    pub start_date: Option<String>,
    /// Filter by end date (YYYY-MM-DD), inclusive
    pub end_date: Option<String>,
}
