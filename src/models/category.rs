//! Category model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Category record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Category {
    pub id: i32,
    /// Short identifier, unique per user (case-insensitive)
    pub keyword: String,
    /// Display name
    pub name: String,
    /// Entries in an income category count as income, all others as costs
    pub is_income: bool,
    /// Position of the category in lists and statistics
    pub order_on_list: i32,
    pub created_at: DateTime<Utc>,
}

/// Create category request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategory {
    #[validate(length(min = 1, max = 64, message = "Keyword must be 1 to 64 characters"))]
    pub keyword: String,
    #[validate(length(min = 1, max = 128, message = "Name must be 1 to 128 characters"))]
    pub name: String,
    pub is_income: bool,
    /// Defaults to the end of the list
    pub order_on_list: Option<i32>,
}

/// Update category request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCategory {
    #[validate(length(min = 1, max = 64, message = "Keyword must be 1 to 64 characters"))]
    pub keyword: Option<String>,
    #[validate(length(min = 1, max = 128, message = "Name must be 1 to 128 characters"))]
    pub name: Option<String>,
    pub is_income: Option<bool>,
    pub order_on_list: Option<i32>,
}
