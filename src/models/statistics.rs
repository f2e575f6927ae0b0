//! Statistics request and report types

use chrono::{DateTime, NaiveDate, Utc};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Entry type, derived from the entry's category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    Income,
    Cost,
}

impl EntryType {
    pub fn matches(self, is_income: bool) -> bool {
        match self {
            EntryType::Income => is_income,
            EntryType::Cost => !is_income,
        }
    }
}

/// Grouping dimension; the position in `group_by` is the nesting depth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    TimeInterval,
    EntryType,
    Category,
    Tag,
}

/// Calendar unit of a time interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum IntervalUnit {
    Day,
    Month,
    Year,
}

/// Aggregate computed over a group of entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    Count,
    Min,
    Max,
    Sum,
    Average,
    Median,
}

/// Inclusive range of calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DateRangeFilter {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// Bucketing parameters for `time_interval` grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TimeIntervalProperties {
    /// Buckets are aligned on this date
    pub reference_date: NaiveDate,
    /// Number of units per bucket (at least 1)
    pub interval_length: i32,
    pub interval_unit: IntervalUnit,
}

/// Statistics request
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct StatisticsRequest {
    pub date_range_filter: Option<DateRangeFilter>,
    pub entry_type_filter: Option<EntryType>,
    /// Category keywords (case-insensitive)
    pub category_filter: Option<Vec<String>>,
    /// Tag names (case-insensitive); an entry matches if any of its tags matches
    pub tag_filter: Option<Vec<String>>,
    /// Grouping dimensions, outermost first
    pub group_by: Option<Vec<GroupBy>>,
    /// Required when `group_by` contains `time_interval`
    pub group_by_time_interval_properties: Option<TimeIntervalProperties>,
    #[validate(length(min = 1, message = "At least one value must be selected"))]
    pub select_values: Vec<Selection>,
    /// Compute values on every grouping level instead of the deepest one only
    #[serde(default)]
    pub select_on_all_levels: bool,
}

impl StatisticsRequest {
    /// Grouping dimensions, empty when none were requested
    pub fn grouping(&self) -> &[GroupBy] {
        self.group_by.as_deref().unwrap_or_default()
    }
}

/// Computed values keyed by selection, in the requested order
pub type SelectedValues = IndexMap<Selection, Decimal>;

/// What a statistics row was grouped on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupKey {
    TimeInterval {
        date_from: DateTime<Utc>,
        date_to: DateTime<Utc>,
    },
    EntryType(EntryType),
    Category(String),
    /// Empty name for the group of untagged entries
    Tag(String),
}

/// Node of the statistics tree
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsRow {
    /// `None` only for the total row of an ungrouped request
    pub key: Option<GroupKey>,
    pub values: Option<SelectedValues>,
    pub sub_rows: Option<Vec<StatisticsRow>>,
}

/// Result of a statistics request
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsReport {
    /// Number of entries left after filtering
    pub entries_count: usize,
    /// Start of the first day of the date filter
    pub date_from_filter: Option<DateTime<Utc>>,
    /// Last instant of the last day of the date filter
    pub date_to_filter: Option<DateTime<Utc>>,
    pub entry_type_filter: Option<EntryType>,
    pub category_filter: Option<Vec<String>>,
    pub tag_filter: Option<Vec<String>>,
    pub select_values: Vec<Selection>,
    pub rows: Vec<StatisticsRow>,
}
