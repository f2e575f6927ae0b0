//! Data models for Fintrack

pub mod category;
pub mod claims;
pub mod entry;
pub mod statistics;
pub mod tag;

// Re-export commonly used types
pub use category::Category;
pub use claims::UserClaims;
pub use entry::{Entry, EntryDetails};
pub use statistics::{
    EntryType, GroupBy, GroupKey, IntervalUnit, Selection, StatisticsReport, StatisticsRequest,
    StatisticsRow,
};
pub use tag::Tag;
