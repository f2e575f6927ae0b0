//! Repository layer for database operations

pub mod categories;
pub mod entries;
pub mod tags;

use sqlx::{Pool, Postgres};

pub use entries::EntrySource;

/// Per-table repositories sharing one connection pool
#[derive(Clone)]
pub struct Repository {
    pub entries: entries::EntriesRepository,
    pub categories: categories::CategoriesRepository,
    pub tags: tags::TagsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            entries: entries::EntriesRepository::new(pool.clone()),
            categories: categories::CategoriesRepository::new(pool.clone()),
            tags: tags::TagsRepository::new(pool),
        }
    }
}
