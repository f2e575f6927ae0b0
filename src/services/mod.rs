//! Business logic services

pub mod categories;
pub mod entries;
pub mod statistics;
pub mod tags;

use std::sync::Arc;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub entries: entries::EntriesService,
    pub categories: categories::CategoriesService,
    pub tags: tags::TagsService,
    pub statistics: statistics::StatisticsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            statistics: statistics::StatisticsService::new(Arc::new(repository.entries.clone())),
            entries: entries::EntriesService::new(repository.clone()),
            categories: categories::CategoriesService::new(repository.clone()),
            tags: tags::TagsService::new(repository),
        }
    }
}
