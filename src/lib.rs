//! Fintrack server
//!
//! REST JSON API for a personal finance tracker: income and cost entries,
//! their categories and tags, and a statistics engine that filters, groups
//! and aggregates a user's entries.

use std::sync::Arc;

use sqlx::PgPool;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod stats;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
    pub db: PgPool,
}

impl AppState {
    /// Wire repositories and services on top of a connection pool
    pub fn new(config: AppConfig, pool: PgPool) -> Self {
        let repository = repository::Repository::new(pool.clone());
        Self {
            config: Arc::new(config),
            services: Arc::new(services::Services::new(repository)),
            db: pool,
        }
    }
}
