//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{categories, entries, health, statistics, tags};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Fintrack API",
        version = "1.0.0",
        description = "Personal finance tracker REST API"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Statistics
        statistics::generate_statistics,
        // Entries
        entries::list_entries,
        entries::get_entry,
        entries::create_entry,
        entries::update_entry,
        entries::delete_entry,
        // Categories
        categories::list_categories,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
        // Tags
        tags::list_tags,
        tags::create_tag,
        tags::delete_tag,
    ),
    components(
        schemas(
            // Statistics
            crate::models::statistics::StatisticsRequest,
            crate::models::statistics::DateRangeFilter,
            crate::models::statistics::TimeIntervalProperties,
            crate::models::statistics::EntryType,
            crate::models::statistics::GroupBy,
            crate::models::statistics::IntervalUnit,
            crate::models::statistics::Selection,
            statistics::StatisticsResponse,
            statistics::StatisticsRowResponse,
            // Entries
            crate::models::entry::EntryDetails,
            crate::models::entry::CreateEntry,
            crate::models::entry::UpdateEntry,
            crate::models::entry::EntryQuery,
            // Categories
            crate::models::category::Category,
            crate::models::category::CreateCategory,
            crate::models::category::UpdateCategory,
            // Tags
            crate::models::tag::Tag,
            crate::models::tag::CreateTag,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "statistics", description = "Aggregated statistics over entries"),
        (name = "entries", description = "Income and cost entries"),
        (name = "categories", description = "Entry categories"),
        (name = "tags", description = "Entry tags")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
