//! Entries API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::entry::{CreateEntry, EntryDetails, EntryQuery, UpdateEntry},
    AppState,
};

use super::AuthenticatedUser;

/// List the caller's entries, newest first
#[utoipa::path(
    get,
    path = "/entries",
    tag = "entries",
    security(("bearer_auth" = [])),
    params(EntryQuery),
    responses(
        (status = 200, description = "Entries list", body = Vec<EntryDetails>),
        (status = 400, description = "Invalid date", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_entries(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<EntryQuery>,
) -> AppResult<Json<Vec<EntryDetails>>> {
    let entries = state.services.entries.list(claims.user_id, &query).await?;
    Ok(Json(entries))
}

/// Get entry by ID
#[utoipa::path(
    get,
    path = "/entries/{id}",
    tag = "entries",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Entry ID")),
    responses(
        (status = 200, description = "Entry details", body = EntryDetails),
        (status = 404, description = "Entry not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_entry(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<EntryDetails>> {
    let entry = state.services.entries.get_by_id(claims.user_id, id).await?;
    Ok(Json(entry))
}

/// Create an entry
#[utoipa::path(
    post,
    path = "/entries",
    tag = "entries",
    security(("bearer_auth" = [])),
    request_body = CreateEntry,
    responses(
        (status = 201, description = "Entry created", body = EntryDetails),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 404, description = "Unknown category or tag", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_entry(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateEntry>,
) -> AppResult<(StatusCode, Json<EntryDetails>)> {
    let entry = state.services.entries.create(claims.user_id, &data).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// Update an entry
#[utoipa::path(
    put,
    path = "/entries/{id}",
    tag = "entries",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Entry ID")),
    request_body = UpdateEntry,
    responses(
        (status = 200, description = "Entry updated", body = EntryDetails),
        (status = 404, description = "Entry not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_entry(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateEntry>,
) -> AppResult<Json<EntryDetails>> {
    let entry = state.services.entries.update(claims.user_id, id, &data).await?;
    Ok(Json(entry))
}

/// Delete an entry
#[utoipa::path(
    delete,
    path = "/entries/{id}",
    tag = "entries",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Entry ID")),
    responses(
        (status = 204, description = "Entry deleted"),
        (status = 404, description = "Entry not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_entry(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.entries.delete(claims.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
