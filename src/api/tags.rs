//! Tags API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::tag::{CreateTag, Tag},
    AppState,
};

use super::AuthenticatedUser;

/// List the caller's tags
#[utoipa::path(
    get,
    path = "/tags",
    tag = "tags",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Tags list", body = Vec<Tag>)
    )
)]
pub async fn list_tags(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Tag>>> {
    let tags = state.services.tags.list(claims.user_id).await?;
    Ok(Json(tags))
}

/// Create a tag
#[utoipa::path(
    post,
    path = "/tags",
    tag = "tags",
    security(("bearer_auth" = [])),
    request_body = CreateTag,
    responses(
        (status = 201, description = "Tag created", body = Tag),
        (status = 409, description = "Tag already exists", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_tag(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateTag>,
) -> AppResult<(StatusCode, Json<Tag>)> {
    let tag = state.services.tags.create(claims.user_id, &data).await?;
    Ok((StatusCode::CREATED, Json(tag)))
}

/// Delete a tag
#[utoipa::path(
    delete,
    path = "/tags/{id}",
    tag = "tags",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Tag ID")),
    responses(
        (status = 204, description = "Tag deleted"),
        (status = 404, description = "Tag not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_tag(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.tags.delete(claims.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
