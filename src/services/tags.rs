//! Tags service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::tag::{CreateTag, Tag},
    repository::Repository,
};

#[derive(Clone)]
pub struct TagsService {
    repository: Repository,
}

impl TagsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, user_id: i32) -> AppResult<Vec<Tag>> {
        self.repository.tags.list(user_id).await
    }

    /// Create a tag; names are unique per user regardless of case
    pub async fn create(&self, user_id: i32, data: &CreateTag) -> AppResult<Tag> {
        data.validate()?;

        if self.repository.tags.name_exists(user_id, &data.name).await? {
            return Err(AppError::Conflict(format!("Tag '{}' already exists", data.name)));
        }

        self.repository.tags.create(user_id, &data.name).await
    }

    /// Delete a tag and detach it from every entry
    pub async fn delete(&self, user_id: i32, id: i32) -> AppResult<()> {
        self.repository.tags.delete(user_id, id).await
    }
}
