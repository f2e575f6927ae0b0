//! Categories service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::category::{Category, CreateCategory, UpdateCategory},
    repository::Repository,
};

#[derive(Clone)]
pub struct CategoriesService {
    repository: Repository,
}

impl CategoriesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, user_id: i32) -> AppResult<Vec<Category>> {
        self.repository.categories.list(user_id).await
    }

    /// Create a category; the keyword must be unique for the user
    pub async fn create(&self, user_id: i32, data: &CreateCategory) -> AppResult<Category> {
        data.validate()?;

        if self
            .repository
            .categories
            .keyword_exists(user_id, &data.keyword, None)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "Category '{}' already exists",
                data.keyword
            )));
        }

        let order_on_list = match data.order_on_list {
            Some(order) => order,
            None => self.repository.categories.next_order(user_id).await?,
        };

        let category = self
            .repository
            .categories
            .create(user_id, data, order_on_list)
            .await?;
        tracing::info!("User {} created category '{}'", user_id, category.keyword);
        Ok(category)
    }

    pub async fn update(&self, user_id: i32, id: i32, data: &UpdateCategory) -> AppResult<Category> {
        data.validate()?;

        if let Some(keyword) = &data.keyword {
            if self
                .repository
                .categories
                .keyword_exists(user_id, keyword, Some(id))
                .await?
            {
                return Err(AppError::Conflict(format!(
                    "Category '{}' already exists",
                    keyword
                )));
            }
        }

        self.repository.categories.update(user_id, id, data).await
    }

    /// Delete a category that no entry refers to
    pub async fn delete(&self, user_id: i32, id: i32) -> AppResult<()> {
        let category = self.repository.categories.get_by_id(user_id, id).await?;

        let used_by = self.repository.categories.count_entries(user_id, id).await?;
        if used_by > 0 {
            return Err(AppError::Conflict(format!(
                "Category '{}' is used by {} entries",
                category.keyword, used_by
            )));
        }

        self.repository.categories.delete(user_id, id).await
    }
}
