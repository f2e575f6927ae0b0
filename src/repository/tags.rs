//! Tags repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::tag::Tag,
};

#[derive(Clone)]
pub struct TagsRepository {
    pool: Pool<Postgres>,
}

impl TagsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List a user's tags by name
    pub async fn list(&self, user_id: i32) -> AppResult<Vec<Tag>> {
        let tags = sqlx::query_as::<_, Tag>(
            "SELECT id, name, created_at FROM tags WHERE user_id = $1 ORDER BY LOWER(name)",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(tags)
    }

    /// Whether the user already has a tag with this name (case-insensitive)
    pub async fn name_exists(&self, user_id: i32, name: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM tags WHERE user_id = $1 AND LOWER(name) = LOWER($2))",
        )
        .bind(user_id)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// How many of `ids` are tags owned by the user
    pub async fn count_owned(&self, user_id: i32, ids: &[i32]) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM tags WHERE user_id = $1 AND id = ANY($2)",
        )
        .bind(user_id)
        .bind(ids)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    pub async fn create(&self, user_id: i32, name: &str) -> AppResult<Tag> {
        let tag = sqlx::query_as::<_, Tag>(
            "INSERT INTO tags (user_id, name) VALUES ($1, $2) RETURNING id, name, created_at",
        )
        .bind(user_id)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(tag)
    }

    /// Delete a tag; its links to entries go with it
    pub async fn delete(&self, user_id: i32, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM tags WHERE user_id = $1 AND id = $2")
            .bind(user_id)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Tag {} not found", id)));
        }
        Ok(())
    }
}
