//! Categories repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::category::{Category, CreateCategory, UpdateCategory},
};

const CATEGORY_COLUMNS: &str = "id, keyword, name, is_income, order_on_list, created_at";

#[derive(Clone)]
pub struct CategoriesRepository {
    pool: Pool<Postgres>,
}

impl CategoriesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List a user's categories in display order
    pub async fn list(&self, user_id: i32) -> AppResult<Vec<Category>> {
        let query = format!(
            "SELECT {} FROM categories WHERE user_id = $1 ORDER BY order_on_list, keyword",
            CATEGORY_COLUMNS
        );
        let categories = sqlx::query_as::<_, Category>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(categories)
    }

    /// Get one of the user's categories by ID
    pub async fn get_by_id(&self, user_id: i32, id: i32) -> AppResult<Category> {
        let query = format!(
            "SELECT {} FROM categories WHERE user_id = $1 AND id = $2",
            CATEGORY_COLUMNS
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(user_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))
    }

    /// Whether the keyword is already used by another category of the user
    pub async fn keyword_exists(
        &self,
        user_id: i32,
        keyword: &str,
        exclude_id: Option<i32>,
    ) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM categories
                WHERE user_id = $1 AND LOWER(keyword) = LOWER($2)
                  AND ($3::int IS NULL OR id <> $3)
            )
            "#,
        )
        .bind(user_id)
        .bind(keyword)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Position right after the user's last category
    pub async fn next_order(&self, user_id: i32) -> AppResult<i32> {
        let next: i32 = sqlx::query_scalar(
            "SELECT COALESCE(MAX(order_on_list), 0) + 1 FROM categories WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(next)
    }

    /// Number of entries filed under the category
    pub async fn count_entries(&self, user_id: i32, id: i32) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM entries WHERE user_id = $1 AND category_id = $2",
        )
        .bind(user_id)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Create a category at the given position
    pub async fn create(
        &self,
        user_id: i32,
        data: &CreateCategory,
        order_on_list: i32,
    ) -> AppResult<Category> {
        let query = format!(
            r#"
            INSERT INTO categories (user_id, keyword, name, is_income, order_on_list)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            CATEGORY_COLUMNS
        );
        let category = sqlx::query_as::<_, Category>(&query)
            .bind(user_id)
            .bind(&data.keyword)
            .bind(&data.name)
            .bind(data.is_income)
            .bind(order_on_list)
            .fetch_one(&self.pool)
            .await?;
        Ok(category)
    }

    /// Update the provided fields of a category
    pub async fn update(&self, user_id: i32, id: i32, data: &UpdateCategory) -> AppResult<Category> {
        let mut sets = Vec::new();
        let mut idx = 3;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.keyword, "keyword");
        add_field!(data.name, "name");
        add_field!(data.is_income, "is_income");
        add_field!(data.order_on_list, "order_on_list");

        if sets.is_empty() {
            return self.get_by_id(user_id, id).await;
        }

        let query = format!(
            "UPDATE categories SET {} WHERE user_id = $1 AND id = $2 RETURNING {}",
            sets.join(", "),
            CATEGORY_COLUMNS
        );

        let mut builder = sqlx::query_as::<_, Category>(&query).bind(user_id).bind(id);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.keyword);
        bind_field!(data.name);
        bind_field!(data.is_income);
        bind_field!(data.order_on_list);

        builder
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))
    }

    /// Delete one of the user's categories
    pub async fn delete(&self, user_id: i32, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM categories WHERE user_id = $1 AND id = $2")
            .bind(user_id)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Category {} not found", id)));
        }
        Ok(())
    }
}
