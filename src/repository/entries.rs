//! Entries repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres, Transaction};

use crate::{
    error::{AppError, AppResult},
    models::entry::{CreateEntry, Entry, EntryDetails, UpdateEntry},
};

/// Source of a user's entries for the statistics engine
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntrySource: Send + Sync {
    /// All entries of a user with their category and tag names
    async fn get_all_by_user_id(&self, user_id: i32) -> AppResult<Vec<Entry>>;
}

const TAG_NAMES: &str =
    "COALESCE(ARRAY_AGG(t.name ORDER BY LOWER(t.name)) FILTER (WHERE t.id IS NOT NULL), '{}') AS tag_names";

const DETAILS_FROM: &str = r#"
    FROM entries e
    JOIN categories c ON c.id = e.category_id
    LEFT JOIN entry_tags et ON et.entry_id = e.id
    LEFT JOIN tags t ON t.id = et.tag_id
"#;

#[derive(Clone)]
pub struct EntriesRepository {
    pool: Pool<Postgres>,
}

impl EntriesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    fn details_query(where_clause: &str) -> String {
        format!(
            r#"
            SELECT e.id, e.category_id, c.keyword AS category_keyword, c.is_income,
                   e.date, e.value, e.description, {},
                   e.created_at, e.updated_at
            {}
            WHERE {}
            GROUP BY e.id, c.id
            ORDER BY e.date DESC, e.id DESC
            "#,
            TAG_NAMES, DETAILS_FROM, where_clause
        )
    }

    /// List a user's entries, optionally bounded by date
    pub async fn list(
        &self,
        user_id: i32,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> AppResult<Vec<EntryDetails>> {
        let mut conditions = vec!["e.user_id = $1".to_string()];
        let mut idx = 2;

        if from.is_some() {
            conditions.push(format!("e.date >= ${}", idx));
            idx += 1;
        }
        if to.is_some() {
            conditions.push(format!("e.date <= ${}", idx));
        }

        let query = Self::details_query(&conditions.join(" AND "));
        let mut builder = sqlx::query_as::<_, EntryDetails>(&query).bind(user_id);
        if let Some(from) = from {
            builder = builder.bind(from);
        }
        if let Some(to) = to {
            builder = builder.bind(to);
        }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Get one of the user's entries by ID
    pub async fn get_by_id(&self, user_id: i32, id: i32) -> AppResult<EntryDetails> {
        let query = Self::details_query("e.user_id = $1 AND e.id = $2");
        sqlx::query_as::<_, EntryDetails>(&query)
            .bind(user_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Entry {} not found", id)))
    }

    /// Create an entry and attach its tags
    pub async fn create(&self, user_id: i32, data: &CreateEntry) -> AppResult<EntryDetails> {
        let mut tx = self.pool.begin().await?;

        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO entries (user_id, category_id, date, value, description)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(data.category_id)
        .bind(data.date)
        .bind(data.value)
        .bind(&data.description)
        .fetch_one(&mut *tx)
        .await?;

        Self::replace_tags(&mut tx, id, &data.tag_ids).await?;
        tx.commit().await?;

        tracing::debug!("Created entry {} for user {}", id, user_id);
        self.get_by_id(user_id, id).await
    }

    /// Update an entry; tags are replaced when `tag_ids` is present
    pub async fn update(&self, user_id: i32, id: i32, data: &UpdateEntry) -> AppResult<EntryDetails> {
        let mut sets = vec!["updated_at = $3".to_string()];
        let mut idx = 4;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.category_id, "category_id");
        add_field!(data.date, "date");
        add_field!(data.value, "value");
        add_field!(data.description, "description");

        let query = format!(
            "UPDATE entries SET {} WHERE user_id = $1 AND id = $2",
            sets.join(", ")
        );

        let mut tx = self.pool.begin().await?;

        let mut builder = sqlx::query(&query).bind(user_id).bind(id).bind(Utc::now());

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.category_id);
        bind_field!(data.date);
        bind_field!(data.value);
        bind_field!(data.description);

        let result = builder.execute(&mut *tx).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Entry {} not found", id)));
        }

        if let Some(tag_ids) = &data.tag_ids {
            Self::replace_tags(&mut tx, id, tag_ids).await?;
        }
        tx.commit().await?;

        self.get_by_id(user_id, id).await
    }

    /// Delete one of the user's entries
    pub async fn delete(&self, user_id: i32, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM entries WHERE user_id = $1 AND id = $2")
            .bind(user_id)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Entry {} not found", id)));
        }
        Ok(())
    }

    async fn replace_tags(
        tx: &mut Transaction<'_, Postgres>,
        entry_id: i32,
        tag_ids: &[i32],
    ) -> AppResult<()> {
        sqlx::query("DELETE FROM entry_tags WHERE entry_id = $1")
            .bind(entry_id)
            .execute(&mut **tx)
            .await?;

        if !tag_ids.is_empty() {
            sqlx::query(
                r#"
                INSERT INTO entry_tags (entry_id, tag_id)
                SELECT $1, tag_id FROM UNNEST($2::int[]) AS tag_id
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(entry_id)
            .bind(tag_ids)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }
}

#[async_trait]
impl EntrySource for EntriesRepository {
    async fn get_all_by_user_id(&self, user_id: i32) -> AppResult<Vec<Entry>> {
        let query = format!(
            r#"
            SELECT e.date, e.value,
                   c.keyword AS category_keyword,
                   c.is_income AS category_is_income,
                   c.order_on_list AS category_order_on_list,
                   {}
            {}
            WHERE e.user_id = $1
            GROUP BY e.id, c.id
            ORDER BY e.date, e.id
            "#,
            TAG_NAMES, DETAILS_FROM
        );

        let entries = sqlx::query_as::<_, Entry>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        tracing::debug!("Loaded {} entries for user {}", entries.len(), user_id);
        Ok(entries)
    }
}
