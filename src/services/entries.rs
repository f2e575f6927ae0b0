//! Entries service

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::entry::{CreateEntry, EntryDetails, EntryQuery, UpdateEntry},
    repository::Repository,
    stats::{end_of_day, start_of_day},
};

#[derive(Clone)]
pub struct EntriesService {
    repository: Repository,
}

/// Parse a `YYYY-MM-DD` query parameter
fn parse_date(value: &str, field: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest(format!("Invalid {} '{}', expected YYYY-MM-DD", field, value)))
}

/// Turn the optional query dates into inclusive instants
fn query_bounds(query: &EntryQuery) -> AppResult<(Option<DateTime<Utc>>, Option<DateTime<Utc>>)> {
    let from = query
        .start_date
        .as_deref()
        .map(|d| parse_date(d, "start_date"))
        .transpose()?;
    let to = query
        .end_date
        .as_deref()
        .map(|d| parse_date(d, "end_date"))
        .transpose()?;

    if let (Some(from), Some(to)) = (from, to) {
        if from > to {
            return Err(AppError::BadRequest(
                "start_date must not be after end_date".to_string(),
            ));
        }
    }

    let to = to
        .map(|d| {
            end_of_day(d).ok_or_else(|| {
                AppError::BadRequest(format!("end_date '{}' is out of the supported range", d))
            })
        })
        .transpose()?;

    Ok((from.map(start_of_day), to))
}

fn check_value(value: Decimal) -> AppResult<()> {
    if value <= Decimal::ZERO {
        return Err(AppError::Validation("Value must be positive".to_string()));
    }
    Ok(())
}

impl EntriesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List the user's entries, newest first
    pub async fn list(&self, user_id: i32, query: &EntryQuery) -> AppResult<Vec<EntryDetails>> {
        let (from, to) = query_bounds(query)?;
        self.repository.entries.list(user_id, from, to).await
    }

    pub async fn get_by_id(&self, user_id: i32, id: i32) -> AppResult<EntryDetails> {
        self.repository.entries.get_by_id(user_id, id).await
    }

    pub async fn create(&self, user_id: i32, data: &CreateEntry) -> AppResult<EntryDetails> {
        data.validate()?;
        check_value(data.value)?;
        self.check_category(user_id, data.category_id).await?;
        self.check_tags(user_id, &data.tag_ids).await?;

        let entry = self.repository.entries.create(user_id, data).await?;
        tracing::info!("User {} created entry {}", user_id, entry.id);
        Ok(entry)
    }

    pub async fn update(&self, user_id: i32, id: i32, data: &UpdateEntry) -> AppResult<EntryDetails> {
        data.validate()?;
        if let Some(value) = data.value {
            check_value(value)?;
        }
        if let Some(category_id) = data.category_id {
            self.check_category(user_id, category_id).await?;
        }
        if let Some(tag_ids) = &data.tag_ids {
            self.check_tags(user_id, tag_ids).await?;
        }

        self.repository.entries.update(user_id, id, data).await
    }

    pub async fn delete(&self, user_id: i32, id: i32) -> AppResult<()> {
        self.repository.entries.delete(user_id, id).await?;
        tracing::info!("User {} deleted entry {}", user_id, id);
        Ok(())
    }

    async fn check_category(&self, user_id: i32, category_id: i32) -> AppResult<()> {
        self.repository
            .categories
            .get_by_id(user_id, category_id)
            .await
            .map(|_| ())
    }

    async fn check_tags(&self, user_id: i32, tag_ids: &[i32]) -> AppResult<()> {
        if tag_ids.is_empty() {
            return Ok(());
        }

        let mut unique = tag_ids.to_vec();
        unique.sort_unstable();
        unique.dedup();

        let owned = self.repository.tags.count_owned(user_id, &unique).await?;
        if owned != unique.len() as i64 {
            return Err(AppError::NotFound("One or more tags not found".to_string()));
        }
        Ok(())
    }
}
