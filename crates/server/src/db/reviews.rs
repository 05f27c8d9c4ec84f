//! Review repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use mirai_core::{Review, ReviewDraft, ReviewId};

use super::RepositoryError;

/// Reviews returned by the list endpoint.
const LIST_LIMIT: i64 = 100;

#[derive(sqlx::FromRow)]
struct ReviewRow {
    id: i64,
    name: String,
    city: Option<String>,
    rating: Option<i32>,
    text: String,
    created_at: Option<DateTime<Utc>>,
}

impl From<ReviewRow> for Review {
    fn from(row: ReviewRow) -> Self {
        Self {
            id: ReviewId::new(row.id),
            name: row.name,
            city: row.city.unwrap_or_default(),
            rating: u8::try_from(row.rating.unwrap_or(5).clamp(1, 5)).unwrap_or(5),
            text: row.text,
            created_at: row.created_at.unwrap_or_else(Utc::now),
        }
    }
}

/// Repository for review database operations.
pub struct ReviewRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ReviewRepository<'a> {
    /// Create a new review repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Latest reviews, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Review>, RepositoryError> {
        let rows = sqlx::query_as::<_, ReviewRow>(
            "SELECT id, name, city, rating, text, created_at
             FROM reviews ORDER BY created_at DESC LIMIT $1",
        )
        .bind(LIST_LIMIT)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Review::from).collect())
    }

    /// Insert a review, returning the stored record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, draft: &ReviewDraft) -> Result<Review, RepositoryError> {
        let row = sqlx::query_as::<_, ReviewRow>(
            "INSERT INTO reviews (name, city, text, rating)
             VALUES ($1, $2, $3, $4)
             RETURNING id, name, city, rating, text, created_at",
        )
        .bind(&draft.name)
        .bind(draft.city.clone().unwrap_or_default())
        .bind(&draft.text)
        .bind(i32::from(draft.rating))
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }
}
