//! Database operations for the `favorites` table.

use bizsearch_core::FavoritesStore;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::DbError;

/// A row from the `favorites` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FavoriteRow {
    pub business_id: String,
    pub created_at: DateTime<Utc>,
}

/// Lists every favorite, oldest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_favorites(pool: &SqlitePool) -> Result<Vec<FavoriteRow>, DbError> {
    let rows = sqlx::query_as::<_, FavoriteRow>(
        "SELECT business_id, created_at FROM favorites \
         ORDER BY created_at, business_id",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Inserts a favorite. Re-adding an existing id leaves the original row
/// (and its `created_at`) untouched.
///
/// Returns `true` if a new row was written.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn put_favorite(pool: &SqlitePool, business_id: &str) -> Result<bool, DbError> {
    let result = sqlx::query(
        "INSERT INTO favorites (business_id, created_at) VALUES (?1, ?2) \
         ON CONFLICT (business_id) DO NOTHING",
    )
    .bind(business_id)
    .bind(Utc::now())
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Deletes the favorite for `business_id`, if any.
///
/// Returns `true` if a row was removed.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the delete fails.
pub async fn delete_favorite(pool: &SqlitePool, business_id: &str) -> Result<bool, DbError> {
    let result = sqlx::query("DELETE FROM favorites WHERE business_id = ?1")
        .bind(business_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// [`FavoritesStore`] backed by a SQLite pool.
#[derive(Debug, Clone)]
pub struct SqliteFavoritesStore {
    pool: SqlitePool,
}

impl SqliteFavoritesStore {
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl FavoritesStore for SqliteFavoritesStore {
    type Error = DbError;

    async fn list(&self) -> Result<Vec<String>, DbError> {
        let rows = list_favorites(&self.pool).await?;
        Ok(rows.into_iter().map(|row| row.business_id).collect())
    }

    async fn add(&self, business_id: &str) -> Result<(), DbError> {
        let inserted = put_favorite(&self.pool, business_id).await?;
        tracing::debug!(business_id, inserted, "favorite added");
        Ok(())
    }

    async fn remove(&self, business_id: &str) -> Result<(), DbError> {
        let removed = delete_favorite(&self.pool, business_id).await?;
        tracing::debug!(business_id, removed, "favorite removed");
        Ok(())
    }
}
