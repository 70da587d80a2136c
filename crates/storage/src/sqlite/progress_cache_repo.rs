use async_trait::async_trait;
use chrono::{DateTime, Utc};
use progress_core::model::ProgressKey;
use sqlx::Row;

use crate::repository::{CachedProgress, ProgressCacheRepository, StorageError};

use super::SqliteRepository;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

#[async_trait]
impl ProgressCacheRepository for SqliteRepository {
    async fn get_progress(
        &self,
        key: &ProgressKey,
    ) -> Result<Option<CachedProgress>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT key, payload, updated_at
            FROM progress_cache
            WHERE key = ?1
            ",
        )
        .bind(key.as_str())
        .fetch_optional(self.pool())
        .await
        .map_err(conn)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let key: String = row.try_get("key").map_err(ser)?;
        let payload: String = row.try_get("payload").map_err(ser)?;
        let updated_at: DateTime<Utc> = row.try_get("updated_at").map_err(ser)?;

        Ok(Some(CachedProgress {
            key: ProgressKey::from_raw(key),
            payload,
            updated_at,
        }))
    }

    async fn put_progress(&self, entry: &CachedProgress) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO progress_cache (key, payload, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at
            ",
        )
        .bind(entry.key.as_str())
        .bind(&entry.payload)
        .bind(entry.updated_at)
        .execute(self.pool())
        .await
        .map_err(conn)?;
        Ok(())
    }

    async fn remove_progress(&self, key: &ProgressKey) -> Result<bool, StorageError> {
        let result = sqlx::query("DELETE FROM progress_cache WHERE key = ?1")
            .bind(key.as_str())
            .execute(self.pool())
            .await
            .map_err(conn)?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_keys(&self) -> Result<Vec<ProgressKey>, StorageError> {
        let rows = sqlx::query("SELECT key FROM progress_cache ORDER BY key ASC")
            .fetch_all(self.pool())
            .await
            .map_err(conn)?;
        rows.iter()
            .map(|row| {
                row.try_get::<String, _>("key")
                    .map(ProgressKey::from_raw)
                    .map_err(ser)
            })
            .collect()
    }
}
