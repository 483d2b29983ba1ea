use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::info;

use crate::database::ports::progress::ProgressRepository;
use crate::error::{Result, TrackerError};
use cinetrack_model::{AccountId, FilmId, ProgressId, ProgressRecord, TrackStatus};

/// PostgreSQL-backed implementation of the `ProgressRepository` port.
#[derive(Clone, Debug)]
pub struct PostgresProgressRepository {
    pool: PgPool,
}

impl PostgresProgressRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

// rating is NUMERIC(2,1) in the schema; read through ::float8 and bind f64
// with an explicit cast so the assignment rounds to one fractional digit.
const PROGRESS_COLUMNS: &str = "progress_id, account_id, film_id, status, percent, \
     rating::float8 AS rating, notes, started_on, completed_on, last_updated";

fn record_from_row(row: &PgRow) -> Result<ProgressRecord> {
    let status: String = row.try_get("status").map_err(row_error)?;
    let status: TrackStatus = status
        .parse()
        .map_err(|e| TrackerError::Database(format!("Corrupt status token in store: {}", e)))?;

    let percent: i32 = row.try_get("percent").map_err(row_error)?;

    Ok(ProgressRecord {
        progress_id: ProgressId(row.try_get("progress_id").map_err(row_error)?),
        account_id: AccountId(row.try_get("account_id").map_err(row_error)?),
        film_id: FilmId(row.try_get("film_id").map_err(row_error)?),
        status,
        percent: percent as u8,
        rating: row.try_get("rating").map_err(row_error)?,
        notes: row.try_get("notes").map_err(row_error)?,
        started_on: row.try_get("started_on").map_err(row_error)?,
        completed_on: row.try_get("completed_on").map_err(row_error)?,
        last_updated: row.try_get("last_updated").map_err(row_error)?,
    })
}

fn row_error(e: sqlx::Error) -> TrackerError {
    TrackerError::Database(format!("Failed to decode progress row: {}", e))
}

#[async_trait]
impl ProgressRepository for PostgresProgressRepository {
    async fn insert(&self, record: &ProgressRecord) -> Result<ProgressRecord> {
        let row = sqlx::query(
            r#"
            INSERT INTO user_progress (
                account_id, film_id, status, percent, rating,
                notes, started_on, completed_on, last_updated
            )
            VALUES ($1, $2, $3, $4, $5::float8, $6, $7, $8, $9)
            RETURNING progress_id
            "#,
        )
        .bind(record.account_id.as_i32())
        .bind(record.film_id.as_i32())
        .bind(record.status.as_str())
        .bind(record.percent as i32)
        .bind(record.rating)
        .bind(&record.notes)
        .bind(record.started_on)
        .bind(record.completed_on)
        .bind(record.last_updated)
        .fetch_one(self.pool())
        .await
        .map_err(|e| {
            // The unique pair constraint is the real duplicate guard; the
            // service-level pre-check only exists for a friendlier error.
            if let Some(db_err) = e.as_database_error()
                && db_err.constraint() == Some("user_progress_pair_key")
            {
                return TrackerError::DuplicateTracking {
                    account_id: record.account_id,
                    film_id: record.film_id,
                };
            }
            TrackerError::Database(format!("Failed to insert progress: {}", e))
        })?;

        let progress_id: i32 = row.try_get("progress_id").map_err(row_error)?;
        info!(
            "Account {} now tracking film {} (progress {})",
            record.account_id, record.film_id, progress_id
        );

        let mut inserted = record.clone();
        inserted.progress_id = ProgressId(progress_id);
        Ok(inserted)
    }

    async fn find_by_id(&self, id: ProgressId) -> Result<Option<ProgressRecord>> {
        let row = sqlx::query(&format!(
            "SELECT {PROGRESS_COLUMNS} FROM user_progress WHERE progress_id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool())
        .await
        .map_err(|e| TrackerError::Database(format!("Failed to get progress by id: {}", e)))?;

        row.as_ref().map(record_from_row).transpose()
    }

    async fn find_by_pair(
        &self,
        account_id: AccountId,
        film_id: FilmId,
    ) -> Result<Option<ProgressRecord>> {
        let row = sqlx::query(&format!(
            "SELECT {PROGRESS_COLUMNS} FROM user_progress \
             WHERE account_id = $1 AND film_id = $2"
        ))
        .bind(account_id.as_i32())
        .bind(film_id.as_i32())
        .fetch_optional(self.pool())
        .await
        .map_err(|e| TrackerError::Database(format!("Failed to get progress by pair: {}", e)))?;

        row.as_ref().map(record_from_row).transpose()
    }

    async fn list_for_account(&self, account_id: AccountId) -> Result<Vec<ProgressRecord>> {
        let rows = sqlx::query(&format!(
            "SELECT {PROGRESS_COLUMNS} FROM user_progress \
             WHERE account_id = $1 ORDER BY last_updated DESC"
        ))
        .bind(account_id.as_i32())
        .fetch_all(self.pool())
        .await
        .map_err(|e| {
            TrackerError::Database(format!("Failed to list progress for account: {}", e))
        })?;

        rows.iter().map(record_from_row).collect()
    }

    async fn list_for_film(&self, film_id: FilmId) -> Result<Vec<ProgressRecord>> {
        let rows = sqlx::query(&format!(
            "SELECT {PROGRESS_COLUMNS} FROM user_progress \
             WHERE film_id = $1 ORDER BY last_updated DESC"
        ))
        .bind(film_id.as_i32())
        .fetch_all(self.pool())
        .await
        .map_err(|e| TrackerError::Database(format!("Failed to list progress for film: {}", e)))?;

        rows.iter().map(record_from_row).collect()
    }

    async fn update(&self, record: &ProgressRecord) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE user_progress
            SET status = $1, percent = $2, rating = $3::float8, notes = $4,
                started_on = $5, completed_on = $6, last_updated = $7
            WHERE progress_id = $8
            "#,
        )
        .bind(record.status.as_str())
        .bind(record.percent as i32)
        .bind(record.rating)
        .bind(&record.notes)
        .bind(record.started_on)
        .bind(record.completed_on)
        .bind(record.last_updated)
        .bind(record.progress_id.as_i32())
        .execute(self.pool())
        .await
        .map_err(|e| TrackerError::Database(format!("Failed to update progress: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(TrackerError::NotFound(format!(
                "progress record {}",
                record.progress_id
            )));
        }
        Ok(())
    }

    async fn delete(&self, id: ProgressId) -> Result<()> {
        let result = sqlx::query("DELETE FROM user_progress WHERE progress_id = $1")
            .bind(id.as_i32())
            .execute(self.pool())
            .await
            .map_err(|e| TrackerError::Database(format!("Failed to delete progress: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(TrackerError::NotFound(format!("progress record {}", id)));
        }
        Ok(())
    }
}
