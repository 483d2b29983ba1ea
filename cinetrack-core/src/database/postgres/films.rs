use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::database::ports::films::FilmsRepository;
use crate::error::{Result, TrackerError};
use cinetrack_model::{Category, Film, FilmId};

/// PostgreSQL-backed implementation of the `FilmsRepository` port.
#[derive(Clone, Debug)]
pub struct PostgresFilmsRepository {
    pool: PgPool,
}

impl PostgresFilmsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

// external_rating is NUMERIC(2,1) in the schema; the ::float8 cast keeps
// the Rust side on plain f64.
const FILM_COLUMNS: &str = "film_id, title, category, synopsis, runtime_minutes, \
     release_year, genre, director, external_rating::float8 AS external_rating, created_at";

fn film_from_row(row: &PgRow) -> Result<Film> {
    let category: String = row.try_get("category").map_err(row_error)?;
    let category = match category.as_str() {
        "MOVIES" => Category::Movies,
        other => {
            return Err(TrackerError::Database(format!(
                "Unknown film category in store: {}",
                other
            )));
        }
    };

    Ok(Film {
        film_id: FilmId(row.try_get("film_id").map_err(row_error)?),
        title: row.try_get("title").map_err(row_error)?,
        category,
        synopsis: row.try_get("synopsis").map_err(row_error)?,
        runtime_minutes: row.try_get("runtime_minutes").map_err(row_error)?,
        release_year: row.try_get("release_year").map_err(row_error)?,
        genre: row.try_get("genre").map_err(row_error)?,
        director: row.try_get("director").map_err(row_error)?,
        external_rating: row.try_get("external_rating").map_err(row_error)?,
        created_at: row.try_get("created_at").map_err(row_error)?,
    })
}

fn row_error(e: sqlx::Error) -> TrackerError {
    TrackerError::Database(format!("Failed to decode film row: {}", e))
}

#[async_trait]
impl FilmsRepository for PostgresFilmsRepository {
    async fn find_by_id(&self, id: FilmId) -> Result<Option<Film>> {
        let row = sqlx::query(&format!(
            "SELECT {FILM_COLUMNS} FROM film WHERE film_id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool())
        .await
        .map_err(|e| TrackerError::Database(format!("Failed to get film by id: {}", e)))?;

        row.as_ref().map(film_from_row).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Film>> {
        let rows = sqlx::query(&format!(
            "SELECT {FILM_COLUMNS} FROM film ORDER BY film_id"
        ))
        .fetch_all(self.pool())
        .await
        .map_err(|e| TrackerError::Database(format!("Failed to list films: {}", e)))?;

        rows.iter().map(film_from_row).collect()
    }
}
