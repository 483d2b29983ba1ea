//! PostgreSQL implementations of the repository ports.

pub mod accounts;
pub mod films;
pub mod progress;

pub use accounts::PostgresAccountsRepository;
pub use films::PostgresFilmsRepository;
pub use progress::PostgresProgressRepository;

use crate::error::{Result, TrackerError};
use sqlx::{PgPool, postgres::PgPoolOptions};
use std::fmt;
use tracing::info;

/// Connection pool plus the repository set built on it.
///
/// Constructed once at startup and passed to whoever needs a store handle;
/// there is no process-wide connection singleton.
#[derive(Clone)]
pub struct PostgresDatabase {
    pool: PgPool,
    max_connections: u32,
    accounts: PostgresAccountsRepository,
    films: PostgresFilmsRepository,
    progress: PostgresProgressRepository,
}

impl fmt::Debug for PostgresDatabase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresDatabase")
            .field("pool_size", &self.pool.size())
            .field("idle_connections", &self.pool.num_idle())
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

impl PostgresDatabase {
    pub async fn new(connection_string: &str) -> Result<Self> {
        let max_connections = std::env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(5);

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect(connection_string)
            .await
            .map_err(|e| TrackerError::Database(format!("Database connection failed: {}", e)))?;

        info!(
            "Database pool initialized with max_connections={}",
            max_connections
        );

        let accounts = PostgresAccountsRepository::new(pool.clone());
        let films = PostgresFilmsRepository::new(pool.clone());
        let progress = PostgresProgressRepository::new(pool.clone());

        Ok(PostgresDatabase {
            pool,
            max_connections,
            accounts,
            films,
            progress,
        })
    }

    pub fn accounts_repository(&self) -> &PostgresAccountsRepository {
        &self.accounts
    }

    pub fn films_repository(&self) -> &PostgresFilmsRepository {
        &self.films
    }

    pub fn progress_repository(&self) -> &PostgresProgressRepository {
        &self.progress
    }

    /// Run migrations, creating the schema and seeding the film catalog.
    pub async fn initialize_schema(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| TrackerError::Database(format!("Migration failed: {}", e)))?;
        Ok(())
    }
}
