use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::info;

use crate::database::ports::accounts::AccountsRepository;
use crate::error::{Result, TrackerError};
use cinetrack_model::{Account, AccountId};

/// PostgreSQL-backed implementation of the `AccountsRepository` port.
#[derive(Clone, Debug)]
pub struct PostgresAccountsRepository {
    pool: PgPool,
}

impl PostgresAccountsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn account_from_row(row: &PgRow) -> Result<Account> {
    Ok(Account {
        account_id: AccountId(row.try_get("account_id").map_err(row_error)?),
        username: row.try_get("username").map_err(row_error)?,
        password: row.try_get("password").map_err(row_error)?,
        email: row.try_get("email").map_err(row_error)?,
        created_at: row.try_get("created_at").map_err(row_error)?,
    })
}

fn row_error(e: sqlx::Error) -> TrackerError {
    TrackerError::Database(format!("Failed to decode account row: {}", e))
}

const ACCOUNT_COLUMNS: &str = "account_id, username, password, email, created_at";

#[async_trait]
impl AccountsRepository for PostgresAccountsRepository {
    async fn create(&self, account: &Account) -> Result<Account> {
        let row = sqlx::query(
            r#"
            INSERT INTO account (username, password, email, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING account_id
            "#,
        )
        .bind(&account.username)
        .bind(&account.password)
        .bind(&account.email)
        .bind(account.created_at)
        .fetch_one(self.pool())
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error()
                && db_err.constraint() == Some("account_username_key")
            {
                return TrackerError::Database(format!(
                    "Username '{}' already exists",
                    account.username
                ));
            }
            TrackerError::Database(format!("Failed to create account: {}", e))
        })?;

        let account_id: i32 = row.try_get("account_id").map_err(row_error)?;
        info!("Created account: {} ({})", account.username, account_id);

        let mut created = account.clone();
        created.account_id = AccountId(account_id);
        Ok(created)
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>> {
        let row = sqlx::query(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM account WHERE account_id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool())
        .await
        .map_err(|e| TrackerError::Database(format!("Failed to get account by id: {}", e)))?;

        row.as_ref().map(account_from_row).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>> {
        let row = sqlx::query(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM account WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| {
            TrackerError::Database(format!("Failed to get account by username: {}", e))
        })?;

        row.as_ref().map(account_from_row).transpose()
    }

    async fn authenticate(&self, username: &str, password: &str) -> Result<Option<Account>> {
        let row = sqlx::query(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM account WHERE username = $1 AND password = $2"
        ))
        .bind(username)
        .bind(password)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| TrackerError::Database(format!("Failed to authenticate: {}", e)))?;

        row.as_ref().map(account_from_row).transpose()
    }

    async fn update_password(&self, id: AccountId, password: &str) -> Result<()> {
        let result = sqlx::query("UPDATE account SET password = $1 WHERE account_id = $2")
            .bind(password)
            .bind(id.as_i32())
            .execute(self.pool())
            .await
            .map_err(|e| TrackerError::Database(format!("Failed to update password: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(TrackerError::NotFound(format!("account {}", id)));
        }
        Ok(())
    }

    async fn update_email(&self, id: AccountId, email: Option<&str>) -> Result<()> {
        let result = sqlx::query("UPDATE account SET email = $1 WHERE account_id = $2")
            .bind(email)
            .bind(id.as_i32())
            .execute(self.pool())
            .await
            .map_err(|e| TrackerError::Database(format!("Failed to update email: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(TrackerError::NotFound(format!("account {}", id)));
        }
        Ok(())
    }
}
