use async_trait::async_trait;

use crate::error::Result;
use cinetrack_model::{Account, AccountId};

// Account identity and credential storage (credentials are plaintext-compared)
#[async_trait]
pub trait AccountsRepository: Send + Sync {
    /// Insert a new account and return it with its store-assigned id.
    async fn create(&self, account: &Account) -> Result<Account>;
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>>;
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>>;
    /// Return the account when the credentials match, `None` otherwise.
    async fn authenticate(&self, username: &str, password: &str) -> Result<Option<Account>>;
    async fn update_password(&self, id: AccountId, password: &str) -> Result<()>;
    async fn update_email(&self, id: AccountId, email: Option<&str>) -> Result<()>;
}
