use async_trait::async_trait;

use crate::error::Result;
use cinetrack_model::{AccountId, FilmId, ProgressId, ProgressRecord};

#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Insert a new record and return it with its store-assigned id.
    ///
    /// A uniqueness violation on the (account, film) pair surfaces as
    /// [`crate::TrackerError::DuplicateTracking`].
    async fn insert(&self, record: &ProgressRecord) -> Result<ProgressRecord>;

    async fn find_by_id(&self, id: ProgressId) -> Result<Option<ProgressRecord>>;

    /// Lookup used to enforce the one-record-per-pair rule before insertion.
    async fn find_by_pair(
        &self,
        account_id: AccountId,
        film_id: FilmId,
    ) -> Result<Option<ProgressRecord>>;

    /// All records for one account, most recently updated first.
    async fn list_for_account(&self, account_id: AccountId) -> Result<Vec<ProgressRecord>>;

    /// All records for one film, most recently updated first.
    async fn list_for_film(&self, film_id: FilmId) -> Result<Vec<ProgressRecord>>;

    async fn update(&self, record: &ProgressRecord) -> Result<()>;

    async fn delete(&self, id: ProgressId) -> Result<()>;
}
