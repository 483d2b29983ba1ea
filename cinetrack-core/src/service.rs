//! Application service tying the progress-record rules to the store.
//!
//! The menu frontend calls into this service only; it never touches SQL or
//! record invariants itself. Store handles are injected, so tests can run
//! the whole service against in-memory fakes.

use std::sync::Arc;

use tracing::info;

use crate::database::ports::{AccountsRepository, FilmsRepository, ProgressRepository};
use crate::error::{Result, TrackerError};
use crate::stats;
use cinetrack_model::{
    Account, AccountId, Film, FilmId, FilmStats, ProgressId, ProgressRecord, ProgressSummary,
    TrackStatus,
};

#[derive(Clone)]
pub struct TrackingService {
    accounts: Arc<dyn AccountsRepository>,
    films: Arc<dyn FilmsRepository>,
    progress: Arc<dyn ProgressRepository>,
}

impl std::fmt::Debug for TrackingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackingService").finish_non_exhaustive()
    }
}

impl TrackingService {
    pub fn new(
        accounts: Arc<dyn AccountsRepository>,
        films: Arc<dyn FilmsRepository>,
        progress: Arc<dyn ProgressRepository>,
    ) -> Self {
        Self {
            accounts,
            films,
            progress,
        }
    }

    /// Start tracking a film for an account.
    ///
    /// The film must exist, and the pair must not be tracked yet. The
    /// pre-insert pair check gives a friendly error; under concurrent
    /// sessions the store's uniqueness constraint is the actual guarantee.
    pub async fn track_film(
        &self,
        account_id: i32,
        film_id: i32,
        initial_status: TrackStatus,
        rating: Option<f64>,
    ) -> Result<ProgressRecord> {
        let account_id = AccountId::new(account_id)?;
        let film_id = FilmId::new(film_id)?;

        let film = self
            .films
            .find_by_id(film_id)
            .await?
            .ok_or_else(|| TrackerError::NotFound(format!("film {}", film_id)))?;

        if self
            .progress
            .find_by_pair(account_id, film_id)
            .await?
            .is_some()
        {
            return Err(TrackerError::DuplicateTracking {
                account_id,
                film_id,
            });
        }

        let mut record = ProgressRecord::new(account_id, film_id, initial_status);
        record.set_rating(rating)?;

        let inserted = self.progress.insert(&record).await?;
        info!(
            "Account {} tracking '{}' as {}",
            account_id, film.title, initial_status
        );
        Ok(inserted)
    }

    /// Change a record's status and persist the result.
    pub async fn set_status(&self, id: ProgressId, status: TrackStatus) -> Result<ProgressRecord> {
        let mut record = self.fetch(id).await?;
        record.set_status(status);
        self.progress.update(&record).await?;
        Ok(record)
    }

    /// Change a record's completion percentage and persist the result.
    pub async fn set_percent(&self, id: ProgressId, percent: u8) -> Result<ProgressRecord> {
        let mut record = self.fetch(id).await?;
        record.set_percent(percent)?;
        self.progress.update(&record).await?;
        Ok(record)
    }

    /// Set or clear a record's rating and persist the result.
    pub async fn set_rating(&self, id: ProgressId, rating: Option<f64>) -> Result<ProgressRecord> {
        let mut record = self.fetch(id).await?;
        record.set_rating(rating)?;
        self.progress.update(&record).await?;
        Ok(record)
    }

    /// Set or clear a record's notes and persist the result.
    pub async fn set_notes(&self, id: ProgressId, notes: Option<String>) -> Result<ProgressRecord> {
        let mut record = self.fetch(id).await?;
        record.set_notes(notes);
        self.progress.update(&record).await?;
        Ok(record)
    }

    /// Stop tracking a film.
    pub async fn untrack(&self, id: ProgressId) -> Result<()> {
        self.progress.delete(id).await
    }

    /// All of an account's records, most recently updated first.
    pub async fn progress_for_account(&self, account_id: AccountId) -> Result<Vec<ProgressRecord>> {
        self.ensure_account(account_id).await?;
        self.progress.list_for_account(account_id).await
    }

    /// The account's non-completed records, for the update menu.
    pub async fn updatable_for_account(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<ProgressRecord>> {
        let records = self.progress_for_account(account_id).await?;
        Ok(records.into_iter().filter(|r| !r.is_complete()).collect())
    }

    /// Status breakdown over everything the account tracks.
    pub async fn account_summary(&self, account_id: AccountId) -> Result<ProgressSummary> {
        let records = self.progress_for_account(account_id).await?;
        Ok(stats::summarize_by_account(&records))
    }

    /// Tracker counts and mean rating for one film.
    pub async fn film_stats(&self, film_id: FilmId) -> Result<FilmStats> {
        self.ensure_film(film_id).await?;
        let records = self.progress.list_for_film(film_id).await?;
        Ok(stats::summarize_by_film(&records))
    }

    pub async fn film(&self, film_id: FilmId) -> Result<Film> {
        self.films
            .find_by_id(film_id)
            .await?
            .ok_or_else(|| TrackerError::NotFound(format!("film {}", film_id)))
    }

    pub async fn catalog(&self) -> Result<Vec<Film>> {
        self.films.list_all().await
    }

    pub async fn account(&self, account_id: AccountId) -> Result<Account> {
        self.accounts
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| TrackerError::NotFound(format!("account {}", account_id)))
    }

    async fn fetch(&self, id: ProgressId) -> Result<ProgressRecord> {
        self.progress
            .find_by_id(id)
            .await?
            .ok_or_else(|| TrackerError::NotFound(format!("progress record {}", id)))
    }

    async fn ensure_account(&self, account_id: AccountId) -> Result<()> {
        self.account(account_id).await.map(|_| ())
    }

    async fn ensure_film(&self, film_id: FilmId) -> Result<()> {
        self.film(film_id).await.map(|_| ())
    }
}
