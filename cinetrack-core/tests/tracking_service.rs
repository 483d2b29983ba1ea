//! TrackingService tests against in-memory repository fakes.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicI32, Ordering},
};

use async_trait::async_trait;
use chrono::Utc;

use cinetrack_core::database::ports::{AccountsRepository, FilmsRepository, ProgressRepository};
use cinetrack_core::{Result, TrackerError, TrackingService};
use cinetrack_model::{
    Account, AccountId, Category, Film, FilmId, ProgressId, ProgressRecord, TrackStatus,
};

#[derive(Default)]
struct MemAccounts {
    accounts: Mutex<Vec<Account>>,
}

#[async_trait]
impl AccountsRepository for MemAccounts {
    async fn create(&self, account: &Account) -> Result<Account> {
        let mut accounts = self.accounts.lock().unwrap();
        let mut created = account.clone();
        created.account_id = AccountId(accounts.len() as i32 + 1);
        accounts.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.iter().find(|a| a.account_id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.iter().find(|a| a.username == username).cloned())
    }

    async fn authenticate(&self, username: &str, password: &str) -> Result<Option<Account>> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts
            .iter()
            .find(|a| a.username == username && a.password == password)
            .cloned())
    }

    async fn update_password(&self, id: AccountId, password: &str) -> Result<()> {
        let mut accounts = self.accounts.lock().unwrap();
        match accounts.iter_mut().find(|a| a.account_id == id) {
            Some(account) => {
                account.password = password.to_string();
                Ok(())
            }
            None => Err(TrackerError::NotFound(format!("account {}", id))),
        }
    }

    async fn update_email(&self, id: AccountId, email: Option<&str>) -> Result<()> {
        let mut accounts = self.accounts.lock().unwrap();
        match accounts.iter_mut().find(|a| a.account_id == id) {
            Some(account) => {
                account.email = email.map(str::to_string);
                Ok(())
            }
            None => Err(TrackerError::NotFound(format!("account {}", id))),
        }
    }
}

struct MemFilms {
    films: Vec<Film>,
}

#[async_trait]
impl FilmsRepository for MemFilms {
    async fn find_by_id(&self, id: FilmId) -> Result<Option<Film>> {
        Ok(self.films.iter().find(|f| f.film_id == id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Film>> {
        Ok(self.films.clone())
    }
}

#[derive(Default)]
struct MemProgress {
    records: Mutex<Vec<ProgressRecord>>,
    next_id: AtomicI32,
}

#[async_trait]
impl ProgressRepository for MemProgress {
    async fn insert(&self, record: &ProgressRecord) -> Result<ProgressRecord> {
        let mut records = self.records.lock().unwrap();
        if records
            .iter()
            .any(|r| r.account_id == record.account_id && r.film_id == record.film_id)
        {
            return Err(TrackerError::DuplicateTracking {
                account_id: record.account_id,
                film_id: record.film_id,
            });
        }
        let mut inserted = record.clone();
        inserted.progress_id = ProgressId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        records.push(inserted.clone());
        Ok(inserted)
    }

    async fn find_by_id(&self, id: ProgressId) -> Result<Option<ProgressRecord>> {
        let records = self.records.lock().unwrap();
        Ok(records.iter().find(|r| r.progress_id == id).cloned())
    }

    async fn find_by_pair(
        &self,
        account_id: AccountId,
        film_id: FilmId,
    ) -> Result<Option<ProgressRecord>> {
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .find(|r| r.account_id == account_id && r.film_id == film_id)
            .cloned())
    }

    async fn list_for_account(&self, account_id: AccountId) -> Result<Vec<ProgressRecord>> {
        let mut records: Vec<ProgressRecord> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.account_id == account_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.last_updated.cmp(&a.last_updated));
        Ok(records)
    }

    async fn list_for_film(&self, film_id: FilmId) -> Result<Vec<ProgressRecord>> {
        let mut records: Vec<ProgressRecord> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.film_id == film_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.last_updated.cmp(&a.last_updated));
        Ok(records)
    }

    async fn update(&self, record: &ProgressRecord) -> Result<()> {
        let mut records = self.records.lock().unwrap();
        match records
            .iter_mut()
            .find(|r| r.progress_id == record.progress_id)
        {
            Some(existing) => {
                *existing = record.clone();
                Ok(())
            }
            None => Err(TrackerError::NotFound(format!(
                "progress record {}",
                record.progress_id
            ))),
        }
    }

    async fn delete(&self, id: ProgressId) -> Result<()> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.progress_id != id);
        if records.len() == before {
            return Err(TrackerError::NotFound(format!("progress record {}", id)));
        }
        Ok(())
    }
}

fn film(id: i32, title: &str) -> Film {
    Film {
        film_id: FilmId(id),
        title: title.to_string(),
        category: Category::Movies,
        synopsis: None,
        runtime_minutes: Some(120),
        release_year: Some(1982),
        genre: Some("Sci-Fi".to_string()),
        director: None,
        external_rating: Some(4.2),
        created_at: Utc::now(),
    }
}

async fn service_with_films(films: Vec<Film>) -> (TrackingService, Arc<MemAccounts>) {
    let accounts = Arc::new(MemAccounts::default());
    let service = TrackingService::new(
        accounts.clone(),
        Arc::new(MemFilms { films }),
        Arc::new(MemProgress::default()),
    );
    (service, accounts)
}

async fn account(accounts: &MemAccounts, username: &str) -> Account {
    accounts
        .create(&Account::new(username, "hunter2", None).unwrap())
        .await
        .unwrap()
}

#[tokio::test]
async fn tracking_a_film_creates_a_record() {
    let (service, accounts) = service_with_films(vec![film(1, "Blade Runner")]).await;
    let account = account(&accounts, "nina").await;

    let record = service
        .track_film(account.account_id.as_i32(), 1, TrackStatus::PlanToStart, None)
        .await
        .unwrap();

    assert!(record.progress_id.as_i32() > 0);
    assert_eq!(record.status, TrackStatus::PlanToStart);
    assert_eq!(record.percent, 0);
}

#[tokio::test]
async fn tracking_completed_sets_percent_and_date() {
    let (service, accounts) = service_with_films(vec![film(1, "Alien")]).await;
    let account = account(&accounts, "nina").await;

    let record = service
        .track_film(
            account.account_id.as_i32(),
            1,
            TrackStatus::Completed,
            Some(4.5),
        )
        .await
        .unwrap();

    assert_eq!(record.percent, 100);
    assert!(record.completed_on.is_some());
    assert_eq!(record.rating, Some(4.5));
}

#[tokio::test]
async fn duplicate_tracking_rejected_and_record_untouched() {
    let (service, accounts) = service_with_films(vec![film(1, "Stalker")]).await;
    let account = account(&accounts, "nina").await;
    let id = account.account_id;

    let first = service
        .track_film(id.as_i32(), 1, TrackStatus::InProgress, None)
        .await
        .unwrap();

    let err = service
        .track_film(id.as_i32(), 1, TrackStatus::Completed, None)
        .await
        .unwrap_err();
    assert!(matches!(err, TrackerError::DuplicateTracking { .. }));

    let records = service.progress_for_account(id).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, first.status);
    assert_eq!(records[0].last_updated, first.last_updated);
}

#[tokio::test]
async fn tracking_unknown_film_is_not_found() {
    let (service, accounts) = service_with_films(vec![]).await;
    let account = account(&accounts, "nina").await;

    let err = service
        .track_film(account.account_id.as_i32(), 7, TrackStatus::PlanToStart, None)
        .await
        .unwrap_err();
    assert!(matches!(err, TrackerError::NotFound(_)));
}

#[tokio::test]
async fn non_positive_ids_fail_validation() {
    let (service, _) = service_with_films(vec![film(1, "Solaris")]).await;

    let err = service
        .track_film(0, 1, TrackStatus::PlanToStart, None)
        .await
        .unwrap_err();
    assert!(matches!(err, TrackerError::Validation(_)));

    let err = service
        .track_film(1, -3, TrackStatus::PlanToStart, None)
        .await
        .unwrap_err();
    assert!(matches!(err, TrackerError::Validation(_)));
}

#[tokio::test]
async fn percent_updates_persist_and_derive_status() {
    let (service, accounts) = service_with_films(vec![film(1, "Arrival")]).await;
    let account = account(&accounts, "nina").await;

    let record = service
        .track_film(account.account_id.as_i32(), 1, TrackStatus::PlanToStart, None)
        .await
        .unwrap();

    let updated = service.set_percent(record.progress_id, 55).await.unwrap();
    assert_eq!(updated.status, TrackStatus::InProgress);
    assert!(updated.started_on.is_some());

    let stored = service
        .progress_for_account(account.account_id)
        .await
        .unwrap();
    assert_eq!(stored[0].percent, 55);
    assert_eq!(stored[0].status, TrackStatus::InProgress);
}

#[tokio::test]
async fn invalid_rating_leaves_store_unchanged() {
    let (service, accounts) = service_with_films(vec![film(1, "The Thing")]).await;
    let account = account(&accounts, "nina").await;

    let record = service
        .track_film(account.account_id.as_i32(), 1, TrackStatus::Completed, None)
        .await
        .unwrap();

    let err = service
        .set_rating(record.progress_id, Some(5.5))
        .await
        .unwrap_err();
    assert!(matches!(err, TrackerError::Validation(_)));

    let stored = service
        .progress_for_account(account.account_id)
        .await
        .unwrap();
    assert!(stored[0].rating.is_none());
}

#[tokio::test]
async fn account_summary_counts_by_status() {
    let films = vec![film(1, "Alien"), film(2, "Aliens"), film(3, "Alien 3")];
    let (service, accounts) = service_with_films(films).await;
    let account = account(&accounts, "nina").await;
    let id = account.account_id;

    service
        .track_film(id.as_i32(), 1, TrackStatus::PlanToStart, None)
        .await
        .unwrap();
    service
        .track_film(id.as_i32(), 2, TrackStatus::InProgress, None)
        .await
        .unwrap();
    service
        .track_film(id.as_i32(), 3, TrackStatus::Completed, Some(4.0))
        .await
        .unwrap();

    let summary = service.account_summary(id).await.unwrap();
    assert_eq!(summary.total, 3);
    assert_eq!(summary.plan_to_start, 1);
    assert_eq!(summary.in_progress, 1);
    assert_eq!(summary.completed, 1);
}

#[tokio::test]
async fn film_stats_average_over_raters() {
    let (service, accounts) = service_with_films(vec![film(1, "Metropolis")]).await;
    let nina = account(&accounts, "nina").await;
    let remy = account(&accounts, "remy").await;
    let kim = account(&accounts, "kim").await;

    service
        .track_film(nina.account_id.as_i32(), 1, TrackStatus::Completed, Some(4.0))
        .await
        .unwrap();
    service
        .track_film(remy.account_id.as_i32(), 1, TrackStatus::Completed, Some(5.0))
        .await
        .unwrap();
    service
        .track_film(kim.account_id.as_i32(), 1, TrackStatus::InProgress, None)
        .await
        .unwrap();

    let stats = service.film_stats(FilmId(1)).await.unwrap();
    assert_eq!(stats.total_trackers, 3);
    assert_eq!(stats.completed, 2);
    assert_eq!(stats.in_progress, 1);
    assert_eq!(stats.plan_to_start, 0);
    assert_eq!(stats.rated_count, 2);
    assert!((stats.average_rating - 4.5).abs() < f64::EPSILON);
}

#[tokio::test]
async fn updatable_excludes_completed() {
    let films = vec![film(1, "Alien"), film(2, "Blade Runner")];
    let (service, accounts) = service_with_films(films).await;
    let account = account(&accounts, "nina").await;
    let id = account.account_id;

    service
        .track_film(id.as_i32(), 1, TrackStatus::Completed, None)
        .await
        .unwrap();
    service
        .track_film(id.as_i32(), 2, TrackStatus::InProgress, None)
        .await
        .unwrap();

    let updatable = service.updatable_for_account(id).await.unwrap();
    assert_eq!(updatable.len(), 1);
    assert_eq!(updatable[0].film_id, FilmId(2));
}

#[tokio::test]
async fn mutating_a_missing_record_is_not_found() {
    let (service, _) = service_with_films(vec![]).await;

    let err = service
        .set_status(ProgressId(99), TrackStatus::Completed)
        .await
        .unwrap_err();
    assert!(matches!(err, TrackerError::NotFound(_)));

    let err = service.untrack(ProgressId(99)).await.unwrap_err();
    assert!(matches!(err, TrackerError::NotFound(_)));
}
