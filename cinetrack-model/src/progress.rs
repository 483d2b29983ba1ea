//! Per-film tracking records and their status/percent/date invariants
//!
//! A [`ProgressRecord`] is one account's tracking state for one film. The
//! record owns its own consistency: every mutation validates first, applies
//! the status/percent derivation rules, and refreshes `last_updated`.
//!
//! ## Invariants
//!
//! - percent 0 derives `PlanToStart`, 1-99 derives `InProgress`, 100
//!   derives `Completed` (see [`TrackStatus::from_percent`]).
//! - entering `Completed` forces percent to 100.
//! - `started_on` and `completed_on` are set the first time the matching
//!   threshold is crossed and are never cleared afterwards.
//! - a failed validation leaves the record untouched.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::ids::{AccountId, FilmId, ProgressId};
use crate::status::TrackStatus;

/// One account's tracking state for one film.
///
/// Exactly one record exists per (account, film) pair; the store enforces
/// this with a uniqueness constraint and the creation path re-checks it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub progress_id: ProgressId,
    pub account_id: AccountId,
    pub film_id: FilmId,
    pub status: TrackStatus,
    /// Completion percentage, 0-100
    pub percent: u8,
    /// The account's own rating, 1.0-5.0
    pub rating: Option<f64>,
    pub notes: Option<String>,
    pub started_on: Option<NaiveDate>,
    pub completed_on: Option<NaiveDate>,
    pub last_updated: DateTime<Utc>,
}

impl ProgressRecord {
    /// Create a new, not-yet-persisted record with status-derived defaults.
    ///
    /// `Completed` starts at 100% with today's completion date;
    /// `InProgress` records today as the start date; `PlanToStart` sets
    /// neither date.
    pub fn new(account_id: AccountId, film_id: FilmId, status: TrackStatus) -> Self {
        let today = Utc::now().date_naive();
        let (percent, started_on, completed_on) = match status {
            TrackStatus::PlanToStart => (0, None, None),
            TrackStatus::InProgress => (0, Some(today), None),
            TrackStatus::Completed => (100, None, Some(today)),
        };

        Self {
            progress_id: ProgressId::unsaved(),
            account_id,
            film_id,
            status,
            percent,
            rating: None,
            notes: None,
            started_on,
            completed_on,
            last_updated: Utc::now(),
        }
    }

    /// Change the tracking status directly.
    ///
    /// Entering `InProgress` records the start date if none exists yet;
    /// entering `Completed` forces percent to 100 and records the
    /// completion date if none exists yet. Dates already set stay set.
    pub fn set_status(&mut self, status: TrackStatus) {
        self.status = status;
        let today = Utc::now().date_naive();
        match status {
            TrackStatus::InProgress => {
                if self.started_on.is_none() {
                    self.started_on = Some(today);
                }
            }
            TrackStatus::Completed => {
                self.percent = 100;
                if self.completed_on.is_none() {
                    self.completed_on = Some(today);
                }
            }
            TrackStatus::PlanToStart => {}
        }
        self.touch();
    }

    /// Set the completion percentage and re-derive the status from it.
    ///
    /// Crossing 0% for the first time records the start date; reaching
    /// 100% for the first time records the completion date. Re-entering a
    /// threshold never overwrites a date that is already set.
    pub fn set_percent(&mut self, percent: u8) -> Result<(), ModelError> {
        if percent > 100 {
            return Err(ModelError::PercentOutOfRange(percent));
        }

        self.percent = percent;
        self.status = TrackStatus::from_percent(percent);

        let today = Utc::now().date_naive();
        if percent > 0 && self.started_on.is_none() {
            self.started_on = Some(today);
        }
        if percent == 100 && self.completed_on.is_none() {
            self.completed_on = Some(today);
        }

        self.touch();
        Ok(())
    }

    /// Set or clear the account's rating.
    pub fn set_rating(&mut self, rating: Option<f64>) -> Result<(), ModelError> {
        if let Some(value) = rating
            && !(1.0..=5.0).contains(&value)
        {
            return Err(ModelError::RatingOutOfRange(value));
        }
        self.rating = rating;
        self.touch();
        Ok(())
    }

    /// Set or clear free-text notes.
    pub fn set_notes(&mut self, notes: Option<String>) {
        self.notes = notes;
        self.touch();
    }

    /// Whether this record counts as watched to completion.
    pub fn is_complete(&self) -> bool {
        self.status == TrackStatus::Completed || self.percent == 100
    }

    fn touch(&mut self) {
        self.last_updated = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(status: TrackStatus) -> ProgressRecord {
        ProgressRecord::new(AccountId(1), FilmId(1), status)
    }

    #[test]
    fn plan_to_start_defaults() {
        let r = record(TrackStatus::PlanToStart);
        assert_eq!(r.percent, 0);
        assert!(r.started_on.is_none());
        assert!(r.completed_on.is_none());
        assert!(!r.is_complete());
    }

    #[test]
    fn in_progress_defaults() {
        let r = record(TrackStatus::InProgress);
        assert_eq!(r.percent, 0);
        assert!(r.started_on.is_some());
        assert!(r.completed_on.is_none());
    }

    #[test]
    fn completed_defaults() {
        let r = record(TrackStatus::Completed);
        assert_eq!(r.percent, 100);
        assert!(r.completed_on.is_some());
        assert!(r.is_complete());
    }

    #[test]
    fn percent_derives_status_across_range() {
        let mut r = record(TrackStatus::PlanToStart);
        for percent in 1..=99 {
            r.set_percent(percent).unwrap();
            assert_eq!(r.status, TrackStatus::InProgress, "percent {}", percent);
            assert!(r.started_on.is_some(), "percent {}", percent);
        }

        r.set_percent(100).unwrap();
        assert_eq!(r.status, TrackStatus::Completed);
        assert!(r.completed_on.is_some());

        r.set_percent(0).unwrap();
        assert_eq!(r.status, TrackStatus::PlanToStart);
    }

    #[test]
    fn percent_over_100_rejected() {
        let mut r = record(TrackStatus::InProgress);
        r.set_percent(40).unwrap();
        let before = r.last_updated;
        assert!(r.set_percent(101).is_err());
        assert_eq!(r.percent, 40);
        assert_eq!(r.status, TrackStatus::InProgress);
        assert_eq!(r.last_updated, before);
    }

    #[test]
    fn completion_date_set_once_never_cleared() {
        let mut r = record(TrackStatus::PlanToStart);
        r.set_percent(100).unwrap();
        let completed_on = r.completed_on;
        assert!(completed_on.is_some());

        // Dropping back below 100 and completing again keeps the first date.
        r.set_percent(50).unwrap();
        assert_eq!(r.completed_on, completed_on);
        r.set_percent(100).unwrap();
        assert_eq!(r.completed_on, completed_on);

        r.set_status(TrackStatus::InProgress);
        r.set_status(TrackStatus::Completed);
        assert_eq!(r.completed_on, completed_on);
    }

    #[test]
    fn completing_by_status_forces_percent() {
        let mut r = record(TrackStatus::InProgress);
        r.set_percent(60).unwrap();
        r.set_status(TrackStatus::Completed);
        assert_eq!(r.percent, 100);
        assert!(r.completed_on.is_some());
    }

    #[test]
    fn status_change_preserves_start_date() {
        let mut r = record(TrackStatus::InProgress);
        let started_on = r.started_on;
        r.set_status(TrackStatus::PlanToStart);
        r.set_status(TrackStatus::InProgress);
        assert_eq!(r.started_on, started_on);
    }

    #[test]
    fn rating_bounds() {
        let mut r = record(TrackStatus::Completed);
        assert!(r.set_rating(Some(0.5)).is_err());
        assert!(r.set_rating(Some(5.5)).is_err());
        assert!(r.rating.is_none());

        r.set_rating(Some(3.0)).unwrap();
        assert_eq!(r.rating, Some(3.0));

        r.set_rating(None).unwrap();
        assert!(r.rating.is_none());
    }

    #[test]
    fn notes_are_free_form() {
        let mut r = record(TrackStatus::PlanToStart);
        r.set_notes(Some("rewatch with commentary".to_string()));
        assert_eq!(r.notes.as_deref(), Some("rewatch with commentary"));
        r.set_notes(None);
        assert!(r.notes.is_none());
    }
}
