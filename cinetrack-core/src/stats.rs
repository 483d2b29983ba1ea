//! Read-only aggregation over batches of progress records
//!
//! Pure functions, no I/O: the caller fetches a batch (all records for one
//! account, or all records for one film) and the summaries here are
//! order-independent folds over it.

use cinetrack_model::{FilmStats, ProgressRecord, ProgressSummary, TrackStatus};

/// Status breakdown for one account's records.
pub fn summarize_by_account(records: &[ProgressRecord]) -> ProgressSummary {
    let mut summary = ProgressSummary::default();
    for record in records {
        summary.total += 1;
        match record.status {
            TrackStatus::PlanToStart => summary.plan_to_start += 1,
            TrackStatus::InProgress => summary.in_progress += 1,
            TrackStatus::Completed => summary.completed += 1,
        }
    }
    summary
}

/// Tracker counts and mean rating for one film's records.
///
/// The average covers only records that carry a rating; with no ratings it
/// is 0.0 and `rated_count` is 0.
pub fn summarize_by_film(records: &[ProgressRecord]) -> FilmStats {
    let mut stats = FilmStats::default();
    let mut rating_sum = 0.0;

    for record in records {
        stats.total_trackers += 1;
        match record.status {
            TrackStatus::PlanToStart => stats.plan_to_start += 1,
            TrackStatus::InProgress => stats.in_progress += 1,
            TrackStatus::Completed => stats.completed += 1,
        }
        if let Some(rating) = record.rating {
            stats.rated_count += 1;
            rating_sum += rating;
        }
    }

    if stats.rated_count > 0 {
        stats.average_rating = rating_sum / stats.rated_count as f64;
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinetrack_model::{AccountId, FilmId};

    fn record(status: TrackStatus, rating: Option<f64>) -> ProgressRecord {
        let mut record = ProgressRecord::new(AccountId(1), FilmId(1), status);
        record.set_rating(rating).unwrap();
        record
    }

    #[test]
    fn empty_batch_is_all_zero() {
        let summary = summarize_by_account(&[]);
        assert_eq!(summary, ProgressSummary::default());

        let stats = summarize_by_film(&[]);
        assert_eq!(stats.total_trackers, 0);
        assert_eq!(stats.average_rating, 0.0);
        assert_eq!(stats.rated_count, 0);
    }

    #[test]
    fn account_summary_counts_statuses() {
        let records = vec![
            record(TrackStatus::PlanToStart, None),
            record(TrackStatus::InProgress, None),
            record(TrackStatus::InProgress, None),
            record(TrackStatus::Completed, Some(4.0)),
        ];
        let summary = summarize_by_account(&records);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.plan_to_start, 1);
        assert_eq!(summary.in_progress, 2);
        assert_eq!(summary.completed, 1);
    }

    #[test]
    fn film_stats_average_skips_unrated() {
        let records = vec![
            record(TrackStatus::Completed, Some(4.0)),
            record(TrackStatus::Completed, Some(5.0)),
            record(TrackStatus::InProgress, None),
        ];
        let stats = summarize_by_film(&records);
        assert_eq!(stats.total_trackers, 3);
        assert_eq!(stats.completed, 2);
        assert_eq!(stats.in_progress, 1);
        assert_eq!(stats.plan_to_start, 0);
        assert_eq!(stats.rated_count, 2);
        assert!((stats.average_rating - 4.5).abs() < f64::EPSILON);
    }

    #[test]
    fn summaries_are_order_independent() {
        let mut records = vec![
            record(TrackStatus::Completed, Some(2.0)),
            record(TrackStatus::PlanToStart, None),
            record(TrackStatus::InProgress, Some(3.5)),
        ];
        let forward = summarize_by_film(&records);
        records.reverse();
        let backward = summarize_by_film(&records);
        assert_eq!(forward, backward);
    }
}
