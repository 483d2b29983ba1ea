use serde::{Deserialize, Serialize};

/// Per-account status breakdown over a batch of progress records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub total: u32,
    pub plan_to_start: u32,
    pub in_progress: u32,
    pub completed: u32,
}

/// Per-film tracker counts and mean account rating
///
/// `average_rating` is 0.0 when no record carries a rating; callers must
/// check `rated_count` to tell "no ratings" apart from a true zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FilmStats {
    pub total_trackers: u32,
    pub plan_to_start: u32,
    pub in_progress: u32,
    pub completed: u32,
    pub average_rating: f64,
    pub rated_count: u32,
}
