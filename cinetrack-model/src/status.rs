use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

use crate::error::ModelError;

/// Tracking lifecycle stage for one account's progress on one film
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrackStatus {
    /// Not started yet
    PlanToStart,
    /// Currently watching
    InProgress,
    /// Watched to completion
    Completed,
}

impl TrackStatus {
    /// Database token for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackStatus::PlanToStart => "PLAN_TO_START",
            TrackStatus::InProgress => "IN_PROGRESS",
            TrackStatus::Completed => "COMPLETED",
        }
    }

    /// Derive the status a completion percentage implies.
    ///
    /// This is the single source of the percent-to-status mapping; every
    /// percent mutation goes through it.
    pub fn from_percent(percent: u8) -> TrackStatus {
        match percent {
            0 => TrackStatus::PlanToStart,
            100 => TrackStatus::Completed,
            _ => TrackStatus::InProgress,
        }
    }

    /// All statuses in menu order.
    pub fn all() -> [TrackStatus; 3] {
        [
            TrackStatus::PlanToStart,
            TrackStatus::InProgress,
            TrackStatus::Completed,
        ]
    }
}

impl Display for TrackStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackStatus::PlanToStart => write!(f, "Plan to Start"),
            TrackStatus::InProgress => write!(f, "In Progress"),
            TrackStatus::Completed => write!(f, "Completed"),
        }
    }
}

impl FromStr for TrackStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PLAN_TO_START" => Ok(TrackStatus::PlanToStart),
            "IN_PROGRESS" => Ok(TrackStatus::InProgress),
            "COMPLETED" => Ok(TrackStatus::Completed),
            other => Err(ModelError::UnknownStatus(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trip() {
        for status in TrackStatus::all() {
            assert_eq!(status.as_str().parse::<TrackStatus>().unwrap(), status);
        }
    }

    #[test]
    fn unknown_token_rejected() {
        assert!("WATCHING".parse::<TrackStatus>().is_err());
        assert!("".parse::<TrackStatus>().is_err());
    }

    #[test]
    fn percent_derivation() {
        assert_eq!(TrackStatus::from_percent(0), TrackStatus::PlanToStart);
        assert_eq!(TrackStatus::from_percent(1), TrackStatus::InProgress);
        assert_eq!(TrackStatus::from_percent(99), TrackStatus::InProgress);
        assert_eq!(TrackStatus::from_percent(100), TrackStatus::Completed);
    }
}
