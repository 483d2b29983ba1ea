//! Core data model definitions shared across Cinetrack crates.

pub mod account;
pub mod error;
pub mod film;
pub mod ids;
pub mod progress;
pub mod stats;
pub mod status;

// Intentionally curated re-exports for downstream consumers.
pub use account::Account;
pub use error::{ModelError, Result as ModelResult};
pub use film::{Category, Film};
pub use ids::{AccountId, FilmId, ProgressId};
pub use progress::ProgressRecord;
pub use stats::{FilmStats, ProgressSummary};
pub use status::TrackStatus;
