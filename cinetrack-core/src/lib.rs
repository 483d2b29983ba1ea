//! Core library for Cinetrack.
//!
//! Holds the progress-tracking business rules, the read-only aggregator,
//! the repository ports, and their PostgreSQL implementations. The console
//! frontend lives in `cinetrack-cli` and talks to this crate only through
//! [`service::TrackingService`] and the repository traits.

pub mod database;
pub mod error;
pub mod service;
pub mod stats;

pub use error::{Result, TrackerError};
pub use service::TrackingService;
