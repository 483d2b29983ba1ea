//! Repository ports
//!
//! Narrow async contracts over the persistence store. The Postgres
//! implementations live under [`crate::database::postgres`]; tests supply
//! in-memory fakes.

pub mod accounts;
pub mod films;
pub mod progress;

pub use accounts::AccountsRepository;
pub use films::FilmsRepository;
pub use progress::ProgressRepository;
