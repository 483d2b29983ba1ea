use cinetrack_model::{AccountId, FilmId, ModelError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("validation failed: {0}")]
    Validation(#[from] ModelError),

    #[error("account {account_id} is already tracking film {film_id}")]
    DuplicateTracking {
        account_id: AccountId,
        film_id: FilmId,
    },

    #[error("{0} not found")]
    NotFound(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TrackerError>;
