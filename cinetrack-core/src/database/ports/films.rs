use async_trait::async_trait;

use crate::error::Result;
use cinetrack_model::{Film, FilmId};

// Read-only film catalog
#[async_trait]
pub trait FilmsRepository: Send + Sync {
    async fn find_by_id(&self, id: FilmId) -> Result<Option<Film>>;
    async fn list_all(&self) -> Result<Vec<Film>>;
}
