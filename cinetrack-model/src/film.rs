use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::ids::FilmId;

/// Catalog category tag
///
/// The catalog currently holds films only; the tag is kept because the
/// stored layout carries it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    #[default]
    Movies,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Movies => "MOVIES",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Movies => write!(f, "Movies"),
        }
    }
}

/// A catalog entry available for tracking.
///
/// Seeded once at setup; read-only from the tracker's perspective.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Film {
    pub film_id: FilmId,
    pub title: String,
    pub category: Category,
    pub synopsis: Option<String>,
    pub runtime_minutes: Option<i32>,
    pub release_year: Option<i32>,
    pub genre: Option<String>,
    pub director: Option<String>,
    /// Aggregate rating imported with the catalog, 1.0-5.0
    pub external_rating: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl Film {
    /// Validate catalog fields; used when seeding and when hydrating rows.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.title.trim().is_empty() {
            return Err(ModelError::EmptyField("title"));
        }
        if self.title.len() > 255 {
            return Err(ModelError::FieldTooLong {
                field: "title",
                max: 255,
            });
        }
        if let Some(genre) = &self.genre
            && genre.len() > 100
        {
            return Err(ModelError::FieldTooLong {
                field: "genre",
                max: 100,
            });
        }
        if let Some(director) = &self.director
            && director.len() > 150
        {
            return Err(ModelError::FieldTooLong {
                field: "director",
                max: 150,
            });
        }
        if let Some(runtime) = self.runtime_minutes
            && runtime < 0
        {
            return Err(ModelError::NegativeRuntime(runtime));
        }
        if let Some(rating) = self.external_rating
            && !(1.0..=5.0).contains(&rating)
        {
            return Err(ModelError::RatingOutOfRange(rating));
        }
        Ok(())
    }

    /// Runtime as "2h 16m" / "45m" / "Unknown".
    pub fn formatted_runtime(&self) -> String {
        match self.runtime_minutes {
            None => "Unknown".to_string(),
            Some(minutes) => {
                let hours = minutes / 60;
                let rest = minutes % 60;
                if hours > 0 {
                    format!("{}h {}m", hours, rest)
                } else {
                    format!("{}m", rest)
                }
            }
        }
    }
}
