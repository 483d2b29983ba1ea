use crate::error::ModelError;

/// Strongly typed ID for accounts with validation
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct AccountId(pub i32);

impl AccountId {
    /// Create an account ID, rejecting non-positive values.
    pub fn new(id: i32) -> Result<Self, ModelError> {
        if id <= 0 {
            return Err(ModelError::InvalidId {
                field: "account id",
                value: id,
            });
        }
        Ok(AccountId(id))
    }

    pub fn as_i32(&self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strongly typed ID for catalog films with validation
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FilmId(pub i32);

impl FilmId {
    /// Create a film ID, rejecting non-positive values.
    pub fn new(id: i32) -> Result<Self, ModelError> {
        if id <= 0 {
            return Err(ModelError::InvalidId {
                field: "film id",
                value: id,
            });
        }
        Ok(FilmId(id))
    }

    pub fn as_i32(&self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for FilmId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strongly typed ID for progress records
///
/// Zero marks a record that has not been persisted yet; the store assigns
/// the real key on insert.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ProgressId(pub i32);

impl ProgressId {
    /// Create a progress ID, rejecting negative values.
    pub fn new(id: i32) -> Result<Self, ModelError> {
        if id < 0 {
            return Err(ModelError::InvalidId {
                field: "progress id",
                value: id,
            });
        }
        Ok(ProgressId(id))
    }

    /// Placeholder key for records that have not been inserted yet.
    pub fn unsaved() -> Self {
        ProgressId(0)
    }

    pub fn as_i32(&self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for ProgressId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_ids_accepted() {
        assert_eq!(AccountId::new(1).unwrap().as_i32(), 1);
        assert_eq!(FilmId::new(42).unwrap().as_i32(), 42);
    }

    #[test]
    fn non_positive_ids_rejected() {
        assert!(AccountId::new(0).is_err());
        assert!(AccountId::new(-5).is_err());
        assert!(FilmId::new(0).is_err());
        assert!(ProgressId::new(-1).is_err());
    }

    #[test]
    fn unsaved_progress_id_is_zero() {
        assert_eq!(ProgressId::unsaved().as_i32(), 0);
    }
}
