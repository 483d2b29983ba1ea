use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::ids::AccountId;

/// A registered user identity.
///
/// Credentials are stored and compared as plaintext. Known limitation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub account_id: AccountId,
    /// Unique display name used for login
    pub username: String,
    pub password: String,
    /// Optional contact address
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Create a new, not-yet-persisted account with validated fields.
    pub fn new(
        username: &str,
        password: &str,
        email: Option<&str>,
    ) -> Result<Self, ModelError> {
        Self::validate_username(username)?;
        Self::validate_password(password)?;
        if let Some(email) = email {
            Self::validate_email(email)?;
        }

        Ok(Self {
            account_id: AccountId(0),
            username: username.trim().to_string(),
            password: password.to_string(),
            email: email.map(|e| e.trim().to_string()),
            created_at: Utc::now(),
        })
    }

    pub fn set_password(&mut self, password: &str) -> Result<(), ModelError> {
        Self::validate_password(password)?;
        self.password = password.to_string();
        Ok(())
    }

    pub fn set_email(&mut self, email: Option<&str>) -> Result<(), ModelError> {
        if let Some(email) = email {
            Self::validate_email(email)?;
        }
        self.email = email.map(|e| e.trim().to_string());
        Ok(())
    }

    pub fn validate_username(username: &str) -> Result<(), ModelError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(ModelError::EmptyField("username"));
        }
        if username.len() > 50 {
            return Err(ModelError::FieldTooLong {
                field: "username",
                max: 50,
            });
        }
        Ok(())
    }

    pub fn validate_password(password: &str) -> Result<(), ModelError> {
        if password.is_empty() {
            return Err(ModelError::EmptyField("password"));
        }
        if password.len() > 255 {
            return Err(ModelError::FieldTooLong {
                field: "password",
                max: 255,
            });
        }
        Ok(())
    }

    pub fn validate_email(email: &str) -> Result<(), ModelError> {
        let email = email.trim();
        if email.len() > 100 {
            return Err(ModelError::FieldTooLong {
                field: "email",
                max: 100,
            });
        }
        if !email.contains('@') {
            return Err(ModelError::InvalidEmail(email.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_account() {
        let account = Account::new("nina", "hunter2", Some("nina@example.com")).unwrap();
        assert_eq!(account.username, "nina");
        assert_eq!(account.email.as_deref(), Some("nina@example.com"));
        assert_eq!(account.account_id.as_i32(), 0);
    }

    #[test]
    fn username_limits() {
        assert!(Account::new("", "pw", None).is_err());
        assert!(Account::new("  ", "pw", None).is_err());
        assert!(Account::new(&"a".repeat(51), "pw", None).is_err());
    }

    #[test]
    fn password_limits() {
        assert!(Account::new("nina", "", None).is_err());
        assert!(Account::new("nina", &"x".repeat(256), None).is_err());

        let mut account = Account::new("nina", "hunter2", None).unwrap();
        assert!(account.set_password("").is_err());
        assert_eq!(account.password, "hunter2");
    }

    #[test]
    fn email_must_contain_at() {
        assert!(Account::new("nina", "pw", Some("not-an-email")).is_err());
        assert!(Account::new("nina", "pw", Some(&format!("{}@x.com", "a".repeat(100)))).is_err());

        let mut account = Account::new("nina", "pw", None).unwrap();
        account.set_email(Some("nina@example.com")).unwrap();
        account.set_email(None).unwrap();
        assert!(account.email.is_none());
    }
}
