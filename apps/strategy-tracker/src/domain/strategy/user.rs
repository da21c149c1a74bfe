//! User entity.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::DomainError;

/// Database identifier of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw identifier.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated user that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    username: String,
    email: String,
}

impl NewUser {
    /// Validate user details.
    ///
    /// The email is lowercased so lookups are case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns error if the username is blank or the email is malformed.
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Result<Self, DomainError> {
        let username = username.into().trim().to_string();
        let email = email.into().trim().to_lowercase();

        if username.is_empty() {
            return Err(DomainError::invalid("username", "Username cannot be empty"));
        }

        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
            _ => {
                return Err(DomainError::invalid(
                    "email",
                    format!("'{email}' is not an email address"),
                ));
            }
        }

        Ok(Self { username, email })
    }

    /// Normalized email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Attach the identifier assigned by storage.
    #[must_use]
    pub fn with_id(self, id: UserId) -> User {
        User {
            id,
            username: self.username,
            email: self.email,
        }
    }
}

/// A stored user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    username: String,
    email: String,
}

impl User {
    /// Get the identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Get the display name.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Get the email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_normalizes_email() {
        let user = NewUser::new(" trader ", " Trader@Example.COM ")
            .unwrap()
            .with_id(UserId::new(3));

        assert_eq!(user.id(), UserId::new(3));
        assert_eq!(user.username(), "trader");
        assert_eq!(user.email(), "trader@example.com");
    }

    #[test]
    fn new_user_rejects_blank_username() {
        let err = NewUser::new("  ", "a@b.c").unwrap_err();
        assert_eq!(err.field(), "username");
    }

    #[test]
    fn new_user_rejects_bad_email() {
        assert!(NewUser::new("trader", "trader.example.com").is_err());
        assert!(NewUser::new("trader", "@example.com").is_err());
        assert!(NewUser::new("trader", "trader@").is_err());
    }
}
