//! Account identity types.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Maximum username length in characters.
pub const MAX_USERNAME_LENGTH: usize = 150;

/// Database identifier of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An authenticated account as seen by the rest of the application.
///
/// Password material never leaves the store; this is what request handlers
/// and the access layer work with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    id: UserId,
    username: Username,
}

impl User {
    pub fn new(id: UserId, username: Username) -> Self {
        Self { id, username }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }
}

/// A validated login name.
///
/// Letters from any script, digits, spaces, and `@ . + - _` are allowed so
/// that names like `Лев Толстой` work unchanged.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

/// Error returned when parsing an invalid username.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ParseUsernameError(String);

impl Username {
    /// Creates a new Username, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns `ParseUsernameError` if the name is empty, longer than
    /// [`MAX_USERNAME_LENGTH`], or contains disallowed characters.
    pub fn new(s: &str) -> Result<Self, ParseUsernameError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(ParseUsernameError("username cannot be empty".to_string()));
        }

        if trimmed.chars().count() > MAX_USERNAME_LENGTH {
            return Err(ParseUsernameError(format!(
                "username must be at most {} characters",
                MAX_USERNAME_LENGTH
            )));
        }

        if let Some(bad) = trimmed
            .chars()
            .find(|&c| !(c.is_alphanumeric() || c == ' ' || "@.+-_".contains(c)))
        {
            return Err(ParseUsernameError(format!(
                "invalid character '{}' in username",
                bad
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Username(\"{}\")", self.0)
    }
}

impl Serialize for Username {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}
