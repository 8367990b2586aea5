//! URL-safe note slug.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use std::str::FromStr;

/// Maximum slug length in characters.
pub const MAX_SLUG_LENGTH: usize = 100;

/// A validated note slug.
///
/// Slugs address notes in URLs (`/note/{slug}/`) and are unique across
/// every note in the store, regardless of author.
///
/// # Validation Rules
/// - Non-empty after trimming surrounding whitespace
/// - At most [`MAX_SLUG_LENGTH`] characters
/// - Only ASCII letters, digits, hyphens, and underscores
///
/// Slugs are case-sensitive and stored exactly as given.
///
/// # Examples
///
/// ```
/// use notekeep::domain::Slug;
///
/// let slug = Slug::new("my_first-note").unwrap();
/// assert_eq!(slug.as_str(), "my_first-note");
///
/// assert!(Slug::new("has spaces").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Slug(String);

/// Error returned when parsing an invalid slug.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ParseSlugError(String);

impl Slug {
    /// Creates a new Slug from a string.
    ///
    /// # Errors
    ///
    /// Returns `ParseSlugError` if the slug is empty, too long, or contains
    /// characters outside `[A-Za-z0-9_-]`.
    pub fn new(s: &str) -> Result<Self, ParseSlugError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(ParseSlugError("slug cannot be empty".to_string()));
        }

        let len = trimmed.chars().count();
        if len > MAX_SLUG_LENGTH {
            return Err(ParseSlugError(format!(
                "slug must be at most {} characters (it has {})",
                MAX_SLUG_LENGTH, len
            )));
        }

        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ParseSlugError(format!(
                "invalid slug '{}': use only latin letters, digits, hyphens, and underscores",
                trimmed
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Returns the slug as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Slug(\"{}\")", self.0)
    }
}

impl FromStr for Slug {
    type Err = ParseSlugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for Slug {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Slug {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn accepts_letters_digits_hyphens_underscores() {
        for s in ["qaz", "slug_for_test", "note-2024", "A-b_C"] {
            assert_eq!(Slug::new(s).unwrap().as_str(), s);
        }
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(Slug::new("  qaz \n").unwrap().as_str(), "qaz");
    }

    #[test]
    fn preserves_case() {
        assert_eq!(Slug::new("MixedCase").unwrap().as_str(), "MixedCase");
        assert_ne!(Slug::new("abc").unwrap(), Slug::new("ABC").unwrap());
    }

    #[test]
    fn rejects_empty() {
        assert!(Slug::new("").is_err());
        let err = Slug::new("   ").unwrap_err();
        assert_eq!(err.to_string(), "slug cannot be empty");
    }

    #[test]
    fn rejects_invalid_characters() {
        for s in ["has space", "slash/inside", "dot.ted", "заметка", "q?x"] {
            assert!(Slug::new(s).is_err(), "{s:?} should be rejected");
        }
    }

    #[test]
    fn enforces_max_length() {
        let ok = "a".repeat(MAX_SLUG_LENGTH);
        assert!(Slug::new(&ok).is_ok());

        let too_long = "a".repeat(MAX_SLUG_LENGTH + 1);
        let err = Slug::new(&too_long).unwrap_err();
        assert!(err.to_string().contains("at most 100"));
    }

    #[test]
    fn deserialize_validates() {
        let ok: Slug = serde_json::from_str("\"qaz\"").unwrap();
        assert_eq!(ok.as_str(), "qaz");
        assert!(serde_json::from_str::<Slug>("\"bad slug\"").is_err());
    }
}
