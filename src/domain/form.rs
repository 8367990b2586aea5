//! Raw form input and field-level validation errors.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Note;

/// Form field names shared by handlers and templates.
pub mod fields {
    pub const TITLE: &str = "title";
    pub const TEXT: &str = "text";
    pub const SLUG: &str = "slug";
}

/// Note create/edit form as submitted by the browser.
///
/// Every field defaults to empty so that a partial submission reaches
/// validation (and gets field errors) instead of failing to deserialize.
/// Unknown fields such as `author` are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoteForm {
    pub title: String,
    pub text: String,
    pub slug: String,
}

impl NoteForm {
    /// Pre-fills a form from an existing note (edit page).
    pub fn from_note(note: &Note) -> Self {
        Self {
            title: note.title().to_string(),
            text: note.text().to_string(),
            slug: note.slug().to_string(),
        }
    }

    /// Returns the slug the user typed, if any.
    pub fn requested_slug(&self) -> Option<&str> {
        let trimmed = self.slug.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

/// Validation errors keyed by field name, plus form-wide messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormErrors {
    fields: BTreeMap<String, Vec<String>>,
    non_field: Vec<String>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an error set with a single field error.
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Records an error against a field.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Records an error that belongs to the form as a whole.
    pub fn add_non_field(&mut self, message: impl Into<String>) {
        self.non_field.push(message.into());
    }

    /// Returns the messages for a field (empty if none).
    pub fn field(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn non_field(&self) -> &[String] {
        &self.non_field
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.non_field.is_empty()
    }

    /// Converts to `Err(self)` when any error was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl std::fmt::Display for FormErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts: Vec<String> = self.non_field.clone();
        for (field, messages) in &self.fields {
            for message in messages {
                parts.push(format!("{}: {}", field, message));
            }
        }
        write!(f, "{}", parts.join("; "))
    }
}
