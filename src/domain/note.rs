//! Note record and its validated content.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use super::{NoteId, Slug, UserId};

/// Maximum title length in characters.
pub const MAX_TITLE_LENGTH: usize = 100;

/// Errors raised when note content fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NoteContentError {
    #[error("title cannot be empty")]
    EmptyTitle,

    #[error("title must be at most {max} characters (it has {actual})")]
    TitleTooLong { max: usize, actual: usize },

    #[error("text cannot be empty")]
    EmptyText,
}

/// The user-editable part of a note: title, body text, and slug.
///
/// Constructed once the slug has been resolved (supplied or derived), so a
/// `NoteContent` is always ready to be written to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteContent {
    title: String,
    text: String,
    slug: Slug,
}

impl NoteContent {
    /// Validates and builds note content.
    ///
    /// The title is trimmed; the text is kept as written.
    ///
    /// # Errors
    ///
    /// Returns the first [`NoteContentError`] found.
    pub fn new(title: &str, text: &str, slug: Slug) -> Result<Self, NoteContentError> {
        let title = Self::check_title(title)?;
        Self::check_text(text)?;
        Ok(Self {
            title: title.to_string(),
            text: text.to_string(),
            slug,
        })
    }

    /// Validates a title on its own, returning the trimmed value.
    pub fn check_title(title: &str) -> Result<&str, NoteContentError> {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(NoteContentError::EmptyTitle);
        }
        let len = trimmed.chars().count();
        if len > MAX_TITLE_LENGTH {
            return Err(NoteContentError::TitleTooLong {
                max: MAX_TITLE_LENGTH,
                actual: len,
            });
        }
        Ok(trimmed)
    }

    /// Validates note text on its own.
    pub fn check_text(text: &str) -> Result<(), NoteContentError> {
        if text.trim().is_empty() {
            return Err(NoteContentError::EmptyText);
        }
        Ok(())
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn slug(&self) -> &Slug {
        &self.slug
    }
}

/// A stored note.
///
/// The author is fixed at construction; there is no setter for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    id: NoteId,
    #[serde(flatten)]
    content: NoteContent,
    author: UserId,
    created: DateTime<Utc>,
    modified: DateTime<Utc>,
}

impl Note {
    pub fn new(
        id: NoteId,
        author: UserId,
        content: NoteContent,
        created: DateTime<Utc>,
        modified: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            content,
            author,
            created,
            modified,
        }
    }

    /// Returns the note's unique identifier.
    pub fn id(&self) -> &NoteId {
        &self.id
    }

    pub fn title(&self) -> &str {
        self.content.title()
    }

    pub fn text(&self) -> &str {
        self.content.text()
    }

    pub fn slug(&self) -> &Slug {
        self.content.slug()
    }

    pub fn content(&self) -> &NoteContent {
        &self.content
    }

    /// Returns the id of the user who created the note.
    pub fn author(&self) -> UserId {
        self.author
    }

    /// Returns true when `user` is this note's author.
    pub fn is_owned_by(&self, user: UserId) -> bool {
        self.author == user
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    pub fn modified(&self) -> DateTime<Utc> {
        self.modified
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn slug(s: &str) -> Slug {
        Slug::new(s).unwrap()
    }

    #[test]
    fn content_trims_title_keeps_text() {
        let content = NoteContent::new("  Title  ", "  body\n", slug("t")).unwrap();
        assert_eq!(content.title(), "Title");
        assert_eq!(content.text(), "  body\n");
    }

    #[test]
    fn content_rejects_blank_title() {
        assert_eq!(
            NoteContent::new("   ", "text", slug("t")),
            Err(NoteContentError::EmptyTitle)
        );
    }

    #[test]
    fn content_rejects_long_title() {
        let title = "т".repeat(MAX_TITLE_LENGTH + 1);
        assert_eq!(
            NoteContent::new(&title, "text", slug("t")),
            Err(NoteContentError::TitleTooLong {
                max: MAX_TITLE_LENGTH,
                actual: MAX_TITLE_LENGTH + 1
            })
        );
    }

    #[test]
    fn content_rejects_blank_text() {
        assert_eq!(
            NoteContent::new("Title", " \n ", slug("t")),
            Err(NoteContentError::EmptyText)
        );
    }

    #[test]
    fn note_ownership() {
        let now = Utc::now();
        let content = NoteContent::new("Название", "Текст", slug("qaz")).unwrap();
        let note = Note::new(NoteId::new(), UserId::new(1), content, now, now);
        assert!(note.is_owned_by(UserId::new(1)));
        assert!(!note.is_owned_by(UserId::new(2)));
        assert_eq!(note.slug().as_str(), "qaz");
    }

    #[test]
    fn note_serializes_flat() {
        let now = Utc::now();
        let content = NoteContent::new("T", "x", slug("s")).unwrap();
        let note = Note::new(NoteId::new(), UserId::new(3), content, now, now);
        let value = serde_json::to_value(&note).unwrap();
        assert_eq!(value["title"], "T");
        assert_eq!(value["slug"], "s");
        assert_eq!(value["author"], 3);
    }
}
