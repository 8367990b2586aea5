//! Repository traits and error types for persistent storage.

use crate::domain::{Note, NoteContent, NoteId, Slug, User, UserId, Username};
use crate::infra::{PasswordHash, SessionToken};
use chrono::Duration;
use std::path::PathBuf;
use thiserror::Error;

// ===========================================
// StoreError Type
// ===========================================

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Another note already uses this slug.
    #[error("slug already in use: {slug}")]
    DuplicateSlug { slug: String },

    /// Another account already uses this username.
    #[error("username already taken: {username}")]
    DuplicateUsername { username: String },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A row could not be converted back into a domain value.
    #[error("corrupt record: {0}")]
    Corrupt(String),

    /// An I/O error occurred.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A thread panicked while holding the connection.
    #[error("database connection lock poisoned")]
    Poisoned,
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// ===========================================
// NoteRepository Trait
// ===========================================

/// Persistent note storage.
///
/// Implementations must enforce slug uniqueness themselves (not by
/// check-then-write), reporting violations as [`StoreError::DuplicateSlug`].
/// Update and delete are scoped to the author so that ownership is re-checked
/// by the same statement that performs the write.
pub trait NoteRepository {
    /// Inserts a new note owned by `author` and returns it.
    fn insert_note(&self, author: UserId, content: &NoteContent) -> StoreResult<Note>;

    /// Retrieves a note by primary key.
    fn get_note(&self, id: &NoteId) -> StoreResult<Option<Note>>;

    /// Retrieves a note by slug, whoever owns it.
    fn find_note_by_slug(&self, slug: &Slug) -> StoreResult<Option<Note>>;

    /// Lists every note written by `author`, oldest first.
    fn notes_by_author(&self, author: UserId) -> StoreResult<Vec<Note>>;

    /// Replaces the content of note `id` if it belongs to `author`.
    ///
    /// Returns `None` when no note matched both id and author.
    fn update_note(
        &self,
        id: &NoteId,
        author: UserId,
        content: &NoteContent,
    ) -> StoreResult<Option<Note>>;

    /// Deletes note `id` if it belongs to `author`. Returns whether a row
    /// was removed.
    fn delete_note(&self, id: &NoteId, author: UserId) -> StoreResult<bool>;

    /// Returns true if any note other than `except` uses `slug`.
    fn slug_in_use(&self, slug: &Slug, except: Option<&NoteId>) -> StoreResult<bool>;

    /// Returns the total number of notes across all users.
    fn count_notes(&self) -> StoreResult<usize>;
}

// ===========================================
// UserRepository Trait
// ===========================================

/// Accounts and login sessions.
pub trait UserRepository {
    /// Creates an account. Fails with [`StoreError::DuplicateUsername`] if
    /// the name is taken.
    fn create_user(&self, username: &Username, password: &PasswordHash) -> StoreResult<User>;

    /// Retrieves an account by id.
    fn get_user(&self, id: UserId) -> StoreResult<Option<User>>;

    /// Retrieves an account and its password hash by username.
    fn find_user(&self, username: &Username) -> StoreResult<Option<(User, PasswordHash)>>;

    /// Starts a session for `user` that expires after `ttl` of inactivity.
    fn create_session(&self, user: UserId, ttl: Duration) -> StoreResult<SessionToken>;

    /// Resolves a live session to its user, extending its expiry by `ttl`.
    fn session_user(&self, token: &SessionToken, ttl: Duration) -> StoreResult<Option<User>>;

    /// Ends a session. Returns whether it existed.
    fn delete_session(&self, token: &SessionToken) -> StoreResult<bool>;
}
