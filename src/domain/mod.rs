//! Core types: Note, NoteId (ULID), Slug, User, forms

pub mod form;
mod note;
mod note_id;
mod slug;
mod user;

pub use form::{FormErrors, NoteForm};
pub use note::{MAX_TITLE_LENGTH, Note, NoteContent, NoteContentError};
pub use note_id::{NoteId, ParseNoteIdError};
pub use slug::{MAX_SLUG_LENGTH, ParseSlugError, Slug};
pub use user::{MAX_USERNAME_LENGTH, ParseUsernameError, User, UserId, Username};
