//! Note visibility, ownership, and slug rules.
//!
//! Everything a request handler needs to decide who may see or change a
//! note lives here, as plain functions over the repository traits:
//!
//! - [`visible_notes`]: a user's listing, which only ever contains their own notes
//! - [`owned_note`]: resolves a slug for its author; everyone else gets
//!   [`AccessError::NotFound`], whether or not the note exists
//! - [`create_note`], [`update_note`], [`delete_note`]: validated mutations
//!   behind the same guard
//!
//! Form submissions fail with [`SubmitError`], which adds the
//! re-render-the-form case to the plain [`AccessError`] refusals.


use log::{debug, info};
use thiserror::Error;

use crate::domain::form::fields;
use crate::domain::{FormErrors, Note, NoteContent, NoteContentError, NoteForm, NoteId, Slug, User};
use crate::infra::derive_slug;
use crate::store::{NoteRepository, StoreError};

/// Suffix of the validation message shown when a slug is already taken.
pub const DUPLICATE_SLUG_WARNING: &str =
    " - this slug already exists, please choose a unique value!";

/// Builds the field error for a slug collision, naming the slug.
pub fn duplicate_slug_message(slug: &str) -> String {
    format!("{}{}", slug, DUPLICATE_SLUG_WARNING)
}

// ===========================================
// AccessError Type
// ===========================================

/// Outcomes of a refused or failed note operation.
#[derive(Debug, Error)]
pub enum AccessError {
    /// The note does not exist, or it belongs to someone else.
    ///
    /// The two cases are deliberately indistinguishable.
    #[error("note not found")]
    NotFound,

    /// The store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for access operations.
pub type AccessResult<T> = Result<T, AccessError>;

/// Outcomes of a rejected create or edit submission.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The submitted form did not validate. Nothing was written.
    #[error("invalid note: {0}")]
    Invalid(FormErrors),

    #[error(transparent)]
    Access(#[from] AccessError),
}

impl From<StoreError> for SubmitError {
    fn from(err: StoreError) -> Self {
        Self::Access(AccessError::Store(err))
    }
}

/// Result type for form submissions.
pub type SubmitResult<T> = Result<T, SubmitError>;

// ===========================================
// Visibility Filter
// ===========================================

/// Returns the notes `user` may see in a listing: exactly their own.
pub fn visible_notes<R>(store: &R, user: &User) -> AccessResult<Vec<Note>>
where
    R: NoteRepository + ?Sized,
{
    Ok(store.notes_by_author(user.id())?)
}

// ===========================================
// Ownership Guard
// ===========================================

/// Resolves `slug` to a note owned by `user`.
///
/// A slug that is malformed, unknown, or owned by another user all yield
/// [`AccessError::NotFound`].
pub fn owned_note<R>(store: &R, user: &User, slug: &str) -> AccessResult<Note>
where
    R: NoteRepository + ?Sized,
{
    let Ok(slug) = Slug::new(slug) else {
        return Err(AccessError::NotFound);
    };

    match store.find_note_by_slug(&slug)? {
        Some(note) if note.is_owned_by(user.id()) => Ok(note),
        Some(_) => {
            debug!("user {} denied access to note {}", user.id(), slug);
            Err(AccessError::NotFound)
        }
        None => Err(AccessError::NotFound),
    }
}

// ===========================================
// Form Cleaning and Slug Assignment
// ===========================================

/// Picks the slug for a submission: the one typed, or one derived from the title.
///
/// Returns `None` only when neither is usable; the reason has already been
/// recorded in `errors`.
fn assign_slug(form: &NoteForm, errors: &mut FormErrors) -> Option<Slug> {
    match form.requested_slug() {
        Some(raw) => match Slug::new(raw) {
            Ok(slug) => Some(slug),
            Err(e) => {
                errors.add(fields::SLUG, e.to_string());
                None
            }
        },
        None => NoteContent::check_title(&form.title).ok().map(derive_slug),
    }
}

fn content_error(err: NoteContentError) -> SubmitError {
    let field = match err {
        NoteContentError::EmptyTitle | NoteContentError::TitleTooLong { .. } => fields::TITLE,
        NoteContentError::EmptyText => fields::TEXT,
    };
    SubmitError::Invalid(FormErrors::single(field, err.to_string()))
}

/// Validates a create/edit form into storable content.
///
/// `editing` is the note being edited, whose own slug does not count as a
/// collision. All field problems are reported together.
pub fn clean_note_form<R>(
    store: &R,
    form: &NoteForm,
    editing: Option<&NoteId>,
) -> SubmitResult<NoteContent>
where
    R: NoteRepository + ?Sized,
{
    let mut errors = FormErrors::new();

    if let Err(e) = NoteContent::check_title(&form.title) {
        errors.add(fields::TITLE, e.to_string());
    }
    if let Err(e) = NoteContent::check_text(&form.text) {
        errors.add(fields::TEXT, e.to_string());
    }

    let slug = assign_slug(form, &mut errors);
    if let Some(slug) = &slug
        && store.slug_in_use(slug, editing)?
    {
        errors.add(fields::SLUG, duplicate_slug_message(slug.as_str()));
    }

    errors.into_result().map_err(SubmitError::Invalid)?;

    let slug = slug.unwrap_or_else(|| derive_slug(&form.title));
    NoteContent::new(&form.title, &form.text, slug).map_err(content_error)
}

/// Maps a store-level slug conflict (lost race) to the same field error the
/// pre-check produces.
fn slug_conflict(err: StoreError) -> SubmitError {
    match err {
        StoreError::DuplicateSlug { slug } => {
            SubmitError::Invalid(FormErrors::single(fields::SLUG, duplicate_slug_message(&slug)))
        }
        other => other.into(),
    }
}

// ===========================================
// Mutations
// ===========================================

/// Creates a note owned by `user` from a submitted form.
///
/// The author always comes from `user`; nothing in the form can set it.
pub fn create_note<R>(store: &R, user: &User, form: &NoteForm) -> SubmitResult<Note>
where
    R: NoteRepository + ?Sized,
{
    let content = clean_note_form(store, form, None)?;
    let note = store
        .insert_note(user.id(), &content)
        .map_err(slug_conflict)?;
    info!("user {} created note {}", user.id(), note.slug());
    Ok(note)
}

/// Replaces the content of `user`'s note at `slug`.
pub fn update_note<R>(store: &R, user: &User, slug: &str, form: &NoteForm) -> SubmitResult<Note>
where
    R: NoteRepository + ?Sized,
{
    let note = owned_note(store, user, slug)?;
    let content = clean_note_form(store, form, Some(note.id()))?;

    let updated = store
        .update_note(note.id(), user.id(), &content)
        .map_err(slug_conflict)?
        .ok_or(AccessError::NotFound)?;
    info!(
        "user {} updated note {} (now {})",
        user.id(),
        note.slug(),
        updated.slug()
    );
    Ok(updated)
}

/// Permanently deletes `user`'s note at `slug`, returning what was removed.
pub fn delete_note<R>(store: &R, user: &User, slug: &str) -> AccessResult<Note>
where
    R: NoteRepository + ?Sized,
{
    let note = owned_note(store, user, slug)?;
    if !store.delete_note(note.id(), user.id())? {
        return Err(AccessError::NotFound);
    }
    info!("user {} deleted note {}", user.id(), note.slug());
    Ok(note)
}
