//! Slug derivation and credential hashing

mod secret;
mod slug;

pub use secret::{PasswordHash, PasswordHashError, SessionToken};
pub use slug::{derive_slug, slugify};
