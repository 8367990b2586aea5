//! SQLite note store and repository traits

mod repository;
mod schema;
mod sqlite;

pub use repository::{NoteRepository, StoreError, StoreResult, UserRepository};
pub use schema::create_schema;
pub use sqlite::SqliteStore;
