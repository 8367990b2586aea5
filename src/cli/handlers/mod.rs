//! Command handlers for the CLI.

mod list;
mod serve;
mod user;


use anyhow::{Context, Result};
use std::path::Path;

use crate::store::SqliteStore;

pub use list::{handle_list, render_listing};
pub use serve::handle_serve;
pub use user::handle_user_add;

// ===========================================
// Shared Utilities
// ===========================================

/// Opens the note database, creating it on first use.
pub(crate) fn open_store(db_path: &Path) -> Result<SqliteStore> {
    SqliteStore::open(db_path)
        .with_context(|| format!("failed to open database at {}", db_path.display()))
}

/// Truncates a string to a maximum display width, adding ellipsis if needed.
pub(crate) fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}
