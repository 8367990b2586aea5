//! SQLite schema creation for the note store.

use rusqlite::Connection;

/// Creates the database schema.
///
/// This function creates all required tables, indexes, and constraints.
/// It is idempotent - calling it multiple times is safe.
///
/// # Tables Created
/// - `users` - Accounts with salted password hashes
/// - `notes` - Notes, with `slug` unique across all authors
/// - `sessions` - Login sessions keyed by token digest
pub fn create_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY,
            username TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            joined TEXT NOT NULL
        );",
    )?;

    // The UNIQUE constraint on slug is what keeps concurrent creations
    // with the same derived slug from both succeeding.
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS notes (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            text TEXT NOT NULL,
            slug TEXT NOT NULL UNIQUE,
            author_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            created TEXT NOT NULL,
            modified TEXT NOT NULL
        );",
    )?;

    conn.execute_batch("CREATE INDEX IF NOT EXISTS idx_notes_author ON notes(author_id);")?;

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS sessions (
            token_digest TEXT PRIMARY KEY,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            created TEXT NOT NULL,
            expires INTEGER NOT NULL
        );",
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_exists(conn: &Connection, name: &str) -> bool {
        conn.query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name=?",
            [name],
            |_| Ok(true),
        )
        .unwrap_or(false)
    }

    #[test]
    fn creates_all_tables() {
        let conn = Connection::open_in_memory().unwrap();
        create_schema(&conn).unwrap();
        for table in ["users", "notes", "sessions"] {
            assert!(table_exists(&conn, table), "{table} table should exist");
        }
    }

    #[test]
    fn is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        create_schema(&conn).unwrap();
        create_schema(&conn).unwrap();
    }

    #[test]
    fn slug_is_unique_at_table_level() {
        let conn = Connection::open_in_memory().unwrap();
        create_schema(&conn).unwrap();
        conn.execute(
            "INSERT INTO users (id, username, password_hash, joined) VALUES (1, 'a', 'x', 'now')",
            [],
        )
        .unwrap();
        let insert = "INSERT INTO notes (id, title, text, slug, author_id, created, modified)
                      VALUES (?1, 't', 'x', 'same', 1, 'now', 'now')";
        conn.execute(insert, ["one"]).unwrap();
        let err = conn.execute(insert, ["two"]).unwrap_err();
        assert!(err.to_string().contains("UNIQUE constraint failed: notes.slug"));
    }
}
