//! NoteRepository trait implementation for SqliteStore.

use super::{SqliteStore, is_unique_violation};
use crate::domain::{Note, NoteContent, NoteId, Slug, UserId};
use crate::store::{NoteRepository, StoreError, StoreResult};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Params, Row};

const NOTE_COLUMNS: &str = "id, title, text, slug, author_id, created, modified";

/// A notes row before conversion into domain types.
struct NoteRow {
    id: String,
    title: String,
    text: String,
    slug: String,
    author_id: i64,
    created: String,
    modified: String,
}

impl NoteRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            text: row.get(2)?,
            slug: row.get(3)?,
            author_id: row.get(4)?,
            created: row.get(5)?,
            modified: row.get(6)?,
        })
    }

    fn into_note(self) -> StoreResult<Note> {
        let id: NoteId = self
            .id
            .parse()
            .map_err(|e| StoreError::Corrupt(format!("invalid note id in database: {}", e)))?;
        let slug = Slug::new(&self.slug)
            .map_err(|e| StoreError::Corrupt(format!("note {}: {}", id, e)))?;
        let content = NoteContent::new(&self.title, &self.text, slug)
            .map_err(|e| StoreError::Corrupt(format!("note {}: {}", id, e)))?;
        let created = parse_timestamp(&self.created, "created")?;
        let modified = parse_timestamp(&self.modified, "modified")?;

        Ok(Note::new(
            id,
            UserId::new(self.author_id),
            content,
            created,
            modified,
        ))
    }
}

fn parse_timestamp(value: &str, column: &str) -> StoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::Corrupt(format!("invalid {} timestamp: {}", column, e)))
}

fn select_one(conn: &Connection, filter: &str, params: impl Params) -> StoreResult<Option<Note>> {
    let sql = format!("SELECT {} FROM notes WHERE {}", NOTE_COLUMNS, filter);
    conn.query_row(&sql, params, NoteRow::from_row)
        .optional()?
        .map(NoteRow::into_note)
        .transpose()
}

/// Maps a slug UNIQUE violation to `DuplicateSlug`, passing other errors through.
fn map_slug_conflict(err: rusqlite::Error, slug: &Slug) -> StoreError {
    if is_unique_violation(&err, "notes.slug") {
        StoreError::DuplicateSlug {
            slug: slug.to_string(),
        }
    } else {
        StoreError::Database(err)
    }
}

impl NoteRepository for SqliteStore {
    fn insert_note(&self, author: UserId, content: &NoteContent) -> StoreResult<Note> {
        let id = NoteId::new();
        let now = Utc::now();
        let now_str = now.to_rfc3339();

        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO notes (id, title, text, slug, author_id, created, modified)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
            rusqlite::params![
                id.to_string(),
                content.title(),
                content.text(),
                content.slug().as_str(),
                author.get(),
                now_str,
            ],
        )
        .map_err(|e| map_slug_conflict(e, content.slug()))?;

        Ok(Note::new(id, author, content.clone(), now, now))
    }

    fn get_note(&self, id: &NoteId) -> StoreResult<Option<Note>> {
        let conn = self.lock()?;
        select_one(&conn, "id = ?1", [id.to_string()])
    }

    fn find_note_by_slug(&self, slug: &Slug) -> StoreResult<Option<Note>> {
        let conn = self.lock()?;
        select_one(&conn, "slug = ?1", [slug.as_str()])
    }

    fn notes_by_author(&self, author: UserId) -> StoreResult<Vec<Note>> {
        let conn = self.lock()?;
        let sql = format!(
            "SELECT {} FROM notes WHERE author_id = ?1 ORDER BY rowid",
            NOTE_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map([author.get()], NoteRow::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        rows.into_iter().map(NoteRow::into_note).collect()
    }

    fn update_note(
        &self,
        id: &NoteId,
        author: UserId,
        content: &NoteContent,
    ) -> StoreResult<Option<Note>> {
        let conn = self.lock()?;
        let changed = conn
            .execute(
                "UPDATE notes SET title = ?1, text = ?2, slug = ?3, modified = ?4
                 WHERE id = ?5 AND author_id = ?6",
                rusqlite::params![
                    content.title(),
                    content.text(),
                    content.slug().as_str(),
                    Utc::now().to_rfc3339(),
                    id.to_string(),
                    author.get(),
                ],
            )
            .map_err(|e| map_slug_conflict(e, content.slug()))?;

        if changed == 0 {
            return Ok(None);
        }
        select_one(&conn, "id = ?1", [id.to_string()])
    }

    fn delete_note(&self, id: &NoteId, author: UserId) -> StoreResult<bool> {
        let conn = self.lock()?;
        let removed = conn.execute(
            "DELETE FROM notes WHERE id = ?1 AND author_id = ?2",
            rusqlite::params![id.to_string(), author.get()],
        )?;
        Ok(removed > 0)
    }

    fn slug_in_use(&self, slug: &Slug, except: Option<&NoteId>) -> StoreResult<bool> {
        let conn = self.lock()?;
        let except = except.map(|id| id.to_string()).unwrap_or_default();
        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM notes WHERE slug = ?1 AND id != ?2)",
            [slug.as_str(), except.as_str()],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    fn count_notes(&self) -> StoreResult<usize> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM notes", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
