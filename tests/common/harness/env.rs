//! Isolated CLI environment with temp directory.

#![allow(dead_code)]

use super::NotekeepCommand;
use notekeep::domain::{Note, NoteContent, Slug, Username};
use notekeep::store::{NoteRepository, SqliteStore, UserRepository};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment with a temporary database and config home.
///
/// Everything lives in a temp directory that is removed on drop.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    root: PathBuf,
}

impl TestEnv {
    /// Creates a new isolated test environment with no database yet.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    /// Returns the path of the database file commands use.
    pub fn db_path(&self) -> PathBuf {
        self.root.join("data").join("notekeep.db")
    }

    /// Returns the directory used as the config home.
    pub fn config_home(&self) -> &Path {
        &self.root
    }

    /// Opens the environment's database directly.
    pub fn store(&self) -> SqliteStore {
        SqliteStore::open(&self.db_path()).expect("Failed to open test database")
    }

    /// Adds a note for an existing user straight into the database.
    pub fn add_note(&self, username: &str, title: &str, slug: &str) -> Note {
        let store = self.store();
        let (user, _) = store
            .find_user(&Username::new(username).expect("valid username"))
            .expect("lookup should succeed")
            .expect("user should exist");
        let content = NoteContent::new(title, "text", Slug::new(slug).expect("valid slug"))
            .expect("valid note content");
        store
            .insert_note(user.id(), &content)
            .expect("Failed to insert note")
    }

    /// Writes `config.toml` for this environment.
    pub fn write_config(&self, contents: &str) -> PathBuf {
        let dir = self.root.join("notekeep");
        std::fs::create_dir_all(&dir).expect("Failed to create config dir");
        let path = dir.join("config.toml");
        std::fs::write(&path, contents).expect("Failed to write config");
        path
    }

    /// Creates a command configured for this test environment.
    pub fn cmd(&self) -> NotekeepCommand {
        NotekeepCommand::new()
            .config_home(&self.root)
            .db(&self.db_path())
    }

    /// Creates a command that takes its database from the config file.
    pub fn cmd_without_db(&self) -> NotekeepCommand {
        NotekeepCommand::new().config_home(&self.root)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
