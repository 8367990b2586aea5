//! In-memory site for HTTP tests.

#![allow(dead_code)]

use actix_web::cookie::Cookie;
use actix_web::web;
use notekeep::domain::{Note, NoteForm, User, Username};
use notekeep::infra::PasswordHash;
use notekeep::store::{NoteRepository, SqliteStore, UserRepository};
use notekeep::web::auth::SESSION_COOKIE;
use notekeep::web::{AppState, WebSettings};

/// Password given to every user the harness creates.
pub const PASSWORD: &str = "correct horse battery";

/// Application state over an in-memory database, plus helpers to
/// populate it.
pub struct TestSite {
    pub state: web::Data<AppState>,
}

impl TestSite {
    pub fn new() -> Self {
        let store = SqliteStore::open_in_memory().expect("Failed to open in-memory store");
        let state =
            AppState::new(store, WebSettings::default()).expect("Failed to build app state");
        Self {
            state: web::Data::new(state),
        }
    }

    /// Registers a user with [`PASSWORD`].
    pub fn user(&self, username: &str) -> User {
        self.state
            .store
            .create_user(
                &Username::new(username).expect("valid username"),
                &PasswordHash::create(PASSWORD).expect("hash password"),
            )
            .expect("Failed to create user")
    }

    /// Starts a session for `user` and returns the cookie that carries it.
    pub fn session(&self, user: &User) -> Cookie<'static> {
        let token = self
            .state
            .store
            .create_session(user.id(), self.state.settings.session_ttl)
            .expect("Failed to create session");
        Cookie::new(SESSION_COOKIE, token.as_str().to_string())
    }

    /// Registers a user and logs them in.
    pub fn logged_in(&self, username: &str) -> (User, Cookie<'static>) {
        let user = self.user(username);
        let cookie = self.session(&user);
        (user, cookie)
    }

    /// Creates a note through the same path the add page uses.
    pub fn note(&self, author: &User, title: &str, text: &str, slug: &str) -> Note {
        let form = NoteForm {
            title: title.into(),
            text: text.into(),
            slug: slug.into(),
        };
        notekeep::access::create_note(&self.state.store, author, &form)
            .expect("Failed to create note")
    }

    pub fn count_notes(&self) -> usize {
        self.state.store.count_notes().expect("Failed to count notes")
    }

    pub fn find(&self, slug: &str) -> Option<Note> {
        let slug = notekeep::domain::Slug::new(slug).ok()?;
        self.state
            .store
            .find_note_by_slug(&slug)
            .expect("Failed to look up note")
    }
}

impl Default for TestSite {
    fn default() -> Self {
        Self::new()
    }
}
