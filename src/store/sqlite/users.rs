//! UserRepository trait implementation for SqliteStore.

use super::{SqliteStore, is_unique_violation};
use crate::domain::{User, UserId, Username};
use crate::infra::{PasswordHash, SessionToken};
use crate::store::{StoreError, StoreResult, UserRepository};
use chrono::{Duration, Utc};
use rusqlite::OptionalExtension;

fn user_from_parts(id: i64, username: &str) -> StoreResult<User> {
    let username = Username::new(username)
        .map_err(|e| StoreError::Corrupt(format!("user {}: {}", id, e)))?;
    Ok(User::new(UserId::new(id), username))
}

impl UserRepository for SqliteStore {
    fn create_user(&self, username: &Username, password: &PasswordHash) -> StoreResult<User> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO users (username, password_hash, joined) VALUES (?1, ?2, ?3)",
            [
                username.as_str(),
                password.as_stored(),
                Utc::now().to_rfc3339().as_str(),
            ],
        )
        .map_err(|e| {
            if is_unique_violation(&e, "users.username") {
                StoreError::DuplicateUsername {
                    username: username.to_string(),
                }
            } else {
                StoreError::Database(e)
            }
        })?;

        let id = conn.last_insert_rowid();
        Ok(User::new(UserId::new(id), username.clone()))
    }

    fn get_user(&self, id: UserId) -> StoreResult<Option<User>> {
        let conn = self.lock()?;
        let row = conn
            .query_row(
                "SELECT id, username FROM users WHERE id = ?1",
                [id.get()],
                |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()?;

        row.map(|(id, name)| user_from_parts(id, &name)).transpose()
    }

    fn find_user(&self, username: &Username) -> StoreResult<Option<(User, PasswordHash)>> {
        let conn = self.lock()?;
        let row = conn
            .query_row(
                "SELECT id, username, password_hash FROM users WHERE username = ?1",
                [username.as_str()],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                    ))
                },
            )
            .optional()?;

        let Some((id, name, stored_hash)) = row else {
            return Ok(None);
        };
        let user = user_from_parts(id, &name)?;
        let hash = PasswordHash::parse(&stored_hash)
            .map_err(|e| StoreError::Corrupt(format!("user {}: {}", id, e)))?;
        Ok(Some((user, hash)))
    }

    fn create_session(&self, user: UserId, ttl: Duration) -> StoreResult<SessionToken> {
        let token = SessionToken::generate();
        let now = Utc::now();
        let expires = (now + ttl).timestamp();

        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO sessions (token_digest, user_id, created, expires) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![token.digest(), user.get(), now.to_rfc3339(), expires],
        )?;

        Ok(token)
    }

    fn session_user(&self, token: &SessionToken, ttl: Duration) -> StoreResult<Option<User>> {
        let now = Utc::now();
        let digest = token.digest();

        let conn = self.lock()?;
        let row = conn
            .query_row(
                "SELECT u.id, u.username FROM sessions s
                 JOIN users u ON u.id = s.user_id
                 WHERE s.token_digest = ?1 AND s.expires > ?2",
                rusqlite::params![digest, now.timestamp()],
                |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()?;

        let Some((id, name)) = row else {
            return Ok(None);
        };

        // Sliding expiry: an active session stays alive
        conn.execute(
            "UPDATE sessions SET expires = ?1 WHERE token_digest = ?2",
            rusqlite::params![(now + ttl).timestamp(), digest],
        )?;

        user_from_parts(id, &name).map(Some)
    }

    fn delete_session(&self, token: &SessionToken) -> StoreResult<bool> {
        let conn = self.lock()?;
        let removed = conn.execute(
            "DELETE FROM sessions WHERE token_digest = ?1",
            [token.digest()],
        )?;
        Ok(removed > 0)
    }
}
