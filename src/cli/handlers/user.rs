//! User management handlers.

use anyhow::{Context, Result, bail};
use std::path::Path;

use super::open_store;
use crate::cli::UserAddArgs;
use crate::domain::Username;
use crate::infra::PasswordHash;
use crate::store::{StoreError, UserRepository};
use crate::web::auth::MIN_PASSWORD_LENGTH;

pub fn handle_user_add(args: &UserAddArgs, db_path: &Path) -> Result<()> {
    let username = Username::new(&args.username)
        .with_context(|| format!("invalid username: {}", args.username))?;

    if args.password.chars().count() < MIN_PASSWORD_LENGTH {
        bail!(
            "password must contain at least {} characters",
            MIN_PASSWORD_LENGTH
        );
    }

    let hash = PasswordHash::create(&args.password).context("failed to hash password")?;
    let store = open_store(db_path)?;
    let user = match store.create_user(&username, &hash) {
        Ok(user) => user,
        Err(StoreError::DuplicateUsername { username }) => {
            bail!("user already exists: {}", username)
        }
        Err(e) => return Err(e).context("failed to create user"),
    };

    println!("Created user {} (id {})", user.username(), user.id());
    Ok(())
}
