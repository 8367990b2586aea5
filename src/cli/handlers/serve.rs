//! Serve command handler.

use actix_web::web;
use anyhow::{Context, Result};
use log::info;
use std::path::Path;

use super::open_store;
use crate::cli::ServeArgs;
use crate::cli::config::Config;
use crate::web::{self as site, AppState};

pub fn handle_serve(args: &ServeArgs, db_path: &Path, config: &Config) -> Result<()> {
    let store = open_store(db_path)?;
    let purged = store
        .purge_expired_sessions()
        .context("failed to purge expired sessions")?;
    if purged > 0 {
        info!("purged {} expired session(s)", purged);
    }

    let settings = config.web_settings()?;
    let bind = config.bind(args.bind.as_deref());
    let state = web::Data::new(
        AppState::new(store, settings).context("failed to initialise web application")?,
    );

    info!("serving notes from {}", db_path.display());
    actix_web::rt::System::new()
        .block_on(site::serve(state, &bind))
        .with_context(|| format!("server on {} failed", bind))
}
