//! List command handler.

use anyhow::{Context, Result, bail};
use std::path::Path;

use super::{open_store, truncate_str};
use crate::access;
use crate::cli::ListArgs;
use crate::cli::output::{NoteListing, Output, OutputFormat};
use crate::domain::{Note, Username};
use crate::store::UserRepository;

pub fn handle_list(args: &ListArgs, db_path: &Path) -> Result<()> {
    let store = open_store(db_path)?;

    let username =
        Username::new(&args.user).with_context(|| format!("invalid username: {}", args.user))?;
    let Some((user, _)) = store
        .find_user(&username)
        .with_context(|| format!("failed to look up user {}", username))?
    else {
        bail!("no such user: {}", username);
    };

    let notes = access::visible_notes(&store, &user)
        .with_context(|| format!("failed to list notes for {}", username))?;

    print!("{}", render_listing(&notes, args.format)?);
    Ok(())
}

/// Formats a note listing for display.
pub fn render_listing(notes: &[Note], format: OutputFormat) -> Result<String> {
    let mut out = String::new();

    match format {
        OutputFormat::Human => {
            if notes.is_empty() {
                out.push_str("No notes found.\n");
            } else {
                out.push_str(&format!("{:<30}  {:<40}  {:>10}\n", "Slug", "Title", "Modified"));
                out.push_str(&format!(
                    "{:<30}  {:<40}  {:>10}\n",
                    "-".repeat(30),
                    "-".repeat(40),
                    "-".repeat(10)
                ));

                for note in notes {
                    let slug = truncate_str(note.slug().as_str(), 30);
                    let title = truncate_str(note.title(), 40);
                    let modified = note.modified().format("%Y-%m-%d").to_string();
                    out.push_str(&format!("{:<30}  {:<40}  {:>10}\n", slug, title, modified));
                }

                out.push_str(&format!("\n{} note(s)\n", notes.len()));
            }
        }
        OutputFormat::Json => {
            let listings: Vec<NoteListing> = notes.iter().map(NoteListing::from).collect();
            let output = Output::new(listings);
            out.push_str(&serde_json::to_string_pretty(&output)?);
            out.push('\n');
        }
    }

    Ok(out)
}
