//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use output::OutputFormat;

/// notekeep - personal notes, one private list per user
#[derive(Parser, Debug)]
#[command(name = "notekeep", version, about, long_about = None)]
pub struct Cli {
    /// Database file (overrides config file)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the web server
    Serve(ServeArgs),

    /// Manage user accounts
    #[command(subcommand)]
    User(UserCommand),

    /// List a user's notes
    #[command(name = "ls")]
    List(ListArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `serve` command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to listen on (overrides config file)
    #[arg(short, long)]
    pub bind: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// Create a user account
    Add(UserAddArgs),
}

/// Arguments for the `user add` command
#[derive(Parser, Debug)]
pub struct UserAddArgs {
    /// Login name
    pub username: String,

    /// Password for the new account
    #[arg(long)]
    pub password: String,
}

/// Arguments for the `ls` (list) command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Whose notes to list
    #[arg(short, long)]
    pub user: String,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["notekeep", "ls", "--user", "alice", "--db", "x.db", "-vv"])
            .unwrap();
        assert_eq!(cli.db, Some(PathBuf::from("x.db")));
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::List(args) => assert_eq!(args.user, "alice"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn user_add_requires_password() {
        assert!(Cli::try_parse_from(["notekeep", "user", "add", "alice"]).is_err());
    }
}
