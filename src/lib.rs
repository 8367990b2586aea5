//! notekeep - personal notes web app where each user only ever sees their own notes

pub mod access;
pub mod cli;
pub mod domain;
pub mod infra;
pub mod store;
pub mod web;

use anyhow::Result;
use clap::{CommandFactory, Parser};

use cli::{
    Cli, Command, UserCommand,
    config::Config,
    handlers::{handle_list, handle_serve, handle_user_add},
};

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load()?;
    let db_path = config.database(cli.db.as_ref());

    match &cli.command {
        Command::Serve(args) => handle_serve(args, &db_path, &config),
        Command::User(UserCommand::Add(args)) => handle_user_add(args, &db_path),
        Command::List(args) => handle_list(args, &db_path),
        Command::Completions(args) => {
            clap_complete::generate(
                args.shell,
                &mut Cli::command(),
                "notekeep",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    }
}

/// Sets up `env_logger`. `RUST_LOG` wins over `-v` when set.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}
