//! HAL CLI library.
//!
//! Types and command handlers behind the `hal` binary: rendering resource
//! descriptions as HAL, flattening HAL documents, and inspecting how a
//! relation is rendered under a settings file.

pub mod cli;
pub mod commands;
pub mod config;
pub mod description;
pub mod error;
pub mod input;
pub mod output;

use cli::{Cli, Commands};

/// Dispatch a parsed [`Cli`] to the matching command handler.
pub fn run(cli: Cli) -> error::CliResult<()> {
    let settings = config::load_settings(cli.config.as_deref())?;

    match cli.command {
        Commands::Render { file, media_type } => {
            let source = input::resolve_input(file.as_deref())?;
            commands::render::run(&settings, &source, &media_type, cli.pretty)
        }

        Commands::Parse { file, media_type } => {
            let source = input::resolve_input(file.as_deref())?;
            commands::parse::run(&settings, &source, &media_type, cli.pretty)
        }

        Commands::Relation { rel } => commands::relation::run(&settings, &rel),
    }
}
