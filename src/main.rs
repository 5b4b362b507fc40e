// SPDX-License-Identifier: MIT OR Apache-2.0

//! cloneclass - Clone-class construction tool
//!
//! Ingests pairwise clone relations, groups them into clone classes via
//! union-find, and resolves fragment source text through a content cache.

mod cli;
mod commands;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = cli.format.unwrap_or_default();
    let compact = cli.compact;

    match cli.command {
        Commands::Classes {
            relations,
            filter,
            detail,
        } => {
            commands::classes::run(&relations, &filter, detail, format, compact)?;
        }
        Commands::Representatives {
            relations,
            index,
            filter,
        } => {
            commands::representatives::run(&relations, &index, &filter, format, compact)?;
        }
        Commands::Novel {
            relations,
            index,
            filter,
        } => {
            commands::novel::run(&relations, &index, &filter, format, compact)?;
        }
        Commands::Snippet {
            path,
            start,
            end,
            root,
            suggestions,
            force,
            no_snapshot,
            cache_dir,
        } => {
            commands::snippet::run(
                &path,
                start,
                end,
                &root,
                suggestions,
                force,
                no_snapshot,
                cache_dir.as_deref(),
            )?;
        }
        Commands::Cache(command) => {
            commands::cache::run(command, format, compact)?;
        }
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            let name = command.get_name().to_string();
            clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
        }
    }

    Ok(())
}
