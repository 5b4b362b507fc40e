// SPDX-License-Identifier: MIT OR Apache-2.0

//! `cache` subcommands: snapshot build and freshness reporting.

use std::path::PathBuf;

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use crate::cli::{CacheCommands, OutputFormat};
use cloneclass::cache::snapshot::{
    dataset_fingerprint, default_cache_dir, snapshot_path,
};
use cloneclass::cache::ContentCache;
use cloneclass::config::Config;
use cloneclass::output::print_json;

#[derive(Debug, Serialize)]
struct BuildPayload {
    files: usize,
    skipped: usize,
    restored: bool,
    snapshot: String,
}

#[derive(Debug, Serialize)]
struct StatusPayload {
    fingerprint: String,
    snapshot: String,
    fresh: bool,
}

pub fn run(command: CacheCommands, format: OutputFormat, compact: bool) -> Result<()> {
    let config = Config::load();
    match command {
        CacheCommands::Build {
            root,
            force,
            cache_dir,
        } => {
            let dir = resolve_cache_dir(cache_dir, &config, &root);
            let fingerprint = dataset_fingerprint(&root)?;
            let path = snapshot_path(&dir, &fingerprint);
            let restored = !force && path.exists();

            let cache = ContentCache::load_with_snapshot(&root, &dir, force)?;

            match format {
                OutputFormat::Json => {
                    let payload = BuildPayload {
                        files: cache.len(),
                        skipped: cache.skipped(),
                        restored,
                        snapshot: path.display().to_string(),
                    };
                    print_json(&payload, compact)?;
                }
                OutputFormat::Text => {
                    let source = if restored { "restored from snapshot" } else { "scanned" };
                    println!(
                        "{} files cached ({}), {} skipped",
                        cache.len().to_string().green().bold(),
                        source,
                        cache.skipped()
                    );
                    println!("root: {}", cache.root().display());
                    println!("snapshot: {}", path.display());
                }
            }
        }
        CacheCommands::Status { root, cache_dir } => {
            let dir = resolve_cache_dir(cache_dir, &config, &root);
            let fingerprint = dataset_fingerprint(&root)?;
            let path = snapshot_path(&dir, &fingerprint);
            let fresh = path.exists();

            match format {
                OutputFormat::Json => {
                    let payload = StatusPayload {
                        fingerprint,
                        snapshot: path.display().to_string(),
                        fresh,
                    };
                    print_json(&payload, compact)?;
                }
                OutputFormat::Text => {
                    if fresh {
                        println!("{} {}", "fresh snapshot:".green(), path.display());
                    } else {
                        println!(
                            "{} run 'cloneclass cache build {}'",
                            "no fresh snapshot;".yellow(),
                            root.display()
                        );
                    }
                }
            }
        }
    }

    Ok(())
}

fn resolve_cache_dir(cli_value: Option<PathBuf>, config: &Config, root: &std::path::Path) -> PathBuf {
    cli_value
        .or_else(|| config.cache_dir.clone())
        .unwrap_or_else(|| default_cache_dir(root))
}
