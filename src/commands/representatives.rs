// SPDX-License-Identifier: MIT OR Apache-2.0

//! `representatives` command: one exemplar fragment per clone class.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use crate::cli::{FilterArgs, OutputFormat};
use crate::commands::{apply_filter, build_filter};
use cloneclass::cluster::{build_classes, pick_representative, FragmentIndex, IndexedFragment};
use cloneclass::config::Config;
use cloneclass::output::print_json;
use cloneclass::relation::read_relation_file;

#[derive(Debug, Serialize)]
struct RepresentativeEntry {
    class_id: usize,
    pair_count: usize,
    representative: Option<IndexedFragment>,
}

#[derive(Debug, Serialize)]
struct RepresentativesPayload {
    class_count: usize,
    unrepresented: usize,
    representatives: Vec<RepresentativeEntry>,
}

pub fn run(
    relations: &Path,
    index_path: &Path,
    filter: &FilterArgs,
    format: OutputFormat,
    compact: bool,
) -> Result<()> {
    let config = Config::load();
    let pairs = read_relation_file(relations)?;

    let strategy = build_filter(filter, &config)?;
    let retained = apply_filter(pairs, &strategy, filter.sequential);
    let classes = build_classes(retained);

    let index = FragmentIndex::from_json_file(index_path)?;
    tracing::debug!(fragments = index.len(), "fragment index loaded");

    let representatives: Vec<RepresentativeEntry> = classes
        .iter()
        .enumerate()
        .map(|(i, class)| RepresentativeEntry {
            class_id: i + 1,
            pair_count: class.len(),
            representative: pick_representative(class, &index).cloned(),
        })
        .collect();
    let unrepresented = representatives
        .iter()
        .filter(|entry| entry.representative.is_none())
        .count();

    match format {
        OutputFormat::Json => {
            let payload = RepresentativesPayload {
                class_count: classes.len(),
                unrepresented,
                representatives,
            };
            print_json(&payload, compact)?;
        }
        OutputFormat::Text => {
            for entry in &representatives {
                match &entry.representative {
                    Some(fragment) => println!(
                        "class {}: {}:{}-{} ({} chars)",
                        entry.class_id,
                        fragment.path,
                        fragment.start_line,
                        fragment.end_line,
                        fragment.text.len()
                    ),
                    None => println!(
                        "class {}: {}",
                        entry.class_id,
                        "no indexed fragment".yellow()
                    ),
                }
            }
            if unrepresented > 0 {
                println!(
                    "{}",
                    format!("{unrepresented} classes had no indexed fragment").yellow()
                );
            }
        }
    }

    Ok(())
}
