// SPDX-License-Identifier: MIT OR Apache-2.0

//! `novel` command: indexed fragments no clone class covers.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use crate::cli::{FilterArgs, OutputFormat};
use crate::commands::{apply_filter, build_filter};
use cloneclass::cluster::{build_classes, ClassCoverage, FragmentIndex, IndexedFragment};
use cloneclass::config::Config;
use cloneclass::output::print_json;
use cloneclass::relation::read_relation_file;

#[derive(Debug, Serialize)]
struct NovelPayload<'a> {
    indexed: usize,
    covered: usize,
    novel: Vec<&'a IndexedFragment>,
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
    let coverage = ClassCoverage::new(&classes);

    let index = FragmentIndex::from_json_file(index_path)?;
    let novel: Vec<&IndexedFragment> = index
        .fragments()
        .iter()
        .filter(|fragment| coverage.is_novel(&fragment.fragment_id()))
        .collect();

    match format {
        OutputFormat::Json => {
            let payload = NovelPayload {
                indexed: index.len(),
                covered: index.len() - novel.len(),
                novel,
            };
            print_json(&payload, compact)?;
        }
        OutputFormat::Text => {
            println!(
                "{} of {} indexed fragments in no clone class",
                novel.len().to_string().bold(),
                index.len()
            );
            for fragment in &novel {
                println!(
                    "  {}:{}-{} ({} chars)",
                    fragment.path,
                    fragment.start_line,
                    fragment.end_line,
                    fragment.text.len()
                );
            }
        }
    }

    Ok(())
}
