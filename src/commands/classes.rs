// SPDX-License-Identifier: MIT OR Apache-2.0

//! `classes` command: relations in, clone classes out.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use crate::cli::{FilterArgs, OutputFormat};
use crate::commands::{apply_filter, build_filter};
use cloneclass::cluster::{build_classes, CloneClass};
use cloneclass::config::Config;
use cloneclass::output::print_json;
use cloneclass::relation::read_relation_file;

#[derive(Debug, Serialize)]
struct ClassesPayload<'a> {
    total_pairs: usize,
    retained_pairs: usize,
    class_count: usize,
    classes: &'a [CloneClass],
}

pub fn run(
    relations: &Path,
    filter: &FilterArgs,
    detail: bool,
    format: OutputFormat,
    compact: bool,
) -> Result<()> {
    let config = Config::load();
    let pairs = read_relation_file(relations)?;
    let total_pairs = pairs.len();

    let strategy = build_filter(filter, &config)?;
    let retained = apply_filter(pairs, &strategy, filter.sequential);
    let retained_pairs = retained.len();

    let classes = build_classes(retained);

    match format {
        OutputFormat::Json => {
            let payload = ClassesPayload {
                total_pairs,
                retained_pairs,
                class_count: classes.len(),
                classes: &classes,
            };
            print_json(&payload, compact)?;
        }
        OutputFormat::Text => {
            println!(
                "{} pairs read, {} retained, {} clone classes",
                total_pairs.to_string().bold(),
                retained_pairs.to_string().bold(),
                classes.len().to_string().green().bold()
            );
            for (i, class) in classes.iter().enumerate() {
                println!(
                    "class {}: {} pairs, {} fragments",
                    i + 1,
                    class.len(),
                    class.fragments().len()
                );
                if detail {
                    for pair in class.pairs() {
                        println!(
                            "  {} <-> {} [{}]",
                            pair.left,
                            pair.right,
                            pair.clone_type.as_label().dimmed()
                        );
                    }
                }
            }
        }
    }

    Ok(())
}
