// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command implementations and shared pair-pipeline helpers.

pub mod cache;
pub mod classes;
pub mod novel;
pub mod representatives;
pub mod snippet;

use anyhow::Result;
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressIterator};
use rayon::prelude::*;

use crate::cli::{CliCloneType, FilterArgs};
use cloneclass::config::Config;
use cloneclass::filter::{filter_pairs, par_filter_pairs, FilterStrategy};
use cloneclass::relation::{ClonePairRecord, CloneType};

/// Below this many pairs a progress bar is just noise.
const PROGRESS_THRESHOLD: usize = 10_000;

impl From<CliCloneType> for CloneType {
    fn from(value: CliCloneType) -> Self {
        match value {
            CliCloneType::Exact => Self::Exact,
            CliCloneType::Renamed => Self::Renamed,
            CliCloneType::NearMiss => Self::NearMiss,
            CliCloneType::Semantic => Self::Semantic,
            CliCloneType::Unknown => Self::Unknown,
        }
    }
}

/// Translate filter flags into one composed strategy. CLI values win over
/// config-file defaults.
pub(crate) fn build_filter(args: &FilterArgs, config: &Config) -> Result<FilterStrategy> {
    let mut children = Vec::new();

    if let Some(lines) = config.merge_min_span(args.min_span) {
        children.push(FilterStrategy::min_span(lines));
    }
    if args.cross_file {
        children.push(FilterStrategy::cross_file());
    }
    if !args.clone_types.is_empty() {
        let allowed = args.clone_types.iter().map(|&t| t.into()).collect();
        children.push(FilterStrategy::clone_types(allowed));
    }

    let combined = if children.len() == 1 {
        children.remove(0)
    } else if children.is_empty() {
        FilterStrategy::AllowAll
    } else {
        FilterStrategy::all(children)?
    };

    Ok(if args.invert {
        FilterStrategy::negate(combined)
    } else {
        combined
    })
}

/// Apply a strategy to the pair sequence, fanning out across the rayon pool
/// unless `sequential`, with a progress bar on large inputs.
pub(crate) fn apply_filter(
    pairs: Vec<ClonePairRecord>,
    strategy: &FilterStrategy,
    sequential: bool,
) -> Vec<ClonePairRecord> {
    if pairs.len() < PROGRESS_THRESHOLD {
        return if sequential {
            filter_pairs(pairs, strategy)
        } else {
            par_filter_pairs(pairs, strategy)
        };
    }

    let bar = ProgressBar::new(pairs.len() as u64).with_message("filtering pairs");
    let kept = if sequential {
        pairs
            .into_iter()
            .progress_with(bar.clone())
            .filter(|pair| strategy.matches(pair))
            .collect()
    } else {
        pairs
            .into_par_iter()
            .progress_with(bar.clone())
            .filter(|pair| strategy.matches(pair))
            .collect()
    };
    bar.finish_and_clear();
    kept
}
