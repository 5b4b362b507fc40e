// SPDX-License-Identifier: MIT OR Apache-2.0

//! CLI argument parsing using clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// cloneclass - Clone-class construction tool
///
/// Groups pairwise code-clone relations into clone classes, picks a
/// representative fragment per class, and resolves fragment source text
/// through a path-tolerant content cache.
#[derive(Parser, Debug)]
#[command(name = "cloneclass")]
#[command(
    author,
    version,
    about,
    long_about = None,
    after_help = "Quickstart:\n  cloneclass classes pairs.csv --min-span 3\n  cloneclass cache build /data/project\n  cloneclass snippet --root /data/project src/Foo.java 10 42"
)]
pub struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,

    /// Compact JSON output (no pretty formatting)
    #[arg(long, global = true)]
    pub compact: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Clone-type tag filter values
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliCloneType {
    Exact,
    Renamed,
    NearMiss,
    Semantic,
    Unknown,
}

/// Pair filter flags shared by clustering commands
#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    /// Drop pairs where either fragment spans fewer than N lines
    #[arg(long, value_name = "N", help_heading = "Filtering")]
    pub min_span: Option<u32>,

    /// Keep only pairs whose fragments live in different files
    #[arg(long, help_heading = "Filtering")]
    pub cross_file: bool,

    /// Keep only pairs tagged with one of these clone types
    #[arg(
        long = "clone-type",
        value_enum,
        value_delimiter = ',',
        help_heading = "Filtering"
    )]
    pub clone_types: Vec<CliCloneType>,

    /// Invert the combined filter
    #[arg(long, help_heading = "Filtering")]
    pub invert: bool,

    /// Evaluate the filter sequentially instead of across a worker pool
    #[arg(long, help_heading = "Filtering")]
    pub sequential: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Group clone pair relations into clone classes
    #[command(visible_alias = "c")]
    Classes {
        /// Relation file: file1,start1,end1,file2,start2,end2[,type] per line
        relations: PathBuf,

        #[command(flatten)]
        filter: FilterArgs,

        /// List every pair of every class instead of the summary
        #[arg(long)]
        detail: bool,
    },

    /// Pick one representative fragment per clone class
    #[command(visible_alias = "reps")]
    Representatives {
        /// Relation file: file1,start1,end1,file2,start2,end2[,type] per line
        relations: PathBuf,

        /// Fragment index JSON produced by the external extractor
        #[arg(short, long)]
        index: PathBuf,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// List indexed fragments that no clone class covers
    Novel {
        /// Relation file: file1,start1,end1,file2,start2,end2[,type] per line
        relations: PathBuf,

        /// Fragment index JSON produced by the external extractor
        #[arg(short, long)]
        index: PathBuf,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Resolve the source text for one fragment through the content cache
    Snippet {
        /// Normalized or relative path of the fragment's file
        path: String,

        /// First line, 1-based inclusive
        start: u32,

        /// Last line, 1-based inclusive
        end: u32,

        /// Dataset root directory backing the content cache
        #[arg(short, long)]
        root: PathBuf,

        /// How many similar paths to suggest when resolution misses
        #[arg(long, value_name = "K")]
        suggestions: Option<usize>,

        /// Rebuild the cache even when a fresh snapshot exists
        #[arg(long)]
        force: bool,

        /// Do not read or write cache snapshots
        #[arg(long)]
        no_snapshot: bool,

        /// Directory holding cache snapshots (defaults to the user cache dir)
        #[arg(long, value_name = "DIR")]
        cache_dir: Option<PathBuf>,
    },

    /// Content cache maintenance
    #[command(subcommand)]
    Cache(CacheCommands),

    /// Generate shell completion scripts
    Completions {
        /// Shell to emit completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Scan a dataset root and persist a content snapshot
    Build {
        /// Dataset root directory
        root: PathBuf,

        /// Rescan even when a fresh snapshot exists
        #[arg(long)]
        force: bool,

        /// Directory holding cache snapshots (defaults to the user cache dir)
        #[arg(long, value_name = "DIR")]
        cache_dir: Option<PathBuf>,
    },

    /// Report snapshot freshness for a dataset root
    Status {
        /// Dataset root directory
        root: PathBuf,

        /// Directory holding cache snapshots (defaults to the user cache dir)
        #[arg(long, value_name = "DIR")]
        cache_dir: Option<PathBuf>,
    },
}
