// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parallel directory loader using the ignore crate's walker
//!
//! Workers each read one file and send `(path, content)` or a skip marker
//! over a channel; a single receiving thread merges them into the backing
//! map. No shared mutable state during the fan-out.

use std::collections::HashMap;
use std::path::Path;
use std::sync::mpsc;

use anyhow::{bail, Result};
use ignore::WalkBuilder;

/// Merged result of one directory scan.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub entries: HashMap<String, String>,
    /// Files omitted due to read or decoding failures.
    pub skipped: usize,
}

enum LoadMessage {
    Loaded { path: String, content: String },
    Skipped,
}

/// Read every file under `root` into memory.
///
/// The walk ignores nothing except VCS bookkeeping directories and our own
/// cache directory: a relation file may reference any file in the dataset,
/// gitignored or not. A failed read is a per-file soft failure, never an
/// abort.
pub fn scan_directory(root: &Path) -> Result<LoadOutcome> {
    if !root.is_dir() {
        bail!("Dataset root is not a directory: {}", root.display());
    }

    let (tx, rx) = mpsc::channel();

    let walker = WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(false)
        .git_exclude(false)
        .git_global(false)
        .filter_entry(|entry| {
            entry
                .file_name()
                .to_str()
                .map(|name| {
                    name != ".cloneclass" && name != ".git" && name != ".hg" && name != ".svn"
                })
                .unwrap_or(true)
        })
        .build_parallel();

    walker.run(|| {
        let tx = tx.clone();
        Box::new(move |entry| {
            if let Ok(entry) = entry {
                let path = entry.path();
                if path.is_file() {
                    match std::fs::read_to_string(path) {
                        Ok(content) => {
                            let key = crate::relation::normalize_path(&path.to_string_lossy());
                            let _ = tx.send(LoadMessage::Loaded { path: key, content });
                        }
                        Err(err) => {
                            tracing::debug!(path = %path.display(), %err, "skipping unreadable file");
                            let _ = tx.send(LoadMessage::Skipped);
                        }
                    }
                }
            }
            ignore::WalkState::Continue
        })
    });

    drop(tx);

    let mut outcome = LoadOutcome::default();
    for message in rx {
        match message {
            // A duplicate path simply overwrites with equal content.
            LoadMessage::Loaded { path, content } => {
                outcome.entries.insert(path, content);
            }
            LoadMessage::Skipped => outcome.skipped += 1,
        }
    }
    Ok(outcome)
}
