// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory content cache keyed by normalized absolute path.

pub mod loader;
pub mod snapshot;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::relation::normalize_path;

/// Full file contents for one dataset root, loaded once per cache lifetime.
///
/// Entries are immutable after construction; staleness is only evaluated when
/// the cache (or its snapshot) is built, never per access.
#[derive(Debug)]
pub struct ContentCache {
    root: PathBuf,
    entries: HashMap<String, String>,
    skipped: usize,
}

impl ContentCache {
    /// Scan `root` and cache every readable text file under it.
    ///
    /// Unreadable or non-UTF-8 files are soft failures: counted, reported in
    /// aggregate, and omitted; they never abort the load.
    pub fn load(root: &Path) -> Result<Self> {
        let root = absolutize(root)?;
        let outcome = loader::scan_directory(&root)?;
        if outcome.skipped > 0 {
            tracing::warn!(
                skipped = outcome.skipped,
                root = %root.display(),
                "unreadable files omitted from content cache"
            );
        }
        Ok(Self {
            root,
            entries: outcome.entries,
            skipped: outcome.skipped,
        })
    }

    /// Like [`ContentCache::load`], but restored from a fingerprinted snapshot
    /// under `cache_dir` when one is fresh, and persisted there after a scan
    /// otherwise. `force` always rescans and rewrites.
    pub fn load_with_snapshot(root: &Path, cache_dir: &Path, force: bool) -> Result<Self> {
        let root = absolutize(root)?;
        let fingerprint = snapshot::dataset_fingerprint(&root)?;

        if !force {
            if let Some(restored) = snapshot::load_snapshot(cache_dir, &fingerprint) {
                tracing::debug!(fingerprint = %fingerprint, "content cache restored from snapshot");
                return Ok(Self {
                    root,
                    entries: restored.entries.into_iter().collect(),
                    skipped: restored.skipped,
                });
            }
        }

        let cache = Self::load(&root)?;
        snapshot::write_snapshot(cache_dir, &cache.to_snapshot(&fingerprint))?;
        Ok(cache)
    }

    fn to_snapshot(&self, fingerprint: &str) -> snapshot::CacheSnapshot {
        snapshot::CacheSnapshot {
            version: snapshot::SNAPSHOT_VERSION.to_string(),
            root: self.root.to_string_lossy().into_owned(),
            fingerprint: fingerprint.to_string(),
            skipped: self.skipped,
            entries: self
                .entries
                .iter()
                .map(|(path, content)| (path.clone(), content.clone()))
                .collect(),
        }
    }

    /// Content for a path, after normalizing the query the same way keys were
    /// normalized. Relative queries are resolved against the cache root.
    pub fn get(&self, path: &str) -> Option<&str> {
        let normalized = normalize_path(path);
        if let Some(content) = self.entries.get(&normalized) {
            return Some(content.as_str());
        }
        if !normalized.starts_with('/') {
            let joined = normalize_path(&format!("{}/{}", self.root.to_string_lossy(), normalized));
            return self.entries.get(&joined).map(String::as_str);
        }
        None
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// All cached paths, in no particular order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Count of files skipped as soft failures during the load.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn absolutize(root: &Path) -> Result<PathBuf> {
    if root.is_absolute() {
        return Ok(root.to_path_buf());
    }
    let cwd = std::env::current_dir().context("Cannot determine current directory")?;
    Ok(cwd.join(root))
}
