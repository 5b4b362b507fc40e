// SPDX-License-Identifier: MIT OR Apache-2.0

//! Snapshot persistence for the content cache
//!
//! A snapshot is keyed by a fingerprint of the dataset root: its canonical
//! path plus the root directory's own modification time. The fingerprint is
//! deliberately coarse - edits deep in subdirectories that do not touch the
//! root's mtime are invisible to it, so `--force` exists as the operator
//! escape hatch.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const SNAPSHOT_VERSION: &str = "1";

/// Serialized form of a content cache. Round-trips the full path->content
/// mapping losslessly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSnapshot {
    pub version: String,
    pub root: String,
    pub fingerprint: String,
    #[serde(default)]
    pub skipped: usize,
    pub entries: BTreeMap<String, String>,
}

/// Fingerprint identifying one (root path, top-level mtime) dataset state.
pub fn dataset_fingerprint(root: &Path) -> Result<String> {
    let canonical = root
        .canonicalize()
        .unwrap_or_else(|_| root.to_path_buf());
    let metadata = std::fs::metadata(&canonical)
        .with_context(|| format!("Cannot stat dataset root {}", canonical.display()))?;
    let mtime = mtime_nanos(&metadata);

    let mut hasher = blake3::Hasher::new();
    hasher.update(canonical.to_string_lossy().as_bytes());
    hasher.update(&[0]);
    hasher.update(mtime.to_string().as_bytes());
    Ok(hasher.finalize().to_hex().to_string())
}

/// Default per-user snapshot directory, falling back to a dot directory under
/// the dataset root when the platform reports no cache home.
pub fn default_cache_dir(root: &Path) -> PathBuf {
    dirs::cache_dir()
        .map(|dir| dir.join("cloneclass"))
        .unwrap_or_else(|| root.join(".cloneclass").join("cache"))
}

/// Location of the snapshot for a fingerprint under a cache directory.
pub fn snapshot_path(cache_dir: &Path, fingerprint: &str) -> PathBuf {
    cache_dir.join(format!("v{SNAPSHOT_VERSION}-{fingerprint}.json"))
}

/// Load a snapshot matching `fingerprint`, if a valid one exists.
pub fn load_snapshot(cache_dir: &Path, fingerprint: &str) -> Option<CacheSnapshot> {
    let path = snapshot_path(cache_dir, fingerprint);
    let content = std::fs::read_to_string(path).ok()?;
    let snapshot: CacheSnapshot = serde_json::from_str(&content).ok()?;
    if snapshot.version != SNAPSHOT_VERSION || snapshot.fingerprint != fingerprint {
        return None;
    }
    Some(snapshot)
}

/// Persist a snapshot under the cache directory, atomically.
pub fn write_snapshot(cache_dir: &Path, snapshot: &CacheSnapshot) -> Result<()> {
    std::fs::create_dir_all(cache_dir)
        .with_context(|| format!("failed to create {}", cache_dir.display()))?;
    let path = snapshot_path(cache_dir, &snapshot.fingerprint);
    let content = serde_json::to_string(snapshot)?;
    atomic_write_bytes(&path, content.as_bytes())
}

fn mtime_nanos(metadata: &std::fs::Metadata) -> u64 {
    metadata
        .modified()
        .ok()
        .and_then(|time| time.duration_since(UNIX_EPOCH).ok())
        .map(|duration| duration.as_nanos() as u64)
        .unwrap_or(0)
}

fn atomic_write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    let Some(parent) = path.parent() else {
        anyhow::bail!("cannot atomically write {} without parent", path.display());
    };
    std::fs::create_dir_all(parent)?;

    let nonce = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_nanos())
        .unwrap_or(0);
    let tmp_name = format!(
        ".{}.tmp-{}-{}",
        path.file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("cloneclass"),
        std::process::id(),
        nonce
    );
    let tmp_path = parent.join(tmp_name);

    {
        let mut file = File::create(&tmp_path)
            .with_context(|| format!("failed to create {}", tmp_path.display()))?;
        file.write_all(bytes)
            .with_context(|| format!("failed to write {}", tmp_path.display()))?;
        file.sync_all()
            .with_context(|| format!("failed to sync {}", tmp_path.display()))?;
    }

    if let Err(err) = std::fs::rename(&tmp_path, path) {
        if path.exists() {
            let _ = std::fs::remove_file(path);
            std::fs::rename(&tmp_path, path).with_context(|| {
                format!(
                    "failed to replace {} with {} after rename error: {err}",
                    path.display(),
                    tmp_path.display()
                )
            })?;
        } else {
            return Err(err.into());
        }
    }

    Ok(())
}
