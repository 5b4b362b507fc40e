// SPDX-License-Identifier: MIT OR Apache-2.0

//! External fragment index and per-class representative selection.
//!
//! The index is produced by an out-of-scope extractor and may be incomplete;
//! every lookup path here tolerates absent entries.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cluster::CloneClass;
use crate::relation::fragment::basename;
use crate::relation::{normalize_path, FragmentId};

/// One known fragment with its source text, as supplied by the extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexedFragment {
    pub path: String,
    pub start_line: u32,
    pub end_line: u32,
    pub text: String,
}

impl IndexedFragment {
    /// Identity key for this fragment.
    pub fn fragment_id(&self) -> FragmentId {
        FragmentId::new(&self.path, self.start_line, self.end_line)
    }

    fn span(&self) -> u32 {
        self.end_line.saturating_sub(self.start_line) + 1
    }
}

/// Index over known fragments, keyed by full path and by basename.
///
/// A lookup miss on the full key falls back to basename-plus-range, then to a
/// suffix scan, since relation files and extractors often disagree on whether
/// paths are absolute or dataset-relative.
#[derive(Debug, Default)]
pub struct FragmentIndex {
    fragments: Vec<IndexedFragment>,
    by_path: HashMap<(String, u32, u32), usize>,
    by_basename: HashMap<(String, u32, u32), usize>,
}

impl FragmentIndex {
    pub fn new(fragments: Vec<IndexedFragment>) -> Self {
        let mut index = Self {
            fragments,
            by_path: HashMap::new(),
            by_basename: HashMap::new(),
        };
        for (i, fragment) in index.fragments.iter_mut().enumerate() {
            fragment.path = normalize_path(&fragment.path);
            let range = (fragment.start_line, fragment.end_line);
            index
                .by_path
                .insert((fragment.path.clone(), range.0, range.1), i);
            index
                .by_basename
                .entry((basename(&fragment.path).to_string(), range.0, range.1))
                .or_insert(i);
        }
        index
    }

    /// Load the extractor's JSON output: an array of
    /// `{path, start_line, end_line, text}` objects.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read fragment index {}", path.display()))?;
        let fragments: Vec<IndexedFragment> = serde_json::from_str(&content)
            .with_context(|| format!("Invalid fragment index {}", path.display()))?;
        Ok(Self::new(fragments))
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Every indexed fragment, in load order.
    pub fn fragments(&self) -> &[IndexedFragment] {
        &self.fragments
    }

    /// Find the indexed fragment for an identity, tolerating path-form
    /// mismatches between the relation file and the extractor.
    pub fn lookup(&self, fragment: &FragmentId) -> Option<&IndexedFragment> {
        let range = (fragment.start_line, fragment.end_line);

        if let Some(&i) = self
            .by_path
            .get(&(fragment.path.clone(), range.0, range.1))
        {
            return Some(&self.fragments[i]);
        }

        if let Some(&i) = self
            .by_basename
            .get(&(fragment.basename().to_string(), range.0, range.1))
        {
            return Some(&self.fragments[i]);
        }

        // Last resort: an indexed relative path may be a suffix of the
        // requested absolute path (or the reverse), on a '/' boundary.
        self.fragments.iter().find(|candidate| {
            candidate.start_line == range.0
                && candidate.end_line == range.1
                && (path_ends_with(&fragment.path, &candidate.path)
                    || path_ends_with(&candidate.path, &fragment.path))
        })
    }
}

fn path_ends_with(longer: &str, shorter: &str) -> bool {
    longer == shorter || longer.ends_with(&format!("/{shorter}"))
}

/// Pick the exemplar fragment for a clone class.
///
/// Collects every class fragment present in the index (absent fragments are
/// silently skipped), dedups by indexed identity, then takes the candidate
/// with the smallest `(text length, line span)`. The sort is stable, so
/// repeated calls over the same class return the same fragment. Returns
/// `None` when no class fragment is indexed.
pub fn pick_representative<'a>(
    class: &CloneClass,
    index: &'a FragmentIndex,
) -> Option<&'a IndexedFragment> {
    let mut seen: HashSet<(&str, u32, u32)> = HashSet::new();
    let mut candidates: Vec<&IndexedFragment> = Vec::new();

    for fragment in class.fragments() {
        if let Some(found) = index.lookup(fragment) {
            if seen.insert((found.path.as_str(), found.start_line, found.end_line)) {
                candidates.push(found);
            }
        }
    }

    candidates.sort_by_key(|candidate| (candidate.text.len(), candidate.span()));
    candidates.first().copied()
}
