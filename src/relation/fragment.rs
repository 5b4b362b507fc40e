// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fragment identity: the `(path, start_line, end_line)` clustering key.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A contiguous line range within one source file.
///
/// The path is stored in normalized form, so two identities naming the same
/// file through different spellings compare and hash equal. `start_line` and
/// `end_line` are 1-based and inclusive; `start_line <= end_line` is enforced
/// at ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FragmentId {
    pub path: String,
    pub start_line: u32,
    pub end_line: u32,
}

impl FragmentId {
    /// Build an identity, normalizing the path.
    pub fn new(path: &str, start_line: u32, end_line: u32) -> Self {
        Self {
            path: normalize_path(path),
            start_line,
            end_line,
        }
    }

    /// Number of lines the fragment covers.
    pub fn span(&self) -> u32 {
        self.end_line.saturating_sub(self.start_line) + 1
    }

    /// Final path component.
    pub fn basename(&self) -> &str {
        basename(&self.path)
    }
}

impl fmt::Display for FragmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.path, self.start_line, self.end_line)
    }
}

/// Final component of a normalized path.
pub(crate) fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Normalize a path string into canonical, OS-independent form.
///
/// Separators unify to `/`, `.` segments drop, `..` segments resolve against
/// their parent (clamped at an absolute root, preserved when a relative path
/// climbs above its start). Purely lexical: the filesystem is never consulted,
/// so equivalent spellings compare equal even for paths that do not exist.
pub fn normalize_path(raw: &str) -> String {
    let unified = raw.trim().replace('\\', "/");
    let absolute = unified.starts_with('/');

    let mut parts: Vec<&str> = Vec::new();
    for component in unified.split('/') {
        match component {
            "" | "." => {}
            ".." => match parts.last() {
                None => {
                    if !absolute {
                        parts.push("..");
                    }
                }
                Some(&"..") => parts.push(".."),
                Some(last) if last.ends_with(':') => {}
                Some(_) => {
                    parts.pop();
                }
            },
            other => parts.push(other),
        }
    }

    if absolute {
        format!("/{}", parts.join("/"))
    } else if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}
