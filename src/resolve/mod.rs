// SPDX-License-Identifier: MIT OR Apache-2.0

//! Snippet resolution through the content cache
//!
//! Resolution order: exact normalized-path lookup, then a basename/suffix
//! scan across cached paths, then failure carrying the closest cached paths
//! as suggestions. A miss is an error value, never control flow.

mod similarity;

pub use similarity::similarity_ratio;

use std::path::Path;

use anyhow::{Context, Result};

use crate::cache::ContentCache;
use crate::errors::{PathSuggestion, SnippetNotFound};
use crate::relation::fragment::basename;
use crate::relation::FragmentId;

/// Number of suggested paths attached to a [`SnippetNotFound`] by default.
pub const DEFAULT_SUGGESTIONS: usize = 3;

/// Resolves fragment text against a loaded content cache.
pub struct SnippetResolver<'a> {
    cache: &'a ContentCache,
    suggestions: usize,
}

impl<'a> SnippetResolver<'a> {
    pub fn new(cache: &'a ContentCache) -> Self {
        Self {
            cache,
            suggestions: DEFAULT_SUGGESTIONS,
        }
    }

    /// Override how many similar paths a miss reports.
    pub fn with_suggestions(mut self, suggestions: usize) -> Self {
        self.suggestions = suggestions;
        self
    }

    /// Source text for a fragment's line range.
    ///
    /// The range is clamped to the lines actually present - the boundary
    /// numbers may come from a stale fragment index, so partially (or fully)
    /// out-of-range requests degrade to the available slice rather than fail.
    pub fn resolve(&self, fragment: &FragmentId) -> Result<String, SnippetNotFound> {
        if let Some(content) = self.cache.get(&fragment.path) {
            return Ok(slice_lines(content, fragment.start_line, fragment.end_line));
        }

        if let Some(content) = self.fallback_lookup(&fragment.path) {
            return Ok(slice_lines(content, fragment.start_line, fragment.end_line));
        }

        Err(SnippetNotFound {
            requested: fragment.path.clone(),
            suggestions: self.closest_paths(&fragment.path),
        })
    }

    /// A cached path whose basename equals the requested path, or which ends
    /// with the requested relative path. Deterministic: the lexicographically
    /// first match wins.
    fn fallback_lookup(&self, requested: &str) -> Option<&str> {
        let suffix = format!("/{requested}");
        let mut matches: Vec<&str> = self
            .cache
            .paths()
            .filter(|cached| basename(cached) == requested || cached.ends_with(&suffix))
            .collect();
        matches.sort_unstable();
        matches.first().copied().and_then(|path| self.cache.get(path))
    }

    /// Cached paths ranked by descending similarity to the request.
    fn closest_paths(&self, requested: &str) -> Vec<PathSuggestion> {
        let mut scored: Vec<PathSuggestion> = self
            .cache
            .paths()
            .map(|path| PathSuggestion {
                path: path.to_string(),
                score: similarity_ratio(requested, path),
            })
            .collect();
        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.path.cmp(&b.path))
        });
        scored.truncate(self.suggestions);
        scored
    }
}

/// Resolve a fragment by reading its file directly, bypassing any cache.
pub fn resolve_direct(fragment: &FragmentId) -> Result<String> {
    let content = std::fs::read_to_string(Path::new(&fragment.path))
        .with_context(|| format!("Cannot read {}", fragment.path))?;
    Ok(slice_lines(
        &content,
        fragment.start_line,
        fragment.end_line,
    ))
}

/// Slice a 1-based inclusive line range, clamped to the available lines.
fn slice_lines(content: &str, start_line: u32, end_line: u32) -> String {
    let lines: Vec<&str> = content.lines().collect();
    let total = lines.len() as u32;
    if total == 0 {
        return String::new();
    }
    let end = end_line.min(total);
    let start = start_line.max(1);
    if start > end {
        return String::new();
    }
    lines[(start - 1) as usize..end as usize].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn cache_with(files: &[(&str, &str)]) -> (TempDir, ContentCache) {
        let dir = TempDir::new().expect("tempdir");
        for (name, content) in files {
            let path = dir.path().join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).expect("mkdir");
            }
            fs::write(path, content).expect("write");
        }
        let cache = ContentCache::load(dir.path()).expect("load");
        (dir, cache)
    }

    #[test]
    fn exact_path_resolves() {
        let (dir, cache) = cache_with(&[("data/Foo.java", "l1\nl2\nl3\nl4\n")]);
        let resolver = SnippetResolver::new(&cache);
        let path = dir.path().join("data/Foo.java");
        let fragment = FragmentId::new(&path.to_string_lossy(), 2, 3);
        assert_eq!(resolver.resolve(&fragment).expect("hit"), "l2\nl3");
    }

    #[test]
    fn basename_fallback_resolves() {
        let (_dir, cache) = cache_with(&[("data/Foo.java", "a\nb\nc\n")]);
        let resolver = SnippetResolver::new(&cache);
        let fragment = FragmentId::new("Foo.java", 1, 2);
        assert_eq!(resolver.resolve(&fragment).expect("hit"), "a\nb");
    }

    #[test]
    fn relative_suffix_fallback_resolves() {
        let (_dir, cache) = cache_with(&[("data/sub/Foo.java", "a\nb\n")]);
        let resolver = SnippetResolver::new(&cache);
        let fragment = FragmentId::new("sub/Foo.java", 1, 1);
        assert_eq!(resolver.resolve(&fragment).expect("hit"), "a");
    }

    #[test]
    fn out_of_range_requests_clamp_silently() {
        let (dir, cache) = cache_with(&[("f.java", "a\nb\nc\n")]);
        let resolver = SnippetResolver::new(&cache);
        let path = dir.path().join("f.java").to_string_lossy().into_owned();

        // end past EOF clamps to the last line
        assert_eq!(
            resolver
                .resolve(&FragmentId::new(&path, 2, 99))
                .expect("hit"),
            "b\nc"
        );
        // fully past EOF degrades to empty
        assert_eq!(
            resolver
                .resolve(&FragmentId::new(&path, 10, 12))
                .expect("hit"),
            ""
        );
    }

    #[test]
    fn miss_reports_most_similar_paths_first() {
        let (_dir, cache) = cache_with(&[("Foo.java", "x\n"), ("Bar.java", "y\n")]);
        let resolver = SnippetResolver::new(&cache);
        let err = resolver
            .resolve(&FragmentId::new("/data/Foo_typo.java", 1, 1))
            .expect_err("miss");

        assert!(err.requested.contains("Foo_typo.java"));
        assert!(!err.suggestions.is_empty());
        assert!(err.suggestions[0].path.ends_with("Foo.java"));
        for window in err.suggestions.windows(2) {
            assert!(window[0].score >= window[1].score);
        }
    }

    #[test]
    fn suggestion_count_is_configurable() {
        let (_dir, cache) =
            cache_with(&[("a.java", "x\n"), ("b.java", "x\n"), ("c.java", "x\n")]);
        let resolver = SnippetResolver::new(&cache).with_suggestions(2);
        let err = resolver
            .resolve(&FragmentId::new("zzz.txt", 1, 1))
            .expect_err("miss");
        assert_eq!(err.suggestions.len(), 2);
    }

    #[test]
    fn direct_read_matches_cache_read() {
        let (dir, cache) = cache_with(&[("f.java", "a\nb\nc\n")]);
        let path = dir.path().join("f.java").to_string_lossy().into_owned();
        let fragment = FragmentId::new(&path, 1, 2);

        let via_cache = SnippetResolver::new(&cache)
            .resolve(&fragment)
            .expect("hit");
        let direct = resolve_direct(&fragment).expect("read");
        assert_eq!(via_cache, direct);
    }
}
