// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types surfaced to callers
//!
//! Ingestion and resolution failures carry enough context (raw line,
//! requested path, candidate matches) to fix the input without a debugger.

use std::fmt;

use thiserror::Error;

/// Hard failure for a single malformed relation line.
///
/// Ingestion aborts on the first malformed record instead of skipping it;
/// silent data loss on relation files is worse than stopping the run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedRecord {
    /// The line split into fewer than the 6 required fields.
    #[error("line {line_number}: expected at least 6 fields, got {field_count}: {raw:?}")]
    FieldCount {
        line_number: usize,
        field_count: usize,
        raw: String,
    },
    /// A line-number field did not parse as a non-negative integer.
    #[error("line {line_number}: field {field:?} is not a line number: {raw:?}")]
    BadLineNumber {
        line_number: usize,
        field: String,
        raw: String,
    },
    /// A fragment's start line was after its end line.
    #[error("line {line_number}: start line {start} is after end line {end}: {raw:?}")]
    InvertedRange {
        line_number: usize,
        start: u32,
        end: u32,
        raw: String,
    },
}

impl MalformedRecord {
    /// The offending raw line, verbatim.
    pub fn raw(&self) -> &str {
        match self {
            Self::FieldCount { raw, .. }
            | Self::BadLineNumber { raw, .. }
            | Self::InvertedRange { raw, .. } => raw,
        }
    }
}

/// A candidate path offered when snippet resolution misses.
#[derive(Debug, Clone)]
pub struct PathSuggestion {
    pub path: String,
    /// Similarity ratio to the requested path, in `[0, 1]`.
    pub score: f64,
}

/// Error indicating a fragment's source could not be located in the cache,
/// even via the basename/suffix fallback.
#[derive(Debug)]
pub struct SnippetNotFound {
    pub requested: String,
    /// Cached paths most similar to the request, best first.
    pub suggestions: Vec<PathSuggestion>,
}

impl fmt::Display for SnippetNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "No cached content for '{}'", self.requested)?;
        if self.suggestions.is_empty() {
            write!(
                f,
                "\n\nThe content cache is empty. Check the dataset root passed to 'cache build'."
            )
        } else {
            write!(f, "\n\nClosest cached paths:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  {} ({:.2})", suggestion.path, suggestion.score)?;
            }
            write!(
                f,
                "\n\nIf one of these is the file you meant, the relation file and the \
                 dataset disagree on path layout."
            )
        }
    }
}

impl std::error::Error for SnippetNotFound {}

/// Configuration error: a composite filter strategy was built with no children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("composite filter strategy requires at least one child")]
pub struct EmptyComposite;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_record_mentions_raw_line() {
        let err = MalformedRecord::FieldCount {
            line_number: 3,
            field_count: 4,
            raw: "a,1,2,b".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("a,1,2,b"));
        assert!(message.contains("got 4"));
        assert_eq!(err.raw(), "a,1,2,b");
    }

    #[test]
    fn snippet_not_found_lists_suggestions_in_order() {
        let err = SnippetNotFound {
            requested: "/data/Foo_typo.java".to_string(),
            suggestions: vec![
                PathSuggestion {
                    path: "/data/Foo.java".to_string(),
                    score: 0.9,
                },
                PathSuggestion {
                    path: "/data/Bar.java".to_string(),
                    score: 0.4,
                },
            ],
        };
        let message = err.to_string();
        let foo = message.find("/data/Foo.java").expect("top suggestion");
        let bar = message.find("/data/Bar.java").expect("second suggestion");
        assert!(foo < bar);
    }
}
