// SPDX-License-Identifier: MIT OR Apache-2.0

//! Clone pair records as emitted by an external clone detector.

use serde::{Deserialize, Serialize};

use crate::relation::FragmentId;

/// Clone-type tag carried on a relation's optional seventh field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CloneType {
    /// Syntactically identical copies.
    Exact,
    /// Identifiers or literals renamed.
    Renamed,
    /// Statements added, removed, or reordered.
    NearMiss,
    /// Same behavior, different implementation.
    Semantic,
    /// Untagged or unrecognized.
    Unknown,
}

impl CloneType {
    /// Parse a relation-file tag. Unrecognized tags map to `Unknown` rather
    /// than failing the record; the tag is advisory metadata.
    pub fn parse(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "exact" => Self::Exact,
            "renamed" => Self::Renamed,
            "near-miss" | "nearmiss" => Self::NearMiss,
            "semantic" => Self::Semantic,
            _ => Self::Unknown,
        }
    }

    pub fn as_label(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Renamed => "renamed",
            Self::NearMiss => "near-miss",
            Self::Semantic => "semantic",
            Self::Unknown => "unknown",
        }
    }
}

/// One pairwise clone relation between two fragments.
///
/// Created once per ingested relation line and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClonePairRecord {
    pub left: FragmentId,
    pub right: FragmentId,
    pub clone_type: CloneType,
}

impl ClonePairRecord {
    pub fn new(left: FragmentId, right: FragmentId, clone_type: CloneType) -> Self {
        Self {
            left,
            right,
            clone_type,
        }
    }

    /// Both endpoints, left first.
    pub fn endpoints(&self) -> [&FragmentId; 2] {
        [&self.left, &self.right]
    }

    /// True when the relation links a fragment to itself.
    pub fn is_self_pair(&self) -> bool {
        self.left == self.right
    }

    /// True when the two fragments live in different files.
    pub fn is_cross_file(&self) -> bool {
        self.left.path != self.right.path
    }

    /// Line span of the smaller endpoint.
    pub fn min_span(&self) -> u32 {
        self.left.span().min(self.right.span())
    }
}
