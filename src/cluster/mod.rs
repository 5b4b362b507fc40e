// SPDX-License-Identifier: MIT OR Apache-2.0

//! Union-find based grouping of clone pairs into clone classes.

pub mod coverage;
mod dsu;
pub mod representative;

pub use coverage::ClassCoverage;
pub use dsu::UnionFind;
pub use representative::{pick_representative, FragmentIndex, IndexedFragment};

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::relation::{ClonePairRecord, FragmentId};

/// A maximal set of clone pairs connected through shared fragment endpoints.
///
/// Derived, read-only view: rebuilt wholesale by [`build_classes`], never
/// mutated incrementally. For any two member pairs there is a chain of member
/// pairs linking their fragments.
#[derive(Debug, Clone, Serialize)]
pub struct CloneClass {
    pairs: Vec<ClonePairRecord>,
}

impl CloneClass {
    /// Member pairs, in ingestion order.
    pub fn pairs(&self) -> &[ClonePairRecord] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Distinct fragment endpoints, in first-appearance order.
    pub fn fragments(&self) -> Vec<&FragmentId> {
        let mut seen: HashSet<&FragmentId> = HashSet::new();
        let mut fragments = Vec::new();
        for pair in &self.pairs {
            for fragment in pair.endpoints() {
                if seen.insert(fragment) {
                    fragments.push(fragment);
                }
            }
        }
        fragments
    }
}

/// Partition pairs into clone classes by connectivity of their endpoints.
///
/// Every distinct [`FragmentId`] appearing in the input becomes a union-find
/// node; each pair unions its two endpoints; the pairs are then grouped by the
/// canonical root of their first endpoint. The resulting partition is
/// invariant under permutation of the input sequence; only the order of the
/// returned list (first appearance of each component) depends on it.
pub fn build_classes(pairs: Vec<ClonePairRecord>) -> Vec<CloneClass> {
    if pairs.is_empty() {
        return Vec::new();
    }

    let mut node_ids: HashMap<FragmentId, u32> = HashMap::new();
    for pair in &pairs {
        for fragment in pair.endpoints() {
            let next = node_ids.len() as u32;
            node_ids.entry(fragment.clone()).or_insert(next);
        }
    }

    let mut dsu = UnionFind::new(node_ids.len());
    for pair in &pairs {
        dsu.union(node_ids[&pair.left], node_ids[&pair.right]);
    }

    let mut class_of_root: HashMap<u32, usize> = HashMap::new();
    let mut classes: Vec<Vec<ClonePairRecord>> = Vec::new();
    for pair in pairs {
        let root = dsu.find(node_ids[&pair.left]);
        let index = *class_of_root.entry(root).or_insert_with(|| {
            classes.push(Vec::new());
            classes.len() - 1
        });
        classes[index].push(pair);
    }

    classes
        .into_iter()
        .map(|pairs| CloneClass { pairs })
        .collect()
}
