// SPDX-License-Identifier: MIT OR Apache-2.0

//! Coverage check: which fragments already belong to some clone class.
//!
//! Downstream consumers classify fragments that no class covers; this is the
//! membership set they test against. Lookup is by exact fragment identity.

use std::collections::HashSet;

use crate::cluster::CloneClass;
use crate::relation::FragmentId;

/// Set of every fragment endpoint appearing in a list of clone classes.
#[derive(Debug, Default)]
pub struct ClassCoverage {
    covered: HashSet<FragmentId>,
}

impl ClassCoverage {
    pub fn new(classes: &[CloneClass]) -> Self {
        let mut covered = HashSet::new();
        for class in classes {
            for pair in class.pairs() {
                covered.insert(pair.left.clone());
                covered.insert(pair.right.clone());
            }
        }
        Self { covered }
    }

    /// True when some clone class contains this exact fragment.
    pub fn contains(&self, fragment: &FragmentId) -> bool {
        self.covered.contains(fragment)
    }

    /// True when no clone class covers this fragment.
    pub fn is_novel(&self, fragment: &FragmentId) -> bool {
        !self.contains(fragment)
    }

    pub fn len(&self) -> usize {
        self.covered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.covered.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::build_classes;
    use crate::relation::{ClonePairRecord, CloneType};

    #[test]
    fn covered_fragments_are_not_novel() {
        let classes = build_classes(vec![ClonePairRecord::new(
            FragmentId::new("A.java", 1, 10),
            FragmentId::new("B.java", 5, 14),
            CloneType::Unknown,
        )]);
        let coverage = ClassCoverage::new(&classes);

        assert_eq!(coverage.len(), 2);
        assert!(coverage.contains(&FragmentId::new("A.java", 1, 10)));
        assert!(coverage.is_novel(&FragmentId::new("A.java", 1, 9)));
        assert!(coverage.is_novel(&FragmentId::new("Z.java", 1, 10)));
    }

    #[test]
    fn empty_class_list_covers_nothing() {
        let coverage = ClassCoverage::new(&[]);
        assert!(coverage.is_empty());
        assert!(coverage.is_novel(&FragmentId::new("A.java", 1, 10)));
    }
}
