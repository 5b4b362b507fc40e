// SPDX-License-Identifier: MIT OR Apache-2.0

//! Composable filter predicates applied to clone pairs before clustering.
//!
//! The algebra is closed: every combinator yields another [`FilterStrategy`],
//! and a strategy value is fully self-contained, so one immutable instance can
//! be captured by any number of parallel workers.

use std::fmt;
use std::sync::Arc;

use rayon::prelude::*;

use crate::errors::EmptyComposite;
use crate::relation::{ClonePairRecord, CloneType};

/// Shared boolean predicate over one clone pair.
pub type PairPredicate = Arc<dyn Fn(&ClonePairRecord) -> bool + Send + Sync>;

/// Operator combining the children of a composite strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombineOp {
    /// Conjunction: every child must match.
    All,
    /// Disjunction: at least one child must match.
    Any,
}

/// Closed algebra of clone-pair filters.
#[derive(Clone)]
pub enum FilterStrategy {
    /// Identity filter: keeps every pair. The default when none is supplied.
    AllowAll,
    /// Ad-hoc predicate adapter.
    Predicate(PairPredicate),
    /// Conjunction or disjunction over child strategies. Never empty.
    Composite {
        op: CombineOp,
        children: Vec<FilterStrategy>,
    },
    /// Complement of a child strategy.
    Negated(Box<FilterStrategy>),
}

impl FilterStrategy {
    /// Wrap an arbitrary boolean function of a pair as a strategy.
    pub fn predicate(f: impl Fn(&ClonePairRecord) -> bool + Send + Sync + 'static) -> Self {
        Self::Predicate(Arc::new(f))
    }

    /// Conjunction of child strategies.
    pub fn all(children: Vec<FilterStrategy>) -> Result<Self, EmptyComposite> {
        Self::composite(CombineOp::All, children)
    }

    /// Disjunction of child strategies.
    pub fn any(children: Vec<FilterStrategy>) -> Result<Self, EmptyComposite> {
        Self::composite(CombineOp::Any, children)
    }

    fn composite(op: CombineOp, children: Vec<FilterStrategy>) -> Result<Self, EmptyComposite> {
        if children.is_empty() {
            return Err(EmptyComposite);
        }
        Ok(Self::Composite { op, children })
    }

    /// Complement of a strategy.
    pub fn negate(child: FilterStrategy) -> Self {
        Self::Negated(Box::new(child))
    }

    /// Keep pairs where both fragments span at least `lines` lines.
    pub fn min_span(lines: u32) -> Self {
        Self::predicate(move |pair| pair.min_span() >= lines)
    }

    /// Keep pairs whose fragments live in different files.
    pub fn cross_file() -> Self {
        Self::predicate(|pair| pair.is_cross_file())
    }

    /// Keep pairs tagged with one of the given clone types.
    pub fn clone_types(allowed: Vec<CloneType>) -> Self {
        Self::predicate(move |pair| allowed.contains(&pair.clone_type))
    }

    /// Evaluate the strategy against one pair.
    ///
    /// Pure given the pair and the strategy's own configuration; safe to call
    /// from any thread in any order.
    pub fn matches(&self, pair: &ClonePairRecord) -> bool {
        match self {
            Self::AllowAll => true,
            Self::Predicate(predicate) => predicate(pair),
            Self::Composite {
                op: CombineOp::All,
                children,
            } => children.iter().all(|child| child.matches(pair)),
            Self::Composite {
                op: CombineOp::Any,
                children,
            } => children.iter().any(|child| child.matches(pair)),
            Self::Negated(child) => !child.matches(pair),
        }
    }
}

impl Default for FilterStrategy {
    fn default() -> Self {
        Self::AllowAll
    }
}

impl fmt::Debug for FilterStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllowAll => write!(f, "AllowAll"),
            Self::Predicate(_) => write!(f, "Predicate(..)"),
            Self::Composite { op, children } => f
                .debug_struct("Composite")
                .field("op", op)
                .field("children", children)
                .finish(),
            Self::Negated(child) => f.debug_tuple("Negated").field(child).finish(),
        }
    }
}

/// Keep the pairs matching `strategy`, preserving input order.
pub fn filter_pairs(
    pairs: Vec<ClonePairRecord>,
    strategy: &FilterStrategy,
) -> Vec<ClonePairRecord> {
    pairs
        .into_iter()
        .filter(|pair| strategy.matches(pair))
        .collect()
}

/// Parallel variant of [`filter_pairs`], fanned out across the rayon pool.
///
/// The strategy is captured by reference by every worker; a predicate panic
/// propagates and aborts the run, since it signals a configuration mistake
/// rather than bad data.
pub fn par_filter_pairs(
    pairs: Vec<ClonePairRecord>,
    strategy: &FilterStrategy,
) -> Vec<ClonePairRecord> {
    pairs
        .into_par_iter()
        .filter(|pair| strategy.matches(pair))
        .collect()
}
