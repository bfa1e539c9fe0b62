//! Edge types for the directed multigraph.
//!
//! This module provides the [`Edge`] type, a directed connection between two
//! node values that either carries a weight or does not. The two cases form a
//! closed set, so the edge is a plain enum rather than a trait object;
//! matching on it is exhaustive and there is no dynamic dispatch.

use std::cmp::Ordering;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which endpoint of an edge an operation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Endpoint {
    /// The node the edge leaves from.
    Source,
    /// The node the edge points at.
    Target,
}

/// A directed edge between two node values, optionally weighted.
///
/// An edge is identified by its `(source, target, weight-or-absence)` triple:
/// two edges with the same triple are the same edge. A graph may hold several
/// edges between the same pair of nodes as long as their weights (or the
/// absence of one) differ.
///
/// # Example
///
/// ```
/// use ordered_digraph::Edge;
///
/// let ab: Edge<&str, i32> = Edge::weighted("A", "B", 3);
/// let bc: Edge<&str, i32> = Edge::unweighted("B", "C");
///
/// assert!(ab.is_weighted());
/// assert_eq!(ab.weight(), Some(&3));
/// assert_eq!(bc.weight(), None);
/// assert_eq!(ab.endpoints(), (&"A", &"B"));
///
/// assert_eq!(ab.to_string(), "A -> B | W | 3");
/// assert_eq!(bc.to_string(), "B -> C | U");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Edge<N, E> {
    /// An edge with no weight.
    Unweighted {
        /// The node the edge leaves from.
        source: N,
        /// The node the edge points at.
        target: N,
    },
    /// An edge carrying a weight.
    Weighted {
        /// The node the edge leaves from.
        source: N,
        /// The node the edge points at.
        target: N,
        /// The weight carried by the edge.
        weight: E,
    },
}

impl<N, E> Edge<N, E> {
    /// Create an unweighted edge from `source` to `target`.
    #[inline]
    #[must_use]
    pub const fn unweighted(source: N, target: N) -> Self {
        Self::Unweighted { source, target }
    }

    /// Create a weighted edge from `source` to `target`.
    #[inline]
    #[must_use]
    pub const fn weighted(source: N, target: N, weight: E) -> Self {
        Self::Weighted { source, target, weight }
    }

    /// Whether this edge carries a weight.
    #[inline]
    #[must_use]
    pub const fn is_weighted(&self) -> bool {
        matches!(self, Self::Weighted { .. })
    }

    /// The weight, or `None` for an unweighted edge.
    #[inline]
    #[must_use]
    pub const fn weight(&self) -> Option<&E> {
        match self {
            Self::Unweighted { .. } => None,
            Self::Weighted { weight, .. } => Some(weight),
        }
    }

    /// The node this edge leaves from.
    #[inline]
    #[must_use]
    pub const fn source(&self) -> &N {
        match self {
            Self::Unweighted { source, .. } | Self::Weighted { source, .. } => source,
        }
    }

    /// The node this edge points at.
    #[inline]
    #[must_use]
    pub const fn target(&self) -> &N {
        match self {
            Self::Unweighted { target, .. } | Self::Weighted { target, .. } => target,
        }
    }

    /// Both endpoints as a `(source, target)` pair.
    #[inline]
    #[must_use]
    pub const fn endpoints(&self) -> (&N, &N) {
        (self.source(), self.target())
    }

    /// The uniqueness key of this edge.
    ///
    /// Sorting, lookup, and deduplication all compare this triple. `Option`'s
    /// derived ordering places `None` before any `Some`, which is exactly the
    /// "no weight sorts first" rule.
    #[inline]
    pub(crate) fn key(&self) -> (&N, &N, Option<&E>) {
        (self.source(), self.target(), self.weight())
    }

    /// In-place endpoint replacement for node rename and merge.
    ///
    /// Only the graph may call this; it re-establishes the sort invariant
    /// afterwards.
    pub(crate) fn rebind(&mut self, endpoint: Endpoint, value: N) {
        let slot = match (self, endpoint) {
            (Self::Unweighted { source, .. } | Self::Weighted { source, .. }, Endpoint::Source) => {
                source
            }
            (Self::Unweighted { target, .. } | Self::Weighted { target, .. }, Endpoint::Target) => {
                target
            }
        };
        *slot = value;
    }
}

impl<N: Ord, E: Ord> PartialOrd for Edge<N, E> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The canonical order over edges: by source, then target, then
/// weight-or-absence, an absent weight sorting before any present one.
impl<N: Ord, E: Ord> Ord for Edge<N, E> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl<N: fmt::Display, E: fmt::Display> fmt::Display for Edge<N, E> {
    /// Renders the canonical text form:
    /// `"<source> -> <target> | W | <weight>"` for a weighted edge,
    /// `"<source> -> <target> | U"` for an unweighted one.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unweighted { source, target } => write!(f, "{source} -> {target} | U"),
            Self::Weighted { source, target, weight } => {
                write!(f, "{source} -> {target} | W | {weight}")
            }
        }
    }
}
