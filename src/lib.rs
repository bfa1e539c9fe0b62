//! `ordered-digraph`
//!
//! A generic, in-memory directed multigraph whose edge collection is always
//! kept in one canonical order.
//!
//! # Overview
//!
//! [`Graph<N, E>`] stores a set of node values of any totally ordered type
//! `N` and a collection of directed [`Edge`]s between them. An edge either
//! carries a weight of type `E` or does not; its identity is the
//! `(source, target, weight-or-absence)` triple, so parallel edges are
//! allowed as long as their triples differ. After every mutation the edge
//! collection is sorted by source, then target, then weight-or-absence (an
//! absent weight sorting first), which makes iteration, queries, equality,
//! and the textual rendering deterministic.
//!
//! The container is single-threaded and synchronous; no operation blocks,
//! and `&mut` exclusivity is all the synchronization it needs.
//!
//! # Example
//!
//! ```
//! use ordered_digraph::Graph;
//!
//! let mut g: Graph<&str, i32> = ["A", "B", "C"].into_iter().collect();
//! g.insert_edge("A", "B", 3)?;
//! g.insert_edge("B", "C", None)?;
//!
//! // Duplicate edge keys are rejected without error.
//! assert!(!g.insert_edge("A", "B", 3)?);
//!
//! // Queries read the canonically ordered state.
//! assert_eq!(g.nodes(), vec!["A", "B", "C"]);
//! assert_eq!(g.edges(&"A", &"B")?[0].to_string(), "A -> B | W | 3");
//!
//! // Renaming a node rewrites every incident edge.
//! g.replace_node(&"B", "T")?;
//! assert!(g.is_connected(&"A", &"T")?);
//! # Ok::<(), ordered_digraph::GraphError>(())
//! ```
//!
//! # Modules
//!
//! - [`graph`] - The [`Graph`] container and [`EdgeCursor`] positions
//! - [`edge`] - The [`Edge`] sum type and its canonical ordering
//! - [`iter`] - Read-only edge iteration ([`EdgeIter`], [`EdgeView`])
//! - [`error`] - Error types ([`GraphError`])

// Deny unwrap in library code to ensure proper error handling
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod edge;
pub mod error;
pub mod graph;
pub mod iter;


// Re-export commonly used types
pub use edge::Edge;
pub use error::{GraphError, GraphResult};
pub use graph::{EdgeCursor, Graph};
pub use iter::{EdgeIter, EdgeView};
