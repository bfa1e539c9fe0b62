//! Error types for graph operations.

use thiserror::Error;

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;

/// Errors that can occur when operating on a [`Graph`](crate::Graph).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GraphError {
    /// An operation required one or more node arguments to already be present
    /// in the graph, and at least one was absent.
    ///
    /// The failing call leaves the graph unchanged.
    #[error("cannot call {operation}: a named node does not exist in the graph")]
    NodeNotFound {
        /// The operation that was attempted.
        operation: &'static str,
    },
}

impl GraphError {
    /// Creates a [`GraphError::NodeNotFound`] for the given operation.
    #[must_use]
    pub(crate) const fn node_not_found(operation: &'static str) -> Self {
        Self::NodeNotFound { operation }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_not_found_names_the_operation() {
        let err = GraphError::node_not_found("insert_edge");
        assert_eq!(
            err.to_string(),
            "cannot call insert_edge: a named node does not exist in the graph"
        );
    }
}
