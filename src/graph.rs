//! The directed multigraph container.
//!
//! [`Graph`] owns a set of node values and a collection of [`Edge`]s between
//! them. The edge collection is kept sorted in the canonical order (source,
//! then target, then weight-or-absence) at every point a caller can observe,
//! so iteration, queries, and rendering are all deterministic.

use std::collections::BTreeSet;
use std::fmt;
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::edge::{Edge, Endpoint};
use crate::error::{GraphError, GraphResult};
use crate::iter::{EdgeIter, EdgeView};

/// An opaque position in a graph's edge collection.
///
/// Cursors are produced by [`Graph::find`] and by the cursor-based erasure
/// methods. Any structural mutation of the graph invalidates every cursor
/// obtained before it, except the cursor returned by the mutating call
/// itself; a stale cursor may denote a different edge or panic when used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct EdgeCursor {
    index: usize,
}

/// A generic directed multigraph with totally ordered nodes and weights.
///
/// Nodes are values of `N` and form a set; an edge connects a source node to
/// a target node and either carries a weight of `E` or does not. Edges are
/// identified by their `(source, target, weight-or-absence)` triple, so two
/// nodes may be connected by several edges as long as those triples differ.
/// Inserting an edge whose triple is already present is a no-op, not an
/// error.
///
/// Every operation that requires its node arguments to already exist fails
/// with [`GraphError::NodeNotFound`] and leaves the graph untouched when one
/// is absent; all other operations are total.
///
/// With the `serde` feature, a graph serializes as its node set and edge
/// list. Deserialization re-establishes the container invariants instead of
/// trusting the input: the edge list is sorted into canonical order,
/// duplicate uniqueness keys collapse to one edge, and an edge whose
/// endpoint is not in the node set is a deserialization error.
///
/// # Example
///
/// ```
/// use ordered_digraph::Graph;
///
/// let mut g: Graph<&str, i32> = ["A", "B", "C"].into_iter().collect();
/// g.insert_edge("A", "B", 3)?;
/// g.insert_edge("B", "C", None)?;
///
/// assert!(g.is_connected(&"A", &"B")?);
/// assert_eq!(g.edges(&"A", &"B")?[0].to_string(), "A -> B | W | 3");
/// assert_eq!(g.connections(&"A")?, vec!["B"]);
/// # Ok::<(), ordered_digraph::GraphError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Graph<N, E> {
    nodes: BTreeSet<N>,
    edges: Vec<Edge<N, E>>,
}

impl<N, E> Graph<N, E> {
    /// Create an empty graph.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { nodes: BTreeSet::new(), edges: Vec::new() }
    }

    /// Whether the graph has no nodes.
    ///
    /// A graph whose nodes carry no edges is still non-empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The number of nodes in the graph.
    #[inline]
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The number of edges in the graph.
    #[inline]
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Remove every node and edge.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }

    /// Iterate over all edges in canonical order.
    ///
    /// The iterator is double-ended and yields borrowed
    /// [`EdgeView`](crate::EdgeView)s.
    #[must_use]
    pub fn iter(&self) -> EdgeIter<'_, N, E> {
        EdgeIter::new(&self.edges)
    }

    /// The edge at a cursor position, if the cursor is in range.
    #[inline]
    #[must_use]
    pub fn edge_at(&self, cursor: EdgeCursor) -> Option<&Edge<N, E>> {
        self.edges.get(cursor.index)
    }
}

impl<N: Ord, E: Ord> Graph<N, E> {
    /// Add a node to the graph.
    ///
    /// Returns `true` if the value was absent and has been added, `false` if
    /// it was already a node.
    pub fn insert_node(&mut self, value: N) -> bool {
        self.nodes.insert(value)
    }

    /// Add an edge from `src` to `dst`, weighted if `weight` is `Some`.
    ///
    /// Returns `Ok(true)` if the edge was added, `Ok(false)` if an edge with
    /// the same `(source, target, weight-or-absence)` triple already exists.
    /// The weight argument accepts both a bare weight and an `Option`:
    ///
    /// ```
    /// use ordered_digraph::Graph;
    ///
    /// let mut g: Graph<&str, i32> = ["A", "B"].into_iter().collect();
    /// assert!(g.insert_edge("A", "B", 3)?);
    /// assert!(g.insert_edge("A", "B", None)?);
    /// assert!(!g.insert_edge("A", "B", 3)?);
    /// # Ok::<(), ordered_digraph::GraphError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// [`GraphError::NodeNotFound`] if either endpoint is not a node.
    pub fn insert_edge(
        &mut self,
        src: N,
        dst: N,
        weight: impl Into<Option<E>>,
    ) -> GraphResult<bool> {
        if !self.nodes.contains(&src) || !self.nodes.contains(&dst) {
            return Err(GraphError::node_not_found("insert_edge"));
        }
        let edge = match weight.into() {
            Some(weight) => Edge::weighted(src, dst, weight),
            None => Edge::unweighted(src, dst),
        };
        // Sorted insertion keeps the canonical order without a full re-sort.
        match self.edges.binary_search(&edge) {
            Ok(_) => Ok(false),
            Err(position) => {
                self.edges.insert(position, edge);
                Ok(true)
            }
        }
    }

    /// Rename the node `old` to `new`, rewriting every incident edge.
    ///
    /// Returns `Ok(false)` without changing anything if `new` is already a
    /// node; renaming onto an existing node must go through
    /// [`merge_replace_node`](Self::merge_replace_node). Otherwise every edge
    /// endpoint equal to `old` is rebound to `new` (a self-loop on `old`
    /// becomes a self-loop on `new`) and the result is `Ok(true)`.
    ///
    /// # Errors
    ///
    /// [`GraphError::NodeNotFound`] if `old` is not a node.
    pub fn replace_node(&mut self, old: &N, new: N) -> GraphResult<bool>
    where
        N: Clone,
    {
        if !self.nodes.contains(old) {
            return Err(GraphError::node_not_found("replace_node"));
        }
        if self.nodes.contains(&new) {
            return Ok(false);
        }
        self.nodes.remove(old);
        for edge in &mut self.edges {
            if edge.source() == old {
                edge.rebind(Endpoint::Source, new.clone());
            }
            if edge.target() == old {
                edge.rebind(Endpoint::Target, new.clone());
            }
        }
        self.nodes.insert(new);
        // The rename is injective on edge keys, so only order can break.
        self.edges.sort_unstable();
        Ok(true)
    }

    /// Fold every edge touching `old` onto the existing node `new`.
    ///
    /// Each edge endpoint equal to `old` is rebound to `new`. When rebinding
    /// makes an edge's `(source, target, weight-or-absence)` triple collide
    /// with one appearing earlier in the pre-merge collection order, the
    /// later edge is dropped: first occurrence wins. `old` itself stays in
    /// the node set; erase it separately if it should go.
    ///
    /// ```
    /// use ordered_digraph::Graph;
    ///
    /// let mut g: Graph<&str, i32> = ["A", "B", "C"].into_iter().collect();
    /// g.insert_edge("A", "C", 1)?;
    /// g.insert_edge("B", "C", 1)?;
    /// g.merge_replace_node(&"A", &"B")?;
    ///
    /// // Both edges became B -> C | W | 1; only one survives.
    /// assert_eq!(g.edge_count(), 1);
    /// # Ok::<(), ordered_digraph::GraphError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// [`GraphError::NodeNotFound`] if either `old` or `new` is not a node.
    pub fn merge_replace_node(&mut self, old: &N, new: &N) -> GraphResult<()>
    where
        N: Clone,
    {
        if !self.nodes.contains(old) || !self.nodes.contains(new) {
            return Err(GraphError::node_not_found("merge_replace_node"));
        }
        let mut kept: Vec<Edge<N, E>> = Vec::with_capacity(self.edges.len());
        for mut edge in std::mem::take(&mut self.edges) {
            if edge.source() == old {
                edge.rebind(Endpoint::Source, new.clone());
            }
            if edge.target() == old {
                edge.rebind(Endpoint::Target, new.clone());
            }
            if !kept.iter().any(|earlier| earlier.key() == edge.key()) {
                kept.push(edge);
            }
        }
        kept.sort_unstable();
        self.edges = kept;
        Ok(())
    }

    /// Remove a node and every edge incident to it.
    ///
    /// Returns `false` if `value` is not a node. Never fails.
    pub fn erase_node(&mut self, value: &N) -> bool {
        if !self.nodes.remove(value) {
            return false;
        }
        // retain preserves the canonical order.
        self.edges.retain(|edge| edge.source() != value && edge.target() != value);
        true
    }

    /// Remove the edge matching the exact `(src, dst, weight-or-absence)`
    /// triple.
    ///
    /// Returns `Ok(true)` if such an edge existed, `Ok(false)` otherwise.
    ///
    /// # Errors
    ///
    /// [`GraphError::NodeNotFound`] if either endpoint is not a node.
    pub fn erase_edge(&mut self, src: &N, dst: &N, weight: Option<&E>) -> GraphResult<bool> {
        if !self.nodes.contains(src) || !self.nodes.contains(dst) {
            return Err(GraphError::node_not_found("erase_edge"));
        }
        match self.find(src, dst, weight) {
            Some(cursor) => {
                self.edges.remove(cursor.index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove the edge at `cursor`.
    ///
    /// Returns a cursor to the position immediately after the removed edge in
    /// the canonical order, or `None` when the removed edge was the last one.
    ///
    /// # Panics
    ///
    /// Panics if `cursor` does not denote a live position; cursors are
    /// invalidated by any structural mutation since they were obtained.
    pub fn erase_edge_at(&mut self, cursor: EdgeCursor) -> Option<EdgeCursor> {
        assert!(cursor.index < self.edges.len(), "edge cursor out of range");
        self.edges.remove(cursor.index);
        (cursor.index < self.edges.len()).then_some(cursor)
    }

    /// Remove the half-open span of edges `[start, end)` in canonical order.
    ///
    /// An `end` of `None` removes through the last edge. Returns a cursor to
    /// the position following the removed span, or `None` when that position
    /// is the end.
    ///
    /// # Panics
    ///
    /// Panics if the span is out of range or `start` is past `end`.
    pub fn erase_edge_span(
        &mut self,
        start: EdgeCursor,
        end: Option<EdgeCursor>,
    ) -> Option<EdgeCursor> {
        let end = end.map_or(self.edges.len(), |cursor| cursor.index);
        assert!(
            start.index <= end && end <= self.edges.len(),
            "edge cursor span out of range"
        );
        self.edges.drain(start.index..end);
        (start.index < self.edges.len()).then_some(start)
    }

    /// Whether `value` is a node of the graph.
    #[must_use]
    pub fn is_node(&self, value: &N) -> bool {
        self.nodes.contains(value)
    }

    /// Whether at least one edge goes from `src` to `dst`, weighted or not.
    ///
    /// # Errors
    ///
    /// [`GraphError::NodeNotFound`] if either endpoint is not a node.
    pub fn is_connected(&self, src: &N, dst: &N) -> GraphResult<bool> {
        if !self.nodes.contains(src) || !self.nodes.contains(dst) {
            return Err(GraphError::node_not_found("is_connected"));
        }
        Ok(!self.pair_range(src, dst).is_empty())
    }

    /// All node values in ascending order.
    #[must_use]
    pub fn nodes(&self) -> Vec<N>
    where
        N: Clone,
    {
        self.nodes.iter().cloned().collect()
    }

    /// All edges from `src` to `dst`, ordered by weight-or-absence ascending.
    ///
    /// The returned edges are owned snapshots: they stay valid if the graph
    /// is mutated afterwards, but do not reflect those mutations.
    ///
    /// # Errors
    ///
    /// [`GraphError::NodeNotFound`] if either endpoint is not a node.
    pub fn edges(&self, src: &N, dst: &N) -> GraphResult<Vec<Edge<N, E>>>
    where
        N: Clone,
        E: Clone,
    {
        if !self.nodes.contains(src) || !self.nodes.contains(dst) {
            return Err(GraphError::node_not_found("edges"));
        }
        Ok(self.edges[self.pair_range(src, dst)].to_vec())
    }

    /// The position of the edge matching the exact
    /// `(src, dst, weight-or-absence)` triple, or `None`.
    ///
    /// Total: absent endpoints simply yield `None`.
    #[must_use]
    pub fn find(&self, src: &N, dst: &N, weight: Option<&E>) -> Option<EdgeCursor> {
        let probe = (src, dst, weight);
        self.edges
            .binary_search_by(|edge| edge.key().cmp(&probe))
            .ok()
            .map(|index| EdgeCursor { index })
    }

    /// The distinct nodes reachable from `src` in one hop, ascending.
    ///
    /// # Errors
    ///
    /// [`GraphError::NodeNotFound`] if `src` is not a node.
    pub fn connections(&self, src: &N) -> GraphResult<Vec<N>>
    where
        N: Clone,
    {
        if !self.nodes.contains(src) {
            return Err(GraphError::node_not_found("connections"));
        }
        // Outgoing edges are contiguous and target-ascending in the
        // canonical order, so duplicates are adjacent.
        let mut targets: Vec<N> = self
            .edges
            .iter()
            .filter(|edge| edge.source() == src)
            .map(|edge| edge.target().clone())
            .collect();
        targets.dedup();
        Ok(targets)
    }

    /// The contiguous index range of edges from `src` to `dst`.
    fn pair_range(&self, src: &N, dst: &N) -> Range<usize> {
        let start = self.edges.partition_point(|edge| (edge.source(), edge.target()) < (src, dst));
        let end = self.edges.partition_point(|edge| (edge.source(), edge.target()) <= (src, dst));
        start..end
    }
}

impl<N, E> Default for Graph<N, E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Collect node values into a graph with no edges; duplicates collapse.
impl<N: Ord, E> FromIterator<N> for Graph<N, E> {
    fn from_iter<I: IntoIterator<Item = N>>(iter: I) -> Self {
        Self { nodes: iter.into_iter().collect(), edges: Vec::new() }
    }
}

/// Insert node values in bulk; duplicates collapse.
impl<N: Ord, E> Extend<N> for Graph<N, E> {
    fn extend<I: IntoIterator<Item = N>>(&mut self, iter: I) {
        self.nodes.extend(iter);
    }
}

impl<'g, N, E> IntoIterator for &'g Graph<N, E> {
    type Item = EdgeView<'g, N, E>;
    type IntoIter = EdgeIter<'g, N, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(feature = "serde")]
impl<'de, N, E> Deserialize<'de> for Graph<N, E>
where
    N: Deserialize<'de> + Ord,
    E: Deserialize<'de> + Ord,
{
    /// Deserializes the raw node set and edge list, then re-establishes the
    /// container invariants: the edges are sorted into canonical order,
    /// duplicate uniqueness keys collapse to the first occurrence, and any
    /// edge endpoint missing from the node set fails deserialization.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Parts<N: Ord, E> {
            nodes: BTreeSet<N>,
            edges: Vec<Edge<N, E>>,
        }

        let Parts { nodes, mut edges } = Parts::<N, E>::deserialize(deserializer)?;
        edges.sort_unstable();
        edges.dedup();
        for edge in &edges {
            if !nodes.contains(edge.source()) || !nodes.contains(edge.target()) {
                return Err(serde::de::Error::custom(
                    "graph edge endpoint is not in the node set",
                ));
            }
        }
        Ok(Self { nodes, edges })
    }
}

impl<N: Ord + fmt::Display, E: fmt::Display> fmt::Display for Graph<N, E> {
    /// Renders the whole graph: a leading newline, then one block per node in
    /// ascending order listing its outgoing edges (targets ascending, then
    /// weight-or-absence ascending), each edge line indented by two spaces.
    /// Nodes without outgoing edges render an empty block.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        for node in &self.nodes {
            writeln!(f, "{node} (")?;
            for edge in self.edges.iter().filter(|edge| edge.source() == node) {
                writeln!(f, "  {edge}")?;
            }
            writeln!(f, ")")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Graph<&'static str, i32> {
        let mut g: Graph<&str, i32> = ["A", "B", "C"].into_iter().collect();
        g.insert_edge("A", "B", 3).expect("nodes exist");
        g.insert_edge("B", "C", None).expect("nodes exist");
        g
    }

    fn is_canonically_sorted<N: Ord, E: Ord>(g: &Graph<N, E>) -> bool {
        g.edges.windows(2).all(|pair| pair[0] < pair[1])
    }

    #[test]
    fn insert_edge_keeps_edges_sorted_and_unique() {
        let mut g: Graph<i32, i32> = [1, 2, 3].into_iter().collect();
        for (src, dst, w) in [(3, 1, Some(7)), (1, 2, Some(5)), (1, 2, None), (2, 2, Some(0))] {
            assert!(g.insert_edge(src, dst, w).expect("nodes exist"));
        }
        assert!(!g.insert_edge(1, 2, 5).expect("nodes exist"));
        assert!(is_canonically_sorted(&g));
        assert_eq!(g.edge_count(), 4);
    }

    #[test]
    fn failed_insert_edge_changes_nothing() {
        let mut g = sample();
        let before = g.clone();
        assert_eq!(
            g.insert_edge("A", "Z", 1),
            Err(GraphError::node_not_found("insert_edge"))
        );
        assert_eq!(g, before);
    }

    #[test]
    fn replace_node_rebinds_self_loops() {
        let mut g: Graph<&str, i32> = ["A", "B"].into_iter().collect();
        g.insert_edge("A", "A", 1).expect("nodes exist");
        g.insert_edge("A", "B", 2).expect("nodes exist");
        assert!(g.replace_node(&"A", "Z").expect("A exists"));
        assert_eq!(g.nodes(), vec!["B", "Z"]);
        assert!(g.find(&"Z", &"Z", Some(&1)).is_some());
        assert!(g.find(&"Z", &"B", Some(&2)).is_some());
        assert!(is_canonically_sorted(&g));
    }

    #[test]
    fn merge_keeps_first_pre_merge_occurrence() {
        let mut g: Graph<&str, i32> = ["A", "B", "C"].into_iter().collect();
        g.insert_edge("A", "C", 1).expect("nodes exist");
        g.insert_edge("B", "C", 1).expect("nodes exist");
        g.insert_edge("A", "A", 4).expect("nodes exist");
        g.merge_replace_node(&"A", &"B").expect("both exist");

        // A stays a node; its edges are folded onto B and deduplicated.
        assert!(g.is_node(&"A"));
        assert_eq!(g.edge_count(), 2);
        assert!(g.find(&"B", &"C", Some(&1)).is_some());
        assert!(g.find(&"B", &"B", Some(&4)).is_some());
        assert!(is_canonically_sorted(&g));
    }

    #[test]
    fn erase_node_cascades_exactly() {
        let mut g: Graph<&str, i32> = ["A", "B", "C"].into_iter().collect();
        g.insert_edge("A", "B", 1).expect("nodes exist");
        g.insert_edge("B", "A", 2).expect("nodes exist");
        g.insert_edge("A", "C", 3).expect("nodes exist");
        assert!(g.erase_node(&"B"));
        assert!(!g.erase_node(&"B"));
        assert_eq!(g.edge_count(), 1);
        assert!(g.find(&"A", &"C", Some(&3)).is_some());
    }

    #[test]
    fn pair_range_is_weight_ascending() {
        let mut g: Graph<&str, i32> = ["A", "B"].into_iter().collect();
        g.insert_edge("A", "B", 6).expect("nodes exist");
        g.insert_edge("A", "B", None).expect("nodes exist");
        g.insert_edge("A", "B", 3).expect("nodes exist");
        let weights: Vec<Option<i32>> = g
            .edges(&"A", &"B")
            .expect("nodes exist")
            .iter()
            .map(|edge| edge.weight().copied())
            .collect();
        assert_eq!(weights, vec![None, Some(3), Some(6)]);
    }

    #[test]
    fn extend_collapses_duplicates() {
        let mut g: Graph<i32, i32> = Graph::new();
        g.extend([3, 1, 3, 2, 1]);
        assert_eq!(g.nodes(), vec![1, 2, 3]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip() {
        let mut g: Graph<String, i32> = ["A", "B"].map(String::from).into_iter().collect();
        g.insert_edge("A".into(), "B".into(), 3).expect("nodes exist");
        g.insert_edge("A".into(), "B".into(), None).expect("nodes exist");

        let json = serde_json::to_string(&g).expect("serialize");
        let back: Graph<String, i32> = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, g);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializing_restores_canonical_order() {
        // Edges out of order and with a duplicated uniqueness key.
        let json = r#"{
            "nodes": ["A", "B", "C"],
            "edges": [
                {"Weighted": {"source": "B", "target": "C", "weight": 5}},
                {"Weighted": {"source": "A", "target": "B", "weight": 1}},
                {"Weighted": {"source": "B", "target": "C", "weight": 5}}
            ]
        }"#;
        let mut g: Graph<String, i32> = serde_json::from_str(json).expect("deserialize");

        assert_eq!(g.edge_count(), 2);
        // Binary-search lookups work, so the collection really is canonical.
        assert!(g.find(&"B".to_owned(), &"C".to_owned(), Some(&5)).is_some());
        assert!(g.find(&"A".to_owned(), &"B".to_owned(), Some(&1)).is_some());
        // Reinserting an existing key is the usual no-op, not a duplicate.
        assert!(!g.insert_edge("B".into(), "C".into(), 5).expect("nodes exist"));
        assert_eq!(g.edge_count(), 2);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializing_rejects_unknown_endpoints() {
        let json = r#"{
            "nodes": ["A"],
            "edges": [{"Unweighted": {"source": "A", "target": "Z"}}]
        }"#;
        let result: Result<Graph<String, i32>, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
