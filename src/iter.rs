//! Read-only iteration over a graph's edge collection.
//!
//! [`EdgeIter`] walks the canonically ordered edge collection of a
//! [`Graph`](crate::Graph) in either direction and yields a cheap borrowed
//! [`EdgeView`] per position. Because the iterator borrows the graph, the
//! borrow checker rules out iterating across a structural mutation.

use std::iter::FusedIterator;
use std::slice;

use crate::edge::Edge;

/// A borrowed view of one edge position: source, target, and the weight if
/// the edge carries one.
///
/// Views are `Copy` and detached from iterator state; they stay usable for as
/// long as the graph is borrowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeView<'g, N, E> {
    /// The node the edge leaves from.
    pub from: &'g N,
    /// The node the edge points at.
    pub to: &'g N,
    /// The weight, or `None` for an unweighted edge.
    pub weight: Option<&'g E>,
}

impl<'g, N, E> From<&'g Edge<N, E>> for EdgeView<'g, N, E> {
    #[inline]
    fn from(edge: &'g Edge<N, E>) -> Self {
        Self { from: edge.source(), to: edge.target(), weight: edge.weight() }
    }
}

/// A double-ended iterator over a graph's edges in canonical order.
///
/// Produced by [`Graph::iter`](crate::Graph::iter) or by iterating `&Graph`.
/// The default-constructed iterator is empty and yields nothing.
///
/// # Example
///
/// ```
/// use ordered_digraph::Graph;
///
/// let mut g: Graph<i32, i32> = [2, 1].into_iter().collect();
/// g.insert_edge(1, 2, 4)?;
/// g.insert_edge(2, 1, None)?;
///
/// let mut iter = g.iter();
/// assert_eq!(iter.next().map(|e| (*e.from, *e.to)), Some((1, 2)));
/// assert_eq!(iter.next_back().map(|e| (*e.from, *e.to)), Some((2, 1)));
/// assert_eq!(iter.next(), None);
/// # Ok::<(), ordered_digraph::GraphError>(())
/// ```
#[derive(Debug, Clone)]
pub struct EdgeIter<'g, N, E> {
    inner: slice::Iter<'g, Edge<N, E>>,
}

impl<'g, N, E> EdgeIter<'g, N, E> {
    #[inline]
    pub(crate) fn new(edges: &'g [Edge<N, E>]) -> Self {
        Self { inner: edges.iter() }
    }
}

impl<N, E> Default for EdgeIter<'_, N, E> {
    #[inline]
    fn default() -> Self {
        Self { inner: slice::Iter::default() }
    }
}

impl<'g, N, E> Iterator for EdgeIter<'g, N, E> {
    type Item = EdgeView<'g, N, E>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(EdgeView::from)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<N, E> DoubleEndedIterator for EdgeIter<'_, N, E> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(EdgeView::from)
    }
}

impl<N, E> ExactSizeIterator for EdgeIter<'_, N, E> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<N, E> FusedIterator for EdgeIter<'_, N, E> {}
