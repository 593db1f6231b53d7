//! Internal storage entries for [`Graph`](super::Graph).

use rustc_hash::FxBuildHasher;

type IndexSet<T> = indexmap::IndexSet<T, FxBuildHasher>;

/// Incidence record of one vertex.
///
/// An edge is listed in `outgoing` of the vertex recorded as its source and in `incoming` of
/// the vertex recorded as its target, regardless of directedness. A loop sits in both sets of
/// the same vertex.
#[derive(Debug, Clone)]
pub(in crate::graph) struct VertexEntry<E> {
    pub(in crate::graph) outgoing: IndexSet<E>,
    pub(in crate::graph) incoming: IndexSet<E>,
}

impl<E> Default for VertexEntry<E> {
    fn default() -> Self {
        Self {
            outgoing: IndexSet::default(),
            incoming: IndexSet::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub(in crate::graph) struct EdgeEntry<V> {
    pub(in crate::graph) source: V,
    pub(in crate::graph) target: V,
}

impl<V: PartialEq> EdgeEntry<V> {
    pub(in crate::graph) fn is_loop(&self) -> bool {
        self.source == self.target
    }

    /// The endpoint across from `v`, or `None` if `v` is not an endpoint.
    pub(in crate::graph) fn opposite(&self, v: &V) -> Option<&V> {
        if self.source == *v {
            Some(&self.target)
        } else if self.target == *v {
            Some(&self.source)
        } else {
            None
        }
    }
}
