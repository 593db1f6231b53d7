//! The core [`Graph`] container.
//!
//! Three structures are kept in lockstep:
//!
//! - `vertices`: insertion-ordered map from vertex to its incidence record,
//! - `edges`: insertion-ordered map from edge to its recorded endpoints,
//! - `pairs`: endpoint pair to the edges joining it, oldest first.
//!
//! For undirected graphs a pair is stored with the earlier-inserted vertex first, so `(a, b)`
//! and `(b, a)` land in the same bucket. Removal only uses order-preserving operations
//! (`shift_remove`, `retain`), which keeps the relative order of surviving vertices stable and
//! therefore keeps every stored pair key canonical.
//!
//! Cascading and batch removals detach all affected edges in a single pass over the edge map,
//! so removing a vertex costs O(|V| + |E|) whatever its degree.

mod edge_key;
mod entries;
mod factory;
mod options;

pub use edge_key::EdgeKey;
pub use factory::{EdgeFactory, EdgeKeyFactory};
pub use options::GraphOptions;

use std::borrow::Borrow;
use std::hash::Hash;

use edge_key::{PairKey, PairView};
use entries::{EdgeEntry, VertexEntry};
use rustc_hash::FxBuildHasher;

use crate::error::{Endpoint, GraphError, Result};

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;
type IndexMap<K, V> = indexmap::IndexMap<K, V, FxBuildHasher>;
type IndexSet<T> = indexmap::IndexSet<T, FxBuildHasher>;

/// Graph whose edges are [`EdgeKey`]s minted by an [`EdgeKeyFactory`].
pub type KeyedGraph<V> = Graph<V, EdgeKey<V>, EdgeKeyFactory>;

#[derive(Debug, Clone)]
pub struct Graph<V, E, F> {
    options: GraphOptions,
    factory: F,

    vertices: IndexMap<V, VertexEntry<E>>,
    edges: IndexMap<E, EdgeEntry<V>>,
    pairs: HashMap<PairKey<V>, Vec<E>>,
}

impl<V> Graph<V, EdgeKey<V>, EdgeKeyFactory>
where
    V: Clone + Eq + Hash,
{
    pub fn keyed(options: GraphOptions) -> Self {
        Self::new(options, EdgeKeyFactory::new())
    }
}

impl<V, E, F> Graph<V, E, F>
where
    V: Clone + Eq + Hash,
    E: Clone + Eq + Hash,
{
    pub fn new(options: GraphOptions, factory: F) -> Self {
        Self {
            options,
            factory,
            vertices: IndexMap::default(),
            edges: IndexMap::default(),
            pairs: HashMap::default(),
        }
    }

    pub fn options(&self) -> GraphOptions {
        self.options
    }

    pub fn is_directed(&self) -> bool {
        self.options.directed
    }

    pub fn loops_allowed(&self) -> bool {
        self.options.loops_allowed
    }

    pub fn multiple_edges_allowed(&self) -> bool {
        self.options.multiple_edges_allowed
    }

    pub fn edge_factory(&self) -> &F {
        &self.factory
    }

    pub fn edge_factory_mut(&mut self) -> &mut F {
        &mut self.factory
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = &V> {
        self.vertices.keys()
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &E> {
        self.edges.keys()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.edges.clear();
        self.pairs.clear();
    }

    fn pair_view<'a>(&self, source: &'a V, target: &'a V) -> PairView<'a, V> {
        if !self.options.directed {
            let s_ix = self.vertices.get_index_of(source);
            let t_ix = self.vertices.get_index_of(target);
            if let (Some(s_ix), Some(t_ix)) = (s_ix, t_ix) {
                if t_ix < s_ix {
                    return PairView {
                        source: target,
                        target: source,
                    };
                }
            }
        }
        PairView { source, target }
    }

    /// Returns `Ok(false)` when the loop / parallel-edge policy rejects the pair.
    fn admits_edge(&self, source: &V, target: &V) -> Result<bool> {
        if !self.vertices.contains_key(source) {
            return Err(GraphError::VertexNotFound {
                endpoint: Endpoint::Source,
            });
        }
        if !self.vertices.contains_key(target) {
            return Err(GraphError::VertexNotFound {
                endpoint: Endpoint::Target,
            });
        }
        if !self.options.loops_allowed && source == target {
            tracing::debug!("loop rejected: loops are not allowed");
            return Ok(false);
        }
        if !self.options.multiple_edges_allowed
            && self.pairs.contains_key(&self.pair_view(source, target))
        {
            tracing::debug!("edge rejected: vertex pair is already connected");
            return Ok(false);
        }
        Ok(true)
    }

    /// Records `edge` between two member vertices that already passed [`Self::admits_edge`].
    fn insert_edge(&mut self, source: &V, target: &V, edge: E) -> bool {
        if self.edges.contains_key(&edge) {
            tracing::debug!("edge rejected: instance is already in the graph");
            return false;
        }

        let key = self.pair_view(source, target).to_key();
        self.pairs.entry(key).or_default().push(edge.clone());
        if let Some(entry) = self.vertices.get_mut(source) {
            entry.outgoing.insert(edge.clone());
        }
        if let Some(entry) = self.vertices.get_mut(target) {
            entry.incoming.insert(edge.clone());
        }
        self.edges.insert(
            edge,
            EdgeEntry {
                source: source.clone(),
                target: target.clone(),
            },
        );
        tracing::trace!(edge_count = self.edges.len(), "edge added");
        true
    }

    /// Drops `edge` from the adjacency records and the pair index. Both endpoints must still
    /// be members so the pair key can be canonicalized.
    fn detach_edge(&mut self, edge: &E, entry: &EdgeEntry<V>) {
        if let Some(v) = self.vertices.get_mut(&entry.source) {
            v.outgoing.shift_remove(edge);
        }
        if let Some(v) = self.vertices.get_mut(&entry.target) {
            v.incoming.shift_remove(edge);
        }

        let view = self.pair_view(&entry.source, &entry.target);
        let now_empty = match self.pairs.get_mut(&view) {
            Some(bucket) => {
                if let Some(pos) = bucket.iter().position(|e| e == edge) {
                    bucket.remove(pos);
                }
                bucket.is_empty()
            }
            None => false,
        };
        if now_empty {
            self.pairs.remove(&view);
        }
    }

    /// Removes every member edge in `doomed` from all three structures, visiting the edge map
    /// once and each touched incidence set and pair bucket once. Endpoints must still be
    /// members. Returns the number of edges removed.
    fn detach_edges(&mut self, doomed: &IndexSet<E>) -> usize {
        let mut touched: IndexSet<V> = IndexSet::default();
        let mut pair_keys: IndexSet<PairKey<V>> = IndexSet::default();
        for edge in doomed {
            if let Some(entry) = self.edges.get(edge) {
                pair_keys.insert(self.pair_view(&entry.source, &entry.target).to_key());
                touched.insert(entry.source.clone());
                touched.insert(entry.target.clone());
            }
        }
        if touched.is_empty() {
            return 0;
        }

        let before = self.edges.len();
        self.edges.retain(|e, _| !doomed.contains(e));

        for v in &touched {
            if let Some(entry) = self.vertices.get_mut(v) {
                entry.outgoing.retain(|e| !doomed.contains(e));
                entry.incoming.retain(|e| !doomed.contains(e));
            }
        }

        for key in &pair_keys {
            let now_empty = match self.pairs.get_mut(key) {
                Some(bucket) => {
                    bucket.retain(|e| !doomed.contains(e));
                    bucket.is_empty()
                }
                None => false,
            };
            if now_empty {
                self.pairs.remove(key);
            }
        }

        before - self.edges.len()
    }

    /// Inserts `vertex`; returns `false` if it was already a member.
    pub fn add_vertex(&mut self, vertex: V) -> bool {
        if self.vertices.contains_key(&vertex) {
            return false;
        }
        self.vertices.insert(vertex, VertexEntry::default());
        tracing::trace!(vertex_count = self.vertices.len(), "vertex added");
        true
    }

    /// Creates an edge from `source` to `target` with the graph's edge factory.
    ///
    /// Both vertices must already be members, otherwise [`GraphError::VertexNotFound`] is
    /// returned. `Ok(None)` means the graph refused the edge and is unchanged: the pair is
    /// a loop and loops are disallowed, the pair is already connected and parallel edges are
    /// disallowed, or the factory produced an edge that is already a member.
    pub fn add_edge(&mut self, source: &V, target: &V) -> Result<Option<E>>
    where
        F: EdgeFactory<V, E>,
    {
        if !self.admits_edge(source, target)? {
            return Ok(None);
        }
        let edge = self.factory.create_edge(source, target);
        if !self.insert_edge(source, target, edge.clone()) {
            return Ok(None);
        }
        Ok(Some(edge))
    }

    /// Inserts a caller-supplied edge. Same preconditions and policy checks as
    /// [`Self::add_edge`]; the factory is not consulted.
    pub fn add_edge_with(&mut self, source: &V, target: &V, edge: E) -> Result<bool> {
        if !self.admits_edge(source, target)? {
            return Ok(false);
        }
        Ok(self.insert_edge(source, target, edge))
    }

    /// The oldest edge joining `source` and `target`. Undirected graphs match either
    /// orientation.
    pub fn get_edge(&self, source: &V, target: &V) -> Option<&E> {
        self.pairs
            .get(&self.pair_view(source, target))
            .and_then(|bucket| bucket.first())
    }

    /// All edges joining `source` and `target`, oldest first.
    pub fn edges_between(&self, source: &V, target: &V) -> Vec<&E> {
        self.pairs
            .get(&self.pair_view(source, target))
            .map(|bucket| bucket.iter().collect())
            .unwrap_or_default()
    }

    pub fn contains_edge_between(&self, source: &V, target: &V) -> bool {
        self.pairs.contains_key(&self.pair_view(source, target))
    }

    pub fn contains_edge(&self, edge: &E) -> bool {
        self.edges.contains_key(edge)
    }

    pub fn contains_vertex(&self, vertex: &V) -> bool {
        self.vertices.contains_key(vertex)
    }

    /// Every edge touching `vertex`.
    ///
    /// Directed graphs list outgoing edges first, then incoming ones. A loop is listed once.
    /// Unknown vertices yield an empty list.
    pub fn edges_of(&self, vertex: &V) -> Vec<&E> {
        let Some(entry) = self.vertices.get(vertex) else {
            return Vec::new();
        };
        let mut out: Vec<&E> = Vec::with_capacity(entry.outgoing.len() + entry.incoming.len());
        out.extend(entry.outgoing.iter());
        out.extend(
            entry
                .incoming
                .iter()
                .filter(|e| !entry.outgoing.contains(*e)),
        );
        out
    }

    /// Edges leaving `vertex`. Same as [`Self::edges_of`] for undirected graphs.
    pub fn outgoing_edges_of(&self, vertex: &V) -> Vec<&E> {
        if !self.options.directed {
            return self.edges_of(vertex);
        }
        self.vertices
            .get(vertex)
            .map(|entry| entry.outgoing.iter().collect())
            .unwrap_or_default()
    }

    /// Edges entering `vertex`. Same as [`Self::edges_of`] for undirected graphs.
    pub fn incoming_edges_of(&self, vertex: &V) -> Vec<&E> {
        if !self.options.directed {
            return self.edges_of(vertex);
        }
        self.vertices
            .get(vertex)
            .map(|entry| entry.incoming.iter().collect())
            .unwrap_or_default()
    }

    /// Number of edge ends at `vertex`; a loop counts twice.
    pub fn degree_of(&self, vertex: &V) -> usize {
        self.vertices
            .get(vertex)
            .map(|entry| entry.outgoing.len() + entry.incoming.len())
            .unwrap_or(0)
    }

    /// Distinct vertices sharing an edge with `vertex`, in order of first incident edge.
    pub fn adjacent_vertices_of(&self, vertex: &V) -> Vec<&V> {
        let mut out: IndexSet<&V> = IndexSet::default();
        for edge in self.edges_of(vertex) {
            if let Some(other) = self.edges.get(edge).and_then(|e| e.opposite(vertex)) {
                out.insert(other);
            }
        }
        out.into_iter().collect()
    }

    pub fn successors(&self, vertex: &V) -> Vec<&V> {
        if !self.options.directed {
            return self.adjacent_vertices_of(vertex);
        }
        let Some(entry) = self.vertices.get(vertex) else {
            return Vec::new();
        };
        let mut out: IndexSet<&V> = IndexSet::default();
        for edge in &entry.outgoing {
            if let Some(e) = self.edges.get(edge) {
                out.insert(&e.target);
            }
        }
        out.into_iter().collect()
    }

    pub fn predecessors(&self, vertex: &V) -> Vec<&V> {
        if !self.options.directed {
            return self.adjacent_vertices_of(vertex);
        }
        let Some(entry) = self.vertices.get(vertex) else {
            return Vec::new();
        };
        let mut out: IndexSet<&V> = IndexSet::default();
        for edge in &entry.incoming {
            if let Some(e) = self.edges.get(edge) {
                out.insert(&e.source);
            }
        }
        out.into_iter().collect()
    }

    pub fn edge_source(&self, edge: &E) -> Result<&V> {
        self.edges
            .get(edge)
            .map(|e| &e.source)
            .ok_or(GraphError::EdgeNotFound)
    }

    pub fn edge_target(&self, edge: &E) -> Result<&V> {
        self.edges
            .get(edge)
            .map(|e| &e.target)
            .ok_or(GraphError::EdgeNotFound)
    }

    pub fn edge_endpoints(&self, edge: &E) -> Result<(&V, &V)> {
        self.edges
            .get(edge)
            .map(|e| (&e.source, &e.target))
            .ok_or(GraphError::EdgeNotFound)
    }

    /// Removes `edge`; returns `false` if it was not a member.
    pub fn remove_edge(&mut self, edge: &E) -> bool {
        let Some((edge, entry)) = self.edges.shift_remove_entry(edge) else {
            return false;
        };
        self.detach_edge(&edge, &entry);
        tracing::trace!(
            edge_count = self.edges.len(),
            is_loop = entry.is_loop(),
            "edge removed"
        );
        true
    }

    /// Removes and returns the oldest edge joining `source` and `target`.
    pub fn remove_edge_between(&mut self, source: &V, target: &V) -> Option<E> {
        let edge = self.get_edge(source, target)?.clone();
        self.remove_edge(&edge).then_some(edge)
    }

    /// Removes every listed edge that is a member. Returns `true` if the graph changed.
    ///
    /// The whole batch is detached in one pass over the edge map, so the cost does not grow
    /// with the number of listed edges times the graph size.
    pub fn remove_edges<I>(&mut self, edges: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<E>,
    {
        let doomed: IndexSet<E> = edges
            .into_iter()
            .map(|e| {
                let e: &E = e.borrow();
                e.clone()
            })
            .filter(|e| self.edges.contains_key(e))
            .collect();
        let removed_edges = self.detach_edges(&doomed);
        if removed_edges > 0 {
            tracing::trace!(
                removed_edges,
                edge_count = self.edges.len(),
                "edges removed"
            );
        }
        removed_edges > 0
    }

    /// Removes `vertex` together with every edge touching it.
    pub fn remove_vertex(&mut self, vertex: &V) -> bool {
        let Some(entry) = self.vertices.get(vertex) else {
            return false;
        };
        let incident: IndexSet<E> = entry
            .outgoing
            .iter()
            .chain(entry.incoming.iter())
            .cloned()
            .collect();

        let removed_edges = self.detach_edges(&incident);
        self.vertices.shift_remove(vertex);
        tracing::debug!(
            removed_edges,
            vertex_count = self.vertices.len(),
            "vertex removed"
        );
        true
    }

    /// Removes every listed vertex that is a member, cascading to incident edges. Returns
    /// `true` if the graph changed.
    pub fn remove_vertices<I>(&mut self, vertices: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<V>,
    {
        let doomed: IndexSet<V> = vertices
            .into_iter()
            .map(|v| {
                let v: &V = v.borrow();
                v.clone()
            })
            .filter(|v| self.vertices.contains_key(v))
            .collect();
        if doomed.is_empty() {
            return false;
        }

        let mut incident: IndexSet<E> = IndexSet::default();
        for v in &doomed {
            if let Some(entry) = self.vertices.get(v) {
                incident.extend(entry.outgoing.iter().cloned());
                incident.extend(entry.incoming.iter().cloned());
            }
        }
        let removed_edges = self.detach_edges(&incident);
        self.vertices.retain(|v, _| !doomed.contains(v));
        tracing::debug!(
            removed_vertices = doomed.len(),
            removed_edges,
            vertex_count = self.vertices.len(),
            "vertices removed"
        );
        true
    }

    /// Undirected copy of this graph with the same loop / parallel-edge policy.
    ///
    /// Edges are re-added in insertion order; any edge the undirected policy refuses (for
    /// example the second of two antiparallel edges when parallel edges are disallowed) is
    /// dropped.
    pub fn to_undirected(&self) -> Self
    where
        F: Clone,
    {
        let options = GraphOptions {
            directed: false,
            ..self.options
        };
        let mut out = Self::new(options, self.factory.clone());
        for vertex in self.vertices.keys() {
            out.add_vertex(vertex.clone());
        }

        let mut dropped = 0usize;
        for (edge, entry) in &self.edges {
            if !matches!(
                out.add_edge_with(&entry.source, &entry.target, edge.clone()),
                Ok(true)
            ) {
                dropped += 1;
            }
        }
        if dropped > 0 {
            tracing::debug!(dropped, "edges dropped converting to undirected");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::{GraphOptions, KeyedGraph};

    #[test]
    fn undirected_pair_keys_follow_vertex_insertion_order() {
        let mut g: KeyedGraph<&str> = KeyedGraph::keyed(GraphOptions::simple());
        g.add_vertex("b");
        g.add_vertex("a");
        g.add_edge(&"a", &"b").unwrap();

        let view = g.pair_view(&"a", &"b");
        assert_eq!((*view.source, *view.target), ("b", "a"));
        assert_eq!(g.pairs.len(), 1);
    }

    #[test]
    fn pair_buckets_are_dropped_when_emptied() {
        let mut g: KeyedGraph<u32> = KeyedGraph::keyed(GraphOptions::directed_multigraph());
        g.add_vertex(1);
        g.add_vertex(2);
        let e1 = g.add_edge(&1, &2).unwrap().unwrap();
        let e2 = g.add_edge(&1, &2).unwrap().unwrap();
        assert_eq!(g.pairs.len(), 1);

        assert!(g.remove_edge(&e1));
        assert_eq!(g.pairs.len(), 1);
        assert!(g.remove_edge(&e2));
        assert!(g.pairs.is_empty());
    }

    #[test]
    fn hub_removal_detaches_every_spoke() {
        let mut g: KeyedGraph<u32> = KeyedGraph::keyed(GraphOptions::multigraph());
        for v in 0..=500 {
            g.add_vertex(v);
        }
        for v in 1..=500 {
            g.add_edge(&0, &v).unwrap();
            g.add_edge(&v, &0).unwrap();
        }
        for v in 1..500 {
            g.add_edge(&v, &(v + 1)).unwrap();
        }

        assert!(g.remove_vertex(&0));
        assert_eq!(g.edge_count(), 499);
        assert_eq!(g.pairs.len(), 499);
        for (v, entry) in &g.vertices {
            for e in entry.outgoing.iter().chain(entry.incoming.iter()) {
                let recorded = &g.edges[e];
                assert!(recorded.source == *v || recorded.target == *v);
                assert_ne!(recorded.source, 0);
                assert_ne!(recorded.target, 0);
            }
        }
        for (key, bucket) in &g.pairs {
            assert!(!bucket.is_empty());
            assert_ne!(key.source, 0);
            assert_ne!(key.target, 0);
        }
    }

    #[test]
    fn vertex_removal_leaves_no_stale_incidence() {
        let mut g: KeyedGraph<u32> = KeyedGraph::keyed(GraphOptions::directed_pseudograph());
        for v in 1..=3 {
            g.add_vertex(v);
        }
        g.add_edge(&1, &2).unwrap();
        g.add_edge(&2, &2).unwrap();
        g.add_edge(&3, &2).unwrap();

        assert!(g.remove_vertex(&2));
        for entry in g.vertices.values() {
            assert!(entry.outgoing.is_empty());
            assert!(entry.incoming.is_empty());
        }
        assert!(g.pairs.is_empty());
        assert_eq!(g.edge_count(), 0);
    }
}
