//! Edge key types.
//!
//! [`EdgeKey`] is the default edge type minted by [`EdgeKeyFactory`](super::EdgeKeyFactory): the
//! endpoints it was created for plus a serial that keeps parallel edges distinct. The graph
//! never reads `v`/`w` back; endpoints are always resolved from the graph's own records.
//!
//! `PairKey` / `PairView` key the internal source-target index.

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey<V> {
    pub v: V,
    pub w: V,
    pub serial: u64,
}

impl<V> EdgeKey<V> {
    pub fn new(v: impl Into<V>, w: impl Into<V>, serial: u64) -> Self {
        Self {
            v: v.into(),
            w: w.into(),
            serial,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(in crate::graph) struct PairKey<V> {
    pub(in crate::graph) source: V,
    pub(in crate::graph) target: V,
}

/// Borrowed form of [`PairKey`] so lookups do not clone vertices.
#[derive(Hash)]
pub(in crate::graph) struct PairView<'a, V> {
    pub(in crate::graph) source: &'a V,
    pub(in crate::graph) target: &'a V,
}

impl<V> Clone for PairView<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for PairView<'_, V> {}

impl<'a, V: Eq> hashbrown::Equivalent<PairKey<V>> for PairView<'a, V> {
    fn equivalent(&self, key: &PairKey<V>) -> bool {
        key.source == *self.source && key.target == *self.target
    }
}

impl<'a, V: Clone> PairView<'a, V> {
    pub(in crate::graph) fn to_key(self) -> PairKey<V> {
        PairKey {
            source: self.source.clone(),
            target: self.target.clone(),
        }
    }
}
