//! Edge construction.

use super::EdgeKey;

/// Mints new edge values for [`Graph::add_edge`](super::Graph::add_edge).
///
/// The factory is only consulted after the graph has accepted the endpoint pair, so it is
/// never called for an insertion that the loop / parallel-edge policy rejects. Edges it
/// returns must be stable map keys: two calls that should yield distinct edges must return
/// values that compare unequal.
pub trait EdgeFactory<V, E> {
    fn create_edge(&mut self, source: &V, target: &V) -> E;
}

impl<V, E, F> EdgeFactory<V, E> for F
where
    F: FnMut(&V, &V) -> E,
{
    fn create_edge(&mut self, source: &V, target: &V) -> E {
        self(source, target)
    }
}

/// Mints [`EdgeKey`]s with a monotonically increasing serial.
#[derive(Debug, Clone, Default)]
pub struct EdgeKeyFactory {
    next_serial: u64,
}

impl EdgeKeyFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serial that the next minted key will carry.
    pub fn next_serial(&self) -> u64 {
        self.next_serial
    }
}

impl<V: Clone> EdgeFactory<V, EdgeKey<V>> for EdgeKeyFactory {
    fn create_edge(&mut self, source: &V, target: &V) -> EdgeKey<V> {
        let serial = self.next_serial;
        self.next_serial = self.next_serial.wrapping_add(1);
        EdgeKey {
            v: source.clone(),
            w: target.clone(),
            serial,
        }
    }
}
