//! Generic mutable graph container.
//!
//! A [`Graph<V, E, F>`](Graph) stores vertices of type `V` and edges of type `E`, minting new
//! edges through an [`EdgeFactory`] `F`. Directedness and whether loops / parallel edges are
//! permitted are fixed by [`GraphOptions`] at construction time.
//!
//! The graph is the only authority on an edge's endpoints: use [`Graph::edge_source`] and
//! [`Graph::edge_target`] rather than reading them off the edge value.
//!
//! ```
//! use kestrel_graph::{GraphOptions, KeyedGraph};
//!
//! let mut g: KeyedGraph<&str> = KeyedGraph::keyed(GraphOptions::simple_directed());
//! g.add_vertex("a");
//! g.add_vertex("b");
//!
//! let e = g.add_edge(&"a", &"b").unwrap().expect("pair is free");
//! assert_eq!(g.edge_source(&e).unwrap(), &"a");
//!
//! // A second a -> b edge is refused, not an error.
//! assert_eq!(g.add_edge(&"a", &"b").unwrap(), None);
//! ```

pub mod error;
pub mod graph;

pub use error::{Endpoint, GraphError, Result};
pub use graph::{EdgeFactory, EdgeKey, EdgeKeyFactory, Graph, GraphOptions, KeyedGraph};
