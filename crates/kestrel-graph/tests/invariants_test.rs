//! Property tests: random operation sequences must never break the container's structural
//! invariants (no dangling edges, loop / parallel-edge policy, incidence consistency).

use std::collections::BTreeSet;

use proptest::{
    collection::vec,
    prelude::{Just, Strategy, prop_assert, prop_assert_eq, prop_oneof},
    proptest,
    test_runner::Config as ProptestConfig,
};

use kestrel_graph::{GraphOptions, KeyedGraph};

const VERTEX_DOMAIN: u8 = 6;

#[derive(Debug, Clone)]
enum Op {
    AddVertex(u8),
    AddEdge(u8, u8),
    RemoveVertex(u8),
    RemoveEdgeBetween(u8, u8),
    RemoveNthEdge(usize),
}

fn options_strategy() -> impl Strategy<Value = GraphOptions> {
    prop_oneof![
        Just(GraphOptions::simple()),
        Just(GraphOptions::multigraph()),
        Just(GraphOptions::pseudograph()),
        Just(GraphOptions::simple_directed()),
        Just(GraphOptions::directed_multigraph()),
        Just(GraphOptions::directed_pseudograph()),
    ]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let v = 0..VERTEX_DOMAIN;
    prop_oneof![
        2 => v.clone().prop_map(Op::AddVertex),
        4 => (v.clone(), v.clone()).prop_map(|(s, t)| Op::AddEdge(s, t)),
        1 => v.clone().prop_map(Op::RemoveVertex),
        1 => (v.clone(), v).prop_map(|(s, t)| Op::RemoveEdgeBetween(s, t)),
        1 => (0usize..16).prop_map(Op::RemoveNthEdge),
    ]
}

fn unordered(s: u8, t: u8) -> (u8, u8) {
    if s <= t { (s, t) } else { (t, s) }
}

fn check_invariants(g: &KeyedGraph<u8>) -> Result<(), proptest::test_runner::TestCaseError> {
    let opts = g.options();
    let mut pairs: BTreeSet<(u8, u8)> = BTreeSet::new();

    for e in g.edges() {
        let (s, t) = g.edge_endpoints(e).unwrap();
        prop_assert!(g.contains_vertex(s));
        prop_assert!(g.contains_vertex(t));
        if !opts.loops_allowed {
            prop_assert!(s != t);
        }
        let pair = if opts.directed {
            (*s, *t)
        } else {
            unordered(*s, *t)
        };
        if !opts.multiple_edges_allowed {
            prop_assert!(pairs.insert(pair), "duplicate edge for pair {:?}", pair);
        }
        prop_assert!(g.edges_of(s).contains(&e));
        prop_assert!(g.edges_of(t).contains(&e));
        prop_assert!(g.contains_edge_between(s, t));
        if !opts.directed {
            prop_assert!(g.contains_edge_between(t, s));
        }
    }

    let mut ends = 0usize;
    for v in g.vertices() {
        ends += g.degree_of(v);
        for e in g.edges_of(v) {
            prop_assert!(g.contains_edge(e));
        }
    }
    prop_assert_eq!(ends, 2 * g.edge_count());
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn random_operations_preserve_invariants(
        options in options_strategy(),
        ops in vec(op_strategy(), 0..64),
    ) {
        let mut g: KeyedGraph<u8> = KeyedGraph::keyed(options);
        let mut model: BTreeSet<u8> = BTreeSet::new();

        for op in ops {
            match op {
                Op::AddVertex(v) => {
                    prop_assert_eq!(g.add_vertex(v), model.insert(v));
                }
                Op::AddEdge(s, t) => {
                    let edges_before = g.edge_count();
                    match g.add_edge(&s, &t) {
                        Ok(Some(e)) => {
                            prop_assert_eq!(g.edge_source(&e), Ok(&s));
                            prop_assert_eq!(g.edge_target(&e), Ok(&t));
                            prop_assert_eq!(g.edge_count(), edges_before + 1);
                        }
                        Ok(None) => prop_assert_eq!(g.edge_count(), edges_before),
                        Err(_) => {
                            prop_assert!(!model.contains(&s) || !model.contains(&t));
                            prop_assert_eq!(g.edge_count(), edges_before);
                        }
                    }
                }
                Op::RemoveVertex(v) => {
                    prop_assert_eq!(g.remove_vertex(&v), model.remove(&v));
                    prop_assert!(g.edges_of(&v).is_empty());
                }
                Op::RemoveEdgeBetween(s, t) => {
                    let expected = g.get_edge(&s, &t).cloned();
                    prop_assert_eq!(g.remove_edge_between(&s, &t), expected.clone());
                    if let Some(e) = expected {
                        prop_assert!(!g.contains_edge(&e));
                    }
                }
                Op::RemoveNthEdge(n) => {
                    let nth = g.edges().nth(n).cloned();
                    if let Some(e) = nth {
                        prop_assert!(g.remove_edge(&e));
                        prop_assert!(!g.remove_edge(&e));
                    }
                }
            }

            prop_assert_eq!(g.vertices().copied().collect::<BTreeSet<_>>(), model.clone());
            check_invariants(&g)?;
        }
    }
}
