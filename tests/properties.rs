use proptest::prelude::*;
use topolevel::oracle;
use topolevel::{DynamicGraph, GraphConfig, LevelGraph, VertexId};

fn arb_graph() -> impl Strategy<Value = (usize, Vec<(VertexId, VertexId)>)> {
    (1usize..24).prop_flat_map(|n| {
        (
            Just(n),
            prop::collection::vec((0..n, 0..n), 0..120),
        )
    })
}

fn rollback_graph(n: usize) -> LevelGraph {
    LevelGraph::with_vertices(GraphConfig::new().with_rollback(true), n)
}

proptest! {
    #[test]
    fn prop_accepted_edges_stay_ordered((n, edges) in arb_graph(), rollback in any::<bool>()) {
        let mut graph = LevelGraph::with_vertices(GraphConfig::new().with_rollback(rollback), n);
        let mut accepted = Vec::new();

        for (from, to) in edges {
            if graph.add_edge(from, to).unwrap() {
                accepted.push((from, to));
            }
            for &(x, y) in &accepted {
                prop_assert!(graph.level(x).unwrap() < graph.level(y).unwrap());
            }
        }

        prop_assert!(oracle::check_order(n, &graph.topology(), &accepted).is_ok());
    }

    #[test]
    fn prop_rejections_match_reachability((n, edges) in arb_graph(), rollback in any::<bool>()) {
        let mut graph = LevelGraph::with_vertices(GraphConfig::new().with_rollback(rollback), n);
        let mut adjacency = vec![Vec::new(); n];

        for (from, to) in edges {
            let closes_cycle = oracle::reaches(&adjacency, to, from);
            let inserted = graph.add_edge(from, to).unwrap();
            prop_assert_eq!(inserted, !closes_cycle);
            if inserted {
                adjacency[from].push(to);
            }
        }
    }

    #[test]
    fn prop_rollback_leaves_topology_unchanged((n, edges) in arb_graph()) {
        let mut graph = rollback_graph(n);

        for (from, to) in edges {
            let levels = graph.levels();
            let order = graph.topology();
            if !graph.add_edge(from, to).unwrap() {
                prop_assert_eq!(graph.levels(), levels);
                prop_assert_eq!(graph.topology(), order);
            }
        }
    }

    #[test]
    fn prop_levels_never_decrease((n, edges) in arb_graph(), rollback in any::<bool>()) {
        let config = GraphConfig::new().with_rollback(rollback);
        let mut graph = LevelGraph::with_vertices(config, n);

        for (from, to) in edges {
            let before = graph.levels();
            graph.add_edge(from, to).unwrap();
            for (old, new) in before.iter().zip(graph.levels()) {
                prop_assert!(new >= *old);
            }
        }
    }

    #[test]
    fn prop_fast_path_changes_nothing((n, edges) in arb_graph()) {
        let mut graph = rollback_graph(n);

        for (from, to) in edges {
            let before = graph.levels();
            let already_ordered = before[from] < before[to];
            let inserted = graph.add_edge(from, to).unwrap();
            if already_ordered {
                prop_assert!(inserted);
                prop_assert_eq!(graph.levels(), before);
            }
        }
    }

    #[test]
    fn prop_reset_forgets_previous_session((n, edges) in arb_graph(), rollback in any::<bool>()) {
        let mut graph = LevelGraph::new(GraphConfig::new().with_rollback(rollback));
        graph.add_vertices(n);
        for (from, to) in edges {
            graph.add_edge(from, to).unwrap();
        }

        graph.reset(n);
        graph.add_vertices(n);
        for i in 1..n {
            prop_assert!(graph.add_edge(i - 1, i).unwrap());
        }
        prop_assert_eq!(graph.topology(), (0..n).collect::<Vec<_>>());
    }

    #[test]
    fn prop_in_degree_counts_accepted_edges((n, edges) in arb_graph()) {
        let mut graph = rollback_graph(n);
        let mut expected = vec![0usize; n];

        for (from, to) in edges {
            if graph.add_edge(from, to).unwrap() {
                expected[to] += 1;
            }
        }
        for (id, &count) in expected.iter().enumerate() {
            prop_assert_eq!(graph.in_degree(id).unwrap(), count);
        }
    }
}
