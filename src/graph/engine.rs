//! Edge insertion with breadth-first level propagation.

use std::collections::VecDeque;

use log::{debug, trace};

use crate::config::GraphConfig;
use crate::error::{Error, Result};

use super::ledger;
use super::snapshot::Snapshot;
use super::stats::GraphStats;
use super::vertex::{Vertex, VertexStore};
use super::{DynamicGraph, Level, VertexId};

/// Incrementally ordered graph using bucketed level relabeling.
#[derive(Debug, Clone, Default)]
pub struct LevelGraph {
    store: VertexStore,
    config: GraphConfig,
    stats: GraphStats,
}

impl LevelGraph {
    pub fn new(config: GraphConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Graph with `n` vertices already added.
    pub fn with_vertices(config: GraphConfig, n: usize) -> Self {
        let mut graph = Self::new(config);
        graph.store = VertexStore::with_capacity(n);
        graph.add_vertices(n);
        graph
    }

    pub fn config(&self) -> GraphConfig {
        self.config
    }

    pub fn stats(&self) -> GraphStats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn level(&self, id: VertexId) -> Result<Level> {
        Ok(self.store.get(id)?.level)
    }

    pub fn in_degree(&self, id: VertexId) -> Result<usize> {
        Ok(self.store.get(id)?.in_degree)
    }

    pub fn vertex(&self, id: VertexId) -> Result<&Vertex> {
        self.store.get(id)
    }

    /// Levels of all vertices, indexed by vertex id.
    pub fn levels(&self) -> Vec<Level> {
        self.store.iter().map(|(_, vertex)| vertex.level).collect()
    }

    fn propagate(&mut self, v: VertexId, w: VertexId) -> bool {
        self.stats.propagations += 1;
        let mut snapshot = self.config.rollback.then(|| Snapshot::capture(&self.store));

        let mut queue = VecDeque::from([(v, w)]);
        let mut popped = 0u64;
        let mut seed = true;
        let mut rejected = false;

        while let Some((x, y)) = queue.pop_front() {
            popped += 1;

            if y == v && !rejected {
                rejected = true;
                self.stats.rejected += 1;
                debug!("rejected #{v} -> #{w}: propagation reached #{v} via #{x}");
                if let Some(snapshot) = snapshot.take() {
                    snapshot.restore(&mut self.store);
                }
                if self.config.rollback || seed {
                    self.stats.work_items += popped;
                    return false;
                }
                // Without a snapshot the raises stay, so finish the walk with
                // v treated like any other target. The accepted edges form a
                // DAG once (v, w) is left out, so this terminates.
            }

            let source_level = self.store[x].level;
            let before = self.store[y].level;
            if source_level >= before {
                self.store[y].level = source_level + 1;
            } else {
                self.repair(x, y);
            }

            let after = self.store[y].level;
            if after != before {
                self.stats.level_raises += 1;
                while let Some((_, z)) = self.store[y].outgoing.pop_at_most(after) {
                    queue.push_back((y, z));
                }
            }
            // The seed joins v's frontier only once the insertion is accepted.
            if !std::mem::take(&mut seed) {
                self.store[x].outgoing.push(after, y);
            }
        }

        self.stats.work_items += popped;
        if rejected {
            return false;
        }
        let target_level = self.store[w].level;
        self.store[v].outgoing.push(target_level, w);
        self.store[w].in_degree += 1;
        trace!("accepted #{v} -> #{w} after {popped} work items");
        true
    }

    /// Ledger step for an edge re-examined through a stale frontier key.
    fn repair(&mut self, x: VertexId, y: VertexId) {
        self.stats.ledger_steps += 1;

        let current = self.store[y].level;
        let gap = current - self.store[x].level;
        let bucket = ledger::bucket_for(gap, self.store[y].in_degree);
        self.store[y].bucket = bucket;

        if let Some(raised) = self.store[x].ledger.record(bucket, y, current) {
            self.stats.ledger_triggers += 1;
            debug!("ledger #{x} bucket {bucket} moved #{y}: {current} -> {raised}");
            self.store[y].level = raised;
        }
    }
}

impl DynamicGraph for LevelGraph {
    fn add_vertex(&mut self) -> VertexId {
        self.store.push()
    }

    fn add_edge(&mut self, v: VertexId, w: VertexId) -> Result<bool> {
        self.store.check(v)?;
        self.store.check(w)?;

        let target_level = self.store[w].level;
        if self.store[v].level < target_level {
            self.stats.fast_path += 1;
            self.store[v].outgoing.push(target_level, w);
            self.store[w].in_degree += 1;
            return Ok(true);
        }

        Ok(self.propagate(v, w))
    }

    fn remove_edge(&mut self, _source: VertexId, _target: VertexId) -> Result<()> {
        Err(Error::Unsupported("edge removal"))
    }

    fn topology(&self) -> Vec<VertexId> {
        let mut order: Vec<(Level, VertexId)> = self
            .store
            .iter()
            .map(|(id, vertex)| (vertex.level, id))
            .collect();
        order.sort_unstable();
        order.into_iter().map(|(_, id)| id).collect()
    }

    fn reset(&mut self, n: usize) {
        self.store.clear(n);
        self.stats = GraphStats::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(n: usize, rollback: bool) -> LevelGraph {
        LevelGraph::with_vertices(GraphConfig::new().with_rollback(rollback), n)
    }

    fn assert_invariant(graph: &LevelGraph, edges: &[(VertexId, VertexId)]) {
        for &(x, y) in edges {
            assert!(
                graph.level(x).unwrap() < graph.level(y).unwrap(),
                "edge #{x} -> #{y} out of order: {:?}",
                graph.levels()
            );
        }
    }

    /// Build a fresh chain ending at level `level - 1` and point it at
    /// `target`, forcing `target` up to `level`.
    fn raise_to(graph: &mut LevelGraph, target: VertexId, level: Level) {
        let mut tail = graph.add_vertex();
        for _ in 1..level {
            let next = graph.add_vertex();
            assert!(graph.add_edge(tail, next).unwrap());
            tail = next;
        }
        assert!(graph.add_edge(tail, target).unwrap());
        assert_eq!(graph.level(target).unwrap(), level);
    }

    #[test]
    fn test_line_graph() {
        let mut g = graph(4, true);
        assert!(g.add_edge(0, 1).unwrap());
        assert!(g.add_edge(1, 2).unwrap());
        assert!(g.add_edge(2, 3).unwrap());
        assert_eq!(g.topology(), vec![0, 1, 2, 3]);
        assert_eq!(g.levels(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_closing_cycle_with_rollback() {
        let mut g = graph(4, true);
        g.add_edge(0, 1).unwrap();
        g.add_edge(1, 2).unwrap();
        g.add_edge(2, 3).unwrap();

        assert!(!g.add_edge(3, 0).unwrap());
        assert_eq!(g.topology(), vec![0, 1, 2, 3]);
        assert_eq!(g.levels(), vec![0, 1, 2, 3]);
        assert_eq!(g.in_degree(0).unwrap(), 0);
    }

    #[test]
    fn test_closing_cycle_without_rollback_keeps_raises() {
        let mut g = graph(4, false);
        g.add_edge(0, 1).unwrap();
        g.add_edge(1, 2).unwrap();
        g.add_edge(2, 3).unwrap();

        assert!(!g.add_edge(3, 0).unwrap());
        // the walk carries on through 3 instead of stopping there
        assert_eq!(g.levels(), vec![4, 5, 6, 7]);
        assert_eq!(g.topology(), vec![0, 1, 2, 3]);
        assert_eq!(g.in_degree(0).unwrap(), 0);
        assert_invariant(&g, &[(0, 1), (1, 2), (2, 3)]);

        assert!(!g.add_edge(3, 0).unwrap());
        assert_invariant(&g, &[(0, 1), (1, 2), (2, 3)]);
    }

    #[test]
    fn test_repeated_rejection_without_rollback() {
        let mut g = graph(5, false);
        assert!(g.add_edge(0, 1).unwrap());
        assert!(!g.add_edge(1, 0).unwrap());
        assert_eq!(g.levels()[..2], [2, 3]);
        assert!(!g.add_edge(1, 0).unwrap());
        assert_eq!(g.levels()[..2], [4, 5]);
        assert_eq!(g.stats().rejected, 2);

        assert!(g.add_edge(2, 3).unwrap());
        assert!(g.add_edge(3, 4).unwrap());
        assert!(g.add_edge(4, 0).unwrap());
        assert!(!g.add_edge(1, 2).unwrap());
        assert_invariant(&g, &[(0, 1), (2, 3), (3, 4), (4, 0)]);
    }

    #[test]
    fn test_cycle_through_earlier_raises() {
        let mut g = graph(3, true);
        assert!(g.add_edge(2, 0).unwrap());
        assert!(g.add_edge(0, 1).unwrap());
        assert_eq!(g.levels(), vec![1, 2, 0]);

        assert!(!g.add_edge(1, 2).unwrap());
        assert_eq!(g.levels(), vec![1, 2, 0]);
        assert_invariant(&g, &[(2, 0), (0, 1)]);
    }

    #[test]
    fn test_cycle_through_earlier_raises_without_rollback() {
        let mut g = graph(3, false);
        g.add_edge(2, 0).unwrap();
        g.add_edge(0, 1).unwrap();

        assert!(!g.add_edge(1, 2).unwrap());
        assert_eq!(g.levels(), vec![4, 5, 3]);
        assert_invariant(&g, &[(2, 0), (0, 1)]);
    }

    #[test]
    fn test_self_loop_rejected() {
        let mut g = graph(2, true);
        assert!(!g.add_edge(1, 1).unwrap());
        assert_eq!(g.levels(), vec![0, 0]);
        assert_eq!(g.stats().rejected, 1);
    }

    #[test]
    fn test_fast_path_changes_no_level() {
        let mut g = graph(3, true);
        g.add_edge(0, 1).unwrap();
        g.add_edge(1, 2).unwrap();
        let before = g.levels();

        assert!(g.add_edge(0, 2).unwrap());
        assert_eq!(g.levels(), before);
        assert_eq!(g.stats().fast_path, 1);
        assert_eq!(g.in_degree(2).unwrap(), 2);
    }

    #[test]
    fn test_invalid_index_mutates_nothing() {
        let mut g = graph(2, false);
        assert!(matches!(
            g.add_edge(0, 5),
            Err(Error::VertexOutOfRange { index: 5, len: 2 })
        ));
        assert!(matches!(
            g.add_edge(9, 0),
            Err(Error::VertexOutOfRange { index: 9, len: 2 })
        ));
        assert_eq!(g.levels(), vec![0, 0]);
        assert_eq!(g.stats(), GraphStats::default());
        assert!(g.level(2).is_err());
    }

    #[test]
    fn test_remove_edge_unsupported() {
        let mut g = graph(2, false);
        g.add_edge(0, 1).unwrap();
        assert!(matches!(
            g.remove_edge(0, 1),
            Err(Error::Unsupported("edge removal"))
        ));
    }

    #[test]
    fn test_propagation_raises_descendants() {
        // 1 -> 2 -> 3, then 0 -> 1 after 0 was pushed above 1
        let mut g = graph(5, true);
        g.add_edge(1, 2).unwrap();
        g.add_edge(2, 3).unwrap();
        g.add_edge(4, 0).unwrap();
        g.add_edge(0, 1).unwrap();

        assert_invariant(&g, &[(1, 2), (2, 3), (4, 0), (0, 1)]);
        assert_eq!(g.topology(), vec![4, 0, 1, 2, 3]);
    }

    #[test]
    fn test_levels_never_decrease() {
        let mut g = graph(6, true);
        let edges = [(0, 1), (2, 3), (3, 1), (4, 0), (1, 5), (5, 2), (2, 4), (4, 5)];
        let mut last = g.levels();
        for (x, y) in edges {
            g.add_edge(x, y).unwrap();
            let now = g.levels();
            for (old, new) in last.iter().zip(&now) {
                assert!(new >= old);
            }
            last = now;
        }
    }

    #[test]
    fn test_diamond() {
        let mut g = graph(4, true);
        for (x, y) in [(3, 1), (3, 2), (1, 0), (2, 0)] {
            assert!(g.add_edge(x, y).unwrap());
        }
        let order = g.topology();
        assert_eq!(order[0], 3);
        assert_eq!(order[3], 0);
        assert!(!g.add_edge(0, 3).unwrap());
        assert_eq!(g.topology(), order);
    }

    #[test]
    fn test_ledger_trigger_resets_counter() {
        // x -> y and p -> y; p and x are then alternately pushed up so that
        // x keeps finding y through a stale key while y stays ahead of it.
        let mut g = graph(3, true);
        let (y, p, x) = (0, 1, 2);
        assert!(g.add_edge(x, y).unwrap());
        assert!(g.add_edge(p, y).unwrap());
        assert_eq!(g.level(y).unwrap(), 1);
        assert_eq!(g.in_degree(y).unwrap(), 2);

        for round in 1..=3 {
            raise_to(&mut g, p, round);
            assert_eq!(g.level(y).unwrap(), round + 1);
            raise_to(&mut g, x, round);
            assert_eq!(g.vertex(y).unwrap().bucket, 0);
        }

        let ledger = &g.vertex(x).unwrap().ledger;
        assert_eq!(ledger.count(0, y), 0);
        assert_eq!(ledger.bound(0, y), 4);
        assert_eq!(g.stats().ledger_steps, 3);
        assert_eq!(g.stats().ledger_triggers, 1);
        assert_eq!(g.level(y).unwrap(), 4);
        assert_invariant(&g, &[(x, y), (p, y)]);
    }

    #[test]
    fn test_ledger_lifts_target_past_bound() {
        // twelve parallel x -> y edges keyed at level 1, then y is pushed to
        // 3 through a, then x climbs to 1 and re-examines all twelve
        let mut g = graph(3, true);
        let (y, x, a) = (0, 1, 2);
        for _ in 0..12 {
            assert!(g.add_edge(x, y).unwrap());
        }
        assert_eq!(g.level(y).unwrap(), 1);
        raise_to(&mut g, a, 2);
        assert!(g.add_edge(a, y).unwrap());
        assert_eq!(g.level(y).unwrap(), 3);
        assert_eq!(g.in_degree(y).unwrap(), 13);

        // gap 2 lands in bucket 1, so every sixth hit fires: the first at
        // max(3, 1 + 2), the second at max(3, 3 + 2)
        raise_to(&mut g, x, 1);
        assert_eq!(g.vertex(y).unwrap().bucket, 1);
        assert_eq!(g.stats().ledger_steps, 12);
        assert_eq!(g.stats().ledger_triggers, 2);
        assert_eq!(g.level(y).unwrap(), 5);

        let ledger = &g.vertex(x).unwrap().ledger;
        assert_eq!(ledger.bound(1, y), 5);
        assert_eq!(ledger.count(1, y), 0);
        assert_invariant(&g, &[(x, y), (a, y)]);
    }

    #[test]
    fn test_ledger_counts_below_threshold() {
        let mut g = graph(3, true);
        let (y, p, x) = (0, 1, 2);
        g.add_edge(x, y).unwrap();
        g.add_edge(p, y).unwrap();

        raise_to(&mut g, p, 1);
        raise_to(&mut g, x, 1);
        assert_eq!(g.vertex(x).unwrap().ledger.count(0, y), 1);
        assert_eq!(g.stats().ledger_triggers, 0);
        // the stale entry was re-keyed to y's current level
        assert_eq!(g.vertex(x).unwrap().outgoing.peek_min(), Some((2, y)));
    }

    #[test]
    fn test_reset_starts_fresh_session() {
        let mut g = graph(3, true);
        g.add_edge(2, 1).unwrap();
        g.add_edge(1, 0).unwrap();
        g.add_edge(0, 1).unwrap();

        g.reset_with_edges(4, 10);
        assert!(g.is_empty());
        assert_eq!(g.stats(), GraphStats::default());

        g.add_vertices(4);
        for i in 0..3 {
            assert!(g.add_edge(i, i + 1).unwrap());
        }
        assert_eq!(g.topology(), vec![0, 1, 2, 3]);
        assert_eq!(g.levels(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_rejection_without_rollback_keeps_pending_edges() {
        let mut g = graph(4, false);
        g.add_edge(0, 1).unwrap();
        g.add_edge(0, 2).unwrap();
        g.add_edge(1, 3).unwrap();
        assert!(!g.add_edge(3, 0).unwrap());

        assert_eq!(g.levels(), vec![3, 4, 4, 5]);
        assert_invariant(&g, &[(0, 1), (0, 2), (1, 3)]);
        let tracked: usize = (0..4)
            .map(|id| g.vertex(id).unwrap().outgoing.len())
            .sum();
        assert_eq!(tracked, 3);
    }

    #[test]
    fn test_self_loop_without_rollback_moves_nothing() {
        let mut g = graph(2, false);
        g.add_edge(0, 1).unwrap();
        assert!(!g.add_edge(0, 0).unwrap());
        assert_eq!(g.levels(), vec![0, 1]);
    }

    #[test]
    fn test_stats_counts() {
        let mut g = graph(3, true);
        g.add_edge(0, 1).unwrap();
        g.add_edge(1, 2).unwrap();
        g.add_edge(0, 2).unwrap();
        g.add_edge(2, 0).unwrap();

        let stats = g.stats();
        assert_eq!(stats.propagations, 3);
        assert_eq!(stats.fast_path, 1);
        assert_eq!(stats.rejected, 1);
        assert_eq!(stats.accepted(), 3);
    }
}
