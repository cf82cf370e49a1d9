//! Incremental topological ordering.
//!
//! Vertices carry integer levels. Every accepted edge (x -> y) satisfies
//! `level(x) < level(y)`, so sorting by level yields a topological order.
//! An insertion that breaks the inequality starts a breadth-first
//! propagation of level raises; reaching the source again means the edge
//! would close a cycle.

pub mod engine;
pub mod frontier;
pub mod ledger;
pub mod snapshot;
pub mod stats;
pub mod vertex;

pub use engine::LevelGraph;
pub use frontier::Frontier;
pub use ledger::Ledger;
pub use snapshot::Snapshot;
pub use stats::GraphStats;
pub use vertex::{Vertex, VertexStore};

use crate::error::Result;

/// Stable vertex index, assigned in creation order.
pub type VertexId = usize;

/// Position proxy in the maintained order.
pub type Level = u64;

/// A graph that keeps a topological order while edges arrive one by one.
pub trait DynamicGraph {
    /// Append a vertex and return its index.
    fn add_vertex(&mut self) -> VertexId;

    /// Insert `source -> target`.
    ///
    /// Returns `Ok(false)` without keeping the edge when it would close a
    /// cycle.
    fn add_edge(&mut self, source: VertexId, target: VertexId) -> Result<bool>;

    /// Remove `source -> target`.
    fn remove_edge(&mut self, source: VertexId, target: VertexId) -> Result<()>;

    /// Vertex indices in a valid topological order for all accepted edges.
    fn topology(&self) -> Vec<VertexId>;

    /// Discard every vertex. `n` is a capacity hint for the next session.
    fn reset(&mut self, n: usize);

    /// Same as [`DynamicGraph::reset`]; `m` is accepted and ignored.
    fn reset_with_edges(&mut self, n: usize, _m: usize) {
        self.reset(n);
    }

    /// Append `n` vertices.
    fn add_vertices(&mut self, n: usize) {
        for _ in 0..n {
            self.add_vertex();
        }
    }
}
