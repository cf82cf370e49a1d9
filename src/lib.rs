//! # topolevel - incremental topological ordering
//!
//! Keeps a topological order of a directed graph valid while edges are
//! inserted one at a time, rejecting any edge that would close a cycle.
//! Vertices carry levels; an insertion that violates the level order
//! triggers a breadth-first propagation whose relabeling work is throttled
//! by per-source logarithmic buckets.
//!
//! Around the core sit the tools used to exercise it: an edge-list file
//! format, a seeded random graph generator, a static sort used as an
//! oracle, and a timing runner.

pub mod cli;
pub mod config;
pub mod edgelist;
pub mod error;
pub mod generate;
pub mod graph;
pub mod oracle;
pub mod runner;

// Re-export commonly used types
pub use config::GraphConfig;
pub use edgelist::EdgeList;
pub use error::{Error, Result};
pub use graph::{DynamicGraph, GraphStats, Level, LevelGraph, VertexId};
