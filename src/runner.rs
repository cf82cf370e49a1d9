//! Replays edge lists through a [`LevelGraph`] and times the insertions.

use std::time::Instant;

use log::info;
use serde::Serialize;

use crate::config::GraphConfig;
use crate::edgelist::EdgeList;
use crate::error::{Error, Result};
use crate::graph::{DynamicGraph, GraphStats, LevelGraph, VertexId};
use crate::oracle;

/// How to replay an edge list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunOptions {
    pub config: GraphConfig,
    /// Full replays to average over.
    pub repeat: usize,
    /// Insertions timed together as one block.
    pub resolution: usize,
    /// Cross-check every decision and the final order against the oracle.
    pub verify: bool,
    /// Include the final order in the report.
    pub keep_topology: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            config: GraphConfig::default(),
            repeat: 1,
            resolution: 100,
            verify: false,
            keep_topology: false,
        }
    }
}

/// Result of [`run`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub vertices: usize,
    pub edges: usize,
    pub accepted: u64,
    pub rejected: u64,
    pub config: GraphConfig,
    pub repeat: usize,
    pub resolution: usize,
    /// Counters from the last replay.
    pub stats: GraphStats,
    /// Nanoseconds per block of `resolution` insertions across repeats.
    pub blocks: Vec<BlockTiming>,
    /// Sum of the mean block times.
    pub total_nanos: u64,
    /// Set when the run was cross-checked.
    pub verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topology: Option<Vec<VertexId>>,
}

/// Spread of one block's timings over all repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BlockTiming {
    pub min: u64,
    pub mean: u64,
    pub max: u64,
}

/// Replay `list` `options.repeat` times and report timings and outcome.
pub fn run(list: &EdgeList, options: &RunOptions) -> Result<RunReport> {
    let repeat = options.repeat.max(1);
    let resolution = options.resolution.max(1);
    let n = list.vertices;

    let mut graph = LevelGraph::new(options.config);
    let mut timings = Vec::with_capacity(repeat);
    for _ in 0..repeat {
        graph.reset_with_edges(n, list.len());
        graph.add_vertices(n);

        let mut blocks = Vec::new();
        for chunk in list.edges.chunks(resolution) {
            let start = Instant::now();
            for &(from, to) in chunk {
                graph.add_edge(from, to)?;
            }
            blocks.push(start.elapsed().as_nanos() as u64);
        }
        timings.push(blocks);
    }

    if options.verify {
        cross_check(list, options.config)?;
    }

    let blocks = summarize_columns(&timings);
    let stats = graph.stats();
    info!(
        "replayed {} edges x{}: {} accepted, {} rejected",
        list.len(),
        repeat,
        stats.accepted(),
        stats.rejected
    );

    Ok(RunReport {
        vertices: n,
        edges: list.len(),
        accepted: stats.accepted(),
        rejected: stats.rejected,
        config: options.config,
        repeat,
        resolution,
        stats,
        total_nanos: blocks.iter().map(|block| block.mean).sum(),
        blocks,
        verified: options.verify,
        topology: options.keep_topology.then(|| graph.topology()),
    })
}

/// Replay `list` once, checking each rejection against reachability and
/// the final order against the static sort.
pub fn cross_check(list: &EdgeList, config: GraphConfig) -> Result<()> {
    let n = list.vertices;
    let mut graph = LevelGraph::with_vertices(config, n);
    let mut adjacency: Vec<Vec<VertexId>> = vec![Vec::new(); n];
    let mut accepted = Vec::with_capacity(list.len());

    for &(from, to) in &list.edges {
        if graph.add_edge(from, to)? {
            adjacency[from].push(to);
            accepted.push((from, to));
        } else if !oracle::reaches(&adjacency, to, from) {
            return Err(Error::OracleMismatch(format!(
                "#{from} -> #{to} was rejected but closes no cycle"
            )));
        }
    }

    oracle::verify(n, &graph.topology(), &accepted)
}

fn summarize_columns(rows: &[Vec<u64>]) -> Vec<BlockTiming> {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    (0..width)
        .map(|column| {
            let values: Vec<u64> = rows.iter().filter_map(|row| row.get(column)).copied().collect();
            let sum: u128 = values.iter().map(|&nanos| u128::from(nanos)).sum();
            BlockTiming {
                min: values.iter().copied().min().unwrap_or(0),
                mean: (sum / values.len().max(1) as u128) as u64,
                max: values.iter().copied().max().unwrap_or(0),
            }
        })
        .collect()
}
