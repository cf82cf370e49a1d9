//! Seeded random acyclic graphs built through the incremental graph.

use std::collections::HashSet;

use log::info;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::config::GraphConfig;
use crate::edgelist::EdgeList;
use crate::error::{Error, Result};
use crate::graph::{DynamicGraph, LevelGraph};
use crate::oracle;

/// Parameters for [`generate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeneratorOptions {
    pub vertices: usize,
    /// Chance that a round draws an edge.
    pub probability: f64,
    /// Number of rounds; defaults to `vertices`.
    pub rounds: Option<usize>,
    pub seed: u64,
}

impl GeneratorOptions {
    pub fn new(vertices: usize, probability: f64) -> Self {
        Self {
            vertices,
            probability,
            rounds: None,
            seed: 0,
        }
    }

    pub fn with_rounds(mut self, rounds: usize) -> Self {
        self.rounds = Some(rounds);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Output of [`generate`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Generated {
    /// Accepted edges in the order they were accepted.
    pub graph: EdgeList,
    /// Drawn edges the graph turned down as cycle-closing.
    pub rejected: usize,
}

/// Draw random edges and keep those that leave the graph acyclic.
///
/// Each round draws an edge with the configured probability. A drawn pair
/// is never drawn again. Pairs are offered to a rollback-enabled
/// [`LevelGraph`]; the accepted ones form the result, which is checked
/// against the static oracle before returning.
pub fn generate(options: GeneratorOptions) -> Result<Generated> {
    if !(0.0..=1.0).contains(&options.probability) {
        return Err(Error::InvalidProbability(options.probability));
    }

    let n = options.vertices;
    let rounds = options.rounds.unwrap_or(n);
    let mut rng = ChaCha8Rng::seed_from_u64(options.seed);
    let mut graph = LevelGraph::with_vertices(GraphConfig::new().with_rollback(true), n);
    let mut drawn: HashSet<(usize, usize)> = HashSet::new();
    let mut result = EdgeList::new(n);
    let mut rejected = 0;

    for _ in 0..rounds {
        if n == 0 || drawn.len() == n * n {
            break;
        }
        if !rng.gen_bool(options.probability) {
            continue;
        }

        let mut pair = (rng.gen_range(0..n), rng.gen_range(0..n));
        while drawn.contains(&pair) {
            pair = (rng.gen_range(0..n), rng.gen_range(0..n));
        }
        drawn.insert(pair);

        if graph.add_edge(pair.0, pair.1)? {
            result.push(pair.0, pair.1);
        } else {
            rejected += 1;
        }
    }

    oracle::verify(n, &graph.topology(), &result.edges)?;
    info!(
        "generated {} edges over {} vertices ({} rejected)",
        result.len(),
        n,
        rejected
    );

    Ok(Generated {
        graph: result,
        rejected,
    })
}
