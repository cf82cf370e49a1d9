//! Bucketed counters that throttle level raises on repaired edges.
//!
//! An edge (x -> y) examined by a propagation without actually being
//! violated does not move `y` right away. Instead the source records one
//! hit in bucket `j = floor(log2(min(gap, in_degree(y))))`. Only after
//! `3 * 2^j` hits through the same bucket is `y` pushed up, to at least
//! the previous bound for that bucket plus `2^j`.

use std::collections::HashMap;

use super::{Level, VertexId};

/// Bound assumed for a (bucket, target) pair that has never fired.
pub const DEFAULT_BOUND: Level = 1;

/// Bucket index for an edge whose target sits `gap` levels above its
/// source and has `in_degree` incoming edges.
pub fn bucket_for(gap: Level, in_degree: usize) -> u32 {
    let span = gap.min(in_degree as Level).max(1);
    span.ilog2()
}

/// Hits needed in bucket `j` before the target is raised.
pub fn threshold(bucket: u32) -> u64 {
    3u64 << bucket
}

/// Counters and bounds held by one source vertex.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    counters: HashMap<(u32, VertexId), u64>,
    bounds: HashMap<(u32, VertexId), Level>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one hit for `target` in `bucket`.
    ///
    /// Returns the new target level when the threshold is reached. The
    /// returned level is never below `current` and is stored as the new
    /// bound for the pair.
    pub fn record(&mut self, bucket: u32, target: VertexId, current: Level) -> Option<Level> {
        let count = self.counters.entry((bucket, target)).or_insert(0);
        *count += 1;
        if *count < threshold(bucket) {
            return None;
        }

        *count = 0;
        let bound = self.bound(bucket, target);
        let raised = current.max(bound + (1 << bucket));
        self.bounds.insert((bucket, target), raised);
        Some(raised)
    }

    pub fn count(&self, bucket: u32, target: VertexId) -> u64 {
        self.counters.get(&(bucket, target)).copied().unwrap_or(0)
    }

    pub fn bound(&self, bucket: u32, target: VertexId) -> Level {
        self.bounds
            .get(&(bucket, target))
            .copied()
            .unwrap_or(DEFAULT_BOUND)
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty() && self.bounds.is_empty()
    }
}
