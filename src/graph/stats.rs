//! Running counters for one graph session.

use serde::{Deserialize, Serialize};

/// Work done by a graph since construction or the last reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    /// Insertions accepted without propagation.
    pub fast_path: u64,
    /// Insertions that needed a propagation, accepted or not.
    pub propagations: u64,
    /// Insertions rejected because they would close a cycle.
    pub rejected: u64,
    /// Work items popped across all propagations.
    pub work_items: u64,
    /// Times a vertex level went up.
    pub level_raises: u64,
    /// Ledger steps taken on edges that were not violated.
    pub ledger_steps: u64,
    /// Ledger steps that reached their bucket threshold.
    pub ledger_triggers: u64,
}

impl GraphStats {
    /// Accepted insertions.
    pub fn accepted(&self) -> u64 {
        self.fast_path + self.propagations - self.rejected
    }
}
