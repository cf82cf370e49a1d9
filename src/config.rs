//! Graph configuration.

use serde::{Deserialize, Serialize};

/// Settings fixed when a graph is constructed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Snapshot the store before each propagation and restore it when the
    /// insertion is rejected.
    ///
    /// Off by default. Without it a rejected insertion keeps the levels its
    /// propagation raised and finishes the walk, so those levels still
    /// respect every accepted edge. They are just higher than necessary.
    pub rollback: bool,
}

impl GraphConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rollback(mut self, rollback: bool) -> Self {
        self.rollback = rollback;
        self
    }
}
