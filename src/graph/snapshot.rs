//! Whole-store snapshot used to undo a rejected propagation.

use super::vertex::VertexStore;

/// Value copy of every vertex taken before a propagation that may fail.
#[derive(Debug, Clone)]
pub struct Snapshot {
    store: VertexStore,
}

impl Snapshot {
    pub fn capture(store: &VertexStore) -> Self {
        Self {
            store: store.clone(),
        }
    }

    /// Put the captured state back in a single assignment.
    pub fn restore(self, store: &mut VertexStore) {
        *store = self.store;
    }
}
