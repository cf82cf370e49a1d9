//! Min-priority queue of outgoing edges keyed by observed target level.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::{Level, VertexId};

/// Outgoing edges of one vertex, smallest recorded target level first.
///
/// Keys are copies of the target's level taken when the entry was pushed.
/// They are not updated when the target moves, so an entry may understate
/// the target's current level until it is popped and pushed again.
///
/// BinaryHeap is a max-heap, so entries are wrapped in `Reverse`. Ties on
/// level fall back to the target index.
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    heap: BinaryHeap<Reverse<(Level, VertexId)>>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, level: Level, target: VertexId) {
        self.heap.push(Reverse((level, target)));
    }

    pub fn peek_min(&self) -> Option<(Level, VertexId)> {
        self.heap.peek().map(|Reverse(entry)| *entry)
    }

    pub fn pop_min(&mut self) -> Option<(Level, VertexId)> {
        self.heap.pop().map(|Reverse(entry)| entry)
    }

    /// Pop the minimum entry if its key is at most `level`.
    pub fn pop_at_most(&mut self, level: Level) -> Option<(Level, VertexId)> {
        match self.peek_min() {
            Some((key, _)) if key <= level => self.pop_min(),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
