//! Per-vertex records and the append-only store that owns them.

use std::ops::{Index, IndexMut};

use crate::error::{Error, Result};

use super::frontier::Frontier;
use super::ledger::Ledger;
use super::{Level, VertexId};

/// Everything the engine tracks about one vertex.
#[derive(Debug, Clone, Default)]
pub struct Vertex {
    /// Position proxy in the maintained order.
    pub level: Level,
    /// Number of accepted edges pointing at this vertex.
    pub in_degree: usize,
    /// Bucket of the last ledger step that had this vertex as target.
    pub bucket: u32,
    /// Outgoing edges keyed by the target level seen at insert time.
    pub outgoing: Frontier,
    /// Counters and bounds for edges leaving this vertex.
    pub ledger: Ledger,
}

/// Indexed, append-only sequence of vertices.
#[derive(Debug, Clone, Default)]
pub struct VertexStore {
    vertices: Vec<Vertex>,
}

impl VertexStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(capacity),
        }
    }

    /// Append a fresh vertex and return its index.
    pub fn push(&mut self) -> VertexId {
        let id = self.vertices.len();
        self.vertices.push(Vertex::default());
        id
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Fail with `VertexOutOfRange` unless `id` names an existing vertex.
    pub fn check(&self, id: VertexId) -> Result<()> {
        if id < self.vertices.len() {
            Ok(())
        } else {
            Err(Error::VertexOutOfRange {
                index: id,
                len: self.vertices.len(),
            })
        }
    }

    pub fn get(&self, id: VertexId) -> Result<&Vertex> {
        self.check(id)?;
        Ok(&self.vertices[id])
    }

    /// Drop every vertex, keeping room for `capacity` new ones.
    pub fn clear(&mut self, capacity: usize) {
        self.vertices = Vec::with_capacity(capacity);
    }

    pub fn iter(&self) -> impl Iterator<Item = (VertexId, &Vertex)> {
        self.vertices.iter().enumerate()
    }
}

impl Index<VertexId> for VertexStore {
    type Output = Vertex;

    fn index(&self, id: VertexId) -> &Vertex {
        &self.vertices[id]
    }
}

impl IndexMut<VertexId> for VertexStore {
    fn index_mut(&mut self, id: VertexId) -> &mut Vertex {
        &mut self.vertices[id]
    }
}
