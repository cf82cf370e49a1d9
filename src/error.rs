//! Error types for topolevel.

use std::io;

use crate::graph::VertexId;

/// Result type alias for topolevel operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error enum for topolevel.
///
/// A rejected insertion is not an error: `add_edge` reports it as `Ok(false)`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Vertex index does not name an existing vertex.
    #[error("Vertex #{index} out of range (graph has {len} vertices)")]
    VertexOutOfRange { index: VertexId, len: usize },

    /// Operation the graph deliberately does not implement.
    #[error("Unsupported operation: {0}")]
    Unsupported(&'static str),

    /// Malformed edge-list input.
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Edge-list header disagrees with its body.
    #[error("Edge list declares {declared} edges but contains {found}")]
    EdgeCountMismatch { declared: usize, found: usize },

    /// An order places a target before its source.
    #[error("Order violates edge #{from} -> #{to}")]
    InvalidOrder { from: VertexId, to: VertexId },

    /// Incremental and static results disagree.
    #[error("Oracle mismatch: {0}")]
    OracleMismatch(String),

    /// Edge probability outside [0, 1].
    #[error("Probability must be between 0 and 1, got {0}")]
    InvalidProbability(f64),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::VertexOutOfRange { .. } => "VertexOutOfRange",
            Error::Unsupported(_) => "Unsupported",
            Error::Parse { .. } => "Parse",
            Error::EdgeCountMismatch { .. } => "EdgeCountMismatch",
            Error::InvalidOrder { .. } => "InvalidOrder",
            Error::OracleMismatch(_) => "OracleMismatch",
            Error::InvalidProbability(_) => "InvalidProbability",
            Error::Io(_) => "Io",
            Error::Json(_) => "Json",
        }
    }

    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            line,
            message: message.into(),
        }
    }
}

/// Format a list of vertex ids as a comma-separated string with # prefix.
pub fn format_vertex_ids(ids: &[VertexId]) -> String {
    ids.iter()
        .map(|id| format!("#{id}"))
        .collect::<Vec<_>>()
        .join(", ")
}
