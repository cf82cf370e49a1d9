//! Line-oriented edge-list files.
//!
//! The first non-blank line is `"n m"`: vertex count and edge count. Each of
//! the following `m` non-blank lines is `"from to"`.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graph::VertexId;

/// A vertex count plus edges in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeList {
    pub vertices: usize,
    pub edges: Vec<(VertexId, VertexId)>,
}

impl EdgeList {
    pub fn new(vertices: usize) -> Self {
        Self {
            vertices,
            edges: Vec::new(),
        }
    }

    pub fn push(&mut self, from: VertexId, to: VertexId) {
        self.edges.push((from, to));
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn read_from(path: impl AsRef<Path>) -> Result<Self> {
        fs::read_to_string(path)?.parse()
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.to_string())?;
        Ok(())
    }
}

impl FromStr for EdgeList {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        let mut lines = input
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let (header_line, header) = lines
            .next()
            .ok_or_else(|| Error::parse(1, "missing \"n m\" header"))?;
        let (vertices, declared) = parse_pair(header_line, header)?;

        let mut list = EdgeList::new(vertices);
        for (number, line) in lines {
            let (from, to) = parse_pair(number, line)?;
            for index in [from, to] {
                if index >= vertices {
                    return Err(Error::parse(
                        number,
                        format!("vertex {index} out of range for {vertices} vertices"),
                    ));
                }
            }
            list.push(from, to);
        }

        if list.len() != declared {
            return Err(Error::EdgeCountMismatch {
                declared,
                found: list.len(),
            });
        }
        Ok(list)
    }
}

fn parse_pair(line: usize, text: &str) -> Result<(usize, usize)> {
    let mut tokens = text.split_whitespace();
    let mut next = |name: &str| -> Result<usize> {
        let token = tokens
            .next()
            .ok_or_else(|| Error::parse(line, format!("missing {name}")))?;
        token
            .parse()
            .map_err(|_| Error::parse(line, format!("invalid {name}: {token:?}")))
    };
    let first = next("first value")?;
    let second = next("second value")?;
    if let Some(extra) = tokens.next() {
        return Err(Error::parse(line, format!("unexpected token {extra:?}")));
    }
    Ok((first, second))
}

impl fmt::Display for EdgeList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.vertices, self.edges.len())?;
        for (from, to) in &self.edges {
            writeln!(f, "{from} {to}")?;
        }
        Ok(())
    }
}
