//! Static topological sort used to cross-check the incremental graph.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::error::{format_vertex_ids, Error, Result};
use crate::graph::VertexId;

fn build_adjacency(n: usize, edges: &[(VertexId, VertexId)]) -> (Vec<usize>, Vec<Vec<VertexId>>) {
    let mut in_degree = vec![0usize; n];
    let mut adjacency: Vec<Vec<VertexId>> = vec![Vec::new(); n];
    for &(from, to) in edges {
        adjacency[from].push(to);
        in_degree[to] += 1;
    }
    (in_degree, adjacency)
}

/// Sort `n` vertices topologically using Kahn's algorithm.
///
/// Ready vertices are taken smallest index first, so the result is
/// deterministic. Returns `None` if the edges contain a cycle.
pub fn topological_sort(n: usize, edges: &[(VertexId, VertexId)]) -> Option<Vec<VertexId>> {
    let (mut in_degree, adjacency) = build_adjacency(n, edges);

    let mut heap: BinaryHeap<Reverse<VertexId>> = (0..n)
        .filter(|&id| in_degree[id] == 0)
        .map(Reverse)
        .collect();

    let mut order = Vec::with_capacity(n);
    while let Some(Reverse(id)) = heap.pop() {
        order.push(id);
        for &next in &adjacency[id] {
            in_degree[next] -= 1;
            if in_degree[next] == 0 {
                heap.push(Reverse(next));
            }
        }
    }

    (order.len() == n).then_some(order)
}

/// Vertices left unsorted by Kahn's algorithm: those on or behind a cycle.
pub fn blocked_vertices(n: usize, edges: &[(VertexId, VertexId)]) -> Vec<VertexId> {
    let (mut in_degree, adjacency) = build_adjacency(n, edges);

    let mut ready: Vec<VertexId> = (0..n).filter(|&id| in_degree[id] == 0).collect();
    while let Some(id) = ready.pop() {
        for &next in &adjacency[id] {
            in_degree[next] -= 1;
            if in_degree[next] == 0 {
                ready.push(next);
            }
        }
    }

    (0..n).filter(|&id| in_degree[id] > 0).collect()
}

/// True if `to` can be reached from `from` along `adjacency`.
pub fn reaches(adjacency: &[Vec<VertexId>], from: VertexId, to: VertexId) -> bool {
    let mut seen = vec![false; adjacency.len()];
    let mut stack = vec![from];
    while let Some(id) = stack.pop() {
        if id == to {
            return true;
        }
        if std::mem::replace(&mut seen[id], true) {
            continue;
        }
        stack.extend(adjacency[id].iter().copied());
    }
    false
}

/// Check that `order` is a permutation of `0..n` placing every edge's
/// source before its target.
pub fn check_order(n: usize, order: &[VertexId], edges: &[(VertexId, VertexId)]) -> Result<()> {
    if order.len() != n {
        return Err(Error::OracleMismatch(format!(
            "order has {} vertices, expected {n}",
            order.len()
        )));
    }

    let mut position = vec![usize::MAX; n];
    for (index, &id) in order.iter().enumerate() {
        if id >= n || position[id] != usize::MAX {
            return Err(Error::OracleMismatch(format!(
                "order is not a permutation: #{id} at position {index}"
            )));
        }
        position[id] = index;
    }

    for &(from, to) in edges {
        if position[from] >= position[to] {
            return Err(Error::InvalidOrder { from, to });
        }
    }
    Ok(())
}

/// Confirm that `edges` is acyclic and `order` respects it.
pub fn verify(n: usize, order: &[VertexId], edges: &[(VertexId, VertexId)]) -> Result<()> {
    if topological_sort(n, edges).is_none() {
        return Err(Error::OracleMismatch(format!(
            "accepted edges contain a cycle through {}",
            format_vertex_ids(&blocked_vertices(n, edges))
        )));
    }
    check_order(n, order, edges)
}
