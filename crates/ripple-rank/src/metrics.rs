//! Per-vertex centrality metrics.
//!
//! # Overview
//!
//! Three measures over the directed graph:
//!
//! - **degree** — out-neighbor count; higher is more central.
//! - **two-hop degree** — degree plus the summed degrees of all
//!   out-neighbors. Deliberately does NOT deduplicate vertices reachable
//!   via several first-hop paths, and does not exclude the origin from the
//!   neighbor-of-neighbor sums. A hub shared by many neighbors is counted
//!   once per neighbor; the quirk is part of the measure's definition here.
//! - **closeness** — mean BFS hop distance to *reached* vertices; lower is
//!   more central. Unreached vertices are excluded from the average, and a
//!   vertex that reaches nothing has no closeness at all
//!   ([`MetricError::Undefined`]) — never a NaN that could poison ranking
//!   comparisons.

use ripple_graph::error::GraphError;
use ripple_graph::store::{Graph, VertexId};
use ripple_graph::traverse::bfs;

/// Error produced by metric computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MetricError {
    /// The vertex does not exist.
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// Closeness is undefined: the vertex reaches zero peers.
    #[error("closeness undefined for vertex {0}: no reachable peers")]
    Undefined(VertexId),
}

/// Degree centrality: the out-neighbor count of `v`.
///
/// # Errors
///
/// Returns [`GraphError::VertexNotFound`] when `v` is absent.
pub fn degree(graph: &Graph, v: VertexId) -> Result<usize, GraphError> {
    graph.degree(v)
}

/// Two-hop degree centrality: `|N(v)| + Σ |N(n)|` over `n ∈ N(v)`.
///
/// # Errors
///
/// Returns [`GraphError::VertexNotFound`] when `v` is absent.
pub fn two_hop_degree(graph: &Graph, v: VertexId) -> Result<usize, GraphError> {
    let neighbors = graph.neighbors(v)?;
    let mut total = neighbors.len();
    for n in neighbors {
        total += graph.degree(n)?;
    }
    Ok(total)
}

/// Closeness centrality: mean BFS hop distance from `v` to every vertex it
/// reaches.
///
/// # Errors
///
/// Returns [`MetricError::Undefined`] when `v` reaches zero peers, and
/// [`MetricError::Graph`] when `v` is absent.
#[allow(clippy::cast_precision_loss)]
pub fn closeness(graph: &Graph, v: VertexId) -> Result<f64, MetricError> {
    let result = bfs(graph, v)?;
    let reached = result.reached_peers();
    if reached == 0 {
        return Err(MetricError::Undefined(v));
    }
    let total_hops: usize = result.distances.values().sum();
    Ok(total_hops as f64 / reached as f64)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
