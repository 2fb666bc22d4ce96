//! Typed errors for graph queries.
//!
//! Only queries that *name* a vertex can fail. Construction-time problems
//! (duplicate vertices, duplicate edges, edges with missing endpoints) are
//! tolerated as silent no-ops, and "no path" is the
//! [`Separation::Unreachable`](crate::store::Separation) sentinel rather
//! than an error.

use crate::store::VertexId;

/// Error returned by graph queries that reference a specific vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// The vertex id is not present in the graph.
    #[error("vertex not found in graph: {0}")]
    VertexNotFound(VertexId),
}
