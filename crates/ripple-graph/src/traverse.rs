//! Traversal primitives: BFS and finish-order DFS.
//!
//! # Overview
//!
//! Both traversals run over the store's dense slot indices with
//! [`FixedBitSet`] visited sets, and translate back to external ids at the
//! boundary. DFS is iterative with an explicit frame stack — recursion
//! depth on a large or skewed social graph would otherwise overflow the
//! call stack.
//!
//! `bfs` backs the separation and closeness queries; `dfs_finish_order`
//! is both a standalone primitive and the workhorse of Kosaraju's SCC
//! decomposition (pass 1 records the global finish order, pass 2 over the
//! transpose records one tree per component).

use std::collections::{HashMap, VecDeque};

use fixedbitset::FixedBitSet;

use crate::error::GraphError;
use crate::store::{Graph, VertexId};

// ---------------------------------------------------------------------------
// BFS
// ---------------------------------------------------------------------------

/// Result of a breadth-first traversal from a single start vertex.
///
/// The key set of `distances` is exactly the set of reached vertices
/// (including the start at distance 0). First visit = shortest path, per
/// the standard unweighted-BFS guarantee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bfs {
    /// The traversal origin.
    pub start: VertexId,
    /// Hop distance from `start` for every reached vertex.
    pub distances: HashMap<VertexId, usize>,
    /// BFS-tree parent for every reached vertex except `start`.
    pub parents: HashMap<VertexId, VertexId>,
}

impl Bfs {
    /// Return `true` if `id` was reached from the start vertex.
    #[must_use]
    pub fn reached(&self, id: VertexId) -> bool {
        self.distances.contains_key(&id)
    }

    /// Number of vertices reached, excluding the start itself.
    #[must_use]
    pub fn reached_peers(&self) -> usize {
        self.distances.len() - 1
    }
}

/// Breadth-first traversal from `start` over out-edges.
///
/// # Errors
///
/// Returns [`GraphError::VertexNotFound`] when `start` is absent.
pub fn bfs(graph: &Graph, start: VertexId) -> Result<Bfs, GraphError> {
    let start_slot = graph.slot_of(start)?;

    let mut visited = FixedBitSet::with_capacity(graph.slot_count());
    let mut distances = HashMap::new();
    let mut parents = HashMap::new();
    let mut dist = vec![0usize; graph.slot_count()];
    let mut queue = VecDeque::from([start_slot]);

    visited.insert(start_slot);
    distances.insert(start, 0);

    while let Some(curr) = queue.pop_front() {
        for &next in graph.out_slots(curr) {
            if !visited.contains(next) {
                visited.insert(next);
                dist[next] = dist[curr] + 1;
                distances.insert(graph.id_of(next), dist[next]);
                parents.insert(graph.id_of(next), graph.id_of(curr));
                queue.push_back(next);
            }
        }
    }

    Ok(Bfs {
        start,
        distances,
        parents,
    })
}

// ---------------------------------------------------------------------------
// DFS with finish order
// ---------------------------------------------------------------------------

/// Result of a sequence of depth-first explorations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DfsForest {
    /// Global postorder: a vertex appears once all of its unvisited
    /// descendants have been explored. Later finishers are later in the
    /// vector.
    pub finish_order: Vec<VertexId>,
    /// Vertex set of each independent DFS tree, in root-visit order.
    /// Over a transposed graph in reverse finish order, each tree is one
    /// strongly connected component.
    pub trees: Vec<Vec<VertexId>>,
}

/// Depth-first exploration of every vertex in `order`, skipping vertices
/// already visited by an earlier root (unknown ids are skipped silently —
/// callers pass vertex snapshots that may outlive minor mutations).
///
/// Iterative, with an explicit `(slot, next-neighbor-index)` frame stack.
#[must_use]
pub fn dfs_finish_order(graph: &Graph, order: &[VertexId]) -> DfsForest {
    let mut visited = FixedBitSet::with_capacity(graph.slot_count());
    let mut finish_order = Vec::with_capacity(graph.slot_count());
    let mut trees = Vec::new();

    for &root in order {
        let Ok(root_slot) = graph.slot_of(root) else {
            continue;
        };
        if visited.contains(root_slot) {
            continue;
        }

        let mut tree = Vec::new();
        let mut frames: Vec<(usize, usize)> = vec![(root_slot, 0)];
        visited.insert(root_slot);
        tree.push(root);

        while let Some(frame) = frames.last_mut() {
            let (slot, cursor) = (frame.0, frame.1);
            if let Some(&next) = graph.out_slots(slot).get(cursor) {
                frame.1 += 1;
                if !visited.contains(next) {
                    visited.insert(next);
                    tree.push(graph.id_of(next));
                    frames.push((next, 0));
                }
            } else {
                // All neighbors explored: this vertex is finished.
                finish_order.push(graph.id_of(slot));
                frames.pop();
            }
        }

        trees.push(tree);
    }

    DfsForest {
        finish_order,
        trees,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
