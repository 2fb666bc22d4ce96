//! Strongly connected component decomposition (Kosaraju's algorithm).
//!
//! # Algorithm
//!
//! 1. DFS over the original graph in ascending vertex order, recording the
//!    global finish order.
//! 2. Transpose the graph.
//! 3. DFS over the transpose, visiting roots in *reverse* finish order:
//!    each independent DFS tree of this pass is exactly one SCC.
//! 4. Optionally materialize each component as an induced subgraph (edges
//!    restricted to same-component endpoints of the original graph).
//!
//! The partition covers the vertex set exactly once. Component *content*
//! is deterministic by Kosaraju's correctness argument; for deterministic
//! *presentation* the members are sorted ascending and the components are
//! ordered by descending size, then by smallest member id.

use tracing::{debug, instrument};

use crate::store::{Graph, VertexId};
use crate::traverse::dfs_finish_order;

/// The SCC partition of a graph: disjoint vertex-id groups covering the
/// full vertex set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SccPartition {
    components: Vec<Vec<VertexId>>,
}

/// Decompose `graph` into strongly connected components.
#[must_use]
#[instrument(skip(graph), fields(vertices = graph.vertex_count(), edges = graph.edge_count()))]
pub fn decompose(graph: &Graph) -> SccPartition {
    // Pass 1: global finish order over the original graph.
    let pass1 = dfs_finish_order(graph, &graph.vertices());

    // Pass 2: DFS over the transpose in reverse finish order. Each tree
    // rooted here is one SCC.
    let transposed = graph.transpose();
    let mut roots = pass1.finish_order;
    roots.reverse();
    let pass2 = dfs_finish_order(&transposed, &roots);

    let mut components: Vec<Vec<VertexId>> = pass2
        .trees
        .into_iter()
        .map(|mut members| {
            members.sort_unstable();
            members
        })
        .collect();
    components.sort_unstable_by(|a, b| b.len().cmp(&a.len()).then_with(|| a[0].cmp(&b[0])));

    debug!(components = components.len(), "scc decomposition complete");
    SccPartition { components }
}

impl SccPartition {
    /// The component groups: each is a sorted, non-empty vertex-id list.
    #[must_use]
    pub fn components(&self) -> &[Vec<VertexId>] {
        &self.components
    }

    /// Number of components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// `true` when the source graph had no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Members of the largest component (ties broken by smallest member
    /// id, per the partition's ordering). `None` for an empty graph.
    #[must_use]
    pub fn largest(&self) -> Option<&[VertexId]> {
        self.components.first().map(Vec::as_slice)
    }

    /// Materialize component `index` as an induced subgraph of `source`:
    /// the component's vertices plus every source edge whose endpoints both
    /// lie in the component.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[must_use]
    pub fn subgraph(&self, source: &Graph, index: usize) -> Graph {
        induced_subgraph(source, &self.components[index])
    }

    /// Materialize every component as an induced subgraph, in partition
    /// order.
    #[must_use]
    pub fn subgraphs(&self, source: &Graph) -> Vec<Graph> {
        (0..self.components.len())
            .map(|i| self.subgraph(source, i))
            .collect()
    }

    /// Induced subgraph of the largest component; empty graph when the
    /// source had no vertices. The cascade driver runs on this by default.
    #[must_use]
    pub fn largest_subgraph(&self, source: &Graph) -> Graph {
        self.largest()
            .map_or_else(Graph::new, |members| induced_subgraph(source, members))
    }
}

/// Induced subgraph of `source` over `members`: the given vertices and
/// every source edge between two of them. Member ids absent from `source`
/// become isolated vertices.
fn induced_subgraph(source: &Graph, members: &[VertexId]) -> Graph {
    let mut sub = Graph::new();
    for &v in members {
        sub.add_vertex(v);
    }
    for &v in members {
        if let Ok(neighbors) = source.neighbors(v) {
            for n in neighbors {
                // add_edge drops targets outside the member set.
                sub.add_edge(v, n);
            }
        }
    }
    sub
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_from(edges: &[(VertexId, VertexId)]) -> Graph {
        let mut g = Graph::new();
        for &(from, to) in edges {
            g.add_vertex(from);
            g.add_vertex(to);
            g.add_edge(from, to);
        }
        g
    }

    #[test]
    fn bidirectional_chain_is_one_component() {
        let g = graph_from(&[(1, 2), (2, 1), (2, 3), (3, 2), (3, 4), (4, 3)]);
        let partition = decompose(&g);
        assert_eq!(partition.len(), 1);
        assert_eq!(partition.largest().expect("non-empty"), &[1, 2, 3, 4]);
    }

    #[test]
    fn directed_chain_is_all_singletons() {
        let g = graph_from(&[(1, 2), (2, 3), (3, 4)]);
        let partition = decompose(&g);
        assert_eq!(partition.len(), 4);
        for component in partition.components() {
            assert_eq!(component.len(), 1);
        }
    }

    #[test]
    fn mixed_components_and_ordering() {
        // SCC {1,2,3} (cycle), SCC {4,5} (2-cycle), singleton 6.
        let g = graph_from(&[(1, 2), (2, 3), (3, 1), (3, 4), (4, 5), (5, 4), (5, 6)]);
        let partition = decompose(&g);

        assert_eq!(partition.len(), 3);
        assert_eq!(partition.components()[0], vec![1, 2, 3]);
        assert_eq!(partition.components()[1], vec![4, 5]);
        assert_eq!(partition.components()[2], vec![6]);
    }

    #[test]
    fn self_loop_is_a_singleton_component() {
        let mut g = graph_from(&[(1, 2)]);
        g.add_edge(2, 2);
        let partition = decompose(&g);
        assert_eq!(partition.len(), 2);
    }

    #[test]
    fn partition_covers_vertex_set_exactly_once() {
        let g = graph_from(&[
            (18, 23),
            (23, 18),
            (23, 25),
            (25, 23),
            (44, 32),
            (32, 50),
            (50, 44),
            (65, 18),
        ]);
        let partition = decompose(&g);

        let mut all: Vec<VertexId> = partition.components().iter().flatten().copied().collect();
        all.sort_unstable();
        assert_eq!(all, g.vertices(), "no omission, no duplication");
    }

    #[test]
    fn empty_graph_has_empty_partition() {
        let g = Graph::new();
        let partition = decompose(&g);
        assert!(partition.is_empty());
        assert!(partition.largest().is_none());
        assert_eq!(partition.largest_subgraph(&g).vertex_count(), 0);
    }

    #[test]
    fn subgraph_restricts_edges_to_the_component() {
        // {1,2} is an SCC; 1→3 leaves the component.
        let g = graph_from(&[(1, 2), (2, 1), (1, 3)]);
        let partition = decompose(&g);

        let scc = partition
            .components()
            .iter()
            .position(|c| c.len() == 2)
            .expect("two-vertex component exists");
        let sub = partition.subgraph(&g, scc);

        assert_eq!(sub.vertices(), vec![1, 2]);
        assert_eq!(sub.edge_count(), 2);
        assert!(!sub.contains(3));
    }

    #[test]
    fn largest_subgraph_keeps_internal_structure() {
        let g = graph_from(&[(1, 2), (2, 3), (3, 1), (3, 4)]);
        let partition = decompose(&g);
        let largest = partition.largest_subgraph(&g);

        assert_eq!(largest.vertices(), vec![1, 2, 3]);
        assert_eq!(largest.edge_count(), 3);
        // Internally the component is still strongly connected.
        for (a, b) in [(1, 3), (3, 2), (2, 1)] {
            assert!(
                largest
                    .degree_separation(a, b)
                    .expect("present")
                    .hops()
                    .is_some()
            );
        }
    }
}
