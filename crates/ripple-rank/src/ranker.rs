//! Ranking passes: compute a metric for every vertex, cache it on the
//! graph, and maintain the bounded top lists.
//!
//! # Overview
//!
//! [`CentralityRanker`] walks the vertex set once per metric. Each computed
//! value is written into the vertex's cached metric fields (the read-only
//! surface the visualization collaborator consumes) and offered to a
//! [`RankedList`] bounded to the configured top percentage of the vertex
//! count. The degree pass also collects the periphery: vertices with
//! exactly one out-neighbor, the outer edge of the network.
//!
//! A full [`Rankings`] carries the graph's content hash at computation
//! time, so callers can detect stale rankings after structural mutation.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use ripple_graph::store::{Graph, VertexId};

use crate::metrics;
use crate::topk::{Order, RankedList};

/// Which centrality measure a ranking (or a cascade seeding) is based on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeedMetric {
    /// Out-neighbor count, descending.
    Degree,
    /// Degree plus summed neighbor degrees, descending.
    TwoHopDegree,
    /// Mean hop distance to reached vertices, ascending.
    Closeness,
}

/// Computed rankings for one graph snapshot.
#[derive(Debug, Clone)]
pub struct Rankings {
    /// Top vertices by degree, best first.
    pub degree: RankedList,
    /// Top vertices by two-hop degree, best first.
    pub two_hop: RankedList,
    /// Top vertices by closeness (lowest mean distance first). Vertices
    /// with undefined closeness never appear.
    pub closeness: RankedList,
    /// Vertices with exactly one out-neighbor, in ascending id order.
    pub periphery: Vec<VertexId>,
    /// `Graph::content_hash` at computation time.
    content_hash: String,
}

impl Rankings {
    /// The list for `metric`.
    #[must_use]
    pub const fn list(&self, metric: SeedMetric) -> &RankedList {
        match metric {
            SeedMetric::Degree => &self.degree,
            SeedMetric::TwoHopDegree => &self.two_hop,
            SeedMetric::Closeness => &self.closeness,
        }
    }

    /// `true` when these rankings were computed from a graph with the same
    /// edge set as `graph`.
    #[must_use]
    pub fn is_valid_for(&self, graph: &Graph) -> bool {
        self.content_hash == graph.content_hash()
    }
}

/// Computes centrality rankings over a graph.
#[derive(Debug, Clone, Copy)]
pub struct CentralityRanker {
    /// Percentage of the vertex count retained in each top list (0 is
    /// raised to a single entry; values above 100 are clamped).
    percent: u8,
}

impl Default for CentralityRanker {
    /// Top 10% of vertices per list.
    fn default() -> Self {
        Self { percent: 10 }
    }
}

impl CentralityRanker {
    /// Ranker retaining the top `percent`% of vertices per list.
    #[must_use]
    pub fn new(percent: u8) -> Self {
        Self {
            percent: percent.min(100),
        }
    }

    fn empty_list(&self, graph: &Graph, order: Order) -> RankedList {
        RankedList::new(
            order,
            RankedList::percent_bound(self.percent, graph.vertex_count()),
        )
    }

    /// Rank every vertex by out-degree, caching each value on the graph.
    /// Also returns the periphery (degree-1 vertices) via [`Self::rank`].
    #[must_use]
    pub fn rank_degree(&self, graph: &mut Graph) -> RankedList {
        self.degree_pass(graph).0
    }

    /// Rank every vertex by two-hop degree, caching each value.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn rank_two_hop(&self, graph: &mut Graph) -> RankedList {
        let mut list = self.empty_list(graph, Order::Descending);
        for v in graph.vertices() {
            let Ok(value) = metrics::two_hop_degree(graph, v) else {
                continue;
            };
            if let Ok(m) = graph.metrics_mut(v) {
                m.two_hop_degree = Some(value);
            }
            list.insert(v, value as f64);
        }
        list
    }

    /// Rank every vertex by closeness, caching each defined value.
    /// Vertices with undefined closeness (zero reachable peers) keep an
    /// empty cache entry and are excluded from the list.
    #[must_use]
    pub fn rank_closeness(&self, graph: &mut Graph) -> RankedList {
        let mut list = self.empty_list(graph, Order::Ascending);
        let mut undefined = 0usize;
        for v in graph.vertices() {
            match metrics::closeness(graph, v) {
                Ok(value) => {
                    if let Ok(m) = graph.metrics_mut(v) {
                        m.closeness = Some(value);
                    }
                    list.insert(v, value);
                }
                Err(_) => undefined += 1,
            }
        }
        if undefined > 0 {
            debug!(undefined, "vertices excluded from closeness ranking");
        }
        list
    }

    /// Run all three ranking passes and snapshot the content hash.
    #[must_use]
    #[instrument(skip(self, graph), fields(vertices = graph.vertex_count()))]
    pub fn rank(&self, graph: &mut Graph) -> Rankings {
        let content_hash = graph.content_hash();
        let (degree, periphery) = self.degree_pass(graph);
        Rankings {
            degree,
            two_hop: self.rank_two_hop(graph),
            closeness: self.rank_closeness(graph),
            periphery,
            content_hash,
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn degree_pass(&self, graph: &mut Graph) -> (RankedList, Vec<VertexId>) {
        let mut list = self.empty_list(graph, Order::Descending);
        let mut periphery = Vec::new();
        for v in graph.vertices() {
            let Ok(value) = graph.degree(v) else {
                continue;
            };
            if let Ok(m) = graph.metrics_mut(v) {
                m.degree = Some(value);
            }
            if value == 1 {
                periphery.push(v);
            }
            list.insert(v, value as f64);
        }
        (list, periphery)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
