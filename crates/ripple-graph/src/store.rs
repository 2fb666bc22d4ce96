//! Adjacency-list directed graph store.
//!
//! # Overview
//!
//! [`Graph`] owns the vertex set and all structural state: out-neighbor
//! lists, per-vertex cascade labels, and the cached centrality values the
//! ranker populates lazily. External ids are arbitrary `u32`s; internally
//! every vertex is assigned a dense slot index so traversals can use flat
//! bitsets instead of hashing.
//!
//! ## Mutation semantics
//!
//! Construction is tolerant by design, matching how raw edge-list data is
//! usually consumed: re-adding a vertex is a no-op, adding an edge whose
//! endpoint is missing is a *silent* no-op, and duplicate edges are ignored.
//! Only queries that name a specific vertex (`neighbors`, `label`, …) report
//! [`GraphError::VertexNotFound`].
//!
//! ## Structural-change events
//!
//! An optional [`EventHook`](crate::events::EventHook) observes
//! `VertexAdded` / `EdgeAdded` / `LabelChanged` so an external visualization
//! collaborator can mirror the graph without the core ever importing a
//! rendering dependency. Derived graphs (`transpose`, `egonet`, SCC
//! subgraphs) do not inherit the hook.
//!
//! ## Cache invalidation
//!
//! [`Graph::content_hash`] is a BLAKE3 hash of the sorted edge set. Compare
//! it against a stored value to detect when derived data (rankings) is
//! stale.

#![allow(clippy::module_name_repetitions)]

use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GraphError;
use crate::events::{EventHook, GraphEvent};

/// External vertex identifier. Non-negative by construction; the loader is
/// responsible for rejecting negative ids at the text boundary.
pub type VertexId = u32;

// ---------------------------------------------------------------------------
// Label & metrics
// ---------------------------------------------------------------------------

/// Binary cascade label carried by every vertex.
///
/// Vertices default to `Inactive`; the cascade simulator flips them to
/// `Active` and never back within a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    /// Has not adopted.
    #[default]
    Inactive,
    /// Has adopted.
    Active,
}

impl Label {
    /// Return `true` for [`Label::Active`].
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Cached centrality values, populated lazily by the ranker.
///
/// `None` means "not computed yet". Closeness is additionally absent for
/// vertices whose metric is undefined (zero reachable peers).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VertexMetrics {
    /// Out-degree.
    pub degree: Option<usize>,
    /// Degree plus the summed degrees of all out-neighbors (no dedup).
    pub two_hop_degree: Option<usize>,
    /// Mean BFS hop distance to reached vertices. Lower is more central.
    pub closeness: Option<f64>,
}

// ---------------------------------------------------------------------------
// Separation sentinel
// ---------------------------------------------------------------------------

/// Outcome of a shortest-hop query between two existing vertices.
///
/// "No path" is an ordinary answer for directed graphs, not an error, so it
/// is carried as a sentinel rather than an `Err`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Separation {
    /// Shortest directed path length in hops (0 when start == end).
    Hops(usize),
    /// The end vertex is not reachable from the start vertex.
    Unreachable,
}

impl Separation {
    /// Return the hop count, or `None` when unreachable.
    #[must_use]
    pub const fn hops(self) -> Option<usize> {
        match self {
            Self::Hops(h) => Some(h),
            Self::Unreachable => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Graph
// ---------------------------------------------------------------------------

/// One vertex: its external id, out-neighbors (as dense slots, in insertion
/// order, deduplicated), cascade label, and cached metrics.
struct VertexSlot {
    id: VertexId,
    out: Vec<usize>,
    label: Label,
    metrics: VertexMetrics,
}

/// Adjacency-list directed graph.
///
/// Vertices are `u32` ids; edges are unweighted and directed. Self-loops
/// are permitted. All mutation and query access must be serialized by the
/// caller — the store is single-threaded and performs no internal locking.
#[derive(Default)]
pub struct Graph {
    /// External id → dense slot.
    index: HashMap<VertexId, usize>,
    /// Slot-indexed vertex storage.
    slots: Vec<VertexSlot>,
    /// Maintained incrementally on successful `add_edge`.
    edge_count: usize,
    /// Optional structural-change observer.
    hook: Option<EventHook>,
}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("vertices", &self.slots.len())
            .field("edges", &self.edge_count)
            .field("hook", &self.hook.is_some())
            .finish()
    }
}

impl Graph {
    /// Create a new empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a structural-change observer.
    ///
    /// Replaces any previously installed hook. Events fire synchronously,
    /// in mutation order, only for mutations that actually change the graph.
    pub fn set_event_hook(&mut self, hook: EventHook) {
        self.hook = Some(hook);
    }

    /// Remove the structural-change observer, if any.
    pub fn clear_event_hook(&mut self) {
        self.hook = None;
    }

    fn emit(&mut self, event: GraphEvent) {
        if let Some(hook) = self.hook.as_mut() {
            hook(&event);
        }
    }

    // -----------------------------------------------------------------------
    // Structure: vertices & edges
    // -----------------------------------------------------------------------

    /// Add a vertex. Idempotent: returns `false` (and emits nothing) when
    /// the id is already present.
    pub fn add_vertex(&mut self, id: VertexId) -> bool {
        if self.index.contains_key(&id) {
            return false;
        }
        let slot = self.slots.len();
        self.slots.push(VertexSlot {
            id,
            out: Vec::new(),
            label: Label::Inactive,
            metrics: VertexMetrics::default(),
        });
        self.index.insert(id, slot);
        self.emit(GraphEvent::VertexAdded(id));
        true
    }

    /// Add a directed edge `from → to`.
    ///
    /// Silent no-op (returns `false`) when either endpoint is missing or
    /// the edge already exists — raw edge lists routinely reference absent
    /// vertices and repeat pairs, and the store tolerates both.
    pub fn add_edge(&mut self, from: VertexId, to: VertexId) -> bool {
        let (Some(&from_slot), Some(&to_slot)) = (self.index.get(&from), self.index.get(&to))
        else {
            return false;
        };
        if self.slots[from_slot].out.contains(&to_slot) {
            return false;
        }
        self.slots[from_slot].out.push(to_slot);
        self.edge_count += 1;
        self.emit(GraphEvent::EdgeAdded { from, to });
        true
    }

    /// Return `true` if the vertex id is present.
    #[must_use]
    pub fn contains(&self, id: VertexId) -> bool {
        self.index.contains_key(&id)
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.slots.len()
    }

    /// Number of directed edges.
    #[must_use]
    pub const fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Snapshot of all vertex ids in ascending order.
    #[must_use]
    pub fn vertices(&self) -> Vec<VertexId> {
        let mut ids: Vec<VertexId> = self.slots.iter().map(|v| v.id).collect();
        ids.sort_unstable();
        ids
    }

    /// Snapshot copy of the out-neighbors of `id`, in ascending id order.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexNotFound`] when `id` is absent.
    pub fn neighbors(&self, id: VertexId) -> Result<Vec<VertexId>, GraphError> {
        let slot = self.slot_of(id)?;
        let mut ids: Vec<VertexId> = self.slots[slot]
            .out
            .iter()
            .map(|&n| self.slots[n].id)
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }

    /// Out-degree of `id`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexNotFound`] when `id` is absent.
    pub fn degree(&self, id: VertexId) -> Result<usize, GraphError> {
        Ok(self.slots[self.slot_of(id)?].out.len())
    }

    // -----------------------------------------------------------------------
    // Labels & cached metrics
    // -----------------------------------------------------------------------

    /// Current cascade label of `id`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexNotFound`] when `id` is absent.
    pub fn label(&self, id: VertexId) -> Result<Label, GraphError> {
        Ok(self.slots[self.slot_of(id)?].label)
    }

    /// Flip `id` to [`Label::Active`]. Returns `true` if the label changed.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexNotFound`] when `id` is absent.
    pub fn activate(&mut self, id: VertexId) -> Result<bool, GraphError> {
        self.set_label(id, Label::Active)
    }

    /// Reset `id` to [`Label::Inactive`]. Returns `true` if the label
    /// changed. The cascade never calls this; it exists so callers can
    /// reuse one graph across runs.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexNotFound`] when `id` is absent.
    pub fn deactivate(&mut self, id: VertexId) -> Result<bool, GraphError> {
        self.set_label(id, Label::Inactive)
    }

    fn set_label(&mut self, id: VertexId, label: Label) -> Result<bool, GraphError> {
        let slot = self.slot_of(id)?;
        if self.slots[slot].label == label {
            return Ok(false);
        }
        self.slots[slot].label = label;
        self.emit(GraphEvent::LabelChanged { vertex: id, label });
        Ok(true)
    }

    /// Number of vertices currently labeled [`Label::Active`].
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|v| v.label.is_active()).count()
    }

    /// Read-only cached metrics for `id`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexNotFound`] when `id` is absent.
    pub fn metrics(&self, id: VertexId) -> Result<&VertexMetrics, GraphError> {
        let slot = self.slot_of(id)?;
        Ok(&self.slots[slot].metrics)
    }

    /// Mutable cached metrics for `id` (used by the ranker).
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexNotFound`] when `id` is absent.
    pub fn metrics_mut(&mut self, id: VertexId) -> Result<&mut VertexMetrics, GraphError> {
        let slot = self.slot_of(id)?;
        Ok(&mut self.slots[slot].metrics)
    }

    // -----------------------------------------------------------------------
    // Separation queries
    // -----------------------------------------------------------------------

    /// Shortest directed-hop count from `start` to `end` via BFS.
    ///
    /// Returns `Separation::Hops(0)` when `start == end` and
    /// [`Separation::Unreachable`] when no directed path exists.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexNotFound`] when either endpoint is
    /// absent.
    pub fn degree_separation(
        &self,
        start: VertexId,
        end: VertexId,
    ) -> Result<Separation, GraphError> {
        let start_slot = self.slot_of(start)?;
        let end_slot = self.slot_of(end)?;
        if start_slot == end_slot {
            return Ok(Separation::Hops(0));
        }

        // Plain slot-level BFS with early exit at the target.
        let mut dist = vec![usize::MAX; self.slots.len()];
        let mut queue = VecDeque::from([start_slot]);
        dist[start_slot] = 0;

        while let Some(curr) = queue.pop_front() {
            for &next in &self.slots[curr].out {
                if dist[next] == usize::MAX {
                    dist[next] = dist[curr] + 1;
                    if next == end_slot {
                        return Ok(Separation::Hops(dist[next]));
                    }
                    queue.push_back(next);
                }
            }
        }
        Ok(Separation::Unreachable)
    }

    /// Maximum hop distance from `v` among vertices *reached* from `v`.
    ///
    /// Unreached vertices are excluded rather than treated as infinite, so
    /// this is reachable-set eccentricity, not full-graph eccentricity.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexNotFound`] when `v` is absent.
    pub fn eccentricity(&self, v: VertexId) -> Result<usize, GraphError> {
        let bfs = crate::traverse::bfs(self, v)?;
        Ok(bfs.distances.values().copied().max().unwrap_or(0))
    }

    /// The graph center: the vertex with the smallest [`eccentricity`]
    /// (under the same reachable-set measure). Ties go to the smallest id;
    /// `None` when the graph has no vertices.
    ///
    /// [`eccentricity`]: Self::eccentricity
    #[must_use]
    pub fn min_eccentricity_vertex(&self) -> Option<VertexId> {
        let mut best: Option<(VertexId, usize)> = None;
        for v in self.vertices() {
            let Ok(ecc) = self.eccentricity(v) else {
                continue;
            };
            match best {
                Some((_, min)) if ecc >= min => {}
                _ => best = Some((v, ecc)),
            }
        }
        best.map(|(v, _)| v)
    }

    // -----------------------------------------------------------------------
    // Derived graphs & export
    // -----------------------------------------------------------------------

    /// Induced subgraph around `center`: the center, its out-neighbors, the
    /// edges center→neighbor, and any edges among those neighbors that exist
    /// in this graph. Returns an empty graph when `center` is absent.
    #[must_use]
    pub fn egonet(&self, center: VertexId) -> Self {
        let mut ego = Self::new();
        let Ok(neighbors) = self.neighbors(center) else {
            return ego;
        };

        ego.add_vertex(center);
        for &n in &neighbors {
            ego.add_vertex(n);
            ego.add_edge(center, n);
        }
        // Inter-neighbor edges: add_edge drops anything pointing outside
        // the egonet's vertex set.
        for &n in &neighbors {
            if let Ok(second) = self.neighbors(n) {
                for target in second {
                    ego.add_edge(n, target);
                }
            }
        }
        ego
    }

    /// New graph with every edge direction reversed. Vertex set, labels,
    /// and cached metrics are not carried over; the transpose is a purely
    /// structural view used by the SCC decomposer.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut reversed = Self::new();
        for v in &self.slots {
            reversed.add_vertex(v.id);
        }
        for v in &self.slots {
            for &n in &v.out {
                reversed.add_edge(self.slots[n].id, v.id);
            }
        }
        reversed
    }

    /// Snapshot of the full adjacency structure, id → out-neighbor set,
    /// in deterministic order. This is the read-only surface consumed by
    /// the visualization collaborator.
    #[must_use]
    pub fn export_adjacency(&self) -> BTreeMap<VertexId, BTreeSet<VertexId>> {
        self.slots
            .iter()
            .map(|v| {
                let out: BTreeSet<VertexId> = v.out.iter().map(|&n| self.slots[n].id).collect();
                (v.id, out)
            })
            .collect()
    }

    /// BLAKE3 hash of the sorted edge set, for cache invalidation of
    /// derived data. Changes exactly when the edge set changes.
    #[must_use]
    pub fn content_hash(&self) -> String {
        let mut edges: Vec<(VertexId, VertexId)> = self
            .slots
            .iter()
            .flat_map(|v| v.out.iter().map(|&n| (v.id, self.slots[n].id)))
            .collect();
        edges.sort_unstable();

        let mut hasher = blake3::Hasher::new();
        for (from, to) in edges {
            hasher.update(&from.to_le_bytes());
            hasher.update(&to.to_le_bytes());
        }
        format!("blake3:{}", hasher.finalize())
    }

    // -----------------------------------------------------------------------
    // Dense-slot access for the traversal engine (crate-internal)
    // -----------------------------------------------------------------------

    pub(crate) fn slot_of(&self, id: VertexId) -> Result<usize, GraphError> {
        self.index
            .get(&id)
            .copied()
            .ok_or(GraphError::VertexNotFound(id))
    }

    pub(crate) fn id_of(&self, slot: usize) -> VertexId {
        self.slots[slot].id
    }

    pub(crate) fn out_slots(&self, slot: usize) -> &[usize] {
        &self.slots[slot].out
    }

    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
