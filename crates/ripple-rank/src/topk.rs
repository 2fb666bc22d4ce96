//! Bounded, continuously sorted top-K lists.
//!
//! A [`RankedList`] holds at most `bound` entries, sorted by score under an
//! [`Order`] policy (descending for the degree-family metrics, ascending
//! for closeness). Insertion locates the position by binary search; when
//! the list is full, a candidate that does not strictly outrank the current
//! worst entry is rejected outright, and an accepted insertion evicts the
//! worst-ranked tail entry.

use ripple_graph::store::VertexId;

/// Sort policy for a ranked list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    /// Higher scores rank better (degree, two-hop degree).
    Descending,
    /// Lower scores rank better (closeness).
    Ascending,
}

impl Order {
    /// `true` when `a` strictly outranks `b` under this policy.
    #[must_use]
    fn outranks(self, a: f64, b: f64) -> bool {
        match self {
            Self::Descending => a > b,
            Self::Ascending => a < b,
        }
    }
}

/// One scored vertex in a ranked list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedEntry {
    /// The ranked vertex.
    pub vertex: VertexId,
    /// Its metric score.
    pub score: f64,
}

/// Size-bounded, continuously sorted list of the best-scoring vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedList {
    entries: Vec<RankedEntry>,
    bound: usize,
    order: Order,
}

impl RankedList {
    /// Create an empty list holding at most `bound` entries (raised to 1
    /// when 0 is passed — a ranking always retains at least the best
    /// vertex).
    #[must_use]
    pub fn new(order: Order, bound: usize) -> Self {
        Self {
            entries: Vec::with_capacity(bound.max(1)),
            bound: bound.max(1),
            order,
        }
    }

    /// Bound for a "top `percent`%" list over `vertex_count` vertices:
    /// `ceil(percent/100 × |V|)`, minimum 1.
    #[must_use]
    pub const fn percent_bound(percent: u8, vertex_count: usize) -> usize {
        let exact = (vertex_count * percent as usize).div_ceil(100);
        if exact == 0 { 1 } else { exact }
    }

    /// Insert `vertex` with `score`, keeping the list sorted and bounded.
    ///
    /// Returns `false` without modifying the list when the score is
    /// non-finite (an undefined metric must never enter ranking
    /// comparisons) or when the list is full and the candidate does not
    /// strictly outrank the current worst entry.
    pub fn insert(&mut self, vertex: VertexId, score: f64) -> bool {
        if !score.is_finite() {
            return false;
        }
        if self.entries.len() >= self.bound {
            // Tail is always the worst-ranked entry under either order.
            let worst = self.entries[self.entries.len() - 1].score;
            if !self.order.outranks(score, worst) {
                return false;
            }
        }

        let position = self
            .entries
            .partition_point(|e| self.order.outranks(e.score, score));
        self.entries.insert(position, RankedEntry { vertex, score });
        self.entries.truncate(self.bound);
        true
    }

    /// The entries, best-ranked first.
    #[must_use]
    pub fn entries(&self) -> &[RankedEntry] {
        &self.entries
    }

    /// Snapshot of the vertex ids, best-ranked first.
    #[must_use]
    pub fn ids(&self) -> Vec<VertexId> {
        self.entries.iter().map(|e| e.vertex).collect()
    }

    /// Maximum number of entries retained.
    #[must_use]
    pub const fn bound(&self) -> usize {
        self.bound
    }

    /// The sort policy.
    #[must_use]
    pub const fn order(&self) -> Order {
        self.order
    }

    /// Current number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when no entries have been accepted yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `true` when consecutive entries never improve down the list — the
    /// invariant every insertion must preserve.
    #[must_use]
    pub fn is_sorted(&self) -> bool {
        self.entries
            .windows(2)
            .all(|w| !self.order.outranks(w[1].score, w[0].score))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
