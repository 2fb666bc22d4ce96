//! Generational linear-threshold cascade.
//!
//! # Model
//!
//! Every vertex carries a monotone binary label: once `Active`, never back.
//! An `Inactive` vertex adopts in a generation when the fraction of its
//! out-neighbors already `Active` reaches the threshold `b / (a + b)`,
//! where `a` and `b` are the adoption/retention rewards. A vertex with no
//! neighbors has adoption fraction 0 and never transitions spontaneously.
//!
//! # Generation loop
//!
//! The frontier starts as the full vertex set. Each generation evaluates
//! the union of the frontier's out-neighbors against the *previous*
//! generation's labels — all candidates are judged first and activated
//! together, so no transition influences another within the same
//! generation. The newly activated set becomes the next frontier. The run
//! stops at equilibrium (a generation that activates nothing) or at the
//! generation cap.
//!
//! The simulator never sleeps or blocks: pacing for animation is the
//! business of whoever installed the per-generation hook.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use ripple_graph::error::GraphError;
use ripple_graph::store::{Graph, VertexId};
use ripple_rank::topk::RankedList;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Cascade parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeConfig {
    /// Reward for adopting (the "A" side). Higher `reward_a` lowers the
    /// adoption threshold.
    pub reward_a: u32,
    /// Reward for staying (the "B" side).
    pub reward_b: u32,
    /// Maximum number of generations to run.
    pub max_generations: u32,
    /// How many top-ranked vertices to seed a cluster around.
    pub seed_clusters: usize,
    /// Percentage of each cluster center's neighbors to activate when
    /// seeding (rounded up).
    pub seed_percent: u8,
}

impl Default for CascadeConfig {
    fn default() -> Self {
        Self {
            reward_a: 1,
            reward_b: 1,
            max_generations: 50,
            seed_clusters: 3,
            seed_percent: 40,
        }
    }
}

impl CascadeConfig {
    /// Adoption threshold `b / (a + b)`. With both rewards zero the
    /// threshold is 0 and any vertex with an active neighbor adopts.
    ///
    /// The sum is taken in `f64` (exact for any pair of `u32`s), so
    /// extreme reward values cannot overflow.
    #[must_use]
    pub fn threshold(&self) -> f64 {
        if self.reward_a == 0 && self.reward_b == 0 {
            return 0.0;
        }
        f64::from(self.reward_b) / (f64::from(self.reward_a) + f64::from(self.reward_b))
    }
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Snapshot emitted to the per-generation hook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationSnapshot {
    /// Generation index, starting at 0.
    pub generation: u32,
    /// Vertices activated in this generation, ascending.
    pub activated: Vec<VertexId>,
    /// Cumulative count of `Active` vertices after this generation.
    pub active_count: usize,
}

/// Final result of a cascade run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeOutcome {
    /// Total vertices activated by the generation loop (seeds excluded).
    pub activated: usize,
    /// Index of the generation at which the run stopped.
    pub generations: u32,
    /// `true` when the run stopped because a generation activated nothing,
    /// `false` when it hit the generation cap.
    pub equilibrium: bool,
}

/// Per-generation observer. Receives every evaluated generation, including
/// the final empty one that signals equilibrium.
pub type GenerationHook<'a> = Box<dyn FnMut(&GenerationSnapshot) + 'a>;

// ---------------------------------------------------------------------------
// Simulator
// ---------------------------------------------------------------------------

/// Linear-threshold cascade simulator.
///
/// Owns the configuration and an optional generation hook; labels live on
/// the graph itself, so the final assignment remains readable after a run.
pub struct CascadeSimulator<'a> {
    config: CascadeConfig,
    hook: Option<GenerationHook<'a>>,
}

impl std::fmt::Debug for CascadeSimulator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CascadeSimulator")
            .field("config", &self.config)
            .field("hook", &self.hook.is_some())
            .finish()
    }
}

impl<'a> CascadeSimulator<'a> {
    /// Create a simulator with the given parameters.
    #[must_use]
    pub const fn new(config: CascadeConfig) -> Self {
        Self { config, hook: None }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &CascadeConfig {
        &self.config
    }

    /// Install a per-generation observer.
    pub fn set_generation_hook(&mut self, hook: GenerationHook<'a>) {
        self.hook = Some(hook);
    }

    /// Seed the cascade from a ranked list: for each of the top
    /// `seed_clusters` entries, activate `ceil(|N| × seed_percent / 100)`
    /// of its currently-inactive neighbors, visiting neighbors in
    /// ascending id order. Returns the seeded vertex ids.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexNotFound`] when the ranked list refers
    /// to vertices absent from `graph` (rankings from a different graph).
    #[instrument(skip(self, graph, ranked))]
    pub fn seed(
        &self,
        graph: &mut Graph,
        ranked: &RankedList,
    ) -> Result<Vec<VertexId>, GraphError> {
        let mut seeded = Vec::new();
        let centers = ranked.ids();

        for &center in centers.iter().take(self.config.seed_clusters) {
            let neighbors = graph.neighbors(center)?;
            let quota = (neighbors.len() * usize::from(self.config.seed_percent)).div_ceil(100);

            let mut planted = 0usize;
            for n in neighbors {
                if planted >= quota {
                    break;
                }
                if !graph.label(n)?.is_active() {
                    graph.activate(n)?;
                    seeded.push(n);
                    planted += 1;
                }
            }
        }

        info!(seeded = seeded.len(), "cascade seeded");
        Ok(seeded)
    }

    /// Run the generation loop to equilibrium or the generation cap.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexNotFound`] only if the graph is mutated
    /// out from under the run (callers must serialize access).
    #[instrument(skip(self, graph), fields(vertices = graph.vertex_count()))]
    pub fn run(&mut self, graph: &mut Graph) -> Result<CascadeOutcome, GraphError> {
        let threshold = self.config.threshold();
        let mut frontier: Vec<VertexId> = graph.vertices();
        let mut total = 0usize;

        for generation in 0..self.config.max_generations {
            // Candidates: union of the frontier's out-neighbors. BTreeSet
            // gives each candidate one evaluation and a stable order.
            let mut candidates: BTreeSet<VertexId> = BTreeSet::new();
            for &v in &frontier {
                candidates.extend(graph.neighbors(v)?);
            }

            // Judge every candidate against the labels as they stood at
            // the end of the previous generation, then flip together.
            let mut to_activate = Vec::new();
            for &v in &candidates {
                if !graph.label(v)?.is_active() && self.adopts(graph, v, threshold)? {
                    to_activate.push(v);
                }
            }
            for &v in &to_activate {
                graph.activate(v)?;
            }
            total += to_activate.len();

            debug!(
                generation,
                activated = to_activate.len(),
                "cascade generation complete"
            );
            if let Some(hook) = self.hook.as_mut() {
                hook(&GenerationSnapshot {
                    generation,
                    activated: to_activate.clone(),
                    active_count: graph.active_count(),
                });
            }

            if to_activate.is_empty() {
                info!(
                    total,
                    generation, "cascade reached equilibrium"
                );
                return Ok(CascadeOutcome {
                    activated: total,
                    generations: generation,
                    equilibrium: true,
                });
            }
            frontier = to_activate;
        }

        info!(total, "cascade hit generation cap");
        Ok(CascadeOutcome {
            activated: total,
            generations: self.config.max_generations,
            equilibrium: false,
        })
    }

    /// Threshold rule: active-neighbor fraction ≥ `b / (a + b)`. A vertex
    /// with zero neighbors never adopts.
    #[allow(clippy::cast_precision_loss)]
    fn adopts(&self, graph: &Graph, v: VertexId, threshold: f64) -> Result<bool, GraphError> {
        let neighbors = graph.neighbors(v)?;
        if neighbors.is_empty() {
            return Ok(false);
        }
        let mut active = 0usize;
        for n in &neighbors {
            if graph.label(*n)?.is_active() {
                active += 1;
            }
        }
        Ok(active as f64 / neighbors.len() as f64 >= threshold)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use ripple_rank::topk::Order;

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

    /// Mirrored chain 1↔2↔3↔4↔5.
    fn chain() -> Graph {
        graph_from(&[
            (1, 2),
            (2, 1),
            (2, 3),
            (3, 2),
            (3, 4),
            (4, 3),
            (4, 5),
            (5, 4),
        ])
    }

    fn half_threshold() -> CascadeConfig {
        // a = b = 1 → threshold 0.5.
        CascadeConfig::default()
    }

    #[test]
    fn threshold_is_b_over_a_plus_b() {
        let config = CascadeConfig {
            reward_a: 2,
            reward_b: 1,
            ..CascadeConfig::default()
        };
        assert!((config.threshold() - 1.0 / 3.0).abs() < f64::EPSILON);
        assert!((half_threshold().threshold() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn threshold_survives_extreme_rewards() {
        // The reward sum must not overflow u32 arithmetic.
        let lopsided = CascadeConfig {
            reward_a: u32::MAX,
            reward_b: 1,
            ..CascadeConfig::default()
        };
        let t = lopsided.threshold();
        assert!(t > 0.0 && t < 1e-9);

        let both_max = CascadeConfig {
            reward_a: u32::MAX,
            reward_b: u32::MAX,
            ..CascadeConfig::default()
        };
        assert!((both_max.threshold() - 0.5).abs() < f64::EPSILON);

        let zero = CascadeConfig {
            reward_a: 0,
            reward_b: 0,
            ..CascadeConfig::default()
        };
        assert!(zero.threshold().abs() < f64::EPSILON);
    }

    #[test]
    fn cascade_spreads_down_a_chain() {
        // Activating 1 tips 2 (1 of 2 neighbors ≥ 0.5), then 3, and so on.
        let mut g = chain();
        g.activate(1).expect("present");

        let mut sim = CascadeSimulator::new(half_threshold());
        let outcome = sim.run(&mut g).expect("consistent graph");

        assert!(outcome.equilibrium);
        assert_eq!(g.active_count(), 5, "whole chain adopts");
        // 2,3,4 tip one per generation; 5 needs 4 active but its only
        // neighbor is 4, so it tips right after (fraction 1/1).
        assert_eq!(outcome.activated, 4);
    }

    #[test]
    fn unseeded_graph_reaches_equilibrium_at_generation_zero() {
        let mut g = chain();
        let mut sim = CascadeSimulator::new(half_threshold());
        let outcome = sim.run(&mut g).expect("consistent graph");

        assert_eq!(outcome.activated, 0);
        assert_eq!(outcome.generations, 0);
        assert!(outcome.equilibrium);
    }

    #[test]
    fn zero_neighbor_vertices_never_transition_spontaneously() {
        let mut g = Graph::new();
        g.add_vertex(1);
        g.add_vertex(2);

        let mut sim = CascadeSimulator::new(CascadeConfig {
            reward_a: u32::MAX,
            reward_b: 0, // threshold 0: anything with a neighbor would adopt
            ..CascadeConfig::default()
        });
        let outcome = sim.run(&mut g).expect("consistent graph");
        assert_eq!(outcome.activated, 0);
        assert_eq!(g.active_count(), 0);
    }

    #[test]
    fn update_is_synchronous_within_a_generation() {
        // 1 → 2 → 3, mirrored, with 1 active. In generation 0, vertex 2
        // tips (1/2 active), but 3 must not see 2's flip until the next
        // generation.
        let mut g = graph_from(&[(1, 2), (2, 1), (2, 3), (3, 2)]);
        g.activate(1).expect("present");

        let mut generations: Vec<Vec<VertexId>> = Vec::new();
        let mut sim = CascadeSimulator::new(half_threshold());
        sim.set_generation_hook(Box::new(|snapshot: &GenerationSnapshot| {
            generations.push(snapshot.activated.clone());
        }));
        let outcome = sim.run(&mut g).expect("consistent graph");
        drop(sim);

        assert!(outcome.equilibrium);
        assert_eq!(generations[0], vec![2], "only 2 tips in generation 0");
        assert_eq!(generations[1], vec![3], "3 tips one generation later");
    }

    #[test]
    fn active_set_is_monotonically_nondecreasing() {
        let mut g = chain();
        g.activate(3).expect("present");

        let mut counts: Vec<usize> = Vec::new();
        let mut sim = CascadeSimulator::new(half_threshold());
        sim.set_generation_hook(Box::new(|snapshot: &GenerationSnapshot| {
            counts.push(snapshot.active_count);
        }));
        sim.run(&mut g).expect("consistent graph");
        drop(sim);

        assert!(counts.windows(2).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn generation_cap_stops_a_running_cascade() {
        // Long mirrored chain seeded at one end: needs many generations.
        let mut g = Graph::new();
        for v in 0..30 {
            g.add_vertex(v);
        }
        for v in 0..29 {
            g.add_edge(v, v + 1);
            g.add_edge(v + 1, v);
        }
        g.activate(0).expect("present");

        let mut sim = CascadeSimulator::new(CascadeConfig {
            max_generations: 5,
            ..half_threshold()
        });
        let outcome = sim.run(&mut g).expect("consistent graph");

        assert!(!outcome.equilibrium);
        assert_eq!(outcome.generations, 5);
        assert!(g.active_count() < 30);
    }

    #[test]
    fn high_retention_reward_blocks_the_cascade() {
        // threshold 0.9: one active neighbor out of two is not enough.
        let mut g = chain();
        g.activate(1).expect("present");

        let mut sim = CascadeSimulator::new(CascadeConfig {
            reward_a: 1,
            reward_b: 9,
            ..CascadeConfig::default()
        });
        let outcome = sim.run(&mut g).expect("consistent graph");

        // Vertex 2 sees 1 of 2 active, below 0.9, and no vertex has a
        // single already-active neighbor. Nothing tips.
        assert_eq!(outcome.activated, 0);
        assert!(outcome.equilibrium);
        assert_eq!(g.active_count(), 1);
    }

    #[test]
    fn outcome_serializes_with_stable_field_names() {
        let outcome = CascadeOutcome {
            activated: 4,
            generations: 2,
            equilibrium: true,
        };
        let json = serde_json::to_value(outcome).expect("plain struct");
        assert_eq!(json["activated"], 4);
        assert_eq!(json["generations"], 2);
        assert_eq!(json["equilibrium"], true);
    }

    // -----------------------------------------------------------------------
    // Seeding
    // -----------------------------------------------------------------------

    #[test]
    fn seeding_activates_ceil_of_neighbor_percentage() {
        // Hub 1 with five neighbors; 40% of 5 = 2.
        let mut g = graph_from(&[(1, 2), (1, 3), (1, 4), (1, 5), (1, 6)]);
        let mut list = RankedList::new(Order::Descending, 1);
        list.insert(1, 5.0);

        let sim = CascadeSimulator::new(CascadeConfig {
            seed_clusters: 1,
            seed_percent: 40,
            ..CascadeConfig::default()
        });
        let seeded = sim.seed(&mut g, &list).expect("list matches graph");

        assert_eq!(seeded, vec![2, 3], "ascending order, first two");
        assert_eq!(g.active_count(), 2);
    }

    #[test]
    fn seeding_rounds_up_not_down() {
        // Three neighbors at 40%: 1.2 → ceil → 2.
        let mut g = graph_from(&[(1, 2), (1, 3), (1, 4)]);
        let mut list = RankedList::new(Order::Descending, 1);
        list.insert(1, 3.0);

        let sim = CascadeSimulator::new(CascadeConfig {
            seed_clusters: 1,
            seed_percent: 40,
            ..CascadeConfig::default()
        });
        let seeded = sim.seed(&mut g, &list).expect("list matches graph");
        assert_eq!(seeded.len(), 2);
    }

    #[test]
    fn seeding_skips_already_active_neighbors() {
        let mut g = graph_from(&[(1, 2), (1, 3), (1, 4)]);
        g.activate(2).expect("present");

        let mut list = RankedList::new(Order::Descending, 1);
        list.insert(1, 3.0);

        let sim = CascadeSimulator::new(CascadeConfig {
            seed_clusters: 1,
            seed_percent: 67, // ceil(3 * 0.67) = 3: quota covers all neighbors
            ..CascadeConfig::default()
        });
        let seeded = sim.seed(&mut g, &list).expect("list matches graph");

        // 2 was already active: not re-seeded, and it does not count
        // against the quota of fresh activations either.
        assert_eq!(seeded, vec![3, 4]);
    }

    #[test]
    fn seeding_uses_at_most_the_configured_cluster_count() {
        let mut g = graph_from(&[(1, 2), (3, 4), (5, 6)]);
        let mut list = RankedList::new(Order::Descending, 3);
        list.insert(1, 3.0);
        list.insert(3, 2.0);
        list.insert(5, 1.0);

        let sim = CascadeSimulator::new(CascadeConfig {
            seed_clusters: 2,
            seed_percent: 100,
            ..CascadeConfig::default()
        });
        let seeded = sim.seed(&mut g, &list).expect("list matches graph");
        assert_eq!(seeded, vec![2, 4], "third cluster never touched");
    }

    #[test]
    fn seeding_from_foreign_rankings_errors() {
        let mut g = graph_from(&[(1, 2)]);
        let mut list = RankedList::new(Order::Descending, 1);
        list.insert(99, 1.0);

        let sim = CascadeSimulator::new(CascadeConfig {
            seed_clusters: 1,
            ..CascadeConfig::default()
        });
        assert_eq!(
            sim.seed(&mut g, &list),
            Err(GraphError::VertexNotFound(99))
        );
    }
}
