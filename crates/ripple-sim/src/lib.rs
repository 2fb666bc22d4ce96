#![forbid(unsafe_code)]
//! ripple-sim: linear-threshold influence cascades.
//!
//! # Overview
//!
//! - [`cascade`] — the generational simulator: configuration, percentage
//!   seeding around ranked vertices, and the synchronous-update loop with
//!   an optional per-generation snapshot hook.
//! - [`runner`] — one-call orchestration: rank, seed, run, optionally on
//!   the graph's largest strongly connected component.
//!
//! # Conventions
//!
//! - **Errors**: cascades propagate the graph's typed
//!   [`GraphError`](ripple_graph::GraphError); no panics on bad input.
//! - **Logging**: `tracing` spans on the seeding and run entry points.
//! - **Pacing**: the simulator never sleeps. Animation timing belongs to
//!   the hook owner.

pub mod cascade;
pub mod runner;

pub use cascade::{
    CascadeConfig, CascadeOutcome, CascadeSimulator, GenerationHook, GenerationSnapshot,
};
pub use runner::{CascadeReport, CascadeRunner};
