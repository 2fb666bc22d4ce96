#![forbid(unsafe_code)]
//! ripple-graph: the adjacency-list graph store and traversal core.
//!
//! # Overview
//!
//! This crate is the foundation of the ripple analysis engine:
//!
//! - [`store`] — the directed [`Graph`] itself: vertex/edge construction,
//!   neighbor snapshots, separation queries, egonet extraction, transpose,
//!   adjacency export, cascade labels, and cached centrality fields.
//! - [`traverse`] — BFS (shortest hop distances) and iterative DFS with
//!   finish-order recording.
//! - [`scc`] — Kosaraju's two-pass strongly-connected-component
//!   decomposition, with induced-subgraph materialization.
//! - [`loader`] — the edge-list text loader collaborator.
//! - [`events`] — structural-change events for an external visualization
//!   collaborator.
//!
//! # Conventions
//!
//! - **Errors**: typed [`GraphError`] for vertex lookups; `anyhow::Result`
//!   with context at the loader's I/O boundary; sentinels
//!   ([`Separation::Unreachable`]) for non-error query outcomes.
//! - **Logging**: `tracing` macros; no subscriber is installed here.
//! - **Concurrency**: none. Callers serialize all access to a [`Graph`].

pub mod error;
pub mod events;
pub mod loader;
pub mod scc;
pub mod store;
pub mod traverse;

pub use error::GraphError;
pub use events::{EventHook, GraphEvent};
pub use store::{Graph, Label, Separation, VertexId, VertexMetrics};
