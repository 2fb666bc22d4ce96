#![forbid(unsafe_code)]
//! ripple-rank: centrality metrics and bounded top-K rankings.
//!
//! # Overview
//!
//! - [`metrics`] — degree, two-hop degree, and closeness per vertex.
//! - [`topk`] — the size-bounded, continuously sorted [`RankedList`].
//! - [`ranker`] — full ranking passes that cache metric values on the
//!   graph and assemble [`Rankings`] with content-hash staleness checks.
//!
//! # Conventions
//!
//! - **Errors**: typed [`MetricError`]; an undefined closeness is an error
//!   value, never a NaN.
//! - **Logging**: `tracing` macros; `#[instrument]` on the full ranking
//!   pass.

pub mod metrics;
pub mod ranker;
pub mod topk;

pub use metrics::MetricError;
pub use ranker::{CentralityRanker, Rankings, SeedMetric};
pub use topk::{Order, RankedEntry, RankedList};
