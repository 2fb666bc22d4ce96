//! Edge-list text loader.
//!
//! Format: one `from to` pair of non-negative integer ids per line,
//! whitespace-delimited. Blank lines and lines starting with `#` are
//! skipped. Both endpoints are added as vertices before the edge, so a
//! well-formed file can never trip the store's missing-endpoint tolerance.
//!
//! The loader owns all text-boundary validation — malformed lines and
//! negative ids are reported with line-number context — so the core only
//! ever sees well-formed id pairs.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::{info, instrument};

use crate::store::{Graph, VertexId};

/// Build a [`Graph`] from edge-list text.
///
/// # Errors
///
/// Returns an error when a line does not contain exactly two integers, or
/// when an id is negative or exceeds the id range.
pub fn load_edge_list<R: BufRead>(reader: R) -> Result<Graph> {
    let mut graph = Graph::new();

    for (number, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("read edge list line {}", number + 1))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut fields = trimmed.split_whitespace();
        let (Some(from), Some(to), None) = (fields.next(), fields.next(), fields.next()) else {
            bail!("line {}: expected exactly two ids, got {trimmed:?}", number + 1);
        };

        let from = parse_id(from, number + 1)?;
        let to = parse_id(to, number + 1)?;

        graph.add_vertex(from);
        graph.add_vertex(to);
        graph.add_edge(from, to);
    }

    Ok(graph)
}

/// Load an edge-list file from disk.
///
/// # Errors
///
/// Returns an error when the file cannot be opened or the content is
/// malformed (see [`load_edge_list`]).
#[instrument]
pub fn load_edge_list_path(path: &Path) -> Result<Graph> {
    let file = File::open(path).with_context(|| format!("open edge list {}", path.display()))?;
    let graph = load_edge_list(BufReader::new(file))?;
    info!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "edge list loaded"
    );
    Ok(graph)
}

/// Parse one id token. Parsed as signed first so a negative id is reported
/// as such rather than as a generic integer-parse failure.
fn parse_id(token: &str, line: usize) -> Result<VertexId> {
    let value: i64 = token
        .parse()
        .with_context(|| format!("line {line}: invalid vertex id {token:?}"))?;
    if value < 0 {
        bail!("line {line}: negative vertex id {value}");
    }
    VertexId::try_from(value).with_context(|| format!("line {line}: vertex id {value} too large"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
