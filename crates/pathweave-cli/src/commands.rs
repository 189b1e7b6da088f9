//! Command handlers.
//!
//! Each handler runs one descent from a start vertex and writes its results
//! as JSON arrays of vertex IDs, one array per line.

use std::io::Write;

use anyhow::{anyhow, Context, Result};
use pathweave_core::descend::{cycle_search, leaves, reachability, DescentConfig};
use pathweave_core::graph::{Element, Graph, InMemoryGraph, Labels, VertexHandle};
use pathweave_core::traversal::out_by;
use pathweave_core::PathweaveConfig;
use tracing::info;

/// A traversal to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Traversal {
    /// Everything reachable from the start.
    Reach,
    /// Reachable vertices with no outgoing edges.
    Leaves,
    /// Cycles back to the start of at most this many hops.
    Cycles {
        /// Longest cycle reported.
        max_len: usize,
    },
    /// Every path from the start.
    Paths,
}

fn start_vertex(graph: &InMemoryGraph, id: u64) -> Result<VertexHandle> {
    graph
        .get_vertex(id)
        .ok_or_else(|| anyhow!("Vertex {id} not found in graph"))
}

fn ids(path: &[VertexHandle]) -> Vec<u64> {
    path.iter().map(Element::id).collect()
}

fn write_line<W: Write>(out: &mut W, ids: &[u64]) -> Result<()> {
    let line = serde_json::to_string(ids)?;
    writeln!(out, "{line}").context("Failed to write output")
}

/// Runs `traversal` from vertex `start` along edges carrying one of
/// `labels` (any label when empty).
pub fn run<W: Write>(
    traversal: &Traversal,
    graph: &InMemoryGraph,
    start: u64,
    labels: Vec<String>,
    config: &PathweaveConfig,
    out: &mut W,
) -> Result<()> {
    let start = start_vertex(graph, start)?;
    let labels = Labels::from(labels);
    let step = move |v: &VertexHandle| out_by(labels.clone(), Some(v.clone()));
    let descent_config: DescentConfig<VertexHandle> = config
        .descent_config()
        .context("Invalid traversal configuration")?;

    let mut emitted = 0_usize;
    match traversal {
        Traversal::Reach => {
            let reached: Vec<VertexHandle> = reachability(step)
                .config(descent_config)
                .build()?
                .descend(Some(start))
                .collect();
            emitted = reached.len();
            write_line(out, &ids(&reached))?;
        }
        Traversal::Leaves => {
            let found: Vec<VertexHandle> = leaves(step)
                .config(descent_config)
                .build()?
                .descend(Some(start))
                .collect();
            emitted = found.len();
            write_line(out, &ids(&found))?;
        }
        Traversal::Cycles { max_len } => {
            let cycles = cycle_search(*max_len, step)
                .config(descent_config)
                .build()
                .context("Invalid --max-len")?
                .descents(Some(start));
            for cycle in cycles {
                emitted += 1;
                write_line(out, &ids(&cycle))?;
            }
        }
        Traversal::Paths => {
            let paths = reachability(step)
                .config(descent_config)
                .build()?
                .descents(Some(start));
            for path in paths {
                emitted += 1;
                write_line(out, &ids(&path))?;
            }
        }
    }
    info!(traversal = ?traversal, emitted, "Traversal finished");
    Ok(())
}
