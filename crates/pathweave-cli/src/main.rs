//! pathweave - run lazy traversals over a JSON graph file.

mod commands;
mod graph_file;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use pathweave_core::PathweaveConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commands::Traversal;

/// pathweave - lazy graph traversals from the command line
#[derive(Parser, Debug)]
#[command(name = "pathweave")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Graph file (JSON with `nodes` and `edges`)
    #[arg(short, long, env = "PATHWEAVE_GRAPH")]
    graph: PathBuf,

    /// Configuration file (defaults to ./pathweave.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every vertex reachable from ID
    Reach {
        /// Start vertex
        id: u64,
        /// Follow only edges with this label (repeatable)
        #[arg(short, long = "label")]
        labels: Vec<String>,
    },
    /// Print reachable vertices with no outgoing edges
    Leaves {
        /// Start vertex
        id: u64,
        /// Follow only edges with this label (repeatable)
        #[arg(short, long = "label")]
        labels: Vec<String>,
    },
    /// Print cycles leading back to ID, one per line
    Cycles {
        /// Start vertex
        id: u64,
        /// Longest cycle to report, in hops
        #[arg(short, long)]
        max_len: usize,
        /// Follow only edges with this label (repeatable)
        #[arg(short, long = "label")]
        labels: Vec<String>,
    },
    /// Print the path to every reachable vertex, one per line
    Paths {
        /// Start vertex
        id: u64,
        /// Follow only edges with this label (repeatable)
        #[arg(short, long = "label")]
        labels: Vec<String>,
    },
}

impl Command {
    fn into_parts(self) -> (Traversal, u64, Vec<String>) {
        match self {
            Self::Reach { id, labels } => (Traversal::Reach, id, labels),
            Self::Leaves { id, labels } => (Traversal::Leaves, id, labels),
            Self::Cycles {
                id,
                max_len,
                labels,
            } => (Traversal::Cycles { max_len }, id, labels),
            Self::Paths { id, labels } => (Traversal::Paths, id, labels),
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<PathweaveConfig> {
    let config = match path {
        Some(path) => {
            if !path.exists() {
                bail!("Config file {} does not exist", path.display());
            }
            PathweaveConfig::load_from(path)
        }
        None => PathweaveConfig::load(),
    };
    config.context("Failed to load configuration")
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();
    let config = load_config(args.config.as_ref())?;
    let graph = graph_file::load_graph(&args.graph)?;
    tracing::debug!(
        graph = %args.graph.display(),
        vertices = graph.vertex_count(),
        "Loaded graph"
    );

    let (traversal, start, labels) = args.command.into_parts();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    commands::run(&traversal, &graph, start, labels, &config, &mut out)?;
    out.flush().context("Failed to flush output")?;
    Ok(())
}
