//! Build command
//!
//! Usage: evotree build <ROOT> [LEAVES]... [--leaves-file <FILE>]
//!        [--max-edges <N>] [--config <FILE>] [--format outline|dot|json]
//!        [--output <FILE>]

use clap::{Args, ValueEnum};
use std::path::PathBuf;

use evotree_core::render::{render_dot, render_outline};
use evotree_core::{build_with_options, ExError, PackOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Indented plain-text outline
    Outline,
    /// Graphviz DOT
    Dot,
    /// The full tree as JSON
    Json,
}

#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Root string
    pub root: String,

    /// Leaf strings to reach
    pub leaves: Vec<String>,

    /// Read additional leaves from a file, one per line
    #[arg(long)]
    pub leaves_file: Option<PathBuf>,

    /// Maximum outgoing edges per node (overrides --config)
    #[arg(long)]
    pub max_edges: Option<usize>,

    /// Pack options as a JSON document, e.g. {"max_edges": 3}
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "outline")]
    pub format: OutputFormat,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute build command
///
/// Unplaced leaves are reported on stderr; they do not fail the command.
pub fn execute(args: BuildArgs) -> Result<(), Box<dyn std::error::Error>> {
    let options = load_options(&args)?;

    let mut leaves = args.leaves.clone();
    if let Some(path) = &args.leaves_file {
        let text = std::fs::read_to_string(path)?;
        leaves.extend(parse_leaves(&text));
    }

    let tree = build_with_options(&args.root, leaves, &options).map_err(ExError::from)?;

    for leaf in tree.unplaced() {
        eprintln!("warning: leaf '{}' could not be placed", leaf);
    }

    let content = match args.format {
        OutputFormat::Outline => render_outline(&tree),
        OutputFormat::Dot => render_dot(&tree),
        OutputFormat::Json => {
            let mut text = serde_json::to_string_pretty(&tree)?;
            text.push('\n');
            text
        }
    };

    super::emit(&content, args.output.as_deref())
}

/// One leaf per line; only the line terminator is stripped and empty lines are skipped
fn parse_leaves(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

fn load_options(args: &BuildArgs) -> Result<PackOptions, Box<dyn std::error::Error>> {
    let mut options = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            PackOptions::from_json(&text).map_err(ExError::from)?
        }
        None => PackOptions::default(),
    };

    if let Some(max_edges) = args.max_edges {
        options.max_edges = max_edges;
    }

    tracing::debug!(max_edges = options.max_edges, "pack options loaded");
    Ok(options)
}
