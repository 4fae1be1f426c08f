//! Script command
//!
//! Usage: evotree script <SOURCE> <TARGET> [--json] [--output <FILE>]

use clap::Args;
use std::path::PathBuf;

use evotree_core::{compute_script, ExError};

#[derive(Debug, Args)]
pub struct ScriptArgs {
    /// String to start from
    pub source: String,

    /// String to reach
    pub target: String,

    /// Print the script as JSON instead of one step per line
    #[arg(long)]
    pub json: bool,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute script command
///
/// Text output is one `<tag>:<payload> @<offset>` line per step; an empty
/// script prints nothing.
pub fn execute(args: ScriptArgs) -> Result<(), Box<dyn std::error::Error>> {
    let script = compute_script(&args.source, &args.target);

    // The printed script must reproduce the target
    let replayed = script.apply(&args.source).map_err(ExError::from)?;
    if replayed != args.target {
        return Err(format!(
            "script replays to '{}' instead of '{}'",
            replayed, args.target
        )
        .into());
    }

    let content = if args.json {
        let mut text = serde_json::to_string_pretty(&script)?;
        text.push('\n');
        text
    } else {
        script
            .iter()
            .map(|step| format!("{} @{}\n", step.op, step.at))
            .collect()
    };

    super::emit(&content, args.output.as_deref())
}
