//! evotree CLI
//!
//! Command-line interface for computing edit scripts and packing evolution trees

use clap::{Parser, Subcommand};
use evotree_core::logging_facility::{self, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "evotree")]
#[command(about = "evotree - Edit scripts and evolution trees over strings", long_about = None)]
struct Cli {
    /// Log engine and packer decisions at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compute the edit script between two strings
    Script(commands::script::ScriptArgs),
    /// Build an evolution tree from a root to a set of leaves
    Build(commands::build::BuildArgs),
}

fn main() {
    let cli = Cli::parse();

    let profile = if cli.log_json {
        Profile::Production
    } else {
        Profile::Development
    };
    if cli.verbose {
        logging_facility::init_with_filter(profile, "evotree_core=debug,evotree_cli=debug");
    } else if std::env::var_os("RUST_LOG").is_some() {
        logging_facility::init(profile);
    } else {
        logging_facility::init_with_filter(profile, "warn");
    }

    let result = match cli.command {
        Commands::Script(args) => commands::script::execute(args),
        Commands::Build(args) => commands::build::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
