//! turtle-king - render L-system fractals from the command line
//!
//! Usage:
//!   turtle-king render <definition> [-o out.svg|out.png]   Render a definition file
//!   turtle-king render -p <preset> [-i <n>]                 Render a built-in preset
//!   turtle-king expand <definition>                         Print the rewritten string
//!   turtle-king stats <definition> [--json]                 Growth, segments and bounds
//!   turtle-king presets                                     List built-in presets
//!
//! Definition files are JSON or YAML; `-` reads from stdin.

mod cli;
mod logging;

use std::process;

use clap::{Parser, Subcommand};

use cli::{cmd_expand, cmd_presets, cmd_render, cmd_stats, ExpandArgs, RenderArgs, StatsArgs};

#[derive(Debug, Parser)]
#[command(name = "turtle-king", version, about = "L-system fractal renderer")]
struct Cli {
    /// Log progress to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render an L-system to SVG (stdout or file) or PNG
    Render(RenderArgs),
    /// Print the rewritten command string
    Expand(ExpandArgs),
    /// Report expansion lengths, segment count and bounds
    Stats(StatsArgs),
    /// List built-in presets
    Presets,
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let result = match &cli.command {
        Command::Render(args) => cmd_render(args),
        Command::Expand(args) => cmd_expand(args),
        Command::Stats(args) => cmd_stats(args),
        Command::Presets => {
            cmd_presets();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
