//! Inspection commands: `expand`, `stats` and `presets`.

use std::collections::BTreeMap;
use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use turtle_king::{
    chain_segments, expansion_lengths, interpret_with_diagnostics, ChainConfig, ChainStats,
    Definition, Preset,
};

use super::common::SourceArgs;
use super::render::report_diagnostics;

#[derive(Debug, Clone, Args)]
pub struct ExpandArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Debug, Clone, Args)]
pub struct StatsArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Bounding box in JSON output.
#[derive(Serialize)]
struct JsonBounds {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
    width: f64,
    height: f64,
}

/// Interpreter diagnostics in JSON output.
#[derive(Serialize)]
struct JsonDiagnostics {
    unmatched_closes: usize,
    unclosed_branches: usize,
    max_depth: usize,
    ignored_symbols: BTreeMap<char, usize>,
}

/// Full `stats` report.
#[derive(Serialize)]
struct StatsReport {
    name: String,
    iterations: u32,
    /// Expanded length after each pass, starting with the axiom
    lengths: Vec<u64>,
    segments: usize,
    chains: usize,
    /// Segments in the longest chain
    longest_chain: usize,
    mean_chain_length: f64,
    chain_reduction_percent: f64,
    bounds: JsonBounds,
    diagnostics: JsonDiagnostics,
}

/// Execute the expand command: print the rewritten command string.
pub fn cmd_expand(args: &ExpandArgs) -> Result<()> {
    let definition = args.source.load()?;
    let commands = args.source.expand(&definition)?;

    let mut out = io::stdout().lock();
    writeln!(out, "{commands}").context("Failed to write to stdout")?;
    Ok(())
}

/// Execute the stats command.
pub fn cmd_stats(args: &StatsArgs) -> Result<()> {
    let definition = args.source.load()?;
    let report = build_report(&definition, &args.source)?;

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize JSON")?;
        println!("{json}");
    } else {
        print_report(&report);
    }
    Ok(())
}

fn build_report(definition: &Definition, source: &SourceArgs) -> Result<StatsReport> {
    let lengths = expansion_lengths(definition.axiom(), definition.rules(), definition.iterations());
    let commands = source.expand(definition)?;
    let (scene, diagnostics) = interpret_with_diagnostics(&commands, &definition.turtle_params());
    report_diagnostics(&diagnostics);

    let chains = chain_segments(scene.segments(), &ChainConfig::default());
    let chain_stats = ChainStats::from_chains(&chains);
    let bounds = scene.bounds();

    Ok(StatsReport {
        name: definition.name().to_string(),
        iterations: definition.iterations(),
        lengths,
        segments: scene.len(),
        chains: chain_stats.chains,
        longest_chain: chain_stats.longest,
        mean_chain_length: chain_stats.mean_length(),
        chain_reduction_percent: chain_stats.reduction() * 100.0,
        bounds: JsonBounds {
            min_x: bounds.min_x,
            min_y: bounds.min_y,
            max_x: bounds.max_x,
            max_y: bounds.max_y,
            width: bounds.width(),
            height: bounds.height(),
        },
        diagnostics: JsonDiagnostics {
            unmatched_closes: diagnostics.unmatched_closes,
            unclosed_branches: diagnostics.unclosed_branches,
            max_depth: diagnostics.max_depth,
            ignored_symbols: diagnostics.ignored_symbols,
        },
    })
}

fn print_report(report: &StatsReport) {
    println!("L-system: {}", report.name);
    println!("Iterations: {}", report.iterations);
    println!();
    println!("{:>9}  {:>14}", "Iteration", "Length");
    for (i, len) in report.lengths.iter().enumerate() {
        println!("{:>9}  {:>14}", i, len);
    }
    println!();
    println!("Segments: {}", report.segments);
    println!(
        "Chains:   {} ({:.1}% fewer paths)",
        report.chains, report.chain_reduction_percent
    );
    println!(
        "          longest {} segments, mean {:.1}",
        report.longest_chain, report.mean_chain_length
    );
    let b = &report.bounds;
    println!(
        "Bounds:   ({:.3}, {:.3}) to ({:.3}, {:.3})  [{:.3} x {:.3}]",
        b.min_x, b.min_y, b.max_x, b.max_y, b.width, b.height
    );

    let d = &report.diagnostics;
    println!("Max branch depth: {}", d.max_depth);
    if d.unmatched_closes > 0 || d.unclosed_branches > 0 {
        println!(
            "Unbalanced brackets: {} unmatched ']', {} unclosed '['",
            d.unmatched_closes, d.unclosed_branches
        );
    }
    if !d.ignored_symbols.is_empty() {
        let ignored: Vec<String> = d
            .ignored_symbols
            .iter()
            .map(|(c, n)| format!("{c}×{n}"))
            .collect();
        println!("Non-drawing symbols: {}", ignored.join(" "));
    }
}

/// List built-in presets.
pub fn cmd_presets() {
    println!("Available presets:");
    for preset in Preset::all() {
        println!("  {:<16} {}", preset.name(), preset.description());
    }
}
