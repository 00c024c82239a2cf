// SPDX-License-Identifier: MIT OR Apache-2.0
//! luas CLI binary - run and track decode benchmark comparisons

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use luas_bench::{BenchConfig, BenchReport, HistoryPoint, RunOptions, Runner, registry};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "luas")]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Subcommands for luas CLI
#[derive(Subcommand)]
enum Commands {
    /// List the registered benchmarks
    List,
    /// Run one benchmark, once or on a fixed cadence
    Run {
        /// Benchmark id (see `luas list`)
        id: String,

        /// Timed iterations per run
        #[arg(short = 'i', long, default_value = "10")]
        iterations: usize,

        /// Benchmark-specific config as JSON, e.g. '{"decode":{"num_messages":5000}}'
        #[arg(short = 'c', long)]
        config: Option<String>,

        /// Total number of runs on the cadence
        #[arg(short = 'r', long, default_value = "1")]
        repeat: usize,

        /// Cadence between repeated runs, in milliseconds
        #[arg(long = "interval-ms", default_value = "1000")]
        interval_ms: u64,

        /// Load/save the historical p99 series from/to this JSON file
        #[arg(long = "history-file")]
        history_file: Option<PathBuf>,

        /// Retention bound on the historical series (1-100)
        #[arg(long = "max-history", default_value = "25")]
        max_history: usize,

        /// Emit the final report as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    match args.command {
        Commands::List => list(),
        Commands::Run {
            id,
            iterations,
            config,
            repeat,
            interval_ms,
            history_file,
            max_history,
            json,
        } => run(&RunArgs {
            id,
            iterations,
            config,
            repeat,
            interval_ms,
            history_file,
            max_history,
            json,
        }),
    }
}

struct RunArgs {
    id: String,
    iterations: usize,
    config: Option<String>,
    repeat: usize,
    interval_ms: u64,
    history_file: Option<PathBuf>,
    max_history: usize,
    json: bool,
}

fn list() -> Result<()> {
    println!("{:<10} {:<32} DESCRIPTION", "ID", "LABEL");
    for def in registry::definitions() {
        println!("{:<10} {:<32} {}", def.id(), def.label(), def.description());
    }
    Ok(())
}

fn run(args: &RunArgs) -> Result<()> {
    let config = match &args.config {
        Some(raw) => serde_json::from_str(raw)
            .with_context(|| format!("invalid --config JSON: {raw}"))?,
        None => BenchConfig::Default,
    };
    let options = RunOptions {
        iterations: args.iterations,
        config,
    };

    let mut runner = Runner::new(&args.id, args.max_history)?;
    if let Some(path) = &args.history_file {
        if let Some(points) = load_history(path)? {
            tracing::info!(points = points.len(), path = %path.display(), "loaded history");
            runner.install_history(points);
        }
    }

    if args.repeat > 1 {
        runner.run_repeating(&options, Duration::from_millis(args.interval_ms), args.repeat);
    } else {
        runner.run(&options)?;
    }

    if let Some(path) = &args.history_file {
        save_history(path, &runner.history().snapshot())?;
    }

    let report = runner
        .report()
        .context("no report produced; every run failed")?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print_report(&args.id, report);
        print_history(&runner);
    }
    Ok(())
}

fn load_history(path: &Path) -> Result<Option<Vec<HistoryPoint>>> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read history file {}", path.display()))?;
    let points = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse history file {}", path.display()))?;
    Ok(Some(points))
}

fn save_history(path: &Path, points: &[HistoryPoint]) -> Result<()> {
    let json = serde_json::to_string_pretty(points)?;
    fs::write(path, json)
        .with_context(|| format!("failed to write history file {}", path.display()))?;
    tracing::info!(points = points.len(), path = %path.display(), "saved history");
    Ok(())
}

fn print_report(id: &str, report: &BenchReport) {
    println!("benchmark: {id}");
    println!("items per iteration: {}", report.items_processed);
    println!(
        "{:<34} {:>10} {:>10} {:>10} {:>10} {:>10} {:>12}",
        "IMPLEMENTATION", "MIN", "MAX", "MEAN", "MEDIAN", "P99", "ITEMS/SEC"
    );
    for run in &report.implementations {
        let stats = run.stats;
        let throughput = if stats.mean > 0.0 {
            report.items_processed as f64 / stats.mean * 1_000.0
        } else {
            0.0
        };
        println!(
            "{:<34} {:>10.4} {:>10.4} {:>10.4} {:>10.4} {:>10.4} {:>12.0}",
            run.label, stats.min, stats.max, stats.mean, stats.median, stats.p99, throughput
        );
    }
    println!("(all times in milliseconds)");
}

fn print_history(runner: &Runner) {
    if runner.history().is_empty() {
        return;
    }
    println!();
    println!(
        "history (p99 ms, newest last, {} of max {}):",
        runner.history().len(),
        runner.history().max_points()
    );
    for point in runner.history().points() {
        let row: Vec<String> = point
            .p99
            .iter()
            .map(|(name, p99)| format!("{name}={p99:.4}"))
            .collect();
        println!("  {} {}", point.time, row.join(" "));
    }
}
