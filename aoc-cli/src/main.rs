//! AOC CLI - Command-line interface for running Advent of Code solvers

mod aggregator;
mod cli;
mod config;
mod error;
mod executor;
mod input;
mod output;

// Link aoc-2023 so its solver plugins get collected
use aoc_2023 as _;

use aoc_solver::SolverRegistryBuilder;
use clap::Parser;
use cli::Args;
use config::Config;
use error::CliError;
use executor::Executor;
use output::{OutputFormatter, Summary};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`)
fn init_tracing() {
    let env_filter = EnvFilter::builder()
        .parse_lossy(std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or("warn".to_string()));
    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> Result<(), CliError> {
    let config = Config::from_args(args)?;
    let registry = build_registry(&config.tags)?;
    let executor = Executor::new(registry, &config).map_err(|e| CliError::Config(e.to_string()))?;

    let work_items = executor.collect_work_items();
    if work_items.is_empty() {
        warn!("no solvers found matching the specified filters");
        return Ok(());
    }

    let missing: Vec<_> = work_items
        .iter()
        .filter(|w| !config.inputs.contains(w.year, w.day))
        .collect();
    if !missing.is_empty() {
        for w in &missing {
            warn!(path = %config.inputs.input_path(w.year, w.day).display(), "missing input");
        }
        warn!("{} of {} input file(s) missing", missing.len(), work_items.len());
    }

    let summary = run_executor(executor, work_items, config.quiet)?;
    match summary.failed {
        0 => Ok(()),
        failed => Err(CliError::PartsFailed(failed)),
    }
}

/// Run the executor and print results in (year, day, part) order
fn run_executor(
    executor: Executor,
    work_items: Vec<executor::WorkItem>,
    quiet: bool,
) -> Result<Summary, CliError> {
    info!(solvers = work_items.len(), "running solvers");

    let expected_keys: Vec<aggregator::ResultKey> = work_items
        .iter()
        .flat_map(|w| {
            w.parts.clone().map(move |p| aggregator::ResultKey {
                year: w.year,
                day: w.day,
                part: p,
            })
        })
        .collect();

    let (tx, rx) = std::sync::mpsc::channel();
    let executor_handle = std::thread::spawn(move || executor.execute(tx));

    let formatter = OutputFormatter::new(quiet);
    let mut aggregator = aggregator::ResultAggregator::new(expected_keys);
    let mut results = Vec::new();

    for result in rx {
        for ready in aggregator.add(result) {
            formatter.print_result(&ready);
            results.push(ready);
        }
    }

    // Only reached with results left over if some never arrived
    for ready in aggregator.drain() {
        formatter.print_result(&ready);
        results.push(ready);
    }
    if !aggregator.is_complete() {
        warn!("not all expected results were received");
    }

    executor_handle
        .join()
        .map_err(|_| CliError::Config("Executor thread panicked".to_string()))??;

    let summary = Summary::of(&results);
    formatter.print_summary(&summary);
    Ok(summary)
}

/// Build registry with tag filtering
fn build_registry(tags: &[String]) -> Result<aoc_solver::SolverRegistry, CliError> {
    let builder = SolverRegistryBuilder::new();

    let builder = if tags.is_empty() {
        builder.register_all_plugins()?
    } else {
        builder.register_solver_plugins(|plugin| {
            tags.iter().all(|tag| plugin.tags.contains(&tag.as_str()))
        })?
    };

    Ok(builder.build())
}
