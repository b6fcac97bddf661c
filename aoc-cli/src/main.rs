//! AOC CLI - Command-line interface for running Advent of Code solvers

mod aggregator;
mod cli;
mod config;
mod error;
mod executor;
mod input;
mod output;

// Import aoc-solutions to link the solver plugins
use aoc_solutions as _;

use aoc_solver::SolverRegistryBuilder;
use clap::Parser;
use cli::Args;
use config::Config;
use executor::Executor;
use output::OutputFormatter;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), error::CliError> {
    let config = Config::from_args(args);
    init_tracing(&config);
    debug!(input_dir = %config.input_dir.display(), threads = config.thread_count, "configured");

    // Build registry with tag filtering (only once)
    let registry = build_registry(&config.tags)?;
    info!(solvers = registry.storage().len(), "registry built");

    let executor =
        Executor::new(registry, &config).map_err(|e| error::CliError::Config(e.to_string()))?;

    let work_items = executor.collect_work_items();
    if work_items.is_empty() {
        println!("No solvers found matching the specified filters.");
        return Ok(());
    }

    // Report missing inputs up front; those parts fail but the run continues
    let missing = executor.missing_inputs(&work_items);
    if !missing.is_empty() {
        eprintln!(
            "Missing {} input file(s) in {}:",
            missing.len(),
            config.input_dir.display()
        );
        for work in &missing {
            eprintln!("  - {}_day{:02}.txt", work.year, work.day);
        }
    }

    run_executor(executor, work_items, config.quiet)
}

/// `RUST_LOG` wins; otherwise the level picked by `-v`
fn init_tracing(config: &Config) {
    let filter = EnvFilter::builder()
        .with_default_directive(config.log_level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Run the executor and collect results
fn run_executor(
    executor: Executor,
    work_items: Vec<executor::WorkItem>,
    quiet: bool,
) -> Result<(), error::CliError> {
    if !quiet {
        println!("Running {} solver(s)...", work_items.len());
    }

    // Build expected keys for result aggregation
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

    // Run executor in background thread
    let executor_handle = std::thread::spawn(move || executor.execute(tx));

    // Collect and display results in order using aggregator
    let formatter = OutputFormatter::new(quiet);
    let mut aggregator = aggregator::ResultAggregator::new(expected_keys);
    let mut results = Vec::new();

    for result in rx {
        for ready in aggregator.add(result) {
            formatter.print_result(&ready);
            results.push(ready);
        }
    }

    // Anything still buffered arrived without its predecessors
    for ready in aggregator.drain() {
        formatter.print_result(&ready);
        results.push(ready);
    }

    if !aggregator.is_complete() {
        warn!("not all expected results were received");
    }

    executor_handle
        .join()
        .map_err(|_| error::CliError::Config("Executor thread panicked".to_string()))?
        .map_err(error::CliError::Executor)?;

    formatter.print_summary(&results);

    Ok(())
}

/// Build registry with tag filtering
fn build_registry(tags: &[String]) -> Result<aoc_solver::SolverRegistry, error::CliError> {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_days_are_linked() {
        let registry = build_registry(&[]).unwrap();
        for day in 1..=25 {
            assert!(registry.storage().contains(2018, day), "day {day}");
        }
        assert_eq!(registry.storage().get_info(2018, 25).unwrap().parts, 1);
    }

    #[test]
    fn test_tag_filter_requires_every_tag() {
        let tags = vec!["2018".to_string(), "elfcode".to_string()];
        let registry = build_registry(&tags).unwrap();
        let days: Vec<_> = registry.storage().iter_info().map(|i| i.day).collect();
        assert_eq!(days, vec![16, 19, 21]);

        let none = build_registry(&["no-such-tag".to_string()]).unwrap();
        assert!(none.storage().is_empty());
    }
}
