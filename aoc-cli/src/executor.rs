//! Parallel executor for running solvers

use crate::cli::ParallelizeBy;
use crate::config::Config;
use crate::error::{ArcExecutorError, ExecutorError};
use crate::input::InputStore;
use aoc_solver::{DynSolver, SolverError, SolverRegistry};
use chrono::TimeDelta;
use itertools::Itertools;
use rayon::prelude::*;
use std::ops::RangeInclusive;
use std::sync::mpsc::Sender;
use tracing::{debug, warn};

/// Result from a single solver execution
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    pub answer: Result<String, SolverError>,
    pub solve_duration: TimeDelta,
    /// `None` when the input never parsed
    pub parse_duration: Option<TimeDelta>,
}

impl SolverResult {
    fn failed(year: u16, day: u8, part: u8, error: SolverError) -> Self {
        Self {
            year,
            day,
            part,
            answer: Err(error),
            solve_duration: TimeDelta::zero(),
            parse_duration: None,
        }
    }
}

/// Work item representing a solver to execute
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

/// Parallel executor for running solvers
pub struct Executor {
    sync_executor_config: SyncExecutorConfig,
    thread_pool: rayon::ThreadPool,
}

/// The part of the executor shared by reference across worker threads
pub struct SyncExecutorConfig {
    registry: SolverRegistry,
    inputs: InputStore,
    parallelize_by: ParallelizeBy,
    year_filter: Option<u16>,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
}

impl Executor {
    /// Create a new executor from config
    pub fn new(registry: SolverRegistry, config: &Config) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        Ok(Self {
            sync_executor_config: SyncExecutorConfig {
                registry,
                inputs: InputStore::new(config.input_dir.clone()),
                parallelize_by: config.parallelize_by,
                year_filter: config.year_filter,
                day_filter: config.day_filter,
                part_filter: config.part_filter,
            },
            thread_pool,
        })
    }

    /// Collect work items by filtering from registry metadata
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        let cfg = &self.sync_executor_config;
        cfg.registry
            .storage()
            .iter_info()
            .filter(|info| cfg.year_filter.is_none_or(|y| info.year == y))
            .filter(|info| cfg.day_filter.is_none_or(|d| info.day == d))
            .map(|info| WorkItem {
                year: info.year,
                day: info.day,
                parts: filter_parts(cfg.part_filter, info.parts),
            })
            .filter(|w| !w.parts.is_empty())
            .collect()
    }

    /// Work items whose input file cannot be found
    pub fn missing_inputs<'w>(&self, work_items: &'w [WorkItem]) -> Vec<&'w WorkItem> {
        let inputs = &self.sync_executor_config.inputs;
        work_items
            .iter()
            .filter(|w| !inputs.contains(w.year, w.day))
            .collect()
    }

    /// Execute all work items and send results to channel
    pub fn execute(&self, tx: Sender<SolverResult>) -> Result<(), ArcExecutorError> {
        let work_items = self.collect_work_items();
        debug!(
            count = work_items.len(),
            mode = ?self.sync_executor_config.parallelize_by,
            "executing work items"
        );

        match self.sync_executor_config.parallelize_by {
            ParallelizeBy::Sequential => {
                let mut collected_error: Option<ArcExecutorError> = None;
                for work in work_items {
                    if let Err(e) = run_work_item(&work, &tx, &self.sync_executor_config) {
                        collected_error = Some(ArcExecutorError::combine_opt(collected_error, e));
                    }
                }
                collected_error.map_or(Ok(()), Err)
            }
            ParallelizeBy::Year => {
                let by_year: Vec<Vec<WorkItem>> = work_items
                    .into_iter()
                    .chunk_by(|w| w.year)
                    .into_iter()
                    .map(|(_, group)| group.collect())
                    .collect();

                self.execute_parallel_grouped(by_year, &tx)
            }
            // Day and Part both fan out per work item; Part also splits each item's parts
            ParallelizeBy::Day | ParallelizeBy::Part => self.execute_parallel(work_items, &tx),
        }
    }

    /// Execute work items in parallel, collecting errors
    fn execute_parallel(
        &self,
        work_items: Vec<WorkItem>,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        let sync_executor_config = &self.sync_executor_config;

        self.thread_pool.install(|| {
            work_items
                .into_par_iter()
                .map(|work| run_work_item(&work, tx, sync_executor_config).err())
                .reduce_with(merge_errors)
                .unwrap_or_default()
                .map_or(Ok(()), Err)
        })
    }

    /// Execute grouped work items in parallel (for year-level parallelism)
    fn execute_parallel_grouped(
        &self,
        groups: Vec<Vec<WorkItem>>,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        let sync_executor_config = &self.sync_executor_config;

        self.thread_pool.install(|| {
            groups
                .into_par_iter()
                .map(|items| {
                    let mut err = None;
                    for work in items {
                        if let Err(e) = run_work_item(&work, tx, sync_executor_config) {
                            err = Some(ArcExecutorError::combine_opt(err, e))
                        }
                    }
                    err
                })
                .reduce_with(merge_errors)
                .unwrap_or_default()
                .map_or(Ok(()), Err)
        })
    }
}

fn merge_errors(
    err1: Option<ArcExecutorError>,
    err2: Option<ArcExecutorError>,
) -> Option<ArcExecutorError> {
    match (err1, err2) {
        (Some(a), b) => Some(ArcExecutorError::combine_opt(b, a)),
        (None, b) => b,
    }
}

/// Parts to run given the part filter and the solver's part count
#[allow(clippy::reversed_empty_ranges)]
fn filter_parts(part_filter: Option<u8>, max_parts: u8) -> RangeInclusive<u8> {
    match part_filter {
        Some(p) if p <= max_parts => p..=p,
        Some(_) => 1..=0,
        None => 1..=max_parts,
    }
}

fn send(tx: &Sender<SolverResult>, result: SolverResult) -> Result<(), ArcExecutorError> {
    tx.send(result)
        .map_err(|_| ExecutorError::ChannelSend.into())
}

/// Load the input for one work item and solve its parts
fn run_work_item(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    sync_executor_config: &SyncExecutorConfig,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);
    debug!(year, day, parts = ?work.parts, "running solver");

    let input = match sync_executor_config.inputs.get(year, day) {
        Ok(input) => input,
        Err(e) => {
            warn!(year, day, error = %e, "skipping puzzle without input");
            let message = e.to_string();
            for part in work.parts.clone() {
                let error = aoc_solver::ParseError::MissingData(message.clone());
                send(tx, SolverResult::failed(year, day, part, error.into()))?;
            }
            return Ok(());
        }
    };

    if matches!(sync_executor_config.parallelize_by, ParallelizeBy::Part) {
        run_parts_parallel(work, &input, tx, &sync_executor_config.registry)
    } else {
        run_parts_sequential(work, &input, tx, &sync_executor_config.registry)
    }
}

/// Parse once and solve the parts in order, so later parts may reuse
/// what earlier parts cached in the shared data
fn run_parts_sequential(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    registry: &SolverRegistry,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);
    match registry.create_solver(year, day, input) {
        Ok(mut solver) => {
            for part in work.parts.clone() {
                send(tx, solve_part(year, day, part, &mut *solver))?;
            }
        }
        Err(e) => {
            warn!(year, day, error = %e, "input did not parse");
            send_parse_failure(work, e, tx)?;
        }
    }
    Ok(())
}

/// Solve each part on its own parsed copy of the input, emitting results in
/// part order
fn run_parts_parallel(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    registry: &SolverRegistry,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);

    let mut results: Vec<SolverResult> = work
        .parts
        .clone()
        .into_par_iter()
        .map(|part| match registry.create_solver(year, day, input) {
            Ok(mut solver) => solve_part(year, day, part, &mut *solver),
            Err(e) => SolverResult::failed(year, day, part, e),
        })
        .collect();
    results.sort_by_key(|r| r.part);

    for result in results {
        send(tx, result)?;
    }
    Ok(())
}

/// One error result per part; the first carries the parse error itself
fn send_parse_failure(
    work: &WorkItem,
    error: SolverError,
    tx: &Sender<SolverResult>,
) -> Result<(), ArcExecutorError> {
    let message = error.to_string();
    let mut error = Some(error);
    for part in work.parts.clone() {
        let error = error
            .take()
            .unwrap_or_else(|| aoc_solver::ParseError::Other(message.clone()).into());
        send(tx, SolverResult::failed(work.year, work.day, part, error))?;
    }
    Ok(())
}

fn solve_part(year: u16, day: u8, part: u8, solver: &mut dyn DynSolver) -> SolverResult {
    let parse_duration = Some(solver.parse_duration());
    match solver.solve(part) {
        Ok(result) => {
            debug!(year, day, part = result.part, elapsed = ?result.elapsed, "solved");
            SolverResult {
                year,
                day,
                part: result.part,
                solve_duration: result.elapsed,
                answer: Ok(result.answer),
                parse_duration,
            }
        }
        Err(e) => SolverResult {
            parse_duration,
            ..SolverResult::failed(year, day, part, e.into())
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Args;
    use aoc_solver::{
        AocParser, AocSolver, ParseError, PartSolver, SolveError, SolverRegistryBuilder,
        register_solver,
    };
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    #[derive(AocSolver)]
    #[aoc_solver(max_parts = 2)]
    struct Sum;

    impl AocParser for Sum {
        type SharedData<'a> = Vec<i64>;

        fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
            input
                .split_whitespace()
                .map(|n| n.parse().map_err(|_| ParseError::InvalidFormat(n.into())))
                .collect()
        }
    }

    impl PartSolver<1> for Sum {
        fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
            Ok(shared.iter().sum::<i64>().to_string())
        }
    }

    impl PartSolver<2> for Sum {
        fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
            Ok(shared.iter().product::<i64>().to_string())
        }
    }

    fn executor(dir: &TempDir, extra: &[&str]) -> Executor {
        let mut builder = SolverRegistryBuilder::new();
        register_solver!(builder, Sum, 2018, 1);
        register_solver!(builder, Sum, 2018, 2);
        register_solver!(builder, Sum, 2019, 1);

        let dir = dir.path().to_string_lossy().into_owned();
        let mut argv = vec!["aoc", "--input-dir", dir.as_str(), "--threads", "2"];
        argv.extend_from_slice(extra);
        let config = Config::from_args(Args::try_parse_from(argv).unwrap());
        Executor::new(builder.build(), &config).unwrap()
    }

    fn run(executor: &Executor) -> Vec<SolverResult> {
        let (tx, rx) = std::sync::mpsc::channel();
        executor.execute(tx).unwrap();
        let mut results: Vec<_> = rx.into_iter().collect();
        results.sort_by_key(|r| (r.year, r.day, r.part));
        results
    }

    #[test]
    fn test_filter_parts() {
        assert_eq!(filter_parts(None, 2), 1..=2);
        assert_eq!(filter_parts(Some(2), 2), 2..=2);
        assert!(filter_parts(Some(2), 1).is_empty());
    }

    #[test]
    fn test_work_item_filters() {
        let temp = TempDir::new().unwrap();
        let all = executor(&temp, &[]).collect_work_items();
        assert_eq!(all.len(), 3);

        let items = executor(&temp, &["-y", "2018", "-p", "2"]).collect_work_items();
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|w| w.year == 2018 && w.parts == (2..=2)));
    }

    #[test]
    fn test_missing_input_reports_and_continues() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("2018_day01.txt"), "2 3 4").unwrap();

        for mode in ["sequential", "year", "day", "part"] {
            let executor = executor(&temp, &["-y", "2018", "--parallelize-by", mode]);
            let items = executor.collect_work_items();
            let missing = executor.missing_inputs(&items);
            assert_eq!(missing.len(), 1);
            assert_eq!(missing[0].day, 2);

            let results = run(&executor);
            assert_eq!(results.len(), 4, "mode {mode}");
            assert_eq!(results[0].answer.as_deref().ok(), Some("9"));
            assert_eq!(results[1].answer.as_deref().ok(), Some("24"));
            assert!(results[0].parse_duration.is_some());
            assert!(results[2].answer.is_err());
            assert!(results[3].answer.is_err());
            assert!(results[3].parse_duration.is_none());
        }
    }

    #[test]
    fn test_parse_failure_fails_every_part() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("2019_day01.txt"), "1 x").unwrap();

        let results = run(&executor(&temp, &["-y", "2019"]));
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.answer.is_err()));
    }
}
