//! Parallel executor for running solvers

use crate::cli::ParallelizeBy;
use crate::config::Config;
use crate::error::{ArcExecutorError, ExecutorError};
use crate::input::InputStore;
use aoc_solver::{DynSolver, SolverRegistry};
use chrono::TimeDelta;
use itertools::Itertools;
use rayon::prelude::*;
use std::ops::RangeInclusive;
use std::sync::mpsc::Sender;
use tracing::{debug, warn};

/// Result from a single solver execution
#[derive(Debug)]
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    pub answer: Result<String, ArcExecutorError>,
    pub solve_duration: TimeDelta,
    /// Parse time, reported on the first result produced from each parse
    pub parse_duration: Option<TimeDelta>,
}

impl SolverResult {
    fn failed(year: u16, day: u8, part: u8, error: ArcExecutorError) -> Self {
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
#[derive(Debug, Clone, PartialEq, Eq)]
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

/// State shared by every worker thread
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
                inputs: config.inputs.clone(),
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

    /// Execute all work items and send results to channel
    ///
    /// Per-part failures travel as error results; only failures of the
    /// executor itself are returned.
    pub fn execute(&self, tx: Sender<SolverResult>) -> Result<(), ArcExecutorError> {
        let work_items = self.collect_work_items();
        let cfg = &self.sync_executor_config;

        match cfg.parallelize_by {
            ParallelizeBy::Sequential => {
                let mut collected_error: Option<ArcExecutorError> = None;
                for work in work_items {
                    if let Err(e) = run_work_item(&work, &tx, cfg) {
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
            // Part differs from Day only inside run_work_item
            ParallelizeBy::Day | ParallelizeBy::Part => self.execute_parallel(work_items, &tx),
        }
    }

    /// Execute work items in parallel, collecting errors
    fn execute_parallel(
        &self,
        work_items: Vec<WorkItem>,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        let cfg = &self.sync_executor_config;

        self.thread_pool.install(|| {
            work_items
                .into_par_iter()
                .map(|work| run_work_item(&work, tx, cfg).err())
                .reduce_with(|err1, err2| match (err1, err2) {
                    (Some(err1), err2) => Some(ArcExecutorError::combine_opt(err2, err1)),
                    (None, err2) => err2,
                })
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
        let cfg = &self.sync_executor_config;

        self.thread_pool.install(|| {
            groups
                .into_par_iter()
                .map(|items| {
                    let mut err = None;
                    for work in items {
                        if let Err(e) = run_work_item(&work, tx, cfg) {
                            err = Some(ArcExecutorError::combine_opt(err, e))
                        }
                    }
                    err
                })
                .reduce_with(|err1, err2| match (err1, err2) {
                    (Some(err1), err2) => Some(ArcExecutorError::combine_opt(err2, err1)),
                    (None, err2) => err2,
                })
                .unwrap_or_default()
                .map_or(Ok(()), Err)
        })
    }
}

/// Parts of a solver with `max_parts` parts that pass the part filter
#[allow(clippy::reversed_empty_ranges)]
fn filter_parts(part_filter: Option<u8>, max_parts: u8) -> RangeInclusive<u8> {
    match part_filter {
        Some(p) if p <= max_parts => p..=p,
        Some(_) => 1..=0, // Empty range - intentional
        None => 1..=max_parts,
    }
}

fn send(tx: &Sender<SolverResult>, result: SolverResult) -> Result<(), ArcExecutorError> {
    tx.send(result)
        .map_err(|_| ArcExecutorError::from(ExecutorError::ChannelSend))
}

/// Send the same error as the result of every part of `work`
fn send_failed_parts(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    error: ArcExecutorError,
) -> Result<(), ArcExecutorError> {
    warn!(year = work.year, day = work.day, %error, "skipping solver");
    for part in work.parts.clone() {
        send(tx, SolverResult::failed(work.year, work.day, part, error.clone()))?;
    }
    Ok(())
}

/// Read the input of one work item and solve its parts
fn run_work_item(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    cfg: &SyncExecutorConfig,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);
    let input = match cfg.inputs.read(year, day) {
        Ok(input) => input,
        Err(source) => {
            let error = ExecutorError::Input { year, day, source };
            return send_failed_parts(work, tx, error.into());
        }
    };
    debug!(year, day, bytes = input.len(), "read input");

    if matches!(cfg.parallelize_by, ParallelizeBy::Part) {
        run_parts_parallel(work, &input, tx, &cfg.registry)
    } else {
        run_parts_sequential(work, &input, tx, &cfg.registry)
    }
}

/// Parse once and solve every part in order on the current thread
fn run_parts_sequential(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    registry: &SolverRegistry,
) -> Result<(), ArcExecutorError> {
    let mut solver = match registry.create_solver(work.year, work.day, input) {
        Ok(solver) => solver,
        Err(e) => return send_failed_parts(work, tx, ExecutorError::from(e).into()),
    };

    let mut parse_duration = Some(solver.parse_duration());
    for part in work.parts.clone() {
        let mut result = solve_part(work.year, work.day, part, &mut *solver);
        result.parse_duration = parse_duration.take();
        send(tx, result)?;
    }
    Ok(())
}

/// Solve every part on its own instance in parallel; results are
/// reordered by the aggregator
fn run_parts_parallel(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    registry: &SolverRegistry,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);

    work.parts
        .clone()
        .into_par_iter()
        .map(|part| {
            let result = match registry.create_solver(year, day, input) {
                Ok(mut solver) => {
                    let mut result = solve_part(year, day, part, &mut *solver);
                    result.parse_duration = Some(solver.parse_duration());
                    result
                }
                Err(e) => SolverResult::failed(year, day, part, ExecutorError::from(e).into()),
            };
            send(tx, result)
        })
        .collect()
}

/// Solve a single part
fn solve_part(year: u16, day: u8, part: u8, solver: &mut dyn DynSolver) -> SolverResult {
    match solver.solve(part) {
        Ok(solved) => SolverResult {
            year,
            day,
            part,
            solve_duration: solved.duration(),
            answer: Ok(solved.answer),
            parse_duration: None,
        },
        Err(e) => {
            let error = ExecutorError::Solver(e.into());
            SolverResult::failed(year, day, part, error.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::SolverRegistryBuilder;
    use std::fs;
    use std::path::Path;
    use std::sync::mpsc;
    use tempfile::TempDir;

    fn registry() -> SolverRegistry {
        SolverRegistryBuilder::new()
            .register_solver::<aoc_2023::year_2023::day_6::Solver>(2023, 6)
            .unwrap()
            .register_solver::<aoc_2023::year_2023::day_9::Solver>(2023, 9)
            .unwrap()
            .build()
    }

    fn executor(dir: &Path, parallelize_by: ParallelizeBy, part_filter: Option<u8>) -> Executor {
        let config = Config {
            year_filter: None,
            day_filter: None,
            part_filter,
            tags: Vec::new(),
            inputs: InputStore::new(dir.to_path_buf()),
            thread_count: 2,
            parallelize_by,
            quiet: true,
        };
        Executor::new(registry(), &config).unwrap()
    }

    fn run(executor: &Executor) -> Vec<SolverResult> {
        let (tx, rx) = mpsc::channel();
        executor.execute(tx).unwrap();
        let mut results: Vec<_> = rx.into_iter().collect();
        results.sort_by_key(|r| (r.year, r.day, r.part));
        results
    }

    fn answers(results: &[SolverResult]) -> Vec<Option<&str>> {
        results
            .iter()
            .map(|r| r.answer.as_deref().ok())
            .collect()
    }

    #[test]
    fn test_filter_parts() {
        assert_eq!(filter_parts(None, 2), 1..=2);
        assert_eq!(filter_parts(Some(2), 2), 2..=2);
        assert!(filter_parts(Some(2), 1).is_empty());
    }

    #[test]
    fn test_collect_work_items() {
        let temp = TempDir::new().unwrap();
        let items = executor(temp.path(), ParallelizeBy::Day, Some(1)).collect_work_items();
        assert_eq!(
            items,
            vec![
                WorkItem {
                    year: 2023,
                    day: 6,
                    parts: 1..=1
                },
                WorkItem {
                    year: 2023,
                    day: 9,
                    parts: 1..=1
                },
            ]
        );
    }

    #[test]
    fn test_every_mode_gives_the_same_answers() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("2023_day06.txt"),
            "Time:      7  15   30\nDistance:  9  40  200\n",
        )
        .unwrap();
        fs::write(temp.path().join("2023_day09.txt"), "0 3 6 9 12 15\n").unwrap();

        for mode in [
            ParallelizeBy::Sequential,
            ParallelizeBy::Year,
            ParallelizeBy::Day,
            ParallelizeBy::Part,
        ] {
            let results = run(&executor(temp.path(), mode, None));
            assert_eq!(
                answers(&results),
                vec![Some("288"), Some("71503"), Some("18"), Some("-3")],
                "{mode:?}"
            );
            assert!(results.iter().any(|r| r.parse_duration.is_some()));
        }
    }

    #[test]
    fn test_missing_input_fails_each_part() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("2023_day09.txt"), "1 2 3\n").unwrap();

        let results = run(&executor(temp.path(), ParallelizeBy::Day, None));
        assert_eq!(
            answers(&results),
            vec![None, None, Some("4"), Some("0")]
        );
        for result in &results[..2] {
            let Err(error) = &result.answer else {
                panic!("expected an error result");
            };
            assert!(matches!(error.inner(), ExecutorError::Input { day: 6, .. }));
        }
    }

    #[test]
    fn test_parse_failure_fails_each_part() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("2023_day06.txt"), "Time: 1 2\n").unwrap();
        fs::write(temp.path().join("2023_day09.txt"), "x y\n").unwrap();

        let results = run(&executor(temp.path(), ParallelizeBy::Part, None));
        assert_eq!(results.len(), 4);
        assert!(results.iter().all(|r| matches!(
            r.answer.as_ref().map_err(|e| e.inner()),
            Err(ExecutorError::Solver(aoc_solver::SolverError::ParseError(_)))
        )));
    }
}
