//! Solver instance implementation

use crate::error::{ParseError, SolveError};
use crate::solver::{Solver, SolverExt};
use chrono::{DateTime, TimeDelta, Utc};
use tracing::debug;

/// Answer for one part, with the wall-clock window it was computed in
#[derive(Debug, Clone)]
pub struct SolveResult {
    pub answer: String,
    pub solve_start: DateTime<Utc>,
    pub solve_end: DateTime<Utc>,
}

impl SolveResult {
    pub fn duration(&self) -> TimeDelta {
        self.solve_end - self.solve_start
    }
}

/// Parsed state of one year/day puzzle, ready to solve parts against.
///
/// The shared data may borrow from the input, so an instance lives no longer
/// than the input string it was created from.
pub struct SolverInstance<'a, S: Solver> {
    year: u16,
    day: u8,
    shared: S::SharedData<'a>,
    parse_start: DateTime<Utc>,
    parse_end: DateTime<Utc>,
}

impl<'a, S: Solver> SolverInstance<'a, S> {
    /// Parse `input` and record how long parsing took.
    pub fn new(year: u16, day: u8, input: &'a str) -> Result<Self, ParseError> {
        let parse_start = Utc::now();
        let shared = S::parse(input)?;
        let parse_end = Utc::now();
        debug!(year, day, elapsed = ?(parse_end - parse_start), "parsed input");

        Ok(Self {
            year,
            day,
            shared,
            parse_start,
            parse_end,
        })
    }
}

/// Type-erased interface for working with any solver through dynamic dispatch
///
/// ```no_run
/// use aoc_solver::DynSolver;
///
/// fn run(mut solver: Box<dyn DynSolver>) -> Result<(), Box<dyn std::error::Error>> {
///     for part in 1..=solver.parts() {
///         let result = solver.solve(part)?;
///         println!("Part {part}: {} (took {})", result.answer, result.duration());
///     }
///     println!("Parse took {}", solver.parse_duration());
///     Ok(())
/// }
/// ```
pub trait DynSolver {
    /// Solve the specified part, rejecting part numbers outside `1..=parts()`
    fn solve(&mut self, part: u8) -> Result<SolveResult, SolveError>;

    fn parse_start(&self) -> DateTime<Utc>;

    fn parse_end(&self) -> DateTime<Utc>;

    fn year(&self) -> u16;

    fn day(&self) -> u8;

    /// Number of parts this solver supports
    fn parts(&self) -> u8;

    fn parse_duration(&self) -> TimeDelta {
        self.parse_end() - self.parse_start()
    }
}

impl<'a, S: Solver> DynSolver for SolverInstance<'a, S> {
    fn solve(&mut self, part: u8) -> Result<SolveResult, SolveError> {
        let solve_start = Utc::now();
        let answer = S::solve_part_checked_range(&mut self.shared, part)?;
        let solve_end = Utc::now();
        debug!(
            year = self.year,
            day = self.day,
            part,
            elapsed = ?(solve_end - solve_start),
            "solved part"
        );

        Ok(SolveResult {
            answer,
            solve_start,
            solve_end,
        })
    }

    fn parse_start(&self) -> DateTime<Utc> {
        self.parse_start
    }

    fn parse_end(&self) -> DateTime<Utc> {
        self.parse_end
    }

    fn year(&self) -> u16 {
        self.year
    }

    fn day(&self) -> u8 {
        self.day
    }

    fn parts(&self) -> u8 {
        S::PARTS
    }
}
