//! Core solver traits

use crate::error::{ParseError, SolveError};

/// Parses puzzle input into the data shared by every part of a solver.
///
/// `SharedData` is a generic associated type so a solver can either own its
/// parsed data (`Vec<T>`, custom structs) or borrow straight from the input
/// (`&'a str`, `Vec<&'a [u8]>`) when no transformation is needed.
///
/// ```
/// use aoc_solver::{AocParser, ParseError};
///
/// struct Lines;
///
/// impl AocParser for Lines {
///     type SharedData<'a> = Vec<&'a str>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         Ok(input.lines().collect())
///     }
/// }
///
/// assert_eq!(Lines::parse("a\nb").unwrap(), vec!["a", "b"]);
/// ```
pub trait AocParser {
    /// Parsed input plus any intermediate results cached between parts
    type SharedData<'a>;

    /// Parse the input string into the shared data structure.
    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError>;
}

/// Solves part `N` of a puzzle.
///
/// Parts receive mutable access to the shared data so that a later part can
/// reuse work cached by an earlier one.
pub trait PartSolver<const N: u8>: AocParser {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError>;
}

/// Runtime dispatch from a part number to the matching [`PartSolver`].
///
/// Usually generated with `#[derive(AocSolver)]`, which implements
/// `solve_part` as a `match` over `1..=max_parts`.
pub trait Solver: AocParser {
    /// Number of parts this solver implements
    const PARTS: u8;

    /// Solve a specific part of the problem
    ///
    /// Returns [`SolveError::PartNotImplemented`] for part numbers the solver
    /// has no implementation for.
    fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError>;
}

/// Bounds-checked entry point layered over [`Solver`].
pub trait SolverExt: Solver {
    /// Like [`Solver::solve_part`], but rejects `part == 0` and
    /// `part > PARTS` with [`SolveError::PartOutOfRange`] before dispatching.
    fn solve_part_checked_range(
        shared: &mut Self::SharedData<'_>,
        part: u8,
    ) -> Result<String, SolveError> {
        if (1..=Self::PARTS).contains(&part) {
            Self::solve_part(shared, part)
        } else {
            Err(SolveError::PartOutOfRange(part))
        }
    }
}

impl<T: Solver + ?Sized> SolverExt for T {}
