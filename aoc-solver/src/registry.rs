//! Solver registry for managing and creating solver instances

use crate::error::{ParseError, RegistrationError, SolverError};
use crate::instance::{DynSolver, SolverInstance};
use crate::solver::Solver;
use tracing::trace;

// ============================================================================
// Storage Constants and Index Calculation
// ============================================================================

/// First Advent of Code year
pub const BASE_YEAR: u16 = 2015;
/// Number of years the registry has room for (2015-2034)
pub const MAX_YEARS: usize = 20;
pub const DAYS_PER_YEAR: usize = 25;
/// Total number of year/day slots
pub const CAPACITY: usize = MAX_YEARS * DAYS_PER_YEAR;

#[inline]
fn calc_index(year: u16, day: u8) -> Option<usize> {
    if year < BASE_YEAR || year >= BASE_YEAR + MAX_YEARS as u16 {
        return None;
    }
    if day == 0 || day > DAYS_PER_YEAR as u8 {
        return None;
    }
    let y = (year - BASE_YEAR) as usize;
    let d = (day - 1) as usize;
    Some(y * DAYS_PER_YEAR + d)
}

#[inline]
fn from_index(index: usize) -> (u16, u8) {
    let year = BASE_YEAR + (index / DAYS_PER_YEAR) as u16;
    let day = (index % DAYS_PER_YEAR) as u8 + 1;
    (year, day)
}

// ============================================================================
// Factory Types
// ============================================================================

/// Thread-safe factory that parses an input into a ready-to-solve instance
pub type SolverFactory =
    Box<dyn for<'a> Fn(&'a str) -> Result<Box<dyn DynSolver + 'a>, ParseError> + Send + Sync>;

/// Metadata about a registered solver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactoryInfo {
    pub year: u16,
    pub day: u8,
    /// Number of parts this solver supports
    pub parts: u8,
}

struct FactoryEntry {
    factory: SolverFactory,
    parts: u8,
}

// ============================================================================
// Plugins
// ============================================================================

/// Object-safe handle through which a solver type registers itself.
///
/// Blanket-implemented for every [`Solver`], so plugin tables can hold
/// different solver types side by side.
pub trait RegisterableSolver: Sync {
    fn register_with(
        &self,
        builder: SolverRegistryBuilder,
        year: u16,
        day: u8,
    ) -> Result<SolverRegistryBuilder, RegistrationError>;

    fn parts(&self) -> u8;
}

impl<S> RegisterableSolver for S
where
    S: Solver + Sync + 'static,
{
    fn register_with(
        &self,
        builder: SolverRegistryBuilder,
        year: u16,
        day: u8,
    ) -> Result<SolverRegistryBuilder, RegistrationError> {
        builder.register_solver::<S>(year, day)
    }

    fn parts(&self) -> u8 {
        S::PARTS
    }
}

/// Plugin record submitted through `inventory`, normally by
/// `#[derive(AutoRegisterSolver)]`.
///
/// ```no_run
/// use aoc_solver::{AocParser, ParseError, SolveError, Solver, SolverPlugin};
///
/// struct Day1;
///
/// impl AocParser for Day1 {
///     type SharedData<'a> = &'a str;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         Ok(input)
///     }
/// }
///
/// impl Solver for Day1 {
///     const PARTS: u8 = 1;
///
///     fn solve_part(shared: &mut &str, _part: u8) -> Result<String, SolveError> {
///         Ok(shared.len().to_string())
///     }
/// }
///
/// aoc_solver::inventory::submit! {
///     SolverPlugin {
///         year: 2023,
///         day: 1,
///         solver: &Day1,
///         tags: &["2023", "easy"],
///     }
/// }
/// ```
pub struct SolverPlugin {
    pub year: u16,
    pub day: u8,
    pub solver: &'static dyn RegisterableSolver,
    /// Free-form labels used by the CLI's `--tags` filter
    pub tags: &'static [&'static str],
}

inventory::collect!(SolverPlugin);

// ============================================================================
// Builder
// ============================================================================

/// Builder for an immutable [`SolverRegistry`].
///
/// Storage is a flat `Vec` indexed by year/day, so lookups are O(1) and
/// iteration yields solvers in (year, day) order.
pub struct SolverRegistryBuilder {
    entries: Vec<Option<FactoryEntry>>,
}

impl SolverRegistryBuilder {
    pub fn new() -> Self {
        Self {
            entries: (0..CAPACITY).map(|_| None).collect(),
        }
    }

    /// Register a factory function with an explicit parts count
    pub fn register_factory<F>(
        mut self,
        year: u16,
        day: u8,
        parts: u8,
        factory: F,
    ) -> Result<Self, RegistrationError>
    where
        F: for<'a> Fn(&'a str) -> Result<Box<dyn DynSolver + 'a>, ParseError>
            + Send
            + Sync
            + 'static,
    {
        let index = calc_index(year, day).ok_or(RegistrationError::InvalidYearDay(year, day))?;

        if self.entries[index].is_some() {
            return Err(RegistrationError::DuplicateSolver(year, day));
        }

        self.entries[index] = Some(FactoryEntry {
            factory: Box::new(factory),
            parts,
        });
        Ok(self)
    }

    /// Register a [`Solver`] type for a year/day
    pub fn register_solver<S>(self, year: u16, day: u8) -> Result<Self, RegistrationError>
    where
        S: Solver + 'static,
    {
        self.register_factory(year, day, S::PARTS, move |input: &str| {
            Ok(Box::new(SolverInstance::<S>::new(year, day, input)?))
        })
    }

    /// Register every plugin collected through `inventory`
    ///
    /// ```no_run
    /// # use aoc_solver::SolverRegistryBuilder;
    /// let registry = SolverRegistryBuilder::new()
    ///     .register_all_plugins()
    ///     .unwrap()
    ///     .build();
    /// ```
    pub fn register_all_plugins(self) -> Result<Self, RegistrationError> {
        self.register_solver_plugins(|_| true)
    }

    /// Register plugins for which `filter` returns `true`
    ///
    /// ```no_run
    /// # use aoc_solver::SolverRegistryBuilder;
    /// let registry = SolverRegistryBuilder::new()
    ///     .register_solver_plugins(|plugin| plugin.tags.contains(&"2023"))
    ///     .unwrap()
    ///     .build();
    /// ```
    pub fn register_solver_plugins<F>(mut self, filter: F) -> Result<Self, RegistrationError>
    where
        F: Fn(&SolverPlugin) -> bool,
    {
        for plugin in inventory::iter::<SolverPlugin>() {
            if filter(plugin) {
                trace!(year = plugin.year, day = plugin.day, "registering plugin");
                self = plugin.solver.register_with(self, plugin.year, plugin.day)?;
            }
        }
        Ok(self)
    }

    pub fn build(self) -> SolverRegistry {
        SolverRegistry {
            entries: self.entries,
        }
    }
}

impl Default for SolverRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Registry
// ============================================================================

/// Immutable year/day → factory lookup.
///
/// `SolverRegistry` is `Send + Sync`, so one registry can be shared by every
/// worker thread of the CLI executor.
pub struct SolverRegistry {
    entries: Vec<Option<FactoryEntry>>,
}

impl SolverRegistry {
    /// Metadata for every registered solver, in (year, day) order
    pub fn iter_info(&self) -> impl Iterator<Item = FactoryInfo> + '_ {
        self.entries.iter().enumerate().filter_map(|(i, entry)| {
            entry.as_ref().map(|e| {
                let (year, day) = from_index(i);
                FactoryInfo {
                    year,
                    day,
                    parts: e.parts,
                }
            })
        })
    }

    pub fn get_info(&self, year: u16, day: u8) -> Option<FactoryInfo> {
        calc_index(year, day)
            .and_then(|i| self.entries.get(i)?.as_ref())
            .map(|e| FactoryInfo {
                year,
                day,
                parts: e.parts,
            })
    }

    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.get_info(year, day).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|e| e.is_none())
    }

    /// Parse `input` with the solver registered for `year`/`day`
    pub fn create_solver<'a>(
        &self,
        year: u16,
        day: u8,
        input: &'a str,
    ) -> Result<Box<dyn DynSolver + 'a>, SolverError> {
        let index = calc_index(year, day).ok_or(SolverError::InvalidYearDay(year, day))?;

        let entry = self
            .entries
            .get(index)
            .and_then(|e| e.as_ref())
            .ok_or(SolverError::NotFound(year, day))?;

        (entry.factory)(input).map_err(SolverError::ParseError)
    }
}
