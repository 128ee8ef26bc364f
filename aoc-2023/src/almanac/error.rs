use super::range::{Range, Value};
use thiserror::Error;

/// Errors raised while building an almanac from parsed tokens
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlmanacError {
    /// A line did not tokenize into the expected integer shape
    #[error("line {line}: expected {expected}, found {found:?}")]
    Parse {
        line: usize,
        expected: &'static str,
        found: String,
    },
    #[error("malformed stage: {0}")]
    MalformedStage(#[from] StageError),
    #[error("no seeds declared")]
    MissingSeeds,
    /// Seed tokens read as `start length` pairs, but one was left over
    #[error("seed ranges need start/length pairs, found {0} values")]
    UnpairedSeeds(usize),
    #[error("invalid seed range: start {start}, length {length}")]
    InvalidSeed { start: Value, length: Value },
}

/// Why a list of mapping triples cannot form a stage
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StageError {
    #[error("mapping {destination_start} {source_start} {length} has non-positive length")]
    NonPositiveLength {
        destination_start: Value,
        source_start: Value,
        length: Value,
    },
    /// Source or destination interval leaves `[0, SENTINEL]`
    #[error("mapping {destination_start} {source_start} {length} is outside the supported domain")]
    OutOfDomain {
        destination_start: Value,
        source_start: Value,
        length: Value,
    },
    #[error("source ranges {first} and {second} overlap")]
    Overlap { first: Range, second: Range },
}
