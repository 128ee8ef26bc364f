//! Interval remapping through piecewise-linear stages
//!
//! An almanac is a list of [`Stage`]s, each translating every value in
//! `[0, SENTINEL]` by the offset of the range that contains it. Populations of
//! values are carried as a [`RangeSet`], so a seed range spanning billions of
//! values costs only as much as the number of stage boundaries it crosses.
//!
//! # Example
//!
//! ```rust
//! use aoc_2023::almanac::{Mapping, Pipeline, RangeSet, Stage};
//!
//! // 98..=99 -> 50..=51, 50..=97 -> 52..=99, everything else unchanged
//! let soil = Stage::from_mappings([Mapping::new(50, 98, 2), Mapping::new(52, 50, 48)]).unwrap();
//! let pipeline = Pipeline::new(vec![soil]);
//!
//! let seeds = RangeSet::from_seed_pairs(&[79, 14, 55, 13]).unwrap();
//! assert_eq!(pipeline.lowest(seeds), Some(57));
//! ```

mod error;
#[cfg(test)]
mod oracle;
mod pipeline;
mod range;
mod range_set;
mod stage;

pub use error::{AlmanacError, StageError};
pub use pipeline::Pipeline;
pub use range::{Range, SENTINEL, Value};
pub use range_set::RangeSet;
pub use stage::{Mapping, Stage};

#[cfg(test)]
mod tests;
