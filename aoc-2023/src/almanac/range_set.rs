use super::error::AlmanacError;
use super::range::{Range, SENTINEL, Value};
use itertools::Itertools;

/// The current population of values, as an unordered bag of ranges.
///
/// Ranges may coincide or overlap in value; only each member's own
/// `start <= end` is guaranteed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeSet {
    ranges: Vec<Range>,
}

impl RangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds read as `start length` pairs
    pub fn from_seed_pairs(tokens: &[Value]) -> Result<Self, AlmanacError> {
        if tokens.is_empty() {
            return Err(AlmanacError::MissingSeeds);
        }
        if tokens.len() % 2 != 0 {
            return Err(AlmanacError::UnpairedSeeds(tokens.len()));
        }
        tokens
            .iter()
            .tuples()
            .map(|(&start, &length)| seed_range(start, length))
            .collect()
    }

    /// Seeds read as individual values
    pub fn from_seed_values(tokens: &[Value]) -> Result<Self, AlmanacError> {
        if tokens.is_empty() {
            return Err(AlmanacError::MissingSeeds);
        }
        tokens.iter().map(|&value| seed_range(value, 1)).collect()
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Range> {
        self.ranges.iter()
    }

    /// Total number of values covered, counting coinciding values once per range
    pub fn total_width(&self) -> u128 {
        self.ranges.iter().map(Range::width).sum()
    }

    /// Smallest value in the population.
    ///
    /// Every stage application is a per-piece translation, so the lowest
    /// value of a range is always its `start`.
    pub fn minimum(&self) -> Option<Value> {
        self.ranges.iter().map(Range::start).min()
    }
}

fn seed_range(start: Value, length: Value) -> Result<Range, AlmanacError> {
    let invalid = || AlmanacError::InvalidSeed { start, length };
    if start < 0 || length < 1 {
        return Err(invalid());
    }
    start
        .checked_add(length - 1)
        .filter(|&end| end <= SENTINEL)
        .and_then(|end| Range::new(start, end))
        .ok_or_else(invalid)
}

impl From<Vec<Range>> for RangeSet {
    fn from(ranges: Vec<Range>) -> Self {
        Self { ranges }
    }
}

impl FromIterator<Range> for RangeSet {
    fn from_iter<I: IntoIterator<Item = Range>>(iter: I) -> Self {
        Self {
            ranges: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RangeSet {
    type Item = &'a Range;
    type IntoIter = std::slice::Iter<'a, Range>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.iter()
    }
}
