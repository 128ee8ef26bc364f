use super::error::StageError;
use super::range::{Range, SENTINEL, Value};
use super::range_set::RangeSet;
use tracing::debug;

/// One raw `destination_start source_start length` line of a stage block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mapping {
    pub destination_start: Value,
    pub source_start: Value,
    pub length: Value,
}

impl Mapping {
    pub fn new(destination_start: Value, source_start: Value, length: Value) -> Self {
        Self {
            destination_start,
            source_start,
            length,
        }
    }

    fn to_range(self) -> Result<Range, StageError> {
        let Mapping {
            destination_start,
            source_start,
            length,
        } = self;

        if length < 1 {
            return Err(StageError::NonPositiveLength {
                destination_start,
                source_start,
                length,
            });
        }

        let out_of_domain = || StageError::OutOfDomain {
            destination_start,
            source_start,
            length,
        };
        let last = length - 1;
        let fits = |start: Value| {
            start >= 0 && start.checked_add(last).is_some_and(|end| end <= SENTINEL)
        };
        if !fits(source_start) || !fits(destination_start) {
            return Err(out_of_domain());
        }

        Range::with_offset(
            source_start,
            source_start + last,
            destination_start - source_start,
        )
        .ok_or_else(out_of_domain)
    }
}

impl From<(Value, Value, Value)> for Mapping {
    fn from((destination_start, source_start, length): (Value, Value, Value)) -> Self {
        Self::new(destination_start, source_start, length)
    }
}

/// One mapping layer: sorted, disjoint ranges tiling `[0, SENTINEL]`.
///
/// Values the declared mappings don't cover map to themselves through
/// synthetic identity ranges inserted at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    ranges: Vec<Range>,
}

impl Stage {
    /// Stage that maps every value to itself
    pub fn identity() -> Self {
        Self {
            ranges: vec![Range::DOMAIN],
        }
    }

    /// Build a stage from declared mappings, in any order.
    ///
    /// Fails if any mapping has a non-positive length, leaves the supported
    /// domain, or overlaps another mapping's source range.
    pub fn from_mappings<I>(mappings: I) -> Result<Self, StageError>
    where
        I: IntoIterator,
        I::Item: Into<Mapping>,
    {
        let mut declared = mappings
            .into_iter()
            .map(|m| m.into().to_range())
            .collect::<Result<Vec<_>, _>>()?;
        declared.sort_unstable_by_key(Range::start);

        if let Some(pair) = declared.windows(2).find(|w| w[1].start() <= w[0].end()) {
            return Err(StageError::Overlap {
                first: pair[0],
                second: pair[1],
            });
        }

        let mut ranges = Vec::with_capacity(declared.len() * 2 + 1);
        let mut next_uncovered: Value = 0;
        for range in declared {
            ranges.extend(Range::new(next_uncovered, range.start() - 1));
            next_uncovered = range.end() + 1;
            ranges.push(range);
        }
        ranges.extend(Range::new(next_uncovered, SENTINEL));

        Ok(Self { ranges })
    }

    /// All ranges, declared and synthetic, ascending by start
    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }

    /// Map every range of `input` through this stage.
    ///
    /// Each input range is split at every stage boundary it crosses and each
    /// piece is shifted by the offset of the stage range covering it, so the
    /// cost depends on the number of crossings, not on range widths.
    ///
    /// Values below `0` or above `SENTINEL` are not covered by any stage
    /// range and come out unchanged.
    pub fn apply(&self, input: &RangeSet) -> RangeSet {
        let mut output = Vec::with_capacity(input.len());
        for range in input {
            let first = self.ranges.partition_point(|s| s.end() < range.start());
            let mut uncovered_from = range.start();
            for s in self.ranges[first..]
                .iter()
                .take_while(|s| s.start() <= range.end())
            {
                let Some(piece) = range.clip_to(s) else {
                    continue;
                };
                // stage ranges lie in [0, SENTINEL], so neither bound can overflow
                output.extend(pass_through(uncovered_from, piece.start() - 1));
                output.push(piece.translate(s.offset()));
                uncovered_from = piece.end() + 1;
            }
            output.extend(pass_through(uncovered_from, range.end()));
        }
        RangeSet::from(output)
    }
}

fn pass_through(start: Value, end: Value) -> Option<Range> {
    let uncovered = Range::new(start, end)?;
    debug!(%uncovered, "values outside stage coverage pass through unchanged");
    Some(uncovered)
}

impl Default for Stage {
    fn default() -> Self {
        Self::identity()
    }
}
