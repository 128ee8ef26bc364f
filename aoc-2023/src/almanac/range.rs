use std::fmt;

/// Integer type of every value flowing through the almanac.
///
/// Signed so offsets (`destination - source`) can be negative without a
/// second type; all values themselves stay within `[0, SENTINEL]`.
pub type Value = i64;

/// Upper bound of every stage's coverage.
///
/// Declared mappings and seeds are validated to lie in `[0, SENTINEL]`, so
/// every translated value stays in that domain and `value + offset` can never
/// overflow (`|offset| <= SENTINEL` and `2 * SENTINEL < i64::MAX`).
pub const SENTINEL: Value = i64::MAX / 4;

/// Closed interval `[start, end]` plus the offset its values are shifted by.
///
/// Inside a [`Stage`](super::Stage) the offset is the stage's translation for
/// that interval. Inside a [`RangeSet`](super::RangeSet) it is always `0`:
/// the interval is already expressed in the current coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Range {
    start: Value,
    end: Value,
    offset: Value,
}

impl Range {
    /// Identity range over the whole supported domain `[0, SENTINEL]`
    pub const DOMAIN: Range = Range {
        start: 0,
        end: SENTINEL,
        offset: 0,
    };

    /// Identity range, `None` unless `start <= end`
    pub fn new(start: Value, end: Value) -> Option<Self> {
        Self::with_offset(start, end, 0)
    }

    pub fn with_offset(start: Value, end: Value, offset: Value) -> Option<Self> {
        (start <= end).then_some(Self { start, end, offset })
    }

    pub fn singleton(value: Value) -> Self {
        Self {
            start: value,
            end: value,
            offset: 0,
        }
    }

    pub fn start(&self) -> Value {
        self.start
    }

    pub fn end(&self) -> Value {
        self.end
    }

    pub fn offset(&self) -> Value {
        self.offset
    }

    /// Number of values covered; never zero
    pub fn width(&self) -> u128 {
        u128::from(self.end.abs_diff(self.start)) + 1
    }

    pub fn contains(&self, value: Value) -> bool {
        (self.start..=self.end).contains(&value)
    }

    pub fn overlaps(&self, other: &Range) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Intersection with `other`, keeping `self`'s offset
    pub fn clip_to(&self, other: &Range) -> Option<Range> {
        if !self.overlaps(other) {
            return None;
        }
        Some(Range {
            start: self.start.max(other.start),
            end: self.end.min(other.end),
            offset: self.offset,
        })
    }

    /// Shift both bounds by `offset`. The result carries no further offset.
    pub fn translate(&self, offset: Value) -> Range {
        Range {
            start: self.start + offset,
            end: self.end + offset,
            offset: 0,
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)?;
        if self.offset != 0 {
            write!(f, "{:+}", self.offset)?;
        }
        Ok(())
    }
}
