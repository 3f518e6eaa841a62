//! Disjoint set of closed integer intervals
//!
//! [`IntervalSet`] keeps a minimal, sorted, non-overlapping list of [`Interval`]s
//! under repeated insertion and answers coverage and membership queries over it.
//!
//! # Invariants
//!
//! After every [`IntervalSet::insert`]:
//! - entries are sorted ascending by `start`
//! - for consecutive entries `a`, `b`: `a.end() < b.start()`
//! - no entry is contained in another entry
//!
//! Intervals that only touch (`[1, 3]` and `[4, 6]`) share no point and are kept
//! as separate entries. Coverage is unaffected by this.
//!
//! # Example
//!
//! ```
//! use aoc_2025::utils::interval_set::{Interval, IntervalSet};
//!
//! let mut set = IntervalSet::new();
//! set.insert("3-5".parse().unwrap());
//! set.insert("10-14".parse().unwrap());
//! set.insert("16-20".parse().unwrap());
//! set.insert("12-18".parse().unwrap());
//!
//! assert_eq!(set.as_slice(), &[Interval::new(3, 5).unwrap(), Interval::new(10, 20).unwrap()]);
//! assert_eq!(set.total_covered(), 14);
//! assert!(set.contains(17));
//! assert!(!set.contains(8));
//! ```

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use thiserror::Error;

/// Error type for building an [`Interval`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntervalError {
    /// `start` is greater than `end`
    #[error("interval start {start} is greater than end {end}")]
    Inverted { start: i64, end: i64 },
    /// Text is not of the form `start-end`
    #[error("expected `start-end`, got {0:?}")]
    MissingDelimiter(String),
    /// A bound is not a decimal integer
    #[error("invalid interval bound {bound:?}: {source}")]
    InvalidBound {
        bound: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Closed integer range `[start, end]` with `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Interval {
    start: i64,
    end: i64,
}

impl Interval {
    /// Create an interval, rejecting `start > end`
    pub fn new(start: i64, end: i64) -> Result<Self, IntervalError> {
        if start > end {
            return Err(IntervalError::Inverted { start, end });
        }
        Ok(Self { start, end })
    }

    /// Interval holding a single point
    pub fn point(value: i64) -> Self {
        Self {
            start: value,
            end: value,
        }
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn end(&self) -> i64 {
        self.end
    }

    /// Number of integers in the interval.
    ///
    /// `u128` because `[i64::MIN, i64::MAX]` holds 2^64 points.
    pub fn len(&self) -> u128 {
        u128::from(self.end.abs_diff(self.start)) + 1
    }

    /// Always false, an interval holds at least one point
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, point: i64) -> bool {
        self.start <= point && point <= self.end
    }

    /// True if both intervals share at least one point
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Smallest interval spanning both `self` and `other`
    pub fn merge(&self, other: &Interval) -> Interval {
        Interval {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Iterate over every integer in the interval
    pub fn iter(&self) -> RangeInclusive<i64> {
        self.start..=self.end
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Parses `start-end` with non-negative decimal bounds
impl FromStr for Interval {
    type Err = IntervalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| IntervalError::MissingDelimiter(s.to_string()))?;

        let parse_bound = |bound: &str| {
            bound
                .parse::<i64>()
                .map_err(|source| IntervalError::InvalidBound {
                    bound: bound.to_string(),
                    source,
                })
        };

        Interval::new(parse_bound(start)?, parse_bound(end)?)
    }
}

impl TryFrom<RangeInclusive<i64>> for Interval {
    type Error = IntervalError;

    fn try_from(range: RangeInclusive<i64>) -> Result<Self, Self::Error> {
        let (start, end) = range.into_inner();
        Interval::new(start, end)
    }
}

impl From<Interval> for RangeInclusive<i64> {
    fn from(interval: Interval) -> Self {
        interval.start..=interval.end
    }
}

/// Sorted set of pairwise disjoint [`Interval`]s
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntervalSet {
    intervals: Vec<Interval>,
}

impl IntervalSet {
    /// Construct an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `interval` into the set.
    ///
    /// The first entry overlapping `interval` is replaced by their merge in place.
    /// Without an overlap, `interval` is inserted before the first entry starting
    /// after it. A coalescing sweep then folds any entries the new span reaches.
    pub fn insert(&mut self, interval: Interval) {
        match self.intervals.iter().position(|i| i.overlaps(&interval)) {
            Some(idx) => self.intervals[idx] = self.intervals[idx].merge(&interval),
            None => {
                let idx = self
                    .intervals
                    .iter()
                    .position(|i| i.start > interval.start)
                    .unwrap_or(self.intervals.len());
                self.intervals.insert(idx, interval);
            }
        }
        self.coalesce();
    }

    /// Consuming variant of [`insert`](Self::insert)
    pub fn with(mut self, interval: Interval) -> Self {
        self.insert(interval);
        self
    }

    /// Merge overlapping entries until a full pass merges nothing.
    ///
    /// Entries must already be sorted by `start`.
    fn coalesce(&mut self) {
        loop {
            let before = self.intervals.len();
            // `dedup_by` hands (current, previous); a merged entry is dropped
            self.intervals.dedup_by(|current, previous| {
                if previous.overlaps(current) {
                    *previous = previous.merge(current);
                    true
                } else {
                    false
                }
            });
            if self.intervals.len() == before {
                break;
            }
        }
    }

    /// Count of distinct integers covered by the set
    pub fn total_covered(&self) -> u128 {
        self.intervals.iter().map(Interval::len).sum()
    }

    /// True if `point` lies inside any entry
    pub fn contains(&self, point: i64) -> bool {
        // First entry ending at or after `point` is the only candidate
        let idx = self.intervals.partition_point(|i| i.end < point);
        self.intervals
            .get(idx)
            .is_some_and(|interval| interval.contains(point))
    }

    /// Number of disjoint entries
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Interval> {
        self.intervals.iter()
    }

    pub fn as_slice(&self) -> &[Interval] {
        &self.intervals
    }
}

impl FromIterator<Interval> for IntervalSet {
    fn from_iter<T: IntoIterator<Item = Interval>>(iter: T) -> Self {
        let mut set = IntervalSet::new();
        set.extend(iter);
        set
    }
}

impl Extend<Interval> for IntervalSet {
    fn extend<T: IntoIterator<Item = Interval>>(&mut self, iter: T) {
        for interval in iter {
            self.insert(interval);
        }
    }
}

impl IntoIterator for IntervalSet {
    type Item = Interval;
    type IntoIter = std::vec::IntoIter<Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.into_iter()
    }
}

impl<'a> IntoIterator for &'a IntervalSet {
    type Item = &'a Interval;
    type IntoIter = std::slice::Iter<'a, Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.iter()
    }
}
