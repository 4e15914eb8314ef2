//! Half-open timestamp intervals scoping versioned field codecs.

use cellcodec_commons::ConfigurationError;
use std::cmp::Ordering;
use std::fmt;

/// Time range `[start, stop)`.
///
/// Intervals order by `start`, then `stop`. An empty interval (`start ==
/// stop`) is valid but contains no timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    start: i64,
    stop: i64,
}

impl Interval {
    pub fn new(start: i64, stop: i64) -> Result<Self, ConfigurationError> {
        if stop < start {
            return Err(ConfigurationError::InvalidInterval { start, stop });
        }
        Ok(Self { start, stop })
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn stop(&self) -> i64 {
        self.stop
    }

    pub fn contains(&self, timestamp: i64) -> bool {
        self.start <= timestamp && timestamp < self.stop
    }

    /// True when either interval's start lies inside the other.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.contains(other.start) || other.contains(self.start)
    }
}

impl Ord for Interval {
    fn cmp(&self, other: &Self) -> Ordering {
        self.start.cmp(&other.start).then(self.stop.cmp(&other.stop))
    }
}

impl PartialOrd for Interval {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.stop)
    }
}
