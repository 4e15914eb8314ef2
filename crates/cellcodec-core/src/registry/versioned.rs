//! Time-versioned codec table of a single field.

use super::interval::Interval;
use crate::codec::SharedTranscoder;

/// Non-overlapping `(Interval, codec)` entries kept sorted by start.
///
/// Lookups are a floor search (greatest start not after the timestamp)
/// followed by a containment check, so a timestamp that falls in a gap
/// between intervals finds nothing.
#[derive(Debug, Clone, Default)]
pub struct VersionedCodecTable {
    entries: Vec<(Interval, SharedTranscoder)>,
}

impl VersionedCodecTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry, or returns the registered interval it conflicts
    /// with. A conflict leaves the table unchanged.
    ///
    /// Two intervals conflict when they overlap or share a start.
    pub fn insert(&mut self, interval: Interval, codec: SharedTranscoder) -> Result<(), Interval> {
        let idx = self.entries.partition_point(|(existing, _)| existing.start() <= interval.start());

        if let Some((floor, _)) = idx.checked_sub(1).and_then(|i| self.entries.get(i)) {
            if floor.start() == interval.start() || floor.overlaps(&interval) {
                return Err(*floor);
            }
        }
        if let Some((successor, _)) = self.entries.get(idx) {
            if successor.overlaps(&interval) {
                return Err(*successor);
            }
        }

        self.entries.insert(idx, (interval, codec));
        Ok(())
    }

    /// Codec whose interval contains `timestamp`.
    pub fn lookup(&self, timestamp: i64) -> Option<&SharedTranscoder> {
        let idx = self.entries.partition_point(|(interval, _)| interval.start() <= timestamp);
        let (floor, codec) = self.entries.get(idx.checked_sub(1)?)?;
        floor.contains(timestamp).then_some(codec)
    }

    /// Registered intervals in start order.
    pub fn intervals(&self) -> Vec<Interval> {
        self.entries.iter().map(|(interval, _)| *interval).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
