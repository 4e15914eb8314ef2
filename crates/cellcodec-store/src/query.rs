//! Read and write requests understood by every [`CellStore`](crate::CellStore).

use cellcodec_commons::Cell;

/// Timestamp range `[min, max)` used to filter cell versions. The range from
/// [`TimeRange::all`] has no upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    min: i64,
    max: Option<i64>,
}

impl TimeRange {
    /// Returns `None` when `max < min`.
    pub fn new(min: i64, max: i64) -> Option<Self> {
        (min <= max).then_some(Self { min, max: Some(max) })
    }

    /// Every timestamp.
    pub fn all() -> Self {
        Self {
            min: i64::MIN,
            max: None,
        }
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    /// Exclusive upper bound; `None` when unbounded.
    pub fn max(&self) -> Option<i64> {
        self.max
    }

    pub fn contains(&self, ts: i64) -> bool {
        ts >= self.min && self.max.map_or(true, |max| ts < max)
    }
}

impl Default for TimeRange {
    fn default() -> Self {
        Self::all()
    }
}

/// Single-row read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Get {
    pub row: Vec<u8>,
    /// Restrict to these families; empty = all families
    pub families: Vec<Vec<u8>>,
    pub time_range: TimeRange,
    /// Versions returned per column, newest first
    pub max_versions: usize,
}

impl Get {
    pub fn new(row: impl Into<Vec<u8>>) -> Self {
        Self {
            row: row.into(),
            families: Vec::new(),
            time_range: TimeRange::all(),
            max_versions: 1,
        }
    }

    pub fn with_family(mut self, family: impl Into<Vec<u8>>) -> Self {
        self.families.push(family.into());
        self
    }

    pub fn with_time_range(mut self, time_range: TimeRange) -> Self {
        self.time_range = time_range;
        self
    }

    pub fn with_max_versions(mut self, max_versions: usize) -> Self {
        self.max_versions = max_versions;
        self
    }

    pub(crate) fn filter(&self) -> CellFilter<'_> {
        CellFilter {
            families: &self.families,
            time_range: self.time_range,
            max_versions: self.max_versions,
            first_key_only: false,
        }
    }
}

/// Range read over rows `[start_row, stop_row)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scan {
    /// Inclusive; `None` = from the first row
    pub start_row: Option<Vec<u8>>,
    /// Exclusive; `None` = to the last row
    pub stop_row: Option<Vec<u8>>,
    pub families: Vec<Vec<u8>>,
    pub time_range: TimeRange,
    pub max_versions: usize,
    /// Rows fetched per round trip; a hint for remote stores
    pub caching: Option<usize>,
    /// When false, blocks read by this scan are not added to the block cache
    pub cache_blocks: bool,
    /// Return only the first cell of every row
    pub first_key_only: bool,
}

impl Default for Scan {
    fn default() -> Self {
        Self {
            start_row: None,
            stop_row: None,
            families: Vec::new(),
            time_range: TimeRange::all(),
            max_versions: 1,
            caching: None,
            cache_blocks: true,
            first_key_only: false,
        }
    }
}

impl Scan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_start_row(mut self, row: impl Into<Vec<u8>>) -> Self {
        self.start_row = Some(row.into());
        self
    }

    pub fn with_stop_row(mut self, row: impl Into<Vec<u8>>) -> Self {
        self.stop_row = Some(row.into());
        self
    }

    pub fn with_family(mut self, family: impl Into<Vec<u8>>) -> Self {
        self.families.push(family.into());
        self
    }

    pub fn with_time_range(mut self, time_range: TimeRange) -> Self {
        self.time_range = time_range;
        self
    }

    pub fn with_max_versions(mut self, max_versions: usize) -> Self {
        self.max_versions = max_versions;
        self
    }

    pub fn with_caching(mut self, rows: usize) -> Self {
        self.caching = Some(rows);
        self
    }

    pub fn with_cache_blocks(mut self, cache_blocks: bool) -> Self {
        self.cache_blocks = cache_blocks;
        self
    }

    pub fn with_first_key_only(mut self, first_key_only: bool) -> Self {
        self.first_key_only = first_key_only;
        self
    }

    /// Whether `row` falls inside `[start_row, stop_row)`.
    pub fn covers_row(&self, row: &[u8]) -> bool {
        let after_start = self.start_row.as_deref().map_or(true, |start| row >= start);
        let before_stop = self.stop_row.as_deref().map_or(true, |stop| row < stop);
        after_start && before_stop
    }

    pub(crate) fn filter(&self) -> CellFilter<'_> {
        CellFilter {
            families: &self.families,
            time_range: self.time_range,
            max_versions: self.max_versions,
            first_key_only: self.first_key_only,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PutCell {
    family: Vec<u8>,
    qualifier: Vec<u8>,
    timestamp: Option<i64>,
    value: Vec<u8>,
}

/// Write of one or more cells into a single row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Put {
    row: Vec<u8>,
    cells: Vec<PutCell>,
}

impl Put {
    pub fn new(row: impl Into<Vec<u8>>) -> Self {
        Self {
            row: row.into(),
            cells: Vec::new(),
        }
    }

    /// Adds a cell stamped with the write time.
    pub fn add_column(mut self, family: &[u8], qualifier: &[u8], value: impl Into<Vec<u8>>) -> Self {
        self.cells.push(PutCell {
            family: family.to_vec(),
            qualifier: qualifier.to_vec(),
            timestamp: None,
            value: value.into(),
        });
        self
    }

    /// Adds a cell with an explicit timestamp.
    pub fn add_column_at(
        mut self,
        family: &[u8],
        qualifier: &[u8],
        timestamp: i64,
        value: impl Into<Vec<u8>>,
    ) -> Self {
        self.cells.push(PutCell {
            family: family.to_vec(),
            qualifier: qualifier.to_vec(),
            timestamp: Some(timestamp),
            value: value.into(),
        });
        self
    }

    pub fn row(&self) -> &[u8] {
        &self.row
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Materializes the cells, stamping unset timestamps with `now`.
    pub fn cells_at(&self, now: i64) -> Vec<Cell> {
        self.cells
            .iter()
            .map(|c| {
                Cell::new(
                    c.family.clone(),
                    c.qualifier.clone(),
                    c.timestamp.unwrap_or(now),
                    c.value.clone(),
                )
            })
            .collect()
    }
}

/// Current wall-clock time in milliseconds, used for unstamped puts.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Selection rules shared by `Get` and `Scan`.
pub(crate) struct CellFilter<'a> {
    families: &'a [Vec<u8>],
    time_range: TimeRange,
    max_versions: usize,
    first_key_only: bool,
}

impl CellFilter<'_> {
    pub(crate) fn wants_family(&self, family: &[u8]) -> bool {
        self.families.is_empty() || self.families.iter().any(|f| f.as_slice() == family)
    }

    /// Family and time-range checks of a single cell, before version limits.
    pub(crate) fn accepts(&self, family: &[u8], timestamp: i64) -> bool {
        self.wants_family(family) && self.time_range.contains(timestamp)
    }

    pub(crate) fn first_key_only(&self) -> bool {
        self.first_key_only
    }

    /// Applies family, time-range and version limits to cells already in
    /// store order (family, qualifier, timestamp descending).
    pub(crate) fn apply<I>(&self, cells: I) -> Vec<Cell>
    where
        I: IntoIterator<Item = Cell>,
    {
        let mut out: Vec<Cell> = Vec::new();
        let mut versions = 0usize;

        for cell in cells {
            if !self.accepts(cell.family(), cell.timestamp()) {
                continue;
            }

            let same_column = out
                .last()
                .map(|prev| prev.family() == cell.family() && prev.qualifier() == cell.qualifier())
                .unwrap_or(false);
            versions = if same_column { versions + 1 } else { 1 };
            if versions > self.max_versions {
                continue;
            }

            out.push(cell);
            if self.first_key_only {
                break;
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells() -> Vec<Cell> {
        vec![
            Cell::new(b"a".to_vec(), b"q1".to_vec(), 30, b"v3".to_vec()),
            Cell::new(b"a".to_vec(), b"q1".to_vec(), 20, b"v2".to_vec()),
            Cell::new(b"a".to_vec(), b"q1".to_vec(), 10, b"v1".to_vec()),
            Cell::new(b"a".to_vec(), b"q2".to_vec(), 15, b"w".to_vec()),
            Cell::new(b"b".to_vec(), b"q1".to_vec(), 5, b"x".to_vec()),
        ]
    }

    #[test]
    fn test_time_range() {
        let range = TimeRange::new(10, 20).unwrap();
        assert!(range.contains(10));
        assert!(!range.contains(20));
        assert!(TimeRange::new(20, 10).is_none());
        assert!(TimeRange::all().contains(i64::MAX));
        assert!(TimeRange::all().contains(i64::MIN));
        assert_eq!(TimeRange::all().max(), None);
    }

    #[test]
    fn test_explicit_max_stays_exclusive() {
        let range = TimeRange::new(0, i64::MAX).unwrap();
        assert_eq!(range.max(), Some(i64::MAX));
        assert!(range.contains(i64::MAX - 1));
        assert!(!range.contains(i64::MAX));
    }

    #[test]
    fn test_default_keeps_latest_version() {
        let get = Get::new(b"r".to_vec());
        let out = get.filter().apply(cells());
        let values: Vec<&[u8]> = out.iter().map(|c| c.value()).collect();
        assert_eq!(values, vec![&b"v3"[..], b"w", b"x"]);
    }

    #[test]
    fn test_max_versions_and_time_range() {
        let get = Get::new(b"r".to_vec())
            .with_max_versions(2)
            .with_time_range(TimeRange::new(0, 30).unwrap());
        let out = get.filter().apply(cells());
        let values: Vec<&[u8]> = out.iter().map(|c| c.value()).collect();
        assert_eq!(values, vec![&b"v2"[..], b"v1", b"w", b"x"]);
    }

    #[test]
    fn test_family_filter() {
        let scan = Scan::new().with_family(b"b".to_vec());
        let out = scan.filter().apply(cells());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].family(), b"b");
    }

    #[test]
    fn test_first_key_only() {
        let scan = Scan::new().with_first_key_only(true);
        let out = scan.filter().apply(cells());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].value(), b"v3");
    }

    #[test]
    fn test_scan_covers_row() {
        let scan = Scan::new().with_start_row(b"b".to_vec()).with_stop_row(b"d".to_vec());
        assert!(!scan.covers_row(b"a"));
        assert!(scan.covers_row(b"b"));
        assert!(scan.covers_row(b"c\xff"));
        assert!(!scan.covers_row(b"d"));
    }

    #[test]
    fn test_put_stamps_missing_timestamps() {
        let put = Put::new(b"r".to_vec())
            .add_column(b"d", b"a", b"1".to_vec())
            .add_column_at(b"d", b"b", 7, b"2".to_vec());
        let cells = put.cells_at(99);
        assert_eq!(cells[0].timestamp(), 99);
        assert_eq!(cells[1].timestamp(), 7);
    }
}
