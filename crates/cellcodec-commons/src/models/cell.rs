//! Raw cells as handed over by the store client.

/// One `(family, qualifier, timestamp, value)` unit within a stored row.
///
/// Cells are read-only once produced by the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cell {
    family: Vec<u8>,
    qualifier: Vec<u8>,
    timestamp: i64,
    value: Vec<u8>,
}

impl Cell {
    pub fn new(
        family: impl Into<Vec<u8>>,
        qualifier: impl Into<Vec<u8>>,
        timestamp: i64,
        value: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            family: family.into(),
            qualifier: qualifier.into(),
            timestamp,
            value: value.into(),
        }
    }

    pub fn family(&self) -> &[u8] {
        &self.family
    }

    pub fn qualifier(&self) -> &[u8] {
        &self.qualifier
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// Consumes the cell, returning `(family, qualifier, timestamp, value)`.
    pub fn into_parts(self) -> (Vec<u8>, Vec<u8>, i64, Vec<u8>) {
        (self.family, self.qualifier, self.timestamp, self.value)
    }
}
