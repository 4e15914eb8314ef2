//! Decoded row shapes.

use cellcodec_commons::Value;

/// One decoded cell: a bare value when the policy includes a single part,
/// otherwise the included parts in the order family, qualifier, timestamp,
/// value.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedCell {
    Scalar(Value),
    Tuple(Vec<Value>),
}

impl DecodedCell {
    /// Flattens the cell; a tuple becomes a `Value::Vector`.
    pub fn into_value(self) -> Value {
        match self {
            DecodedCell::Scalar(value) => value,
            DecodedCell::Tuple(parts) => Value::Vector(parts),
        }
    }
}

/// A decoded row: the optional decoded key followed by one entry per cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DecodedRow {
    key: Option<Value>,
    cells: Vec<DecodedCell>,
}

impl DecodedRow {
    pub fn new(key: Option<Value>, cells: Vec<DecodedCell>) -> Self {
        Self { key, cells }
    }

    pub fn key(&self) -> Option<&Value> {
        self.key.as_ref()
    }

    pub fn cells(&self) -> &[DecodedCell] {
        &self.cells
    }

    /// Number of emitted elements, counting the key when present.
    pub fn len(&self) -> usize {
        usize::from(self.key.is_some()) + self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Key first (when included), then every cell flattened.
    pub fn to_values(&self) -> Vec<Value> {
        self.clone().into_values()
    }

    pub fn into_values(self) -> Vec<Value> {
        self.key
            .into_iter()
            .chain(self.cells.into_iter().map(DecodedCell::into_value))
            .collect()
    }
}
