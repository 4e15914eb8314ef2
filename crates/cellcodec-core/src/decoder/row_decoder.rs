//! Cell and row decoding through a codec registry.

use super::decoded_row::{DecodedCell, DecodedRow};
use super::inclusion::InclusionPolicy;
use crate::error::Result;
use crate::registry::CodecRegistry;
use cellcodec_commons::{Cell, Value};

/// Decodes cells of one table according to its registry and policy.
///
/// ```rust
/// use cellcodec_commons::{Cell, Value};
/// use cellcodec_core::{CodecRegistry, DecodedCell, InclusionPolicy, RowDecoder};
///
/// let registry = CodecRegistry::new();
/// let mut policy = InclusionPolicy::default();
/// policy.set_include_family(false);
/// policy.set_include_qualifier(false);
/// policy.set_include_timestamp(false);
///
/// let decoder = RowDecoder::new(&registry, policy);
/// let cell = Cell::new(b"d".to_vec(), b"q".to_vec(), 1, b"hi".to_vec());
/// assert_eq!(decoder.decode_cell(&cell).unwrap(), DecodedCell::Scalar(Value::from("hi")));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RowDecoder<'a> {
    registry: &'a CodecRegistry,
    policy: InclusionPolicy,
}

impl<'a> RowDecoder<'a> {
    pub fn new(registry: &'a CodecRegistry, policy: InclusionPolicy) -> Self {
        Self { registry, policy }
    }

    pub fn policy(&self) -> &InclusionPolicy {
        &self.policy
    }

    /// Decodes the included parts of `cell`. The timestamp is passed through
    /// as `Value::Long` without a codec.
    pub fn decode_cell(&self, cell: &Cell) -> Result<DecodedCell> {
        let mut parts = Vec::with_capacity(self.policy.include_size());

        if self.policy.include_family() {
            parts.push(self.registry.resolve_family_codec().decode(cell.family())?);
        }
        if self.policy.include_qualifier() {
            let codec = self.registry.resolve_qualifier_codec(cell.family());
            parts.push(codec.decode(cell.qualifier())?);
        }
        if self.policy.include_timestamp() {
            parts.push(Value::Long(cell.timestamp()));
        }
        if self.policy.include_value() {
            let codec = self
                .registry
                .resolve_value_codec(cell.family(), cell.qualifier(), cell.timestamp());
            parts.push(codec.decode(cell.value())?);
        }

        match <[Value; 1]>::try_from(parts) {
            Ok([single]) => Ok(DecodedCell::Scalar(single)),
            Err(parts) => Ok(DecodedCell::Tuple(parts)),
        }
    }

    /// Decodes a whole row. Fails on the first codec error; no partial row is
    /// returned.
    pub fn decode_row(&self, key: &[u8], cells: &[Cell]) -> Result<DecodedRow> {
        let key = if self.policy.include_key() {
            Some(self.registry.resolve_key_codec().decode(key)?)
        } else {
            None
        };

        let cells = cells
            .iter()
            .map(|cell| self.decode_cell(cell))
            .collect::<Result<Vec<_>>>()?;

        log::trace!("Decoded row with {} cells", cells.len());
        Ok(DecodedRow::new(key, cells))
    }
}
