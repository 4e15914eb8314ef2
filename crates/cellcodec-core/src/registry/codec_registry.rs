//! Per-table codec registry.
//!
//! ## Value codec precedence
//!
//! ```text
//! 1. ExactField       (family, qualifier)
//! 2. ExactVersioned   (family, qualifier), interval containing the timestamp
//! 3. FamilyField      (family, *)
//! 4. FamilyVersioned  (family, *), interval containing the timestamp
//! 5. Default
//! ```
//!
//! The first tier with a match wins. Key, family and qualifier codecs fall
//! back to the default codec directly.

use super::interval::Interval;
use super::versioned::VersionedCodecTable;
use crate::codec::{SharedTranscoder, TextCodec};
use cellcodec_commons::{ConfigurationError, FieldKey};
use std::collections::HashMap;
use std::sync::Arc;

/// Registry tier that supplied a value codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueCodecTier {
    ExactField,
    ExactVersioned,
    FamilyField,
    FamilyVersioned,
    Default,
}

/// Resolution order of [`CodecRegistry::resolve_value_codec`].
pub const VALUE_CODEC_TIERS: [ValueCodecTier; 5] = [
    ValueCodecTier::ExactField,
    ValueCodecTier::ExactVersioned,
    ValueCodecTier::FamilyField,
    ValueCodecTier::FamilyVersioned,
    ValueCodecTier::Default,
];

/// Maps the fields of one table to codecs.
///
/// Configured through `&mut self`, read through `&self`. Every resolve call
/// returns a codec.
#[derive(Debug, Clone)]
pub struct CodecRegistry {
    default_codec: SharedTranscoder,
    key_codec: Option<SharedTranscoder>,
    family_codec: Option<SharedTranscoder>,
    qualifier_codecs: HashMap<Vec<u8>, SharedTranscoder>,
    field_codecs: HashMap<FieldKey, SharedTranscoder>,
    versioned_codecs: HashMap<FieldKey, VersionedCodecTable>,
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CodecRegistry {
    /// Registry whose default codec is [`TextCodec`].
    pub fn new() -> Self {
        Self::with_default_codec(Arc::new(TextCodec))
    }

    pub fn with_default_codec(default_codec: SharedTranscoder) -> Self {
        Self {
            default_codec,
            key_codec: None,
            family_codec: None,
            qualifier_codecs: HashMap::new(),
            field_codecs: HashMap::new(),
            versioned_codecs: HashMap::new(),
        }
    }

    pub fn set_default_codec(&mut self, codec: SharedTranscoder) {
        log::debug!("Default codec set to {}", codec.name());
        self.default_codec = codec;
    }

    pub fn set_key_codec(&mut self, codec: SharedTranscoder) {
        log::debug!("Key codec set to {}", codec.name());
        self.key_codec = Some(codec);
    }

    pub fn set_family_codec(&mut self, codec: SharedTranscoder) {
        log::debug!("Family codec set to {}", codec.name());
        self.family_codec = Some(codec);
    }

    /// Codec for the qualifiers of `family`.
    pub fn set_qualifier_codec(&mut self, family: &[u8], codec: SharedTranscoder) {
        log::debug!("Qualifier codec of family {} set to {}", FieldKey::family(family), codec.name());
        self.qualifier_codecs.insert(family.to_vec(), codec);
    }

    /// Un-versioned value codec for a column, or for every qualifier of the
    /// family when `qualifier` is `None`.
    pub fn set_field_codec(&mut self, family: &[u8], qualifier: Option<&[u8]>, codec: SharedTranscoder) {
        let field = FieldKey::new(family.to_vec(), qualifier.map(<[u8]>::to_vec));
        log::debug!("Field codec of {} set to {}", field, codec.name());
        self.field_codecs.insert(field, codec);
    }

    /// Value codec for cells of the field with timestamps in `[start, stop)`.
    ///
    /// Fails if `stop < start` or if the interval overlaps (or shares its
    /// start with) one already registered for the same field. The registry
    /// is unchanged on failure.
    pub fn set_versioned_field_codec(
        &mut self,
        family: &[u8],
        qualifier: Option<&[u8]>,
        start: i64,
        stop: i64,
        codec: SharedTranscoder,
    ) -> Result<(), ConfigurationError> {
        let interval = Interval::new(start, stop)?;
        let field = FieldKey::new(family.to_vec(), qualifier.map(<[u8]>::to_vec));

        let table = self.versioned_codecs.entry(field.clone()).or_default();
        if let Err(existing) = table.insert(interval, codec.clone()) {
            log::warn!("Rejected interval {} for {}: overlaps {}", interval, field, existing);
            return Err(ConfigurationError::OverlappingInterval {
                field: field.to_string(),
                start,
                stop,
                existing_start: existing.start(),
                existing_stop: existing.stop(),
            });
        }

        log::debug!("Versioned codec of {} for {} set to {}", field, interval, codec.name());
        Ok(())
    }

    pub fn resolve_key_codec(&self) -> &SharedTranscoder {
        self.key_codec.as_ref().unwrap_or(&self.default_codec)
    }

    pub fn resolve_family_codec(&self) -> &SharedTranscoder {
        self.family_codec.as_ref().unwrap_or(&self.default_codec)
    }

    pub fn resolve_qualifier_codec(&self, family: &[u8]) -> &SharedTranscoder {
        self.qualifier_codecs.get(family).unwrap_or(&self.default_codec)
    }

    /// Codec for the value of the cell `(family, qualifier, timestamp)`.
    pub fn resolve_value_codec(&self, family: &[u8], qualifier: &[u8], timestamp: i64) -> &SharedTranscoder {
        self.resolve_value_codec_tier(family, qualifier, timestamp).1
    }

    /// Like [`resolve_value_codec`](Self::resolve_value_codec), also
    /// reporting which tier matched.
    pub fn resolve_value_codec_tier(
        &self,
        family: &[u8],
        qualifier: &[u8],
        timestamp: i64,
    ) -> (ValueCodecTier, &SharedTranscoder) {
        let exact = FieldKey::column(family, qualifier);
        let wildcard = FieldKey::family(family);

        for tier in VALUE_CODEC_TIERS {
            let codec = match tier {
                ValueCodecTier::ExactField => self.field_codecs.get(&exact),
                ValueCodecTier::ExactVersioned => self.versioned_lookup(&exact, timestamp),
                ValueCodecTier::FamilyField => self.field_codecs.get(&wildcard),
                ValueCodecTier::FamilyVersioned => self.versioned_lookup(&wildcard, timestamp),
                ValueCodecTier::Default => Some(&self.default_codec),
            };
            if let Some(codec) = codec {
                return (tier, codec);
            }
        }

        (ValueCodecTier::Default, &self.default_codec)
    }

    /// Intervals registered for a field, in start order.
    pub fn versioned_intervals(&self, family: &[u8], qualifier: Option<&[u8]>) -> Vec<Interval> {
        let field = FieldKey::new(family.to_vec(), qualifier.map(<[u8]>::to_vec));
        self.versioned_codecs
            .get(&field)
            .map(VersionedCodecTable::intervals)
            .unwrap_or_default()
    }

    fn versioned_lookup(&self, field: &FieldKey, timestamp: i64) -> Option<&SharedTranscoder> {
        self.versioned_codecs.get(field)?.lookup(timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::TypedBytesCodec;

    fn iv(start: i64, stop: i64) -> Interval {
        Interval::new(start, stop).unwrap()
    }

    #[test]
    fn test_defaults() {
        let registry = CodecRegistry::new();
        assert_eq!(registry.resolve_key_codec().name(), "text");
        assert_eq!(registry.resolve_family_codec().name(), "text");
        assert_eq!(registry.resolve_qualifier_codec(b"d").name(), "text");
        assert_eq!(
            registry.resolve_value_codec_tier(b"d", b"q", 0).0,
            ValueCodecTier::Default
        );
    }

    #[test]
    fn test_overrides_are_last_write_wins() {
        let mut registry = CodecRegistry::new();
        registry.set_key_codec(Arc::new(TypedBytesCodec::default()));
        registry.set_key_codec(Arc::new(TypedBytesCodec::single()));
        registry.set_qualifier_codec(b"d", Arc::new(TypedBytesCodec::default()));
        registry.set_default_codec(Arc::new(TypedBytesCodec::default()));

        assert_eq!(registry.resolve_key_codec().name(), "typed_bytes_single");
        assert_eq!(registry.resolve_qualifier_codec(b"d").name(), "typed_bytes");
        assert_eq!(registry.resolve_family_codec().name(), "typed_bytes");
    }

    #[test]
    fn test_tier_walk() {
        let mut registry = CodecRegistry::new();
        registry.set_field_codec(b"d", None, Arc::new(TypedBytesCodec::default()));
        registry
            .set_versioned_field_codec(b"d", Some(&b"q"[..]), 0, 10, Arc::new(TypedBytesCodec::single()))
            .unwrap();

        assert_eq!(registry.resolve_value_codec_tier(b"d", b"q", 5).0, ValueCodecTier::ExactVersioned);
        assert_eq!(registry.resolve_value_codec_tier(b"d", b"q", 10).0, ValueCodecTier::FamilyField);
        assert_eq!(registry.resolve_value_codec_tier(b"e", b"q", 5).0, ValueCodecTier::Default);

        registry.set_field_codec(b"d", Some(&b"q"[..]), Arc::new(TextCodec));
        assert_eq!(registry.resolve_value_codec_tier(b"d", b"q", 5).0, ValueCodecTier::ExactField);
    }

    #[test]
    fn test_rejected_interval_leaves_registry_unchanged() {
        let mut registry = CodecRegistry::new();
        registry
            .set_versioned_field_codec(b"d", Some(&b"q"[..]), 100, 200, Arc::new(TextCodec))
            .unwrap();

        let err = registry
            .set_versioned_field_codec(b"d", Some(&b"q"[..]), 150, 250, Arc::new(TextCodec))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::OverlappingInterval {
                field: "d:q".to_string(),
                start: 150,
                stop: 250,
                existing_start: 100,
                existing_stop: 200,
            }
        );
        assert_eq!(registry.versioned_intervals(b"d", Some(&b"q"[..])), vec![iv(100, 200)]);

        assert_eq!(
            registry
                .set_versioned_field_codec(b"d", None, 5, 1, Arc::new(TextCodec))
                .unwrap_err(),
            ConfigurationError::InvalidInterval { start: 5, stop: 1 }
        );
        assert!(registry.versioned_intervals(b"d", None).is_empty());
    }

    #[test]
    fn test_wildcard_and_exact_tables_are_separate() {
        let mut registry = CodecRegistry::new();
        registry
            .set_versioned_field_codec(b"d", None, 0, 100, Arc::new(TextCodec))
            .unwrap();
        registry
            .set_versioned_field_codec(b"d", Some(&b"q"[..]), 0, 100, Arc::new(TextCodec))
            .unwrap();
        registry
            .set_versioned_field_codec(b"d", Some(&b""[..]), 0, 100, Arc::new(TextCodec))
            .unwrap();
        assert_eq!(registry.versioned_intervals(b"d", None), vec![iv(0, 100)]);
    }
}
