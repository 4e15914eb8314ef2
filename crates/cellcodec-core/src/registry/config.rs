//! Building a registry from table configuration.

use super::codec_registry::CodecRegistry;
use crate::codec::CodecCatalog;
use cellcodec_commons::{to_bytes_binary, ConfigurationError, TableConfig};

impl CodecRegistry {
    /// Builds the registry described by `table`, looking codecs up by name in
    /// `catalog`. Families and qualifiers are binary-escaped text.
    pub fn from_config(table: &TableConfig, catalog: &CodecCatalog) -> Result<Self, ConfigurationError> {
        let mut registry = CodecRegistry::with_default_codec(catalog.resolve(&table.default_codec)?);

        if let Some(name) = &table.key_codec {
            registry.set_key_codec(catalog.resolve(name)?);
        }
        if let Some(name) = &table.family_codec {
            registry.set_family_codec(catalog.resolve(name)?);
        }

        for (family, name) in &table.qualifier_codecs {
            registry.set_qualifier_codec(&to_bytes_binary(family), catalog.resolve(name)?);
        }

        for field in &table.fields {
            let family = to_bytes_binary(&field.family);
            let qualifier = field.qualifier.as_deref().map(to_bytes_binary);
            let codec = catalog.resolve(&field.codec)?;

            match (field.start, field.stop) {
                (Some(start), Some(stop)) => {
                    registry.set_versioned_field_codec(&family, qualifier.as_deref(), start, stop, codec)?
                },
                (None, None) => registry.set_field_codec(&family, qualifier.as_deref(), codec),
                _ => {
                    return Err(ConfigurationError::invalid(format!(
                        "field {}:{} of table '{}' must set both start and stop, or neither",
                        field.family,
                        field.qualifier.as_deref().unwrap_or("*"),
                        table.name
                    )))
                },
            }
        }

        log::debug!(
            "Built codec registry for table '{}' ({} field entries)",
            table.name,
            table.fields.len()
        );
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ValueCodecTier;
    use cellcodec_commons::FieldCodecConfig;

    fn field(family: &str, qualifier: Option<&str>, codec: &str, window: Option<(i64, i64)>) -> FieldCodecConfig {
        FieldCodecConfig {
            family: family.to_string(),
            qualifier: qualifier.map(str::to_string),
            codec: codec.to_string(),
            start: window.map(|w| w.0),
            stop: window.map(|w| w.1),
        }
    }

    #[test]
    fn test_from_config() {
        let mut table = TableConfig::new("metrics");
        table.key_codec = Some("typed_bytes_single".to_string());
        table.qualifier_codecs.insert("d".to_string(), "typed_bytes".to_string());
        table.fields.push(field("d", Some("temp"), "typed_bytes_single", Some((100, 200))));
        table.fields.push(field("d", None, "typed_bytes", None));
        table.fields.push(field("bin\\x00", Some("q\\xFF"), "typed_bytes", None));

        let registry = CodecRegistry::from_config(&table, &CodecCatalog::new()).unwrap();
        assert_eq!(registry.resolve_key_codec().name(), "typed_bytes_single");
        assert_eq!(registry.resolve_family_codec().name(), "text");
        assert_eq!(registry.resolve_qualifier_codec(b"d").name(), "typed_bytes");

        let (tier, codec) = registry.resolve_value_codec_tier(b"d", b"temp", 150);
        assert_eq!((tier, codec.name()), (ValueCodecTier::ExactVersioned, "typed_bytes_single"));
        let (tier, _) = registry.resolve_value_codec_tier(b"d", b"temp", 250);
        assert_eq!(tier, ValueCodecTier::FamilyField);
        let (tier, _) = registry.resolve_value_codec_tier(b"bin\x00", b"q\xff", 0);
        assert_eq!(tier, ValueCodecTier::ExactField);
    }

    #[test]
    fn test_unknown_codec() {
        let mut table = TableConfig::new("t");
        table.fields.push(field("d", None, "avro", None));
        assert_eq!(
            CodecRegistry::from_config(&table, &CodecCatalog::new()).unwrap_err(),
            ConfigurationError::UnknownCodec("avro".to_string())
        );

        let mut table = TableConfig::new("t");
        table.default_codec = "missing".to_string();
        assert!(CodecRegistry::from_config(&table, &CodecCatalog::new()).is_err());
    }

    #[test]
    fn test_overlapping_fields() {
        let mut table = TableConfig::new("t");
        table.fields.push(field("d", Some("q"), "text", Some((0, 100))));
        table.fields.push(field("d", Some("q"), "text", Some((50, 150))));
        assert!(matches!(
            CodecRegistry::from_config(&table, &CodecCatalog::new()),
            Err(ConfigurationError::OverlappingInterval { .. })
        ));
    }

    #[test]
    fn test_half_open_window_is_invalid() {
        let mut table = TableConfig::new("t");
        let mut f = field("d", None, "text", None);
        f.start = Some(3);
        table.fields.push(f);
        assert!(matches!(
            CodecRegistry::from_config(&table, &CodecCatalog::new()),
            Err(ConfigurationError::Invalid(_))
        ));
    }
}
