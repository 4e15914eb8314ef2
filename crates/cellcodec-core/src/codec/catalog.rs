//! Named codec catalog.
//!
//! Configuration refers to codecs by name; the catalog maps those names to
//! shared instances. The built-in codecs are registered on construction and
//! callers can add their own.

use super::string_binary::TextCodec;
use super::transcoder::{SharedTranscoder, Transcoder};
use super::typed_bytes::TypedBytesCodec;
use cellcodec_commons::ConfigurationError;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of codecs keyed by name.
#[derive(Debug)]
pub struct CodecCatalog {
    codecs: RwLock<HashMap<String, SharedTranscoder>>,
}

impl Default for CodecCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl CodecCatalog {
    /// Create a new catalog with the built-in codecs
    pub fn new() -> Self {
        let catalog = Self {
            codecs: RwLock::new(HashMap::new()),
        };

        catalog.register_codec(Arc::new(TextCodec));
        catalog.register_codec(Arc::new(TypedBytesCodec::default()));
        catalog.register_codec(Arc::new(TypedBytesCodec::single()));

        catalog
    }

    /// Register a codec under `name`, replacing any previous entry.
    pub fn register(&self, name: impl Into<String>, codec: SharedTranscoder) {
        let name = name.into();
        log::debug!("Registering codec '{}' ({})", name, codec.name());
        self.codecs.write().insert(name, codec);
    }

    /// Register a codec under its own [`Transcoder::name`].
    pub fn register_codec(&self, codec: SharedTranscoder) {
        let name = codec.name().to_string();
        self.register(name, codec);
    }

    pub fn get(&self, name: &str) -> Option<SharedTranscoder> {
        self.codecs.read().get(name).cloned()
    }

    /// Like [`get`](Self::get), failing with `UnknownCodec` when absent.
    pub fn resolve(&self, name: &str) -> Result<SharedTranscoder, ConfigurationError> {
        self.get(name).ok_or_else(|| ConfigurationError::unknown_codec(name))
    }

    /// Registered names, sorted.
    pub fn list_codecs(&self) -> Vec<String> {
        let mut names: Vec<String> = self.codecs.read().keys().cloned().collect();
        names.sort();
        names
    }
}
