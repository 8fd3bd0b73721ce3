//! TOML documents.
//!
//! TOML has no null. Object entries holding `null` are dropped before
//! rendering, so an `Option` field set to `None` is written as an absent key
//! and reads back as `None`.

use super::prune_nulls;
use lineage_core::{DocumentCodec, Result, VersionedError};
use serde_json::Value;

/// TOML codec backed by the `toml` crate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TomlCodec {
    /// Use multi-line arrays and nested table headers.
    pub pretty: bool,
}

impl TomlCodec {
    pub const FORMAT: &'static str = "TOML";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl DocumentCodec for TomlCodec {
    fn format(&self) -> &'static str {
        Self::FORMAT
    }

    fn parse(&self, raw: &[u8]) -> Result<Value> {
        let text = std::str::from_utf8(raw)
            .map_err(|e| VersionedError::malformed(Self::FORMAT, format!("invalid UTF-8: {e}")))?;
        toml::from_str(text).map_err(|e| VersionedError::malformed(Self::FORMAT, e.to_string()))
    }

    fn render(&self, document: &Value) -> Result<Vec<u8>> {
        if !document.is_object() {
            return Err(VersionedError::serialization(
                Self::FORMAT,
                "document root must be a table",
            ));
        }

        let mut document = document.clone();
        prune_nulls(&mut document);

        let rendered = if self.pretty {
            toml::to_string_pretty(&document)
        } else {
            toml::to_string(&document)
        };
        rendered
            .map(String::into_bytes)
            .map_err(|e| VersionedError::serialization(Self::FORMAT, e.to_string()))
    }
}
