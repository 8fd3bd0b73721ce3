//! JSON documents.

use lineage_core::{DocumentCodec, Result, VersionedError};
use serde_json::Value;

/// JSON codec backed by `serde_json`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonCodec {
    /// Indent output.
    pub pretty: bool,
}

impl JsonCodec {
    pub const FORMAT: &'static str = "JSON";

    /// Compact output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Indented output.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl DocumentCodec for JsonCodec {
    fn format(&self) -> &'static str {
        Self::FORMAT
    }

    fn parse(&self, raw: &[u8]) -> Result<Value> {
        serde_json::from_slice(raw)
            .map_err(|e| VersionedError::malformed(Self::FORMAT, e.to_string()))
    }

    fn render(&self, document: &Value) -> Result<Vec<u8>> {
        let rendered = if self.pretty {
            serde_json::to_vec_pretty(document)
        } else {
            serde_json::to_vec(document)
        };
        rendered.map_err(|e| VersionedError::serialization(Self::FORMAT, e.to_string()))
    }
}
