//! YAML documents.

use lineage_core::{DocumentCodec, Result, VersionedError};
use serde_json::Value;

/// YAML codec backed by `serde_yaml`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct YamlCodec;

impl YamlCodec {
    pub const FORMAT: &'static str = "YAML";
}

impl DocumentCodec for YamlCodec {
    fn format(&self) -> &'static str {
        Self::FORMAT
    }

    fn parse(&self, raw: &[u8]) -> Result<Value> {
        serde_yaml::from_slice(raw)
            .map_err(|e| VersionedError::malformed(Self::FORMAT, e.to_string()))
    }

    fn render(&self, document: &Value) -> Result<Vec<u8>> {
        serde_yaml::to_string(document)
            .map(String::into_bytes)
            .map_err(|e| VersionedError::serialization(Self::FORMAT, e.to_string()))
    }
}
