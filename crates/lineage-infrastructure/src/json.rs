//! Shorthand for the common JSON case.

use crate::codec::JsonCodec;
use lineage_core::{Result, Versioned, VersionedCodec};

/// Decodes a JSON document as `T`, upgrading older versions.
pub fn from_slice<T: Versioned>(raw: &[u8]) -> Result<T> {
    JsonCodec::new().decode_versioned(raw)
}

pub fn from_str<T: Versioned>(raw: &str) -> Result<T> {
    from_slice(raw.as_bytes())
}

/// Encodes `value` as compact JSON with its current version tag.
pub fn to_vec<T: Versioned>(value: &T) -> Result<Vec<u8>> {
    JsonCodec::new().encode_versioned(value)
}

pub fn to_string<T: Versioned>(value: &T) -> Result<String> {
    render_string(JsonCodec::new(), value)
}

pub fn to_string_pretty<T: Versioned>(value: &T) -> Result<String> {
    render_string(JsonCodec::pretty(), value)
}

fn render_string<T: Versioned>(codec: JsonCodec, value: &T) -> Result<String> {
    let bytes = codec.encode_versioned(value)?;
    // serde_json only emits UTF-8
    String::from_utf8(bytes)
        .map_err(|e| lineage_core::VersionedError::serialization(JsonCodec::FORMAT, e.to_string()))
}
