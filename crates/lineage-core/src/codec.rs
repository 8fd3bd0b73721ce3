//! The document codec boundary.
//!
//! A codec turns raw bytes into the generic document tree and back. Every
//! format shares `serde_json::Value` as its in-memory tree, so tag lookup,
//! tag injection and typed decoding work the same for all of them.

use crate::decode;
use crate::encode;
use crate::error::{Result, VersionedError};
use crate::version_spec::VersionPathSpec;
use crate::versioned::Versioned;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A structured document format.
pub trait DocumentCodec {
    /// Short format name used in error messages ("JSON", "TOML", ...).
    fn format(&self) -> &'static str;

    /// Parses raw bytes into a generic document tree.
    fn parse(&self, raw: &[u8]) -> Result<Value>;

    /// Serializes a generic document tree.
    fn render(&self, document: &Value) -> Result<Vec<u8>>;

    /// Plain, unversioned decode of `raw` as `T`.
    fn decode_as<T: DeserializeOwned>(&self, raw: &[u8]) -> Result<T> {
        let document = self.parse(raw)?;
        serde_json::from_value(document).map_err(|e| {
            VersionedError::malformed(
                self.format(),
                format!("{}: {}", std::any::type_name::<T>(), e),
            )
        })
    }

    /// Plain, unversioned encode of `value`.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>> {
        let document = serde_json::to_value(value)
            .map_err(|e| VersionedError::serialization(self.format(), e.to_string()))?;
        self.render(&document)
    }
}

/// Versioned entry points on every [`DocumentCodec`].
pub trait VersionedCodec: DocumentCodec {
    /// Decodes `raw` as `T`, upgrading from whichever historical version it holds.
    fn decode_versioned<T: Versioned>(&self, raw: &[u8]) -> Result<T>;

    /// Encodes `value` with its type's current version tag.
    fn encode_versioned<T: Versioned>(&self, value: &T) -> Result<Vec<u8>>;

    /// Reads only the tag located by `S`.
    fn peek_version<S: VersionPathSpec>(&self, raw: &[u8]) -> Result<Option<i64>>;
}

impl<C: DocumentCodec> VersionedCodec for C {
    fn decode_versioned<T: Versioned>(&self, raw: &[u8]) -> Result<T> {
        decode::decode_versioned(self, raw)
    }

    fn encode_versioned<T: Versioned>(&self, value: &T) -> Result<Vec<u8>> {
        encode::encode_versioned(self, value)
    }

    fn peek_version<S: VersionPathSpec>(&self, raw: &[u8]) -> Result<Option<i64>> {
        crate::tag::peek_version::<S, C>(self, raw)
    }
}
