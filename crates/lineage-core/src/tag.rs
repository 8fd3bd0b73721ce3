//! Reads a document's version tag without decoding the rest of it.

use crate::codec::DocumentCodec;
use crate::error::Result;
use crate::version_spec::VersionPathSpec;
use serde_json::Value;

/// Extracts the tag from a parsed document.
///
/// Only the path named by `S` is inspected; other fields may be missing or
/// of any shape.
pub fn extract_tag<S: VersionPathSpec>(document: &Value) -> Result<Option<i64>> {
    let tag = S::locate(document)?;
    tracing::debug!("Document version tag at '{}': {:?}", S::PATH.join("."), tag);
    Ok(tag)
}

/// Parses `raw` with `codec` and extracts the tag.
///
/// Parse failures are returned unchanged as
/// [`VersionedError::MalformedDocument`](crate::VersionedError::MalformedDocument).
pub fn peek_version<S, C>(codec: &C, raw: &[u8]) -> Result<Option<i64>>
where
    S: VersionPathSpec,
    C: DocumentCodec,
{
    let document = codec.parse(raw)?;
    extract_tag::<S>(&document)
}
