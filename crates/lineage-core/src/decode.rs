//! The decode pipeline: extract tag, resolve, decode once, fold forward.

use crate::codec::DocumentCodec;
use crate::error::Result;
use crate::resolver::Resolution;
use crate::tag;
use crate::versioned::Versioned;
use serde_json::Value;

/// Decodes `raw` as `T`, whichever version of `T`'s chain it was written by.
///
/// The tag is read with `T`'s own version-path specification.
///
/// # Errors
///
/// - [`VersionedError::MalformedDocument`](crate::VersionedError::MalformedDocument)
///   if the codec cannot parse `raw` or the matched type cannot be decoded.
/// - [`VersionedError::UnsupportedVersion`](crate::VersionedError::UnsupportedVersion)
///   if no type in the chain declares the tag.
/// - Whatever the first failing `upgrade` returns.
pub fn decode_versioned<T, C>(codec: &C, raw: &[u8]) -> Result<T>
where
    T: Versioned,
    C: DocumentCodec,
{
    let document = codec.parse(raw)?;
    decode_document(document, codec.format())
}

/// Decodes an already parsed document as `T`.
pub fn decode_document<T: Versioned>(document: Value, format: &'static str) -> Result<T> {
    let found = tag::extract_tag::<T::VersionSpec>(&document)?;
    let resolution = Resolution::resolve::<T>(found)?;
    resolution.fold(document, format)
}
