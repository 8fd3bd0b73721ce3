//! The encode pipeline: encode the value, then inject its current version tag.

use crate::codec::DocumentCodec;
use crate::error::{Result, VersionedError};
use crate::version_spec::VersionPathSpec;
use crate::versioned::Versioned;
use serde_json::Value;

/// Encodes `value` and writes `T::VERSION` at `T`'s tag path.
///
/// Always writes the current version of `T` itself. To produce an older
/// version, build and encode an instance of the older type.
///
/// # Errors
///
/// - [`VersionedError::ClashingVersionField`] if `value` already encodes
///   something at the tag path; nothing is written.
/// - [`VersionedError::Serialization`] if the codec cannot encode the value
///   or the value does not encode as a map.
pub fn encode_versioned<T, C>(codec: &C, value: &T) -> Result<Vec<u8>>
where
    T: Versioned,
    C: DocumentCodec,
{
    let document = encode_document(value, codec.format())?;
    codec.render(&document)
}

/// Encodes `value` into a generic document carrying its version tag.
pub fn encode_document<T: Versioned>(value: &T, format: &'static str) -> Result<Value> {
    let type_name = std::any::type_name::<T>();
    let mut document = serde_json::to_value(value)
        .map_err(|e| VersionedError::serialization(format, format!("{type_name}: {e}")))?;

    if !document.is_object() {
        return Err(VersionedError::serialization(
            format,
            format!("{type_name} must encode as a map to carry a version tag"),
        ));
    }

    if <T::VersionSpec as VersionPathSpec>::is_occupied(&document) {
        let path = <T::VersionSpec as VersionPathSpec>::path();
        tracing::warn!(
            "Refusing to encode {}: its own fields occupy the version tag at '{}'",
            type_name,
            path.join(".")
        );
        return Err(VersionedError::ClashingVersionField { type_name, path });
    }

    merge_fragment(
        &mut document,
        <T::VersionSpec as VersionPathSpec>::construct(T::VERSION),
    );
    tracing::debug!("Encoded {} at version {:?}", type_name, T::VERSION);
    Ok(document)
}

/// Deep-merges `fragment` into `target`; non-object values in the fragment
/// overwrite whatever `target` holds at the same place.
fn merge_fragment(target: &mut Value, fragment: Value) {
    match (target, fragment) {
        (Value::Object(target), Value::Object(fragment)) => {
            for (key, value) in fragment {
                match target.get_mut(&key) {
                    Some(existing) => merge_fragment(existing, value),
                    None => {
                        target.insert(key, value);
                    }
                }
            }
        }
        (target, fragment) => *target = fragment,
    }
}
