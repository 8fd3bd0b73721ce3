//! Where a version tag lives inside a document.
//!
//! A [`VersionPathSpec`] names the key path from the document root to the
//! tag. The provided `locate`, `construct` and `is_occupied` operations walk
//! that path over the generic document tree; implementations that store the
//! tag in some other shape may override them, but must keep `locate` and
//! `construct` symmetric: whatever `construct` writes, `locate` reads back.

use crate::error::{Result, VersionedError};
use serde_json::{Map, Value};

/// Describes how to find and write the version tag of a document.
///
/// # Example
///
/// ```
/// use lineage_core::VersionPathSpec;
/// use serde_json::json;
///
/// struct MetadataVersion;
///
/// impl VersionPathSpec for MetadataVersion {
///     const PATH: &'static [&'static str] = &["metadata", "version"];
/// }
///
/// let fragment = MetadataVersion::construct(Some(2));
/// assert_eq!(fragment, json!({ "metadata": { "version": 2 } }));
/// assert_eq!(MetadataVersion::locate(&fragment).unwrap(), Some(2));
/// ```
pub trait VersionPathSpec {
    /// Key path from the document root to the tag.
    const PATH: &'static [&'static str];

    /// Reads the tag at [`Self::PATH`].
    ///
    /// Absent and `null` tags both read as `None`. A tag holding anything
    /// other than an integer is a malformed document.
    fn locate(document: &Value) -> Result<Option<i64>> {
        locate_at(document, Self::PATH)
    }

    /// Builds the smallest document fragment holding `version` at [`Self::PATH`].
    ///
    /// A `None` version produces the enclosing objects without the leaf.
    fn construct(version: Option<i64>) -> Value {
        construct_at(Self::PATH, version)
    }

    /// Returns true if `document` already holds a value at [`Self::PATH`],
    /// or holds a non-object where the path needs to descend.
    fn is_occupied(document: &Value) -> bool {
        occupied_at(document, Self::PATH)
    }

    /// The path as owned segments, for diagnostics.
    fn path() -> Vec<String> {
        Self::PATH.iter().map(|segment| segment.to_string()).collect()
    }
}

/// The default specification: an integer field named `version` at the root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RootVersionKey;

impl VersionPathSpec for RootVersionKey {
    const PATH: &'static [&'static str] = &["version"];
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn location(path: &[&str]) -> String {
    if path.is_empty() {
        "document root".to_string()
    } else {
        format!("'{}'", path.join("."))
    }
}

/// Reads an optional integer tag at `path`.
pub fn locate_at(document: &Value, path: &[&str]) -> Result<Option<i64>> {
    let mut current = document;
    for (depth, key) in path.iter().enumerate() {
        match current {
            Value::Object(map) => match map.get(*key) {
                Some(next) => current = next,
                None => return Ok(None),
            },
            Value::Null if depth > 0 => return Ok(None),
            other => {
                return Err(VersionedError::malformed(
                    "version tag",
                    format!(
                        "expected an object at {}, found {}",
                        location(&path[..depth]),
                        describe(other)
                    ),
                ));
            }
        }
    }

    match current {
        Value::Null => Ok(None),
        Value::Number(number) => number.as_i64().map(Some).ok_or_else(|| {
            VersionedError::malformed(
                "version tag",
                format!(
                    "version at {} must be an integer, found {}",
                    location(path),
                    number
                ),
            )
        }),
        other => Err(VersionedError::malformed(
            "version tag",
            format!(
                "version at {} must be an integer, found {}",
                location(path),
                describe(other)
            ),
        )),
    }
}

/// Builds nested objects along `path` ending in `version`.
pub fn construct_at(path: &[&str], version: Option<i64>) -> Value {
    let Some((leaf, parents)) = path.split_last() else {
        return version.map(Value::from).unwrap_or(Value::Null);
    };

    let mut fragment = Map::new();
    if let Some(version) = version {
        fragment.insert(leaf.to_string(), Value::from(version));
    }

    parents.iter().rev().fold(Value::Object(fragment), |inner, key| {
        let mut outer = Map::new();
        outer.insert(key.to_string(), inner);
        Value::Object(outer)
    })
}

/// Checks whether writing a tag at `path` would overwrite existing data.
pub fn occupied_at(document: &Value, path: &[&str]) -> bool {
    let mut current = document;
    for key in path {
        match current {
            Value::Object(map) => match map.get(*key) {
                Some(next) => current = next,
                None => return false,
            },
            _ => return true,
        }
    }
    true
}
