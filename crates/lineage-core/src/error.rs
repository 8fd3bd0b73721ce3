//! Error types for versioned decoding and encoding.

use crate::chain::ChainLink;
use thiserror::Error;

/// The error type shared by every versioned decode and encode operation.
///
/// Variants are structured so callers can tell a corrupt or genuinely
/// unsupported document apart from a mistake in a chain declaration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionedError {
    /// The underlying codec could not parse the document, or the matched
    /// historical type could not be decoded from it.
    #[error("Malformed document: {format} - {message}")]
    MalformedDocument { format: String, message: String },

    /// The predecessor chain was exhausted without a version match.
    #[error(
        "Unsupported version {}: no type in the chain matches (oldest tried: {tried})",
        display_version(.found)
    )]
    UnsupportedVersion {
        found: Option<i64>,
        tried: ChainLink,
    },

    /// An upgrade step found that old data cannot be lifted into the newer shape.
    #[error("Field no longer valid at '{}': {reason}", .path.join("."))]
    FieldNoLongerValid { path: Vec<String>, reason: String },

    /// The value's own encoding already occupies the version tag location.
    #[error("Type {type_name} has a field clashing with its version tag at '{}'", .path.join("."))]
    ClashingVersionField {
        type_name: &'static str,
        path: Vec<String>,
    },

    /// A caller-defined upgrade failure.
    #[error("Upgrade from {from} to {to} failed: {message}")]
    Upgrade {
        from: &'static str,
        to: &'static str,
        message: String,
    },

    /// The codec failed to encode a value or a document.
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Following predecessors led back to a type already visited.
    #[error("Version chain revisits {type_name}; predecessor chains must be linear")]
    CyclicChain { type_name: &'static str },

    /// A resolution was asked to fold into a type other than its target.
    #[error("Resolution for {resolved} cannot fold into {requested}")]
    TargetMismatch {
        resolved: ChainLink,
        requested: ChainLink,
    },
}

fn display_version(version: &Option<i64>) -> String {
    match version {
        Some(v) => v.to_string(),
        None => "none".to_string(),
    }
}

impl VersionedError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a MalformedDocument error
    pub fn malformed(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedDocument {
            format: format.into(),
            message: message.into(),
        }
    }

    /// Creates a Serialization error
    pub fn serialization(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Serialization {
            format: format.into(),
            message: message.into(),
        }
    }

    /// Creates a FieldNoLongerValid error for the field at `path` in the old shape.
    ///
    /// ```
    /// use lineage_core::VersionedError;
    ///
    /// let err = VersionedError::field_no_longer_valid(["poem"], "Poem is no longer optional");
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Field no longer valid at 'poem': Poem is no longer optional"
    /// );
    /// ```
    pub fn field_no_longer_valid<I, S>(path: I, reason: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::FieldNoLongerValid {
            path: path.into_iter().map(Into::into).collect(),
            reason: reason.into(),
        }
    }

    /// Creates an Upgrade error between two chain types.
    pub fn upgrade<Older, Newer>(message: impl Into<String>) -> Self {
        Self::Upgrade {
            from: std::any::type_name::<Older>(),
            to: std::any::type_name::<Newer>(),
            message: message.into(),
        }
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a MalformedDocument error
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedDocument { .. })
    }

    /// Check if this is an UnsupportedVersion error
    pub fn is_unsupported_version(&self) -> bool {
        matches!(self, Self::UnsupportedVersion { .. })
    }

    /// Check if this is a FieldNoLongerValid error
    pub fn is_field_no_longer_valid(&self) -> bool {
        matches!(self, Self::FieldNoLongerValid { .. })
    }

    /// Check if this is a ClashingVersionField error
    pub fn is_clashing_version_field(&self) -> bool {
        matches!(self, Self::ClashingVersionField { .. })
    }

    /// Returns the chain link where resolution stopped, for UnsupportedVersion errors.
    pub fn tried(&self) -> Option<&ChainLink> {
        match self {
            Self::UnsupportedVersion { tried, .. } => Some(tried),
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

/// Lets infallible `From` upgrades flow through `TryFrom`-based declarations.
impl From<std::convert::Infallible> for VersionedError {
    fn from(never: std::convert::Infallible) -> Self {
        match never {}
    }
}

/// A type alias for `Result<T, VersionedError>`.
pub type Result<T> = std::result::Result<T, VersionedError>;
