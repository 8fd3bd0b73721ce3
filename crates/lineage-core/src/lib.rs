//! Transparent backward-compatible decoding of versioned documents.
//!
//! A type declares its current version and its immediate predecessor. When a
//! document is decoded, its version tag is matched against the chain of
//! predecessors, the document is decoded once as the matching historical
//! type, and each newer type's `upgrade` lifts the value until it reaches the
//! requested type. Encoding writes the value's current version into the
//! document.
//!
//! # Example
//!
//! ```
//! use lineage_core::{decode_document, encode_document, versioned, VersionedError};
//! use serde::{Deserialize, Serialize};
//! use serde_json::json;
//!
//! #[derive(Serialize, Deserialize)]
//! struct TaskV1 {
//!     title: String,
//!     done: Option<bool>,
//! }
//! versioned!(TaskV1, version = 1);
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct Task {
//!     title: String,
//!     done: bool,
//! }
//! versioned!(Task, version = 2, previous = TaskV1);
//!
//! impl TryFrom<TaskV1> for Task {
//!     type Error = VersionedError;
//!
//!     fn try_from(old: TaskV1) -> Result<Self, VersionedError> {
//!         Ok(Task { title: old.title, done: old.done.unwrap_or(false) })
//!     }
//! }
//!
//! let task: Task = decode_document(json!({ "version": 1, "title": "Write docs" }), "JSON")?;
//! assert_eq!(task, Task { title: "Write docs".into(), done: false });
//!
//! let document = encode_document(&task, "JSON")?;
//! assert_eq!(document["version"], 2);
//! # Ok::<(), VersionedError>(())
//! ```

pub mod chain;
pub mod codec;
pub mod decode;
pub mod encode;
pub mod error;
pub mod resolver;
pub mod tag;
pub mod version_spec;
pub mod versioned;

pub use chain::{Chain, ChainLink};
pub use codec::{DocumentCodec, VersionedCodec};
pub use decode::{decode_document, decode_versioned};
pub use encode::{encode_document, encode_versioned};
pub use error::{Result, VersionedError};
pub use resolver::Resolution;
pub use tag::{extract_tag, peek_version};
pub use version_spec::{RootVersionKey, VersionPathSpec};
pub use versioned::{NothingEarlier, Predecessor, Versioned};
