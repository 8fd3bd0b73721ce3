//! Concrete formats and storage for `lineage-core`.
//!
//! This crate provides:
//! - JSON, TOML, YAML and property-list codecs over the shared document tree
//! - [`CodecConfig`] for choosing a codec from settings or a file extension
//! - [`VersionedFile`], an atomic file store that upgrades on load
//! - [`json`] shorthands for decoding and encoding versioned JSON

pub mod codec;
pub mod config;
pub mod error;
pub mod json;
pub mod storage;

pub use codec::{AnyCodec, JsonCodec, PlistCodec, TomlCodec, YamlCodec};
pub use config::{CodecConfig, DocumentFormat};
pub use error::{InfraError, Result};
pub use storage::VersionedFile;
