//! Concrete document codecs.
//!
//! Each codec parses into and renders from `serde_json::Value`, so any of
//! them can be handed to the versioned pipeline in `lineage_core`.

mod json;
mod plist;
mod toml;
mod yaml;

pub use self::json::JsonCodec;
pub use self::plist::PlistCodec;
pub use self::toml::TomlCodec;
pub use self::yaml::YamlCodec;

use crate::config::DocumentFormat;
use lineage_core::{DocumentCodec, Result};
use serde_json::Value;

/// A codec chosen at runtime, usually from a [`CodecConfig`](crate::CodecConfig).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnyCodec {
    Json(JsonCodec),
    Toml(TomlCodec),
    Yaml(YamlCodec),
    Plist(PlistCodec),
}

impl AnyCodec {
    /// Builds the codec for `format`.
    pub fn new(format: DocumentFormat, pretty: bool) -> Self {
        match format {
            DocumentFormat::Json => Self::Json(JsonCodec { pretty }),
            DocumentFormat::Toml => Self::Toml(TomlCodec { pretty }),
            DocumentFormat::Yaml => Self::Yaml(YamlCodec),
            // Binary lists are opt-in through `PlistCodec::binary`
            DocumentFormat::Plist => Self::Plist(PlistCodec::xml()),
        }
    }

    pub fn document_format(&self) -> DocumentFormat {
        match self {
            Self::Json(_) => DocumentFormat::Json,
            Self::Toml(_) => DocumentFormat::Toml,
            Self::Yaml(_) => DocumentFormat::Yaml,
            Self::Plist(_) => DocumentFormat::Plist,
        }
    }
}

impl Default for AnyCodec {
    fn default() -> Self {
        Self::Json(JsonCodec::default())
    }
}

impl From<JsonCodec> for AnyCodec {
    fn from(codec: JsonCodec) -> Self {
        Self::Json(codec)
    }
}

impl From<TomlCodec> for AnyCodec {
    fn from(codec: TomlCodec) -> Self {
        Self::Toml(codec)
    }
}

impl From<YamlCodec> for AnyCodec {
    fn from(codec: YamlCodec) -> Self {
        Self::Yaml(codec)
    }
}

impl From<PlistCodec> for AnyCodec {
    fn from(codec: PlistCodec) -> Self {
        Self::Plist(codec)
    }
}

impl DocumentCodec for AnyCodec {
    fn format(&self) -> &'static str {
        match self {
            Self::Json(codec) => codec.format(),
            Self::Toml(codec) => codec.format(),
            Self::Yaml(codec) => codec.format(),
            Self::Plist(codec) => codec.format(),
        }
    }

    fn parse(&self, raw: &[u8]) -> Result<Value> {
        match self {
            Self::Json(codec) => codec.parse(raw),
            Self::Toml(codec) => codec.parse(raw),
            Self::Yaml(codec) => codec.parse(raw),
            Self::Plist(codec) => codec.parse(raw),
        }
    }

    fn render(&self, document: &Value) -> Result<Vec<u8>> {
        match self {
            Self::Json(codec) => codec.render(document),
            Self::Toml(codec) => codec.render(document),
            Self::Yaml(codec) => codec.render(document),
            Self::Plist(codec) => codec.render(document),
        }
    }
}

/// Removes `null` entries from every object in the tree, for formats that
/// have no null.
pub(crate) fn prune_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, entry| !entry.is_null());
            map.values_mut().for_each(prune_nulls);
        }
        Value::Array(items) => items.iter_mut().for_each(prune_nulls),
        _ => {}
    }
}
