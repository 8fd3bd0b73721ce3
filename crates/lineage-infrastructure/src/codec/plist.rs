//! Property-list documents.
//!
//! Both XML and binary lists are read. Output is XML unless the codec is
//! built with [`PlistCodec::binary`]. Property lists have no null, so null
//! object entries are dropped before rendering, as for TOML.

use super::prune_nulls;
use lineage_core::{DocumentCodec, Result, VersionedError};
use serde_json::Value;

/// Property-list codec backed by the `plist` crate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlistCodec {
    /// Write binary lists instead of XML.
    pub binary: bool,
}

impl PlistCodec {
    pub const FORMAT: &'static str = "PLIST";

    pub fn xml() -> Self {
        Self { binary: false }
    }

    pub fn binary() -> Self {
        Self { binary: true }
    }
}

impl DocumentCodec for PlistCodec {
    fn format(&self) -> &'static str {
        Self::FORMAT
    }

    fn parse(&self, raw: &[u8]) -> Result<Value> {
        plist::from_bytes(raw)
            .map_err(|e| VersionedError::malformed(Self::FORMAT, e.to_string()))
    }

    fn render(&self, document: &Value) -> Result<Vec<u8>> {
        let mut document = document.clone();
        prune_nulls(&mut document);

        let mut rendered = Vec::new();
        let written = if self.binary {
            plist::to_writer_binary(&mut rendered, &document)
        } else {
            plist::to_writer_xml(&mut rendered, &document)
        };
        written
            .map(|()| rendered)
            .map_err(|e| VersionedError::serialization(Self::FORMAT, e.to_string()))
    }
}
