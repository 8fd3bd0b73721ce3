//! Codec configuration.
//!
//! A [`CodecConfig`] names the document format and output style. It is
//! usually embedded in an application's own TOML settings:
//!
//! ```toml
//! [codec]
//! format = "yaml"
//! pretty = true
//! ```

use crate::codec::AnyCodec;
use crate::error::{InfraError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// Supported document formats.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DocumentFormat {
    #[default]
    Json,
    Toml,
    #[strum(to_string = "yaml", serialize = "yml")]
    Yaml,
    Plist,
}

impl DocumentFormat {
    /// Canonical file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Toml => "toml",
            Self::Yaml => "yaml",
            Self::Plist => "plist",
        }
    }

    /// Infers the format from a file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        Self::from_str(&extension).ok()
    }

    /// All formats, in declaration order.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }
}

/// Which codec to use and how it should render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    pub format: DocumentFormat,
    /// Human-friendly output where the format supports it.
    pub pretty: bool,
}

impl CodecConfig {
    pub fn new(format: DocumentFormat) -> Self {
        Self {
            format,
            pretty: false,
        }
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Parses a config from a TOML snippet. Missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        tracing::debug!("Loaded codec config: {:?}", config);
        Ok(config)
    }

    /// Chooses the format from `path`'s extension.
    ///
    /// # Errors
    ///
    /// Returns [`InfraError::Config`] if the extension is missing or unknown.
    pub fn for_path(path: &Path) -> Result<Self> {
        DocumentFormat::from_path(path).map(Self::new).ok_or_else(|| {
            InfraError::Config(format!(
                "cannot infer document format from '{}'",
                path.display()
            ))
        })
    }

    /// Builds the codec this config describes.
    pub fn codec(&self) -> AnyCodec {
        AnyCodec::new(self.format, self.pretty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lineage_core::DocumentCodec;

    #[test]
    fn test_defaults() {
        let config = CodecConfig::from_toml_str("").unwrap();
        assert_eq!(config, CodecConfig::default());
        assert_eq!(config.format, DocumentFormat::Json);
        assert!(!config.pretty);
    }

    #[test]
    fn test_from_toml_str() {
        let config = CodecConfig::from_toml_str("format = \"yaml\"\npretty = true\n").unwrap();
        assert_eq!(config.format, DocumentFormat::Yaml);
        assert!(config.pretty);
        assert_eq!(config.codec().format(), "YAML");
    }

    #[test]
    fn test_unknown_format_is_config_error() {
        let err = CodecConfig::from_toml_str("format = \"xml\"").unwrap_err();
        assert!(matches!(err, InfraError::Config(_)));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("poem.TOML")),
            Some(DocumentFormat::Toml)
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("data/poem.yml")),
            Some(DocumentFormat::Yaml)
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("Info.plist")),
            Some(DocumentFormat::Plist)
        );
        assert_eq!(DocumentFormat::from_path(Path::new("poem")), None);
        assert!(CodecConfig::for_path(Path::new("poem.txt")).is_err());
    }

    #[test]
    fn test_plist_config_builds_xml_codec() {
        let config = CodecConfig::from_toml_str("format = \"plist\"").unwrap();
        assert_eq!(config.format, DocumentFormat::Plist);
        assert_eq!(config.codec(), AnyCodec::Plist(crate::PlistCodec::xml()));

        let config = CodecConfig::for_path(Path::new("settings/Defaults.PLIST")).unwrap();
        assert_eq!(config.codec().format(), "PLIST");
    }

    #[test]
    fn test_display_matches_extension() {
        for format in DocumentFormat::all() {
            assert_eq!(format.to_string(), format.extension());
            assert_eq!(format.as_ref(), format.extension());
        }
    }
}
