//! Shared fixtures: a poem document that went through four schema changes,
//! and sonnets whose version tags live away from the usual `version` key.

#![allow(dead_code)]

use chrono::NaiveDate;
use lineage_core::{versioned, VersionPathSpec, VersionedError};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const LIMERICK: &str = concat!(
    "An epicure dining at Crewe\n",
    "Found a rather large mouse in his stew\n",
    "Cried the waiter: Don't shout\n",
    "And wave it about\n",
    "Or the rest will be wanting one too!",
);

pub fn limerick_lines() -> Vec<String> {
    LIMERICK.lines().map(String::from).collect()
}

/// Routes `tracing` output through the test harness. Set `RUST_LOG=debug`
/// to see each upgrade step.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ----------------------------------------------------------------------------
// Poem chain: PoemPreV1 (untagged) -> PoemV1 -> PoemV2 -> PoemV3 -> Poem
// ----------------------------------------------------------------------------

/// Written before documents carried a version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoemPreV1 {
    pub author: Option<String>,
    pub poem: Option<String>,
}
versioned!(PoemPreV1, version = None);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoemV1 {
    pub author: Option<String>,
    pub poem: String,
}
versioned!(PoemV1, version = 1, previous = PoemPreV1);

impl TryFrom<PoemPreV1> for PoemV1 {
    type Error = VersionedError;

    fn try_from(old: PoemPreV1) -> Result<Self, VersionedError> {
        let poem = old.poem.ok_or_else(|| {
            VersionedError::field_no_longer_valid(["poem"], "Poem is no longer optional")
        })?;
        Ok(PoemV1 {
            author: old.author,
            poem,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoemV2 {
    pub author_name: Option<String>,
    pub author_date_of_birth: Option<NaiveDate>,
    pub author_date_of_death: Option<NaiveDate>,
    pub poem: String,
}
versioned!(PoemV2, version = 2, previous = PoemV1);

impl From<PoemV1> for PoemV2 {
    fn from(old: PoemV1) -> Self {
        PoemV2 {
            author_name: old.author,
            author_date_of_birth: None,
            author_date_of_death: None,
            poem: old.poem,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoemV3 {
    pub author_name: Option<String>,
    pub author_date_of_birth: Option<NaiveDate>,
    pub author_date_of_death: Option<NaiveDate>,
    pub lines: Vec<String>,
}
versioned!(PoemV3, version = 3, previous = PoemV2);

impl From<PoemV2> for PoemV3 {
    fn from(old: PoemV2) -> Self {
        PoemV3 {
            author_name: old.author_name,
            author_date_of_birth: old.author_date_of_birth,
            author_date_of_death: old.author_date_of_death,
            lines: old.poem.split('\n').map(String::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub born: Option<NaiveDate>,
    pub died: Option<NaiveDate>,
}

/// The current poem shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poem {
    pub author: Option<Author>,
    pub lines: Vec<String>,
}
versioned!(Poem, version = 4, previous = PoemV3);

impl From<PoemV3> for Poem {
    fn from(old: PoemV3) -> Self {
        Poem {
            author: old.author_name.map(|name| Author {
                name,
                born: old.author_date_of_birth,
                died: old.author_date_of_death,
            }),
            lines: old.lines,
        }
    }
}

/// A version 1 poem, as JSON.
pub fn poem_v1_document() -> Value {
    json!({
        "version": 1,
        "author": "A Clever Man",
        "poem": LIMERICK,
    })
}

// ----------------------------------------------------------------------------
// Types that cannot carry a root `version` tag
// ----------------------------------------------------------------------------

/// Stores its own `version` field, which collides with the tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoemWithClash {
    pub content: String,
    pub version: i64,
}
versioned!(PoemWithClash, version = 1);

/// The only version there has ever been.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Haiku {
    pub lines: Vec<String>,
}
versioned!(Haiku, version = 1);

// ----------------------------------------------------------------------------
// Sonnets with unusual tag locations
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SonnetBody {
    pub quatrains: Vec<Vec<String>>,
    pub couplets: Vec<Vec<String>>,
}

/// Tag in a root `_version` key.
pub struct UnderscoreVersion;

impl VersionPathSpec for UnderscoreVersion {
    const PATH: &'static [&'static str] = &["_version"];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SonnetV1 {
    pub author: String,
    pub body: SonnetBody,
}
versioned!(SonnetV1, version = 1, spec = UnderscoreVersion);

/// Tag nested under `metadata`.
pub struct MetadataVersion;

impl VersionPathSpec for MetadataVersion {
    const PATH: &'static [&'static str] = &["metadata", "version"];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SonnetMetadata {
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SonnetV2 {
    pub author: String,
    pub metadata: SonnetMetadata,
    pub body: SonnetBody,
}
versioned!(SonnetV2, version = 2, spec = MetadataVersion);

/// Tag written as a `"vN"` string under `schema`.
pub struct LabelledVersion;

impl VersionPathSpec for LabelledVersion {
    const PATH: &'static [&'static str] = &["schema"];

    fn locate(document: &Value) -> lineage_core::Result<Option<i64>> {
        match document.get("schema") {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(label)) => label
                .strip_prefix('v')
                .and_then(|n| n.parse().ok())
                .map(Some)
                .ok_or_else(|| {
                    VersionedError::malformed("version tag", format!("bad schema label '{label}'"))
                }),
            Some(other) => Err(VersionedError::malformed(
                "version tag",
                format!("schema must be a label, found {other}"),
            )),
        }
    }

    fn construct(version: Option<i64>) -> Value {
        match version {
            Some(n) => json!({ "schema": format!("v{n}") }),
            None => json!({}),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SonnetV3 {
    pub author: String,
    pub body: SonnetBody,
}
versioned!(SonnetV3, version = 3, spec = LabelledVersion);

pub fn sonnet_18_body() -> SonnetBody {
    SonnetBody {
        quatrains: vec![vec![
            "Shall I compare thee to a summer's day?".to_string(),
            "Thou art more lovely and more temperate:".to_string(),
        ]],
        couplets: vec![vec![
            "So long as men can breathe or eyes can see,".to_string(),
            "So long lives this, and this gives life to thee.".to_string(),
        ]],
    }
}
