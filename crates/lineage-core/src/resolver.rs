//! Version chain resolution.
//!
//! Resolution walks a chain newest to oldest until a type's declared version
//! equals the document's tag, then folds forward: the document is decoded
//! once as the matched type and lifted through each newer type's `upgrade`
//! until it reaches the target. Versions are only compared for equality;
//! chain order alone says which type is older.

use crate::chain::{Chain, ChainLink};
use crate::error::{Result, VersionedError};
use crate::versioned::{Predecessor, Versioned};
use serde_json::Value;

/// Outcome of matching a tag against a chain.
///
/// Holds the links a document passes through, from the matched historical
/// type up to the target. [`Resolution::steps`] is the number of upgrades
/// the fold will perform.
///
/// ```
/// use lineage_core::{versioned, Resolution};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct ProfileV1 { name: String }
/// versioned!(ProfileV1, version = 1);
///
/// #[derive(Serialize, Deserialize)]
/// struct Profile { display_name: String }
/// versioned!(Profile, version = 2, previous = ProfileV1);
///
/// impl From<ProfileV1> for Profile {
///     fn from(old: ProfileV1) -> Self {
///         Profile { display_name: old.name }
///     }
/// }
///
/// let resolution = Resolution::resolve::<Profile>(Some(1)).unwrap();
/// assert_eq!(resolution.steps(), 1);
/// assert_eq!(resolution.matched().short_name(), "ProfileV1");
///
/// let err = Resolution::resolve::<Profile>(None).unwrap_err();
/// assert!(err.is_unsupported_version());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    found: Option<i64>,
    /// Matched link first, target last.
    path: Vec<ChainLink>,
}

impl Resolution {
    /// Resolves `found` against the chain of `T`.
    ///
    /// # Errors
    ///
    /// - [`VersionedError::UnsupportedVersion`] if no type in the chain
    ///   declares `found`; `tried` is the oldest type.
    /// - [`VersionedError::CyclicChain`] if the chain is not linear.
    pub fn resolve<T: Versioned>(found: Option<i64>) -> Result<Self> {
        let chain = Chain::of::<T>()?;
        Self::within(&chain, found)
    }

    /// Resolves `found` against an already walked chain.
    pub fn within(chain: &Chain, found: Option<i64>) -> Result<Self> {
        match chain.position(found) {
            Some(index) => {
                let path = chain.links()[..=index].iter().rev().copied().collect();
                Ok(Self { found, path })
            }
            None => {
                let tried = *chain.oldest();
                tracing::warn!(
                    "No type in the chain of {} declares version {:?} (oldest tried: {})",
                    chain.target().type_name,
                    found,
                    tried
                );
                Err(VersionedError::UnsupportedVersion { found, tried })
            }
        }
    }

    /// The tag this resolution was computed for.
    pub fn found(&self) -> Option<i64> {
        self.found
    }

    /// The historical type the document decodes as.
    pub fn matched(&self) -> &ChainLink {
        &self.path[0]
    }

    /// The type the fold ends at.
    pub fn target(&self) -> &ChainLink {
        &self.path[self.path.len() - 1]
    }

    /// Number of upgrade calls needed to reach the target.
    pub fn steps(&self) -> usize {
        self.path.len() - 1
    }

    /// Returns true if the document is already at the target version.
    pub fn is_current(&self) -> bool {
        self.steps() == 0
    }

    /// The links from matched to target, oldest first.
    pub fn path(&self) -> &[ChainLink] {
        &self.path
    }

    /// Upgrade steps as `(from, to)` pairs, in the order they run.
    pub fn upgrades(&self) -> impl Iterator<Item = (&ChainLink, &ChainLink)> {
        self.path.windows(2).map(|pair| (&pair[0], &pair[1]))
    }

    /// Decodes `document` as the matched type and folds it forward into `T`.
    ///
    /// `format` names the codec the document came from, for error reporting.
    ///
    /// # Errors
    ///
    /// - [`VersionedError::TargetMismatch`] if `T` is not the type this
    ///   resolution was computed for; nothing is decoded.
    /// - [`VersionedError::MalformedDocument`] if the document does not
    ///   decode as the matched type.
    /// - The first error any `upgrade` returns; later upgrades do not run.
    pub fn fold<T: Versioned>(&self, document: Value, format: &'static str) -> Result<T> {
        let requested = ChainLink::of::<T>();
        if *self.target() != requested {
            return Err(VersionedError::TargetMismatch {
                resolved: *self.target(),
                requested,
            });
        }

        let steps = self.steps();
        if steps == 0 {
            tracing::debug!(
                "Document is already at the current version ({}), no upgrade needed",
                self.target()
            );
        } else {
            tracing::info!(
                "Starting upgrade from {} to {} ({} steps)",
                self.matched(),
                self.target(),
                steps
            );
        }

        let ctx = FoldContext {
            found: self.found,
            total: steps,
            format,
        };
        let value = fold_into::<T>(document, steps, &ctx)?;

        if steps > 0 {
            tracing::info!(
                "Upgrade completed successfully: {} -> {}",
                self.matched(),
                self.target()
            );
        }
        Ok(value)
    }
}

/// State shared by every layer of one fold.
#[derive(Debug, Clone, Copy)]
pub struct FoldContext {
    found: Option<i64>,
    total: usize,
    format: &'static str,
}

impl FoldContext {
    /// The document's tag.
    pub fn found(&self) -> Option<i64> {
        self.found
    }
}

/// Decodes at the layer `steps` below `T` and upgrades back up to `T`.
pub(crate) fn fold_into<T: Versioned>(
    document: Value,
    steps: usize,
    ctx: &FoldContext,
) -> Result<T> {
    if steps == 0 {
        return serde_json::from_value(document).map_err(|e| {
            VersionedError::malformed(
                ctx.format,
                format!("{}: {}", std::any::type_name::<T>(), e),
            )
        });
    }

    let previous = <T::Previous as Predecessor>::fold(
        document,
        steps - 1,
        ctx,
        ChainLink::of::<T>(),
    )?;

    tracing::info!(
        "Upgrade step {}/{}: {} -> {}",
        steps,
        ctx.total,
        <T::Previous as Predecessor>::link()
            .map(|link| link.to_string())
            .unwrap_or_default(),
        ChainLink::of::<T>()
    );

    T::upgrade(previous).inspect_err(|e| {
        tracing::warn!(
            "Upgrade step {}/{} into {} failed: {}",
            steps,
            ctx.total,
            std::any::type_name::<T>(),
            e
        );
    })
}
