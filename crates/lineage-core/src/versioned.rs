//! The declaration surface of a versioned type.
//!
//! Every type enrolled in a chain implements [`Versioned`], naming its own
//! version and its immediate predecessor. The oldest type names
//! [`NothingEarlier`], an uninhabited marker: it ends the chain at the type
//! level and can never be constructed, so the oldest type's `upgrade` is an
//! empty match that cannot run.

use crate::chain::{ChainLink, ChainWalk};
use crate::error::{Result, VersionedError};
use crate::resolver::{self, FoldContext};
use crate::version_spec::VersionPathSpec;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A data shape that can be decoded from any older version in its chain.
///
/// Most types declare this through [`versioned!`](crate::versioned); writing
/// the impl by hand is equivalent.
///
/// ```
/// use lineage_core::{NothingEarlier, RootVersionKey, Result, Versioned};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Settings {
///     theme: String,
/// }
///
/// impl Versioned for Settings {
///     const VERSION: Option<i64> = Some(1);
///     type Previous = NothingEarlier;
///     type VersionSpec = RootVersionKey;
///
///     fn upgrade(previous: NothingEarlier) -> Result<Self> {
///         match previous {}
///     }
/// }
/// ```
pub trait Versioned: Serialize + DeserializeOwned + 'static {
    /// The version written when this type is encoded.
    ///
    /// `None` stands for data persisted before a version field existed.
    const VERSION: Option<i64>;

    /// The next-older type, or [`NothingEarlier`] for the oldest.
    type Previous: Predecessor;

    /// Where the version tag lives in this type's documents.
    type VersionSpec: VersionPathSpec;

    /// Lifts a decoded instance of the predecessor into this type.
    ///
    /// # Errors
    ///
    /// Returns [`VersionedError::FieldNoLongerValid`] (or any other variant)
    /// when the old data cannot be represented in this shape.
    fn upgrade(previous: Self::Previous) -> Result<Self>;
}

/// Terminates every version chain.
///
/// An uninhabited type: no value of it exists, so nothing ever decodes into
/// it or upgrades from it. Resolution reaching it fails with
/// [`VersionedError::UnsupportedVersion`] naming the type that pointed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NothingEarlier {}

mod private {
    pub trait Sealed {}

    impl<T: super::Versioned> Sealed for T {}
    impl Sealed for super::NothingEarlier {}
}

/// Anything that may appear as [`Versioned::Previous`]: another versioned
/// type, or [`NothingEarlier`].
///
/// Sealed; implemented for every [`Versioned`] type and for `NothingEarlier`.
pub trait Predecessor: private::Sealed + Sized + 'static {
    /// The link for this type, or `None` at the end of the chain.
    fn link() -> Option<ChainLink>;

    #[doc(hidden)]
    fn describe(walk: &mut ChainWalk) -> Result<()>;

    #[doc(hidden)]
    fn fold(document: Value, steps: usize, ctx: &FoldContext, successor: ChainLink)
    -> Result<Self>;
}

impl<T: Versioned> Predecessor for T {
    fn link() -> Option<ChainLink> {
        Some(ChainLink::of::<T>())
    }

    fn describe(walk: &mut ChainWalk) -> Result<()> {
        walk.visit::<T>()?;
        <T::Previous as Predecessor>::describe(walk)
    }

    fn fold(
        document: Value,
        steps: usize,
        ctx: &FoldContext,
        _successor: ChainLink,
    ) -> Result<Self> {
        resolver::fold_into::<T>(document, steps, ctx)
    }
}

impl Predecessor for NothingEarlier {
    fn link() -> Option<ChainLink> {
        None
    }

    fn describe(_walk: &mut ChainWalk) -> Result<()> {
        Ok(())
    }

    fn fold(
        _document: Value,
        _steps: usize,
        ctx: &FoldContext,
        successor: ChainLink,
    ) -> Result<Self> {
        Err(VersionedError::UnsupportedVersion {
            found: ctx.found(),
            tried: successor,
        })
    }
}

/// Implements [`Versioned`] for a type.
///
/// ```text
/// versioned!(PoemPreV1, version = None);
/// versioned!(PoemV1, version = 1, previous = PoemPreV1);
/// versioned!(Sonnet, version = 2, spec = MetadataVersion);
/// ```
///
/// Without `previous` the predecessor is [`NothingEarlier`]. With it, the
/// upgrade delegates to `TryFrom<Previous>`; a plain `From` impl works too.
/// `spec` defaults to [`RootVersionKey`](crate::RootVersionKey).
#[macro_export]
macro_rules! versioned {
    (@spec) => { $crate::RootVersionKey };
    (@spec $spec:ty) => { $spec };

    (@impl $ty:ty, $version:expr, [], [$($spec:ty)?]) => {
        impl $crate::Versioned for $ty {
            const VERSION: ::core::option::Option<i64> = $version;
            type Previous = $crate::NothingEarlier;
            type VersionSpec = $crate::versioned!(@spec $($spec)?);

            fn upgrade(previous: $crate::NothingEarlier) -> $crate::Result<Self> {
                match previous {}
            }
        }
    };
    (@impl $ty:ty, $version:expr, [$prev:ty], [$($spec:ty)?]) => {
        impl $crate::Versioned for $ty {
            const VERSION: ::core::option::Option<i64> = $version;
            type Previous = $prev;
            type VersionSpec = $crate::versioned!(@spec $($spec)?);

            fn upgrade(previous: $prev) -> $crate::Result<Self> {
                <$ty as ::core::convert::TryFrom<$prev>>::try_from(previous)
                    .map_err($crate::VersionedError::from)
            }
        }
    };

    ($ty:ty, version = None $(, previous = $prev:ty)? $(, spec = $spec:ty)? $(,)?) => {
        $crate::versioned!(@impl $ty, ::core::option::Option::None, [$($prev)?], [$($spec)?]);
    };
    ($ty:ty, version = $version:expr $(, previous = $prev:ty)? $(, spec = $spec:ty)? $(,)?) => {
        $crate::versioned!(
            @impl $ty,
            ::core::option::Option::Some($version),
            [$($prev)?],
            [$($spec)?]
        );
    };
}
