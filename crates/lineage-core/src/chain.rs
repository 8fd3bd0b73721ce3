//! Chain metadata: the linear sequence of versioned types from newest to oldest.
//!
//! The chain is declared at the type level through [`Versioned::Previous`].
//! [`Chain::of`] walks it once and records each type's name and version,
//! which is all the resolver needs to decide where decoding starts.

use crate::error::{Result, VersionedError};
use crate::versioned::{Predecessor, Versioned};
use std::any::TypeId;
use std::fmt;

/// One type in a version chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainLink {
    /// Fully qualified type name, as reported by `std::any::type_name`.
    pub type_name: &'static str,
    /// The version the type declares.
    pub version: Option<i64>,
}

impl ChainLink {
    /// Returns the link describing `T`.
    pub fn of<T: Versioned>() -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
            version: T::VERSION,
        }
    }

    /// The type name without its module path.
    pub fn short_name(&self) -> &'static str {
        let base = self.type_name.split('<').next().unwrap_or(self.type_name);
        match base.rfind("::") {
            Some(index) => &self.type_name[index + 2..],
            None => self.type_name,
        }
    }
}

impl fmt::Display for ChainLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.version {
            Some(version) => write!(f, "{} (version {})", self.type_name, version),
            None => write!(f, "{} (version none)", self.type_name),
        }
    }
}

/// Accumulates links while following predecessors.
///
/// Created by [`Chain::of`]; a type seen twice aborts the walk with
/// [`VersionedError::CyclicChain`].
#[derive(Debug, Default)]
pub struct ChainWalk {
    links: Vec<ChainLink>,
    seen: Vec<TypeId>,
}

impl ChainWalk {
    pub(crate) fn visit<T: Versioned>(&mut self) -> Result<()> {
        let id = TypeId::of::<T>();
        if self.seen.contains(&id) {
            let type_name = std::any::type_name::<T>();
            tracing::warn!("Version chain revisits {}", type_name);
            return Err(VersionedError::CyclicChain { type_name });
        }
        self.seen.push(id);
        self.links.push(ChainLink::of::<T>());
        Ok(())
    }
}

/// The links of a version chain, newest first.
///
/// # Example
///
/// ```
/// use lineage_core::{versioned, Chain};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct NoteV1 { text: String }
/// versioned!(NoteV1, version = 1);
///
/// #[derive(Serialize, Deserialize)]
/// struct Note { body: String }
/// versioned!(Note, version = 2, previous = NoteV1);
///
/// impl From<NoteV1> for Note {
///     fn from(old: NoteV1) -> Self {
///         Note { body: old.text }
///     }
/// }
///
/// let chain = Chain::of::<Note>().unwrap();
/// assert_eq!(chain.versions(), vec![Some(2), Some(1)]);
/// assert_eq!(chain.available_path(Some(1)), vec![Some(1), Some(2)]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    links: Vec<ChainLink>,
}

impl Chain {
    /// Walks the chain that starts at `T`.
    ///
    /// # Errors
    ///
    /// Returns [`VersionedError::CyclicChain`] if following predecessors
    /// reaches a type twice.
    pub fn of<T: Versioned>() -> Result<Self> {
        let mut walk = ChainWalk::default();
        <T as Predecessor>::describe(&mut walk)?;
        Ok(Self { links: walk.links })
    }

    /// All links, newest first.
    pub fn links(&self) -> &[ChainLink] {
        &self.links
    }

    /// The declared versions, newest first.
    pub fn versions(&self) -> Vec<Option<i64>> {
        self.links.iter().map(|link| link.version).collect()
    }

    /// The type the chain was walked from.
    pub fn target(&self) -> &ChainLink {
        &self.links[0]
    }

    /// The oldest type, whose predecessor is `NothingEarlier`.
    pub fn oldest(&self) -> &ChainLink {
        &self.links[self.links.len() - 1]
    }

    /// Number of types in the chain.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// A chain always contains at least its target.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Index of the first link, walking newest to oldest, declaring `version`.
    ///
    /// With duplicate versions the newer type wins.
    pub fn position(&self, version: Option<i64>) -> Option<usize> {
        self.links.iter().position(|link| link.version == version)
    }

    /// The versions a document tagged `from` passes through, oldest first.
    ///
    /// A linear chain has at most one path; an unsupported tag yields none.
    pub fn available_path(&self, from: Option<i64>) -> Vec<Option<i64>> {
        match self.position(from) {
            Some(index) => self.links[..=index]
                .iter()
                .rev()
                .map(|link| link.version)
                .collect(),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::versioned::NothingEarlier;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    struct Legacy {
        text: Option<String>,
    }
    crate::versioned!(Legacy, version = None);

    #[derive(Debug, Serialize, Deserialize)]
    struct First {
        text: String,
    }
    crate::versioned!(First, version = 1, previous = Legacy);

    #[derive(Debug, Serialize, Deserialize)]
    struct Second {
        body: String,
    }
    crate::versioned!(Second, version = 2, previous = First);

    impl TryFrom<Legacy> for First {
        type Error = VersionedError;
        fn try_from(old: Legacy) -> Result<Self> {
            old.text
                .map(|text| First { text })
                .ok_or_else(|| VersionedError::field_no_longer_valid(["text"], "required"))
        }
    }

    impl From<First> for Second {
        fn from(old: First) -> Self {
            Second { body: old.text }
        }
    }

    // Two types naming each other as predecessors.
    #[derive(Debug, Serialize, Deserialize)]
    struct Ping;
    #[derive(Debug, Serialize, Deserialize)]
    struct Pong;

    impl Versioned for Ping {
        const VERSION: Option<i64> = Some(2);
        type Previous = Pong;
        type VersionSpec = crate::RootVersionKey;
        fn upgrade(_previous: Pong) -> Result<Self> {
            Ok(Ping)
        }
    }

    impl Versioned for Pong {
        const VERSION: Option<i64> = Some(1);
        type Previous = Ping;
        type VersionSpec = crate::RootVersionKey;
        fn upgrade(_previous: Ping) -> Result<Self> {
            Ok(Pong)
        }
    }

    #[test]
    fn test_chain_lists_newest_first() {
        let chain = Chain::of::<Second>().unwrap();
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.versions(), vec![Some(2), Some(1), None]);
        assert_eq!(chain.target().short_name(), "Second");
        assert_eq!(chain.oldest().short_name(), "Legacy");
    }

    #[test]
    fn test_single_link_chain() {
        let chain = Chain::of::<Legacy>().unwrap();
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.target(), chain.oldest());
    }

    #[test]
    fn test_available_path() {
        let chain = Chain::of::<Second>().unwrap();
        assert_eq!(chain.available_path(None), vec![None, Some(1), Some(2)]);
        assert_eq!(chain.available_path(Some(2)), vec![Some(2)]);
        assert!(chain.available_path(Some(9)).is_empty());
    }

    #[test]
    fn test_cycle_is_detected() {
        let err = Chain::of::<Ping>().unwrap_err();
        match err {
            VersionedError::CyclicChain { type_name } => assert!(type_name.ends_with("Ping")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_link_display() {
        let link = ChainLink {
            type_name: "poems::Poem",
            version: Some(4),
        };
        assert_eq!(link.to_string(), "poems::Poem (version 4)");
        assert_eq!(link.short_name(), "Poem");
    }

    #[test]
    fn test_terminal_has_no_link() {
        assert_eq!(<NothingEarlier as Predecessor>::link(), None);
        assert_eq!(
            <First as Predecessor>::link(),
            Some(ChainLink::of::<First>())
        );
    }
}
