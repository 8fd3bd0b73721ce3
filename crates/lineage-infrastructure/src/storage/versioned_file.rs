//! Versioned documents on disk.
//!
//! A [`VersionedFile`] reads a document at whatever version it was written
//! in and always writes the current version. Writes go through a temporary
//! file and an atomic rename; [`VersionedFile::update`] additionally holds an
//! exclusive lock for the whole read-modify-write cycle.

use crate::codec::AnyCodec;
use crate::config::CodecConfig;
use crate::error::{InfraError, Result};
use fs2::FileExt;
use lineage_core::{DocumentCodec, Versioned, VersionedCodec};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// A handle to a file holding one versioned document of type `T`.
///
/// Provides:
/// - **Transparent upgrades**: older documents load as the current `T`
/// - **Atomicity**: writes are all-or-nothing via tmp file + atomic rename
/// - **Isolation**: `update` locks out concurrent writers
/// - **Durability**: explicit fsync before rename
pub struct VersionedFile<T, C = AnyCodec> {
    path: PathBuf,
    codec: C,
    _phantom: PhantomData<T>,
}

impl<T: Versioned> VersionedFile<T, AnyCodec> {
    /// Opens `path`, choosing the codec from its extension.
    ///
    /// # Errors
    ///
    /// Returns [`InfraError::Config`] if the extension names no known format.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let codec = CodecConfig::for_path(&path)?.codec();
        Ok(Self::new(path, codec))
    }
}

impl<T, C> VersionedFile<T, C>
where
    T: Versioned,
    C: DocumentCodec,
{
    pub fn new(path: impl Into<PathBuf>, codec: C) -> Self {
        Self {
            path: path.into(),
            codec,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Loads and decodes the file, upgrading older versions to `T`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: loaded, possibly after upgrading
    /// - `Ok(None)`: the file doesn't exist or is blank
    /// - `Err`: failed to read, parse or upgrade
    pub fn load(&self) -> Result<Option<T>> {
        let Some(raw) = self.read_raw()? else {
            return Ok(None);
        };

        let value = self.codec.decode_versioned::<T>(&raw).inspect_err(|e| {
            tracing::warn!("Failed to load {}: {}", self.path.display(), e);
        })?;
        Ok(Some(value))
    }

    /// Reads only the stored version tag.
    ///
    /// Returns `Ok(None)` both for a missing file and for a document without
    /// a tag; use [`Self::exists`] to tell them apart.
    pub fn peek_version(&self) -> Result<Option<i64>> {
        match self.read_raw()? {
            Some(raw) => Ok(self.codec.peek_version::<T::VersionSpec>(&raw)?),
            None => Ok(None),
        }
    }

    /// Returns true if the file exists and is not blank.
    pub fn exists(&self) -> Result<bool> {
        Ok(self.read_raw()?.is_some())
    }

    /// Encodes `data` at its current version and writes it atomically.
    pub fn save(&self, data: &T) -> Result<()> {
        // Encode before touching the disk so a clash leaves the file alone
        let bytes = self.codec.encode_versioned(data)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(&bytes)?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;
        tracing::debug!(
            "Saved {} at version {:?}",
            self.path.display(),
            T::VERSION
        );
        Ok(())
    }

    /// Performs a locked read-modify-write.
    ///
    /// The current document is loaded (and upgraded), or `default_value` is
    /// used if there is none. If `f` succeeds the result is saved at the
    /// current version; if it fails nothing is written.
    pub fn update<F>(&self, default_value: T, f: F) -> Result<()>
    where
        F: FnOnce(&mut T) -> Result<()>,
    {
        let _lock = FileLock::acquire(&self.path)?;

        let mut data = self.load()?.unwrap_or(default_value);
        f(&mut data)?;
        self.save(&data)
    }

    /// Rewrites the file at the current version if it holds an older one.
    ///
    /// Returns true if the file was rewritten.
    pub fn upgrade_in_place(&self) -> Result<bool> {
        let _lock = FileLock::acquire(&self.path)?;

        let stored = match self.read_raw()? {
            Some(raw) => self.codec.peek_version::<T::VersionSpec>(&raw)?,
            None => return Ok(false),
        };
        if stored == T::VERSION {
            return Ok(false);
        }

        let Some(data) = self.load()? else {
            return Ok(false);
        };
        self.save(&data)?;
        tracing::info!(
            "Upgraded {} from version {:?} to {:?}",
            self.path.display(),
            stored,
            T::VERSION
        );
        Ok(true)
    }

    fn read_raw(&self) -> Result<Option<Vec<u8>>> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if raw.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        Ok(Some(raw))
    }

    /// Gets a temporary file path for atomic writes.
    fn temp_path(&self) -> Result<PathBuf> {
        let file_name = self.path.file_name().ok_or_else(|| {
            InfraError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path has no file name",
            ))
        })?;

        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(self.path.with_file_name(tmp_name))
    }
}

/// An exclusive lock held on `<path>.lock` until dropped.
///
/// The lock file itself is left in place; removing it would let a new
/// writer lock a fresh inode while another still waits on the old one.
struct FileLock {
    _file: File,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self> {
        let mut lock_name = path.as_os_str().to_owned();
        lock_name.push(".lock");
        let lock_path = PathBuf::from(lock_name);

        if let Some(parent) = lock_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        file.lock_exclusive()
            .map_err(|e| InfraError::Lock(format!("Failed to acquire lock: {}", e)))?;

        Ok(FileLock { _file: file })
    }
}
