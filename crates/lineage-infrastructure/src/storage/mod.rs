//! File-backed storage for versioned documents.

pub mod versioned_file;

pub use versioned_file::VersionedFile;
