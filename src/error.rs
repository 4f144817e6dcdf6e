use std::io;
use std::path::PathBuf;

use crate::index::IndexError;

/// Errors which make a dictionary unusable.
///
/// These are reported once by [`StarDict::initialize`](crate::StarDict::initialize). A dictionary
/// which failed to initialize stays registered but answers every lookup with
/// [`DictError::NotInitialized`].
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    /// One of the dictionary files could not be read.
    #[error("Could not read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The `.idx` file is structurally broken.
    #[error("Corrupt index: {0}")]
    CorruptIndex(#[from] IndexError),

    /// The definitions file has neither a `.dict` nor a `.dict.dz` suffix.
    #[error("Unsupported definitions file {0:?}, expected a .dict or .dict.dz suffix.")]
    UnsupportedFormat(PathBuf),

    /// The definitions file was readable, but its content was rejected.
    #[error("Invalid definitions file {path:?}: {source}")]
    InvalidData {
        path: PathBuf,
        #[source]
        source: DictError,
    },
}

/// Error type, representing the errors which can occur while fetching definitions.
#[derive(Debug, thiserror::Error)]
pub enum DictError {
    /// A lookup was issued against a dictionary whose initialization did not succeed.
    #[error("The dictionary has not been initialized.")]
    NotInitialized,

    /// The gzip stream of a `.dict.dz` file is malformed.
    #[error("Encountered a decompression error: {0}")]
    Decompression(#[source] io::Error),

    /// The index points outside of the (decompressed) definition data.
    #[error("Requested bytes {offset}..{offset}+{size}, but only {available} bytes of definition data exist.")]
    Range {
        offset: u32,
        size: u32,
        available: usize,
    },

    /// This reports a malicious/malformed index file, which requests a buffer which is too large.
    #[error("Requested too much memory. Headword definitions are never larger than 1 MB. The index file is malicious or malformed.")]
    MemoryError,

    /// A wrapped io::Error.
    #[error("Encountered an IO error: {0}")]
    IoError(#[from] io::Error),
}
