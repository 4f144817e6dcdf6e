use std::io;

/// Structural errors of a binary `.idx` file.
///
/// A single broken record invalidates the whole index; no partial index is ever returned.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// The headword starting at the given byte position has no NUL terminator.
    #[error("Headword starting at byte {position} is not NUL-terminated.")]
    UnterminatedWord { position: usize },

    /// Fewer than 8 bytes follow a headword, so offset and size cannot be read.
    #[error("Record for '{word}' at byte {position} is truncated: expected 8 bytes for offset and size, found {remaining}.")]
    TruncatedRecord {
        word: String,
        position: usize,
        remaining: usize,
    },

    /// A wrapped io::Error.
    #[error("Encountered an IO error.")]
    IoError(#[from] io::Error),
}
