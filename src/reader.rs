use crate::index::Location;

use super::DictError;

/// Access to definition data, independent of how it is stored.
pub trait DictReader: Send + Sync {
    /// Raw bytes of the definition at the given location.
    fn fetch_bytes(&self, location: Location) -> Result<Vec<u8>, DictError>;

    /// The definition at the given location as text.
    ///
    /// Dictionary data is not always valid UTF-8; invalid sequences are replaced with U+FFFD
    /// instead of failing the lookup.
    fn fetch_definition(&self, location: Location) -> Result<String, DictError> {
        let data = self.fetch_bytes(location)?;
        Ok(String::from_utf8_lossy(&data).into_owned())
    }
}

/// Limit size of a word buffer
///
/// Headword definitions are never larger than 1 MB, so prevent malicious or malformed index files
/// from requesting too much memory for a translation.
pub const MAX_BYTES_FOR_BUFFER: u32 = 1_048_576;
