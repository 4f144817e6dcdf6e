use flate2::read::MultiGzDecoder;
use once_cell::sync::OnceCell;
use rassert_rs::rassert;
use std::borrow::Cow;
use std::io::{self, Read};

use crate::index::Location;

use super::{DictError, DictReader, MAX_BYTES_FOR_BUFFER};
use DictError::*;

/// Magic bytes at the start of every gzip member (RFC 1952)
pub const GZ_MAGIC: [u8; 2] = [0x1F, 0x8B];

/// Compressed (gzip) Dict reader
///
/// This reader handles `.dict.dz` files. Those are dictzip files, i.e. gzip files with a chunk
/// table in the FEXTRA header. The chunk table is not needed here: the whole payload is inflated
/// and definitions are sliced out of the result, addressed by their offset into the decompressed
/// stream.
///
/// The inflated payload is cached on first use unless caching was disabled with
/// [`with_cache`](Compressed::with_cache); without the cache every fetch inflates the complete
/// file again.
pub struct Compressed {
    /// Compressed file content
    data: Vec<u8>,

    /// Inflated file content, filled at most once
    cache: Option<OnceCell<Vec<u8>>>,
}

impl Compressed {
    pub fn new<R: Read>(mut reader: R) -> Result<Self, DictError> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        rassert!(data.starts_with(&GZ_MAGIC), Decompression(io::Error::new(
            io::ErrorKind::InvalidData,
            "Not in gzip format"
        )));

        Ok(Self { data, cache: Some(OnceCell::new()) })
    }

    /// Enable or disable caching of the inflated payload.
    pub fn with_cache(mut self, enabled: bool) -> Self {
        self.cache = enabled.then(OnceCell::new);
        self
    }

    /// Inflate the complete payload, including any concatenated gzip members
    fn inflate(&self) -> Result<Vec<u8>, DictError> {
        let mut decoded = Vec::new();
        MultiGzDecoder::new(self.data.as_slice())
            .read_to_end(&mut decoded)
            .map_err(Decompression)?;

        Ok(decoded)
    }

    fn uncompressed(&self) -> Result<Cow<'_, [u8]>, DictError> {
        match &self.cache {
            Some(cell) => cell.get_or_try_init(|| self.inflate()).map(|d| Cow::Borrowed(d.as_slice())),
            None => self.inflate().map(Cow::Owned),
        }
    }
}

impl DictReader for Compressed {
    fn fetch_bytes(&self, location: Location) -> Result<Vec<u8>, DictError> {
        rassert!(location.size <= MAX_BYTES_FOR_BUFFER, MemoryError);

        let data = self.uncompressed()?;
        let end = u64::from(location.offset) + u64::from(location.size);
        rassert!(end <= data.len() as u64, Range {
            offset: location.offset,
            size: location.size,
            available: data.len(),
        });

        Ok(data[location.offset as usize..end as usize].to_vec())
    }
}
