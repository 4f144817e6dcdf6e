use crate::index::Location;

use super::{DictError, DictReader, MAX_BYTES_FOR_BUFFER};
use parking_lot::Mutex;
use rassert_rs::rassert;
use std::io::{Read, Seek, SeekFrom};
use DictError::*;

/// Uncompressed Dict reader
///
/// This reader can read uncompressed `.dict` files. The underlying reader is shared between
/// lookups, so seeking and reading happen under a lock.
pub struct Uncompressed<R: Read + Seek> {
    reader: Mutex<R>,
    length: u64,
}

impl<R: Read + Seek> Uncompressed<R> {
    pub fn new(mut reader: R) -> Result<Self, DictError> {
        let length = reader.seek(SeekFrom::End(0))?;

        Ok(Self { reader: Mutex::new(reader), length })
    }
}

impl<R: Read + Seek + Send> DictReader for Uncompressed<R> {
    fn fetch_bytes(&self, location: Location) -> Result<Vec<u8>, DictError> {
        rassert!(location.size <= MAX_BYTES_FOR_BUFFER, MemoryError);
        rassert!(u64::from(location.offset) + u64::from(location.size) <= self.length, Range {
            offset: location.offset,
            size: location.size,
            available: self.length as usize,
        });

        let mut reader = self.reader.lock();
        reader.seek(SeekFrom::Start(location.offset.into()))?;
        let mut read_data = vec![0; location.size as usize];
        reader.read_exact(&mut read_data)?;

        Ok(read_data)
    }
}
