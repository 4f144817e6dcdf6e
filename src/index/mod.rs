//! The StarDict word index (`.idx`).
//!
//! An index file is a sequence of binary records: a NUL-terminated UTF-8 headword followed by the
//! offset and the size of its definition in the (decompressed) `.dict` data, both big-endian
//! u32. The decoded records are kept in memory, sorted by [`collation`](crate::collation), and
//! searched with binary search.
mod error;
mod parsing;

pub use self::error::IndexError;

use crate::collation::{primary_key, CollationKey};
use std::io::Read;

/// Position of a definition within the uncompressed definition data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    pub offset: u32,
    pub size: u32,
}

/// A single index record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub headword: String,
    pub location: Location,
}

/// Sorted, immutable word index.
#[derive(Debug, Default)]
pub struct Index {
    entries: Vec<Entry>,
}

impl Index {
    /// Read a complete `.idx` file from the given reader.
    pub fn new<R: Read>(mut reader: R) -> Result<Self, IndexError> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    /// Decode the raw content of a `.idx` file.
    pub fn from_bytes(data: &[u8]) -> Result<Self, IndexError> {
        Ok(Self::from_entries(parsing::parse(data)?))
    }

    /// Build an index from already decoded records; they are sorted here.
    pub fn from_entries(mut entries: Vec<Entry>) -> Self {
        entries.sort_by_cached_key(|e| CollationKey::new(&e.headword));
        Self { entries }
    }

    /// Binary search for a headword.
    ///
    /// Matching is exact (case and diacritics matter). If a dictionary lists the same headword
    /// more than once, any one of the duplicates may be returned.
    pub fn find(&self, headword: &str) -> Option<&Entry> {
        let key = CollationKey::new(headword);
        self.entries
            .binary_search_by(|e| CollationKey::new(&e.headword).cmp(&key))
            .ok()
            .map(|i| &self.entries[i])
    }

    /// Headwords starting with `prefix`, in index order, at most `limit` of them.
    pub fn prefixed<'a>(&'a self, prefix: &'a str, limit: usize) -> impl Iterator<Item = &'a str> + 'a {
        let folded = primary_key(prefix);
        // All words starting with `prefix` have a primary key starting with the folded prefix,
        // and those form one contiguous run in sort order
        let start = self
            .entries
            .partition_point(|e| primary_key(&e.headword) < folded);

        self.entries[start..]
            .iter()
            .take_while(move |e| primary_key(&e.headword).starts_with(&folded))
            .filter(move |e| e.headword.starts_with(prefix))
            .map(|e| e.headword.as_str())
            .take(limit)
    }

    pub fn get(&self, position: usize) -> Option<&Entry> {
        self.entries.get(position)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
