//! A StarDict dictionary reader crate.
//!
//! This crate reads dictionaries in the StarDict format: an `.ifo` file with metadata, a binary
//! `.idx` word index and the definitions, either gzip-compressed (`.dict.dz`) or plain (`.dict`).
//! Definitions written in the supported line markup can be parsed into a structured
//! [`ParsedDictionaryEntry`].
//!
//! # Examples
//!
//! ```no_run
//! use stardict::{DictionaryConfig, StarDict};
//!
//! let config = DictionaryConfig::from_stem("ev", "/usr/share/stardict/ev", "en_vi");
//! let mut dict = StarDict::new(config);
//! dict.initialize().unwrap();
//!
//! if let Some(entry) = dict.lookup("ferry").unwrap() {
//!     println!("{} /{}/", entry.word, entry.pronunciation.unwrap_or_default());
//! }
//! println!("{:?}", dict.lookup_prefix("fer", 10).unwrap());
//! ```
//!
//! Hosts serving several dictionaries use a [`Library`].
pub mod collation;
pub mod compressed;
pub mod config;
pub mod definition;
mod error;
pub mod index;
pub mod library;
pub mod metadata;
mod reader;
pub mod uncompressed;

pub use self::compressed::Compressed;
pub use self::config::{ConfigError, DictionaryConfig};
pub use self::definition::{parse_definition, ParsedDictionaryEntry};
pub use self::error::{DictError, InitError};
pub use self::index::IndexError;
pub use self::library::Library;
pub use self::metadata::Metadata;
pub use self::reader::{DictReader, MAX_BYTES_FOR_BUFFER};
pub use self::uncompressed::Uncompressed;

use self::index::{Entry, Index};
use log::{debug, error, info, warn};
use rand::Rng;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

/// A StarDict dictionary.
///
/// A dictionary is made up of an `.ifo` metadata file, an `.idx` index of all headwords with the
/// positions of their definitions, and the definition data itself. Constructing a `StarDict`
/// does not touch the file system; [`initialize`](StarDict::initialize) loads metadata and index
/// and must succeed before lookups return anything but [`DictError::NotInitialized`].
///
/// After initialization all lookups take `&self`, so an initialized dictionary can be shared
/// between threads.
pub struct StarDict {
    config: DictionaryConfig,
    loaded: Option<Loaded>,
}

struct Loaded {
    metadata: Metadata,
    index: Index,
    reader: Box<dyn DictReader>,
}

/// Health information about a dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryStatus {
    pub path: PathBuf,
    pub initialized: bool,
    pub word_count: usize,
}

impl StarDict {
    pub fn new(config: DictionaryConfig) -> Self {
        Self { config, loaded: None }
    }

    /// Create an initialized dictionary from already loaded parts.
    ///
    /// This allows abstraction from the underlying source by only requiring a [`DictReader`] as
    /// trait object, so dictionaries held in RAM or similar can be used.
    pub fn from_existing(metadata: Metadata, index: Index, reader: Box<dyn DictReader>) -> Self {
        Self {
            config: DictionaryConfig::default(),
            loaded: Some(Loaded { metadata, index, reader }),
        }
    }

    /// Load metadata and index and open the definition data.
    ///
    /// On failure the dictionary is left uninitialized, even if it was initialized before.
    pub fn initialize(&mut self) -> Result<(), InitError> {
        self.loaded = None;

        match self.load() {
            Ok(loaded) => {
                info!(
                    "Loaded dictionary {:?} ({}) with {} words",
                    self.config.base_path(),
                    loaded.metadata.bookname().unwrap_or("unnamed"),
                    loaded.index.len()
                );
                self.loaded = Some(loaded);
                Ok(())
            }
            Err(e) => {
                error!("Failed to initialize dictionary {:?}: {}", self.config.base_path(), e);
                Err(e)
            }
        }
    }

    fn load(&self) -> Result<Loaded, InitError> {
        let ifo_path = self.config.ifo_path();
        let ifo = fs::read(&ifo_path).map_err(|source| InitError::Io { path: ifo_path, source })?;
        let metadata = Metadata::parse(&String::from_utf8_lossy(&ifo));
        debug!("Dictionary info: {:?}", metadata);

        let idx_path = self.config.idx_path();
        let idx = fs::read(&idx_path).map_err(|source| InitError::Io { path: idx_path, source })?;
        let index = Index::from_bytes(&idx)?;

        if let Some(expected) = metadata.word_count() {
            if expected != index.len() {
                warn!(
                    "Index of {:?} contains {} words, but the metadata announces {}",
                    self.config.base_path(),
                    index.len(),
                    expected
                );
            }
        }

        let reader = self.open_reader()?;

        Ok(Loaded { metadata, index, reader })
    }

    fn open_reader(&self) -> Result<Box<dyn DictReader>, InitError> {
        let path = self.config.dict_path();
        let invalid = |source| InitError::InvalidData { path: path.clone(), source };

        if self.config.dict.ends_with(".dz") {
            let reader = Compressed::new(BufReader::new(open(&path)?)).map_err(invalid)?;
            Ok(Box::new(reader.with_cache(self.config.cache_decompressed)))
        } else if self.config.dict.ends_with(".dict") {
            let reader = Uncompressed::new(BufReader::new(open(&path)?)).map_err(invalid)?;
            Ok(Box::new(reader))
        } else {
            Err(InitError::UnsupportedFormat(path))
        }
    }

    fn loaded(&self) -> Result<&Loaded, DictError> {
        self.loaded.as_ref().ok_or(DictError::NotInitialized)
    }

    pub fn is_initialized(&self) -> bool {
        self.loaded.is_some()
    }

    pub fn config(&self) -> &DictionaryConfig {
        &self.config
    }

    /// Metadata from the `.ifo` file, once initialized.
    pub fn metadata(&self) -> Option<&Metadata> {
        self.loaded.as_ref().map(|l| &l.metadata)
    }

    /// Look up the raw definition of a headword.
    ///
    /// Matching is exact and case-sensitive. A word which is not in the index gives `Ok(None)`;
    /// errors are reserved for uninitialized dictionaries and broken definition data.
    pub fn lookup_exact(&self, word: &str) -> Result<Option<String>, DictError> {
        let loaded = self.loaded()?;

        match loaded.index.find(word) {
            Some(entry) => loaded.reader.fetch_definition(entry.location).map(Some),
            None => Ok(None),
        }
    }

    /// Look up a headword and parse its definition.
    ///
    /// Definitions which do not yield a headword are treated like missing words.
    pub fn lookup(&self, word: &str) -> Result<Option<ParsedDictionaryEntry>, DictError> {
        Ok(self
            .lookup_exact(word)?
            .map(|raw| parse_definition(&raw))
            .filter(|entry| !entry.is_empty()))
    }

    /// Up to `limit` headwords starting with `prefix`, in index order.
    pub fn lookup_prefix(&self, prefix: &str, limit: usize) -> Result<Vec<String>, DictError> {
        let loaded = self.loaded()?;
        Ok(loaded.index.prefixed(prefix, limit).map(String::from).collect())
    }

    /// `count` headwords drawn uniformly at random, with replacement.
    pub fn random_words(&self, count: usize) -> Result<Vec<String>, DictError> {
        let entries = self.loaded()?.index.entries();
        if entries.is_empty() {
            return Ok(Vec::new());
        }

        let mut rng = rand::thread_rng();
        Ok((0..count)
            .map(|_| entries[rng.gen_range(0..entries.len())].headword.clone())
            .collect())
    }

    /// Headwords whose definition contains `term`, ignoring case.
    ///
    /// There is no reverse index: every definition is fetched and scanned in index order until
    /// `limit` matches are found. Expect this to be slow on large dictionaries, especially with
    /// the decompression cache disabled. Definitions which cannot be fetched are skipped.
    pub fn search_definitions(&self, term: &str, limit: usize) -> Result<Vec<String>, DictError> {
        let loaded = self.loaded()?;
        let term = term.to_lowercase();
        let mut results = Vec::new();

        for Entry { headword, location } in loaded.index.entries() {
            if results.len() >= limit {
                break;
            }

            match loaded.reader.fetch_definition(*location) {
                Ok(definition) if definition.to_lowercase().contains(&term) => results.push(headword.clone()),
                Ok(_) => {}
                Err(e) => debug!("Skipping definition of '{}': {}", headword, e),
            }
        }

        Ok(results)
    }

    /// Number of headwords; 0 until initialized.
    pub fn word_count(&self) -> usize {
        self.loaded.as_ref().map_or(0, |l| l.index.len())
    }

    pub fn status(&self) -> DictionaryStatus {
        DictionaryStatus {
            path: self.config.base_path.clone(),
            initialized: self.is_initialized(),
            word_count: self.word_count(),
        }
    }
}

fn open(path: &Path) -> Result<File, InitError> {
    File::open(path).map_err(|source: io::Error| InitError::Io { path: path.to_path_buf(), source })
}
