//! A set of independently owned dictionaries, addressed by id.
//!
//! This is the interface a host (desktop shell, server, ...) talks to. Failures stay inside:
//! a lookup that fails for any reason answers like a missing word, and initialization errors are
//! reported once by [`Library::initialize_all`].
use log::{debug, warn};
use std::collections::BTreeMap;
use std::path::Path;

use crate::{ConfigError, DictError, DictionaryConfig, DictionaryStatus, InitError, ParsedDictionaryEntry, StarDict};

#[derive(Default)]
pub struct Library {
    dictionaries: BTreeMap<String, StarDict>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one uninitialized dictionary per configuration, keyed by its `id`.
    pub fn from_configs(configs: impl IntoIterator<Item = DictionaryConfig>) -> Self {
        let mut library = Self::new();
        for config in configs {
            library.insert(config.id.clone(), StarDict::new(config));
        }

        library
    }

    /// Register the dictionaries listed in a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Ok(Self::from_configs(DictionaryConfig::load_file(path)?))
    }

    /// Add a dictionary, replacing any previous one with the same id.
    pub fn insert(&mut self, id: impl Into<String>, dict: StarDict) -> Option<StarDict> {
        self.dictionaries.insert(id.into(), dict)
    }

    pub fn get(&self, id: &str) -> Option<&StarDict> {
        self.dictionaries.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.dictionaries.keys().map(String::as_str)
    }

    /// Initialize every dictionary which is not ready yet.
    ///
    /// Dictionaries that fail stay registered and report themselves as uninitialized.
    pub fn initialize_all(&mut self) -> Vec<(String, InitError)> {
        let mut failures = Vec::new();

        for (id, dict) in self.dictionaries.iter_mut().filter(|(_, d)| !d.is_initialized()) {
            if let Err(e) = dict.initialize() {
                failures.push((id.clone(), e));
            }
        }

        failures
    }

    /// Look up and parse a headword; `None` if the word is missing or nothing usable was parsed.
    pub fn lookup(&self, word: &str, id: &str) -> Option<ParsedDictionaryEntry> {
        let dict = self.dictionary(id)?;

        match dict.lookup(word) {
            Ok(entry) => entry,
            Err(DictError::NotInitialized) => {
                debug!("Lookup of '{}' skipped, dictionary '{}' is not initialized", word, id);
                None
            }
            Err(e) => {
                warn!("Lookup of '{}' in dictionary '{}' failed: {}", word, id, e);
                None
            }
        }
    }

    /// Headwords starting with `prefix`.
    pub fn similar(&self, prefix: &str, id: &str, limit: usize) -> Vec<String> {
        let Some(dict) = self.dictionary(id) else { return Vec::new() };

        match dict.lookup_prefix(prefix, limit) {
            Ok(words) => words,
            Err(DictError::NotInitialized) => {
                debug!("Prefix search for '{}' skipped, dictionary '{}' is not initialized", prefix, id);
                Vec::new()
            }
            Err(e) => {
                warn!("Prefix search for '{}' in dictionary '{}' failed: {}", prefix, id, e);
                Vec::new()
            }
        }
    }

    pub fn status(&self, id: &str) -> Option<DictionaryStatus> {
        self.get(id).map(StarDict::status)
    }

    /// Status of every dictionary, ordered by id.
    pub fn statuses(&self) -> Vec<(String, DictionaryStatus)> {
        self.dictionaries
            .iter()
            .map(|(id, dict)| (id.clone(), dict.status()))
            .collect()
    }

    fn dictionary(&self, id: &str) -> Option<&StarDict> {
        let dict = self.get(id);
        if dict.is_none() {
            debug!("Unknown dictionary '{}'", id);
        }

        dict
    }
}
