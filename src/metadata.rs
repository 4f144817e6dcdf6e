//! Dictionary metadata from the `.ifo` file.
use std::collections::HashMap;

/// The `key=value` pairs of an `.ifo` file.
///
/// No key is required. Accessors for the well-known StarDict keys return `None` when a key is
/// missing or its value cannot be interpreted.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Metadata {
    entries: HashMap<String, String>,
}

impl Metadata {
    /// Parse the text of an `.ifo` file.
    ///
    /// Every line is split at its first `=`; key and value are trimmed. Lines without `=`, such as
    /// the `StarDict's dict ifo file` magic line, and lines with an empty key or value are skipped.
    pub fn parse(text: &str) -> Self {
        let entries = text
            .lines()
            .filter_map(|line| line.split_once('='))
            .map(|(key, value)| (key.trim(), value.trim()))
            .filter(|(key, value)| !key.is_empty() && !value.is_empty())
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();

        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Format version, e.g. `2.4.2` or `3.0.0`.
    pub fn version(&self) -> Option<&str> {
        self.get("version")
    }

    /// Human readable dictionary name.
    pub fn bookname(&self) -> Option<&str> {
        self.get("bookname")
    }

    /// Number of headwords the `.idx` file is supposed to contain.
    pub fn word_count(&self) -> Option<usize> {
        self.get("wordcount").and_then(|v| v.parse().ok())
    }

    /// Size of the `.idx` file in bytes.
    pub fn idx_file_size(&self) -> Option<u64> {
        self.get("idxfilesize").and_then(|v| v.parse().ok())
    }

    pub fn same_type_sequence(&self) -> Option<&str> {
        self.get("sametypesequence")
    }

    pub fn author(&self) -> Option<&str> {
        self.get("author")
    }

    pub fn description(&self) -> Option<&str> {
        self.get("description")
    }
}
