//! Dictionary locations.
//!
//! A [`DictionaryConfig`] names the three files of a StarDict dictionary relative to a base
//! directory. Hosts usually keep a list of them in a JSON file:
//!
//! ```json
//! [
//!   { "id": "ev", "basePath": "resources/ev", "ifo": "en_vi.ifo", "idx": "en_vi.idx", "dict": "en_vi.dict.dz" },
//!   { "id": "ve", "basePath": "resources/ve", "ifo": "star_vietanh.ifo", "idx": "star_vietanh.idx", "dict": "star_vietanh.dict.dz", "cacheDecompressed": false }
//! ]
//! ```
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

fn default_cache() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryConfig {
    /// Key under which hosts address the dictionary
    #[serde(default)]
    pub id: String,
    pub base_path: PathBuf,
    pub ifo: String,
    pub idx: String,
    /// Either `.dict.dz` (gzip) or plain `.dict`
    pub dict: String,
    /// Keep the inflated `.dict.dz` payload in memory after the first lookup
    #[serde(default = "default_cache")]
    pub cache_decompressed: bool,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            base_path: PathBuf::new(),
            ifo: String::new(),
            idx: String::new(),
            dict: String::new(),
            cache_decompressed: default_cache(),
        }
    }
}

impl DictionaryConfig {
    /// Configuration for `<stem>.ifo`, `<stem>.idx` and `<stem>.dict.dz` in `base_path`.
    pub fn from_stem(id: impl Into<String>, base_path: impl Into<PathBuf>, stem: &str) -> Self {
        Self {
            id: id.into(),
            base_path: base_path.into(),
            ifo: format!("{stem}.ifo"),
            idx: format!("{stem}.idx"),
            dict: format!("{stem}.dict.dz"),
            cache_decompressed: default_cache(),
        }
    }

    pub fn ifo_path(&self) -> PathBuf {
        self.base_path.join(&self.ifo)
    }

    pub fn idx_path(&self) -> PathBuf {
        self.base_path.join(&self.idx)
    }

    pub fn dict_path(&self) -> PathBuf {
        self.base_path.join(&self.dict)
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Read a JSON list of dictionary configurations.
    pub fn load_all<R: Read>(reader: R) -> Result<Vec<Self>, ConfigError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Read a JSON list of dictionary configurations from a file.
    pub fn load_file(path: impl AsRef<Path>) -> Result<Vec<Self>, ConfigError> {
        let file = File::open(path)?;
        Self::load_all(BufReader::new(file))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A wrapped io::Error.
    #[error("Encountered an IO error while reading the configuration.")]
    Io(#[from] io::Error),

    #[error("Invalid dictionary configuration: {0}")]
    Json(#[from] serde_json::Error),
}
