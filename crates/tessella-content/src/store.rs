//! Key-value storage for the portfolio document.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::content::PortfolioContent;

/// Key the portfolio document is stored under.
pub const CONTENT_KEY: &str = "portfolio_content";

/// Store file name inside the data directory.
const STORE_FILE: &str = "storage.json";

/// Errors raised by the content stores.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("no data directory available on this platform")]
    NoDataDir,

    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// String values under string keys, like browser local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<(), ContentError>;
    fn remove(&mut self, key: &str) -> Result<(), ContentError>;
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), ContentError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), ContentError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Store persisted as one JSON object in a file. Every write replaces the
/// file through a temporary sibling.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Default store location in the platform data directory.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "tessella").map(|dirs| dirs.data_dir().join(STORE_FILE))
    }

    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ContentError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(ContentError::Io { path, source }),
        };
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), ContentError> {
        let io_err = |source| ContentError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let text = serde_json::to_string_pretty(&self.entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, text).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), ContentError> {
        self.entries.insert(key.to_string(), value);
        self.persist()
    }

    fn remove(&mut self, key: &str) -> Result<(), ContentError> {
        if self.entries.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }
}

/// Reads and writes the portfolio document through a key-value store.
#[derive(Debug, Clone)]
pub struct ContentStore<S> {
    store: S,
}

impl<S: KeyValueStore> ContentStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn inner(&self) -> &S {
        &self.store
    }

    /// The stored document, `None` if nothing has been saved yet.
    pub fn try_load(&self) -> Result<Option<PortfolioContent>, ContentError> {
        self.store
            .get(CONTENT_KEY)
            .map(|text| serde_json::from_str(&text))
            .transpose()
            .map_err(ContentError::from)
    }

    /// The stored document, or the default content if it is missing or malformed.
    pub fn load(&self) -> PortfolioContent {
        match self.try_load() {
            Ok(Some(content)) => content,
            Ok(None) => PortfolioContent::default(),
            Err(err) => {
                tracing::warn!(%err, "stored content unreadable, using defaults");
                PortfolioContent::default()
            }
        }
    }

    pub fn save(&mut self, content: &PortfolioContent) -> Result<(), ContentError> {
        let text = serde_json::to_string(content)?;
        self.store.set(CONTENT_KEY, text)
    }

    /// Forget the stored document; the next load returns the defaults.
    pub fn reset(&mut self) -> Result<(), ContentError> {
        self.store.remove(CONTENT_KEY)
    }
}
