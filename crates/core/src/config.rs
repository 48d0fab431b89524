//! Usage History Store
//!
//! Persists the "last opened" timestamp of every device emus has launched.
//! The document lives in the per-user configuration directory:
//!
//! ```toml
//! version = 1
//!
//! [last_opened_by_id]
//! Pixel_5 = "2026-10-17T09:12:44.102Z"
//! iOS_Simulator = "2026-10-16T18:03:10.551Z"
//! ```
//!
//! Entries are never evicted. Writes replace the whole file atomically, so
//! two emus processes racing on the same document resolve last-writer-wins
//! and neither can leave a half-written file behind.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use directories::ProjectDirs;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{EmusError, Result};

/// Namespace of the persisted configuration
pub const PROJECT_NAME: &str = "emus";

/// Overrides the configuration directory when set
pub const CONFIG_DIR_ENV: &str = "EMUS_CONFIG_DIR";

const CONFIG_FILE: &str = "config.toml";
const CONFIG_VERSION: u32 = 1;

/// Current time as an ISO-8601 UTC timestamp with millisecond precision.
///
/// The fixed width and `Z` suffix keep lexicographic order equal to
/// chronological order, which ranking relies on.
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Snapshot of the persisted id -> last-opened mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsageHistory {
    /// Document version for migrations
    pub version: u32,
    last_opened_by_id: BTreeMap<String, String>,
}

impl Default for UsageHistory {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            last_opened_by_id: BTreeMap::new(),
        }
    }
}

impl UsageHistory {
    pub fn last_opened(&self, id: &str) -> Option<&str> {
        self.last_opened_by_id.get(id).map(String::as_str)
    }

    /// Insert or overwrite the entry for `id`, leaving every other entry alone.
    pub fn record(&mut self, id: &str, timestamp: &str) {
        self.last_opened_by_id
            .insert(id.to_string(), timestamp.to_string());
    }

    pub fn len(&self) -> usize {
        self.last_opened_by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_opened_by_id.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.last_opened_by_id
            .iter()
            .map(|(id, ts)| (id.as_str(), ts.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for UsageHistory {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            version: CONFIG_VERSION,
            last_opened_by_id: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Read/write access to usage history.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Load the full mapping. Reading never modifies the store.
    async fn load(&self) -> Result<UsageHistory>;

    /// Last-opened timestamp for one device id
    async fn get_last_opened(&self, id: &str) -> Result<Option<String>> {
        Ok(self.load().await?.last_opened(id).map(str::to_owned))
    }

    /// Read-modify-write of a single entry
    async fn record_opened(&self, id: &str, timestamp: &str) -> Result<()>;
}

/// History persisted as a TOML document on disk
#[derive(Debug, Clone)]
pub struct FileHistoryStore {
    path: PathBuf,
}

impl FileHistoryStore {
    /// Store backed by an explicit file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in the default per-user location, honoring `EMUS_CONFIG_DIR`.
    pub fn locate() -> Result<Self> {
        let dir = Self::config_dir(std::env::var_os(CONFIG_DIR_ENV))?;
        Ok(Self::new(dir.join(CONFIG_FILE)))
    }

    /// Get the configuration directory path
    pub fn config_dir(override_dir: Option<OsString>) -> Result<PathBuf> {
        if let Some(dir) = override_dir.filter(|d| !d.is_empty()) {
            return Ok(PathBuf::from(dir));
        }
        ProjectDirs::from("", "", PROJECT_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or_else(|| EmusError::Config("Cannot determine config path".into()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn write(&self, history: &UsageHistory) -> Result<()> {
        let contents = toml::to_string_pretty(history)?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        tokio::fs::create_dir_all(&dir).await?;

        let path = self.path.clone();
        tokio::task::spawn_blocking(move || -> Result<()> {
            // Temp file in the same directory so the rename stays atomic
            let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
            tmp.write_all(contents.as_bytes())?;
            tmp.flush()?;
            tmp.persist(&path).map_err(|e| EmusError::Io(e.error))?;
            Ok(())
        })
        .await
        .map_err(|e| EmusError::Config(format!("history writer panicked: {}", e)))??;

        debug!("Usage history saved to {:?}", self.path);
        Ok(())
    }
}

#[async_trait]
impl HistoryStore for FileHistoryStore {
    async fn load(&self) -> Result<UsageHistory> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No usage history at {:?}", self.path);
                return Ok(UsageHistory::default());
            }
            Err(e) => return Err(e.into()),
        };

        match toml::from_str::<UsageHistory>(&contents) {
            Ok(history) => {
                debug!("Loaded {} history entries from {:?}", history.len(), self.path);
                Ok(history)
            }
            Err(e) => {
                warn!("Ignoring unreadable usage history {:?}: {}", self.path, e);
                Ok(UsageHistory::default())
            }
        }
    }

    async fn record_opened(&self, id: &str, timestamp: &str) -> Result<()> {
        let mut history = self.load().await?;
        history.record(id, timestamp);
        self.write(&history).await?;
        info!("Recorded {} as opened at {}", id, timestamp);
        Ok(())
    }
}

/// History kept in memory for the lifetime of the process
#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    history: Mutex<UsageHistory>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history(history: UsageHistory) -> Self {
        Self {
            history: Mutex::new(history),
        }
    }

    /// Copy of the current contents
    pub fn snapshot(&self) -> UsageHistory {
        self.history.lock().clone()
    }
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn load(&self) -> Result<UsageHistory> {
        Ok(self.snapshot())
    }

    async fn record_opened(&self, id: &str, timestamp: &str) -> Result<()> {
        self.history.lock().record(id, timestamp);
        Ok(())
    }
}
