//! On-disk cache of discovered health-check URLs
//!
//! The cache is a single JSON document:
//!
//! ```json
//! {
//!   "lastUpdated": "2024-05-01T12:00:00Z",
//!   "pingURLs": { "queue": "https://queue.example.com/v1/ping" }
//! }
//! ```
//!
//! Writes go through a temporary file in the same directory followed by a
//! rename, so readers never observe a partial record. There is no locking
//! between processes; two concurrent refreshes race and the last rename wins.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use taskcluster_cli_common::{CliError, EndpointMap, Result};
use tempfile::NamedTempFile;
use tracing::debug;

/// A persisted endpoint map and the moment it was computed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheRecord {
    #[serde(rename = "lastUpdated")]
    pub last_updated: DateTime<Utc>,

    #[serde(rename = "pingURLs")]
    pub endpoints: EndpointMap,
}

impl CacheRecord {
    /// Age of the record relative to `now` (zero if `now` precedes it)
    pub fn age_at(&self, now: DateTime<Utc>) -> Duration {
        (now - self.last_updated).to_std().unwrap_or(Duration::ZERO)
    }

    /// A record is expired once it is at least `max_age` old.
    pub fn is_expired_at(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        self.age_at(now) >= max_age
    }

    pub fn is_expired(&self, max_age: Duration) -> bool {
        self.is_expired_at(Utc::now(), max_age)
    }
}

/// Reads and writes the cache file at a fixed path
#[derive(Debug, Clone)]
pub struct CacheStore {
    path: PathBuf,
}

impl CacheStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted record, or `None` if no cache file exists
    pub fn load(&self) -> Result<Option<CacheRecord>> {
        debug!(path = %self.path.display(), "Reading cache file");
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.read_error(e)),
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| self.read_error(e))
    }

    /// Stamp `endpoints` with the current time and persist them, replacing any
    /// existing record. Parent directories are created as needed.
    pub fn save(&self, endpoints: EndpointMap) -> Result<CacheRecord> {
        let record = CacheRecord {
            last_updated: Utc::now(),
            endpoints,
        };
        self.write(&record)?;
        Ok(record)
    }

    /// Persist an already stamped record
    pub fn write(&self, record: &CacheRecord) -> Result<()> {
        debug!(path = %self.path.display(), "Writing cache file");
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let body = serde_json::to_vec_pretty(record)?;
        // NamedTempFile is created owner read/write only.
        let mut file = NamedTempFile::new_in(parent)?;
        file.write_all(&body)?;
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(|e| CliError::Io(e.error))?;
        Ok(())
    }

    /// Remove the cache file. Returns whether a file was removed.
    pub fn clear(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn read_error(&self, err: impl std::fmt::Display) -> CliError {
        CliError::CacheRead {
            path: self.path.clone(),
            message: err.to_string(),
        }
    }
}
