//! File-backed response cache.

use super::key::Fingerprint;
use crate::types::ResponseRecord;
use crate::utils::{now_unix, FileSystem, LocalFs};
use crate::Result;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Cache directory used when nothing else is configured.
pub const DEFAULT_CACHE_DIR: &str = "http-cache";

const FILE_MODE: u32 = 0o644;

/// Outcome of a cache read.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheLookup {
    /// Fresh entry, `served_from_cache` already set.
    Hit(ResponseRecord),
    /// No entry for this fingerprint.
    Miss,
    /// The entry outlived its TTL and has been removed.
    Expired,
}

impl CacheLookup {
    pub fn into_hit(self) -> Option<ResponseRecord> {
        match self {
            CacheLookup::Hit(record) => Some(record),
            _ => None,
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, CacheLookup::Hit(_))
    }
}

/// One JSON file per fingerprint under a root directory.
///
/// There is no locking: two writers for the same fingerprint race and the
/// last rename wins.
#[derive(Clone)]
pub struct CacheStore {
    root: PathBuf,
    fs: Arc<dyn FileSystem>,
}

impl std::fmt::Debug for CacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheStore").field("root", &self.root).finish()
    }
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_DIR)
    }
}

impl CacheStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_fs(root, Arc::new(LocalFs::new()))
    }

    pub fn with_fs(root: impl Into<PathBuf>, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            root: root.into(),
            fs,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, fingerprint: &Fingerprint) -> PathBuf {
        self.root.join(format!("{}.json", fingerprint.as_str()))
    }

    pub fn put(&self, fingerprint: &Fingerprint, record: &ResponseRecord) -> Result<()> {
        self.fs.mkdir_all(&self.root)?;
        let data = serde_json::to_vec_pretty(record)?;
        let path = self.path_for(fingerprint);
        self.fs.write_file(&path, &data, FILE_MODE)?;
        debug!(path = %path.display(), bytes = data.len(), "cache entry written");
        Ok(())
    }

    pub fn get(&self, fingerprint: &Fingerprint) -> Result<CacheLookup> {
        self.get_at(fingerprint, now_unix())
    }

    /// Same as [`CacheStore::get`] with an explicit clock.
    pub fn get_at(&self, fingerprint: &Fingerprint, now: i64) -> Result<CacheLookup> {
        let path = self.path_for(fingerprint);
        let data = match self.fs.read_file(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(CacheLookup::Miss),
            Err(e) => return Err(e.into()),
        };

        let mut record: ResponseRecord = serde_json::from_slice(&data)?;
        if record.is_expired_at(now) {
            match self.fs.remove(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
            debug!(path = %path.display(), "cache entry expired");
            return Ok(CacheLookup::Expired);
        }

        record.served_from_cache = true;
        Ok(CacheLookup::Hit(record))
    }

    /// Remove an entry. Returns `false` if there was nothing to remove.
    pub fn delete(&self, fingerprint: &Fingerprint) -> Result<bool> {
        let path = self.path_for(fingerprint);
        if !self.fs.exists(&path) {
            return Ok(false);
        }
        match self.fs.remove(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
