//! Cache store behaviour against real and in-memory file systems.

use reqcache::cache::{CacheLookup, CacheStore, Fingerprint};
use reqcache::utils::{now_unix, FileSystem};
use reqcache::{Error, RequestConfig, ResponseRecord};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

fn sample_record(ttl: i64) -> ResponseRecord {
    let mut record = ResponseRecord {
        source_url: "https://example.com/data".to_string(),
        method: "GET".to_string(),
        elapsed_millis: 42,
        status_code: 200,
        body: b"{\"ok\":true}".to_vec(),
        created_at_unix: now_unix(),
        cache_ttl_seconds: ttl,
        ..Default::default()
    };
    record
        .headers
        .insert("Content-Type".to_string(), "application/json".to_string());
    record
}

fn fingerprint() -> Fingerprint {
    RequestConfig::get("https://example.com/data").fingerprint()
}

#[test]
fn test_put_then_get_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let store = CacheStore::new(dir.path().join("http-cache"));
    let record = sample_record(3600);

    store.put(&fingerprint(), &record).unwrap();
    let hit = store.get(&fingerprint()).unwrap().into_hit().expect("cache hit");

    assert!(hit.served_from_cache);
    assert!(!record.served_from_cache);
    assert_eq!(
        hit,
        ResponseRecord {
            served_from_cache: true,
            ..record
        }
    );
}

#[test]
fn test_entry_file_layout() {
    let dir = tempfile::tempdir().unwrap();
    let store = CacheStore::new(dir.path());
    let fp = fingerprint();
    store.put(&fp, &sample_record(60)).unwrap();

    let path = dir.path().join(format!("{}.json", fp));
    assert_eq!(store.path_for(&fp), path);

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("{\n  \""), "expected 2-space indented JSON: {text}");
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["status_code"], 200);
    assert_eq!(json["served_from_cache"], false);
}

#[test]
fn test_zero_ttl_is_expired_on_next_get() {
    let dir = tempfile::tempdir().unwrap();
    let store = CacheStore::new(dir.path());
    let fp = fingerprint();

    store.put(&fp, &sample_record(0)).unwrap();
    assert_eq!(store.get(&fp).unwrap(), CacheLookup::Expired);
    assert!(!store.path_for(&fp).exists());
    assert_eq!(store.get(&fp).unwrap(), CacheLookup::Miss);
}

#[test]
fn test_entry_expires_after_ttl() {
    let dir = tempfile::tempdir().unwrap();
    let store = CacheStore::new(dir.path());
    let fp = fingerprint();
    let record = sample_record(10);
    let created = record.created_at_unix;

    store.put(&fp, &record).unwrap();
    assert!(store.get_at(&fp, created + 9).unwrap().is_hit());
    assert_eq!(store.get_at(&fp, created + 10).unwrap(), CacheLookup::Expired);
}

#[test]
fn test_missing_entry_is_a_miss() {
    let dir = tempfile::tempdir().unwrap();
    let store = CacheStore::new(dir.path().join("never-created"));
    assert_eq!(store.get(&fingerprint()).unwrap(), CacheLookup::Miss);
    assert!(!store.delete(&fingerprint()).unwrap());
}

#[test]
fn test_corrupt_entry_is_a_serialization_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = CacheStore::new(dir.path());
    let fp = fingerprint();
    std::fs::write(store.path_for(&fp), b"{ not json").unwrap();

    assert!(matches!(store.get(&fp), Err(Error::Serialization(_))));
}

#[test]
fn test_delete_removes_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = CacheStore::new(dir.path());
    let fp = fingerprint();
    store.put(&fp, &sample_record(60)).unwrap();

    assert!(store.delete(&fp).unwrap());
    assert!(!store.path_for(&fp).exists());
}

#[test]
fn test_last_put_wins() {
    let dir = tempfile::tempdir().unwrap();
    let store = CacheStore::new(dir.path());
    let fp = fingerprint();

    store.put(&fp, &sample_record(60)).unwrap();
    let mut newer = sample_record(60);
    newer.status_code = 201;
    store.put(&fp, &newer).unwrap();

    assert_eq!(store.get(&fp).unwrap().into_hit().unwrap().status_code, 201);
}

#[derive(Default)]
struct MemoryFs {
    files: Mutex<HashMap<PathBuf, Vec<u8>>>,
    dirs: Mutex<Vec<PathBuf>>,
}

impl FileSystem for MemoryFs {
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
    }

    fn write_file(&self, path: &Path, content: &[u8], _mode: u32) -> io::Result<()> {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_vec());
        Ok(())
    }

    fn mkdir_all(&self, path: &Path) -> io::Result<bool> {
        let mut dirs = self.dirs.lock().unwrap();
        if dirs.iter().any(|d| d == path) {
            return Ok(false);
        }
        dirs.push(path.to_path_buf());
        Ok(true)
    }

    fn remove(&self, path: &Path) -> io::Result<()> {
        self.files
            .lock()
            .unwrap()
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }
}

#[test]
fn test_store_only_uses_the_file_system_trait() {
    let fs = Arc::new(MemoryFs::default());
    let store = CacheStore::with_fs("/virtual/cache", fs.clone());
    let fp = fingerprint();

    store.put(&fp, &sample_record(60)).unwrap();
    store.put(&fp, &sample_record(60)).unwrap();
    assert_eq!(fs.dirs.lock().unwrap().len(), 1);
    assert!(fs.exists(&PathBuf::from("/virtual/cache").join(format!("{fp}.json"))));
    assert!(store.get(&fp).unwrap().is_hit());

    store.put(&fp, &sample_record(0)).unwrap();
    assert_eq!(store.get(&fp).unwrap(), CacheLookup::Expired);
    assert!(fs.files.lock().unwrap().is_empty());
}
