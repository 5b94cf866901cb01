//! File-system access behind a narrow trait.
//!
//! The cache store and the multipart builder only touch the disk through
//! [`FileSystem`], so tests and embedders can swap the implementation.

use std::fs;
use std::io;
use std::path::Path;

pub trait FileSystem: Send + Sync {
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>>;
    /// Replace the whole file. `mode` is applied on Unix only.
    fn write_file(&self, path: &Path, content: &[u8], mode: u32) -> io::Result<()>;
    /// Create `path` and its parents. Returns `true` if anything was created.
    fn mkdir_all(&self, path: &Path) -> io::Result<bool>;
    fn remove(&self, path: &Path) -> io::Result<()>;
    fn exists(&self, path: &Path) -> bool;
}

/// The local disk. Writes go to a sibling temp file that is renamed over the
/// target, so a failed write never leaves a truncated file behind.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for LocalFs {
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn write_file(&self, path: &Path, content: &[u8], mode: u32) -> io::Result<()> {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => std::path::PathBuf::from("."),
        };
        let tmp_path = parent.join(format!(".tmp.{}.reqcache", uuid::Uuid::new_v4().simple()));

        fs::write(&tmp_path, content)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = fs::set_permissions(&tmp_path, fs::Permissions::from_mode(mode)) {
                let _ = fs::remove_file(&tmp_path);
                return Err(e);
            }
        }
        #[cfg(not(unix))]
        let _ = mode;

        fs::rename(&tmp_path, path).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            e
        })
    }

    fn mkdir_all(&self, path: &Path) -> io::Result<bool> {
        if path.is_dir() {
            return Ok(false);
        }
        fs::create_dir_all(path)?;
        Ok(true)
    }

    fn remove(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
