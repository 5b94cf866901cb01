//! Small collaborators shared by the cache and the multipart builder.

pub mod fs;

pub use fs::{FileSystem, LocalFs};

/// Current wall-clock time in whole seconds since the Unix epoch.
pub fn now_unix() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
