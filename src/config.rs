use std::env;
use std::path::PathBuf;

/// Directory holding uploaded images and their sidecar text files.
pub const STORE_DIR: &str = "db";

/// Directory scanned by the static snapshot generator and used as the
/// second candidate location when serving images.
pub const EXPORT_DIR: &str = "public/db";

/// Output path for the pre-rendered posts snapshot.
pub const SNAPSHOT_PATH: &str = "public/posts.json";

pub const BIND_ADDR: &str = "127.0.0.1:3000";

pub fn store_dir() -> PathBuf {
    env::var("STORE_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(STORE_DIR))
}

pub fn export_dir() -> PathBuf {
    env::var("EXPORT_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(EXPORT_DIR))
}

pub fn snapshot_path() -> PathBuf {
    env::var("SNAPSHOT_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(SNAPSHOT_PATH))
}

pub fn bind_addr() -> String {
    env::var("BIND_ADDR").unwrap_or_else(|_| BIND_ADDR.to_string())
}
