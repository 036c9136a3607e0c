//! Runtime configuration: where the cache lives

use std::path::PathBuf;

use directories::ProjectDirs;

/// File name of the cache record inside the cache directory
pub const STORE_FILE_NAME: &str = "feed-store.json";

/// Returns the XDG-compliant cache directory (`~/.cache/feedcache/` on Linux)
///
/// Returns `None` if the directory cannot be determined (e.g., no home directory).
fn default_cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "feedcache").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Settings needed to build the feed loaders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedConfig {
    /// File holding the cached feed
    pub store_path: PathBuf,
}

impl FeedConfig {
    /// Creates a config storing the cache in the default cache directory
    pub fn new() -> Option<Self> {
        default_cache_dir().map(|dir| Self::with_store_path(dir.join(STORE_FILE_NAME)))
    }

    /// Creates a config storing the cache at `store_path`
    pub fn with_store_path(store_path: impl Into<PathBuf>) -> Self {
        Self {
            store_path: store_path.into(),
        }
    }
}
