//! Raw byte persistence underneath the JSON feed store

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

/// A single location that can hold a blob of bytes
pub trait ByteStore: Send + Sync + 'static {
    /// Reads the whole blob; a missing blob is `Ok(None)`, not an error.
    fn read(&self) -> io::Result<Option<Vec<u8>>>;

    /// Replaces the blob atomically: readers see the old or the new bytes,
    /// never a partial write.
    fn write(&self, bytes: &[u8]) -> io::Result<()>;

    /// Removes the blob; removing a missing blob succeeds.
    fn remove(&self) -> io::Result<()>;
}

/// `ByteStore` backed by one file on disk
#[derive(Debug, Clone)]
pub struct FileByteStore {
    path: PathBuf,
}

impl FileByteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Sibling of the store file named `<file name>.tmp`, never the store file itself
    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|name| name.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ByteStore for FileByteStore {
    fn read(&self) -> io::Result<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error),
        }
    }

    fn write(&self, bytes: &[u8]) -> io::Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write atomically via temp file
        let temp_path = self.temp_path();
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        drop(file);

        if let Err(error) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(error);
        }
        Ok(())
    }

    fn remove(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error),
        }
    }
}
