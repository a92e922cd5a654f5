//! Atomic JSON file operations.
//!
//! Provides a thin layer for safe access to the settings file shared by all
//! sessions.

use fs2::FileExt;
use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use pagescript_core::PageScriptError;

/// Errors that can occur during atomic JSON operations.
#[derive(Debug)]
pub enum AtomicJsonError {
    /// File I/O error.
    IoError(std::io::Error),
    /// JSON serialization/deserialization error.
    JsonError(serde_json::Error),
    /// File locking error.
    LockError(String),
}

impl std::fmt::Display for AtomicJsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AtomicJsonError::IoError(e) => write!(f, "I/O error: {}", e),
            AtomicJsonError::JsonError(e) => write!(f, "JSON error: {}", e),
            AtomicJsonError::LockError(e) => write!(f, "Lock error: {}", e),
        }
    }
}

impl std::error::Error for AtomicJsonError {}

impl From<std::io::Error> for AtomicJsonError {
    fn from(e: std::io::Error) -> Self {
        AtomicJsonError::IoError(e)
    }
}

impl From<serde_json::Error> for AtomicJsonError {
    fn from(e: serde_json::Error) -> Self {
        AtomicJsonError::JsonError(e)
    }
}

impl From<AtomicJsonError> for PageScriptError {
    fn from(e: AtomicJsonError) -> Self {
        match e {
            AtomicJsonError::IoError(err) => err.into(),
            AtomicJsonError::JsonError(err) => err.into(),
            AtomicJsonError::LockError(msg) => PageScriptError::io(msg),
        }
    }
}

/// A handle to a JSON file written atomically.
///
/// - **Atomicity**: Updates are all-or-nothing via tmp file + atomic rename
/// - **Isolation**: `update` holds an exclusive lock for read-modify-write
/// - **Durability**: Explicit fsync before rename
pub struct AtomicJsonFile<T> {
    path: PathBuf,
    _phantom: PhantomData<T>,
}

impl<T> AtomicJsonFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and deserializes the file.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: Successfully loaded and deserialized
    /// - `Ok(None)`: File doesn't exist or is empty
    /// - `Err`: Failed to read or parse the file
    pub fn load(&self) -> Result<Option<T>, AtomicJsonError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;

        if content.trim().is_empty() {
            return Ok(None);
        }

        let data: T = serde_json::from_str(&content)?;
        Ok(Some(data))
    }

    /// Saves data to the file atomically.
    ///
    /// Writes go to a uniquely named temp file in the target directory, which
    /// is fsynced and then renamed over the target.
    pub fn save(&self, data: &T) -> Result<(), AtomicJsonError> {
        let parent = self.parent_dir()?;
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }

        let json_string = serde_json::to_string_pretty(data)?;

        let mut tmp_file = NamedTempFile::new_in(parent)?;
        tmp_file.write_all(json_string.as_bytes())?;
        tmp_file.as_file().sync_all()?;

        tmp_file
            .persist(&self.path)
            .map_err(|e| AtomicJsonError::IoError(e.error))?;

        Ok(())
    }

    /// Performs a locked read-modify-write.
    ///
    /// A missing, empty or unparseable file is replaced by `default_value`
    /// before `f` runs, so a corrupt file heals on the next write.
    pub fn update<F>(&self, default_value: T, f: F) -> Result<(), AtomicJsonError>
    where
        F: FnOnce(&mut T) -> Result<(), AtomicJsonError>,
    {
        let _lock = FileLock::acquire(&self.path)?;

        let mut data = match self.load() {
            Ok(Some(data)) => data,
            Ok(None) => default_value,
            Err(AtomicJsonError::JsonError(e)) => {
                tracing::warn!(
                    "[AtomicJsonFile] Replacing unparseable file {:?}: {}",
                    self.path,
                    e
                );
                default_value
            }
            Err(e) => return Err(e),
        };

        f(&mut data)?;

        self.save(&data)?;

        Ok(())
    }

    fn parent_dir(&self) -> Result<&Path, AtomicJsonError> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => Ok(parent),
            Some(_) => Ok(Path::new(".")),
            None => Err(AtomicJsonError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path has no parent directory",
            ))),
        }
    }
}

/// Exclusive lock guard, released on drop.
///
/// The lock file stays on disk so every writer locks the same inode.
struct FileLock {
    file: File,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self, AtomicJsonError> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        file.lock_exclusive()
            .map_err(|e| AtomicJsonError::LockError(format!("Failed to acquire lock: {}", e)))?;

        Ok(FileLock { file })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            tracing::warn!("[AtomicJsonFile] Failed to release lock: {}", e);
        }
    }
}
