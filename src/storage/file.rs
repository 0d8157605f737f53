//! Backing file for the user collection
//!
//! The collection is stored as one pretty-printed JSON array.
//!
//! Writes are atomic:
//! 1. Write the full collection to `<file>.tmp`
//! 2. fsync the temp file
//! 3. Rename temp over the data file (atomic on POSIX)
//! 4. fsync the parent directory so the rename is durable
//!
//! A reader therefore sees either the previous collection or the new
//! one, never a torn file.
//!
//! A data file that cannot be read back is moved aside to `<file>.corrupt`
//! before the next write replaces it.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::errors::{StoreError, StoreResult};
use super::record::User;

/// The JSON file holding the whole user collection.
///
/// `CollectionFile` does no locking of its own; [`UserStore`](super::UserStore)
/// serializes access to it.
#[derive(Debug, Clone)]
pub struct CollectionFile {
    /// Path to the data file
    path: PathBuf,

    /// Path to the temp file during atomic write
    temp_path: PathBuf,

    /// Where an unreadable data file is moved before being replaced
    quarantine_path: PathBuf,
}

impl CollectionFile {
    /// Create a handle for the given data file. Touches nothing on disk.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let temp_path = sibling(&path, ".tmp");
        let quarantine_path = sibling(&path, ".corrupt");

        Self {
            path,
            temp_path,
            quarantine_path,
        }
    }

    /// Returns the path to the data file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the whole collection.
    ///
    /// A missing or blank file is an empty collection.
    ///
    /// # Errors
    ///
    /// - `Storage` if the file exists but cannot be read
    /// - `Corrupt` if the content is not a user collection
    pub fn load(&self) -> StoreResult<Vec<User>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StoreError::storage(
                    format!("Failed to read data file: {}", self.path.display()),
                    e,
                ))
            }
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content).map_err(|e| StoreError::Corrupt {
            path: self.path.clone(),
            source: e,
        })
    }

    /// Replaces the whole collection atomically.
    ///
    /// On error the previous data file is left as it was.
    pub fn persist(&self, users: &[User]) -> StoreResult<()> {
        // Ensure the data directory exists
        if let Some(parent) = self.parent_dir() {
            fs::create_dir_all(parent).map_err(|e| {
                StoreError::storage(
                    format!("Failed to create data directory: {}", parent.display()),
                    e,
                )
            })?;
        }

        let mut content = serde_json::to_vec_pretty(users).map_err(|e| {
            StoreError::storage(
                "Failed to serialize user collection",
                io::Error::new(io::ErrorKind::InvalidData, e),
            )
        })?;
        content.push(b'\n');

        if let Err(e) = self.write_temp(&content) {
            let _ = fs::remove_file(&self.temp_path);
            return Err(e);
        }

        if let Err(e) = fs::rename(&self.temp_path, &self.path) {
            let _ = fs::remove_file(&self.temp_path);
            return Err(StoreError::storage(
                format!("Failed to replace data file: {}", self.path.display()),
                e,
            ));
        }

        // fsync the directory to ensure rename is durable
        if let Some(parent) = self.parent_dir() {
            if let Ok(dir) = File::open(parent) {
                let _ = dir.sync_all();
            }
        }

        Ok(())
    }

    /// Moves the data file to `<file>.corrupt`, replacing any earlier
    /// quarantined copy, and returns the new location.
    pub fn quarantine(&self) -> StoreResult<&Path> {
        fs::rename(&self.path, &self.quarantine_path).map_err(|e| {
            StoreError::storage(
                format!("Failed to move aside data file: {}", self.path.display()),
                e,
            )
        })?;
        Ok(&self.quarantine_path)
    }

    fn write_temp(&self, content: &[u8]) -> StoreResult<()> {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.temp_path)
            .map_err(|e| {
                StoreError::storage(
                    format!("Failed to create temp file: {}", self.temp_path.display()),
                    e,
                )
            })?;

        file.write_all(content)
            .map_err(|e| StoreError::storage("Failed to write user collection", e))?;

        // fsync before the rename makes the new content visible
        file.sync_all()
            .map_err(|e| StoreError::storage("fsync failed after writing user collection", e))
    }

    fn parent_dir(&self) -> Option<&Path> {
        self.path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
    }
}

/// `<dir>/<name><suffix>` next to the data file
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| OsString::from("users.json"));
    name.push(suffix);
    path.with_file_name(name)
}
