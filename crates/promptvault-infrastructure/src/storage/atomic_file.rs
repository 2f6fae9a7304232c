//! Atomic file-backed key-value storage.
//!
//! Each key maps to one JSON document under the base directory. Writes go
//! through a temporary file with an explicit fsync and an atomic rename;
//! an advisory lock serializes writers on the same key.

use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use promptvault_core::error::{Result, VaultError};

use super::KeyValueStorage;
use crate::paths::VaultPaths;

/// File-per-key storage with atomic replace semantics.
pub struct AtomicFileStorage {
    base_dir: PathBuf,
}

impl AtomicFileStorage {
    /// Creates a storage rooted at `base_dir`.
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Creates a storage rooted at the app data directory.
    pub fn in_data_dir() -> Result<Self> {
        Ok(Self::new(VaultPaths::store_dir()?))
    }

    fn file_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{key}.json"))
    }

    fn temp_path(path: &Path) -> Result<PathBuf> {
        let parent = path
            .parent()
            .ok_or_else(|| VaultError::io("path has no parent directory"))?;
        let file_name = path
            .file_name()
            .ok_or_else(|| VaultError::io("path has no file name"))?;
        Ok(parent.join(format!(".{}.tmp", file_name.to_string_lossy())))
    }

    fn write_atomic(path: &Path, value: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let _lock = FileLock::acquire(path)?;

        let tmp_path = Self::temp_path(path)?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(value.as_bytes())?;

        // Ensure data is on disk before the rename makes it visible
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, path)?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStorage for AtomicFileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.file_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| VaultError::io(format!("failed to read {}: {e}", path.display())))?;

        if content.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(content))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.file_path(key);
        Self::write_atomic(&path, value)
            .map_err(|e| VaultError::io(format!("failed to write {}: {e}", path.display())))
    }
}

/// A lock guard that releases its advisory lock when dropped.
struct FileLock {
    #[allow(dead_code)]
    file: File,
    lock_path: PathBuf,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive()
                .map_err(|e| VaultError::io(format!("failed to acquire lock: {e}")))?;
        }

        #[cfg(not(unix))]
        {
            // No advisory locking off-unix; acceptable for a single-user
            // desktop deployment.
        }

        Ok(FileLock { file, lock_path })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // Unlock is automatic when the handle drops; removing the lock file
        // is best effort.
        let _ = fs::remove_file(&self.lock_path);
    }
}
