//! Flat-file image store keyed by URL.

use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, trace, warn};

use crate::domain::entities::ImageSize;
use crate::domain::errors::StoreError;

use super::path_mapper::cache_file_name;

/// Directory name used under the platform temp dir.
pub const DEFAULT_CACHE_DIR_NAME: &str = "lazyimage";

/// Disk store that keeps one file per (URL, size) slot.
///
/// No index is kept: a file existing at a slot's path is the only state.
#[derive(Debug, Clone)]
pub struct DiskImageStore {
    cache_dir: PathBuf,
}

impl DiskImageStore {
    /// Creates a store in the specified directory.
    ///
    /// # Errors
    /// Returns error if the directory cannot be created.
    pub async fn new(cache_dir: PathBuf) -> Result<Self, StoreError> {
        fs::create_dir_all(&cache_dir)
            .await
            .map_err(|e| StoreError::io("create cache dir", &cache_dir, e))?;
        Ok(Self { cache_dir })
    }

    /// Creates a store in the default location (`<temp dir>/lazyimage`).
    ///
    /// # Errors
    /// Returns error if the directory cannot be created.
    pub async fn default_location() -> Result<Self, StoreError> {
        Self::new(default_cache_dir()).await
    }

    /// Returns the cache directory.
    #[must_use]
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Returns the slot path for a URL and optional cache size.
    #[must_use]
    pub fn path_for(&self, url: &str, size: Option<ImageSize>) -> PathBuf {
        self.cache_dir.join(cache_file_name(url, size))
    }

    /// Checks if a file is stored at `path`.
    pub async fn exists(&self, path: &Path) -> bool {
        fs::metadata(path).await.is_ok_and(|meta| meta.is_file())
    }

    /// Reads the bytes stored at `path`.
    pub async fn get_bytes(&self, path: &Path) -> Option<Vec<u8>> {
        match fs::read(path).await {
            Ok(bytes) => {
                trace!(path = %path.display(), size = bytes.len(), "Disk cache hit");
                Some(bytes)
            }
            Err(e) => {
                trace!(path = %path.display(), error = %e, "Disk cache miss");
                None
            }
        }
    }

    /// Writes bytes at `path`, replacing any previous content.
    ///
    /// # Errors
    /// Returns error if the file cannot be created or written.
    pub async fn put_bytes(&self, path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
        let mut file = fs::File::create(path)
            .await
            .map_err(|e| StoreError::io("create", path, e))?;

        file.write_all(bytes)
            .await
            .map_err(|e| StoreError::io("write", path, e))?;

        file.flush()
            .await
            .map_err(|e| StoreError::io("flush", path, e))?;

        debug!(path = %path.display(), size = bytes.len(), "Stored image in disk cache");
        Ok(())
    }

    /// Removes the file at `path`. Missing files are ignored, other failures logged.
    pub async fn remove(&self, path: &Path) {
        match fs::remove_file(path).await {
            Ok(()) => debug!(path = %path.display(), "Removed from disk cache"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %path.display(), error = %e, "Failed to remove cache file"),
        }
    }

    /// Removes every file in the cache directory.
    ///
    /// # Errors
    /// Returns error if the cache directory cannot be read.
    pub async fn clear(&self) -> Result<(), StoreError> {
        let mut entries = fs::read_dir(&self.cache_dir)
            .await
            .map_err(|e| StoreError::io("read cache dir", &self.cache_dir, e))?;

        let mut removed = 0usize;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StoreError::io("read entry in", &self.cache_dir, e))?
        {
            let path = entry.path();
            if !entry.file_type().await.is_ok_and(|t| t.is_file()) {
                continue;
            }
            if let Err(e) = fs::remove_file(&path).await {
                warn!(path = %path.display(), error = %e, "Failed to remove cache file");
            } else {
                removed += 1;
            }
        }
        debug!(removed = removed, "Cleared disk cache");
        Ok(())
    }

    /// Returns the number of stored files.
    pub async fn len(&self) -> usize {
        let Ok(mut entries) = fs::read_dir(&self.cache_dir).await else {
            return 0;
        };
        let mut count = 0;
        while let Ok(Some(entry)) = entries.next_entry().await {
            if entry.file_type().await.is_ok_and(|t| t.is_file()) {
                count += 1;
            }
        }
        count
    }

    /// Returns true if the store holds no files.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Returns the default cache directory path.
#[must_use]
pub fn default_cache_dir() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_CACHE_DIR_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn create_test_store() -> (DiskImageStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = DiskImageStore::new(temp_dir.path().join("images"))
            .await
            .unwrap();
        (store, temp_dir)
    }

    #[tokio::test]
    async fn test_new_creates_directory() {
        let (store, _temp) = create_test_store().await;
        assert!(store.cache_dir().is_dir());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_put_and_get_bytes() {
        let (store, _temp) = create_test_store().await;
        let path = store.path_for("https://example.com/a.png", None);

        store.put_bytes(&path, b"test image data").await.unwrap();

        assert!(store.exists(&path).await);
        assert_eq!(store.get_bytes(&path).await.unwrap(), b"test image data");
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let (store, _temp) = create_test_store().await;
        let path = store.path_for("https://example.com/a.png", None);

        store.put_bytes(&path, b"first").await.unwrap();
        store.put_bytes(&path, b"second").await.unwrap();

        assert_eq!(store.get_bytes(&path).await.unwrap(), b"second");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_cache_miss() {
        let (store, _temp) = create_test_store().await;
        let path = store.path_for("https://example.com/missing.png", None);

        assert!(!store.exists(&path).await);
        assert!(store.get_bytes(&path).await.is_none());
    }

    #[tokio::test]
    async fn test_directory_is_not_a_hit() {
        let (store, _temp) = create_test_store().await;
        let path = store.cache_dir().join("nested");
        std::fs::create_dir(&path).unwrap();

        assert!(!store.exists(&path).await);
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let (store, _temp) = create_test_store().await;
        let path = store.path_for("https://example.com/a.png", None);

        store.put_bytes(&path, b"test").await.unwrap();
        store.remove(&path).await;
        assert!(!store.exists(&path).await);

        store.remove(&path).await;
        assert!(!store.exists(&path).await);
    }

    #[tokio::test]
    async fn test_put_into_missing_dir_fails() {
        let (store, _temp) = create_test_store().await;
        let path = store.cache_dir().join("no-such-dir").join("file");

        let result = store.put_bytes(&path, b"data").await;
        assert!(matches!(result, Err(StoreError::Io { .. })));
    }

    #[tokio::test]
    async fn test_clear() {
        let (store, _temp) = create_test_store().await;

        store
            .put_bytes(&store.path_for("https://a.com/1.png", None), b"data1")
            .await
            .unwrap();
        store
            .put_bytes(&store.path_for("https://a.com/2.png", None), b"data2")
            .await
            .unwrap();
        assert_eq!(store.len().await, 2);

        store.clear().await.unwrap();
        assert!(store.is_empty().await);
    }
}
