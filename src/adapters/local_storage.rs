use crate::core::Repository;
use crate::utils::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Filesystem repository: each key maps to `<base_path>/<key>.json`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        Path::new(&self.base_path).join(format!("{}.json", key))
    }
}

impl Repository for LocalStorage {
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match fs::read(self.key_path(key)) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, key: &str, data: &[u8]) -> Result<()> {
        let path = self.key_path(key);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, data)?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            // Removing an absent key is a no-op, matching a missing read.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn storage() -> (LocalStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().to_str().unwrap().to_string();
        (LocalStorage::new(base), temp_dir)
    }

    #[tokio::test]
    async fn test_read_missing_key_returns_none() {
        let (storage, _dir) = storage();
        assert!(storage.read("enrollments").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_write_then_read_round_trip() {
        let (storage, dir) = storage();

        storage.write("enrollments", b"[1,2,3]").await.unwrap();

        let data = storage.read("enrollments").await.unwrap().unwrap();
        assert_eq!(data, b"[1,2,3]");
        assert!(dir.path().join("enrollments.json").exists());
    }

    #[tokio::test]
    async fn test_remove_deletes_file_and_tolerates_absence() {
        let (storage, dir) = storage();

        storage.write("enrollments", b"[]").await.unwrap();
        storage.remove("enrollments").await.unwrap();

        assert!(!dir.path().join("enrollments.json").exists());
        assert!(storage.read("enrollments").await.unwrap().is_none());

        // Removing again is fine.
        storage.remove("enrollments").await.unwrap();
    }

    #[tokio::test]
    async fn test_write_creates_missing_directories() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        let storage = LocalStorage::new(nested.to_str().unwrap().to_string());

        storage.write("enrollments", b"[]").await.unwrap();
        assert!(nested.join("enrollments.json").exists());
    }
}
