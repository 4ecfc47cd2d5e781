use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Key under which the raw dataset document is stored
pub const CACHE_KEY: &str = "recipes";

/// Key-value store holding opaque text blobs
pub trait Cache {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

impl<C: Cache + ?Sized> Cache for Box<C> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// Cache that lives as long as the process
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: HashMap<String, String>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Cache for MemoryCache {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Cache backed by a directory, one file per key
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty()
            || !key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(Error::Cache(format!("Invalid cache key: {key:?}")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl Cache for FileCache {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => {
                debug!("Cache hit: {}", path.display());
                Ok(Some(content))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::Cache(format!(
                "Failed to read {}: {e}",
                path.display()
            ))),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;
        fs::write(&path, value)
            .map_err(|e| Error::Cache(format!("Failed to write {}: {e}", path.display())))?;
        debug!("Cached {} bytes at {}", value.len(), path.display());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::Cache(format!(
                "Failed to remove {}: {e}",
                path.display()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_memory_cache() {
        let mut cache = MemoryCache::new();
        assert_eq!(cache.get(CACHE_KEY).unwrap(), None);

        cache.set(CACHE_KEY, "{\"recipes\":[]}").unwrap();
        assert_eq!(
            cache.get(CACHE_KEY).unwrap().as_deref(),
            Some("{\"recipes\":[]}")
        );

        cache.remove(CACHE_KEY).unwrap();
        assert_eq!(cache.get(CACHE_KEY).unwrap(), None);
    }

    #[test]
    fn test_file_cache_creates_dir_on_write() {
        let dir = tempdir().unwrap();
        let cache_dir = dir.path().join("nested").join("cache");
        let mut cache = FileCache::new(&cache_dir);

        assert_eq!(cache.get(CACHE_KEY).unwrap(), None);
        cache.set(CACHE_KEY, "payload").unwrap();
        assert!(cache_dir.join("recipes.json").exists());

        // A second handle on the same directory sees the entry
        let other = FileCache::new(&cache_dir);
        assert_eq!(other.get(CACHE_KEY).unwrap().as_deref(), Some("payload"));

        cache.remove(CACHE_KEY).unwrap();
        cache.remove(CACHE_KEY).unwrap();
        assert_eq!(other.get(CACHE_KEY).unwrap(), None);
    }

    #[test]
    fn test_file_cache_rejects_path_keys() {
        let dir = tempdir().unwrap();
        let mut cache = FileCache::new(dir.path());
        assert!(cache.set("../escape", "x").is_err());
        assert!(cache.get("").is_err());
    }
}
