//! Load-once cache for datasets.
//!
//! Entries are keyed by the canonical source path and remember the file's
//! modification time; a changed mtime triggers a reload.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use super::error::DataError;
use super::loader;
use super::model::Dataset;

#[derive(Debug)]
struct CacheEntry {
    modified: Option<SystemTime>,
    dataset: Arc<Dataset>,
}

/// Explicit dataset cache owned by the application.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: HashMap<PathBuf, CacheEntry>,
    /// Number of times a file was actually read.
    loads: usize,
}

impl DatasetCache {
    /// Return the cached dataset for `path`, reading the file only when it
    /// is not cached yet or has been modified since.
    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<Dataset>, DataError> {
        let (key, modified) = identity(path)?;

        if let Some(entry) = self.entries.get(&key) {
            if entry.modified.is_some() && entry.modified == modified {
                log::debug!("Dataset cache hit for {}", key.display());
                return Ok(Arc::clone(&entry.dataset));
            }
            log::info!("{} changed on disk, reloading", key.display());
        }

        let dataset = Arc::new(loader::load_csv(&key)?);
        self.loads += 1;
        self.entries.insert(
            key,
            CacheEntry {
                modified,
                dataset: Arc::clone(&dataset),
            },
        );
        Ok(dataset)
    }

    /// Drop the entry for `path`; the next `get_or_load` re-reads the file.
    pub fn invalidate(&mut self, path: &Path) -> bool {
        let key = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        let removed = self.entries.remove(&key).is_some();
        if removed {
            log::info!("Invalidated cached dataset for {}", key.display());
        }
        removed
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn loads(&self) -> usize {
        self.loads
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Canonical path plus modification time. A file whose mtime cannot be
/// read is never served from the cache.
fn identity(path: &Path) -> Result<(PathBuf, Option<SystemTime>), DataError> {
    let unavailable = |source| DataError::Unavailable {
        path: path.to_path_buf(),
        source,
    };
    let key = std::fs::canonicalize(path).map_err(unavailable)?;
    let meta = std::fs::metadata(&key).map_err(unavailable)?;
    Ok((key, meta.modified().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Duration;

    const HEADER: &str = "Series_Title,Genre,Released_Year,IMDB_Rating,Gross,No_of_Votes\n";

    fn write_movies(path: &Path, rows: &[&str]) {
        let mut body = HEADER.to_string();
        for r in rows {
            body.push_str(r);
            body.push('\n');
        }
        fs::write(path, body).unwrap();
    }

    fn touch_later(path: &Path) {
        let file = fs::File::options().write(true).open(path).unwrap();
        let later = SystemTime::now() + Duration::from_secs(60);
        file.set_modified(later).unwrap();
    }

    #[test]
    fn unchanged_source_is_read_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("movies.csv");
        write_movies(&path, &["A,Drama,2001,9.2,100,10"]);

        let mut cache = DatasetCache::default();
        let first = cache.get_or_load(&path).unwrap();
        let second = cache.get_or_load(&path).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.loads(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn modified_source_is_reloaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("movies.csv");
        write_movies(&path, &["A,Drama,2001,9.2,100,10"]);

        let mut cache = DatasetCache::default();
        assert_eq!(cache.get_or_load(&path).unwrap().len(), 1);

        write_movies(
            &path,
            &["A,Drama,2001,9.2,100,10", "B,Action,2020,6.5,500,20"],
        );
        touch_later(&path);

        assert_eq!(cache.get_or_load(&path).unwrap().len(), 2);
        assert_eq!(cache.loads(), 2);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn invalidate_forces_a_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("movies.csv");
        write_movies(&path, &["A,Drama,2001,9.2,100,10"]);

        let mut cache = DatasetCache::default();
        cache.get_or_load(&path).unwrap();
        assert!(cache.invalidate(&path));
        assert!(!cache.invalidate(&path));
        cache.get_or_load(&path).unwrap();
        assert_eq!(cache.loads(), 2);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn missing_file_is_unavailable_and_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = DatasetCache::default();
        let err = cache.get_or_load(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, DataError::Unavailable { .. }));
        assert!(cache.is_empty());
        assert_eq!(cache.loads(), 0);
    }

    #[test]
    fn malformed_file_is_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("movies.csv");
        fs::write(&path, "title,genre\nA,Drama\n").unwrap();

        let mut cache = DatasetCache::default();
        assert!(matches!(
            cache.get_or_load(&path),
            Err(DataError::Malformed { .. })
        ));
        assert!(cache.is_empty());
    }
}
