//! Keyed profile cache
//!
//! Parses each distinct file at most once and shares the immutable result.
//! The lock guards only the map itself; a completed `Profile` needs no
//! synchronization to read. Two threads racing on a cold path may both
//! parse the same file; the first insert wins and both receive the same
//! shared value afterward.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::Result;
use crate::profile::Profile;

/// A path-keyed cache of parsed profiles
#[derive(Debug, Default)]
pub struct ProfileCache {
    inner: Mutex<HashMap<PathBuf, Arc<Profile>>>,
}

impl ProfileCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached profile for `path`, parsing the file on a miss
    pub fn get_or_load(&self, path: &Path) -> Result<Arc<Profile>> {
        if let Some(profile) = self.lock().get(path) {
            return Ok(Arc::clone(profile));
        }

        let bytes = std::fs::read(path)?;
        let profile = Arc::new(Profile::parse(&bytes, path.to_str())?);

        let mut map = self.lock();
        let entry = map
            .entry(path.to_path_buf())
            .or_insert_with(|| Arc::clone(&profile));
        Ok(Arc::clone(entry))
    }

    /// The profile for `path` if already cached, without touching the disk
    pub fn get(&self, path: &Path) -> Option<Arc<Profile>> {
        self.lock().get(path).cloned()
    }

    /// Number of cached profiles
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the cache is empty
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drop all cached profiles; outstanding handles stay valid
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<PathBuf, Arc<Profile>>> {
        // A poisoned lock only means another thread panicked mid-insert;
        // the map itself is still a valid cache.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}
