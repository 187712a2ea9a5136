//! In-memory content cache
//!
//! Parsed content files are kept by slug so repeated requests skip the disk
//! read and YAML parse. Entries live until they are invalidated, either by the
//! file watcher in the server or by an explicit call. Projection still runs per
//! request, so cached and uncached loaders return identical records.
//!
//! Every invalidation bumps a generation counter. A file read that started
//! before an invalidation is returned to its caller but never stored, so a
//! change racing a cache miss cannot leave the old version behind.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use crate::content::{ContentFile, ContentLoader, ContentStore};
use crate::error::Result;

/// A [`ContentLoader`] that memoises parsed files
#[derive(Debug)]
pub struct CachedLoader {
    loader: ContentLoader,
    entries: RwLock<Entries>,
}

#[derive(Debug, Default)]
struct Entries {
    files: HashMap<String, Arc<ContentFile>>,
    generation: u64,
}

impl CachedLoader {
    pub fn new(loader: ContentLoader) -> Self {
        Self {
            loader,
            entries: RwLock::new(Entries::default()),
        }
    }

    pub fn loader(&self) -> &ContentLoader {
        &self.loader
    }

    /// Number of cached files
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .files
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop one entry. Returns whether it was cached.
    pub fn invalidate(&self, slug: &str) -> bool {
        let slug = self.loader.normalize_slug(slug);
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.generation += 1;
        entries.files.remove(slug).is_some()
    }

    /// Drop every entry
    pub fn clear(&self) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.generation += 1;
        entries.files.clear();
    }

    /// Cache `file` unless an invalidation happened since `generation` was read.
    /// Returns whether it was stored.
    fn store(&self, slug: &str, file: &Arc<ContentFile>, generation: u64) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if entries.generation != generation {
            tracing::debug!("Not caching {}: invalidated while reading", slug);
            return false;
        }
        entries.files.insert(slug.to_string(), Arc::clone(file));
        true
    }

    /// Invalidate whatever a changed path affects: the matching slug for a
    /// content file, everything for anything else under the directory.
    pub fn invalidate_path(&self, path: &Path) {
        let slug = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| self.loader.slug_for_file_name(name));

        match slug {
            Some(slug) => {
                if self.invalidate(slug) {
                    tracing::debug!("Cache invalidated: {}", slug);
                }
            }
            None => {
                self.clear();
                tracing::debug!("Cache cleared after change to {:?}", path);
            }
        }
    }
}

impl ContentStore for CachedLoader {
    fn list_slugs(&self) -> Result<Vec<String>> {
        self.loader.list_slugs()
    }

    fn load_file(&self, slug: &str) -> Result<Arc<ContentFile>> {
        let slug = self.loader.normalize_slug(slug);

        let generation = {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(file) = entries.files.get(slug) {
                return Ok(Arc::clone(file));
            }
            entries.generation
        };

        let file = Arc::new(self.loader.read(slug)?);
        self.store(slug, &file, generation);
        Ok(file)
    }

    fn skip_invalid(&self) -> bool {
        self.loader.skip_invalid()
    }
}
