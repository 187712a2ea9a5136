//! Content loader - lists and loads content files from the content directory

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

use super::fields::{project, FieldSet, Record};
use super::ContentFile;
use crate::error::{ContentError, ErrorKind, Result};

/// Default content file extension
pub const DEFAULT_EXTENSION: &str = "mdx";

/// A source of content files.
///
/// Implementors provide listing and file access; projection and batch loading
/// come for free so every store answers queries the same way.
pub trait ContentStore: Send + Sync {
    /// Slugs of every content file, in listing order
    fn list_slugs(&self) -> Result<Vec<String>>;

    /// Load and parse the file behind `slug`
    fn load_file(&self, slug: &str) -> Result<Arc<ContentFile>>;

    /// Whether `load_all` skips files with broken front-matter instead of failing
    fn skip_invalid(&self) -> bool {
        false
    }

    /// Load one file and project it onto `fields`
    fn load_by_slug(&self, slug: &str, fields: &FieldSet) -> Result<Record> {
        let file = self.load_file(slug)?;
        Ok(project(&file, fields))
    }

    /// Load every file in listing order
    fn load_all(&self, fields: &FieldSet) -> Result<Vec<Record>> {
        let slugs = self.list_slugs()?;
        let mut records = Vec::with_capacity(slugs.len());

        for slug in &slugs {
            match self.load_by_slug(slug, fields) {
                Ok(record) => records.push(record),
                Err(e) if self.skip_invalid() && e.kind() == ErrorKind::ParseError => {
                    tracing::warn!("Skipping {}: {}", slug, e);
                }
                Err(e) => return Err(e),
            }
        }

        tracing::debug!("Loaded {} of {} content files", records.len(), slugs.len());
        Ok(records)
    }
}

/// Reads content files straight from disk on every call
#[derive(Debug, Clone)]
pub struct ContentLoader {
    content_dir: PathBuf,
    extension: String,
    skip_invalid: bool,
}

impl ContentLoader {
    /// Create a loader over `content_dir` reading `.mdx` files
    pub fn new<P: Into<PathBuf>>(content_dir: P) -> Self {
        Self {
            content_dir: content_dir.into(),
            extension: DEFAULT_EXTENSION.to_string(),
            skip_invalid: false,
        }
    }

    /// Use a different file extension (without the leading dot)
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    /// Skip unparsable files in `load_all` instead of aborting the batch
    pub fn with_skip_invalid(mut self, skip: bool) -> Self {
        self.skip_invalid = skip;
        self
    }

    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Strip a trailing `.<extension>`, so `foo.mdx` and `foo` name the same file
    pub fn normalize_slug<'s>(&self, slug: &'s str) -> &'s str {
        self.strip_extension(slug).unwrap_or(slug)
    }

    /// Slug of a file name, or `None` if it does not carry the content extension
    pub fn slug_for_file_name<'s>(&self, name: &'s str) -> Option<&'s str> {
        if name.starts_with('.') {
            return None;
        }
        self.strip_extension(name).filter(|slug| !slug.is_empty())
    }

    fn strip_extension<'s>(&self, name: &'s str) -> Option<&'s str> {
        name.strip_suffix(self.extension.as_str())
            .and_then(|rest| rest.strip_suffix('.'))
    }

    /// Path of the file behind `slug`. Slugs that would leave the content
    /// directory resolve to `NotFound`.
    pub fn path_for(&self, slug: &str) -> Result<PathBuf> {
        let slug = self.normalize_slug(slug);
        if slug.is_empty() || slug == "." || slug == ".." || slug.contains(['/', '\\']) {
            return Err(ContentError::NotFound {
                path: self.content_dir.join(slug),
            });
        }
        Ok(self.content_dir.join(format!("{}.{}", slug, self.extension)))
    }

    /// Read and parse a single file
    pub fn read(&self, slug: &str) -> Result<ContentFile> {
        let path = self.path_for(slug)?;
        let raw = fs::read_to_string(&path).map_err(|e| ContentError::io(&path, e))?;
        tracing::debug!("Read {:?}", path);
        ContentFile::parse(self.normalize_slug(slug), &raw, &path)
    }
}

impl ContentStore for ContentLoader {
    fn list_slugs(&self) -> Result<Vec<String>> {
        if !self.content_dir.is_dir() {
            return Err(ContentError::NotFound {
                path: self.content_dir.clone(),
            });
        }

        let mut slugs = Vec::new();

        for entry in WalkDir::new(&self.content_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                // Unreadable entries inside the directory (dangling links, loops)
                Err(e) if e.depth() > 0 => {
                    tracing::warn!("Ignoring unreadable entry: {}", e);
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let Some(name) = entry.file_name().to_str() else {
                tracing::warn!("Ignoring non UTF-8 file name {:?}", entry.path());
                continue;
            };

            if let Some(slug) = self.slug_for_file_name(name) {
                slugs.push(slug.to_string());
            }
        }

        Ok(slugs)
    }

    fn load_file(&self, slug: &str) -> Result<Arc<ContentFile>> {
        self.read(slug).map(Arc::new)
    }

    fn skip_invalid(&self) -> bool {
        self.skip_invalid
    }
}
