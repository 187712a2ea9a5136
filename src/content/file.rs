//! Content file model

use serde::Serialize;
use std::path::Path;

use super::frontmatter::{self, Frontmatter};
use crate::error::Result;

/// A single content item parsed from `<slug>.<extension>`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentFile {
    /// File name with the extension stripped
    pub slug: String,

    /// Front-matter, in source key order
    pub frontmatter: Frontmatter,

    /// Markdown after the front-matter block
    pub body: String,
}

impl ContentFile {
    /// Parse raw file text. `path` is only used for error reporting.
    pub fn parse(slug: impl Into<String>, raw: &str, path: &Path) -> Result<Self> {
        let (frontmatter, body) = frontmatter::split(raw).map_err(|e| e.with_path(path))?;
        Ok(Self {
            slug: slug.into(),
            frontmatter,
            body: body.to_string(),
        })
    }
}
