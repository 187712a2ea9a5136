//! creditor-academy: content loader for the Creditor Academy site
//!
//! Reads a directory of `.mdx` files with YAML front-matter and turns them
//! into JSON records for the projects listing and detail pages. A small
//! axum server exposes the same records over HTTP.

pub mod cache;
pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod server;

use anyhow::Result;
use std::path::{Path, PathBuf};

pub use error::{ContentError, ErrorKind};

/// Name of the site configuration file in the site root
pub const CONFIG_FILE: &str = "_config.yml";

/// The academy site rooted at a directory
#[derive(Clone)]
pub struct Academy {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Content directory
    pub content_dir: PathBuf,
}

impl Academy {
    /// Create a new instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create an instance from an already loaded configuration
    pub fn with_config<P: Into<PathBuf>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.into();
        let content_dir = base_dir.join(&config.content_dir);

        Self {
            config,
            base_dir,
            content_dir,
        }
    }

    /// A loader over the content directory, configured from the site config
    pub fn loader(&self) -> content::ContentLoader {
        content::ContentLoader::new(&self.content_dir)
            .with_extension(&self.config.extension)
            .with_skip_invalid(self.config.skip_invalid)
    }
}
