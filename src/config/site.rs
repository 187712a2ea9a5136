//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::content::loader::DEFAULT_EXTENSION;
use crate::content::FieldSet;

/// Fields served by the projects listing
pub const DEFAULT_LIST_FIELDS: [&str; 7] = [
    "title",
    "slug",
    "ScopeOfWork",
    "industry",
    "coverImage",
    "description",
    "tagline",
];

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub title: String,

    // Content
    pub content_dir: String,
    pub extension: String,
    pub skip_invalid: bool,
    pub cache: bool,
    pub list_fields: Vec<String>,

    // Server
    #[serde(default)]
    pub server: ServerConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Creditor Academy".to_string(),
            content_dir: "content/projects".to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
            skip_invalid: false,
            cache: true,
            list_fields: DEFAULT_LIST_FIELDS.iter().map(|s| s.to_string()).collect(),
            server: ServerConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        // An empty file deserializes to unit, not a mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Fields served by the projects listing
    pub fn list_field_set(&self) -> FieldSet {
        FieldSet::new(self.list_fields.iter().cloned())
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
    pub api_prefix: String,
    pub watch: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "localhost".to_string(),
            port: 3000,
            api_prefix: "/api".to_string(),
            watch: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.content_dir, "content/projects");
        assert_eq!(config.extension, "mdx");
        assert!(!config.skip_invalid);
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.list_field_set().len(), 7);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Academy Staging
content_dir: data/projects
skip_invalid: true
list_fields: [title, slug]
server:
  port: 8080
analytics_id: UA-1
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Academy Staging");
        assert_eq!(config.content_dir, "data/projects");
        assert!(config.skip_invalid);
        assert!(config.cache);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.ip, "localhost");
        let names: Vec<_> = config.list_field_set().names().map(String::from).collect();
        assert_eq!(names, vec!["title", "slug"]);
        assert!(config.extra.contains_key("analytics_id"));
    }

    #[test]
    fn test_load_empty_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("_config.yml");
        fs::write(&path, "").unwrap();
        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.title, "Creditor Academy");
    }
}
