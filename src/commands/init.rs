//! Initialize a new academy site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::config::SiteConfig;
use crate::CONFIG_FILE;

/// Default configuration written by `init`
const DEFAULT_CONFIG: &str = r#"# Creditor Academy content configuration

title: Creditor Academy

# Content
content_dir: content/projects
extension: mdx
# Skip files with broken front-matter when listing instead of failing
skip_invalid: false
# Keep parsed files in memory while serving
cache: true
list_fields:
  - title
  - slug
  - ScopeOfWork
  - industry
  - coverImage
  - description
  - tagline

# Server
server:
  ip: localhost
  port: 3000
  api_prefix: /api
  watch: true
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join(CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!("Already initialized: {:?} exists", config_path);
    }

    fs::create_dir_all(target_dir)?;
    fs::write(&config_path, DEFAULT_CONFIG)?;

    let config = SiteConfig::load(&config_path)?;
    let content_dir = target_dir.join(&config.content_dir);
    fs::create_dir_all(&content_dir)?;

    let sample = format!(
        r#"---
title: Private Business Credit
tagline: Build business credit outside the consumer system
industry: Finance
coverImage: /images/projects/private-business-credit.jpg
description:
  - Learn how lenders evaluate a private business.
  - Structure your entity before you apply.
ScopeOfWork:
  - Entity setup
  - Credit profile building
  - Lender introductions
date: {}
---

![Private business credit](/images/projects/private-business-credit-hero.jpg)

## What you will learn

- How business credit bureaus score a new entity
- Which tradelines to open first
"#,
        chrono::Local::now().format("%Y-%m-%d")
    );
    fs::write(
        content_dir.join(format!("private-business-credit.{}", config.extension)),
        sample,
    )?;

    tracing::debug!("Initialized site in {:?}", target_dir);
    Ok(())
}
