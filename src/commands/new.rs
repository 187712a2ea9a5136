//! Create a new content file

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::Academy;

/// Create `<slug>.<extension>` in the content directory and return its path.
///
/// The slug is derived from the title unless one is given.
pub fn create_content(academy: &Academy, title: &str, slug: Option<&str>) -> Result<PathBuf> {
    let slug = match slug {
        Some(s) => academy.loader().normalize_slug(s).to_string(),
        None => slug::slugify(title),
    };
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a slug from title {:?}", title);
    }

    fs::create_dir_all(&academy.content_dir)?;
    let file_path = academy.loader().path_for(&slug)?;

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let content = format!(
        r#"---
title: {}
slug: {}
date: {}
coverImage:
tagline:
industry:
description:
ScopeOfWork: []
---
"#,
        serde_json::to_string(title)?,
        serde_json::to_string(&slug)?,
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
    );

    fs::write(&file_path, content)?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentStore, FieldSet};
    use serde_json::{json, Value};
    use tempfile::TempDir;

    #[test]
    fn test_create_from_title() {
        let tmp = TempDir::new().unwrap();
        let academy = Academy::new(tmp.path()).unwrap();

        let path = create_content(&academy, "Operate Private: Part 2", None).unwrap();
        assert_eq!(path, academy.content_dir.join("operate-private-part-2.mdx"));

        let record = academy
            .loader()
            .load_by_slug("operate-private-part-2", &FieldSet::new(["title", "coverImage", "ScopeOfWork", "metadata"]))
            .unwrap();
        assert_eq!(record["title"], json!("Operate Private: Part 2"));
        assert_eq!(record["coverImage"], Value::Null);
        assert_eq!(record["ScopeOfWork"], json!([]));
        assert_eq!(record["metadata"]["slug"], json!("operate-private-part-2"));
    }

    #[test]
    fn test_explicit_slug_and_no_overwrite() {
        let tmp = TempDir::new().unwrap();
        let academy = Academy::new(tmp.path()).unwrap();

        let path = create_content(&academy, "Masterclass", Some("masterclass-2026.mdx")).unwrap();
        assert!(path.ends_with("masterclass-2026.mdx"));
        assert!(create_content(&academy, "Masterclass again", Some("masterclass-2026")).is_err());
    }

    #[test]
    fn test_slugs_needing_quotes_stay_loadable() {
        let tmp = TempDir::new().unwrap();
        let academy = Academy::new(tmp.path()).unwrap();

        create_content(&academy, "Colon", Some("a: b")).unwrap();
        create_content(&academy, "Hash", Some("#1")).unwrap();

        let records = academy
            .loader()
            .load_all(&FieldSet::new(["slug", "metadata"]))
            .unwrap();
        let slugs: Vec<_> = records
            .iter()
            .map(|r| (r["slug"].clone(), r["metadata"]["slug"].clone()))
            .collect();
        assert_eq!(
            slugs,
            vec![(json!("#1"), json!("#1")), (json!("a: b"), json!("a: b"))]
        );
    }

    #[test]
    fn test_rejects_path_slugs() {
        let tmp = TempDir::new().unwrap();
        let academy = Academy::new(tmp.path()).unwrap();
        assert!(create_content(&academy, "Escape", Some("../escape")).is_err());
    }
}
