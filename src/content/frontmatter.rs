//! Front-matter parsing

use serde_json::Value as Json;
use serde_yaml::Value as Yaml;
use std::path::PathBuf;

use crate::error::{ContentError, Result};

/// Opening and closing line of a YAML front-matter block
const DELIMITER: &str = "---";

/// Front-matter mapping. Keys keep the order they were written in.
pub type Frontmatter = serde_json::Map<String, Json>;

/// Split raw file text into its front-matter mapping and markdown body.
///
/// Text that does not open with a `---` line has no front-matter; the whole
/// input is returned as the body. A block that is never closed swallows the
/// rest of the file. Parse failures carry an empty path; the loader attaches
/// the real one.
pub fn split(content: &str) -> Result<(Frontmatter, &str)> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let (first, rest) = split_line(content);
    if first.trim_end() != DELIMITER {
        return Ok((Frontmatter::new(), content));
    }

    let mut consumed = 0;
    let mut remaining = rest;
    while !remaining.is_empty() {
        let (line, after) = split_line(remaining);
        if line.trim_end() == DELIMITER {
            let fm = parse_yaml(&rest[..consumed])?;
            return Ok((fm, after));
        }
        consumed += remaining.len() - after.len();
        remaining = after;
    }

    tracing::debug!("Front-matter block is never closed, treating the whole file as YAML");
    Ok((parse_yaml(rest)?, ""))
}

/// Returns the first line (without its terminator) and everything after it
fn split_line(s: &str) -> (&str, &str) {
    match s.find('\n') {
        Some(pos) => (s[..pos].trim_end_matches('\r'), &s[pos + 1..]),
        None => (s, ""),
    }
}

fn parse_yaml(yaml: &str) -> Result<Frontmatter> {
    let is_blank = yaml.lines().all(|line| {
        let trimmed = line.trim();
        trimmed.is_empty() || trimmed.starts_with('#')
    });
    if is_blank {
        return Ok(Frontmatter::new());
    }

    let value: Yaml = serde_yaml::from_str(yaml).map_err(|source| ContentError::Parse {
        path: PathBuf::new(),
        source,
    })?;

    match value {
        Yaml::Mapping(mapping) => Ok(mapping_to_json(mapping)),
        Yaml::Null => Ok(Frontmatter::new()),
        other => Err(ContentError::NotAMapping {
            path: PathBuf::new(),
            found: describe(&other),
        }),
    }
}

fn describe(value: &Yaml) -> &'static str {
    match value {
        Yaml::Null => "null",
        Yaml::Bool(_) => "a boolean",
        Yaml::Number(_) => "a number",
        Yaml::String(_) => "a string",
        Yaml::Sequence(_) => "a sequence",
        Yaml::Mapping(_) => "a mapping",
        Yaml::Tagged(_) => "a tagged value",
    }
}

fn mapping_to_json(mapping: serde_yaml::Mapping) -> Frontmatter {
    mapping
        .into_iter()
        .map(|(key, value)| (key_to_string(key), yaml_to_json(value)))
        .collect()
}

/// Convert a YAML value to JSON. Tags are dropped; non-finite floats become null.
fn yaml_to_json(value: Yaml) -> Json {
    match value {
        Yaml::Null => Json::Null,
        Yaml::Bool(b) => Json::Bool(b),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Json::from(i)
            } else if let Some(u) = n.as_u64() {
                Json::from(u)
            } else {
                n.as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map(Json::Number)
                    .unwrap_or(Json::Null)
            }
        }
        Yaml::String(s) => Json::String(s),
        Yaml::Sequence(seq) => Json::Array(seq.into_iter().map(yaml_to_json).collect()),
        Yaml::Mapping(mapping) => Json::Object(mapping_to_json(mapping)),
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

fn key_to_string(key: Yaml) -> String {
    match key {
        Yaml::String(s) => s,
        Yaml::Bool(b) => b.to_string(),
        Yaml::Number(n) => n.to_string(),
        Yaml::Null => "null".to_string(),
        Yaml::Tagged(tagged) => key_to_string(tagged.value),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Private Business Credit
tagline: Build credit the private way
ScopeOfWork:
  - Consulting
  - Coaching
---

This is the content.
"#;

        let (fm, body) = split(content).unwrap();
        assert_eq!(fm["title"], json!("Private Business Credit"));
        assert_eq!(fm["ScopeOfWork"], json!(["Consulting", "Coaching"]));
        assert_eq!(body, "\nThis is the content.\n");
    }

    #[test]
    fn test_keys_keep_source_order() {
        let content = "---\nzeta: 1\nalpha: 2\nmid: 3\n---\n";
        let (fm, _) = split(content).unwrap();
        let keys: Vec<_> = fm.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_nested_values_pass_through() {
        let content = r#"---
description:
  - First paragraph
  - Second paragraph
author:
  name: Jane
  links: [a, b]
featured: true
order: 3
---
body"#;

        let (fm, body) = split(content).unwrap();
        assert_eq!(fm["description"], json!(["First paragraph", "Second paragraph"]));
        assert_eq!(fm["author"], json!({"name": "Jane", "links": ["a", "b"]}));
        assert_eq!(fm["featured"], json!(true));
        assert_eq!(fm["order"], json!(3));
        assert_eq!(body, "body");
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "# Heading\n\nJust markdown.";
        let (fm, body) = split(content).unwrap();
        assert!(fm.is_empty());
        assert_eq!(body, content);
    }

    #[test]
    fn test_empty_frontmatter() {
        let (fm, body) = split("---\n---\nbody").unwrap();
        assert!(fm.is_empty());
        assert_eq!(body, "body");

        let (fm, _) = split("---\n# only a comment\n---\n").unwrap();
        assert!(fm.is_empty());
    }

    #[test]
    fn test_unclosed_block_is_all_frontmatter() {
        let (fm, body) = split("---\ntitle: Open\n").unwrap();
        assert_eq!(fm["title"], json!("Open"));
        assert_eq!(body, "");
    }

    #[test]
    fn test_crlf_and_bom() {
        let content = "\u{feff}---\r\ntitle: Windows\r\n---\r\nbody\r\n";
        let (fm, body) = split(content).unwrap();
        assert_eq!(fm["title"], json!("Windows"));
        assert_eq!(body, "body\r\n");
    }

    #[test]
    fn test_horizontal_rule_in_body_is_kept() {
        let content = "---\ntitle: Rules\n---\nabove\n\n---\n\nbelow";
        let (fm, body) = split(content).unwrap();
        assert_eq!(fm.len(), 1);
        assert_eq!(body, "above\n\n---\n\nbelow");
    }

    #[test]
    fn test_malformed_yaml_is_parse_error() {
        let err = split("---\ntitle: [unclosed\n---\nbody").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParseError);
    }

    #[test]
    fn test_scalar_document_is_parse_error() {
        let err = split("---\njust a sentence\n---\nbody").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParseError);
        assert!(err.to_string().contains("a string"));
    }

    #[test]
    fn test_non_string_keys_are_stringified() {
        let (fm, _) = split("---\n2024: launch\ntrue: yes\n---\n").unwrap();
        assert_eq!(fm["2024"], json!("launch"));
        assert_eq!(fm["true"], json!("yes"));
    }

    #[test]
    fn test_tagged_values_unwrap() {
        let (fm, _) = split("---\nprice: !usd 499\n---\n").unwrap();
        assert_eq!(fm["price"], json!(499));
    }
}
