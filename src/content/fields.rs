//! Field selection and projection of content files into records

use indexmap::IndexSet;
use serde_json::Value as Json;

use super::markdown::rewrite_images;
use super::ContentFile;

/// Output of a projection, keyed by field name in request order
pub type Record = serde_json::Map<String, Json>;

/// Front-matter key that `metadata` always carries
pub const COVER_IMAGE: &str = "coverImage";

/// A requested output field
#[derive(Debug, Clone, PartialEq, Eq)]
enum Field<'a> {
    /// The normalized slug derived from the file name
    Slug,
    /// The markdown body with images rewritten to `<img>` tags
    Content,
    /// The whole front-matter mapping
    Metadata,
    /// A single front-matter key
    Frontmatter(&'a str),
}

impl<'a> Field<'a> {
    fn parse(name: &'a str) -> Self {
        match name {
            "slug" => Field::Slug,
            "content" => Field::Content,
            "metadata" => Field::Metadata,
            other => Field::Frontmatter(other),
        }
    }
}

/// Ordered set of requested field names. Duplicates collapse to the first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet {
    names: IndexSet<String>,
}

impl FieldSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names.into_iter().collect()
    }

    /// Parse a comma separated list such as `title,slug,coverImage`
    pub fn parse_list(list: &str) -> Self {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Fields used by the detail view: slug, content and metadata
    pub fn detail() -> Self {
        Self::new(["slug", "content", "metadata"])
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for FieldSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Project a content file onto the requested fields.
///
/// Special names (`slug`, `content`, `metadata`) always produce a value;
/// anything else is copied from the front-matter when present and omitted
/// otherwise.
pub fn project(file: &ContentFile, fields: &FieldSet) -> Record {
    let mut record = Record::new();

    for name in fields.names() {
        let value = match Field::parse(name) {
            Field::Slug => Json::String(file.slug.clone()),
            Field::Content => Json::String(rewrite_images(&file.body)),
            Field::Metadata => {
                let mut metadata = file.frontmatter.clone();
                metadata.entry(COVER_IMAGE).or_insert(Json::Null);
                Json::Object(metadata)
            }
            Field::Frontmatter(key) => match file.frontmatter.get(key) {
                Some(value) => value.clone(),
                None => continue,
            },
        };
        record.insert(name.to_string(), value);
    }

    record
}
