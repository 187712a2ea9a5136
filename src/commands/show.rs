//! Show a single content record

use anyhow::Result;

use crate::content::{ContentStore, FieldSet, Record};
use crate::Academy;

/// Load one record. With no fields the detail set (slug, content, metadata) is used.
pub fn load(academy: &Academy, slug: &str, fields: Option<&str>) -> Result<Record> {
    let fields = fields
        .map(FieldSet::parse_list)
        .unwrap_or_else(FieldSet::detail);
    Ok(academy.loader().load_by_slug(slug, &fields)?)
}

/// Print one record as pretty JSON
pub fn run(academy: &Academy, slug: &str, fields: Option<&str>) -> Result<()> {
    let record = load(academy, slug, fields)?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}
