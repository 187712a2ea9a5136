//! Export all content records as a JSON array

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::content::{ContentStore, FieldSet, Record};
use crate::Academy;

/// Load every record. With no fields the configured listing fields are used.
pub fn load(academy: &Academy, fields: Option<&str>) -> Result<Vec<Record>> {
    let fields = match fields {
        Some(list) => FieldSet::parse_list(list),
        None => academy.config.list_field_set(),
    };
    Ok(academy.loader().load_all(&fields)?)
}

/// Print the records, or write them to `output`
pub fn run(academy: &Academy, fields: Option<&str>, output: Option<&Path>) -> Result<()> {
    let records = load(academy, fields)?;
    let json = serde_json::to_string_pretty(&records)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, json)?;
            tracing::info!("Exported {} records to {:?}", records.len(), path);
        }
        None => println!("{}", json),
    }

    Ok(())
}
