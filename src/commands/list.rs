//! List content slugs

use anyhow::Result;
use std::io::Write;

use crate::content::ContentStore;
use crate::Academy;

/// Print every slug in listing order
pub fn run(academy: &Academy) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_slugs(academy, &mut out)
}

fn write_slugs<W: Write>(academy: &Academy, out: &mut W) -> Result<()> {
    let slugs = academy.loader().list_slugs()?;
    tracing::debug!("Found {} content files", slugs.len());
    for slug in slugs {
        writeln!(out, "{}", slug)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_lists_slugs() {
        let tmp = TempDir::new().unwrap();
        let academy = Academy::new(tmp.path()).unwrap();
        fs::create_dir_all(&academy.content_dir).unwrap();
        fs::write(academy.content_dir.join("beta.mdx"), "").unwrap();
        fs::write(academy.content_dir.join("alpha.mdx"), "").unwrap();

        let mut out = Vec::new();
        write_slugs(&academy, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "alpha\nbeta\n");
    }

    #[test]
    fn test_missing_content_dir_fails() {
        let tmp = TempDir::new().unwrap();
        let academy = Academy::new(tmp.path()).unwrap();
        let err = write_slugs(&academy, &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
