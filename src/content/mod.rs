//! Content module - content files, front-matter, field projection and loading

mod fields;
mod file;
pub mod frontmatter;
pub mod loader;
mod markdown;

pub use fields::{project, FieldSet, Record, COVER_IMAGE};
pub use file::ContentFile;
pub use frontmatter::Frontmatter;
pub use loader::{ContentLoader, ContentStore};
pub use markdown::rewrite_images;
