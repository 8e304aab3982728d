//! Text parsing for spec documents
//!
//! - `structured`: the restricted YAML-style header grammar
//! - `frontmatter`: locating the `---` header and extracting spec metadata
//! - `markdown`: body helpers (sections, links, headings)

pub mod frontmatter;
pub mod markdown;
pub mod structured;
pub mod value;

pub use frontmatter::{extract, split_frontmatter, ExtractedHeader, FrontmatterSplit};
pub use structured::parse;
pub use value::{Mapping, Value};
