//! Git access for metadata inference
//!
//! - `runner`: read-only `git` invocations with stable output
//! - `history`: the version-control backend used by `infer`

pub mod history;
pub mod runner;

pub use history::{parse_status_log, GitHistory};
