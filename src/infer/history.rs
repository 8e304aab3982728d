//! Version-control history seen through a narrow trait, so inference can be
//! tested without a repository.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

use crate::spec::SpecStatus;

/// A status value observed in a past revision of a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusTransition {
    pub status: SpecStatus,
    pub timestamp: DateTime<Utc>,
}

pub trait SpecHistory {
    /// Whether `path` appears in any commit
    fn file_exists_in_history(&self, path: &Path) -> Result<bool>;

    /// Status transitions for `path`, oldest first
    fn status_transitions(&self, path: &Path) -> Result<Vec<StatusTransition>>;

    /// Timestamp of the commit that first added `path`
    fn first_commit_timestamp(&self, path: &Path) -> Result<Option<DateTime<Utc>>>;
}

/// A history backend paired with the document it should be asked about
#[derive(Clone, Copy)]
pub struct HistoryQuery<'a> {
    pub backend: &'a dyn SpecHistory,
    pub path: &'a Path,
}

impl<'a> HistoryQuery<'a> {
    pub fn new(backend: &'a dyn SpecHistory, path: &'a Path) -> Self {
        Self { backend, path }
    }
}
