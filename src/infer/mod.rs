//! Metadata inference for documents that predate structured headers
//!
//! Status and creation date are recovered from free text by walking an
//! ordered list of pattern extractors, then from version-control history,
//! then from fixed defaults. The first signal found wins; conflicting
//! signals are never reconciled.
//!
//! Inference is total: it always produces a value and never fails. History
//! lookups that fail count as "no information".

mod bootstrap;
pub mod history;
pub mod patterns;


use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::debug;

use crate::spec::SpecStatus;

pub use bootstrap::{bootstrap_document, BootstrapOutcome};
pub use history::{HistoryQuery, SpecHistory, StatusTransition};
pub use patterns::InferenceSource;

/// Best-effort metadata for a document without a valid header
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InferredMetadata {
    pub status: SpecStatus,
    pub created_date: NaiveDate,
    pub status_source: InferenceSource,
    pub date_source: InferenceSource,
}

/// Infer metadata, using today's date as the final fallback
pub fn infer(content: &str, history: Option<HistoryQuery<'_>>) -> InferredMetadata {
    infer_on(content, history, Utc::now().date_naive())
}

/// Infer metadata with an explicit fallback date
pub fn infer_on(
    content: &str,
    history: Option<HistoryQuery<'_>>,
    today: NaiveDate,
) -> InferredMetadata {
    let mut history = history.map(LazyHistory::new);

    let (status, status_source) = patterns::STATUS_RULES
        .iter()
        .find_map(|(source, extract)| extract(content).map(|status| (status, *source)))
        .or_else(|| {
            history
                .as_mut()
                .and_then(LazyHistory::last_status)
                .map(|status| (status, InferenceSource::History))
        })
        .unwrap_or((SpecStatus::Planned, InferenceSource::Default));

    let (created_date, date_source) = patterns::DATE_RULES
        .iter()
        .find_map(|(source, extract)| extract(content).map(|date| (date, *source)))
        .or_else(|| {
            history
                .as_mut()
                .and_then(LazyHistory::first_commit_date)
                .map(|date| (date, InferenceSource::History))
        })
        .unwrap_or((today, InferenceSource::Default));

    InferredMetadata {
        status,
        created_date,
        status_source,
        date_source,
    }
}

/// Defers every backend call until content patterns have run out, and asks
/// whether the file is tracked at most once.
struct LazyHistory<'a> {
    query: HistoryQuery<'a>,
    tracked: Option<bool>,
}

impl<'a> LazyHistory<'a> {
    fn new(query: HistoryQuery<'a>) -> Self {
        Self {
            query,
            tracked: None,
        }
    }

    fn is_tracked(&mut self) -> bool {
        if self.tracked.is_none() {
            let tracked = match self.query.backend.file_exists_in_history(self.query.path) {
                Ok(tracked) => tracked,
                Err(e) => {
                    debug!(path = %self.query.path.display(), error = %e, "History lookup failed");
                    false
                }
            };
            self.tracked = Some(tracked);
        }
        self.tracked == Some(true)
    }

    fn last_status(&mut self) -> Option<SpecStatus> {
        if !self.is_tracked() {
            return None;
        }
        match self.query.backend.status_transitions(self.query.path) {
            Ok(transitions) => transitions.last().map(|t| t.status),
            Err(e) => {
                debug!(path = %self.query.path.display(), error = %e, "Status history unavailable");
                None
            }
        }
    }

    fn first_commit_date(&mut self) -> Option<NaiveDate> {
        if !self.is_tracked() {
            return None;
        }
        match self.query.backend.first_commit_timestamp(self.query.path) {
            Ok(timestamp) => timestamp.map(|t| t.date_naive()),
            Err(e) => {
                debug!(path = %self.query.path.display(), error = %e, "First commit unavailable");
                None
            }
        }
    }
}
