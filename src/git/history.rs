//! Spec status and age recovered from `git log`
//!
//! Status transitions come from `status:` / `**Status**:` lines added in
//! each commit's diff. Commits whose diff carries no such line fall back to
//! their subject (`mark complete`, `status: done`, `→ in-progress`).

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::debug;

use super::runner::{git_stdout, git_succeeds};
use crate::infer::patterns::{inline_status, line_status};
use crate::infer::{SpecHistory, StatusTransition};
use crate::spec::SpecStatus;

/// Starts every commit record in the log format below
const RECORD_SEPARATOR: char = '\u{1e}';
const FIELD_SEPARATOR: char = '\u{1f}';
const LOG_FORMAT: &str = "--format=%x1e%H%x1f%cI%x1f%s";

/// Subject-line patterns, tried in order
static SUBJECT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\bmark(?:ed|s)?\s+(?:as\s+)?([\w-]+)",
        r"(?i)\bstatus\s*:\s*([\w-]+)",
        r"(?:→|->)\s*([\w-]+)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Invalid regex pattern"))
    .collect()
});

/// History backend for documents inside a git work tree
#[derive(Debug, Clone)]
pub struct GitHistory {
    repo_root: PathBuf,
}

impl GitHistory {
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
        }
    }

    /// Locate the enclosing work tree of `start`, if any
    pub fn discover(start: &Path) -> Option<Self> {
        if !git_succeeds(&["rev-parse", "--is-inside-work-tree"], start) {
            return None;
        }
        match git_stdout(&["rev-parse", "--show-toplevel"], start) {
            Ok(root) if !root.is_empty() => Some(Self::new(root)),
            Ok(_) => None,
            Err(e) => {
                debug!(error = %e, "Could not resolve work tree root");
                None
            }
        }
    }

    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    /// Pathspec for `path`, relative to the work tree root when possible
    fn pathspec(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.repo_root).unwrap_or(path);
        relative.to_string_lossy().into_owned()
    }
}

impl SpecHistory for GitHistory {
    fn file_exists_in_history(&self, path: &Path) -> Result<bool> {
        let spec = self.pathspec(path);
        let out = git_stdout(
            &["log", "--all", "-n", "1", "--format=%H", "--", &spec],
            &self.repo_root,
        )?;
        Ok(!out.is_empty())
    }

    fn status_transitions(&self, path: &Path) -> Result<Vec<StatusTransition>> {
        let spec = self.pathspec(path);
        let out = git_stdout(
            &["log", "--reverse", "-p", "--unified=0", LOG_FORMAT, "--", &spec],
            &self.repo_root,
        )
        .with_context(|| format!("Failed to read history of {spec}"))?;
        Ok(parse_status_log(&out))
    }

    fn first_commit_timestamp(&self, path: &Path) -> Result<Option<DateTime<Utc>>> {
        let spec = self.pathspec(path);
        let out = git_stdout(
            &["log", "--diff-filter=A", "--format=%cI", "--", &spec],
            &self.repo_root,
        )?;

        // Newest first, so the original addition is the last line
        Ok(out.lines().last().and_then(parse_timestamp))
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|t| t.with_timezone(&Utc))
        .ok()
}

/// Parse `git log --reverse -p` output produced with the record format
/// above into status transitions, oldest first.
///
/// Consecutive commits that leave the status unchanged produce a single
/// transition.
pub fn parse_status_log(output: &str) -> Vec<StatusTransition> {
    let mut transitions: Vec<StatusTransition> = Vec::new();

    for record in output.split(RECORD_SEPARATOR).filter(|r| !r.trim().is_empty()) {
        let mut lines = record.lines();
        let Some(header) = lines.next() else {
            continue;
        };
        let mut fields = header.splitn(3, FIELD_SEPARATOR);
        let (Some(_hash), Some(date), subject) = (fields.next(), fields.next(), fields.next())
        else {
            continue;
        };
        let Some(timestamp) = parse_timestamp(date) else {
            debug!(date, "Skipping commit with unparseable date");
            continue;
        };

        let status = status_from_diff(lines).or_else(|| subject.and_then(status_from_subject));
        let Some(status) = status else {
            continue;
        };

        if transitions.last().map(|t| t.status) != Some(status) {
            transitions.push(StatusTransition { status, timestamp });
        }
    }

    transitions
}

/// Last status line added by a commit's diff
fn status_from_diff<'a>(lines: impl Iterator<Item = &'a str>) -> Option<SpecStatus> {
    lines
        .filter(|line| line.starts_with('+') && !line.starts_with("+++"))
        .filter_map(|line| {
            let added = &line[1..];
            inline_status(added).or_else(|| line_status(added))
        })
        .last()
}

fn status_from_subject(subject: &str) -> Option<SpecStatus> {
    SUBJECT_PATTERNS.iter().find_map(|re| {
        re.captures(subject)
            .and_then(|caps| SpecStatus::recognize(&caps[1]))
    })
}
