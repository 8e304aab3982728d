//! Content patterns for status and creation-date inference.
//!
//! Each extractor is a pure `fn(&str) -> Option<_>`; the rule tables list them
//! in priority order and the engine stops at the first hit.

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::parser::markdown::MarkdownDocument;
use crate::spec::SpecStatus;

/// Where an inferred value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InferenceSource {
    /// `**Status**: ...` / `**Created**: ...`
    InlineField,
    /// `Status: ...` / `Created: ...` / `Date: ...` at line start
    LineField,
    /// Checked task-list item implying completion
    TaskList,
    /// ADR-style `## Status` / `## Date` section
    AdrSection,
    /// Any `YYYY-MM-DD` in the text
    BareDate,
    /// Version-control history
    History,
    /// Nothing matched
    Default,
}

impl InferenceSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            InferenceSource::InlineField => "inline-field",
            InferenceSource::LineField => "line-field",
            InferenceSource::TaskList => "task-list",
            InferenceSource::AdrSection => "adr-section",
            InferenceSource::BareDate => "bare-date",
            InferenceSource::History => "history",
            InferenceSource::Default => "default",
        }
    }
}

impl std::fmt::Display for InferenceSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub type StatusExtractor = fn(&str) -> Option<SpecStatus>;
pub type DateExtractor = fn(&str) -> Option<NaiveDate>;

pub const STATUS_RULES: &[(InferenceSource, StatusExtractor)] = &[
    (InferenceSource::InlineField, inline_status),
    (InferenceSource::LineField, line_status),
    (InferenceSource::TaskList, task_list_status),
    (InferenceSource::AdrSection, adr_status),
];

pub const DATE_RULES: &[(InferenceSource, DateExtractor)] = &[
    (InferenceSource::InlineField, inline_created),
    (InferenceSource::LineField, line_created),
    (InferenceSource::AdrSection, adr_date),
    (InferenceSource::BareDate, bare_date),
];

/// Status words recognized in an ADR `## Status` section
const ADR_STATUS_VOCABULARY: &[(&str, SpecStatus)] = &[
    ("accepted", SpecStatus::Complete),
    ("approved", SpecStatus::Complete),
    ("done", SpecStatus::Complete),
    ("proposed", SpecStatus::Planned),
    ("pending", SpecStatus::Planned),
    ("draft", SpecStatus::Planned),
    ("superseded", SpecStatus::Archived),
    ("deprecated", SpecStatus::Archived),
    ("rejected", SpecStatus::Archived),
];

static INLINE_STATUS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)\*\*Status:?\*\*\s*:?\s*(.+)$").expect("Invalid regex pattern")
});

static LINE_STATUS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)^\s*Status\s*:\s*(.+)$").expect("Invalid regex pattern"));

static CHECKED_TASK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*[-*+]\s+\[[xX]\]\s+(.+)$").expect("Invalid regex pattern")
});

static COMPLETION_WORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(complete|completed|done|finished|implemented|shipped|released)\b")
        .expect("Invalid regex pattern")
});

static INLINE_CREATED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)\*\*Created(?:\s+(?:at|on))?:?\*\*\s*:?\s*(.+)$")
        .expect("Invalid regex pattern")
});

static LINE_CREATED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^\s*(?:Created|Date)\s*:\s*(.+)$").expect("Invalid regex pattern")
});

static ISO_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{4}-\d{2}-\d{2})\b").expect("Invalid regex pattern"));

static ORDINAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,2})(?:st|nd|rd|th)\b").expect("Invalid regex pattern"));

/// Recognize a status from free text after a label.
///
/// Tries the whole phrase first (`In Progress`), then each word in turn,
/// so decorations such as `✅ Complete` or `Done (2025-01-15)` still resolve.
fn status_from_phrase(phrase: &str) -> Option<SpecStatus> {
    let cleaned: String = phrase
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { ' ' })
        .collect();
    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

    SpecStatus::recognize(&cleaned).or_else(|| {
        cleaned
            .split(' ')
            .find_map(SpecStatus::recognize)
    })
}

pub fn inline_status(text: &str) -> Option<SpecStatus> {
    INLINE_STATUS_RE
        .captures_iter(text)
        .find_map(|caps| status_from_phrase(&caps[1]))
}

pub fn line_status(text: &str) -> Option<SpecStatus> {
    LINE_STATUS_RE
        .captures_iter(text)
        .find_map(|caps| status_from_phrase(&caps[1]))
}

pub fn task_list_status(text: &str) -> Option<SpecStatus> {
    CHECKED_TASK_RE
        .captures_iter(text)
        .any(|caps| COMPLETION_WORD_RE.is_match(&caps[1]))
        .then_some(SpecStatus::Complete)
}

pub fn adr_status(text: &str) -> Option<SpecStatus> {
    let doc = MarkdownDocument::parse(text);
    let line = doc.get_section("Status")?.first_line()?;
    let word = line
        .split(|c: char| !c.is_alphanumeric())
        .find(|w| !w.is_empty())?
        .to_lowercase();

    ADR_STATUS_VOCABULARY
        .iter()
        .find(|(name, _)| *name == word)
        .map(|(_, status)| *status)
}

pub fn inline_created(text: &str) -> Option<NaiveDate> {
    INLINE_CREATED_RE
        .captures_iter(text)
        .find_map(|caps| parse_flexible_date(&caps[1]))
}

pub fn line_created(text: &str) -> Option<NaiveDate> {
    LINE_CREATED_RE
        .captures_iter(text)
        .find_map(|caps| parse_flexible_date(&caps[1]))
}

pub fn adr_date(text: &str) -> Option<NaiveDate> {
    let doc = MarkdownDocument::parse(text);
    let line = doc.get_section("Date")?.first_line()?;
    parse_flexible_date(line)
}

pub fn bare_date(text: &str) -> Option<NaiveDate> {
    ISO_DATE_RE
        .captures_iter(text)
        .find_map(|caps| NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d").ok())
}

/// Parse an ISO date anywhere in `raw`, or a long-form date such as
/// `January 15, 2025`, `15 January 2025` or `Jan 15th, 2025`.
pub fn parse_flexible_date(raw: &str) -> Option<NaiveDate> {
    if let Some(date) = bare_date(raw) {
        return Some(date);
    }

    let cleaned = ORDINAL_RE.replace_all(raw, "$1");
    let cleaned = cleaned
        .trim()
        .trim_matches(|c: char| c == '*' || c == '_' || c == '`' || c == '.');
    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

    const FORMATS: &[&str] = &["%B %d, %Y", "%B %d %Y", "%d %B %Y", "%d %B, %Y"];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&cleaned, fmt).ok())
}
