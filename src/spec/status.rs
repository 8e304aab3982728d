use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle status of a spec document.
///
/// Raw header values are mapped onto these four through [`STATUS_SYNONYMS`];
/// anything unrecognized normalizes to `Planned`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpecStatus {
    #[default]
    Planned,
    InProgress,
    Complete,
    Archived,
}

/// Synonym table for status normalization.
///
/// Keys are compared after lowercasing and turning `_` and spaces into `-`.
const STATUS_SYNONYMS: &[(&str, SpecStatus)] = &[
    ("planned", SpecStatus::Planned),
    ("plan", SpecStatus::Planned),
    ("proposed", SpecStatus::Planned),
    ("pending", SpecStatus::Planned),
    ("draft", SpecStatus::Planned),
    ("todo", SpecStatus::Planned),
    ("backlog", SpecStatus::Planned),
    ("new", SpecStatus::Planned),
    ("open", SpecStatus::Planned),
    ("in-progress", SpecStatus::InProgress),
    ("inprogress", SpecStatus::InProgress),
    ("wip", SpecStatus::InProgress),
    ("active", SpecStatus::InProgress),
    ("started", SpecStatus::InProgress),
    ("doing", SpecStatus::InProgress),
    ("ongoing", SpecStatus::InProgress),
    ("implementing", SpecStatus::InProgress),
    ("complete", SpecStatus::Complete),
    ("completed", SpecStatus::Complete),
    ("done", SpecStatus::Complete),
    ("accepted", SpecStatus::Complete),
    ("approved", SpecStatus::Complete),
    ("finished", SpecStatus::Complete),
    ("implemented", SpecStatus::Complete),
    ("shipped", SpecStatus::Complete),
    ("resolved", SpecStatus::Complete),
    ("closed", SpecStatus::Complete),
    ("archived", SpecStatus::Archived),
    ("archive", SpecStatus::Archived),
    ("superseded", SpecStatus::Archived),
    ("deprecated", SpecStatus::Archived),
    ("rejected", SpecStatus::Archived),
    ("obsolete", SpecStatus::Archived),
    ("abandoned", SpecStatus::Archived),
    ("cancelled", SpecStatus::Archived),
    ("canceled", SpecStatus::Archived),
    ("withdrawn", SpecStatus::Archived),
];

fn normalize_key(raw: &str) -> String {
    raw.trim()
        .trim_matches(|c: char| c == '*' || c == '`' || c == '.' || c == '"' || c == '\'')
        .to_lowercase()
        .replace(['_', ' '], "-")
}

impl SpecStatus {
    pub const ALL: [SpecStatus; 4] = [
        SpecStatus::Planned,
        SpecStatus::InProgress,
        SpecStatus::Complete,
        SpecStatus::Archived,
    ];

    /// Look up a raw status word; `None` when it is not a known synonym
    pub fn recognize(raw: &str) -> Option<Self> {
        let key = normalize_key(raw);
        STATUS_SYNONYMS
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, status)| *status)
    }

    /// Normalize a raw status word, defaulting to `Planned`
    pub fn normalize(raw: &str) -> Self {
        Self::recognize(raw).unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SpecStatus::Planned => "planned",
            SpecStatus::InProgress => "in-progress",
            SpecStatus::Complete => "complete",
            SpecStatus::Archived => "archived",
        }
    }
}

impl std::fmt::Display for SpecStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpecStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::recognize(s).ok_or_else(|| format!("Unknown status: '{s}'"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecPriority {
    Low,
    Medium,
    High,
    Critical,
}

impl SpecPriority {
    pub fn recognize(raw: &str) -> Option<Self> {
        match normalize_key(raw).as_str() {
            "low" | "p3" | "minor" => Some(SpecPriority::Low),
            "medium" | "med" | "normal" | "p2" => Some(SpecPriority::Medium),
            "high" | "p1" | "major" => Some(SpecPriority::High),
            "critical" | "urgent" | "blocker" | "p0" => Some(SpecPriority::Critical),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SpecPriority::Low => "low",
            SpecPriority::Medium => "medium",
            SpecPriority::High => "high",
            SpecPriority::Critical => "critical",
        }
    }
}

impl std::fmt::Display for SpecPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
