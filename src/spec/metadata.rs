//! Canonical spec metadata record and its derivation from a parsed header.
//!
//! The record is always re-derived from text; nothing here is mutated after
//! construction.

use chrono::{DateTime, NaiveDate};
use serde::Serialize;

use super::status::{SpecPriority, SpecStatus};
use crate::parser::value::{Mapping, Value};

/// Candidate header keys per logical field, in precedence order.
///
/// The first key present in the header wins and every later candidate is
/// ignored, even when it holds a different value. Values are never merged.
pub const FIELD_KEYS: &[(&str, &[&str])] = &[
    ("status", &["status"]),
    ("priority", &["priority"]),
    ("tags", &["tags"]),
    ("created", &["created", "created_at", "createdAt"]),
    ("updated", &["updated", "updated_at", "updatedAt"]),
    ("completed", &["completed", "completed_at", "completedAt"]),
    ("assignee", &["assignee"]),
    ("depends_on", &["depends_on", "dependsOn"]),
    ("related", &["related", "relatedTo"]),
];

/// Return the value of the first present candidate key for `field`
pub fn field_value<'a>(map: &'a Mapping, field: &str) -> Option<&'a Value> {
    FIELD_KEYS
        .iter()
        .find(|(name, _)| *name == field)
        .and_then(|(_, keys)| keys.iter().find_map(|key| map.get(*key)))
}

fn is_known_key(key: &str) -> bool {
    FIELD_KEYS
        .iter()
        .any(|(_, keys)| keys.iter().any(|candidate| *candidate == key))
}

/// Metadata for one spec document
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecMetadata {
    pub status: SpecStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<SpecPriority>,
    /// Insertion-ordered, duplicates removed
    pub tags: Vec<String>,
    #[serde(rename = "createdAt")]
    pub created: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    pub depends_on: Vec<String>,
    pub related: Vec<String>,
    /// Header keys with no canonical field, kept verbatim
    #[serde(skip_serializing_if = "Mapping::is_empty")]
    pub extra: Mapping,
}

impl SpecMetadata {
    /// Derive a metadata record from a parsed header mapping.
    ///
    /// Never fails: unknown status values become `Planned`, unparseable
    /// dates become `None`.
    pub fn from_mapping(map: &Mapping) -> Self {
        let status = field_value(map, "status")
            .and_then(Value::to_scalar_string)
            .map(|raw| SpecStatus::normalize(&raw))
            .unwrap_or_default();

        let priority = field_value(map, "priority")
            .and_then(Value::to_scalar_string)
            .and_then(|raw| SpecPriority::recognize(&raw));

        let extra = map
            .iter()
            .filter(|(key, _)| !is_known_key(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Self {
            status,
            priority,
            tags: dedupe(normalize_list(field_value(map, "tags"))),
            created: field_value(map, "created").and_then(parse_date_value),
            updated: field_value(map, "updated").and_then(parse_date_value),
            completed: field_value(map, "completed").and_then(parse_date_value),
            assignee: field_value(map, "assignee")
                .and_then(Value::to_scalar_string)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            depends_on: normalize_list(field_value(map, "depends_on")),
            related: normalize_list(field_value(map, "related")),
            extra,
        }
    }

    /// True when the header's raw `status` is a known synonym
    pub fn status_recognized(map: &Mapping) -> bool {
        field_value(map, "status")
            .and_then(Value::to_scalar_string)
            .is_some_and(|raw| SpecStatus::recognize(&raw).is_some())
    }
}

/// Normalize a list-valued field.
///
/// Accepts a block or flow list, or a single comma-separated scalar. Entries
/// are coerced to strings and trimmed; empty entries are dropped.
pub fn normalize_list(value: Option<&Value>) -> Vec<String> {
    let Some(value) = value else {
        return Vec::new();
    };

    let raw: Vec<String> = match value {
        Value::List(items) => items.iter().filter_map(Value::to_scalar_string).collect(),
        Value::String(s) => s.split(',').map(str::to_string).collect(),
        other => other.to_scalar_string().into_iter().collect(),
    };

    raw.into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn dedupe(items: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

fn parse_date_value(value: &Value) -> Option<NaiveDate> {
    value.as_str().and_then(parse_date)
}

/// Parse `YYYY-MM-DD`, or the date part of an RFC 3339 timestamp
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.date_naive());
    }

    raw.get(..10)
        .filter(|_| raw[10..].starts_with(['T', ' ']))
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}
