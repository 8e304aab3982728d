//! Prepend a generated header to documents that lack a valid one

use serde::Serialize;

use super::InferredMetadata;
use crate::parser::frontmatter::{extract, split_frontmatter};
use crate::spec::{SpecStatus, FIELD_KEYS};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "outcome")]
pub enum BootstrapOutcome {
    /// The header is already valid
    Unchanged,
    /// New document text with a usable header
    Bootstrapped { content: String },
    /// The existing header cannot be parsed and needs manual repair
    Malformed { error: String },
}

/// Build a valid header for `content`.
///
/// A recognized `status` or parseable `created` already in the header wins
/// over the inferred value. Every other header line is kept as written.
pub fn bootstrap_document(content: &str, inferred: &InferredMetadata) -> BootstrapOutcome {
    let extracted = extract(content);
    if extracted.has_valid_header {
        return BootstrapOutcome::Unchanged;
    }
    if let Some(error) = extracted.parse_error {
        return BootstrapOutcome::Malformed { error };
    }

    let split = split_frontmatter(content);
    let status_known = split.header.is_some() && !has_problem(&extracted.problems, "status");
    let status = if status_known {
        extracted.metadata.status
    } else {
        inferred.status
    };
    let created = extracted.metadata.created.unwrap_or(inferred.created_date);

    let mut header = render_fields(status, &created.format("%Y-%m-%d").to_string());
    match split.header {
        Some(existing) => {
            header.push_str(&without_fields(existing, &["status", "created"]));
            BootstrapOutcome::Bootstrapped {
                content: format!("---\n{header}---\n{}", split.body),
            }
        }
        None => BootstrapOutcome::Bootstrapped {
            content: format!("---\n{header}---\n\n{content}"),
        },
    }
}

fn has_problem(problems: &[String], field: &str) -> bool {
    problems.iter().any(|p| p.contains(field))
}

fn render_fields(status: SpecStatus, created: &str) -> String {
    format!("status: {status}\ncreated: '{created}'\n")
}

/// Drop top-level entries for `fields` (under any alias key) along with
/// their nested lines.
fn without_fields(header: &str, fields: &[&str]) -> String {
    let keys: Vec<&str> = FIELD_KEYS
        .iter()
        .filter(|(name, _)| fields.contains(name))
        .flat_map(|(_, keys)| keys.iter().copied())
        .collect();

    let mut kept = String::new();
    let mut skipping = false;
    for line in header.split_inclusive('\n') {
        let starts_entry = !line.starts_with([' ', '\t', '-', '#']) && !line.trim().is_empty();
        if starts_entry {
            skipping = top_level_key(line).is_some_and(|key| keys.contains(&key));
        }
        if !skipping {
            kept.push_str(line);
        }
    }

    if !kept.is_empty() && !kept.ends_with('\n') {
        kept.push('\n');
    }
    kept
}

fn top_level_key(line: &str) -> Option<&str> {
    let (key, _) = line.split_once(':')?;
    Some(key.trim().trim_matches(|c| c == '"' || c == '\''))
}
