//! Reference resolution applied by callers before building the graph

use std::collections::HashSet;

use crate::spec::SpecRecord;

/// Leading digit run of an identifier, parsed as a number (`"045-x"` -> 45)
fn number_prefix(id: &str) -> Option<u64> {
    let digits: String = id.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    let rest = &id[digits.len()..];
    if !rest.is_empty() && !rest.starts_with('-') {
        return None;
    }
    digits.parse().ok()
}

/// Resolve a reference against the known spec identifiers.
///
/// Tried in order:
/// 1. exact match
/// 2. bare number (`45`, `045`) against the identifiers' numeric prefix
/// 3. bare name (`auth-flow`) against identifiers shaped `NNN-auth-flow`
///
/// Returns `None` when nothing matches or when steps 2/3 match more than one spec.
pub fn resolve_identifier(reference: &str, known: &[&str]) -> Option<String> {
    let reference = reference.trim();
    if reference.is_empty() {
        return None;
    }

    if known.contains(&reference) {
        return Some(reference.to_string());
    }

    let candidates: Vec<&str> = if reference.chars().all(|c| c.is_ascii_digit()) {
        let wanted: u64 = reference.parse().ok()?;
        known
            .iter()
            .copied()
            .filter(|id| number_prefix(id) == Some(wanted))
            .collect()
    } else {
        let suffix = format!("-{reference}");
        known
            .iter()
            .copied()
            .filter(|id| id.ends_with(&suffix) && number_prefix(id).is_some())
            .collect()
    };

    match candidates.as_slice() {
        [single] => Some(single.to_string()),
        _ => None,
    }
}

/// Rewrite every `depends_on` and `related` entry to its full identifier.
///
/// Unresolvable entries are kept verbatim so they still show up as dangling
/// references after the build.
pub fn resolve_references(records: &[SpecRecord]) -> Vec<SpecRecord> {
    let known: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();

    let resolve_all = |refs: &[String]| -> Vec<String> {
        let mut seen = HashSet::new();
        refs.iter()
            .map(|r| resolve_identifier(r, &known).unwrap_or_else(|| r.clone()))
            .filter(|r| seen.insert(r.clone()))
            .collect()
    };

    records
        .iter()
        .map(|record| {
            let mut metadata = record.metadata.clone();
            metadata.depends_on = resolve_all(&record.metadata.depends_on);
            metadata.related = resolve_all(&record.metadata.related);
            SpecRecord::new(record.id.clone(), metadata)
        })
        .collect()
}
