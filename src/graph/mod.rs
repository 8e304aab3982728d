//! Project-wide relationship graph built from per-spec `depends_on` declarations
//!
//! `required_by` is never authored; it is the inverse of `depends_on` and is
//! recomputed on every build. The build is a single pass over declared edges
//! and never traverses, so cycles cost nothing here.
//!
//! ## Module Organization
//!
//! - `resolve`: turning short references (`045`) into full identifiers before a build
//! - `traversal`: transitive queries and cycle reporting for consumers of a built map

mod resolve;
pub mod traversal;


use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

use crate::spec::SpecRecord;

pub use resolve::{resolve_identifier, resolve_references};

/// Relationships of one spec
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationships {
    /// Outgoing edges in declaration order, dangling targets included
    pub depends_on: Vec<String>,
    /// Known specs declaring a dependency on this one
    pub required_by: Vec<String>,
    /// Symmetric soft links
    pub related: Vec<String>,
}

/// Identifier -> relationships for every known spec
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RelationshipMap {
    entries: BTreeMap<String, Relationships>,
}

/// A `depends_on` entry naming a spec that is not in the map
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DanglingReference {
    pub source: String,
    pub target: String,
}

impl RelationshipMap {
    /// Build the map from every spec's declarations.
    ///
    /// - each `depends_on` entry `B` of spec `A` is kept in `A.depends_on`
    /// - `A` is added to `B.required_by` only when `B` is a known spec
    /// - self-references are dropped from both directions
    /// - repeated declarations of the same edge collapse into one
    ///
    /// Never fails; dangling targets and cycles are valid data.
    pub fn build(records: &[SpecRecord]) -> Self {
        let known: HashSet<&str> = records.iter().map(|r| r.id.as_str()).collect();
        let mut entries: BTreeMap<String, Relationships> = records
            .iter()
            .map(|r| (r.id.clone(), Relationships::default()))
            .collect();

        for record in records {
            let source = record.id.as_str();

            for target in &record.metadata.depends_on {
                if target == source {
                    debug!(spec = %source, "Dropping self-dependency");
                    continue;
                }

                if let Some(entry) = entries.get_mut(source) {
                    push_unique(&mut entry.depends_on, target);
                }
                if known.contains(target.as_str()) {
                    if let Some(entry) = entries.get_mut(target) {
                        push_unique(&mut entry.required_by, source);
                    }
                }
            }

            for target in &record.metadata.related {
                if target == source {
                    continue;
                }

                if let Some(entry) = entries.get_mut(source) {
                    push_unique(&mut entry.related, target);
                }
                if let Some(entry) = entries.get_mut(target) {
                    push_unique(&mut entry.related, source);
                }
            }
        }

        Self { entries }
    }

    pub fn get(&self, id: &str) -> Option<&Relationships> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn depends_on(&self, id: &str) -> &[String] {
        self.entries
            .get(id)
            .map(|r| r.depends_on.as_slice())
            .unwrap_or_default()
    }

    pub fn required_by(&self, id: &str) -> &[String] {
        self.entries
            .get(id)
            .map(|r| r.required_by.as_slice())
            .unwrap_or_default()
    }

    pub fn related(&self, id: &str) -> &[String] {
        self.entries
            .get(id)
            .map(|r| r.related.as_slice())
            .unwrap_or_default()
    }

    /// Identifiers in sorted order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Relationships)> {
        self.entries.iter().map(|(id, r)| (id.as_str(), r))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `depends_on` entries whose target is not a known spec
    pub fn dangling(&self) -> Vec<DanglingReference> {
        self.entries
            .iter()
            .flat_map(|(source, rel)| {
                rel.depends_on
                    .iter()
                    .filter(|target| !self.entries.contains_key(*target))
                    .map(|target| DanglingReference {
                        source: source.clone(),
                        target: target.clone(),
                    })
            })
            .collect()
    }
}

fn push_unique(list: &mut Vec<String>, value: &str) {
    if !list.iter().any(|existing| existing == value) {
        list.push(value.to_string());
    }
}
