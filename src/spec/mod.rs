//! Spec document data model

pub mod metadata;
pub mod status;

use serde::Serialize;

pub use metadata::{field_value, normalize_list, parse_date, SpecMetadata, FIELD_KEYS};
pub use status::{SpecPriority, SpecStatus};

/// A spec identifier (its directory name) paired with its derived metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecRecord {
    pub id: String,
    pub metadata: SpecMetadata,
}

impl SpecRecord {
    pub fn new(id: impl Into<String>, metadata: SpecMetadata) -> Self {
        Self {
            id: id.into(),
            metadata,
        }
    }
}
