//! Sub-document quality validation for a single spec
//!
//! A spec is a primary document (`README.md`) plus sibling sub-documents
//! (`DESIGN.md`, `TESTING.md`, ...). Validation only reads the texts it is
//! given and never touches the file system.
//!
//! Only token-size overruns are errors. Naming, line count, orphaned files
//! and broken cross-references are warnings and never fail a spec.

mod checks;
pub mod config;
pub mod tokens;

#[cfg(test)]
mod tests;

use serde::Serialize;

use crate::parser::frontmatter::body;
use crate::parser::markdown::{extract_links, same_directory_target};

pub use config::{ValidatorConfig, ValidatorOverrides};
pub use tokens::{count_lines, estimate_tokens};

/// A file belonging to a spec, as supplied by the loader
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecFile {
    pub filename: String,
    pub content: String,
}

impl SpecFile {
    pub fn new(filename: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }
}

/// Derived facts about one sub-document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubDocumentInfo {
    pub filename: String,
    pub line_count: usize,
    pub token_count: usize,
    pub is_uppercase: bool,
    /// Same-directory link targets found in the body, in order of appearance
    pub references: Vec<String>,
}

impl SubDocumentInfo {
    pub fn analyze(file: &SpecFile) -> Self {
        let references = extract_links(body(&file.content))
            .iter()
            .filter_map(|link| same_directory_target(&link.target))
            .collect();

        Self {
            filename: file.filename.clone(),
            line_count: count_lines(&file.content),
            token_count: estimate_tokens(&file.content),
            is_uppercase: is_uppercase_filename(&file.filename),
            references,
        }
    }
}

/// Uppercase check on the filename stem; the extension is ignored
pub fn is_uppercase_filename(filename: &str) -> bool {
    let (stem, _) = split_extension(filename);
    !stem.chars().any(char::is_lowercase)
}

/// Suggested name: uppercase stem, extension untouched
pub fn uppercase_filename(filename: &str) -> String {
    match split_extension(filename) {
        (stem, Some(ext)) => format!("{}.{ext}", stem.to_uppercase()),
        (stem, None) => stem.to_uppercase(),
    }
}

fn split_extension(filename: &str) -> (&str, Option<&str>) {
    match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (filename, None),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueKind {
    Naming,
    Complexity,
    LineCount,
    Orphan,
    CrossReference,
}

/// One validation finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub kind: IssueKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// File the issue is about
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl Issue {
    pub fn new(kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            suggestion: None,
            file: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn for_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, " ({suggestion})")?;
        }
        Ok(())
    }
}

/// Result of validating one spec.
///
/// `passed` is derived from `errors` at construction and cannot drift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    passed: bool,
    errors: Vec<Issue>,
    warnings: Vec<Issue>,
}

impl ValidationResult {
    pub fn new(errors: Vec<Issue>, warnings: Vec<Issue>) -> Self {
        Self {
            passed: errors.is_empty(),
            errors,
            warnings,
        }
    }

    pub fn passed(&self) -> bool {
        self.passed
    }

    pub fn errors(&self) -> &[Issue] {
        &self.errors
    }

    pub fn warnings(&self) -> &[Issue] {
        &self.warnings
    }
}

/// Validate a spec's sub-documents against `config`.
///
/// Every check runs regardless of what earlier checks found; issues from all
/// of them accumulate into one result.
pub fn validate(primary: &SpecFile, siblings: &[SpecFile], config: &ValidatorConfig) -> ValidationResult {
    let infos: Vec<SubDocumentInfo> = siblings.iter().map(SubDocumentInfo::analyze).collect();
    let mut sink = checks::IssueSink::default();

    checks::check_naming(&infos, &mut sink);
    checks::check_size(&infos, config, &mut sink);
    checks::check_line_counts(primary, &infos, config, &mut sink);
    checks::check_orphans(primary, &infos, &mut sink);
    if config.check_cross_references {
        checks::check_cross_references(primary, &infos, &mut sink);
    }

    sink.finish()
}
