//! Individual validation checks. Each one only appends to the sink.

use std::collections::HashSet;

use super::{
    uppercase_filename, Issue, IssueKind, SpecFile, SubDocumentInfo, ValidationResult,
    ValidatorConfig,
};
use crate::parser::frontmatter::body;
use crate::parser::markdown::{extract_links, same_directory_target};

#[derive(Debug, Default)]
pub(super) struct IssueSink {
    errors: Vec<Issue>,
    warnings: Vec<Issue>,
}

impl IssueSink {
    fn error(&mut self, issue: Issue) {
        self.errors.push(issue);
    }

    fn warn(&mut self, issue: Issue) {
        self.warnings.push(issue);
    }

    pub(super) fn finish(self) -> ValidationResult {
        ValidationResult::new(self.errors, self.warnings)
    }
}

/// Sub-document filenames should be uppercase (`DESIGN.md`)
pub(super) fn check_naming(infos: &[SubDocumentInfo], sink: &mut IssueSink) {
    for info in infos.iter().filter(|i| !i.is_uppercase) {
        let suggested = uppercase_filename(&info.filename);
        sink.warn(
            Issue::new(
                IssueKind::Naming,
                format!(
                    "Sub-spec filename '{}' should be uppercase",
                    info.filename
                ),
            )
            .with_suggestion(format!("Rename to {suggested}"))
            .for_file(&info.filename),
        );
    }
}

/// Token-size classification: below warning passes, below error warns, else fails
pub(super) fn check_size(infos: &[SubDocumentInfo], config: &ValidatorConfig, sink: &mut IssueSink) {
    for info in infos {
        if info.token_count >= config.error_threshold {
            sink.error(
                Issue::new(
                    IssueKind::Complexity,
                    format!(
                        "'{}' complexity too high: ~{} tokens (limit {})",
                        info.filename, info.token_count, config.error_threshold
                    ),
                )
                .with_suggestion("Split this sub-spec into smaller focused documents")
                .for_file(&info.filename),
            );
        } else if info.token_count >= config.warning_threshold {
            sink.warn(
                Issue::new(
                    IssueKind::Complexity,
                    format!(
                        "'{}' has elevated complexity: ~{} tokens (warning at {})",
                        info.filename, info.token_count, config.warning_threshold
                    ),
                )
                .with_suggestion("Consider splitting before it grows further")
                .for_file(&info.filename),
            );
        }
    }
}

/// Documents longer than `max_lines` get a split suggestion
pub(super) fn check_line_counts(
    primary: &SpecFile,
    infos: &[SubDocumentInfo],
    config: &ValidatorConfig,
    sink: &mut IssueSink,
) {
    let primary_lines = super::count_lines(&primary.content);
    let counts = std::iter::once((primary.filename.as_str(), primary_lines))
        .chain(infos.iter().map(|i| (i.filename.as_str(), i.line_count)));

    for (filename, lines) in counts {
        if lines > config.max_lines {
            sink.warn(
                Issue::new(
                    IssueKind::LineCount,
                    format!(
                        "'{filename}' has {lines} lines (max {})",
                        config.max_lines
                    ),
                )
                .with_suggestion("Move detailed sections into sub-spec files")
                .for_file(filename),
            );
        }
    }
}

/// Every sub-document should be linked from the primary document body
pub(super) fn check_orphans(primary: &SpecFile, infos: &[SubDocumentInfo], sink: &mut IssueSink) {
    let linked: HashSet<String> = extract_links(body(&primary.content))
        .iter()
        .filter_map(|link| same_directory_target(&link.target))
        .collect();

    for info in infos.iter().filter(|i| !linked.contains(&i.filename)) {
        sink.warn(
            Issue::new(
                IssueKind::Orphan,
                format!(
                    "Orphaned sub-spec: '{}' is not linked from {}",
                    info.filename, primary.filename
                ),
            )
            .with_suggestion(format!(
                "Add a link like [{0}](./{0}) to {1}",
                info.filename, primary.filename
            ))
            .for_file(&info.filename),
        );
    }
}

/// Markdown links between sub-documents must point at files in the set.
///
/// The known set is the primary document plus the `.md` siblings the loader
/// lists. Links to anything else (images, diagrams, text files) are never
/// reported, because such files are not in the set even when they exist.
pub(super) fn check_cross_references(
    primary: &SpecFile,
    infos: &[SubDocumentInfo],
    sink: &mut IssueSink,
) {
    let known: HashSet<&str> = infos
        .iter()
        .map(|i| i.filename.as_str())
        .chain(std::iter::once(primary.filename.as_str()))
        .collect();

    for info in infos {
        let mut reported = HashSet::new();
        for target in &info.references {
            if !target.to_lowercase().ends_with(".md") || known.contains(target.as_str()) {
                continue;
            }
            if !reported.insert(target.as_str()) {
                continue;
            }
            sink.warn(
                Issue::new(
                    IssueKind::CrossReference,
                    format!(
                        "Broken reference in '{}': '{target}' does not exist",
                        info.filename
                    ),
                )
                .with_suggestion(format!(
                    "Create {target} or fix the link in {}",
                    info.filename
                ))
                .for_file(&info.filename),
            );
        }
    }
}
