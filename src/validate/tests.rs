//! Tests for sub-document validation

use super::*;

const README_HEADER: &str = "---\nstatus: in-progress\ncreated: '2025-11-01'\n---\n";

fn readme(body: &str) -> SpecFile {
    SpecFile::new("README.md", format!("{README_HEADER}# Spec\n\n{body}\n"))
}

fn lines(count: usize) -> String {
    (0..count)
        .map(|i| format!("Line {i} of text"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn words(count: usize) -> String {
    vec!["word"; count].join(" ")
}

fn complexity_issues(issues: &[Issue]) -> usize {
    issues
        .iter()
        .filter(|i| i.kind == IssueKind::Complexity)
        .count()
}

#[test]
fn test_orphaned_sub_spec_warns_but_passes() {
    let primary = readme("No links here.");
    let siblings = vec![SpecFile::new("DESIGN.md", lines(350))];

    let result = validate(&primary, &siblings, &ValidatorConfig::default());

    assert!(result.passed());
    assert!(result.errors().is_empty());
    assert_eq!(result.warnings().len(), 1);
    assert!(result.warnings()[0].message.contains("Orphaned"));
    assert_eq!(result.warnings()[0].file.as_deref(), Some("DESIGN.md"));
}

#[test]
fn test_lowercase_filename_warns_with_suggestion() {
    let primary = readme("See [design](./design.md).");
    let siblings = vec![SpecFile::new("design.md", "# Design\n\nShort.\n")];

    let result = validate(&primary, &siblings, &ValidatorConfig::default());

    assert!(result.passed());
    assert_eq!(result.warnings().len(), 1);
    let warning = &result.warnings()[0];
    assert!(warning.message.contains("uppercase"));
    assert!(warning.suggestion.as_deref().unwrap().contains("DESIGN.md"));
}

#[test]
fn test_mixed_case_filename_warns() {
    let primary = readme("[x](Design-Notes.md)");
    let siblings = vec![SpecFile::new("Design-Notes.md", "text")];

    let result = validate(&primary, &siblings, &ValidatorConfig::default());
    assert!(result.passed());
    assert_eq!(result.warnings()[0].kind, IssueKind::Naming);
    assert_eq!(
        result.warnings()[0].suggestion.as_deref(),
        Some("Rename to DESIGN-NOTES.md")
    );
}

#[test]
fn test_oversized_sub_spec_fails() {
    let primary = readme("[impl](IMPLEMENTATION.md)");
    let siblings = vec![SpecFile::new("IMPLEMENTATION.md", words(5500))];

    let result = validate(&primary, &siblings, &ValidatorConfig::default());

    assert!(!result.passed());
    assert_eq!(result.errors().len(), 1);
    assert!(result.errors()[0].message.contains("complexity too high"));
}

#[test]
fn test_elevated_complexity_warns() {
    let primary = readme("[impl](IMPLEMENTATION.md)");
    let siblings = vec![SpecFile::new("IMPLEMENTATION.md", words(4000))];

    let result = validate(&primary, &siblings, &ValidatorConfig::default());

    assert!(result.passed());
    assert_eq!(result.warnings().len(), 1);
    assert!(result.warnings()[0].message.contains("elevated complexity"));
}

#[test]
fn test_threshold_monotonicity() {
    let triples = [(10, 20), (100, 101), (3500, 5000), (1, 2), (250, 900)];

    for (warning_threshold, error_threshold) in triples {
        let config = ValidatorConfig {
            warning_threshold,
            error_threshold,
            ..ValidatorConfig::default()
        };
        let probes = [
            0,
            warning_threshold - 1,
            warning_threshold,
            (warning_threshold + error_threshold) / 2,
            error_threshold - 1,
            error_threshold,
            error_threshold + 7,
        ];

        for size in probes {
            let primary = readme("[a](A.md)");
            let siblings = vec![SpecFile::new("A.md", words(size))];
            let result = validate(&primary, &siblings, &config);

            let errors = complexity_issues(result.errors());
            let warnings = complexity_issues(result.warnings());

            if size < warning_threshold {
                assert_eq!((errors, warnings), (0, 0), "size {size} for {config:?}");
            } else if size < error_threshold {
                assert_eq!((errors, warnings), (0, 1), "size {size} for {config:?}");
            } else {
                assert_eq!((errors, warnings), (1, 0), "size {size} for {config:?}");
            }
        }
    }
}

#[test]
fn test_broken_cross_reference_warns() {
    let primary = readme("[design](DESIGN.md) [testing](TESTING.md)");
    let siblings = vec![
        SpecFile::new(
            "DESIGN.md",
            "See [testing](./TESTING.md), [readme](README.md) and [api](API.md).\nAgain [api](API.md#x).",
        ),
        SpecFile::new("TESTING.md", "Back to [design](DESIGN.md). ![img](flow.png)"),
    ];

    let result = validate(&primary, &siblings, &ValidatorConfig::default());

    assert!(result.passed());
    assert_eq!(result.warnings().len(), 1);
    let warning = &result.warnings()[0];
    assert_eq!(warning.kind, IssueKind::CrossReference);
    assert!(warning.message.contains("API.md"));
    assert!(warning.message.contains("DESIGN.md"));
}

#[test]
fn test_non_markdown_link_targets_are_not_checked() {
    let primary = readme("[design](DESIGN.md)");
    let siblings = vec![SpecFile::new(
        "DESIGN.md",
        "[schema](schema.json) [notes](./NOTES.txt) ![arch](arch.svg) [gone](GONE.md)",
    )];

    let result = validate(&primary, &siblings, &ValidatorConfig::default());

    assert_eq!(result.warnings().len(), 1);
    assert!(result.warnings()[0].message.contains("GONE.md"));
}

#[test]
fn test_cross_reference_check_is_skippable() {
    let primary = readme("[design](design.md)");
    let siblings = vec![SpecFile::new("design.md", "[gone](GONE.md)")];
    let config = ValidatorConfig {
        check_cross_references: false,
        ..ValidatorConfig::default()
    };

    let result = validate(&primary, &siblings, &config);

    // Naming still reported, broken link not
    assert_eq!(result.warnings().len(), 1);
    assert_eq!(result.warnings()[0].kind, IssueKind::Naming);
}

#[test]
fn test_issues_accumulate_across_checks() {
    let primary = readme("nothing linked");
    let siblings = vec![
        SpecFile::new("notes.md", format!("{}\n[x](MISSING.md)", words(6000))),
        SpecFile::new("PLAN.md", lines(450)),
    ];

    let result = validate(&primary, &siblings, &ValidatorConfig::default());

    assert!(!result.passed());
    assert_eq!(result.errors().len(), 1);

    let kinds: Vec<IssueKind> = result.warnings().iter().map(|w| w.kind).collect();
    assert_eq!(
        kinds,
        vec![
            IssueKind::Naming,
            IssueKind::LineCount,
            IssueKind::Orphan,
            IssueKind::Orphan,
            IssueKind::CrossReference,
        ]
    );
}

#[test]
fn test_orphan_detection_accepts_both_link_forms() {
    let primary = readme("[a](./A.md) and [b](B.md#section)");
    let siblings = vec![SpecFile::new("A.md", "a"), SpecFile::new("B.md", "b")];

    let result = validate(&primary, &siblings, &ValidatorConfig::default());
    assert!(result.warnings().is_empty());
}

#[test]
fn test_links_in_primary_frontmatter_do_not_count() {
    let primary = SpecFile::new(
        "README.md",
        "---\nstatus: planned\nnote: \"[a](A.md)\"\n---\n# Spec\n",
    );
    let siblings = vec![SpecFile::new("A.md", "a")];

    let result = validate(&primary, &siblings, &ValidatorConfig::default());
    assert_eq!(result.warnings()[0].kind, IssueKind::Orphan);
}

#[test]
fn test_long_primary_document_warns() {
    let primary = SpecFile::new("README.md", lines(401));
    let result = validate(&primary, &[], &ValidatorConfig::default());

    assert!(result.passed());
    assert_eq!(result.warnings().len(), 1);
    assert_eq!(result.warnings()[0].kind, IssueKind::LineCount);
}

#[test]
fn test_no_siblings_passes_clean() {
    let result = validate(&readme("Just a readme."), &[], &ValidatorConfig::default());
    assert!(result.passed());
    assert!(result.warnings().is_empty());
}

#[test]
fn test_sub_document_info() {
    let info = SubDocumentInfo::analyze(&SpecFile::new(
        "api.md",
        "# API\n[d](./DESIGN.md) [ext](https://x.dev) [up](../README.md)\n",
    ));

    assert_eq!(info.line_count, 2);
    assert!(!info.is_uppercase);
    assert_eq!(info.references, vec!["DESIGN.md"]);
    assert!(info.token_count > 0);
}

#[test]
fn test_uppercase_helpers() {
    assert!(is_uppercase_filename("DESIGN.md"));
    assert!(is_uppercase_filename("API-V2.md"));
    assert!(!is_uppercase_filename("Design.md"));
    assert_eq!(uppercase_filename("testing.md"), "TESTING.md");
    assert_eq!(uppercase_filename("notes"), "NOTES");
}

#[test]
fn test_passed_tracks_errors_only() {
    let result = ValidationResult::new(vec![], vec![Issue::new(IssueKind::Orphan, "w")]);
    assert!(result.passed());
    let result = ValidationResult::new(vec![Issue::new(IssueKind::Complexity, "e")], vec![]);
    assert!(!result.passed());
}
