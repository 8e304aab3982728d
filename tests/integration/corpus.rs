//! Loading a spec tree from disk and running every component over it

use std::fs;
use tempfile::TempDir;

use specgraph::config::{SpecGraphConfig, CONFIG_FILE};
use specgraph::fs::load_specs;
use specgraph::graph::traversal::{downstream, find_cycles, upstream};
use specgraph::graph::{resolve_references, RelationshipMap};
use specgraph::infer::{bootstrap_document, infer_on, BootstrapOutcome};
use specgraph::parser::frontmatter::extract;
use specgraph::spec::SpecStatus;
use specgraph::validate::validate;

use super::helpers::{lines, write_spec};

const HEADER: &str = "---\nstatus: in-progress\ncreated: '2025-11-01'\n---\n";

#[test]
fn test_orphan_and_naming_scenarios_from_disk() {
    let tmp = TempDir::new().unwrap();
    let specs = tmp.path().join("specs");
    write_spec(
        &specs,
        "010-orphan",
        &[
            ("README.md", &format!("{HEADER}# Orphan\n\nNo links.\n")),
            ("DESIGN.md", &lines(350)),
        ],
    );
    write_spec(
        &specs,
        "011-naming",
        &[
            ("README.md", &format!("{HEADER}# Naming\n\n[design](./design.md)\n")),
            ("design.md", "# Design\n"),
        ],
    );

    let config = SpecGraphConfig::load(tmp.path()).unwrap();
    let corpus = load_specs(&config.specs_path(), &config.primary).unwrap();
    assert!(corpus.failures.is_empty());

    let orphan = corpus.get("010-orphan").unwrap();
    let result = validate(&orphan.primary, &orphan.siblings, &config.validation);
    assert!(result.passed());
    assert_eq!(result.warnings().len(), 1);
    assert!(result.warnings()[0].message.contains("Orphaned"));

    let naming = corpus.get("011-naming").unwrap();
    let result = validate(&naming.primary, &naming.siblings, &config.validation);
    assert!(result.passed());
    assert_eq!(result.warnings().len(), 1);
    assert!(result.warnings()[0].message.contains("uppercase"));
    assert!(result.warnings()[0]
        .suggestion
        .as_deref()
        .unwrap()
        .contains("DESIGN.md"));
}

#[test]
fn test_config_file_changes_thresholds_and_layout() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(CONFIG_FILE),
        "[specs]\ndir = \"rfcs\"\nprimary = \"INDEX.md\"\n\n[validation]\nwarning_threshold = 10\nerror_threshold = 20\n",
    )
    .unwrap();
    let words = vec!["word"; 30].join(" ");
    write_spec(
        &tmp.path().join("rfcs"),
        "001-small",
        &[("INDEX.md", "# Small\n[x](EXTRA.md)\n"), ("EXTRA.md", &words)],
    );

    let config = SpecGraphConfig::load(tmp.path()).unwrap();
    let corpus = load_specs(&config.specs_path(), &config.primary).unwrap();
    let spec = corpus.get("001-small").unwrap();
    assert_eq!(spec.primary.filename, "INDEX.md");

    let result = validate(&spec.primary, &spec.siblings, &config.validation);
    assert!(!result.passed());
    assert!(result.errors()[0].message.contains("complexity too high"));
}

#[test]
fn test_cyclic_corpus_builds_and_traverses() {
    let tmp = TempDir::new().unwrap();
    let header = |deps: &str| format!("---\nstatus: planned\ncreated: 2025-01-01\ndepends_on: [{deps}]\n---\n");
    write_spec(tmp.path(), "001-a", &[("README.md", &header("2"))]);
    write_spec(tmp.path(), "002-b", &[("README.md", &header("003-c"))]);
    write_spec(tmp.path(), "003-c", &[("README.md", &header("a"))]);

    let corpus = load_specs(tmp.path(), "README.md").unwrap();
    let records = resolve_references(&corpus.records());
    let map = RelationshipMap::build(&records);

    assert_eq!(map.depends_on("001-a"), ["002-b"]);
    assert_eq!(map.required_by("001-a"), ["003-c"]);
    assert_eq!(map.depends_on("003-c"), ["001-a"]);
    assert_eq!(upstream(&map, "001-a"), vec!["002-b", "003-c"]);
    assert_eq!(downstream(&map, "001-a"), vec!["003-c", "002-b"]);
    assert_eq!(find_cycles(&map), vec![vec!["001-a", "002-b", "003-c", "001-a"]]);

    // Rebuilding gives the same answer
    assert_eq!(RelationshipMap::build(&records), map);
}

#[test]
fn test_legacy_document_inferred_and_bootstrapped() {
    let tmp = TempDir::new().unwrap();
    write_spec(
        tmp.path(),
        "020-legacy",
        &[(
            "README.md",
            "# Legacy\n\n**Status**: Complete\n**Created**: 2025-01-15\n",
        )],
    );

    let corpus = load_specs(tmp.path(), "README.md").unwrap();
    let spec = corpus.get("020-legacy").unwrap();
    assert!(!spec.header.has_header);

    let inferred = infer_on(
        &spec.primary.content,
        None,
        chrono::NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
    );
    assert_eq!(inferred.status, SpecStatus::Complete);
    assert_eq!(inferred.created_date.to_string(), "2025-01-15");

    let BootstrapOutcome::Bootstrapped { content } = bootstrap_document(&spec.primary.content, &inferred)
    else {
        panic!("legacy document should be bootstrapped");
    };
    let header = extract(&content);
    assert!(header.has_valid_header);
    assert_eq!(header.metadata.status, SpecStatus::Complete);

    // A second pass has nothing left to do
    assert_eq!(bootstrap_document(&content, &inferred), BootstrapOutcome::Unchanged);
}

#[test]
fn test_malformed_header_does_not_stop_the_batch() {
    let tmp = TempDir::new().unwrap();
    write_spec(
        tmp.path(),
        "001-bad",
        &[("README.md", "---\ntags:\n  - a\n   - b\n---\n# Bad\n")],
    );
    write_spec(tmp.path(), "002-good", &[("README.md", &format!("{HEADER}# Good\n"))]);

    let corpus = load_specs(tmp.path(), "README.md").unwrap();

    assert_eq!(corpus.specs.len(), 2);
    let bad = corpus.get("001-bad").unwrap();
    assert!(bad.header.has_header);
    assert!(!bad.header.has_valid_header);
    assert!(bad
        .header
        .parse_error
        .as_deref()
        .unwrap()
        .contains("indentation"));
    assert!(corpus.get("002-good").unwrap().header.has_valid_header);
}
