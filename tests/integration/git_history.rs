//! Git-backed history lookups and inference fallback

use chrono::NaiveDate;
use serial_test::serial;
use std::fs;

use specgraph::fs::load_spec;
use specgraph::git::GitHistory;
use specgraph::infer::{infer_on, HistoryQuery, InferenceSource, SpecHistory};
use specgraph::spec::SpecStatus;

use super::helpers::{commit_file, init_test_repo};

const SPEC_PATH: &str = "specs/001-auth/README.md";

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
#[serial]
fn test_status_transitions_from_header_edits() {
    let repo = init_test_repo();
    let root = repo.path();

    commit_file(
        root,
        SPEC_PATH,
        "---\nstatus: planned\n---\n# Auth\n",
        "Add auth spec",
        "2024-01-10T12:00:00+00:00",
    );
    commit_file(
        root,
        SPEC_PATH,
        "---\nstatus: in-progress\n---\n# Auth\n",
        "Start auth",
        "2024-02-01T12:00:00+00:00",
    );
    commit_file(
        root,
        SPEC_PATH,
        "---\nstatus: in-progress\n---\n# Auth\n\nMore detail.\n",
        "Expand auth",
        "2024-02-15T12:00:00+00:00",
    );
    commit_file(
        root,
        SPEC_PATH,
        "---\nstatus: complete\n---\n# Auth\n\nMore detail.\n",
        "Finish",
        "2024-03-01T12:00:00+00:00",
    );

    let history = GitHistory::new(root);
    let path = root.join(SPEC_PATH);

    assert!(history.file_exists_in_history(&path).unwrap());

    let transitions = history.status_transitions(&path).unwrap();
    let statuses: Vec<SpecStatus> = transitions.iter().map(|t| t.status).collect();
    assert_eq!(
        statuses,
        vec![SpecStatus::Planned, SpecStatus::InProgress, SpecStatus::Complete]
    );
    assert_eq!(transitions[2].timestamp.date_naive(), ymd(2024, 3, 1));

    let first = history.first_commit_timestamp(&path).unwrap().unwrap();
    assert_eq!(first.date_naive(), ymd(2024, 1, 10));
}

#[test]
#[serial]
fn test_subject_fallback_and_inference() {
    let repo = init_test_repo();
    let root = repo.path();

    commit_file(
        root,
        SPEC_PATH,
        "# Legacy auth\n\nSome text\n",
        "Add legacy spec",
        "2023-06-01T09:00:00+00:00",
    );
    commit_file(
        root,
        SPEC_PATH,
        "# Legacy auth\n\nSome text\nMore text\n",
        "mark complete",
        "2023-07-01T09:00:00+00:00",
    );

    let history = GitHistory::new(root);
    let path = root.join(SPEC_PATH);
    let content = fs::read_to_string(&path).unwrap();

    let inferred = infer_on(
        &content,
        Some(HistoryQuery::new(&history, &path)),
        ymd(2026, 1, 1),
    );

    assert_eq!(inferred.status, SpecStatus::Complete);
    assert_eq!(inferred.status_source, InferenceSource::History);
    assert_eq!(inferred.created_date, ymd(2023, 6, 1));
    assert_eq!(inferred.date_source, InferenceSource::History);
}

#[test]
#[serial]
fn test_untracked_file_has_no_history() {
    let repo = init_test_repo();
    let root = repo.path();
    let path = root.join("specs/002-new/README.md");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "# New\n").unwrap();

    let history = GitHistory::new(root);
    assert!(!history.file_exists_in_history(&path).unwrap());

    let inferred = infer_on("# New\n", Some(HistoryQuery::new(&history, &path)), ymd(2026, 1, 1));
    assert_eq!(inferred.status, SpecStatus::Planned);
    assert_eq!(inferred.created_date, ymd(2026, 1, 1));
    assert_eq!(inferred.date_source, InferenceSource::Default);
}

#[test]
#[serial]
fn test_discover_from_subdirectory() {
    let repo = init_test_repo();
    let sub = repo.path().join("specs");
    fs::create_dir_all(&sub).unwrap();

    let history = GitHistory::discover(&sub).expect("work tree should be found");
    assert_eq!(
        history.repo_root().canonicalize().unwrap(),
        repo.path().canonicalize().unwrap()
    );
}

#[test]
#[serial]
fn test_discover_outside_repository() {
    let dir = tempfile::TempDir::new().unwrap();
    assert!(GitHistory::discover(dir.path()).is_none());
}

#[test]
#[serial]
fn test_content_wins_over_history() {
    let repo = init_test_repo();
    let root = repo.path();
    commit_file(
        root,
        SPEC_PATH,
        "# Auth\n\n**Status**: Draft\n**Created**: 2022-12-24\n",
        "mark complete",
        "2023-06-01T09:00:00+00:00",
    );

    let spec = load_spec(&root.join("specs/001-auth"), "README.md").unwrap();
    let history = GitHistory::new(root);
    let path = spec.primary_path();

    let inferred = infer_on(
        &spec.primary.content,
        Some(HistoryQuery::new(&history, &path)),
        ymd(2026, 1, 1),
    );

    assert_eq!(inferred.status, SpecStatus::Planned);
    assert_eq!(inferred.status_source, InferenceSource::InlineField);
    assert_eq!(inferred.created_date, ymd(2022, 12, 24));
}
