//! Shared helpers for integration tests

use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn git(args: &[&str], repo_root: &Path) {
    let output = Command::new("git")
        .args(args)
        .current_dir(repo_root)
        .output()
        .expect("Failed to run git");
    assert!(
        output.status.success(),
        "git {} failed: {}",
        args.join(" "),
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Create a temporary git repository with an initial commit
pub fn init_test_repo() -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let repo_root = temp_dir.path();

    git(&["init", "--quiet"], repo_root);
    git(&["config", "user.email", "test@test.com"], repo_root);
    git(&["config", "user.name", "Test User"], repo_root);
    git(&["config", "commit.gpgsign", "false"], repo_root);

    fs::write(repo_root.join(".gitignore"), "target/\n").expect("Failed to write .gitignore");
    git(&["add", "."], repo_root);
    git(&["commit", "--quiet", "-m", "Initial commit"], repo_root);

    temp_dir
}

/// Write `content` to `rel_path` and commit it with a fixed timestamp
pub fn commit_file(repo_root: &Path, rel_path: &str, content: &str, message: &str, date: &str) {
    let path = repo_root.join(rel_path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    fs::write(&path, content).expect("Failed to write file");

    git(&["add", rel_path], repo_root);
    let output = Command::new("git")
        .args(["commit", "--quiet", "-m", message])
        .env("GIT_AUTHOR_DATE", date)
        .env("GIT_COMMITTER_DATE", date)
        .current_dir(repo_root)
        .output()
        .expect("Failed to git commit");
    assert!(
        output.status.success(),
        "git commit failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Create a spec directory with the given files
pub fn write_spec(specs_root: &Path, id: &str, files: &[(&str, &str)]) {
    let dir = specs_root.join(id);
    fs::create_dir_all(&dir).expect("Failed to create spec directory");
    for (name, content) in files {
        fs::write(dir.join(name), content).expect("Failed to write spec file");
    }
}

/// Text with `count` lines of a few short words each
pub fn lines(count: usize) -> String {
    (0..count)
        .map(|i| format!("Line {i} of text"))
        .collect::<Vec<_>>()
        .join("\n")
}
