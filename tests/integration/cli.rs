//! Running the specgraph binary

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

use super::helpers::write_spec;

const HEADER: &str = "---\nstatus: planned\ncreated: 2025-01-01\n---\n";

fn specgraph(args: &[&str], root: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_specgraph"))
        .args(args)
        .arg("--root")
        .arg(root)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run specgraph")
}

fn project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let specs = tmp.path().join("specs");
    write_spec(
        &specs,
        "001-base",
        &[("README.md", &format!("{HEADER}# Base\n\n[d](DESIGN.md)\n")), ("DESIGN.md", "# D\n")],
    );
    write_spec(
        &specs,
        "002-next",
        &[(
            "README.md",
            "---\nstatus: wip\ncreated: 2025-02-01\ndepends_on: [\"001\"]\n---\n# Next\n",
        )],
    );
    write_spec(&specs, "003-legacy", &[("README.md", "# Legacy\n\nStatus: done\n")]);
    tmp
}

#[test]
fn test_deps_json() {
    let tmp = project();
    let out = specgraph(&["deps", "--json"], tmp.path());
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["specs"]["002-next"]["dependsOn"][0], "001-base");
    assert_eq!(json["specs"]["001-base"]["requiredBy"][0], "002-next");
}

#[test]
fn test_validate_exit_status() {
    let tmp = project();
    let out = specgraph(&["validate"], tmp.path());
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    // A tiny error threshold makes DESIGN.md fail
    let out = specgraph(
        &["validate", "001", "--warning-threshold", "0", "--error-threshold", "1", "--json"],
        tmp.path(),
    );
    assert!(!out.status.success());
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["passed"], false);
    assert_eq!(json["specs"][0]["id"], "001-base");
}

#[test]
fn test_inverted_thresholds_rejected() {
    let tmp = project();
    let out = specgraph(
        &["validate", "--warning-threshold", "9000"],
        tmp.path(),
    );
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("must be lower"));
}

#[test]
fn test_check_json_reports_inference() {
    let tmp = project();
    let out = specgraph(&["check", "--json"], tmp.path());
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let legacy = json["specs"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["id"] == "003-legacy")
        .unwrap();
    assert_eq!(legacy["valid"], false);
    assert_eq!(legacy["inferred"]["status"], "complete");
    assert_eq!(legacy["inferred"]["statusSource"], "line-field");
}

#[test]
fn test_bootstrap_write() {
    let tmp = project();
    let readme = tmp.path().join("specs/003-legacy/README.md");

    let out = specgraph(&["bootstrap", "3"], tmp.path());
    assert!(out.status.success());
    assert_eq!(
        std::fs::read_to_string(&readme).unwrap(),
        "# Legacy\n\nStatus: done\n",
        "dry run must not touch the file"
    );

    let out = specgraph(&["bootstrap", "3", "--write"], tmp.path());
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let written = std::fs::read_to_string(&readme).unwrap();
    assert!(written.starts_with("---\nstatus: complete\ncreated: '"));
    assert!(written.ends_with("# Legacy\n\nStatus: done\n"));
}
