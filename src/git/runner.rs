//! Read-only git invocations
//!
//! History lookups never write to the repository, so every command runs
//! with optional locks off and cannot contend with a concurrent commit.
//! Paths are taken literally (spec directories may contain `[` or `*`) and
//! printed unquoted, and messages use the C locale.

use anyhow::{bail, Context, Result};
use std::path::Path;
use std::process::{Command, Output};
use tracing::debug;

const GLOBAL_ARGS: &[&str] = &["--no-pager", "--literal-pathspecs", "-c", "core.quotepath=off"];

fn git_command(args: &[&str], dir: &Path) -> Command {
    let mut cmd = Command::new("git");
    cmd.args(GLOBAL_ARGS)
        .args(args)
        .current_dir(dir)
        .env("GIT_OPTIONAL_LOCKS", "0")
        .env("LC_ALL", "C");
    cmd
}

/// Spawn git in `dir` and collect its output. A non-zero exit is not an error here.
pub fn run_git(args: &[&str], dir: &Path) -> Result<Output> {
    debug!(args = %args.join(" "), dir = %dir.display(), "Running git");
    git_command(args, dir)
        .output()
        .with_context(|| format!("Failed to execute: git {}", args.join(" ")))
}

/// Stdout of a git command that has to succeed, without the trailing newline
pub fn git_stdout(args: &[&str], dir: &Path) -> Result<String> {
    let output = run_git(args, dir)?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let code = output
            .status
            .code()
            .map_or_else(|| "a signal".to_string(), |c| c.to_string());
        bail!("git {} exited with {code}: {}", args.join(" "), stderr.trim());
    }

    let mut stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    stdout.truncate(stdout.trim_end().len());
    Ok(stdout)
}

/// Whether a git command exits 0; spawn failures count as no
pub fn git_succeeds(args: &[&str], dir: &Path) -> bool {
    run_git(args, dir)
        .map(|output| output.status.success())
        .unwrap_or(false)
}
