// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

use std::path::Path;
use std::process::Command;

/// Whether git is available; history-dependent tests skip without it
pub fn have_git() -> bool {
    which::which("git").is_ok()
}

/// Write a definition file into `dir`
pub fn write_definition(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).unwrap();
}

/// Run git in `dir` with a fixed author/committer date, panicking on
/// failure (fixture setup only).
pub fn git(dir: &Path, date: &str, args: &[&str]) {
    let out = Command::new("git")
        .current_dir(dir)
        .env("GIT_AUTHOR_DATE", date)
        .env("GIT_COMMITTER_DATE", date)
        .env("GIT_AUTHOR_NAME", "Test")
        .env("GIT_AUTHOR_EMAIL", "test@example.invalid")
        .env("GIT_COMMITTER_NAME", "Test")
        .env("GIT_COMMITTER_EMAIL", "test@example.invalid")
        .args(args)
        .output()
        .unwrap();
    assert!(
        out.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&out.stderr)
    );
}

/// Initialize a repo on branch `main` in `dir`
pub fn init_repo(dir: &Path) {
    git(dir, "2023-01-01T12:00:00+00:00", &["init", "-q", "-b", "main"]);
}

/// Stage everything and commit with the given ISO date
pub fn commit_all(dir: &Path, date: &str, message: &str) {
    git(dir, date, &["add", "-A"]);
    git(dir, date, &["commit", "-q", "-m", message]);
}
