// src/workspace.rs

//! Sandbox directories and the workspace context
//!
//! A sandbox is an ephemeral, uniquely named directory used as the
//! isolation boundary for one workflow invocation. Names follow
//! `wolfi-<YYYYMMDD>-<HHMMSS>-<label>-<random>` so two invocations in the
//! same wall-clock second still cannot collide. Sandboxes are never
//! destroyed automatically; whatever gets cloned or generated inside them
//! belongs to the developer afterwards.
//!
//! Rather than changing the process working directory, every workflow
//! threads a [`WorkspaceContext`] value through its steps. External
//! commands receive an explicit working directory, so call ordering never
//! depends on hidden process state.

use crate::error::{Error, Result};
use chrono::Local;
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Attempts to find an unused name before giving up. The random suffix
/// makes exhaustion implausible outside of a filled-up temp root.
const MAX_NAME_ATTEMPTS: u32 = 16;

/// Length of the random suffix in sandbox names
const SUFFIX_LEN: usize = 6;

/// Root under which sandboxes are created: `WOLFI_SANDBOX_ROOT` if set,
/// otherwise the system temporary directory.
pub fn sandbox_root() -> PathBuf {
    std::env::var_os("WOLFI_SANDBOX_ROOT")
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir)
}

/// An allocated sandbox directory
#[derive(Debug, Clone)]
pub struct Sandbox {
    path: PathBuf,
}

impl Sandbox {
    /// Allocate a sandbox under the configured root
    pub fn allocate(label: Option<&str>) -> Result<Self> {
        Self::allocate_in(&sandbox_root(), label)
    }

    /// Allocate a sandbox under an explicit root directory.
    ///
    /// The directory is created with `create_dir`, so an existing path is
    /// never reused silently; on a name collision a fresh random suffix is
    /// drawn.
    pub fn allocate_in(root: &Path, label: Option<&str>) -> Result<Self> {
        let label = sanitize_label(label);
        let stamp = Local::now().format("%Y%m%d-%H%M%S");

        for _ in 0..MAX_NAME_ATTEMPTS {
            let suffix: String = rand::thread_rng()
                .sample_iter(&Alphanumeric)
                .take(SUFFIX_LEN)
                .map(char::from)
                .collect();
            let path = root.join(format!("wolfi-{stamp}-{label}-{suffix}"));

            match fs::create_dir(&path) {
                Ok(()) => {
                    debug!(path = %path.display(), "allocated sandbox");
                    return Ok(Self { path });
                }
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => continue,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    // Root itself is missing; create it once and retry.
                    fs::create_dir_all(root)?;
                }
                Err(e) => return Err(Error::Io(e)),
            }
        }

        Err(Error::Io(std::io::Error::other(format!(
            "could not allocate a unique sandbox under {}",
            root.display()
        ))))
    }

    /// Absolute path of the sandbox directory
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Replace anything path-hostile in a caller-supplied label
fn sanitize_label(label: Option<&str>) -> String {
    let raw = label.unwrap_or("work").trim();
    let cleaned: String = raw
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '-'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "work".to_string()
    } else {
        cleaned
    }
}

/// Workspace state threaded through a workflow: the sandbox and the named
/// checkouts that live inside it.
#[derive(Debug)]
pub struct WorkspaceContext {
    sandbox: Sandbox,
    checkouts: BTreeMap<String, PathBuf>,
}

impl WorkspaceContext {
    /// Wrap a freshly allocated sandbox
    pub fn new(sandbox: Sandbox) -> Self {
        Self {
            sandbox,
            checkouts: BTreeMap::new(),
        }
    }

    /// Sandbox directory all checkouts live under
    pub fn root(&self) -> &Path {
        self.sandbox.path()
    }

    /// Record a checkout created inside this workspace
    pub fn register_checkout(&mut self, name: &str, path: PathBuf) {
        self.checkouts.insert(name.to_string(), path);
    }

    /// Path of a previously registered checkout
    pub fn checkout(&self, name: &str) -> Option<&Path> {
        self.checkouts.get(name).map(PathBuf::as_path)
    }

    /// Names of registered checkouts, sorted
    pub fn checkout_names(&self) -> impl Iterator<Item = &str> {
        self.checkouts.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sandbox_paths_are_unique_same_second() {
        let root = tempfile::tempdir().unwrap();
        let mut seen = HashSet::new();
        // All of these land within the same timestamp; uniqueness must
        // come from the random suffix alone.
        for _ in 0..32 {
            let sb = Sandbox::allocate_in(root.path(), Some("t")).unwrap();
            assert!(sb.path().is_dir());
            assert!(seen.insert(sb.path().to_path_buf()), "duplicate sandbox path");
        }
    }

    #[test]
    fn test_sandbox_name_shape() {
        let root = tempfile::tempdir().unwrap();
        let sb = Sandbox::allocate_in(root.path(), Some("convert")).unwrap();
        let name = sb.path().file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("wolfi-"));
        assert!(name.contains("-convert-"));
        let parts: Vec<&str> = name.split('-').collect();
        // wolfi-YYYYMMDD-HHMMSS-label-random
        assert_eq!(parts.len(), 5);
        assert_eq!(parts[4].len(), SUFFIX_LEN);
    }

    #[test]
    fn test_label_defaults_and_sanitization() {
        assert_eq!(sanitize_label(None), "work");
        assert_eq!(sanitize_label(Some("  ")), "work");
        assert_eq!(sanitize_label(Some("my branch/x")), "my-branch-x");
        assert_eq!(sanitize_label(Some("ok_1.2")), "ok_1.2");
    }

    #[test]
    fn test_allocate_creates_missing_root() {
        let base = tempfile::tempdir().unwrap();
        let root = base.path().join("deeper").join("root");
        let sb = Sandbox::allocate_in(&root, None).unwrap();
        assert!(sb.path().starts_with(&root));
        assert!(sb.path().is_dir());
    }

    #[test]
    fn test_context_checkout_registry() {
        let root = tempfile::tempdir().unwrap();
        let sb = Sandbox::allocate_in(root.path(), Some("ctx")).unwrap();
        let expected = sb.path().join("os");
        let mut ctx = WorkspaceContext::new(sb);
        ctx.register_checkout("os", expected.clone());
        assert_eq!(ctx.checkout("os"), Some(expected.as_path()));
        assert_eq!(ctx.checkout("images"), None);
        assert_eq!(ctx.checkout_names().collect::<Vec<_>>(), vec!["os"]);
    }
}
