// tests/convert_preflight.rs

//! Tests for the converter's fail-fast preflight: validation, source
//! probing, and the conflict guard. A fake probe stands in for the
//! network; the guard must abort the workflow before any clone or
//! conversion tool runs.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use wolfi_dev::convert::convert_package;
use wolfi_dev::probe::{ProbedSource, SourceProbe};
use wolfi_dev::Error;

/// Probe with canned answers, recording whether it was consulted
struct FakeProbe {
    has_apkbuild: bool,
    definition_exists: bool,
    apkbuild_asked: AtomicBool,
    exists_asked: AtomicBool,
}

impl FakeProbe {
    fn new(has_apkbuild: bool, definition_exists: bool) -> Self {
        Self {
            has_apkbuild,
            definition_exists,
            apkbuild_asked: AtomicBool::new(false),
            exists_asked: AtomicBool::new(false),
        }
    }
}

impl SourceProbe for FakeProbe {
    fn apkbuild(&self, package: &str) -> wolfi_dev::Result<ProbedSource> {
        self.apkbuild_asked.store(true, Ordering::SeqCst);
        if self.has_apkbuild {
            Ok(ProbedSource {
                section: "main".to_string(),
                apkbuild_url: format!("https://example.invalid/main/{package}/APKBUILD"),
                base_uri_format: "https://example.invalid/main/%s/APKBUILD".to_string(),
            })
        } else {
            Err(Error::NotFound(format!("no APKBUILD for '{package}'")))
        }
    }

    fn definition_exists(&self, _package: &str) -> wolfi_dev::Result<bool> {
        self.exists_asked.store(true, Ordering::SeqCst);
        Ok(self.definition_exists)
    }
}

/// No sandbox directory should appear for failures before allocation
fn sandbox_count(root: &Path) -> usize {
    std::fs::read_dir(root).map(|d| d.count()).unwrap_or(0)
}

#[test]
fn test_empty_name_fails_before_everything() {
    let root = tempfile::tempdir().unwrap();
    let probe = FakeProbe::new(true, false);
    let err = convert_package(&probe, root.path(), "  ").unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert!(!probe.apkbuild_asked.load(Ordering::SeqCst));
    assert_eq!(sandbox_count(root.path()), 0);
}

#[test]
fn test_whitespace_name_rejected() {
    let root = tempfile::tempdir().unwrap();
    let probe = FakeProbe::new(true, false);
    let err = convert_package(&probe, root.path(), "two words").unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[test]
fn test_unresolved_source_is_not_found() {
    let root = tempfile::tempdir().unwrap();
    let probe = FakeProbe::new(false, false);
    let err = convert_package(&probe, root.path(), "nosuchpkg").unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
    assert!(probe.apkbuild_asked.load(Ordering::SeqCst));
    // The conflict check never ran; probing stops at the first failure.
    assert!(!probe.exists_asked.load(Ordering::SeqCst));
}

#[test]
fn test_conflict_guard_aborts_before_clone_and_convert() {
    let root = tempfile::tempdir().unwrap();
    let probe = FakeProbe::new(true, true);
    let err = convert_package(&probe, root.path(), "zlib").unwrap_err();
    assert!(matches!(err, Error::Conflict(_)));
    assert!(probe.exists_asked.load(Ordering::SeqCst));

    // The sandbox was allocated (step 2 precedes the guard) but nothing
    // was cloned into it and no scratch directory survived.
    let entries: Vec<_> = std::fs::read_dir(root.path())
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(entries.len(), 1, "exactly the sandbox itself: {entries:?}");
    let inside: Vec<_> = std::fs::read_dir(&entries[0])
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert!(inside.is_empty(), "sandbox must stay empty: {inside:?}");
}
