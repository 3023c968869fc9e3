// src/metrics.rs

//! Counting extractors over a tree of package definitions
//!
//! Each extractor maps the current contents of a directory (plus, for the
//! commit count, its git history) to a single non-negative integer. They
//! are independent and stateless; an empty or absent directory always
//! yields zero rather than an error.

use crate::descriptor::{self, DefinitionSummary};
use crate::error::Result;
use crate::exec::ExternalCommand;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Definition files directly inside `dir` (non-recursive), sorted
fn definition_files(dir: &Path) -> Result<Vec<std::path::PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|e| e == "yaml") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// One summary per definition file directly inside `dir`
fn scan(dir: &Path) -> Result<Vec<DefinitionSummary>> {
    definition_files(dir)?
        .iter()
        .map(|p| descriptor::summarize_file(p))
        .collect()
}

/// Package-declaration marker lines across the directory's definitions
pub fn source_packages(dir: &Path) -> Result<u64> {
    Ok(scan(dir)?.iter().map(|s| s.package_decls).sum())
}

/// Distinct declared sub-package names across the directory's
/// definitions. Deduplicated; names containing whitespace are excluded
/// (those are templated declarations, not concrete packages).
pub fn binary_packages(dir: &Path) -> Result<u64> {
    let mut names = BTreeSet::new();
    for summary in scan(dir)? {
        for name in summary.subpackages {
            if !name.chars().any(char::is_whitespace) {
                names.insert(name);
            }
        }
    }
    Ok(names.len() as u64)
}

/// Files with a `.patch` extension anywhere under `dir`
pub fn patches(dir: &Path) -> Result<u64> {
    if !dir.is_dir() {
        return Ok(0);
    }
    let mut count = 0;
    for entry in WalkDir::new(dir).into_iter().filter_map(|e| e.ok()) {
        if entry.file_type().is_file()
            && entry.path().extension().is_some_and(|e| e == "patch")
        {
            count += 1;
        }
    }
    Ok(count)
}

/// Sum of line counts of the directory's definition files
pub fn definition_lines(dir: &Path) -> Result<u64> {
    Ok(scan(dir)?.iter().map(|s| s.lines).sum())
}

/// Test-declaration marker lines across the directory's definitions
pub fn tests(dir: &Path) -> Result<u64> {
    Ok(scan(dir)?.iter().map(|s| s.test_decls).sum())
}

/// Commits reachable from HEAD of the checkout at `dir`
pub fn commits(dir: &Path) -> Result<u64> {
    let out = ExternalCommand::new("git")
        .current_dir(dir)
        .args(["rev-list", "--count", "HEAD"])
        .run()?;
    Ok(out.stdout_trimmed().parse().unwrap_or(0))
}

/// Distinct Chainguard image identifiers referenced by definition files
/// anywhere under `dir`
pub fn images(dir: &Path) -> Result<u64> {
    if !dir.is_dir() {
        return Ok(0);
    }
    let mut ids = BTreeSet::new();
    for entry in WalkDir::new(dir).into_iter().filter_map(|e| e.ok()) {
        if entry.file_type().is_file()
            && entry.path().extension().is_some_and(|e| e == "yaml")
        {
            ids.extend(descriptor::summarize_file(entry.path())?.images);
        }
    }
    Ok(ids.len() as u64)
}

/// All directory-local metrics collected in one pass, for the stats view
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DirectoryStats {
    /// Package-declaration marker lines
    pub source_packages: u64,
    /// Distinct declared sub-package names
    pub binary_packages: u64,
    /// `.patch` files, recursive
    pub patches: u64,
    /// Total definition line count
    pub definition_lines: u64,
    /// Test-declaration marker lines
    pub tests: u64,
    /// Distinct registry image references, recursive
    pub images: u64,
    /// Commits reachable from HEAD, when the directory is a checkout
    pub commits: Option<u64>,
}

/// Collect every extractor over `dir`. The commit count is optional
/// because the directory may not be a git checkout at all.
pub fn collect(dir: &Path) -> Result<DirectoryStats> {
    Ok(DirectoryStats {
        source_packages: source_packages(dir)?,
        binary_packages: binary_packages(dir)?,
        patches: patches(dir)?,
        definition_lines: definition_lines(dir)?,
        tests: tests(dir)?,
        images: images(dir)?,
        commits: commits(dir).ok(),
    })
}
