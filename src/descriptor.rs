// src/descriptor.rs

//! Typed view of melange package definition files
//!
//! Two levels of parsing serve two different needs. The counting
//! extractors scan historical trees where files are not guaranteed to be
//! clean YAML, so [`DefinitionSummary`] is a single line-oriented pass
//! that records marker occurrences and declared names into one record per
//! file. The converter, on the other hand, validates its own freshly
//! generated output, so [`PackageDefinition`] is a strict serde model.

use crate::error::Result;
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

/// Registry host that identifies Chainguard image references
pub const IMAGE_REGISTRY_HOST: &str = "cgr.dev";

static PACKAGE_DECL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^package:").unwrap());

static TEST_DECL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^test:").unwrap());

static TOP_LEVEL_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z0-9_-]+):").unwrap());

static SUBPACKAGE_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s+-\s+name:\s*(.+?)\s*$").unwrap());

static IMAGE_REF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bimage:\s*(\S+)").unwrap());

/// Line-oriented summary of one definition file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefinitionSummary {
    /// Lines matching the package-declaration marker
    pub package_decls: u64,
    /// Declared sub-package names, in file order, undeduplicated
    pub subpackages: Vec<String>,
    /// Lines matching the test-declaration marker
    pub test_decls: u64,
    /// Image identifiers from source-reference lines naming the
    /// Chainguard registry
    pub images: Vec<String>,
    /// Total line count of the file
    pub lines: u64,
}

/// Summarize definition text in a single pass
pub fn summarize_str(content: &str) -> DefinitionSummary {
    let mut summary = DefinitionSummary::default();
    let mut in_subpackages = false;

    for line in content.lines() {
        summary.lines += 1;

        if PACKAGE_DECL_RE.is_match(line) {
            summary.package_decls += 1;
        }
        if TEST_DECL_RE.is_match(line) {
            summary.test_decls += 1;
        }

        // Track which top-level block we are inside so `- name:` entries
        // are only taken from the subpackages block.
        if let Some(caps) = TOP_LEVEL_KEY_RE.captures(line) {
            in_subpackages = &caps[1] == "subpackages";
        } else if in_subpackages {
            if let Some(caps) = SUBPACKAGE_NAME_RE.captures(line) {
                summary.subpackages.push(unquote(&caps[1]).to_string());
            }
        }

        if let Some(caps) = IMAGE_REF_RE.captures(line) {
            let image = unquote(&caps[1]);
            if image.contains(IMAGE_REGISTRY_HOST) {
                summary.images.push(image.to_string());
            }
        }
    }

    summary
}

/// Summarize one definition file
pub fn summarize_file(path: &Path) -> Result<DefinitionSummary> {
    let content = fs::read_to_string(path)?;
    Ok(summarize_str(&content))
}

fn unquote(value: &str) -> &str {
    value
        .trim()
        .trim_matches('"')
        .trim_matches('\'')
}

/// Strict model of a definition, used to validate converter output
#[derive(Debug, Deserialize)]
pub struct PackageDefinition {
    /// The `package:` block
    pub package: PackageMeta,
    /// Declared sub-packages
    #[serde(default)]
    pub subpackages: Vec<Subpackage>,
    /// The `test:` block, if any; contents are melange's business
    #[serde(default)]
    pub test: Option<serde_norway::Value>,
}

/// The `package:` block of a definition
#[derive(Debug, Deserialize)]
pub struct PackageMeta {
    /// Package name
    pub name: String,
    /// Declared version; left loosely typed since bare YAML scalars like
    /// `1.2` deserialize as numbers
    #[serde(default)]
    pub version: Option<serde_norway::Value>,
    /// Build epoch
    #[serde(default)]
    pub epoch: u64,
}

impl PackageMeta {
    /// Version rendered for display
    pub fn version_display(&self) -> String {
        match &self.version {
            Some(serde_norway::Value::String(s)) => s.clone(),
            Some(serde_norway::Value::Number(n)) => n.to_string(),
            Some(other) => format!("{other:?}"),
            None => "unversioned".to_string(),
        }
    }
}

/// One declared sub-package
#[derive(Debug, Deserialize)]
pub struct Subpackage {
    /// Sub-package name
    pub name: String,
}

/// Parse a definition file into the strict model
pub fn parse_definition(path: &Path) -> Result<PackageDefinition> {
    let content = fs::read_to_string(path)?;
    Ok(serde_norway::from_str(&content)?)
}
