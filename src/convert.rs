// src/convert.rs

//! Alpine package conversion workflow
//!
//! Turns an aports APKBUILD into a Wolfi melange definition on a fresh
//! branch: probe where the APKBUILD lives, refuse to clobber a package
//! that already exists publicly, set up a branch workspace, run
//! `melange convert`, move the produced definition into the checkout, and
//! normalize it with `yam`. The conversion scratch directory is a
//! `TempDir`, so it is cleaned up no matter which step fails.

use crate::descriptor::{self, PackageDefinition};
use crate::error::{Error, Result};
use crate::exec::{require_tool, ExternalCommand};
use crate::probe::{ProbedSource, SourceProbe};
use crate::repo::{self, Checkout};
use crate::workspace::{Sandbox, WorkspaceContext};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Manual follow-up steps printed after a successful conversion
pub const FOLLOW_UP_CHECKLIST: &[&str] = &[
    "review the generated definition; converted pipelines are a starting point, not a result",
    "verify the license against the APKBUILD and upstream source",
    "check update.enabled and the release-monitoring identifier",
    "add a test block exercising the main binary or library",
    "build locally in the SDK container before opening a pull request",
    "open the pull request from the pushed branch",
];

/// Result of a completed conversion
#[derive(Debug)]
pub struct ConvertOutcome {
    /// Final definition file inside the branch checkout
    pub definition_path: PathBuf,
    /// The branch checkout the definition was committed into
    pub checkout: Checkout,
    /// Typed view of the normalized definition, when it parsed cleanly
    pub parsed: Option<PackageDefinition>,
    /// Where the APKBUILD was found
    pub source: ProbedSource,
}

/// Run the conversion workflow for `package`.
///
/// Steps 1–4 (validation, sandbox, probe, conflict guard) are fail-fast
/// preconditions: no clone happens and no conversion tool runs until all
/// of them pass.
pub fn convert_package(
    probe: &dyn SourceProbe,
    sandbox_root: &Path,
    package: &str,
) -> Result<ConvertOutcome> {
    let package = package.trim();
    if package.is_empty() {
        return Err(Error::Validation("package name must not be empty".into()));
    }
    if package.chars().any(char::is_whitespace) {
        return Err(Error::Validation(format!(
            "package name '{package}' must not contain whitespace"
        )));
    }

    let sandbox = Sandbox::allocate_in(sandbox_root, Some(&format!("convert-{package}")))?;
    let mut ctx = WorkspaceContext::new(sandbox);

    let source = probe.apkbuild(package)?;
    info!(package, section = %source.section, "found APKBUILD");

    if probe.definition_exists(package)? {
        return Err(Error::Conflict(format!(
            "{package}.yaml already exists in the public packages tree; not overwriting"
        )));
    }

    // Everything past this point touches the network and the local tree.
    require_tool("git")?;
    require_tool("melange")?;
    require_tool("yam")?;

    let os = repo::lookup("os")?;
    let checkout = repo::branch_workspace(&mut ctx, os, &format!("convert-{package}"))?;

    let definition_path = run_conversion(&checkout.path, ctx.root(), package, &source)?;

    let parsed = match descriptor::parse_definition(&definition_path) {
        Ok(def) => Some(def),
        Err(e) => {
            warn!(package, error = %e, "normalized definition did not parse cleanly");
            None
        }
    };

    Ok(ConvertOutcome {
        definition_path,
        checkout,
        parsed,
        source,
    })
}

/// Steps 6–9: convert into a scratch directory, move the primary output
/// into the checkout under its canonical name, normalize it in place.
/// Scratch cleanup is guaranteed by `TempDir` drop on every path.
fn run_conversion(
    checkout_dir: &Path,
    sandbox_dir: &Path,
    package: &str,
    source: &ProbedSource,
) -> Result<PathBuf> {
    // Scratch lives inside the sandbox so the rename below never crosses
    // a filesystem boundary.
    let scratch = tempfile::Builder::new()
        .prefix("melange-out-")
        .tempdir_in(sandbox_dir)?;

    ExternalCommand::new("melange")
        .args(["convert", "apkbuild", package])
        .arg("--out-dir")
        .arg(scratch.path())
        .arg("--base-uri-format")
        .arg(source.base_uri_format.as_str())
        .run()?;

    let produced = primary_output(scratch.path(), package)?;
    let destination = checkout_dir.join(format!("{package}.yaml"));
    fs::rename(&produced, &destination)?;

    ExternalCommand::new("yam")
        .current_dir(checkout_dir)
        .arg(format!("{package}.yaml"))
        .run()?;

    Ok(destination)
}

/// The definition file the converter produced for `package`. Prefers the
/// exact `<package>.yaml` name; otherwise falls back to the first YAML
/// file in the scratch directory (converters occasionally rename).
fn primary_output(scratch: &Path, package: &str) -> Result<PathBuf> {
    let exact = scratch.join(format!("{package}.yaml"));
    if exact.is_file() {
        return Ok(exact);
    }

    let mut yamls: Vec<PathBuf> = fs::read_dir(scratch)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|e| e == "yaml"))
        .collect();
    yamls.sort();
    yamls.into_iter().next().ok_or_else(|| {
        Error::NotFound(format!(
            "conversion produced no definition for '{package}'"
        ))
    })
}
