// src/commands/convert.rs

//! Convert command: aports APKBUILD to melange definition

use anyhow::{Context, Result};
use std::fs;
use wolfi_dev::convert::{convert_package, FOLLOW_UP_CHECKLIST};
use wolfi_dev::probe::HttpProbe;
use wolfi_dev::workspace;

/// Convert `package` and print the result plus the follow-up checklist
pub fn cmd_convert(package: &str) -> Result<()> {
    let probe = HttpProbe::new()?;
    let outcome = convert_package(&probe, &workspace::sandbox_root(), package)
        .with_context(|| format!("failed to convert '{package}'"))?;

    let contents = fs::read_to_string(&outcome.definition_path)
        .with_context(|| format!("failed to read {}", outcome.definition_path.display()))?;
    println!("{contents}");

    println!(
        "converted {} from aports {} into {}",
        package,
        outcome.source.section,
        outcome.definition_path.display()
    );
    if let Some(def) = &outcome.parsed {
        println!(
            "  package {} version {} with {} subpackage(s)",
            def.package.name,
            def.package.version_display(),
            def.subpackages.len()
        );
    }
    println!("  branch: {}", outcome.checkout.branch.as_deref().unwrap_or("?"));

    println!("\nnext steps:");
    for step in FOLLOW_UP_CHECKLIST {
        println!("  - {step}");
    }
    Ok(())
}
