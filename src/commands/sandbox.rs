// src/commands/sandbox.rs

//! Sandbox allocation command

use anyhow::Result;
use wolfi_dev::workspace::Sandbox;

/// Allocate a sandbox and print its path for the caller to `cd` into
pub fn cmd_sandbox(label: Option<&str>) -> Result<()> {
    let sandbox = Sandbox::allocate(label)?;
    println!("{}", sandbox.path().display());
    Ok(())
}
