// src/commands/clone.rs

//! Clone command: fetch an upstream tree into a fresh sandbox

use anyhow::Result;
use tracing::info;
use wolfi_dev::exec::require_tool;
use wolfi_dev::repo;
use wolfi_dev::workspace::Sandbox;

/// Clone `repo_name` (or a URL override) into a new sandbox
pub fn cmd_clone(repo_name: &str, url: Option<&str>) -> Result<()> {
    let upstream = repo::lookup(repo_name)?;
    require_tool("git")?;

    let sandbox = Sandbox::allocate(Some(upstream.name))?;
    info!(repo = upstream.name, sandbox = %sandbox.path().display(), "cloning into sandbox");

    let checkout = repo::clone_into(upstream, url, sandbox.path())?;
    println!("{}", checkout.path.display());
    Ok(())
}
