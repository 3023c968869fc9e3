// src/commands/branch.rs

//! Branch command: full fork-aware branch workspace setup

use anyhow::Result;
use wolfi_dev::exec::require_tool;
use wolfi_dev::repo;
use wolfi_dev::workspace::{Sandbox, WorkspaceContext};

/// Set up a branch workspace for `branch` in `repo_name`
pub fn cmd_branch(branch: &str, repo_name: &str) -> Result<()> {
    let upstream = repo::lookup(repo_name)?;
    require_tool("git")?;

    // Identity is a precondition: fail before any directory is created.
    let user = repo::github_user()?;

    let sandbox = Sandbox::allocate(Some(branch))?;
    let mut ctx = WorkspaceContext::new(sandbox);
    let checkout = repo::branch_workspace(&mut ctx, upstream, branch)?;

    println!("{}", checkout.path.display());
    println!(
        "on branch '{branch}', origin -> {} (fork of {})",
        checkout.origin, upstream.slug
    );
    println!("github user: {user}");
    Ok(())
}
