// src/repo.rs

//! Cloning and branch setup against the Wolfi upstream repositories
//!
//! Knows the small fixed table of upstreams we work against (the packages
//! tree and the two image catalogs) and implements the branch workflow:
//! clone the developer's fork, switch or create the requested branch
//! (publishing a new branch to the fork), synchronize from the canonical
//! upstream, and push. Merge conflicts are surfaced, never resolved here.

use crate::error::{Error, Result};
use crate::exec::ExternalCommand;
use crate::workspace::WorkspaceContext;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// A known upstream repository
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Upstream {
    /// Short name used on the command line and as the checkout directory
    pub name: &'static str,
    /// Canonical (non-fork) clone URL
    pub canonical: &'static str,
    /// GitHub `owner/repo` slug, used to derive fork URLs
    pub slug: &'static str,
    /// Default branch merged from during synchronization
    pub default_branch: &'static str,
}

/// The repositories this tool knows how to work with
pub const UPSTREAMS: [Upstream; 3] = [
    Upstream {
        name: "os",
        canonical: "https://github.com/wolfi-dev/os.git",
        slug: "wolfi-dev/os",
        default_branch: "main",
    },
    Upstream {
        name: "images",
        canonical: "https://github.com/chainguard-images/images.git",
        slug: "chainguard-images/images",
        default_branch: "main",
    },
    Upstream {
        name: "images-private",
        canonical: "git@github.com:chainguard-images/images-private.git",
        slug: "chainguard-images/images-private",
        default_branch: "main",
    },
];

/// Look up an upstream by short name
pub fn lookup(name: &str) -> Result<&'static Upstream> {
    UPSTREAMS
        .iter()
        .find(|u| u.name == name)
        .ok_or_else(|| {
            let known: Vec<&str> = UPSTREAMS.iter().map(|u| u.name).collect();
            Error::Validation(format!(
                "unknown repository '{name}' (known: {})",
                known.join(", ")
            ))
        })
}

/// A working copy left on disk for the caller
#[derive(Debug, Clone)]
pub struct Checkout {
    /// Path of the working copy
    pub path: PathBuf,
    /// URL origin points at when the workflow finishes
    pub origin: String,
    /// Branch the working copy is on (None when detached)
    pub branch: Option<String>,
}

/// Configured GitHub identity: `GITHUB_USER`, falling back to the
/// `github.user` git config key.
pub fn github_user() -> Result<String> {
    if let Ok(user) = std::env::var("GITHUB_USER") {
        let user = user.trim().to_string();
        if !user.is_empty() {
            return Ok(user);
        }
    }

    let out = git_in(Path::new("."))
        .args(["config", "--get", "github.user"])
        .run_unchecked()?;
    let user = out.stdout_trimmed().to_string();
    if out.success() && !user.is_empty() {
        return Ok(user);
    }

    Err(Error::Config(
        "no GitHub identity configured; set GITHUB_USER or `git config --global github.user <name>`"
            .to_string(),
    ))
}

/// Fork clone URL for `user`'s copy of an upstream
pub fn fork_url(upstream: &Upstream, user: &str) -> String {
    let repo = upstream
        .slug
        .rsplit_once('/')
        .map_or(upstream.slug, |(_, r)| r);
    format!("git@github.com:{user}/{repo}.git")
}

fn git_in(dir: &Path) -> ExternalCommand {
    ExternalCommand::new("git").current_dir(dir)
}

/// Clone `url` into `dest`. A clone failure is user-recoverable (a
/// misnamed fork or missing access rights), so the error names the URL
/// that was tried.
fn git_clone(url: &str, dest: &Path, parent: &Path) -> Result<()> {
    git_in(parent)
        .args(["clone", url])
        .arg(dest)
        .run()
        .map_err(|e| match e {
            Error::External { status, stderr, .. } => Error::External {
                tool: format!("git clone {url}"),
                status,
                stderr,
            },
            other => other,
        })?;
    Ok(())
}

/// Clone `upstream` (or `url` when overridden) into `<parent>/<name>`
pub fn clone_into(
    upstream: &Upstream,
    url_override: Option<&str>,
    parent: &Path,
) -> Result<Checkout> {
    let url = url_override.unwrap_or(upstream.canonical);
    let dest = parent.join(upstream.name);
    info!(url, dest = %dest.display(), "cloning");
    git_clone(url, &dest, parent)?;

    Ok(Checkout {
        path: dest,
        origin: url.to_string(),
        branch: Some(upstream.default_branch.to_string()),
    })
}

/// Where a branch workspace clones from and syncs against
#[derive(Debug, Clone, Copy)]
pub struct BranchTarget<'a> {
    /// Checkout directory name inside the workspace
    pub name: &'a str,
    /// Clone URL and push target: the developer's fork
    pub clone_url: &'a str,
    /// Canonical repository synchronized from as `upstream`
    pub upstream_url: &'a str,
    /// Default branch merged during synchronization
    pub default_branch: &'a str,
}

/// Full branch workflow against a known upstream: requires a configured
/// identity, derives the fork URL from it, and delegates to
/// [`branch_workspace_from`].
pub fn branch_workspace(
    ctx: &mut WorkspaceContext,
    upstream: &Upstream,
    branch: &str,
) -> Result<Checkout> {
    let user = github_user()?;
    let fork = fork_url(upstream, &user);
    branch_workspace_from(
        ctx,
        &BranchTarget {
            name: upstream.name,
            clone_url: &fork,
            upstream_url: upstream.canonical,
            default_branch: upstream.default_branch,
        },
        branch,
    )
}

/// Branch workflow against explicit URLs: clone the fork into the
/// workspace, get onto `branch` (creating and publishing it to the fork
/// if new), merge the canonical default branch, and push.
///
/// Origin points at the fork from the moment of the clone, so a freshly
/// created branch can never be published to the canonical repository.
/// The checkout is registered in `ctx` under the target's name.
pub fn branch_workspace_from(
    ctx: &mut WorkspaceContext,
    target: &BranchTarget<'_>,
    branch: &str,
) -> Result<Checkout> {
    if branch.trim().is_empty() {
        return Err(Error::Validation("branch name must not be empty".into()));
    }

    let dir = ctx.root().join(target.name);
    info!(url = target.clone_url, dest = %dir.display(), "cloning work repository");
    git_clone(target.clone_url, &dir, ctx.root())?;

    // Switch to the branch; create and publish it when it does not exist.
    let switched = git_in(&dir).args(["switch", branch]).run_unchecked()?;
    if !switched.success() {
        info!(branch, "branch does not exist yet; creating");
        git_in(&dir).args(["switch", "-c", branch]).run()?;
        git_in(&dir).args(["push", "-u", "origin", branch]).run()?;
    }

    // Best-effort synchronization with the canonical tree. A merge
    // conflict comes back as the git error for the developer to resolve.
    git_in(&dir)
        .args(["remote", "add", "upstream", target.upstream_url])
        .run()?;
    git_in(&dir).args(["fetch", "upstream"]).run()?;
    let upstream_ref = format!("upstream/{}", target.default_branch);
    let merge = git_in(&dir)
        .args(["merge", upstream_ref.as_str()])
        .run_unchecked()?;
    if !merge.success() {
        warn!(branch, "merge from upstream failed; leaving conflicts in place");
        return Err(Error::External {
            tool: format!("git merge {upstream_ref}"),
            status: format!("exit code {}", merge.code.unwrap_or(-1)),
            stderr: merge.stderr.trim().to_string(),
        });
    }

    // Push target is always the developer's fork; the set-url keeps that
    // true even when the branch already existed with stale tracking.
    git_in(&dir)
        .args(["remote", "set-url", "origin", target.clone_url])
        .run()?;
    git_in(&dir).args(["push"]).run()?;

    let checkout = Checkout {
        path: dir.clone(),
        origin: target.clone_url.to_string(),
        branch: Some(branch.to_string()),
    };
    ctx.register_checkout(target.name, dir);
    Ok(checkout)
}
