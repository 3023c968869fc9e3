// src/commands/numbers.rs

//! Numbers command: the monthly history report

use anyhow::Result;
use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use wolfi_dev::exec::require_tool;
use wolfi_dev::repo;
use wolfi_dev::timeseries::{self, measure_month, month_boundaries, ReportTrees, ROW_HEADER, WINDOW_START};
use wolfi_dev::workspace::{Sandbox, WorkspaceContext};

/// Clone the three trees into one sandbox and emit one row per month
pub fn cmd_numbers() -> Result<()> {
    require_tool("git")?;

    let sandbox = Sandbox::allocate(Some("numbers"))?;
    let mut ctx = WorkspaceContext::new(sandbox);
    info!(sandbox = %ctx.root().display(), "cloning report trees");

    for name in ["os", "images", "images-private"] {
        let upstream = repo::lookup(name)?;
        let checkout = repo::clone_into(upstream, None, ctx.root())?;
        ctx.register_checkout(name, checkout.path);
    }
    let trees = ReportTrees {
        os: ctx.checkout("os").expect("registered above"),
        images: ctx.checkout("images").expect("registered above"),
        images_private: ctx.checkout("images-private").expect("registered above"),
        tip_ref: "origin/HEAD",
    };

    let today = Local::now().date_naive();
    let boundaries = month_boundaries(WINDOW_START, today);

    let progress = ProgressBar::new(boundaries.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{bar:30} {pos}/{len} months {msg}")
            .expect("static template"),
    );

    println!("{ROW_HEADER}");
    for boundary in boundaries {
        progress.set_message(boundary.to_string());
        let row = measure_month(&trees, boundary);
        // Rows go to stdout; the bar stays on stderr.
        progress.suspend(|| println!("{row}"));
        progress.inc(1);
    }
    progress.finish_and_clear();

    // Leave each tree back on its tip, not detached mid-history.
    for name in ctx.checkout_names() {
        let Some(dir) = ctx.checkout(name) else {
            continue;
        };
        let branch = repo::lookup(name)?.default_branch;
        if let Err(e) = timeseries::restore_tip(dir, branch) {
            tracing::warn!(tree = name, error = %e, "could not restore tree to its tip");
        }
    }
    Ok(())
}
