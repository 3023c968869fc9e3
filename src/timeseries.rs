// src/timeseries.rs

//! Monthly history report over the Wolfi trees
//!
//! Walks calendar month boundaries from January 2023 through the current
//! month, rewinds three sibling checkouts (packages tree, public images,
//! private images) to the last commit at or before each boundary, runs
//! the counting extractors, and emits one tab-separated row per month.
//!
//! A failed revision resolution or checkout does not abort the run and
//! does not masquerade as zero: the affected cells render as `-` and a
//! warning is logged.

use crate::error::Result;
use crate::exec::ExternalCommand;
use crate::metrics;
use chrono::{Months, NaiveDate};
use std::fmt;
use std::path::Path;
use tracing::warn;

/// First boundary of the reporting window
pub const WINDOW_START: NaiveDate = match NaiveDate::from_ymd_opt(2023, 1, 1) {
    Some(d) => d,
    None => panic!("invalid window start"),
};

/// Month boundaries from `start` through the first day of `today`'s
/// month, inclusive. Strictly increasing, exactly one month apart, and
/// never beyond `today` itself.
pub fn month_boundaries(start: NaiveDate, today: NaiveDate) -> Vec<NaiveDate> {
    let mut boundaries = Vec::new();
    let mut boundary = start;
    while boundary <= today {
        boundaries.push(boundary);
        boundary = match boundary.checked_add_months(Months::new(1)) {
            Some(next) => next,
            None => break,
        };
    }
    boundaries
}

/// One observation row: a boundary date plus seven metrics. `None` marks
/// a cell whose checkout or extraction failed (partial row).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyRow {
    /// First day of the observed month
    pub boundary: NaiveDate,
    /// Source package count (packages tree)
    pub source_packages: Option<u64>,
    /// Distinct binary (sub-)package count (packages tree)
    pub binary_packages: Option<u64>,
    /// Patch file count (packages tree)
    pub patches: Option<u64>,
    /// Total definition line count (packages tree)
    pub definition_lines: Option<u64>,
    /// Commit count (packages tree)
    pub commits: Option<u64>,
    /// Test declaration count (packages tree)
    pub tests: Option<u64>,
    /// Distinct image count (both image trees)
    pub images: Option<u64>,
}

impl fmt::Display for MonthlyRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn cell(v: Option<u64>) -> String {
            v.map_or_else(|| "-".to_string(), |n| n.to_string())
        }
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.boundary,
            cell(self.source_packages),
            cell(self.binary_packages),
            cell(self.patches),
            cell(self.definition_lines),
            cell(self.commits),
            cell(self.tests),
            cell(self.images),
        )
    }
}

/// Column header matching [`MonthlyRow`]'s display order
pub const ROW_HEADER: &str = "date\tsources\tbinaries\tpatches\tlines\tcommits\ttests\timages";

/// Rewind the checkout at `dir` to the most recent first-parent commit
/// at or before `boundary` (detached).
///
/// The revision walk starts from `tip_ref`, not from HEAD: once a tree is
/// detached at an early month, HEAD no longer reaches the later commits.
pub fn checkout_at(dir: &Path, tip_ref: &str, boundary: NaiveDate) -> Result<()> {
    let before = format!("--before={boundary} 00:00:00");
    let rev = ExternalCommand::new("git")
        .current_dir(dir)
        .args(["rev-list", "-1", "--first-parent", before.as_str(), tip_ref])
        .run()?;
    let sha = rev.stdout_trimmed().to_string();
    if sha.is_empty() {
        return Err(crate::error::Error::NotFound(format!(
            "no commit at or before {boundary} in {}",
            dir.display()
        )));
    }
    ExternalCommand::new("git")
        .current_dir(dir)
        .args(["checkout", "--detach", sha.as_str()])
        .run()?;
    Ok(())
}

/// Return the checkout at `dir` to the tip of its default branch so the
/// next boundary's rev-list walks the full history again.
pub fn restore_tip(dir: &Path, branch: &str) -> Result<()> {
    ExternalCommand::new("git")
        .current_dir(dir)
        .args(["checkout", branch])
        .run()?;
    Ok(())
}

/// The three sibling checkouts the report measures
#[derive(Debug)]
pub struct ReportTrees<'a> {
    /// Packages tree checkout
    pub os: &'a Path,
    /// Public images tree checkout
    pub images: &'a Path,
    /// Private images tree checkout
    pub images_private: &'a Path,
    /// Ref the monthly revision walks start from (`origin/HEAD` for
    /// fresh clones)
    pub tip_ref: &'a str,
}

/// Measure one month: rewind each tree to `boundary`, run the extractors,
/// assemble the row. Per-tree failures degrade to `-` cells.
pub fn measure_month(trees: &ReportTrees<'_>, boundary: NaiveDate) -> MonthlyRow {
    let mut row = MonthlyRow {
        boundary,
        source_packages: None,
        binary_packages: None,
        patches: None,
        definition_lines: None,
        commits: None,
        tests: None,
        images: None,
    };

    match checkout_at(trees.os, trees.tip_ref, boundary) {
        Ok(()) => {
            row.source_packages = log_failed(boundary, "sources", metrics::source_packages(trees.os));
            row.binary_packages = log_failed(boundary, "binaries", metrics::binary_packages(trees.os));
            row.patches = log_failed(boundary, "patches", metrics::patches(trees.os));
            row.definition_lines = log_failed(boundary, "lines", metrics::definition_lines(trees.os));
            row.commits = log_failed(boundary, "commits", metrics::commits(trees.os));
            row.tests = log_failed(boundary, "tests", metrics::tests(trees.os));
        }
        Err(e) => warn!(%boundary, error = %e, "packages tree checkout failed; row is partial"),
    }

    // The images cell sums both trees; a partial sum would read as a
    // plausible count, so one failed tree blanks the whole cell.
    let mut images_total = Some(0);
    for (name, tree) in [("images", trees.images), ("images-private", trees.images_private)] {
        match checkout_at(tree, trees.tip_ref, boundary).and_then(|()| metrics::images(tree)) {
            Ok(n) => {
                if let Some(total) = images_total.as_mut() {
                    *total += n;
                }
            }
            Err(e) => {
                warn!(%boundary, tree = name, error = %e, "image count failed; cell is partial");
                images_total = None;
            }
        }
    }
    row.images = images_total;

    row
}

fn log_failed(boundary: NaiveDate, metric: &str, result: Result<u64>) -> Option<u64> {
    match result {
        Ok(n) => Some(n),
        Err(e) => {
            warn!(%boundary, metric, error = %e, "extractor failed; cell is partial");
            None
        }
    }
}
