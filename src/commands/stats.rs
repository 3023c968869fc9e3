// src/commands/stats.rs

//! Stats command: one-shot counting metrics over a directory

use anyhow::Result;
use std::path::Path;
use wolfi_dev::metrics;

/// Print the counting metrics for `dir` as an aligned table
pub fn cmd_stats(dir: &str) -> Result<()> {
    let dir = Path::new(dir);
    let stats = metrics::collect(dir)?;

    println!("{:<22} {}", "source packages", stats.source_packages);
    println!("{:<22} {}", "binary packages", stats.binary_packages);
    println!("{:<22} {}", "patches", stats.patches);
    println!("{:<22} {}", "definition lines", stats.definition_lines);
    println!("{:<22} {}", "tests", stats.tests);
    println!("{:<22} {}", "images", stats.images);
    match stats.commits {
        Some(n) => println!("{:<22} {}", "commits", n),
        None => println!("{:<22} {}", "commits", "- (not a git checkout)"),
    }
    Ok(())
}
