// src/cli.rs

//! CLI definitions for the wolfi-dev helper
//!
//! This module contains the command-line interface definitions using
//! clap. The actual command implementations are in the `commands` module.

use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "wolfi-dev")]
#[command(author = "wolfi-dev Contributors")]
#[command(version)]
#[command(
    about = "Developer helpers for Wolfi packages and Chainguard images",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a fresh sandbox directory and print its path
    Sandbox {
        /// Label embedded in the sandbox name
        label: Option<String>,
    },

    /// Clone an upstream repository into a fresh sandbox
    Clone {
        /// Repository to clone: os, images, or images-private
        #[arg(default_value = "os")]
        repo: String,

        /// Clone URL override (e.g. your fork)
        #[arg(long)]
        url: Option<String>,
    },

    /// Clone, get onto a branch (creating and publishing it if new),
    /// sync from upstream, and point origin at your fork
    Branch {
        /// Branch name to work on
        branch: String,

        /// Repository to branch in: os, images, or images-private
        #[arg(default_value = "os")]
        repo: String,
    },

    /// Convert an Alpine aports package to a melange definition on a
    /// fresh branch
    Convert {
        /// Package name as it appears in aports
        package: String,
    },

    /// Print the counting metrics for a packages tree
    Stats {
        /// Directory to measure
        #[arg(default_value = ".")]
        dir: String,
    },

    /// Monthly history report over the Wolfi trees (tab-separated)
    Numbers,

    /// Start an interactive SDK build container with the current
    /// directory mounted at /work
    Sdk {
        /// Arguments passed through to the container
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Build a package with make, generating a melange signing key first
    /// if the tree has none
    Build {
        /// Package name (make target package/<name>)
        package: String,

        /// Packages tree to build in
        #[arg(default_value = ".")]
        dir: String,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
