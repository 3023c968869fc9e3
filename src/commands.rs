// src/commands.rs

//! Command handlers for the wolfi-dev CLI
//!
//! One module per subcommand. Handlers translate CLI arguments into the
//! library workflows, print human-readable results on stdout, and leave
//! diagnostics to `tracing`.

pub mod branch;
pub mod build;
pub mod clone;
pub mod convert;
pub mod numbers;
pub mod sandbox;
pub mod sdk;
pub mod stats;
