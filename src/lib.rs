// src/lib.rs

//! wolfi-dev helper library
//!
//! Convenience workflows for developers working on Wolfi packages and
//! Chainguard images: sandboxed clones, fork-aware branch setup, Alpine
//! package conversion, interactive SDK build containers, and simple
//! counting statistics over the package trees, including a monthly
//! history report.
//!
//! # Architecture
//!
//! - Sandbox-first: every workflow gets a fresh uniquely named directory
//! - No ambient state: a `WorkspaceContext` value is threaded through
//!   workflow steps instead of changing the process working directory
//! - One external-command layer: every git/docker/melange/yam/make call
//!   goes through `exec::ExternalCommand` for uniform failure handling

pub mod container;
pub mod convert;
pub mod descriptor;
mod error;
pub mod exec;
pub mod metrics;
pub mod probe;
pub mod repo;
pub mod timeseries;
pub mod workspace;

pub use error::{Error, Result};
