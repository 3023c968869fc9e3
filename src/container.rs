// src/container.rs

//! Launching the Wolfi SDK build container
//!
//! Thin docker wrapper: make sure the SDK image is available locally,
//! then start an interactive session with the working tree mounted at
//! `/work`. Image contents are not this tool's business.

use crate::error::Result;
use crate::exec::{require_tool, ExternalCommand};
use std::path::Path;
use tracing::info;

/// Image used when `WOLFI_SDK_IMAGE` is not set
pub const DEFAULT_SDK_IMAGE: &str = "ghcr.io/wolfi-dev/sdk:latest";

/// SDK image to run, honoring the environment override
pub fn sdk_image() -> String {
    std::env::var("WOLFI_SDK_IMAGE")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_SDK_IMAGE.to_string())
}

/// Pull `image` unless it is already present locally
pub fn ensure_image(image: &str) -> Result<()> {
    require_tool("docker")?;
    let present = ExternalCommand::new("docker")
        .args(["image", "inspect", image])
        .run_unchecked()?;
    if present.success() {
        return Ok(());
    }
    info!(image, "pulling SDK image");
    ExternalCommand::new("docker").args(["pull", image]).run()?;
    Ok(())
}

/// Run an interactive SDK session with `workdir` mounted at `/work`.
///
/// Extra arguments are passed through to the container entrypoint
/// unchanged; flag parsing belongs to the wrapped tool.
pub fn run_session(workdir: &Path, image: &str, extra_args: &[String]) -> Result<()> {
    ensure_image(image)?;
    let mount = format!("{}:/work", workdir.display());
    ExternalCommand::new("docker")
        .args(["run", "--rm", "-it", "-v", mount.as_str(), "-w", "/work"])
        .arg(image)
        .args(extra_args.iter().cloned())
        .run_interactive()
}
