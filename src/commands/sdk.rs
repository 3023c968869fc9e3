// src/commands/sdk.rs

//! Sdk command: interactive build-container session

use anyhow::{Context, Result};
use wolfi_dev::container;

/// Run the SDK container against the current directory
pub fn cmd_sdk(args: &[String]) -> Result<()> {
    let workdir = std::env::current_dir().context("cannot determine current directory")?;
    let image = container::sdk_image();
    container::run_session(&workdir, &image, args)?;
    Ok(())
}
