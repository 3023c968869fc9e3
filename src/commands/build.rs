// src/commands/build.rs

//! Build command: make target with signing key bootstrap

use anyhow::Result;
use std::path::Path;
use tracing::info;
use wolfi_dev::exec::{require_tool, ExternalCommand};

/// Signing key melange expects in a local packages tree
const SIGNING_KEY: &str = "local-melange.rsa";

/// Build `package` in `dir`, generating the signing keypair first when
/// the tree has none
pub fn cmd_build(package: &str, dir: &str) -> Result<()> {
    let dir = Path::new(dir);
    require_tool("make")?;

    if !dir.join(SIGNING_KEY).is_file() {
        require_tool("melange")?;
        info!("no {SIGNING_KEY} in tree; generating");
        ExternalCommand::new("melange")
            .current_dir(dir)
            .args(["keygen", SIGNING_KEY])
            .run()?;
    }

    ExternalCommand::new("make")
        .current_dir(dir)
        .arg(format!("package/{package}"))
        .run_interactive()?;
    Ok(())
}
