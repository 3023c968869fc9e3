// src/probe.rs

//! HTTP existence probing for upstream package sources
//!
//! The converter needs two lightweight answers before it does anything
//! expensive: which aports section (if any) carries an APKBUILD for the
//! package, and whether a Wolfi definition for the package already exists
//! publicly. Both are plain HEAD-style checks against raw file URLs.

use crate::error::{Error, Result};
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::debug;

/// Timeout for probe requests (the wrapped tools manage their own time)
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Raw-file prefixes for the Alpine aports sections we convert from,
/// probed in order.
const APORTS_SECTIONS: [(&str, &str); 2] = [
    (
        "main",
        "https://raw.githubusercontent.com/alpinelinux/aports/master/main",
    ),
    (
        "community",
        "https://raw.githubusercontent.com/alpinelinux/aports/master/community",
    ),
];

/// Raw-file prefix of the public Wolfi packages tree
const OS_RAW_PREFIX: &str = "https://raw.githubusercontent.com/wolfi-dev/os/main";

/// A resolved upstream package source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbedSource {
    /// Aports section the package lives in ("main" or "community")
    pub section: String,
    /// Full URL of the APKBUILD file
    pub apkbuild_url: String,
    /// Source-URL template handed to the conversion tool, with `%s`
    /// standing in for the package name.
    pub base_uri_format: String,
}

/// Answers the converter's two preflight questions.
///
/// A trait so workflows can be exercised without network access.
pub trait SourceProbe {
    /// Locate the APKBUILD for `package`, trying each section in order
    fn apkbuild(&self, package: &str) -> Result<ProbedSource>;

    /// Whether `<package>.yaml` already exists in the public packages tree
    fn definition_exists(&self, package: &str) -> Result<bool>;
}

/// Network-backed probe
pub struct HttpProbe {
    client: Client,
}

impl HttpProbe {
    /// Build a probe with the standard timeout
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::Http(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// HEAD `url`, treating any 2xx as "exists" and any other status as
    /// "does not exist". Transport failures are real errors.
    fn exists(&self, url: &str) -> Result<bool> {
        let response = self
            .client
            .head(url)
            .send()
            .map_err(|e| Error::Http(format!("failed to probe {url}: {e}")))?;
        debug!(url, status = %response.status(), "probed");
        Ok(response.status().is_success())
    }
}

impl SourceProbe for HttpProbe {
    fn apkbuild(&self, package: &str) -> Result<ProbedSource> {
        for (section, prefix) in APORTS_SECTIONS {
            let url = format!("{prefix}/{package}/APKBUILD");
            if self.exists(&url)? {
                return Ok(ProbedSource {
                    section: section.to_string(),
                    apkbuild_url: url,
                    base_uri_format: format!("{prefix}/%s/APKBUILD"),
                });
            }
        }
        Err(Error::NotFound(format!(
            "no APKBUILD for '{package}' in aports main or community"
        )))
    }

    fn definition_exists(&self, package: &str) -> Result<bool> {
        self.exists(&format!("{OS_RAW_PREFIX}/{package}.yaml"))
    }
}
