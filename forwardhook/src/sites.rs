//! Destination list loading.
//!
//! The list lives in a plain text file with one URL per line. Lines are not
//! validated here; a malformed URL is reported when a hook is dispatched.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

/// Read the destination list from `path`.
///
/// A missing or unreadable file yields an empty list, which turns the server
/// into an accept-and-discard endpoint.
pub fn load_sites(path: impl AsRef<Path>) -> Vec<String> {
    let path = path.as_ref();

    match read_sites(path) {
        Ok(sites) => {
            info!(path = %path.display(), count = sites.len(), sites = ?sites, "sites_loaded");
            sites
        }
        Err(e) => {
            warn!(path = %path.display(), error = %format!("{e:#}"), "sites_file_unreadable");
            Vec::new()
        }
    }
}

fn read_sites(path: &Path) -> Result<Vec<String>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read sites file {}", path.display()))?;
    Ok(parse_sites(&contents))
}

/// Split file contents into trimmed, non-empty lines.
pub fn parse_sites(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
