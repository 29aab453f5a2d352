use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Default config document looked up in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Runtime configuration, read from a small JSON key-value document.
/// Unknown keys are ignored.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Path to the whitespace-delimited measurement table.
    pub microperimetry: PathBuf,
}

/// Load the configuration document. A missing or malformed document is a
/// hard failure: without an input path there is nothing to validate.
pub fn load(path: &Path) -> Result<Config> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: Config = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config)
}
