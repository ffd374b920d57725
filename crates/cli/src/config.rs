//! Settings file and ledger location

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use janus_core::models::settings::Settings;

/// Settings file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "janus.json";

/// Ledger file used when neither `--ledger` nor `JANUS_LEDGER` is given.
pub const DEFAULT_LEDGER_FILE: &str = "janus.ledger";

/// Load settings from `path`, else `janus.json` if it exists, else defaults.
///
/// An explicitly named file must exist and parse. Missing fields fall back to
/// their defaults.
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let (path, explicit) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };

    if !explicit && !path.exists() {
        log::debug!("no {DEFAULT_CONFIG_FILE} found, using default settings");
        return Ok(Settings::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let settings = parse_settings(&content)
        .with_context(|| format!("Invalid config file {}", path.display()))?;
    log::debug!("loaded settings from {}", path.display());
    Ok(settings)
}

pub fn parse_settings(content: &str) -> Result<Settings> {
    Ok(serde_json::from_str(content)?)
}

/// Resolve the ledger path; `--ledger` already carries `JANUS_LEDGER` via clap.
pub fn ledger_path(arg: Option<PathBuf>) -> PathBuf {
    arg.unwrap_or_else(|| PathBuf::from(DEFAULT_LEDGER_FILE))
}
