//! Loads the matcher lookup tables from the user's config directory.
//!
//! The tables live in `~/.config/promptvault/matcher.toml`. A missing or
//! empty file falls back to the built-in tables, so a fresh install works
//! without any configuration.

use std::fs;
use std::path::Path;

use promptvault_core::error::Result;
use promptvault_core::template::MatcherConfig;

use crate::paths::VaultPaths;

/// Loads the matcher tables from the default config file path.
pub fn load_matcher_config() -> Result<MatcherConfig> {
    load_from(&VaultPaths::matcher_config_file()?)
}

/// Loads the matcher tables from `path`.
///
/// - Missing or empty file: the built-in defaults.
/// - Unparseable file: an error, so a typo does not silently revert the
///   user's tables to the defaults.
pub fn load_from(path: &Path) -> Result<MatcherConfig> {
    if !path.exists() {
        return Ok(MatcherConfig::default());
    }

    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(MatcherConfig::default());
    }

    Ok(toml::from_str(&content)?)
}

/// Saves the matcher tables to the default config file path.
pub fn save_matcher_config(config: &MatcherConfig) -> Result<()> {
    let path = VaultPaths::matcher_config_file()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, toml::to_string_pretty(config)?)?;
    Ok(())
}
