//! Unified path management for PromptVault files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/promptvault/       # Config directory
//! └── matcher.toml             # Synonym/alias matcher tables
//!
//! ~/.local/share/promptvault/  # Data directory
//! └── stores/                  # Store documents (AtomicFileStorage)
//!     ├── prompt_versions.json
//!     └── user_added_prompts.json
//! ```

use std::path::PathBuf;

use promptvault_core::error::{Result, VaultError};

/// Unified path resolution for PromptVault.
pub struct VaultPaths;

impl VaultPaths {
    const APP_DIR: &'static str = "promptvault";

    /// Returns the configuration directory (e.g. `~/.config/promptvault/`).
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(Self::APP_DIR))
            .ok_or_else(|| VaultError::config("cannot determine config directory"))
    }

    /// Returns the data directory (e.g. `~/.local/share/promptvault/`).
    pub fn data_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|dir| dir.join(Self::APP_DIR))
            .ok_or_else(|| VaultError::config("cannot determine data directory"))
    }

    /// Returns the path to the matcher tables file.
    pub fn matcher_config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("matcher.toml"))
    }

    /// Returns the directory holding the store documents.
    pub fn store_dir() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("stores"))
    }
}
