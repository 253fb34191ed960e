//! Index configuration.
//!
//! Settings come from three layers, later ones winning:
//!
//! 1. stock defaults ([`IndexConfig::default`])
//! 2. `abc-index.toml` in the source root (optional, sparse)
//! 3. command-line flags ([`ConfigOverrides`])
//!
//! ## Config File
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! title = "Tunes"           # Page title; also names the output files
//! split = false             # One page per letter instead of a single page
//! # base_url = "https://example.org/tunes"   # Prefix for links to tune files
//!
//! [scan]
//! extension = "abc"         # Tune file extension (case-insensitive)
//!
//! [companion]
//! suffix = ".pdf"           # Appended to a tune file's name to find its rendering
//! label = "PDF"             # Link text for the rendering
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the optional config file in the source root.
pub const CONFIG_FILE_NAME: &str = "abc-index.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Index configuration loaded from `abc-index.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexConfig {
    /// Document title. Spaces become dashes in output file names.
    pub title: String,
    /// Emit one page per letter plus a redirecting main page.
    pub split: bool,
    /// Prefix for links to tune files. Relative links when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Which files are read.
    pub scan: ScanConfig,
    /// Rendered documents stored next to tune files.
    pub companion: CompanionConfig,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            title: "Tunes".to_string(),
            split: false,
            base_url: None,
            scan: ScanConfig::default(),
            companion: CompanionConfig::default(),
        }
    }
}

impl IndexConfig {
    /// Validate values that serde alone can't check.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::Validation("title must not be empty".into()));
        }
        if self.scan.extension.is_empty() {
            return Err(ConfigError::Validation(
                "scan.extension must not be empty".into(),
            ));
        }
        if self.scan.extension.starts_with('.') {
            return Err(ConfigError::Validation(
                "scan.extension must not start with '.'".into(),
            ));
        }
        if self.companion.suffix.is_empty() {
            return Err(ConfigError::Validation(
                "companion.suffix must not be empty".into(),
            ));
        }
        if self.companion.label.is_empty() {
            return Err(ConfigError::Validation(
                "companion.label must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Base URL with any trailing slash removed.
    pub fn base_url(&self) -> Option<&str> {
        self.base_url
            .as_deref()
            .map(|url| url.trim_end_matches('/'))
            .filter(|url| !url.is_empty())
    }
}

/// File selection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// Extension of tune files, without the dot. Matched ignoring ASCII case.
    pub extension: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extension: "abc".to_string(),
        }
    }
}

impl ScanConfig {
    /// Whether `path` has the configured extension.
    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(self.extension.as_str()))
    }
}

/// Companion (rendered) document settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompanionConfig {
    /// Appended to the tune file's full name, e.g. `reels.abc` → `reels.abc.pdf`.
    pub suffix: String,
    /// Link text.
    pub label: String,
}

impl Default for CompanionConfig {
    fn default() -> Self {
        Self {
            suffix: ".pdf".to_string(),
            label: "PDF".to_string(),
        }
    }
}

/// Values given on the command line. `None` leaves the config value alone.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub title: Option<String>,
    pub base_url: Option<String>,
    pub split: Option<bool>,
}

impl ConfigOverrides {
    /// Apply overrides and re-validate.
    pub fn apply(self, mut config: IndexConfig) -> Result<IndexConfig, ConfigError> {
        if let Some(title) = self.title {
            config.title = title;
        }
        if let Some(base_url) = self.base_url {
            config.base_url = Some(base_url);
        }
        if let Some(split) = self.split {
            config.split = split;
        }
        config.validate()?;
        Ok(config)
    }
}

// =============================================================================
// Config loading and validation
// =============================================================================

/// Parse the text of an `abc-index.toml`. Absent keys keep their defaults.
pub fn parse_config(content: &str) -> Result<IndexConfig, ConfigError> {
    let config: IndexConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load config for a source directory, falling back to stock defaults.
pub fn load_config(root: &Path) -> Result<IndexConfig, ConfigError> {
    let config_path = root.join(CONFIG_FILE_NAME);
    if !config_path.is_file() {
        return Ok(IndexConfig::default());
    }
    let content = fs::read_to_string(&config_path)?;
    tracing::debug!(file = %config_path.display(), "loaded config");
    parse_config(&content)
}

/// Returns a fully-commented stock `abc-index.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# abc-index Configuration
# =======================
# Place this file in the root of the tune directory as abc-index.toml.
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.
# Command-line flags (--title, --base-url, --split) override these values.

# Page title. Also names the output files: "Session Tunes" -> Session-Tunes-Index.html
title = "Tunes"

# Write one page per letter (Tunes-A-Index.html, ...) plus a main page that
# redirects to the first letter.
split = false

# Prefix for links to tune files. Links are relative when unset.
# base_url = "https://example.org/tunes"

# ---------------------------------------------------------------------------
# Scanning
# ---------------------------------------------------------------------------
[scan]
# Extension of tune files, without the dot. Matched ignoring case.
extension = "abc"

# ---------------------------------------------------------------------------
# Companion documents (rendered copies stored next to the tune files)
# ---------------------------------------------------------------------------
[companion]
# Appended to the tune file's full name: reels.abc -> reels.abc.pdf
suffix = ".pdf"

# Link text shown next to the tune file link.
label = "PDF"
"##
}
