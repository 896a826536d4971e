//! Editor configuration.
//!
//! Every field has a default, so an empty YAML document (or none at all)
//! yields the stock behaviour.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Tunables for validation and commit behaviour.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    /// Earliest accepted campaign year.
    pub year_min: i32,
    /// Latest accepted campaign year.
    pub year_max: i32,
    /// Rewrite `https://` links to `http://` on commit. Existing configs
    /// rely on this, hence the default.
    pub downgrade_https: bool,
    /// Number of tracked attributes a complete config carries for its
    /// campaign id.
    pub expected_references: usize,
    /// Collapse whitespace runs in the subject before normalizing.
    pub collapse_subject_whitespace: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            year_min: 2020,
            year_max: 2030,
            downgrade_https: true,
            expected_references: 7,
            collapse_subject_whitespace: true,
        }
    }
}

impl EditorConfig {
    /// Parse a YAML configuration and check its invariants.
    pub fn from_yaml(input: &str) -> Result<EditorConfig, ConfigError> {
        if input.trim().is_empty() {
            return Ok(EditorConfig::default());
        }
        let config: EditorConfig = serde_saphyr::from_str(input).map_err(|e| ConfigError {
            message: format!("invalid editor config: {}", e),
        })?;
        config.check()?;
        Ok(config)
    }

    /// Read and parse a YAML configuration file.
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<EditorConfig, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        EditorConfig::from_yaml(&content)
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.year_min > self.year_max {
            return Err(ConfigError {
                message: format!(
                    "year_min ({}) must not exceed year_max ({})",
                    self.year_min, self.year_max
                ),
            });
        }
        if self.expected_references == 0 {
            return Err(ConfigError {
                message: "expected_references must be positive".to_string(),
            });
        }
        Ok(())
    }
}
