//! Editor configuration, loaded from JSON. Missing keys use defaults.

use anyhow::Context;
use formcraft_model::{ConfigError, FormLimits};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::editor::history::DEFAULT_MAX_STATES;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Snapshots kept for undo, including the current one.
    #[serde(default = "default_max_history")]
    pub max_history: usize,

    #[serde(default)]
    pub limits: FormLimits,
}

fn default_max_history() -> usize {
    DEFAULT_MAX_STATES
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_history: default_max_history(),
            limits: FormLimits::default(),
        }
    }
}

impl EditorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_history == 0 {
            tracing::error!("max_history must be greater than zero");
            return Err(ConfigError::ZeroLimit {
                field: "max_history".into(),
            });
        }
        self.limits.validate()
    }
}

/// Load and validate an editor config file.
pub fn load_config(path: impl AsRef<Path>) -> anyhow::Result<EditorConfig> {
    let path = path.as_ref();
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config file: {}", path.display()))?;
    let config: EditorConfig = serde_json::from_str(&data).context("parse config json")?;
    config
        .validate()
        .with_context(|| format!("invalid config: {}", path.display()))?;

    tracing::info!(
        path = %path.display(),
        max_history = config.max_history,
        "editor config loaded"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("editor.json");
        fs::write(&path, r#"{ "limits": { "max_fields": 12 } }"#).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.max_history, 50);
        assert_eq!(config.limits.max_fields, 12);
        assert_eq!(config.limits.max_option_length, 50);
    }

    #[test]
    fn test_zero_history_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("editor.json");
        fs::write(&path, r#"{ "max_history": 0 }"#).unwrap();

        let err = load_config(&path).unwrap_err();
        let chain = format!("{err:#}");
        assert!(chain.contains("invalid config"));
        assert!(chain.contains("max_history"));
    }
}
