//! Size limits applied when validating forms.
//!
//! Missing keys in a config file fall back to the defaults below.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormLimits {
    #[serde(default = "default_max_fields")]
    pub max_fields: usize,
    #[serde(default = "default_max_title_length")]
    pub max_title_length: usize,
    #[serde(default = "default_max_description_length")]
    pub max_description_length: usize,
    #[serde(default = "default_max_field_label_length")]
    pub max_field_label_length: usize,
    #[serde(default = "default_max_field_placeholder_length")]
    pub max_field_placeholder_length: usize,
    #[serde(default = "default_max_options_per_field")]
    pub max_options_per_field: usize,
    #[serde(default = "default_max_option_length")]
    pub max_option_length: usize,
}

fn default_max_fields() -> usize {
    100
}

fn default_max_title_length() -> usize {
    100
}

fn default_max_description_length() -> usize {
    500
}

fn default_max_field_label_length() -> usize {
    100
}

fn default_max_field_placeholder_length() -> usize {
    200
}

fn default_max_options_per_field() -> usize {
    20
}

fn default_max_option_length() -> usize {
    50
}

impl Default for FormLimits {
    fn default() -> Self {
        Self {
            max_fields: default_max_fields(),
            max_title_length: default_max_title_length(),
            max_description_length: default_max_description_length(),
            max_field_label_length: default_max_field_label_length(),
            max_field_placeholder_length: default_max_field_placeholder_length(),
            max_options_per_field: default_max_options_per_field(),
            max_option_length: default_max_option_length(),
        }
    }
}

impl FormLimits {
    /// Every limit must allow at least one item or character.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("max_fields", self.max_fields),
            ("max_title_length", self.max_title_length),
            ("max_description_length", self.max_description_length),
            ("max_field_label_length", self.max_field_label_length),
            ("max_field_placeholder_length", self.max_field_placeholder_length),
            ("max_options_per_field", self.max_options_per_field),
            ("max_option_length", self.max_option_length),
        ];

        for (name, value) in fields {
            if value == 0 {
                tracing::error!(field = name, "form limit must be greater than zero");
                return Err(ConfigError::ZeroLimit {
                    field: name.to_string(),
                });
            }
        }

        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("limit '{field}' must be greater than zero")]
    ZeroLimit { field: String },
}
