// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Bridge configuration.
//!
//! Supports both programmatic and TOML file configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::opcua::memory::DEFAULT_PLACEHOLDER_SUFFIX;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Bridge configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BridgeConfig {
    /// Namespace index of bridged types and nodes.
    #[serde(default = "default_namespace_index")]
    pub namespace_index: u16,

    /// Namespace URI written as the schema document's target namespace.
    #[serde(default = "default_namespace_uri")]
    pub namespace_uri: String,

    /// Name of the schema document.
    #[serde(default = "default_dictionary_name")]
    pub dictionary_name: String,

    /// Suffix of placeholder type identifiers (`<type name><suffix>`).
    #[serde(default = "default_placeholder_suffix")]
    pub placeholder_suffix: String,

    /// Roots containing `<package>/msg` and `<package>/srv` directories.
    #[serde(default)]
    pub msg_paths: Vec<PathBuf>,
}

fn default_namespace_index() -> u16 {
    2
}

fn default_namespace_uri() -> String {
    "http://ros.org/rosopcua".to_string()
}

fn default_dictionary_name() -> String {
    "ROSDictionary".to_string()
}

fn default_placeholder_suffix() -> String {
    DEFAULT_PLACEHOLDER_SUFFIX.to_string()
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            namespace_index: default_namespace_index(),
            namespace_uri: default_namespace_uri(),
            dictionary_name: default_dictionary_name(),
            placeholder_suffix: default_placeholder_suffix(),
            msg_paths: Vec::new(),
        }
    }
}

impl BridgeConfig {
    /// Load configuration from a TOML file.
    ///
    /// Relative `msg_paths` are resolved against the file's directory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml(&content)?;
        if let Some(base) = path.parent() {
            for entry in &mut config.msg_paths {
                if entry.is_relative() {
                    *entry = base.join(&*entry);
                }
            }
        }
        Ok(config)
    }

    /// Parse and validate configuration text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.namespace_index == 0 {
            return Err(ConfigError::Invalid(
                "namespace_index 0 is reserved for the standard namespace".into(),
            ));
        }
        if self.dictionary_name.is_empty() {
            return Err(ConfigError::Invalid("dictionary_name is empty".into()));
        }
        if self.placeholder_suffix.is_empty() {
            return Err(ConfigError::Invalid("placeholder_suffix is empty".into()));
        }
        if self.namespace_uri.is_empty() {
            return Err(ConfigError::Invalid("namespace_uri is empty".into()));
        }
        Ok(())
    }

    /// Add a definition root.
    pub fn with_msg_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.msg_paths.push(path.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BridgeConfig::default();
        assert_eq!(config.namespace_index, 2);
        assert_eq!(config.dictionary_name, "ROSDictionary");
        assert_eq!(config.placeholder_suffix, "Type");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml_partial() {
        let config = BridgeConfig::from_toml(
            r#"
namespace_index = 3
placeholder_suffix = "DataType"
msg_paths = ["/opt/ros/share"]
"#,
        )
        .unwrap();
        assert_eq!(config.namespace_index, 3);
        assert_eq!(config.placeholder_suffix, "DataType");
        assert_eq!(config.namespace_uri, "http://ros.org/rosopcua");
        assert_eq!(config.msg_paths, vec![PathBuf::from("/opt/ros/share")]);
    }

    #[test]
    fn test_validation_errors() {
        assert!(matches!(
            BridgeConfig::from_toml("namespace_index = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            BridgeConfig::from_toml("dictionary_name = \"\""),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(matches!(
            BridgeConfig::from_toml("namspace_index = 2"),
            Err(ConfigError::Toml(_))
        ));
    }
}
