//! Compiler configuration (tilec.toml)
//!
//! ```toml
//! [compile]
//! honor_sync = false
//! keep_going = true
//!
//! [output]
//! format = "text"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const CONFIG_FILE_NAME: &str = "tilec.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompilerConfig {
    #[serde(default)]
    pub compile: CompileConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// `[compile]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompileConfig {
    /// Record the `sync` keyword on functions. When false (the default) every
    /// function is built with `sync = false` whatever the source says.
    #[serde(default)]
    pub honor_sync: bool,

    /// Keep compiling sibling modules after one fails validation
    #[serde(default = "default_keep_going")]
    pub keep_going: bool,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            honor_sync: false,
            keep_going: default_keep_going(),
        }
    }
}

fn default_keep_going() -> bool {
    true
}

/// `[output]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `Module <name>:` followed by the four rows
    #[default]
    Text,
    Json,
}

impl CompilerConfig {
    /// Parse a configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e)))
    }

    /// Load configuration from a file path
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_str(&content)
    }

    /// Search `start_dir` and its parents for a tilec.toml
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut current = start_dir.to_path_buf();

        loop {
            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.is_file() {
                let config = Self::from_file(&config_path)?;
                return Ok(Some((config, config_path)));
            }

            if !current.pop() {
                return Ok(None);
            }
        }
    }

    /// Serialize configuration to TOML string
    pub fn to_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize configuration: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CompilerConfig::default();
        assert!(!config.compile.honor_sync);
        assert!(config.compile.keep_going);
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn test_parse_empty_config() {
        let config = CompilerConfig::from_str("").unwrap();
        assert_eq!(config, CompilerConfig::default());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[compile]
honor_sync = true
keep_going = false

[output]
format = "json"
"#;
        let config = CompilerConfig::from_str(toml).unwrap();
        assert!(config.compile.honor_sync);
        assert!(!config.compile.keep_going);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_parse_partial_section() {
        let config = CompilerConfig::from_str("[compile]\nhonor_sync = true\n").unwrap();
        assert!(config.compile.honor_sync);
        assert!(config.compile.keep_going);
    }

    #[test]
    fn test_invalid_config() {
        let err = CompilerConfig::from_str("[output]\nformat = \"xml\"\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_round_trip_through_toml() {
        let mut config = CompilerConfig::default();
        config.output.format = OutputFormat::Json;
        let text = config.to_string().unwrap();
        assert_eq!(CompilerConfig::from_str(&text).unwrap(), config);
    }
}
