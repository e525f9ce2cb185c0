//! Configuration management and validation.
//!
//! Settings are layered: built-in defaults, then an optional JSON config file,
//! then `ORDER_PARSER_*` environment variables. Command-line flags are applied
//! last by the CLI through the `with_*` builders.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_INPUT_EXTENSIONS, DEFAULT_MAX_CONCURRENT_FILES,
    DEFAULT_RECORD_SEPARATOR, ENV_INCLUDE_META, ENV_PRETTY, ENV_RECORD_SEPARATOR,
};
use crate::{Error, Result};

/// Global configuration for order report parsing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Parsing behaviour
    pub parser: ParserConfig,

    /// Output and input discovery
    pub output: OutputConfig,
}

/// Parser settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Record separator used when the dictionary does not declare one
    pub default_record_separator: String,

    /// Keep `_meta` warning blocks in the output
    pub include_meta: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            default_record_separator: DEFAULT_RECORD_SEPARATOR.to_string(),
            include_meta: true,
        }
    }
}

/// Output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output
    pub pretty: bool,

    /// Extensions picked up when walking an input directory
    pub input_extensions: Vec<String>,

    /// Maximum number of reports parsed at once
    pub max_concurrent_files: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: false,
            input_extensions: DEFAULT_INPUT_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            max_concurrent_files: DEFAULT_MAX_CONCURRENT_FILES,
        }
    }
}

impl Config {
    /// Location of the per-user config file
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            Error::configuration("Could not determine user configuration directory")
        })?;
        Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Read a JSON config file; missing sections and keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::io(format!("Failed to read config {}", path.display()), e))?;

        serde_json::from_str(&content).map_err(|e| {
            Error::configuration(format!("Invalid config file {}: {}", path.display(), e))
        })
    }

    /// Defaults, then the config file (if any), then the process environment
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => {
                debug!("Loading config file {}", path.display());
                Self::from_file(path)?
            }
            None => Self::default(),
        };

        config.apply_env()?;
        Ok(config)
    }

    /// Apply `ORDER_PARSER_*` variables from the process environment
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply environment overrides read through `lookup`
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(separator) = lookup(ENV_RECORD_SEPARATOR) {
            debug!("{} overrides record separator", ENV_RECORD_SEPARATOR);
            self.parser.default_record_separator = separator;
        }

        if let Some(value) = lookup(ENV_PRETTY) {
            self.output.pretty = parse_flag(ENV_PRETTY, &value)?;
        }

        if let Some(value) = lookup(ENV_INCLUDE_META) {
            self.parser.include_meta = parse_flag(ENV_INCLUDE_META, &value)?;
        }

        Ok(())
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<()> {
        Regex::new(&self.parser.default_record_separator)
            .map_err(|e| Error::invalid_separator(&self.parser.default_record_separator, e))?;

        if self.output.max_concurrent_files == 0 {
            return Err(Error::configuration(
                "max_concurrent_files must be greater than 0",
            ));
        }

        if self.output.input_extensions.is_empty() {
            return Err(Error::configuration(
                "At least one input extension is required",
            ));
        }

        Ok(())
    }

    /// Set the fallback record separator
    pub fn with_record_separator(mut self, separator: impl Into<String>) -> Self {
        self.parser.default_record_separator = separator.into();
        self
    }

    /// Keep or strip `_meta` blocks
    pub fn with_include_meta(mut self, include_meta: bool) -> Self {
        self.parser.include_meta = include_meta;
        self
    }

    /// Enable pretty JSON output
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.output.pretty = pretty;
        self
    }

    /// Set maximum concurrent files
    pub fn with_max_concurrent_files(mut self, max_files: usize) -> Self {
        self.output.max_concurrent_files = max_files;
        self
    }

    /// Whether `path` has one of the configured input extensions
    pub fn accepts_input(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.output
                    .input_extensions
                    .iter()
                    .any(|wanted| wanted.trim_start_matches('.').eq_ignore_ascii_case(ext))
            })
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(Error::configuration(format!(
            "{} must be a boolean, got '{}'",
            key, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.parser.default_record_separator, "^_+$");
        assert!(config.parser.include_meta);
        assert!(!config.output.pretty);
        assert_eq!(config.output.input_extensions, vec!["txt".to_string()]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"output": {{"pretty": true}}}}"#).unwrap();

        let config = Config::from_file(file.path()).unwrap();

        assert!(config.output.pretty);
        assert_eq!(config.output.max_concurrent_files, 8);
        assert_eq!(config.parser, ParserConfig::default());
    }

    #[test]
    fn test_invalid_file_is_configuration_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let error = Config::from_file(file.path()).unwrap_err();
        assert!(error.is_configuration());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config
            .apply_env_from(env(&[
                ("ORDER_PARSER_RECORD_SEPARATOR", "^=+$"),
                ("ORDER_PARSER_PRETTY", "yes"),
                ("ORDER_PARSER_INCLUDE_META", "0"),
            ]))
            .unwrap();

        assert_eq!(config.parser.default_record_separator, "^=+$");
        assert!(config.output.pretty);
        assert!(!config.parser.include_meta);
    }

    #[test]
    fn test_env_rejects_non_boolean() {
        let mut config = Config::default();
        let result = config.apply_env_from(env(&[("ORDER_PARSER_PRETTY", "maybe")]));

        assert!(matches!(result, Err(Error::Configuration { .. })));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad_separator = Config::default().with_record_separator("^(_+$");
        assert!(matches!(
            bad_separator.validate(),
            Err(Error::InvalidSeparator { .. })
        ));

        let no_concurrency = Config::default().with_max_concurrent_files(0);
        assert!(no_concurrency.validate().is_err());
    }

    #[test]
    fn test_builders() {
        let config = Config::default()
            .with_pretty(true)
            .with_include_meta(false)
            .with_record_separator("^-+$");

        assert!(config.output.pretty);
        assert!(!config.parser.include_meta);
        assert_eq!(config.parser.default_record_separator, "^-+$");
    }

    #[test]
    fn test_accepts_input() {
        let mut config = Config::default();
        config.output.input_extensions = vec!["txt".to_string(), ".RPT".to_string()];

        assert!(config.accepts_input(Path::new("a/report.txt")));
        assert!(config.accepts_input(Path::new("a/report.rpt")));
        assert!(!config.accepts_input(Path::new("a/report.json")));
        assert!(!config.accepts_input(Path::new("a/README")));
    }

    #[test]
    fn test_default_config_path_ends_with_app_dir() {
        if let Ok(path) = Config::default_config_path() {
            assert!(path.ends_with("order-parser/config.json"));
        }
    }
}
