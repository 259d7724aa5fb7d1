//! Runner configuration file parsing.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File name looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "protoscope.toml";

pub const DEFAULT_MAX_CALL_DEPTH: usize = 256;

lazy_static! {
    static ref DEFAULT_GLOBAL_ALIASES: Vec<String> = vec![
        "window".to_string(),
        "global".to_string(),
        "globalThis".to_string(),
    ];
}

/// Errors that can occur while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Settings shared by every realm a runner creates.
///
/// Expected format:
/// ```toml
/// global_aliases = ["window", "globalThis"]
/// max_call_depth = 128
/// fail_fast = false
/// filter = "prototype"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunnerConfig {
    /// Names that resolve to the global object itself.
    pub global_aliases: Vec<String>,

    /// Deepest allowed nesting of function invocations.
    pub max_call_depth: usize,

    /// Stop after the first failing example.
    pub fail_fast: bool,

    /// Run only examples whose full name contains this text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

impl RunnerConfig {
    pub fn new() -> Self {
        RunnerConfig {
            global_aliases: DEFAULT_GLOBAL_ALIASES.clone(),
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            fail_fast: false,
            filter: None,
        }
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string. Missing keys keep their defaults.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: RunnerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` when given, else `protoscope.toml` if present, else defaults.
    pub fn discover(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::load(default_path)
                } else {
                    Ok(Self::new())
                }
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_call_depth == 0 {
            return Err(ConfigError::Invalid(
                "max_call_depth must be at least 1".to_string(),
            ));
        }
        for alias in &self.global_aliases {
            let mut chars = alias.chars();
            let valid = match chars.next() {
                Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {
                    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
                }
                _ => false,
            };
            if !valid {
                return Err(ConfigError::Invalid(format!(
                    "global alias '{}' is not an identifier",
                    alias
                )));
            }
        }
        Ok(())
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self::new()
    }
}
