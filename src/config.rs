use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::freq::DEFAULT_TOP_N;
use crate::grammar::synth::DEFAULT_MAX_RULES;

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Json(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read config: {}", e),
            ConfigError::Json(e) => write!(f, "failed to parse config: {}", e),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> ConfigError {
        ConfigError::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> ConfigError {
        ConfigError::Json(err)
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

fn default_max_grammar_rules() -> usize {
    DEFAULT_MAX_RULES
}

fn default_true() -> bool {
    true
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Number of entries reported in the frequency distribution.
    #[serde(default = "default_top_n", alias = "freq_top_n")]
    pub top_n: usize,
    /// When false, stopwords are kept and reach the tagger.
    #[serde(default = "default_true")]
    pub remove_stopwords: bool,
    /// Requests whose grammar would exceed this many lines fail with a 500.
    #[serde(default = "default_max_grammar_rules")]
    pub max_grammar_rules: usize,
    /// Worker threads for the HTTP server; `None` lets actix decide.
    #[serde(default)]
    pub workers: Option<usize>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            top_n: default_top_n(),
            remove_stopwords: true,
            max_grammar_rules: default_max_grammar_rules(),
            workers: None,
        }
    }
}

impl ServiceConfig {
    pub fn load(config_path: &Path) -> Result<Self, ConfigError> {
        let mut file = File::open(config_path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: ServiceConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.top_n == 0 {
            return Err(ConfigError::Invalid("top_n must be at least 1".to_string()));
        }
        if self.port == 0 {
            return Err(ConfigError::Invalid("port must be between 1 and 65535".to_string()));
        }
        if self.max_grammar_rules == 0 {
            return Err(ConfigError::Invalid("max_grammar_rules must be at least 1".to_string()));
        }
        if self.host.trim().is_empty() {
            return Err(ConfigError::Invalid("host must not be empty".to_string()));
        }
        if self.workers == Some(0) {
            return Err(ConfigError::Invalid("workers must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}
