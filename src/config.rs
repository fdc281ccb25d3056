//! Configuration: defaults → optional TOML file → environment.
//!
//! The whole configuration surface is small: where the model endpoint
//! lives, which models to try in which order, where the API key comes
//! from, and how long the auto-translation debounce waits. Everything has
//! a default, so a config file is optional; `SMARTBRIDGE_CONFIG` points at
//! an alternate file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::llm::providers::gemini;

/// Environment variable holding the API credential by default.
pub const API_KEY_ENV_VAR: &str = "API_KEY";

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV_VAR: &str = "SMARTBRIDGE_CONFIG";

/// Model identifiers tried in order on every call.
pub const DEFAULT_MODEL_FALLBACK: &[&str] = &[
    "gemini-3-flash-preview",
    "gemini-2.5-flash",
    "gemini-2.5-flash-lite",
];

/// Default quiet period for the received-text debounce, in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 800;

/// Configuration loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file {path}: {message}")]
    Read {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying IO error text.
        message: String,
    },

    /// The config file did not parse as TOML.
    #[error("invalid config file {path}: {message}")]
    Parse {
        /// Path that was attempted.
        path: PathBuf,
        /// Parser error text.
        message: String,
    },

    /// A secret reference could not be resolved.
    #[error("{0}")]
    Secret(String),
}

/// Reference to the API credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SecretRef {
    /// Inline literal key (discouraged; use env when possible).
    Literal {
        /// The key itself.
        value: String,
    },
    /// Resolve the key from an environment variable.
    Env {
        /// Name of the environment variable.
        var: String,
    },
}

impl Default for SecretRef {
    fn default() -> Self {
        Self::Env {
            var: API_KEY_ENV_VAR.to_owned(),
        }
    }
}

impl SecretRef {
    /// Resolve the credential, failing if it is missing or blank.
    pub fn resolve(&self) -> Result<String, ConfigError> {
        match self {
            Self::Literal { value } => {
                if value.trim().is_empty() {
                    return Err(ConfigError::Secret("literal api key is empty".into()));
                }
                Ok(value.clone())
            }
            Self::Env { var } => {
                let value = std::env::var(var).map_err(|_| {
                    ConfigError::Secret(format!("api key env var is missing: {var}"))
                })?;
                if value.trim().is_empty() {
                    return Err(ConfigError::Secret(format!(
                        "api key env var is empty: {var}"
                    )));
                }
                Ok(value)
            }
        }
    }
}

/// Model-endpoint section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Base URL of the Generative Language API.
    pub base_url: String,
    /// Ordered model-candidate list, tried top to bottom on every call.
    pub model_fallback: Vec<String>,
    /// Where the API key comes from.
    pub api_key: SecretRef,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: gemini::DEFAULT_BASE_URL.to_owned(),
            model_fallback: DEFAULT_MODEL_FALLBACK
                .iter()
                .map(|m| (*m).to_owned())
                .collect(),
            api_key: SecretRef::default(),
        }
    }
}

/// Interaction-controller section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Quiet period after the last keystroke, in milliseconds.
    pub debounce_ms: u64,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Model-endpoint settings.
    pub llm: LlmConfig,
    /// Interaction-controller settings.
    pub controller: ControllerConfig,
}

impl AppConfig {
    /// Default location of the config file.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("smartbridge")
            .join("config.toml")
    }

    /// Load configuration from a specific TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&raw).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load configuration the standard way: `SMARTBRIDGE_CONFIG` if set,
    /// else the default path if it exists, else built-in defaults.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV_VAR) {
            return Self::from_file(path);
        }
        let default_path = Self::default_path();
        if default_path.exists() {
            return Self::from_file(default_path);
        }
        Ok(Self::default())
    }

    /// The debounce quiet period as a [`Duration`].
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.controller.debounce_ms)
    }
}
