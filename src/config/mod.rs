//! Configuration management
//!
//! Configuration is loaded from `config.yml` with environment variable
//! overrides; every field has a default, and a missing file is not an
//! error. The absence of backend credentials is a valid state: it selects
//! demo mode, where all data comes from in-memory fixtures.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Hosted backend (auth + tables) configuration
    #[serde(default)]
    pub backend: BackendConfig,
    /// Assistant (hosted model API) configuration
    #[serde(default)]
    pub assistant: AssistantConfig,
    /// Checkout configuration
    #[serde(default)]
    pub checkout: CheckoutConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origin for the browser frontend
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "http://localhost:3000".to_string()
}

/// Which data source serves a request: in-memory fixtures or the hosted
/// backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataMode {
    /// No backend configured; fixtures and simulated auth
    Demo,
    /// Hosted backend configured; real tables and auth
    Live,
}

/// Hosted backend connection configuration.
///
/// Two credential tiers: the publishable key is safe to use for
/// user-scoped requests; the secret key is server-only and grants
/// elevated access for privileged relays.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Backend project URL (empty means demo mode)
    #[serde(default)]
    pub url: String,
    /// Publishable (client-tier) API key
    #[serde(default)]
    pub publishable_key: String,
    /// Secret (server-only) API key
    #[serde(default)]
    pub secret_key: String,
}

impl BackendConfig {
    /// Decide the operating mode. Pure and side-effect free: demo when the
    /// URL or publishable key is absent, empty, or a known placeholder.
    pub fn mode(&self) -> DataMode {
        if is_placeholder(&self.url) || is_placeholder(&self.publishable_key) {
            DataMode::Demo
        } else {
            DataMode::Live
        }
    }
}

fn is_placeholder(value: &str) -> bool {
    value.trim().is_empty() || value.contains("placeholder")
}

/// Hosted model API configuration for the assistant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Model API key (empty means canned responses only)
    #[serde(default)]
    pub api_key: String,
    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,
    /// Output length bound per completion
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl AssistantConfig {
    /// Whether the hosted model can be called at all
    pub fn enabled(&self) -> bool {
        !is_placeholder(&self.api_key)
    }
}

fn default_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

/// Checkout configuration. Single-currency with a flat tax rate; both are
/// configurable rather than hard-coded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// Flat tax rate applied to the cart subtotal
    #[serde(default = "default_tax_rate")]
    pub tax_rate: f64,
    /// Display currency code
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            tax_rate: default_tax_rate(),
            currency: default_currency(),
        }
    }
}

fn default_tax_rate() -> f64 {
    0.10
}

fn default_currency() -> String {
    "USD".to_string()
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    ParseError { path: String, message: String },
}

impl Config {
    /// Load configuration from a YAML file. A missing file yields the
    /// defaults (which means demo mode).
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            source: e,
        })?;

        let config: Config =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: format_yaml_error(&e),
            })?;

        Ok(config)
    }

    /// Load configuration from file with environment variable overrides.
    ///
    /// Recognized variables:
    /// - WANDERHUB_SERVER_HOST / WANDERHUB_SERVER_PORT / WANDERHUB_SERVER_CORS_ORIGIN
    /// - WANDERHUB_BACKEND_URL / WANDERHUB_BACKEND_PUBLISHABLE_KEY / WANDERHUB_BACKEND_SECRET_KEY
    /// - WANDERHUB_ASSISTANT_API_KEY / WANDERHUB_ASSISTANT_MODEL / WANDERHUB_ASSISTANT_MAX_TOKENS
    /// - WANDERHUB_CHECKOUT_TAX_RATE / WANDERHUB_CHECKOUT_CURRENCY
    pub fn load_with_env(path: &Path) -> anyhow::Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides to the configuration
    fn apply_env_overrides(&mut self) {
        // Server configuration
        if let Ok(host) = std::env::var("WANDERHUB_SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("WANDERHUB_SERVER_PORT") {
            if let Ok(port) = port.parse::<u16>() {
                self.server.port = port;
            }
        }
        if let Ok(cors_origin) = std::env::var("WANDERHUB_SERVER_CORS_ORIGIN") {
            self.server.cors_origin = cors_origin;
        }

        // Backend configuration
        if let Ok(url) = std::env::var("WANDERHUB_BACKEND_URL") {
            self.backend.url = url;
        }
        if let Ok(key) = std::env::var("WANDERHUB_BACKEND_PUBLISHABLE_KEY") {
            self.backend.publishable_key = key;
        }
        if let Ok(key) = std::env::var("WANDERHUB_BACKEND_SECRET_KEY") {
            self.backend.secret_key = key;
        }

        // Assistant configuration
        if let Ok(api_key) = std::env::var("WANDERHUB_ASSISTANT_API_KEY") {
            self.assistant.api_key = api_key;
        }
        if let Ok(model) = std::env::var("WANDERHUB_ASSISTANT_MODEL") {
            self.assistant.model = model;
        }
        if let Ok(max_tokens) = std::env::var("WANDERHUB_ASSISTANT_MAX_TOKENS") {
            if let Ok(max_tokens) = max_tokens.parse::<u32>() {
                self.assistant.max_tokens = max_tokens;
            }
        }

        // Checkout configuration
        if let Ok(tax_rate) = std::env::var("WANDERHUB_CHECKOUT_TAX_RATE") {
            if let Ok(tax_rate) = tax_rate.parse::<f64>() {
                self.checkout.tax_rate = tax_rate;
            }
        }
        if let Ok(currency) = std::env::var("WANDERHUB_CHECKOUT_CURRENCY") {
            self.checkout.currency = currency;
        }
    }
}

/// Format YAML parsing error with location and context
fn format_yaml_error(e: &serde_yaml::Error) -> String {
    if let Some(location) = e.location() {
        format!(
            "at line {}, column {}: {}",
            location.line(),
            location.column(),
            e
        )
    } else {
        e.to_string()
    }
}

// Shared mutex for all config tests that modify environment variables.
// Rust runs tests in parallel by default and the process environment is
// global, so tests touching it must serialize.
#[cfg(test)]
static ENV_TEST_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
mod tests {
    use super::*;

    fn lock_env() -> std::sync::MutexGuard<'static, ()> {
        ENV_TEST_MUTEX.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    const ENV_VARS: &[&str] = &[
        "WANDERHUB_SERVER_HOST",
        "WANDERHUB_SERVER_PORT",
        "WANDERHUB_SERVER_CORS_ORIGIN",
        "WANDERHUB_BACKEND_URL",
        "WANDERHUB_BACKEND_PUBLISHABLE_KEY",
        "WANDERHUB_BACKEND_SECRET_KEY",
        "WANDERHUB_ASSISTANT_API_KEY",
        "WANDERHUB_ASSISTANT_MODEL",
        "WANDERHUB_ASSISTANT_MAX_TOKENS",
        "WANDERHUB_CHECKOUT_TAX_RATE",
        "WANDERHUB_CHECKOUT_CURRENCY",
    ];

    fn clear_env() {
        for var in ENV_VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_default_config_is_demo_mode() {
        let config = Config::default();
        assert_eq!(config.backend.mode(), DataMode::Demo);
        assert!(!config.assistant.enabled());
        assert_eq!(config.checkout.tax_rate, 0.10);
        assert_eq!(config.checkout.currency, "USD");
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = Config::load(Path::new("does-not-exist.yml")).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.backend.mode(), DataMode::Demo);
    }

    #[test]
    fn test_mode_selector_placeholder_values() {
        let mut backend = BackendConfig {
            url: "https://placeholder.example.co".to_string(),
            publishable_key: "pk-real".to_string(),
            secret_key: String::new(),
        };
        assert_eq!(backend.mode(), DataMode::Demo);

        backend.url = "https://project.example.co".to_string();
        backend.publishable_key = "placeholder-key".to_string();
        assert_eq!(backend.mode(), DataMode::Demo);

        backend.publishable_key = "pk-real".to_string();
        assert_eq!(backend.mode(), DataMode::Live);
    }

    #[test]
    fn test_mode_selector_empty_and_whitespace() {
        let backend = BackendConfig {
            url: "   ".to_string(),
            publishable_key: "pk-real".to_string(),
            secret_key: String::new(),
        };
        assert_eq!(backend.mode(), DataMode::Demo);
    }

    #[test]
    fn test_assistant_enabled() {
        let mut assistant = AssistantConfig::default();
        assert!(!assistant.enabled());
        assistant.api_key = "sk-test".to_string();
        assert!(assistant.enabled());
    }

    #[test]
    fn test_parse_yaml_config() {
        let yaml = r#"
server:
  port: 9000
backend:
  url: https://project.example.co
  publishable_key: pk-live-abc
checkout:
  tax_rate: 0.2
  currency: EUR
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.backend.mode(), DataMode::Live);
        assert_eq!(config.checkout.tax_rate, 0.2);
        assert_eq!(config.checkout.currency, "EUR");
    }

    #[test]
    fn test_env_override_backend() {
        let _guard = lock_env();
        clear_env();

        std::env::set_var("WANDERHUB_BACKEND_URL", "https://env.example.co");
        std::env::set_var("WANDERHUB_BACKEND_PUBLISHABLE_KEY", "pk-env");
        std::env::set_var("WANDERHUB_CHECKOUT_TAX_RATE", "0.25");

        let config = Config::load_with_env(Path::new("does-not-exist.yml")).unwrap();
        assert_eq!(config.backend.url, "https://env.example.co");
        assert_eq!(config.backend.mode(), DataMode::Live);
        assert_eq!(config.checkout.tax_rate, 0.25);

        clear_env();
    }

    #[test]
    fn test_env_override_ignores_unparseable_numbers() {
        let _guard = lock_env();
        clear_env();

        std::env::set_var("WANDERHUB_SERVER_PORT", "not-a-port");
        let config = Config::load_with_env(Path::new("does-not-exist.yml")).unwrap();
        assert_eq!(config.server.port, 8080);

        clear_env();
    }
}
