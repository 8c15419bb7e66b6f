//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `hound.toml` in the working directory unless `--config` says
//! otherwise. Every field has a sensible default so the file is optional.
//! Environment variables take precedence over file values.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use hound_adapter_http_axum::state::DashboardSettings;
use hound_app::services::Environment;
use hound_app::services::action_service::{ActionSettings, FailurePolicy};
use hound_domain::catalog::Catalog;
use hound_domain::error::{HoundError, ValidationError};
use hound_domain::service::ServiceEntry;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Which environment this console manages.
    pub environment: EnvironmentConfig,
    /// Probe execution settings.
    pub probes: ProbesConfig,
    /// Action execution settings.
    pub actions: ActionsConfig,
    /// Action authorization.
    pub security: SecurityConfig,
    /// Page rendering settings.
    pub dashboard: DashboardConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Restartable services; the stock list when absent.
    pub services: Option<Vec<ServiceEntry>>,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    /// Passed to the edit-lock scripts and shown in the page title.
    pub name: String,
    /// Directory holding the probe and action scripts.
    pub script_dir: PathBuf,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ProbesConfig {
    /// Upper bound for a single probe, in seconds.
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ActionsConfig {
    /// Upper bound for a single action command, in seconds.
    pub timeout_secs: u64,
    /// Wait for and report results, or fire and forget.
    pub failure_policy: FailurePolicy,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Shared secret for actions. Unset or empty disables actions.
    pub token: Option<String>,
    /// Honour legacy `GET /?nginx=true&token=…` actions.
    pub allow_query_actions: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Auto-reload interval; `0` disables it.
    pub refresh_seconds: u32,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `path` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("HOUND_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("HOUND_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("HOUND_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Ok(val) = std::env::var("HOUND_ENV") {
            self.environment.name = val;
        }
        if let Ok(val) = std::env::var("HOUND_SCRIPT_DIR") {
            self.environment.script_dir = PathBuf::from(val);
        }
        if let Ok(val) = std::env::var("HOUND_TOKEN") {
            self.security.token = Some(val);
        }
        if let Ok(val) = std::env::var("HOUND_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.environment.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                ValidationError::EmptyEnvironment.to_string(),
            ));
        }
        if self.probes.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "probe timeout must be non-zero".to_string(),
            ));
        }
        if self.actions.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "action timeout must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    #[must_use]
    pub fn environment(&self) -> Environment {
        Environment::new(
            self.environment.name.clone(),
            self.environment.script_dir.clone(),
        )
    }

    #[must_use]
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probes.timeout_secs)
    }

    /// The configured token, with an empty string treated as unset.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.security
            .token
            .as_deref()
            .filter(|token| !token.trim().is_empty())
    }

    #[must_use]
    pub fn action_settings(&self) -> ActionSettings {
        ActionSettings {
            timeout: Duration::from_secs(self.actions.timeout_secs),
            policy: self.actions.failure_policy,
            token: self.token().map(str::to_string),
        }
    }

    #[must_use]
    pub fn dashboard_settings(&self) -> DashboardSettings {
        DashboardSettings {
            refresh_seconds: self.dashboard.refresh_seconds,
            allow_query_actions: self.security.allow_query_actions,
        }
    }

    /// Build the row and action catalog from the configured services.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Catalog`] when a service entry is invalid or
    /// two services share an action parameter.
    pub fn catalog(&self) -> Result<Catalog, ConfigError> {
        let services = self
            .services
            .clone()
            .unwrap_or_else(ServiceEntry::defaults);
        Catalog::standard_with(services).map_err(ConfigError::Catalog)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            name: "webconsole".to_string(),
            script_dir: PathBuf::from("bashScripts"),
        }
    }
}

impl Default for ProbesConfig {
    fn default() -> Self {
        Self { timeout_secs: 5 }
    }
}

impl Default for ActionsConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            failure_policy: FailurePolicy::Report,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            refresh_seconds: DashboardSettings::default().refresh_seconds,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "houndd=info,hound_app=info,hound_adapter_http_axum=info,hound_adapter_process_tokio=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
    /// The `[[services]]` list does not form a valid catalog.
    #[error("invalid service catalog")]
    Catalog(#[source] HoundError),
}
