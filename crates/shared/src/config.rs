//! Application configuration management.

use serde::Deserialize;

/// Environment variable selecting the run mode (`development`, `production`, ...).
pub const RUN_MODE_VAR: &str = "APP_ENV";

/// Legacy port variable, applied on top of every other source.
pub const PORT_OVERRIDE_VAR: &str = "APP_PORT";

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration.
    #[serde(default)]
    pub log: LogConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// Returns the `host:port` pair to bind.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// `EnvFilter` directives used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

fn default_log_filter() -> String {
    "splitter=debug,tower_http=debug".to_string()
}

impl AppConfig {
    /// Loads configuration from config files and the environment.
    ///
    /// Sources, lowest precedence first: `config/default`, `config/{APP_ENV}`,
    /// `SPLITTER__*` variables, then `APP_PORT`.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = run_mode();

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("SPLITTER").separator("__"))
            .set_override_option("server.port", std::env::var(PORT_OVERRIDE_VAR).ok())?
            .build()?;

        config.try_deserialize()
    }
}

/// Current run mode, `development` unless `APP_ENV` says otherwise.
#[must_use]
pub fn run_mode() -> String {
    std::env::var(RUN_MODE_VAR).unwrap_or_else(|_| "development".to_string())
}

/// Returns true when running with `APP_ENV=production`.
#[must_use]
pub fn is_production() -> bool {
    run_mode() == "production"
}
