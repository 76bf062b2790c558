//! Configuration loading
//!
//! Sources, lowest priority first:
//! 1. Built-in defaults
//! 2. TOML file (`--config`, else `UJIHISA_CONFIG_PATH`, else `./ujihisa.toml` if present)
//! 3. `UJIHISA_*` environment variables, `__` between sections
//!    (`UJIHISA_LOGGING__LEVEL=debug`)
//! 4. Explicit builder overrides (command-line flags)

use config::{Environment, File, FileFormat, Map};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

pub const CONFIG_PATH_ENV: &str = "UJIHISA_CONFIG_PATH";
pub const ENV_PREFIX: &str = "UJIHISA";
pub const DEFAULT_CONFIG_FILE: &str = "ujihisa.toml";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

/* ===================== Settings ===================== */

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub interpreter: InterpreterSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InterpreterSettings {
    /// Emit the decode and execution trace
    #[serde(default)]
    pub trace: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingSettings {
    /// Filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from `.env`, the config file and the environment
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::builder().build()
    }

    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/* ===================== Builder ===================== */

#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config_path: Option<PathBuf>,
    trace: Option<bool>,
    log_level: Option<String>,
    environment: Option<Map<String, String>>,
}

impl ConfigBuilder {
    /// Explicit config file; it must exist
    pub fn config_path(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    /// Force tracing on or off
    pub fn trace(mut self, trace: Option<bool>) -> Self {
        self.trace = trace;
        self
    }

    pub fn log_level(mut self, level: Option<String>) -> Self {
        self.log_level = level;
        self
    }

    /// Read `UJIHISA_*` variables from this map instead of the process environment
    pub fn environment(mut self, vars: Map<String, String>) -> Self {
        self.environment = Some(vars);
        self
    }

    pub fn build(self) -> Result<Config, ConfigError> {
        let path = self
            .config_path
            .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from));

        let mut builder = config::Config::builder()
            .set_default("interpreter.trace", false)?
            .set_default("logging.level", DEFAULT_LOG_LEVEL)?;

        builder = match &path {
            Some(path) => builder.add_source(File::new(&path.to_string_lossy(), FileFormat::Toml)),
            None => builder
                .add_source(File::new(DEFAULT_CONFIG_FILE, FileFormat::Toml).required(false)),
        };

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .source(self.environment),
        );

        if let Some(trace) = self.trace {
            builder = builder.set_override("interpreter.trace", trace)?;
        }
        if let Some(level) = self.log_level {
            builder = builder.set_override("logging.level", level)?;
        }

        let config: Config = builder.build()?.try_deserialize()?;
        tracing::debug!(?path, ?config, "configuration loaded");
        Ok(config)
    }
}
