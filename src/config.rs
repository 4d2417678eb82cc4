//! Process-wide configuration for the LexTrek front-end.
//!
//! Values are resolved once at start-up from, in increasing precedence:
//! built-in defaults, an optional TOML file, `LEXTREK_*` environment variables
//! and CLI flags. The result is installed into a `OnceLock` and never mutated.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::Deserialize;
use thiserror::Error;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60;

/// Default location of the query log, relative to the working directory.
pub const DEFAULT_LOG_PATH: &str = "query_log.csv";

pub const ENV_ENDPOINT_URL: &str = "LEXTREK_ENDPOINT_URL";
pub const ENV_TIMEOUT_SECONDS: &str = "LEXTREK_TIMEOUT_SECONDS";
pub const ENV_LOG_PATH: &str = "LEXTREK_LOG_PATH";

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Errors raised while resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No endpoint URL was supplied by any source
    #[error("No endpoint URL configured (set endpointUrl in config.toml, LEXTREK_ENDPOINT_URL or --endpoint-url)")]
    MissingEndpoint,

    /// The endpoint URL does not parse
    #[error("Invalid endpoint URL '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    /// Timeout must be strictly positive
    #[error("timeoutSeconds must be greater than zero")]
    InvalidTimeout,

    /// The config file exists but could not be read
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for `ConfigFile`
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// An environment variable holds a value of the wrong type
    #[error("Invalid value for {name}: {value}")]
    InvalidEnv { name: &'static str, value: String },

    /// `install` was called twice
    #[error("Configuration already initialized")]
    AlreadyInitialized,
}

/// Resolved, validated configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    endpoint_url: String,
    timeout_seconds: u64,
    log_path: PathBuf,
}

impl Config {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidEndpoint` if the URL does not parse and `InvalidTimeout`
    /// for a zero timeout.
    pub fn new(
        endpoint_url: impl Into<String>,
        timeout_seconds: u64,
        log_path: impl Into<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let endpoint_url = endpoint_url.into();
        reqwest::Url::parse(&endpoint_url).map_err(|e| ConfigError::InvalidEndpoint {
            url: endpoint_url.clone(),
            reason: e.to_string(),
        })?;

        if timeout_seconds == 0 {
            return Err(ConfigError::InvalidTimeout);
        }

        Ok(Self {
            endpoint_url,
            timeout_seconds,
            log_path: log_path.into(),
        })
    }

    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }
}

/// Partial configuration as read from a single source.
///
/// Every field is optional so sources can be layered with [`ConfigFile::merge`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigFile {
    pub endpoint_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub log_path: Option<PathBuf>,
}

impl ConfigFile {
    /// Parses a TOML document.
    pub fn from_toml(path: &Path, contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads the TOML file at `path`, returning an empty layer if it does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml(path, &contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Reads the `LEXTREK_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let timeout_seconds = match std::env::var(ENV_TIMEOUT_SECONDS) {
            Ok(value) => Some(value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                name: ENV_TIMEOUT_SECONDS,
                value,
            })?),
            Err(_) => None,
        };

        Ok(Self {
            endpoint_url: std::env::var(ENV_ENDPOINT_URL).ok(),
            timeout_seconds,
            log_path: std::env::var(ENV_LOG_PATH).ok().map(PathBuf::from),
        })
    }

    /// Overlays `other` on top of `self`; fields set in `other` win.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            endpoint_url: other.endpoint_url.or(self.endpoint_url),
            timeout_seconds: other.timeout_seconds.or(self.timeout_seconds),
            log_path: other.log_path.or(self.log_path),
        }
    }

    /// Applies defaults and validates.
    pub fn resolve(self) -> Result<Config, ConfigError> {
        let endpoint_url = self.endpoint_url.ok_or(ConfigError::MissingEndpoint)?;
        Config::new(
            endpoint_url,
            self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS),
            self.log_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_PATH)),
        )
    }
}

/// Gets the cross-platform config file path.
///
/// Returns `{config_dir}/lextrek/config.toml`, or `None` when the platform has
/// no config directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("lextrek").join("config.toml"))
}

/// Resolves configuration from file, environment and CLI overrides.
///
/// `config_path` overrides the default file location. A `.env` file in the
/// working directory is loaded first if present.
pub fn load(config_path: Option<&Path>, overrides: ConfigFile) -> Result<Config, ConfigError> {
    let _ = dotenvy::dotenv();

    let file_layer = match config_path
        .map(Path::to_path_buf)
        .or_else(default_config_path)
    {
        Some(path) => {
            tracing::debug!(path = %path.display(), "reading config file");
            ConfigFile::load(&path)?
        }
        None => ConfigFile::default(),
    };

    file_layer
        .merge(ConfigFile::from_env()?)
        .merge(overrides)
        .resolve()
}

/// Installs the process-wide configuration. May only be called once.
pub fn install(config: Config) -> Result<&'static Config, ConfigError> {
    CONFIG
        .set(config)
        .map_err(|_| ConfigError::AlreadyInitialized)?;
    CONFIG.get().ok_or(ConfigError::AlreadyInitialized)
}
