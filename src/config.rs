//! Configuration file
//!
//! JSON, loaded once at startup:
//!
//! ```json
//! {
//!   "schema_dir": "./schemas",
//!   "data_dir": "./data",
//!   "denylist": ["password"],
//!   "port": 54321
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};

use crate::cli::{CliError, CliResult};
use crate::filter::Denylist;

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory of entity schema files (required)
    pub schema_dir: PathBuf,

    /// Directory of `<entity>.json` document files (optional)
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Fields callers may never filter on (default: ["password"])
    #[serde(default = "default_denylist")]
    pub denylist: Vec<String>,

    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 54321)
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins; empty allows any
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// tracing filter directive when no env override is set (default: "info")
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_denylist() -> Vec<String> {
    vec!["password".to_string()]
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    54321
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Config {
    /// Create a config with defaults for everything but the schema directory
    pub fn new(schema_dir: impl Into<PathBuf>) -> Self {
        Self {
            schema_dir: schema_dir.into(),
            data_dir: None,
            denylist: default_denylist(),
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            log_filter: default_log_filter(),
        }
    }

    /// Load configuration from file.
    ///
    /// Relative directories are resolved against the config file's
    /// directory.
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let mut config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        if let Some(base) = path.parent() {
            config.schema_dir = base.join(&config.schema_dir);
            config.data_dir = config.data_dir.map(|dir| base.join(dir));
        }

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.schema_dir.as_os_str().is_empty() {
            return Err(CliError::config_error("schema_dir must not be empty"));
        }

        if self.denylist.iter().any(|f| f.trim().is_empty()) {
            return Err(CliError::config_error("denylist entries must not be empty"));
        }

        if self.port == 0 {
            return Err(CliError::config_error("port must be > 0"));
        }

        self.cors_allow_list()?;

        Ok(())
    }

    /// Replace the configured port, e.g. from `serve --port`
    pub fn override_port(&mut self, port: u16) -> CliResult<()> {
        self.port = port;
        self.validate()
    }

    /// CORS origins as header values; empty allows any
    pub fn cors_allow_list(&self) -> CliResult<Vec<HeaderValue>> {
        self.cors_origins
            .iter()
            .map(|origin| {
                origin.parse::<HeaderValue>().map_err(|_| {
                    CliError::config_error(format!("Invalid CORS origin '{}'", origin))
                })
            })
            .collect()
    }

    /// Denylist built from the configured field names
    pub fn denylist(&self) -> Denylist {
        Denylist::new(self.denylist.iter().cloned())
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
