//! Service configuration
//!
//! One explicit configuration structure, built from defaults and
//! overridden by environment variables, passed by value to component
//! constructors. No module-level mutable state.

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors raised while reading the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
}

/// Process-wide service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// URL of the compressed registry bundle
    #[serde(default = "default_source_url")]
    pub source_url: String,

    /// Scratch directory for the downloaded bundle and extracted files
    #[serde(default = "default_scratch_dir")]
    pub scratch_dir: PathBuf,

    /// File name of the downloaded bundle inside the scratch directory
    #[serde(default = "default_archive_file")]
    pub archive_file: String,

    /// Remove scratch files after a successful run
    #[serde(default = "default_cleanup")]
    pub cleanup: bool,

    /// Name of the live collection served by the read API
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Host the read API binds to
    #[serde(default = "default_http_host")]
    pub http_host: String,

    /// Port the read API binds to
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

fn default_source_url() -> String {
    "https://registry.faa.gov/database/ReleasableAircraft.zip".to_string()
}

fn default_scratch_dir() -> PathBuf {
    PathBuf::from("./tmp")
}

fn default_archive_file() -> String {
    "ac_db.zip".to_string()
}

fn default_cleanup() -> bool {
    true
}

fn default_collection() -> String {
    "aircraft-registered".to_string()
}

fn default_http_host() -> String {
    "0.0.0.0".to_string()
}

fn default_http_port() -> u16 {
    5000
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            source_url: default_source_url(),
            scratch_dir: default_scratch_dir(),
            archive_file: default_archive_file(),
            cleanup: default_cleanup(),
            collection: default_collection(),
            http_host: default_http_host(),
            http_port: default_http_port(),
        }
    }
}

impl ServiceConfig {
    /// Build the configuration from defaults overridden by environment
    /// variables: `AEROREG_SOURCE_URL`, `AEROREG_SCRATCH_DIR`,
    /// `AEROREG_ARCHIVE_FILE`, `AEROREG_CLEANUP`, `AEROREG_COLLECTION`,
    /// `AEROREG_HTTP_HOST`, `AEROREG_HTTP_PORT`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(url) = env::var("AEROREG_SOURCE_URL") {
            config.source_url = url;
        }
        if let Ok(dir) = env::var("AEROREG_SCRATCH_DIR") {
            config.scratch_dir = PathBuf::from(dir);
        }
        if let Ok(file) = env::var("AEROREG_ARCHIVE_FILE") {
            config.archive_file = file;
        }
        if let Ok(flag) = env::var("AEROREG_CLEANUP") {
            config.cleanup = parse_bool("AEROREG_CLEANUP", &flag)?;
        }
        if let Ok(name) = env::var("AEROREG_COLLECTION") {
            config.collection = name;
        }
        if let Ok(host) = env::var("AEROREG_HTTP_HOST") {
            config.http_host = host;
        }
        if let Ok(port) = env::var("AEROREG_HTTP_PORT") {
            config.http_port = port.parse().map_err(|_| ConfigError::InvalidValue {
                var: "AEROREG_HTTP_PORT",
                value: port,
            })?;
        }

        Ok(config)
    }

    /// Full path of the downloaded bundle.
    pub fn archive_path(&self) -> PathBuf {
        self.scratch_dir.join(&self.archive_file)
    }

    /// Socket address string for the read API.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(ConfigError::InvalidValue {
            var,
            value: value.to_string(),
        })
    }
}
