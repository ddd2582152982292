//! Terminal client configuration
//!
//! Sources, lowest precedence first:
//! - built-in defaults
//! - a TOML file (`--config`, `EDU_PORTAL_CONFIG_FILE`, or
//!   `<config dir>/edu-portal/config.toml`)
//! - environment variables with the `EDU_PORTAL` prefix and `__` separator,
//!   e.g. `EDU_PORTAL__SERVER_URL` or `EDU_PORTAL__RETRY__MAX_ATTEMPTS`

use crate::error::CliError;
use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use edu_portal_client::{ClientConfig, RetryConfig};
use edu_portal_controllers::Locale;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

pub const ENV_PREFIX: &str = "EDU_PORTAL";
pub const CONFIG_FILE_ENV: &str = "EDU_PORTAL_CONFIG_FILE";
const APP_DIR: &str = "edu-portal";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Base URL of the portal API
    #[serde(default = "default_server_url")]
    pub server_url: String,

    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    pub retry: RetryConfig,

    pub locale: Locale,

    /// Where the session token is kept (default: `<config dir>/edu-portal/session.json`)
    pub token_file: Option<PathBuf>,
}

fn default_server_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_request_timeout_ms() -> u64 {
    30_000
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            request_timeout_ms: default_request_timeout_ms(),
            retry: RetryConfig::default(),
            locale: Locale::default(),
            token_file: None,
        }
    }
}

impl CliConfig {
    /// Load from the resolved config file and the process environment.
    pub fn load(explicit: Option<&Path>) -> Result<Self, CliError> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_FILE_ENV).map(PathBuf::from))
            .or_else(|| dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml")));

        Self::from_sources(path.as_deref(), Environment::with_prefix(ENV_PREFIX))
    }

    pub(crate) fn from_sources(file: Option<&Path>, env: Environment) -> Result<Self, CliError> {
        let mut builder = ConfigBuilder::builder();

        match file {
            Some(path) if path.exists() => {
                info!(path = %path.display(), "Loading configuration");
                builder = builder.add_source(File::from(path).format(FileFormat::Toml));
            }
            Some(path) => debug!(path = %path.display(), "No config file, using defaults"),
            None => debug!("No config location, using defaults"),
        }

        builder = builder.add_source(env.separator("__").try_parsing(true));

        let config: Self = builder.build()?.try_deserialize()?;
        config.client_config().validate()?;
        Ok(config)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::builder()
            .base_url(self.server_url.clone())
            .request_timeout(Duration::from_millis(self.request_timeout_ms))
            .retry(self.retry.clone())
            .build()
    }

    pub fn token_path(&self) -> Result<PathBuf, CliError> {
        match &self.token_file {
            Some(path) => Ok(path.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR).join("session.json"))
                .ok_or(CliError::NoConfigDir),
        }
    }
}
