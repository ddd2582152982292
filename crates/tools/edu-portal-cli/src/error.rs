use edu_portal_client::ClientError;
use edu_portal_controllers::{AuthError, DashboardError};
use thiserror::Error;

/// Errors that can stop a command
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("No platform config directory; set `token_file` in the configuration")]
    NoConfigDir,

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Dashboard(#[from] DashboardError),

    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
