/// CLI error types
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Audio output error: {0}")]
    Audio(String),

    #[error("Catalog error: {0}")]
    Catalog(#[from] cadence_client::ClientError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
