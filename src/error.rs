use thiserror::Error;

/// Custom error types for deskhint
#[derive(Debug, Error)]
pub enum DeskhintError {
    #[error("Invalid config file: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
