use thiserror::Error;

/// Errors from the shared core layer.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("invalid configuration: {0}")]
    Configuration(#[from] config::ConfigError),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
