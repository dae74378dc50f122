use thiserror::Error;

/// Result type for validator operations
pub type Result<T> = std::result::Result<T, ValidatorError>;

/// Errors raised while configuring the validator.
///
/// Checks never fail; divergence is reported as findings.
#[derive(Error, Debug)]
pub enum ValidatorError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ValidatorError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
