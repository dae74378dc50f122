use thiserror::Error;

/// Result type for analyzer operations
pub type Result<T> = std::result::Result<T, AnalyzerError>;

/// Errors that can occur while setting up or running the analyzer.
///
/// Detectors themselves never fail; unmatched patterns yield empty results.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A configured keyword pattern does not compile
    #[error("Invalid pattern for {field}: {source}")]
    InvalidPattern {
        field: &'static str,
        #[source]
        source: regex::Error,
    },
}

impl AnalyzerError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create an invalid pattern error
    pub fn invalid_pattern(field: &'static str, source: regex::Error) -> Self {
        Self::InvalidPattern { field, source }
    }
}
