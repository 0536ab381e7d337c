
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemporalError {
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Domain error: {0}")]
    Domain(String),
    #[error("No conversion implemented for granularity {granularity} within {context}")]
    UnsupportedGranularity {
        granularity: &'static str,
        context: &'static str,
    },
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(&'static str),
}

pub type Result<T> = std::result::Result<T, TemporalError>;
