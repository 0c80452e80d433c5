use thiserror::Error;

/// Closed failure taxonomy for the whole request pipeline.
///
/// Every operation resolves to exactly one of these; no stage retries or
/// swallows a failure on the caller's behalf.
#[derive(Error, Debug)]
pub enum DamError {
    #[error("request signing failed: {0}")]
    Signing(String),

    #[error("authentication failed with status {status}")]
    Authentication { status: u16 },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("network error: {0}")]
    Network(String),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("failed to decode response element {index}: {message}")]
    DecodeAt { index: usize, message: String },

    #[error("upload failed: {0}")]
    Upload(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("upload interrupted: {0}")]
    Interrupted(String),

    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("configuration error: {0}")]
    Config(#[from] crate::core::config::ConfigError),
}
