use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    /// The broker refused or failed to issue an upload URL.
    #[error("{0}")]
    Credential(String),

    #[error("Upload to S3 failed with status: {0}")]
    TransferStatus(StatusCode),

    #[error("Upload request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },
}
