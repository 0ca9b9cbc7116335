//! Credential brokers hand out short-lived signed URLs for a single PUT.

mod http;
mod s3;

pub use http::HttpBroker;
pub use s3::S3Broker;

use crate::error::UploadError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Message used when a broker fails without saying why.
pub const DEFAULT_BROKER_ERROR: &str = "Failed to get upload URL";

/// Broker answer, in the same shape the broker endpoint speaks on the wire:
/// `{"success": true, "url": "..."}` or `{"success": false, "error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresignResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PresignResponse {
    pub fn issued(url: impl Into<String>) -> Self {
        Self {
            success: true,
            url: Some(url.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            url: None,
            error: Some(error.into()),
        }
    }

    /// Collapses the response into the signed URL or a credential error.
    ///
    /// A response that claims success but carries no URL is a failure too.
    pub fn into_url(self) -> Result<String, UploadError> {
        match self {
            Self {
                success: true,
                url: Some(url),
                ..
            } => Ok(url),
            Self { error, .. } => Err(UploadError::Credential(
                error.unwrap_or_else(|| DEFAULT_BROKER_ERROR.to_string()),
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresignRequest {
    pub file_name: String,
    pub content_type: String,
}

#[async_trait]
pub trait CredentialBroker: Send + Sync {
    async fn presign_upload(&self, file_name: &str, content_type: &str) -> PresignResponse;
}
