use super::{CredentialBroker, PresignResponse};
use crate::config::S3Config;
use async_trait::async_trait;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::error::{DisplayErrorContext, SdkError};
use aws_sdk_s3::operation::put_object::PutObjectError;
use aws_sdk_s3::presigning::{PresigningConfig, PresigningConfigError};
use aws_sdk_s3::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info};

const PRESIGN_FAILED: &str = "Failed to generate upload URL";

#[derive(Debug, Error)]
enum PresignError {
    #[error("invalid presigning config: {0}")]
    Config(#[from] PresigningConfigError),
    #[error("presigning PutObject failed: {}", DisplayErrorContext(.0))]
    Sdk(#[from] SdkError<PutObjectError>),
}

/// Presigns `PutObject` requests against a single bucket. Objects are keyed by
/// the uploaded file's name.
pub struct S3Broker {
    client: Client,
    bucket: String,
    expires_in: Duration,
}

impl S3Broker {
    pub fn new(client: Client, bucket: String, expires_in: Duration) -> Self {
        Self {
            client,
            bucket,
            expires_in,
        }
    }

    pub async fn from_config(config: &S3Config, expires_in: Duration) -> Self {
        info!(
            "S3 broker: bucket '{}' in {}{}",
            config.bucket,
            config.region,
            config
                .endpoint_url
                .as_deref()
                .map(|e| format!(" via {}", e))
                .unwrap_or_default()
        );

        let mut loader = aws_config::from_env()
            .region(Region::new(config.region.clone()))
            .credentials_provider(Credentials::new(
                config.access_key_id.clone(),
                config.secret_access_key.clone(),
                None,
                None,
                "static",
            ));
        if let Some(endpoint) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }
        let aws_config = loader.load().await;

        let s3_config = aws_sdk_s3::config::Builder::from(&aws_config)
            .force_path_style(config.endpoint_url.is_some())
            .build();

        Self::new(
            Client::from_conf(s3_config),
            config.bucket.clone(),
            expires_in,
        )
    }

    async fn sign(&self, file_name: &str, content_type: &str) -> Result<String, PresignError> {
        let presigning = PresigningConfig::expires_in(self.expires_in)?;
        let request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(file_name)
            .content_type(content_type)
            .presigned(presigning)
            .await?;
        Ok(request.uri().to_string())
    }
}

#[async_trait]
impl CredentialBroker for S3Broker {
    async fn presign_upload(&self, file_name: &str, content_type: &str) -> PresignResponse {
        match self.sign(file_name, content_type).await {
            Ok(url) => {
                debug!("Issued upload URL for '{}' ({})", file_name, content_type);
                PresignResponse::issued(url)
            }
            Err(e) => {
                error!("Error generating presigned URL: {}", e);
                PresignResponse::failed(PRESIGN_FAILED)
            }
        }
    }
}
