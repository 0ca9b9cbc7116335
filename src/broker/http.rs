use super::{CredentialBroker, PresignRequest, PresignResponse, DEFAULT_BROKER_ERROR};
use async_trait::async_trait;
use tracing::error;

/// Asks a remote broker endpoint for upload URLs.
#[derive(Clone)]
pub struct HttpBroker {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpBroker {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    async fn request(&self, payload: &PresignRequest) -> Result<PresignResponse, reqwest::Error> {
        self.client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await?
            .error_for_status()?
            .json::<PresignResponse>()
            .await
    }
}

#[async_trait]
impl CredentialBroker for HttpBroker {
    async fn presign_upload(&self, file_name: &str, content_type: &str) -> PresignResponse {
        let payload = PresignRequest {
            file_name: file_name.to_string(),
            content_type: content_type.to_string(),
        };

        match self.request(&payload).await {
            Ok(response) => response,
            Err(e) => {
                error!("Broker request to {} failed: {}", self.endpoint, e);
                PresignResponse::failed(DEFAULT_BROKER_ERROR)
            }
        }
    }
}
