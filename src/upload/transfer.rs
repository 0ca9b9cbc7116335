use super::types::{FileSource, StagedFile};
use crate::error::UploadError;
use async_trait::async_trait;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::Body;
use tokio_util::io::ReaderStream;
use tracing::debug;

/// Moves the file body to the signed URL.
#[async_trait]
pub trait Transfer: Send + Sync {
    async fn put(&self, url: &str, file: &StagedFile) -> Result<(), UploadError>;
}

#[derive(Clone, Default)]
pub struct HttpTransfer {
    client: reqwest::Client,
}

impl HttpTransfer {
    /// Files on disk are streamed; nothing beyond a read buffer is held in
    /// memory.
    async fn body(file: &StagedFile) -> Result<Body, UploadError> {
        match &file.source {
            FileSource::Memory(bytes) => Ok(Body::from(bytes.clone())),
            FileSource::Disk(path) => {
                let handle = tokio::fs::File::open(path).await?;
                Ok(Body::wrap_stream(ReaderStream::new(handle)))
            }
        }
    }
}

#[async_trait]
impl Transfer for HttpTransfer {
    async fn put(&self, url: &str, file: &StagedFile) -> Result<(), UploadError> {
        debug!("PUT {} bytes of '{}'", file.size, file.name);

        let response = self
            .client
            .put(url)
            .header(CONTENT_TYPE, &file.content_type)
            .header(CONTENT_LENGTH, file.size)
            .body(Self::body(file).await?)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UploadError::TransferStatus(status));
        }
        Ok(())
    }
}
