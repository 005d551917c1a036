use crate::config::FormatEndpoints;
use crate::error::ConsoleError;
use crate::upload::types::{UploadItem, UploadTarget};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use tracing::{debug, info};

/// Remote operations on the format referential.
#[async_trait]
pub trait ReferentialService: Send + Sync {
    /// Sends the item to the endpoint named by its target.
    async fn send(&self, item: &UploadItem) -> Result<(), ConsoleError>;

    /// Removes the active referential. Blocks the calling thread.
    fn delete(&self) -> Result<(), ConsoleError>;
}

pub struct HttpReferentialService {
    client: reqwest::Client,
    blocking: reqwest::blocking::Client,
    endpoints: FormatEndpoints,
}

impl HttpReferentialService {
    /// Must be called outside an async context: the blocking client owns its own runtime.
    pub fn new(endpoints: FormatEndpoints) -> Result<Self, ConsoleError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers.clone())
            .build()?;
        let blocking = reqwest::blocking::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            blocking,
            endpoints,
        })
    }

    fn url_for(&self, target: UploadTarget) -> &url::Url {
        match target {
            UploadTarget::Check => &self.endpoints.check,
            UploadTarget::Commit => &self.endpoints.upload,
        }
    }
}

#[async_trait]
impl ReferentialService for HttpReferentialService {
    async fn send(&self, item: &UploadItem) -> Result<(), ConsoleError> {
        let url = self.url_for(item.target);
        debug!(file = %item.file_name, bytes = item.size(), %url, "POST");

        let response = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(item.content.clone())
            .send()
            .await?;

        let status = response.status();
        info!(%url, status = status.as_u16(), "format upload answered");
        if !status.is_success() {
            return Err(ConsoleError::TransportFailure(format!(
                "status {}",
                status.as_u16()
            )));
        }
        Ok(())
    }

    fn delete(&self) -> Result<(), ConsoleError> {
        let url = &self.endpoints.delete;
        debug!(%url, "DELETE");

        let response = self.blocking.delete(url.clone()).send()?;

        let status = response.status();
        info!(%url, status = status.as_u16(), "format delete answered");
        if !status.is_success() {
            return Err(ConsoleError::TransportFailure(format!(
                "status {}",
                status.as_u16()
            )));
        }
        Ok(())
    }
}
