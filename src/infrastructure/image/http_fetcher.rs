//! HTTP implementation of the image fetcher port.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, StatusCode, Url};
use tracing::{debug, warn};

use crate::domain::errors::LazyImageError;
use crate::domain::ports::ImageFetcherPort;

/// Fetches image bytes with a single unconditional GET.
#[derive(Debug, Clone)]
pub struct HttpImageFetcher {
    client: Client,
}

impl HttpImageFetcher {
    /// Creates a fetcher with the client's default timeout behaviour.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_timeout(None)
    }

    /// Creates a fetcher with an optional request timeout.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Wraps an existing client.
    #[must_use]
    pub const fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ImageFetcherPort for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Result<Bytes, LazyImageError> {
        if url.is_empty() {
            return Err(LazyImageError::CallFailed);
        }
        let url = Url::parse(url).map_err(|e| {
            warn!(url = %url, error = %e, "Invalid image URL");
            LazyImageError::CallFailed
        })?;

        debug!(url = %url, "Downloading image");

        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "Image request failed");
            LazyImageError::NoDataAvailable
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(url = %url, status = status.as_u16(), "Unexpected image response status");
            return Err(LazyImageError::CallFailed);
        }

        let bytes = response.bytes().await.map_err(|e| {
            warn!(url = %url, error = %e, "Failed to read image body");
            LazyImageError::NoDataAvailable
        })?;

        if bytes.is_empty() {
            warn!(url = %url, "No image data available");
            return Err(LazyImageError::NoDataAvailable);
        }

        debug!(url = %url, size = bytes.len(), "Downloaded image");
        Ok(bytes)
    }
}
