//! Port definition for downloading image bytes.

use bytes::Bytes;

use crate::domain::errors::LazyImageError;

/// Port for fetching raw image bytes over the network.
/// Implementations issue exactly one request per call and never retry.
#[async_trait::async_trait]
pub trait ImageFetcherPort: Send + Sync {
    /// Downloads the body at `url`.
    ///
    /// # Errors
    /// `CallFailed` for an unusable URL or a non-200 status,
    /// `NoDataAvailable` when no body could be obtained.
    async fn fetch(&self, url: &str) -> Result<Bytes, LazyImageError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use parking_lot::Mutex;

    /// Scripted fetcher that counts calls.
    pub struct MockImageFetcher {
        responses: Mutex<HashMap<String, Result<Bytes, LazyImageError>>>,
        calls: AtomicUsize,
        delay: Option<Duration>,
    }

    impl MockImageFetcher {
        /// Creates a fetcher where every URL fails with `CallFailed`.
        pub fn new() -> Self {
            Self {
                responses: Mutex::new(HashMap::new()),
                calls: AtomicUsize::new(0),
                delay: None,
            }
        }

        /// Delays every response.
        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        /// Scripts the response for a URL.
        pub fn respond(&self, url: &str, response: Result<Bytes, LazyImageError>) {
            self.responses.lock().insert(url.to_string(), response);
        }

        /// Number of fetches issued so far.
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Default for MockImageFetcher {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait::async_trait]
    impl ImageFetcherPort for MockImageFetcher {
        async fn fetch(&self, url: &str) -> Result<Bytes, LazyImageError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.responses
                .lock()
                .get(url)
                .cloned()
                .unwrap_or(Err(LazyImageError::CallFailed))
        }
    }
}
