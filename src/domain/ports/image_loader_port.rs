//! Port definition for the image loader.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use tokio::sync::oneshot;

use crate::domain::entities::{ImageSource, LoadRequest};
use crate::domain::errors::LazyImageError;

use super::ImageView;

/// Sending half of a [`LoadHandle`].
pub type LoadCompleter<T> = oneshot::Sender<Result<T, LazyImageError>>;

/// Resolves exactly once with the outcome of a load.
///
/// Dropping the handle does not stop the load.
#[derive(Debug)]
pub struct LoadHandle<T> {
    rx: oneshot::Receiver<Result<T, LazyImageError>>,
}

impl<T> LoadHandle<T> {
    /// Creates a pending handle and the completer that resolves it.
    #[must_use]
    pub fn channel() -> (LoadCompleter<T>, Self) {
        let (tx, rx) = oneshot::channel();
        (tx, Self { rx })
    }

    /// Creates an already resolved handle.
    #[must_use]
    pub fn ready(result: Result<T, LazyImageError>) -> Self {
        let (tx, handle) = Self::channel();
        let _ = tx.send(result);
        handle
    }
}

impl<T> Future for LoadHandle<T> {
    type Output = Result<T, LazyImageError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        // A completer dropped without sending means the task died mid-load.
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|result| result.unwrap_or(Err(LazyImageError::NoDataAvailable)))
    }
}

/// Port for loading remote images into views.
pub trait ImageLoaderPort: Send + Sync {
    /// Starts showing `request`'s URL in `view` and returns immediately.
    fn display(&self, view: Arc<dyn ImageView>, request: LoadRequest) -> LoadHandle<ImageSource>;

    /// Downloads `url` into the cache without touching any view.
    ///
    /// Resolves with the stored path, or `None` if the download could not be stored.
    fn prefetch(&self, url: &str) -> LoadHandle<Option<PathBuf>>;

    /// Cancels in-flight network fetches. Returns false if none were possible.
    fn cancel(&self) -> bool;
}
