//! Image view that loads its URL on first layout.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::domain::entities::{ImageSize, ImageStatus, LoadRequest};
use crate::domain::errors::LazyImageError;
use crate::domain::ports::{ImageLoaderPort, ImageView};

use super::image_state::ImageViewState;

/// Sent to the delegate when a load fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageErrorEvent {
    /// The URL that failed.
    pub url: String,
    /// Why it failed.
    pub error: LazyImageError,
}

/// A view bound to a URL, loaded once it has a non-zero frame.
pub struct LazyImageView {
    state: Arc<ImageViewState>,
    loader: Arc<dyn ImageLoaderPort>,
    image_url: Option<String>,
    force_download: bool,
    loaded: bool,
    delegate: Option<mpsc::UnboundedSender<ImageErrorEvent>>,
}

impl LazyImageView {
    /// Creates an unbound view.
    #[must_use]
    pub fn new(loader: Arc<dyn ImageLoaderPort>) -> Self {
        Self {
            state: Arc::new(ImageViewState::new()),
            loader,
            image_url: None,
            force_download: false,
            loaded: false,
            delegate: None,
        }
    }

    /// Sets the channel that receives load failures.
    #[must_use]
    pub fn with_delegate(mut self, delegate: mpsc::UnboundedSender<ImageErrorEvent>) -> Self {
        self.delegate = Some(delegate);
        self
    }

    /// Rendered state.
    #[must_use]
    pub fn state(&self) -> &Arc<ImageViewState> {
        &self.state
    }

    /// Bound URL.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    /// Binds a new URL. It is loaded on the next layout.
    pub fn set_image_url(&mut self, url: Option<String>) {
        self.image_url = url;
        self.loaded = false;
    }

    /// Always download instead of reading the cache.
    pub const fn set_force_download(&mut self, force: bool) {
        self.force_download = force;
    }

    /// Lays the view out at `frame`, starting the load if one is due.
    ///
    /// Returns the task that reports the outcome, if a load was started.
    pub fn layout(&mut self, frame: ImageSize) -> Option<JoinHandle<()>> {
        self.state.set_bounds(frame);
        if frame.is_zero() || self.loaded {
            return None;
        }
        self.loaded = true;

        let url = self.image_url.clone()?;
        self.state.set_image(None);
        self.state.set_status(ImageStatus::Downloading);

        let mut request = LoadRequest::new(url.clone()).with_spinner().with_size(frame);
        if self.force_download {
            request = request.force_download();
        }
        debug!(url = %url, frame = %frame, "Loading bound image");

        let handle = self.loader.display(self.state.clone(), request);
        let state = self.state.clone();
        let delegate = self.delegate.clone();
        Some(tokio::spawn(async move {
            if let Err(error) = handle.await {
                state.set_status(ImageStatus::Failed(error.to_string()));
                if let Some(delegate) = delegate {
                    let _ = delegate.send(ImageErrorEvent { url, error });
                }
            }
        }))
    }
}

impl std::fmt::Debug for LazyImageView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyImageView")
            .field("image_url", &self.image_url)
            .field("force_download", &self.force_download)
            .field("loaded", &self.loaded)
            .finish_non_exhaustive()
    }
}
