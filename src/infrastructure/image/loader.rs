//! Async image loading orchestrator.
//!
//! Serves a display request from the disk cache when possible and falls back
//! to a single network fetch, persisting what it downloads.

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use image::{DynamicImage, ImageFormat};
use parking_lot::{Mutex, RwLock};
use tokio::sync::watch;
use tracing::{debug, error, info, trace, warn};

use crate::domain::entities::{ImageSize, ImageSource, LoadRequest};
use crate::domain::errors::{LazyImageError, StoreError};
use crate::domain::ports::{ImageFetcherPort, ImageLoaderPort, ImageView, LoadHandle};

use super::disk_cache::{DiskImageStore, default_cache_dir};
use super::http_fetcher::HttpImageFetcher;
use super::resize::{needs_resize, resize};

/// Bounds given to a view that reports no size when a cached image arrives.
pub const FALLBACK_VIEW_SIZE: ImageSize = ImageSize::new(40, 40);

/// Configuration for the image loader.
#[derive(Debug, Clone, Default)]
pub struct LazyImageConfig {
    /// Cache directory. Defaults to `<temp dir>/lazyimage`.
    pub cache_dir: Option<PathBuf>,
    /// Size images are resized to before being cached.
    pub cache_size: Option<ImageSize>,
    /// Request timeout in seconds. `None` keeps the HTTP client default.
    pub timeout_secs: Option<u64>,
}

/// Errors raised while building a loader.
#[derive(Debug, thiserror::Error)]
pub enum LoaderInitError {
    /// The cache directory could not be prepared.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The HTTP client could not be built.
    #[error("failed to create HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Loads remote images into views through a flat disk cache.
///
/// Cloning is cheap and clones share the cache size and network session.
#[derive(Clone)]
pub struct LazyImage {
    inner: Arc<Inner>,
}

struct Inner {
    store: DiskImageStore,
    fetcher: Arc<dyn ImageFetcherPort>,
    cache_size: RwLock<Option<ImageSize>>,
    session: Mutex<Option<watch::Sender<bool>>>,
}

impl std::fmt::Debug for LazyImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyImage")
            .field("cache_dir", &self.inner.store.cache_dir())
            .field("cache_size", &self.cache_size())
            .finish_non_exhaustive()
    }
}

impl LazyImage {
    /// Creates a loader from its parts.
    #[must_use]
    pub fn new(fetcher: Arc<dyn ImageFetcherPort>, store: DiskImageStore) -> Self {
        Self {
            inner: Arc::new(Inner {
                store,
                fetcher,
                cache_size: RwLock::new(None),
                session: Mutex::new(None),
            }),
        }
    }

    /// Creates a loader with an HTTP fetcher and a disk store built from `config`.
    ///
    /// # Errors
    /// Returns error if the cache directory or HTTP client cannot be created.
    pub async fn from_config(config: &LazyImageConfig) -> Result<Self, LoaderInitError> {
        let cache_dir = config.cache_dir.clone().unwrap_or_else(default_cache_dir);
        let store = DiskImageStore::new(cache_dir).await?;
        let fetcher = HttpImageFetcher::with_timeout(config.timeout_secs.map(Duration::from_secs))?;

        let loader = Self::new(Arc::new(fetcher), store);
        loader.set_cache_size(config.cache_size);
        Ok(loader)
    }

    /// Creates a loader with default configuration.
    ///
    /// # Errors
    /// Returns error if the cache directory or HTTP client cannot be created.
    pub async fn with_defaults() -> Result<Self, LoaderInitError> {
        Self::from_config(&LazyImageConfig::default()).await
    }

    /// Returns the underlying disk store.
    #[must_use]
    pub fn store(&self) -> &DiskImageStore {
        &self.inner.store
    }

    /// Sets the size images are stored at. `None` stores them as downloaded.
    ///
    /// Changing it also changes which cache slot each URL maps to.
    pub fn set_cache_size(&self, size: Option<ImageSize>) {
        *self.inner.cache_size.write() = size;
    }

    /// Returns the configured cache size.
    #[must_use]
    pub fn cache_size(&self) -> Option<ImageSize> {
        *self.inner.cache_size.read()
    }

    /// Returns the cache slot for a URL under the current cache size.
    #[must_use]
    pub fn cache_path(&self, url: &str) -> PathBuf {
        self.inner.slot(url)
    }

    /// Shows the image at the request's URL in `view`.
    ///
    /// The placeholder is assigned before this returns; everything else runs on
    /// a spawned task. Must be called from within a Tokio runtime.
    pub fn display(&self, view: Arc<dyn ImageView>, request: LoadRequest) -> LoadHandle<ImageSource> {
        if let Some(name) = request.placeholder() {
            view.show_placeholder(name);
        }

        let Some(url) = request.url().map(str::to_owned) else {
            debug!("No image URL supplied");
            return LoadHandle::ready(Err(LazyImageError::CallFailed));
        };

        let (tx, handle) = LoadHandle::channel();
        let inner = self.inner.clone();
        tokio::spawn(async move {
            let result = inner.display(view.as_ref(), &url, &request).await;
            match &result {
                Ok(source) => debug!(url = %url, source = %source, "Image displayed"),
                Err(e) => debug!(url = %url, error = %e, "Image not displayed"),
            }
            let _ = tx.send(result);
        });
        handle
    }

    /// Downloads and decodes an image without touching the cache.
    ///
    /// # Errors
    /// Returns the fetch error, or `CorruptedData` if the body is not an image.
    pub async fn fetch_image(&self, url: &str) -> Result<DynamicImage, LazyImageError> {
        self.inner.fetch_image(url).await
    }

    /// Downloads `url` into its cache slot in the background.
    ///
    /// Resolves with the slot path, or `None` if the image was downloaded but
    /// could not be stored. Must be called from within a Tokio runtime.
    pub fn prefetch(&self, url: &str) -> LoadHandle<Option<PathBuf>> {
        if url.is_empty() {
            return LoadHandle::ready(Err(LazyImageError::CallFailed));
        }

        let (tx, handle) = LoadHandle::channel();
        let inner = self.inner.clone();
        let url = url.to_string();
        tokio::spawn(async move {
            let result = match inner.fetch_image(&url).await {
                Ok(image) => Ok(inner.persist(&url, Arc::new(image)).await),
                Err(e) => {
                    debug!(url = %url, error = %e, "Prefetch failed");
                    Err(e)
                }
            };
            let _ = tx.send(result);
        });
        handle
    }

    /// Removes the cache slots of the given URLs. Calling it again is a no-op.
    pub async fn clear_cache_for_urls<S: AsRef<str>>(&self, urls: &[S]) {
        for url in urls {
            let path = self.inner.slot(url.as_ref());
            self.inner.store.remove(&path).await;
        }
    }

    /// Removes every cached image.
    pub async fn clear_all(&self) {
        if let Err(e) = self.inner.store.clear().await {
            warn!(error = %e, "Failed to clear disk cache");
            return;
        }
        info!("Cleared image cache");
    }

    /// Cancels in-flight network fetches.
    ///
    /// Cached reads already in progress are not interrupted. Returns false if
    /// no network session was open.
    pub fn cancel(&self) -> bool {
        let Some(session) = self.inner.session.lock().take() else {
            return false;
        };
        session.send_replace(true);
        debug!("Cancelled image session");
        true
    }
}

impl ImageLoaderPort for LazyImage {
    fn display(&self, view: Arc<dyn ImageView>, request: LoadRequest) -> LoadHandle<ImageSource> {
        Self::display(self, view, request)
    }

    fn prefetch(&self, url: &str) -> LoadHandle<Option<PathBuf>> {
        Self::prefetch(self, url)
    }

    fn cancel(&self) -> bool {
        Self::cancel(self)
    }
}

impl Inner {
    fn slot(&self, url: &str) -> PathBuf {
        self.store.path_for(url, *self.cache_size.read())
    }

    async fn display(
        &self,
        view: &dyn ImageView,
        url: &str,
        request: &LoadRequest,
    ) -> Result<ImageSource, LazyImageError> {
        let target = request.target_size();

        if request.is_forced() {
            debug!(url = %url, "Forced download, skipping cache");
        } else {
            let path = self.slot(url);
            if self.store.exists(&path).await {
                if view.bounds().is_zero() {
                    view.set_bounds(FALLBACK_VIEW_SIZE);
                }
                if let Some(image) = self.read_cached(&path, target).await {
                    view.set_image(Some(Arc::new(image)));
                    return Ok(ImageSource::DiskCache);
                }
            }
        }

        if request.show_spinner() {
            view.start_spinner();
        }
        let fetched = self.fetch_image(url).await;
        if request.show_spinner() {
            view.stop_spinner();
        }

        let image = Arc::new(fetched?);
        self.persist(url, image.clone()).await;

        let shown = match target {
            Some(target) if needs_resize(&image, target) => {
                let resized = run_blocking(move || resize(&image, target))
                    .await
                    .ok_or(LazyImageError::CorruptedData)?;
                Arc::new(resized)
            }
            _ => image,
        };
        view.set_image(Some(shown));
        Ok(ImageSource::Network)
    }

    /// Reads and decodes a cached slot. Corrupted files yield `None`.
    async fn read_cached(&self, path: &Path, target: Option<ImageSize>) -> Option<DynamicImage> {
        let bytes = self.store.get_bytes(path).await?;
        let display_path = path.display().to_string();

        let decoded = run_blocking(move || {
            let image = image::load_from_memory(&bytes)?;
            Ok::<_, image::ImageError>(match target {
                Some(target) if needs_resize(&image, target) => resize(&image, target),
                _ => image,
            })
        })
        .await?;

        match decoded {
            Ok(image) => {
                trace!(path = %display_path, "Decoded image from disk cache");
                Some(image)
            }
            Err(e) => {
                warn!(path = %display_path, error = %e, "Cached image is corrupted, downloading again");
                None
            }
        }
    }

    async fn fetch_image(&self, url: &str) -> Result<DynamicImage, LazyImageError> {
        let bytes = self.fetch_bytes(url).await?;

        run_blocking(move || image::load_from_memory(&bytes))
            .await
            .ok_or(LazyImageError::CorruptedData)?
            .map_err(|e| {
                warn!(url = %url, error = %e, "Downloaded data is not an image");
                LazyImageError::CorruptedData
            })
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Bytes, LazyImageError> {
        let session = self.session();

        tokio::select! {
            result = self.fetcher.fetch(url) => result,
            () = cancelled(session) => {
                debug!(url = %url, "Image fetch cancelled");
                Err(LazyImageError::NoDataAvailable)
            }
        }
    }

    fn session(&self) -> watch::Receiver<bool> {
        self.session
            .lock()
            .get_or_insert_with(|| watch::channel(false).0)
            .subscribe()
    }

    /// Writes the image to its slot, resized to the cache size first.
    ///
    /// Failures are logged and yield `None`.
    async fn persist(&self, url: &str, image: Arc<DynamicImage>) -> Option<PathBuf> {
        let cache_size = *self.cache_size.read();
        let path = self.store.path_for(url, cache_size);

        let encoded = run_blocking(move || encode_for_cache(&image, cache_size))
            .await
            .unwrap_or_else(|| Err(StoreError::Encode("encode task failed".to_string())));

        let stored = match encoded {
            Ok(bytes) => self.store.put_bytes(&path, &bytes).await,
            Err(e) => Err(e),
        };
        match stored {
            Ok(()) => Some(path),
            Err(e) => {
                warn!(url = %url, error = %e, "Image not saved");
                None
            }
        }
    }
}

/// Re-encodes an image as PNG, resized to `cache_size` when it differs.
fn encode_for_cache(image: &DynamicImage, cache_size: Option<ImageSize>) -> Result<Vec<u8>, StoreError> {
    let resized;
    let image = match cache_size {
        Some(size) if needs_resize(image, size) => {
            resized = resize(image, size);
            &resized
        }
        _ => image,
    };

    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(|e| StoreError::Encode(e.to_string()))?;
    Ok(buffer.into_inner())
}

/// Completes once the session is cancelled.
async fn cancelled(mut session: watch::Receiver<bool>) {
    let cancelled = session.wait_for(|cancelled| *cancelled).await.is_ok();
    if !cancelled {
        std::future::pending::<()>().await;
    }
}

/// Runs CPU-bound image work on the blocking pool. `None` if the task panicked.
async fn run_blocking<T, F>(work: F) -> Option<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(work).await {
        Ok(value) => Some(value),
        Err(e) => {
            error!(error = %e, "Image task panicked");
            None
        }
    }
}
