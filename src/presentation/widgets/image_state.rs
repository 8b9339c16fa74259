//! Headless image view state.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::domain::entities::{ImageSize, ImageStatus, ViewEffect};
use crate::domain::ports::ImageView;

#[derive(Default)]
struct ViewInner {
    image: Option<Arc<image::DynamicImage>>,
    placeholder: Option<String>,
    bounds: ImageSize,
    spinning: bool,
    spinner_runs: usize,
    effects: Vec<ViewEffect>,
    status: ImageStatus,
}

/// Thread-safe view that records what a host widget would render.
#[derive(Default)]
pub struct ImageViewState {
    inner: Mutex<ViewInner>,
}

impl ImageViewState {
    /// Creates an empty zero-sized view.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty view with the given bounds.
    #[must_use]
    pub fn with_bounds(bounds: ImageSize) -> Self {
        let state = Self::new();
        state.inner.lock().bounds = bounds;
        state
    }

    /// Name of the placeholder last shown.
    #[must_use]
    pub fn placeholder(&self) -> Option<String> {
        self.inner.lock().placeholder.clone()
    }

    /// Whether the spinner is currently running.
    #[must_use]
    pub fn is_spinning(&self) -> bool {
        self.inner.lock().spinning
    }

    /// How many times the spinner was started.
    #[must_use]
    pub fn spinner_runs(&self) -> usize {
        self.inner.lock().spinner_runs
    }

    /// Effects attached so far.
    #[must_use]
    pub fn effects(&self) -> Vec<ViewEffect> {
        self.inner.lock().effects.clone()
    }

    /// Current load status.
    #[must_use]
    pub fn status(&self) -> ImageStatus {
        self.inner.lock().status.clone()
    }

    /// Sets the load status.
    pub fn set_status(&self, status: ImageStatus) {
        self.inner.lock().status = status;
    }
}

impl std::fmt::Debug for ImageViewState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("ImageViewState")
            .field("bounds", &inner.bounds)
            .field("has_image", &inner.image.is_some())
            .field("placeholder", &inner.placeholder)
            .field("status", &inner.status)
            .finish_non_exhaustive()
    }
}

impl ImageView for ImageViewState {
    fn bounds(&self) -> ImageSize {
        self.inner.lock().bounds
    }

    fn set_bounds(&self, size: ImageSize) {
        self.inner.lock().bounds = size;
    }

    fn image(&self) -> Option<Arc<image::DynamicImage>> {
        self.inner.lock().image.clone()
    }

    fn set_image(&self, image: Option<Arc<image::DynamicImage>>) {
        let mut inner = self.inner.lock();
        if image.is_some() {
            inner.status = ImageStatus::Ready;
        }
        inner.image = image;
    }

    fn show_placeholder(&self, name: &str) {
        self.inner.lock().placeholder = Some(name.to_string());
    }

    fn start_spinner(&self) {
        let mut inner = self.inner.lock();
        inner.spinning = true;
        inner.spinner_runs += 1;
    }

    fn stop_spinner(&self) {
        self.inner.lock().spinning = false;
    }

    fn attach_effect(&self, effect: ViewEffect) {
        self.inner.lock().effects.push(effect);
    }
}
