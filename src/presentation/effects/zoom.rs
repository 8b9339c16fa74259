//! Full-screen zoom overlay.

use std::sync::Arc;

use tracing::debug;

use crate::domain::entities::{ImageSize, Rect};
use crate::domain::ports::ImageView;

/// An image currently shown full screen.
#[derive(Debug, Clone)]
pub struct ZoomedImage {
    /// The image being shown.
    pub image: Arc<image::DynamicImage>,
    /// Frame of the source view, where the overlay animates from and back to.
    pub origin: Rect,
    /// Full-width, vertically centred frame of the zoomed image.
    pub frame: Rect,
}

/// Owns at most one zoom overlay at a time.
#[derive(Debug, Default)]
pub struct ZoomOverlay {
    current: Option<ZoomedImage>,
}

impl ZoomOverlay {
    /// Creates an overlay controller with nothing zoomed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Zooms `view`'s image to fill the screen width.
    ///
    /// Does nothing if an image is already zoomed or the view has no image.
    pub fn zoom(&mut self, view: &dyn ImageView, screen: ImageSize) -> bool {
        if self.current.is_some() {
            return false;
        }
        let Some(image) = view.image() else {
            return false;
        };
        if image.width() == 0 {
            return false;
        }

        let screen_width = f64::from(screen.width);
        let height = f64::from(image.height()) * screen_width / f64::from(image.width());
        let frame = Rect::new(0.0, (f64::from(screen.height) - height) / 2.0, screen_width, height);

        debug!(screen = %screen, "Zooming image");
        self.current = Some(ZoomedImage {
            image,
            origin: Rect::from_size(view.bounds()),
            frame,
        });
        true
    }

    /// Tears the overlay down after a tap, returning what was shown.
    pub fn dismiss(&mut self) -> Option<ZoomedImage> {
        self.current.take()
    }

    /// Tears the overlay down when the device rotates.
    pub fn on_rotation(&mut self) -> Option<ZoomedImage> {
        self.dismiss()
    }

    /// Whether an image is zoomed.
    #[must_use]
    pub const fn is_zoomed(&self) -> bool {
        self.current.is_some()
    }

    /// The zoomed image, if any.
    #[must_use]
    pub const fn current(&self) -> Option<&ZoomedImage> {
        self.current.as_ref()
    }
}
