//! Port implemented by host widgets that display images.

use std::sync::Arc;

use crate::domain::entities::{ImageSize, ViewEffect};

/// A widget with an assignable image.
///
/// The loader calls these from background tasks; implementations backed by a
/// UI toolkit forward each mutation to their own UI thread.
pub trait ImageView: Send + Sync {
    /// Current pixel dimensions of the widget.
    fn bounds(&self) -> ImageSize;

    /// Resizes the widget.
    fn set_bounds(&self, size: ImageSize);

    /// The image currently shown, if any.
    fn image(&self) -> Option<Arc<image::DynamicImage>>;

    /// Replaces the shown image.
    fn set_image(&self, image: Option<Arc<image::DynamicImage>>);

    /// Shows a named placeholder asset.
    fn show_placeholder(&self, name: &str);

    /// Starts the activity spinner.
    fn start_spinner(&self);

    /// Stops and removes the activity spinner.
    fn stop_spinner(&self);

    /// Adds an overlay effect on top of the content.
    fn attach_effect(&self, effect: ViewEffect);
}
