//! Presentation layer with views and visual effects.

/// Zoom and blur effects.
pub mod effects;
/// Reusable widgets.
pub mod widgets;

pub use effects::{ZoomOverlay, attach_blur, render_blur};
pub use widgets::{ImageErrorEvent, ImageViewState, LazyImageView};
