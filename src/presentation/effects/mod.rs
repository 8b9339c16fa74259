//! View effects independent of the image cache.

mod blur;
mod zoom;

pub use blur::{attach_blur, render_blur};
pub use zoom::{ZoomOverlay, ZoomedImage};
