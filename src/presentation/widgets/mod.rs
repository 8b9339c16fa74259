mod image_state;
mod lazy_image_view;

pub use image_state::ImageViewState;
pub use lazy_image_view::{ImageErrorEvent, LazyImageView};
