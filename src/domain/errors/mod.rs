//! Domain error types.

mod lazy_image_error;
mod store_error;

pub use lazy_image_error::LazyImageError;
pub use store_error::StoreError;
