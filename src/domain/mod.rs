//! Domain layer with core entities, errors and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;

pub use entities::{ImageSize, ImageSource, LoadRequest};
pub use errors::{LazyImageError, StoreError};
pub use ports::{ImageFetcherPort, ImageLoaderPort, ImageView, LoadHandle};
