//! Lazyimage - lazy loading of remote images into UI widgets.
//!
//! Images are fetched once, stored in a flat per-URL disk cache, and shown in
//! any widget implementing [`domain::ports::ImageView`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing the cache, fetcher, loader and configuration.
pub mod infrastructure;
/// Presentation layer containing views and effects.
pub mod presentation;

pub use domain::{ImageSize, ImageSource, LazyImageError, LoadRequest};
pub use infrastructure::{LazyImage, LazyImageConfig};

/// Current version of the library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = "lazyimage";
