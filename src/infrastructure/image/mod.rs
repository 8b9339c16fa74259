//! Image handling infrastructure.
//!
//! This module provides:
//! - URL to cache file name mapping
//! - Disk storage of downloaded images
//! - Aspect-fill resizing
//! - HTTP fetching
//! - The display pipeline tying them together

pub mod disk_cache;
pub mod http_fetcher;
pub mod loader;
pub mod path_mapper;
pub mod resize;

pub use disk_cache::{DiskImageStore, default_cache_dir};
pub use http_fetcher::HttpImageFetcher;
pub use loader::{FALLBACK_VIEW_SIZE, LazyImage, LazyImageConfig, LoaderInitError};
pub use path_mapper::{cache_file_name, strip_url};
pub use resize::{aspect_fill_size, needs_resize, resize};
