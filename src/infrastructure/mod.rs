//! Infrastructure layer with external service adapters.

/// Application configuration.
pub mod config;
/// Image handling (path mapping, disk store, fetching, loading).
pub mod image;

pub use config::{AppConfig, CliArgs, ConfigStore, LogLevel};
pub use self::image::{
    DiskImageStore, HttpImageFetcher, LazyImage, LazyImageConfig, LoaderInitError,
    aspect_fill_size, cache_file_name, strip_url,
};
