mod image_fetcher_port;
mod image_loader_port;
mod image_view_port;

pub use image_fetcher_port::ImageFetcherPort;
pub use image_loader_port::{ImageLoaderPort, LoadCompleter, LoadHandle};
pub use image_view_port::ImageView;
