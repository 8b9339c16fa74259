//! Image loading error types.

use thiserror::Error;

/// Why an image could not be fetched or displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LazyImageError {
    /// The URL was absent or invalid, or the server answered with a non-200 status.
    #[error("the download request did not succeed")]
    CallFailed,

    /// The request produced no response body.
    #[error("the download request returned no data")]
    NoDataAvailable,

    /// The body was present but is not a decodable image.
    #[error("the downloaded data are corrupted and can not be read")]
    CorruptedData,
}
