//! Domain types for image loading.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Pixel dimensions of an image, a widget, or a resize target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImageSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ImageSize {
    /// Creates a new size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Size of a decoded image.
    #[must_use]
    pub fn of(image: &image::DynamicImage) -> Self {
        Self::new(image.width(), image.height())
    }

    /// Returns true if both dimensions are zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.width == 0 && self.height == 0
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Error returned when a `WxH` size string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid image size '{0}', expected <width>x<height>")]
pub struct ParseSizeError(String);

impl FromStr for ImageSize {
    type Err = ParseSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(|| ParseSizeError(s.to_string()))?;
        let width = w.trim().parse().map_err(|_| ParseSizeError(s.to_string()))?;
        let height = h.trim().parse().map_err(|_| ParseSizeError(s.to_string()))?;
        Ok(Self::new(width, height))
    }
}

impl TryFrom<String> for ImageSize {
    type Error = ParseSizeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ImageSize> for String {
    fn from(size: ImageSize) -> Self {
        size.to_string()
    }
}

/// Axis-aligned rectangle in screen points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Rect {
    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle anchored at the origin with the given size.
    #[must_use]
    pub fn from_size(size: ImageSize) -> Self {
        Self::new(0.0, 0.0, f64::from(size.width), f64::from(size.height))
    }
}

/// A single request to show a remote image in a view.
///
/// Lives for one `display` call only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadRequest {
    url: Option<String>,
    placeholder: Option<String>,
    target_size: Option<ImageSize>,
    show_spinner: bool,
    force_download: bool,
}

impl LoadRequest {
    /// Creates a request for the given URL.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    /// Creates a request from an optional URL. `None` fails with `CallFailed`.
    #[must_use]
    pub fn from_optional(url: Option<String>) -> Self {
        Self {
            url,
            ..Self::default()
        }
    }

    /// Shows the named placeholder until the image is ready.
    #[must_use]
    pub fn with_placeholder(mut self, name: impl Into<String>) -> Self {
        self.placeholder = Some(name.into());
        self
    }

    /// Resizes the displayed image to this size (aspect-fill).
    #[must_use]
    pub const fn with_size(mut self, size: ImageSize) -> Self {
        self.target_size = Some(size);
        self
    }

    /// Shows a spinner while the network fetch is running.
    #[must_use]
    pub const fn with_spinner(mut self) -> Self {
        self.show_spinner = true;
        self
    }

    /// Skips the cache lookup and always downloads.
    #[must_use]
    pub const fn force_download(mut self) -> Self {
        self.force_download = true;
        self
    }

    /// The URL, or `None` if absent or empty.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.is_empty())
    }

    /// Placeholder name, if any.
    #[must_use]
    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    /// Display target size, if any.
    #[must_use]
    pub const fn target_size(&self) -> Option<ImageSize> {
        self.target_size
    }

    /// Whether the spinner is requested.
    #[must_use]
    pub const fn show_spinner(&self) -> bool {
        self.show_spinner
    }

    /// Whether the cache lookup is bypassed.
    #[must_use]
    pub const fn is_forced(&self) -> bool {
        self.force_download
    }
}

/// Status of an image in a view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ImageStatus {
    /// Image loading has not started.
    #[default]
    NotStarted,
    /// Image is being downloaded from the network.
    Downloading,
    /// Image is shown.
    Ready,
    /// Image loading failed with an error message.
    Failed(String),
}

impl ImageStatus {
    /// Returns true if the image is ready for rendering.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    /// Returns true if the image is currently being loaded.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Downloading)
    }

    /// Returns true if loading failed.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Where a displayed image came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    /// Read from the disk cache.
    DiskCache,
    /// Downloaded from network.
    Network,
}

impl std::fmt::Display for ImageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DiskCache => write!(f, "disk"),
            Self::Network => write!(f, "network"),
        }
    }
}
