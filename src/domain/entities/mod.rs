//! Domain entity definitions.

mod effect;
mod image;

pub use effect::{BlurStyle, ViewEffect};
pub use self::image::{ImageSize, ImageSource, ImageStatus, LoadRequest, ParseSizeError, Rect};
