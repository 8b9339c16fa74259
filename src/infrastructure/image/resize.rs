//! Aspect-fill resizing.

use image::DynamicImage;
use image::imageops::FilterType;

use crate::domain::entities::ImageSize;

/// Scales `source` so both dimensions cover `target`, preserving aspect ratio.
///
/// The result may overflow the target on one axis. Each dimension is at least
/// one pixel; a zero-sized source is returned unchanged.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn aspect_fill_size(source: ImageSize, target: ImageSize) -> ImageSize {
    if source.width == 0 || source.height == 0 {
        return source;
    }
    let horizontal = f64::from(target.width) / f64::from(source.width);
    let vertical = f64::from(target.height) / f64::from(source.height);
    let ratio = horizontal.max(vertical);

    let scale = |dim: u32| ((f64::from(dim) * ratio).round() as u32).max(1);
    ImageSize::new(scale(source.width), scale(source.height))
}

/// Returns true if the image's dimensions differ from `target`.
#[must_use]
pub fn needs_resize(image: &DynamicImage, target: ImageSize) -> bool {
    ImageSize::of(image) != target
}

/// Redraws `image` at its aspect-fill size for `target`.
#[must_use]
pub fn resize(image: &DynamicImage, target: ImageSize) -> DynamicImage {
    let size = aspect_fill_size(ImageSize::of(image), target);
    if size == ImageSize::of(image) {
        return image.clone();
    }
    image.resize_exact(size.width, size.height, FilterType::Lanczos3)
}
