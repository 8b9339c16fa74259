//! Blur overlay.

use crate::domain::entities::{BlurStyle, Rect, ViewEffect};
use crate::domain::ports::ImageView;

/// Adds a blur layer covering the view's bounds and returns it.
pub fn attach_blur(view: &dyn ImageView, style: BlurStyle) -> ViewEffect {
    let effect = ViewEffect::Blur {
        frame: Rect::from_size(view.bounds()),
        style,
    };
    view.attach_effect(effect);
    effect
}

/// Renders a blurred copy of `image` for hosts without a native blur layer.
#[must_use]
pub fn render_blur(image: &image::DynamicImage, style: BlurStyle) -> image::DynamicImage {
    image.blur(style.sigma())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ImageSize;
    use crate::presentation::widgets::ImageViewState;

    #[test]
    fn test_attach_is_additive() {
        let view = ImageViewState::with_bounds(ImageSize::new(30, 20));

        attach_blur(&view, BlurStyle::Light);
        attach_blur(&view, BlurStyle::Dark);

        let effects = view.effects();
        assert_eq!(effects.len(), 2);
        assert_eq!(
            effects[0],
            ViewEffect::Blur {
                frame: Rect::new(0.0, 0.0, 30.0, 20.0),
                style: BlurStyle::Light,
            }
        );
    }

    #[test]
    fn test_render_keeps_dimensions() {
        let image = image::DynamicImage::new_rgb8(16, 8);
        let blurred = render_blur(&image, BlurStyle::Regular);

        assert_eq!((blurred.width(), blurred.height()), (16, 8));
    }
}
