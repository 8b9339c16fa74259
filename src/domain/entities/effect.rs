//! Visual effects that can be attached to a view.

use super::image::Rect;

/// Strength of a blur overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlurStyle {
    /// Subtle blur.
    Light,
    /// Standard blur.
    #[default]
    Regular,
    /// Heavy blur.
    Dark,
}

impl BlurStyle {
    /// Gaussian sigma used when rendering this style.
    #[must_use]
    pub const fn sigma(self) -> f32 {
        match self {
            Self::Light => 2.0,
            Self::Regular => 5.0,
            Self::Dark => 10.0,
        }
    }
}

/// Overlay effect attached on top of a view's content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewEffect {
    /// A blur layer covering `frame`.
    Blur {
        /// Area covered by the effect, in view coordinates.
        frame: Rect,
        /// Blur strength.
        style: BlurStyle,
    },
}
