//! Image effects (i.e. any image -> image transformation).  The pixel work itself is done by
//! [`image::imageops`]; effects only validate their parameters and chain the library calls.

mod blur_gradient;
mod per_pixel;
mod smooth;

use std::fmt::Debug;

use image::Pixel;

pub use blur_gradient::BlurGradient;
pub use per_pixel::Brighten;
pub use smooth::{Axis, Smooth};

use crate::{buffer::Image, error::TransformError};

/// Trait implemented by all effect types
pub trait Effect<P: Pixel>: Debug {
    /// A human-readable name for this effect, including its parameters.  This is also how the
    /// effect is named in any [`TransformError`] it returns.
    fn name(&self) -> String {
        format!("{:?}", self)
    }

    /// Apply this effect to `source`, returning a new image.  `source` is never modified.
    fn apply(&self, source: &Image<P>) -> Result<Image<P>, TransformError>;
}

fn invalid_parameter(effect: &dyn Debug, reason: impl Into<String>) -> TransformError {
    TransformError::InvalidParameter {
        effect: format!("{:?}", effect),
        reason: reason.into(),
    }
}

/// Returns [`TransformError::EmptyImage`] if `source` has no pixels.  None of the
/// [`image::imageops`] filters are defined on 0-sized images.
fn check_not_empty<P>(effect: &dyn Debug, source: &Image<P>) -> Result<(), TransformError>
where
    P: Pixel + 'static,
    P::Subpixel: 'static,
{
    if source.width() == 0 || source.height() == 0 {
        return Err(TransformError::EmptyImage {
            effect: format!("{:?}", effect),
        });
    }
    Ok(())
}
