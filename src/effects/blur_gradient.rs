use image::{imageops, Pixel};

use crate::{
    buffer::Image,
    error::TransformError,
    utils::{copy_alpha, partial_max},
};

use super::{check_not_empty, invalid_parameter, Effect};

/// Sobel kernel for horizontal gradients (in row-major order)
#[rustfmt::skip]
const SOBEL_X: [f32; 9] = [
    -1.0, 0.0, 1.0,
    -2.0, 0.0, 2.0,
    -1.0, 0.0, 1.0,
];
/// Sobel kernel for vertical gradients (in row-major order)
#[rustfmt::skip]
const SOBEL_Y: [f32; 9] = [
    -1.0, -2.0, -1.0,
     0.0,  0.0,  0.0,
     1.0,  2.0,  1.0,
];

/// An effect which Gaussian-blurs the image and then replaces every colour channel with the
/// strength of its gradient.  Alpha is carried over from the source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlurGradient {
    /// Standard deviation of the blur.  `0.0` skips the blur pass entirely.
    sigma: f32,
}

impl BlurGradient {
    pub fn new(sigma: f32) -> Self {
        Self { sigma }
    }
}

/// [`imageops::blur`] divides by `2 * sigma^2` when building its weights.  If that overflows or
/// underflows, the weights come out as 0 or NaN and the library panics whilst normalising them.
// Roughly `7.7e-20 <= sigma <= 1.3e19`
fn blur_is_defined(sigma: f32) -> bool {
    (2.0 * sigma * sigma).is_normal()
}

impl<P> Effect<P> for BlurGradient
where
    P: Pixel + 'static,
    P::Subpixel: 'static,
{
    fn apply(&self, source: &Image<P>) -> Result<Image<P>, TransformError> {
        check_not_empty(self, source)?;
        if !self.sigma.is_finite() || self.sigma < 0.0 {
            return Err(invalid_parameter(
                self,
                format!("sigma must be finite and non-negative, got {}", self.sigma),
            ));
        }
        if self.sigma > 0.0 && !blur_is_defined(self.sigma) {
            return Err(invalid_parameter(
                self,
                format!("sigma {} is too extreme to blur with", self.sigma),
            ));
        }

        let blurred = if self.sigma == 0.0 {
            source.clone()
        } else {
            imageops::blur(source, self.sigma)
        };
        let mut gradient = abs_filter(&blurred, &SOBEL_X);
        let gradient_y = abs_filter(&blurred, &SOBEL_Y);
        for (gx, gy) in gradient.pixels_mut().zip(gradient_y.pixels()) {
            gx.apply2(gy, partial_max);
        }
        copy_alpha(&mut gradient, source);
        Ok(gradient)
    }
}

/// Absolute response of `image` to a zero-sum `kernel`.  [`imageops::filter3x3`] clamps negative
/// responses to 0, so `|k * img| = max(k * img, -k * img)`.
fn abs_filter<P>(image: &Image<P>, kernel: &[f32; 9]) -> Image<P>
where
    P: Pixel + 'static,
    P::Subpixel: 'static,
{
    let negated = kernel.map(|k| -k);
    let mut out = imageops::filter3x3(image, kernel);
    let out_neg = imageops::filter3x3(image, &negated);
    for (a, b) in out.pixels_mut().zip(out_neg.pixels()) {
        a.apply2(b, partial_max);
    }
    out
}
