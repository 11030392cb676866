use image::{imageops, Pixel};

use crate::{buffer::Image, error::TransformError, utils::restore_border};

use super::{check_not_empty, invalid_parameter, Effect};

/// The direction(s) along which a [`Smooth`] effect averages neighbouring pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
    /// Average over the full 3x3 neighbourhood
    Both,
}

impl Axis {
    /// The 3x3 box kernel (in row-major order) which averages along this axis.
    /// [`imageops::filter3x3`] normalises kernels by their sum, so we can use 1s.
    #[rustfmt::skip]
    fn kernel(self) -> [f32; 9] {
        match self {
            Self::Horizontal => [
                0.0, 0.0, 0.0,
                1.0, 1.0, 1.0,
                0.0, 0.0, 0.0,
            ],
            Self::Vertical => [
                0.0, 1.0, 0.0,
                0.0, 1.0, 0.0,
                0.0, 1.0, 0.0,
            ],
            Self::Both => [1.0; 9],
        }
    }
}

/// An effect which repeatedly box-filters the image along an [`Axis`].  The outermost ring of
/// pixels is left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Smooth {
    axis: Axis,
    iterations: u32,
}

impl Smooth {
    pub fn new(axis: Axis, iterations: u32) -> Self {
        Self { axis, iterations }
    }
}

impl<P> Effect<P> for Smooth
where
    P: Pixel + 'static,
    P::Subpixel: 'static,
{
    fn apply(&self, source: &Image<P>) -> Result<Image<P>, TransformError> {
        check_not_empty(self, source)?;
        if self.iterations == 0 {
            return Err(invalid_parameter(self, "smoothing needs at least one iteration"));
        }

        let kernel = self.axis.kernel();
        let mut current = source.clone();
        for pass in 0..self.iterations {
            let mut next = imageops::filter3x3(&current, &kernel);
            restore_border(&mut next, &current);
            // Once a pass changes nothing, every later pass is a no-op too
            if next.as_raw() == current.as_raw() {
                log::trace!("Smoothing settled after {} of {} passes", pass, self.iterations);
                break;
            }
            current = next;
        }
        Ok(current)
    }
}
