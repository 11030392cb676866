use image::{imageops, Pixel};

use crate::{buffer::Image, error::TransformError};

use super::{check_not_empty, Effect};

/// An effect which adds a constant to every colour channel of every pixel, saturating at the
/// bounds of the channel type.  Alpha is left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Brighten {
    amount: i32,
}

impl Brighten {
    pub fn new(amount: i32) -> Self {
        Self { amount }
    }
}

/// [`imageops::brighten`] adds the amount to each channel as an `i32`, which overflows for
/// amounts near the ends of `i32`.  Integer channels are at most 16 bits wide in practice, so any
/// amount past `u16::MAX` saturates in exactly the same way.
const MAX_AMOUNT: i32 = u16::MAX as i32;

impl<P> Effect<P> for Brighten
where
    P: Pixel + 'static,
    P::Subpixel: 'static,
{
    fn apply(&self, source: &Image<P>) -> Result<Image<P>, TransformError> {
        check_not_empty(self, source)?;
        let amount = self.amount.clamp(-MAX_AMOUNT, MAX_AMOUNT);
        Ok(imageops::brighten(source, amount))
    }
}
