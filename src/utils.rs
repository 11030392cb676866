use image::Pixel;

use crate::buffer::Image;

/// Copy the outermost ring of pixels from `source` into `out`.  The 3x3 filters from
/// [`image::imageops`] only write the interior of their output, leaving the border zeroed.
// Invariant: `out` and `source` have the same dimensions
pub(crate) fn restore_border<P>(out: &mut Image<P>, source: &Image<P>)
where
    P: Pixel + 'static,
    P::Subpixel: 'static,
{
    debug_assert_eq!(out.dimensions(), source.dimensions());
    let (w, h) = source.dimensions();
    for x in 0..w {
        out.put_pixel(x, 0, *source.get_pixel(x, 0));
        out.put_pixel(x, h - 1, *source.get_pixel(x, h - 1));
    }
    for y in 0..h {
        out.put_pixel(0, y, *source.get_pixel(0, y));
        out.put_pixel(w - 1, y, *source.get_pixel(w - 1, y));
    }
}

/// Replace the alpha channel of every pixel in `out` with the alpha of the corresponding pixel in
/// `source`.  Does nothing for pixel types without an alpha channel.
pub(crate) fn copy_alpha<P>(out: &mut Image<P>, source: &Image<P>)
where
    P: Pixel + 'static,
    P::Subpixel: 'static,
{
    if !P::COLOR_TYPE.has_alpha() {
        return;
    }
    // Alpha is always the last channel
    let alpha = P::CHANNEL_COUNT as usize - 1;
    for (out_px, src_px) in out.pixels_mut().zip(source.pixels()) {
        out_px.channels_mut()[alpha] = src_px.channels()[alpha];
    }
}

pub(crate) fn partial_max<S: PartialOrd>(x: S, y: S) -> S {
    if x < y {
        y
    } else {
        x
    }
}
