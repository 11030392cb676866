use std::{
    fmt::{Debug, Formatter},
    ops::{Deref, DerefMut},
};

use image::{ImageBuffer, Pixel};

/// An owned 2D pixel buffer, with pixels of type `P`
pub type Image<P> = ImageBuffer<P, Vec<<P as Pixel>::Subpixel>>;

/// Wrapper of [`Image`] with a human-friendly [`Debug`] impl.
#[derive(Clone)]
#[repr(transparent)]
pub(crate) struct DebuggableImage<P>(pub(crate) Image<P>)
where
    P: Pixel + 'static,
    P::Subpixel: 'static;

impl<P> DebuggableImage<P>
where
    P: Pixel + 'static,
    P::Subpixel: 'static,
{
    pub(crate) fn into_inner(self) -> Image<P> {
        self.0
    }
}

impl<P> Deref for DebuggableImage<P>
where
    P: Pixel + 'static,
    P::Subpixel: 'static,
{
    type Target = Image<P>;

    fn deref(&self) -> &Image<P> {
        &self.0
    }
}

impl<P> DerefMut for DebuggableImage<P>
where
    P: Pixel + 'static,
    P::Subpixel: 'static,
{
    fn deref_mut(&mut self) -> &mut Image<P> {
        &mut self.0
    }
}

impl<P> Debug for DebuggableImage<P>
where
    P: Pixel + 'static,
    P::Subpixel: 'static,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let (w, h) = self.0.dimensions();
        write!(f, "Image({}x{}, {} channels)", w, h, P::CHANNEL_COUNT)
    }
}
