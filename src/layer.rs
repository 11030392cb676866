use std::path::Path;

use cgmath::Vector2;
use image::{ImageError, Pixel, Rgba};

use crate::{
    buffer::{DebuggableImage, Image},
    effects::Effect,
    error::{Error, Result},
};

/// A single image in a [`LayerStack`](crate::LayerStack), plus whether or not it's drawn when
/// the stack is merged.
///
/// A `Layer` always owns its image outright; cloning a `Layer` clones the whole pixel buffer.
#[derive(Debug, Clone)]
pub struct Layer<P>
where
    P: Pixel + 'static,
    P::Subpixel: 'static,
{
    image: Option<DebuggableImage<P>>,
    visible: bool,
}

impl<P> Layer<P>
where
    P: Pixel + 'static,
    P::Subpixel: 'static,
{
    /// Creates a visible `Layer` with no image.  Empty layers can be pushed onto a stack but
    /// can't be merged or transformed.
    pub fn empty() -> Self {
        Self {
            image: None,
            visible: true,
        }
    }

    /// Creates a visible `Layer` holding a copy of `image`
    pub fn new(image: &Image<P>) -> Self {
        Self::with_visibility(image, true)
    }

    /// Creates a `Layer` holding a copy of `image`
    pub fn with_visibility(image: &Image<P>, visible: bool) -> Self {
        Self {
            image: Some(DebuggableImage(image.clone())),
            visible,
        }
    }

    /// Creates a visible `Layer` which takes ownership of `image`
    pub fn from_image(image: Image<P>) -> Self {
        Self {
            image: Some(DebuggableImage(image)),
            visible: true,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Returns `true` if this `Layer` has no image
    pub fn is_empty(&self) -> bool {
        self.image.is_none()
    }

    /// Returns the image stored in this `Layer`, or [`Error::EmptyLayer`] if there isn't one.
    pub fn image(&self) -> Result<&Image<P>> {
        self.image.as_deref().ok_or(Error::EmptyLayer)
    }

    pub fn image_mut(&mut self) -> Result<&mut Image<P>> {
        self.image.as_deref_mut().ok_or(Error::EmptyLayer)
    }

    pub fn into_image(self) -> Result<Image<P>> {
        self.image
            .map(DebuggableImage::into_inner)
            .ok_or(Error::EmptyLayer)
    }

    /// The `(width, height)` of this `Layer`'s image, or `None` if it's empty
    pub fn dimensions(&self) -> Option<Vector2<u32>> {
        self.image.as_ref().map(|img| img.dimensions().into())
    }

    /// Returns a new visible `Layer` containing the result of applying `effect` to this
    /// `Layer`'s image.  `self` is not modified.
    pub fn transformed(&self, effect: &dyn Effect<P>) -> Result<Self> {
        let source = self.image()?;
        log::debug!("Applying {} to {:?}", effect.name(), self.image);
        let image = effect.apply(source)?;
        Ok(Self::from_image(image))
    }
}

impl<P> Default for Layer<P>
where
    P: Pixel + 'static,
    P::Subpixel: 'static,
{
    fn default() -> Self {
        Self::empty()
    }
}

impl<P> From<Image<P>> for Layer<P>
where
    P: Pixel + 'static,
    P::Subpixel: 'static,
{
    fn from(image: Image<P>) -> Self {
        Self::from_image(image)
    }
}

impl Layer<Rgba<u8>> {
    /// Load a visible `Layer` from an image file.  Any colour format supported by [`image`] is
    /// converted to RGBA8.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let dyn_image = image::io::Reader::open(path)
            .map_err(ImageError::from)?
            .decode()?;
        log::debug!("Loaded {:?} ({:?})", path, dyn_image.color());
        Ok(Self::from_image(dyn_image.into_rgba8()))
    }
}

#[cfg(test)]
mod tests {
    use image::{GrayImage, ImageBuffer, Luma, RgbaImage};

    use super::*;
    use crate::effects::{Axis, Brighten, Smooth};

    fn gradient() -> RgbaImage {
        RgbaImage::from_fn(4, 3, |x, y| Rgba([x as u8 * 10, y as u8 * 10, 0, 255]))
    }

    #[test]
    fn empty_layers_have_no_image() {
        let layer = Layer::<Rgba<u8>>::empty();
        assert!(layer.is_visible());
        assert!(layer.is_empty());
        assert_eq!(layer.dimensions(), None);
        assert!(matches!(layer.image(), Err(Error::EmptyLayer)));
        assert!(matches!(layer.into_image(), Err(Error::EmptyLayer)));
    }

    #[test]
    fn default_is_empty() {
        let layer: Layer<Luma<u8>> = Layer::default();
        assert!(layer.is_empty());
        assert!(layer.is_visible());
    }

    #[test]
    fn new_layers_copy_their_image() {
        let mut source = gradient();
        let layer = Layer::new(&source);
        assert_eq!(layer.image().unwrap(), &source);

        // Modifying the source must not change the layer's copy
        source.put_pixel(1, 1, Rgba([255, 255, 255, 255]));
        assert_ne!(layer.image().unwrap(), &source);
        assert_eq!(layer.image().unwrap(), &gradient());
    }

    #[test]
    fn cloned_layers_are_independent() {
        let original = Layer::new(&gradient());
        let mut copy = original.clone();
        copy.image_mut().unwrap().put_pixel(0, 0, Rgba([1, 2, 3, 4]));
        copy.hide();
        assert_eq!(original.image().unwrap(), &gradient());
        assert!(original.is_visible());
    }

    #[test]
    fn explicit_visibility() {
        let source = GrayImage::new(2, 2);
        assert!(Layer::with_visibility(&source, true).is_visible());
        assert!(!Layer::with_visibility(&source, false).is_visible());
    }

    #[test]
    fn show_and_hide_are_idempotent() {
        let mut layer = Layer::new(&gradient());
        layer.show();
        assert!(layer.is_visible());
        layer.hide();
        layer.hide();
        assert!(!layer.is_visible());
        layer.show();
        assert!(layer.is_visible());
    }

    #[test]
    fn dimensions_match_the_image() {
        let layer = Layer::from(gradient());
        assert_eq!(layer.dimensions(), Some(Vector2::new(4, 3)));
    }

    #[test]
    fn size_queries_work_for_any_pixel_type() {
        let layer = Layer::new(&ImageBuffer::<Luma<u16>, Vec<u16>>::new(5, 1));
        assert_eq!(layer.dimensions(), Some(Vector2::new(5, 1)));
        assert_eq!(
            format!("{:?}", layer),
            "Layer { image: Some(Image(5x1, 1 channels)), visible: true }"
        );
    }

    #[test]
    fn transformed_returns_a_new_visible_layer() {
        let mut layer = Layer::new(&gradient());
        layer.hide();
        let brighter = layer.transformed(&Brighten::new(5)).unwrap();
        assert!(brighter.is_visible());
        assert_eq!(*brighter.image().unwrap().get_pixel(1, 2), Rgba([15, 25, 5, 255]));
        // The source layer is untouched
        assert_eq!(layer.image().unwrap(), &gradient());
        assert!(!layer.is_visible());
    }

    #[test]
    fn transforming_an_empty_layer_fails() {
        let layer = Layer::<Rgba<u8>>::empty();
        assert!(matches!(
            layer.transformed(&Smooth::new(Axis::Both, 1)),
            Err(Error::EmptyLayer)
        ));
    }

    #[test]
    fn transform_errors_are_propagated() {
        let layer = Layer::new(&gradient());
        assert!(matches!(
            layer.transformed(&Smooth::new(Axis::Both, 0)),
            Err(Error::Transform(_))
        ));
    }

    #[test]
    fn missing_files_are_image_errors() {
        let dir = tempfile::tempdir().unwrap();
        let result = Layer::from_file(dir.path().join("does-not-exist.png"));
        assert!(matches!(result, Err(Error::Image(_))));
    }

    #[test]
    fn load_from_file_converts_to_rgba() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grey.png");
        GrayImage::from_pixel(3, 2, Luma([77])).save(&path).unwrap();

        let layer = Layer::from_file(&path).unwrap();
        assert_eq!(layer.dimensions(), Some(Vector2::new(3, 2)));
        let image = layer.image().unwrap();
        assert!(image.pixels().all(|px| *px == Rgba([77, 77, 77, 255])));
    }
}
