use std::fmt::{Debug, Formatter};

use image::{imageops, Pixel};

use crate::{
    effects::{Axis, BlurGradient, Brighten, Effect, Smooth},
    error::{Error, Result},
    layer::Layer,
};

/// An ordered stack of at most `N` [`Layer`]s.  Index order is also compositing order: index 0 is
/// the bottom of the stack and is drawn first.
// Invariant: `count <= N`.  Only `slots[..count]` (the 'live' slots) are ever read; every slot at
// or above `count` holds an empty `Layer`.
pub struct LayerStack<P, const N: usize>
where
    P: Pixel + 'static,
    P::Subpixel: 'static,
{
    slots: [Layer<P>; N],
    count: usize,
}

impl<P, const N: usize> LayerStack<P, N>
where
    P: Pixel + 'static,
    P::Subpixel: 'static,
{
    /// Creates an empty `LayerStack`
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| Layer::empty()),
            count: 0,
        }
    }

    /// The number of [`Layer`]s currently in the stack
    pub fn size(&self) -> usize {
        self.count
    }

    /// The maximum number of [`Layer`]s this stack can hold
    pub fn capacity(&self) -> usize {
        N
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_full(&self) -> bool {
        self.count == N
    }

    /// Iterate over the [`Layer`]s in the stack, from bottom to top
    pub fn iter(&self) -> std::slice::Iter<'_, Layer<P>> {
        self.live().iter()
    }

    fn live(&self) -> &[Layer<P>] {
        &self.slots[..self.count]
    }

    ///////////////////
    // PUSH/POP/READ //
    ///////////////////

    /// Adds a [`Layer`] to the top of the stack.  Fails with [`Error::CapacityExceeded`] (leaving
    /// the stack untouched) if the stack already holds `N` layers.
    pub fn push(&mut self, layer: Layer<P>) -> Result<()> {
        if self.count == N {
            return Err(Error::CapacityExceeded { capacity: N });
        }
        log::debug!("Pushing {:?} at index {}", layer.dimensions(), self.count);
        self.slots[self.count] = layer;
        self.count += 1;
        Ok(())
    }

    /// Removes and returns the top [`Layer`] of the stack
    pub fn pop(&mut self) -> Result<Layer<P>> {
        if self.count == 0 {
            return Err(Error::EmptyStack);
        }
        self.count -= 1;
        log::debug!("Popping layer {}", self.count);
        Ok(std::mem::take(&mut self.slots[self.count]))
    }

    /// Gets the [`Layer`] at a given index, or [`Error::IndexOutOfRange`] if `index` isn't one of
    /// the `self.size()` layers in the stack (regardless of the stack's capacity).
    pub fn at(&self, index: usize) -> Result<&Layer<P>> {
        self.live().get(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.count,
        })
    }

    pub fn at_mut(&mut self, index: usize) -> Result<&mut Layer<P>> {
        let len = self.count;
        self.slots[..len]
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange { index, len })
    }

    /// Gets the top [`Layer`] of the stack
    pub fn top(&self) -> Result<&Layer<P>> {
        self.live().last().ok_or(Error::EmptyStack)
    }

    pub fn top_mut(&mut self) -> Result<&mut Layer<P>> {
        let len = self.count;
        self.slots[..len].last_mut().ok_or(Error::EmptyStack)
    }

    ////////////////
    // VISIBILITY //
    ////////////////

    /// Makes the [`Layer`] at `index` visible.  Does nothing if it's already visible.
    pub fn set_visible(&mut self, index: usize) -> Result<()> {
        let layer = self.at_mut(index)?;
        if layer.is_visible() {
            return Ok(());
        }
        log::debug!("Showing layer {}", index);
        layer.show();
        Ok(())
    }

    /// Hides the [`Layer`] at `index`.  Does nothing if it's already hidden.
    pub fn set_invisible(&mut self, index: usize) -> Result<()> {
        let layer = self.at_mut(index)?;
        if !layer.is_visible() {
            return Ok(());
        }
        log::debug!("Hiding layer {}", index);
        layer.hide();
        Ok(())
    }

    ////////////////
    // TRANSFORMS //
    ////////////////

    /// Returns a new [`Layer`] containing the result of applying `effect` to the [`Layer`] at
    /// `index`.  The stack itself is not modified.
    pub fn transform(&self, index: usize, effect: &dyn Effect<P>) -> Result<Layer<P>> {
        log::debug!("Transforming layer {} with {}", index, effect.name());
        self.at(index)?.transformed(effect)
    }

    /// [`transform`](Self::transform) the layer at `index` with a [`Smooth`] effect
    pub fn smooth(&self, index: usize, axis: Axis, iterations: u32) -> Result<Layer<P>> {
        self.transform(index, &Smooth::new(axis, iterations))
    }

    /// [`transform`](Self::transform) the layer at `index` with a [`BlurGradient`] effect
    pub fn blur_gradient(&self, index: usize, sigma: f32) -> Result<Layer<P>> {
        self.transform(index, &BlurGradient::new(sigma))
    }

    /// [`transform`](Self::transform) the layer at `index` with a [`Brighten`] effect
    pub fn brighten(&self, index: usize, amount: i32) -> Result<Layer<P>> {
        self.transform(index, &Brighten::new(amount))
    }

    ///////////
    // MERGE //
    ///////////

    /// Flattens every visible [`Layer`] into one new (visible) [`Layer`].  The result starts as a
    /// copy of the lowest visible layer; every visible layer above it is then drawn over the top,
    /// with its top-left corner at the origin.  Pixels from higher layers completely replace
    /// those underneath them, and anything outside the lowest visible layer is cropped.
    ///
    /// Hidden layers are skipped without being read, so they may be empty.
    pub fn merge(&self) -> Result<Layer<P>> {
        if self.count == 0 {
            return Err(Error::EmptyStack);
        }

        let mut visible = self
            .live()
            .iter()
            .enumerate()
            .filter(|(_, layer)| layer.is_visible());
        let (base_idx, base) = visible.next().ok_or(Error::NoVisibleLayers)?;
        log::trace!("Merge base is layer {} ({:?})", base_idx, base.dimensions());
        let mut composite = base.image()?.clone();
        for (idx, layer) in visible {
            log::trace!("Drawing layer {} ({:?})", idx, layer.dimensions());
            imageops::replace(&mut composite, layer.image()?, 0, 0);
        }

        log::debug!(
            "Merged {} layers into a {}x{} image",
            self.count,
            composite.width(),
            composite.height()
        );
        Ok(Layer::from_image(composite))
    }
}

impl<P, const N: usize> Default for LayerStack<P, N>
where
    P: Pixel + 'static,
    P::Subpixel: 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<P, const N: usize> Debug for LayerStack<P, N>
where
    P: Pixel + 'static,
    P::Subpixel: 'static,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let layers = self
            .live()
            .iter()
            .map(|layer| (layer.dimensions(), layer.is_visible()))
            .collect::<Vec<_>>();
        f.debug_struct("LayerStack")
            .field("capacity", &N)
            .field("layers", &layers)
            .finish()
    }
}

impl<'s, P, const N: usize> IntoIterator for &'s LayerStack<P, N>
where
    P: Pixel + 'static,
    P::Subpixel: 'static,
{
    type Item = &'s Layer<P>;
    type IntoIter = std::slice::Iter<'s, Layer<P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
