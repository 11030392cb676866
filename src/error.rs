//! Error types returned by [`Layer`](crate::Layer), [`LayerStack`](crate::LayerStack) and the
//! built-in [`Effect`](crate::effects::Effect)s.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The image of a [`Layer`](crate::Layer) was read, but the layer holds no image
    #[error("layer holds no image")]
    EmptyLayer,
    /// A layer was requested outside the live region `[0, len)` of a stack
    #[error("layer index {index} is out of range for a stack of {len} layers")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("cannot push onto a full stack (capacity {capacity})")]
    CapacityExceeded { capacity: usize },
    #[error("stack has no layers")]
    EmptyStack,
    /// Every live layer of a stack is hidden, so there's nothing to merge
    #[error("every layer in the stack is hidden")]
    NoVisibleLayers,
    #[error(transparent)]
    Transform(#[from] TransformError),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// An error raised by an [`Effect`](crate::effects::Effect) whilst transforming an image
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    #[error("{effect}: invalid parameter: {reason}")]
    InvalidParameter { effect: String, reason: String },
    #[error("{effect}: cannot transform an image with no pixels")]
    EmptyImage { effect: String },
}
