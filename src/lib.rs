//! Fixed-capacity stacks of image layers, which can be shown, hidden, transformed and merged into
//! a single composite image.
//!
//! ```
//! use image::{Rgba, RgbaImage};
//! use mask_layers::{Layer, LayerStack};
//!
//! let mut stack = LayerStack::<Rgba<u8>, 3>::new();
//! stack.push(Layer::new(&RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 255]))))?;
//! stack.push(Layer::new(&RgbaImage::from_pixel(2, 2, Rgba([0, 0, 255, 255]))))?;
//! stack.set_invisible(1)?;
//!
//! let merged = stack.merge()?;
//! assert_eq!(merged.image()?.get_pixel(0, 0), &Rgba([255, 0, 0, 255]));
//! # Ok::<(), mask_layers::Error>(())
//! ```

mod buffer;
pub mod effects;
mod error;
mod layer;
mod stack;
mod utils;

pub use buffer::Image;
pub use error::{Error, Result, TransformError};
pub use layer::Layer;
pub use stack::LayerStack;
