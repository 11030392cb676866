// Usage examples:
//   mask-layers base.png overlay.png gradient.png -o merged.png
//   mask-layers base.png overlay.png --hide 1 -o merged.png
//   mask-layers lenna.png overlay.png --blur-gradient 0=5 --brighten 1=-20 -o merged.png
//
// Images are pushed bottom-first onto a single stack.  Transforms replace their layer in place,
// then hidden layers are applied, then the stack is merged and saved.

use std::{fmt::Display, path::PathBuf, str::FromStr};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use image::Rgba;
use itertools::Itertools;
use mask_layers::{effects::Axis, Layer, LayerStack};

/// Maximum number of images which can be stacked
pub const CAPACITY: usize = 10;

type Stack = LayerStack<Rgba<u8>, CAPACITY>;

/// Stack images as layers, optionally transform or hide some of them, and merge the visible
/// layers into one image.
#[derive(Parser, Debug)]
#[command(name = "mask-layers")]
pub struct CliArgs {
    /// Images to stack, bottom layer first
    #[arg(required = true, num_args = 1..)]
    pub images: Vec<PathBuf>,

    /// Where to save the merged image.  The format is inferred from the extension.
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Hide the layer at INDEX before merging (can be repeated)
    #[arg(long, value_name = "INDEX")]
    pub hide: Vec<usize>,

    /// Replace layer INDEX with its blurred gradient
    #[arg(long, value_name = "INDEX=SIGMA", value_parser = parse_indexed::<f32>)]
    pub blur_gradient: Vec<(usize, f32)>,

    /// Replace layer INDEX with a smoothed copy
    #[arg(long, value_name = "INDEX=ITERATIONS", value_parser = parse_indexed::<u32>)]
    pub smooth: Vec<(usize, u32)>,

    /// Direction used by --smooth
    #[arg(long, value_enum, default_value_t = SmoothAxis::Horizontal)]
    pub smooth_axis: SmoothAxis,

    /// Replace layer INDEX with a brightened (or, if negative, darkened) copy
    #[arg(
        long,
        value_name = "INDEX=AMOUNT",
        value_parser = parse_indexed::<i32>,
        allow_hyphen_values = true
    )]
    pub brighten: Vec<(usize, i32)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SmoothAxis {
    Horizontal,
    Vertical,
    Both,
}

impl From<SmoothAxis> for Axis {
    fn from(axis: SmoothAxis) -> Self {
        match axis {
            SmoothAxis::Horizontal => Axis::Horizontal,
            SmoothAxis::Vertical => Axis::Vertical,
            SmoothAxis::Both => Axis::Both,
        }
    }
}

/// Parses `<INDEX>=<VALUE>`
fn parse_indexed<T>(s: &str) -> Result<(usize, T), String>
where
    T: FromStr,
    T::Err: Display,
{
    let (index, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected INDEX=VALUE, found {:?}", s))?;
    let index = index
        .parse()
        .map_err(|e| format!("invalid layer index {:?}: {}", index, e))?;
    let value = value
        .parse()
        .map_err(|e| format!("invalid value {:?}: {}", value, e))?;
    Ok((index, value))
}

pub fn run(args: &CliArgs) -> anyhow::Result<()> {
    let mut stack = Stack::new();
    for path in &args.images {
        let layer =
            Layer::from_file(path).with_context(|| format!("load {}", path.display()))?;
        stack
            .push(layer)
            .with_context(|| format!("push {}", path.display()))?;
    }

    for &(index, sigma) in &args.blur_gradient {
        let layer = stack
            .blur_gradient(index, sigma)
            .with_context(|| format!("blur gradient of layer {}", index))?;
        replace_layer(&mut stack, index, layer)?;
    }
    for &(index, iterations) in &args.smooth {
        let layer = stack
            .smooth(index, args.smooth_axis.into(), iterations)
            .with_context(|| format!("smooth layer {}", index))?;
        replace_layer(&mut stack, index, layer)?;
    }
    for &(index, amount) in &args.brighten {
        let layer = stack
            .brighten(index, amount)
            .with_context(|| format!("brighten layer {}", index))?;
        replace_layer(&mut stack, index, layer)?;
    }

    if !args.hide.is_empty() {
        log::info!("Hiding layers {}", args.hide.iter().join(", "));
    }
    for &index in &args.hide {
        stack
            .set_invisible(index)
            .with_context(|| format!("hide layer {}", index))?;
    }

    let merged = stack.merge().context("merge")?;
    merged
        .image()?
        .save(&args.output)
        .with_context(|| format!("save {}", args.output.display()))?;
    log::info!("Saved {} layers to {}", stack.size(), args.output.display());
    Ok(())
}

/// Swap the layer at `index` for `layer`, keeping the old layer's visibility and the order of
/// everything above it
fn replace_layer(
    stack: &mut Stack,
    index: usize,
    mut layer: Layer<Rgba<u8>>,
) -> anyhow::Result<()> {
    let mut above = Vec::new();
    while stack.size() > index + 1 {
        above.push(stack.pop()?);
    }
    let old = stack
        .pop()
        .with_context(|| format!("replace layer {}", index))?;
    if !old.is_visible() {
        layer.hide();
    }
    stack.push(layer)?;
    for layer in above.into_iter().rev() {
        stack.push(layer)?;
    }
    Ok(())
}
