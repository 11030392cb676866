//! Property-based tests for the push/pop bookkeeping of [`LayerStack`].

use image::{GrayImage, Luma};
use mask_layers::{Error, Layer, LayerStack};
use proptest::prelude::*;

const CAPACITY: usize = 5;

#[derive(Debug, Clone)]
enum Op {
    Push(u8),
    Pop,
    Hide(usize),
    Show(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<u8>().prop_map(Op::Push),
        Just(Op::Pop),
        (0..CAPACITY + 2).prop_map(Op::Hide),
        (0..CAPACITY + 2).prop_map(Op::Show),
    ]
}

fn layer(value: u8) -> Layer<Luma<u8>> {
    Layer::new(&GrayImage::from_pixel(2, 2, Luma([value])))
}

fn top_value(stack: &LayerStack<Luma<u8>, CAPACITY>) -> Option<u8> {
    stack
        .top()
        .ok()
        .map(|layer| layer.image().unwrap().get_pixel(0, 0).0[0])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Check the stack against a `Vec` model after every operation
    #[test]
    fn stack_matches_model(ops in prop::collection::vec(op(), 0..64)) {
        let mut stack = LayerStack::<Luma<u8>, CAPACITY>::new();
        let mut model: Vec<(u8, bool)> = Vec::new();

        for op in ops {
            match op {
                Op::Push(v) => {
                    let result = stack.push(layer(v));
                    if model.len() == CAPACITY {
                        let is_full = matches!(result, Err(Error::CapacityExceeded { .. }));
                        prop_assert!(is_full);
                    } else {
                        prop_assert!(result.is_ok());
                        model.push((v, true));
                    }
                }
                Op::Pop => match model.pop() {
                    Some((v, visible)) => {
                        let popped = stack.pop().unwrap();
                        prop_assert_eq!(popped.image().unwrap().get_pixel(0, 0).0[0], v);
                        prop_assert_eq!(popped.is_visible(), visible);
                    }
                    None => {
                        let is_empty_error = matches!(stack.pop(), Err(Error::EmptyStack));
                        prop_assert!(is_empty_error);
                    }
                },
                Op::Hide(i) | Op::Show(i) => {
                    let show = matches!(op, Op::Show(_));
                    let result = if show { stack.set_visible(i) } else { stack.set_invisible(i) };
                    match model.get_mut(i) {
                        Some(entry) => {
                            prop_assert!(result.is_ok());
                            entry.1 = show;
                        }
                        None => {
                            let out_of_range =
                                matches!(result, Err(Error::IndexOutOfRange { .. }));
                            prop_assert!(out_of_range);
                        }
                    }
                }
            }

            prop_assert!(stack.size() <= stack.capacity());
            prop_assert_eq!(stack.size(), model.len());
            prop_assert_eq!(top_value(&stack), model.last().map(|&(v, _)| v));
            for (i, &(v, visible)) in model.iter().enumerate() {
                let layer = stack.at(i).unwrap();
                prop_assert_eq!(layer.image().unwrap().get_pixel(0, 0).0[0], v);
                prop_assert_eq!(layer.is_visible(), visible);
            }
            prop_assert!(stack.at(model.len()).is_err());
        }
    }

    /// Pushing then popping restores the previous top
    #[test]
    fn push_pop_is_a_no_op(
        values in prop::collection::vec(any::<u8>(), 1..CAPACITY),
        extra in any::<u8>()
    ) {
        let mut stack = LayerStack::<Luma<u8>, CAPACITY>::new();
        for &v in &values {
            stack.push(layer(v)).unwrap();
        }
        let top_before = top_value(&stack);

        stack.push(layer(extra)).unwrap();
        stack.pop().unwrap();
        prop_assert_eq!(top_value(&stack), top_before);
        prop_assert_eq!(stack.size(), values.len());
    }

    /// Merging only ever shows the topmost visible layer when all layers are the same size
    #[test]
    fn merge_shows_topmost_visible(
        layers in prop::collection::vec((any::<u8>(), any::<bool>()), 1..=CAPACITY)
    ) {
        let mut stack = LayerStack::<Luma<u8>, CAPACITY>::new();
        for &(v, visible) in &layers {
            let mut l = layer(v);
            if !visible {
                l.hide();
            }
            stack.push(l).unwrap();
        }

        match layers.iter().rev().find(|(_, visible)| *visible) {
            Some(&(v, _)) => {
                let merged = stack.merge().unwrap();
                prop_assert!(merged.image().unwrap().pixels().all(|px| px.0[0] == v));
            }
            None => {
                let is_no_visible_error = matches!(stack.merge(), Err(Error::NoVisibleLayers));
                prop_assert!(is_no_visible_error);
            }
        }
    }
}
