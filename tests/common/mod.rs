//! Common test strategies shared by the law tests.

#![allow(dead_code)]

use lamina::result::{Error, Ok, Result};
use proptest::prelude::*;

/// Arbitrary `Result` values with either variant.
pub fn result_strategy<A, B>(
    success: impl Strategy<Value = A>,
    failure: impl Strategy<Value = B>,
) -> impl Strategy<Value = Result<A, B>>
where
    A: std::fmt::Debug,
    B: std::fmt::Debug,
{
    prop_oneof![success.prop_map(Ok), failure.prop_map(Error)]
}

/// Plain-data description of a unary function from `i32`, so generated
/// functions stay printable when a case fails.
#[derive(Debug, Clone)]
pub struct Unary {
    succeeds: bool,
    offset: i32,
    error: String,
}

impl Unary {
    pub fn apply(&self, value: i32) -> Result<i32, String> {
        if self.succeeds {
            Ok(value.wrapping_add(self.offset))
        } else {
            Error(self.error.clone())
        }
    }

    pub fn apply_option(&self, value: i32) -> Option<i32> {
        self.succeeds.then(|| value.wrapping_add(self.offset))
    }

    pub fn into_function(self) -> impl Fn(i32) -> Result<i32, String> {
        move |value| self.apply(value)
    }

    pub fn into_option_function(self) -> impl Fn(i32) -> Option<i32> {
        move |value| self.apply_option(value)
    }
}

/// Arbitrary unary functions that either offset their argument or fail.
pub fn unary_result_strategy() -> impl Strategy<Value = Unary> {
    (any::<bool>(), any::<i32>(), "[a-z]{0,8}").prop_map(|(succeeds, offset, error)| Unary {
        succeeds,
        offset,
        error,
    })
}

/// Plain-data description of a trampoline, so generated cases stay
/// printable and can be evaluated both ways.
#[derive(Debug, Clone)]
pub enum Shape {
    Done(i64),
    Call(Box<Shape>),
    /// Runs the first shape, then the second, combining `first * 3 + second`.
    AndThen(Box<Shape>, Box<Shape>),
}

pub fn shape_strategy() -> impl Strategy<Value = Shape> {
    any::<i64>()
        .prop_map(Shape::Done)
        .prop_recursive(8, 64, 2, |inner| {
            prop_oneof![
                inner.clone().prop_map(|shape| Shape::Call(Box::new(shape))),
                (inner.clone(), inner)
                    .prop_map(|(first, second)| Shape::AndThen(Box::new(first), Box::new(second))),
            ]
        })
}

#[cfg(feature = "control")]
pub fn build(shape: &Shape) -> lamina::control::Trampoline<i64> {
    use lamina::control::Trampoline;

    match shape {
        Shape::Done(value) => Trampoline::done(*value),
        Shape::Call(inner) => {
            let inner = inner.clone();
            Trampoline::call(move || build(&inner))
        }
        Shape::AndThen(first, second) => {
            let second = second.clone();
            build(first).and_then(move |x| {
                build(&second).map(move |y| x.wrapping_mul(3).wrapping_add(y))
            })
        }
    }
}

/// Direct recursive interpretation of a shape.
pub fn evaluate(shape: &Shape) -> i64 {
    match shape {
        Shape::Done(value) => *value,
        Shape::Call(inner) => evaluate(inner),
        Shape::AndThen(first, second) => evaluate(first)
            .wrapping_mul(3)
            .wrapping_add(evaluate(second)),
    }
}
