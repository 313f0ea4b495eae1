//! Type class traits forming the monad contract.
//!
//! Every container in this crate implements the same small capability set:
//!
//! - [`Functor`]: `map` over the success value
//! - [`Applicative`]: `pure`, the per-type "wrap" constructor
//! - [`Monad`]: `flat_map` / `and_then`, sequencing with short-circuiting
//!
//! and the generic folds [`sequence_`], [`map_m_`] and [`filter_m_`] are
//! written once against that contract.
//!
//! ## Higher-Kinded Types Emulation
//!
//! Rust has no native higher-kinded types. [`TypeConstructor`] uses generic
//! associated types to name "the same container holding another type", which
//! is what lets `Functor` and `Monad` be stated generically.
//!
//! # Examples
//!
//! ```rust
//! use lamina::typeclass::{Applicative, Monad, filter_m_};
//!
//! let wrapped: Option<i32> = <Option<()>>::pure(3);
//! assert_eq!(Monad::flat_map(wrapped, |n| Some(n + 1)), Some(4));
//!
//! let small = filter_m_(Some, |n: &i32| Some(*n < 3), vec![1, 5, 2]);
//! assert_eq!(small, Some(vec![1, 2]));
//! ```

mod applicative;
mod functor;
mod higher;
mod monad;

pub use applicative::Applicative;
pub use functor::Functor;
pub use higher::TypeConstructor;
pub use monad::{Monad, filter_m_, map_m_, sequence_};
