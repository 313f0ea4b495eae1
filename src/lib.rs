//! # lamina
//!
//! A small functional programming runtime for Rust: a generic monad
//! contract, a success-or-failure [`Result`](result::Result) container, and
//! a stack-safe [`Trampoline`](control::Trampoline) evaluator.
//!
//! ## Overview
//!
//! - **Type Classes**: `Functor`, `Applicative`, `Monad` and the generic
//!   folds `sequence_`, `map_m_`, `filter_m_`
//! - **Result**: `Ok`/`Error` with short-circuiting `and_then`, panic capture
//!   via `result(f)`, and the `sequence`/`map_m`/`filter_m` adapters
//! - **Control Structures**: `Trampoline` for recursion without stack growth
//! - **Function Composition**: `curry!` and `apply!`
//!
//! ## Feature Flags
//!
//! - `typeclass`: Type class traits and the `result` module
//! - `compose`: Currying macros
//! - `control`: Trampoline
//! - `serde`: `Serialize`/`Deserialize` for `Result`
//! - `tracing`: Diagnostic events from `Trampoline::run` and `result`
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use lamina::prelude::*;
//!
//! fn sum_to(n: u64) -> Trampoline<u64> {
//!     if n == 0 {
//!         Trampoline::done(0)
//!     } else {
//!         Trampoline::call(move || sum_to(n - 1)).map(move |sum| sum + n)
//!     }
//! }
//!
//! let checked = map_m(|n: u64| if n > 0 { Ok(sum_to(n).run()) } else { Error("zero") }, [3, 50_000]);
//! assert_eq!(checked, Ok(vec![6, 1_250_025_000]));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits. Importing it brings the
/// crate's `Ok` and `Error` constructors into scope, shadowing the standard
/// `Ok`.
///
/// # Usage
///
/// ```rust
/// use lamina::prelude::*;
/// ```
pub mod prelude {

    #[cfg(feature = "typeclass")]
    pub use crate::typeclass::*;

    #[cfg(feature = "typeclass")]
    pub use crate::result::{Error, Ok, Panic, Result, filter_m, map_m, result, sequence};

    #[cfg(feature = "compose")]
    pub use crate::compose::*;

    #[cfg(feature = "control")]
    pub use crate::control::*;
}

#[cfg(feature = "typeclass")]
pub mod typeclass;

#[cfg(feature = "typeclass")]
pub mod result;

#[cfg(feature = "compose")]
pub mod compose;

#[cfg(feature = "control")]
pub mod control;
