//! Control structures for functional programming.
//!
//! - [`Trampoline`]: Stack-safe recursion as data, evaluated by a loop
//!
//! # Examples
//!
//! ## Stack-Safe Recursion
//!
//! ```rust
//! use lamina::control::Trampoline;
//!
//! fn is_even(n: u32) -> Trampoline<bool> {
//!     if n == 0 {
//!         Trampoline::done(true)
//!     } else {
//!         Trampoline::call(move || is_odd(n - 1))
//!     }
//! }
//!
//! fn is_odd(n: u32) -> Trampoline<bool> {
//!     if n == 0 {
//!         Trampoline::done(false)
//!     } else {
//!         Trampoline::call(move || is_even(n - 1))
//!     }
//! }
//!
//! assert!(is_even(100_000).run());
//! ```

mod trampoline;

pub use trampoline::{Bind, Thunk, Trampoline};
