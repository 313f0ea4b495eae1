//! Function composition utilities.
//!
//! - [`curry!`](crate::curry): convert an n-ary function into nested unary closures
//! - [`apply!`](crate::apply): supply several arguments to a curried function at once
//!
//! Currying is what lets the generic folds be partially applied before they
//! receive their sequence:
//!
//! ```
//! use lamina::curry;
//! use lamina::result::{Error, Ok, Result, map_m};
//!
//! fn parse(text: &str) -> Result<i32, String> {
//!     match text.parse() {
//!         std::result::Result::Ok(value) => Ok(value),
//!         std::result::Result::Err(_) => Error(format!("not a number: {text}")),
//!     }
//! }
//!
//! let parse_all = curry!(
//!     |function: fn(&str) -> Result<i32, String>, items: Vec<&'static str>| map_m(function, items),
//!     2
//! );
//! let strict = parse_all(parse as fn(&str) -> Result<i32, String>);
//!
//! assert_eq!(strict(vec!["1", "2"]), Ok(vec![1, 2]));
//! assert_eq!(strict(vec!["1", "x"]), Error("not a number: x".to_string()));
//! ```
//!
//! # Laws
//!
//! ```text
//! curry!(f, n)(a1)(a2)...(an) == f(a1, a2, ..., an)
//! apply!(c; a1, a2) == c(a1)(a2)
//! ```

mod curry_macro;

// Macros live at the crate root via #[macro_export]
pub use crate::apply;
pub use crate::curry;
