//! Applicative type class - lifting plain values into a container.
//!
//! Only the `pure` constructor is needed by the monad contract: it is the
//! per-type "wrap" that the generic folds in [`super::monad`] start from.
//!
//! # Laws
//!
//! `pure` must be the success-like variant, so that together with
//! [`Monad::flat_map`](super::Monad::flat_map) it satisfies the identity laws.

use super::functor::Functor;

/// A functor with a canonical way to wrap a plain value.
///
/// # Examples
///
/// ```rust
/// use lamina::typeclass::Applicative;
///
/// let wrapped: Option<i32> = <Option<()>>::pure(42);
/// assert_eq!(wrapped, Some(42));
/// ```
pub trait Applicative: Functor {
    /// Lifts `value` into the success-like variant of this container.
    fn pure<B>(value: B) -> Self::WithType<B>;
}

impl<A> Applicative for Option<A> {
    #[inline]
    fn pure<B>(value: B) -> Option<B> {
        Some(value)
    }
}
