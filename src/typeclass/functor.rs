//! Functor type class - mapping over the success value of a container.
//!
//! # Laws
//!
//! ## Identity Law
//!
//! ```text
//! fa.map(|x| x) == fa
//! ```
//!
//! ## Composition Law
//!
//! ```text
//! fa.map(f).map(g) == fa.map(|x| g(f(x)))
//! ```
//!
//! # Examples
//!
//! ```rust
//! use lamina::typeclass::Functor;
//!
//! fn describe<F: Functor<Inner = i32>>(container: F) -> F::WithType<String> {
//!     container.map(|n| format!("#{n}"))
//! }
//!
//! assert_eq!(describe(Some(5)), Some("#5".to_string()));
//! assert_eq!(describe(None), None);
//! ```

use super::higher::TypeConstructor;

/// A container whose success value can be transformed in place.
///
/// `map` applies the function to the success-like variant and passes every
/// other variant through untouched, without calling the function.
pub trait Functor: TypeConstructor {
    /// Applies `function` to the contained success value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lamina::typeclass::Functor;
    ///
    /// let doubled = Functor::map(Some(21), |n| n * 2);
    /// assert_eq!(doubled, Some(42));
    /// ```
    fn map<B, F>(self, function: F) -> Self::WithType<B>
    where
        F: FnOnce(Self::Inner) -> B;

    /// Replaces the success value with `value`.
    #[inline]
    fn replace<B>(self, value: B) -> Self::WithType<B>
    where
        Self: Sized,
    {
        Functor::map(self, |_| value)
    }

    /// Discards the success value, keeping only the variant.
    #[inline]
    fn void(self) -> Self::WithType<()>
    where
        Self: Sized,
    {
        self.replace(())
    }
}

impl<A> Functor for Option<A> {
    #[inline]
    fn map<B, F>(self, function: F) -> Option<B>
    where
        F: FnOnce(A) -> B,
    {
        Self::map(self, function)
    }
}
