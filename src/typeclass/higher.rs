//! Higher-kinded type emulation through generic associated types.
//!
//! Rust cannot abstract over a type constructor such as `Option<_>` directly.
//! [`TypeConstructor`] names the argument a container is currently applied to
//! (`Inner`) and lets generic code re-apply the same constructor to another
//! type (`WithType<B>`). Every trait of the monad contract builds on it.
//!
//! # Example
//!
//! ```rust
//! use lamina::typeclass::TypeConstructor;
//!
//! fn empty_like<T: TypeConstructor>(_value: T) -> T::WithType<String>
//! where
//!     T::WithType<String>: Default,
//! {
//!     Default::default()
//! }
//!
//! let none: Option<String> = empty_like(Some(42));
//! assert_eq!(none, None);
//! ```

/// A type constructor applied to some type `Inner`.
///
/// # Laws
///
/// For any `F: TypeConstructor`, `<F as TypeConstructor>::WithType<F::Inner>`
/// must be the same type as `F`.
pub trait TypeConstructor {
    /// The type this constructor is currently applied to.
    ///
    /// For `Option<i32>` this is `i32`.
    type Inner;

    /// The same constructor applied to `B`.
    ///
    /// For `Option<i32>`, `WithType<String>` is `Option<String>`. Error-like
    /// parameters (the `B` of `Result<A, B>`) are carried over unchanged.
    type WithType<B>: TypeConstructor<Inner = B>;
}

impl<A> TypeConstructor for Option<A> {
    type Inner = A;
    type WithType<B> = Option<B>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_inner_type_is_correct() {
        fn assert_inner<T: TypeConstructor<Inner = i32>>() {}
        assert_inner::<Option<i32>>();
    }

    #[test]
    fn option_with_type_keeps_the_constructor() {
        fn rewrap<T: TypeConstructor>(_value: T) -> T::WithType<String>
        where
            T::WithType<String>: Default,
        {
            Default::default()
        }

        let rewrapped: Option<String> = rewrap(Some(42));
        assert_eq!(rewrapped, None);
    }

    #[test]
    fn with_type_is_again_a_type_constructor() {
        fn assert_inner<T: TypeConstructor<Inner = Vec<u8>>>() {}
        assert_inner::<<Option<i32> as TypeConstructor>::WithType<Vec<u8>>>();
    }
}
