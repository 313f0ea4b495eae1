//! Monad type class - sequencing computations within a context.
//!
//! A `Monad` extends [`Applicative`] with `flat_map` (bind), which lets the
//! next computation depend on the value of the previous one and stops at the
//! first failure-like variant.
//!
//! On top of the trait this module provides three generic folds, written once
//! in terms of `map`, `flat_map` and an explicit `wrap` constructor, and reused
//! by every container:
//!
//! - [`sequence_`]: `[M<A>]` to `M<[A]>`
//! - [`map_m_`]: map with a monadic function, then sequence
//! - [`filter_m_`]: filter with a monadic predicate
//!
//! All three walk their input left to right and stop calling user functions
//! once the accumulated value is failure-like.
//!
//! # Laws
//!
//! ## Left Identity Law
//!
//! ```text
//! Self::pure(a).flat_map(f) == f(a)
//! ```
//!
//! ## Right Identity Law
//!
//! ```text
//! m.flat_map(Self::pure) == m
//! ```
//!
//! ## Associativity Law
//!
//! ```text
//! m.flat_map(f).flat_map(g) == m.flat_map(|x| f(x).flat_map(g))
//! ```
//!
//! # Examples
//!
//! ```rust
//! use lamina::typeclass::{map_m_, sequence_};
//!
//! let all = sequence_(Some, vec![Some(1), Some(2), Some(3)]);
//! assert_eq!(all, Some(vec![1, 2, 3]));
//!
//! let halves = map_m_(Some, |n: i32| (n % 2 == 0).then_some(n / 2), vec![2, 3, 4]);
//! assert_eq!(halves, None);
//! ```

use super::applicative::Applicative;
use super::functor::Functor;
use super::higher::TypeConstructor;

/// A type class for types that support sequencing of computations.
///
/// # Examples
///
/// ```rust
/// use lamina::typeclass::Monad;
///
/// let checked = Monad::flat_map(Some(10), |n: i32| n.checked_div(2));
/// assert_eq!(checked, Some(5));
/// ```
pub trait Monad: Applicative {
    /// Applies `function` to the success value and flattens the result.
    ///
    /// On a failure-like variant the receiver is returned unchanged and
    /// `function` is never invoked.
    fn flat_map<B, F>(self, function: F) -> Self::WithType<B>
    where
        F: FnOnce(Self::Inner) -> Self::WithType<B>;

    /// Alias for `flat_map`, matching the naming of the standard library.
    #[inline]
    fn and_then<B, F>(self, function: F) -> Self::WithType<B>
    where
        Self: Sized,
        F: FnOnce(Self::Inner) -> Self::WithType<B>,
    {
        self.flat_map(function)
    }

    /// Sequences two computations, discarding the value of the first.
    ///
    /// A failure-like receiver still short-circuits and `next` is dropped.
    #[inline]
    fn then<B>(self, next: Self::WithType<B>) -> Self::WithType<B>
    where
        Self: Sized,
    {
        self.flat_map(|_| next)
    }
}

impl<A> Monad for Option<A> {
    #[inline]
    fn flat_map<B, F>(self, function: F) -> Option<B>
    where
        F: FnOnce(A) -> Option<B>,
    {
        Self::and_then(self, function)
    }
}

/// The container `M` re-applied to `Vec<T>`.
type Collected<M, T> = <M as TypeConstructor>::WithType<Vec<T>>;

/// Turns an ordered sequence of containers into a container of a `Vec`.
///
/// The first failure-like element (left to right) becomes the result; on
/// success the values keep their input order. `wrap` lifts the empty
/// accumulator and is usually the success constructor (`Some`, `Ok`).
///
/// # Examples
///
/// ```rust
/// use lamina::typeclass::sequence_;
///
/// assert_eq!(sequence_(Some, vec![Some(1), Some(2)]), Some(vec![1, 2]));
/// assert_eq!(sequence_(Some, vec![Some(1), None]), None);
/// assert_eq!(sequence_(Some, Vec::<Option<u8>>::new()), Some(vec![]));
/// ```
pub fn sequence_<M, W, I>(wrap: W, iterable: I) -> Collected<M, M::Inner>
where
    M: Monad,
    Collected<M, M::Inner>: Monad
        + TypeConstructor<Inner = Vec<M::Inner>, WithType<Vec<M::Inner>> = Collected<M, M::Inner>>,
    W: FnOnce(Vec<M::Inner>) -> Collected<M, M::Inner>,
    I: IntoIterator<Item = M>,
{
    map_m_(wrap, |element: M| element, iterable)
}

/// Maps `function` over `iterable` and sequences the results.
///
/// `function` is applied in order and is not called again once a
/// failure-like value has been produced.
///
/// # Examples
///
/// ```rust
/// use lamina::typeclass::map_m_;
///
/// let parsed = map_m_(Some, |text: &str| text.parse::<i32>().ok(), ["1", "2"]);
/// assert_eq!(parsed, Some(vec![1, 2]));
/// ```
pub fn map_m_<A, M, W, F, I>(wrap: W, mut function: F, iterable: I) -> Collected<M, M::Inner>
where
    M: Monad,
    Collected<M, M::Inner>: Monad
        + TypeConstructor<Inner = Vec<M::Inner>, WithType<Vec<M::Inner>> = Collected<M, M::Inner>>,
    W: FnOnce(Vec<M::Inner>) -> Collected<M, M::Inner>,
    F: FnMut(A) -> M,
    I: IntoIterator<Item = A>,
{
    let mut accumulated = wrap(Vec::new());
    for element in iterable {
        let function = &mut function;
        accumulated = accumulated.flat_map::<Vec<M::Inner>, _>(move |mut values| {
            Functor::map(function(element), move |value| {
                values.push(value);
                values
            })
        });
    }
    accumulated
}

/// Keeps the elements of `iterable` whose monadic predicate is success-and-true.
///
/// The first failure-like predicate result becomes the result and the
/// predicate is not called on later elements.
///
/// # Examples
///
/// ```rust
/// use lamina::typeclass::filter_m_;
///
/// let evens = filter_m_(Some, |n: &i32| Some(n % 2 == 0), vec![1, 2, 3, 4]);
/// assert_eq!(evens, Some(vec![2, 4]));
/// ```
pub fn filter_m_<A, M, W, P, I>(wrap: W, mut predicate: P, iterable: I) -> Collected<M, A>
where
    M: Monad<Inner = bool>,
    Collected<M, A>:
        Monad + TypeConstructor<Inner = Vec<A>, WithType<Vec<A>> = Collected<M, A>>,
    W: FnOnce(Vec<A>) -> Collected<M, A>,
    P: FnMut(&A) -> M,
    I: IntoIterator<Item = A>,
{
    let mut accumulated = wrap(Vec::new());
    for element in iterable {
        let predicate = &mut predicate;
        accumulated = accumulated.flat_map::<Vec<A>, _>(move |mut kept| {
            let verdict = predicate(&element);
            Functor::map(verdict, move |keep| {
                if keep {
                    kept.push(element);
                }
                kept
            })
        });
    }
    accumulated
}
