//! Result container - a computation that either succeeded or failed.
//!
//! [`Result<A, B>`] is the canonical instance of the monad contract: `Ok`
//! carries a success value of type `A`, `Error` an opaque failure payload of
//! type `B` that the library never inspects. `map` and `and_then` act on `Ok`
//! and pass `Error` through untouched.
//!
//! The variants are re-exported at module level, so `use lamina::result::{Ok,
//! Error}` shadows the standard prelude names in the importing module.
//!
//! Panics are the only exceptional channel. [`result`] and [`Result::catch`]
//! are the single place where a panic is caught and turned into
//! `Error(Panic)`; everywhere else failures travel as `Error` values.
//!
//! # Examples
//!
//! ```rust
//! use lamina::result::{Error, Ok, Result};
//!
//! fn reciprocal(value: f64) -> Result<f64, String> {
//!     if value == 0.0 {
//!         Error("division by zero".to_string())
//!     } else {
//!         Ok(1.0 / value)
//!     }
//! }
//!
//! assert_eq!(Ok(4.0).and_then(reciprocal), Ok(0.25));
//! assert_eq!(Ok(0.0).and_then(reciprocal), Error("division by zero".to_string()));
//! assert_eq!(Ok::<f64, String>(0.0).and_then(reciprocal).or_else(-1.0), -1.0);
//! ```

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use crate::typeclass::{
    Applicative, Functor, Monad, TypeConstructor, filter_m_, map_m_, sequence_,
};

pub use self::Result::{Error, Ok};

/// A computation that either produced an `A` or failed with a `B`.
///
/// Equality is structural and variant-aware: `Ok(x) != Error(x)` even when
/// both payloads have the same type and value.
///
/// # Examples
///
/// ```rust
/// use lamina::result::{Error, Ok, Result};
///
/// let success: Result<i32, &str> = Ok(1);
/// let failure: Result<i32, &str> = Error("whoops");
///
/// assert!(success.is_ok());
/// assert!(!bool::from(&failure));
/// assert_eq!(success.map(|n| n + 1), Ok(2));
/// assert_eq!(failure.map(|n| n + 1), Error("whoops"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use = "this `Result` may be an `Error` variant, which should be handled"]
pub enum Result<A, B> {
    /// A successful computation.
    Ok(A),
    /// A failed computation.
    Error(B),
}

impl<A, B> Result<A, B> {
    /// Returns `true` for `Ok`.
    ///
    /// This is the boolean coercion of a result; `bool::from(&result)` is
    /// equivalent.
    #[inline]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Ok(_))
    }

    /// Returns `true` for `Error`.
    #[inline]
    pub const fn is_error(&self) -> bool {
        !self.is_ok()
    }

    /// Maps the success value, leaving an `Error` untouched.
    ///
    /// `function` is never invoked on `Error`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lamina::result::{Error, Ok, Result};
    ///
    /// assert_eq!(Ok::<i32, ()>(1).map(|n| n.to_string()), Ok("1".to_string()));
    /// assert_eq!(Error::<i32, ()>(()).map(|n| n.to_string()), Error(()));
    /// ```
    #[inline]
    pub fn map<C, F>(self, function: F) -> Result<C, B>
    where
        F: FnOnce(A) -> C,
    {
        match self {
            Ok(value) => Ok(function(value)),
            Error(error) => Error(error),
        }
    }

    /// Maps the failure payload, leaving an `Ok` untouched.
    #[inline]
    pub fn map_error<C, F>(self, function: F) -> Result<A, C>
    where
        F: FnOnce(B) -> C,
    {
        match self {
            Ok(value) => Ok(value),
            Error(error) => Error(function(error)),
        }
    }

    /// Chains a computation that may itself fail.
    ///
    /// On `Ok(a)` this returns `function(a)`; on `Error` it returns the
    /// error without invoking `function`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lamina::result::{Error, Ok, Result};
    ///
    /// let inverse = |i: i32| if i != 0 { Ok(1.0 / f64::from(i)) } else { Error("i was 0") };
    ///
    /// assert_eq!(Ok(2).and_then(inverse), Ok(0.5));
    /// assert_eq!(Ok(0).and_then(inverse), Error("i was 0"));
    /// ```
    #[inline]
    pub fn and_then<C, F>(self, function: F) -> Result<C, B>
    where
        F: FnOnce(A) -> Result<C, B>,
    {
        match self {
            Ok(value) => function(value),
            Error(error) => Error(error),
        }
    }

    /// Returns the success value, or `default` if the computation failed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lamina::result::{Error, Ok, Result};
    ///
    /// assert_eq!(Ok::<i32, &str>(1).or_else(2), 1);
    /// assert_eq!(Error::<i32, &str>("failed").or_else(2), 2);
    /// ```
    #[inline]
    pub fn or_else(self, default: A) -> A {
        match self {
            Ok(value) => value,
            Error(_) => default,
        }
    }

    /// Converts into an `Option` of the success value.
    #[inline]
    pub fn ok(self) -> Option<A> {
        match self {
            Ok(value) => Some(value),
            Error(_) => None,
        }
    }

    /// Converts into an `Option` of the failure payload.
    #[inline]
    pub fn error(self) -> Option<B> {
        match self {
            Ok(_) => None,
            Error(error) => Some(error),
        }
    }

    /// Borrows both payloads.
    #[inline]
    pub const fn as_ref(&self) -> Result<&A, &B> {
        match self {
            Ok(value) => Ok(value),
            Error(error) => Error(error),
        }
    }

    /// Converts into the standard library result, so `?` can be used on it.
    #[inline]
    pub fn into_std(self) -> std::result::Result<A, B> {
        self.into()
    }
}

impl<A> Result<A, Panic> {
    /// Runs `thunk`, turning a panic into `Error(Panic)`.
    ///
    /// The panic hook still runs, so the usual panic message is printed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lamina::result::{Ok, Result};
    ///
    /// assert_eq!(Result::catch(|| 6 * 7), Ok(42));
    ///
    /// let failed = Result::<i32, _>::catch(|| panic!("boom"));
    /// assert_eq!(failed.error().map(|panic| panic.message().to_string()), Some("boom".to_string()));
    /// ```
    pub fn catch<F>(thunk: F) -> Self
    where
        F: FnOnce() -> A,
    {
        panic::catch_unwind(AssertUnwindSafe(thunk))
            .map_err(|payload| {
                let panic = Panic::from_payload(&*payload);
                #[cfg(feature = "tracing")]
                tracing::debug!(panic_message = panic.message(), "converted panic into Result::Error");
                panic
            })
            .into()
    }
}

impl<A, B> From<std::result::Result<A, B>> for Result<A, B> {
    #[inline]
    fn from(result: std::result::Result<A, B>) -> Self {
        match result {
            std::result::Result::Ok(value) => Ok(value),
            std::result::Result::Err(error) => Error(error),
        }
    }
}

impl<A, B> From<Result<A, B>> for std::result::Result<A, B> {
    #[inline]
    fn from(result: Result<A, B>) -> Self {
        match result {
            Ok(value) => Self::Ok(value),
            Error(error) => Self::Err(error),
        }
    }
}

impl<A, B> From<&Result<A, B>> for bool {
    #[inline]
    fn from(result: &Result<A, B>) -> Self {
        result.is_ok()
    }
}

impl<A, B> From<Result<A, B>> for bool {
    #[inline]
    fn from(result: Result<A, B>) -> Self {
        result.is_ok()
    }
}

/// Renders the constructor form with the payload in its `Debug` form, so
/// strings are quoted: `Ok(1)`, `Error("boom")`.
impl<A: fmt::Debug, B: fmt::Debug> fmt::Display for Result<A, B> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ok(value) => write!(formatter, "Ok({value:?})"),
            Error(error) => write!(formatter, "Error({error:?})"),
        }
    }
}

// =============================================================================
// Monad contract
// =============================================================================

impl<A, B> TypeConstructor for Result<A, B> {
    type Inner = A;
    type WithType<C> = Result<C, B>;
}

impl<A, B> Functor for Result<A, B> {
    #[inline]
    fn map<C, F>(self, function: F) -> Result<C, B>
    where
        F: FnOnce(A) -> C,
    {
        Self::map(self, function)
    }
}

impl<A, B> Applicative for Result<A, B> {
    #[inline]
    fn pure<C>(value: C) -> Result<C, B> {
        Ok(value)
    }
}

impl<A, B> Monad for Result<A, B> {
    #[inline]
    fn flat_map<C, F>(self, function: F) -> Result<C, B>
    where
        F: FnOnce(A) -> Result<C, B>,
    {
        Self::and_then(self, function)
    }
}

// =============================================================================
// Sequence helpers
// =============================================================================

/// Collects a sequence of results into a result of a `Vec`.
///
/// # Examples
///
/// ```rust
/// use lamina::result::{Error, Ok, sequence};
///
/// assert_eq!(sequence(vec![Ok::<_, &str>(1), Ok(2), Ok(3)]), Ok(vec![1, 2, 3]));
/// assert_eq!(sequence(vec![Ok(1), Error("e"), Ok(3)]), Error("e"));
/// ```
pub fn sequence<A, B, I>(iterable: I) -> Result<Vec<A>, B>
where
    I: IntoIterator<Item = Result<A, B>>,
{
    sequence_(Ok, iterable)
}

/// Applies a fallible `function` to every element, stopping at the first error.
///
/// # Examples
///
/// ```rust
/// use lamina::result::{Error, Ok, map_m};
///
/// let double = |i: i32| if i != 0 { Ok(i * 2) } else { Error("zero") };
///
/// assert_eq!(map_m(double, vec![1, 2, 3]), Ok(vec![2, 4, 6]));
/// assert_eq!(map_m(double, vec![1, 0, 3]), Error("zero"));
/// ```
pub fn map_m<A, B, C, F, I>(function: F, iterable: I) -> Result<Vec<B>, C>
where
    F: FnMut(A) -> Result<B, C>,
    I: IntoIterator<Item = A>,
{
    map_m_(Ok, function, iterable)
}

/// Keeps the elements whose fallible predicate returned `Ok(true)`.
///
/// # Examples
///
/// ```rust
/// use lamina::result::{Ok, Result, filter_m};
///
/// let even = |i: &i32| -> Result<bool, ()> { Ok(i % 2 == 0) };
/// assert_eq!(filter_m(even, vec![1, 2, 3, 4]), Ok(vec![2, 4]));
/// ```
pub fn filter_m<A, B, P, I>(predicate: P, iterable: I) -> Result<Vec<A>, B>
where
    P: FnMut(&A) -> Result<bool, B>,
    I: IntoIterator<Item = A>,
{
    filter_m_(Ok, predicate, iterable)
}

// =============================================================================
// Panic boundary
// =============================================================================

/// Wraps a function that may panic into one that returns a [`Result`].
///
/// A normal return becomes `Ok`, a panic becomes `Error(Panic)` and is not
/// re-raised. Functions of several arguments can be adapted by taking a tuple.
///
/// # Examples
///
/// ```rust
/// use lamina::result::{Ok, result};
///
/// let to_int = result(|text: &str| text.parse::<i32>().expect("not a number"));
///
/// assert_eq!(to_int("1"), Ok(1));
/// assert!(to_int("whoops").is_error());
/// ```
pub fn result<A, B, F>(function: F) -> impl Fn(A) -> Result<B, Panic>
where
    F: Fn(A) -> B,
{
    move |argument| Result::catch(|| function(argument))
}

/// The payload of a panic caught by [`result`] or [`Result::catch`].
///
/// Only the panic message is kept; payloads that are neither `&str` nor
/// `String` are described generically.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Panic {
    message: String,
}

impl Panic {
    /// Creates a panic description with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The message the panic was raised with.
    pub fn message(&self) -> &str {
        &self.message
    }

    fn from_payload(payload: &(dyn Any + Send)) -> Self {
        if let Some(message) = payload.downcast_ref::<&'static str>() {
            Self::new(*message)
        } else if let Some(message) = payload.downcast_ref::<String>() {
            Self::new(message.clone())
        } else {
            Self::new("panic with a non-string payload")
        }
    }
}

impl fmt::Display for Panic {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "panicked: {}", self.message)
    }
}

impl std::error::Error for Panic {}
