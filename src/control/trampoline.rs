//! Stack-safe recursion via trampolining.
//!
//! This module provides the `Trampoline<A>` type for expressing recursive
//! computations in a stack-safe manner. Instead of using the call stack,
//! recursive steps are represented as data that [`Trampoline::run`] interprets
//! in a loop.
//!
//! # Motivation
//!
//! Rust does not guarantee tail call optimization (TCO), so deeply recursive
//! functions can overflow the stack. A trampoline describes the recursion with
//! three node kinds and evaluates it with an explicit, heap-allocated
//! continuation stack:
//!
//! - `Done(v)`: pop the next continuation and feed it `v`, or finish with `v`
//! - `Call(thunk)`: replace the current node with `thunk()`
//! - `AndThen(inner, cont)`: push `cont` and continue with `inner`
//!
//! The native stack depth of `run` is constant no matter how deeply binds are
//! nested, in either direction.
//!
//! # Restartability
//!
//! A trampoline only describes a computation. Nodes are shared behind `Rc`,
//! thunks and continuations are `Fn`, and `run` borrows the value, so the same
//! trampoline can be run any number of times. Values flowing through a
//! trampoline are therefore required to be `Clone + 'static`. Only values
//! held by shared nodes are cloned during a run; intermediate results built
//! by thunks and continuations are moved.
//!
//! # Dropping
//!
//! Dropping a trampoline is iterative as well, whether its nodes are nested
//! through `inner` or captured by continuations and thunks.
//!
//! # Examples
//!
//! ## Factorial
//!
//! ```rust
//! use lamina::control::Trampoline;
//!
//! fn factorial(n: u64) -> Trampoline<u64> {
//!     factorial_helper(n, 1)
//! }
//!
//! fn factorial_helper(n: u64, accumulator: u64) -> Trampoline<u64> {
//!     if n <= 1 {
//!         Trampoline::done(accumulator)
//!     } else {
//!         Trampoline::call(move || factorial_helper(n - 1, n * accumulator))
//!     }
//! }
//!
//! assert_eq!(factorial(20).run(), 2_432_902_008_176_640_000);
//! ```
//!
//! ## Non-tail recursion
//!
//! ```rust
//! use lamina::control::Trampoline;
//!
//! fn sum_to(n: u64) -> Trampoline<u64> {
//!     if n == 0 {
//!         Trampoline::done(0)
//!     } else {
//!         Trampoline::call(move || sum_to(n - 1)).map(move |sum| sum + n)
//!     }
//! }
//!
//! assert_eq!(sum_to(100_000).run(), 5_000_050_000);
//! ```

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::rc::Rc;

use smallvec::SmallVec;

/// Continuations kept inline before the stack spills to the heap.
const CONTINUATION_INLINE_CAPACITY: usize = 16;

/// A data structure for stack-safe recursion.
///
/// `Trampoline<A>` describes a potentially recursive computation producing an
/// `A`. Nothing is evaluated until [`run`](Trampoline::run) is called.
///
/// # Laws
///
/// `Trampoline` forms a monad and satisfies:
///
/// - **Left Identity**: `Trampoline::done(a).and_then(f).run() == f(a).run()`
/// - **Right Identity**: `m.and_then(Trampoline::done).run() == m.run()`
/// - **Associativity**: `m.and_then(f).and_then(g).run() == m.and_then(|x| f(x).and_then(g)).run()`
///
/// # Note
///
/// This type does not implement [`Monad`](crate::typeclass::Monad): its
/// closures must be `'static` and `Fn`, which the trait cannot demand of
/// every container. The same operations are provided as inherent methods.
///
/// # Examples
///
/// ```rust
/// use lamina::control::Trampoline;
///
/// let trampoline = Trampoline::call(|| Trampoline::done(21)).map(|x| x * 2);
/// assert_eq!(trampoline.run(), 42);
/// // Running again evaluates the same description again.
/// assert_eq!(trampoline.run(), 42);
/// ```
pub enum Trampoline<A> {
    /// The computation has completed with value `A`.
    Done(A),
    /// A deferred step; forcing the [`Thunk`] yields the next trampoline.
    ///
    /// Built through [`Trampoline::call`].
    Call(Thunk<A>),
    /// Sequential composition of an inner trampoline and a continuation.
    ///
    /// The intermediate type is hidden inside [`Bind`], which can only be
    /// built through [`Trampoline::bind`] and [`Trampoline::and_then`].
    AndThen(Bind<A>),
}

/// The `(inner, continuation)` pair of an [`Trampoline::AndThen`] node.
///
/// The type of the value passed from `inner` to the continuation is erased;
/// only the final result type `A` is visible.
pub struct Bind<A> {
    node: Rc<BindNode>,
    _result: PhantomData<fn() -> A>,
}

/// The deferred step of a [`Trampoline::Call`] node.
pub struct Thunk<A> {
    delay: Rc<dyn Force>,
    _result: PhantomData<fn() -> A>,
}

impl<A> Trampoline<A> {
    /// Creates a completed trampoline with the given value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lamina::control::Trampoline;
    ///
    /// assert_eq!(Trampoline::done(42).run(), 42);
    /// ```
    #[inline]
    pub const fn done(value: A) -> Self {
        Self::Done(value)
    }

    /// Alias for `done`. Lifts a value into the trampoline context.
    #[inline]
    pub const fn pure(value: A) -> Self {
        Self::done(value)
    }

    /// Returns `true` if this trampoline is already a `Done` node.
    #[inline]
    pub const fn is_done(&self) -> bool {
        matches!(self, Self::Done(_))
    }
}

impl<A: Clone + 'static> Trampoline<A> {
    /// Creates a deferred step that continues with `thunk()`.
    ///
    /// The thunk is not evaluated until `run()` is called, and is evaluated
    /// once per run.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lamina::control::Trampoline;
    ///
    /// let trampoline = Trampoline::call(|| Trampoline::done(42));
    /// assert_eq!(trampoline.run(), 42);
    /// ```
    #[inline]
    pub fn call<F>(thunk: F) -> Self
    where
        F: Fn() -> Self + 'static,
    {
        Self::Call(Thunk {
            delay: Rc::new(Delay {
                function: thunk,
                _result: PhantomData,
            }),
            _result: PhantomData,
        })
    }

    /// Alias for `call`.
    #[inline]
    pub fn suspend<F>(thunk: F) -> Self
    where
        F: Fn() -> Self + 'static,
    {
        Self::call(thunk)
    }

    /// Builds an `AndThen` node: run `inner`, then feed its result to
    /// `continuation`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lamina::control::Trampoline;
    ///
    /// let length = Trampoline::bind(Trampoline::done("four"), |text: &str| {
    ///     Trampoline::done(text.len())
    /// });
    /// assert_eq!(length.run(), 4);
    /// ```
    pub fn bind<X, F>(inner: Trampoline<X>, continuation: F) -> Self
    where
        X: Clone + 'static,
        F: Fn(X) -> Self + 'static,
    {
        Self::AndThen(Bind {
            node: Rc::new(BindNode {
                inner: Rc::new(inner),
                continuation: Rc::new(Resume {
                    function: continuation,
                    _types: PhantomData,
                }),
            }),
            _result: PhantomData,
        })
    }

    /// Runs the trampoline to completion and returns the final value.
    ///
    /// Binds are unwound with an explicit continuation stack, so the native
    /// stack does not grow with the depth of the computation. Panics raised
    /// by thunks or continuations propagate to the caller unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lamina::control::Trampoline;
    ///
    /// fn count_down(n: u64) -> Trampoline<u64> {
    ///     if n == 0 {
    ///         Trampoline::done(0)
    ///     } else {
    ///         Trampoline::call(move || count_down(n - 1))
    ///     }
    /// }
    ///
    /// // This would overflow the stack with regular recursion
    /// assert_eq!(count_down(100_000).run(), 0);
    /// ```
    pub fn run(&self) -> A {
        if let Self::Done(value) = self {
            return value.clone();
        }

        let mut continuations: SmallVec<[Rc<dyn Continuation>; CONTINUATION_INLINE_CAPACITY]> =
            SmallVec::new();
        #[cfg(feature = "tracing")]
        let (mut steps, mut peak_depth) = (0_usize, 0_usize);

        let mut step = self.step();
        loop {
            #[cfg(feature = "tracing")]
            {
                steps += 1;
            }
            step = match step {
                Step::Done(value) => match continuations.pop() {
                    Some(continuation) => continuation.resume(value).into_step(),
                    None => {
                        #[cfg(feature = "tracing")]
                        tracing::trace!(steps, peak_depth, "trampoline finished");
                        return *value
                            .downcast::<A>()
                            .expect("Type mismatch in trampoline result");
                    }
                },
                Step::Next(next) => next.into_step(),
                Step::Push(inner, continuation) => {
                    continuations.push(continuation);
                    #[cfg(feature = "tracing")]
                    {
                        peak_depth = peak_depth.max(continuations.len());
                    }
                    inner.step()
                }
            };
        }
    }

    /// Applies a function to the result of the trampoline.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lamina::control::Trampoline;
    ///
    /// let doubled = Trampoline::done(21).map(|x| x * 2);
    /// assert_eq!(doubled.run(), 42);
    /// ```
    pub fn map<B, F>(self, function: F) -> Trampoline<B>
    where
        F: Fn(A) -> B + 'static,
        B: Clone + 'static,
    {
        self.and_then(move |value| Trampoline::Done(function(value)))
    }

    /// Sequential composition: continue with `function` applied to the
    /// result. Builds an `AndThen` node.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lamina::control::Trampoline;
    ///
    /// let result = Trampoline::done(21).and_then(|x| Trampoline::done(x * 2));
    /// assert_eq!(result.run(), 42);
    /// ```
    #[inline]
    pub fn and_then<B, F>(self, function: F) -> Trampoline<B>
    where
        F: Fn(A) -> Trampoline<B> + 'static,
        B: Clone + 'static,
    {
        Trampoline::bind(self, function)
    }

    /// Alias for `and_then`.
    #[inline]
    pub fn flat_map<B, F>(self, function: F) -> Trampoline<B>
    where
        F: Fn(A) -> Trampoline<B> + 'static,
        B: Clone + 'static,
    {
        self.and_then(function)
    }

    /// Sequences two trampolines, discarding the result of the first.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lamina::control::Trampoline;
    ///
    /// let result = Trampoline::done("ignored").then(Trampoline::done(42));
    /// assert_eq!(result.run(), 42);
    /// ```
    #[inline]
    pub fn then<B: Clone + 'static>(self, next: Trampoline<B>) -> Trampoline<B> {
        self.and_then(move |_| next.clone())
    }
}

// =============================================================================
// Type-erased evaluation
// =============================================================================

/// A trampoline with its result type erased, as seen by `run`.
trait Erased {
    /// Steps a node that may be shared; a `Done` value is cloned.
    fn step(&self) -> Step;

    /// Steps a node `run` owns outright; a `Done` value is moved.
    fn into_step(self: Box<Self>) -> Step;
}

/// A continuation with its input and output types erased.
trait Continuation {
    /// # Panics
    ///
    /// Panics if `input` is not of the type the continuation was built for,
    /// which would indicate a bug in this module.
    fn resume(&self, input: Box<dyn Any>) -> Box<dyn Erased>;
}

/// A thunk with its result type erased.
trait Force {
    fn force(&self) -> Box<dyn Erased>;
}

enum Step {
    Done(Box<dyn Any>),
    Next(Box<dyn Erased>),
    Push(Rc<dyn Erased>, Rc<dyn Continuation>),
}

impl<A: Clone + 'static> Erased for Trampoline<A> {
    fn step(&self) -> Step {
        match self {
            Self::Done(value) => Step::Done(Box::new(value.clone())),
            Self::Call(thunk) => Step::Next(thunk.delay.force()),
            Self::AndThen(bind) => bind.push(),
        }
    }

    fn into_step(self: Box<Self>) -> Step {
        match *self {
            Self::Done(value) => Step::Done(Box::new(value)),
            Self::Call(thunk) => Step::Next(thunk.delay.force()),
            Self::AndThen(bind) => bind.push(),
        }
    }
}

struct BindNode {
    inner: Rc<dyn Erased>,
    continuation: Rc<dyn Continuation>,
}

impl<A> Bind<A> {
    fn push(&self) -> Step {
        Step::Push(
            Rc::clone(&self.node.inner),
            Rc::clone(&self.node.continuation),
        )
    }
}

struct Delay<A, F> {
    function: F,
    _result: PhantomData<fn() -> A>,
}

impl<A, F> Force for Delay<A, F>
where
    A: Clone + 'static,
    F: Fn() -> Trampoline<A>,
{
    fn force(&self) -> Box<dyn Erased> {
        Box::new((self.function)())
    }
}

// =============================================================================
// Iterative drop
// =============================================================================

// Trampolines reach each other through `inner`, through captured state of
// continuations and thunks, or any mix of these. Releasing the last handle
// to a node swaps in a shared placeholder and queues the node; only the
// outermost release drains the queue, so native drop depth stays bounded.

thread_local! {
    static DROP_QUEUE: DropQueue = DropQueue::new();
}

struct DropQueue {
    draining: Cell<bool>,
    pending: RefCell<Vec<Released>>,
    detached_bind: Rc<BindNode>,
    detached_thunk: Rc<dyn Force>,
}

enum Released {
    Bind(Rc<BindNode>),
    Thunk(Rc<dyn Force>),
}

struct Draining<'a>(&'a Cell<bool>);

impl Drop for Draining<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl DropQueue {
    fn new() -> Self {
        Self {
            draining: Cell::new(false),
            pending: RefCell::new(Vec::new()),
            detached_bind: Rc::new(BindNode {
                inner: Rc::new(Trampoline::Done(())),
                continuation: Rc::new(Resume::<(), (), _> {
                    function: Trampoline::<()>::done,
                    _types: PhantomData,
                }),
            }),
            detached_thunk: Rc::new(Delay::<(), _> {
                function: || Trampoline::Done(()),
                _result: PhantomData,
            }),
        }
    }

    fn release(&self, released: Released) {
        self.pending.borrow_mut().push(released);
        if self.draining.replace(true) {
            return;
        }
        let _draining = Draining(&self.draining);
        loop {
            let next = self.pending.borrow_mut().pop();
            match next {
                Some(Released::Bind(node)) => drop(node),
                Some(Released::Thunk(delay)) => drop(delay),
                None => break,
            }
        }
    }
}

impl<A> Drop for Bind<A> {
    fn drop(&mut self) {
        if Rc::strong_count(&self.node) == 1 {
            // Fails only during thread teardown, where the node drops in place.
            let _ = DROP_QUEUE.try_with(|queue| {
                let node = mem::replace(&mut self.node, Rc::clone(&queue.detached_bind));
                queue.release(Released::Bind(node));
            });
        }
    }
}

impl<A> Drop for Thunk<A> {
    fn drop(&mut self) {
        if Rc::strong_count(&self.delay) == 1 {
            let _ = DROP_QUEUE.try_with(|queue| {
                let delay = mem::replace(&mut self.delay, Rc::clone(&queue.detached_thunk));
                queue.release(Released::Thunk(delay));
            });
        }
    }
}

struct Resume<X, A, F> {
    function: F,
    _types: PhantomData<fn(X) -> A>,
}

impl<X, A, F> Continuation for Resume<X, A, F>
where
    X: 'static,
    A: Clone + 'static,
    F: Fn(X) -> Trampoline<A>,
{
    fn resume(&self, input: Box<dyn Any>) -> Box<dyn Erased> {
        let value = *input
            .downcast::<X>()
            .expect("Type mismatch in continuation application");
        Box::new((self.function)(value))
    }
}

// =============================================================================
// Standard traits
// =============================================================================

impl<A: Clone> Clone for Trampoline<A> {
    fn clone(&self) -> Self {
        match self {
            Self::Done(value) => Self::Done(value.clone()),
            Self::Call(thunk) => Self::Call(thunk.clone()),
            Self::AndThen(bind) => Self::AndThen(bind.clone()),
        }
    }
}

impl<A> Clone for Thunk<A> {
    fn clone(&self) -> Self {
        Self {
            delay: Rc::clone(&self.delay),
            _result: PhantomData,
        }
    }
}

impl<A> Clone for Bind<A> {
    fn clone(&self) -> Self {
        Self {
            node: Rc::clone(&self.node),
            _result: PhantomData,
        }
    }
}

impl<A: fmt::Debug> fmt::Debug for Trampoline<A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Done(value) => formatter.debug_tuple("Done").field(value).finish(),
            Self::Call(thunk) => formatter.debug_tuple("Call").field(thunk).finish(),
            Self::AndThen(bind) => formatter.debug_tuple("AndThen").field(bind).finish(),
        }
    }
}

impl<A> fmt::Debug for Thunk<A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("<thunk>")
    }
}

impl<A> fmt::Debug for Bind<A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("<continuation>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::cell::Cell;

    #[rstest]
    fn test_trampoline_done() {
        let trampoline = Trampoline::done(42);
        assert!(trampoline.is_done());
        assert_eq!(trampoline.run(), 42);
    }

    #[rstest]
    fn test_trampoline_call() {
        let trampoline = Trampoline::call(|| Trampoline::done(42));
        assert!(!trampoline.is_done());
        assert_eq!(trampoline.run(), 42);
    }

    #[rstest]
    fn test_trampoline_map() {
        let doubled = Trampoline::done(21).map(|x| x * 2);
        assert_eq!(doubled.run(), 42);
    }

    #[rstest]
    fn test_trampoline_bind_changes_type() {
        let trampoline = Trampoline::bind(Trampoline::done(3_u8), |n| {
            Trampoline::done("x".repeat(usize::from(n)))
        });
        assert_eq!(trampoline.run(), "xxx");
    }

    #[rstest]
    fn test_trampoline_nested_and_then_on_the_left() {
        let inner = Trampoline::done(1).and_then(|x| Trampoline::done(x + 1));
        let outer = inner
            .and_then(|x| Trampoline::done(x * 10))
            .and_then(|x| Trampoline::call(move || Trampoline::done(x + 5)));
        assert_eq!(outer.run(), 25);
    }

    #[rstest]
    fn test_trampoline_thunk_runs_once_per_run() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let trampoline = Trampoline::call(move || {
            counter.set(counter.get() + 1);
            Trampoline::done(7)
        });

        assert_eq!(calls.get(), 0);
        assert_eq!(trampoline.run(), 7);
        assert_eq!(calls.get(), 1);
        assert_eq!(trampoline.run(), 7);
        assert_eq!(calls.get(), 2);
    }

    #[rstest]
    fn test_trampoline_factorial() {
        fn factorial(n: u64) -> Trampoline<u64> {
            factorial_helper(n, 1)
        }

        fn factorial_helper(n: u64, accumulator: u64) -> Trampoline<u64> {
            if n <= 1 {
                Trampoline::done(accumulator)
            } else {
                Trampoline::call(move || factorial_helper(n - 1, n * accumulator))
            }
        }

        assert_eq!(factorial(0).run(), 1);
        assert_eq!(factorial(5).run(), 120);
        assert_eq!(factorial(10).run(), 3_628_800);
    }

    #[rstest]
    fn test_trampoline_deep_left_nested_chain_runs_and_drops() {
        let mut trampoline = Trampoline::done(0_u64);
        for _ in 0..100_000 {
            trampoline = trampoline.and_then(|x| Trampoline::done(x + 1));
        }
        assert_eq!(trampoline.run(), 100_000);
        drop(trampoline);
    }

    #[rstest]
    fn test_trampoline_dropping_a_clone_keeps_shared_nodes() {
        let shared = Trampoline::done(1).and_then(|x| Trampoline::done(x + 1));
        let first = shared.clone().map(|x| x * 2);
        drop(first);
        assert_eq!(shared.run(), 2);
    }

    #[rstest]
    fn test_trampoline_chain_captured_by_continuations_drops() {
        let mut trampoline = Trampoline::done(0_u64);
        for _ in 0..100_000 {
            let previous = trampoline;
            trampoline = Trampoline::done(0).and_then(move |_: u64| previous.clone());
        }
        assert_eq!(trampoline.run(), 0);
        drop(trampoline);
    }

    #[rstest]
    fn test_trampoline_chain_captured_by_thunks_drops() {
        let mut trampoline = Trampoline::done(7_u64);
        for _ in 0..100_000 {
            let previous = trampoline;
            trampoline = Trampoline::call(move || previous.clone());
        }
        assert_eq!(trampoline.run(), 7);
        drop(trampoline);
    }

    #[rstest]
    fn test_trampoline_owned_done_values_are_moved() {
        #[derive(Debug)]
        struct CountedClone(Rc<Cell<usize>>);

        impl Clone for CountedClone {
            fn clone(&self) -> Self {
                self.0.set(self.0.get() + 1);
                Self(Rc::clone(&self.0))
            }
        }

        let clones = Rc::new(Cell::new(0));
        let counter = Rc::clone(&clones);
        let trampoline = Trampoline::call(move || Trampoline::done(CountedClone(Rc::clone(&counter))))
            .map(|value| value)
            .and_then(Trampoline::done);

        let _ = trampoline.run();
        assert_eq!(clones.get(), 0);
    }

    #[rstest]
    fn test_trampoline_debug() {
        assert_eq!(format!("{:?}", Trampoline::done(1)), "Done(1)");
        assert_eq!(
            format!("{:?}", Trampoline::call(|| Trampoline::done(1))),
            "Call(<thunk>)"
        );
        assert_eq!(
            format!("{:?}", Trampoline::done(1).map(|x| x)),
            "AndThen(<continuation>)"
        );
    }
}
