//! Currying macros: `curry!` and `apply!`.
//!
//! `curry!(function, N)` turns an `N`-ary function or closure into `N` nested
//! single-argument closures. The wrapped function runs only once the last
//! argument arrives, and always receives the arguments in order.
//!
//! Every intermediate closure implements `Fn`. Arguments captured so far are
//! shared through `Rc` and cloned on the final call, so any partial
//! application can be applied again with different remaining arguments.

/// Converts a function taking `N` arguments (`1..=6`) into curried form.
///
/// # Type Requirements
///
/// - The function must implement [`Fn`]
/// - Argument types (except the last) must implement [`Clone`]
///
/// # Examples
///
/// ## Basic currying
///
/// ```
/// use lamina::curry;
///
/// fn add_three(first: i32, second: i32, third: i32) -> i32 {
///     first + second + third
/// }
///
/// let curried = curry!(add_three, 3);
/// assert_eq!(curried(1)(2)(3), 6);
/// ```
///
/// ## Reusing partial applications
///
/// ```
/// use lamina::curry;
///
/// let greet = curry!(|greeting: String, name: &str| format!("{greeting}, {name}"), 2);
/// let hello = greet("Hello".to_string());
///
/// assert_eq!(hello("Ada"), "Hello, Ada");
/// assert_eq!(hello("Alan"), "Hello, Alan");
/// ```
#[macro_export]
macro_rules! curry {
    (@nest $function:expr; $($parameter:ident),+) => {{
        let function = ::std::rc::Rc::new($function);
        $crate::curry!(@step function; ; $($parameter),+)
    }};
    (@step $function:ident; $($bound:ident),*; $last:ident) => {
        move |$last| {
            $function(
                $(::std::rc::Rc::unwrap_or_clone(::std::rc::Rc::clone(&$bound)),)*
                $last,
            )
        }
    };
    (@step $function:ident; $($bound:ident),*; $next:ident, $($rest:ident),+) => {
        move |$next| {
            let $function = ::std::rc::Rc::clone(&$function);
            $(let $bound = ::std::rc::Rc::clone(&$bound);)*
            let $next = ::std::rc::Rc::new($next);
            $crate::curry!(@step $function; $($bound,)* $next; $($rest),+)
        }
    };
    ($function:expr, 1 $(,)?) => {{
        let function = $function;
        move |arg1| function(arg1)
    }};
    ($function:expr, 2 $(,)?) => {
        $crate::curry!(@nest $function; arg1, arg2)
    };
    ($function:expr, 3 $(,)?) => {
        $crate::curry!(@nest $function; arg1, arg2, arg3)
    };
    ($function:expr, 4 $(,)?) => {
        $crate::curry!(@nest $function; arg1, arg2, arg3, arg4)
    };
    ($function:expr, 5 $(,)?) => {
        $crate::curry!(@nest $function; arg1, arg2, arg3, arg4, arg5)
    };
    ($function:expr, 6 $(,)?) => {
        $crate::curry!(@nest $function; arg1, arg2, arg3, arg4, arg5, arg6)
    };
}

/// Feeds several arguments to a curried function at once.
///
/// `apply!(curried; a, b)` is `curried(a)(b)`. The result is whatever the
/// last application returns: the final value once arity is met, otherwise
/// the remaining partial application. Pass `&curried` to keep using it.
///
/// # Examples
///
/// ```
/// use lamina::{apply, curry};
///
/// let volume = curry!(|width: u32, height: u32, depth: u32| width * height * depth, 3);
///
/// assert_eq!(apply!(&volume; 2, 3, 4), 24);
/// let base = apply!(&volume; 2, 3);
/// assert_eq!(base(5), 30);
/// assert_eq!(apply!(volume(2); 3)(4), 24);
/// ```
#[macro_export]
macro_rules! apply {
    ($curried:expr; $($argument:expr),+ $(,)?) => {{
        let applied = $curried;
        $(let applied = applied($argument);)+
        applied
    }};
}
