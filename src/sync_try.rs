//! Synchronous result wrapper.
//!
//! A [`Try`] holds the outcome of a fallible computation that has already run:
//! either a success value or a failure cause, never both. Every combinator is
//! eager and returns a new `Try`; a failure produced anywhere in a chain is
//! carried along silently and only surfaces through a terminal accessor such as
//! [`Try::get`] or [`Try::get_cause`].
//!
//! # Examples
//!
//! ```
//! use tryable::Try;
//!
//! let port = Try::of(|| "8080".parse::<u16>())
//!     .map(|p| p + 1)
//!     .map_failure(|e| format!("bad port: {}", e));
//!
//! assert_eq!(port.get(), Ok(8081));
//!
//! let port = Try::of(|| "http".parse::<u16>())
//!     .map(|p| p + 1)
//!     .map_failure(|e| format!("bad port: {}", e));
//!
//! assert!(port.is_failure());
//! ```

use std::future::Future;

use crate::error::UsageError;
use crate::{AsyncTry, Either};

/// The outcome of a synchronous fallible computation.
///
/// Build one with [`Try::of`], [`Try::success`] or [`Try::failure`]. The enum
/// itself guarantees that exactly one of value and cause is present; use
/// [`Try::from_parts`] when the parts come from somewhere that does not.
///
/// # Examples
///
/// ```
/// use tryable::Try;
///
/// let t = Try::<_, String>::success(1)
///     .and_then(|v| if *v > 0 { Ok(()) } else { Err("negative".to_string()) })
///     .map(|v| v * 10);
///
/// assert_eq!(t, Try::Success(10));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Try<T, E> {
    /// The computation produced a value
    Success(T),
    /// The computation failed with a cause
    Failure(E),
}

impl<T, E> Try<T, E> {
    // ========== Constructors ==========

    /// Run `executor` now and capture its outcome.
    ///
    /// An `Err` returned by the executor becomes the failure cause; it is never
    /// propagated to the caller.
    ///
    /// # Example
    ///
    /// ```
    /// use tryable::Try;
    ///
    /// let t = Try::of(|| "42".parse::<i32>());
    /// assert_eq!(t.get(), Ok(42));
    /// ```
    #[inline]
    pub fn of<F>(executor: F) -> Self
    where
        F: FnOnce() -> Result<T, E>,
    {
        Try::from(executor())
    }

    /// Create a successful `Try`.
    #[inline]
    pub fn success(value: T) -> Self {
        Try::Success(value)
    }

    /// Create a failed `Try`.
    #[inline]
    pub fn failure(error: E) -> Self {
        Try::Failure(error)
    }

    /// Build a `Try` from loose parts, rejecting invalid combinations.
    ///
    /// # Example
    ///
    /// ```
    /// use tryable::{Try, UsageError};
    ///
    /// assert_eq!(Try::<i32, &str>::from_parts(Some(1), None), Ok(Try::Success(1)));
    /// assert_eq!(
    ///     Try::<i32, &str>::from_parts(Some(1), Some("boom")),
    ///     Err(UsageError::Conflicting { container: "Try" })
    /// );
    /// ```
    pub fn from_parts(value: Option<T>, error: Option<E>) -> Result<Self, UsageError> {
        match (value, error) {
            (Some(value), None) => Ok(Try::Success(value)),
            (None, Some(error)) => Ok(Try::Failure(error)),
            (Some(_), Some(_)) => Err(UsageError::Conflicting { container: "Try" }),
            (None, None) => Err(UsageError::Missing { container: "Try" }),
        }
    }

    // ========== Predicates ==========

    /// Returns `true` if this is a success.
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, Try::Success(_))
    }

    /// Returns `true` if this is a failure.
    #[inline]
    pub fn is_failure(&self) -> bool {
        matches!(self, Try::Failure(_))
    }

    /// Convert to `Try<&T, &E>`.
    #[inline]
    pub fn as_ref(&self) -> Try<&T, &E> {
        match self {
            Try::Success(value) => Try::Success(value),
            Try::Failure(error) => Try::Failure(error),
        }
    }

    // ========== Transformations ==========

    /// Transform the success value.
    ///
    /// A failure is carried over untouched and `f` is not called.
    ///
    /// # Example
    ///
    /// ```
    /// use tryable::Try;
    ///
    /// assert_eq!(Try::<_, ()>::success(2).map(|x| x * 2), Try::Success(4));
    /// assert_eq!(Try::<i32, _>::failure("e").map(|x| x * 2), Try::Failure("e"));
    /// ```
    #[inline]
    pub fn map<U, F>(self, f: F) -> Try<U, E>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Try::Success(value) => Try::Success(f(value)),
            Try::Failure(error) => Try::Failure(error),
        }
    }

    /// Transform the success value with a step that may fail.
    ///
    /// An `Err` returned by `f` becomes the new failure cause.
    ///
    /// # Example
    ///
    /// ```
    /// use tryable::Try;
    ///
    /// let t = Try::success("12").try_map(|s| s.parse::<u8>());
    /// assert_eq!(t.get(), Ok(12));
    ///
    /// let t = Try::success("x").try_map(|s| s.parse::<u8>());
    /// assert!(t.is_failure());
    /// ```
    #[inline]
    pub fn try_map<U, F>(self, f: F) -> Try<U, E>
    where
        F: FnOnce(T) -> Result<U, E>,
    {
        match self {
            Try::Success(value) => Try::from(f(value)),
            Try::Failure(error) => Try::Failure(error),
        }
    }

    /// Chain a step that itself returns a `Try`.
    ///
    /// The returned `Try` is used as-is, so a failure produced by `f` is the
    /// result. A failure in `self` skips `f`.
    ///
    /// # Example
    ///
    /// ```
    /// use tryable::Try;
    ///
    /// fn half(x: i32) -> Try<i32, String> {
    ///     if x % 2 == 0 { Try::success(x / 2) } else { Try::failure(format!("{} is odd", x)) }
    /// }
    ///
    /// assert_eq!(Try::success(8).flat_map(half), Try::Success(4));
    /// assert_eq!(Try::success(3).flat_map(half), Try::Failure("3 is odd".to_string()));
    /// ```
    #[inline]
    pub fn flat_map<U, F>(self, f: F) -> Try<U, E>
    where
        F: FnOnce(T) -> Try<U, E>,
    {
        match self {
            Try::Success(value) => f(value),
            Try::Failure(error) => Try::Failure(error),
        }
    }

    /// Run a fallible side effect on the success value.
    ///
    /// On `Ok` the original success is returned unchanged, whatever the side
    /// effect produced. On `Err` the result becomes a failure with that cause.
    /// A failure passes through and the side effect is not called.
    ///
    /// # Example
    ///
    /// ```
    /// use tryable::Try;
    ///
    /// let t = Try::<_, String>::success(1).and_then(|v| Ok::<_, String>(v + 100));
    /// assert_eq!(t.get(), Ok(1));
    ///
    /// let t = Try::<i32, _>::success(1).and_then(|_| Err::<(), _>("audit failed"));
    /// assert_eq!(t.get_cause(), Ok("audit failed"));
    /// ```
    pub fn and_then<X, F>(self, f: F) -> Try<T, E>
    where
        F: FnOnce(&T) -> Result<X, E>,
    {
        match self {
            Try::Success(value) => match f(&value) {
                Ok(_) => Try::Success(value),
                Err(error) => Try::Failure(error),
            },
            failure => failure,
        }
    }

    /// Run an infallible side effect on the success value.
    #[inline]
    pub fn tap<F>(self, f: F) -> Try<T, E>
    where
        F: FnOnce(&T),
    {
        if let Try::Success(value) = &self {
            f(value);
        }
        self
    }

    /// Run a side effect on the failure cause.
    ///
    /// If the side effect returns `Err`, that error replaces the cause. A
    /// success is returned untouched.
    ///
    /// # Example
    ///
    /// ```
    /// use tryable::Try;
    ///
    /// let t = Try::<i32, _>::failure("first").on_failure(|_| Err("second"));
    /// assert_eq!(t, Try::Failure("second"));
    /// ```
    pub fn on_failure<F>(self, f: F) -> Try<T, E>
    where
        F: FnOnce(&E) -> Result<(), E>,
    {
        match self {
            Try::Failure(error) => match f(&error) {
                Ok(()) => Try::Failure(error),
                Err(replacement) => Try::Failure(replacement),
            },
            success => success,
        }
    }

    /// Transform the failure cause. A success passes through.
    ///
    /// # Example
    ///
    /// ```
    /// use tryable::Try;
    ///
    /// let t = Try::<i32, _>::failure("Test error").map_failure(|e| format!("{}, New error", e));
    /// assert_eq!(t.get(), Err("Test error, New error".to_string()));
    /// ```
    #[inline]
    pub fn map_failure<E2, F>(self, f: F) -> Try<T, E2>
    where
        F: FnOnce(E) -> E2,
    {
        match self {
            Try::Success(value) => Try::Success(value),
            Try::Failure(error) => Try::Failure(f(error)),
        }
    }

    /// Recover from a failure by turning its cause into a value.
    #[inline]
    pub fn map_to_success<F>(self, f: F) -> Try<T, E>
    where
        F: FnOnce(E) -> T,
    {
        match self {
            Try::Failure(error) => Try::Success(f(error)),
            success => success,
        }
    }

    /// Recover from a failure with a step that may itself fail.
    ///
    /// # Example
    ///
    /// ```
    /// use tryable::Try;
    ///
    /// let t = Try::<i32, &str>::failure("miss").recover_with(|_| Ok(2));
    /// assert_eq!(t, Try::Success(2));
    ///
    /// let t = Try::<i32, &str>::failure("miss").recover_with(|_| Err("still missing"));
    /// assert_eq!(t, Try::Failure("still missing"));
    /// ```
    #[inline]
    pub fn recover_with<F>(self, f: F) -> Try<T, E>
    where
        F: FnOnce(E) -> Result<T, E>,
    {
        match self {
            Try::Failure(error) => Try::from(f(error)),
            success => success,
        }
    }

    // ========== Terminal accessors ==========

    /// Return the value, or the stored cause as `Err`.
    #[inline]
    pub fn get(self) -> Result<T, E> {
        self.into_result()
    }

    /// Return the value, or compute a fallback from the cause.
    #[inline]
    pub fn get_or_else<F>(self, fallback: F) -> T
    where
        F: FnOnce(E) -> T,
    {
        match self {
            Try::Success(value) => value,
            Try::Failure(error) => fallback(error),
        }
    }

    /// Return the value, or the cause remapped by `failure_mapper` as `Err`.
    ///
    /// Passing the identity function makes this equivalent to [`Try::get`].
    ///
    /// # Example
    ///
    /// ```
    /// use tryable::Try;
    ///
    /// let t = Try::<i32, _>::failure("timeout");
    /// assert_eq!(t.get_or_else_throw(|e| format!("upstream: {}", e)), Err("upstream: timeout".to_string()));
    /// ```
    #[inline]
    pub fn get_or_else_throw<E2, F>(self, failure_mapper: F) -> Result<T, E2>
    where
        F: FnOnce(E) -> E2,
    {
        self.into_result().map_err(failure_mapper)
    }

    /// Return the cause of a failure.
    ///
    /// Asking a success for its cause is a misuse and yields
    /// [`UsageError::CauseOfSuccess`], which is distinct from any business
    /// error the `Try` could carry.
    #[inline]
    pub fn get_cause(self) -> Result<E, UsageError> {
        match self {
            Try::Success(_) => Err(UsageError::CauseOfSuccess),
            Try::Failure(error) => Ok(error),
        }
    }

    /// Fold into an [`Either`] with the cause on the left.
    #[inline]
    pub fn resolve(self) -> Either<E, T> {
        match self {
            Try::Success(value) => Either::Right(value),
            Try::Failure(error) => Either::Left(error),
        }
    }

    /// Convert into a `Result`.
    #[inline]
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Try::Success(value) => Ok(value),
            Try::Failure(error) => Err(error),
        }
    }
}

impl<T, E> Try<Try<T, E>, E> {
    /// Unwrap one level of nesting.
    ///
    /// This is what chaining `map` over a function that returns a `Try`
    /// produces; `flatten` brings it back to a single level. Deeper nesting is
    /// peeled one level per call.
    ///
    /// # Example
    ///
    /// ```
    /// use tryable::Try;
    ///
    /// let nested = Try::<_, ()>::success(Try::success(1));
    /// assert_eq!(nested.flatten().get(), Ok(1));
    ///
    /// let inner_failure = Try::<Try<i32, _>, _>::success(Try::failure("inner"));
    /// assert_eq!(inner_failure.flatten(), Try::Failure("inner"));
    /// ```
    #[inline]
    pub fn flatten(self) -> Try<T, E> {
        match self {
            Try::Success(inner) => inner,
            Try::Failure(error) => Try::Failure(error),
        }
    }
}

impl<T, E> Try<T, E>
where
    E: Clone + Send + 'static,
{
    /// Continue with an asynchronous step, producing an [`AsyncTry`].
    ///
    /// A failure short-circuits to [`AsyncTry::failure`] and `f` is never
    /// called.
    ///
    /// # Example
    ///
    /// ```
    /// use tryable::Try;
    ///
    /// # tokio_test::block_on(async {
    /// let t = Try::<_, String>::success(1).map_async(|x| async move { Ok(x + 1) });
    /// assert_eq!(t.get().await, Ok(2));
    /// # });
    /// ```
    pub fn map_async<U, F, Fut>(self, f: F) -> AsyncTry<U, E>
    where
        U: Clone + Send + 'static,
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = Result<U, E>> + Send + 'static,
    {
        match self {
            Try::Success(value) => AsyncTry::from_future(f(value)),
            Try::Failure(error) => AsyncTry::failure(error),
        }
    }
}

// ========== Trait Implementations ==========

impl<T, E> From<Result<T, E>> for Try<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Try::Success(value),
            Err(error) => Try::Failure(error),
        }
    }
}

impl<T, E> From<Try<T, E>> for Result<T, E> {
    fn from(t: Try<T, E>) -> Self {
        t.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::CallCounter;

    #[derive(Debug, Clone, PartialEq)]
    struct TestError(&'static str);

    fn failing() -> Result<i32, TestError> {
        Err(TestError("Test error"))
    }

    #[test]
    fn test_of_success() {
        let t = Try::of(|| Ok::<_, TestError>(1));
        assert!(t.is_success());
        assert!(!t.is_failure());
        assert_eq!(t.get(), Ok(1));
    }

    #[test]
    fn test_of_failure_keeps_same_error() {
        let t = Try::of(failing);
        assert!(t.is_failure());
        assert_eq!(t.get(), Err(TestError("Test error")));
    }

    #[test]
    fn test_success_with_unit_value() {
        let t = Try::<(), TestError>::success(());
        assert!(t.is_success());
    }

    #[test]
    fn test_repeated_queries_are_consistent() {
        let counter = CallCounter::new();
        let c = counter.clone();
        let t = Try::of(move || {
            c.hit();
            Ok::<_, TestError>(5)
        });

        assert!(t.is_success());
        assert!(t.is_success());
        assert_eq!(t.clone().get(), Ok(5));
        assert_eq!(t.get(), Ok(5));
        assert_eq!(counter.count(), 1);
    }

    #[test]
    fn test_map_skips_transformer_on_failure() {
        let counter = CallCounter::new();
        let t = Try::of(failing).map(|x| {
            counter.hit();
            x + 1
        });
        assert_eq!(t.get_cause(), Ok(TestError("Test error")));
        assert_eq!(counter.count(), 0);
    }

    #[test]
    fn test_try_map_captures_error() {
        let t = Try::<_, TestError>::success(1).try_map(|_| failing());
        assert_eq!(t, Try::Failure(TestError("Test error")));
    }

    #[test]
    fn test_flat_map() {
        let t = Try::<_, TestError>::success(1).flat_map(|x| Try::success(x + 1));
        assert_eq!(t.get(), Ok(2));

        let t = Try::<_, TestError>::success(1).flat_map(|_| Try::<i32, _>::of(failing));
        assert_eq!(t.get(), Err(TestError("Test error")));

        let counter = CallCounter::new();
        let t = Try::<i32, _>::failure(TestError("early")).flat_map(|x| {
            counter.hit();
            Try::success(x)
        });
        assert_eq!(t, Try::Failure(TestError("early")));
        assert_eq!(counter.count(), 0);
    }

    #[test]
    fn test_flatten_then_flat_map() {
        let nested = Try::<_, TestError>::success(Try::success(1));
        let t = nested.flatten().flat_map(|x| Try::success(x * 3));
        assert_eq!(t.get(), Ok(3));
    }

    #[test]
    fn test_flatten_peels_one_level() {
        let nested = Try::<_, TestError>::success(Try::success(Try::success(1)));
        let once: Try<Try<i32, TestError>, TestError> = nested.flatten();
        assert_eq!(once.flatten(), Try::Success(1));
    }

    #[test]
    fn test_and_then_keeps_original_value() {
        let t = Try::<_, TestError>::success(1).and_then(|v| Ok::<_, TestError>(v + 100));
        assert_eq!(t.get(), Ok(1));
    }

    #[test]
    fn test_and_then_error_becomes_failure() {
        let t = Try::<i32, _>::success(1).and_then(|_| failing());
        assert!(t.is_failure());
        assert_eq!(t.get_cause(), Ok(TestError("Test error")));
    }

    #[test]
    fn test_and_then_stops_subsequent_steps() {
        let counter = CallCounter::new();
        let t = Try::<_, TestError>::success(1)
            .map(|v| {
                counter.hit();
                v + 1
            })
            .and_then(|_| failing())
            .map(|v| {
                counter.hit();
                v + 1
            });

        assert!(t.is_failure());
        assert_eq!(counter.count(), 1);
    }

    #[test]
    fn test_and_then_not_called_on_failure() {
        let counter = CallCounter::new();
        let t = Try::<i32, _>::failure(TestError("e")).and_then(|_| {
            counter.hit();
            Ok::<_, TestError>(())
        });
        assert!(t.is_failure());
        assert_eq!(counter.count(), 0);
    }

    #[test]
    fn test_tap() {
        let mut seen = None;
        let t = Try::<_, TestError>::success(7).tap(|v| seen = Some(*v));
        assert_eq!(seen, Some(7));
        assert_eq!(t, Try::Success(7));
    }

    #[test]
    fn test_on_failure() {
        let t = Try::<i32, _>::failure(TestError("Test error")).on_failure(|_| Ok(()));
        assert_eq!(t, Try::Failure(TestError("Test error")));

        let t = Try::<i32, _>::failure(TestError("Test error"))
            .on_failure(|_| Err(TestError("New error")));
        assert_eq!(t.get(), Err(TestError("New error")));

        let counter = CallCounter::new();
        let t = Try::<_, TestError>::success(1).on_failure(|_| {
            counter.hit();
            Ok(())
        });
        assert_eq!(t.get(), Ok(1));
        assert_eq!(counter.count(), 0);
    }

    #[test]
    fn test_map_failure() {
        let t = Try::<_, TestError>::success(1).map_failure(|_| TestError("unused"));
        assert_eq!(t, Try::Success(1));

        let counter = CallCounter::new();
        let t = Try::<i32, _>::failure(TestError("Test error")).map_failure(|e| {
            counter.hit();
            format!("{}, New error", e.0)
        });
        assert_eq!(t.get(), Err("Test error, New error".to_string()));
        assert_eq!(counter.count(), 1);
    }

    #[test]
    fn test_recovery() {
        let t = Try::of(failing).map_to_success(|_| 2);
        assert_eq!(t.get(), Ok(2));

        let t = Try::<_, TestError>::success(1).recover_with(|_| Ok(2));
        assert_eq!(t.get(), Ok(1));

        let t = Try::of(failing).recover_with(|_| Err(TestError("Another test error")));
        assert_eq!(t.get(), Err(TestError("Another test error")));
    }

    #[test]
    fn test_get_or_else() {
        assert_eq!(Try::<_, TestError>::success(1).get_or_else(|_| 2), 1);
        assert_eq!(Try::of(failing).get_or_else(|_| 2), 2);
        assert_eq!(
            Try::<String, _>::failure(TestError("x")).get_or_else(|e| e.0.to_string()),
            "x"
        );
    }

    #[test]
    fn test_get_or_else_throw() {
        assert_eq!(Try::<_, TestError>::success(1).get_or_else_throw(|e| e), Ok(1));
        assert_eq!(
            Try::of(failing).get_or_else_throw(|e| e),
            Err(TestError("Test error"))
        );
        assert_eq!(
            Try::of(failing).get_or_else_throw(|e| format!("mapped: {}", e.0)),
            Err("mapped: Test error".to_string())
        );
    }

    #[test]
    fn test_get_cause() {
        assert_eq!(
            Try::<_, TestError>::success(1).get_cause(),
            Err(UsageError::CauseOfSuccess)
        );
        assert_eq!(Try::of(failing).get_cause(), Ok(TestError("Test error")));
    }

    #[test]
    fn test_from_parts() {
        assert_eq!(
            Try::<i32, TestError>::from_parts(None, Some(TestError("e"))),
            Ok(Try::Failure(TestError("e")))
        );
        assert_eq!(
            Try::<i32, TestError>::from_parts(None, None),
            Err(UsageError::Missing { container: "Try" })
        );
    }

    #[test]
    fn test_resolve() {
        assert_eq!(Try::<_, TestError>::success(1).resolve(), Either::Right(1));
        assert_eq!(
            Try::of(failing).resolve(),
            Either::Left(TestError("Test error"))
        );
    }

    #[test]
    fn test_result_conversion() {
        let t: Try<i32, &str> = Ok(1).into();
        assert_eq!(t, Try::Success(1));
        let r: Result<i32, &str> = Try::Failure("e").into();
        assert_eq!(r, Err("e"));
    }

    #[tokio::test]
    async fn test_map_async() {
        let t = Try::<_, TestError>::success(1).map_async(|x| async move { Ok(x + 1) });
        assert_eq!(t.get().await, Ok(2));
    }

    #[tokio::test]
    async fn test_map_async_skips_on_failure() {
        let counter = CallCounter::new();
        let c = counter.clone();
        let t = Try::of(failing).map_async(move |x| {
            c.hit();
            async move { Ok(x + 1) }
        });
        assert_eq!(t.get_cause().await, Ok(TestError("Test error")));
        assert_eq!(counter.count(), 0);
    }
}
