//! Asynchronous result wrapper with memoized resolution.
//!
//! An [`AsyncTry`] wraps a deferred computation (a future producing
//! `Result<T, E>`) and lets callers keep composing steps onto it before anything
//! is awaited. It has two properties that a bare future chain does not:
//!
//! - **Memoization**: the first terminal operation (`get`, `is_success`,
//!   `resolve`, ...) drives the computation; every later call on the same node
//!   reads the cached outcome.
//! - **Exactly-once steps**: each executor or transformer belongs to a single
//!   node and runs at most once, however many times that node or any node
//!   derived from it is queried.
//!
//! Each combinator returns a *new* node chained off the current one. The
//! original node stays independently resolvable and keeps its own cache, so
//! branching a chain never re-runs the shared prefix.
//!
//! # Examples
//!
//! ```
//! use tryable::AsyncTry;
//!
//! # tokio_test::block_on(async {
//! let launch = AsyncTry::of(|| async { Ok::<_, String>("falcon-9") })
//!     .map(|rocket| rocket.to_uppercase())
//!     .and_then(|name| if name.is_empty() { Err("no name".to_string()) } else { Ok(()) });
//!
//! assert_eq!(launch.get().await, Ok("FALCON-9".to_string()));
//! assert!(launch.is_success().await);
//! # });
//! ```
//!
//! Futures are lazy: the executor passed to [`AsyncTry::of`] is called right
//! away to obtain its future, but the body of that future first runs when some
//! terminal operation awaits the node.

mod memo;

#[cfg(feature = "tracing")]
mod instrument;


use std::fmt;
use std::future::{self, Future};
use std::sync::Arc;

use crate::error::UsageError;
use crate::{Either, Try};

use memo::{Memo, Node, Upstream};

/// Outcome of an asynchronous fallible computation, resolved at most once.
///
/// Cloning an `AsyncTry` is cheap and yields a handle to the *same* node: both
/// handles share one cached outcome.
///
/// Terminal operations take `&self` and hand back copies of the cached value or
/// cause, so both `T` and `E` must be `Clone`.
pub struct AsyncTry<T, E> {
    memo: Arc<Memo<T, E>>,
}

impl<T, E> Clone for AsyncTry<T, E> {
    fn clone(&self) -> Self {
        AsyncTry {
            memo: Arc::clone(&self.memo),
        }
    }
}

impl<T, E> fmt::Debug for AsyncTry<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncTry")
            .field("state", &self.memo.label())
            .finish()
    }
}

impl<T, E> AsyncTry<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    // ========== Constructors ==========

    /// Start a computation and wrap it.
    ///
    /// `executor` is called immediately to obtain its future. The future is
    /// stored unpolled; an `Err` it eventually yields becomes the failure cause
    /// at first resolution.
    ///
    /// # Example
    ///
    /// ```
    /// use tryable::AsyncTry;
    ///
    /// # tokio_test::block_on(async {
    /// let t = AsyncTry::of(|| async { Err::<i32, _>("This is a test error.") });
    /// assert!(t.is_failure().await);
    /// # });
    /// ```
    pub fn of<F, Fut>(executor: F) -> Self
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        AsyncTry::from_future(executor())
    }

    /// Wrap an already-built future.
    pub fn from_future<Fut>(future: Fut) -> Self
    where
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        AsyncTry::linked(Upstream::Root, future)
    }

    /// Wrap a future that reads from `upstream`.
    fn linked<Fut>(upstream: Upstream, future: Fut) -> Self
    where
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        AsyncTry {
            memo: Arc::new(Memo::pending(Box::pin(future), upstream)),
        }
    }

    /// A node that is already settled with `value`.
    pub fn success(value: T) -> Self {
        AsyncTry {
            memo: Arc::new(Memo::settled(Ok(value))),
        }
    }

    /// A node that is already settled with `error`. There is no deferred
    /// computation behind it.
    pub fn failure(error: E) -> Self {
        AsyncTry {
            memo: Arc::new(Memo::settled(Err(error))),
        }
    }

    /// Build a node whose computation waits for this node, then runs `step` on
    /// its outcome.
    fn chain<U, E2, F, Fut>(&self, step: F) -> AsyncTry<U, E2>
    where
        U: Clone + Send + 'static,
        E2: Clone + Send + 'static,
        F: FnOnce(Result<T, E>) -> Fut + Send + 'static,
        Fut: Future<Output = Result<U, E2>> + Send + 'static,
    {
        let node: Arc<dyn Node> = self.memo.clone();
        let upstream = Arc::clone(&self.memo);
        AsyncTry::linked(Upstream::Step(node), async move {
            let outcome = upstream.resolve().await;
            step(outcome).await
        })
    }

    /// A settled failure node with the same cause, if this node already failed.
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn settled_failure<U>(&self, step: &'static str) -> Option<AsyncTry<U, E>>
    where
        U: Clone + Send + 'static,
    {
        let error = self.memo.known_failure()?;
        #[cfg(feature = "tracing")]
        tracing::debug!(step, "short-circuited on a settled failure");
        Some(AsyncTry::failure(error))
    }

    /// A settled success node with the same value, if this node already
    /// succeeded.
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn settled_success<E2>(&self, step: &'static str) -> Option<AsyncTry<T, E2>>
    where
        E2: Clone + Send + 'static,
    {
        let value = self.memo.known_success()?;
        #[cfg(feature = "tracing")]
        tracing::debug!(step, "short-circuited on a settled success");
        Some(AsyncTry::success(value))
    }

    // ========== Success-path combinators ==========

    /// Transform the success value.
    ///
    /// If this node is already known to have failed, the result is a new
    /// failure with the same cause and nothing is chained. Otherwise `f` runs
    /// once the computation succeeds; it never runs if the computation fails.
    ///
    /// # Example
    ///
    /// ```
    /// use tryable::AsyncTry;
    ///
    /// # tokio_test::block_on(async {
    /// let t = AsyncTry::of(|| async { Ok::<_, ()>(1) }).map(|v| v + 1);
    /// assert_eq!(t.get().await, Ok(2));
    /// # });
    /// ```
    pub fn map<U, F>(&self, f: F) -> AsyncTry<U, E>
    where
        U: Clone + Send + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        if let Some(settled) = self.settled_failure("map") {
            return settled;
        }
        self.chain(move |outcome| future::ready(outcome.map(f)))
    }

    /// Transform the success value with a synchronous step that may fail.
    pub fn try_map<U, F>(&self, f: F) -> AsyncTry<U, E>
    where
        U: Clone + Send + 'static,
        F: FnOnce(T) -> Result<U, E> + Send + 'static,
    {
        if let Some(settled) = self.settled_failure("try_map") {
            return settled;
        }
        self.chain(move |outcome| future::ready(outcome.and_then(f)))
    }

    /// Transform the success value with an asynchronous step that may fail.
    ///
    /// # Example
    ///
    /// ```
    /// use tryable::AsyncTry;
    ///
    /// # tokio_test::block_on(async {
    /// let t = AsyncTry::of(|| async { Ok::<_, String>(1) })
    ///     .map_async(|v| async move { Ok(format!("Value: {}", v)) });
    /// assert_eq!(t.get().await, Ok("Value: 1".to_string()));
    /// # });
    /// ```
    pub fn map_async<U, F, Fut>(&self, f: F) -> AsyncTry<U, E>
    where
        U: Clone + Send + 'static,
        F: FnOnce(T) -> Fut + Send + 'static,
        Fut: Future<Output = Result<U, E>> + Send + 'static,
    {
        if let Some(settled) = self.settled_failure("map_async") {
            return settled;
        }
        self.chain(move |outcome| async move {
            match outcome {
                Ok(value) => f(value).await,
                Err(error) => Err(error),
            }
        })
    }

    /// Chain a step that returns another `AsyncTry`, and wait for its outcome.
    ///
    /// A failure propagates without calling `f`.
    ///
    /// # Example
    ///
    /// ```
    /// use tryable::AsyncTry;
    ///
    /// # tokio_test::block_on(async {
    /// let t = AsyncTry::of(|| async { Ok::<_, ()>(1) })
    ///     .flat_map(|v| AsyncTry::of(move || async move { Ok(v + 1) }));
    /// assert_eq!(t.get().await, Ok(2));
    /// # });
    /// ```
    pub fn flat_map<U, F>(&self, f: F) -> AsyncTry<U, E>
    where
        U: Clone + Send + 'static,
        F: FnOnce(T) -> AsyncTry<U, E> + Send + 'static,
    {
        if let Some(settled) = self.settled_failure("flat_map") {
            return settled;
        }
        self.chain(move |outcome| async move {
            match outcome {
                Ok(value) => {
                    let next = f(value);
                    next.get().await
                }
                Err(error) => Err(error),
            }
        })
    }

    /// Run a synchronous side effect on the success value.
    ///
    /// The resulting node resolves to the *original* value. If the side effect
    /// returns `Err`, the node becomes a failure with that cause. The side
    /// effect runs once per node, whether this node has settled already or not.
    ///
    /// # Example
    ///
    /// ```
    /// use tryable::AsyncTry;
    ///
    /// # tokio_test::block_on(async {
    /// let t = AsyncTry::of(|| async { Ok::<_, String>(1) })
    ///     .and_then(|v| Ok::<_, String>(v + 100));
    /// assert_eq!(t.get().await, Ok(1));
    /// # });
    /// ```
    pub fn and_then<X, F>(&self, f: F) -> AsyncTry<T, E>
    where
        F: FnOnce(&T) -> Result<X, E> + Send + 'static,
    {
        if let Some(settled) = self.settled_failure("and_then") {
            return settled;
        }
        self.chain(move |outcome| {
            future::ready(outcome.and_then(|value| match f(&value) {
                Ok(_) => Ok(value),
                Err(error) => Err(error),
            }))
        })
    }

    /// Run an asynchronous side effect on the success value.
    ///
    /// Like [`AsyncTry::and_then`], the node resolves to the original value;
    /// the side effect receives a copy of it.
    pub fn and_then_async<X, F, Fut>(&self, f: F) -> AsyncTry<T, E>
    where
        F: FnOnce(T) -> Fut + Send + 'static,
        Fut: Future<Output = Result<X, E>> + Send + 'static,
    {
        if let Some(settled) = self.settled_failure("and_then_async") {
            return settled;
        }
        self.chain(move |outcome| async move {
            match outcome {
                Ok(value) => match f(value.clone()).await {
                    Ok(_) => Ok(value),
                    Err(error) => Err(error),
                },
                Err(error) => Err(error),
            }
        })
    }

    /// Run an infallible side effect on the success value.
    pub fn tap<F>(&self, f: F) -> AsyncTry<T, E>
    where
        F: FnOnce(&T) + Send + 'static,
    {
        self.and_then(move |value| {
            f(value);
            Ok::<(), E>(())
        })
    }

    // ========== Failure-path combinators ==========

    /// Run a side effect on the failure cause. An `Err` from the side effect
    /// replaces the cause.
    pub fn on_failure<F>(&self, f: F) -> AsyncTry<T, E>
    where
        F: FnOnce(&E) -> Result<(), E> + Send + 'static,
    {
        if let Some(settled) = self.settled_success("on_failure") {
            return settled;
        }
        self.chain(move |outcome| {
            future::ready(match outcome {
                Err(error) => match f(&error) {
                    Ok(()) => Err(error),
                    Err(replacement) => Err(replacement),
                },
                success => success,
            })
        })
    }

    /// Transform the failure cause. A success passes through.
    ///
    /// # Example
    ///
    /// ```
    /// use tryable::AsyncTry;
    ///
    /// # tokio_test::block_on(async {
    /// let t = AsyncTry::of(|| async { Err::<i32, _>("timeout") })
    ///     .map_failure(|e| format!("upstream: {}", e));
    /// assert_eq!(t.get_cause().await, Ok("upstream: timeout".to_string()));
    /// # });
    /// ```
    pub fn map_failure<E2, F>(&self, f: F) -> AsyncTry<T, E2>
    where
        E2: Clone + Send + 'static,
        F: FnOnce(E) -> E2 + Send + 'static,
    {
        if let Some(settled) = self.settled_success("map_failure") {
            return settled;
        }
        self.chain(move |outcome| future::ready(outcome.map_err(f)))
    }

    /// Transform the failure cause with an asynchronous step.
    pub fn map_failure_async<E2, F, Fut>(&self, f: F) -> AsyncTry<T, E2>
    where
        E2: Clone + Send + 'static,
        F: FnOnce(E) -> Fut + Send + 'static,
        Fut: Future<Output = E2> + Send + 'static,
    {
        if let Some(settled) = self.settled_success("map_failure_async") {
            return settled;
        }
        self.chain(move |outcome| async move {
            match outcome {
                Ok(value) => Ok(value),
                Err(error) => Err(f(error).await),
            }
        })
    }

    /// Recover from a failure by turning its cause into a value.
    ///
    /// # Example
    ///
    /// ```
    /// use tryable::AsyncTry;
    ///
    /// # tokio_test::block_on(async {
    /// let t = AsyncTry::of(|| async { Err::<usize, _>("cache miss") })
    ///     .map_to_success(|e| e.len());
    /// assert_eq!(t.get().await, Ok(10));
    /// # });
    /// ```
    pub fn map_to_success<F>(&self, f: F) -> AsyncTry<T, E>
    where
        F: FnOnce(E) -> T + Send + 'static,
    {
        if let Some(settled) = self.settled_success("map_to_success") {
            return settled;
        }
        self.chain(move |outcome| future::ready(Ok(outcome.unwrap_or_else(f))))
    }

    /// Recover from a failure with a step that may itself fail.
    pub fn recover_with<F>(&self, f: F) -> AsyncTry<T, E>
    where
        F: FnOnce(E) -> Result<T, E> + Send + 'static,
    {
        if let Some(settled) = self.settled_success("recover_with") {
            return settled;
        }
        self.chain(move |outcome| future::ready(outcome.or_else(f)))
    }

    // ========== Terminal operations ==========

    /// Resolve the node and report whether it succeeded.
    ///
    /// This drives every pending step in the chain up to this node.
    pub async fn is_success(&self) -> bool {
        self.memo.inspect(|outcome| outcome.is_ok()).await
    }

    /// Resolve the node and report whether it failed.
    pub async fn is_failure(&self) -> bool {
        !self.is_success().await
    }

    /// Resolve the node and return its value, or its cause as `Err`.
    pub async fn get(&self) -> Result<T, E> {
        self.memo.resolve().await
    }

    /// Resolve the node and return its value, or await a fallback computed from
    /// the cause.
    ///
    /// # Example
    ///
    /// ```
    /// use tryable::AsyncTry;
    ///
    /// # tokio_test::block_on(async {
    /// let t = AsyncTry::of(|| async { Err::<i32, _>("boom") });
    /// assert_eq!(t.get_or_else(|_| async { 2 }).await, 2);
    /// # });
    /// ```
    pub async fn get_or_else<F, Fut>(&self, fallback: F) -> T
    where
        F: FnOnce(E) -> Fut,
        Fut: Future<Output = T>,
    {
        match self.get().await {
            Ok(value) => value,
            Err(error) => fallback(error).await,
        }
    }

    /// Resolve the node and return its value, or its cause remapped by
    /// `failure_mapper` as `Err`.
    pub async fn get_or_else_throw<E2, F>(&self, failure_mapper: F) -> Result<T, E2>
    where
        F: FnOnce(E) -> E2,
    {
        self.get().await.map_err(failure_mapper)
    }

    /// Resolve the node and return its cause.
    ///
    /// Returns [`UsageError::CauseOfSuccess`] if the node succeeded.
    pub async fn get_cause(&self) -> Result<E, UsageError> {
        self.memo
            .inspect(|outcome| match outcome {
                Ok(_) => Err(UsageError::CauseOfSuccess),
                Err(error) => Ok(error.clone()),
            })
            .await
    }

    /// Resolve the node into an [`Either`] with the cause on the left.
    ///
    /// # Example
    ///
    /// ```
    /// use tryable::{AsyncTry, Either};
    ///
    /// # tokio_test::block_on(async {
    /// let t = AsyncTry::of(|| async { Ok::<_, String>(1) });
    /// assert_eq!(t.resolve().await, Either::Right(1));
    /// # });
    /// ```
    pub async fn resolve(&self) -> Either<E, T> {
        Either::from_result(self.get().await)
    }

    /// Resolve the node into a synchronous [`Try`].
    pub async fn to_try(&self) -> Try<T, E> {
        Try::from(self.get().await)
    }
}

impl<T, E> AsyncTry<AsyncTry<T, E>, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    /// Unwrap one level of nesting.
    ///
    /// If the outer node has already settled with an inner `AsyncTry`, that
    /// inner node is returned as-is and keeps its own cache. Otherwise the
    /// result waits for the outer node and then for the inner one.
    ///
    /// # Example
    ///
    /// ```
    /// use tryable::AsyncTry;
    ///
    /// # tokio_test::block_on(async {
    /// let nested = AsyncTry::of(|| async {
    ///     Ok::<_, String>(AsyncTry::of(|| async { Ok(1) }))
    /// });
    /// assert_eq!(nested.flatten().get().await, Ok(1));
    /// # });
    /// ```
    pub fn flatten(&self) -> AsyncTry<T, E> {
        if let Some(error) = self.memo.known_failure() {
            return AsyncTry::failure(error);
        }
        if let Some(inner) = self.memo.known_success() {
            return inner;
        }
        self.chain(|outcome| async move {
            match outcome {
                Ok(inner) => inner.get().await,
                Err(error) => Err(error),
            }
        })
    }
}
