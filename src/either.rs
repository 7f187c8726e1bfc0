//! A value that holds exactly one of two alternatives.
//!
//! `Either<L, R>` carries no success/failure meaning of its own. By convention
//! it is "right-biased": [`Either::map`] and [`Either::get`] act on `Right`,
//! which is why [`Try::resolve`](crate::Try::resolve) puts the cause on the
//! left and the value on the right.
//!
//! # Examples
//!
//! ```rust
//! use tryable::Either;
//!
//! fn source(from_cache: bool) -> Either<&'static str, u32> {
//!     if from_cache {
//!         Either::left("cached")
//!     } else {
//!         Either::right(42)
//!     }
//! }
//!
//! let description = source(true).fold(
//!     |cached| format!("from cache: {}", cached),
//!     |fresh| format!("fresh: {}", fresh),
//! );
//! assert_eq!(description, "from cache: cached");
//! ```

use crate::error::{Side, UsageError};
use crate::Try;

/// Either a `Left(L)` or a `Right(R)`.
///
/// # Example
///
/// ```rust
/// use tryable::{Either, Side, UsageError};
///
/// let e: Either<i32, &str> = Either::right("hello");
/// assert_eq!(e.get(), Ok("hello"));
/// assert_eq!(e.get_left(), Err(UsageError::WrongSide { requested: Side::Left }));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Either<L, R> {
    /// The left alternative
    Left(L),
    /// The right alternative
    Right(R),
}

impl<L, R> Either<L, R> {
    // ========== Constructors ==========

    /// Create a `Left` value.
    #[inline]
    pub fn left(value: L) -> Self {
        Either::Left(value)
    }

    /// Create a `Right` value.
    #[inline]
    pub fn right(value: R) -> Self {
        Either::Right(value)
    }

    /// Build an `Either` from two optional parts, exactly one of which must be
    /// present.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tryable::{Either, UsageError};
    ///
    /// assert_eq!(Either::<i32, &str>::from_parts(None, Some("r")), Ok(Either::Right("r")));
    /// assert_eq!(
    ///     Either::<i32, &str>::from_parts(None, None),
    ///     Err(UsageError::Missing { container: "Either" })
    /// );
    /// ```
    pub fn from_parts(left: Option<L>, right: Option<R>) -> Result<Self, UsageError> {
        match (left, right) {
            (Some(l), None) => Ok(Either::Left(l)),
            (None, Some(r)) => Ok(Either::Right(r)),
            (Some(_), Some(_)) => Err(UsageError::Conflicting { container: "Either" }),
            (None, None) => Err(UsageError::Missing { container: "Either" }),
        }
    }

    // ========== Predicates ==========

    /// Returns `true` if this is a `Left` value.
    #[inline]
    pub fn is_left(&self) -> bool {
        matches!(self, Either::Left(_))
    }

    /// Returns `true` if this is a `Right` value.
    #[inline]
    pub fn is_right(&self) -> bool {
        matches!(self, Either::Right(_))
    }

    // ========== Accessors ==========

    /// The left value, or [`UsageError::WrongSide`] if this is a `Right`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tryable::Either;
    ///
    /// let left: Either<i32, &str> = Either::left(42);
    /// assert_eq!(left.get_left(), Ok(42));
    /// assert!(left.get_right().is_err());
    /// ```
    #[inline]
    pub fn get_left(self) -> Result<L, UsageError> {
        match self {
            Either::Left(l) => Ok(l),
            Either::Right(_) => Err(UsageError::WrongSide {
                requested: Side::Left,
            }),
        }
    }

    /// The right value, or [`UsageError::WrongSide`] if this is a `Left`.
    #[inline]
    pub fn get_right(self) -> Result<R, UsageError> {
        match self {
            Either::Left(_) => Err(UsageError::WrongSide {
                requested: Side::Right,
            }),
            Either::Right(r) => Ok(r),
        }
    }

    /// Right-biased accessor, same as [`Either::get_right`].
    #[inline]
    pub fn get(self) -> Result<R, UsageError> {
        self.get_right()
    }

    /// Returns the left value if present, consuming self.
    #[inline]
    pub fn into_left(self) -> Option<L> {
        match self {
            Either::Left(l) => Some(l),
            Either::Right(_) => None,
        }
    }

    /// Returns the right value if present, consuming self.
    #[inline]
    pub fn into_right(self) -> Option<R> {
        match self {
            Either::Left(_) => None,
            Either::Right(r) => Some(r),
        }
    }

    /// Convert to `Either<&L, &R>`.
    #[inline]
    pub fn as_ref(&self) -> Either<&L, &R> {
        match self {
            Either::Left(l) => Either::Left(l),
            Either::Right(r) => Either::Right(r),
        }
    }

    /// The left value, or one computed from the right value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tryable::Either;
    ///
    /// let right: Either<usize, &str> = Either::right("hello");
    /// assert_eq!(right.left_or_else(|s| s.len()), 5);
    /// ```
    #[inline]
    pub fn left_or_else<F>(self, f: F) -> L
    where
        F: FnOnce(R) -> L,
    {
        match self {
            Either::Left(l) => l,
            Either::Right(r) => f(r),
        }
    }

    /// The right value, or one computed from the left value.
    #[inline]
    pub fn right_or_else<F>(self, f: F) -> R
    where
        F: FnOnce(L) -> R,
    {
        match self {
            Either::Left(l) => f(l),
            Either::Right(r) => r,
        }
    }

    // ========== Transformations ==========

    /// Transform the left value, passing right values through unchanged.
    #[inline]
    pub fn map_left<L2, F>(self, f: F) -> Either<L2, R>
    where
        F: FnOnce(L) -> L2,
    {
        match self {
            Either::Left(l) => Either::Left(f(l)),
            Either::Right(r) => Either::Right(r),
        }
    }

    /// Transform the right value, passing left values through unchanged.
    #[inline]
    pub fn map_right<R2, F>(self, f: F) -> Either<L, R2>
    where
        F: FnOnce(R) -> R2,
    {
        match self {
            Either::Left(l) => Either::Left(l),
            Either::Right(r) => Either::Right(f(r)),
        }
    }

    /// Right-biased `map`; an alias for [`Either::map_right`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use tryable::Either;
    ///
    /// let e: Either<&str, i32> = Either::right(21);
    /// assert_eq!(e.map(|x| x * 2), Either::right(42));
    /// ```
    #[inline]
    pub fn map<R2, F>(self, f: F) -> Either<L, R2>
    where
        F: FnOnce(R) -> R2,
    {
        self.map_right(f)
    }

    /// Exchange `Left` and `Right`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tryable::Either;
    ///
    /// let left: Either<i32, &str> = Either::left(42);
    /// assert_eq!(left.swap(), Either::right(42));
    /// assert_eq!(left.swap().swap(), left);
    /// ```
    #[inline]
    pub fn swap(self) -> Either<R, L> {
        match self {
            Either::Left(l) => Either::Right(l),
            Either::Right(r) => Either::Left(r),
        }
    }

    /// Collapse both sides into a single value.
    #[inline]
    pub fn fold<T, F, G>(self, left_fn: F, right_fn: G) -> T
    where
        F: FnOnce(L) -> T,
        G: FnOnce(R) -> T,
    {
        match self {
            Either::Left(l) => left_fn(l),
            Either::Right(r) => right_fn(r),
        }
    }

    // ========== Conversions ==========

    /// Convert to a `Result`, with `Right` as `Ok`.
    #[inline]
    pub fn into_result(self) -> Result<R, L> {
        match self {
            Either::Left(l) => Err(l),
            Either::Right(r) => Ok(r),
        }
    }

    /// Build from a `Result`, with `Ok` as `Right`.
    #[inline]
    pub fn from_result(result: Result<R, L>) -> Self {
        match result {
            Ok(r) => Either::Right(r),
            Err(l) => Either::Left(l),
        }
    }

    /// Convert to a [`Try`], with `Right` as the success and `Left` as the
    /// cause.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tryable::{Either, Try};
    ///
    /// let e: Either<String, i32> = Either::left("boom".to_string());
    /// assert_eq!(e.into_try(), Try::Failure("boom".to_string()));
    /// ```
    #[inline]
    pub fn into_try(self) -> Try<R, L> {
        match self {
            Either::Left(l) => Try::Failure(l),
            Either::Right(r) => Try::Success(r),
        }
    }
}

impl<L, R> Either<L, Either<L, R>> {
    /// Unwrap one level of right-side nesting.
    #[inline]
    pub fn flatten(self) -> Either<L, R> {
        match self {
            Either::Left(l) => Either::Left(l),
            Either::Right(inner) => inner,
        }
    }
}

impl<L, R> From<Result<R, L>> for Either<L, R> {
    fn from(result: Result<R, L>) -> Self {
        Either::from_result(result)
    }
}

impl<L, R> From<Either<L, R>> for Result<R, L> {
    fn from(either: Either<L, R>) -> Self {
        either.into_result()
    }
}
