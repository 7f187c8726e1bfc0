//! A value that may be absent.
//!
//! [`Optional`] is a thin wrapper over `Option<T>` whose accessors report
//! absence through [`UsageError::EmptyOptional`] instead of panicking. Only
//! true absence counts as empty: `0`, `false` and `""` are present values.
//!
//! # Examples
//!
//! ```rust
//! use tryable::Optional;
//!
//! fn lookup(key: &str) -> Option<&'static str> {
//!     if key == "port" { Some("8080") } else { None }
//! }
//!
//! let port = Optional::from(lookup("port"))
//!     .map(|p| p.parse::<u16>().unwrap_or(0))
//!     .get_or_else(|| 80);
//! assert_eq!(port, 8080);
//!
//! let host = Optional::from(lookup("host")).get_or_else(|| "localhost");
//! assert_eq!(host, "localhost");
//! ```

use crate::error::UsageError;
use crate::Try;

/// A value that is either present or empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Optional<T> {
    value: Option<T>,
}

impl<T> Optional<T> {
    /// A present value.
    #[inline]
    pub fn of(value: T) -> Self {
        Optional { value: Some(value) }
    }

    /// Present when `value` is `Some`.
    #[inline]
    pub fn of_nullable(value: Option<T>) -> Self {
        Optional { value }
    }

    /// An empty `Optional`.
    #[inline]
    pub fn empty() -> Self {
        Optional { value: None }
    }

    /// Returns `true` if a value is present.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tryable::Optional;
    ///
    /// assert!(Optional::of(0).is_present());
    /// assert!(Optional::of("").is_present());
    /// assert!(!Optional::<i32>::empty().is_present());
    /// ```
    #[inline]
    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }

    /// Returns `true` if no value is present.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    /// Transform a present value.
    #[inline]
    pub fn map<U, F>(self, f: F) -> Optional<U>
    where
        F: FnOnce(T) -> U,
    {
        Optional {
            value: self.value.map(f),
        }
    }

    /// The value, or [`UsageError::EmptyOptional`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use tryable::{Optional, UsageError};
    ///
    /// assert_eq!(Optional::of(1).get(), Ok(1));
    /// assert_eq!(Optional::<i32>::empty().get(), Err(UsageError::EmptyOptional));
    /// ```
    #[inline]
    pub fn get(self) -> Result<T, UsageError> {
        self.value.ok_or(UsageError::EmptyOptional)
    }

    /// The value, or `fallback()` when empty.
    #[inline]
    pub fn get_or_else<F>(self, fallback: F) -> T
    where
        F: FnOnce() -> T,
    {
        self.value.unwrap_or_else(fallback)
    }

    /// The value, or the empty-access error remapped by `error_mapper`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tryable::Optional;
    ///
    /// let missing = Optional::<u32>::empty().get_or_else_throw(|e| format!("config: {}", e));
    /// assert_eq!(missing, Err("config: cannot get value of an empty Optional".to_string()));
    /// ```
    pub fn get_or_else_throw<E2, F>(self, error_mapper: F) -> Result<T, E2>
    where
        F: FnOnce(UsageError) -> E2,
    {
        self.get().map_err(error_mapper)
    }

    /// Keep the value only if it satisfies `predicate`.
    #[inline]
    pub fn filter<P>(self, predicate: P) -> Self
    where
        P: FnOnce(&T) -> bool,
    {
        Optional {
            value: self.value.filter(predicate),
        }
    }

    /// Run `f` on a present value and return `self` unchanged.
    pub fn if_present<F>(self, f: F) -> Self
    where
        F: FnOnce(&T),
    {
        if let Some(value) = &self.value {
            f(value);
        }
        self
    }

    /// Convert to a plain `Option`.
    #[inline]
    pub fn into_option(self) -> Option<T> {
        self.value
    }

    /// Convert to a [`Try`], using `on_empty` to build the cause.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tryable::{Optional, Try};
    ///
    /// let t = Optional::<i32>::empty().into_try(|| "no value");
    /// assert_eq!(t, Try::Failure("no value"));
    /// ```
    pub fn into_try<E, F>(self, on_empty: F) -> Try<T, E>
    where
        F: FnOnce() -> E,
    {
        match self.value {
            Some(value) => Try::Success(value),
            None => Try::Failure(on_empty()),
        }
    }
}

impl<T> Default for Optional<T> {
    fn default() -> Self {
        Optional::empty()
    }
}

impl<T> From<Option<T>> for Optional<T> {
    fn from(value: Option<T>) -> Self {
        Optional::of_nullable(value)
    }
}

impl<T> From<Optional<T>> for Option<T> {
    fn from(optional: Optional<T>) -> Self {
        optional.into_option()
    }
}
