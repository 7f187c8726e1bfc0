//! Testing utilities for code built on `Try` and `AsyncTry`.
//!
//! This module provides assertion macros for [`Try`](crate::Try), a shared
//! invocation counter for checking how often executors and transformers run,
//! and (with the `proptest` feature) `Arbitrary` implementations for the
//! wrapper types.
//!
//! # Examples
//!
//! ## Assertion Macros
//!
//! ```rust
//! use tryable::{assert_cause, assert_failure, assert_success, Try};
//!
//! let success = Try::<_, String>::success(42);
//! assert_success!(success.clone());
//! assert_success!(success, 42);
//!
//! let failure = Try::<i32, _>::failure("boom");
//! assert_failure!(failure);
//! assert_cause!(failure, "boom");
//! ```
//!
//! ## Counting Invocations
//!
//! ```rust
//! use tryable::testing::CallCounter;
//! use tryable::AsyncTry;
//!
//! # tokio_test::block_on(async {
//! let counter = CallCounter::new();
//! let c = counter.clone();
//! let t = AsyncTry::of(move || async move {
//!     c.hit();
//!     Ok::<_, String>(1)
//! });
//!
//! t.get().await.ok();
//! t.get().await.ok();
//! assert_eq!(counter.count(), 1);
//! # });
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A cloneable counter for asserting how many times a closure ran.
///
/// Clones share the same count, so a clone can be moved into an executor or
/// transformer while the test keeps the original.
#[derive(Debug, Clone, Default)]
pub struct CallCounter {
    hits: Arc<AtomicUsize>,
}

impl CallCounter {
    /// A counter starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one invocation.
    #[inline]
    pub fn hit(&self) {
        self.hits.fetch_add(1, Ordering::SeqCst);
    }

    /// Number of invocations recorded so far.
    #[inline]
    pub fn count(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Assert that a `Try` succeeded, optionally with a specific value.
///
/// # Example
///
/// ```rust
/// use tryable::{Try, assert_success};
///
/// let t = Try::<_, String>::success(42);
/// assert_success!(t.clone());
/// assert_success!(t, 42);
/// ```
#[macro_export]
macro_rules! assert_success {
    ($try:expr) => {
        match $try {
            $crate::Try::Success(_) => {}
            $crate::Try::Failure(e) => {
                panic!("Expected Success, got Failure: {:?}", e);
            }
        }
    };
    ($try:expr, $expected:expr) => {
        match $try {
            $crate::Try::Success(v) => {
                assert_eq!(v, $expected);
            }
            $crate::Try::Failure(e) => {
                panic!("Expected Success({:?}), got Failure: {:?}", $expected, e);
            }
        }
    };
}

/// Assert that a `Try` failed.
///
/// # Example
///
/// ```rust
/// use tryable::{Try, assert_failure};
///
/// let t = Try::<i32, _>::failure("boom");
/// assert_failure!(t);
/// ```
#[macro_export]
macro_rules! assert_failure {
    ($try:expr) => {
        match $try {
            $crate::Try::Failure(_) => {}
            $crate::Try::Success(v) => {
                panic!("Expected Failure, got Success: {:?}", v);
            }
        }
    };
}

/// Assert that a `Try` failed with a specific cause.
///
/// # Example
///
/// ```rust
/// use tryable::{Try, assert_cause};
///
/// let t = Try::<i32, _>::of(|| Err("timeout"));
/// assert_cause!(t, "timeout");
/// ```
#[macro_export]
macro_rules! assert_cause {
    ($try:expr, $expected:expr) => {
        match $try {
            $crate::Try::Failure(e) => {
                assert_eq!(e, $expected);
            }
            $crate::Try::Success(v) => {
                panic!(
                    "Expected Failure with cause {:?}, got Success: {:?}",
                    $expected, v
                );
            }
        }
    };
}

#[cfg(feature = "proptest")]
mod arbitrary {
    use proptest::prelude::*;

    use crate::{Either, Optional, Try};

    impl<T, E> Arbitrary for Try<T, E>
    where
        T: Arbitrary + 'static,
        E: Arbitrary + 'static,
    {
        type Parameters = (T::Parameters, E::Parameters);
        type Strategy = BoxedStrategy<Self>;

        fn arbitrary_with(args: Self::Parameters) -> Self::Strategy {
            let (t_params, e_params) = args;
            prop_oneof![
                any_with::<T>(t_params).prop_map(Try::success),
                any_with::<E>(e_params).prop_map(Try::failure),
            ]
            .boxed()
        }
    }

    impl<L, R> Arbitrary for Either<L, R>
    where
        L: Arbitrary + 'static,
        R: Arbitrary + 'static,
    {
        type Parameters = (L::Parameters, R::Parameters);
        type Strategy = BoxedStrategy<Self>;

        fn arbitrary_with(args: Self::Parameters) -> Self::Strategy {
            let (l_params, r_params) = args;
            prop_oneof![
                any_with::<L>(l_params).prop_map(Either::left),
                any_with::<R>(r_params).prop_map(Either::right),
            ]
            .boxed()
        }
    }

    impl<T> Arbitrary for Optional<T>
    where
        T: Arbitrary + 'static,
    {
        type Parameters = T::Parameters;
        type Strategy = BoxedStrategy<Self>;

        fn arbitrary_with(args: Self::Parameters) -> Self::Strategy {
            proptest::option::of(any_with::<T>(args))
                .prop_map(Optional::of_nullable)
                .boxed()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Try;

    #[test]
    fn call_counter_starts_at_zero() {
        assert_eq!(CallCounter::new().count(), 0);
    }

    #[test]
    fn call_counter_clones_share_count() {
        let counter = CallCounter::new();
        let clone = counter.clone();
        clone.hit();
        clone.hit();
        counter.hit();
        assert_eq!(counter.count(), 3);
        assert_eq!(clone.count(), 3);
    }

    #[test]
    fn assert_success_macro() {
        let t = Try::<_, String>::success(42);
        assert_success!(t.clone());
        assert_success!(t, 42);
    }

    #[test]
    fn assert_failure_macro() {
        let t = Try::<i32, _>::failure("error".to_string());
        assert_failure!(t);
    }

    #[test]
    fn assert_cause_macro() {
        let t = Try::<i32, _>::failure("timeout");
        assert_cause!(t, "timeout");
    }

    #[test]
    #[should_panic(expected = "Expected Success, got Failure")]
    fn assert_success_panics_on_failure() {
        let t = Try::<i32, _>::failure("error".to_string());
        assert_success!(t);
    }

    #[test]
    #[should_panic(expected = "Expected Failure, got Success")]
    fn assert_failure_panics_on_success() {
        let t = Try::<_, String>::success(42);
        assert_failure!(t);
    }

    #[test]
    #[should_panic(expected = "Expected Failure with cause")]
    fn assert_cause_panics_on_success() {
        let t = Try::<_, String>::success(42);
        assert_cause!(t, "error".to_string());
    }

    #[cfg(feature = "proptest")]
    mod proptest_tests {
        use crate::{Either, Optional, Try};
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn try_arbitrary_generates_valid_instances(t in any::<Try<i32, String>>()) {
                match &t {
                    Try::Success(_) => prop_assert!(t.is_success()),
                    Try::Failure(_) => prop_assert!(t.is_failure()),
                }
            }

            #[test]
            fn either_arbitrary_generates_valid_instances(e in any::<Either<String, i32>>()) {
                prop_assert_ne!(e.is_left(), e.is_right());
            }

            #[test]
            fn optional_arbitrary_generates_valid_instances(o in any::<Optional<u8>>()) {
                prop_assert_ne!(o.is_present(), o.is_empty());
            }
        }
    }
}
