//! # Tryable
//!
//! Result wrappers that make fallible code chainable, for synchronous and
//! asynchronous computations alike.
//!
//! ## Overview
//!
//! - [`Try`] holds the outcome of a computation that has already run. Every
//!   combinator is eager.
//! - [`AsyncTry`] holds a deferred computation. Steps chained onto it run in
//!   order once something awaits the chain, and each step runs **at most
//!   once** however many times the chain or any node derived from it is
//!   queried.
//! - [`Either`], [`Optional`] and [`HttpError`] are the supporting value types
//!   that the wrappers convert to and from.
//!
//! A failure anywhere in a chain is carried along silently and skips every
//! later success-path step. It only surfaces at a terminal call such as
//! `get`, `get_cause` or `resolve`.
//!
//! ## Quick Example
//!
//! ```rust
//! use tryable::{AsyncTry, HttpError};
//!
//! async fn fetch_launch(id: u32) -> Result<String, HttpError> {
//!     match id {
//!         1 => Ok("falcon-9".to_string()),
//!         _ => Err(HttpError::not_found()),
//!     }
//! }
//!
//! # tokio_test::block_on(async {
//! let rocket = AsyncTry::of(|| fetch_launch(1))
//!     .map(|name| name.to_uppercase())
//!     .map_failure(|e| e.with_message("launch lookup failed"));
//!
//! assert_eq!(rocket.get().await, Ok("FALCON-9".to_string()));
//!
//! let missing = AsyncTry::of(|| fetch_launch(2)).map(|name| name.len());
//! assert_eq!(missing.get_or_else(|_| async { 0 }).await, 0);
//! # });
//! ```
//!
//! ## Feature Flags
//!
//! - `tracing`: emit resolution events and enable `AsyncTry::instrument`
//! - `serde`: `Serialize`/`Deserialize` for [`HttpError`] and [`StatusCode`]
//! - `proptest`: `Arbitrary` implementations for the wrapper types

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod async_try;
pub mod either;
pub mod error;
pub mod http_error;
pub mod optional;
pub mod sync_try;
pub mod testing;

// Re-exports
pub use async_try::AsyncTry;
pub use either::Either;
pub use error::{Side, UsageError};
pub use http_error::{HttpError, StatusCode};
pub use optional::Optional;
pub use sync_try::Try;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::async_try::AsyncTry;
    pub use crate::either::Either;
    pub use crate::error::UsageError;
    pub use crate::http_error::HttpError;
    pub use crate::optional::Optional;
    pub use crate::sync_try::Try;
}
