//! Tracing support for `AsyncTry`.
//!
//! Feature-gated behind `#[cfg(feature = "tracing")]`.

use std::sync::Arc;

use super::memo::{Node, Upstream};
use super::AsyncTry;

impl<T, E> AsyncTry<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    /// Resolve this node inside a tracing span.
    ///
    /// Returns a new node with the same outcome. The span is entered while that
    /// node is being resolved, which includes driving any still-pending
    /// upstream steps.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use tracing::info_span;
    /// use tryable::AsyncTry;
    ///
    /// let rocket = AsyncTry::of(|| fetch_latest_launch())
    ///     .map(|launch| launch.rocket)
    ///     .instrument(info_span!("latest_rocket"));
    /// ```
    pub fn instrument(&self, span: tracing::Span) -> AsyncTry<T, E> {
        use tracing::Instrument as _;

        let node: Arc<dyn Node> = self.memo.clone();
        let upstream = Arc::clone(&self.memo);
        AsyncTry::linked(
            Upstream::Wrapped(node),
            async move { upstream.resolve().await }.instrument(span),
        )
    }
}
