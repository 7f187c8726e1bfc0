//! Memoized resolution of a single `AsyncTry` node.
//!
//! A chain of nodes is resolved from its oldest pending node down, one node at
//! a time, so resolving or dropping a long chain never nests one call per
//! step.

use std::cell::{Cell, RefCell};
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::lock::Mutex;

/// Resolution state of a node.
///
/// Moves from `Pending` to one of the settled variants exactly once and never
/// back.
pub(crate) enum State<T, E> {
    Pending {
        future: BoxFuture<'static, Result<T, E>>,
        upstream: Upstream,
    },
    Success(T),
    Failure(E),
}

impl<T, E> From<Result<T, E>> for State<T, E> {
    fn from(outcome: Result<T, E>) -> Self {
        match outcome {
            Ok(value) => State::Success(value),
            Err(error) => State::Failure(error),
        }
    }
}

/// The node a pending future reads from.
pub(crate) enum Upstream {
    /// The future is self-contained.
    Root,
    /// The future only reads the outcome of this node. Resolution settles it
    /// first, so the future finds it already settled.
    Step(Arc<dyn Node>),
    /// The future drives this node itself.
    #[cfg_attr(not(feature = "tracing"), allow(dead_code))]
    Wrapped(Arc<dyn Node>),
}

impl Upstream {
    fn handle(&self) -> Option<Arc<dyn Node>> {
        match self {
            Upstream::Root => None,
            Upstream::Step(node) | Upstream::Wrapped(node) => Some(Arc::clone(node)),
        }
    }
}

/// A node seen without its value and cause types.
pub(crate) trait Node: Send + Sync {
    /// Current state, without waiting.
    fn peek(&self) -> Peek;

    /// Resolve the node if needed.
    fn settle(&self) -> BoxFuture<'_, ()>;
}

pub(crate) enum Peek {
    Settled,
    /// Still pending. Carries the step upstream that has to settle first.
    Pending(Option<Arc<dyn Node>>),
    /// Another caller is resolving the node right now.
    Busy,
}

/// A deferred computation together with its cached outcome.
///
/// The async mutex serializes resolution: the first caller drives the pending
/// future while later callers wait on the lock and then read the settled
/// state. If the driving caller is dropped mid-await the future stays in
/// `Pending` and the next caller picks it up where it stopped.
pub(crate) struct Memo<T, E> {
    state: Mutex<State<T, E>>,
    // Must stay the last field: it drops after `state` lets go of upstream.
    _release: Release,
}

impl<T, E> Memo<T, E> {
    pub(crate) fn pending(future: BoxFuture<'static, Result<T, E>>, upstream: Upstream) -> Self {
        Memo {
            state: Mutex::new(State::Pending { future, upstream }),
            _release: Release,
        }
    }

    pub(crate) fn settled(outcome: Result<T, E>) -> Self {
        Memo {
            state: Mutex::new(State::from(outcome)),
            _release: Release,
        }
    }

    /// Short name of the current state, without waiting.
    pub(crate) fn label(&self) -> &'static str {
        match self.state.try_lock() {
            Some(state) => match &*state {
                State::Pending { .. } => "pending",
                State::Success(_) => "success",
                State::Failure(_) => "failure",
            },
            None => "resolving",
        }
    }

    /// Resolve the node if needed, then hand the settled outcome to `f`.
    pub(crate) async fn inspect<R, F>(&self, f: F) -> R
    where
        F: FnOnce(Result<&T, &E>) -> R,
    {
        let mut state = self.state.lock().await;
        loop {
            match &mut *state {
                State::Success(value) => return f(Ok(&*value)),
                State::Failure(error) => return f(Err(&*error)),
                State::Pending { future, upstream } => {
                    if let Upstream::Step(node) = upstream {
                        settle_chain(Arc::clone(node)).await;
                    }

                    #[cfg(feature = "tracing")]
                    tracing::trace!("awaiting deferred computation");

                    let outcome = future.await;

                    #[cfg(feature = "tracing")]
                    {
                        let settled = if outcome.is_ok() { "success" } else { "failure" };
                        tracing::trace!(outcome = settled, "deferred computation settled");
                    }

                    *state = State::from(outcome);
                }
            }
        }
    }
}

impl<T: Clone, E: Clone> Memo<T, E> {
    /// Resolve the node if needed and return a copy of its outcome.
    pub(crate) async fn resolve(&self) -> Result<T, E> {
        self.inspect(|outcome| match outcome {
            Ok(value) => Ok(value.clone()),
            Err(error) => Err(error.clone()),
        })
        .await
    }

    /// The value, if the node has already settled successfully.
    pub(crate) fn known_success(&self) -> Option<T> {
        match &*self.state.try_lock()? {
            State::Success(value) => Some(value.clone()),
            _ => None,
        }
    }

    /// The cause, if the node has already settled as a failure.
    pub(crate) fn known_failure(&self) -> Option<E> {
        match &*self.state.try_lock()? {
            State::Failure(error) => Some(error.clone()),
            _ => None,
        }
    }
}

impl<T, E> Node for Memo<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    fn peek(&self) -> Peek {
        match self.state.try_lock() {
            None => Peek::Busy,
            Some(state) => match &*state {
                State::Pending {
                    upstream: Upstream::Step(node),
                    ..
                } => Peek::Pending(Some(Arc::clone(node))),
                State::Pending { .. } => Peek::Pending(None),
                State::Success(_) | State::Failure(_) => Peek::Settled,
            },
        }
    }

    fn settle(&self) -> BoxFuture<'_, ()> {
        Box::pin(self.inspect(|_| ()))
    }
}

/// Settle `nearest` and every pending step above it, oldest first.
///
/// Each node then finds its upstream already settled, so no node drives
/// another one from inside its own future.
async fn settle_chain(nearest: Arc<dyn Node>) {
    let mut unsettled = Vec::new();
    let mut next = Some(nearest);
    while let Some(node) = next.take() {
        match node.peek() {
            Peek::Settled => {}
            Peek::Pending(upstream) => {
                next = upstream;
                unsettled.push(node);
            }
            Peek::Busy => unsettled.push(node),
        }
    }

    #[cfg(feature = "tracing")]
    {
        if unsettled.len() > 1 {
            tracing::trace!(depth = unsettled.len(), "settling upstream steps");
        }
    }

    for node in unsettled.into_iter().rev() {
        node.settle().await;
    }
}

impl<T, E> Drop for Memo<T, E> {
    fn drop(&mut self) {
        if let State::Pending { upstream, .. } = self.state.get_mut() {
            if let Some(node) = upstream.handle() {
                release(node);
            }
        }
    }
}

thread_local! {
    static RELEASED: RefCell<Vec<Arc<dyn Node>>> = const { RefCell::new(Vec::new()) };
    static DRAINING: Cell<bool> = const { Cell::new(false) };
}

/// Park an upstream handle until the dropping node's state is gone.
fn release(node: Arc<dyn Node>) {
    let _ = RELEASED.try_with(move |queue| queue.borrow_mut().push(node));
}

/// Drops parked upstream handles one at a time.
///
/// The outermost teardown on a thread does the draining. A node dropped during
/// the drain only parks its own upstream, so a long unresolved chain is torn
/// down in a loop.
struct Release;

impl Drop for Release {
    fn drop(&mut self) {
        let Ok(false) = DRAINING.try_with(|draining| draining.replace(true)) else {
            return;
        };
        while let Some(node) = RELEASED
            .try_with(|queue| queue.borrow_mut().pop())
            .ok()
            .flatten()
        {
            drop(node);
        }
        let _ = DRAINING.try_with(|draining| draining.set(false));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::CallCounter;
    use futures::FutureExt;

    fn root(value: i32) -> Arc<Memo<i32, String>> {
        Arc::new(Memo::pending(async move { Ok(value) }.boxed(), Upstream::Root))
    }

    fn step(upstream: &Arc<Memo<i32, String>>) -> Arc<Memo<i32, String>> {
        let node: Arc<dyn Node> = upstream.clone();
        let upstream = Arc::clone(upstream);
        Arc::new(Memo::pending(
            async move { upstream.resolve().await.map(|v| v + 1) }.boxed(),
            Upstream::Step(node),
        ))
    }

    #[tokio::test]
    async fn test_pending_resolves_once() {
        let counter = CallCounter::new();
        let c = counter.clone();
        let memo = Memo::<i32, String>::pending(
            async move {
                c.hit();
                Ok(3)
            }
            .boxed(),
            Upstream::Root,
        );

        assert_eq!(memo.label(), "pending");
        assert_eq!(memo.known_success(), None);

        assert_eq!(memo.resolve().await, Ok(3));
        assert_eq!(memo.resolve().await, Ok(3));
        assert!(memo.inspect(|o| o.is_ok()).await);

        assert_eq!(counter.count(), 1);
        assert_eq!(memo.label(), "success");
        assert_eq!(memo.known_success(), Some(3));
    }

    #[tokio::test]
    async fn test_settled_failure() {
        let memo = Memo::<i32, &str>::settled(Err("boom"));
        assert_eq!(memo.label(), "failure");
        assert_eq!(memo.known_failure(), Some("boom"));
        assert_eq!(memo.known_success(), None);
        assert_eq!(memo.resolve().await, Err("boom"));
    }

    #[tokio::test]
    async fn test_peek_follows_step_links() {
        let first = root(1);
        let second = step(&first);

        assert!(matches!(first.peek(), Peek::Pending(None)));
        match second.peek() {
            Peek::Pending(Some(upstream)) => {
                assert!(matches!(upstream.peek(), Peek::Pending(None)))
            }
            _ => panic!("expected a pending step"),
        }

        assert_eq!(second.resolve().await, Ok(2));
        assert!(matches!(first.peek(), Peek::Settled));
        assert!(matches!(second.peek(), Peek::Settled));
    }

    #[tokio::test]
    async fn test_settling_a_step_settles_its_upstream_first() {
        let first = root(1);
        let second = step(&first);
        let third = step(&second);

        third.settle().await;
        assert_eq!(first.label(), "success");
        assert_eq!(second.label(), "success");
        assert_eq!(third.known_success(), Some(3));
    }

    #[tokio::test]
    async fn test_settled_node_releases_upstream() {
        let first = root(1);
        let second = step(&first);
        assert_eq!(Arc::strong_count(&first), 3);

        assert_eq!(second.resolve().await, Ok(2));
        assert_eq!(Arc::strong_count(&first), 1);
    }

    #[test]
    fn test_drop_releases_pending_upstream() {
        let first = root(1);
        let second = step(&first);
        drop(second);
        assert_eq!(Arc::strong_count(&first), 1);
        assert!(!DRAINING.with(|draining| draining.get()));
        assert!(RELEASED.with(|queue| queue.borrow().is_empty()));
    }
}
