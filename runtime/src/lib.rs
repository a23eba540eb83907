//! # Community Portal Runtime
//!
//! Runtime implementation for the Community Portal architecture.
//!
//! This crate provides the Store runtime that coordinates reducer execution
//! and effect handling.
//!
//! ## Core Components
//!
//! - **Store**: The runtime that manages state and executes effects
//! - **Effect Executor**: Executes effect descriptions and feeds actions back
//!   to reducers
//!
//! The portal is a one-turn-at-a-time system: every action runs its reducer
//! to completion behind a write lock before the next action is processed.
//! Effects are fire-and-forget continuations that re-enter the same queue
//! through [`Store::send`]; they never observe an intermediate state.
//!
//! ## Example
//!
//! ```ignore
//! use community_portal_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action
//! store.send(Action::DoSomething).await;
//!
//! // Read state
//! let value = store.state(|s| s.some_field).await;
//! ```

use community_portal_core::{effect::Effect, reducer::Reducer};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::RwLock;

/// The Store runtime
///
/// The Store manages:
/// 1. State (behind `RwLock`, written only while a reducer runs)
/// 2. Reducer (business logic)
/// 3. Environment (injected dependencies)
/// 4. Effect execution (with feedback loop)
///
/// # Type Parameters
///
/// - `S`: State type
/// - `A`: Action type
/// - `E`: Environment type
/// - `R`: Reducer implementation
pub struct Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    state: Arc<RwLock<S>>,
    reducer: Arc<R>,
    environment: Arc<E>,
}

impl<S, A, E, R> Clone for Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            reducer: Arc::clone(&self.reducer),
            environment: Arc::clone(&self.environment),
        }
    }
}

impl<S, A, E, R> Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
    A: Send + 'static,
    S: Send + Sync + 'static,
    E: Send + Sync + 'static,
{
    /// Create a new store with initial state, reducer, and environment
    #[must_use]
    pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
        Self {
            state: Arc::new(RwLock::new(initial_state)),
            reducer: Arc::new(reducer),
            environment: Arc::new(environment),
        }
    }

    /// Send an action to the store
    ///
    /// This is the primary way to interact with the store:
    /// 1. Acquires the write lock on state
    /// 2. Calls the reducer with (state, action, environment)
    /// 3. Starts executing returned effects in background tasks
    ///
    /// The reducer runs synchronously while holding the write lock, so
    /// concurrent `send` calls serialize at the reducer level. `send`
    /// returns after starting effect execution, not after completion.
    pub async fn send(&self, action: A) {
        let effects = {
            let mut state = self.state.write().await;
            self.reducer.reduce(&mut state, action, &self.environment)
        };

        for effect in effects {
            self.execute(effect);
        }
    }

    /// Read a projection of the current state
    ///
    /// Holds a read lock only for the duration of the closure.
    pub async fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&S) -> T,
    {
        let state = self.state.read().await;
        f(&state)
    }

    /// Start executing an effect without waiting for it
    fn execute(&self, effect: Effect<A>) {
        match effect {
            Effect::None => {},
            // Parallel branches each get their own task
            Effect::Parallel(effects) => {
                for effect in effects {
                    self.execute(effect);
                }
            },
            other => {
                let store = self.clone();
                tokio::task::spawn(async move {
                    store.run_effect(other).await;
                });
            },
        }
    }

    /// Run a single effect to completion, feeding produced actions back in
    ///
    /// Boxed so that sequential effects can recurse.
    fn run_effect(&self, effect: Effect<A>) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        Box::pin(async move {
            match effect {
                Effect::None => {},
                Effect::Parallel(effects) | Effect::Sequential(effects) => {
                    for effect in effects {
                        self.run_effect(effect).await;
                    }
                },
                Effect::Delay { duration, action } => {
                    tracing::trace!(?duration, "delayed action");
                    tokio::time::sleep(duration).await;
                    self.send(*action).await;
                },
                Effect::Future(future) => {
                    if let Some(action) = future.await {
                        self.send(action).await;
                    }
                },
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use community_portal_core::{SmallVec, smallvec};
    use std::time::Duration;

    #[derive(Clone, Debug, Default)]
    struct TestState {
        count: i64,
        pinged: bool,
    }

    #[derive(Clone, Debug)]
    enum TestAction {
        Increment,
        PingLater(Duration),
        Ping,
    }

    struct TestEnv;

    struct TestReducer;

    impl Reducer for TestReducer {
        type State = TestState;
        type Action = TestAction;
        type Environment = TestEnv;

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                TestAction::Increment => {
                    state.count += 1;
                    smallvec![Effect::None]
                },
                TestAction::PingLater(duration) => {
                    smallvec![Effect::Delay {
                        duration,
                        action: Box::new(TestAction::Ping),
                    }]
                },
                TestAction::Ping => {
                    state.pinged = true;
                    smallvec![Effect::None]
                },
            }
        }
    }

    #[tokio::test]
    async fn send_runs_reducer() {
        let store = Store::new(TestState::default(), TestReducer, TestEnv);

        store.send(TestAction::Increment).await;
        store.send(TestAction::Increment).await;

        let count = store.state(|s| s.count).await;
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn concurrent_sends_serialize() {
        let store = Store::new(TestState::default(), TestReducer, TestEnv);

        let handles: Vec<_> = (0..10)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move {
                    store.send(TestAction::Increment).await;
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.await.is_ok());
        }

        let count = store.state(|s| s.count).await;
        assert_eq!(count, 10);
    }

    #[tokio::test]
    async fn delayed_action_feeds_back() {
        let store = Store::new(TestState::default(), TestReducer, TestEnv);

        store
            .send(TestAction::PingLater(Duration::from_millis(10)))
            .await;

        // The continuation re-enters through send once the delay elapses
        tokio::time::sleep(Duration::from_millis(50)).await;
        let pinged = store.state(|s| s.pinged).await;
        assert!(pinged);
    }

    #[tokio::test]
    async fn future_effect_feeds_back() {
        struct FutureReducer;

        impl Reducer for FutureReducer {
            type State = TestState;
            type Action = TestAction;
            type Environment = TestEnv;

            fn reduce(
                &self,
                state: &mut Self::State,
                action: Self::Action,
                _env: &Self::Environment,
            ) -> SmallVec<[Effect<Self::Action>; 4]> {
                match action {
                    TestAction::Increment => {
                        state.count += 1;
                        smallvec![Effect::Future(Box::pin(async {
                            Some(TestAction::Ping)
                        }))]
                    },
                    TestAction::Ping => {
                        state.pinged = true;
                        smallvec![Effect::None]
                    },
                    TestAction::PingLater(_) => smallvec![Effect::None],
                }
            }
        }

        let store = Store::new(TestState::default(), FutureReducer, TestEnv);
        store.send(TestAction::Increment).await;

        tokio::time::sleep(Duration::from_millis(50)).await;
        let (count, pinged) = store.state(|s| (s.count, s.pinged)).await;
        assert_eq!(count, 1);
        assert!(pinged);
    }

    #[tokio::test]
    async fn state_isolation_between_stores() {
        let store1 = Store::new(TestState::default(), TestReducer, TestEnv);
        let store2 = Store::new(TestState::default(), TestReducer, TestEnv);

        store1.send(TestAction::Increment).await;
        store1.send(TestAction::Increment).await;
        store2.send(TestAction::Increment).await;

        assert_eq!(store1.state(|s| s.count).await, 2);
        assert_eq!(store2.state(|s| s.count).await, 1);
    }
}
