//! # Seatmap Runtime
//!
//! Runtime for the seat map engine.
//!
//! This crate provides the Store that owns the single engine instance,
//! runs the reducer for every dispatched action, and publishes state
//! snapshots to subscribed views.
//!
//! ## Core Components
//!
//! - **Store**: Owns state, reducer and environment; dispatches synchronously
//! - **Subscriptions**: Each dispatch publishes a [`StateChange`] to observers
//! - **Editor API**: Read model, import/export and pointer release on [`SeatMapStore`]
//! - **Configuration**: [`EditorConfig`], from code or environment variables
//!
//! ## Example
//!
//! ```
//! use seatmap_core::{Mode, SeatKind, SeatMapAction, SeatState};
//! use seatmap_runtime::{EditorConfig, SeatMapStore};
//!
//! # fn main() -> Result<(), seatmap_runtime::StoreError> {
//! let mut store = SeatMapStore::with_config(&EditorConfig::default())?;
//! let mut changes = store.subscribe();
//!
//! store.send(SeatMapAction::SetMode(Mode::Edit));
//! store.send(SeatMapAction::SelectKind(SeatKind::brick()));
//! store.send(SeatMapAction::PointerDown { row: 0, col: 0 });
//! store.release_pointer();
//!
//! assert_eq!(store.seat(0, 0).map(|s| &s.state), Some(&SeatState::Blocked));
//! assert!(changes.try_recv().is_ok());
//! # Ok(())
//! # }
//! ```

use seatmap_core::{SmallVec, effect::Effect, reducer::Reducer};
use std::sync::Arc;

/// Editor configuration
pub mod config;

/// Seat map specific Store API
pub mod editor;

/// Metric names and recorders
pub mod metrics;

pub use config::EditorConfig;
pub use editor::SeatMapStore;
pub use error::StoreError;
pub use store::{StateChange, Store};

/// Error types for the Store runtime
pub mod error {
    use seatmap_core::SeatMapError;
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// The engine rejected a request (invalid document, dimensions, ...)
        ///
        /// State is left unchanged.
        #[error(transparent)]
        SeatMap(#[from] SeatMapError),

        /// The editor configuration cannot be used to build a store
        #[error("Invalid editor configuration: {0}")]
        InvalidConfig(String),
    }
}

/// The Store and its snapshot subscriptions
pub mod store {
    use super::{Arc, Effect, Reducer, SmallVec};
    use crate::metrics::StoreMetrics;
    use tokio::sync::broadcast;

    /// Default capacity of the snapshot broadcast channel
    pub const DEFAULT_BROADCAST_CAPACITY: usize = 16;

    /// One dispatched action as seen by an observer
    #[derive(Debug)]
    pub struct StateChange<S> {
        /// Effects the reducer returned, in order
        pub effects: Vec<Effect>,
        /// State right after the action was applied
        pub snapshot: Arc<S>,
    }

    impl<S> Clone for StateChange<S> {
        fn clone(&self) -> Self {
            Self {
                effects: self.effects.clone(),
                snapshot: Arc::clone(&self.snapshot),
            }
        }
    }

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind an `Arc`, copied on write while snapshots are shared)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Snapshot broadcasting to observers
    ///
    /// The store is single-owner: every mutation goes through
    /// [`Store::send`], which takes `&mut self`. Observers never borrow the
    /// store; they receive immutable snapshots through [`Store::subscribe`].
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
        state: Arc<S>,
        reducer: R,
        environment: E,
        /// Snapshot broadcast channel.
        ///
        /// Only fed while at least one receiver exists.
        changes: broadcast::Sender<StateChange<S>>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
        S: Clone,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// The snapshot broadcast capacity is [`DEFAULT_BROADCAST_CAPACITY`].
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_broadcast_capacity(
                initial_state,
                reducer,
                environment,
                DEFAULT_BROADCAST_CAPACITY,
            )
        }

        /// Create a new Store with custom snapshot broadcast capacity
        ///
        /// Observers that fall more than `capacity` changes behind skip
        /// ahead and see [`broadcast::error::TryRecvError::Lagged`]. A
        /// capacity of 0 is raised to 1.
        #[must_use]
        pub fn with_broadcast_capacity(
            initial_state: S,
            reducer: R,
            environment: E,
            capacity: usize,
        ) -> Self {
            let (changes, _) = broadcast::channel(capacity.max(1));

            Self {
                state: Arc::new(initial_state),
                reducer,
                environment,
                changes,
            }
        }

        /// Send an action to the store
        ///
        /// Runs the reducer synchronously, publishes a [`StateChange`] to
        /// subscribers (if any), and returns the effects.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub fn send(&mut self, action: A) -> SmallVec<[Effect; 4]> {
            tracing::trace!("Processing action");

            let start = std::time::Instant::now();
            let effects = {
                let span = tracing::debug_span!("reducer_execution");
                let _enter = span.enter();
                self.reducer
                    .reduce(Arc::make_mut(&mut self.state), action, &self.environment)
            };
            StoreMetrics::record_action(start.elapsed(), &effects);

            tracing::trace!("Reducer completed, returned {} effects", effects.len());
            self.publish(&effects);
            effects
        }

        fn publish(&self, effects: &[Effect]) {
            if self.changes.receiver_count() == 0 {
                return;
            }
            let change = StateChange {
                effects: effects.to_vec(),
                snapshot: Arc::clone(&self.state),
            };
            if self.changes.send(change).is_err() {
                tracing::trace!("No observer received the state change");
            }
        }

        /// Current state
        #[must_use]
        pub fn state(&self) -> &S {
            &self.state
        }

        /// Shared handle to the current state
        ///
        /// The snapshot never changes; the next mutating action copies the
        /// state if a snapshot is still alive.
        #[must_use]
        pub fn snapshot(&self) -> Arc<S> {
            Arc::clone(&self.state)
        }

        /// Subscribe to state changes
        ///
        /// The receiver sees every action dispatched after this call. It
        /// can be drained with `try_recv` from a synchronous event loop.
        #[must_use]
        pub fn subscribe(&self) -> broadcast::Receiver<StateChange<S>> {
            self.changes.subscribe()
        }

        /// Number of live subscribers
        #[must_use]
        pub fn subscriber_count(&self) -> usize {
            self.changes.receiver_count()
        }

        /// Injected environment
        #[must_use]
        pub const fn environment(&self) -> &E {
            &self.environment
        }
    }

    #[cfg(test)]
    mod tests {
        #![allow(clippy::unwrap_used)]

        use super::*;
        use seatmap_core::smallvec;
        use tokio::sync::broadcast::error::TryRecvError;

        #[derive(Clone, Debug, Default, PartialEq)]
        struct TestState {
            count: u32,
        }

        enum TestAction {
            Increment,
            Noop,
        }

        struct TestReducer;

        impl Reducer for TestReducer {
            type State = TestState;
            type Action = TestAction;
            type Environment = ();

            fn reduce(
                &self,
                state: &mut Self::State,
                action: Self::Action,
                _env: &Self::Environment,
            ) -> SmallVec<[Effect; 4]> {
                match action {
                    TestAction::Increment => {
                        state.count += 1;
                        smallvec![Effect::LayoutChanged]
                    },
                    TestAction::Noop => smallvec![Effect::None],
                }
            }
        }

        #[test]
        fn test_send_updates_state() {
            let mut store = Store::new(TestState::default(), TestReducer, ());
            let effects = store.send(TestAction::Increment);
            assert_eq!(effects.as_slice(), &[Effect::LayoutChanged]);
            assert_eq!(store.state().count, 1);
        }

        #[test]
        fn test_snapshots_are_immutable() {
            let mut store = Store::new(TestState::default(), TestReducer, ());
            let before = store.snapshot();
            store.send(TestAction::Increment);
            assert_eq!(before.count, 0);
            assert_eq!(store.snapshot().count, 1);
        }

        #[test]
        fn test_subscribers_see_every_action() {
            let mut store = Store::new(TestState::default(), TestReducer, ());
            let mut rx = store.subscribe();

            store.send(TestAction::Increment);
            store.send(TestAction::Noop);

            let first = rx.try_recv().unwrap();
            assert_eq!(first.snapshot.count, 1);
            assert_eq!(first.effects, vec![Effect::LayoutChanged]);
            let second = rx.try_recv().unwrap();
            assert_eq!(second.effects, vec![Effect::None]);
            assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
        }

        #[test]
        fn test_slow_subscriber_lags() {
            let mut store =
                Store::with_broadcast_capacity(TestState::default(), TestReducer, (), 2);
            let mut rx = store.subscribe();
            for _ in 0..5 {
                store.send(TestAction::Increment);
            }
            assert!(matches!(rx.try_recv(), Err(TryRecvError::Lagged(3))));
            assert_eq!(rx.try_recv().unwrap().snapshot.count, 4);
        }

        #[test]
        fn test_zero_capacity_is_raised() {
            let mut store =
                Store::with_broadcast_capacity(TestState::default(), TestReducer, (), 0);
            let mut rx = store.subscribe();
            store.send(TestAction::Increment);
            assert_eq!(rx.try_recv().unwrap().snapshot.count, 1);
        }

        #[test]
        fn test_dropped_subscriber_is_forgotten() {
            let mut store = Store::new(TestState::default(), TestReducer, ());
            let rx = store.subscribe();
            assert_eq!(store.subscriber_count(), 1);
            drop(rx);
            assert_eq!(store.subscriber_count(), 0);
            store.send(TestAction::Increment);
            assert_eq!(store.state().count, 1);
        }
    }
}
