//! # Seatmap Core
//!
//! Core types and the pure state engine of the seat map editor.
//!
//! A seat map is a rectangular grid of cells that a user paints with seat
//! kinds (ticketable, blocked, empty) through click-and-drag gestures. This
//! crate owns the authoritative model and every rule that governs it; the
//! presentation layer only reads state and dispatches actions.
//!
//! ## Core Concepts
//!
//! - **State**: [`SeatMapState`], grid plus catalogs plus interaction state
//! - **Action**: [`SeatMapAction`], every input the presentation layer can send
//! - **Reducer**: [`SeatMapReducer`], `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: [`effect::Effect`], what the presentation layer should react to
//! - **Environment**: [`environment::SeatMapEnvironment`], injected label formatter
//!
//! ## Example
//!
//! ```
//! use seatmap_core::{
//!     environment::SeatMapEnvironment, reducer::Reducer, Mode, SeatKind, SeatMapAction,
//!     SeatMapReducer, SeatMapState, SeatState,
//! };
//!
//! let env = SeatMapEnvironment::default();
//! let reducer = SeatMapReducer::new();
//! let mut state = SeatMapState::default();
//!
//! reducer.reduce(&mut state, SeatMapAction::SetMode(Mode::Edit), &env);
//! reducer.reduce(&mut state, SeatMapAction::SelectKind(SeatKind::brick()), &env);
//! reducer.reduce(&mut state, SeatMapAction::PointerDown { row: 0, col: 0 }, &env);
//! reducer.reduce(&mut state, SeatMapAction::PointerUp, &env);
//!
//! assert_eq!(state.seat(0, 0).map(|s| &s.state), Some(&SeatState::Blocked));
//! ```

pub use smallvec::{SmallVec, smallvec};

pub mod document;
pub mod error;
pub mod grid;
pub mod interaction;
pub mod label;
pub mod paint;
pub mod registry;
pub mod seat_map;
pub mod state;
pub mod sync;
pub mod types;

pub use document::{LoadedLayout, SeatMapDocument, SeatRecord};
pub use error::SeatMapError;
pub use grid::Grid;
pub use interaction::{InteractionState, Mode};
pub use registry::Registries;
pub use seat_map::{SeatMapAction, SeatMapReducer};
pub use state::SeatMapState;
pub use types::{Seat, SeatId, SeatKind, SeatKindId, SeatState, TicketType, TicketTypeId};

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They contain all business logic and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Validates the action
        /// 2. Updates state in place
        /// 3. Returns effect descriptions for the presentation layer
        ///
        /// Reducers never fail: an action that cannot be applied leaves the
        /// state unchanged.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect; 4]>;
    }
}

/// Effect module - Descriptions of what changed
///
/// Effects are values returned by the reducer. The engine itself never
/// performs I/O; the presentation layer decides what to redraw or show.
pub mod effect {
    use crate::types::SeatId;

    /// Effect type - describes something the presentation layer may react to
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum Effect {
        /// Nothing observable happened
        None,

        /// A paint changed a single cell
        SeatUpdated(SeatId),

        /// A cell was clicked in normal mode (read-only select signal)
        SeatSelected(SeatId),

        /// Dimensions, catalogs or the whole document changed
        LayoutChanged,
    }

    impl Effect {
        /// True if this effect reports a state change
        #[must_use]
        pub const fn is_mutation(&self) -> bool {
            matches!(self, Self::SeatUpdated(_) | Self::LayoutChanged)
        }
    }

}

/// Environment module - Dependency injection traits
///
/// All replaceable collaborators of the engine are abstracted behind traits
/// and injected via the Environment parameter.
pub mod environment {
    use crate::label::seat_label;
    use std::sync::Arc;

    /// Formats seat labels from coordinates
    ///
    /// # Examples
    ///
    /// ```
    /// use seatmap_core::environment::{GridLabeler, SeatLabeler};
    ///
    /// assert_eq!(GridLabeler.label(1, 11), "B12");
    /// ```
    pub trait SeatLabeler: Send + Sync {
        /// Label of the seat at `(row, col)`
        fn label(&self, row: u32, col: u32) -> String;
    }

    /// Row letter plus one-based column number ("A1", "B12", "AA3")
    #[derive(Debug, Clone, Copy, Default)]
    pub struct GridLabeler;

    impl SeatLabeler for GridLabeler {
        fn label(&self, row: u32, col: u32) -> String {
            seat_label(row, col)
        }
    }

    /// Seat map environment
    #[derive(Clone)]
    pub struct SeatMapEnvironment {
        /// Label formatter for newly materialized seats
        pub labeler: Arc<dyn SeatLabeler>,
    }

    impl SeatMapEnvironment {
        /// Create a new environment with the given label formatter
        #[must_use]
        pub fn new(labeler: impl SeatLabeler + 'static) -> Self {
            Self {
                labeler: Arc::new(labeler),
            }
        }
    }

    impl Default for SeatMapEnvironment {
        fn default() -> Self {
            Self::new(GridLabeler)
        }
    }

    impl std::fmt::Debug for SeatMapEnvironment {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("SeatMapEnvironment").finish_non_exhaustive()
        }
    }
}
