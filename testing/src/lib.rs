//! # Seatmap Testing
//!
//! Testing utilities and helpers for the seat map engine.
//!
//! This crate provides:
//! - The Given/When/Then [`ReducerTest`] harness and effect assertions
//! - Fixtures for common editor states
//! - proptest strategies for actions and layouts
//! - Tracing initialisation for tests
//!
//! ## Example
//!
//! ```
//! use seatmap_core::{SeatKind, SeatMapAction, SeatMapReducer, SeatState};
//! use seatmap_testing::{ReducerTest, fixtures};
//!
//! ReducerTest::new(SeatMapReducer::new())
//!     .with_env(fixtures::test_environment())
//!     .given_state(fixtures::editing(SeatKind::brick()))
//!     .when_actions(fixtures::drag(&[(0, 0), (0, 1)]))
//!     .then_state(|state| {
//!         assert_eq!(state.seat(0, 1).map(|s| &s.state), Some(&SeatState::Blocked));
//!     })
//!     .run();
//! ```


pub use fixtures::test_environment;
pub use reducer_test::{ReducerTest, assertions};

/// Fixtures for common editor states.
pub mod fixtures {
    use seatmap_core::environment::{GridLabeler, SeatMapEnvironment};
    use seatmap_core::reducer::Reducer;
    use seatmap_core::{
        Grid, LoadedLayout, Mode, Registries, SeatId, SeatKind, SeatMapAction, SeatMapReducer,
        SeatMapState, SeatState,
    };

    /// Environment with the stock label formatter
    #[must_use]
    pub fn test_environment() -> SeatMapEnvironment {
        SeatMapEnvironment::new(GridLabeler)
    }

    /// Default 10x26 state in edit mode with `kind` as the brush
    #[must_use]
    pub fn editing(kind: SeatKind) -> SeatMapState {
        let mut state = SeatMapState::default();
        let env = test_environment();
        SeatMapReducer::new().reduce(&mut state, SeatMapAction::SetMode(Mode::Edit), &env);
        SeatMapReducer::new().reduce(&mut state, SeatMapAction::SelectKind(kind), &env);
        state
    }

    /// A `rows x cols` state with the stock catalogs and the given seats
    /// painted; every other seat is empty.
    ///
    /// # Panics
    ///
    /// Panics if a dimension is 0 or a seat is out of bounds.
    #[must_use]
    pub fn layout<I>(rows: u32, cols: u32, seats: I) -> SeatMapState
    where
        I: IntoIterator<Item = (SeatId, SeatState)>,
    {
        layout_with(rows, cols, seats, Registries::with_defaults())
    }

    /// Like [`layout`] with custom catalogs. Ticket references missing from
    /// `registries` are cleared.
    ///
    /// # Panics
    ///
    /// Panics if a dimension is 0 or a seat is out of bounds.
    #[must_use]
    #[allow(clippy::expect_used)] // Fixture
    pub fn layout_with<I>(rows: u32, cols: u32, seats: I, registries: Registries) -> SeatMapState
    where
        I: IntoIterator<Item = (SeatId, SeatState)>,
    {
        let grid = Grid::from_states(rows, cols, seats, &GridLabeler)
            .expect("fixture layout must fit its dimensions");
        let mut state = SeatMapState::default();
        state.load(LoadedLayout::new(grid, registries));
        state
    }

    /// The pointer events of one drag gesture over `cells`: a press on the
    /// first cell, enters on the rest, then a release.
    #[must_use]
    pub fn drag(cells: &[(u32, u32)]) -> Vec<SeatMapAction> {
        let mut actions: Vec<SeatMapAction> = cells
            .iter()
            .enumerate()
            .map(|(i, &(row, col))| {
                if i == 0 {
                    SeatMapAction::PointerDown { row, col }
                } else {
                    SeatMapAction::PointerEnter { row, col }
                }
            })
            .collect();
        actions.push(SeatMapAction::PointerUp);
        actions
    }
}

/// Property-based testing utilities using proptest.
pub mod properties {
    use proptest::prelude::*;
    use seatmap_core::registry::default_ticket_types;
    use seatmap_core::{Mode, Registries, SeatId, SeatKind, SeatMapAction, SeatState, TicketType};

    /// Largest dimension generated by [`dimensions`]
    pub const MAX_DIMENSION: u32 = 12;

    /// Grid dimensions between 1 and [`MAX_DIMENSION`]
    pub fn dimensions() -> impl Strategy<Value = (u32, u32)> {
        (1..=MAX_DIMENSION, 1..=MAX_DIMENSION)
    }

    /// Editing modes
    pub fn mode() -> impl Strategy<Value = Mode> {
        prop_oneof![Just(Mode::Normal), Just(Mode::Pan), Just(Mode::Edit)]
    }

    /// The stock kinds plus one user-defined kind
    pub fn seat_kind() -> impl Strategy<Value = SeatKind> {
        prop_oneof![
            Just(SeatKind::ticket()),
            Just(SeatKind::brick()),
            Just(SeatKind::none()),
            Just(SeatKind::new("stage", "Stage")),
        ]
    }

    /// The stock ticket types plus one not in any catalog
    pub fn ticket_type() -> impl Strategy<Value = TicketType> {
        let mut choices = default_ticket_types();
        choices.push(TicketType::new("gold", "Gold", "#ffd700", "G"));
        proptest::sample::select(choices)
    }

    /// Seat kind catalogs with unique ids, mixing stock and custom ids
    pub fn seat_kind_catalog() -> impl Strategy<Value = Vec<SeatKind>> {
        proptest::collection::btree_map(
            "(ticket|brick|none|stage|[a-z]{1,6})",
            "[A-Za-z ]{0,12}",
            0..6,
        )
        .prop_map(|kinds| {
            kinds
                .into_iter()
                .map(|(id, name)| SeatKind::new(id, name))
                .collect()
        })
    }

    /// Ticket type catalogs with unique ids, sometimes reusing the ids that
    /// [`seat_state`] references
    pub fn ticket_type_catalog() -> impl Strategy<Value = Vec<TicketType>> {
        proptest::collection::btree_map(
            "(regular|vip|gold|[a-z]{1,6})",
            ("[A-Za-z ]{0,12}", "#[0-9a-f]{6}", "[A-Z]{0,2}"),
            0..6,
        )
        .prop_map(|types| {
            types
                .into_iter()
                .map(|(id, (name, color, label))| TicketType::new(id, name, color, label))
                .collect()
        })
    }

    /// Both catalogs
    pub fn registries() -> impl Strategy<Value = Registries> {
        (seat_kind_catalog(), ticket_type_catalog())
            .prop_map(|(kinds, types)| Registries::new(kinds, types))
    }

    /// Seat states referencing the stock catalogs (and one unknown id)
    pub fn seat_state() -> impl Strategy<Value = SeatState> {
        prop_oneof![
            Just(SeatState::Empty),
            Just(SeatState::Blocked),
            Just(SeatState::Ticketed(None)),
            ticket_type().prop_map(|t| SeatState::Ticketed(Some(t.id))),
            Just(SeatState::Other("stage".into())),
        ]
    }

    /// A sparse set of painted seats inside a `rows x cols` grid
    pub fn seats(rows: u32, cols: u32) -> impl Strategy<Value = Vec<(SeatId, SeatState)>> {
        proptest::collection::vec(((0..rows), (0..cols), seat_state()), 0..32).prop_map(
            |seats| {
                seats
                    .into_iter()
                    .map(|(row, col, state)| (SeatId::new(row, col), state))
                    .collect()
            },
        )
    }

    /// Any action except `LoadLayout`, with coordinates and dimensions that
    /// sometimes fall outside the grid or are 0
    pub fn action() -> impl Strategy<Value = SeatMapAction> {
        let coord = 0..MAX_DIMENSION + 3;
        prop_oneof![
            (0..=MAX_DIMENSION, 0..=MAX_DIMENSION)
                .prop_map(|(rows, cols)| SeatMapAction::Resize { rows, cols }),
            mode().prop_map(SeatMapAction::SetMode),
            seat_kind().prop_map(SeatMapAction::SelectKind),
            ticket_type().prop_map(SeatMapAction::SelectTicketType),
            ticket_type().prop_map(SeatMapAction::AddTicketType),
            ticket_type().prop_map(|t| SeatMapAction::RemoveTicketType(t.id)),
            (coord.clone(), coord.clone())
                .prop_map(|(row, col)| SeatMapAction::PointerDown { row, col }),
            (coord.clone(), coord)
                .prop_map(|(row, col)| SeatMapAction::PointerEnter { row, col }),
            Just(SeatMapAction::PointerUp),
        ]
    }
}

/// Install a test-friendly tracing subscriber.
///
/// Honours `RUST_LOG` and defaults to `warn`. Safe to call from every test;
/// only the first call installs the subscriber.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use seatmap_core::{Mode, SeatId, SeatMapAction, SeatState};

    #[test]
    fn test_drag_shape() {
        let actions = fixtures::drag(&[(1, 2), (1, 3)]);
        assert_eq!(
            actions,
            vec![
                SeatMapAction::PointerDown { row: 1, col: 2 },
                SeatMapAction::PointerEnter { row: 1, col: 3 },
                SeatMapAction::PointerUp,
            ]
        );
    }

    #[test]
    fn test_layout_fixture() {
        let state = fixtures::layout(2, 3, [(SeatId::new(1, 2), SeatState::Blocked)]);
        assert_eq!((state.rows(), state.cols()), (2, 3));
        assert_eq!(state.grid().len(), 6);
        assert_eq!(state.interaction.mode, Mode::Normal);
    }

    #[test]
    fn test_init_tracing_twice() {
        init_test_tracing();
        init_test_tracing();
    }
}
