//! Property tests for the grid invariant and document round-trips.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use proptest::prelude::*;
use seatmap_core::reducer::Reducer;
use seatmap_core::{SeatId, SeatMapDocument, SeatMapReducer, SeatMapState, SeatState};
use seatmap_testing::{fixtures, properties, test_environment};
use std::collections::HashSet;

fn assert_grid_invariant(state: &SeatMapState) -> Result<(), TestCaseError> {
    let grid = state.grid();
    prop_assert_eq!(grid.len(), (state.rows() * state.cols()) as usize);

    let ids: HashSet<SeatId> = grid.seats().map(seatmap_core::Seat::id).collect();
    prop_assert_eq!(ids.len(), grid.len());
    for row in 0..state.rows() {
        for col in 0..state.cols() {
            prop_assert!(ids.contains(&SeatId::new(row, col)));
        }
    }
    Ok(())
}

fn layout_strategy() -> impl Strategy<Value = SeatMapState> {
    (properties::dimensions(), properties::registries()).prop_flat_map(
        |((rows, cols), registries)| {
            properties::seats(rows, cols).prop_map(move |seats| {
                fixtures::layout_with(rows, cols, seats, registries.clone())
            })
        },
    )
}

proptest! {
    /// Every reachable state keeps exactly one seat per cell.
    #[test]
    fn grid_invariant_holds(actions in proptest::collection::vec(properties::action(), 0..64)) {
        let env = test_environment();
        let reducer = SeatMapReducer::new();
        let mut state = SeatMapState::default();
        for action in actions {
            reducer.reduce(&mut state, action, &env);
            assert_grid_invariant(&state)?;
        }
    }

    /// Ticket seats only ever reference ticket types in the catalog.
    #[test]
    fn ticket_references_stay_valid(actions in proptest::collection::vec(properties::action(), 0..64)) {
        let env = test_environment();
        let reducer = SeatMapReducer::new();
        let mut state = SeatMapState::default();
        for action in actions {
            reducer.reduce(&mut state, action, &env);
        }
        for seat in state.grid().seats() {
            if let SeatState::Ticketed(Some(id)) = &seat.state {
                prop_assert!(state.registries().ticket_type(id).is_some());
            }
        }
    }

    /// Importing an export reproduces the same grid and catalogs, whatever
    /// the catalogs hold.
    #[test]
    fn export_import_round_trip(state in layout_strategy()) {
        let json = SeatMapDocument::from_state(&state).to_json_pretty().unwrap();
        let layout = SeatMapDocument::from_json(&json)
            .unwrap()
            .into_layout(&*test_environment().labeler)
            .unwrap();

        prop_assert_eq!(layout.grid(), state.grid());
        prop_assert_eq!(layout.registries(), state.registries());
    }
}
