//! The complete editor state: grid, catalogs, interaction.

use crate::document::LoadedLayout;
use crate::environment::{GridLabeler, SeatLabeler};
use crate::error::SeatMapError;
use crate::grid::Grid;
use crate::interaction::{Gesture, InteractionState, Mode, Pointer};
use crate::paint::{self, PaintOutcome};
use crate::registry::Registries;
use crate::sync::{self, SyncReport};
use crate::types::{Seat, SeatKind, TicketType};
use std::num::NonZeroU32;

/// Default number of rows of a fresh editor
pub const DEFAULT_ROWS: NonZeroU32 = match NonZeroU32::new(10) {
    Some(rows) => rows,
    None => NonZeroU32::MIN,
};

/// Default number of columns of a fresh editor
pub const DEFAULT_COLS: NonZeroU32 = match NonZeroU32::new(26) {
    Some(cols) => cols,
    None => NonZeroU32::MIN,
};

/// Seat map editor state
///
/// The grid and catalogs are only reachable through methods that keep the
/// grid invariant and the ticket type references consistent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeatMapState {
    grid: Grid,
    registries: Registries,
    /// Mode, brush and gesture flag
    pub interaction: InteractionState,
    /// Display-only overview toggle
    pub show_overview: bool,
}

impl SeatMapState {
    /// Creates a state with an empty grid of the given size
    ///
    /// The dimensions must satisfy [`crate::grid::dimensions_fit`].
    #[must_use]
    pub fn new<L>(rows: NonZeroU32, cols: NonZeroU32, registries: Registries, labeler: &L) -> Self
    where
        L: SeatLabeler + ?Sized,
    {
        Self {
            grid: Grid::filled(rows, cols, labeler),
            registries,
            interaction: InteractionState::default(),
            show_overview: false,
        }
    }

    /// Grid of seats
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Seat kind and ticket type catalogs
    #[must_use]
    pub const fn registries(&self) -> &Registries {
        &self.registries
    }

    /// Number of rows
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.grid.rows()
    }

    /// Number of columns
    #[must_use]
    pub const fn cols(&self) -> u32 {
        self.grid.cols()
    }

    /// Seat at `(row, col)`, `None` if out of bounds
    #[must_use]
    pub fn seat(&self, row: u32, col: u32) -> Option<&Seat> {
        self.grid.seat(row, col)
    }

    /// Full ticket type record of a seat, resolved through the catalog
    #[must_use]
    pub fn ticket_type_of(&self, seat: &Seat) -> Option<&TicketType> {
        seat.state
            .ticket_type()
            .and_then(|id| self.registries.ticket_type(id))
    }

    /// Full kind record of a seat
    #[must_use]
    pub fn kind_of(&self, seat: &Seat) -> Option<SeatKind> {
        self.registries.kind_of(&seat.state)
    }

    /// Resizes the grid, keeping seats that stay in bounds
    ///
    /// # Errors
    ///
    /// Returns [`SeatMapError::InvalidDimensions`] if either dimension is 0
    /// or the grid would exceed [`crate::grid::MAX_CELLS`] seats.
    pub fn resize<L>(&mut self, rows: u32, cols: u32, labeler: &L) -> Result<(), SeatMapError>
    where
        L: SeatLabeler + ?Sized,
    {
        self.grid.resize(rows, cols, labeler)
    }

    /// Switches the interaction mode (see [`InteractionState::set_mode`])
    pub fn set_mode(&mut self, mode: Mode) {
        self.interaction.set_mode(mode, &self.registries);
    }

    /// Picks the kind brush (see [`InteractionState::select_kind`])
    pub fn select_kind(&mut self, kind: SeatKind) {
        self.interaction
            .select_kind(kind, self.registries.ticket_types());
    }

    /// Picks the ticket type brush from the catalog entry with the same id.
    ///
    /// Returns `false` and keeps the current brush if the id is not in the
    /// catalog.
    pub fn select_ticket_type(&mut self, ticket_type: &TicketType) -> bool {
        let Some(entry) = self.registries.ticket_type(&ticket_type.id) else {
            return false;
        };
        self.interaction.select_ticket_type(entry.clone());
        true
    }

    /// Feeds one pointer event to the gesture state machine
    pub fn pointer(&mut self, pointer: Pointer) -> Gesture {
        self.interaction.on_pointer(pointer)
    }

    /// Paints one cell with the current brush (see [`paint::paint`])
    pub fn paint<L>(&mut self, row: u32, col: u32, labeler: &L) -> PaintOutcome
    where
        L: SeatLabeler + ?Sized,
    {
        paint::paint(
            &mut self.grid,
            &self.interaction,
            &self.registries,
            row,
            col,
            labeler,
        )
    }

    /// Replaces the seat kind catalog, leaving seats untouched
    pub fn set_seat_kinds(&mut self, seat_kinds: Vec<SeatKind>) {
        self.registries.set_seat_kinds(seat_kinds);
    }

    /// Replaces the ticket type catalog and synchronizes seats and the brush
    /// before returning.
    pub fn set_ticket_types(&mut self, ticket_types: Vec<TicketType>) -> SyncReport {
        self.registries.replace_ticket_types(ticket_types);
        sync::synchronize(
            &mut self.grid,
            &mut self.interaction,
            self.registries.ticket_types(),
        )
    }

    /// Replaces grid and catalogs with an imported layout and resets the
    /// interaction state. Display flags are kept.
    pub fn load(&mut self, layout: LoadedLayout) {
        let LoadedLayout { grid, registries } = layout;
        self.grid = grid;
        self.registries = registries;
        self.interaction = InteractionState::default();
    }
}

impl Default for SeatMapState {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS, DEFAULT_COLS, Registries::with_defaults(), &GridLabeler)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::types::{SeatId, SeatState};

    #[test]
    fn test_default_state() {
        let state = SeatMapState::default();
        assert_eq!((state.rows(), state.cols()), (10, 26));
        assert_eq!(state.grid().len(), 260);
        assert_eq!(state.seat(9, 25).unwrap().label, "J26");
        assert!(!state.show_overview);
        assert_eq!(state.interaction, InteractionState::default());
    }

    #[test]
    fn test_set_ticket_types_orphans_and_rebinds() {
        let mut state = SeatMapState::default();
        let layout = LoadedLayout {
            grid: Grid::from_states(
                2,
                2,
                [
                    (SeatId::new(0, 0), SeatState::Ticketed(Some("vip".into()))),
                    (SeatId::new(0, 1), SeatState::Ticketed(Some("regular".into()))),
                ],
                &GridLabeler,
            )
            .unwrap(),
            registries: Registries::with_defaults(),
        };
        state.load(layout);

        let renamed = TicketType::new("regular", "Standard", "#222222", "S");
        let report = state.set_ticket_types(vec![renamed.clone()]);

        assert_eq!(report.orphaned, vec![SeatId::new(0, 0)]);
        assert_eq!(state.seat(0, 0).unwrap().state, SeatState::Ticketed(None));
        let seat = state.seat(0, 1).unwrap();
        assert_eq!(state.ticket_type_of(seat), Some(&renamed));
        assert_eq!(state.interaction.selected_ticket_type, Some(renamed));
    }
}
