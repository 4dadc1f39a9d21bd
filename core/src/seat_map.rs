//! The seat map reducer.
//!
//! Routes every presentation-layer input through the engine components:
//! pointer events go through the interaction state machine and, in edit
//! mode, into the mutation engine once per touched cell; catalog edits go
//! through the consistency synchronizer before the reducer returns.

use crate::document::LoadedLayout;
use crate::effect::Effect;
use crate::environment::SeatMapEnvironment;
use crate::interaction::{Gesture, Mode, Pointer};
use crate::paint::PaintOutcome;
use crate::reducer::Reducer;
use crate::state::SeatMapState;
use crate::types::{SeatId, SeatKind, TicketType, TicketTypeId};
use smallvec::{SmallVec, smallvec};

/// Seat map actions
///
/// Every input the presentation layer can dispatch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SeatMapAction {
    /// Change both dimensions (0 or more than [`crate::grid::MAX_CELLS`] seats is rejected)
    Resize {
        /// New row count
        rows: u32,
        /// New column count
        cols: u32,
    },
    /// Change the row count, keeping the column count
    SetRows(u32),
    /// Change the column count, keeping the row count
    SetCols(u32),
    /// Switch editing mode
    SetMode(Mode),
    /// Pick the seat kind brush
    SelectKind(SeatKind),
    /// Pick the ticket type brush (ignored if the id is not in the catalog)
    SelectTicketType(TicketType),
    /// Replace the seat kind catalog
    SetSeatKinds(Vec<SeatKind>),
    /// Replace the ticket type catalog
    SetTicketTypes(Vec<TicketType>),
    /// Append a ticket type (ignored if the id exists)
    AddTicketType(TicketType),
    /// Rename/recolor a ticket type
    UpdateTicketType {
        /// Ticket type to edit
        id: TicketTypeId,
        /// New display name
        name: String,
        /// New display color
        color: String,
    },
    /// Delete a ticket type
    RemoveTicketType(TicketTypeId),
    /// Pointer pressed over a cell
    PointerDown {
        /// Row of the cell
        row: u32,
        /// Column of the cell
        col: u32,
    },
    /// Pointer dragged onto a cell
    PointerEnter {
        /// Row of the cell
        row: u32,
        /// Column of the cell
        col: u32,
    },
    /// Pointer released anywhere
    PointerUp,
    /// Toggle the display-only overview
    SetShowOverview(bool),
    /// Install a validated document
    LoadLayout(Box<LoadedLayout>),
}

/// Seat map reducer
///
/// Stateless; all data lives in [`SeatMapState`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SeatMapReducer;

impl SeatMapReducer {
    /// Create a new seat map reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn resize(
        state: &mut SeatMapState,
        rows: u32,
        cols: u32,
        env: &SeatMapEnvironment,
    ) -> SmallVec<[Effect; 4]> {
        match state.resize(rows, cols, &*env.labeler) {
            Ok(()) => {
                tracing::info!(rows, cols, "Grid resized");
                smallvec![Effect::LayoutChanged]
            },
            Err(err) => {
                tracing::warn!(rows, cols, error = %err, "Resize ignored");
                smallvec![Effect::None]
            },
        }
    }

    fn replace_ticket_types(
        state: &mut SeatMapState,
        ticket_types: Option<Vec<TicketType>>,
    ) -> SmallVec<[Effect; 4]> {
        let Some(ticket_types) = ticket_types else {
            tracing::debug!("Ticket type edit ignored: unknown or duplicate id");
            return smallvec![Effect::None];
        };
        let report = state.set_ticket_types(ticket_types);
        tracing::info!(
            ticket_types = state.registries().ticket_types().len(),
            rebound = report.rebound,
            orphaned = report.orphaned.len(),
            "Ticket types replaced"
        );
        smallvec![Effect::LayoutChanged]
    }

    fn pointer(
        state: &mut SeatMapState,
        pointer: Pointer,
        env: &SeatMapEnvironment,
    ) -> SmallVec<[Effect; 4]> {
        match state.pointer(pointer) {
            Gesture::Paint { row, col } => match state.paint(row, col, &*env.labeler) {
                PaintOutcome::Painted => smallvec![Effect::SeatUpdated(SeatId::new(row, col))],
                PaintOutcome::Unchanged(skip) => {
                    tracing::trace!(row, col, ?skip, "Paint skipped");
                    smallvec![Effect::None]
                },
            },
            Gesture::Select { row, col } => match state.seat(row, col) {
                Some(seat) => smallvec![Effect::SeatSelected(seat.id())],
                None => smallvec![Effect::None],
            },
            Gesture::Ignore => smallvec![Effect::None],
        }
    }
}

impl Reducer for SeatMapReducer {
    type State = SeatMapState;
    type Action = SeatMapAction;
    type Environment = SeatMapEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect; 4]> {
        match action {
            SeatMapAction::Resize { rows, cols } => Self::resize(state, rows, cols, env),
            SeatMapAction::SetRows(rows) => {
                let cols = state.cols();
                Self::resize(state, rows, cols, env)
            },
            SeatMapAction::SetCols(cols) => {
                let rows = state.rows();
                Self::resize(state, rows, cols, env)
            },
            SeatMapAction::SetMode(mode) => {
                tracing::debug!(?mode, "Mode changed");
                state.set_mode(mode);
                smallvec![Effect::None]
            },
            SeatMapAction::SelectKind(kind) => {
                state.select_kind(kind);
                smallvec![Effect::None]
            },
            SeatMapAction::SelectTicketType(ticket_type) => {
                if !state.select_ticket_type(&ticket_type) {
                    tracing::debug!(id = %ticket_type.id, "Ticket type selection ignored: not in catalog");
                }
                smallvec![Effect::None]
            },
            SeatMapAction::SetSeatKinds(seat_kinds) => {
                tracing::info!(seat_kinds = seat_kinds.len(), "Seat kinds replaced");
                state.set_seat_kinds(seat_kinds);
                smallvec![Effect::LayoutChanged]
            },
            SeatMapAction::SetTicketTypes(ticket_types) => {
                Self::replace_ticket_types(state, Some(ticket_types))
            },
            SeatMapAction::AddTicketType(ticket_type) => {
                let catalog = state.registries().ticket_types_with_added(ticket_type);
                Self::replace_ticket_types(state, catalog)
            },
            SeatMapAction::UpdateTicketType { id, name, color } => {
                let catalog = state
                    .registries()
                    .ticket_types_with_updated(&id, &name, &color);
                Self::replace_ticket_types(state, catalog)
            },
            SeatMapAction::RemoveTicketType(id) => {
                let catalog = state.registries().ticket_types_without(&id);
                Self::replace_ticket_types(state, catalog)
            },
            SeatMapAction::PointerDown { row, col } => {
                Self::pointer(state, Pointer::Down { row, col }, env)
            },
            SeatMapAction::PointerEnter { row, col } => {
                Self::pointer(state, Pointer::Enter { row, col }, env)
            },
            SeatMapAction::PointerUp => Self::pointer(state, Pointer::Up, env),
            SeatMapAction::SetShowOverview(show) => {
                state.show_overview = show;
                smallvec![Effect::None]
            },
            SeatMapAction::LoadLayout(layout) => {
                tracing::info!(
                    rows = layout.grid().rows(),
                    cols = layout.grid().cols(),
                    "Layout loaded"
                );
                state.load(*layout);
                smallvec![Effect::LayoutChanged]
            },
        }
    }
}
