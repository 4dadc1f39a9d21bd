//! Serializer: the persisted JSON document and its validation.
//!
//! ```json
//! {
//!   "rows": 2, "cols": 3,
//!   "seatKinds": [{"id": "ticket", "name": "Seat"}],
//!   "ticketTypes": [{"id": "vip", "name": "VIP", "color": "#fca503", "label": "V"}],
//!   "seats": [{"id": "0-0", "row": 0, "col": 0, "label": "A1",
//!              "kind": {"id": "ticket", "name": "Seat"},
//!              "ticketType": {"id": "vip", "name": "VIP", "color": "#fca503", "label": "V"}}]
//! }
//! ```
//!
//! Export always writes full kind/ticket type objects. Import also accepts the
//! older `seatTypes`/`type` key names and bare id strings in place of objects.

use crate::environment::SeatLabeler;
use crate::error::SeatMapError;
use crate::grid::{self, Grid};
use crate::registry::Registries;
use crate::state::SeatMapState;
use crate::sync;
use crate::types::{
    KindRole, Seat, SeatId, SeatKind, SeatKindId, SeatState, TicketType, TicketTypeId,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Persisted seat map
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatMapDocument {
    /// Row count
    pub rows: u32,
    /// Column count
    pub cols: u32,
    /// Seat kind catalog
    #[serde(alias = "seatTypes")]
    pub seat_kinds: Vec<SeatKind>,
    /// Ticket type catalog
    pub ticket_types: Vec<TicketType>,
    /// Every seat of the grid, in no significant order
    pub seats: Vec<SeatRecord>,
}

/// One seat of a [`SeatMapDocument`]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatRecord {
    /// `"{row}-{col}"`
    pub id: String,
    /// Zero-based row
    pub row: u32,
    /// Zero-based column
    pub col: u32,
    /// Display label; recomputed on import
    #[serde(default)]
    pub label: String,
    /// Seat kind, absent for empty seats
    #[serde(default, alias = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<KindRef>,
    /// Ticket type, only meaningful for ticket seats
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_type: Option<TicketTypeRef>,
}

/// A seat kind given as a full record or as a bare id
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KindRef {
    /// `{"id": ..., "name": ...}`
    Full(SeatKind),
    /// `"ticket"`
    Id(SeatKindId),
}

impl KindRef {
    /// Referenced kind id
    #[must_use]
    pub const fn id(&self) -> &SeatKindId {
        match self {
            Self::Full(kind) => &kind.id,
            Self::Id(id) => id,
        }
    }
}

/// A ticket type given as a full record or as a bare id
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TicketTypeRef {
    /// `{"id": ..., "name": ..., "color": ..., "label": ...}`
    Full(TicketType),
    /// `"vip"`
    Id(TicketTypeId),
}

impl TicketTypeRef {
    /// Referenced ticket type id
    #[must_use]
    pub const fn id(&self) -> &TicketTypeId {
        match self {
            Self::Full(ticket_type) => &ticket_type.id,
            Self::Id(id) => id,
        }
    }
}

/// A validated document, ready to replace the engine state in one step
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadedLayout {
    pub(crate) grid: Grid,
    pub(crate) registries: Registries,
}

impl LoadedLayout {
    /// Pairs a grid with the catalogs it should be installed with.
    ///
    /// Ticket type references not found in `registries` are cleared.
    #[must_use]
    pub fn new(mut grid: Grid, registries: Registries) -> Self {
        sync::synchronize_seats(&mut grid, registries.ticket_types());
        Self { grid, registries }
    }

    /// Grid the layout will install
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Catalogs the layout will install
    #[must_use]
    pub const fn registries(&self) -> &Registries {
        &self.registries
    }
}

impl SeatMapDocument {
    /// Snapshots the dimensions, catalogs and seats of `state`.
    ///
    /// Seats are written sorted by row and column.
    #[must_use]
    pub fn from_state(state: &SeatMapState) -> Self {
        let seats = state
            .grid()
            .seats_sorted()
            .into_iter()
            .map(|seat| SeatRecord::from_seat(state, seat))
            .collect();

        Self {
            rows: state.rows(),
            cols: state.cols(),
            seat_kinds: state.registries().seat_kinds().to_vec(),
            ticket_types: state.registries().ticket_types().to_vec(),
            seats,
        }
    }

    /// Parses a document from JSON
    ///
    /// # Errors
    ///
    /// Returns [`SeatMapError::InvalidDocument`] for malformed JSON or
    /// missing/mistyped fields.
    pub fn from_json(json: &str) -> Result<Self, SeatMapError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Renders the document as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns [`SeatMapError::InvalidDocument`] if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, SeatMapError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validates the document and builds the layout it describes.
    ///
    /// Seats missing from the document come back empty, duplicates keep the
    /// last record, and ticket type references not found in the document's
    /// own catalog are cleared.
    ///
    /// # Errors
    ///
    /// Returns [`SeatMapError::InvalidDocument`] if the dimensions are 0 or
    /// exceed [`grid::MAX_CELLS`] seats, if a seat id does not match its
    /// coordinates, or if a seat is out of bounds.
    pub fn into_layout<L>(self, labeler: &L) -> Result<LoadedLayout, SeatMapError>
    where
        L: SeatLabeler + ?Sized,
    {
        if !grid::dimensions_fit(self.rows, self.cols) {
            return Err(SeatMapError::InvalidDocument(format!(
                "grid dimensions must be at least 1x1 and at most {} seats, got {}x{}",
                grid::MAX_CELLS,
                self.rows,
                self.cols
            )));
        }

        let mut states = HashMap::with_capacity(self.seats.len());
        for record in &self.seats {
            let id = record.validated_id(self.rows, self.cols)?;
            states.insert(id, record.state());
        }

        let mut grid = Grid::from_states(self.rows, self.cols, states, labeler)?;
        let report = sync::synchronize_seats(&mut grid, &self.ticket_types);
        if !report.orphaned.is_empty() {
            tracing::warn!(
                orphaned = report.orphaned.len(),
                "Imported seats referenced unknown ticket types"
            );
        }

        Ok(LoadedLayout {
            grid,
            registries: Registries::new(self.seat_kinds, self.ticket_types),
        })
    }
}

impl SeatRecord {
    fn from_seat(state: &SeatMapState, seat: &Seat) -> Self {
        Self {
            id: seat.id().to_string(),
            row: seat.row,
            col: seat.col,
            label: seat.label.clone(),
            kind: state.kind_of(seat).map(KindRef::Full),
            ticket_type: state
                .ticket_type_of(seat)
                .cloned()
                .map(TicketTypeRef::Full),
        }
    }

    fn validated_id(&self, rows: u32, cols: u32) -> Result<SeatId, SeatMapError> {
        let id: SeatId = self.id.parse()?;
        if id != SeatId::new(self.row, self.col) {
            return Err(SeatMapError::InvalidDocument(format!(
                "seat id `{}` does not match row {} col {}",
                self.id, self.row, self.col
            )));
        }
        if id.row >= rows || id.col >= cols {
            return Err(SeatMapError::InvalidDocument(format!(
                "seat `{id}` is outside the {rows}x{cols} grid"
            )));
        }
        Ok(id)
    }

    fn state(&self) -> SeatState {
        let Some(kind) = &self.kind else {
            return SeatState::Empty;
        };
        match kind.id().role() {
            KindRole::Ticket => {
                SeatState::Ticketed(self.ticket_type.as_ref().map(|t| t.id().clone()))
            },
            KindRole::Blocked => SeatState::Blocked,
            KindRole::Erase => SeatState::Empty,
            KindRole::Custom => SeatState::Other(kind.id().clone()),
        }
    }
}
