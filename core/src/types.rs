//! Domain types for the seat map editor.
//!
//! This module contains the identifiers, catalog entries and per-seat state
//! that the rest of the engine operates on.

use crate::error::SeatMapError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Id of the seat kind that carries a ticket type
pub const TICKET_KIND_ID: &str = "ticket";

/// Id of the blocked ("brick") seat kind
pub const BRICK_KIND_ID: &str = "brick";

/// Id of the seat kind that represents explicit emptiness (the eraser)
pub const NONE_KIND_ID: &str = "none";

// ============================================================================
// Identifiers
// ============================================================================

/// Composite key of a seat, serialized as `"{row}-{col}"`
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeatId {
    /// Zero-based row
    pub row: u32,
    /// Zero-based column
    pub col: u32,
}

impl SeatId {
    /// Creates a seat id from its coordinates
    #[must_use]
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.row, self.col)
    }
}

impl FromStr for SeatId {
    type Err = SeatMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SeatMapError::InvalidDocument(format!("malformed seat id `{s}`"));
        let (row, col) = s.split_once('-').ok_or_else(invalid)?;
        Ok(Self {
            row: row.parse().map_err(|_| invalid())?,
            col: col.parse().map_err(|_| invalid())?,
        })
    }
}

/// Identifier of a seat kind ("ticket", "brick", "none", or user-defined)
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeatKindId(String);

impl SeatKindId {
    /// Creates a seat kind id
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// What painting with this kind does to a cell
    #[must_use]
    pub fn role(&self) -> KindRole {
        match self.0.as_str() {
            TICKET_KIND_ID => KindRole::Ticket,
            BRICK_KIND_ID => KindRole::Blocked,
            NONE_KIND_ID => KindRole::Erase,
            _ => KindRole::Custom,
        }
    }
}

impl fmt::Display for SeatKindId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SeatKindId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SeatKindId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Identifier of a ticket type
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketTypeId(String);

impl TicketTypeId {
    /// Creates a ticket type id
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TicketTypeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TicketTypeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

// ============================================================================
// Catalog entries
// ============================================================================

/// Structural role of a seat kind
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KindRole {
    /// Sellable seat, carries a ticket type
    Ticket,
    /// Blocked cell (aisle, pillar, wall)
    Blocked,
    /// Eraser: paints the cell back to empty
    Erase,
    /// Any other user-defined kind
    Custom,
}

/// A structural seat category
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeatKind {
    /// Stable discriminator
    pub id: SeatKindId,
    /// Display name
    pub name: String,
}

impl SeatKind {
    /// Creates a seat kind
    #[must_use]
    pub fn new(id: impl Into<SeatKindId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// The built-in ticketable kind
    #[must_use]
    pub fn ticket() -> Self {
        Self::new(TICKET_KIND_ID, "Seat")
    }

    /// The built-in blocked kind
    #[must_use]
    pub fn brick() -> Self {
        Self::new(BRICK_KIND_ID, "Brick")
    }

    /// The built-in eraser kind
    #[must_use]
    pub fn none() -> Self {
        Self::new(NONE_KIND_ID, "None")
    }

    /// Structural role of this kind
    #[must_use]
    pub fn role(&self) -> KindRole {
        self.id.role()
    }
}

/// A sellable ticket category
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TicketType {
    /// Stable identifier
    pub id: TicketTypeId,
    /// Display name
    pub name: String,
    /// Display color, usually `#rrggbb`
    pub color: String,
    /// Short label drawn inside the seat
    pub label: String,
}

impl TicketType {
    /// Creates a ticket type
    #[must_use]
    pub fn new(
        id: impl Into<TicketTypeId>,
        name: impl Into<String>,
        color: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: color.into(),
            label: label.into(),
        }
    }
}

// ============================================================================
// Seats
// ============================================================================

/// What a seat currently holds.
///
/// A blocked, empty or custom seat can never carry a ticket type.
/// `Ticketed(None)` is an orphaned ticket seat whose ticket type was removed
/// from the catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SeatState {
    /// No kind assigned
    #[default]
    Empty,
    /// Painted with the blocked kind
    Blocked,
    /// Painted with the ticket kind, optionally bound to a ticket type
    Ticketed(Option<TicketTypeId>),
    /// Painted with a user-defined kind
    Other(SeatKindId),
}

impl SeatState {
    /// Builds the state a brush paints onto a cell
    #[must_use]
    pub fn from_brush(kind: &SeatKind, ticket_type: Option<&TicketTypeId>) -> Self {
        match kind.role() {
            KindRole::Ticket => Self::Ticketed(ticket_type.cloned()),
            KindRole::Blocked => Self::Blocked,
            KindRole::Erase => Self::Empty,
            KindRole::Custom => Self::Other(kind.id.clone()),
        }
    }

    /// Id of the kind this state was painted with, `None` when empty
    #[must_use]
    pub fn kind_id(&self) -> Option<SeatKindId> {
        match self {
            Self::Empty => None,
            Self::Blocked => Some(SeatKindId::from(BRICK_KIND_ID)),
            Self::Ticketed(_) => Some(SeatKindId::from(TICKET_KIND_ID)),
            Self::Other(id) => Some(id.clone()),
        }
    }

    /// True if this state was painted with the given kind
    #[must_use]
    pub fn has_kind(&self, kind: &SeatKindId) -> bool {
        match self {
            Self::Empty => false,
            Self::Blocked => kind.role() == KindRole::Blocked,
            Self::Ticketed(_) => kind.role() == KindRole::Ticket,
            Self::Other(id) => id == kind,
        }
    }

    /// Ticket type reference, only ever present on ticketed seats
    #[must_use]
    pub const fn ticket_type(&self) -> Option<&TicketTypeId> {
        match self {
            Self::Ticketed(ticket_type) => ticket_type.as_ref(),
            _ => None,
        }
    }

    /// True for a seat with no kind
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// A single addressable cell of the grid
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Seat {
    /// Zero-based row
    pub row: u32,
    /// Zero-based column
    pub col: u32,
    /// Human-readable label, e.g. "A1"
    pub label: String,
    /// Kind and ticket type assignment
    pub state: SeatState,
}

impl Seat {
    /// Creates an empty seat
    #[must_use]
    pub fn empty(row: u32, col: u32, label: impl Into<String>) -> Self {
        Self {
            row,
            col,
            label: label.into(),
            state: SeatState::Empty,
        }
    }

    /// Composite key of this seat
    #[must_use]
    pub const fn id(&self) -> SeatId {
        SeatId::new(self.row, self.col)
    }
}
