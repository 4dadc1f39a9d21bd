//! Interaction state machine: editing mode, brush selection, drag gesture.

use crate::registry::Registries;
use crate::types::{KindRole, SeatKind, TicketType};
use serde::{Deserialize, Serialize};

/// Editing mode of the presentation layer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Clicking a seat selects it, nothing is painted
    #[default]
    Normal,
    /// Camera panning; cell interactions are ignored
    #[serde(alias = "grep")]
    Pan,
    /// Click-and-drag paints with the selected brush
    Edit,
}

/// Pointer events forwarded by the presentation layer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pointer {
    /// Button pressed over a cell
    Down {
        /// Row of the cell
        row: u32,
        /// Column of the cell
        col: u32,
    },
    /// Pointer moved onto a cell
    Enter {
        /// Row of the cell
        row: u32,
        /// Column of the cell
        col: u32,
    },
    /// Button released anywhere
    Up,
}

/// What the engine should do in response to a pointer event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gesture {
    /// Nothing to do
    Ignore,
    /// Paint the cell with the current brush
    Paint {
        /// Row of the cell
        row: u32,
        /// Column of the cell
        col: u32,
    },
    /// Read-only selection of the cell
    Select {
        /// Row of the cell
        row: u32,
        /// Column of the cell
        col: u32,
    },
}

/// Current mode, brush and gesture flag
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InteractionState {
    /// Editing mode
    pub mode: Mode,
    /// Seat kind brush
    pub selected_kind: Option<SeatKind>,
    /// Ticket type brush, consulted only when the kind brush is "ticket"
    pub selected_ticket_type: Option<TicketType>,
    /// True only between a pointer-down in edit mode and the next release
    pub is_painting: bool,
}

impl InteractionState {
    /// Switches mode.
    ///
    /// Entering edit mode without a kind brush picks the first catalog kind,
    /// through the same path as [`Self::select_kind`].
    pub fn set_mode(&mut self, mode: Mode, registries: &Registries) {
        if mode == Mode::Edit && self.selected_kind.is_none() {
            if let Some(kind) = registries.seat_kinds().first() {
                self.select_kind(kind.clone(), registries.ticket_types());
            }
        }
        self.mode = mode;
    }

    /// Picks the kind brush.
    ///
    /// Picking the ticket kind with no ticket type selected auto-selects the
    /// first ticket type of the catalog (if any).
    pub fn select_kind(&mut self, kind: SeatKind, ticket_types: &[TicketType]) {
        if kind.role() == KindRole::Ticket && self.selected_ticket_type.is_none() {
            self.selected_ticket_type = ticket_types.first().cloned();
        }
        self.selected_kind = Some(kind);
    }

    /// Picks the ticket type brush unconditionally
    pub fn select_ticket_type(&mut self, ticket_type: TicketType) {
        self.selected_ticket_type = Some(ticket_type);
    }

    /// Advances the gesture protocol by one pointer event.
    ///
    /// Releases always end the drag, whatever the mode and wherever the
    /// release happened.
    pub fn on_pointer(&mut self, pointer: Pointer) -> Gesture {
        match (pointer, self.mode) {
            (Pointer::Down { row, col }, Mode::Edit) => {
                self.is_painting = true;
                Gesture::Paint { row, col }
            },
            (Pointer::Down { row, col }, Mode::Normal) => Gesture::Select { row, col },
            (Pointer::Enter { row, col }, Mode::Edit) if self.is_painting => {
                Gesture::Paint { row, col }
            },
            (Pointer::Up, _) => {
                self.is_painting = false;
                Gesture::Ignore
            },
            _ => Gesture::Ignore,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::registry::default_ticket_types;

    fn edit_state() -> InteractionState {
        InteractionState {
            mode: Mode::Edit,
            ..InteractionState::default()
        }
    }

    #[test]
    fn test_select_ticket_kind_picks_first_ticket_type() {
        let mut interaction = InteractionState::default();
        interaction.select_kind(SeatKind::ticket(), &default_ticket_types());
        assert_eq!(interaction.selected_ticket_type.unwrap().id.as_str(), "regular");
    }

    #[test]
    fn test_select_ticket_kind_keeps_existing_ticket_type() {
        let catalog = default_ticket_types();
        let mut interaction = InteractionState::default();
        interaction.select_ticket_type(catalog[1].clone());
        interaction.select_kind(SeatKind::ticket(), &catalog);
        assert_eq!(interaction.selected_ticket_type, Some(catalog[1].clone()));
    }

    #[test]
    fn test_select_ticket_kind_with_empty_catalog() {
        let mut interaction = InteractionState::default();
        interaction.select_kind(SeatKind::ticket(), &[]);
        assert_eq!(interaction.selected_kind, Some(SeatKind::ticket()));
        assert!(interaction.selected_ticket_type.is_none());
    }

    #[test]
    fn test_select_brick_does_not_pick_ticket_type() {
        let mut interaction = InteractionState::default();
        interaction.select_kind(SeatKind::brick(), &default_ticket_types());
        assert!(interaction.selected_ticket_type.is_none());
    }

    #[test]
    fn test_entering_edit_picks_first_kind() {
        let registries = Registries::with_defaults();
        let mut interaction = InteractionState::default();
        interaction.set_mode(Mode::Edit, &registries);
        assert_eq!(interaction.mode, Mode::Edit);
        assert_eq!(interaction.selected_kind, Some(SeatKind::ticket()));
        assert_eq!(
            interaction.selected_ticket_type.as_ref().map(|t| t.id.as_str()),
            Some("regular")
        );
    }

    #[test]
    fn test_entering_edit_keeps_existing_kind() {
        let registries = Registries::with_defaults();
        let mut interaction = InteractionState::default();
        interaction.select_kind(SeatKind::brick(), registries.ticket_types());
        interaction.set_mode(Mode::Edit, &registries);
        assert_eq!(interaction.selected_kind, Some(SeatKind::brick()));
    }

    #[test]
    fn test_entering_edit_with_empty_kind_catalog() {
        let registries = Registries::new(vec![], default_ticket_types());
        let mut interaction = InteractionState::default();
        interaction.set_mode(Mode::Edit, &registries);
        assert_eq!(interaction.mode, Mode::Edit);
        assert!(interaction.selected_kind.is_none());
    }

    #[test]
    fn test_drag_protocol() {
        let mut interaction = edit_state();

        assert_eq!(interaction.on_pointer(Pointer::Enter { row: 0, col: 0 }), Gesture::Ignore);
        assert_eq!(
            interaction.on_pointer(Pointer::Down { row: 0, col: 0 }),
            Gesture::Paint { row: 0, col: 0 }
        );
        assert!(interaction.is_painting);
        assert_eq!(
            interaction.on_pointer(Pointer::Enter { row: 0, col: 1 }),
            Gesture::Paint { row: 0, col: 1 }
        );
        assert_eq!(interaction.on_pointer(Pointer::Up), Gesture::Ignore);
        assert!(!interaction.is_painting);
        assert_eq!(interaction.on_pointer(Pointer::Enter { row: 0, col: 2 }), Gesture::Ignore);
    }

    #[test]
    fn test_release_ends_drag_in_any_mode() {
        let mut interaction = edit_state();
        interaction.on_pointer(Pointer::Down { row: 1, col: 1 });
        interaction.mode = Mode::Pan;
        interaction.on_pointer(Pointer::Up);
        assert!(!interaction.is_painting);

        // Idempotent
        interaction.on_pointer(Pointer::Up);
        assert!(!interaction.is_painting);
    }

    #[test]
    fn test_normal_mode_selects_and_pan_ignores() {
        let mut interaction = InteractionState::default();
        assert_eq!(
            interaction.on_pointer(Pointer::Down { row: 2, col: 3 }),
            Gesture::Select { row: 2, col: 3 }
        );
        assert!(!interaction.is_painting);

        interaction.mode = Mode::Pan;
        assert_eq!(interaction.on_pointer(Pointer::Down { row: 2, col: 3 }), Gesture::Ignore);
        assert!(!interaction.is_painting);
    }

    #[test]
    fn test_mode_serde_accepts_legacy_pan_name() {
        let mode: Mode = serde_json::from_str(r#""grep""#).unwrap_or(Mode::Normal);
        assert_eq!(mode, Mode::Pan);
        assert_eq!(serde_json::to_string(&Mode::Edit).ok().as_deref(), Some(r#""edit""#));
    }
}
