//! Mutation engine: applies the current brush to one cell.
//!
//! Painting never fails. Every rejected paint is reported as
//! [`PaintOutcome::Unchanged`] with the rule that stopped it, and leaves the
//! grid exactly as it was.

use crate::environment::SeatLabeler;
use crate::grid::Grid;
use crate::interaction::InteractionState;
use crate::registry::Registries;
use crate::types::{KindRole, SeatState};

/// Why a paint left the cell untouched
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Skip {
    /// No kind brush selected
    NoBrush,
    /// Coordinate outside the grid
    OutOfBounds,
    /// The cell already has the brush kind (ticket type changes included)
    SameKind,
    /// Blocked cells must be erased before they can become ticketed
    BlockedResistsTicket,
}

/// Result of a single paint
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaintOutcome {
    /// The cell was overwritten
    Painted,
    /// The cell was left as is
    Unchanged(Skip),
}

impl PaintOutcome {
    /// True if the cell was written
    #[must_use]
    pub const fn is_painted(self) -> bool {
        matches!(self, Self::Painted)
    }
}

/// Paints `(row, col)` with the selected brush.
///
/// Rules, in order:
/// 1. no kind brush: no-op
/// 2. the "none" kind erases the cell unconditionally
/// 3. a cell that already has the brush kind is left alone, even when the
///    ticket type brush differs
/// 4. a blocked cell is not converted to a ticketed one
/// 5. otherwise the cell takes the brush kind, and the ticket type brush when
///    the kind is "ticket"
///
/// The ticket type is bound only if it exists in the catalog; a brush whose
/// ticket type is missing from the catalog paints an orphaned ticket seat.
pub fn paint<L>(
    grid: &mut Grid,
    interaction: &InteractionState,
    registries: &Registries,
    row: u32,
    col: u32,
    labeler: &L,
) -> PaintOutcome
where
    L: SeatLabeler + ?Sized,
{
    let Some(kind) = interaction.selected_kind.as_ref() else {
        return PaintOutcome::Unchanged(Skip::NoBrush);
    };
    let Some(seat) = grid.seat_entry(row, col, labeler) else {
        tracing::warn!(row, col, "Paint outside the grid ignored");
        return PaintOutcome::Unchanged(Skip::OutOfBounds);
    };

    let brush_role = kind.role();
    if brush_role == KindRole::Erase {
        seat.state = SeatState::Empty;
        seat.label = labeler.label(row, col);
        return PaintOutcome::Painted;
    }

    if seat.state.has_kind(&kind.id) {
        return PaintOutcome::Unchanged(Skip::SameKind);
    }

    if seat.state == SeatState::Blocked && brush_role == KindRole::Ticket {
        return PaintOutcome::Unchanged(Skip::BlockedResistsTicket);
    }

    let ticket_type = interaction
        .selected_ticket_type
        .as_ref()
        .map(|ticket_type| &ticket_type.id)
        .filter(|id| registries.ticket_type(id).is_some());
    seat.state = SeatState::from_brush(kind, ticket_type);
    PaintOutcome::Painted
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::environment::GridLabeler;
    use crate::types::{SeatKind, TicketType, TicketTypeId};

    struct Fixture {
        grid: Grid,
        registries: Registries,
        interaction: InteractionState,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                grid: Grid::new(3, 3, &GridLabeler).unwrap(),
                registries: Registries::with_defaults(),
                interaction: InteractionState::default(),
            }
        }

        fn brush(&mut self, kind: SeatKind, ticket_type: Option<&str>) -> &mut Self {
            self.interaction.selected_kind = Some(kind);
            self.interaction.selected_ticket_type = ticket_type
                .and_then(|id| self.registries.ticket_type(&id.into()).cloned());
            self
        }

        fn paint(&mut self, row: u32, col: u32) -> PaintOutcome {
            paint(
                &mut self.grid,
                &self.interaction,
                &self.registries,
                row,
                col,
                &GridLabeler,
            )
        }

        fn state(&self, row: u32, col: u32) -> SeatState {
            self.grid.seat(row, col).unwrap().state.clone()
        }
    }

    fn ticketed(id: &str) -> SeatState {
        SeatState::Ticketed(Some(TicketTypeId::from(id)))
    }

    #[test]
    fn test_no_brush_is_noop() {
        let mut fx = Fixture::new();
        let before = fx.grid.clone();
        assert_eq!(fx.paint(0, 0), PaintOutcome::Unchanged(Skip::NoBrush));
        assert_eq!(fx.grid, before);
    }

    #[test]
    fn test_paint_ticket() {
        let mut fx = Fixture::new();
        fx.brush(SeatKind::ticket(), Some("vip"));
        assert!(fx.paint(0, 0).is_painted());
        assert_eq!(fx.state(0, 0), ticketed("vip"));
    }

    #[test]
    fn test_erase_is_unconditional_and_idempotent() {
        let mut fx = Fixture::new();
        fx.brush(SeatKind::brick(), None).paint(1, 1);
        fx.brush(SeatKind::none(), None);

        assert!(fx.paint(1, 1).is_painted());
        let first = fx.grid.seat(1, 1).unwrap().clone();
        assert!(fx.paint(1, 1).is_painted());
        assert_eq!(fx.grid.seat(1, 1).unwrap(), &first);
        assert_eq!(first.state, SeatState::Empty);
        assert_eq!(first.label, "B2");
    }

    #[test]
    fn test_same_kind_is_noop_even_with_different_ticket_type() {
        let mut fx = Fixture::new();
        fx.brush(SeatKind::ticket(), Some("regular")).paint(0, 0);
        fx.brush(SeatKind::ticket(), Some("vip"));
        assert_eq!(fx.paint(0, 0), PaintOutcome::Unchanged(Skip::SameKind));
        assert_eq!(fx.state(0, 0), ticketed("regular"));
    }

    #[test]
    fn test_blocked_resists_ticket() {
        let mut fx = Fixture::new();
        fx.brush(SeatKind::brick(), None).paint(2, 0);
        fx.brush(SeatKind::ticket(), Some("regular"));
        assert_eq!(fx.paint(2, 0), PaintOutcome::Unchanged(Skip::BlockedResistsTicket));
        assert_eq!(fx.state(2, 0), SeatState::Blocked);

        fx.brush(SeatKind::none(), None).paint(2, 0);
        fx.brush(SeatKind::ticket(), Some("regular"));
        assert!(fx.paint(2, 0).is_painted());
        assert_eq!(fx.state(2, 0), ticketed("regular"));
    }

    #[test]
    fn test_ticket_can_become_blocked() {
        let mut fx = Fixture::new();
        fx.brush(SeatKind::ticket(), Some("vip")).paint(0, 2);
        fx.brush(SeatKind::brick(), None);
        assert!(fx.paint(0, 2).is_painted());
        assert_eq!(fx.state(0, 2), SeatState::Blocked);
    }

    #[test]
    fn test_ticket_brush_without_ticket_type_paints_orphan() {
        let mut fx = Fixture::new();
        fx.brush(SeatKind::ticket(), None);
        assert!(fx.paint(0, 0).is_painted());
        assert_eq!(fx.state(0, 0), SeatState::Ticketed(None));
    }

    #[test]
    fn test_ticket_type_outside_catalog_is_not_bound() {
        let mut fx = Fixture::new();
        fx.brush(SeatKind::ticket(), None);
        fx.interaction.selected_ticket_type =
            Some(TicketType::new("gold", "Gold", "#ffd700", "G"));
        fx.paint(0, 0);
        assert_eq!(fx.state(0, 0), SeatState::Ticketed(None));
    }

    #[test]
    fn test_custom_kind() {
        let mut fx = Fixture::new();
        let stage = SeatKind::new("stage", "Stage");
        fx.brush(stage.clone(), Some("vip"));
        assert!(fx.paint(1, 0).is_painted());
        assert_eq!(fx.state(1, 0), SeatState::Other(stage.id.clone()));
        assert_eq!(fx.paint(1, 0), PaintOutcome::Unchanged(Skip::SameKind));
    }

    #[test]
    fn test_out_of_bounds_is_noop() {
        let mut fx = Fixture::new();
        fx.brush(SeatKind::none(), None);
        let before = fx.grid.clone();
        assert_eq!(fx.paint(3, 0), PaintOutcome::Unchanged(Skip::OutOfBounds));
        assert_eq!(fx.grid, before);
    }
}
