//! Consistency synchronizer: keeps ticket type references valid after the
//! ticket type catalog changes.
//!
//! Seats reference ticket types by id, so a renamed or recolored type is
//! picked up by every seat automatically. What has to be repaired are
//! references to ids the new catalog no longer contains: those seats stay
//! ticketed but lose their ticket type.

use crate::grid::Grid;
use crate::interaction::InteractionState;
use crate::types::{SeatId, SeatState, TicketType};

/// Outcome of a synchronization pass
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Ticketed seats whose ticket type still exists
    pub rebound: usize,
    /// Seats whose ticket type was removed, sorted
    pub orphaned: Vec<SeatId>,
}

/// Re-validates seats and the ticket type brush against `catalog`
pub fn synchronize(
    grid: &mut Grid,
    interaction: &mut InteractionState,
    catalog: &[TicketType],
) -> SyncReport {
    let report = synchronize_seats(grid, catalog);
    reconcile_selection(interaction, catalog);
    report
}

/// Clears every seat ticket type whose id is not in `catalog`
pub fn synchronize_seats(grid: &mut Grid, catalog: &[TicketType]) -> SyncReport {
    let mut report = SyncReport::default();
    for seat in grid.seats_mut() {
        let SeatState::Ticketed(Some(id)) = &seat.state else {
            continue;
        };
        if catalog.iter().any(|ticket_type| &ticket_type.id == id) {
            report.rebound += 1;
        } else {
            report.orphaned.push(seat.id());
            seat.state = SeatState::Ticketed(None);
        }
    }
    report.orphaned.sort_unstable();
    report
}

/// Rebinds the ticket type brush to its new record, or falls back to the
/// first catalog entry (absent for an empty catalog).
pub fn reconcile_selection(interaction: &mut InteractionState, catalog: &[TicketType]) {
    let rebound = interaction.selected_ticket_type.as_ref().and_then(|selected| {
        catalog
            .iter()
            .find(|ticket_type| ticket_type.id == selected.id)
    });
    interaction.selected_ticket_type = rebound.or_else(|| catalog.first()).cloned();
}
