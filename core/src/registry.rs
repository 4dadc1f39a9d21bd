//! Seat kind and ticket type catalogs.
//!
//! Both catalogs are ordered: the first entry is the fallback selection when
//! a brush has to be picked automatically.

use crate::types::{SeatKind, SeatKindId, SeatState, TicketType, TicketTypeId};

/// The two type catalogs of the editor
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Registries {
    seat_kinds: Vec<SeatKind>,
    ticket_types: Vec<TicketType>,
}

impl Registries {
    /// Creates registries from explicit catalogs
    #[must_use]
    pub const fn new(seat_kinds: Vec<SeatKind>, ticket_types: Vec<TicketType>) -> Self {
        Self {
            seat_kinds,
            ticket_types,
        }
    }

    /// The stock catalogs: ticket/brick/none kinds, regular and VIP tickets
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(default_seat_kinds(), default_ticket_types())
    }

    /// Seat kind catalog in order
    #[must_use]
    pub fn seat_kinds(&self) -> &[SeatKind] {
        &self.seat_kinds
    }

    /// Ticket type catalog in order
    #[must_use]
    pub fn ticket_types(&self) -> &[TicketType] {
        &self.ticket_types
    }

    /// Finds a seat kind by id
    #[must_use]
    pub fn seat_kind(&self, id: &SeatKindId) -> Option<&SeatKind> {
        self.seat_kinds.iter().find(|kind| &kind.id == id)
    }

    /// Finds a ticket type by id
    #[must_use]
    pub fn ticket_type(&self, id: &TicketTypeId) -> Option<&TicketType> {
        self.ticket_types.iter().find(|ticket_type| &ticket_type.id == id)
    }

    /// Replaces the seat kind catalog.
    ///
    /// Seats are not touched: a seat painted with a kind that is no longer in
    /// the catalog keeps its state.
    pub fn set_seat_kinds(&mut self, seat_kinds: Vec<SeatKind>) {
        self.seat_kinds = seat_kinds;
    }

    /// Replaces the ticket type catalog without any seat reconciliation.
    ///
    /// Callers go through `SeatMapState::set_ticket_types`, which runs the
    /// synchronizer afterwards.
    pub(crate) fn replace_ticket_types(&mut self, ticket_types: Vec<TicketType>) {
        self.ticket_types = ticket_types;
    }

    /// Resolves the full kind record a seat state refers to.
    ///
    /// Built-in kinds that were removed from the catalog fall back to their
    /// stock record; unknown custom kinds use their id as name.
    #[must_use]
    pub fn kind_of(&self, state: &SeatState) -> Option<SeatKind> {
        let id = state.kind_id()?;
        if let Some(kind) = self.seat_kind(&id) {
            return Some(kind.clone());
        }
        Some(match state {
            SeatState::Blocked => SeatKind::brick(),
            SeatState::Ticketed(_) => SeatKind::ticket(),
            _ => SeatKind::new(id.clone(), id.as_str()),
        })
    }

    /// Catalog with `ticket_type` appended, `None` if its id is taken
    #[must_use]
    pub fn ticket_types_with_added(&self, ticket_type: TicketType) -> Option<Vec<TicketType>> {
        if self.ticket_type(&ticket_type.id).is_some() {
            return None;
        }
        let mut ticket_types = self.ticket_types.clone();
        ticket_types.push(ticket_type);
        Some(ticket_types)
    }

    /// Catalog with the name and color of `id` changed, `None` if unknown
    #[must_use]
    pub fn ticket_types_with_updated(
        &self,
        id: &TicketTypeId,
        name: &str,
        color: &str,
    ) -> Option<Vec<TicketType>> {
        self.ticket_type(id)?;
        Some(
            self.ticket_types
                .iter()
                .map(|ticket_type| {
                    if &ticket_type.id == id {
                        TicketType {
                            name: name.to_owned(),
                            color: color.to_owned(),
                            ..ticket_type.clone()
                        }
                    } else {
                        ticket_type.clone()
                    }
                })
                .collect(),
        )
    }

    /// Catalog without `id`, `None` if unknown
    #[must_use]
    pub fn ticket_types_without(&self, id: &TicketTypeId) -> Option<Vec<TicketType>> {
        self.ticket_type(id)?;
        Some(
            self.ticket_types
                .iter()
                .filter(|ticket_type| &ticket_type.id != id)
                .cloned()
                .collect(),
        )
    }
}

/// Stock seat kinds: ticket, brick, none
#[must_use]
pub fn default_seat_kinds() -> Vec<SeatKind> {
    vec![SeatKind::ticket(), SeatKind::brick(), SeatKind::none()]
}

/// Stock ticket types: regular and VIP
#[must_use]
pub fn default_ticket_types() -> Vec<TicketType> {
    vec![
        TicketType::new("regular", "Regular", "#03dbfc", "R"),
        TicketType::new("vip", "VIP", "#fca503", "V"),
    ]
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_defaults_order() {
        let registries = Registries::with_defaults();
        let kinds: Vec<&str> = registries.seat_kinds().iter().map(|k| k.id.as_str()).collect();
        assert_eq!(kinds, ["ticket", "brick", "none"]);
        assert_eq!(registries.ticket_types()[0].id.as_str(), "regular");
    }

    #[test]
    fn test_add_rejects_duplicate_id() {
        let registries = Registries::with_defaults();
        let dup = TicketType::new("vip", "Other VIP", "#000000", "X");
        assert!(registries.ticket_types_with_added(dup).is_none());

        let balcony = TicketType::new("balcony", "Balcony", "#00ff00", "B");
        let catalog = registries.ticket_types_with_added(balcony.clone()).unwrap();
        assert_eq!(catalog.last(), Some(&balcony));
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_update_keeps_id_label_and_position() {
        let registries = Registries::with_defaults();
        let catalog = registries
            .ticket_types_with_updated(&"regular".into(), "Standard", "#111111")
            .unwrap();
        assert_eq!(catalog[0], TicketType::new("regular", "Standard", "#111111", "R"));
        assert_eq!(catalog[1], registries.ticket_types()[1]);
        assert!(registries
            .ticket_types_with_updated(&"gold".into(), "Gold", "#ffd700")
            .is_none());
    }

    #[test]
    fn test_remove() {
        let registries = Registries::with_defaults();
        let catalog = registries.ticket_types_without(&"regular".into()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].id.as_str(), "vip");
        assert!(registries.ticket_types_without(&"gold".into()).is_none());
    }

    #[test]
    fn test_kind_of_falls_back_when_catalog_lacks_kind() {
        let mut registries = Registries::with_defaults();
        registries.set_seat_kinds(vec![SeatKind::new("brick", "Wall")]);

        assert_eq!(registries.kind_of(&SeatState::Blocked).unwrap().name, "Wall");
        assert_eq!(registries.kind_of(&SeatState::Ticketed(None)), Some(SeatKind::ticket()));
        assert_eq!(
            registries.kind_of(&SeatState::Other("stage".into())),
            Some(SeatKind::new("stage", "stage"))
        );
        assert_eq!(registries.kind_of(&SeatState::Empty), None);
    }
}
