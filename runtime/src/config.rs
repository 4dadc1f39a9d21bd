//! Configuration for the seat map editor.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::error::StoreError;
use crate::store::DEFAULT_BROADCAST_CAPACITY;
use seatmap_core::environment::SeatLabeler;
use seatmap_core::grid::{self, MAX_CELLS};
use seatmap_core::registry::{default_seat_kinds, default_ticket_types};
use seatmap_core::state::{DEFAULT_COLS, DEFAULT_ROWS};
use seatmap_core::{Registries, SeatKind, SeatMapState, TicketType};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::env;
use std::hash::Hash;
use std::num::{NonZeroU32, NonZeroUsize};
use std::str::FromStr;

/// Environment variable for the initial row count
pub const ROWS_VAR: &str = "SEATMAP_DEFAULT_ROWS";
/// Environment variable for the initial column count
pub const COLS_VAR: &str = "SEATMAP_DEFAULT_COLS";
/// Environment variable for the snapshot broadcast capacity
pub const BROADCAST_CAPACITY_VAR: &str = "SEATMAP_BROADCAST_CAPACITY";

/// Editor configuration
///
/// # Example
///
/// ```
/// use seatmap_runtime::EditorConfig;
/// use std::num::NonZeroU32;
///
/// let config = EditorConfig::default()
///     .with_dimensions(NonZeroU32::MIN, NonZeroU32::MIN.saturating_add(7))
///     .with_broadcast_capacity(64);
/// assert_eq!(config.cols.get(), 8);
/// ```
///
/// Also loadable from a config file: missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Row count of a fresh editor
    pub rows: NonZeroU32,
    /// Column count of a fresh editor
    pub cols: NonZeroU32,
    /// Number of state changes buffered per subscriber
    pub broadcast_capacity: usize,
    /// Initial seat kind catalog
    pub seat_kinds: Vec<SeatKind>,
    /// Initial ticket type catalog
    pub ticket_types: Vec<TicketType>,
}

impl EditorConfig {
    /// Load configuration from environment variables.
    ///
    /// Missing, unparsable or zero values fall back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            rows: parse_var(&lookup, ROWS_VAR).unwrap_or(defaults.rows),
            cols: parse_var(&lookup, COLS_VAR).unwrap_or(defaults.cols),
            broadcast_capacity: parse_var(&lookup, BROADCAST_CAPACITY_VAR)
                .map_or(defaults.broadcast_capacity, NonZeroUsize::get),
            ..defaults
        }
    }

    /// Set the initial grid dimensions
    #[must_use]
    pub const fn with_dimensions(mut self, rows: NonZeroU32, cols: NonZeroU32) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }

    /// Set the snapshot broadcast capacity
    #[must_use]
    pub const fn with_broadcast_capacity(mut self, capacity: usize) -> Self {
        self.broadcast_capacity = capacity;
        self
    }

    /// Set the initial seat kind catalog
    #[must_use]
    pub fn with_seat_kinds(mut self, seat_kinds: Vec<SeatKind>) -> Self {
        self.seat_kinds = seat_kinds;
        self
    }

    /// Set the initial ticket type catalog
    #[must_use]
    pub fn with_ticket_types(mut self, ticket_types: Vec<TicketType>) -> Self {
        self.ticket_types = ticket_types;
        self
    }

    /// Check the configuration can build a store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidConfig`] if the grid exceeds
    /// [`MAX_CELLS`] seats, the broadcast capacity is 0 or a catalog contains
    /// the same id twice.
    pub fn validate(&self) -> Result<(), StoreError> {
        if !grid::dimensions_fit(self.rows.get(), self.cols.get()) {
            return Err(StoreError::InvalidConfig(format!(
                "a {}x{} grid exceeds {MAX_CELLS} seats",
                self.rows, self.cols
            )));
        }
        if self.broadcast_capacity == 0 {
            return Err(StoreError::InvalidConfig(
                "broadcast capacity must be at least 1".to_owned(),
            ));
        }
        if let Some(id) = first_duplicate(self.seat_kinds.iter().map(|k| &k.id)) {
            return Err(StoreError::InvalidConfig(format!(
                "seat kind `{id}` is listed twice"
            )));
        }
        if let Some(id) = first_duplicate(self.ticket_types.iter().map(|t| &t.id)) {
            return Err(StoreError::InvalidConfig(format!(
                "ticket type `{id}` is listed twice"
            )));
        }
        Ok(())
    }

    /// Fresh editor state described by this configuration
    ///
    /// Only meaningful for a configuration that passes [`Self::validate`].
    #[must_use]
    pub fn initial_state<L>(&self, labeler: &L) -> SeatMapState
    where
        L: SeatLabeler + ?Sized,
    {
        SeatMapState::new(
            self.rows,
            self.cols,
            Registries::new(self.seat_kinds.clone(), self.ticket_types.clone()),
            labeler,
        )
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            broadcast_capacity: DEFAULT_BROADCAST_CAPACITY,
            seat_kinds: default_seat_kinds(),
            ticket_types: default_ticket_types(),
        }
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let raw = lookup(key)?;
    let parsed = raw.trim().parse().ok();
    if parsed.is_none() {
        tracing::warn!(key, value = %raw, "Ignoring invalid configuration value");
    }
    parsed
}

fn first_duplicate<'a, T, I>(ids: I) -> Option<&'a T>
where
    T: Eq + Hash + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut seen = HashSet::new();
    ids.into_iter().find(|id| !seen.insert(*id))
}
