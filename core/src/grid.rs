//! Grid model: dimensions plus one seat record per in-bounds coordinate.
//!
//! The seat mapping always covers exactly `0 <= row < rows`,
//! `0 <= col < cols`. Nothing outside the bounds is stored and nothing inside
//! is missing, so `len() == rows * cols` holds for every reachable grid.

use crate::environment::SeatLabeler;
use crate::error::SeatMapError;
use crate::types::{Seat, SeatId, SeatState};
use std::collections::HashMap;
use std::num::NonZeroU32;

/// Largest number of seats a grid may hold
pub const MAX_CELLS: u64 = 1_000_000;

/// Seat grid
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: u32,
    cols: u32,
    seats: HashMap<SeatId, Seat>,
}

impl Grid {
    /// Creates a grid of empty seats.
    ///
    /// # Errors
    ///
    /// Returns [`SeatMapError::InvalidDimensions`] if either dimension is 0
    /// or the grid would exceed [`MAX_CELLS`] seats.
    pub fn new<L>(rows: u32, cols: u32, labeler: &L) -> Result<Self, SeatMapError>
    where
        L: SeatLabeler + ?Sized,
    {
        let (rows, cols) = validate_dimensions(rows, cols)?;
        Ok(Self::filled(rows, cols, labeler))
    }

    /// Creates a grid of empty seats from dimensions that are known to be valid
    ///
    /// Callers are responsible for staying within [`MAX_CELLS`].
    #[must_use]
    pub(crate) fn filled<L>(rows: NonZeroU32, cols: NonZeroU32, labeler: &L) -> Self
    where
        L: SeatLabeler + ?Sized,
    {
        let mut grid = Self {
            rows: rows.get(),
            cols: cols.get(),
            seats: HashMap::with_capacity(cell_count(rows.get(), cols.get())),
        };
        grid.fill_missing(labeler);
        grid
    }

    /// Builds a grid from explicit seat states, filling gaps with empty seats.
    ///
    /// Labels are always recomputed. States for coordinates outside the
    /// bounds are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`SeatMapError::InvalidDimensions`] if either dimension is 0
    /// or the grid would exceed [`MAX_CELLS`] seats.
    pub fn from_states<L, I>(rows: u32, cols: u32, states: I, labeler: &L) -> Result<Self, SeatMapError>
    where
        L: SeatLabeler + ?Sized,
        I: IntoIterator<Item = (SeatId, SeatState)>,
    {
        let mut grid = Self::new(rows, cols, labeler)?;
        for (id, state) in states {
            if let Some(seat) = grid.seats.get_mut(&id) {
                seat.state = state;
            }
        }
        Ok(grid)
    }

    /// Number of rows
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns
    #[must_use]
    pub const fn cols(&self) -> u32 {
        self.cols
    }

    /// Number of seat records, always `rows * cols`
    #[must_use]
    pub fn len(&self) -> usize {
        self.seats.len()
    }

    /// A grid is never empty; present for API completeness
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    /// True if `(row, col)` lies inside the current bounds
    #[must_use]
    pub const fn contains(&self, row: u32, col: u32) -> bool {
        row < self.rows && col < self.cols
    }

    /// Changes the dimensions, keeping every seat that stays in bounds.
    ///
    /// Seats present in both the old and the new grid keep their record
    /// unchanged. New coordinates get empty seats; coordinates outside the new
    /// bounds are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`SeatMapError::InvalidDimensions`] if either dimension is 0
    /// or the grid would exceed [`MAX_CELLS`] seats. The grid is unchanged in
    /// that case.
    pub fn resize<L>(&mut self, rows: u32, cols: u32, labeler: &L) -> Result<(), SeatMapError>
    where
        L: SeatLabeler + ?Sized,
    {
        let (rows, cols) = validate_dimensions(rows, cols)?;
        self.rows = rows.get();
        self.cols = cols.get();
        self.seats
            .retain(|id, _| id.row < rows.get() && id.col < cols.get());
        self.fill_missing(labeler);
        Ok(())
    }

    /// Looks up a seat, `None` if the coordinate is out of bounds
    #[must_use]
    pub fn seat(&self, row: u32, col: u32) -> Option<&Seat> {
        self.seats.get(&SeatId::new(row, col))
    }

    /// Looks up a seat, reporting out-of-bounds access as an error
    ///
    /// # Errors
    ///
    /// Returns [`SeatMapError::OutOfBounds`] if the coordinate is outside the grid.
    pub fn try_seat(&self, row: u32, col: u32) -> Result<&Seat, SeatMapError> {
        self.seat(row, col).ok_or(SeatMapError::OutOfBounds {
            row,
            col,
            rows: self.rows,
            cols: self.cols,
        })
    }

    /// All seats, in no particular order
    pub fn seats(&self) -> impl Iterator<Item = &Seat> {
        self.seats.values()
    }

    /// All seats sorted by row, then column
    #[must_use]
    pub fn seats_sorted(&self) -> Vec<&Seat> {
        let mut seats: Vec<&Seat> = self.seats.values().collect();
        seats.sort_unstable_by_key(|seat| seat.id());
        seats
    }

    pub(crate) fn seats_mut(&mut self) -> impl Iterator<Item = &mut Seat> {
        self.seats.values_mut()
    }

    /// Mutable access to an in-bounds seat, materializing it if the record is
    /// missing. Out-of-bounds coordinates return `None`.
    pub(crate) fn seat_entry<L>(&mut self, row: u32, col: u32, labeler: &L) -> Option<&mut Seat>
    where
        L: SeatLabeler + ?Sized,
    {
        if !self.contains(row, col) {
            return None;
        }
        Some(
            self.seats
                .entry(SeatId::new(row, col))
                .or_insert_with(|| Seat::empty(row, col, labeler.label(row, col))),
        )
    }

    fn fill_missing<L>(&mut self, labeler: &L)
    where
        L: SeatLabeler + ?Sized,
    {
        for row in 0..self.rows {
            for col in 0..self.cols {
                self.seats
                    .entry(SeatId::new(row, col))
                    .or_insert_with(|| Seat::empty(row, col, labeler.label(row, col)));
            }
        }
    }
}

/// True if a `rows` x `cols` grid is non-empty and within [`MAX_CELLS`]
#[must_use]
pub fn dimensions_fit(rows: u32, cols: u32) -> bool {
    let cells = u64::from(rows) * u64::from(cols);
    cells > 0 && cells <= MAX_CELLS
}

fn validate_dimensions(rows: u32, cols: u32) -> Result<(NonZeroU32, NonZeroU32), SeatMapError> {
    match (NonZeroU32::new(rows), NonZeroU32::new(cols)) {
        (Some(r), Some(c)) if dimensions_fit(rows, cols) => Ok((r, c)),
        _ => Err(SeatMapError::InvalidDimensions { rows, cols }),
    }
}

fn cell_count(rows: u32, cols: u32) -> usize {
    usize::try_from(u64::from(rows) * u64::from(cols)).unwrap_or(usize::MAX)
}
