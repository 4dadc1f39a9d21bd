//! The seat map store: read model, document import/export and pointer
//! release on top of the generic [`Store`].

use crate::config::EditorConfig;
use crate::error::StoreError;
use crate::metrics::EditorMetrics;
use crate::store::Store;
use seatmap_core::effect::Effect;
use seatmap_core::environment::SeatMapEnvironment;
use seatmap_core::{
    InteractionState, Registries, Seat, SeatMapAction, SeatMapDocument, SeatMapError,
    SeatMapReducer, SeatMapState, SmallVec,
};

/// Store running the seat map reducer
pub type SeatMapStore = Store<SeatMapState, SeatMapAction, SeatMapEnvironment, SeatMapReducer>;

impl SeatMapStore {
    /// Build a store from `config` with the stock label formatter.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidConfig`] if `config` does not validate.
    pub fn with_config(config: &EditorConfig) -> Result<Self, StoreError> {
        Self::with_config_and_environment(config, SeatMapEnvironment::default())
    }

    /// Build a store from `config` with a custom environment.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidConfig`] if `config` does not validate.
    pub fn with_config_and_environment(
        config: &EditorConfig,
        environment: SeatMapEnvironment,
    ) -> Result<Self, StoreError> {
        config.validate()?;
        let state = config.initial_state(&*environment.labeler);
        tracing::info!(
            rows = config.rows.get(),
            cols = config.cols.get(),
            "Seat map store created"
        );
        Ok(Self::with_broadcast_capacity(
            state,
            SeatMapReducer::new(),
            environment,
            config.broadcast_capacity,
        ))
    }

    /// Number of rows
    #[must_use]
    pub fn rows(&self) -> u32 {
        self.state().rows()
    }

    /// Number of columns
    #[must_use]
    pub fn cols(&self) -> u32 {
        self.state().cols()
    }

    /// Seat at `(row, col)`, `None` if out of bounds
    #[must_use]
    pub fn seat(&self, row: u32, col: u32) -> Option<&Seat> {
        self.state().seat(row, col)
    }

    /// Every seat, sorted by row then column
    #[must_use]
    pub fn seats(&self) -> Vec<&Seat> {
        self.state().grid().seats_sorted()
    }

    /// Mode, brushes and gesture flag
    #[must_use]
    pub fn interaction(&self) -> &InteractionState {
        &self.state().interaction
    }

    /// Seat kind and ticket type catalogs
    #[must_use]
    pub fn registries(&self) -> &Registries {
        self.state().registries()
    }

    /// End any paint gesture.
    ///
    /// The presentation layer routes pointer releases from anywhere (outside
    /// the grid, outside the window) here. Idempotent.
    pub fn release_pointer(&mut self) -> SmallVec<[Effect; 4]> {
        self.send(SeatMapAction::PointerUp)
    }

    /// Snapshot the current layout as a document
    #[must_use]
    pub fn export(&self) -> SeatMapDocument {
        EditorMetrics::record_export();
        SeatMapDocument::from_state(self.state())
    }

    /// Snapshot the current layout as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::SeatMap`] if serialization fails.
    pub fn export_json(&self) -> Result<String, StoreError> {
        Ok(self.export().to_json_pretty()?)
    }

    /// Replace the whole layout with `document`.
    ///
    /// On success the grid and catalogs come from the document, labels are
    /// recomputed and the interaction state is reset. On failure nothing
    /// changes.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::SeatMap`] with
    /// [`SeatMapError::InvalidDocument`] if the document fails validation.
    pub fn import(&mut self, document: SeatMapDocument) -> Result<(), StoreError> {
        let layout = document
            .into_layout(&*self.environment().labeler)
            .map_err(reject)?;
        self.send(SeatMapAction::LoadLayout(Box::new(layout)));
        EditorMetrics::record_import();
        Ok(())
    }

    /// Replace the whole layout with a JSON document (see [`Self::import`]).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::SeatMap`] with
    /// [`SeatMapError::InvalidDocument`] for malformed JSON, mistyped fields
    /// or a document that fails validation.
    pub fn import_json(&mut self, json: &str) -> Result<(), StoreError> {
        let document = SeatMapDocument::from_json(json).map_err(reject)?;
        self.import(document)
    }
}

fn reject(err: SeatMapError) -> StoreError {
    tracing::warn!(error = %err, "Import rejected");
    EditorMetrics::record_import_rejected();
    StoreError::SeatMap(err)
}
