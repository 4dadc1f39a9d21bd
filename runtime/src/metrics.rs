//! Metrics for observability and monitoring.
//!
//! Everything is recorded through the `metrics` facade. No exporter is
//! bundled: the host installs a recorder (Prometheus, statsd, ...) and may
//! call [`describe_metrics`] once afterwards to register descriptions.
//!
//! # Example
//!
//! ```
//! use seatmap_runtime::metrics::{self, EditorMetrics};
//!
//! // Without an installed recorder this is a no-op.
//! metrics::describe_metrics();
//! EditorMetrics::record_import();
//! ```

use metrics::{counter, describe_counter, describe_histogram, histogram};
use seatmap_core::effect::Effect;
use std::time::Duration;

/// Actions dispatched through a store
pub const ACTIONS_TOTAL: &str = "seatmap_actions_total";
/// Reducer execution time
pub const REDUCER_DURATION_SECONDS: &str = "seatmap_reducer_duration_seconds";
/// Actions that changed the seat map
pub const MUTATIONS_TOTAL: &str = "seatmap_mutations_total";
/// Cells changed by paint gestures
pub const SEATS_PAINTED_TOTAL: &str = "seatmap_seats_painted_total";
/// Documents imported successfully
pub const IMPORTS_TOTAL: &str = "seatmap_imports_total";
/// Documents rejected on import
pub const IMPORTS_REJECTED_TOTAL: &str = "seatmap_imports_rejected_total";
/// Documents exported
pub const EXPORTS_TOTAL: &str = "seatmap_exports_total";

/// Register all metric descriptions with the installed recorder.
pub fn describe_metrics() {
    describe_counter!(ACTIONS_TOTAL, "Total number of actions dispatched to a store");
    describe_histogram!(REDUCER_DURATION_SECONDS, "Time taken by the reducer per action");
    describe_counter!(MUTATIONS_TOTAL, "Total number of actions that changed the seat map");
    describe_counter!(SEATS_PAINTED_TOTAL, "Total number of cells changed by painting");
    describe_counter!(IMPORTS_TOTAL, "Total number of documents imported");
    describe_counter!(
        IMPORTS_REJECTED_TOTAL,
        "Total number of documents rejected on import"
    );
    describe_counter!(EXPORTS_TOTAL, "Total number of documents exported");
}

/// Store metrics recorder.
pub struct StoreMetrics;

impl StoreMetrics {
    /// Record a dispatched action and what it changed.
    pub fn record_action(duration: Duration, effects: &[Effect]) {
        counter!(ACTIONS_TOTAL).increment(1);
        histogram!(REDUCER_DURATION_SECONDS).record(duration.as_secs_f64());

        if effects.iter().any(Effect::is_mutation) {
            counter!(MUTATIONS_TOTAL).increment(1);
        }

        let painted = effects
            .iter()
            .filter(|e| matches!(e, Effect::SeatUpdated(_)))
            .count();
        if painted > 0 {
            counter!(SEATS_PAINTED_TOTAL).increment(painted as u64);
        }
    }
}

/// Import/export metrics recorder.
pub struct EditorMetrics;

impl EditorMetrics {
    /// Record a successful import.
    pub fn record_import() {
        counter!(IMPORTS_TOTAL).increment(1);
    }

    /// Record a rejected import.
    pub fn record_import_rejected() {
        counter!(IMPORTS_REJECTED_TOTAL).increment(1);
    }

    /// Record an export.
    pub fn record_export() {
        counter!(EXPORTS_TOTAL).increment(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seatmap_core::SeatId;

    #[test]
    fn test_recording_without_recorder_is_noop() {
        describe_metrics();
        StoreMetrics::record_action(
            Duration::from_micros(3),
            &[Effect::SeatUpdated(SeatId::new(0, 0)), Effect::None],
        );
        EditorMetrics::record_import();
        EditorMetrics::record_import_rejected();
        EditorMetrics::record_export();
    }
}
