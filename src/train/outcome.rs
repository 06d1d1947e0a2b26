use serde::{Serialize, Deserialize};

/// Result of a completed [`train_network`](crate::train::train_network) run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainOutcome {
    /// Number of epochs actually run.
    pub epochs: usize,
    /// Average per-sample error of the last completed epoch.
    pub final_error: f64,
    /// Whether `final_error` dropped below the configured target.
    pub converged: bool,
}
