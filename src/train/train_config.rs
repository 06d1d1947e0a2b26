/// Configuration for a [`train_network`](crate::train::train_network) run.
///
/// # Fields
/// - `max_epochs`   — upper bound on full passes over the training data
/// - `target_error` — stop as soon as the epoch's average error falls below
///                    this threshold
/// - `log_every`    — emit a debug-level progress line every N epochs;
///                    `0` disables progress logging
pub struct TrainConfig {
    pub max_epochs: usize,
    pub target_error: f64,
    pub log_every: usize,
}

impl TrainConfig {
    /// Creates a config with progress logging every 1000 epochs.
    pub fn new(max_epochs: usize, target_error: f64) -> Self {
        TrainConfig {
            max_epochs,
            target_error,
            log_every: 1000,
        }
    }
}
