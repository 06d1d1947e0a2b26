use log::debug;

use crate::error::{Error, Result};
use crate::network::Network;
use crate::train::outcome::TrainOutcome;
use crate::train::train_config::TrainConfig;

/// Trains `network` online: one feed-forward/back-propagation cycle per
/// sample, epoch after epoch, until the average error of an epoch falls
/// below `config.target_error` or `config.max_epochs` is reached.
///
/// The per-epoch error is the mean of the network's single-sample squared
/// errors across the dataset.
pub fn train_network(
    network: &mut Network,
    inputs: &[Vec<f64>],
    target_outputs: &[Vec<f64>],
    config: &TrainConfig,
) -> Result<TrainOutcome> {
    if inputs.is_empty() {
        return Err(Error::InvalidArgument("no training samples".into()));
    }
    if inputs.len() != target_outputs.len() {
        return Err(Error::InvalidArgument(
            "inputs and target outputs lengths do not match".into(),
        ));
    }

    let mut epochs = 0;
    let mut average_error = f64::INFINITY;

    while epochs < config.max_epochs {
        epochs += 1;

        let mut error = 0.0;
        for (input, target) in inputs.iter().zip(target_outputs) {
            network.feed_forward(input)?;
            network.back_propagation(target)?;
            error += network.recent_average_error();
        }
        average_error = error / inputs.len() as f64;

        if config.log_every > 0 && epochs % config.log_every == 0 {
            debug!("epoch {}: average error {:.6}", epochs, average_error);
        }

        if average_error < config.target_error {
            return Ok(TrainOutcome {
                epochs,
                final_error: average_error,
                converged: true,
            });
        }
    }

    Ok(TrainOutcome {
        epochs,
        final_error: average_error,
        converged: false,
    })
}
