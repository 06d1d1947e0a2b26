use rand::prelude::*;
use serde::{Serialize, Deserialize};

/// A weighted edge from one neuron to a neuron in the next layer.
///
/// Owned by the *source* neuron; the target is implied by the connection's
/// position in the source neuron's outgoing array. `delta_weight` keeps the
/// previous update so a fraction of it can be carried forward as momentum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    pub weight: f64,
    pub delta_weight: f64,
}

impl Connection {
    /// Fresh connection with a pseudo-random weight in [0, 1).
    pub fn new() -> Connection {
        Connection {
            weight: rand::thread_rng().gen::<f64>(),
            delta_weight: 0.0,
        }
    }
}

impl Default for Connection {
    fn default() -> Self {
        Connection::new()
    }
}
