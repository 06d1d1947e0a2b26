use serde::{Serialize, Deserialize};

use crate::error::{Error, Result};
use crate::network::neuron::Neuron;
use crate::transfer::TransferFunction;

/// A multilayer feed-forward network trained by online back-propagation
/// with momentum.
///
/// Layer `l` holds `topology[l] + 1` neurons; the trailing one is the bias
/// neuron, whose output is pinned to 1.0 and never recomputed. Every neuron
/// of a non-final layer owns one outgoing connection per *real* neuron of
/// the next layer (the next layer's bias is never a connection target).
///
/// State is mutated in place by every call; the contract is exclusive-owner
/// access from a single training loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    topology: Vec<usize>,
    eta: f64,
    momentum: f64,
    transfer: TransferFunction,
    layers: Vec<Vec<Neuron>>,
    recent_average_error: f64,
    results: Vec<f64>,
}

impl Network {
    /// Builds a freshly initialized network.
    ///
    /// `topology` lists the real-neuron count of each layer, input first.
    /// `eta` (learning rate) and `momentum` are fixed for the network's
    /// lifetime. Fails with [`Error::InvalidArgument`] on an empty topology;
    /// construction is otherwise total.
    pub fn new(
        topology: &[usize],
        eta: f64,
        momentum: f64,
        transfer: TransferFunction,
    ) -> Result<Network> {
        if topology.is_empty() {
            return Err(Error::InvalidArgument(
                "topology must contain at least one layer".into(),
            ));
        }

        let number_of_layers = topology.len();
        let mut layers = Vec::with_capacity(number_of_layers);

        for (layer_number, &layer_size) in topology.iter().enumerate() {
            let number_outputs = if layer_number == number_of_layers - 1 {
                0
            } else {
                topology[layer_number + 1]
            };

            // `..=` appends the bias neuron after the real ones.
            let mut layer: Vec<Neuron> = (0..=layer_size)
                .map(|index| Neuron::new(number_outputs, index, transfer))
                .collect();

            let bias = layer.len() - 1;
            layer[bias].output_value = 1.0;

            layers.push(layer);
        }

        let results = vec![0.0; topology[number_of_layers - 1]];

        Ok(Network {
            topology: topology.to_vec(),
            eta,
            momentum,
            transfer,
            layers,
            recent_average_error: 0.0,
            results,
        })
    }

    /// Pushes an input vector through the network, layer by layer.
    ///
    /// Fails with [`Error::InvalidArgument`] if `inputs` does not match the
    /// input layer's real-neuron count; nothing is mutated in that case.
    pub fn feed_forward(&mut self, inputs: &[f64]) -> Result<()> {
        if inputs.len() != self.topology[0] {
            return Err(Error::InvalidArgument(format!(
                "expected {} input values, got {}",
                self.topology[0],
                inputs.len()
            )));
        }

        // Bias neuron of the input layer is not zipped over; it stays 1.0.
        for (neuron, &value) in self.layers[0].iter_mut().zip(inputs) {
            neuron.output_value = value;
        }

        for layer_number in 1..self.layers.len() {
            let (prev_layers, rest) = self.layers.split_at_mut(layer_number);
            let prev_layer = &prev_layers[layer_number - 1];
            let layer = &mut rest[0];

            let real = layer.len() - 1;
            for neuron in &mut layer[..real] {
                neuron.feed_forward(prev_layer);
            }
        }

        Ok(())
    }

    /// Adjusts all connection weights toward `targets` for the sample most
    /// recently pushed through [`feed_forward`](Self::feed_forward).
    ///
    /// Gradients are computed with the pre-update weights; updates then run
    /// from the output layer toward the input.
    pub fn back_propagation(&mut self, targets: &[f64]) -> Result<()> {
        let output_count = self.topology[self.topology.len() - 1];
        if targets.len() != output_count {
            return Err(Error::InvalidArgument(format!(
                "expected {} target values, got {}",
                output_count,
                targets.len()
            )));
        }

        let last = self.layers.len() - 1;

        // Output-layer error and gradients.
        let output_layer = &mut self.layers[last];
        let real = output_layer.len() - 1;
        let mut error = 0.0;
        for (neuron, &target) in output_layer[..real].iter_mut().zip(targets) {
            let delta = target - neuron.output_value;
            error += delta * delta;
            neuron.calculate_output_gradient(target);
        }
        error *= 0.5;
        // Instantaneous squared error of this one sample, despite the name.
        self.recent_average_error = error;

        // Hidden-layer gradients, from the last hidden layer down. The bias
        // neuron gets a gradient too, even though it has no incoming weights.
        for layer_number in (1..last).rev() {
            let (head, tail) = self.layers.split_at_mut(layer_number + 1);
            let layer = &mut head[layer_number];
            let next_layer = &tail[0];

            for neuron in layer.iter_mut() {
                neuron.calculate_hidden_gradient(next_layer);
            }
        }

        // Update weights, output toward input. Only reads finalized
        // gradients and previous-layer outputs.
        for layer_number in (1..=last).rev() {
            let (head, tail) = self.layers.split_at_mut(layer_number);
            let prev_layer = &mut head[layer_number - 1];
            let layer = &tail[0];

            let real = layer.len() - 1;
            for neuron in &layer[..real] {
                neuron.update_input_weights(prev_layer, self.eta, self.momentum);
            }
        }

        Ok(())
    }

    /// Current outputs of the last layer, excluding its bias neuron.
    ///
    /// The same backing buffer is reused across calls: the returned slice is
    /// overwritten by the next `results()` call, so copy it out if it must
    /// outlive further use of the network.
    pub fn results(&mut self) -> &[f64] {
        let last = self.layers.len() - 1;
        let real = self.layers[last].len() - 1;

        for (slot, neuron) in self.results.iter_mut().zip(&self.layers[last][..real]) {
            *slot = neuron.output_value;
        }

        &self.results
    }

    /// Real-neuron outputs of layer `layer` (bias excluded).
    pub fn layer_outputs(&self, layer: usize) -> Result<Vec<f64>> {
        let l = self.layers.get(layer).ok_or_else(|| {
            Error::InvalidArgument(format!("layer index {} out of range", layer))
        })?;
        Ok(l[..l.len() - 1].iter().map(|n| n.output_value).collect())
    }

    /// Overwrites the real-neuron outputs of layer `layer`, leaving the bias
    /// neuron at 1.0. Lets a caller retarget an internal layer as a
    /// pseudo-output for training loops outside this crate.
    pub fn set_layer_outputs(&mut self, layer: usize, values: &[f64]) -> Result<()> {
        let real = match self.layers.get(layer) {
            Some(l) => l.len() - 1,
            None => {
                return Err(Error::InvalidArgument(format!(
                    "layer index {} out of range",
                    layer
                )))
            }
        };
        if values.len() != real {
            return Err(Error::InvalidArgument(format!(
                "expected {} values for layer {}, got {}",
                real,
                layer,
                values.len()
            )));
        }

        for (neuron, &value) in self.layers[layer][..real].iter_mut().zip(values) {
            neuron.output_value = value;
        }

        Ok(())
    }

    pub fn topology(&self) -> &[usize] {
        &self.topology
    }

    pub fn eta(&self) -> f64 {
        self.eta
    }

    pub fn momentum(&self) -> f64 {
        self.momentum
    }

    pub fn transfer_function(&self) -> TransferFunction {
        self.transfer
    }

    /// Squared error (0.5·Σδ²) of the most recent back-propagation sample.
    pub fn recent_average_error(&self) -> f64 {
        self.recent_average_error
    }

    /// All layers, bias neurons included. Read-only; used by the data format
    /// to walk connection weights in layer-major, neuron-minor order.
    pub fn layers(&self) -> &[Vec<Neuron>] {
        &self.layers
    }

    /// Overwrites connection weights from a parsed layer-major matrix.
    pub(crate) fn apply_weights(&mut self, weights: &[Vec<Vec<f64>>]) {
        for (layer, layer_weights) in self.layers.iter_mut().zip(weights) {
            for (neuron, neuron_weights) in layer.iter_mut().zip(layer_weights) {
                for (conn, &weight) in neuron.outgoing.iter_mut().zip(neuron_weights) {
                    conn.weight = weight;
                }
            }
        }
    }

    /// Serializes the network to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }

    /// Deserializes a network from a JSON file previously written by
    /// `save_json`.
    pub fn load_json(path: &str) -> std::io::Result<Network> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn net(topology: &[usize]) -> Network {
        Network::new(topology, 0.15, 0.5, TransferFunction::Sigmoid).unwrap()
    }

    #[test]
    fn every_layer_gets_a_pinned_bias_neuron() {
        let network = net(&[2, 3, 1]);

        for (l, layer) in network.layers().iter().enumerate() {
            assert_eq!(layer.len(), network.topology()[l] + 1);
            assert_eq!(layer[layer.len() - 1].output_value(), 1.0);
        }
    }

    #[test]
    fn bias_outputs_survive_feed_forward() {
        let mut network = net(&[2, 2, 1]);
        network.feed_forward(&[0.3, 0.9]).unwrap();

        for layer in network.layers() {
            assert_eq!(layer[layer.len() - 1].output_value(), 1.0);
        }
    }

    #[test]
    fn fan_out_matches_next_layer_real_count() {
        let network = net(&[3, 4, 2]);
        let topology = network.topology().to_vec();

        for l in 0..topology.len() - 1 {
            for neuron in &network.layers()[l] {
                assert_eq!(neuron.connections().len(), topology[l + 1]);
            }
        }
        for neuron in network.layers().last().unwrap() {
            assert!(neuron.connections().is_empty());
        }
    }

    #[test]
    fn empty_topology_is_rejected() {
        assert!(matches!(
            Network::new(&[], 0.1, 0.0, TransferFunction::Sigmoid),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn results_have_output_arity_and_stay_finite() {
        let mut network = net(&[2, 2, 1]);
        network.feed_forward(&[1.0, 0.0]).unwrap();

        let results = network.results();
        assert_eq!(results.len(), 1);
        assert!(results.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn mismatched_inputs_leave_state_untouched() {
        let mut network = net(&[2, 2, 1]);
        network.feed_forward(&[0.25, 0.75]).unwrap();
        let before: Vec<f64> = network.layer_outputs(0).unwrap();

        assert!(network.feed_forward(&[1.0]).is_err());
        assert!(network.feed_forward(&[1.0, 2.0, 3.0]).is_err());
        assert_eq!(network.layer_outputs(0).unwrap(), before);
    }

    #[test]
    fn mismatched_targets_leave_weights_untouched() {
        let mut network = net(&[2, 2, 1]);
        network.feed_forward(&[1.0, 0.0]).unwrap();
        let before: Vec<f64> = network.layers()[0]
            .iter()
            .flat_map(|n| n.connections().iter().map(|c| c.weight))
            .collect();

        assert!(network.back_propagation(&[1.0, 0.0]).is_err());

        let after: Vec<f64> = network.layers()[0]
            .iter()
            .flat_map(|n| n.connections().iter().map(|c| c.weight))
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn json_representation_round_trips() {
        let mut network = net(&[2, 2, 1]);
        network.feed_forward(&[1.0, 0.0]).unwrap();

        let json = serde_json::to_string(&network).unwrap();
        let mut restored: Network = serde_json::from_str(&json).unwrap();
        restored.feed_forward(&[1.0, 0.0]).unwrap();

        assert_eq!(network.results(), restored.results());
    }

    #[test]
    fn set_layer_outputs_validates_length() {
        let mut network = net(&[2, 3, 1]);

        assert!(network.set_layer_outputs(1, &[0.1, 0.2, 0.3]).is_ok());
        assert_eq!(network.layer_outputs(1).unwrap(), vec![0.1, 0.2, 0.3]);
        // Bias stays pinned.
        assert_eq!(network.layers()[1][3].output_value(), 1.0);

        assert!(network.set_layer_outputs(1, &[0.1, 0.2]).is_err());
        assert!(network.set_layer_outputs(9, &[0.1]).is_err());
    }
}
