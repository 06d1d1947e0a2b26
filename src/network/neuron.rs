use serde::{Serialize, Deserialize};

use crate::network::connection::Connection;
use crate::transfer::TransferFunction;

/// A single neuron: its activation state and the connections it feeds.
///
/// Connections are addressed by *target* index: the edge from this neuron to
/// neuron `i` of the next layer lives at `outgoing[i]`. Conversely, when this
/// neuron computes its own input sum it reads slot `self.index` of every
/// neuron in the previous layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Neuron {
    pub(crate) output_value: f64,
    /// Cached pre-activation sum; gradient derivatives are evaluated here,
    /// not at the output.
    pub(crate) sum: f64,
    pub(crate) gradient: f64,
    pub(crate) index: usize,
    pub(crate) transfer: TransferFunction,
    pub(crate) outgoing: Vec<Connection>,
}

impl Neuron {
    /// `number_outputs` is the real-neuron count of the next layer (0 for
    /// the last layer); `index` is this neuron's position within its layer.
    pub fn new(number_outputs: usize, index: usize, transfer: TransferFunction) -> Neuron {
        Neuron {
            output_value: 0.0,
            sum: 0.0,
            gradient: 0.0,
            index,
            transfer,
            outgoing: (0..number_outputs).map(|_| Connection::new()).collect(),
        }
    }

    pub fn output_value(&self) -> f64 {
        self.output_value
    }

    pub fn gradient(&self) -> f64 {
        self.gradient
    }

    pub fn connections(&self) -> &[Connection] {
        &self.outgoing
    }

    /// Recomputes this neuron's activation from the previous layer's outputs,
    /// including the previous layer's bias neuron.
    pub(crate) fn feed_forward(&mut self, prev_layer: &[Neuron]) {
        let sum: f64 = prev_layer
            .iter()
            .map(|p| p.output_value * p.outgoing[self.index].weight)
            .sum();

        self.sum = sum;
        self.output_value = self.transfer.calculate(sum);
    }

    pub(crate) fn calculate_output_gradient(&mut self, target_value: f64) {
        self.gradient = (target_value - self.output_value) * self.transfer.derivative(self.sum);
    }

    /// Sum of this neuron's contributions to the errors of the nodes it
    /// feeds. The next layer's bias neuron is never a gradient source.
    fn sum_dow(&self, next_layer: &[Neuron]) -> f64 {
        self.outgoing
            .iter()
            .zip(&next_layer[..next_layer.len() - 1])
            .map(|(conn, next)| conn.weight * next.gradient)
            .sum()
    }

    pub(crate) fn calculate_hidden_gradient(&mut self, next_layer: &[Neuron]) {
        self.gradient = self.sum_dow(next_layer) * self.transfer.derivative(self.sum);
    }

    /// Applies the momentum-smoothed weight update for every edge feeding
    /// this neuron. The weights live in the preceding layer's neurons.
    pub(crate) fn update_input_weights(&self, prev_layer: &mut [Neuron], eta: f64, momentum: f64) {
        for prev in prev_layer.iter_mut() {
            let conn = &mut prev.outgoing[self.index];

            let old_delta_weight = conn.delta_weight;
            let new_delta_weight = eta * prev.output_value * self.gradient
                + momentum * old_delta_weight;

            conn.delta_weight = new_delta_weight;
            conn.weight += new_delta_weight;
        }
    }
}
