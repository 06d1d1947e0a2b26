//! Line scanner for the plain-text network format.
//!
//! A single left-to-right pass over labeled lines. A line is a record only
//! if its first token is a label of the form `name:`; anything else is
//! skipped. Value tokens are consumed until the first token that does not
//! parse as a number, which makes trailing junk harmless and lets a future
//! writer append annotations.

use std::io::BufRead;

use log::warn;

use crate::data::network_data::NetworkData;
use crate::error::{Error, Result};
use crate::network::Network;
use crate::transfer::TransferFunction;

pub(crate) fn parse_stream<R: BufRead>(reader: R) -> Result<NetworkData> {
    let mut parser = Parser::default();
    for line in reader.lines() {
        parser.handle_line(&line?)?;
    }
    parser.finish()
}

/// State carried across lines of one parse.
#[derive(Default)]
struct Parser {
    topology: Option<Vec<usize>>,
    eta: Option<f64>,
    momentum: Option<f64>,
    transfer: Option<TransferFunction>,
    inputs: Vec<Vec<f64>>,
    target_outputs: Vec<Vec<f64>>,
    /// Lazily allocated `[layer][neuron][connection]` weight rows; the last
    /// layer has no connections and is not represented.
    weights: Option<Vec<Vec<Vec<f64>>>>,
    weight_layer: usize,
    weight_neuron: usize,
    /// Trips false on the first malformed `neuron:` row and never recovers:
    /// partial weight data is never partially applied.
    weights_invalid: bool,
}

impl Parser {
    fn handle_line(&mut self, line: &str) -> Result<()> {
        let mut tokens = line.split_whitespace();
        let first = match tokens.next() {
            Some(t) => t,
            None => return Ok(()),
        };

        // A record starts with a `label:` token; one colon, at the end.
        let label = match first.strip_suffix(':') {
            Some(l) if !l.is_empty() && !l.contains(':') => l,
            _ => return Ok(()),
        };
        let values: Vec<&str> = tokens.collect();

        match label {
            "topology" => self.read_topology(&values),
            "eta" => {
                self.eta = Some(parse_single(&values, "invalid eta")?);
                Ok(())
            }
            "momentum" => {
                self.momentum = Some(parse_single(&values, "invalid momentum")?);
                Ok(())
            }
            "transfer_function" => self.read_transfer_function(&values),
            "in" => self.read_sample(&values, SampleKind::Input),
            "out" => self.read_sample(&values, SampleKind::TargetOutput),
            "neuron" => self.read_neuron_weights(&values),
            _ => {
                warn!("unknown label '{}:' in network data, ignoring", label);
                Ok(())
            }
        }
    }

    fn read_topology(&mut self, values: &[&str]) -> Result<()> {
        let layers: Vec<usize> = values
            .iter()
            .map_while(|t| t.parse::<usize>().ok())
            .collect();
        if layers.is_empty() {
            return Err(Error::Format("invalid topology".into()));
        }
        self.topology = Some(layers);
        Ok(())
    }

    fn read_transfer_function(&mut self, values: &[&str]) -> Result<()> {
        let token = values
            .first()
            .copied()
            .ok_or_else(|| Error::Format("empty transfer function definition".into()))?;
        self.transfer = Some(
            TransferFunction::from_name(token)
                .ok_or_else(|| Error::Format("unrecognized transfer function".into()))?,
        );
        Ok(())
    }

    /// Shared reader for `in:` and `out:` lines. The expected length comes
    /// from the topology ends, so topology must already be known.
    fn read_sample(&mut self, values: &[&str], kind: SampleKind) -> Result<()> {
        let topology = match self.topology.as_ref() {
            Some(t) => t,
            None => {
                return Err(Error::Format(match kind {
                    SampleKind::Input => "inputs must appear after topology".into(),
                    SampleKind::TargetOutput => {
                        "target outputs must appear after topology".into()
                    }
                }))
            }
        };
        let expected = match kind {
            SampleKind::Input => topology[0],
            SampleKind::TargetOutput => topology[topology.len() - 1],
        };

        let mut sample: Vec<f64> = values
            .iter()
            .map_while(|t| t.parse::<f64>().ok())
            .collect();

        if sample.len() < expected {
            return Err(Error::Format(match kind {
                SampleKind::Input => "too few training inputs".into(),
                SampleKind::TargetOutput => "too few target outputs".into(),
            }));
        }
        if sample.len() > expected {
            match kind {
                SampleKind::Input => warn!("ignoring extra training input values"),
                SampleKind::TargetOutput => warn!("ignoring extra target output values"),
            }
            sample.truncate(expected);
        }

        match kind {
            SampleKind::Input => self.inputs.push(sample),
            SampleKind::TargetOutput => self.target_outputs.push(sample),
        }
        Ok(())
    }

    /// Fills the next weight row of the cursor, layer-major, neuron-minor.
    /// Any malformed row (wrong length, or a row arriving after every slot
    /// was consumed) invalidates all weight data for this parse.
    fn read_neuron_weights(&mut self, values: &[&str]) -> Result<()> {
        let topology = match self.topology.as_ref() {
            Some(t) => t,
            None => {
                return Err(Error::Format(
                    "connection weights must appear after topology".into(),
                ))
            }
        };
        if self.weights_invalid {
            return Ok(());
        }

        // All expected rows were already consumed.
        if self.weight_layer >= topology.len() - 1 {
            self.weights_invalid = true;
            return Ok(());
        }

        let weights = self.weights.get_or_insert_with(|| {
            (0..topology.len() - 1)
                .map(|l| vec![vec![0.0; topology[l + 1]]; topology[l] + 1])
                .collect()
        });

        let row_len = weights[self.weight_layer][self.weight_neuron].len();
        let row: Vec<f64> = values
            .iter()
            .map_while(|t| t.parse::<f64>().ok())
            .collect();

        if row.len() != row_len {
            self.weights_invalid = true;
            return Ok(());
        }

        weights[self.weight_layer][self.weight_neuron] = row;

        self.weight_neuron += 1;
        if self.weight_neuron >= weights[self.weight_layer].len() {
            self.weight_layer += 1;
            self.weight_neuron = 0;
        }
        Ok(())
    }

    /// End-of-stream checks, network construction, and weight application.
    fn finish(self) -> Result<NetworkData> {
        if self.inputs.len() != self.target_outputs.len() {
            return Err(Error::Format(
                "mismatched input and target output samples".into(),
            ));
        }

        let topology = self
            .topology
            .ok_or_else(|| Error::Format("no topology defined".into()))?;

        let transfer = self.transfer.unwrap_or_else(|| {
            warn!("no transfer function defined, defaulting to sigmoid");
            TransferFunction::Sigmoid
        });

        let eta = self.eta.ok_or_else(|| Error::Format("eta not defined".into()))?;
        let momentum = self
            .momentum
            .ok_or_else(|| Error::Format("momentum not defined".into()))?;

        let mut network = Network::new(&topology, eta, momentum, transfer)?;

        if let Some(weights) = self.weights {
            if !self.weights_invalid {
                network.apply_weights(&weights);
            }
        }

        Ok(NetworkData::assemble(
            network,
            self.inputs,
            self.target_outputs,
        ))
    }
}

#[derive(Clone, Copy)]
enum SampleKind {
    Input,
    TargetOutput,
}

fn parse_single(values: &[&str], message: &str) -> Result<f64> {
    values
        .first()
        .and_then(|t| t.parse::<f64>().ok())
        .ok_or_else(|| Error::Format(message.into()))
}
