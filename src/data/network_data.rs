use std::fs::File;
use std::io::{BufReader, BufWriter, BufRead, Write};
use std::path::Path;

use crate::data::parse;
use crate::error::{Error, Result};
use crate::network::Network;

/// A network plus an optional paired training dataset, as read from or
/// written to the plain-text format.
///
/// Short-lived by design: build one from a stream (or wrap an existing
/// network), pull the network and samples out, or `save` it. The format is
/// line-oriented with whitespace-delimited tokens:
///
/// ```text
/// topology: 2 2 1
/// eta: 0.15
/// momentum: 0.5
/// transfer_function: sig
/// in: 0 1
/// out: 1
/// neuron: 0.7 0.2
/// ...
/// ```
///
/// `neuron:` lines list each neuron's outgoing weights in layer-major,
/// neuron-minor order (bias neurons included, last layer skipped).
#[derive(Debug)]
pub struct NetworkData {
    network: Network,
    inputs: Vec<Vec<f64>>,
    target_outputs: Vec<Vec<f64>>,
}

impl NetworkData {
    /// Wraps an existing network with no training samples, so the state of
    /// a programmatically created network can be saved.
    pub fn from_network(network: Network) -> NetworkData {
        NetworkData {
            network,
            inputs: Vec::new(),
            target_outputs: Vec::new(),
        }
    }

    /// Wraps a network together with training samples.
    ///
    /// Sample sequences must pair up 1:1 and each sample must match the
    /// network's input/output arity.
    pub fn new(
        network: Network,
        inputs: Vec<Vec<f64>>,
        target_outputs: Vec<Vec<f64>>,
    ) -> Result<NetworkData> {
        if inputs.len() != target_outputs.len() {
            return Err(Error::InvalidArgument(
                "inputs and target outputs lengths do not match".into(),
            ));
        }

        let topology = network.topology();
        let input_len = topology[0];
        let output_len = topology[topology.len() - 1];

        for (i, input) in inputs.iter().enumerate() {
            if input.len() != input_len {
                return Err(Error::InvalidArgument(format!(
                    "incorrect number of inputs in set {}",
                    i
                )));
            }
        }
        for (i, target) in target_outputs.iter().enumerate() {
            if target.len() != output_len {
                return Err(Error::InvalidArgument(format!(
                    "incorrect number of target outputs in set {}",
                    i
                )));
            }
        }

        Ok(NetworkData {
            network,
            inputs,
            target_outputs,
        })
    }

    /// Parses network data from a line-of-text source. The whole stream is
    /// consumed; on any format error no partial network is returned.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<NetworkData> {
        parse::parse_stream(reader)
    }

    /// Reads network data from a file.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<NetworkData> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Writes the full state — topology, hyperparameters, transfer function,
    /// samples, and connection weights — in a form `from_reader` accepts.
    pub fn save<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = BufWriter::new(writer);
        let network = &self.network;

        write!(writer, "topology:")?;
        for size in network.topology() {
            write!(writer, " {}", size)?;
        }
        writeln!(writer)?;

        writeln!(writer, "eta: {}", network.eta())?;
        writeln!(writer, "momentum: {}", network.momentum())?;
        writeln!(writer, "transfer_function: {}", network.transfer_function())?;

        for (input, target) in self.inputs.iter().zip(&self.target_outputs) {
            write!(writer, "in:")?;
            for value in input {
                write!(writer, " {}", value)?;
            }
            writeln!(writer)?;

            write!(writer, "out:")?;
            for value in target {
                write!(writer, " {}", value)?;
            }
            writeln!(writer)?;
        }

        let layers = network.layers();
        for layer in &layers[..layers.len() - 1] {
            for neuron in layer {
                write!(writer, "neuron:")?;
                for conn in neuron.connections() {
                    write!(writer, " {}", conn.weight)?;
                }
                writeln!(writer)?;
            }
        }

        writer.flush()?;
        Ok(())
    }

    /// Writes the network data to a file, creating or truncating it.
    pub fn save_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.save(File::create(path)?)
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn network_mut(&mut self) -> &mut Network {
        &mut self.network
    }

    pub fn inputs(&self) -> &[Vec<f64>] {
        &self.inputs
    }

    pub fn target_outputs(&self) -> &[Vec<f64>] {
        &self.target_outputs
    }

    pub fn into_network(self) -> Network {
        self.network
    }

    pub fn into_parts(self) -> (Network, Vec<Vec<f64>>, Vec<Vec<f64>>) {
        (self.network, self.inputs, self.target_outputs)
    }

    /// Parser-side constructor; the parser has already validated pairing.
    pub(crate) fn assemble(
        network: Network,
        inputs: Vec<Vec<f64>>,
        target_outputs: Vec<Vec<f64>>,
    ) -> NetworkData {
        NetworkData {
            network,
            inputs,
            target_outputs,
        }
    }
}
