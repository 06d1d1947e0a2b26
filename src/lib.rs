pub mod data;
pub mod error;
pub mod network;
pub mod train;
pub mod transfer;

// Convenience re-exports
pub use data::NetworkData;
pub use error::Error;
pub use network::{Connection, Network, Neuron};
pub use train::{train_network, TrainConfig, TrainOutcome};
pub use transfer::TransferFunction;
