pub mod outcome;
pub mod train_config;
pub mod trainer;

pub use outcome::TrainOutcome;
pub use train_config::TrainConfig;
pub use trainer::train_network;
