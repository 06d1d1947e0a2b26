//! Error types shared across the crate.

use thiserror::Error;

/// Errors surfaced by network operations and the data format.
#[derive(Debug, Error)]
pub enum Error {
    /// A caller passed a wrong-sized vector or an out-of-range layer index.
    /// The failing call performed no mutation before the check.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Malformed or incomplete serialized network data. No partial network
    /// is ever returned from a failed parse.
    #[error("invalid network format: {0}")]
    Format(String),

    /// I/O failure while reading or writing a data stream.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
