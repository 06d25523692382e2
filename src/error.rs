//! Errors raised by network construction, the forward pass and training.

use thiserror::Error;

/// Everything that can go wrong while building, running or training a
/// network.
///
/// Cancelling a training run is not an error; it is reported through
/// [`TrainingState::StoppedByRequest`](crate::trainer::TrainingState).
/// Numeric blow-ups (NaN, infinities) are not detected either and simply show
/// up in the reported error.
#[derive(Debug, Error)]
pub enum Error {
    /// The layer widths do not describe a network: fewer than two layers, or
    /// a layer without neurons.
    #[error("invalid topology {layers:?}: need at least two layers of at least one neuron each")]
    InvalidTopology { layers: Vec<usize> },

    /// A vector handed to the network has the wrong length.
    #[error("expected {expected} {what}, but got {got}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    /// Training was requested without any samples.
    #[error("cannot train on an empty dataset")]
    EmptyDataset,

    /// A training configuration could not be parsed.
    #[error("invalid training configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Shorthand used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Fails with [`Error::DimensionMismatch`] unless `got == expected`.
pub(crate) fn check_len(what: &'static str, expected: usize, got: usize) -> Result<()> {
    if expected == got {
        Ok(())
    } else {
        Err(Error::DimensionMismatch { what, expected, got })
    }
}
