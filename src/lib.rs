//! Fully connected feed-forward networks trained with backpropagation.
//!
//! A [`Network`](feed_forward::Network) is built from a list of layer
//! widths and trained by a [`Trainer`](trainer::Trainer) in online, batch or
//! mini-batch mode. Training can be stopped from another thread through a
//! [`StopHandle`](trainer::StopHandle).

pub mod activator;
pub mod config;
pub mod dataset;
pub mod error;
pub mod feed_forward;
pub mod layer;
pub mod trainer;

mod matrix;
mod utils;

pub use crate::error::{Error, Result};
