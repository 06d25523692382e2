use ndarray::{Array1, Array2, ArrayView1, Axis};
use rand::Rng;

use crate::error::{check_len, Error, Result};
use crate::matrix::{gaussian_matrix, gaussian_vector, init_std};

/// The parameters of one layer transition `k -> k + 1`.
///
/// Weights are stored with one row per neuron of layer `k + 1` and one column
/// per neuron of layer `k`, so a transition is a plain matrix-vector product.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    /// `outputs x inputs` weight matrix.
    weights: Array2<f64>,
    /// One bias per output neuron.
    biases: Array1<f64>,
}

impl Layer {
    /// Initializes a new, untrained layer with Gaussian parameters.
    ///
    /// Arguments:
    ///
    ///  * `inputs` - the number of inputs to this layer.
    ///  * `outputs` - the number of outputs from this layer.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, inputs: usize, outputs: usize) -> Self {
        let std = init_std(inputs);
        Layer {
            weights: gaussian_matrix(rng, outputs, inputs, std),
            biases: gaussian_vector(rng, outputs, std),
        }
    }

    /// A layer whose weights and biases are all zero.
    pub fn zeros(inputs: usize, outputs: usize) -> Self {
        Layer {
            weights: Array2::zeros((outputs, inputs)),
            biases: Array1::zeros(outputs),
        }
    }

    /// Builds a layer from explicit parameters.
    ///
    /// `weights` must have one row per bias and at least one row and column.
    pub fn from_parts(weights: Array2<f64>, biases: Array1<f64>) -> Result<Self> {
        let (rows, cols) = weights.dim();
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidTopology {
                layers: vec![cols, rows],
            });
        }
        check_len("biases", rows, biases.len())?;
        Ok(Layer { weights, biases })
    }

    /// Returns the number of inputs to this layer.
    pub fn input_len(&self) -> usize {
        self.weights.ncols()
    }

    /// Returns the number of outputs from this layer.
    pub fn output_len(&self) -> usize {
        self.weights.nrows()
    }

    pub fn weights(&self) -> &Array2<f64> {
        &self.weights
    }

    pub fn biases(&self) -> &Array1<f64> {
        &self.biases
    }

    /// Redraws every weight and bias from `N(0, 2 / inputs)`.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        *self = Layer::random(rng, self.input_len(), self.output_len());
    }

    /// `W . inputs + b`.
    pub fn weighted_sums(&self, inputs: ArrayView1<f64>) -> Array1<f64> {
        self.weights.dot(&inputs) + &self.biases
    }

    /// Carries the `deltas` of this layer's outputs back to its inputs,
    /// `W^T . deltas`. Biases take no part in the backward pass.
    pub fn backpropagate(&self, deltas: &Array1<f64>) -> Array1<f64> {
        self.weights.t().dot(deltas)
    }

    /// Adds one sample's gradient step: `W += eta * deltas . inputs^T` and
    /// `b += eta * deltas`.
    pub fn accumulate(&mut self, eta: f64, inputs: &Array1<f64>, deltas: &Array1<f64>) {
        let column = deltas.view().insert_axis(Axis(1));
        let row = inputs.view().insert_axis(Axis(0));
        self.weights.scaled_add(eta, &column.dot(&row));
        self.biases.scaled_add(eta, deltas);
    }
}
