//! Activation function types.

use serde_derive::{Deserialize, Serialize};

/// [Activation function](https://en.wikipedia.org/wiki/Activation_function)
/// types used by the hidden layers.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activator {
    /// Rectified Linear Unit
    #[serde(rename = "relu")]
    ReLU,
    /// Leaky Rectified Linear Unit
    ///
    /// Takes an `alpha` value to use for negative inputs.
    #[serde(rename = "leaky_relu")]
    LeakyReLU(f64),
    /// Sigmoid function
    Sigmoid,
    /// Hyperbolic tan function
    #[serde(rename = "tanh")]
    TanH,
}

impl Activator {
    /// Evaluates `f(x)` for the selected activation function.
    pub fn f(&self, x: f64) -> f64 {
        match *self {
            Activator::ReLU => {
                if x > 0.0 {
                    x
                } else {
                    0.0
                }
            }
            Activator::LeakyReLU(alpha) => {
                if x > 0.0 {
                    x
                } else {
                    alpha * x
                }
            }
            Activator::Sigmoid => sigmoid(x),
            Activator::TanH => x.tanh(),
        }
    }

    /// Evaluates the derivative `f'(x)` at the weighted sum `x`.
    ///
    /// The rectifiers treat `x = 0` as the inactive side: ReLU yields `0` and
    /// leaky ReLU yields `alpha` there.
    pub fn fprime(&self, x: f64) -> f64 {
        match *self {
            Activator::ReLU => {
                if x > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            Activator::LeakyReLU(alpha) => {
                if x > 0.0 {
                    1.0
                } else {
                    alpha
                }
            }
            Activator::Sigmoid => {
                let s = sigmoid(x);
                s * (1.0 - s)
            }
            Activator::TanH => {
                let t = x.tanh();
                1.0 - t * t
            }
        }
    }
}

impl Default for Activator {
    fn default() -> Self {
        Activator::Sigmoid
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Activation applied to the output layer.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputActivator {
    /// Normalises the whole output vector into a probability distribution.
    /// See [`Softmax`].
    Softmax,
    /// Applies an ordinary activator to every output neuron.
    Elementwise(Activator),
}

impl Default for OutputActivator {
    fn default() -> Self {
        OutputActivator::Softmax
    }
}

/// Softmax over one weighted-sum vector.
///
/// Unlike the [`Activator`]s this is not a scalar function: the normalising
/// sum depends on every output neuron, so a fresh `Softmax` is built from the
/// output layer's weighted sums on every forward pass. The largest weighted
/// sum is subtracted before exponentiating, which leaves the result unchanged
/// but keeps `exp` from overflowing.
///
/// [`Softmax::fprime`] is the diagonal approximation `p * (1 - p)`, not the
/// full Jacobian. Backpropagation here treats every layer's Jacobian as
/// diagonal, and the cross terms `-p_i * p_j` are dropped.
#[derive(Clone, Debug)]
pub struct Softmax {
    shift: f64,
    sum: f64,
}

impl Softmax {
    /// Prepares the normalisation for the given weighted sums.
    pub fn new<'a, I>(weighted_sums: I) -> Self
    where
        I: IntoIterator<Item = &'a f64>,
        I::IntoIter: Clone,
    {
        let sums = weighted_sums.into_iter();
        let shift = sums.clone().cloned().fold(f64::NEG_INFINITY, f64::max);
        let sum = sums.map(|&x| (x - shift).exp()).sum();
        Softmax { shift, sum }
    }

    /// `e^x / sum_j e^{z_j}` for one of the weighted sums `x`.
    pub fn f(&self, x: f64) -> f64 {
        (x - self.shift).exp() / self.sum
    }

    /// Elementwise `p * (1 - p)` approximation of the derivative.
    pub fn fprime(&self, x: f64) -> f64 {
        let p = self.f(x);
        p * (1.0 - p)
    }
}
