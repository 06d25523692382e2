//! A [Feedforward neural network]
//! (https://en.wikipedia.org/wiki/Feedforward_neural_network).
//!
//! # Example
//!
//! Let's train a small network to compute the AND function:
//!
//! ```
//! # use backprop::feed_forward::*;
//! # use backprop::trainer::*;
//! // Examples of the AND function
//! let examples: SampleSet = vec![
//!     (vec![0.0, 0.0], vec![0.0]),
//!     (vec![0.0, 1.0], vec![0.0]),
//!     (vec![1.0, 0.0], vec![0.0]),
//!     (vec![1.0, 1.0], vec![1.0]),
//! ]
//! .into_iter()
//! .collect();
//!
//! // A single sigmoid output neuron
//! let mut network = Network::with_seed(&[2, 1], Activator::Sigmoid, 42)
//!     .unwrap()
//!     .output_activator(OutputActivator::Elementwise(Activator::Sigmoid));
//!
//! let report = Trainer::new()
//!     .learning_mode(LearningMode::Online)
//!     .learning_rate(0.5)
//!     .epochs(5000)
//!     .max_error(0.02)
//!     .logging(Logging::Silent)
//!     .seed(42)
//!     .train(&mut network, &examples)
//!     .unwrap();
//! assert_eq!(report.state, TrainingState::Converged);
//!
//! // And verify the network computes AND!
//! let classify = |out: Vec<f64>| out[0] > 0.5;
//! assert!(!classify(network.forward(&[0.0, 1.0]).unwrap()));
//! assert!(classify(network.forward(&[1.0, 1.0]).unwrap()));
//! ```

use itertools::izip;
use ndarray::{Array1, ArrayView1};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub use crate::activator::{Activator, OutputActivator, Softmax};
pub use crate::dataset::{Dataset, Evaluation, Sample, SampleSet};
use crate::dataset::round_outputs;
use crate::error::{check_len, Error, Result};
use crate::layer::Layer;
use crate::utils::{pair_mut, Back};

/// A Feedforward neural network
///
/// Owns the topology, the activation functions and the live parameters of
/// every layer transition. Parameters are drawn from `N(0, 2 / fan_in)` when
/// the network is built and again at the start of every training run.
#[derive(Clone, Debug)]
pub struct Network {
    topology: Vec<usize>,
    activator: Activator,
    output: OutputActivator,
    layers: Vec<Layer>,
    rng: StdRng,
}

impl Network {
    /// Creates a new, untrained neural network.
    ///
    /// Arguments:
    ///  * `topology` - the number of neurons in each layer, input layer
    ///                 first. Needs at least an input and an output layer,
    ///                 each with at least one neuron.
    ///  * `activator` - the activation function of the hidden layers.
    ///
    /// The output layer uses softmax unless changed with
    /// [`Network::output_activator`].
    pub fn new(topology: &[usize], activator: Activator) -> Result<Self> {
        Network::with_rng(topology, activator, StdRng::from_entropy())
    }

    /// Like [`Network::new`], but with reproducible parameter draws.
    pub fn with_seed(topology: &[usize], activator: Activator, seed: u64) -> Result<Self> {
        Network::with_rng(topology, activator, StdRng::seed_from_u64(seed))
    }

    fn with_rng(topology: &[usize], activator: Activator, mut rng: StdRng) -> Result<Self> {
        validate_topology(topology)?;
        let layers = random_layers(&mut rng, topology);
        Ok(Network {
            topology: topology.to_vec(),
            activator,
            output: OutputActivator::default(),
            layers,
            rng,
        })
    }

    /// Builds a network around hand-made parameters.
    ///
    /// Consecutive layers must agree on their widths.
    pub fn from_layers(
        layers: Vec<Layer>,
        activator: Activator,
        output: OutputActivator,
    ) -> Result<Self> {
        let first = layers.first().ok_or_else(|| Error::InvalidTopology { layers: vec![] })?;
        let mut topology = vec![first.input_len()];
        for layer in &layers {
            check_len("weights", *topology.back(), layer.input_len())?;
            topology.push(layer.output_len());
        }
        Ok(Network {
            topology,
            activator,
            output,
            layers,
            rng: StdRng::from_entropy(),
        })
    }

    /// Sets the activation of the output layer.
    pub fn output_activator(mut self, output: OutputActivator) -> Self {
        self.output = output;
        self
    }

    /// Replaces the hidden-layer activation function. Parameters are kept.
    pub fn set_activator(&mut self, activator: Activator) {
        self.activator = activator;
    }

    pub fn set_output_activator(&mut self, output: OutputActivator) {
        self.output = output;
    }

    /// Switches to a new topology, discarding all parameters in favour of
    /// freshly drawn ones.
    pub fn set_topology(&mut self, topology: &[usize]) -> Result<()> {
        validate_topology(topology)?;
        self.layers = random_layers(&mut self.rng, topology);
        self.topology = topology.to_vec();
        Ok(())
    }

    /// Redraws every weight and bias.
    pub fn randomize(&mut self) {
        for layer in &mut self.layers {
            layer.randomize(&mut self.rng);
        }
    }

    /// The number of neurons in each layer.
    pub fn topology(&self) -> &[usize] {
        &self.topology
    }

    /// Returns the size of the input layer to the network.
    pub fn input_len(&self) -> usize {
        self.topology[0]
    }

    /// Returns the size of the output layer from the network.
    pub fn output_len(&self) -> usize {
        *self.topology.back()
    }

    pub fn activator(&self) -> Activator {
        self.activator
    }

    /// The live parameters, one [`Layer`] per transition.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Replaces the live parameters with a committed batch.
    pub(crate) fn commit(&mut self, layers: Vec<Layer>) {
        debug_assert_eq!(layers.len(), self.layers.len());
        self.layers = layers;
    }

    /// Feeds the provided `inputs` through the network, returning the output
    /// layer.
    pub fn forward(&self, inputs: &[f64]) -> Result<Vec<f64>> {
        let mut trace = Trace::new(self);
        self.feed_forward(inputs, &mut trace)?;
        Ok(trace.outputs().to_vec())
    }

    /// Feeds `inputs` through the network, recording every layer's
    /// activations and activation derivatives in `trace`.
    ///
    /// `trace` must have been allocated for a network of the same topology.
    pub fn feed_forward(&self, inputs: &[f64], trace: &mut Trace) -> Result<()> {
        check_len("inputs", self.input_len(), inputs.len())?;
        trace.check_shape(&self.topology)?;
        trace.activations[0] = ArrayView1::from(inputs).to_owned();
        let last = self.layers.len() - 1;
        for (k, layer) in self.layers.iter().enumerate() {
            let (input, output) = pair_mut(&mut trace.activations, k);
            let sums = layer.weighted_sums(input.view());
            let derivatives = &mut trace.derivatives[k];
            if k == last {
                match self.output {
                    OutputActivator::Softmax => {
                        let softmax = Softmax::new(&sums);
                        activate(
                            &sums,
                            output,
                            derivatives,
                            |x| softmax.f(x),
                            |x| softmax.fprime(x),
                        );
                    }
                    OutputActivator::Elementwise(f) => {
                        activate(&sums, output, derivatives, |x| f.f(x), |x| f.fprime(x));
                    }
                }
            } else {
                let f = self.activator;
                activate(&sums, output, derivatives, |x| f.f(x), |x| f.fprime(x));
            }
        }
        Ok(())
    }

    /// Counts the samples whose outputs, rounded at `0.5`, equal their
    /// targets exactly.
    pub fn evaluate<'a, I>(&self, samples: I) -> Result<Evaluation>
    where
        I: IntoIterator<Item = &'a Sample>,
    {
        let mut trace = Trace::new(self);
        let mut evaluation = Evaluation::default();
        for sample in samples {
            self.feed_forward(sample.inputs(), &mut trace)?;
            if round_outputs(trace.outputs()) == sample.targets() {
                evaluation.correct += 1;
            } else {
                evaluation.misclassified.push(sample.inputs().to_vec());
            }
        }
        Ok(evaluation)
    }
}

/// Scratch space for one forward and backward pass.
///
/// A `Trace` holds the activations of every layer (the input layer included),
/// the activation derivatives at every non-input layer's weighted sums, and
/// the deltas computed from them. It is only meaningful for the network and
/// sample it was last filled for: run [`Network::feed_forward`] right before
/// [`Trace::compute_deltas`].
#[derive(Clone, Debug)]
pub struct Trace {
    activations: Vec<Array1<f64>>,
    derivatives: Vec<Array1<f64>>,
    deltas: Vec<Array1<f64>>,
}

impl Trace {
    /// Allocates zeroed scratch space shaped for `network`.
    pub fn new(network: &Network) -> Self {
        let topology = network.topology();
        let per_layer = |widths: &[usize]| -> Vec<Array1<f64>> {
            widths.iter().map(|&n| Array1::zeros(n)).collect()
        };
        Trace {
            activations: per_layer(topology),
            derivatives: per_layer(&topology[1..]),
            deltas: per_layer(&topology[1..]),
        }
    }

    /// Activations of the output layer from the last forward pass.
    pub fn outputs(&self) -> &Array1<f64> {
        self.activations.back()
    }

    pub fn activations(&self) -> &[Array1<f64>] {
        &self.activations
    }

    pub fn derivatives(&self) -> &[Array1<f64>] {
        &self.derivatives
    }

    pub fn deltas(&self) -> &[Array1<f64>] {
        &self.deltas
    }

    /// Computes the error signal of every non-input layer, output layer
    /// first.
    ///
    /// The output layer gets `f'(net) * (target - output)`; each hidden layer
    /// gets `f'(net) * (W^T . delta)` of the layer above it.
    pub fn compute_deltas(&mut self, network: &Network, targets: &[f64]) -> Result<()> {
        check_len("targets", network.output_len(), targets.len())?;
        self.check_shape(network.topology())?;
        let last = self.deltas.len() - 1;
        for (delta, &d, &t, &o) in izip!(
            self.deltas[last].iter_mut(),
            self.derivatives[last].iter(),
            targets,
            self.activations.back().iter()
        ) {
            *delta = d * (t - o);
        }
        for k in (0..last).rev() {
            let propagated = network.layers()[k + 1].backpropagate(&self.deltas[k + 1]);
            self.deltas[k] = propagated * &self.derivatives[k];
        }
        Ok(())
    }

    /// Adds this sample's gradient step, scaled by `eta`, to `layers`.
    ///
    /// `layers` is normally a shadow copy of the network's parameters, so the
    /// live parameters stay untouched until the batch is committed. Nothing
    /// is changed unless every layer matches the shape of this trace.
    pub fn accumulate_update(&self, layers: &mut [Layer], eta: f64) -> Result<()> {
        check_len("layers", self.deltas.len(), layers.len())?;
        for (k, layer) in layers.iter().enumerate() {
            check_len("weight columns", self.activations[k].len(), layer.input_len())?;
            check_len("weight rows", self.deltas[k].len(), layer.output_len())?;
        }
        for (k, layer) in layers.iter_mut().enumerate() {
            layer.accumulate(eta, &self.activations[k], &self.deltas[k]);
        }
        Ok(())
    }

    /// Fails unless this trace was allocated for `topology`.
    fn check_shape(&self, topology: &[usize]) -> Result<()> {
        check_len("trace layers", topology.len(), self.activations.len())?;
        for (activation, &width) in self.activations.iter().zip(topology) {
            check_len("trace", width, activation.len())?;
        }
        Ok(())
    }
}

fn activate<F, G>(
    sums: &Array1<f64>,
    output: &mut Array1<f64>,
    derivatives: &mut Array1<f64>,
    f: F,
    fprime: G,
) where
    F: Fn(f64) -> f64,
    G: Fn(f64) -> f64,
{
    for (y, d, &x) in izip!(output.iter_mut(), derivatives.iter_mut(), sums.iter()) {
        *y = f(x);
        *d = fprime(x);
    }
}

fn validate_topology(topology: &[usize]) -> Result<()> {
    if topology.len() < 2 || topology.contains(&0) {
        return Err(Error::InvalidTopology {
            layers: topology.to_vec(),
        });
    }
    Ok(())
}

fn random_layers(rng: &mut StdRng, topology: &[usize]) -> Vec<Layer> {
    topology
        .windows(2)
        .map(|pair| Layer::random(rng, pair[0], pair[1]))
        .collect()
}
