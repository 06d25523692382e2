//! Utilities for training neural networks.
//!
//! A [`Trainer`] runs backpropagation over a [`Dataset`] in epochs. Each
//! epoch shuffles the samples, splits them into batches according to the
//! [`LearningMode`] and, for every batch, accumulates the gradient steps of
//! its samples into a shadow copy of the parameters before committing it.
//! Every sample in a batch therefore sees the parameters from the start of
//! the batch.
//!
//! Training always starts from freshly drawn parameters: calling
//! [`Trainer::train`] twice on the same network does not continue the first
//! run.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_derive::{Deserialize, Serialize};

pub use crate::dataset::{Dataset, Sample};
use crate::error::{Error, Result};
use crate::feed_forward::{Network, Trace};
use crate::utils::squared_error;

/// Batch size used by [`LearningMode::MiniBatch`] when none is given.
pub const DEFAULT_BATCH_SIZE: usize = 5;

/// The learning mode to use for training
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearningMode {
    /// Apply weight updates after every training example
    Online,
    /// Apply weight updates once per pass over the whole dataset
    Batch,
    /// Apply weight updates after every chunk of the provided size
    ///
    /// The last chunk of an epoch may be shorter. A size of zero falls back
    /// to [`DEFAULT_BATCH_SIZE`].
    MiniBatch(usize),
}

impl LearningMode {
    /// The number of samples per batch for a dataset of `samples` samples.
    pub fn batch_len(&self, samples: usize) -> usize {
        match *self {
            LearningMode::Online => 1,
            LearningMode::Batch => samples.max(1),
            LearningMode::MiniBatch(0) => DEFAULT_BATCH_SIZE,
            LearningMode::MiniBatch(size) => size,
        }
    }

    /// Splits `samples` into consecutive batches.
    pub fn batches<'s, T>(&self, samples: &'s [T]) -> std::slice::Chunks<'s, T> {
        samples.chunks(self.batch_len(samples.len()))
    }
}

impl Default for LearningMode {
    fn default() -> Self {
        LearningMode::Online
    }
}

impl fmt::Display for LearningMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            LearningMode::Online => write!(f, "stochastic"),
            LearningMode::Batch => write!(f, "batch"),
            LearningMode::MiniBatch(_) => write!(f, "mini-batch (size {})", self.batch_len(0)),
        }
    }
}

/// Logging frequency to use during training
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Logging {
    /// Nothing is logged at `info` level
    Silent,
    /// A summary is logged at completion
    Completion,
    /// A summary is logged at completion and after every `n` epochs
    Epochs(usize),
}

impl Logging {
    /// Performs logging at the end of `epoch`.
    fn epoch(&self, epoch: usize, training_error: f64) {
        debug!("epoch {}: error={}", epoch, training_error);
        if let Logging::Epochs(freq) = *self {
            if freq > 0 && epoch % freq == 0 {
                info!("Epoch {}:\terror={}", epoch, training_error);
            }
        }
    }

    /// Performs logging at the end of training.
    fn completion(&self, report: &Report, start_time: Instant) {
        if let Logging::Silent = *self {
            return;
        }
        let error = report.error.unwrap_or(f64::NAN);
        match report.state {
            TrainingState::Converged => {
                info!("Converged after {} epochs, error={}", report.epochs, error)
            }
            TrainingState::StoppedByRequest => {
                info!("Stopped after {} epochs, error={}", report.epochs, error)
            }
            _ => info!("Ran {} epochs without converging, error={}", report.epochs, error),
        }
        info!("Training took {:.3} seconds.", start_time.elapsed().as_secs_f64());
    }
}

impl Default for Logging {
    fn default() -> Self {
        Logging::Completion
    }
}

/// Where a [`Trainer`] is in its lifecycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TrainingState {
    /// No training has run yet.
    Idle,
    /// Epochs are being processed.
    Running,
    /// An epoch ended with its error below the threshold.
    Converged,
    /// The stop signal was raised.
    StoppedByRequest,
    /// The epoch limit was reached first.
    ExhaustedEpochs,
}

/// A cloneable stop signal for a running training.
///
/// This is the only piece of a training run that may be touched from another
/// thread. The trainer polls it before every epoch and every sample.
#[derive(Clone, Debug, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    /// Asks the training to stop as soon as possible.
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Training progress after a completed epoch.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Progress {
    /// One-based number of the completed epoch.
    pub epoch: usize,
    /// Mean error of that epoch.
    pub error: f64,
}

/// Summary of a finished training run.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Report {
    /// The terminal state.
    pub state: TrainingState,
    /// Number of fully completed epochs.
    pub epochs: usize,
    /// Error of the last completed epoch, `None` if none completed.
    ///
    /// This is `sum of (target - output)^2 / (2 * samples)` and is not
    /// guarded against NaN or infinity.
    pub error: Option<f64>,
}

type ProgressFn<'a> = Box<dyn FnMut(&Progress) + Send + 'a>;

/// Trains a `Network` with backpropagation.
pub struct Trainer<'a> {
    learning_mode: LearningMode,
    learning_rate: f64,
    epochs: usize,
    max_error: f64,
    logging: Logging,
    progress: Option<(usize, ProgressFn<'a>)>,
    stop: StopHandle,
    rng: StdRng,
    state: TrainingState,
}

impl<'a> Trainer<'a> {
    /// Creates a new Trainer instance.
    ///
    /// The trainer is initialized with some default values. These defaults are:
    ///
    /// * An online (stochastic) learning mode.
    /// * A learning rate of 0.1.
    /// * Stops after 1000 epochs.
    /// * An error threshold of 0, so it never converges early.
    /// * Logs on training completion.
    pub fn new() -> Self {
        Trainer {
            learning_mode: LearningMode::Online,
            learning_rate: 0.1,
            epochs: 1000,
            max_error: 0.0,
            logging: Logging::Completion,
            progress: None,
            stop: StopHandle::default(),
            rng: StdRng::from_entropy(),
            state: TrainingState::Idle,
        }
    }

    /// Sets the `LearningMode` to use for training.
    pub fn learning_mode(mut self, mode: LearningMode) -> Self {
        self.learning_mode = mode;
        self
    }

    /// Sets the learning rate `eta` to use during gradient descent.
    pub fn learning_rate(mut self, rate: f64) -> Self {
        self.learning_rate = rate;
        self
    }

    /// Sets the maximum number of epochs.
    pub fn epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    /// Training converges once an epoch's error drops below `max_error`.
    pub fn max_error(mut self, max_error: f64) -> Self {
        self.max_error = max_error;
        self
    }

    /// Sets the type of logging to be emitted during training.
    pub fn logging(mut self, logging: Logging) -> Self {
        self.logging = logging;
        self
    }

    /// Calls `callback` after every `every` completed epochs.
    pub fn on_progress<F>(mut self, every: usize, callback: F) -> Self
    where
        F: FnMut(&Progress) + Send + 'a,
    {
        self.progress = Some((every, Box::new(callback)));
        self
    }

    /// Seeds the generator used to shuffle samples.
    pub fn seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// A handle that stops the training, usable from any thread.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Requests a stop; same as [`StopHandle::stop`].
    pub fn stop(&self) {
        self.stop.stop();
    }

    pub fn state(&self) -> TrainingState {
        self.state
    }

    /// Trains `network` on `dataset`.
    ///
    /// The network's parameters are redrawn first, and a stop requested
    /// before this call is forgotten. Returns once the error threshold is
    /// met, the epoch limit is reached or a stop is requested; a stop never
    /// leaves a partially accumulated batch in the network.
    pub fn train<D: Dataset>(&mut self, network: &mut Network, dataset: &D) -> Result<Report> {
        let count = dataset.count();
        if count == 0 {
            return Err(Error::EmptyDataset);
        }
        self.stop.reset();
        self.state = TrainingState::Running;
        let start_time = Instant::now();
        if self.logging != Logging::Silent {
            info!("Starting {} backpropagation on {} samples.", self.learning_mode, count);
        }

        let report = match self.run(network, dataset, count) {
            Ok(report) => report,
            Err(err) => {
                self.state = TrainingState::Idle;
                return Err(err);
            }
        };
        self.state = report.state;
        self.logging.completion(&report, start_time);
        Ok(report)
    }

    fn run<D: Dataset>(
        &mut self,
        network: &mut Network,
        dataset: &D,
        count: usize,
    ) -> Result<Report> {
        network.randomize();
        let mut trace = Trace::new(network);
        let mut epochs = 0;
        let mut error = None;
        let state = loop {
            if epochs >= self.epochs {
                break TrainingState::ExhaustedEpochs;
            }
            if self.stop.is_stopped() {
                break TrainingState::StoppedByRequest;
            }
            let samples = dataset.shuffled(&mut self.rng);
            let squared = match self.run_epoch(network, &samples, &mut trace)? {
                Some(squared) => squared,
                None => break TrainingState::StoppedByRequest,
            };
            epochs += 1;
            let epoch_error = squared / (2.0 * count as f64);
            error = Some(epoch_error);
            self.logging.epoch(epochs, epoch_error);
            if let Some((every, callback)) = self.progress.as_mut() {
                if *every > 0 && epochs % *every == 0 {
                    (*callback)(&Progress {
                        epoch: epochs,
                        error: epoch_error,
                    });
                }
            }
            if epoch_error < self.max_error {
                break TrainingState::Converged;
            }
        };
        Ok(Report { state, epochs, error })
    }

    /// Runs one pass over `samples`, returning the summed squared error, or
    /// `None` if a stop was requested part-way.
    fn run_epoch(
        &self,
        network: &mut Network,
        samples: &[&Sample],
        trace: &mut Trace,
    ) -> Result<Option<f64>> {
        let mut squared = 0.0;
        for batch in self.learning_mode.batches(samples) {
            let mut shadow = network.layers().to_vec();
            for sample in batch {
                if self.stop.is_stopped() {
                    return Ok(None);
                }
                network.feed_forward(sample.inputs(), trace)?;
                trace.compute_deltas(network, sample.targets())?;
                squared += squared_error(sample.targets(), trace.outputs());
                trace.accumulate_update(&mut shadow, self.learning_rate)?;
            }
            network.commit(shadow);
        }
        Ok(Some(squared))
    }
}

impl<'a> Default for Trainer<'a> {
    fn default() -> Self {
        Trainer::new()
    }
}

impl<'a> fmt::Debug for Trainer<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Trainer")
            .field("learning_mode", &self.learning_mode)
            .field("learning_rate", &self.learning_rate)
            .field("epochs", &self.epochs)
            .field("max_error", &self.max_error)
            .field("logging", &self.logging)
            .field("state", &self.state)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activator::{Activator, OutputActivator};
    use crate::dataset::SampleSet;
    use crate::layer::Layer;
    use approx::assert_relative_eq;
    use std::sync::Mutex;

    fn and_gate() -> SampleSet {
        vec![
            (vec![0.0, 0.0], vec![0.0]),
            (vec![0.0, 1.0], vec![0.0]),
            (vec![1.0, 0.0], vec![0.0]),
            (vec![1.0, 1.0], vec![1.0]),
        ]
        .into_iter()
        .collect()
    }

    fn sigmoid_net(topology: &[usize], seed: u64) -> Network {
        Network::with_seed(topology, Activator::Sigmoid, seed)
            .unwrap()
            .output_activator(OutputActivator::Elementwise(Activator::Sigmoid))
    }

    fn three_classes() -> SampleSet {
        vec![
            (vec![-0.8, -0.6], vec![1.0, 0.0, 0.0]),
            (vec![-0.5, -0.9], vec![1.0, 0.0, 0.0]),
            (vec![0.7, 0.1], vec![0.0, 1.0, 0.0]),
            (vec![0.9, -0.2], vec![0.0, 1.0, 0.0]),
            (vec![-0.1, 0.8], vec![0.0, 0.0, 1.0]),
            (vec![0.2, 0.9], vec![0.0, 0.0, 1.0]),
            (vec![0.0, 0.7], vec![0.0, 0.0, 1.0]),
        ]
        .into_iter()
        .collect()
    }

    fn one_hot(class: usize) -> Vec<f64> {
        let mut targets = vec![0.0; 3];
        targets[class] = 1.0;
        targets
    }

    fn quiet<'a>() -> Trainer<'a> {
        Trainer::new().logging(Logging::Silent).seed(17)
    }

    #[test]
    fn empty_dataset() {
        let mut network = sigmoid_net(&[2, 1], 0);
        let err = quiet().train(&mut network, &SampleSet::new()).unwrap_err();
        assert!(matches!(err, Error::EmptyDataset));
    }

    #[test]
    fn wrong_sample_sizes() {
        let mut network = sigmoid_net(&[2, 1], 0);
        let bad_inputs: SampleSet = vec![(vec![0.0], vec![0.0])].into_iter().collect();
        assert!(matches!(
            quiet().train(&mut network, &bad_inputs),
            Err(Error::DimensionMismatch { what: "inputs", .. })
        ));
        let bad_targets: SampleSet = vec![(vec![0.0, 1.0], vec![0.0, 1.0])].into_iter().collect();
        let mut trainer = quiet();
        assert!(matches!(
            trainer.train(&mut network, &bad_targets),
            Err(Error::DimensionMismatch { what: "targets", .. })
        ));
        assert_eq!(trainer.state(), TrainingState::Idle);
    }

    #[test]
    fn mini_batch_partition() {
        let samples: Vec<usize> = (0..7).collect();
        let sizes = |mode: LearningMode| {
            mode.batches(&samples).map(<[usize]>::len).collect::<Vec<_>>()
        };
        assert_eq!(sizes(LearningMode::MiniBatch(3)), vec![3, 3, 1]);
        assert_eq!(sizes(LearningMode::Online), vec![1; 7]);
        assert_eq!(sizes(LearningMode::Batch), vec![7]);
        assert_eq!(sizes(LearningMode::MiniBatch(0)), vec![5, 2]);
        assert_eq!(sizes(LearningMode::MiniBatch(10)), vec![7]);
    }

    #[test]
    fn shuffled_batches_keep_cardinality() {
        let set = three_classes();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..5 {
            let shuffled = set.shuffled(&mut rng);
            let sizes: Vec<usize> =
                LearningMode::MiniBatch(3).batches(&shuffled).map(|b| b.len()).collect();
            assert_eq!(sizes, vec![3, 3, 1]);
        }
    }

    #[test]
    fn single_sample_modes_agree() {
        let dataset: SampleSet = vec![(vec![0.3, -0.7], vec![0.0, 1.0, 0.0])].into_iter().collect();
        let modes = [LearningMode::Online, LearningMode::Batch, LearningMode::MiniBatch(1)];
        let trained: Vec<Vec<Layer>> = modes
            .iter()
            .map(|&mode| {
                let mut network = Network::with_seed(&[2, 4, 3], Activator::TanH, 21).unwrap();
                let report = quiet()
                    .learning_mode(mode)
                    .learning_rate(0.3)
                    .epochs(25)
                    .train(&mut network, &dataset)
                    .unwrap();
                assert_eq!(report.state, TrainingState::ExhaustedEpochs);
                assert_eq!(report.epochs, 25);
                network.layers().to_vec()
            })
            .collect();
        assert_eq!(trained[0], trained[1]);
        assert_eq!(trained[0], trained[2]);
    }

    #[test]
    fn batch_uses_start_of_batch_parameters() {
        let dataset: SampleSet = vec![
            (vec![1.0, 0.0], vec![1.0]),
            (vec![0.0, 1.0], vec![0.0]),
        ]
        .into_iter()
        .collect();
        let mut network = sigmoid_net(&[2, 3, 1], 4);
        // Cloning keeps the generator state, so this draws the same
        // parameters as the re-randomization inside `train`.
        let mut expected = network.clone();
        expected.randomize();

        quiet()
            .learning_mode(LearningMode::Batch)
            .learning_rate(0.5)
            .epochs(1)
            .train(&mut network, &dataset)
            .unwrap();

        let mut trace = Trace::new(&expected);
        let mut shadow = expected.layers().to_vec();
        for sample in &dataset {
            expected.feed_forward(sample.inputs(), &mut trace).unwrap();
            trace.compute_deltas(&expected, sample.targets()).unwrap();
            trace.accumulate_update(&mut shadow, 0.5).unwrap();
        }
        for (got, want) in network.layers().iter().zip(&shadow) {
            for (g, w) in got.weights().iter().zip(want.weights().iter()) {
                assert_relative_eq!(*g, *w, epsilon = 1e-12);
            }
            for (g, w) in got.biases().iter().zip(want.biases().iter()) {
                assert_relative_eq!(*g, *w, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn learns_and_gate() {
        let mut network = sigmoid_net(&[2, 1], 42);
        let mut trainer = quiet()
            .learning_mode(LearningMode::Online)
            .learning_rate(0.5)
            .epochs(5000)
            .max_error(0.02);
        assert_eq!(trainer.state(), TrainingState::Idle);
        let report = trainer.train(&mut network, &and_gate()).unwrap();
        assert_eq!(report.state, TrainingState::Converged);
        assert_eq!(trainer.state(), TrainingState::Converged);
        assert!(report.epochs <= 5000);
        assert!(report.error.unwrap() < 0.02);
        let evaluation = network.evaluate(&and_gate()).unwrap();
        assert_eq!(evaluation.correct, 4);
    }

    #[test]
    fn trivial_threshold_converges_after_one_epoch() {
        let mut network = sigmoid_net(&[2, 3, 1], 5);
        let report = quiet()
            .epochs(100)
            .max_error(1.0)
            .train(&mut network, &and_gate())
            .unwrap();
        assert_eq!(report.state, TrainingState::Converged);
        assert_eq!(report.epochs, 1);
    }

    #[test]
    fn exhausts_epochs() {
        let mut network = Network::with_seed(&[2, 5, 3], Activator::ReLU, 6).unwrap();
        let report = quiet()
            .learning_mode(LearningMode::MiniBatch(3))
            .epochs(7)
            .train(&mut network, &three_classes())
            .unwrap();
        assert_eq!(report.state, TrainingState::ExhaustedEpochs);
        assert_eq!(report.epochs, 7);
        assert!(report.error.unwrap().is_finite());
    }

    #[test]
    fn stop_during_second_epoch_keeps_committed_parameters() {
        let run = |epochs: usize, stop_at: Option<usize>| {
            let mut network = Network::with_seed(&[2, 4, 3], Activator::Sigmoid, 9).unwrap();
            let mut trainer = quiet()
                .learning_mode(LearningMode::MiniBatch(3))
                .learning_rate(0.2)
                .epochs(epochs);
            let handle = trainer.stop_handle();
            if let Some(stop_at) = stop_at {
                trainer = trainer.on_progress(1, move |progress| {
                    if progress.epoch == stop_at {
                        handle.stop();
                    }
                });
            }
            let report = trainer.train(&mut network, &three_classes()).unwrap();
            (report, network.layers().to_vec())
        };

        let (stopped, stopped_layers) = run(100, Some(2));
        assert_eq!(stopped.state, TrainingState::StoppedByRequest);
        assert_eq!(stopped.epochs, 2);

        let (reference, reference_layers) = run(2, None);
        assert_eq!(reference.state, TrainingState::ExhaustedEpochs);
        assert_eq!(stopped_layers, reference_layers);
        assert_eq!(stopped.error, reference.error);
    }

    #[test]
    fn stop_inside_a_batch_discards_it() {
        let dataset: SampleSet = (0..3000)
            .map(|i| {
                let x = i as f64;
                (vec![(0.37 * x).sin(), (0.71 * x).cos()], one_hot(i % 3))
            })
            .collect();
        let fresh = || Network::with_seed(&[2, 8, 3], Activator::TanH, 22).unwrap();
        let batch = || quiet().learning_mode(LearningMode::Batch).learning_rate(0.05);

        let (first_tx, first_rx) = std::sync::mpsc::channel();
        let mut trainer = batch()
            .epochs(usize::max_value())
            .on_progress(1, move |progress| {
                if progress.epoch == 1 {
                    let _ = first_tx.send(());
                }
            });
        let handle = trainer.stop_handle();
        let mut network = fresh();
        let worker = std::thread::spawn(move || {
            let report = trainer.train(&mut network, &dataset).unwrap();
            (report, network, dataset)
        });
        // The second epoch is one long batch, so the stop lands while its
        // updates are still in the shadow copy.
        first_rx.recv().unwrap();
        handle.stop();
        let (stopped, network, dataset) = worker.join().unwrap();
        assert_eq!(stopped.state, TrainingState::StoppedByRequest);
        assert!(stopped.epochs >= 1);

        let mut reference = fresh();
        let report = batch()
            .epochs(stopped.epochs)
            .train(&mut reference, &dataset)
            .unwrap();
        assert_eq!(report.state, TrainingState::ExhaustedEpochs);
        assert_eq!(network.layers(), reference.layers());
        assert_eq!(stopped.error, report.error);
    }

    #[test]
    fn stale_stop_request_is_cleared() {
        let mut network = sigmoid_net(&[2, 1], 10);
        let mut trainer = quiet().epochs(3);
        trainer.stop();
        let report = trainer.train(&mut network, &and_gate()).unwrap();
        assert_eq!(report.state, TrainingState::ExhaustedEpochs);
        assert_eq!(report.epochs, 3);
    }

    #[test]
    fn stop_from_another_thread() {
        let mut network = Network::with_seed(&[2, 8, 3], Activator::TanH, 12).unwrap();
        let (started_tx, started_rx) = std::sync::mpsc::channel();
        let mut trainer = quiet()
            .epochs(usize::max_value())
            .on_progress(1, move |progress| {
                if progress.epoch == 1 {
                    let _ = started_tx.send(());
                }
            });
        let handle = trainer.stop_handle();
        let dataset = three_classes();
        let worker = std::thread::spawn(move || {
            let report = trainer.train(&mut network, &dataset).unwrap();
            (report, trainer.state())
        });
        started_rx.recv().unwrap();
        handle.stop();
        let (report, state) = worker.join().unwrap();
        assert_eq!(report.state, TrainingState::StoppedByRequest);
        assert_eq!(state, TrainingState::StoppedByRequest);
        assert!(report.epochs >= 1);
    }

    #[test]
    fn progress_interval() {
        let seen = Mutex::new(Vec::new());
        let mut network = sigmoid_net(&[2, 1], 13);
        quiet()
            .epochs(10)
            .on_progress(3, |progress| seen.lock().unwrap().push(progress.epoch))
            .train(&mut network, &and_gate())
            .unwrap();
        assert_eq!(seen.into_inner().unwrap(), vec![3, 6, 9]);
    }

    #[test]
    fn retraining_starts_from_fresh_parameters() {
        let mut network = sigmoid_net(&[2, 2, 1], 14);
        let mut trainer = quiet().epochs(20);
        trainer.train(&mut network, &and_gate()).unwrap();
        let trained = network.layers().to_vec();
        let report = quiet().epochs(0).train(&mut network, &and_gate()).unwrap();
        assert_eq!(report.state, TrainingState::ExhaustedEpochs);
        assert_eq!(report.error, None);
        assert_ne!(network.layers(), &trained[..]);
    }

    #[test]
    fn large_learning_rate_diverges_visibly() {
        // A single linear neuron: gradient descent on least squares.
        let identity = Activator::LeakyReLU(1.0);
        let mut network = Network::with_seed(&[1, 1], identity, 15)
            .unwrap()
            .output_activator(OutputActivator::Elementwise(identity));
        let dataset: SampleSet = (1..4).map(|x| (vec![x as f64], vec![2.0 * x as f64])).collect();
        let report = quiet()
            .learning_rate(10.0)
            .epochs(400)
            .max_error(1e-3)
            .train(&mut network, &dataset)
            .unwrap();
        assert_eq!(report.state, TrainingState::ExhaustedEpochs);
        let error = report.error.unwrap();
        assert!(!error.is_finite() || error > 1e6, "error {}", error);
    }

    #[test]
    fn learning_mode_config_names() {
        let modes: Vec<LearningMode> =
            serde_json::from_str(r#"["online", "batch", {"mini_batch": 4}]"#).unwrap();
        assert_eq!(
            modes,
            vec![LearningMode::Online, LearningMode::Batch, LearningMode::MiniBatch(4)]
        );
        assert_eq!(LearningMode::MiniBatch(0).to_string(), "mini-batch (size 5)");
    }
}
