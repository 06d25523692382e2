//! Training samples and the collections that hold them.

use rand::seq::SliceRandom;
use rand::Rng;

/// One labelled training example.
#[derive(Clone, Debug, PartialEq)]
pub struct Sample {
    inputs: Vec<f64>,
    targets: Vec<f64>,
    /// Optional class name, only used when reporting results.
    label: Option<String>,
}

impl Sample {
    pub fn new<I, T>(inputs: I, targets: T) -> Self
    where
        I: Into<Vec<f64>>,
        T: Into<Vec<f64>>,
    {
        Sample {
            inputs: inputs.into(),
            targets: targets.into(),
            label: None,
        }
    }

    /// Attaches a class label to the sample.
    pub fn with_label<S: Into<String>>(mut self, label: S) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn inputs(&self) -> &[f64] {
        &self.inputs
    }

    pub fn targets(&self) -> &[f64] {
        &self.targets
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl<I, T> From<(I, T)> for Sample
where
    I: Into<Vec<f64>>,
    T: Into<Vec<f64>>,
{
    fn from((inputs, targets): (I, T)) -> Self {
        Sample::new(inputs, targets)
    }
}

/// A source of training samples.
pub trait Dataset {
    /// Number of samples.
    fn count(&self) -> usize;

    /// All samples, in a fresh random order on every call.
    fn shuffled<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<&Sample>;
}

/// A dataset held in memory.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SampleSet {
    samples: Vec<Sample>,
}

impl SampleSet {
    pub fn new() -> Self {
        SampleSet::default()
    }

    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl Dataset for SampleSet {
    fn count(&self) -> usize {
        self.samples.len()
    }

    fn shuffled<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<&Sample> {
        let mut order: Vec<&Sample> = self.samples.iter().collect();
        order.shuffle(rng);
        order
    }
}

impl From<Vec<Sample>> for SampleSet {
    fn from(samples: Vec<Sample>) -> Self {
        SampleSet { samples }
    }
}

impl<S: Into<Sample>> std::iter::FromIterator<S> for SampleSet {
    fn from_iter<It: IntoIterator<Item = S>>(iter: It) -> Self {
        SampleSet {
            samples: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a SampleSet {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

/// Outcome of classifying every sample of a dataset.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Evaluation {
    /// Samples whose rounded outputs equal their targets.
    pub correct: usize,
    /// Inputs of the samples that were classified wrongly.
    pub misclassified: Vec<Vec<f64>>,
}

impl Evaluation {
    pub fn incorrect(&self) -> usize {
        self.misclassified.len()
    }

    pub fn total(&self) -> usize {
        self.correct + self.incorrect()
    }

    /// Fraction of correctly classified samples; `0` for an empty evaluation.
    pub fn accuracy(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            n => self.correct as f64 / n as f64,
        }
    }
}

/// Rounds each output to `0` or `1`, treating anything above `0.5` as `1`.
pub fn round_outputs<'a, I>(outputs: I) -> Vec<f64>
where
    I: IntoIterator<Item = &'a f64>,
{
    outputs
        .into_iter()
        .map(|&o| if o > 0.5 { 1.0 } else { 0.0 })
        .collect()
}
