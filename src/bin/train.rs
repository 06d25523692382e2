//! Trains a classifier on three clusters of 2D points and draws the learned
//! class map.
//!
//! Usage: cargo run --bin train -- --samples 300 --stop-after 5

use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::Normal;

use backprop::activator::{Activator, OutputActivator};
use backprop::config::{LearningType, TrainingConfig};
use backprop::dataset::{round_outputs, Sample, SampleSet};
use backprop::feed_forward::Network;

const CLASSES: [&str; 3] = ["A", "B", "C"];
const CENTERS: [[f64; 2]; 3] = [[0.25, 0.25], [0.75, 0.3], [0.5, 0.78]];

#[derive(Parser, Debug)]
#[command(author, version, about = "Train a three-class point classifier")]
struct Args {
    /// Training configuration (JSON); a built-in one is used otherwise
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of training points
    #[arg(short, long, default_value = "300")]
    samples: usize,

    /// Spread of each cluster
    #[arg(long, default_value = "0.1")]
    spread: f64,

    /// Seed for the points, the parameters and the shuffling
    #[arg(long)]
    seed: Option<u64>,

    /// Stop training after this many seconds
    #[arg(long)]
    stop_after: Option<f64>,

    /// Report progress every this many epochs
    #[arg(long, default_value = "100")]
    report_every: usize,

    /// Width of the class map in characters
    #[arg(long, default_value = "48")]
    width: usize,
}

fn default_config() -> TrainingConfig {
    TrainingConfig {
        layers: vec![2, 8, 3],
        activation: Activator::TanH,
        output_activation: OutputActivator::Softmax,
        learning_type: LearningType::MiniBatch,
        batch_size: 5,
        epochs: 3000,
        max_error: 0.01,
        eta: 0.1,
        seed: None,
        log_every: None,
    }
}

/// One-hot target of class `class`.
fn one_hot(class: usize) -> Vec<f64> {
    let mut targets = vec![0.0; CLASSES.len()];
    targets[class] = 1.0;
    targets
}

/// The class whose one-hot target equals the rounded outputs, if any.
fn classify(outputs: &[f64]) -> Option<usize> {
    let rounded = round_outputs(outputs);
    (0..CLASSES.len()).find(|&class| rounded == one_hot(class))
}

fn generate_points<R: Rng>(
    rng: &mut R,
    count: usize,
    spread: f64,
) -> Result<SampleSet, Box<dyn Error>> {
    if !(spread >= 0.0 && spread.is_finite()) {
        return Err(format!("spread must be a non-negative number, got {}", spread).into());
    }
    let noise = Normal::new(0.0, spread)?;
    Ok((0..count)
        .map(|i| {
            let class = i % CLASSES.len();
            let [cx, cy] = CENTERS[class];
            let point = vec![cx + rng.sample(noise), cy + rng.sample(noise)];
            Sample::new(point, one_hot(class)).with_label(CLASSES[class])
        })
        .collect())
}

fn class_map(network: &Network, width: usize) -> Result<String, backprop::Error> {
    let height = (width / 2).max(1);
    let mut map = String::with_capacity((width + 1) * height);
    for row in 0..height {
        let y = 1.0 - (row as f64 + 0.5) / height as f64;
        for col in 0..width {
            let x = (col as f64 + 0.5) / width as f64;
            let outputs = network.forward(&[x, y])?;
            map.push_str(classify(&outputs).map_or(".", |class| CLASSES[class]));
        }
        map.push('\n');
    }
    Ok(map)
}

/// Converts `--stop-after` into a duration.
fn time_limit(secs: f64) -> Result<Duration, Box<dyn Error>> {
    if !(secs >= 0.0 && secs.is_finite()) {
        let message = format!("time limit must be a non-negative number of seconds, got {}", secs);
        return Err(message.into());
    }
    Ok(Duration::from_secs_f64(secs))
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match args.config {
        Some(ref path) => TrainingConfig::from_json(&fs::read_to_string(path)?)?,
        None => default_config(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let dataset = generate_points(&mut rng, args.samples, args.spread)?;
    println!("Generated {} points in {} classes", args.samples, CLASSES.len());

    let limit = args.stop_after.map(time_limit).transpose()?;
    let mut network = config.network()?;
    let (sender, receiver) = mpsc::channel();
    let mut trainer = config
        .trainer()
        .on_progress(args.report_every, move |progress| {
            // The receiver only goes away once training is over.
            let _ = sender.send(*progress);
        });
    let stop = trainer.stop_handle();

    let worker = thread::spawn(move || {
        trainer
            .train(&mut network, &dataset)
            .map(|report| (network, dataset, report))
    });

    let mut deadline = limit.map(|after| Instant::now() + after);
    loop {
        let received = match deadline {
            Some(at) => receiver.recv_timeout(at.saturating_duration_since(Instant::now())),
            None => receiver.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };
        match received {
            Ok(progress) => println!("epoch {:>6}  error {:.6}", progress.epoch, progress.error),
            Err(RecvTimeoutError::Timeout) => {
                info!("Time limit reached, stopping the training.");
                stop.stop();
                deadline = None;
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    let (network, dataset, report) = worker.join().map_err(|_| "training thread panicked")??;

    println!();
    println!("{:?} after {} epochs", report.state, report.epochs);
    if let Some(error) = report.error {
        println!("final error {:.6}", error);
    }
    println!();
    print!("{}", class_map(&network, args.width)?);

    let evaluation = network.evaluate(&dataset)?;
    println!();
    println!(
        "{} of {} points classified correctly ({:.1}%)",
        evaluation.correct,
        evaluation.total(),
        100.0 * evaluation.accuracy()
    );
    for point in evaluation.misclassified.iter().take(5) {
        println!("  misclassified ({:.3}, {:.3})", point[0], point[1]);
    }
    Ok(())
}
