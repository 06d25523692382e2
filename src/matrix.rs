use ndarray::{Array1, Array2};
use rand::Rng;
use rand_distr::StandardNormal;

/// Standard deviation used for a transition fed by `fan_in` neurons.
///
/// This is the He scaling `sqrt(2 / fan_in)`.
pub fn init_std(fan_in: usize) -> f64 {
    (2.0 / fan_in as f64).sqrt()
}

/// A `rows x cols` matrix drawn from `N(0, std^2)`.
pub fn gaussian_matrix<R: Rng + ?Sized>(
    rng: &mut R,
    rows: usize,
    cols: usize,
    std: f64,
) -> Array2<f64> {
    Array2::from_shape_simple_fn((rows, cols), || std * rng.sample::<f64, _>(StandardNormal))
}

/// A vector of `len` values drawn from `N(0, std^2)`.
pub fn gaussian_vector<R: Rng + ?Sized>(rng: &mut R, len: usize, std: f64) -> Array1<f64> {
    Array1::from_shape_simple_fn(len, || std * rng.sample::<f64, _>(StandardNormal))
}
