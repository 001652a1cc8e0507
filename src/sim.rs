//! # Synthetic Series
//!
//! $$
//! R_{t,i} \sim \mathcal{N}(\mu_\Delta, \sigma_\Delta^2)\ \text{i.i.d.}
//! $$
//!
//! Gaussian return-series generation for offline runs and tests. The
//! engine never falls back to synthetic data on its own; callers invoke
//! this explicitly when no market data is available.

use ndarray::Array2;
use ndarray_rand::RandomExt;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::Normal;

use crate::series::ReturnSeries;

/// Parameters of the synthetic return generator.
#[derive(Clone, Copy, Debug)]
pub struct SyntheticConfig {
  /// Mean per-period return.
  pub drift: f64,
  /// Per-period return volatility.
  pub volatility: f64,
  /// Number of generated periods.
  pub periods: usize,
}

impl Default for SyntheticConfig {
  /// One year of daily periods with 1% daily volatility.
  fn default() -> Self {
    Self {
      drift: 0.0005,
      volatility: 0.01,
      periods: 252,
    }
  }
}

/// Generate an i.i.d. Gaussian return series for `tickers`.
pub fn synthetic_returns(tickers: &[String], config: &SyntheticConfig) -> ReturnSeries {
  let returns = Array2::random(
    (config.periods, tickers.len()),
    Normal::new(config.drift, config.volatility).unwrap(),
  );
  ReturnSeries::new(tickers.to_vec(), returns)
}

/// Seeded variant of [`synthetic_returns`] for reproducible runs.
pub fn synthetic_returns_seeded(
  tickers: &[String],
  config: &SyntheticConfig,
  seed: u64,
) -> ReturnSeries {
  let mut rng = StdRng::seed_from_u64(seed);
  let returns = Array2::random_using(
    (config.periods, tickers.len()),
    Normal::new(config.drift, config.volatility).unwrap(),
    &mut rng,
  );
  ReturnSeries::new(tickers.to_vec(), returns)
}
