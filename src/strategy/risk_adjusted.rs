//! # Risk-Adjusted Return
//!
//! $$
//! S(\mathbf{w}) = \frac{\mathbf{w}^\top \mu - r_f}{\sqrt{\mathbf{w}^\top \Sigma \mathbf{w}}}
//! $$
//!
//! Sharpe-style objective over a bound return series.

use ndarray::aview1;
use ndarray::Array1;
use ndarray::Array2;

use crate::error::PortfolioError;
use crate::series::ReturnSeries;
use crate::strategy::MetricStrategy;
use crate::types::MetricResult;
use crate::types::PortfolioSettings;

/// Value returned from [`MetricStrategy::compute_metric`] when the risk
/// term vanishes, so a maximizing solver steers away from zero-variance
/// corners instead of dividing by zero.
pub const DEGENERATE_RISK_SENTINEL: f64 = -1e9;

const RISK_EPS: f64 = 1e-15;

/// Excess return over volatility, computed from sample moments cached at
/// construction.
///
/// The quadratic risk term uses the covariance matrix, not the correlation
/// matrix: correlation would leave the denominator dimensionless while the
/// numerator is a return, so the ratio would neither annualize nor compare
/// across universes.
#[derive(Clone, Debug)]
pub struct RiskAdjustedReturn {
  risk_free_rate: f64,
  mean_returns: Array1<f64>,
  covariance: Array2<f64>,
}

impl RiskAdjustedReturn {
  /// Bind `settings` and `series`, caching the mean vector and covariance
  /// matrix.
  pub fn new(settings: &PortfolioSettings, series: &ReturnSeries) -> Result<Self, PortfolioError> {
    Ok(Self {
      risk_free_rate: settings.risk_free_rate,
      mean_returns: series.mean_returns()?,
      covariance: series.covariance()?,
    })
  }

  fn check_len(&self, weights: &[f64]) -> Result<(), PortfolioError> {
    if weights.len() != self.mean_returns.len() {
      return Err(PortfolioError::DimensionMismatch {
        expected: self.mean_returns.len(),
        got: weights.len(),
      });
    }
    Ok(())
  }

  /// Portfolio expected return and variance at `weights`.
  fn moments(&self, weights: &[f64]) -> (f64, f64) {
    let w = aview1(weights);
    let expected = w.dot(&self.mean_returns);
    let sigma_w = self.covariance.dot(&w);
    let variance = w.dot(&sigma_w);
    (expected, variance)
  }
}

impl MetricStrategy for RiskAdjustedReturn {
  fn asset_count(&self) -> usize {
    self.mean_returns.len()
  }

  fn compute_metric(&self, weights: &[f64]) -> Result<f64, PortfolioError> {
    self.check_len(weights)?;

    let (expected, variance) = self.moments(weights);
    if variance <= RISK_EPS {
      return Ok(DEGENERATE_RISK_SENTINEL);
    }

    Ok((expected - self.risk_free_rate) / variance.sqrt())
  }

  fn evaluate(&self, weights: &[f64]) -> Result<MetricResult, PortfolioError> {
    self.check_len(weights)?;

    let (expected, variance) = self.moments(weights);
    if variance <= RISK_EPS {
      return Err(PortfolioError::UndefinedMetric);
    }

    let risk = variance.sqrt();
    Ok(MetricResult {
      expected_return: expected,
      risk,
      metric_value: (expected - self.risk_free_rate) / risk,
    })
  }
}
