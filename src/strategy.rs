//! # Strategies
//!
//! $$
//! m: \mathbf{w} \mapsto \mathbb{R}
//! $$
//!
//! Objective abstraction the optimizer maximizes, plus its concrete
//! variants and the factory that selects one.

pub mod factory;
pub mod risk_adjusted;

pub use factory::create_strategy;
pub use risk_adjusted::RiskAdjustedReturn;

use crate::error::PortfolioError;
use crate::types::MetricResult;

/// Scalar objective over candidate weight vectors.
///
/// Implementations bind their return series at construction and must be
/// pure: identical weights always produce the identical value. The solver
/// relies on this for reproducible convergence.
pub trait MetricStrategy: std::fmt::Debug {
  /// Number of assets the strategy is bound to.
  fn asset_count(&self) -> usize;

  /// Objective value at `weights`.
  ///
  /// `weights` only has to be dimensionally correct; it may lie outside the
  /// feasible simplex while the solver probes. Fails with
  /// [`PortfolioError::DimensionMismatch`] on a wrong length.
  fn compute_metric(&self, weights: &[f64]) -> Result<f64, PortfolioError>;

  /// Decomposed metric at `weights`, for reporting.
  ///
  /// Fails with [`PortfolioError::UndefinedMetric`] where the risk term
  /// vanishes.
  fn evaluate(&self, weights: &[f64]) -> Result<MetricResult, PortfolioError>;
}
