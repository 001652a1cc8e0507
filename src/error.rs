//! # Errors
//!
//! $$
//! \text{engine} \to \text{caller}: \text{typed failures only}
//! $$
//!
//! Failure taxonomy of the allocation engine.

use thiserror::Error;

/// Typed failures surfaced by the allocation engine.
///
/// Recovery (synthetic data, default rates) belongs to the data layer that
/// feeds the engine; none of these variants is swallowed internally.
#[derive(Debug, Error)]
pub enum PortfolioError {
  /// Weight vector length does not match the bound asset universe.
  #[error("weight vector has {got} entries, expected {expected}")]
  DimensionMismatch { expected: usize, got: usize },

  /// A ticker has no usable return observations.
  #[error("insufficient return data for ticker {0}")]
  InsufficientData(String),

  /// The risk term vanished at the evaluated weights.
  #[error("metric undefined: portfolio risk is zero")]
  UndefinedMetric,

  /// The solver stopped without satisfying its convergence criterion.
  #[error("optimization did not converge: {reason}")]
  OptimizationDidNotConverge {
    reason: String,
    /// Best feasible weights seen before the solver stopped.
    best: Vec<f64>,
  },

  /// Strategy identifier is not registered with the factory.
  #[error("unknown strategy kind: {0}")]
  UnknownStrategyKind(String),
}
