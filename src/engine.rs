//! # Engine
//!
//! $$
//! (\text{settings}, \text{series}) \to \mathbf{w}^\*, \ \text{metric}
//! $$
//!
//! One-call orchestration: strategy construction, optimization, reporting.

use crate::error::PortfolioError;
use crate::optimizer::AllocationOptimizer;
use crate::optimizer::OptimizerConfig;
use crate::series::ReturnSeries;
use crate::strategy::create_strategy;
use crate::types::Allocation;
use crate::types::PortfolioSettings;

/// Single entry point of the allocation engine.
///
/// Holds only solver caps. Every [`PortfolioEngine::optimize`] call builds
/// its own strategy bound to the supplied series and runs to completion, so
/// concurrent requests are independent engine invocations with nothing
/// shared.
#[derive(Clone, Copy, Debug, Default)]
pub struct PortfolioEngine {
  config: OptimizerConfig,
}

impl PortfolioEngine {
  /// Construct an engine with explicit solver caps.
  pub fn new(config: OptimizerConfig) -> Self {
    Self { config }
  }

  /// Borrow the solver configuration.
  pub fn config(&self) -> &OptimizerConfig {
    &self.config
  }

  /// Optimize the allocation for `settings` over `series`.
  ///
  /// The series columns must line up with `settings.tickers`.
  pub fn optimize(
    &self,
    settings: &PortfolioSettings,
    series: &ReturnSeries,
  ) -> Result<Allocation, PortfolioError> {
    if settings.tickers.len() != series.asset_count() {
      return Err(PortfolioError::DimensionMismatch {
        expected: settings.tickers.len(),
        got: series.asset_count(),
      });
    }

    tracing::info!(
      assets = settings.tickers.len(),
      periods = series.period_count(),
      "optimizing portfolio"
    );

    let strategy = create_strategy(settings.strategy, settings, series)?;
    AllocationOptimizer::new(strategy.as_ref(), self.config).optimize()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::sim::synthetic_returns_seeded;
  use crate::sim::SyntheticConfig;
  use crate::types::StrategyKind;

  #[test]
  fn engine_runs_end_to_end_on_synthetic_data() {
    let tickers: Vec<String> = ["AAA", "BBB", "CCC"].iter().map(|t| t.to_string()).collect();
    let settings = PortfolioSettings::new(
      10_000.0,
      tickers.clone(),
      0.0001,
      StrategyKind::RiskAdjustedReturn,
    );
    let series = synthetic_returns_seeded(&tickers, &SyntheticConfig::default(), 42);

    let allocation = PortfolioEngine::default()
      .optimize(&settings, &series)
      .unwrap();

    let total: f64 = allocation.weights.iter().sum();
    assert!((total - 1.0).abs() < 1e-6);
    for &w in &allocation.weights {
      assert!((0.0..=1.0).contains(&w));
    }
    assert!(allocation.metric.risk > 0.0);
    assert!(allocation.metric.metric_value.is_finite());

    let amounts = allocation.capital_amounts(settings.capital);
    let spent: f64 = amounts.iter().sum();
    assert!((spent - settings.capital).abs() < 1e-3);
  }

  #[test]
  fn misaligned_universe_is_rejected() {
    let tickers: Vec<String> = ["AAA", "BBB", "CCC"].iter().map(|t| t.to_string()).collect();
    let settings = PortfolioSettings::new(
      10_000.0,
      tickers.clone(),
      0.0,
      StrategyKind::RiskAdjustedReturn,
    );
    let series = synthetic_returns_seeded(&tickers[..2], &SyntheticConfig::default(), 1);

    let err = PortfolioEngine::default()
      .optimize(&settings, &series)
      .unwrap_err();
    assert!(matches!(
      err,
      PortfolioError::DimensionMismatch { expected: 3, got: 2 }
    ));
  }
}
