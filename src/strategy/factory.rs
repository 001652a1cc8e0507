//! # Strategy Factory
//!
//! $$
//! \text{kind} \mapsto \text{constructor}
//! $$
//!
//! Maps a configured strategy kind onto a concrete metric implementation.

use crate::error::PortfolioError;
use crate::series::ReturnSeries;
use crate::strategy::risk_adjusted::RiskAdjustedReturn;
use crate::strategy::MetricStrategy;
use crate::types::PortfolioSettings;
use crate::types::StrategyKind;

/// Construct the strategy selected by `kind`, bound to `settings` and
/// `series`.
///
/// The match is exhaustive so a new [`StrategyKind`] variant fails to
/// compile until it gets a constructor arm here; the optimizer never
/// changes. Unregistered textual identifiers are rejected earlier, when
/// parsing [`StrategyKind`].
pub fn create_strategy(
  kind: StrategyKind,
  settings: &PortfolioSettings,
  series: &ReturnSeries,
) -> Result<Box<dyn MetricStrategy>, PortfolioError> {
  match kind {
    StrategyKind::RiskAdjustedReturn => Ok(Box::new(RiskAdjustedReturn::new(settings, series)?)),
  }
}

#[cfg(test)]
mod tests {
  use ndarray::array;

  use super::*;

  #[test]
  fn creates_the_risk_adjusted_strategy() {
    let settings = PortfolioSettings::new(
      1_000.0,
      vec!["A".to_string(), "B".to_string()],
      0.0,
      StrategyKind::RiskAdjustedReturn,
    );
    let series = ReturnSeries::new(
      settings.tickers.clone(),
      array![[0.01, 0.00], [0.02, 0.01], [-0.01, 0.01]],
    );

    let strategy = create_strategy(settings.strategy, &settings, &series).unwrap();
    assert_eq!(strategy.asset_count(), 2);
  }

  #[test]
  fn construction_surfaces_data_errors() {
    let settings = PortfolioSettings::new(
      1_000.0,
      vec!["A".to_string(), "B".to_string()],
      0.0,
      StrategyKind::RiskAdjustedReturn,
    );
    let series = ReturnSeries::new(
      settings.tickers.clone(),
      array![[f64::NAN, 0.01], [f64::NAN, 0.02]],
    );

    let err = create_strategy(settings.strategy, &settings, &series).unwrap_err();
    assert!(matches!(err, PortfolioError::InsufficientData(_)));
  }
}
