//! # Types
//!
//! $$
//! \mathbf{w} \in [0,1]^n,\quad \textstyle\sum_i w_i = 1
//! $$
//!
//! Settings, strategy identifiers and result containers shared across the
//! engine.

use std::str::FromStr;

use crate::error::PortfolioError;

/// Conventional number of daily trading periods per year.
pub const PERIODS_PER_YEAR: f64 = 252.0;

/// Supported allocation objectives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrategyKind {
  /// Excess return over portfolio volatility, Sharpe style.
  RiskAdjustedReturn,
}

impl FromStr for StrategyKind {
  type Err = PortfolioError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "risk_adjusted_return" | "sharpe" | "sharpe_ratio" => Ok(Self::RiskAdjustedReturn),
      other => Err(PortfolioError::UnknownStrategyKind(other.to_string())),
    }
  }
}

/// Caller-owned inputs of one optimization request.
///
/// Invariants are the caller's responsibility: `capital` positive, at least
/// two distinct tickers, `risk_free_rate` in the same period units as the
/// return series the request is run against.
#[derive(Clone, Debug)]
pub struct PortfolioSettings {
  /// Total capital to allocate.
  pub capital: f64,
  /// Ordered asset universe; all engine vectors follow this order.
  pub tickers: Vec<String>,
  /// Baseline return subtracted in the metric numerator.
  pub risk_free_rate: f64,
  /// Objective the optimizer maximizes.
  pub strategy: StrategyKind,
}

impl PortfolioSettings {
  pub fn new(
    capital: f64,
    tickers: Vec<String>,
    risk_free_rate: f64,
    strategy: StrategyKind,
  ) -> Self {
    Self {
      capital,
      tickers,
      risk_free_rate,
      strategy,
    }
  }
}

/// Decomposed objective value at one weight vector.
#[derive(Clone, Copy, Debug, Default)]
pub struct MetricResult {
  /// Weighted mean per-period return.
  pub expected_return: f64,
  /// Per-period portfolio standard deviation.
  pub risk: f64,
  /// Objective value, e.g. the Sharpe ratio.
  pub metric_value: f64,
}

/// Output of a single optimization request.
#[derive(Clone, Debug, Default)]
pub struct Allocation {
  /// Final weights, aligned to the ticker order of the bound series.
  pub weights: Vec<f64>,
  /// Metric recomputed at the final weights.
  pub metric: MetricResult,
}

impl Allocation {
  /// Expected return scaled to `periods_per_year` periods.
  pub fn annualized_return(&self, periods_per_year: f64) -> f64 {
    self.metric.expected_return * periods_per_year
  }

  /// Volatility scaled by the square root of `periods_per_year`.
  pub fn annualized_risk(&self, periods_per_year: f64) -> f64 {
    self.metric.risk * periods_per_year.sqrt()
  }

  /// Per-ticker capital amounts for a total `capital`.
  pub fn capital_amounts(&self, capital: f64) -> Vec<f64> {
    self.weights.iter().map(|w| w * capital).collect()
  }
}
