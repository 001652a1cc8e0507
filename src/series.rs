//! # Return Series
//!
//! $$
//! R_{t,i} = \frac{P_{t,i}}{P_{t-1,i}} - 1
//! $$
//!
//! Time-indexed per-asset return table and its sample moment estimators.

use ndarray::Array1;
use ndarray::Array2;

use crate::error::PortfolioError;

/// Rectangular table of periodic returns.
///
/// Rows are periods, columns follow the ticker order. Rows containing any
/// non-finite cell are excluded from moment estimation.
#[derive(Clone, Debug)]
pub struct ReturnSeries {
  tickers: Vec<String>,
  returns: Array2<f64>,
}

impl ReturnSeries {
  /// Wrap an already-aligned return table.
  pub fn new(tickers: Vec<String>, returns: Array2<f64>) -> Self {
    Self { tickers, returns }
  }

  /// Convert a close-price table to simple returns.
  ///
  /// A non-positive or non-finite previous price yields a non-finite cell,
  /// which later drops that row from estimation.
  pub fn from_prices(tickers: Vec<String>, prices: &Array2<f64>) -> Self {
    let rows = prices.nrows().saturating_sub(1);
    let cols = prices.ncols();
    let mut returns = Array2::<f64>::zeros((rows, cols));

    for t in 0..rows {
      for i in 0..cols {
        let prev = prices[[t, i]];
        let next = prices[[t + 1, i]];
        returns[[t, i]] = if prev.is_finite() && prev > 0.0 {
          next / prev - 1.0
        } else {
          f64::NAN
        };
      }
    }

    Self { tickers, returns }
  }

  /// Tickers in column order.
  pub fn tickers(&self) -> &[String] {
    &self.tickers
  }

  /// Number of assets (columns).
  pub fn asset_count(&self) -> usize {
    self.returns.ncols()
  }

  /// Number of periods (rows), including incomplete ones.
  pub fn period_count(&self) -> usize {
    self.returns.nrows()
  }

  /// Borrow the raw return table.
  pub fn returns(&self) -> &Array2<f64> {
    &self.returns
  }

  fn complete_rows(&self) -> Vec<usize> {
    (0..self.returns.nrows())
      .filter(|&t| self.returns.row(t).iter().all(|v| v.is_finite()))
      .collect()
  }

  /// Ticker to blame when no complete row exists: the first column without a
  /// single finite observation, else the first column with a gap.
  fn incomplete_ticker(&self) -> String {
    for (i, ticker) in self.tickers.iter().enumerate() {
      if !self.returns.column(i).iter().any(|v| v.is_finite()) {
        return ticker.clone();
      }
    }
    for (i, ticker) in self.tickers.iter().enumerate() {
      if self.returns.column(i).iter().any(|v| !v.is_finite()) {
        return ticker.clone();
      }
    }
    self.tickers.first().cloned().unwrap_or_default()
  }

  /// Arithmetic mean per-period return for each ticker.
  pub fn mean_returns(&self) -> Result<Array1<f64>, PortfolioError> {
    let rows = self.complete_rows();
    if rows.is_empty() {
      return Err(PortfolioError::InsufficientData(self.incomplete_ticker()));
    }

    let n = self.asset_count();
    let mut mean = Array1::<f64>::zeros(n);
    for &t in &rows {
      mean += &self.returns.row(t);
    }
    mean /= rows.len() as f64;

    Ok(mean)
  }

  /// Sample covariance matrix of per-period returns.
  ///
  /// With fewer than two complete rows every entry is zero, which downstream
  /// code treats as a degenerate risk term.
  pub fn covariance(&self) -> Result<Array2<f64>, PortfolioError> {
    let rows = self.complete_rows();
    if rows.is_empty() {
      return Err(PortfolioError::InsufficientData(self.incomplete_ticker()));
    }

    let n = self.asset_count();
    let mut cov = Array2::<f64>::zeros((n, n));
    if rows.len() < 2 {
      return Ok(cov);
    }

    let mean = self.mean_returns()?;
    for &t in &rows {
      let d = &self.returns.row(t) - &mean;
      for i in 0..n {
        for j in i..n {
          cov[[i, j]] += d[i] * d[j];
        }
      }
    }

    let denom = (rows.len() - 1) as f64;
    for i in 0..n {
      for j in i..n {
        cov[[i, j]] /= denom;
        cov[[j, i]] = cov[[i, j]];
      }
    }

    Ok(cov)
  }

  /// Pearson correlation matrix of per-period returns.
  pub fn correlation(&self) -> Result<Array2<f64>, PortfolioError> {
    let cov = self.covariance()?;
    let n = self.asset_count();
    let mut corr = Array2::<f64>::zeros((n, n));

    for i in 0..n {
      let si = cov[[i, i]].max(0.0).sqrt();
      for j in 0..n {
        let sj = cov[[j, j]].max(0.0).sqrt();
        let denom = si * sj;
        corr[[i, j]] = if i == j {
          1.0
        } else if denom > 1e-15 {
          (cov[[i, j]] / denom).clamp(-1.0, 1.0)
        } else {
          0.0
        };
      }
    }

    Ok(corr)
  }
}

#[cfg(test)]
mod tests {
  use ndarray::array;

  use super::*;

  fn two_asset_series() -> ReturnSeries {
    ReturnSeries::new(
      vec!["A".to_string(), "B".to_string()],
      array![
        [0.01, 0.00],
        [0.02, 0.01],
        [-0.01, 0.01],
        [0.00, 0.02],
      ],
    )
  }

  #[test]
  fn from_prices_computes_simple_returns() {
    let prices = array![[100.0, 50.0], [110.0, 45.0], [99.0, 54.0]];
    let series = ReturnSeries::from_prices(vec!["A".to_string(), "B".to_string()], &prices);

    assert_eq!(series.period_count(), 2);
    assert!((series.returns()[[0, 0]] - 0.1).abs() < 1e-12);
    assert!((series.returns()[[0, 1]] + 0.1).abs() < 1e-12);
    assert!((series.returns()[[1, 0]] + 0.1).abs() < 1e-12);
    assert!((series.returns()[[1, 1]] - 0.2).abs() < 1e-12);
  }

  #[test]
  fn mean_returns_match_hand_computation() {
    let mean = two_asset_series().mean_returns().unwrap();
    assert!((mean[0] - 0.005).abs() < 1e-12);
    assert!((mean[1] - 0.01).abs() < 1e-12);
  }

  #[test]
  fn covariance_matches_hand_computation() {
    let cov = two_asset_series().covariance().unwrap();
    assert!((cov[[0, 0]] - 0.0005 / 3.0).abs() < 1e-12);
    assert!((cov[[1, 1]] - 0.0002 / 3.0).abs() < 1e-12);
    assert!((cov[[0, 1]] + 0.0001 / 3.0).abs() < 1e-12);
    assert!((cov[[0, 1]] - cov[[1, 0]]).abs() < 1e-15);
  }

  #[test]
  fn incomplete_rows_are_dropped_from_estimation() {
    let series = ReturnSeries::new(
      vec!["A".to_string(), "B".to_string()],
      array![[0.01, f64::NAN], [0.02, 0.01], [0.00, 0.03]],
    );

    let mean = series.mean_returns().unwrap();
    assert!((mean[0] - 0.01).abs() < 1e-12);
    assert!((mean[1] - 0.02).abs() < 1e-12);
  }

  #[test]
  fn all_nan_ticker_is_named_in_error() {
    let series = ReturnSeries::new(
      vec!["A".to_string(), "B".to_string()],
      array![[0.01, f64::NAN], [0.02, f64::NAN]],
    );

    let err = series.mean_returns().unwrap_err();
    assert!(matches!(
      err,
      PortfolioError::InsufficientData(ticker) if ticker == "B"
    ));
  }

  #[test]
  fn correlation_is_unit_diagonal_and_bounded() {
    let corr = two_asset_series().correlation().unwrap();
    assert!((corr[[0, 0]] - 1.0).abs() < 1e-15);
    assert!((corr[[1, 1]] - 1.0).abs() < 1e-15);
    assert!(corr[[0, 1]] >= -1.0 && corr[[0, 1]] <= 1.0);
    assert!((corr[[0, 1]] - corr[[1, 0]]).abs() < 1e-15);
  }
}
