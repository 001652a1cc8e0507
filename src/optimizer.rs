//! # Allocation Optimizer
//!
//! $$
//! \max_{\mathbf{w} \in \Delta^{n-1}} m(\mathbf{w}),\quad
//! \Delta^{n-1} = \{\mathbf{w} : w_i \in [0,1],\ \textstyle\sum_i w_i = 1\}
//! $$
//!
//! Constrained maximization of a metric strategy over the fully-invested
//! long-only simplex.

use argmin::core::CostFunction;
use argmin::core::Executor;
use argmin::core::TerminationReason;
use argmin::core::TerminationStatus;
use argmin::solver::neldermead::NelderMead;

use crate::error::PortfolioError;
use crate::strategy::MetricStrategy;
use crate::types::Allocation;

/// Hard caps for a single solver run.
#[derive(Clone, Copy, Debug)]
pub struct OptimizerConfig {
  /// Maximum solver iterations before the run counts as non-converged.
  pub max_iters: u64,
  /// Simplex standard-deviation tolerance used as the convergence
  /// criterion.
  pub sd_tolerance: f64,
}

impl Default for OptimizerConfig {
  fn default() -> Self {
    Self {
      max_iters: 5000,
      sd_tolerance: 1e-8,
    }
  }
}

/// Numerically stable softmax.
///
/// Maps unconstrained solver parameters onto the weight simplex, so every
/// probe the solver makes is fully invested and long-only. The zero vector
/// maps to the uniform allocation.
fn softmax(x: &[f64]) -> Vec<f64> {
  if x.is_empty() {
    return Vec::new();
  }

  let max_x = x.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
  let exps: Vec<f64> = x.iter().map(|&v| (v - max_x).exp()).collect();
  let sum: f64 = exps.iter().sum();

  if sum < 1e-15 {
    vec![1.0 / x.len() as f64; x.len()]
  } else {
    exps.iter().map(|&e| e / sum).collect()
  }
}

fn uniform_weights(n: usize) -> Vec<f64> {
  vec![1.0 / n as f64; n]
}

/// Negated metric in softmax coordinates, the solver's native minimization
/// form.
struct NegativeMetric<'a> {
  strategy: &'a dyn MetricStrategy,
}

impl CostFunction for NegativeMetric<'_> {
  type Param = Vec<f64>;
  type Output = f64;

  fn cost(&self, x: &Self::Param) -> Result<Self::Output, argmin::core::Error> {
    let w = softmax(x);
    Ok(-self.strategy.compute_metric(&w)?)
  }
}

/// Maximizes a [`MetricStrategy`] over the weight simplex.
///
/// Holds no state across runs; each [`AllocationOptimizer::optimize`] call
/// is an independent, pure computation.
pub struct AllocationOptimizer<'a> {
  strategy: &'a dyn MetricStrategy,
  config: OptimizerConfig,
}

impl<'a> AllocationOptimizer<'a> {
  pub fn new(strategy: &'a dyn MetricStrategy, config: OptimizerConfig) -> Self {
    Self { strategy, config }
  }

  /// Run the solver from the uniform allocation and return the optimal
  /// weights with the metric recomputed at them.
  ///
  /// The initial simplex contains the uniform allocation itself, so the
  /// reported optimum is never worse than that feasible starting point. Any
  /// termination other than solver convergence fails with
  /// [`PortfolioError::OptimizationDidNotConverge`] carrying the best
  /// weights seen and the solver's diagnostic.
  pub fn optimize(&self) -> Result<Allocation, PortfolioError> {
    let n = self.strategy.asset_count();

    // Zero vector (the uniform allocation) plus one unit vector per asset.
    let x0 = vec![0.0; n];
    let mut simplex = Vec::with_capacity(n + 1);
    simplex.push(x0.clone());
    for i in 0..n {
      let mut point = x0.clone();
      point[i] = 1.0;
      simplex.push(point);
    }

    let solver = NelderMead::new(simplex)
      .with_sd_tolerance(self.config.sd_tolerance)
      .map_err(|e| PortfolioError::OptimizationDidNotConverge {
        reason: e.to_string(),
        best: uniform_weights(n),
      })?;

    let cost = NegativeMetric {
      strategy: self.strategy,
    };
    let max_iters = self.config.max_iters;
    let res = Executor::new(cost, solver)
      .configure(|state| state.max_iters(max_iters))
      .run()
      .map_err(|e| PortfolioError::OptimizationDidNotConverge {
        reason: e.to_string(),
        best: uniform_weights(n),
      })?;

    let state = res.state;
    tracing::debug!(
      iterations = state.iter,
      best_cost = state.best_cost,
      "nelder-mead run finished"
    );

    let best_x = state.best_param.clone().unwrap_or_else(|| vec![0.0; n]);
    let mut weights = softmax(&best_x);

    match state.termination_status {
      TerminationStatus::Terminated(TerminationReason::SolverConverged)
      | TerminationStatus::Terminated(TerminationReason::TargetCostReached) => {}
      ref other => {
        return Err(PortfolioError::OptimizationDidNotConverge {
          reason: format!("{other:?}"),
          best: weights,
        });
      }
    }

    // Correct residual drift at the solution.
    for w in &mut weights {
      *w = w.clamp(0.0, 1.0);
    }
    let total: f64 = weights.iter().sum();
    for w in &mut weights {
      *w /= total;
    }

    let uniform = uniform_weights(n);
    if self.strategy.compute_metric(&uniform)? > self.strategy.compute_metric(&weights)? {
      weights = uniform;
    }

    let metric = self.strategy.evaluate(&weights)?;
    Ok(Allocation { weights, metric })
  }
}
