use log::{debug, trace};
use ndarray::Array1;

use crate::dual::gradient;
use crate::error::Error;
use crate::optimizer::{self, LossFunction, Optimization, Optimizer, EPS, MAX_ITERATIONS};

/// One iteration of AdaGrad: the parameter vector, the gradient that moved
/// it, and the running sum of squared gradients. The initial snapshot
/// precedes any gradient evaluation, so its `gradient` is `None`.
#[derive(Debug, Clone)]
pub struct AdaGradRecord {
    pub params: Array1<f64>,
    pub gradient: Option<Array1<f64>>,
    pub accumulator: Array1<f64>,
}

/// Per-coordinate adaptive descent: accumulates squared gradients and
/// scales each coordinate's step by the inverse square root of its
/// accumulated magnitude. Coordinates with historically small gradients
/// keep taking large steps, which suits features of heterogeneous scale.
#[derive(Debug, Clone)]
pub struct AdaGrad {
    pub learning_rate: f64,
    /// Numerical floor added to the accumulator before the square root,
    /// keeping the per-coordinate division total.
    pub delta: f64,
    pub epsilon: f64,
    pub max_iterations: usize,
    /// Fixed starting point; bypasses random initialization when set.
    pub initial_guess: Option<Array1<f64>>,
}

impl Default for AdaGrad {
    fn default() -> Self {
        AdaGrad {
            learning_rate: 0.7,
            delta: 1.0e-8,
            epsilon: EPS,
            max_iterations: MAX_ITERATIONS,
            initial_guess: None,
        }
    }
}

impl AdaGrad {
    pub fn new(learning_rate: f64, delta: f64, epsilon: f64) -> Self {
        AdaGrad {
            learning_rate,
            delta,
            epsilon,
            ..Default::default()
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_initial_guess(mut self, initial_guess: Array1<f64>) -> Self {
        self.initial_guess = Some(initial_guess);
        self
    }
}

impl Optimizer for AdaGrad {
    type Record = AdaGradRecord;

    fn optimize(
        &self,
        loss: &LossFunction<'_>,
        dimension: usize,
    ) -> Result<Optimization<Self::Record>, Error> {
        let mut theta = optimizer::starting_point(self.initial_guess.as_ref(), dimension);
        let mut accumulator: Array1<f64> = Array1::zeros(dimension);
        let mut history = vec![AdaGradRecord {
            params: theta.clone(),
            gradient: None,
            accumulator: accumulator.clone(),
        }];

        for iteration in 1..=self.max_iterations {
            let grad = gradient(loss, &theta);
            accumulator += &(&grad * &grad);
            let scale = accumulator.mapv(|r| (r + self.delta).sqrt());
            let next = &theta - &(self.learning_rate * &grad / scale);
            let error = optimizer::distance(&next, &theta);

            theta = next;
            history.push(AdaGradRecord {
                params: theta.clone(),
                gradient: Some(grad),
                accumulator: accumulator.clone(),
            });

            if error <= self.epsilon {
                debug!("adagrad converged after {} iterations", iteration);
                return Ok(Optimization {
                    params: theta,
                    history,
                });
            }
            if !error.is_finite() {
                debug!("adagrad diverged after {} iterations", iteration);
                return Err(Error::DidNotConverge {
                    iterations: iteration,
                });
            }
            if iteration % 1000 == 0 {
                trace!("iteration {}: step norm {:e}", iteration, error);
            }
        }

        Err(Error::DidNotConverge {
            iterations: self.max_iterations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_hyperparameters() {
        let optimizer = AdaGrad::default();

        assert_eq!(optimizer.learning_rate, 0.7);
        assert_eq!(optimizer.delta, 1.0e-8);
        assert_eq!(optimizer.epsilon, 1.0e-7);
        assert_eq!(optimizer.max_iterations, 1_000_000);
    }
}
