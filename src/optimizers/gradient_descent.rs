use log::{debug, trace};
use ndarray::Array1;

use crate::dual::gradient;
use crate::error::Error;
use crate::optimizer::{self, LossFunction, Optimization, Optimizer, EPS, MAX_ITERATIONS};

/// Fixed-step steepest descent: `x <- x - learning_rate * grad(x)`.
#[derive(Debug, Clone)]
pub struct GradientDescent {
    pub learning_rate: f64,
    pub epsilon: f64,
    pub max_iterations: usize,
    /// Fixed starting point; bypasses random initialization when set.
    pub initial_guess: Option<Array1<f64>>,
}

impl Default for GradientDescent {
    fn default() -> Self {
        GradientDescent {
            learning_rate: 0.01,
            epsilon: EPS,
            max_iterations: MAX_ITERATIONS,
            initial_guess: None,
        }
    }
}

impl GradientDescent {
    pub fn new(learning_rate: f64, epsilon: f64) -> Self {
        GradientDescent {
            learning_rate,
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

impl Optimizer for GradientDescent {
    type Record = Array1<f64>;

    fn optimize(
        &self,
        loss: &LossFunction<'_>,
        dimension: usize,
    ) -> Result<Optimization<Self::Record>, Error> {
        let mut x = optimizer::starting_point(self.initial_guess.as_ref(), dimension);
        let mut history = vec![x.clone()];

        for iteration in 1..=self.max_iterations {
            let grad = gradient(loss, &x);
            let next = &x - &(self.learning_rate * &grad);
            let error = optimizer::distance(&next, &x);

            x = next;
            history.push(x.clone());

            if error <= self.epsilon {
                debug!("gradient descent converged after {} iterations", iteration);
                return Ok(Optimization { params: x, history });
            }
            if !error.is_finite() {
                debug!("gradient descent diverged after {} iterations", iteration);
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
