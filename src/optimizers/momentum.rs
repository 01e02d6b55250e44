use log::{debug, trace};
use ndarray::Array1;

use crate::dual::gradient;
use crate::error::Error;
use crate::optimizer::{self, LossFunction, Optimization, Optimizer, EPS, MAX_ITERATIONS};

/// One iteration of momentum descent: the parameter vector and the
/// velocity that produced it.
#[derive(Debug, Clone)]
pub struct MomentumRecord {
    pub params: Array1<f64>,
    pub velocity: Array1<f64>,
}

/// Velocity-accumulating descent: `v <- momentum * v + learning_rate * grad`,
/// `w <- w - v`. The accumulated velocity damps oscillation along
/// high-curvature directions, which speeds up convergence on
/// ill-conditioned quadratics.
#[derive(Debug, Clone)]
pub struct MomentumGradientDescent {
    pub learning_rate: f64,
    pub momentum: f64,
    pub epsilon: f64,
    pub max_iterations: usize,
    /// Fixed starting point; bypasses random initialization when set.
    pub initial_guess: Option<Array1<f64>>,
}

impl Default for MomentumGradientDescent {
    fn default() -> Self {
        MomentumGradientDescent {
            learning_rate: 0.01,
            momentum: 0.9,
            epsilon: EPS,
            max_iterations: MAX_ITERATIONS,
            initial_guess: None,
        }
    }
}

impl MomentumGradientDescent {
    pub fn new(learning_rate: f64, momentum: f64, epsilon: f64) -> Self {
        MomentumGradientDescent {
            learning_rate,
            momentum,
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

impl Optimizer for MomentumGradientDescent {
    type Record = MomentumRecord;

    fn optimize(
        &self,
        loss: &LossFunction<'_>,
        dimension: usize,
    ) -> Result<Optimization<Self::Record>, Error> {
        let mut w = optimizer::starting_point(self.initial_guess.as_ref(), dimension);
        let mut velocity = Array1::zeros(dimension);
        let mut history = vec![MomentumRecord {
            params: w.clone(),
            velocity: velocity.clone(),
        }];

        for iteration in 1..=self.max_iterations {
            let grad = gradient(loss, &w);
            velocity = self.momentum * &velocity + self.learning_rate * &grad;
            let next = &w - &velocity;
            let error = optimizer::distance(&next, &w);

            w = next;
            history.push(MomentumRecord {
                params: w.clone(),
                velocity: velocity.clone(),
            });

            if error <= self.epsilon {
                debug!("momentum descent converged after {} iterations", iteration);
                return Ok(Optimization { params: w, history });
            }
            if !error.is_finite() {
                debug!("momentum descent diverged after {} iterations", iteration);
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
