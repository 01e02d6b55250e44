use ndarray::Array1;
use rand_distr::{Distribution, Uniform};

use crate::dual::Dual;
use crate::error::Error;

/// Default convergence threshold: optimization stops once consecutive
/// iterates are closer than this (Euclidean distance).
pub const EPS: f64 = 1.0e-7;

/// Default iteration cap. Well-conditioned problems converge orders of
/// magnitude earlier; hitting the cap is reported as
/// [`Error::DidNotConverge`].
pub const MAX_ITERATIONS: usize = 1_000_000;

/// A loss function over a differentiable parameter vector, as consumed by
/// every [`Optimizer`].
pub type LossFunction<'a> = dyn Fn(&Array1<Dual>) -> Dual + 'a;

/// An iterative first-order update rule.
///
/// Implementations repeatedly query the gradient of `loss` and update a
/// parameter vector of the requested dimension until consecutive iterates
/// converge, returning the final parameters together with the full
/// trajectory of per-iteration snapshots.
pub trait Optimizer {
    /// Per-iteration snapshot. Variants record different state, so each
    /// one declares its own shape.
    type Record;

    fn optimize(
        &self,
        loss: &LossFunction<'_>,
        dimension: usize,
    ) -> Result<Optimization<Self::Record>, Error>;
}

/// The outcome of one [`Optimizer::optimize`] run.
#[derive(Debug, Clone)]
pub struct Optimization<R> {
    /// The converged parameter vector.
    pub params: Array1<f64>,
    /// One snapshot per iteration. The first entry is the starting point,
    /// the last is the converged state.
    pub history: Vec<R>,
}

/// Resolves the starting point for a run: the injected guess when one was
/// configured, otherwise a random vector with entries uniform in (-1, 1).
pub(crate) fn starting_point(initial: Option<&Array1<f64>>, dimension: usize) -> Array1<f64> {
    match initial {
        Some(guess) => {
            assert_eq!(
                guess.len(),
                dimension,
                "Initial guess length does not match the requested dimension"
            );
            guess.clone()
        }
        None => {
            let uniform = Uniform::new(-1.0, 1.0).unwrap();
            let mut rng = rand::rng();
            Array1::from_shape_fn(dimension, |_| uniform.sample(&mut rng))
        }
    }
}

/// Euclidean distance between consecutive iterates; every convergence test
/// in the crate goes through here.
pub(crate) fn distance(a: &Array1<f64>, b: &Array1<f64>) -> f64 {
    (a - b).mapv(|d| d * d).sum().sqrt()
}
