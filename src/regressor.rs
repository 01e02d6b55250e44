use log::info;
use ndarray::{s, Array1, Array2, ArrayView1};

use crate::dual::Dual;
use crate::error::Error;
use crate::optimizer::Optimizer;

/// Mean squared error of the affine map, halved for a clean gradient:
/// `|X w + b - y|^2 / (2 rows)`.
///
/// `params` holds the weights with the bias appended as the last entry,
/// so the whole model fits in the single vector an optimizer works on.
pub fn mean_squared_error(params: &Array1<Dual>, x: &Array2<Dual>, y: &Array1<Dual>) -> Dual {
    let features = params.len() - 1;
    let weights = params.slice(s![..features]);
    let bias = params[features];

    let residual = x.dot(&weights) + bias - y;
    residual.mapv(|r| r * r).sum() / (2.0 * x.nrows() as f64)
}

/// A linear model fitted by iterative optimization of the squared-error
/// loss. The optimizer is chosen at construction; training hands it the
/// loss closed over the data and splits the converged parameter vector
/// into weights and bias.
#[derive(Debug, Clone)]
pub struct LinearRegressor<O: Optimizer> {
    optimizer: O,
    weights: Option<Array1<f64>>,
    bias: f64,
}

impl<O: Optimizer> LinearRegressor<O> {
    pub fn new(optimizer: O) -> Self {
        LinearRegressor {
            optimizer,
            weights: None,
            bias: 0.0,
        }
    }

    /// Fits the model to a design matrix (rows = samples, columns =
    /// features) and its target vector.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidShape`] when the row count of `x` and the length
    ///   of `y` disagree.
    /// * [`Error::DidNotConverge`] when the optimizer gives up; the
    ///   previously fitted state (if any) is left untouched.
    pub fn train(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<(), Error> {
        if x.nrows() != y.len() {
            return Err(Error::InvalidShape {
                rows: x.nrows(),
                targets: y.len(),
            });
        }

        let x_dual = x.mapv(Dual::constant);
        let y_dual = y.mapv(Dual::constant);
        let loss = move |params: &Array1<Dual>| mean_squared_error(params, &x_dual, &y_dual);

        let features = x.ncols();
        let outcome = self.optimizer.optimize(&loss, features + 1)?;

        self.weights = Some(outcome.params.slice(s![..features]).to_owned());
        self.bias = outcome.params[features];
        info!(
            "fitted linear model with {} features in {} optimizer steps",
            features,
            outcome.history.len() - 1
        );
        Ok(())
    }

    /// Evaluates the fitted affine map on new rows: `X w + b`.
    ///
    /// # Panics
    ///
    /// Panics if the model has not been trained, or if the column count
    /// does not match the fitted feature count.
    pub fn predict(&self, x: &Array2<f64>) -> Array1<f64> {
        let weights = self.fitted_weights();
        assert_eq!(
            x.ncols(),
            weights.len(),
            "Input feature count does not match the fitted model"
        );

        x.dot(weights) + self.bias
    }

    /// Evaluates the fitted affine map on a single example: `w . x + b`.
    ///
    /// # Panics
    ///
    /// Same conditions as [`LinearRegressor::predict`].
    pub fn predict_one(&self, x: ArrayView1<f64>) -> f64 {
        let weights = self.fitted_weights();
        assert_eq!(
            x.len(),
            weights.len(),
            "Input feature count does not match the fitted model"
        );

        weights.dot(&x) + self.bias
    }

    /// The fitted parameters as one vector: weights first, bias last.
    ///
    /// # Panics
    ///
    /// Panics if the model has not been trained.
    pub fn weights(&self) -> Array1<f64> {
        let mut params = self.fitted_weights().to_vec();
        params.push(self.bias);
        Array1::from_vec(params)
    }

    fn fitted_weights(&self) -> &Array1<f64> {
        self.weights
            .as_ref()
            .expect("Model is not trained; call train() first")
    }
}
