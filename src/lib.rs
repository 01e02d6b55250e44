mod dual;
mod error;
mod optimizer;
mod optimizers;
mod regressor;

pub use dual::{gradient, Dual};
pub use error::Error;
pub use optimizer::{LossFunction, Optimization, Optimizer, EPS, MAX_ITERATIONS};
pub use optimizers::{
    AdaGrad, AdaGradRecord, GradientDescent, MomentumGradientDescent, MomentumRecord,
};
pub use regressor::{mean_squared_error, LinearRegressor};
