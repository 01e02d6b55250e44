pub mod adagrad;
pub mod gradient_descent;
pub mod momentum;

pub use adagrad::{AdaGrad, AdaGradRecord};
pub use gradient_descent::GradientDescent;
pub use momentum::{MomentumGradientDescent, MomentumRecord};
