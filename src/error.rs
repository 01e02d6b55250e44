use thiserror::Error;

/// Failures surfaced by training and optimization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("design matrix has {rows} rows but the target vector has {targets} entries")]
    InvalidShape { rows: usize, targets: usize },

    #[error("optimization did not converge within {iterations} iterations")]
    DidNotConverge { iterations: usize },
}
