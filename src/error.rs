// Errors from solving and from reading parameters

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SolveError {
    #[error("Polynomial needs at least 2 coefficients, got {0}")]
    InvalidPolynomial(usize),

    #[error("Root set is empty")]
    EmptyRootSet,

    #[error("Grid size must be at least 2, got {0}")]
    InvalidGridSize(usize),

    #[error("Iteration bound must be at least 1, got {0}")]
    InvalidIterationBound(u32),

    #[error("Plane bound must be finite and positive, got {0}")]
    InvalidBound(f64),

    #[error("Output grid is {found}x{found}, expected {expected}x{expected}")]
    GridShapeMismatch { expected : usize, found : usize },

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Couldn't parse input: {0}")]
    Parse(#[from] json::Error),

    #[error("Missing {0}")]
    MissingField(&'static str),

    #[error("Invalid {field}: {reason}")]
    InvalidField { field : &'static str, reason : String },
}
