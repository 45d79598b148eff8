// Newton fractals of real polynomials
//
// Every point of a square grid over the complex plane is run through
// Newton-Raphson iteration. The result is two grids: which of a supplied set
// of roots each point ended up nearest, and how many steps it took to get
// within 1e-14 of it. Turning those into an image is left to the caller.

pub mod animation;
pub mod config;
pub mod error;
pub mod grid;
pub mod polynomial;
pub mod roots;
pub mod solver;

pub use config::SolveConfig;
pub use error::{ConfigError, SolveError};
pub use grid::Grid;
pub use polynomial::Polynomial;
pub use roots::Roots;
pub use solver::{solve, FractalSolver, NewtonFractal, CONVERGENCE_THRESHOLD, UNCOMPUTED_ROOT};
