// Read solve parameters from json
//
// Optional fields fall back to defaults, but a field that is present with the
// wrong type is an error rather than silently replaced.

use json::JsonValue;

use crate::error::{ConfigError, SolveError};
use crate::polynomial::Polynomial;
use crate::roots::Roots;
use crate::solver::{FractalSolver, DEFAULT_BOUND};

pub const DEFAULT_MAX_ITERATIONS : u32 = 100;
pub const DEFAULT_GRID_SIZE : usize = 512;

#[derive(Debug, Clone, PartialEq)]
pub struct SolveConfig {
    pub polynomial : Polynomial,
    pub roots : Roots,
    pub max_iterations : u32,
    pub grid_size : usize,
    pub bound : f64,
    pub threads : Option<usize>
}

fn optional<T>(
    input : &JsonValue,
    field : &'static str,
    read : impl Fn(&JsonValue) -> Option<T>
) -> Result<Option<T>, ConfigError> {
    let value = &input[field];
    if value.is_null() {
        return Ok(None);
    }
    read(value).map(Some).ok_or_else(|| ConfigError::InvalidField {
        field,
        reason : format!("unexpected value {}", value)
    })
}

impl SolveConfig {
    pub fn from_json(input : &JsonValue) -> Result<SolveConfig, ConfigError> {
        let polynomial = Polynomial::from_json(&input["polynomial"])?;
        let roots = Roots::from_json(&input["roots"])?;
        let max_iterations = optional(input, "max_iterations", JsonValue::as_u32)?
            .unwrap_or(DEFAULT_MAX_ITERATIONS);
        let grid_size = optional(input, "grid_size", JsonValue::as_usize)?
            .unwrap_or(DEFAULT_GRID_SIZE);
        let bound = optional(input, "bound", JsonValue::as_f64)?.unwrap_or(DEFAULT_BOUND);
        let threads = optional(input, "threads", JsonValue::as_usize)?;
        Ok(SolveConfig {
            polynomial,
            roots,
            max_iterations,
            grid_size,
            bound,
            threads
        })
    }

    pub fn parse(contents : &str) -> Result<SolveConfig, ConfigError> {
        SolveConfig::from_json(&json::parse(contents)?)
    }

    pub fn solver(&self) -> Result<FractalSolver, SolveError> {
        let solver = FractalSolver::new(
            self.polynomial.clone(),
            self.roots.clone(),
            self.max_iterations,
            self.grid_size
        )?.with_bound(self.bound)?;
        Ok(match self.threads {
            Some(threads) => solver.with_threads(threads),
            None => solver
        })
    }
}

#[cfg(test)]
mod tests {
    use num::complex::Complex;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = SolveConfig::parse(r#"{"polynomial": [-1, 0, 0, 1], "roots": [1]}"#).unwrap();
        assert_eq!(config.polynomial.coefficients(), &[-1.0, 0.0, 0.0, 1.0]);
        assert_eq!(config.roots.as_slice(), &[Complex::new(1.0, 0.0)]);
        assert_eq!(config.max_iterations, DEFAULT_MAX_ITERATIONS);
        assert_eq!(config.grid_size, DEFAULT_GRID_SIZE);
        assert_eq!(config.bound, DEFAULT_BOUND);
        assert_eq!(config.threads, None);
    }

    #[test]
    fn test_all_fields() {
        let config = SolveConfig::parse(r#"{
            "polynomial": [-1, 0, 0, 1],
            "roots": [1, [-0.5, 0.8660254], [-0.5, -0.8660254]],
            "max_iterations": 50,
            "grid_size": 5,
            "bound": 1.5,
            "threads": 2
        }"#).unwrap();
        assert_eq!(config.roots.len(), 3);
        assert_eq!(config.max_iterations, 50);
        assert_eq!(config.grid_size, 5);
        assert_eq!(config.bound, 1.5);
        assert_eq!(config.threads, Some(2));
        let solver = config.solver().unwrap();
        assert_eq!(solver.polynomial(), &config.polynomial);
        assert_eq!(solver.roots(), &config.roots);
        assert_eq!(solver.max_iterations(), 50);
        assert_eq!(solver.grid_size(), 5);
        assert_eq!(solver.bound(), 1.5);
        assert_eq!(solver.pixel_to_complex(0, 0), Complex::new(-1.5, -1.5));
        let fractal = solver.solve().unwrap();
        assert_eq!(fractal.convergence.size(), 5);
    }

    #[test]
    fn test_missing_required() {
        assert!(matches!(
            SolveConfig::parse(r#"{"roots": [1]}"#),
            Err(ConfigError::MissingField("polynomial"))
        ));
        assert!(matches!(
            SolveConfig::parse(r#"{"polynomial": [1, 1]}"#),
            Err(ConfigError::MissingField("roots"))
        ));
    }

    #[test]
    fn test_wrong_type_is_error() {
        assert!(matches!(
            SolveConfig::parse(r#"{"polynomial": [1, 1], "roots": [1], "grid_size": "big"}"#),
            Err(ConfigError::InvalidField { field : "grid_size", .. })
        ));
        assert!(matches!(
            SolveConfig::parse(r#"{"polynomial": [1, 1], "roots": [1], "max_iterations": -3}"#),
            Err(ConfigError::InvalidField { field : "max_iterations", .. })
        ));
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(SolveConfig::parse("{"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_solver_validates() {
        let config = SolveConfig::parse(r#"{"polynomial": [2], "roots": [1]}"#).unwrap();
        assert!(matches!(config.solver(), Err(SolveError::InvalidPolynomial(1))));
        let config = SolveConfig::parse(r#"{"polynomial": [1, 1], "roots": [1], "bound": 0}"#).unwrap();
        assert!(matches!(config.solver(), Err(SolveError::InvalidBound(_))));
    }
}
