// Real coefficient polynomials evaluated over the complex plane
//
// Coefficients are always stored lowest degree first. Horner's scheme walks
// them from the top down so no powers of z are ever formed.

use json::JsonValue;
use num::complex::Complex;

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    coefficients : Vec<f64>
}

/// Evaluate `c0 + c1 z + ... + cn z^n` at `z` with Horner's scheme.
///
/// An empty coefficient list evaluates to zero. Non-finite inputs propagate.
#[inline]
pub fn evaluate(coefficients : &[f64], z : Complex<f64>) -> Complex<f64> {
    let mut acc = Complex::new(0.0, 0.0);
    for coeff in coefficients.iter().rev() {
        acc = acc * z + *coeff;
    }
    acc
}

pub fn differentiate(coefficients : &[f64]) -> Vec<f64> {
    coefficients.iter().enumerate().skip(1).map(
        |(i, v)| (i as f64) * v
    ).collect()
}

impl Polynomial {
    pub fn new(coefficients : Vec<f64>) -> Polynomial {
        Polynomial { coefficients }
    }

    pub fn from_json(input : &JsonValue) -> Result<Polynomial, ConfigError> {
        if !input.is_array() {
            return Err(ConfigError::MissingField("polynomial"));
        }
        let coefficients = input.members().map(
            |value| value.as_f64().ok_or_else(|| ConfigError::InvalidField {
                field : "polynomial",
                reason : format!("coefficient {} is not a number", value)
            })
        ).collect::<Result<Vec<f64>, ConfigError>>()?;
        Ok(Polynomial { coefficients })
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    pub fn differentiate(&self) -> Polynomial {
        Polynomial { coefficients : differentiate(&self.coefficients) }
    }

    #[inline]
    pub fn evaluate(&self, z : Complex<f64>) -> Complex<f64> {
        evaluate(&self.coefficients, z)
    }
}

impl From<Vec<f64>> for Polynomial {
    fn from(coefficients : Vec<f64>) -> Polynomial {
        Polynomial::new(coefficients)
    }
}

impl From<&[f64]> for Polynomial {
    fn from(coefficients : &[f64]) -> Polynomial {
        Polynomial::new(coefficients.to_vec())
    }
}
