// The known roots a Newton iteration is tested against
//
// Roots are indexed from 0 in the order they were supplied.

use json::JsonValue;
use num::complex::Complex;

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq)]
pub struct Roots {
    roots : Vec<Complex<f64>>
}

fn root_from_json(input : &JsonValue) -> Option<Complex<f64>> {
    if let Some(re) = input.as_f64() {
        return Some(Complex::new(re, 0.0));
    }
    if input.is_array() && input.len() == 2 {
        return Some(Complex::new(input[0].as_f64()?, input[1].as_f64()?));
    }
    None
}

impl Roots {
    pub fn new(roots : Vec<Complex<f64>>) -> Roots {
        Roots { roots }
    }

    // Accepts either plain numbers or [re, im] pairs
    pub fn from_json(input : &JsonValue) -> Result<Roots, ConfigError> {
        if !input.is_array() {
            return Err(ConfigError::MissingField("roots"));
        }
        let roots = input.members().map(
            |value| root_from_json(value).ok_or_else(|| ConfigError::InvalidField {
                field : "roots",
                reason : format!("{} is not a number or [re, im] pair", value)
            })
        ).collect::<Result<Vec<_>, ConfigError>>()?;
        Ok(Roots { roots })
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn as_slice(&self) -> &[Complex<f64>] {
        &self.roots
    }

    /// Index of the root closest to `z` and its squared distance.
    ///
    /// Ties go to the lowest index. NaN distances never win, so an iterate
    /// that has gone non-finite resolves to root 0 with an infinite distance.
    #[inline]
    pub fn nearest(&self, z : Complex<f64>) -> (usize, f64) {
        let mut best = (0, f64::INFINITY);
        for (i, root) in self.roots.iter().enumerate() {
            let dist_sqr = (z - root).norm_sqr();
            if dist_sqr < best.1 {
                best = (i, dist_sqr);
            }
        }
        best
    }
}

impl From<Vec<Complex<f64>>> for Roots {
    fn from(roots : Vec<Complex<f64>>) -> Roots {
        Roots::new(roots)
    }
}

impl From<&[Complex<f64>]> for Roots {
    fn from(roots : &[Complex<f64>]) -> Roots {
        Roots::new(roots.to_vec())
    }
}
