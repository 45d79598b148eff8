// Newton-Raphson fractal over a square region of the complex plane
//
// For each pixel track the number of iterations taken to converge and the
// root converged to. Pixels are independent so the grid is swept in parallel,
// one row per task, each task writing only its own rows of the two grids.

use std::time::Instant;

use log::{debug, info};
use num::complex::Complex;
use rayon::prelude::*;

use crate::error::SolveError;
use crate::grid::Grid;
use crate::polynomial::Polynomial;
use crate::roots::Roots;

// Distance to a known root below which an iterate counts as converged
pub const CONVERGENCE_THRESHOLD : f64 = 1e-14;

pub const UNCOMPUTED_ROOT : u32 = u32::MAX;

pub const DEFAULT_BOUND : f64 = 2.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewtonFractal {
    pub root_indices : Grid<u32>,
    pub convergence : Grid<u32>
}

#[derive(Debug, Clone)]
pub struct FractalSolver {
    polynomial : Polynomial,
    differential : Polynomial,
    roots : Roots,
    max_iterations : u32,
    grid_size : usize,
    bound : f64,
    threads : Option<usize>
}

impl FractalSolver {
    /// Validate the inputs and precompute the derivative.
    ///
    /// Checks run in order polynomial, roots, grid size, iteration bound, and
    /// the first failure is returned.
    pub fn new(
        polynomial : impl Into<Polynomial>,
        roots : impl Into<Roots>,
        max_iterations : u32,
        grid_size : usize
    ) -> Result<FractalSolver, SolveError> {
        let polynomial = polynomial.into();
        let roots = roots.into();
        if polynomial.len() < 2 {
            return Err(SolveError::InvalidPolynomial(polynomial.len()));
        }
        if roots.is_empty() {
            return Err(SolveError::EmptyRootSet);
        }
        if grid_size < 2 {
            return Err(SolveError::InvalidGridSize(grid_size));
        }
        if max_iterations < 1 {
            return Err(SolveError::InvalidIterationBound(max_iterations));
        }
        let differential = polynomial.differentiate();
        debug!("Derivative coefficients {:?}", differential.coefficients());
        Ok(FractalSolver {
            polynomial,
            differential,
            roots,
            max_iterations,
            grid_size,
            bound : DEFAULT_BOUND,
            threads : None
        })
    }

    pub fn with_bound(mut self, bound : f64) -> Result<FractalSolver, SolveError> {
        if !(bound.is_finite() && bound > 0.0) {
            return Err(SolveError::InvalidBound(bound));
        }
        self.bound = bound;
        Ok(self)
    }

    pub fn with_threads(mut self, threads : usize) -> FractalSolver {
        self.threads = Some(threads);
        self
    }

    pub fn polynomial(&self) -> &Polynomial {
        &self.polynomial
    }

    pub fn differential(&self) -> &Polynomial {
        &self.differential
    }

    pub fn roots(&self) -> &Roots {
        &self.roots
    }

    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn bound(&self) -> f64 {
        self.bound
    }

    /// Starting point for pixel `(i, j)`: `i` runs along the real axis and `j`
    /// along the imaginary axis, with `0` at `-bound` and `N-1` at `bound`.
    pub fn pixel_to_complex(&self, i : usize, j : usize) -> Complex<f64> {
        let last = (self.grid_size - 1) as f64;
        let span = 2.0 * self.bound;
        Complex::new(
            span * i as f64 / last - self.bound,
            span * j as f64 / last - self.bound
        )
    }

    /// Iterate from `initial` until within the threshold of a root or out of
    /// steps. Returns the final iterate and the step it converged on, if any.
    ///
    /// A vanishing derivative is not trapped: the iterate goes non-finite and
    /// stays that way, so it never converges.
    pub fn iterate(&self, initial : Complex<f64>) -> (Complex<f64>, Option<u32>) {
        let tol_sqr = CONVERGENCE_THRESHOLD * CONVERGENCE_THRESHOLD;
        let mut z = initial;
        for step in 1..=self.max_iterations {
            let eval = self.polynomial.evaluate(z);
            let diff = self.differential.evaluate(z);
            z = z - eval / diff;
            if self.roots.nearest(z).1 <= tol_sqr {
                return (z, Some(step));
            }
        }
        (z, None)
    }

    pub fn solve(&self) -> Result<NewtonFractal, SolveError> {
        let mut root_indices = Grid::new(self.grid_size, UNCOMPUTED_ROOT);
        let mut convergence = Grid::new(self.grid_size, self.max_iterations);
        self.solve_into(&mut root_indices, &mut convergence)?;
        Ok(NewtonFractal { root_indices, convergence })
    }

    /// Solve into caller owned grids, which must already be `N x N`.
    ///
    /// Existing contents are discarded: the convergence grid is reset to the
    /// iteration bound and the root grid to `UNCOMPUTED_ROOT` before the sweep.
    /// On error neither grid is touched.
    pub fn solve_into(
        &self,
        root_indices : &mut Grid<u32>,
        convergence : &mut Grid<u32>
    ) -> Result<(), SolveError> {
        for grid in [&*root_indices, &*convergence] {
            if grid.size() != self.grid_size {
                return Err(SolveError::GridShapeMismatch {
                    expected : self.grid_size,
                    found : grid.size()
                });
            }
        }
        let pool = match self.threads {
            Some(threads) => Some(
                rayon::ThreadPoolBuilder::new().num_threads(threads).build()?
            ),
            None => None
        };
        info!(
            "Solving {}x{} Newton fractal: {} coefficients, {} roots, {} iterations",
            self.grid_size,
            self.grid_size,
            self.polynomial.len(),
            self.roots.len(),
            self.max_iterations
        );
        let start = Instant::now();
        root_indices.fill(UNCOMPUTED_ROOT);
        convergence.fill(self.max_iterations);
        let root_cells = root_indices.as_mut_slice();
        let convergence_cells = convergence.as_mut_slice();
        match pool {
            Some(pool) => {
                debug!("Sweeping on {} worker threads", pool.current_num_threads());
                pool.install(|| self.sweep(root_cells, convergence_cells))
            },
            None => self.sweep(root_cells, convergence_cells)
        }
        info!("Solved in {:?}", start.elapsed());
        Ok(())
    }

    fn sweep(&self, root_cells : &mut [u32], convergence_cells : &mut [u32]) {
        let n = self.grid_size;
        root_cells
            .par_chunks_mut(n)
            .zip(convergence_cells.par_chunks_mut(n))
            .enumerate()
            .for_each(|(i, (root_row, convergence_row))| {
                for (j, (root, steps)) in root_row.iter_mut().zip(convergence_row.iter_mut()).enumerate() {
                    let (z, converged) = self.iterate(self.pixel_to_complex(i, j));
                    if let Some(step) = converged {
                        *steps = step;
                    }
                    *root = self.roots.nearest(z).0 as u32;
                }
            });
    }
}

// Coefficients lowest degree first, sampled over [-2, 2] x [-2, 2]
pub fn solve(
    coefficients : &[f64],
    roots : &[Complex<f64>],
    max_iterations : u32,
    grid_size : usize
) -> Result<NewtonFractal, SolveError> {
    FractalSolver::new(coefficients, roots, max_iterations, grid_size)?.solve()
}
