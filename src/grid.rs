// Square output grids written by the solver
//
// Cells are stored row-major, the row being the first index `i` (the real
// axis of the sampled plane) and the column `j` (the imaginary axis).

use std::ops::{Index, IndexMut};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    size : usize,
    cells : Vec<T>
}

impl<T : Clone> Grid<T> {
    pub fn new(size : usize, value : T) -> Grid<T> {
        Grid { size, cells : vec![value; size * size] }
    }

    pub fn fill(&mut self, value : T) {
        self.cells.fill(value);
    }
}

impl<T> Grid<T> {
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, i : usize, j : usize) -> Option<&T> {
        if i < self.size && j < self.size {
            self.cells.get(i * self.size + j)
        } else {
            None
        }
    }

    pub fn row(&self, i : usize) -> Option<&[T]> {
        if i < self.size {
            Some(&self.cells[i * self.size..(i + 1) * self.size])
        } else {
            None
        }
    }

    pub fn rows(&self) -> std::slice::Chunks<'_, T> {
        self.cells.chunks(self.size.max(1))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.cells.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.cells
    }

    pub fn into_vec(self) -> Vec<T> {
        self.cells
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (i, j) : (usize, usize)) -> &T {
        assert!(j < self.size, "column {} out of range for grid of size {}", j, self.size);
        &self.cells[i * self.size + j]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    fn index_mut(&mut self, (i, j) : (usize, usize)) -> &mut T {
        assert!(j < self.size, "column {} out of range for grid of size {}", j, self.size);
        &mut self.cells[i * self.size + j]
    }
}
