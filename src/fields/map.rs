use crate::grid::Grid;
use crate::math::{FieldArray, R2};

use super::sample::FieldSample;

/// Evaluated field over a grid: three `nx x nz` arrays plus the cells that
/// hit a pole.
///
/// Singular cells hold NaN in all three arrays.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMap {
    /// Sample coordinates, passed through for the renderer.
    pub grid: Grid,
    /// `Bx` per cell.
    pub bx: FieldArray,
    /// `Bz` per cell.
    pub bz: FieldArray,
    /// Scalar potential per cell.
    pub v: FieldArray,
    /// `(i, j)` of every singular cell, in row order.
    pub singular_cells: Vec<(usize, usize)>,
}

impl FieldMap {
    pub(crate) fn from_samples(grid: Grid, samples: &[FieldSample], singular_cells: Vec<(usize, usize)>) -> Self {
        let (nx, nz) = grid.shape();
        let at = |i: usize, j: usize| samples[i * nz + j];
        Self {
            bx: FieldArray::from_fn(nx, nz, |i, j| at(i, j).bx),
            bz: FieldArray::from_fn(nx, nz, |i, j| at(i, j).bz),
            v: FieldArray::from_fn(nx, nz, |i, j| at(i, j).v),
            grid,
            singular_cells,
        }
    }

    /// `(nx, nz)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        self.grid.shape()
    }

    /// Values at cell `(i, j)`.
    ///
    /// # Panics
    /// When the index is out of range.
    #[must_use]
    pub fn sample(&self, i: usize, j: usize) -> FieldSample {
        FieldSample::new(self.bx[(i, j)], self.bz[(i, j)], self.v[(i, j)])
    }

    /// Number of cells that coincided with a pole.
    #[must_use]
    pub fn singular_count(&self) -> usize {
        self.singular_cells.len()
    }

    /// `|B|` per cell.
    #[must_use]
    pub fn magnitude(&self) -> FieldArray {
        self.bx.zip_map(&self.bz, |bx, bz| bx.hypot(bz))
    }

    /// Every cell as `((i, j), coordinate, sample)`, `j` varying fastest.
    pub fn cells(&self) -> impl Iterator<Item = ((usize, usize), R2, FieldSample)> + '_ {
        let (nx, nz) = self.shape();
        (0..nx).flat_map(move |i| {
            (0..nz).map(move |j| ((i, j), self.grid.coordinate(i, j), self.sample(i, j)))
        })
    }
}
