//! Regular sampling grids over the `(x, z)` cross-section.

use crate::constants::{DEFAULT_GRID_HALF_EXTENT, DEFAULT_GRID_RESOLUTION};
use crate::errors::{PoleFieldError, Result};
use crate::math::{FieldArray, R2, Scalar};

/// Generates `n` linearly spaced samples in [start, stop].
#[must_use]
pub fn linspace(start: Scalar, stop: Scalar, n: usize) -> Vec<Scalar> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n as Scalar - 1.0);
            (0..n).map(|i| start + step * i as Scalar).collect()
        }
    }
}

/// Bounds and resolution of a uniform grid.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    /// Lower `x` bound.
    pub x_min: Scalar,
    /// Upper `x` bound.
    pub x_max: Scalar,
    /// Lower `z` bound.
    pub z_min: Scalar,
    /// Upper `z` bound.
    pub z_max: Scalar,
    /// Samples along `x`.
    pub nx: usize,
    /// Samples along `z`.
    pub nz: usize,
}

impl GridSpec {
    /// Square window `[-half_extent, half_extent]^2` with `n` samples per axis.
    #[must_use]
    pub fn square(half_extent: Scalar, n: usize) -> Self {
        Self {
            x_min: -half_extent,
            x_max: half_extent,
            z_min: -half_extent,
            z_max: half_extent,
            nx: n,
            nz: n,
        }
    }

    /// Materializes the grid, validating bounds and resolution.
    pub fn build(&self) -> Result<Grid> {
        check_axis("x", self.x_min, self.x_max, self.nx)?;
        check_axis("z", self.z_min, self.z_max, self.nz)?;
        Grid::from_axes(
            linspace(self.x_min, self.x_max, self.nx),
            linspace(self.z_min, self.z_max, self.nz),
        )
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self::square(DEFAULT_GRID_HALF_EXTENT, DEFAULT_GRID_RESOLUTION)
    }
}

fn check_axis(name: &str, min: Scalar, max: Scalar, n: usize) -> Result<()> {
    if n == 0 {
        return Err(PoleFieldError::InvalidGrid(format!("{name} resolution must be at least 1")));
    }
    if !(min.is_finite() && max.is_finite()) {
        return Err(PoleFieldError::InvalidGrid(format!("{name} bounds must be finite")));
    }
    if n > 1 && min >= max {
        return Err(PoleFieldError::InvalidGrid(format!(
            "{name} bounds [{min}, {max}] must be increasing"
        )));
    }
    Ok(())
}

/// Tensor-product grid of sample coordinates `(x_i, z_j)`.
///
/// Deserialization goes through [`Grid::from_axes`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "GridAxes"))]
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    xs: Vec<Scalar>,
    zs: Vec<Scalar>,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct GridAxes {
    xs: Vec<Scalar>,
    zs: Vec<Scalar>,
}

#[cfg(feature = "serde")]
impl TryFrom<GridAxes> for Grid {
    type Error = PoleFieldError;

    fn try_from(axes: GridAxes) -> Result<Self> {
        Self::from_axes(axes.xs, axes.zs)
    }
}

impl Grid {
    /// Builds a grid from explicit axes. Both must be non-empty and finite.
    pub fn from_axes(xs: Vec<Scalar>, zs: Vec<Scalar>) -> Result<Self> {
        for (name, axis) in [("x", &xs), ("z", &zs)] {
            if axis.is_empty() {
                return Err(PoleFieldError::InvalidGrid(format!("{name} axis is empty")));
            }
            if axis.iter().any(|v| !v.is_finite()) {
                return Err(PoleFieldError::InvalidGrid(format!("{name} axis has non-finite values")));
            }
        }
        Ok(Self { xs, zs })
    }

    /// `x` coordinates.
    #[must_use]
    pub fn xs(&self) -> &[Scalar] {
        &self.xs
    }

    /// `z` coordinates.
    #[must_use]
    pub fn zs(&self) -> &[Scalar] {
        &self.zs
    }

    /// Samples along `x`.
    #[must_use]
    pub fn nx(&self) -> usize {
        self.xs.len()
    }

    /// Samples along `z`.
    #[must_use]
    pub fn nz(&self) -> usize {
        self.zs.len()
    }

    /// `(nx, nz)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.nx(), self.nz())
    }

    /// Total number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nx() * self.nz()
    }

    /// Always `false` for a validated grid.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Coordinates of cell `(i, j)`.
    ///
    /// # Panics
    /// When `i >= nx` or `j >= nz`.
    #[must_use]
    pub fn coordinate(&self, i: usize, j: usize) -> R2 {
        R2::new(self.xs[i], self.zs[j])
    }

    /// `X` and `Z` coordinate arrays, each `nx x nz`.
    #[must_use]
    pub fn meshgrid(&self) -> (FieldArray, FieldArray) {
        let (nx, nz) = self.shape();
        (
            FieldArray::from_fn(nx, nz, |i, _| self.xs[i]),
            FieldArray::from_fn(nx, nz, |_, j| self.zs[j]),
        )
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn linspace_basic() {
        let v = linspace(0.0, 1.0, 5);
        assert_eq!(v, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace(3.0, 9.0, 1), vec![3.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn default_spec_matches_reference_window() {
        let grid = GridSpec::default().build().unwrap();
        assert_eq!(grid.shape(), (100, 100));
        assert_eq!(grid.xs()[0], -15.0);
        assert_relative_eq!(grid.zs()[99], 15.0, epsilon = 1.0e-12);
    }

    #[test]
    fn meshgrid_is_indexed_by_cell() {
        let grid = GridSpec { x_min: 0.0, x_max: 2.0, z_min: -1.0, z_max: 1.0, nx: 3, nz: 2 }
            .build()
            .unwrap();
        let (x, z) = grid.meshgrid();
        assert_eq!(x.shape(), (3, 2));
        assert_eq!(x[(2, 0)], 2.0);
        assert_eq!(z[(2, 1)], 1.0);
        assert_eq!(grid.coordinate(1, 0), R2::new(1.0, -1.0));
    }

    #[test]
    fn invalid_specs_are_rejected() {
        let mut spec = GridSpec::default();
        spec.nx = 0;
        assert!(matches!(spec.build(), Err(PoleFieldError::InvalidGrid(_))));
        let inverted = GridSpec { x_min: 1.0, x_max: -1.0, ..GridSpec::default() };
        assert!(inverted.build().is_err());
        assert!(Grid::from_axes(vec![0.0, Scalar::NAN], vec![0.0]).is_err());
        assert!(Grid::from_axes(vec![Scalar::INFINITY], vec![0.0]).is_err());
        assert!(Grid::from_axes(vec![1.0], Vec::new()).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialization_validates_axes() {
        let grid: Grid = serde_json::from_str(r#"{"xs":[0.0,1.0],"zs":[2.0]}"#).unwrap();
        assert_eq!(grid.shape(), (2, 1));
        assert_eq!(serde_json::from_str::<Grid>(&serde_json::to_string(&grid).unwrap()).unwrap(), grid);

        let empty = serde_json::from_str::<Grid>(r#"{"xs":[1.0],"zs":[]}"#).unwrap_err();
        assert!(empty.to_string().contains("z axis is empty"), "{empty}");
    }
}
