use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, warn};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::errors::{PoleFieldError, Result};
use crate::geometry::MagnetGeometry;
use crate::grid::Grid;
use crate::math::{R2, Scalar};

use super::charges::ChargeSet;
use super::closed_form::{BarField, LineChargePair};
use super::map::FieldMap;
use super::sample::FieldSample;

/// Anything that yields `(Bx, Bz, V)` at a point.
pub trait FieldModel {
    /// Field at `point`, or [`PoleFieldError::Singularity`] when `point` is a pole.
    fn field_at(&self, point: R2) -> Result<FieldSample>;

    /// Short human-readable name.
    fn label(&self) -> &'static str;
}

impl FieldModel for BarField {
    fn field_at(&self, point: R2) -> Result<FieldSample> {
        Self::field_at(self, point)
    }

    fn label(&self) -> &'static str {
        "rectangular bar (corner model)"
    }
}

impl FieldModel for LineChargePair {
    fn field_at(&self, point: R2) -> Result<FieldSample> {
        Self::field_at(self, point)
    }

    fn label(&self) -> &'static str {
        "rectangular bar (two-pole model)"
    }
}

impl FieldModel for ChargeSet {
    fn field_at(&self, point: R2) -> Result<FieldSample> {
        Self::field_at(self, point)
    }

    fn label(&self) -> &'static str {
        "discretized charge set"
    }
}

/// Closed-form model used for rectangular bars.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BarModel {
    /// Exact integral over both faces.
    #[default]
    Corners,
    /// Two line charges at `z = +-H/2`, with `Bx = 0`.
    LineCharges,
}

/// Charge distribution derived from a magnet geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldSource {
    /// Closed-form bar faces.
    Bar(BarField),
    /// Two-pole bar simplification.
    LinePair(LineChargePair),
    /// Discretized rims (or any balanced charge set).
    Charges(ChargeSet),
}

impl FieldSource {
    /// Builds the distribution for `geometry`.
    ///
    /// `charge_count` is ignored for bars and must be at least 1 for rings.
    pub fn from_geometry(
        geometry: &MagnetGeometry,
        magnetization: Scalar,
        charge_count: usize,
        bar_model: BarModel,
    ) -> Result<Self> {
        match (geometry, bar_model) {
            (MagnetGeometry::RectangularBar { .. }, BarModel::Corners) => {
                BarField::new(geometry, magnetization).map(Self::Bar)
            }
            (MagnetGeometry::RectangularBar { .. }, BarModel::LineCharges) => {
                LineChargePair::new(geometry, magnetization).map(Self::LinePair)
            }
            _ => ChargeSet::ring(geometry, magnetization, charge_count).map(Self::Charges),
        }
    }
}

impl FieldModel for FieldSource {
    fn field_at(&self, point: R2) -> Result<FieldSample> {
        match self {
            Self::Bar(m) => m.field_at(point),
            Self::LinePair(m) => m.field_at(point),
            Self::Charges(m) => m.field_at(point),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Bar(m) => m.label(),
            Self::LinePair(m) => m.label(),
            Self::Charges(m) => m.label(),
        }
    }
}

impl From<ChargeSet> for FieldSource {
    fn from(set: ChargeSet) -> Self {
        Self::Charges(set)
    }
}

/// Cooperative cancellation flag shared between a caller and a running evaluation.
///
/// Checked before each grid row.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates an untripped token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// `true` once [`cancel`](Self::cancel) has been called on any clone.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Evaluates a [`FieldModel`] over a grid.
///
/// Each cell is computed independently from the shared, read-only model and
/// written once. Rows (fixed `x_i`) are distributed over the rayon pool when
/// the `parallel` feature is on. Within a cell the summation order never
/// changes, so serial and parallel runs produce identical bits.
#[derive(Debug, Clone)]
pub struct FieldEvaluator<M = FieldSource> {
    model: M,
}

impl<M: FieldModel + Sync> FieldEvaluator<M> {
    /// Wraps a model.
    #[must_use]
    pub const fn new(model: M) -> Self {
        Self { model }
    }

    /// The wrapped model.
    #[must_use]
    pub const fn model(&self) -> &M {
        &self.model
    }

    /// Field at a single point.
    pub fn field_at(&self, point: R2) -> Result<FieldSample> {
        self.model.field_at(point)
    }

    /// Evaluates every cell. Singular cells become NaN and are listed in the map.
    #[must_use]
    pub fn evaluate(&self, grid: &Grid) -> FieldMap {
        let (samples, rows) = self.fill(grid, None, PARALLEL);
        self.finish(grid, &samples, rows.into_iter().flatten().flatten().collect())
    }

    /// Like [`evaluate`](Self::evaluate), but stops early with
    /// [`PoleFieldError::Cancelled`] once `cancel` trips.
    pub fn evaluate_with_cancel(&self, grid: &Grid, cancel: &CancelToken) -> Result<FieldMap> {
        self.checked(grid, Some(cancel), PARALLEL)
    }

    /// Single-threaded evaluation, regardless of features.
    pub fn evaluate_serial(&self, grid: &Grid, cancel: Option<&CancelToken>) -> Result<FieldMap> {
        self.checked(grid, cancel, false)
    }

    fn checked(&self, grid: &Grid, cancel: Option<&CancelToken>, parallel: bool) -> Result<FieldMap> {
        let (samples, rows) = self.fill(grid, cancel, parallel);
        let rows: Vec<Vec<(usize, usize)>> =
            rows.into_iter().collect::<Option<_>>().ok_or(PoleFieldError::Cancelled)?;
        Ok(self.finish(grid, &samples, rows.into_iter().flatten().collect()))
    }

    fn fill(
        &self,
        grid: &Grid,
        cancel: Option<&CancelToken>,
        parallel: bool,
    ) -> (Vec<FieldSample>, Vec<Option<Vec<(usize, usize)>>>) {
        let (nx, nz) = grid.shape();
        debug!("evaluating {} on a {nx}x{nz} grid", self.model.label());
        let mut samples = vec![FieldSample::ZERO; nx * nz];
        let rows = map_rows(&mut samples, nz, parallel, |(i, row)| self.fill_row(grid, i, row, cancel));
        (samples, rows)
    }

    fn finish(&self, grid: &Grid, samples: &[FieldSample], singular_cells: Vec<(usize, usize)>) -> FieldMap {
        if !singular_cells.is_empty() {
            warn!(
                "{} of {} cells coincide with a pole of the {} and were set to NaN",
                singular_cells.len(),
                samples.len(),
                self.model.label()
            );
        }
        FieldMap::from_samples(grid.clone(), samples, singular_cells)
    }

    /// Fills row `i`. Returns the singular cells of the row, or `None` when cancelled.
    fn fill_row(
        &self,
        grid: &Grid,
        i: usize,
        row: &mut [FieldSample],
        cancel: Option<&CancelToken>,
    ) -> Option<Vec<(usize, usize)>> {
        if cancel.is_some_and(CancelToken::is_cancelled) {
            return None;
        }
        let mut singular = Vec::new();
        for (j, slot) in row.iter_mut().enumerate() {
            *slot = match self.model.field_at(grid.coordinate(i, j)) {
                Ok(sample) => sample,
                Err(_) => {
                    singular.push((i, j));
                    FieldSample::SINGULAR
                }
            };
        }
        Some(singular)
    }
}

const PARALLEL: bool = cfg!(feature = "parallel");

#[cfg(feature = "parallel")]
fn map_rows<F, T>(samples: &mut [FieldSample], nz: usize, parallel: bool, f: F) -> Vec<T>
where
    F: Fn((usize, &mut [FieldSample])) -> T + Send + Sync,
    T: Send,
{
    if parallel {
        samples.par_chunks_mut(nz).enumerate().map(f).collect()
    } else {
        samples.chunks_mut(nz).enumerate().map(f).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn map_rows<F, T>(samples: &mut [FieldSample], nz: usize, _parallel: bool, f: F) -> Vec<T>
where
    F: Fn((usize, &mut [FieldSample])) -> T,
{
    samples.chunks_mut(nz).enumerate().map(f).collect()
}
