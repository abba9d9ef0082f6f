//! Run configuration and the end-to-end geometry-to-field-map pipeline.

use std::time::Instant;

use log::info;

use crate::constants::{
    DEFAULT_BAR_LENGTH, DEFAULT_CHARGE_COUNT, DEFAULT_HEIGHT, DEFAULT_INNER_RADIUS,
    DEFAULT_MAGNETIZATION, DEFAULT_OUTER_RADIUS,
};
use crate::errors::Result;
use crate::fields::{BarModel, CancelToken, FieldEvaluator, FieldMap, FieldModel, FieldSource};
use crate::geometry::MagnetGeometry;
use crate::grid::{Grid, GridSpec};
use crate::math::{R2, Scalar};

/// Everything needed to produce one field map.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Human-readable identifier.
    pub name: String,
    /// Magnet shape.
    pub geometry: MagnetGeometry,
    /// Uniform magnetization strength.
    pub magnetization: Scalar,
    /// Charges per rim for ring shapes. Ignored for bars.
    pub charge_count: usize,
    /// Closed-form model for bars. Ignored for rings.
    pub bar_model: BarModel,
    /// Sampling window.
    pub grid: GridSpec,
}

impl SimulationConfig {
    /// Configuration for an arbitrary geometry with default strength, discretization and grid.
    #[must_use]
    pub fn new(name: impl Into<String>, geometry: MagnetGeometry) -> Self {
        Self {
            name: name.into(),
            geometry,
            magnetization: DEFAULT_MAGNETIZATION,
            charge_count: DEFAULT_CHARGE_COUNT,
            bar_model: BarModel::default(),
            grid: GridSpec::default(),
        }
    }

    /// Rectangular bar with the given extent.
    #[must_use]
    pub fn rectangular_bar(name: impl Into<String>, length: Scalar, height: Scalar) -> Self {
        Self::new(name, MagnetGeometry::RectangularBar { length, height })
    }

    /// Solid ring with the given rim radius and height.
    #[must_use]
    pub fn solid_ring(name: impl Into<String>, outer_radius: Scalar, height: Scalar) -> Self {
        Self::new(name, MagnetGeometry::SolidRing { outer_radius, height })
    }

    /// Hollow ring with the given radii and height.
    #[must_use]
    pub fn hollow_ring(
        name: impl Into<String>,
        outer_radius: Scalar,
        inner_radius: Scalar,
        height: Scalar,
    ) -> Self {
        Self::new(name, MagnetGeometry::HollowRing { outer_radius, inner_radius, height })
    }

    /// The `10 x 4` reference bar.
    #[must_use]
    pub fn reference_bar() -> Self {
        Self::rectangular_bar("reference bar", DEFAULT_BAR_LENGTH, DEFAULT_HEIGHT)
    }

    /// The reference ring, radius `5`, height `4`.
    #[must_use]
    pub fn reference_solid_ring() -> Self {
        Self::solid_ring("reference solid ring", DEFAULT_OUTER_RADIUS, DEFAULT_HEIGHT)
    }

    /// The reference hollow ring, radii `5` and `4`, height `4`.
    #[must_use]
    pub fn reference_hollow_ring() -> Self {
        Self::hollow_ring(
            "reference hollow ring",
            DEFAULT_OUTER_RADIUS,
            DEFAULT_INNER_RADIUS,
            DEFAULT_HEIGHT,
        )
    }

    /// Overrides the magnetization.
    #[must_use]
    pub fn with_magnetization(mut self, magnetization: Scalar) -> Self {
        self.magnetization = magnetization;
        self
    }

    /// Overrides the rim discretization.
    #[must_use]
    pub fn with_charge_count(mut self, charge_count: usize) -> Self {
        self.charge_count = charge_count;
        self
    }

    /// Overrides the bar model.
    #[must_use]
    pub fn with_bar_model(mut self, bar_model: BarModel) -> Self {
        self.bar_model = bar_model;
        self
    }

    /// Overrides the sampling window.
    #[must_use]
    pub fn with_grid(mut self, grid: GridSpec) -> Self {
        self.grid = grid;
        self
    }
}

/// Validated, ready-to-run pipeline: the charge distribution and the grid are
/// built once at construction and shared read-only by every evaluation.
#[derive(Debug, Clone)]
pub struct FieldSimulation {
    config: SimulationConfig,
    evaluator: FieldEvaluator<FieldSource>,
    grid: Grid,
}

impl FieldSimulation {
    /// Validates `config` and builds the distribution and grid.
    ///
    /// Fails with `InvalidGeometry`, `InvalidConfig` or `InvalidGrid` before any
    /// evaluation happens.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        let source = FieldSource::from_geometry(
            &config.geometry,
            config.magnetization,
            config.charge_count,
            config.bar_model,
        )?;
        let grid = config.grid.build()?;
        Ok(Self { evaluator: FieldEvaluator::new(source), grid, config })
    }

    /// The configuration this run was built from.
    #[must_use]
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// The sampling grid.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The evaluator wrapping the charge distribution.
    #[must_use]
    pub const fn evaluator(&self) -> &FieldEvaluator<FieldSource> {
        &self.evaluator
    }

    /// Magnet boundary polylines for overlaying on the map.
    #[must_use]
    pub fn outline(&self, points_per_rim: usize) -> Vec<Vec<R2>> {
        self.config.geometry.outline(points_per_rim)
    }

    /// Evaluates the whole grid.
    #[must_use]
    pub fn run(&self) -> FieldMap {
        let started = Instant::now();
        let map = self.evaluator.evaluate(&self.grid);
        self.report(&map, started);
        map
    }

    /// Evaluates the whole grid, checking `cancel` between rows.
    pub fn run_with_cancel(&self, cancel: &CancelToken) -> Result<FieldMap> {
        let started = Instant::now();
        let map = self.evaluator.evaluate_with_cancel(&self.grid, cancel)?;
        self.report(&map, started);
        Ok(map)
    }

    fn report(&self, map: &FieldMap, started: Instant) {
        let (nx, nz) = map.shape();
        info!(
            "{}: {} on {nx}x{nz} cells in {:?}, {} singular",
            self.config.name,
            self.evaluator.model().label(),
            started.elapsed(),
            map.singular_count()
        );
    }
}
