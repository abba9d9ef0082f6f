//! Convenience re-exports for building field maps.

pub use crate::constants::*;
pub use crate::errors::{PoleFieldError, Result};
pub use crate::fields::{
    BarField, BarModel, CancelToken, Charge, ChargeSet, FieldEvaluator, FieldMap, FieldModel,
    FieldSample, FieldSource, LineChargePair,
};
pub use crate::geometry::{Corner, MagnetGeometry, RimSample};
pub use crate::grid::{linspace, Grid, GridSpec};
pub use crate::io::{write_field_csv, write_vtk_rectilinear};
pub use crate::math::{FieldArray, R2, Scalar};
pub use crate::simulation::{FieldSimulation, SimulationConfig};
