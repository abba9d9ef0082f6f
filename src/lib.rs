#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::all, clippy::cargo, clippy::nursery, missing_docs)]
#![doc = include_str!("../README.md")]

/// Defaults and numerical tolerances.
pub mod constants;
/// Shared numerical primitives (scalar and vector aliases, log/arctan kernels).
pub mod math;
/// Magnet cross-section shapes.
pub mod geometry;
/// Charge distributions, closed-form models and grid evaluation.
pub mod fields;
/// Sampling grids.
pub mod grid;
/// Run configuration and the geometry-to-field-map pipeline.
pub mod simulation;
/// Exporters for external renderers.
pub mod io;
/// Error types shared between modules.
pub mod errors;

/// Common exports for downstream crates.
pub mod prelude;
