//! Pole-model field sources and grid evaluation.

mod charges;
mod closed_form;
mod evaluator;
mod map;
mod sample;

pub use charges::{Charge, ChargeSet};
pub use closed_form::{BarField, LineChargePair};
pub use evaluator::{BarModel, CancelToken, FieldEvaluator, FieldModel, FieldSource};
pub use map::FieldMap;
pub use sample::FieldSample;
