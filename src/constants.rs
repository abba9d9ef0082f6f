//! Defaults and tolerances shared across the crate.
//!
//! The default run reproduces the reference setup: a `10 x 4` bar, a ring of
//! outer radius `5`, inner radius `4` and height `4`, unit magnetization,
//! `1000` rim charges and a `100 x 100` grid over `[-15, 15]^2`.

use crate::math::Scalar;

/// Absolute bound on the net magnetic charge of any constructed set.
pub const NET_CHARGE_TOLERANCE: Scalar = 1.0e-9;

/// Number of point charges per rim used when none is given.
pub const DEFAULT_CHARGE_COUNT: usize = 1000;

/// Unit magnetization.
pub const DEFAULT_MAGNETIZATION: Scalar = 1.0;

/// Half-width of the default square sampling window.
pub const DEFAULT_GRID_HALF_EXTENT: Scalar = 15.0;

/// Points per axis on the default sampling grid.
pub const DEFAULT_GRID_RESOLUTION: usize = 100;

/// Default bar length along `x`.
pub const DEFAULT_BAR_LENGTH: Scalar = 10.0;
/// Default bar and ring height along `z`.
pub const DEFAULT_HEIGHT: Scalar = 4.0;
/// Default ring outer radius.
pub const DEFAULT_OUTER_RADIUS: Scalar = 5.0;
/// Default ring inner radius.
pub const DEFAULT_INNER_RADIUS: Scalar = 4.0;

/// Returns `true` when `value` is a usable positive length or strength.
#[inline]
#[must_use]
pub fn is_positive_finite(value: Scalar) -> bool {
    value.is_finite() && value > 0.0
}
