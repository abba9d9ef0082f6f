//! Shared numerical primitives anchored on `nalgebra`.

use nalgebra::{DMatrix, Vector2};

/// Primary scalar type used across the crate.
pub type Scalar = f64;
/// Point or offset in the `(x, z)` cross-section plane.
pub type R2 = Vector2<Scalar>;
/// Dense `Nx x Nz` array of per-cell values, indexed `[(i, j)]`.
pub type FieldArray = DMatrix<Scalar>;

/// Natural log of the planar distance `sqrt(dx^2 + dz^2)`.
///
/// Written as `0.5 * ln(r^2)` so no square root is taken.
#[inline]
#[must_use]
pub fn log_distance(dx: Scalar, dz: Scalar) -> Scalar {
    0.5 * (dx * dx + dz * dz).ln()
}

/// Primitive of the face-sheet potential along the sheet direction:
/// `u ln(r) - u + w atan(u / w)` with `r = sqrt(u^2 + w^2)`.
///
/// For `w == 0` the arctangent term vanishes and `u ln|u| - u` remains.
#[inline]
#[must_use]
pub fn sheet_potential_primitive(u: Scalar, w: Scalar) -> Scalar {
    let along = u * log_distance(u, w) - u;
    if w == 0.0 {
        along
    } else {
        along + w * (u / w).atan()
    }
}

/// Kahan-compensated sum in iteration order.
#[must_use]
pub fn compensated_sum<I>(values: I) -> Scalar
where
    I: IntoIterator<Item = Scalar>,
{
    let mut sum = 0.0;
    let mut carry = 0.0;
    for v in values {
        let y = v - carry;
        let t = sum + y;
        carry = (t - sum) - y;
        sum = t;
    }
    sum
}
