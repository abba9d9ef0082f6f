//! Exact field models that need no charge discretization.

use crate::errors::{PoleFieldError, Result};
use crate::geometry::{Corner, MagnetGeometry};
use crate::math::{log_distance, sheet_potential_primitive, R2, Scalar};

use super::charges::validate_magnetization;
use super::sample::FieldSample;

/// Rectangular bar with uniformly charged north (`z = +H/2`) and south
/// (`z = -H/2`) faces, integrated exactly over each face.
///
/// Each corner `c` with offset `(dx, dz)` from the field point and sign `s`
/// contributes
///
/// ```text
/// Bx += s ln r
/// Bz += s atan(dx / dz)
/// V  += s (dx ln r - dx + dz atan(dx / dz))
/// ```
///
/// which is the face integral of the point-charge kernel in
/// [`Charge::field_at`](super::Charge::field_at).
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct BarField {
    corners: [Corner; 4],
    magnetization: Scalar,
}

impl BarField {
    /// Builds the corner model for a rectangular bar.
    pub fn new(geometry: &MagnetGeometry, magnetization: Scalar) -> Result<Self> {
        geometry.validate()?;
        validate_magnetization(magnetization)?;
        let corners = geometry.corners().ok_or_else(|| {
            PoleFieldError::InvalidGeometry("corner model requires a rectangular bar".into())
        })?;
        Ok(Self { corners, magnetization })
    }

    /// Signed corners in evaluation order.
    #[must_use]
    pub const fn corners(&self) -> &[Corner; 4] {
        &self.corners
    }

    /// Field at `point`. Fails only when `point` is exactly a corner.
    pub fn field_at(&self, point: R2) -> Result<FieldSample> {
        let mut acc = FieldSample::ZERO;
        for corner in &self.corners {
            let dx = point.x - corner.position.x;
            let dz = point.y - corner.position.y;
            if dx == 0.0 && dz == 0.0 {
                return Err(PoleFieldError::Singularity { x: point.x, z: point.y });
            }
            let s = corner.sign;
            acc.bx += s * log_distance(dx, dz);
            acc.bz += s * (dx / dz).atan();
            acc.v += s * sheet_potential_primitive(dx, dz);
        }
        Ok(acc.scaled(self.magnetization))
    }
}

/// Two-pole simplification of the bar: line charges `+M` at `(0, +H/2)` and
/// `-M` at `(0, -H/2)`, ignoring the `x` extent. `Bx` is identically zero.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct LineChargePair {
    half_height: Scalar,
    magnetization: Scalar,
}

impl LineChargePair {
    /// Builds the two-pole model from the bar height.
    pub fn new(geometry: &MagnetGeometry, magnetization: Scalar) -> Result<Self> {
        geometry.validate()?;
        validate_magnetization(magnetization)?;
        if geometry.is_ring() {
            return Err(PoleFieldError::InvalidGeometry(
                "line-charge model requires a rectangular bar".into(),
            ));
        }
        Ok(Self { half_height: 0.5 * geometry.height(), magnetization })
    }

    /// Pole positions, north first.
    #[must_use]
    pub fn poles(&self) -> [R2; 2] {
        [R2::new(0.0, self.half_height), R2::new(0.0, -self.half_height)]
    }

    /// Field at `point`. Fails when `point` is exactly a pole.
    pub fn field_at(&self, point: R2) -> Result<FieldSample> {
        let dz_north = point.y - self.half_height;
        let dz_south = point.y + self.half_height;
        let x2 = point.x * point.x;
        let r2_north = x2 + dz_north * dz_north;
        let r2_south = x2 + dz_south * dz_south;
        if r2_north == 0.0 || r2_south == 0.0 {
            return Err(PoleFieldError::Singularity { x: point.x, z: point.y });
        }
        let m = self.magnetization;
        Ok(FieldSample::new(
            0.0,
            m * (dz_north / r2_north - dz_south / r2_south),
            m * (log_distance(point.x, dz_north) - log_distance(point.x, dz_south)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::fields::charges::ChargeSet;

    fn bar() -> BarField {
        BarField::new(&MagnetGeometry::rectangular_bar(10.0, 4.0).unwrap(), 1.0).unwrap()
    }

    #[test]
    fn centre_of_reference_bar() {
        let f = bar().field_at(R2::new(0.0, 0.0)).unwrap();
        assert_eq!(f.bx, 0.0);
        assert_relative_eq!(f.bz, -4.0 * 2.5_f64.atan(), epsilon = 1.0e-12);
        assert!(f.v.is_finite());
        assert!(f.v.abs() < 1.0e-12);
    }

    #[test]
    fn bx_vanishes_on_the_symmetry_axis() {
        let b = bar();
        for z in [-20.0, -2.0, -0.3, 0.0, 1.7, 2.0, 9.5] {
            assert_eq!(b.field_at(R2::new(0.0, z)).unwrap().bx, 0.0, "z = {z}");
        }
    }

    #[test]
    fn mirror_symmetry_about_x() {
        let b = bar();
        for &(x, z) in &[(1.0, 0.5), (4.0, 3.0), (7.5, -2.0), (12.0, 8.0), (5.0, 0.0)] {
            let right = b.field_at(R2::new(x, z)).unwrap();
            let left = b.field_at(R2::new(-x, z)).unwrap();
            assert_relative_eq!(left.v, right.v, epsilon = 1.0e-10);
            assert_relative_eq!(left.bz, right.bz, epsilon = 1.0e-12);
            assert_relative_eq!(left.bx, -right.bx, epsilon = 1.0e-12);
        }
    }

    #[test]
    fn field_is_gradient_of_potential() {
        let b = bar();
        let h = 1.0e-5;
        for &(x, z) in &[(8.0, 5.0), (-3.0, 6.0), (12.0, -1.0)] {
            let f = b.field_at(R2::new(x, z)).unwrap();
            let dv_dx = (b.field_at(R2::new(x + h, z)).unwrap().v - b.field_at(R2::new(x - h, z)).unwrap().v)
                / (2.0 * h);
            let dv_dz = (b.field_at(R2::new(x, z + h)).unwrap().v - b.field_at(R2::new(x, z - h)).unwrap().v)
                / (2.0 * h);
            assert_relative_eq!(f.bx, dv_dx, epsilon = 1.0e-6);
            assert_relative_eq!(f.bz, dv_dz, epsilon = 1.0e-6);
        }
    }

    #[test]
    fn corners_are_singular() {
        let b = bar();
        for corner in b.corners() {
            assert!(b.field_at(corner.position).is_err(), "{corner:?}");
        }
        assert!(matches!(
            b.field_at(R2::new(5.0, -2.0)),
            Err(PoleFieldError::Singularity { .. })
        ));
        assert!(b.field_at(R2::new(5.0, -2.0 + 1.0e-9)).is_ok());
    }

    #[test]
    fn discretized_faces_converge_to_closed_form() {
        let exact = bar().field_at(R2::new(3.0, 7.0)).unwrap();
        let error = |k: usize| {
            let s = ChargeSet::discretized_bar(10.0, 4.0, 1.0, k).unwrap();
            let f = s.field_at(R2::new(3.0, 7.0)).unwrap();
            (f.bx - exact.bx).hypot(f.bz - exact.bz)
        };
        let (coarse, fine) = (error(10), error(400));
        assert!(fine < coarse);
        assert!(fine < 1.0e-4, "fine error {fine}");
    }

    #[test]
    fn line_pair_has_no_x_component() {
        let geometry = MagnetGeometry::rectangular_bar(10.0, 4.0).unwrap();
        let pair = LineChargePair::new(&geometry, 1.0).unwrap();
        let f = pair.field_at(R2::new(3.0, 1.0)).unwrap();
        assert_eq!(f.bx, 0.0);
        assert_relative_eq!(f.bz, -1.0 / 10.0 - 3.0 / 18.0, epsilon = 1.0e-14);
        for pole in pair.poles() {
            assert!(matches!(pair.field_at(pole), Err(PoleFieldError::Singularity { .. })));
        }
        assert_eq!(pair.poles()[0], R2::new(0.0, 2.0));
        assert!(LineChargePair::new(&MagnetGeometry::solid_ring(5.0, 4.0).unwrap(), 1.0).is_err());
    }
}
