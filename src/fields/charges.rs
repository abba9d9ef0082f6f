use std::f64::consts::TAU;

use log::debug;

use crate::constants::{is_positive_finite, NET_CHARGE_TOLERANCE};
use crate::errors::{PoleFieldError, Result};
use crate::geometry::MagnetGeometry;
use crate::math::{compensated_sum, log_distance, R2, Scalar};

use super::sample::FieldSample;

/// Point magnetic charge (pole) in the cross-section plane.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Charge {
    /// Location of the pole.
    pub position: R2,
    /// Signed strength; positive for north, negative for south.
    pub magnitude: Scalar,
}

impl Charge {
    /// Creates a charge at `(x, z)`.
    #[must_use]
    pub fn new(x: Scalar, z: Scalar, magnitude: Scalar) -> Self {
        Self { position: R2::new(x, z), magnitude }
    }

    /// Contribution of this charge at `point` under the planar inverse-distance law.
    ///
    /// `Bx = m dx / r^2`, `Bz = m dz / r^2`, `V = m ln r`.
    pub fn field_at(&self, point: R2) -> Result<FieldSample> {
        let dx = point.x - self.position.x;
        let dz = point.y - self.position.y;
        let r2 = dx * dx + dz * dz;
        if r2 == 0.0 {
            return Err(PoleFieldError::Singularity { x: point.x, z: point.y });
        }
        let m = self.magnitude;
        Ok(FieldSample::new(m * dx / r2, m * dz / r2, m * log_distance(dx, dz)))
    }
}

pub(crate) fn validate_magnetization(magnetization: Scalar) -> Result<()> {
    if is_positive_finite(magnetization) {
        Ok(())
    } else {
        Err(PoleFieldError::InvalidConfig(format!(
            "magnetization must be positive and finite, got {magnetization}"
        )))
    }
}

/// Ordered, immutable set of poles whose magnitudes sum to zero.
///
/// The order is fixed at construction and every evaluation walks it front to
/// back, so repeated runs accumulate identically.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ChargeSet {
    charges: Vec<Charge>,
}

impl ChargeSet {
    /// Builds and validates a set from explicit charges.
    pub fn from_charges(charges: Vec<Charge>) -> Result<Self> {
        if charges.is_empty() {
            return Err(PoleFieldError::InvalidGeometry("charge set is empty".into()));
        }
        if let Some(bad) = charges
            .iter()
            .find(|c| !(c.magnitude.is_finite() && c.position.x.is_finite() && c.position.y.is_finite()))
        {
            return Err(PoleFieldError::InvalidGeometry(format!("non-finite charge {bad:?}")));
        }
        let set = Self { charges };
        let net = set.net_charge();
        if net.abs() > NET_CHARGE_TOLERANCE {
            return Err(PoleFieldError::InvalidGeometry(format!(
                "net magnetic charge {net:e} exceeds tolerance {NET_CHARGE_TOLERANCE:e}"
            )));
        }
        Ok(set)
    }

    /// Discretizes the rim(s) of a ring magnet into `charge_count` angular steps.
    ///
    /// Step `k` sits at `angle = 2 pi k / K` and emits the outer north/south pair
    /// `+-M/K` at `rim +- H/2`, then for hollow rings the inner pair with the
    /// signs reversed.
    pub fn ring(geometry: &MagnetGeometry, magnetization: Scalar, charge_count: usize) -> Result<Self> {
        geometry.validate()?;
        validate_magnetization(magnetization)?;
        if !geometry.is_ring() {
            return Err(PoleFieldError::InvalidGeometry(
                "rectangular bars use the closed-form corner model, not rim charges".into(),
            ));
        }
        if charge_count == 0 {
            return Err(PoleFieldError::InvalidGeometry("charge count must be at least 1".into()));
        }

        let half = R2::new(0.0, 0.5 * geometry.height());
        let q = magnetization / charge_count as Scalar;
        let per_step = if matches!(geometry, MagnetGeometry::HollowRing { .. }) { 4 } else { 2 };
        let mut charges = Vec::with_capacity(per_step * charge_count);
        for k in 0..charge_count {
            let angle = TAU * k as Scalar / charge_count as Scalar;
            let Some(rim) = geometry.rim(angle) else { continue };
            charges.push(Charge { position: rim.outer + half, magnitude: q });
            charges.push(Charge { position: rim.outer - half, magnitude: -q });
            if let Some(inner) = rim.inner {
                charges.push(Charge { position: inner + half, magnitude: -q });
                charges.push(Charge { position: inner - half, magnitude: q });
            }
        }
        debug!("discretized {geometry:?} into {} charges", charges.len());
        Self::from_charges(charges)
    }

    /// Splits each face of a rectangular bar into `charge_count` midpoint poles
    /// of strength `+-M L / K`.
    ///
    /// This converges to the closed-form bar model as `charge_count` grows.
    pub fn discretized_bar(
        length: Scalar,
        height: Scalar,
        magnetization: Scalar,
        charge_count: usize,
    ) -> Result<Self> {
        MagnetGeometry::rectangular_bar(length, height)?;
        validate_magnetization(magnetization)?;
        if charge_count == 0 {
            return Err(PoleFieldError::InvalidGeometry("charge count must be at least 1".into()));
        }
        let step = length / charge_count as Scalar;
        let q = magnetization * step;
        let (a, b) = (0.5 * length, 0.5 * height);
        let charges = (0..charge_count)
            .flat_map(|k| {
                let x = -a + (k as Scalar + 0.5) * step;
                [Charge::new(x, b, q), Charge::new(x, -b, -q)]
            })
            .collect();
        Self::from_charges(charges)
    }

    /// Charges in evaluation order.
    #[must_use]
    pub fn charges(&self) -> &[Charge] {
        &self.charges
    }

    /// Iterator over charges in evaluation order.
    pub fn iter(&self) -> std::slice::Iter<'_, Charge> {
        self.charges.iter()
    }

    /// Number of charges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.charges.len()
    }

    /// Always `false` for a validated set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.charges.is_empty()
    }

    /// Signed sum of magnitudes.
    #[must_use]
    pub fn net_charge(&self) -> Scalar {
        compensated_sum(self.charges.iter().map(|c| c.magnitude))
    }

    /// Sum of absolute magnitudes.
    #[must_use]
    pub fn total_absolute_charge(&self) -> Scalar {
        compensated_sum(self.charges.iter().map(|c| c.magnitude.abs()))
    }

    /// Field at `point`, accumulated over the set in order.
    pub fn field_at(&self, point: R2) -> Result<FieldSample> {
        let mut acc = FieldSample::ZERO;
        for charge in &self.charges {
            acc += charge.field_at(point)?;
        }
        Ok(acc)
    }
}

impl<'a> IntoIterator for &'a ChargeSet {
    type Item = &'a Charge;
    type IntoIter = std::slice::Iter<'a, Charge>;

    fn into_iter(self) -> Self::IntoIter {
        self.charges.iter()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn solid() -> MagnetGeometry {
        MagnetGeometry::solid_ring(5.0, 4.0).unwrap()
    }

    fn hollow() -> MagnetGeometry {
        MagnetGeometry::hollow_ring(5.0, 4.0, 4.0).unwrap()
    }

    #[test]
    fn ring_sets_have_zero_net_charge() {
        for k in [1, 7, 100, 1000] {
            let s = ChargeSet::ring(&solid(), 1.0, k).unwrap();
            assert_eq!(s.len(), 2 * k);
            assert!(s.net_charge().abs() <= 1.0e-9);
            let h = ChargeSet::ring(&hollow(), 2.5, k).unwrap();
            assert_eq!(h.len(), 4 * k);
            assert!(h.net_charge().abs() <= 1.0e-9);
        }
    }

    #[test]
    fn ring_charges_follow_angle_order() {
        let s = ChargeSet::ring(&solid(), 1.0, 4).unwrap();
        let c = s.charges();
        assert_relative_eq!(c[0].position, R2::new(5.0, 2.0), epsilon = 1.0e-12);
        assert_relative_eq!(c[1].position, R2::new(5.0, -2.0), epsilon = 1.0e-12);
        assert_relative_eq!(c[2].position, R2::new(0.0, 7.0), epsilon = 1.0e-12);
        assert_eq!(c[0].magnitude, 0.25);
        assert_eq!(c[1].magnitude, -0.25);
    }

    #[test]
    fn hollow_ring_inner_pair_is_reversed() {
        let h = ChargeSet::ring(&hollow(), 1.0, 10).unwrap();
        let c = h.charges();
        assert_relative_eq!(c[2].position, R2::new(4.0, 2.0), epsilon = 1.0e-12);
        assert_eq!(c[2].magnitude, -c[0].magnitude);
        assert_eq!(c[3].magnitude, -c[1].magnitude);
    }

    #[test]
    fn ring_rejects_zero_charge_count_and_bars() {
        assert!(matches!(
            ChargeSet::ring(&solid(), 1.0, 0),
            Err(PoleFieldError::InvalidGeometry(_))
        ));
        let bar = MagnetGeometry::rectangular_bar(10.0, 4.0).unwrap();
        assert!(ChargeSet::ring(&bar, 1.0, 10).is_err());
        assert!(matches!(
            ChargeSet::ring(&solid(), -1.0, 10),
            Err(PoleFieldError::InvalidConfig(_))
        ));
    }

    #[test]
    fn unbalanced_charges_are_rejected() {
        let err = ChargeSet::from_charges(vec![Charge::new(0.0, 1.0, 1.0), Charge::new(0.0, -1.0, -0.5)])
            .unwrap_err();
        assert!(matches!(err, PoleFieldError::InvalidGeometry(_)));
        assert!(ChargeSet::from_charges(Vec::new()).is_err());
    }

    #[test]
    fn large_magnitudes_do_not_widen_the_tolerance() {
        let slightly_off = vec![Charge::new(0.0, 1.0, 1.0e6), Charge::new(0.0, -1.0, -1.0e6 + 1.0e-3)];
        assert!(matches!(
            ChargeSet::from_charges(slightly_off),
            Err(PoleFieldError::InvalidGeometry(_))
        ));
        let balanced = ChargeSet::from_charges(vec![Charge::new(0.0, 1.0, 1.0e6), Charge::new(0.0, -1.0, -1.0e6)]).unwrap();
        assert_eq!(balanced.net_charge(), 0.0);
        // Strong rings stay exactly neutral.
        assert!(ChargeSet::ring(&hollow(), 1.0e6, 997).is_ok());
    }

    #[test]
    fn iteration_follows_construction_order() {
        let s = ChargeSet::ring(&solid(), 1.0, 3).unwrap();
        let magnitudes: Vec<Scalar> = s.iter().map(|c| c.magnitude).collect();
        assert_eq!(magnitudes.len(), 6);
        assert!(magnitudes.chunks(2).all(|pair| pair[0] > 0.0 && pair[1] == -pair[0]));
        assert!(s.iter().eq(&s));
        assert!(!s.is_empty());
    }

    #[test]
    fn point_on_a_charge_is_singular() {
        let s = ChargeSet::from_charges(vec![Charge::new(1.0, 2.0, 1.0), Charge::new(1.0, -2.0, -1.0)]).unwrap();
        assert_eq!(
            s.field_at(R2::new(1.0, 2.0)),
            Err(PoleFieldError::Singularity { x: 1.0, z: 2.0 })
        );
        assert!(s.field_at(R2::new(1.0, 2.5)).unwrap().is_finite());
    }

    #[test]
    fn single_charge_field_points_away_from_north_pole() {
        let north = Charge::new(0.0, 0.0, 2.0);
        let f = north.field_at(R2::new(3.0, 4.0)).unwrap();
        assert_relative_eq!(f.bx, 2.0 * 3.0 / 25.0, epsilon = 1.0e-15);
        assert_relative_eq!(f.bz, 2.0 * 4.0 / 25.0, epsilon = 1.0e-15);
        assert_relative_eq!(f.v, 2.0 * 5.0_f64.ln(), epsilon = 1.0e-14);
    }

    #[test]
    fn discretized_bar_balances_faces() {
        let s = ChargeSet::discretized_bar(10.0, 4.0, 1.0, 50).unwrap();
        assert_eq!(s.len(), 100);
        assert_relative_eq!(s.total_absolute_charge(), 20.0, epsilon = 1.0e-12);
        assert!(s.net_charge().abs() <= 1.0e-12);
    }
}
