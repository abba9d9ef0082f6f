//! Magnet cross-section shapes and the boundary data they expose.

use std::f64::consts::TAU;

use crate::constants::is_positive_finite;
use crate::errors::{PoleFieldError, Result};
use crate::math::{R2, Scalar};

/// Magnet shape in the `(x, z)` cross-section. Magnetization points along `+z`,
/// so the north face is at `z = +height / 2`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MagnetGeometry {
    /// Bar of extent `length` along `x` and `height` along `z`, centered at the origin.
    RectangularBar {
        /// Extent along `x`.
        length: Scalar,
        /// Extent along `z`.
        height: Scalar,
    },
    /// Disk-ring whose rim of radius `outer_radius` carries the poles.
    SolidRing {
        /// Rim radius.
        outer_radius: Scalar,
        /// Pole separation along `z`.
        height: Scalar,
    },
    /// Ring with a concentric hole; the inner rim subtracts from the outer one.
    HollowRing {
        /// Outer rim radius.
        outer_radius: Scalar,
        /// Hole radius, strictly smaller than `outer_radius`.
        inner_radius: Scalar,
        /// Pole separation along `z`.
        height: Scalar,
    },
}

/// One bar corner with the sign it carries in the closed-form face integral.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corner {
    /// Corner location.
    pub position: R2,
    /// `+1.0` or `-1.0`.
    pub sign: Scalar,
}

/// Rim positions at one angle, centered on the ring axis.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RimSample {
    /// Point on the outer rim.
    pub outer: R2,
    /// Point on the inner rim, present for hollow rings only.
    pub inner: Option<R2>,
}

impl MagnetGeometry {
    /// Creates a validated rectangular bar.
    pub fn rectangular_bar(length: Scalar, height: Scalar) -> Result<Self> {
        let geometry = Self::RectangularBar { length, height };
        geometry.validate()?;
        Ok(geometry)
    }

    /// Creates a validated solid ring.
    pub fn solid_ring(outer_radius: Scalar, height: Scalar) -> Result<Self> {
        let geometry = Self::SolidRing { outer_radius, height };
        geometry.validate()?;
        Ok(geometry)
    }

    /// Creates a validated hollow ring.
    pub fn hollow_ring(outer_radius: Scalar, inner_radius: Scalar, height: Scalar) -> Result<Self> {
        let geometry = Self::HollowRing { outer_radius, inner_radius, height };
        geometry.validate()?;
        Ok(geometry)
    }

    /// Checks every dimension is positive and finite and that a hole fits inside its ring.
    pub fn validate(&self) -> Result<()> {
        let dimensions: Vec<(&str, Scalar)> = match *self {
            Self::RectangularBar { length, height } => vec![("length", length), ("height", height)],
            Self::SolidRing { outer_radius, height } => {
                vec![("outer_radius", outer_radius), ("height", height)]
            }
            Self::HollowRing { outer_radius, inner_radius, height } => vec![
                ("outer_radius", outer_radius),
                ("inner_radius", inner_radius),
                ("height", height),
            ],
        };
        for (name, value) in dimensions {
            if !is_positive_finite(value) {
                return Err(PoleFieldError::InvalidGeometry(format!(
                    "{name} must be positive and finite, got {value}"
                )));
            }
        }
        if let Self::HollowRing { outer_radius, inner_radius, .. } = self {
            if inner_radius >= outer_radius {
                return Err(PoleFieldError::InvalidGeometry(format!(
                    "inner_radius {inner_radius} must be smaller than outer_radius {outer_radius}"
                )));
            }
        }
        Ok(())
    }

    /// Extent along the magnetization axis.
    #[must_use]
    pub const fn height(&self) -> Scalar {
        match *self {
            Self::RectangularBar { height, .. }
            | Self::SolidRing { height, .. }
            | Self::HollowRing { height, .. } => height,
        }
    }

    /// Returns `true` for the ring shapes, which need a charge discretization.
    #[must_use]
    pub const fn is_ring(&self) -> bool {
        !matches!(self, Self::RectangularBar { .. })
    }

    /// Signed bar corners in the fixed order top-left, top-right, bottom-right,
    /// bottom-left. Signs alternate `+, -, +, -`. `None` for ring shapes.
    #[must_use]
    pub fn corners(&self) -> Option<[Corner; 4]> {
        let Self::RectangularBar { length, height } = *self else {
            return None;
        };
        let (a, b) = (0.5 * length, 0.5 * height);
        Some([
            Corner { position: R2::new(-a, b), sign: 1.0 },
            Corner { position: R2::new(a, b), sign: -1.0 },
            Corner { position: R2::new(a, -b), sign: 1.0 },
            Corner { position: R2::new(-a, -b), sign: -1.0 },
        ])
    }

    /// Samples the rim(s) at `angle` radians. `None` for the bar.
    #[must_use]
    pub fn rim(&self, angle: Scalar) -> Option<RimSample> {
        let (sin, cos) = angle.sin_cos();
        match *self {
            Self::RectangularBar { .. } => None,
            Self::SolidRing { outer_radius, .. } => Some(RimSample {
                outer: R2::new(outer_radius * cos, outer_radius * sin),
                inner: None,
            }),
            Self::HollowRing { outer_radius, inner_radius, .. } => Some(RimSample {
                outer: R2::new(outer_radius * cos, outer_radius * sin),
                inner: Some(R2::new(inner_radius * cos, inner_radius * sin)),
            }),
        }
    }

    /// Closed boundary polylines for drawing the magnet over a field map.
    ///
    /// The bar yields one rectangle. Rings yield one circle per rim, each with
    /// `points_per_rim` vertices (at least three) and the first vertex repeated at the end.
    #[must_use]
    pub fn outline(&self, points_per_rim: usize) -> Vec<Vec<R2>> {
        if let Some(corners) = self.corners() {
            let mut path: Vec<R2> = corners.iter().map(|c| c.position).collect();
            path.push(corners[0].position);
            return vec![path];
        }
        let n = points_per_rim.max(3);
        let samples: Vec<RimSample> = (0..=n)
            .filter_map(|k| self.rim(TAU * (k % n) as Scalar / n as Scalar))
            .collect();
        let mut paths = vec![samples.iter().map(|s| s.outer).collect::<Vec<_>>()];
        let inner: Vec<R2> = samples.iter().filter_map(|s| s.inner).collect();
        if !inner.is_empty() {
            paths.push(inner);
        }
        paths
    }
}
