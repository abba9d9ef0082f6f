use std::ops::AddAssign;

use crate::math::Scalar;

/// Field components and scalar potential at one point.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FieldSample {
    /// In-plane field component along `x`.
    pub bx: Scalar,
    /// In-plane field component along `z`.
    pub bz: Scalar,
    /// Scalar potential `V`, with `B = grad V`.
    pub v: Scalar,
}

impl FieldSample {
    /// All-zero accumulator.
    pub const ZERO: Self = Self { bx: 0.0, bz: 0.0, v: 0.0 };

    /// Sentinel stored in cells that coincide with a pole.
    pub const SINGULAR: Self = Self { bx: Scalar::NAN, bz: Scalar::NAN, v: Scalar::NAN };

    /// Creates a sample from its components.
    #[must_use]
    pub const fn new(bx: Scalar, bz: Scalar, v: Scalar) -> Self {
        Self { bx, bz, v }
    }

    /// Euclidean norm of `(bx, bz)`.
    #[must_use]
    pub fn magnitude(&self) -> Scalar {
        self.bx.hypot(self.bz)
    }

    /// `true` when every component is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.bx.is_finite() && self.bz.is_finite() && self.v.is_finite()
    }

    /// Multiplies every component by `factor`.
    #[must_use]
    pub fn scaled(self, factor: Scalar) -> Self {
        Self { bx: self.bx * factor, bz: self.bz * factor, v: self.v * factor }
    }
}

impl AddAssign for FieldSample {
    fn add_assign(&mut self, rhs: Self) {
        self.bx += rhs.bx;
        self.bz += rhs.bz;
        self.v += rhs.v;
    }
}
