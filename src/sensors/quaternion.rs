//! Orientation quaternion from the BNO055 fusion engine

use super::Vector3;

/// Orientation quaternion
///
/// Decoded from 14-bit fixed point, so each component lies in [-2, 2].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Quaternion {
    /// W component (scalar part)
    pub w: f64,
    /// X component (i)
    pub x: f64,
    /// Y component (j)
    pub y: f64,
    /// Z component (k)
    pub z: f64,
}

impl Quaternion {
    /// Create a new quaternion
    #[must_use]
    pub const fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }

    /// Create identity quaternion (no rotation)
    #[must_use]
    pub const fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0)
    }

    /// Calculate quaternion magnitude (norm)
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        libm::sqrt(self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z)
    }

    /// Convert to Euler angles in radians
    ///
    /// See [`crate::codec::quaternion_to_euler`] for the exact formula.
    #[must_use]
    pub fn to_euler(&self) -> Vector3 {
        crate::codec::quaternion_to_euler(self)
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}
