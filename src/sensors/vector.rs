//! Three-axis vectors and the data blocks they are read from

use core::fmt;
use core::ops::{Add, Div, Mul, Sub};

use crate::InvalidArgument;
use crate::registers::{
    BNO055_ACC_DATA, BNO055_EUL_DATA, BNO055_GRV_DATA, BNO055_GYR_DATA, BNO055_LIA_DATA,
    BNO055_MAG_DATA,
};

/// Three-axis vector in the physical unit of its [`VectorType`]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Vector3 {
    /// X component
    pub x: f64,
    /// Y component
    pub y: f64,
    /// Z component
    pub z: f64,
}

impl Vector3 {
    /// Create a new vector
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Get the magnitude of the vector
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        libm::sqrt(self.x * self.x + self.y * self.y + self.z * self.z)
    }
}

impl Add for Vector3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// Elementwise product
impl Mul for Vector3 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(self.x * rhs.x, self.y * rhs.y, self.z * rhs.z)
    }
}

impl Mul<f64> for Vector3 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// Elementwise quotient
impl Div for Vector3 {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        Self::new(self.x / rhs.x, self.y / rhs.y, self.z / rhs.z)
    }
}

impl Div<f64> for Vector3 {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Vector data block on the BNO055
///
/// Each variant is bound to the base address of its 6-byte block and to the
/// fixed LSB-per-unit divisor from datasheet section 3.6.4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VectorType {
    /// Acceleration in m/s² (100 LSB per m/s²)
    Accelerometer,
    /// Magnetic field in µT (16 LSB per µT)
    Magnetometer,
    /// Angular rate in rad/s (900 LSB per rad/s)
    Gyroscope,
    /// Heading, roll, pitch in degrees (16 LSB per degree)
    Euler,
    /// Linear acceleration in m/s² (100 LSB per m/s²)
    LinearAcceleration,
    /// Gravity vector in m/s² (100 LSB per m/s²)
    Gravity,
}

impl VectorType {
    /// Every vector type, in register order
    pub const ALL: [Self; 6] = [
        Self::Accelerometer,
        Self::Magnetometer,
        Self::Gyroscope,
        Self::Euler,
        Self::LinearAcceleration,
        Self::Gravity,
    ];

    /// Base register address of the data block
    #[must_use]
    pub const fn register(self) -> u8 {
        match self {
            Self::Accelerometer => BNO055_ACC_DATA,
            Self::Magnetometer => BNO055_MAG_DATA,
            Self::Gyroscope => BNO055_GYR_DATA,
            Self::Euler => BNO055_EUL_DATA,
            Self::LinearAcceleration => BNO055_LIA_DATA,
            Self::Gravity => BNO055_GRV_DATA,
        }
    }

    /// Raw counts per physical unit
    #[must_use]
    pub const fn scale(self) -> f64 {
        match self {
            Self::Magnetometer | Self::Euler => 16.0,
            Self::Gyroscope => 900.0,
            Self::Accelerometer | Self::LinearAcceleration | Self::Gravity => 100.0,
        }
    }
}

/// Look up a vector type by its base register address
///
/// Any address that is not one of the six vector block bases is rejected.
impl TryFrom<u8> for VectorType {
    type Error = InvalidArgument;

    fn try_from(register: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.register() == register)
            .ok_or(InvalidArgument::VectorRegister(register))
    }
}
