//! Full nine-degrees-of-freedom snapshot

use super::{CalibrationData, Vector3};

/// Snapshot of calibration, temperature and all six vector blocks
///
/// Captured by eight separate register transactions. Nothing prevents the
/// chip (or another caller holding the bus) from changing state between two
/// of them, so the fields are not guaranteed to describe the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ImuReading {
    /// Calibration levels
    pub calibration: CalibrationData,
    /// Chip temperature in °C
    pub temperature: i8,
    /// Acceleration in m/s²
    pub acceleration: Vector3,
    /// Heading, roll, pitch in degrees
    pub euler: Vector3,
    /// Gravity vector in m/s²
    pub gravity: Vector3,
    /// Angular rate in rad/s
    pub gyro: Vector3,
    /// Linear acceleration in m/s²
    pub linear_acceleration: Vector3,
    /// Magnetic field in µT
    pub magnetometer: Vector3,
}
