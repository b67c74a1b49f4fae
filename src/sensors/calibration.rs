//! Calibration status levels

/// Highest calibration level; the sensor is fully calibrated
pub const FULLY_CALIBRATED: u8 = 3;

/// Calibration level of each sensor, decoded from `CALIB_STAT`
///
/// Each field is in 0-3, where 3 means fully calibrated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationData {
    /// Fusion system calibration (bits 7:6)
    pub system: u8,
    /// Gyroscope calibration (bits 5:4)
    pub gyro: u8,
    /// Accelerometer calibration (bits 3:2)
    pub accel: u8,
    /// Magnetometer calibration (bits 1:0)
    pub mag: u8,
}

impl CalibrationData {
    /// Whether every sensor and the fusion system report level 3
    #[must_use]
    pub const fn is_fully_calibrated(&self) -> bool {
        self.system == FULLY_CALIBRATED
            && self.gyro == FULLY_CALIBRATED
            && self.accel == FULLY_CALIBRATED
            && self.mag == FULLY_CALIBRATED
    }
}
