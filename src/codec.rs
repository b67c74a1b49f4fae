//! Register codec
//!
//! Pure conversions between raw register bytes and typed values. Nothing in
//! this module touches the bus.
//!
//! All multi-byte BNO055 values are little-endian two's complement 16-bit
//! integers; PCA9685 tick pairs are little-endian unsigned 16-bit integers.

use crate::sensors::{CalibrationData, Quaternion, Vector3, VectorType};

/// Quaternion fixed-point scale: 1 unit = 2^14 LSB
pub const QUATERNION_SCALE: f64 = 1.0 / 16384.0;

/// Length of one vector data block in bytes
pub const VECTOR_LEN: usize = 6;

/// Length of the quaternion data block in bytes
pub const QUATERNION_LEN: usize = 8;

/// Bit position and mask of each 2-bit calibration field, system first
const CALIBRATION_SHIFTS: [u8; 4] = [6, 4, 2, 0];
const CALIBRATION_MASK: u8 = 0x03;

/// Combine a little-endian byte pair into a signed 16-bit value
///
/// Bit 15 of the combined word is the sign bit (two's complement).
#[must_use]
pub const fn combine_i16(lsb: u8, msb: u8) -> i16 {
    i16::from_le_bytes([lsb, msb])
}

/// Decode a 6-byte vector block into physical units
///
/// Axes are at byte pairs (0,1), (2,3), (4,5) and are divided by the
/// block's [`VectorType::scale`].
#[must_use]
pub fn decode_vector(buf: &[u8; VECTOR_LEN], ty: VectorType) -> Vector3 {
    let raw = Vector3::new(
        f64::from(combine_i16(buf[0], buf[1])),
        f64::from(combine_i16(buf[2], buf[3])),
        f64::from(combine_i16(buf[4], buf[5])),
    );
    raw / ty.scale()
}

/// Decode the 8-byte quaternion block (W, X, Y, Z in memory order)
#[must_use]
pub fn decode_quaternion(buf: &[u8; QUATERNION_LEN]) -> Quaternion {
    let w = combine_i16(buf[0], buf[1]);
    let x = combine_i16(buf[2], buf[3]);
    let y = combine_i16(buf[4], buf[5]);
    let z = combine_i16(buf[6], buf[7]);

    Quaternion::new(
        QUATERNION_SCALE * f64::from(w),
        QUATERNION_SCALE * f64::from(x),
        QUATERNION_SCALE * f64::from(y),
        QUATERNION_SCALE * f64::from(z),
    )
}

/// Split the `CALIB_STAT` byte into its four 2-bit levels
#[must_use]
pub const fn decode_calibration(byte: u8) -> CalibrationData {
    let [sys, gyr, acc, mag] = CALIBRATION_SHIFTS;
    CalibrationData {
        system: (byte >> sys) & CALIBRATION_MASK,
        gyro: (byte >> gyr) & CALIBRATION_MASK,
        accel: (byte >> acc) & CALIBRATION_MASK,
        mag: (byte >> mag) & CALIBRATION_MASK,
    }
}

/// Pack calibration levels back into the `CALIB_STAT` layout
///
/// Levels above 3 are truncated to their low two bits.
#[must_use]
pub const fn encode_calibration(cal: &CalibrationData) -> u8 {
    let [sys, gyr, acc, mag] = CALIBRATION_SHIFTS;
    ((cal.system & CALIBRATION_MASK) << sys)
        | ((cal.gyro & CALIBRATION_MASK) << gyr)
        | ((cal.accel & CALIBRATION_MASK) << acc)
        | ((cal.mag & CALIBRATION_MASK) << mag)
}

/// Decode the `TEMP` register (two's complement, 1 °C per LSB)
#[must_use]
pub const fn decode_temperature(byte: u8) -> i8 {
    i8::from_le_bytes([byte])
}

/// Convert a quaternion to Euler angles in radians
///
/// ```text
/// ex = atan2(2(xy + zw),  x² - y² - z² + w²)
/// ey = asin(-2(xz - yw) / (x² + y² + z² + w²))
/// ez = atan2(2(yz + xw), -x² - y² + z² + w²)
/// ```
///
/// Gimbal lock is left to `asin`/`atan2`.
#[must_use]
#[allow(clippy::similar_names)]
pub fn quaternion_to_euler(q: &Quaternion) -> Vector3 {
    let sqw = q.w * q.w;
    let sqx = q.x * q.x;
    let sqy = q.y * q.y;
    let sqz = q.z * q.z;

    let ex = libm::atan2(2.0 * (q.x * q.y + q.z * q.w), sqx - sqy - sqz + sqw);
    let ey = libm::asin(-2.0 * (q.x * q.z - q.y * q.w) / (sqx + sqy + sqz + sqw));
    let ez = libm::atan2(2.0 * (q.y * q.z + q.x * q.w), -sqx - sqy + sqz + sqw);

    Vector3::new(ex, ey, ez)
}

/// Encode a PCA9685 channel as `ON_L, ON_H, OFF_L, OFF_H`
#[must_use]
pub const fn encode_pwm_pair(on: u16, off: u16) -> [u8; 4] {
    let [on_l, on_h] = on.to_le_bytes();
    let [off_l, off_h] = off.to_le_bytes();
    [on_l, on_h, off_l, off_h]
}
