//! Sensor value types for the BNO055
//!
//! Everything here is a plain `Copy` value produced by the register codec:
//! - [`Vector3`] and the [`VectorType`] that selects which block it came from
//! - [`Quaternion`] (absolute orientation, fused on-chip)
//! - [`CalibrationData`] (per-sensor calibration levels)
//! - [`ImuReading`] (a full snapshot of all of the above)
//!
//! All reads are performed through methods on `Bno055Driver`.

pub mod calibration;
pub mod quaternion;
pub mod reading;
pub mod vector;

// Re-export main types
pub use calibration::CalibrationData;
pub use quaternion::Quaternion;
pub use reading::ImuReading;
pub use vector::{Vector3, VectorType};
