//! BNO055 operating, power and address modes
//!
//! The discriminants are the datasheet register values; the drivers write them
//! verbatim and never interpret them further.
//!
//! # Fusion modes
//!
//! Only the fusion modes (`ImuPlus` and up) produce Euler, quaternion,
//! linear acceleration and gravity output. Bring-up ends in [`OperationMode::Ndof`].

/// Operation mode (`OPR_MODE` register)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OperationMode {
    /// Configuration mode, the only mode in which configuration registers are writable
    Config = 0x00,
    /// Accelerometer only
    AccOnly = 0x01,
    /// Magnetometer only
    MagOnly = 0x02,
    /// Gyroscope only
    GyroOnly = 0x03,
    /// Accelerometer and magnetometer
    AccMag = 0x04,
    /// Accelerometer and gyroscope
    AccGyro = 0x05,
    /// Magnetometer and gyroscope
    MagGyro = 0x06,
    /// All three sensors, no fusion
    Amg = 0x07,
    /// Relative orientation from accelerometer and gyroscope
    ImuPlus = 0x08,
    /// Absolute heading from accelerometer and magnetometer
    Compass = 0x09,
    /// Magnet-for-gyroscope fusion
    M4g = 0x0A,
    /// Nine degrees of freedom, fast magnetometer calibration off
    NdofFmcOff = 0x0B,
    /// Nine degrees of freedom absolute orientation
    Ndof = 0x0C,
}

impl OperationMode {
    /// Register value for this mode
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Whether the chip runs its sensor fusion in this mode
    #[must_use]
    pub const fn is_fusion(self) -> bool {
        matches!(
            self,
            Self::ImuPlus | Self::Compass | Self::M4g | Self::NdofFmcOff | Self::Ndof
        )
    }
}

/// Power mode (`PWR_MODE` register)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerMode {
    /// All sensors always on
    Normal = 0x00,
    /// Sensors sleep until motion is detected
    LowPower = 0x01,
    /// Sensors and microcontroller paused
    Suspend = 0x02,
}

impl PowerMode {
    /// Register value for this mode
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

/// BNO055 I2C address, selected by the COM3 pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AddressMode {
    /// COM3 low (0x28)
    #[default]
    A = 0x28,
    /// COM3 high (0x29)
    B = 0x29,
}

impl AddressMode {
    /// 7-bit I2C address
    #[must_use]
    pub const fn address(self) -> u8 {
        self as u8
    }
}
