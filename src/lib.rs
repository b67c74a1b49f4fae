#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod bringup;
pub mod codec;
pub mod imu;
pub mod interface;
pub mod modes;
pub mod pwm;
pub mod registers;
pub mod sensors;

// Re-export main types
pub use bringup::{BringUpState, ProbeOutcome, ProbePolicy, Step};
pub use imu::{Bno055Driver, ImuConfig};
pub use interface::{BusController, BusSpeed, ConnectionSettings, DedicatedBus, I2cInterface};
pub use modes::{AddressMode, OperationMode, PowerMode};
pub use pwm::{ChannelTicks, Pca9685Driver, PwmConfig, prescale_for_frequency};
pub use sensors::{CalibrationData, ImuReading, Quaternion, Vector3, VectorType};

/// Expected value of the BNO055 `CHIP_ID` register
pub const BNO055_CHIP_ID: u8 = 0xA0;

/// Default PCA9685 I2C address (all address pins low)
pub const PCA9685_DEFAULT_ADDRESS: u8 = 0x40;

/// Friendly name of the I2C controller both drivers look for by default
pub const DEFAULT_SELECTOR: &str = "I2C1";

/// Failure to obtain a connection from a [`BusController`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectError {
    /// No controller endpoint matched the configured selector
    NoController,
    /// An endpoint matched but the controller could not open it
    EndpointUnavailable,
}

/// Argument rejected before any bus transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InvalidArgument {
    /// PWM pin outside 0-15
    Pin(u8),
    /// PWM tick outside 0-4095
    Tick(u16),
    /// Duty cycle outside 0.0-1.0 (or not a number)
    DutyCycle,
    /// Dead zone outside 0.0-0.5 (or not a number)
    DeadZone,
    /// Frequency that is not a positive finite number
    Frequency,
    /// Register address that is not the base of a vector data block
    VectorRegister(u8),
}

/// Driver errors
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Communication error with the device
    Bus(E),
    /// The bus controller could not provide a connection
    Connect(ConnectError),
    /// The chip identity register never reported the expected value
    InvalidDevice {
        /// Identity byte the driver was waiting for
        expected: u8,
        /// Identity byte read on the last attempt
        found: u8,
    },
    /// An operation was invoked before the driver was connected
    NotConnected,
    /// The caller passed an out-of-range argument
    InvalidArgument(InvalidArgument),
}

impl<E> Error<E> {
    /// Whether this is a transport-level failure (bus, connection, or identity mismatch)
    #[must_use]
    pub const fn is_communication(&self) -> bool {
        matches!(
            self,
            Self::Bus(_) | Self::Connect(_) | Self::InvalidDevice { .. }
        )
    }

    /// Whether the caller passed an out-of-range argument
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::Bus(error)
    }
}
