//! Bus interface implementations for the BNO055 and PCA9685
//!
//! Both drivers talk to their chip through the `device-driver` register
//! traits, so anything that can read and write a run of bytes at a register
//! address can stand in for the real bus. This module provides:
//!
//! - [`I2cInterface`], the register adapter over an `embedded-hal` I2C bus
//! - [`BusController`], the capability that finds a controller by friendly
//!   name and opens a connection to one device address on it
//! - [`DedicatedBus`], a controller over a single, already-built HAL bus

use crate::ConnectError;
use device_driver::RegisterInterface;
use embedded_hal::i2c::Operation;

/// I2C bus clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusSpeed {
    /// 100 kHz
    #[default]
    Standard,
    /// 400 kHz
    Fast,
}

impl BusSpeed {
    /// Bus clock in Hz
    #[must_use]
    pub const fn frequency_hz(self) -> u32 {
        match self {
            Self::Standard => 100_000,
            Self::Fast => 400_000,
        }
    }
}

/// Parameters for opening a connection to one device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConnectionSettings {
    /// 7-bit device address
    pub address: u8,
    /// Requested bus clock
    pub bus_speed: BusSpeed,
}

impl ConnectionSettings {
    /// Settings for `address` at standard speed
    #[must_use]
    pub const fn new(address: u8) -> Self {
        Self {
            address,
            bus_speed: BusSpeed::Standard,
        }
    }

    /// Override the bus speed
    #[must_use]
    pub const fn with_bus_speed(mut self, bus_speed: BusSpeed) -> Self {
        self.bus_speed = bus_speed;
        self
    }
}

/// Source of device connections
///
/// `enumerate` lists the controller endpoints matching a friendly name
/// (for example `"I2C1"`); `open` turns one of them into a register
/// interface bound to a single device address. The drivers use the first
/// endpoint and own the opened interface exclusively.
pub trait BusController {
    /// Identifies one controller found by `enumerate`
    type Endpoint;
    /// Register interface produced by `open`
    type Interface;

    /// List the endpoints whose name matches `selector`
    fn enumerate(&mut self, selector: &str) -> impl Iterator<Item = Self::Endpoint>;

    /// Open a connection to `settings.address` through `endpoint`
    ///
    /// # Errors
    ///
    /// Returns [`ConnectError::EndpointUnavailable`] if the endpoint can no
    /// longer be opened.
    fn open(
        &mut self,
        endpoint: Self::Endpoint,
        settings: ConnectionSettings,
    ) -> Result<Self::Interface, ConnectError>;
}

/// Controller over one HAL bus handed over by the application
///
/// Enumerates a single endpoint while the bus has not been opened yet and
/// the selector matches `name`. The bus clock of an `embedded-hal` bus is
/// fixed when the HAL peripheral is built, so the requested
/// [`BusSpeed`] is not applied here.
pub struct DedicatedBus<I2C> {
    name: &'static str,
    bus: Option<I2C>,
}

impl<I2C> DedicatedBus<I2C> {
    /// Wrap `bus` under the friendly name `name`
    pub const fn new(name: &'static str, bus: I2C) -> Self {
        Self {
            name,
            bus: Some(bus),
        }
    }

    /// Friendly name this controller answers to
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Return the bus if it has not been opened
    pub fn release(self) -> Option<I2C> {
        self.bus
    }
}

impl<I2C> BusController for DedicatedBus<I2C> {
    type Endpoint = ();
    type Interface = I2cInterface<I2C>;

    fn enumerate(&mut self, selector: &str) -> impl Iterator<Item = Self::Endpoint> {
        (self.bus.is_some() && self.name == selector)
            .then_some(())
            .into_iter()
    }

    fn open(
        &mut self,
        _endpoint: Self::Endpoint,
        settings: ConnectionSettings,
    ) -> Result<Self::Interface, ConnectError> {
        self.bus
            .take()
            .map(|bus| I2cInterface::new(bus, settings.address))
            .ok_or(ConnectError::EndpointUnavailable)
    }
}

/// I2C register interface for one device address
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C> {
    /// Create a new I2C interface for the device at `address`
    ///
    /// # Arguments
    /// * `i2c` - The I2C peripheral
    /// * `address` - The 7-bit device address
    pub const fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Device address this interface talks to
    #[must_use]
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Consume the interface and return the I2C peripheral
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C, E> RegisterInterface for I2cInterface<I2C>
where
    I2C: embedded_hal::i2c::I2c<Error = E>,
{
    type Error = E;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in read_data.len() for I2C
        self.i2c.write_read(self.address, &[address], read_data)
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in write_data.len() for I2C
        // Adjacent writes go out back to back without a repeated start
        self.i2c.transaction(
            self.address,
            &mut [Operation::Write(&[address]), Operation::Write(write_data)],
        )
    }
}

#[cfg(feature = "async")]
impl<I2C, E> device_driver::AsyncRegisterInterface for I2cInterface<I2C>
where
    I2C: embedded_hal_async::i2c::I2c<Error = E>,
{
    type Error = E;
    type AddressType = u8;

    async fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in read_data.len() for I2C
        self.i2c
            .write_read(self.address, &[address], read_data)
            .await
    }

    async fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in write_data.len() for I2C
        self.i2c
            .transaction(
                self.address,
                &mut [Operation::Write(&[address]), Operation::Write(write_data)],
            )
            .await
    }
}
