//! High-level driver API for the BNO055
//!
//! The driver starts [`BringUpState::Disconnected`]. [`Bno055Driver::initialize`]
//! opens a connection through a [`BusController`] and runs the bring-up
//! sequence from [`crate::bringup`]; once it reports [`BringUpState::Ready`]
//! the read and mode accessors become available. Every accessor invoked in
//! any other state fails with [`Error::NotConnected`] without touching the bus.
//!
//! The driver does no locking. It takes `&mut self` for every transaction, so
//! one driver instance owns its connection exclusively; callers that share a
//! chip between tasks must serialize access themselves.

use crate::bringup::{
    BringUpState, MODE_SETTLE_MS, ProbeOutcome, ProbePolicy, RESET_BOOT_MS, RESET_POLL_MS, Step,
};
use crate::codec::{self, QUATERNION_LEN, VECTOR_LEN};
use crate::interface::{BusController, BusSpeed, ConnectionSettings};
use crate::modes::{AddressMode, OperationMode, PowerMode};
use crate::registers::{BNO055_CALIB_STAT, BNO055_QUA_DATA, Bno055 as RegisterDevice};
use crate::sensors::{CalibrationData, ImuReading, Quaternion, Vector3, VectorType};
use crate::{BNO055_CHIP_ID, ConnectError, DEFAULT_SELECTOR, Error, InvalidArgument};

#[cfg(feature = "async")]
use device_driver::AsyncRegisterInterface;
#[cfg(not(feature = "async"))]
use device_driver::RegisterInterface;

/// BNO055 connection and bring-up configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ImuConfig {
    /// Friendly name of the I2C controller to enumerate
    pub selector: &'static str,
    /// Device address
    pub address: AddressMode,
    /// Requested bus clock
    pub bus_speed: BusSpeed,
    /// Identity probe retries
    pub probe: ProbePolicy,
    /// Operation mode entered at the end of bring-up
    pub operation_mode: OperationMode,
}

impl Default for ImuConfig {
    fn default() -> Self {
        Self {
            selector: DEFAULT_SELECTOR,
            address: AddressMode::A,
            bus_speed: BusSpeed::Standard,
            probe: ProbePolicy::default(),
            operation_mode: OperationMode::Ndof,
        }
    }
}

impl ImuConfig {
    /// Create the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the controller selector
    #[must_use]
    pub const fn with_selector(mut self, selector: &'static str) -> Self {
        self.selector = selector;
        self
    }

    /// Set the device address
    #[must_use]
    pub const fn with_address(mut self, address: AddressMode) -> Self {
        self.address = address;
        self
    }

    /// Set the requested bus clock
    #[must_use]
    pub const fn with_bus_speed(mut self, bus_speed: BusSpeed) -> Self {
        self.bus_speed = bus_speed;
        self
    }

    /// Set the identity probe retry count and delay
    #[must_use]
    pub const fn with_probe(mut self, max_retries: u8, retry_delay_ms: u32) -> Self {
        self.probe = ProbePolicy::new(max_retries, retry_delay_ms);
        self
    }

    /// Set the operation mode entered at the end of bring-up
    #[must_use]
    pub const fn with_operation_mode(mut self, mode: OperationMode) -> Self {
        self.operation_mode = mode;
        self
    }

    /// Connection settings derived from this configuration
    #[must_use]
    pub const fn connection_settings(&self) -> ConnectionSettings {
        ConnectionSettings::new(self.address.address()).with_bus_speed(self.bus_speed)
    }
}

/// Main driver for the BNO055
pub struct Bno055Driver<I> {
    config: ImuConfig,
    device: Option<RegisterDevice<I>>,
    state: BringUpState,
}

impl<I> Bno055Driver<I> {
    /// Create a disconnected driver
    #[must_use]
    pub const fn new(config: ImuConfig) -> Self {
        Self {
            config,
            device: None,
            state: BringUpState::Disconnected,
        }
    }

    /// Current lifecycle state
    #[must_use]
    pub const fn state(&self) -> BringUpState {
        self.state
    }

    /// Whether bring-up completed
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.state.is_ready()
    }

    /// Configuration this driver was created with
    #[must_use]
    pub const fn config(&self) -> &ImuConfig {
        &self.config
    }

    /// Give up the connection and return to `Disconnected`
    ///
    /// Returns the interface if one was opened, including after a failed
    /// bring-up, so the bus can be reused.
    pub fn release(&mut self) -> Option<I> {
        self.state = BringUpState::Disconnected;
        self.device.take().map(|device| device.interface)
    }

    fn open<C>(&mut self, controller: &mut C) -> Result<I, ConnectError>
    where
        C: BusController<Interface = I>,
    {
        self.device = None;
        self.state = BringUpState::InProgress(Step::Connecting);

        let endpoint = controller
            .enumerate(self.config.selector)
            .next()
            .ok_or(ConnectError::NoController);
        let opened = endpoint
            .and_then(|endpoint| controller.open(endpoint, self.config.connection_settings()));

        match opened {
            Ok(interface) => {
                self.state = BringUpState::advance(Step::Connecting);
                Ok(interface)
            }
            Err(error) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("BNO055: no connection on {}: {}", self.config.selector, error);
                self.state = BringUpState::Failed(Step::Connecting);
                Err(error)
            }
        }
    }

    fn ready_device<E>(&mut self) -> Result<&mut RegisterDevice<I>, Error<E>> {
        if !self.state.is_ready() {
            return Err(Error::NotConnected);
        }
        self.device.as_mut().ok_or(Error::NotConnected)
    }
}

#[cfg(not(feature = "async"))]
impl<I> Bno055Driver<I>
where
    I: RegisterInterface<AddressType = u8>,
{
    /// Connect through `controller` and bring the chip up
    ///
    /// Uses the first endpoint matching the configured selector, then runs
    /// every bring-up step in order. Any failure aborts immediately, leaves
    /// the driver in [`BringUpState::Failed`], and must be recovered by
    /// calling `initialize` again.
    ///
    /// The post-reset identity poll has no retry ceiling; wrap the call in a
    /// timeout if the chip may never come back.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No controller matches the selector, or it cannot be opened
    /// - The chip identity never matches within the probe retries
    /// - Communication with the device fails
    ///
    /// # Example
    ///
    /// ```ignore
    /// let mut controller = DedicatedBus::new("I2C1", i2c);
    /// let mut imu = Bno055Driver::new(ImuConfig::default());
    /// imu.initialize(&mut controller, &mut delay)?;
    /// let heading = imu.read_vector(VectorType::Euler)?;
    /// ```
    pub fn initialize<C, D>(
        &mut self,
        controller: &mut C,
        delay: &mut D,
    ) -> Result<(), Error<I::Error>>
    where
        C: BusController<Interface = I>,
        D: embedded_hal::delay::DelayNs,
    {
        let interface = self.open(controller).map_err(Error::<I::Error>::Connect)?;
        self.bring_up(interface, delay)
    }

    /// Bring the chip up over an interface that is already open
    ///
    /// Runs the same sequence as [`initialize`](Self::initialize) from the
    /// probing step on.
    ///
    /// # Errors
    ///
    /// Returns an error if the chip identity never matches or communication fails.
    pub fn connect_with<D>(&mut self, interface: I, delay: &mut D) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        self.bring_up(interface, delay)
    }

    fn bring_up<D>(&mut self, interface: I, delay: &mut D) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        let device = self.device.insert(RegisterDevice::new(interface));
        let mut step = Step::Probing;

        loop {
            self.state = BringUpState::InProgress(step);

            #[cfg(feature = "defmt")]
            defmt::debug!("BNO055 bring-up: {}", step);

            if let Err(error) = Self::run_step(device, &self.config, step, delay) {
                #[cfg(feature = "defmt")]
                defmt::warn!("BNO055 bring-up failed during {}", step);
                self.state = BringUpState::Failed(step);
                return Err(error);
            }

            self.state = BringUpState::advance(step);
            match step.next() {
                Some(next) => step = next,
                None => break,
            }
        }

        #[cfg(feature = "defmt")]
        defmt::info!("BNO055 ready in {}", self.config.operation_mode);

        Ok(())
    }

    fn run_step<D>(
        device: &mut RegisterDevice<I>,
        config: &ImuConfig,
        step: Step,
        delay: &mut D,
    ) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        match step {
            Step::Connecting => {}
            Step::Probing => Self::probe(device, &config.probe, delay)?,
            Step::ConfiguringMode => {
                device
                    .opr_mode()
                    .write(|w| w.set_mode(OperationMode::Config.bits()))?;
            }
            Step::Resetting => {
                device.sys_trigger().write(|w| w.set_rst_sys(true))?;
                delay.delay_ms(RESET_BOOT_MS);
                while device.chip_id().read()?.chip_id() != BNO055_CHIP_ID {
                    delay.delay_ms(RESET_POLL_MS);
                }
            }
            Step::PoweringUp => {
                device
                    .pwr_mode()
                    .write(|w| w.set_mode(PowerMode::Normal.bits()))?;
                delay.delay_ms(MODE_SETTLE_MS);
                device.page_id().write(|w| w.set_page(0))?;
                device.sys_trigger().write(|w| w.set_rst_sys(false))?;
            }
            Step::FinalConfiguring => {
                device
                    .opr_mode()
                    .write(|w| w.set_mode(config.operation_mode.bits()))?;
                delay.delay_ms(MODE_SETTLE_MS);
            }
        }

        let settle = step.settle_ms();
        if settle > 0 {
            delay.delay_ms(settle);
        }
        Ok(())
    }

    fn probe<D>(
        device: &mut RegisterDevice<I>,
        policy: &ProbePolicy,
        delay: &mut D,
    ) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        let mut attempt = 0;
        loop {
            let found = device.chip_id().read()?.chip_id();
            match policy.evaluate(attempt, found, BNO055_CHIP_ID) {
                ProbeOutcome::Matched => return Ok(()),
                ProbeOutcome::Retry(delay_ms) => {
                    #[cfg(feature = "defmt")]
                    defmt::debug!("BNO055 chip id {:#x}, retrying in {} ms", found, delay_ms);
                    delay.delay_ms(delay_ms);
                }
                ProbeOutcome::Exhausted => {
                    return Err(Error::InvalidDevice {
                        expected: BNO055_CHIP_ID,
                        found,
                    });
                }
            }
            attempt += 1;
        }
    }

    /// Read one vector data block
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConnected`] before bring-up, or a bus error.
    pub fn read_vector(&mut self, ty: VectorType) -> Result<Vector3, Error<I::Error>> {
        let device = self.ready_device::<I::Error>()?;
        let mut buffer = [0u8; VECTOR_LEN];
        device
            .interface
            .read_register(ty.register(), 48, &mut buffer)?;
        Ok(codec::decode_vector(&buffer, ty))
    }

    /// Read the vector block starting at a raw register address
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::VectorRegister`] if `register` is not a
    /// vector block base (checked before any transaction), otherwise as
    /// [`read_vector`](Self::read_vector).
    pub fn read_vector_at(&mut self, register: u8) -> Result<Vector3, Error<I::Error>> {
        let ty = VectorType::try_from(register).map_err(Error::<I::Error>::InvalidArgument)?;
        self.read_vector(ty)
    }

    /// Read the fused orientation quaternion
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConnected`] before bring-up, or a bus error.
    pub fn read_quaternion(&mut self) -> Result<Quaternion, Error<I::Error>> {
        let device = self.ready_device::<I::Error>()?;
        let mut buffer = [0u8; QUATERNION_LEN];
        device
            .interface
            .read_register(BNO055_QUA_DATA, 64, &mut buffer)?;
        Ok(codec::decode_quaternion(&buffer))
    }

    /// Read the chip temperature in °C
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConnected`] before bring-up, or a bus error.
    pub fn read_temperature(&mut self) -> Result<i8, Error<I::Error>> {
        let device = self.ready_device::<I::Error>()?;
        let reg = device.temp().read()?;
        Ok(codec::decode_temperature(reg.temp()))
    }

    /// Read the calibration levels
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConnected`] before bring-up, or a bus error.
    pub fn read_calibration(&mut self) -> Result<CalibrationData, Error<I::Error>> {
        let device = self.ready_device::<I::Error>()?;
        let mut buffer = [0u8; 1];
        device
            .interface
            .read_register(BNO055_CALIB_STAT, 8, &mut buffer)?;
        Ok(codec::decode_calibration(buffer[0]))
    }

    /// Read calibration, temperature and all six vectors
    ///
    /// The eight reads are issued back to back in a fixed order but are not
    /// atomic: a mode change or a new sample between two of them shows up in
    /// the later fields only.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConnected`] before bring-up, or the first bus error.
    pub fn read_full_snapshot(&mut self) -> Result<ImuReading, Error<I::Error>> {
        Ok(ImuReading {
            calibration: self.read_calibration()?,
            temperature: self.read_temperature()?,
            acceleration: self.read_vector(VectorType::Accelerometer)?,
            euler: self.read_vector(VectorType::Euler)?,
            gravity: self.read_vector(VectorType::Gravity)?,
            gyro: self.read_vector(VectorType::Gyroscope)?,
            linear_acceleration: self.read_vector(VectorType::LinearAcceleration)?,
            magnetometer: self.read_vector(VectorType::Magnetometer)?,
        })
    }

    /// Switch the operation mode, then wait for the chip to settle
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConnected`] before bring-up, or a bus error.
    pub fn set_operation_mode<D>(
        &mut self,
        mode: OperationMode,
        delay: &mut D,
    ) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        let device = self.ready_device::<I::Error>()?;
        device.opr_mode().write(|w| w.set_mode(mode.bits()))?;
        delay.delay_ms(MODE_SETTLE_MS);
        Ok(())
    }

    /// Switch the power mode, then wait for the chip to settle
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConnected`] before bring-up, or a bus error.
    pub fn set_power_mode<D>(
        &mut self,
        mode: PowerMode,
        delay: &mut D,
    ) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        let device = self.ready_device::<I::Error>()?;
        device.pwr_mode().write(|w| w.set_mode(mode.bits()))?;
        delay.delay_ms(MODE_SETTLE_MS);
        Ok(())
    }

    /// Read any single register
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConnected`] before bring-up, or a bus error.
    pub fn read_register(&mut self, address: u8) -> Result<u8, Error<I::Error>> {
        let device = self.ready_device::<I::Error>()?;
        let mut buffer = [0u8; 1];
        device.interface.read_register(address, 8, &mut buffer)?;
        Ok(buffer[0])
    }

    /// Write any single register
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConnected`] before bring-up, or a bus error.
    pub fn write_register(&mut self, address: u8, value: u8) -> Result<(), Error<I::Error>> {
        let device = self.ready_device::<I::Error>()?;
        device.interface.write_register(address, 8, &[value])?;
        Ok(())
    }
}

#[cfg(feature = "async")]
impl<I> Bno055Driver<I>
where
    I: AsyncRegisterInterface<AddressType = u8>,
{
    /// Connect through `controller` and bring the chip up
    ///
    /// Awaits only inside register transactions and at the fixed delays of
    /// the bring-up sequence.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No controller matches the selector, or it cannot be opened
    /// - The chip identity never matches within the probe retries
    /// - Communication with the device fails
    pub async fn initialize<C, D>(
        &mut self,
        controller: &mut C,
        delay: &mut D,
    ) -> Result<(), Error<I::Error>>
    where
        C: BusController<Interface = I>,
        D: embedded_hal_async::delay::DelayNs,
    {
        let interface = self.open(controller).map_err(Error::<I::Error>::Connect)?;
        self.bring_up(interface, delay).await
    }

    /// Bring the chip up over an interface that is already open
    ///
    /// # Errors
    ///
    /// Returns an error if the chip identity never matches or communication fails.
    pub async fn connect_with<D>(
        &mut self,
        interface: I,
        delay: &mut D,
    ) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal_async::delay::DelayNs,
    {
        self.bring_up(interface, delay).await
    }

    async fn bring_up<D>(&mut self, interface: I, delay: &mut D) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal_async::delay::DelayNs,
    {
        let device = self.device.insert(RegisterDevice::new(interface));
        let mut step = Step::Probing;

        loop {
            self.state = BringUpState::InProgress(step);

            #[cfg(feature = "defmt")]
            defmt::debug!("BNO055 bring-up: {}", step);

            if let Err(error) = Self::run_step(device, &self.config, step, delay).await {
                #[cfg(feature = "defmt")]
                defmt::warn!("BNO055 bring-up failed during {}", step);
                self.state = BringUpState::Failed(step);
                return Err(error);
            }

            self.state = BringUpState::advance(step);
            match step.next() {
                Some(next) => step = next,
                None => break,
            }
        }

        #[cfg(feature = "defmt")]
        defmt::info!("BNO055 ready in {}", self.config.operation_mode);

        Ok(())
    }

    async fn run_step<D>(
        device: &mut RegisterDevice<I>,
        config: &ImuConfig,
        step: Step,
        delay: &mut D,
    ) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal_async::delay::DelayNs,
    {
        match step {
            Step::Connecting => {}
            Step::Probing => Self::probe(device, &config.probe, delay).await?,
            Step::ConfiguringMode => {
                device
                    .opr_mode()
                    .write_async(|w| w.set_mode(OperationMode::Config.bits()))
                    .await?;
            }
            Step::Resetting => {
                device
                    .sys_trigger()
                    .write_async(|w| w.set_rst_sys(true))
                    .await?;
                delay.delay_ms(RESET_BOOT_MS).await;
                while device.chip_id().read_async().await?.chip_id() != BNO055_CHIP_ID {
                    delay.delay_ms(RESET_POLL_MS).await;
                }
            }
            Step::PoweringUp => {
                device
                    .pwr_mode()
                    .write_async(|w| w.set_mode(PowerMode::Normal.bits()))
                    .await?;
                delay.delay_ms(MODE_SETTLE_MS).await;
                device.page_id().write_async(|w| w.set_page(0)).await?;
                device
                    .sys_trigger()
                    .write_async(|w| w.set_rst_sys(false))
                    .await?;
            }
            Step::FinalConfiguring => {
                device
                    .opr_mode()
                    .write_async(|w| w.set_mode(config.operation_mode.bits()))
                    .await?;
                delay.delay_ms(MODE_SETTLE_MS).await;
            }
        }

        let settle = step.settle_ms();
        if settle > 0 {
            delay.delay_ms(settle).await;
        }
        Ok(())
    }

    async fn probe<D>(
        device: &mut RegisterDevice<I>,
        policy: &ProbePolicy,
        delay: &mut D,
    ) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal_async::delay::DelayNs,
    {
        let mut attempt = 0;
        loop {
            let found = device.chip_id().read_async().await?.chip_id();
            match policy.evaluate(attempt, found, BNO055_CHIP_ID) {
                ProbeOutcome::Matched => return Ok(()),
                ProbeOutcome::Retry(delay_ms) => {
                    #[cfg(feature = "defmt")]
                    defmt::debug!("BNO055 chip id {:#x}, retrying in {} ms", found, delay_ms);
                    delay.delay_ms(delay_ms).await;
                }
                ProbeOutcome::Exhausted => {
                    return Err(Error::InvalidDevice {
                        expected: BNO055_CHIP_ID,
                        found,
                    });
                }
            }
            attempt += 1;
        }
    }

    /// Read one vector data block
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConnected`] before bring-up, or a bus error.
    pub async fn read_vector(&mut self, ty: VectorType) -> Result<Vector3, Error<I::Error>> {
        let device = self.ready_device::<I::Error>()?;
        let mut buffer = [0u8; VECTOR_LEN];
        device
            .interface
            .read_register(ty.register(), 48, &mut buffer)
            .await?;
        Ok(codec::decode_vector(&buffer, ty))
    }

    /// Read the vector block starting at a raw register address
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::VectorRegister`] if `register` is not a
    /// vector block base, otherwise as [`read_vector`](Self::read_vector).
    pub async fn read_vector_at(&mut self, register: u8) -> Result<Vector3, Error<I::Error>> {
        let ty = VectorType::try_from(register).map_err(Error::<I::Error>::InvalidArgument)?;
        self.read_vector(ty).await
    }

    /// Read the fused orientation quaternion
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConnected`] before bring-up, or a bus error.
    pub async fn read_quaternion(&mut self) -> Result<Quaternion, Error<I::Error>> {
        let device = self.ready_device::<I::Error>()?;
        let mut buffer = [0u8; QUATERNION_LEN];
        device
            .interface
            .read_register(BNO055_QUA_DATA, 64, &mut buffer)
            .await?;
        Ok(codec::decode_quaternion(&buffer))
    }

    /// Read the chip temperature in °C
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConnected`] before bring-up, or a bus error.
    pub async fn read_temperature(&mut self) -> Result<i8, Error<I::Error>> {
        let device = self.ready_device::<I::Error>()?;
        let reg = device.temp().read_async().await?;
        Ok(codec::decode_temperature(reg.temp()))
    }

    /// Read the calibration levels
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConnected`] before bring-up, or a bus error.
    pub async fn read_calibration(&mut self) -> Result<CalibrationData, Error<I::Error>> {
        let device = self.ready_device::<I::Error>()?;
        let mut buffer = [0u8; 1];
        device
            .interface
            .read_register(BNO055_CALIB_STAT, 8, &mut buffer)
            .await?;
        Ok(codec::decode_calibration(buffer[0]))
    }

    /// Read calibration, temperature and all six vectors
    ///
    /// Not atomic; see the blocking variant.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConnected`] before bring-up, or the first bus error.
    pub async fn read_full_snapshot(&mut self) -> Result<ImuReading, Error<I::Error>> {
        Ok(ImuReading {
            calibration: self.read_calibration().await?,
            temperature: self.read_temperature().await?,
            acceleration: self.read_vector(VectorType::Accelerometer).await?,
            euler: self.read_vector(VectorType::Euler).await?,
            gravity: self.read_vector(VectorType::Gravity).await?,
            gyro: self.read_vector(VectorType::Gyroscope).await?,
            linear_acceleration: self.read_vector(VectorType::LinearAcceleration).await?,
            magnetometer: self.read_vector(VectorType::Magnetometer).await?,
        })
    }

    /// Switch the operation mode, then wait for the chip to settle
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConnected`] before bring-up, or a bus error.
    pub async fn set_operation_mode<D>(
        &mut self,
        mode: OperationMode,
        delay: &mut D,
    ) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal_async::delay::DelayNs,
    {
        let device = self.ready_device::<I::Error>()?;
        device
            .opr_mode()
            .write_async(|w| w.set_mode(mode.bits()))
            .await?;
        delay.delay_ms(MODE_SETTLE_MS).await;
        Ok(())
    }

    /// Switch the power mode, then wait for the chip to settle
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConnected`] before bring-up, or a bus error.
    pub async fn set_power_mode<D>(
        &mut self,
        mode: PowerMode,
        delay: &mut D,
    ) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal_async::delay::DelayNs,
    {
        let device = self.ready_device::<I::Error>()?;
        device
            .pwr_mode()
            .write_async(|w| w.set_mode(mode.bits()))
            .await?;
        delay.delay_ms(MODE_SETTLE_MS).await;
        Ok(())
    }

    /// Read any single register
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConnected`] before bring-up, or a bus error.
    pub async fn read_register(&mut self, address: u8) -> Result<u8, Error<I::Error>> {
        let device = self.ready_device::<I::Error>()?;
        let mut buffer = [0u8; 1];
        device
            .interface
            .read_register(address, 8, &mut buffer)
            .await?;
        Ok(buffer[0])
    }

    /// Write any single register
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConnected`] before bring-up, or a bus error.
    pub async fn write_register(&mut self, address: u8, value: u8) -> Result<(), Error<I::Error>> {
        let device = self.ready_device::<I::Error>()?;
        device
            .interface
            .write_register(address, 8, &[value])
            .await?;
        Ok(())
    }
}
