//! High-level driver API for the PCA9685
//!
//! The PCA9685 is a 16-channel, 12-bit PWM controller. Each channel has an
//! on tick and an off tick inside a 4096-tick cycle; bit 12 of either tick
//! forces the output fully on or fully off.
//!
//! The pure helpers in this module ([`prescale_for_frequency`] and the
//! [`ChannelTicks`] constructors) validate arguments and compute register
//! values without touching the bus. The driver methods validate first, then
//! check the connection, then talk to the chip, so a rejected argument never
//! causes a partial write.

use embedded_hal::digital::PinState;

use crate::codec;
use crate::interface::{BusController, BusSpeed, ConnectionSettings};
use crate::registers::pwm::{
    ALL_LED_ON_L, FULL_LEVEL_BIT, LED_STRIDE, LED0_ON_L, MODE1, MODE1_AI, MODE1_ALLCALL,
    MODE1_RESTART, MODE1_SLEEP, Pca9685 as RegisterDevice,
};
use crate::{ConnectError, DEFAULT_SELECTOR, Error, InvalidArgument, PCA9685_DEFAULT_ADDRESS};

#[cfg(feature = "async")]
use device_driver::AsyncRegisterInterface;
#[cfg(not(feature = "async"))]
use device_driver::RegisterInterface;

/// Number of PWM channels
pub const CHANNEL_COUNT: u8 = 16;

/// Highest tick inside one PWM cycle
pub const MAX_TICK: u16 = 4095;

/// Internal oscillator frequency in Hz
pub const OSCILLATOR_HZ: f32 = 25_000_000.0;

/// Ticks per PWM cycle
const TICKS_PER_CYCLE: f32 = 4096.0;

/// The internal oscillator runs fast; requested frequencies are scaled by this
/// factor before computing the prescaler
const FREQUENCY_CORRECTION: f32 = 0.9;

/// Wait for the oscillator after waking from sleep
pub const OSCILLATOR_SETTLE_MS: u32 = 5;

/// Duty cycles within this distance of 0 or 1 are forced fully off or on
pub const DEFAULT_DEAD_ZONE: f32 = 1e-4;

/// Compute the prescaler for an output frequency in Hz
///
/// `round(25 MHz / 4096 / (hz * 0.9) - 1)`, clamped to the 8-bit register.
///
/// # Errors
///
/// Returns [`InvalidArgument::Frequency`] if `hz` is not a positive finite
/// number.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn prescale_for_frequency(hz: f32) -> Result<u8, InvalidArgument> {
    if !hz.is_finite() || hz <= 0.0 {
        return Err(InvalidArgument::Frequency);
    }

    let prescale = OSCILLATOR_HZ / TICKS_PER_CYCLE / (hz * FREQUENCY_CORRECTION) - 1.0;
    let rounded = libm::floorf(prescale + 0.5);
    Ok(rounded.clamp(0.0, f32::from(u8::MAX)) as u8)
}

/// On and off tick of one channel, as written to `LEDn_ON` and `LEDn_OFF`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelTicks {
    /// Tick at which the output goes high (bit 12: always on)
    pub on: u16,
    /// Tick at which the output goes low (bit 12: always off)
    pub off: u16,
}

impl ChannelTicks {
    /// Regular waveform rising at `on` and falling at `off`
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::Tick`] if either tick exceeds 4095.
    pub const fn waveform(on: u16, off: u16) -> Result<Self, InvalidArgument> {
        if on > MAX_TICK {
            return Err(InvalidArgument::Tick(on));
        }
        if off > MAX_TICK {
            return Err(InvalidArgument::Tick(off));
        }
        Ok(Self { on, off })
    }

    /// Output forced high; `on` is kept in the low 12 bits as the turn-on delay
    #[must_use]
    pub const fn full_on(on: u16) -> Self {
        Self {
            on: FULL_LEVEL_BIT | (on & MAX_TICK),
            off: 0,
        }
    }

    /// Output forced low
    #[must_use]
    pub const fn full_off() -> Self {
        Self {
            on: 0,
            off: FULL_LEVEL_BIT,
        }
    }

    /// Waveform with an optional forced level
    ///
    /// Both ticks are range-checked even when `level` overrides them.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::Tick`] if either tick exceeds 4095.
    pub const fn with_level(
        on: u16,
        off: u16,
        level: Option<PinState>,
    ) -> Result<Self, InvalidArgument> {
        let ticks = match Self::waveform(on, off) {
            Ok(ticks) => ticks,
            Err(error) => return Err(error),
        };
        Ok(match level {
            None => ticks,
            Some(PinState::High) => Self::full_on(on),
            Some(PinState::Low) => Self::full_off(),
        })
    }

    /// Ticks for a duty cycle between 0.0 and 1.0
    ///
    /// Values within `dead_zone` of either end force the output fully off or
    /// fully on; everything else rises at tick 0 and falls at
    /// `floor(duty * 4095)`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::DutyCycle`] if `duty` is outside 0.0-1.0 and
    /// [`InvalidArgument::DeadZone`] if `dead_zone` is outside 0.0-0.5.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_duty_cycle(duty: f32, dead_zone: f32) -> Result<Self, InvalidArgument> {
        if !(0.0..=1.0).contains(&duty) {
            return Err(InvalidArgument::DutyCycle);
        }
        if !(0.0..0.5).contains(&dead_zone) {
            return Err(InvalidArgument::DeadZone);
        }

        if duty <= dead_zone {
            Ok(Self::full_off())
        } else if duty >= 1.0 - dead_zone {
            Ok(Self::full_on(0))
        } else {
            let off = libm::floorf(duty * f32::from(MAX_TICK)) as u16;
            Ok(Self { on: 0, off })
        }
    }

    /// Whether bit 12 forces the output to a fixed level
    #[must_use]
    pub const fn is_forced(&self) -> bool {
        (self.on | self.off) & FULL_LEVEL_BIT != 0
    }

    /// Register bytes `ON_L, ON_H, OFF_L, OFF_H`
    #[must_use]
    pub const fn to_bytes(self) -> [u8; 4] {
        codec::encode_pwm_pair(self.on, self.off)
    }
}

/// First register of channel `pin`
const fn channel_register(pin: u8) -> Result<u8, InvalidArgument> {
    if pin >= CHANNEL_COUNT {
        return Err(InvalidArgument::Pin(pin));
    }
    Ok(LED0_ON_L + LED_STRIDE * pin)
}

/// MODE1 value that puts the oscillator to sleep without a restart
const fn sleep_mode(mode1: u8) -> u8 {
    (mode1 & !MODE1_RESTART) | MODE1_SLEEP
}

/// MODE1 value that restarts the outputs with auto-increment and all-call
const fn restart_mode(mode1: u8) -> u8 {
    mode1 | MODE1_RESTART | MODE1_AI | MODE1_ALLCALL
}

/// PCA9685 connection configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmConfig {
    /// Friendly name of the I2C controller to enumerate
    pub selector: &'static str,
    /// 7-bit device address
    pub address: u8,
    /// Requested bus clock
    pub bus_speed: BusSpeed,
}

impl Default for PwmConfig {
    fn default() -> Self {
        Self {
            selector: DEFAULT_SELECTOR,
            address: PCA9685_DEFAULT_ADDRESS,
            bus_speed: BusSpeed::Standard,
        }
    }
}

impl PwmConfig {
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
    pub const fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    /// Set the requested bus clock
    #[must_use]
    pub const fn with_bus_speed(mut self, bus_speed: BusSpeed) -> Self {
        self.bus_speed = bus_speed;
        self
    }

    /// Connection settings derived from this configuration
    #[must_use]
    pub const fn connection_settings(&self) -> ConnectionSettings {
        ConnectionSettings::new(self.address).with_bus_speed(self.bus_speed)
    }
}

/// Main driver for the PCA9685
pub struct Pca9685Driver<I> {
    config: PwmConfig,
    device: Option<RegisterDevice<I>>,
    // Set once the reset write has gone through
    ready: bool,
}

impl<I> Pca9685Driver<I> {
    /// Create a disconnected driver
    #[must_use]
    pub const fn new(config: PwmConfig) -> Self {
        Self {
            config,
            device: None,
            ready: false,
        }
    }

    /// Whether a connection is open and the chip has been reset
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.ready && self.device.is_some()
    }

    /// Configuration this driver was created with
    #[must_use]
    pub const fn config(&self) -> &PwmConfig {
        &self.config
    }

    /// Give up the connection and return the interface
    ///
    /// Also returns the interface after a failed reset.
    pub fn release(&mut self) -> Option<I> {
        self.ready = false;
        self.device.take().map(|device| device.interface)
    }

    fn open<C>(&mut self, controller: &mut C) -> Result<I, ConnectError>
    where
        C: BusController<Interface = I>,
    {
        self.device = None;
        self.ready = false;

        let endpoint = controller
            .enumerate(self.config.selector)
            .next()
            .ok_or(ConnectError::NoController)?;
        let opened = controller.open(endpoint, self.config.connection_settings());

        #[cfg(feature = "defmt")]
        if let Err(error) = &opened {
            defmt::warn!("PCA9685: no connection on {}: {}", self.config.selector, error);
        }

        opened
    }

    fn connected_device<E>(&mut self) -> Result<&mut RegisterDevice<I>, Error<E>> {
        if !self.ready {
            return Err(Error::NotConnected);
        }
        self.device.as_mut().ok_or(Error::NotConnected)
    }

    fn attach(&mut self, interface: I) -> &mut RegisterDevice<I> {
        self.ready = false;
        self.device.insert(RegisterDevice::new(interface))
    }
}

#[cfg(not(feature = "async"))]
impl<I> Pca9685Driver<I>
where
    I: RegisterInterface<AddressType = u8>,
{
    /// Connect through `controller` and reset the chip
    ///
    /// # Errors
    ///
    /// Returns an error if no controller matches the selector, it cannot be
    /// opened, or the reset write fails.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let mut controller = DedicatedBus::new("I2C1", i2c);
    /// let mut pwm = Pca9685Driver::new(PwmConfig::default());
    /// pwm.initialize(&mut controller)?;
    /// pwm.set_frequency(50.0, &mut delay)?;
    /// pwm.set_duty_cycle(0, 0.075)?;
    /// ```
    pub fn initialize<C>(&mut self, controller: &mut C) -> Result<(), Error<I::Error>>
    where
        C: BusController<Interface = I>,
    {
        let interface = self.open(controller).map_err(Error::<I::Error>::Connect)?;
        self.connect_with(interface)
    }

    /// Take over an interface that is already open and reset the chip
    ///
    /// # Errors
    ///
    /// Returns a bus error if the reset write fails. The driver then stays
    /// disconnected, but [`release`](Self::release) still hands back the
    /// interface.
    pub fn connect_with(&mut self, interface: I) -> Result<(), Error<I::Error>> {
        let device = self.attach(interface);
        device.mode_1().write(|w| w.set_sleep(false))?;
        self.ready = true;

        #[cfg(feature = "defmt")]
        defmt::debug!("PCA9685 connected at {=u8:#x}", self.config.address);

        Ok(())
    }

    /// Write 0 to MODE1: oscillator on, no auto-increment, no all-call
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConnected`] without a connection, or a bus error.
    pub fn reset(&mut self) -> Result<(), Error<I::Error>> {
        let device = self.connected_device::<I::Error>()?;
        device.mode_1().write(|w| w.set_sleep(false))?;

        #[cfg(feature = "defmt")]
        defmt::debug!("PCA9685 reset");

        Ok(())
    }

    /// Set the PWM output frequency of all channels
    ///
    /// The prescaler can only be written while the oscillator sleeps, so this
    /// sleeps the chip, writes the prescaler, restores MODE1, waits for the
    /// oscillator and finally restarts the outputs with auto-increment and
    /// all-call enabled.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::Frequency`] for a non-positive or non-finite
    /// frequency, [`Error::NotConnected`] without a connection, or a bus error.
    pub fn set_frequency<D>(&mut self, hz: f32, delay: &mut D) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        let prescale = prescale_for_frequency(hz).map_err(Error::<I::Error>::InvalidArgument)?;
        let device = self.connected_device::<I::Error>()?;

        #[cfg(feature = "defmt")]
        defmt::debug!("PCA9685 frequency {} Hz, prescale {}", hz, prescale);

        let mut mode1 = [0u8; 1];
        device.interface.read_register(MODE1, 8, &mut mode1)?;
        let old_mode = mode1[0];

        device
            .interface
            .write_register(MODE1, 8, &[sleep_mode(old_mode)])?;
        device.pre_scale().write(|w| w.set_prescale(prescale))?;
        device.interface.write_register(MODE1, 8, &[old_mode])?;
        delay.delay_ms(OSCILLATOR_SETTLE_MS);
        device
            .interface
            .write_register(MODE1, 8, &[restart_mode(old_mode)])?;

        Ok(())
    }

    /// Write raw on and off ticks to one channel
    ///
    /// Ticks are written as given, including bit 12.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::Pin`] for a pin above 15,
    /// [`Error::NotConnected`] without a connection, or a bus error.
    pub fn write_raw_pwm(&mut self, pin: u8, on: u16, off: u16) -> Result<(), Error<I::Error>> {
        let register = channel_register(pin).map_err(Error::<I::Error>::InvalidArgument)?;
        self.write_channel(register, ChannelTicks { on, off })
    }

    /// Write raw on and off ticks to every channel at once
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConnected`] without a connection, or a bus error.
    pub fn write_raw_pwm_all(&mut self, on: u16, off: u16) -> Result<(), Error<I::Error>> {
        self.write_channel(ALL_LED_ON_L, ChannelTicks { on, off })
    }

    /// Set the waveform of one channel, optionally forcing its level
    ///
    /// `Some(PinState::High)` keeps `on` as the turn-on delay and forces the
    /// output on; `Some(PinState::Low)` forces it off.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::Tick`] for a tick above 4095,
    /// [`InvalidArgument::Pin`] for a pin above 15, [`Error::NotConnected`]
    /// without a connection, or a bus error.
    pub fn set_pwm_waveform(
        &mut self,
        pin: u8,
        on: u16,
        off: u16,
        level: Option<PinState>,
    ) -> Result<(), Error<I::Error>> {
        let ticks =
            ChannelTicks::with_level(on, off, level).map_err(Error::<I::Error>::InvalidArgument)?;
        let register = channel_register(pin).map_err(Error::<I::Error>::InvalidArgument)?;
        self.write_channel(register, ticks)
    }

    /// Set one channel to a duty cycle between 0.0 and 1.0
    ///
    /// Uses [`DEFAULT_DEAD_ZONE`].
    ///
    /// # Errors
    ///
    /// As [`set_duty_cycle_with_dead_zone`](Self::set_duty_cycle_with_dead_zone).
    pub fn set_duty_cycle(&mut self, pin: u8, duty: f32) -> Result<(), Error<I::Error>> {
        self.set_duty_cycle_with_dead_zone(pin, duty, DEFAULT_DEAD_ZONE)
    }

    /// Set one channel to a duty cycle with an explicit dead zone
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::DutyCycle`], [`InvalidArgument::DeadZone`]
    /// or [`InvalidArgument::Pin`] for out-of-range arguments,
    /// [`Error::NotConnected`] without a connection, or a bus error.
    pub fn set_duty_cycle_with_dead_zone(
        &mut self,
        pin: u8,
        duty: f32,
        dead_zone: f32,
    ) -> Result<(), Error<I::Error>> {
        let ticks = ChannelTicks::from_duty_cycle(duty, dead_zone)
            .map_err(Error::<I::Error>::InvalidArgument)?;
        let register = channel_register(pin).map_err(Error::<I::Error>::InvalidArgument)?;
        self.write_channel(register, ticks)
    }

    /// Read one raw register byte
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConnected`] without a connection, or a bus error.
    pub fn read_register(&mut self, register: u8) -> Result<u8, Error<I::Error>> {
        let device = self.connected_device::<I::Error>()?;
        let mut buffer = [0u8; 1];
        device.interface.read_register(register, 8, &mut buffer)?;
        Ok(buffer[0])
    }

    /// Write one raw register byte
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConnected`] without a connection, or a bus error.
    pub fn write_register(&mut self, register: u8, value: u8) -> Result<(), Error<I::Error>> {
        let device = self.connected_device::<I::Error>()?;
        device.interface.write_register(register, 8, &[value])?;
        Ok(())
    }

    fn write_channel(&mut self, register: u8, ticks: ChannelTicks) -> Result<(), Error<I::Error>> {
        let device = self.connected_device::<I::Error>()?;

        #[cfg(feature = "defmt")]
        defmt::trace!("PCA9685 {:#x} <- {}", register, ticks);

        device
            .interface
            .write_register(register, 32, &ticks.to_bytes())?;
        Ok(())
    }
}

#[cfg(feature = "async")]
impl<I> Pca9685Driver<I>
where
    I: AsyncRegisterInterface<AddressType = u8>,
{
    /// Connect through `controller` and reset the chip
    ///
    /// # Errors
    ///
    /// Returns an error if no controller matches the selector, it cannot be
    /// opened, or the reset write fails.
    pub async fn initialize<C>(&mut self, controller: &mut C) -> Result<(), Error<I::Error>>
    where
        C: BusController<Interface = I>,
    {
        let interface = self.open(controller).map_err(Error::<I::Error>::Connect)?;
        self.connect_with(interface).await
    }

    /// Take over an interface that is already open and reset the chip
    ///
    /// # Errors
    ///
    /// Returns a bus error if the reset write fails. The driver then stays
    /// disconnected, but [`release`](Self::release) still hands back the
    /// interface.
    pub async fn connect_with(&mut self, interface: I) -> Result<(), Error<I::Error>> {
        let device = self.attach(interface);
        device
            .mode_1()
            .write_async(|w| w.set_sleep(false))
            .await?;
        self.ready = true;

        #[cfg(feature = "defmt")]
        defmt::debug!("PCA9685 connected at {=u8:#x}", self.config.address);

        Ok(())
    }

    /// Write 0 to MODE1
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConnected`] without a connection, or a bus error.
    pub async fn reset(&mut self) -> Result<(), Error<I::Error>> {
        let device = self.connected_device::<I::Error>()?;
        device
            .mode_1()
            .write_async(|w| w.set_sleep(false))
            .await?;

        #[cfg(feature = "defmt")]
        defmt::debug!("PCA9685 reset");

        Ok(())
    }

    /// Set the PWM output frequency of all channels
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::Frequency`] for a non-positive or non-finite
    /// frequency, [`Error::NotConnected`] without a connection, or a bus error.
    pub async fn set_frequency<D>(
        &mut self,
        hz: f32,
        delay: &mut D,
    ) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal_async::delay::DelayNs,
    {
        let prescale = prescale_for_frequency(hz).map_err(Error::<I::Error>::InvalidArgument)?;
        let device = self.connected_device::<I::Error>()?;

        #[cfg(feature = "defmt")]
        defmt::debug!("PCA9685 frequency {} Hz, prescale {}", hz, prescale);

        let mut mode1 = [0u8; 1];
        device
            .interface
            .read_register(MODE1, 8, &mut mode1)
            .await?;
        let old_mode = mode1[0];

        device
            .interface
            .write_register(MODE1, 8, &[sleep_mode(old_mode)])
            .await?;
        device
            .pre_scale()
            .write_async(|w| w.set_prescale(prescale))
            .await?;
        device
            .interface
            .write_register(MODE1, 8, &[old_mode])
            .await?;
        delay.delay_ms(OSCILLATOR_SETTLE_MS).await;
        device
            .interface
            .write_register(MODE1, 8, &[restart_mode(old_mode)])
            .await?;

        Ok(())
    }

    /// Write raw on and off ticks to one channel
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::Pin`] for a pin above 15,
    /// [`Error::NotConnected`] without a connection, or a bus error.
    pub async fn write_raw_pwm(
        &mut self,
        pin: u8,
        on: u16,
        off: u16,
    ) -> Result<(), Error<I::Error>> {
        let register = channel_register(pin).map_err(Error::<I::Error>::InvalidArgument)?;
        self.write_channel(register, ChannelTicks { on, off })
            .await
    }

    /// Write raw on and off ticks to every channel at once
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConnected`] without a connection, or a bus error.
    pub async fn write_raw_pwm_all(
        &mut self,
        on: u16,
        off: u16,
    ) -> Result<(), Error<I::Error>> {
        self.write_channel(ALL_LED_ON_L, ChannelTicks { on, off })
            .await
    }

    /// Set the waveform of one channel, optionally forcing its level
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::Tick`] for a tick above 4095,
    /// [`InvalidArgument::Pin`] for a pin above 15, [`Error::NotConnected`]
    /// without a connection, or a bus error.
    pub async fn set_pwm_waveform(
        &mut self,
        pin: u8,
        on: u16,
        off: u16,
        level: Option<PinState>,
    ) -> Result<(), Error<I::Error>> {
        let ticks =
            ChannelTicks::with_level(on, off, level).map_err(Error::<I::Error>::InvalidArgument)?;
        let register = channel_register(pin).map_err(Error::<I::Error>::InvalidArgument)?;
        self.write_channel(register, ticks).await
    }

    /// Set one channel to a duty cycle between 0.0 and 1.0
    ///
    /// # Errors
    ///
    /// As [`set_duty_cycle_with_dead_zone`](Self::set_duty_cycle_with_dead_zone).
    pub async fn set_duty_cycle(
        &mut self,
        pin: u8,
        duty: f32,
    ) -> Result<(), Error<I::Error>> {
        self.set_duty_cycle_with_dead_zone(pin, duty, DEFAULT_DEAD_ZONE)
            .await
    }

    /// Set one channel to a duty cycle with an explicit dead zone
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::DutyCycle`], [`InvalidArgument::DeadZone`]
    /// or [`InvalidArgument::Pin`] for out-of-range arguments,
    /// [`Error::NotConnected`] without a connection, or a bus error.
    pub async fn set_duty_cycle_with_dead_zone(
        &mut self,
        pin: u8,
        duty: f32,
        dead_zone: f32,
    ) -> Result<(), Error<I::Error>> {
        let ticks = ChannelTicks::from_duty_cycle(duty, dead_zone)
            .map_err(Error::<I::Error>::InvalidArgument)?;
        let register = channel_register(pin).map_err(Error::<I::Error>::InvalidArgument)?;
        self.write_channel(register, ticks).await
    }

    /// Read one raw register byte
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConnected`] without a connection, or a bus error.
    pub async fn read_register(&mut self, register: u8) -> Result<u8, Error<I::Error>> {
        let device = self.connected_device::<I::Error>()?;
        let mut buffer = [0u8; 1];
        device
            .interface
            .read_register(register, 8, &mut buffer)
            .await?;
        Ok(buffer[0])
    }

    /// Write one raw register byte
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConnected`] without a connection, or a bus error.
    pub async fn write_register(
        &mut self,
        register: u8,
        value: u8,
    ) -> Result<(), Error<I::Error>> {
        let device = self.connected_device::<I::Error>()?;
        device
            .interface
            .write_register(register, 8, &[value])
            .await?;
        Ok(())
    }

    async fn write_channel(
        &mut self,
        register: u8,
        ticks: ChannelTicks,
    ) -> Result<(), Error<I::Error>> {
        let device = self.connected_device::<I::Error>()?;
        device
            .interface
            .write_register(register, 32, &ticks.to_bytes())
            .await?;
        Ok(())
    }
}
