//! Register maps for the BNO055 and the PCA9685
//!
//! Single-byte control registers are described with `device-driver` so the
//! drivers get typed field access. Multi-byte data blocks (sensor vectors,
//! quaternion, PWM channels) are read and written as raw byte runs through the
//! interface, so only their base addresses live here.
//!
//! Every address in this module is fixed datasheet data.

device_driver::create_device!(
    device_name: Bno055,
    dsl: {
        config {
            type RegisterAddressType = u8;
            type DefaultByteOrder = LE;
        }

        /// CHIP_ID - Chip Identification (page 0, 0x00)
        /// Expected value: 0xA0
        register ChipId {
            const ADDRESS = 0x00;
            const SIZE_BITS = 8;

            /// Chip identity (should read 0xA0)
            chip_id: uint = 0..8,
        },

        /// PAGE_ID - Register Page Selection (0x07)
        register PageId {
            const ADDRESS = 0x07;
            const SIZE_BITS = 8;

            /// Selected page (0 or 1)
            page: uint = 0..8,
        },

        /// TEMP - Temperature (page 0, 0x34)
        register Temp {
            const ADDRESS = 0x34;
            const SIZE_BITS = 8;

            /// Temperature, two's complement, 1 °C per LSB
            temp: uint = 0..8,
        },

        /// OPR_MODE - Operation Mode (page 0, 0x3D)
        register OprMode {
            const ADDRESS = 0x3D;
            const SIZE_BITS = 8;

            /// Operation mode, see `OperationMode`
            mode: uint = 0..4,
            reserved_7_4: uint = 4..8,
        },

        /// PWR_MODE - Power Mode (page 0, 0x3E)
        register PwrMode {
            const ADDRESS = 0x3E;
            const SIZE_BITS = 8;

            /// Power mode, see `PowerMode`
            mode: uint = 0..2,
            reserved_7_2: uint = 2..8,
        },

        /// SYS_TRIGGER - System Trigger (page 0, 0x3F)
        register SysTrigger {
            const ADDRESS = 0x3F;
            const SIZE_BITS = 8;

            /// Trigger self test
            self_test: bool = 0,
            reserved_4_1: uint = 1..5,
            /// Reset the system
            rst_sys: bool = 5,
            /// Reset interrupt status
            rst_int: bool = 6,
            /// Use external oscillator
            clk_sel: bool = 7,
        }
    }
);

/// Base address of the accelerometer data block (`ACC_DATA_X_LSB`)
pub const BNO055_ACC_DATA: u8 = 0x08;
/// Base address of the magnetometer data block (`MAG_DATA_X_LSB`)
pub const BNO055_MAG_DATA: u8 = 0x0E;
/// Base address of the gyroscope data block (`GYR_DATA_X_LSB`)
pub const BNO055_GYR_DATA: u8 = 0x14;
/// Base address of the Euler angle data block (`EUL_HEADING_LSB`)
pub const BNO055_EUL_DATA: u8 = 0x1A;
/// Base address of the quaternion data block (`QUA_DATA_W_LSB`), 8 bytes
pub const BNO055_QUA_DATA: u8 = 0x20;
/// Base address of the linear acceleration data block (`LIA_DATA_X_LSB`)
pub const BNO055_LIA_DATA: u8 = 0x28;
/// Base address of the gravity vector data block (`GRV_DATA_X_LSB`)
pub const BNO055_GRV_DATA: u8 = 0x2E;
/// `CALIB_STAT`, four 2-bit calibration levels packed in one byte
pub const BNO055_CALIB_STAT: u8 = 0x35;

/// PCA9685 register map
pub mod pwm {
    device_driver::create_device!(
        device_name: Pca9685,
        dsl: {
            config {
                type RegisterAddressType = u8;
                type DefaultByteOrder = LE;
            }

            /// MODE1 - Mode Register 1 (0x00)
            register Mode1 {
                const ADDRESS = 0x00;
                const SIZE_BITS = 8;

                /// Respond to the LED all-call address
                allcall: bool = 0,
                /// Respond to sub-address 3
                sub3: bool = 1,
                /// Respond to sub-address 2
                sub2: bool = 2,
                /// Respond to sub-address 1
                sub1: bool = 3,
                /// Low power mode, oscillator off
                sleep: bool = 4,
                /// Register auto-increment
                ai: bool = 5,
                /// Use the EXTCLK pin clock
                extclk: bool = 6,
                /// Restart enabled
                restart: bool = 7,
            },

            /// PRE_SCALE - Output Frequency Prescaler (0xFE)
            /// Only writable while MODE1 sleep is set
            register PreScale {
                const ADDRESS = 0xFE;
                const SIZE_BITS = 8;

                /// Prescale value
                prescale: uint = 0..8,
            }
        }
    );

    /// MODE1 register address, used for the raw read-modify-write sequences
    pub const MODE1: u8 = 0x00;
    /// MODE1 restart bit
    pub const MODE1_RESTART: u8 = 0x80;
    /// MODE1 auto-increment bit
    pub const MODE1_AI: u8 = 0x20;
    /// MODE1 sleep bit
    pub const MODE1_SLEEP: u8 = 0x10;
    /// MODE1 all-call bit
    pub const MODE1_ALLCALL: u8 = 0x01;

    /// `LED0_ON_L`, first of the four per-channel registers
    ///
    /// Channel `n` starts at `LED0_ON_L + 4 * n`.
    pub const LED0_ON_L: u8 = 0x06;
    /// Number of registers per channel (`ON_L`, `ON_H`, `OFF_L`, `OFF_H`)
    pub const LED_STRIDE: u8 = 4;

    /// `ALL_LED_ON_L`, first of the four broadcast registers
    pub const ALL_LED_ON_L: u8 = 0xFA;

    /// Bit 12 of an on/off tick value (bit 4 of `ON_H`/`OFF_H`): full on / full off
    pub const FULL_LEVEL_BIT: u16 = 0x1000;
}
