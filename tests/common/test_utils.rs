//! Test utilities and helper functions

use crate::common::mock_interface::{MockController, MockInterface};
use bno055_pca9685::{Bno055Driver, ImuConfig, Pca9685Driver, PwmConfig, Vector3};

/// Mock delay implementation for testing
///
/// Never sleeps. When created with [`MockDelay::recording`] every wait is
/// appended to the interface's operations log, so tests can check the order
/// of waits against bus transactions.
#[derive(Clone, Default)]
pub struct MockDelay {
    log: Option<MockInterface>,
}

impl MockDelay {
    /// Delay that records nothing
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay that records into `interface`'s operations log
    pub fn recording(interface: &MockInterface) -> Self {
        Self {
            log: Some(interface.clone()),
        }
    }

    fn record(&self, ms: u32) {
        if let Some(log) = &self.log {
            log.record_delay(ms);
        }
    }
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, _ns: u32) {
        // Only millisecond waits are recorded
    }

    fn delay_ms(&mut self, ms: u32) {
        self.record(ms);
    }
}

/// Create a BNO055 driver that has completed bring-up with the default config
///
/// Returns (driver, interface) where interface is a clone that shares state with
/// the driver. The operations log is cleared after bring-up.
pub fn create_ready_imu() -> (Bno055Driver<MockInterface>, MockInterface) {
    let interface = MockInterface::bno055();
    let mut controller = MockController::new("I2C1", &interface);
    let mut driver = Bno055Driver::new(ImuConfig::default());
    driver
        .initialize(&mut controller, &mut MockDelay::new())
        .expect("Failed to bring up mock BNO055");
    interface.clear_operations();
    (driver, interface)
}

/// Create a connected PCA9685 driver with the default config
///
/// The operations log is cleared after the reset write.
pub fn create_connected_pwm() -> (Pca9685Driver<MockInterface>, MockInterface) {
    let interface = MockInterface::pca9685();
    let mut controller = MockController::new("I2C1", &interface);
    let mut driver = Pca9685Driver::new(PwmConfig::default());
    driver
        .initialize(&mut controller)
        .expect("Failed to connect mock PCA9685");
    interface.clear_operations();
    (driver, interface)
}

/// Assert that two floating point values are approximately equal
pub fn assert_float_eq(a: f64, b: f64, epsilon: f64) {
    let diff = (a - b).abs();
    assert!(
        diff < epsilon,
        "Values not equal within epsilon: {} vs {} (diff: {}, epsilon: {})",
        a,
        b,
        diff,
        epsilon
    );
}

/// Assert that two vectors are approximately equal component-wise
pub fn assert_vector_eq(actual: Vector3, expected: Vector3, epsilon: f64) {
    assert_float_eq(actual.x, expected.x, epsilon);
    assert_float_eq(actual.y, expected.y, epsilon);
    assert_float_eq(actual.z, expected.z, epsilon);
}
