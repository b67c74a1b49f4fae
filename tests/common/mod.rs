//! Common test utilities and mock implementations

pub mod mock_interface;
pub mod test_utils;

pub use mock_interface::{MockController, MockError, MockInterface, Operation};
pub use test_utils::{
    MockDelay, assert_float_eq, assert_vector_eq, create_connected_pwm, create_ready_imu,
};
