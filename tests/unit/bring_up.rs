//! Unit tests for the BNO055 bring-up sequence

use crate::common::{MockController, MockDelay, MockInterface, Operation};
use bno055_pca9685::{
    AddressMode, BNO055_CHIP_ID, BringUpState, Bno055Driver, BusSpeed, ConnectError, Error,
    ImuConfig, OperationMode, Step,
};

fn write(address: u8, data: &[u8]) -> Operation {
    Operation::WriteRegister {
        address,
        data: data.to_vec(),
    }
}

fn read(address: u8, len: usize) -> Operation {
    Operation::ReadRegister { address, len }
}

fn delay(ms: u32) -> Operation {
    Operation::Delay { ms }
}

#[test]
fn test_bring_up_sequence() {
    let interface = MockInterface::bno055();
    let mut controller = MockController::new("I2C1", &interface);
    let mut delay_source = MockDelay::recording(&interface);
    let mut driver = Bno055Driver::new(ImuConfig::default());

    driver
        .initialize(&mut controller, &mut delay_source)
        .unwrap();

    assert_eq!(driver.state(), BringUpState::Ready);
    assert_eq!(
        interface.operations(),
        vec![
            // Probing
            read(0x00, 1),
            // ConfiguringMode
            write(0x3D, &[0x00]),
            delay(30),
            // Resetting
            write(0x3F, &[0x20]),
            delay(1000),
            read(0x00, 1),
            delay(50),
            // PoweringUp
            write(0x3E, &[0x00]),
            delay(30),
            write(0x07, &[0x00]),
            write(0x3F, &[0x00]),
            delay(10),
            // FinalConfiguring
            write(0x3D, &[0x0C]),
            delay(30),
            delay(10),
        ]
    );
}

#[test]
fn test_opens_configured_address() {
    let interface = MockInterface::bno055();
    let mut controller = MockController::new("I2C1", &interface);
    let config = ImuConfig::default()
        .with_address(AddressMode::B)
        .with_bus_speed(BusSpeed::Fast);
    let mut driver = Bno055Driver::new(config);

    driver
        .initialize(&mut controller, &mut MockDelay::new())
        .unwrap();

    assert_eq!(controller.opened().len(), 1);
    assert_eq!(controller.opened()[0].address, 0x29);
    assert_eq!(controller.opened()[0].bus_speed, BusSpeed::Fast);
}

#[test]
fn test_wrong_chip_id_reads_twice_with_single_retry() {
    let interface = MockInterface::bno055_with_chip_id(0x00);
    let mut controller = MockController::new("I2C1", &interface);
    let mut delay_source = MockDelay::recording(&interface);
    let mut driver = Bno055Driver::new(ImuConfig::default());

    let result = driver.initialize(&mut controller, &mut delay_source);

    assert!(matches!(
        result,
        Err(Error::InvalidDevice {
            expected: BNO055_CHIP_ID,
            found: 0x00
        })
    ));
    assert_eq!(driver.state(), BringUpState::Failed(Step::Probing));
    assert!(!driver.is_ready());
    assert_eq!(
        interface.operations(),
        vec![read(0x00, 1), delay(1000), read(0x00, 1)]
    );
}

#[test]
fn test_probe_retry_count_follows_config() {
    let interface = MockInterface::bno055_with_chip_id(0x55);
    let mut controller = MockController::new("I2C1", &interface);
    let mut delay_source = MockDelay::recording(&interface);
    let mut driver = Bno055Driver::new(ImuConfig::default().with_probe(3, 200));

    assert!(
        driver
            .initialize(&mut controller, &mut delay_source)
            .is_err()
    );

    assert_eq!(interface.read_count(0x00), 4);
    assert_eq!(interface.delays(), vec![200, 200, 200]);
    assert_eq!(interface.transaction_count(), 4);
}

#[test]
fn test_probe_recovers_on_retry() {
    let interface = MockInterface::bno055();
    interface.queue_identity(&[0x00]);
    let mut controller = MockController::new("I2C1", &interface);
    let mut delay_source = MockDelay::recording(&interface);
    let mut driver = Bno055Driver::new(ImuConfig::default());

    driver
        .initialize(&mut controller, &mut delay_source)
        .unwrap();

    assert!(driver.is_ready());
    // Two probe reads plus one post-reset poll
    assert_eq!(interface.read_count(0x00), 3);
    assert_eq!(interface.delays()[0], 1000);
}

#[test]
fn test_reset_polls_until_chip_answers() {
    let interface = MockInterface::bno055();
    // Probe matches, then two failed polls after reset
    interface.queue_identity(&[BNO055_CHIP_ID, 0xFF, 0x00]);
    let mut controller = MockController::new("I2C1", &interface);
    let mut delay_source = MockDelay::recording(&interface);
    let mut driver = Bno055Driver::new(ImuConfig::default());

    driver
        .initialize(&mut controller, &mut delay_source)
        .unwrap();

    assert_eq!(interface.read_count(0x00), 4);
    assert_eq!(&interface.delays()[..5], &[30, 1000, 40, 40, 50]);
}

#[test]
fn test_no_controller() {
    let mut controller = MockController::empty();
    let mut driver = Bno055Driver::new(ImuConfig::default());

    let result = driver.initialize(&mut controller, &mut MockDelay::new());

    assert!(matches!(
        result,
        Err(Error::Connect(ConnectError::NoController))
    ));
    assert_eq!(driver.state(), BringUpState::Failed(Step::Connecting));
    assert!(driver.release().is_none());
}

#[test]
fn test_selector_mismatch() {
    let interface = MockInterface::bno055();
    let mut controller = MockController::new("I2C2", &interface);
    let mut driver = Bno055Driver::new(ImuConfig::default());

    let result = driver.initialize(&mut controller, &mut MockDelay::new());

    assert!(matches!(
        result,
        Err(Error::Connect(ConnectError::NoController))
    ));
    assert_eq!(interface.transaction_count(), 0);

    let mut driver = Bno055Driver::new(ImuConfig::default().with_selector("I2C2"));
    driver
        .initialize(&mut controller, &mut MockDelay::new())
        .unwrap();
    assert!(driver.is_ready());
}

#[test]
fn test_open_failure() {
    let interface = MockInterface::bno055();
    let mut controller = MockController::new("I2C1", &interface).fail_open();
    let mut driver = Bno055Driver::new(ImuConfig::default());

    let result = driver.initialize(&mut controller, &mut MockDelay::new());

    assert!(matches!(
        result,
        Err(Error::Connect(ConnectError::EndpointUnavailable))
    ));
    assert_eq!(driver.state(), BringUpState::Failed(Step::Connecting));
}

#[test]
fn test_bus_failure_aborts_in_current_step() {
    let interface = MockInterface::bno055();
    interface.fail_next_write();
    let mut controller = MockController::new("I2C1", &interface);
    let mut driver = Bno055Driver::new(ImuConfig::default());

    let result = driver.initialize(&mut controller, &mut MockDelay::new());

    assert!(matches!(result, Err(Error::Bus(_))));
    assert_eq!(driver.state(), BringUpState::Failed(Step::ConfiguringMode));
    // Only the probe read made it to the bus
    assert_eq!(interface.transaction_count(), 1);
    // The interface is still recoverable
    assert!(driver.release().is_some());
    assert_eq!(driver.state(), BringUpState::Disconnected);
}

#[test]
fn test_reinitialize_after_failure() {
    let interface = MockInterface::bno055_with_chip_id(0x00);
    let mut controller = MockController::new("I2C1", &interface);
    let mut driver = Bno055Driver::new(ImuConfig::default());

    assert!(
        driver
            .initialize(&mut controller, &mut MockDelay::new())
            .is_err()
    );

    interface.set_register(0x00, BNO055_CHIP_ID);
    driver
        .initialize(&mut controller, &mut MockDelay::new())
        .unwrap();
    assert_eq!(driver.state(), BringUpState::Ready);
}

#[test]
fn test_target_operation_mode() {
    let interface = MockInterface::bno055();
    let mut controller = MockController::new("I2C1", &interface);
    let mut driver =
        Bno055Driver::new(ImuConfig::default().with_operation_mode(OperationMode::ImuPlus));

    driver
        .initialize(&mut controller, &mut MockDelay::new())
        .unwrap();

    let last_mode_write = interface
        .writes()
        .into_iter()
        .filter(|(address, _)| *address == 0x3D)
        .last();
    assert_eq!(last_mode_write, Some((0x3D, vec![0x08])));
}

#[test]
fn test_connect_with_open_interface() {
    let interface = MockInterface::bno055();
    let mut driver = Bno055Driver::new(ImuConfig::default());

    driver
        .connect_with(interface.clone(), &mut MockDelay::new())
        .unwrap();

    assert!(driver.is_ready());
    assert_eq!(interface.read_count(0x00), 2);
}
