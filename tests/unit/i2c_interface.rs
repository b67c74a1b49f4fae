//! Unit tests for the I2C register adapter

use bno055_pca9685::I2cInterface;
use device_driver::RegisterInterface;
use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, Operation};

// Records the bytes each transaction puts on the bus
#[derive(Default)]
struct RecordingI2c {
    transactions: Vec<(u8, Vec<u8>)>,
}

impl ErrorType for RecordingI2c {
    type Error = ErrorKind;
}

impl I2c for RecordingI2c {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let mut written = Vec::new();
        for operation in operations.iter_mut() {
            match operation {
                Operation::Write(bytes) => written.extend_from_slice(bytes),
                Operation::Read(buffer) => buffer.fill(0xAB),
            }
        }
        self.transactions.push((address, written));
        Ok(())
    }
}

#[test]
fn test_write_sends_address_then_data() {
    let mut interface = I2cInterface::new(RecordingI2c::default(), 0x40);

    interface.write_register(0x06, 32, &[1, 2, 3, 4]).unwrap();

    let bus = interface.release();
    assert_eq!(bus.transactions, vec![(0x40, vec![0x06, 1, 2, 3, 4])]);
}

#[test]
fn test_long_write_is_not_truncated() {
    let payload: Vec<u8> = (0..40).collect();
    let mut interface = I2cInterface::new(RecordingI2c::default(), 0x28);

    interface.write_register(0x55, 320, &payload).unwrap();

    let bus = interface.release();
    assert_eq!(bus.transactions.len(), 1);
    assert_eq!(bus.transactions[0].1.len(), 41);
    assert_eq!(bus.transactions[0].1[0], 0x55);
    assert_eq!(&bus.transactions[0].1[1..], payload.as_slice());
}

#[test]
fn test_read_selects_register_first() {
    let mut interface = I2cInterface::new(RecordingI2c::default(), 0x28);
    let mut buffer = [0u8; 2];

    interface.read_register(0x34, 16, &mut buffer).unwrap();

    assert_eq!(buffer, [0xAB, 0xAB]);
    let bus = interface.release();
    assert_eq!(bus.transactions, vec![(0x28, vec![0x34])]);
}
