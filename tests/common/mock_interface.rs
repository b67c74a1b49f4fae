//! Mock register interface and bus controller for testing the drivers

use device_driver::RegisterInterface;
use bno055_pca9685::{BusController, ConnectError, ConnectionSettings};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

/// BNO055 `CHIP_ID` register, also PCA9685 MODE1
const IDENTITY_REGISTER: u8 = 0x00;

/// Records operations performed on the mock interface and delay
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Register read
    ReadRegister {
        /// First register address
        address: u8,
        /// Number of bytes read
        len: usize,
    },
    /// Register write
    WriteRegister {
        /// First register address
        address: u8,
        /// Bytes written
        data: Vec<u8>,
    },
    /// Wait requested through the delay
    Delay {
        /// Requested wait in milliseconds
        ms: u32,
    },
}

/// Shared state for mock interface (uses interior mutability)
#[derive(Debug, Default)]
struct MockState {
    /// Simulated register values
    registers: HashMap<u8, u8>,

    /// Values returned by successive reads of register 0x00 before falling
    /// back to the register map
    identity_sequence: VecDeque<u8>,

    /// Operations log for verification
    operations: Vec<Operation>,

    /// Failure injection flags
    fail_next_read: bool,
    fail_next_write: bool,
}

/// Mock interface for testing
#[derive(Clone, Default)]
pub struct MockInterface {
    state: Rc<RefCell<MockState>>,
}

impl MockInterface {
    /// Empty register map
    pub fn new() -> Self {
        Self::default()
    }

    /// BNO055 that answers with the expected chip identity
    pub fn bno055() -> Self {
        Self::bno055_with_chip_id(bno055_pca9685::BNO055_CHIP_ID)
    }

    /// BNO055 that answers with `chip_id`
    pub fn bno055_with_chip_id(chip_id: u8) -> Self {
        let interface = Self::new();
        interface.set_register(IDENTITY_REGISTER, chip_id);
        interface
    }

    /// PCA9685 with MODE1 at its power-on value
    pub fn pca9685() -> Self {
        let interface = Self::new();
        interface.set_register(IDENTITY_REGISTER, 0x11);
        interface
    }

    /// Set a register value
    pub fn set_register(&self, address: u8, value: u8) {
        self.state.borrow_mut().registers.insert(address, value);
    }

    /// Set a run of registers starting at `address`
    pub fn set_registers(&self, address: u8, values: &[u8]) {
        for (i, &value) in values.iter().enumerate() {
            self.set_register(address.wrapping_add(i as u8), value);
        }
    }

    /// Get a register value
    pub fn get_register(&self, address: u8) -> u8 {
        self.state
            .borrow()
            .registers
            .get(&address)
            .copied()
            .unwrap_or(0)
    }

    /// Queue values for the next reads of register 0x00
    pub fn queue_identity(&self, values: &[u8]) {
        self.state
            .borrow_mut()
            .identity_sequence
            .extend(values.iter().copied());
    }

    /// Inject a read failure on the next read operation
    pub fn fail_next_read(&self) {
        self.state.borrow_mut().fail_next_read = true;
    }

    /// Inject a write failure on the next write operation
    pub fn fail_next_write(&self) {
        self.state.borrow_mut().fail_next_write = true;
    }

    /// Log a wait
    pub fn record_delay(&self, ms: u32) {
        self.state.borrow_mut().operations.push(Operation::Delay { ms });
    }

    /// Get the operations log
    pub fn operations(&self) -> Vec<Operation> {
        self.state.borrow().operations.clone()
    }

    /// Clear the operations log
    pub fn clear_operations(&self) {
        self.state.borrow_mut().operations.clear();
    }

    /// Number of reads of `address`
    pub fn read_count(&self, address: u8) -> usize {
        self.state
            .borrow()
            .operations
            .iter()
            .filter(|op| matches!(op, Operation::ReadRegister { address: a, .. } if *a == address))
            .count()
    }

    /// Waits in the order they were requested
    pub fn delays(&self) -> Vec<u32> {
        self.state
            .borrow()
            .operations
            .iter()
            .filter_map(|op| match op {
                Operation::Delay { ms } => Some(*ms),
                _ => None,
            })
            .collect()
    }

    /// Register writes in the order they were issued
    pub fn writes(&self) -> Vec<(u8, Vec<u8>)> {
        self.state
            .borrow()
            .operations
            .iter()
            .filter_map(|op| match op {
                Operation::WriteRegister { address, data } => Some((*address, data.clone())),
                _ => None,
            })
            .collect()
    }

    /// Number of bus transactions (reads and writes)
    pub fn transaction_count(&self) -> usize {
        self.state
            .borrow()
            .operations
            .iter()
            .filter(|op| !matches!(op, Operation::Delay { .. }))
            .count()
    }
}

/// Mock error type
#[derive(Debug, Clone, PartialEq)]
pub enum MockError {
    /// Simulated communication error
    Communication,
}

impl RegisterInterface for MockInterface {
    type Error = MockError;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();

        if state.fail_next_read {
            state.fail_next_read = false;
            return Err(MockError::Communication);
        }

        state.operations.push(Operation::ReadRegister {
            address,
            len: read_data.len(),
        });

        for (i, byte) in read_data.iter_mut().enumerate() {
            let reg_addr = address.wrapping_add(i as u8);
            let queued = if reg_addr == IDENTITY_REGISTER {
                state.identity_sequence.pop_front()
            } else {
                None
            };
            *byte = queued.unwrap_or_else(|| state.registers.get(&reg_addr).copied().unwrap_or(0));
        }

        Ok(())
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();

        if state.fail_next_write {
            state.fail_next_write = false;
            return Err(MockError::Communication);
        }

        state.operations.push(Operation::WriteRegister {
            address,
            data: write_data.to_vec(),
        });

        for (i, &byte) in write_data.iter().enumerate() {
            state.registers.insert(address.wrapping_add(i as u8), byte);
        }

        Ok(())
    }
}

/// Mock bus controller handing out clones of one [`MockInterface`]
pub struct MockController {
    names: Vec<&'static str>,
    interface: MockInterface,
    fail_open: bool,
    opened: Vec<ConnectionSettings>,
}

impl MockController {
    /// Controller with a single endpoint named `name`
    pub fn new(name: &'static str, interface: &MockInterface) -> Self {
        Self {
            names: vec![name],
            interface: interface.clone(),
            fail_open: false,
            opened: Vec::new(),
        }
    }

    /// Controller that enumerates nothing
    pub fn empty() -> Self {
        Self {
            names: Vec::new(),
            interface: MockInterface::new(),
            fail_open: false,
            opened: Vec::new(),
        }
    }

    /// Make every `open` fail
    pub fn fail_open(mut self) -> Self {
        self.fail_open = true;
        self
    }

    /// Settings passed to every successful `open`
    pub fn opened(&self) -> &[ConnectionSettings] {
        &self.opened
    }
}

impl BusController for MockController {
    type Endpoint = usize;
    type Interface = MockInterface;

    fn enumerate(&mut self, selector: &str) -> impl Iterator<Item = Self::Endpoint> {
        let matches: Vec<usize> = self
            .names
            .iter()
            .enumerate()
            .filter(|(_, name)| **name == selector)
            .map(|(i, _)| i)
            .collect();
        matches.into_iter()
    }

    fn open(
        &mut self,
        _endpoint: Self::Endpoint,
        settings: ConnectionSettings,
    ) -> Result<Self::Interface, ConnectError> {
        if self.fail_open {
            return Err(ConnectError::EndpointUnavailable);
        }
        self.opened.push(settings);
        Ok(self.interface.clone())
    }
}
