//! In-memory stand-in for the MC33HB2001, used by the tests

use core::cell::RefCell;

use crate::{
    ll::{Address, Command, Operation, PAYLOAD_MASK},
    transport::Transport,
    ResponseTiming,
};

/// Error returned by [`FakeDevice`] when a failure was injected
#[derive(Debug, Eq, PartialEq)]
pub(crate) struct FakeError;

/// Holds the four registers and answers commands the way the device does
///
/// Every response carries the address bits of the register it belongs to, so
/// a driver that forgets to mask responses will notice. Writes to registers
/// the driver treats as read-only are ignored.
pub(crate) struct FakeDevice {
    registers: [u16; 4],
    timing: ResponseTiming,
    addressed: Address,
    sent: Vec<u16>,
    attempts: usize,
    fail_at: Option<usize>,
}

impl FakeDevice {
    pub(crate) fn new(timing: ResponseTiming) -> Self {
        FakeDevice {
            registers: [0; 4],
            timing,
            addressed: Address::Id,
            sent: Vec::new(),
            attempts: 0,
            fail_at: None,
        }
    }

    pub(crate) fn set(&mut self, address: Address, payload: u16) {
        self.registers[address as usize] = payload & PAYLOAD_MASK;
    }

    pub(crate) fn get(&self, address: Address) -> u16 {
        self.registers[address as usize]
    }

    /// Words that were exchanged successfully, in order
    pub(crate) fn sent(&self) -> &[u16] {
        &self.sent
    }

    /// Number of exchanges attempted, failed ones included
    pub(crate) fn attempts(&self) -> usize {
        self.attempts
    }

    /// Fail the exchange with the given zero-based index
    pub(crate) fn fail_at(&mut self, attempt: usize) {
        self.fail_at = Some(attempt);
    }

    fn response(&self, address: Address) -> u16 {
        ((address as u16) << 13) | self.get(address)
    }
}

impl Transport for FakeDevice {
    type Error = FakeError;

    fn exchange(&mut self, word: u16) -> Result<u16, FakeError> {
        let attempt = self.attempts;
        self.attempts += 1;
        if self.fail_at == Some(attempt) {
            return Err(FakeError);
        }

        let command = Command::decode(word);
        let response = match self.timing {
            ResponseTiming::Pipelined => self.response(self.addressed),
            ResponseTiming::Immediate => self.response(command.address),
        };

        if command.operation == Operation::Write && command.address.is_writable() {
            self.set(command.address, command.payload);
        }

        self.addressed = command.address;
        self.sent.push(word);

        Ok(response)
    }
}

/// Lets several driver handles talk to the same [`FakeDevice`]
pub(crate) struct Shared<'a>(pub(crate) &'a RefCell<FakeDevice>);

impl Transport for Shared<'_> {
    type Error = FakeError;

    fn exchange(&mut self, word: u16) -> Result<u16, FakeError> {
        self.0.borrow_mut().exchange(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_control_accepts_writes() {
        let mut device = FakeDevice::new(ResponseTiming::Immediate);
        device.set(Address::Fault, 0x0123);

        for &address in &[Address::Id, Address::Status, Address::Fault] {
            device
                .exchange(Command::write(address, 0x1FFF).encode())
                .unwrap();
        }
        device
            .exchange(Command::write(Address::Control, 0x0070).encode())
            .unwrap();

        assert_eq!(device.get(Address::Id), 0);
        assert_eq!(device.get(Address::Status), 0);
        assert_eq!(device.get(Address::Fault), 0x0123);
        assert_eq!(device.get(Address::Control), 0x0070);
    }
}
