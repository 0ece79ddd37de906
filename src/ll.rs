//! Low-level interface to the MC33HB2001
//!
//! This module implements a register-level interface to the MC33HB2001. Users
//! of this library should typically not need to use this. Please consider
//! using the [high-level interface] instead.
//!
//! Every SPI frame is a 16-bit word:
//!
//! ``` text
//! bit 15:     operation (0 = read, 1 = write)
//! bits 14-13: register address
//! bits 12-0:  payload
//! ```
//!
//! A write replaces the whole register, so changing a single field means
//! reading the register first and writing back the modified payload. All such
//! updates go through [`MC33HB2001::modify_payload`]. Nothing is locked between
//! the read and the write; if another handle writes the same register in
//! between, one of the two updates is lost.
//!
//! **NOTE**: Field write methods accept types that have a larger number of
//! bits than the field actually consists of. If you use such a method to pass
//! a value that is too large to be written to the field, it will be silently
//! truncated.
//!
//! [high-level interface]: ../hl/index.html

use core::marker::PhantomData;

use crate::{field::Field, transport::Transport, Config, Error, ResponseTiming};

/// Bits of a word that carry the register payload
pub const PAYLOAD_MASK: u16 = 0x1FFF;

const OPERATION_SHIFT: u16 = 15;
const ADDRESS_SHIFT: u16 = 13;

/// Entry point to the MC33HB2001 driver's low-level API
///
/// Please consider using [hl::MC33HB2001] instead.
///
/// [hl::MC33HB2001]: ../hl/struct.MC33HB2001.html
pub struct MC33HB2001<T> {
    transport: T,
    response_timing: ResponseTiming,
}

impl<T> MC33HB2001<T> {
    /// Create a new instance of `MC33HB2001`
    ///
    /// Requires the transport that is connected to the MC33HB2001.
    pub fn new(transport: T) -> Self {
        MC33HB2001 {
            transport,
            response_timing: ResponseTiming::default(),
        }
    }

    /// Apply a driver configuration
    pub fn configure(&mut self, config: &Config) {
        self.response_timing = config.response_timing;
    }

    /// Set when the device's response to a command arrives
    pub fn set_response_timing(&mut self, timing: ResponseTiming) {
        self.response_timing = timing;
    }

    /// When the device's response to a command arrives
    pub fn response_timing(&self) -> ResponseTiming {
        self.response_timing
    }

    /// Access the transport
    pub fn transport(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Release the transport
    pub fn free(self) -> T {
        self.transport
    }
}

impl<T> MC33HB2001<T>
where
    T: Transport,
{
    /// Exchange one command with the device and return the raw response
    pub fn exchange(&mut self, command: Command) -> Result<u16, Error<T::Error>> {
        let word = command.encode();
        let response = self.transport.exchange(word).map_err(Error::Transport)?;

        log::trace!("mc33hb2001: sent 0x{:04x}, received 0x{:04x}", word, response);

        Ok(response)
    }

    /// Read the payload of a register
    ///
    /// With [`ResponseTiming::Pipelined`] the read command is sent twice and
    /// only the second response is used, since the first one belongs to the
    /// previously addressed register.
    pub fn read_payload(&mut self, address: Address) -> Result<u16, Error<T::Error>> {
        let command = Command::read(address);

        let mut response = self.exchange(command)?;
        if self.response_timing == ResponseTiming::Pipelined {
            response = self.exchange(command)?;
        }

        Ok(response & PAYLOAD_MASK)
    }

    /// Overwrite the payload of a register
    ///
    /// The response to the write is discarded. Only registers that implement
    /// [`Writable`] can be written:
    ///
    /// ``` compile_fail
    /// # fn clear_status<T: mc33hb2001::Transport>(ll: &mut mc33hb2001::ll::MC33HB2001<T>) {
    /// ll.write_payload::<mc33hb2001::ll::STATUS>(0);
    /// # }
    /// ```
    pub fn write_payload<R>(&mut self, payload: u16) -> Result<(), Error<T::Error>>
    where
        R: Register + Writable,
    {
        self.exchange(Command::write(R::ADDRESS, payload))?;
        Ok(())
    }

    /// Read a register, pass its payload through `f` and write the result back
    ///
    /// Returns the payload that was written. If the read fails, nothing is
    /// written.
    pub fn modify_payload<R, F>(&mut self, f: F) -> Result<u16, Error<T::Error>>
    where
        R: Register + Writable,
        F: FnOnce(u16) -> u16,
    {
        let current = self.read_payload(R::ADDRESS)?;
        let payload = f(current) & PAYLOAD_MASK;
        self.write_payload::<R>(payload)?;

        log::debug!(
            "mc33hb2001: {:?} 0x{:04x} -> 0x{:04x}",
            R::ADDRESS,
            current,
            payload
        );

        Ok(payload)
    }

    /// Set the bits in `mask`, keeping all others
    ///
    /// ``` compile_fail
    /// # fn set_fault<T: mc33hb2001::Transport>(ll: &mut mc33hb2001::ll::MC33HB2001<T>) {
    /// ll.set_bits::<mc33hb2001::ll::FAULT>(0x0010);
    /// # }
    /// ```
    pub fn set_bits<R>(&mut self, mask: u16) -> Result<u16, Error<T::Error>>
    where
        R: Register + Writable,
    {
        self.modify_payload::<R, _>(|payload| payload | mask)
    }

    /// Clear the bits in `mask`, keeping all others
    pub fn clear_bits<R>(&mut self, mask: u16) -> Result<u16, Error<T::Error>>
    where
        R: Register + Writable,
    {
        // The inverted mask has the operation and address bits set;
        // `modify_payload` masks them off again.
        self.modify_payload::<R, _>(|payload| payload & !mask)
    }

    /// Replace the bits in `mask` with the corresponding bits of `bits`
    pub fn replace_bits<R>(&mut self, mask: u16, bits: u16) -> Result<u16, Error<T::Error>>
    where
        R: Register + Writable,
    {
        self.modify_payload::<R, _>(|payload| (payload & !mask) | (bits & mask))
    }

    /// Set every bit of a field
    ///
    /// Every [`Field`] lives in the Control register.
    pub fn set_field(&mut self, field: Field) -> Result<u16, Error<T::Error>> {
        self.set_bits::<CONTROL>(field.mask())
    }

    /// Clear every bit of a field
    pub fn reset_field(&mut self, field: Field) -> Result<u16, Error<T::Error>> {
        self.clear_bits::<CONTROL>(field.mask())
    }

    /// Write `value` into a field, keeping the rest of its register
    ///
    /// `value` is truncated to the width of the field.
    pub fn write_field(&mut self, field: Field, value: u16) -> Result<u16, Error<T::Error>> {
        self.replace_bits::<CONTROL>(field.mask(), field.bits(value))
    }
}

/// The operation encoded in bit 15 of a command
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Operation {
    /// Return the addressed register
    Read = 0b0,
    /// Replace the addressed register with the payload
    Write = 0b1,
}

/// The register address encoded in bits 14-13 of a command
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Address {
    /// Device identification
    Id = 0b00,
    /// Status
    Status = 0b01,
    /// Fault status mask
    Fault = 0b10,
    /// Configuration and control
    Control = 0b11,
}

impl Address {
    /// Whether this driver writes to the register
    pub fn is_writable(self) -> bool {
        self == Address::Control
    }
}

/// A command word, split into its parts
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Command {
    /// Read or write
    pub operation: Operation,
    /// Target register
    pub address: Address,
    /// Register payload, only meaningful for writes
    pub payload: u16,
}

impl Command {
    /// A read of `address`
    pub fn read(address: Address) -> Self {
        Command {
            operation: Operation::Read,
            address,
            payload: 0,
        }
    }

    /// A write of `payload` to `address`
    pub fn write(address: Address, payload: u16) -> Self {
        Command {
            operation: Operation::Write,
            address,
            payload,
        }
    }

    /// Assemble the wire word
    ///
    /// Payload bits above bit 12 are dropped, so they can never leak into the
    /// operation or address bits.
    pub fn encode(self) -> u16 {
        ((self.operation as u16) << OPERATION_SHIFT)
            | ((self.address as u16) << ADDRESS_SHIFT)
            | (self.payload & PAYLOAD_MASK)
    }

    /// Split a wire word into its parts
    pub fn decode(word: u16) -> Self {
        let operation = if word >> OPERATION_SHIFT == 0 {
            Operation::Read
        } else {
            Operation::Write
        };
        let address = match (word >> ADDRESS_SHIFT) & 0b11 {
            0b00 => Address::Id,
            0b01 => Address::Status,
            0b10 => Address::Fault,
            _ => Address::Control,
        };

        Command {
            operation,
            address,
            payload: word & PAYLOAD_MASK,
        }
    }
}

/// Provides access to a register
///
/// You can get an instance for a given register using one of the methods on
/// [`MC33HB2001`].
pub struct RegAccessor<'s, R, T>(&'s mut MC33HB2001<T>, PhantomData<R>);

impl<'s, R, T> RegAccessor<'s, R, T>
where
    T: Transport,
{
    /// Read from the register
    pub fn read(&mut self) -> Result<R::Read, Error<T::Error>>
    where
        R: Register + Readable,
    {
        let payload = self.0.read_payload(R::ADDRESS)?;
        Ok(R::read(payload))
    }

    /// Write to the register
    ///
    /// Fields not set by `f` are written as zero.
    pub fn write<F>(&mut self, f: F) -> Result<(), Error<T::Error>>
    where
        R: Register + Writable,
        F: FnOnce(&mut R::Write) -> &mut R::Write,
    {
        let mut w = R::write(0);
        f(&mut w);

        self.0.write_payload::<R>(R::payload(&w))
    }

    /// Modify the register
    pub fn modify<F>(&mut self, f: F) -> Result<(), Error<T::Error>>
    where
        R: Register + Readable + Writable,
        F: for<'w> FnOnce(&R::Read, &'w mut R::Write) -> &'w mut R::Write,
    {
        self.0.modify_payload::<R, _>(|payload| {
            let r = R::read(payload);
            let mut w = R::write(payload);
            f(&r, &mut w);
            R::payload(&w)
        })?;

        Ok(())
    }
}

/// Implemented for all registers
///
/// This is a mostly internal crate that should not be implemented or used
/// directly by users of this crate. It is exposed through the public API
/// though, so it can't be made private.
pub trait Register {
    /// The register address
    const ADDRESS: Address;
}

/// Marker trait for registers that can be read from
///
/// This is a mostly internal crate that should not be implemented or used
/// directly by users of this crate. It is exposed through the public API
/// though, so it can't be made private.
pub trait Readable {
    /// The type that is used to read from the register
    type Read;

    /// Wrap a payload read from the register
    fn read(payload: u16) -> Self::Read;
}

/// Marker trait for registers that can be written to
///
/// This is a mostly internal crate that should not be implemented or used
/// directly by users of this crate. It is exposed through the public API
/// though, so it can't be made private.
pub trait Writable {
    /// The type that is used to write to the register
    type Write;

    /// Return the write type for this register, starting from `payload`
    fn write(payload: u16) -> Self::Write;

    /// Return the payload held by the write type
    fn payload(w: &Self::Write) -> u16;
}

/// Generates register implementations
macro_rules! impl_register {
    (
        $(
            $address:expr,
            $rw:tt,
            $name:ident($name_lower:ident) {
            #[$doc:meta]
            $(
                $field:ident,
                $first_bit:expr,
                $last_bit:expr,
                $ty:ty;
                #[$field_doc:meta]
            )*
            }
        )*
    ) => {
        $(
            #[$doc]
            #[allow(non_camel_case_types)]
            pub struct $name;

            impl Register for $name {
                const ADDRESS: Address = $address;
            }

            #[$doc]
            pub mod $name_lower {
                use core::fmt;


                /// Used to read from the register
                #[derive(Copy, Clone, Eq, PartialEq)]
                pub struct R(pub(crate) u16);

                impl R {
                    /// The raw register payload
                    pub fn raw(&self) -> u16 {
                        self.0
                    }

                    $(
                        #[$field_doc]
                        pub fn $field(&self) -> $ty {
                            const WIDTH: u16 = $last_bit - $first_bit + 1;
                            const MASK:  u16 = (1 << WIDTH) - 1;

                            ((self.0 >> $first_bit) & MASK) as $ty
                        }
                    )*
                }

                impl fmt::Debug for R {
                    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                        write!(f, "0x{:04x}", self.0)
                    }
                }


                /// Used to write to the register
                pub struct W(pub(crate) u16);

                impl W {
                    $(
                        #[$field_doc]
                        pub fn $field(&mut self, value: $ty) -> &mut Self {
                            const WIDTH: u16 = $last_bit - $first_bit + 1;
                            const MASK:  u16 = (1 << WIDTH) - 1;

                            self.0 &= !(MASK << $first_bit);
                            self.0 |= ((value as u16) & MASK) << $first_bit;
                            self
                        }
                    )*
                }
            }

            impl_rw!($rw, $name, $name_lower);
        )*


        impl<T> MC33HB2001<T> {
            $(
                #[$doc]
                pub fn $name_lower(&mut self) -> RegAccessor<'_, $name, T> {
                    RegAccessor(self, PhantomData)
                }
            )*
        }
    }
}

// Helper macro, used internally by `impl_register!`
macro_rules! impl_rw {
    (RO, $name:ident, $name_lower:ident) => {
        impl_rw!(@R, $name, $name_lower);
    };
    (RW, $name:ident, $name_lower:ident) => {
        impl_rw!(@R, $name, $name_lower);
        impl_rw!(@W, $name, $name_lower);
    };

    (@R, $name:ident, $name_lower:ident) => {
        impl Readable for $name {
            type Read = $name_lower::R;

            fn read(payload: u16) -> Self::Read {
                $name_lower::R(payload & PAYLOAD_MASK)
            }
        }
    };
    (@W, $name:ident, $name_lower:ident) => {
        impl Writable for $name {
            type Write = $name_lower::W;

            fn write(payload: u16) -> Self::Write {
                $name_lower::W(payload & PAYLOAD_MASK)
            }

            fn payload(w: &Self::Write) -> u16 {
                w.0 & PAYLOAD_MASK
            }
        }
    };
}

// All registers are implemented in this macro invocation. It follows the
// following syntax:
// <address>, <RO/RW>, <name-upper>(name-lower) { /// <doc>
//     <field 1>
//     <field 2>
//     ...
// }
//
// Each field follows the following syntax:
// <name>, <first-bit-index>, <last-bit-index>, <type>; /// <doc>
impl_register! {
    Address::Id, RO, ID(id) { /// Device identification
        value,  0, 12, u16; /// Identification payload
    }
    Address::Status, RO, STATUS(status) { /// Status
        ot,     0,  0, u8; /// Overtemperature shutdown
        tw,     1,  1, u8; /// Thermal warning
        oc,     2,  2, u8; /// Overcurrent, current limit has been activated
        ol,     3,  3, u8; /// Open load
        scg1,   4,  4, u8; /// Short-circuit to ground, output 1
        scg2,   5,  5, u8; /// Short-circuit to ground, output 2
        scp1,   6,  6, u8; /// Short-circuit to power, output 1
        scp2,   7,  7, u8; /// Short-circuit to power, output 2
        ov,     8,  8, u8; /// VPWR overvoltage
        uv,     9,  9, u8; /// VPWR undervoltage
        cp_u,  10, 10, u8; /// Charge pump undervoltage
        frm,   11, 11, u8; /// SPI framing error
    }
    Address::Fault, RO, FAULT(fault) { /// Fault status mask
        ot,     0,  0, u8; /// Overtemperature shutdown
        tw,     1,  1, u8; /// Thermal warning
        oc,     2,  2, u8; /// Overcurrent
        ol,     3,  3, u8; /// Open load
        scg1,   4,  4, u8; /// Short-circuit to ground, output 1
        scg2,   5,  5, u8; /// Short-circuit to ground, output 2
        scp1,   6,  6, u8; /// Short-circuit to power, output 1
        scp2,   7,  7, u8; /// Short-circuit to power, output 2
        ov,     8,  8, u8; /// VPWR overvoltage
        uv,     9,  9, u8; /// VPWR undervoltage
        cp_u,  10, 10, u8; /// Charge pump undervoltage
        frm,   11, 11, u8; /// SPI framing error
    }
    Address::Control, RW, CONTROL(control) { /// Configuration and control
        vin1,   0,  0, u8; /// Virtual input 1 (SPI equivalent of IN1)
        vin2,   1,  1, u8; /// Virtual input 2 (SPI equivalent of IN2)
        input,  2,  2, u8; /// SPI control of outputs through VIN1/VIN2
        mode,   3,  3, u8; /// Input control mode
        en,     4,  4, u8; /// Output enable
        sr,     5,  7, u8; /// Slew rate
        ilim,   8,  9, u8; /// Current limit threshold
        al,    10, 10, u8; /// Active current limit
        tm,    11, 11, u8; /// Thermal management mode
        cl,    12, 12, u8; /// Open load check
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{FakeDevice, FakeError, Shared};
    use core::cell::RefCell;

    fn engine(timing: ResponseTiming) -> MC33HB2001<FakeDevice> {
        let mut ll = MC33HB2001::new(FakeDevice::new(timing));
        ll.set_response_timing(timing);
        ll
    }

    #[test]
    fn command_encoding_is_bit_exact() {
        assert_eq!(Command::read(Address::Id).encode(), 0x0000);
        assert_eq!(Command::read(Address::Status).encode(), 0x2000);
        assert_eq!(Command::read(Address::Fault).encode(), 0x4000);
        assert_eq!(Command::read(Address::Control).encode(), 0x6000);
        assert_eq!(Command::write(Address::Control, 0x0010).encode(), 0xE010);
    }

    #[test]
    fn oversized_payload_cannot_touch_header_bits() {
        let word = Command::write(Address::Status, 0xFFFF).encode();
        assert_eq!(word, 0xBFFF);

        let command = Command::decode(word);
        assert_eq!(command.operation, Operation::Write);
        assert_eq!(command.address, Address::Status);
        assert_eq!(command.payload, PAYLOAD_MASK);
    }

    #[test]
    fn pipelined_read_discards_the_stale_response() {
        let mut ll = engine(ResponseTiming::Pipelined);
        ll.transport().set(Address::Status, 0x0104);

        assert_eq!(ll.read_payload(Address::Status).unwrap(), 0x0104);
        assert_eq!(ll.transport().sent(), &[0x2000, 0x2000]);
    }

    #[test]
    fn immediate_read_uses_a_single_exchange() {
        let mut ll = engine(ResponseTiming::Immediate);
        ll.transport().set(Address::Status, 0x0104);

        assert_eq!(ll.read_payload(Address::Status).unwrap(), 0x0104);
        assert_eq!(ll.transport().sent(), &[0x2000]);
    }

    #[test]
    fn set_bits_preserves_other_bits() {
        for &timing in &[ResponseTiming::Pipelined, ResponseTiming::Immediate] {
            for &(initial, mask) in &[(0x0000, 0x0010), (0x1A5A, 0x0101), (0x1FFF, 0x0003)] {
                let mut ll = engine(timing);
                ll.transport().set(Address::Control, initial);

                ll.set_bits::<CONTROL>(mask).unwrap();

                let payload = ll.read_payload(Address::Control).unwrap();
                assert_eq!(payload & mask, mask);
                assert_eq!(payload & !mask, initial & !mask);
            }
        }
    }

    #[test]
    fn clear_bits_clears_exactly_the_mask() {
        for &(initial, mask) in &[(0x1FFF, 0x0010), (0x1A5A, 0x0A0A), (0x0000, 0x1000)] {
            let mut ll = engine(ResponseTiming::Pipelined);
            ll.transport().set(Address::Control, initial);

            ll.clear_bits::<CONTROL>(mask).unwrap();

            assert_eq!(ll.transport().get(Address::Control), initial & !mask);
        }
    }

    #[test]
    fn set_then_clear_restores_the_original_payload() {
        // The mask covers bits that are clear to begin with.
        for &(initial, mask) in &[(0x0A41, 0x0004), (0x0000, 0x1FFF), (0x1001, 0x0110)] {
            let mut ll = engine(ResponseTiming::Pipelined);
            ll.transport().set(Address::Control, initial);

            ll.set_bits::<CONTROL>(mask).unwrap();
            ll.clear_bits::<CONTROL>(mask).unwrap();

            assert_eq!(ll.transport().get(Address::Control), initial);
        }
    }

    #[test]
    fn set_bits_is_idempotent() {
        let mut ll = engine(ResponseTiming::Pipelined);
        ll.transport().set(Address::Control, 0x0208);

        let once = ll.set_bits::<CONTROL>(0x0030).unwrap();
        let twice = ll.set_bits::<CONTROL>(0x0030).unwrap();

        assert_eq!(once, twice);
        assert_eq!(ll.transport().get(Address::Control), 0x0238);
    }

    #[test]
    fn write_field_touches_only_that_field() {
        let mut ll = engine(ResponseTiming::Pipelined);
        // ILIM = level 1, SR = 0b101, EN and MODE set
        ll.transport().set(Address::Control, 0x0100 | 0x00A0 | 0x0018);

        ll.write_field(Field::CurrentLimit, 0b11).unwrap();

        assert_eq!(ll.transport().get(Address::Control), 0x0300 | 0x00A0 | 0x0018);
    }

    #[test]
    fn failed_read_aborts_before_the_write() {
        for &(timing, fail_at) in &[
            (ResponseTiming::Immediate, 0),
            (ResponseTiming::Pipelined, 0),
            (ResponseTiming::Pipelined, 1),
        ] {
            let mut ll = engine(timing);
            ll.transport().set(Address::Control, 0x0040);
            ll.transport().fail_at(fail_at);

            match ll.set_bits::<CONTROL>(0x0010) {
                Err(Error::Transport(FakeError)) => {}
                other => panic!("unexpected result: {:?}", other),
            }

            assert!(ll
                .transport()
                .sent()
                .iter()
                .all(|&word| Command::decode(word).operation == Operation::Read));
            assert_eq!(ll.transport().get(Address::Control), 0x0040);
        }
    }

    #[test]
    fn failed_write_is_reported_once() {
        let mut ll = engine(ResponseTiming::Pipelined);
        ll.transport().fail_at(2);

        assert!(ll.set_bits::<CONTROL>(0x0010).is_err());
        assert_eq!(ll.transport().attempts(), 3);
    }

    #[test]
    fn typed_modify_keeps_unrelated_fields() {
        let mut ll = engine(ResponseTiming::Pipelined);
        ll.transport().set(Address::Control, 0x0810);

        ll.control()
            .modify(|r, w| {
                assert_eq!(r.en(), 1);
                assert_eq!(r.tm(), 1);
                w.sr(0b011)
            })
            .unwrap();

        let control = ll.control().read().unwrap();
        assert_eq!(control.raw(), 0x0870);
        assert_eq!(control.sr(), 0b011);
        assert_eq!(control.tm(), 1);
    }

    #[test]
    fn typed_write_replaces_the_whole_register() {
        let mut ll = engine(ResponseTiming::Immediate);
        ll.transport().set(Address::Control, 0x1FFF);

        ll.control().write(|w| w.en(1).ilim(0b10)).unwrap();

        assert_eq!(ll.transport().get(Address::Control), 0x0210);
        assert_eq!(ll.transport().sent(), &[0xE210]);
    }

    fn writable_address<R: Register + Writable>() -> Address {
        R::ADDRESS
    }

    #[test]
    fn only_control_is_writable() {
        assert_eq!(writable_address::<CONTROL>(), Address::Control);
        assert!(Address::Control.is_writable());
        assert!(!Address::Id.is_writable());
        assert!(!Address::Status.is_writable());
        assert!(!Address::Fault.is_writable());
    }

    #[test]
    fn read_only_registers_are_never_written() {
        let mut ll = engine(ResponseTiming::Immediate);
        ll.transport().set(Address::Fault, 0x0040);

        ll.id().read().unwrap();
        ll.status().read().unwrap();
        ll.fault().read().unwrap();
        ll.set_field(Field::OutputEnable).unwrap();

        let writes: Vec<u16> = ll
            .transport()
            .sent()
            .iter()
            .copied()
            .filter(|word| Command::decode(*word).operation == Operation::Write)
            .collect();
        assert_eq!(writes, [0xE010]);
        assert_eq!(ll.transport().get(Address::Fault), 0x0040);
    }

    #[test]
    fn typed_read_decodes_status_flags() {
        let mut ll = engine(ResponseTiming::Pipelined);
        ll.transport().set(Address::Status, 0x0A05);

        let status = ll.status().read().unwrap();
        assert_eq!(status.raw(), 0x0A05);
        assert_eq!(status.frm(), 1);
        assert_eq!(status.uv(), 1);
        assert_eq!(status.ov(), 0);
        assert_eq!(status.oc(), 1);
        assert_eq!(status.ot(), 1);
        assert_eq!(status.tw(), 0);
    }

    #[test]
    fn unserialized_interleaving_loses_an_update() {
        let device = RefCell::new(FakeDevice::new(ResponseTiming::Immediate));
        let mut a = MC33HB2001::new(Shared(&device));
        let mut b = MC33HB2001::new(Shared(&device));
        a.set_response_timing(ResponseTiming::Immediate);
        b.set_response_timing(ResponseTiming::Immediate);

        let seen_by_a = a.read_payload(Address::Control).unwrap();
        let seen_by_b = b.read_payload(Address::Control).unwrap();
        a.write_payload::<CONTROL>(seen_by_a | Field::OutputEnable.mask())
            .unwrap();
        b.write_payload::<CONTROL>(seen_by_b | Field::ThermalManagement.mask())
            .unwrap();

        let payload = device.borrow().get(Address::Control);
        assert_eq!(payload & Field::OutputEnable.mask(), 0);
        assert_eq!(payload & Field::ThermalManagement.mask(), Field::ThermalManagement.mask());
    }

    #[test]
    fn serialized_updates_are_both_kept() {
        let device = RefCell::new(FakeDevice::new(ResponseTiming::Pipelined));
        let mut a = MC33HB2001::new(Shared(&device));
        let mut b = MC33HB2001::new(Shared(&device));

        a.set_field(Field::OutputEnable).unwrap();
        b.set_field(Field::ThermalManagement).unwrap();

        let expected = Field::OutputEnable.mask() | Field::ThermalManagement.mask();
        assert_eq!(device.borrow().get(Address::Control), expected);
    }
}
