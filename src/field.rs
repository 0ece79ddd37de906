//! Named fields of the Control register
//!
//! Every field the driver mutates is described here by the register it lives
//! in, the position of its lowest bit and its width. The register-level
//! engine needs nothing else to update a field: see
//! [`ll::MC33HB2001::write_field`].
//!
//! [`ll::MC33HB2001::write_field`]: crate::ll::MC33HB2001::write_field

use crate::ll::{Address, PAYLOAD_MASK};

/// A bit or group of bits in a register payload
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Field {
    /// CL: check for open load on the transition from standby to normal mode
    OpenLoadCheck,
    /// TM: change current limit frequency while in thermal warning
    ThermalManagement,
    /// AL: active current limit once the ILIM threshold is exceeded
    ActiveCurrentLimit,
    /// ILIM: overcurrent threshold
    CurrentLimit,
    /// SR: output slew rate
    SlewRate,
    /// EN: output enable
    OutputEnable,
    /// MODE: input control mode
    Mode,
    /// INPUT: outputs follow VIN1/VIN2 instead of the IN1/IN2 pins
    VirtualInputMode,
    /// VIN2: SPI equivalent of IN2
    VirtualInput2,
    /// VIN1: SPI equivalent of IN1
    VirtualInput1,
}

impl Field {
    /// Register, bit offset and bit width of the field
    const fn layout(self) -> (Address, u16, u16) {
        match self {
            Field::OpenLoadCheck => (Address::Control, 12, 1),
            Field::ThermalManagement => (Address::Control, 11, 1),
            Field::ActiveCurrentLimit => (Address::Control, 10, 1),
            Field::CurrentLimit => (Address::Control, 8, 2),
            Field::SlewRate => (Address::Control, 5, 3),
            Field::OutputEnable => (Address::Control, 4, 1),
            Field::Mode => (Address::Control, 3, 1),
            Field::VirtualInputMode => (Address::Control, 2, 1),
            Field::VirtualInput2 => (Address::Control, 1, 1),
            Field::VirtualInput1 => (Address::Control, 0, 1),
        }
    }

    /// The register that holds the field
    pub const fn register(self) -> Address {
        self.layout().0
    }

    /// Position of the field's lowest bit within the payload
    pub const fn offset(self) -> u16 {
        self.layout().1
    }

    /// Number of bits in the field
    pub const fn width(self) -> u16 {
        self.layout().2
    }

    /// The field's bits within the payload
    pub const fn mask(self) -> u16 {
        (((1 << self.width()) - 1) << self.offset()) & PAYLOAD_MASK
    }

    /// Shift `value` into position, dropping bits that don't fit the field
    pub const fn bits(self, value: u16) -> u16 {
        (value << self.offset()) & self.mask()
    }
}
