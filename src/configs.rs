//! Driver configuration and typed field values
//!
//! [`Config`] is handed to [`MC33HB2001::init`]. The remaining types are the
//! values of the Control register's multi-bit and mode fields. Their
//! discriminants are the raw field values, and their defaults are the
//! device's reset values.
//!
//! [`MC33HB2001::init`]: crate::hl::MC33HB2001::init

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};

/// Driver configuration
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// When the response to a command shows up on the bus
    pub response_timing: ResponseTiming,
}

/// When the device returns the content of the register a command addressed
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum ResponseTiming {
    /// The response arrives during the frame after the command.
    ///
    /// A read is issued twice: the first response belongs to whatever was
    /// addressed before and is discarded.
    Pipelined,
    /// The response arrives during the same frame as the command.
    Immediate,
}

impl Default for ResponseTiming {
    fn default() -> Self {
        ResponseTiming::Pipelined
    }
}

/// OUTx rising and falling slew rate, measured from 10 % to 90 % of VPWR
#[derive(
    Copy, Clone, Debug, Eq, PartialEq, IntoPrimitive, TryFromPrimitive, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum SlewRate {
    /// Slew rate control bypassed
    Bypass = 0b000,
    /// 16 V/µs
    VoltPerUs16 = 0b001,
    /// 8 V/µs
    VoltPerUs8 = 0b010,
    /// 4 V/µs
    VoltPerUs4 = 0b011,
    /// 2 V/µs
    VoltPerUs2 = 0b100,
    /// 1 V/µs
    VoltPerUs1 = 0b101,
    /// 0.5 V/µs
    VoltPerUs0_5 = 0b110,
    /// 0.25 V/µs
    VoltPerUs0_25 = 0b111,
}

impl Default for SlewRate {
    fn default() -> Self {
        SlewRate::VoltPerUs2
    }
}

/// Overcurrent threshold of the active current limit
#[derive(
    Copy, Clone, Debug, Eq, PartialEq, IntoPrimitive, TryFromPrimitive, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum CurrentLimit {
    /// 5.4 A
    Amps5_4 = 0b00,
    /// 7.0 A
    Amps7_0 = 0b01,
    /// 8.8 A
    Amps8_8 = 0b10,
    /// 10.7 A
    Amps10_7 = 0b11,
}

impl Default for CurrentLimit {
    fn default() -> Self {
        CurrentLimit::Amps7_0
    }
}

/// Input control mode of the output stage
#[derive(
    Copy, Clone, Debug, Eq, PartialEq, IntoPrimitive, TryFromPrimitive, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum BridgeMode {
    /// Outputs driven as two independent half-bridges
    HalfBridge = 0b0,
    /// Outputs driven as one H-bridge
    FullBridge = 0b1,
}

impl Default for BridgeMode {
    fn default() -> Self {
        BridgeMode::HalfBridge
    }
}

/// One of the two SPI-controlled virtual inputs
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum VirtualInput {
    /// SPI equivalent of the IN1 pin
    Vin1,
    /// SPI equivalent of the IN2 pin
    Vin2,
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::TryFrom;

    #[test]
    fn defaults_match_device_reset_values() {
        assert_eq!(u8::from(SlewRate::default()), 0b100);
        assert_eq!(u8::from(CurrentLimit::default()), 0b01);
        assert_eq!(Config::default().response_timing, ResponseTiming::Pipelined);
    }

    #[test]
    fn raw_levels_outside_the_field_are_rejected() {
        assert_eq!(SlewRate::try_from(3u8).unwrap(), SlewRate::VoltPerUs4);
        assert!(SlewRate::try_from(8u8).is_err());

        assert_eq!(CurrentLimit::try_from(3u8).unwrap(), CurrentLimit::Amps10_7);
        assert!(CurrentLimit::try_from(4u8).is_err());

        assert!(BridgeMode::try_from(2u8).is_err());
    }
}
