//! Driver crate for the MC33HB2001 H-bridge motor driver
//!
//! The MC33HB2001 is configured and monitored through four 16-bit SPI
//! registers: identification, status, fault status mask and control. This
//! crate turns operations like "enable the outputs" or "set the slew rate"
//! into the read-modify-write transactions the device needs, and decodes the
//! registers into typed values.
//!
//! The driver works on top of any [`Transport`], a single 16-bit full-duplex
//! exchange. [`SpiTransport`] implements it for `embedded-hal` SPI buses.
//!
//! ``` rust,no_run
//! # fn example<SPI, CS>(spi: SPI, chip_select: CS)
//! # where
//! #     SPI: embedded_hal::blocking::spi::Transfer<u8>,
//! #     <SPI as embedded_hal::blocking::spi::Transfer<u8>>::Error: core::fmt::Debug,
//! #     CS: embedded_hal::digital::v2::OutputPin,
//! #     <CS as embedded_hal::digital::v2::OutputPin>::Error: core::fmt::Debug,
//! # {
//! use mc33hb2001::{Config, SlewRate, SpiTransport, MC33HB2001};
//!
//! let transport = SpiTransport::new(spi, chip_select);
//! let mut driver = MC33HB2001::new(transport)
//!     .init(Config::default())
//!     .expect("Failed to initialize MC33HB2001");
//!
//! driver.set_slew_rate(SlewRate::VoltPerUs4).expect("Failed to set slew rate");
//! driver.enable_output().expect("Failed to enable output");
//!
//! let status = driver.status().expect("Failed to read status");
//! if status.ot() == 1 {
//!     // overtemperature shutdown
//! }
//! # }
//! ```
//!
//! Nothing is locked between the read and the write half of an update. If
//! several handles can reach the same device, serialize their calls.

#![cfg_attr(not(test), no_std)]
#![deny(missing_docs)]

pub mod configs;
pub mod field;
pub mod hl;
pub mod ll;
pub mod transport;

mod error;

#[cfg(test)]
mod mock;

pub use crate::configs::{BridgeMode, Config, CurrentLimit, ResponseTiming, SlewRate, VirtualInput};
pub use crate::error::Error;
pub use crate::field::Field;
pub use crate::hl::{ControlState, FaultMask, Ready, Status, Uninitialized, MC33HB2001};
pub use crate::transport::{SpiError, SpiTransport, Transport};
