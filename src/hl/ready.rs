use core::convert::TryFrom;

use serde::{Deserialize, Serialize};

use crate::{
    field::Field,
    ll,
    transport::Transport,
    BridgeMode, CurrentLimit, Error, Ready, SlewRate, VirtualInput, MC33HB2001,
};

/// Snapshot of the status register
pub type Status = ll::status::R;

/// Snapshot of the fault status mask register
pub type FaultMask = ll::fault::R;

/// Decoded content of the Control register
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ControlState {
    /// Open load check requested
    pub open_load_check: bool,
    /// Thermal management mode enabled
    pub thermal_management: bool,
    /// Active current limit enabled
    pub active_current_limit: bool,
    /// Current limit threshold
    pub current_limit: CurrentLimit,
    /// Output slew rate
    pub slew_rate: SlewRate,
    /// Outputs enabled
    pub output_enabled: bool,
    /// Input control mode
    pub mode: BridgeMode,
    /// Outputs follow VIN1/VIN2 instead of the IN1/IN2 pins
    pub virtual_input_mode: bool,
    /// Level of VIN1
    pub vin1: bool,
    /// Level of VIN2
    pub vin2: bool,
}

impl From<ll::control::R> for ControlState {
    fn from(r: ll::control::R) -> Self {
        // Both fields are exactly as wide as their enums, so every raw value
        // has a variant.
        ControlState {
            open_load_check: r.cl() == 1,
            thermal_management: r.tm() == 1,
            active_current_limit: r.al() == 1,
            current_limit: CurrentLimit::try_from(r.ilim()).unwrap_or_default(),
            slew_rate: SlewRate::try_from(r.sr()).unwrap_or_default(),
            output_enabled: r.en() == 1,
            mode: BridgeMode::try_from(r.mode()).unwrap_or_default(),
            virtual_input_mode: r.input() == 1,
            vin1: r.vin1() == 1,
            vin2: r.vin2() == 1,
        }
    }
}

impl<T> MC33HB2001<T, Ready>
where
    T: Transport,
{
    /// Read the device identification
    pub fn device_id(&mut self) -> Result<u16, Error<T::Error>> {
        Ok(self.ll.id().read()?.value())
    }

    /// Read the status register
    pub fn status(&mut self) -> Result<Status, Error<T::Error>> {
        self.ll.status().read()
    }

    /// Read the fault status mask register
    pub fn fault_mask(&mut self) -> Result<FaultMask, Error<T::Error>> {
        self.ll.fault().read()
    }

    /// Read and decode the Control register
    pub fn control(&mut self) -> Result<ControlState, Error<T::Error>> {
        Ok(self.ll.control().read()?.into())
    }

    /// Request an open load check
    ///
    /// The check runs on the next transition from standby to normal mode.
    pub fn check_open_load(&mut self) -> Result<(), Error<T::Error>> {
        self.ll.set_field(Field::OpenLoadCheck)?;
        Ok(())
    }

    /// Enable thermal management mode
    ///
    /// While the thermal warning is active, the device lowers the current
    /// limit frequency.
    pub fn enable_thermal_management(&mut self) -> Result<(), Error<T::Error>> {
        self.ll.set_field(Field::ThermalManagement)?;
        Ok(())
    }

    /// Disable thermal management mode
    pub fn disable_thermal_management(&mut self) -> Result<(), Error<T::Error>> {
        self.ll.reset_field(Field::ThermalManagement)?;
        Ok(())
    }

    /// Enable the active current limit
    pub fn enable_current_limit(&mut self) -> Result<(), Error<T::Error>> {
        self.ll.set_field(Field::ActiveCurrentLimit)?;
        Ok(())
    }

    /// Disable the active current limit
    pub fn disable_current_limit(&mut self) -> Result<(), Error<T::Error>> {
        self.ll.reset_field(Field::ActiveCurrentLimit)?;
        Ok(())
    }

    /// Set the current limit threshold
    pub fn set_current_limit(&mut self, limit: CurrentLimit) -> Result<(), Error<T::Error>> {
        self.ll
            .write_field(Field::CurrentLimit, u8::from(limit).into())?;
        Ok(())
    }

    /// Set the output slew rate
    pub fn set_slew_rate(&mut self, rate: SlewRate) -> Result<(), Error<T::Error>> {
        self.ll.write_field(Field::SlewRate, u8::from(rate).into())?;
        Ok(())
    }

    /// Select the input control mode
    ///
    /// Full-bridge mode sets MODE. Half-bridge mode clears EN rather than
    /// MODE, matching how the device is commanded into half-bridge operation;
    /// the MODE bit is left as it was.
    pub fn set_mode(&mut self, mode: BridgeMode) -> Result<(), Error<T::Error>> {
        match mode {
            BridgeMode::FullBridge => self.ll.set_field(Field::Mode)?,
            BridgeMode::HalfBridge => self.ll.reset_field(Field::OutputEnable)?,
        };
        Ok(())
    }

    /// Enable the outputs
    pub fn enable_output(&mut self) -> Result<(), Error<T::Error>> {
        self.ll.set_field(Field::OutputEnable)?;
        Ok(())
    }

    /// Disable the outputs
    pub fn disable_output(&mut self) -> Result<(), Error<T::Error>> {
        self.ll.reset_field(Field::OutputEnable)?;
        Ok(())
    }

    /// Let VIN1/VIN2 drive the outputs instead of the IN1/IN2 pins
    pub fn enable_virtual_input(&mut self) -> Result<(), Error<T::Error>> {
        self.ll.set_field(Field::VirtualInputMode)?;
        Ok(())
    }

    /// Hand output control back to the IN1/IN2 pins
    pub fn disable_virtual_input(&mut self) -> Result<(), Error<T::Error>> {
        self.ll.reset_field(Field::VirtualInputMode)?;
        Ok(())
    }

    /// Drive a virtual input high (`true`) or low (`false`)
    pub fn set_virtual_input(
        &mut self,
        input: VirtualInput,
        high: bool,
    ) -> Result<(), Error<T::Error>> {
        let field = match input {
            VirtualInput::Vin1 => Field::VirtualInput1,
            VirtualInput::Vin2 => Field::VirtualInput2,
        };

        if high {
            self.ll.set_field(field)?;
        } else {
            self.ll.reset_field(field)?;
        }
        Ok(())
    }
}
