//! Word exchange with the MC33HB2001
//!
//! The driver talks to the device through a single primitive: clock one
//! 16-bit word out and return the 16-bit word clocked in at the same time.
//! Anything that can do that implements [`Transport`]. [`SpiTransport`] covers
//! the common case of a blocking `embedded-hal` SPI bus with a manually driven
//! chip select line.

use core::fmt;

use embedded_hal::{blocking::spi, digital::v2::OutputPin};

/// A synchronous full-duplex exchange of one 16-bit word
///
/// Every call sends a command and returns whatever the device shifted out
/// during the same frame. Chip select, clocking and timeouts are the
/// implementation's business; the driver never retries a failed exchange.
pub trait Transport {
    /// The error returned when an exchange fails
    type Error;

    /// Send `word` to the device and return the word received in exchange
    fn exchange(&mut self, word: u16) -> Result<u16, Self::Error>;
}

impl<T> Transport for &mut T
where
    T: Transport + ?Sized,
{
    type Error = T::Error;

    fn exchange(&mut self, word: u16) -> Result<u16, Self::Error> {
        (**self).exchange(word)
    }
}

/// [`Transport`] over a blocking SPI bus and an active-low chip select pin
///
/// The bus must be configured for 8-bit words in the mode the MC33HB2001
/// expects (CPOL = 0, CPHA = 1). Each word goes out as two bytes, most
/// significant byte first, with chip select held low for the whole frame.
pub struct SpiTransport<SPI, CS> {
    spi: SPI,
    chip_select: CS,
    chip_select_delay: u8,
}

impl<SPI, CS> SpiTransport<SPI, CS> {
    /// Create a new instance of `SpiTransport`
    ///
    /// Requires the SPI peripheral and the chip select pin that are connected
    /// to the MC33HB2001.
    pub fn new(spi: SPI, chip_select: CS) -> Self {
        SpiTransport {
            spi,
            chip_select,
            chip_select_delay: 0,
        }
    }

    /// Set the chip select delay.
    ///
    /// This is the number of additional times the cs pin is set low before
    /// the frame is clocked out. Fast MCUs can use it to satisfy the device's
    /// chip select lead time.
    pub fn set_chip_select_delay(&mut self, delay: u8) {
        self.chip_select_delay = delay;
    }

    /// Release the SPI peripheral and the chip select pin
    pub fn free(self) -> (SPI, CS) {
        (self.spi, self.chip_select)
    }

    fn assert_cs_low(&mut self) -> Result<(), SpiError<SPI, CS>>
    where
        SPI: spi::Transfer<u8>,
        CS: OutputPin,
    {
        for _ in 0..=self.chip_select_delay {
            self.chip_select
                .set_low()
                .map_err(|err| SpiError::ChipSelect(err))?;
        }

        Ok(())
    }

    fn assert_cs_high(&mut self) -> Result<(), SpiError<SPI, CS>>
    where
        SPI: spi::Transfer<u8>,
        CS: OutputPin,
    {
        self.chip_select
            .set_high()
            .map_err(|err| SpiError::ChipSelect(err))?;

        Ok(())
    }
}

impl<SPI, CS> Transport for SpiTransport<SPI, CS>
where
    SPI: spi::Transfer<u8>,
    CS: OutputPin,
{
    type Error = SpiError<SPI, CS>;

    fn exchange(&mut self, word: u16) -> Result<u16, Self::Error> {
        let mut buffer = word.to_be_bytes();

        self.assert_cs_low()?;
        let response = self
            .spi
            .transfer(&mut buffer)
            .map(|received| u16::from_be_bytes([received[0], received[1]]));
        // Release the device even if the transfer failed, so the next frame
        // starts clean. A transfer error takes precedence over a chip select
        // error.
        let released = self.assert_cs_high();

        let response = response.map_err(|err| SpiError::Transfer(err))?;
        released?;

        Ok(response)
    }
}

/// An error that can occur when exchanging a word over SPI
pub enum SpiError<SPI, CS>
where
    SPI: spi::Transfer<u8>,
    CS: OutputPin,
{
    /// SPI error occured during a transfer transaction
    Transfer(<SPI as spi::Transfer<u8>>::Error),

    /// Error occured while changing chip select signal
    ChipSelect(<CS as OutputPin>::Error),
}

// We can't derive this implementation, as the compiler will complain that the
// associated error type doesn't implement `Debug`.
impl<SPI, CS> fmt::Debug for SpiError<SPI, CS>
where
    SPI: spi::Transfer<u8>,
    <SPI as spi::Transfer<u8>>::Error: fmt::Debug,
    CS: OutputPin,
    <CS as OutputPin>::Error: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SpiError::Transfer(error) => write!(f, "Transfer({:?})", error),
            SpiError::ChipSelect(error) => write!(f, "ChipSelect({:?})", error),
        }
    }
}
