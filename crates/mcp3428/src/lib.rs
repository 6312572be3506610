//! Provides a driver for a Microchip MCP3428 4-channel delta-sigma ADC via the `embedded-hal` ecosystem.
//!
//! The driver owns the chip's configuration byte and bus address, drives the
//! write-config / read-sample transaction pair, and converts raw samples to
//! millivolts and then to a temperature through a [`LinearCalibration`].
//!
//! ```ignore
//! let address = DeviceAddress::from_pins(AddressPin::Low, AddressPin::High);
//! let mut adc = Mcp3428::new(i2c, address);
//! let celsius = adc.read_temperature(1)?;
//! ```

#![no_std]
#![forbid(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate std;

use embedded_hal::i2c::I2c;

mod address;
mod calibration;
mod config;
mod error;
pub mod mcp3428;

pub use address::{AddressPin, DeviceAddress, InvalidDeviceIndex};
pub use calibration::LinearCalibration;
pub use config::{Channel, Config, ConversionMode, Gain, SampleRate};
pub use error::Error;
pub use mcp3428::Mcp3428;

/// Number of bytes the chip returns for one read: two data bytes and the status byte.
pub const READ_LEN: usize = 3;

/// The bus primitives the driver depends on.
///
/// Addresses are 7-bit; the transport is responsible for the R/W bit.
/// Every method is one blocking transaction.
pub trait Transport {
    type Error;

    /// Addresses the device without a payload. `Ok` means the device acknowledged.
    fn probe(&mut self, address: u8) -> Result<(), Self::Error>;

    /// Writes a single byte in its own transaction.
    fn write_byte(&mut self, address: u8, byte: u8) -> Result<(), Self::Error>;

    /// Requests `buffer.len()` bytes and returns how many were actually delivered.
    fn request(&mut self, address: u8, buffer: &mut [u8]) -> Result<usize, Self::Error>;
}

/// An `embedded-hal` read either fills the whole buffer or fails.
impl<I: I2c> Transport for I {
    type Error = I::Error;

    fn probe(&mut self, address: u8) -> Result<(), Self::Error> {
        self.write(address, &[])
    }

    fn write_byte(&mut self, address: u8, byte: u8) -> Result<(), Self::Error> {
        self.write(address, &[byte])
    }

    fn request(&mut self, address: u8, buffer: &mut [u8]) -> Result<usize, Self::Error> {
        self.read(address, buffer)?;
        Ok(buffer.len())
    }
}

/// One conversion result as returned by the chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
    /// Signed two's-complement output code.
    pub value: i16,
    /// The byte following the data bytes. Passed through as received.
    pub status: u8,
}

impl Sample {
    /// Assembles a sample from the raw read, first byte most significant.
    pub fn from_bytes(bytes: [u8; READ_LEN]) -> Self {
        Self {
            value: i16::from_be_bytes([bytes[0], bytes[1]]),
            status: bytes[2],
        }
    }
}

/// Internal method for pushing a configuration byte to the chip.
pub(crate) fn write_config<T: Transport>(
    bus: &mut T,
    address: DeviceAddress,
    config: Config,
) -> Result<(), Error<T::Error>> {
    log::trace!("write config {:#010b} to {:#04x}", config.bits(), address.seven_bit());

    bus.write_byte(address.seven_bit(), config.bits())
        .map_err(|error| {
            log::warn!("config write to {:#04x} was not acknowledged", address.seven_bit());
            Error::BusWrite(error)
        })
}

/// Internal method for reading one sample. Never retries and never substitutes a value for a short read.
pub(crate) fn read_sample<T: Transport>(
    bus: &mut T,
    address: DeviceAddress,
) -> Result<Sample, Error<T::Error>> {
    let mut buffer = [0u8; READ_LEN];

    let received = bus
        .request(address.seven_bit(), &mut buffer)
        .map_err(Error::BusRead)?;

    if received != READ_LEN {
        log::warn!(
            "short read from {:#04x}: {} of {} bytes",
            address.seven_bit(),
            received,
            READ_LEN
        );
        return Err(Error::ShortRead {
            expected: READ_LEN,
            received,
        });
    }

    log::trace!("read {:02x?} from {:#04x}", buffer, address.seven_bit());

    Ok(Sample::from_bytes(buffer))
}
