//! Periodic temperature sampling over one or more MCP3428 chips.

use std::fmt;

use anyhow::Context;
use mcp3428::{Channel, DeviceAddress, Error, Mcp3428, Sample, Transport};

mod config;
mod simulated;

pub use config::SamplerConfig;
pub use simulated::{Input, SimulatedAdc};

/// One successful channel conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelReading {
    pub channel: Channel,
    pub sample: Sample,
    pub millivolts: f64,
    pub celsius: f64,
}

impl fmt::Display for ChannelReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CH{}: {:>7.2} °C ({:>8.3} mV, raw {:>6})",
            self.channel.number(),
            self.celsius,
            self.millivolts,
            self.sample.value
        )
    }
}

/// Reads a fixed set of channels on one chip.
pub struct Sampler<T> {
    adc: Mcp3428<T>,
    channels: Vec<Channel>,
}

impl<T: Transport> Sampler<T> {
    pub fn new(bus: T, device_index: u8, config: &SamplerConfig) -> anyhow::Result<Self> {
        let address = DeviceAddress::from_index(device_index).context("resolving device address")?;

        Self::with_address(bus, address, config)
    }

    /// Samples the chip at an already resolved address.
    pub fn with_address(
        bus: T,
        address: DeviceAddress,
        config: &SamplerConfig,
    ) -> anyhow::Result<Self> {
        let channels = config
            .channels
            .iter()
            .map(|&number| {
                Channel::from_number(number)
                    .with_context(|| format!("channel {number} out of range 1 to 4"))
            })
            .collect::<anyhow::Result<_>>()?;

        let adc = Mcp3428::new(bus, address).with_calibration(config.calibration);

        Ok(Self { adc, channels })
    }

    pub fn address(&self) -> DeviceAddress {
        self.adc.address()
    }

    /// Checks that the chip answers on its address.
    pub fn probe(&mut self) -> Result<(), Error<T::Error>> {
        self.adc.probe()
    }

    /// Reads one channel and converts it.
    pub fn read(&mut self, channel: Channel) -> Result<ChannelReading, Error<T::Error>> {
        let sample = self.adc.read(channel)?;
        let millivolts = self.adc.millivolts(&sample)?;
        let celsius = self.adc.calibration().celsius(millivolts);

        Ok(ChannelReading {
            channel,
            sample,
            millivolts,
            celsius,
        })
    }

    /// Reads every configured channel once, in order.
    ///
    /// A failed channel is reported in its slot and does not stop the sweep.
    pub fn sweep(&mut self) -> Vec<(Channel, Result<ChannelReading, Error<T::Error>>)>
    where
        T::Error: fmt::Debug,
    {
        let channels = self.channels.clone();

        channels
            .into_iter()
            .map(|channel| {
                let reading = self.read(channel);

                match &reading {
                    Ok(reading) => log::debug!("{:#04x} {}", self.address().seven_bit(), reading),
                    Err(error) => log::warn!(
                        "{:#04x} CH{}: {}",
                        self.address().seven_bit(),
                        channel.number(),
                        error
                    ),
                }

                (channel, reading)
            })
            .collect()
    }

    pub fn release(self) -> T {
        self.adc.release()
    }
}
