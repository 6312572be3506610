use crate::{
    read_sample, write_config, Channel, Config, DeviceAddress, Error, LinearCalibration, Sample,
    Transport,
};

/// MCP3428 driver
pub struct Mcp3428<T> {
    bus: T,
    address: DeviceAddress,
    config: Config,
    calibration: LinearCalibration,
}

impl<T: Transport> Mcp3428<T> {
    /// Creates a new driver with the default configuration.
    /// Nothing is sent until the first read or [`Mcp3428::set_config`].
    pub fn new(bus: T, address: DeviceAddress) -> Self {
        Self::with_config(bus, address, Config::default())
    }

    /// Creates a new driver that will use `config` for subsequent reads.
    pub fn with_config(bus: T, address: DeviceAddress, config: Config) -> Self {
        Self {
            bus,
            address,
            config,
            calibration: LinearCalibration::default(),
        }
    }

    /// Replaces the sensor calibration used by [`Mcp3428::read_temperature`].
    pub fn with_calibration(mut self, calibration: LinearCalibration) -> Self {
        self.calibration = calibration;
        self
    }

    pub fn address(&self) -> DeviceAddress {
        self.address
    }

    /// The configuration most recently acknowledged by the chip, or the initial one.
    pub fn config(&self) -> Config {
        self.config
    }

    pub fn calibration(&self) -> LinearCalibration {
        self.calibration
    }

    pub fn set_calibration(&mut self, calibration: LinearCalibration) {
        self.calibration = calibration;
    }

    /// Checks that a device acknowledges this address.
    pub fn probe(&mut self) -> Result<(), Error<T::Error>> {
        self.bus
            .probe(self.address.seven_bit())
            .map_err(Error::BusWrite)
    }

    /// Writes `config` to the chip. The stored configuration only changes if the write succeeds.
    pub fn set_config(&mut self, config: Config) -> Result<(), Error<T::Error>> {
        write_config(&mut self.bus, self.address, config)?;
        log::debug!("{:#04x} config now {:#010b}", self.address.seven_bit(), config.bits());
        self.config = config;
        Ok(())
    }

    /// Read channel `1..=4` and return the sample and the status byte.
    ///
    /// Selects the channel first, which also starts a conversion in one-shot mode.
    pub fn read_channel(&mut self, channel: u8) -> Result<Sample, Error<T::Error>> {
        let channel = Channel::from_number(channel).ok_or(Error::InvalidChannel(channel))?;
        self.read(channel)
    }

    /// Read a channel and return the sample and the status byte.
    pub fn read(&mut self, ch: Channel) -> Result<Sample, Error<T::Error>> {
        self.set_config(self.config.with_channel(ch))?;
        read_sample(&mut self.bus, self.address)
    }

    /// Converts a sample to millivolts using the current configuration.
    pub fn millivolts(&self, sample: &Sample) -> Result<f64, Error<T::Error>> {
        self.config
            .millivolts(sample.value)
            .ok_or(Error::ReservedSampleRate)
    }

    /// Read channel `1..=4` and return the input voltage in millivolts.
    pub fn read_millivolts(&mut self, channel: u8) -> Result<f64, Error<T::Error>> {
        let channel = Channel::from_number(channel).ok_or(Error::InvalidChannel(channel))?;

        if self.config.sample_rate().is_none() {
            return Err(Error::ReservedSampleRate);
        }

        let sample = self.read(channel)?;
        self.millivolts(&sample)
    }

    /// Read channel `1..=4` and return the temperature in degrees Celsius.
    pub fn read_temperature(&mut self, channel: u8) -> Result<f64, Error<T::Error>> {
        let millivolts = self.read_millivolts(channel)?;
        Ok(self.calibration.celsius(millivolts))
    }

    /// Gives back the bus.
    pub fn release(self) -> T {
        self.bus
    }
}

/// Uses the address for both pins floating.
impl<T: Transport> From<T> for Mcp3428<T> {
    fn from(bus: T) -> Self {
        Self::new(bus, DeviceAddress::default())
    }
}
