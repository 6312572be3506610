//! An MCP3428 stand-in that answers on the bus like the real chip.

use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};
use mcp3428::{Channel, Config, DeviceAddress};

/// Analog signal on one simulated input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    Steady(f64),
    /// Triangle wave between `low` and `high` millivolts, one step per conversion.
    Ramp { low: f64, high: f64, steps: u32 },
}

impl Input {
    fn millivolts(&self, conversion: u32) -> f64 {
        match *self {
            Input::Steady(millivolts) => millivolts,
            Input::Ramp { low, high, steps } => {
                let steps = u64::from(steps.max(1));
                let phase = u64::from(conversion) % (2 * steps);
                let rising = if phase < steps { phase } else { 2 * steps - phase };
                low + (high - low) * rising as f64 / steps as f64
            }
        }
    }
}

/// Simulated chip.
#[derive(Debug, Clone)]
pub struct SimulatedAdc {
    address: u8,
    config: Config,
    inputs: [Input; 4],
    conversions: u32,
}

impl SimulatedAdc {
    /// A chip at `address` with every input at 0 mV, in the power-on configuration.
    pub fn new(address: DeviceAddress) -> Self {
        Self {
            address: address.seven_bit(),
            config: Config::from_bits(0b1001_0000),
            inputs: [Input::Steady(0.0); 4],
            conversions: 0,
        }
    }

    pub fn with_input(mut self, channel: Channel, input: Input) -> Self {
        self.inputs[channel as usize] = input;
        self
    }

    /// The last configuration byte written to the chip.
    pub fn config(&self) -> Config {
        self.config
    }

    /// Output code for the selected channel, saturated to the configured resolution.
    fn convert(&mut self) -> i16 {
        let Some(rate) = self.config.sample_rate() else {
            return 0;
        };

        let input = self.inputs[self.config.channel() as usize];
        let millivolts = input.millivolts(self.conversions);
        self.conversions = self.conversions.wrapping_add(1);

        let full_scale = f64::from(1u32 << (rate.bits() - 1));
        let code = millivolts * f64::from(self.config.gain().multiplier()) / rate.millivolts_per_lsb();

        code.round().clamp(-full_scale, full_scale - 1.0) as i16
    }
}

impl ErrorType for SimulatedAdc {
    type Error = ErrorKind;
}

impl I2c for SimulatedAdc {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if address != self.address {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }

        for operation in operations {
            match operation {
                Operation::Write(bytes) => {
                    if let Some(&byte) = bytes.last() {
                        self.config = Config::from_bits(byte);
                    }
                }
                Operation::Read(buffer) => {
                    let [high, low] = self.convert().to_be_bytes();
                    // Ready bit clear: this is fresh data.
                    let status = self.config.with_ready(false).bits();

                    for (index, byte) in buffer.iter_mut().enumerate() {
                        *byte = match index {
                            0 => high,
                            1 => low,
                            _ => status,
                        };
                    }
                }
            }
        }

        Ok(())
    }
}
