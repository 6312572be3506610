use std::cell::RefCell;
use std::thread;

use anyhow::Context;
use embedded_hal_bus::i2c::RefCellDevice;
use rppal::i2c::I2c;
use sampler::{Sampler, SamplerConfig};

/// Sweeps every configured chip forever. All chips share bus 1.
pub fn run(config: &SamplerConfig) -> Result<(), anyhow::Error> {
    let i2c = I2c::with_bus(1).context("opening I2C bus 1")?;

    let i2c = RefCell::new(i2c);

    let mut samplers = Vec::with_capacity(config.devices.len());

    for &index in &config.devices {
        let mut sampler = Sampler::new(RefCellDevice::new(&i2c), index, config)?;

        match sampler.probe() {
            Ok(()) => log::info!("found device {index} at {:#04x}", sampler.address().seven_bit()),
            Err(error) => log::warn!(
                "device {index} at {:#04x} did not answer: {error}",
                sampler.address().seven_bit()
            ),
        }

        samplers.push((index, sampler));
    }

    loop {
        for (index, sampler) in &mut samplers {
            for (channel, reading) in sampler.sweep() {
                match reading {
                    Ok(reading) => println!("device {index} {reading}"),
                    Err(error) => println!("device {index} CH{}: {error}", channel.number()),
                }
            }
        }

        thread::sleep(config.interval);
    }
}
