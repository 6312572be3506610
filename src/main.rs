//! Sample temperatures from simulated MCP3428 chips.

use std::thread;

use mcp3428::{Channel, DeviceAddress};
use sampler::{Input, Sampler, SamplerConfig, SimulatedAdc};

fn main() -> Result<(), anyhow::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = SamplerConfig::from_env()?;

    log::info!(
        "sampling devices {:?}, channels {:?} every {:?}",
        config.devices,
        config.channels,
        config.interval
    );

    let mut samplers = config
        .devices
        .iter()
        .map(|&index| {
            let address = DeviceAddress::from_index(index)?;
            Sampler::with_address(simulated_chip(address), address, &config)
        })
        .collect::<Result<Vec<_>, _>>()?;

    loop {
        for sampler in &mut samplers {
            println!("device {:#04x}", sampler.address().seven_bit());

            for (channel, reading) in sampler.sweep() {
                match reading {
                    Ok(reading) => println!("  {reading}"),
                    Err(error) => println!("  CH{}: {error}", channel.number()),
                }
            }
        }

        thread::sleep(config.interval);
    }
}

/// A TMP36 on every input: room temperature, a slow warm-up, then one cold sensor and one hot.
fn simulated_chip(address: DeviceAddress) -> SimulatedAdc {
    SimulatedAdc::new(address)
        .with_input(Channel::CH1, Input::Steady(720.0))
        .with_input(
            Channel::CH2,
            Input::Ramp {
                low: 700.0,
                high: 900.0,
                steps: 20,
            },
        )
        .with_input(Channel::CH3, Input::Steady(450.0))
        .with_input(Channel::CH4, Input::Steady(1250.0))
}
