//! Sample temperatures from MCP3428 chips on a Raspberry Pi's I2C bus.

mod raspberry_pi;

fn main() -> Result<(), anyhow::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = sampler::SamplerConfig::from_env()?;

    raspberry_pi::run(&config)
}
