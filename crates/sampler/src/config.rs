use std::time::Duration;

use anyhow::{bail, Context};
use mcp3428::LinearCalibration;

/// What to sample and how often.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplerConfig {
    /// Device indices (0 to 7) of the chips on the bus.
    pub devices: Vec<u8>,
    /// Channel numbers (1 to 4) read on every sweep.
    pub channels: Vec<u8>,
    /// Pause between sweeps.
    pub interval: Duration,
    pub calibration: LinearCalibration,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            devices: vec![0],
            channels: vec![1, 2, 3, 4],
            interval: Duration::from_secs(1),
            calibration: LinearCalibration::TMP36,
        }
    }
}

impl SamplerConfig {
    /// Defaults, overridden by `THERMAL_DEVICES`, `THERMAL_CHANNELS`,
    /// `THERMAL_INTERVAL_MS` and `THERMAL_CALIBRATION` where set.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Some(devices) = var("THERMAL_DEVICES") {
            config.devices = parse_list(&devices).context("THERMAL_DEVICES")?;
        }

        if let Some(channels) = var("THERMAL_CHANNELS") {
            config.channels = parse_list(&channels).context("THERMAL_CHANNELS")?;
        }

        if let Some(interval) = var("THERMAL_INTERVAL_MS") {
            let millis = interval
                .trim()
                .parse()
                .with_context(|| format!("THERMAL_INTERVAL_MS: {interval:?}"))?;
            config.interval = Duration::from_millis(millis);
        }

        if let Some(calibration) = var("THERMAL_CALIBRATION") {
            config.calibration =
                parse_calibration(&calibration).context("THERMAL_CALIBRATION")?;
        }

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.devices.is_empty() {
            bail!("no devices configured");
        }

        if self.channels.is_empty() {
            bail!("no channels configured");
        }

        if let Some(index) = self.devices.iter().find(|&&index| index > 7) {
            bail!("device index {index} out of range 0 to 7");
        }

        if let Some(channel) = self.channels.iter().find(|&&ch| !(1..=4).contains(&ch)) {
            bail!("channel {channel} out of range 1 to 4");
        }

        Ok(())
    }
}

fn parse_list(list: &str) -> anyhow::Result<Vec<u8>> {
    list.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| item.parse().with_context(|| format!("not a number: {item:?}")))
        .collect()
}

/// Two reference points, `mv:celsius,mv:celsius`.
fn parse_calibration(points: &str) -> anyhow::Result<LinearCalibration> {
    let parse_point = |point: &str| -> anyhow::Result<(f64, f64)> {
        let (millivolts, celsius) = point
            .split_once(':')
            .with_context(|| format!("expected mv:celsius, got {point:?}"))?;
        Ok((millivolts.trim().parse()?, celsius.trim().parse()?))
    };

    let Some((a, b)) = points.split_once(',') else {
        bail!("expected two points, got {points:?}");
    };

    let (a, b) = (parse_point(a)?, parse_point(b)?);

    LinearCalibration::from_points(a, b)
        .with_context(|| format!("no line through {a:?} and {b:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from(vars: &[(&str, &str)]) -> anyhow::Result<SamplerConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        SamplerConfig::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        assert_eq!(from(&[]).unwrap(), SamplerConfig::default());
    }

    #[test]
    fn overrides() {
        let config = from(&[
            ("THERMAL_DEVICES", "0, 5"),
            ("THERMAL_CHANNELS", "2,4"),
            ("THERMAL_INTERVAL_MS", "250"),
            ("THERMAL_CALIBRATION", "0:0,1000:100"),
        ])
        .unwrap();

        assert_eq!(config.devices, vec![0, 5]);
        assert_eq!(config.channels, vec![2, 4]);
        assert_eq!(config.interval, Duration::from_millis(250));
        assert_eq!(config.calibration.celsius(500.0), 50.0);
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(from(&[("THERMAL_CHANNELS", "0")]).is_err());
        assert!(from(&[("THERMAL_CHANNELS", "1,5")]).is_err());
        assert!(from(&[("THERMAL_DEVICES", "8")]).is_err());
        assert!(from(&[("THERMAL_DEVICES", "")]).is_err());
    }

    #[test]
    fn rejects_garbage() {
        assert!(from(&[("THERMAL_INTERVAL_MS", "soon")]).is_err());
        assert!(from(&[("THERMAL_CHANNELS", "one")]).is_err());
        assert!(from(&[("THERMAL_CALIBRATION", "750:25")]).is_err());
        assert!(from(&[("THERMAL_CALIBRATION", "750:25,750:30")]).is_err());
        assert!(from(&[("THERMAL_CALIBRATION", "inf:25,1000:50")]).is_err());
    }
}
