//! The chip's single configuration register.
//!
//! ```text
//! bit   7     6  5     4      3  2        1  0
//!     [RDY] [C1 C0] [O/C] [S1 S0]    [G1 G0]
//!      |     |       |     sample rate  PGA gain
//!      |     |       conversion mode
//!      |     channel select
//!      ready / start one-shot conversion
//! ```

const READY_MASK: u8 = 0b1000_0000;
const CHANNEL_MASK: u8 = 0b0110_0000;
const MODE_MASK: u8 = 0b0001_0000;
const SAMPLE_RATE_MASK: u8 = 0b0000_1100;
const GAIN_MASK: u8 = 0b0000_0011;

/// Input channel.
#[allow(missing_docs)]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    CH1 = 0,
    CH2 = 1,
    CH3 = 2,
    CH4 = 3,
}

impl Channel {
    /// Iterate over all channels.
    pub fn all() -> impl Iterator<Item = Self> {
        [Self::CH1, Self::CH2, Self::CH3, Self::CH4].into_iter()
    }

    /// Channel by its 1-based number as printed on the datasheet.
    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Self::CH1),
            2 => Some(Self::CH2),
            3 => Some(Self::CH3),
            4 => Some(Self::CH4),
            _ => None,
        }
    }

    /// 1-based channel number.
    pub fn number(&self) -> u8 {
        *self as u8 + 1
    }

    fn to_register(self) -> u8 {
        (self as u8) << 5
    }

    fn from_register(reg: u8) -> Self {
        match (reg & CHANNEL_MASK) >> 5 {
            0b01 => Self::CH2,
            0b10 => Self::CH3,
            0b11 => Self::CH4,
            _ => Self::CH1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConversionMode {
    /// One conversion each time the ready bit is written.
    OneShot = 0,
    Continuous = 1,
}

impl ConversionMode {
    fn to_register(self) -> u8 {
        (self as u8) << 4
    }

    fn from_register(reg: u8) -> Self {
        if reg & MODE_MASK != 0 {
            Self::Continuous
        } else {
            Self::OneShot
        }
    }
}

/// Conversion rate, which sets the resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SampleRate {
    /// 240 samples per second
    Bit12 = 0b00,
    /// 60 samples per second
    Bit14 = 0b01,
    /// 15 samples per second
    Bit16 = 0b10,
}

impl SampleRate {
    /// Millivolts represented by one LSB of the output code.
    pub fn millivolts_per_lsb(&self) -> f64 {
        match self {
            Self::Bit12 => 1.0,
            Self::Bit14 => 0.25,
            Self::Bit16 => 0.0625,
        }
    }

    pub fn bits(&self) -> u8 {
        match self {
            Self::Bit12 => 12,
            Self::Bit14 => 14,
            Self::Bit16 => 16,
        }
    }

    pub fn samples_per_second(&self) -> u16 {
        match self {
            Self::Bit12 => 240,
            Self::Bit14 => 60,
            Self::Bit16 => 15,
        }
    }

    fn to_register(self) -> u8 {
        (self as u8) << 2
    }

    /// `None` for the reserved code `0b11`.
    fn from_register(reg: u8) -> Option<Self> {
        match (reg & SAMPLE_RATE_MASK) >> 2 {
            0b00 => Some(Self::Bit12),
            0b01 => Some(Self::Bit14),
            0b10 => Some(Self::Bit16),
            _ => None,
        }
    }
}

/// Programmable gain amplifier setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gain {
    X1 = 0b00,
    X2 = 0b01,
    X4 = 0b10,
    X8 = 0b11,
}

impl Gain {
    pub fn multiplier(&self) -> u8 {
        1 << (*self as u8)
    }

    fn to_register(self) -> u8 {
        self as u8
    }

    fn from_register(reg: u8) -> Self {
        match reg & GAIN_MASK {
            0b01 => Self::X2,
            0b10 => Self::X4,
            0b11 => Self::X8,
            _ => Self::X1,
        }
    }
}

/// Contents of the configuration register.
///
/// Holds the raw byte as written. Every `with_*` method replaces one field and
/// leaves the others bit-for-bit unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config(u8);

impl Config {
    /// Builds a configuration with the ready bit set.
    pub fn new(channel: Channel, mode: ConversionMode, rate: SampleRate, gain: Gain) -> Self {
        Self(
            READY_MASK
                | channel.to_register()
                | mode.to_register()
                | rate.to_register()
                | gain.to_register(),
        )
    }

    /// Takes the byte as-is, including a reserved sample rate code.
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn bits(&self) -> u8 {
        self.0
    }

    pub fn ready(&self) -> bool {
        self.0 & READY_MASK != 0
    }

    pub fn channel(&self) -> Channel {
        Channel::from_register(self.0)
    }

    pub fn mode(&self) -> ConversionMode {
        ConversionMode::from_register(self.0)
    }

    /// `None` when the register holds the reserved sample rate code.
    pub fn sample_rate(&self) -> Option<SampleRate> {
        SampleRate::from_register(self.0)
    }

    pub fn gain(&self) -> Gain {
        Gain::from_register(self.0)
    }

    pub fn with_ready(self, ready: bool) -> Self {
        let ready = if ready { READY_MASK } else { 0 };
        Self(self.0 & !READY_MASK | ready)
    }

    pub fn with_channel(self, channel: Channel) -> Self {
        Self(self.0 & !CHANNEL_MASK | channel.to_register())
    }

    pub fn with_mode(self, mode: ConversionMode) -> Self {
        Self(self.0 & !MODE_MASK | mode.to_register())
    }

    pub fn with_sample_rate(self, rate: SampleRate) -> Self {
        Self(self.0 & !SAMPLE_RATE_MASK | rate.to_register())
    }

    pub fn with_gain(self, gain: Gain) -> Self {
        Self(self.0 & !GAIN_MASK | gain.to_register())
    }

    /// Converts an output code to millivolts at this configuration's resolution and gain.
    ///
    /// Returns `None` if the sample rate field holds the reserved code.
    pub fn millivolts(&self, code: i16) -> Option<f64> {
        let rate = self.sample_rate()?;
        let gain = self.gain();

        Some(f64::from(code) * rate.millivolts_per_lsb() / f64::from(gain.multiplier()))
    }
}

/// Ready, channel 1, continuous conversion, 16-bit, gain x1.
impl Default for Config {
    fn default() -> Self {
        Self::new(
            Channel::CH1,
            ConversionMode::Continuous,
            SampleRate::Bit16,
            Gain::X1,
        )
    }
}

impl From<u8> for Config {
    fn from(bits: u8) -> Self {
        Self(bits)
    }
}

impl From<Config> for u8 {
    fn from(config: Config) -> Self {
        config.0
    }
}
