use core::fmt;

use crate::Error;

/// Device code of the MCP3428, already shifted past the R/W bit.
const FAMILY: u8 = 0b1101_0000;

/// Select codes for device indices 0 to 7, each already shifted past the R/W bit.
///
/// | index | Adr0  | Adr1  | A2 A1 A0 |
/// |-------|-------|-------|----------|
/// | 0     | Low   | Low   | 000      |
/// | 1     | Low   | Float | 001      |
/// | 2     | Low   | High  | 010      |
/// | 3     | High  | Low   | 100      |
/// | 4     | High  | Float | 101      |
/// | 5     | High  | High  | 110      |
/// | 6     | Float | Low   | 011      |
/// | 7     | Float | High  | 111      |
///
/// Both pins floating decodes the same as both pins low.
const SELECT_CODES: [u8; 8] = [
    0b0000, 0b0010, 0b0100, 0b1000, 0b1010, 0b1100, 0b0110, 0b1110,
];

const READ: u8 = 0b0000_0001;

/// Strapping state of one of the chip's two address pins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AddressPin {
    Low,
    High,
    Floating,
}

/// Bus address of one MCP3428, resolved from its address pin strapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceAddress {
    index: u8,
}

impl DeviceAddress {
    /// Resolves device index `0..=7` through the pin table.
    pub fn from_index(index: u8) -> Result<Self, InvalidDeviceIndex> {
        if usize::from(index) < SELECT_CODES.len() {
            Ok(Self { index })
        } else {
            Err(InvalidDeviceIndex(index))
        }
    }

    /// Resolves the address from the state of pins Adr0 and Adr1.
    pub fn from_pins(adr0: AddressPin, adr1: AddressPin) -> Self {
        use AddressPin::*;

        let index = match (adr0, adr1) {
            (Low, Low) | (Floating, Floating) => 0,
            (Low, Floating) => 1,
            (Low, High) => 2,
            (High, Low) => 3,
            (High, Floating) => 4,
            (High, High) => 5,
            (Floating, Low) => 6,
            (Floating, High) => 7,
        };

        Self { index }
    }

    /// Position of this address in the pin table.
    pub fn index(&self) -> u8 {
        self.index
    }

    /// The select bits with the R/W bit clear, as laid out in the low nibble of the address byte.
    pub fn select_code(&self) -> u8 {
        SELECT_CODES[usize::from(self.index)]
    }

    /// Address byte for a write transaction.
    pub fn write_address(&self) -> u8 {
        FAMILY | self.select_code()
    }

    /// Address byte for a read transaction.
    pub fn read_address(&self) -> u8 {
        self.write_address() | READ
    }

    /// The 7-bit address `embedded-hal` expects.
    pub fn seven_bit(&self) -> u8 {
        self.write_address() >> 1
    }
}

/// A device index outside the pin table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidDeviceIndex(pub u8);

impl fmt::Display for InvalidDeviceIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid device index {}, expected 0 to 7", self.0)
    }
}

impl core::error::Error for InvalidDeviceIndex {}

impl<E> From<InvalidDeviceIndex> for Error<E> {
    fn from(InvalidDeviceIndex(index): InvalidDeviceIndex) -> Self {
        Error::InvalidDeviceIndex(index)
    }
}

/// Both address pins left floating.
impl Default for DeviceAddress {
    fn default() -> Self {
        Self::from_pins(AddressPin::Floating, AddressPin::Floating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_code_in_every_address() {
        for index in 0..8 {
            let address = DeviceAddress::from_index(index).unwrap();
            assert_eq!(address.write_address() & 0xF0, 0xD0);
            assert_eq!(address.seven_bit() & 0b111_1000, 0b110_1000);
        }
    }

    #[test]
    fn select_field_follows_pin_table() {
        let expected = [0x68, 0x69, 0x6A, 0x6C, 0x6D, 0x6E, 0x6B, 0x6F];

        for (index, seven_bit) in (0..8).zip(expected) {
            let address = DeviceAddress::from_index(index).unwrap();
            assert_eq!(address.seven_bit(), seven_bit, "index {index}");
        }
    }

    #[test]
    fn index_out_of_range() {
        assert_eq!(DeviceAddress::from_index(8), Err(InvalidDeviceIndex(8)));
        assert_eq!(DeviceAddress::from_index(255), Err(InvalidDeviceIndex(255)));
    }

    #[test]
    fn index_error_converts_to_driver_error() {
        fn resolve(index: u8) -> Result<DeviceAddress, Error<()>> {
            Ok(DeviceAddress::from_index(index)?)
        }

        assert_eq!(resolve(9), Err(Error::InvalidDeviceIndex(9)));
        assert_eq!(resolve(7).map(|address| address.seven_bit()), Ok(0x6F));
    }

    #[test]
    fn floating_pair_aliases_low_pair() {
        use AddressPin::*;

        assert_eq!(
            DeviceAddress::from_pins(Floating, Floating),
            DeviceAddress::from_pins(Low, Low)
        );
        assert_eq!(DeviceAddress::default().write_address(), 0xD0);
    }

    #[test]
    fn pins_match_index() {
        use AddressPin::*;

        let pins = [
            (Low, Low),
            (Low, Floating),
            (Low, High),
            (High, Low),
            (High, Floating),
            (High, High),
            (Floating, Low),
            (Floating, High),
        ];

        for (index, (adr0, adr1)) in pins.into_iter().enumerate() {
            assert_eq!(DeviceAddress::from_pins(adr0, adr1).index(), index as u8);
        }
    }

    #[test]
    fn read_bit() {
        let address = DeviceAddress::from_pins(AddressPin::High, AddressPin::High);
        assert_eq!(address.write_address(), 0b1101_1100);
        assert_eq!(address.read_address(), 0b1101_1101);
        assert_eq!(address.write_address() & READ, 0);
    }
}
