use core::fmt;

/// Driver errors. `E` is the transport's own error.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Channel number outside 1 to 4. Nothing was sent.
    InvalidChannel(u8),
    /// Device index outside 0 to 7.
    InvalidDeviceIndex(u8),
    /// The configuration byte was not acknowledged.
    BusWrite(E),
    /// The read request itself failed.
    BusRead(E),
    /// The chip delivered fewer bytes than a sample needs.
    ShortRead { expected: usize, received: usize },
    /// The sample rate field holds the reserved code, so no coefficient applies.
    ReservedSampleRate,
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidChannel(channel) => write!(f, "invalid channel {channel}, expected 1 to 4"),
            Error::InvalidDeviceIndex(index) => {
                write!(f, "invalid device index {index}, expected 0 to 7")
            }
            Error::BusWrite(e) => write!(f, "config write failed: {e:?}"),
            Error::BusRead(e) => write!(f, "read request failed: {e:?}"),
            Error::ShortRead { expected, received } => {
                write!(f, "short read: {received} of {expected} bytes")
            }
            Error::ReservedSampleRate => write!(f, "sample rate field holds the reserved code"),
        }
    }
}

impl<E: fmt::Debug> core::error::Error for Error<E> {}
