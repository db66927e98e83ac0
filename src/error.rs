use crate::regmap::{InvalidRegister, Register};

/// Errors reported by the driver.
///
/// Everything except [`Error::Bus`] is an invalid-argument error: it is detected before any bus
/// access and indicates a programming error on the caller side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<BusError> {
    /// The bus adapter reported a failure.  Passed on unmodified.
    Bus(BusError),
    /// Device address outside of 0x20..=0x27.
    InvalidAddress(u8),
    /// Register index outside of 0..=10.
    InvalidRegister(i32),
    /// A value wider than one byte was written while the chip is in the banked 8-bit mode.
    ValueTooWide(u16),
    /// The register cannot be written through the plain register path.
    NotWritable(Register),
}

impl<E> Error<E> {
    pub fn is_invalid_argument(&self) -> bool {
        !matches!(self, Error::Bus(_))
    }
}

impl<E> From<InvalidRegister> for Error<E> {
    fn from(e: InvalidRegister) -> Self {
        Error::InvalidRegister(e.0)
    }
}

impl<E: core::fmt::Debug> core::fmt::Display for Error<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Bus(e) => write!(f, "bus error: {:?}", e),
            Error::InvalidAddress(a) => write!(f, "invalid device address: 0x{:02x}", a),
            Error::InvalidRegister(i) => write!(f, "invalid register index: {}", i),
            Error::ValueTooWide(v) => write!(f, "value 0x{:x} does not fit an 8-bit port", v),
            Error::NotWritable(r) => write!(f, "register {:?} is not writable", r),
        }
    }
}

impl<E: core::fmt::Debug> embedded_hal::digital::Error for Error<E> {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

#[cfg(feature = "std")]
impl<E: core::fmt::Debug> std::error::Error for Error<E> {}
