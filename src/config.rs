use crate::bus::ByteOrder;
use crate::regmap::AddressingMode;

/// IOCON.BANK
const BANK: u8 = 1 << 7;
/// IOCON.MIRROR
const MIRROR: u8 = 1 << 6;
/// IOCON.SEQOP
const SEQOP: u8 = 1 << 5;
/// IOCON.DISSLW
const DISSLW: u8 = 1 << 4;

/// Driver configuration.
///
/// Apart from the byte order, these are the IOCON options the driver manages.  HAEN, ODR and
/// INTPOL are always written as 0.  BANK is not part of the configuration, it follows the
/// addressing mode of the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    /// MIRROR: the INTA and INTB pins are internally connected.
    pub mirror: bool,
    /// SEQOP: the address pointer does not increment.
    pub sequential_disabled: bool,
    /// DISSLW: slew rate control on SDA is disabled.
    pub slew_rate_disabled: bool,
    /// Byte order of 16-bit transfers in [`AddressingMode::Linked16`].
    pub byte_order: ByteOrder,
}

impl Config {
    pub fn mirror(mut self, enable: bool) -> Self {
        self.mirror = enable;
        self
    }

    pub fn sequential_disabled(mut self, disable: bool) -> Self {
        self.sequential_disabled = disable;
        self
    }

    pub fn slew_rate_disabled(mut self, disable: bool) -> Self {
        self.slew_rate_disabled = disable;
        self
    }

    pub fn byte_order(mut self, order: ByteOrder) -> Self {
        self.byte_order = order;
        self
    }

    /// IOCON value for this configuration with the chip in `mode`.
    pub fn iocon(&self, mode: AddressingMode) -> u8 {
        let mut val = 0x00;
        if mode == AddressingMode::Banked8 {
            val |= BANK;
        }
        if self.mirror {
            val |= MIRROR;
        }
        if self.sequential_disabled {
            val |= SEQOP;
        }
        if self.slew_rate_disabled {
            val |= DISSLW;
        }
        val
    }
}
