//! Register map of the MCP23017 in both of its addressing modes.
//!
//! Datasheet: https://ww1.microchip.com/downloads/en/devicedoc/20001952c.pdf
//!
//! The chip exposes eleven logical registers per port.  Where they live depends on IOCON.BANK:
//!
//! | Register | BANK=0 (A, B) | BANK=1 (A, B) |
//! | --- | --- | --- |
//! | IODIR   | 0x00, 0x01 | 0x00, 0x10 |
//! | IPOL    | 0x02, 0x03 | 0x01, 0x11 |
//! | GPINTEN | 0x04, 0x05 | 0x02, 0x12 |
//! | DEFVAL  | 0x06, 0x07 | 0x03, 0x13 |
//! | INTCON  | 0x08, 0x09 | 0x04, 0x14 |
//! | IOCON   | 0x0a, 0x0b | 0x05, 0x15 |
//! | GPPU    | 0x0c, 0x0d | 0x06, 0x16 |
//! | INTF    | 0x0e, 0x0f | 0x07, 0x17 |
//! | INTCAP  | 0x10, 0x11 | 0x08, 0x18 |
//! | GPIO    | 0x12, 0x13 | 0x09, 0x19 |
//! | OLAT    | 0x14, 0x15 | 0x0a, 0x1a |
//!
//! With BANK=0 the A/B registers of a pair are adjacent, so the driver accesses both ports as
//! one 16-bit register.  With BANK=1 each port is accessed on its own, one byte at a time.

/// How ports A and B are laid out in the register space (IOCON.BANK).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddressingMode {
    /// BANK=0: A and B registers interleave and are accessed as one 16-bit port.  This is the
    /// power-on reset state.
    #[default]
    Linked16,
    /// BANK=1: A and B live in separate banks, 0x10 apart, and are accessed as 8-bit ports.
    Banked8,
}

impl AddressingMode {
    /// Physical addresses of IOCON while the chip is in this mode.
    pub const fn iocon_addresses(self) -> [u8; 2] {
        match self {
            AddressingMode::Linked16 => IOCON_LINKED16,
            AddressingMode::Banked8 => IOCON_BANKED8,
        }
    }

    pub const fn width(self) -> Width {
        match self {
            AddressingMode::Linked16 => Width::Word,
            AddressingMode::Banked8 => Width::Byte,
        }
    }
}

/// IOCON location with BANK=0.
pub const IOCON_LINKED16: [u8; 2] = [0x0a, 0x0b];
/// IOCON location with BANK=1.
pub const IOCON_BANKED8: [u8; 2] = [0x05, 0x15];

/// The port register accesses are directed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Port {
    #[default]
    A,
    B,
}

/// Number of bytes transferred for one register access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    Byte,
    Word,
}

impl Width {
    pub const fn byte_count(self) -> usize {
        match self {
            Width::Byte => 1,
            Width::Word => 2,
        }
    }
}

/// Logical register, numbered the way the banked register map orders them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Register {
    /// IODIR: input/output direction: 0=output; 1=input
    Iodir = 0,
    /// IPOL: input polarity: 0=register values match input pins; 1=opposite
    Ipol = 1,
    /// GPINTEN: interrupt-on-change: 0=disable; 1=enable
    Gpinten = 2,
    /// DEFVAL: default values for interrupt-on-change
    Defval = 3,
    /// INTCON: interrupt-on-change config: 0=compare to previous pin value;
    ///   1=compare to corresponding bit in DEFVAL
    Intcon = 4,
    /// IOCON: configuration register
    /// - Bit 7: BANK: 0=linked 16-bit map; 1=banked 8-bit map
    /// - Bit 6: MIRROR: if enabled, INTA and INTB are logically ORed
    /// - Bit 5: SEQOP: disables the incrementing function of the address pointer
    /// - Bit 4: DISSLW: disables slew rate control on SDA
    /// - Bit 3: HAEN: no effect on MCP23017
    /// - Bit 2: ODR: interrupt pins are open-drain outputs
    /// - Bit 1: INTPOL: interrupt pin is 0=active-low or 1=active-high
    /// - Bit 0: unimplemented, always reads 0
    Iocon = 5,
    /// GPPU: GPIO pull-ups: enables weak internal pull-ups on each pin (when configured
    ///   as an input)
    Gppu = 6,
    /// INTF: interrupt flags: 0=no interrupt pending; 1=corresponding pin caused interrupt
    Intf = 7,
    /// INTCAP: interrupt captured value: reflects value of each pin at the time that they
    ///   caused an interrupt
    Intcap = 8,
    /// GPIO: reflects logic level on pins
    Gpio = 9,
    /// OLAT: output latches: sets state for pins configured as outputs
    Olat = 10,
}

/// A register index outside of 0..=10.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidRegister(pub i32);

impl Register {
    pub const ALL: [Register; 11] = [
        Register::Iodir,
        Register::Ipol,
        Register::Gpinten,
        Register::Defval,
        Register::Intcon,
        Register::Iocon,
        Register::Gppu,
        Register::Intf,
        Register::Intcap,
        Register::Gpio,
        Register::Olat,
    ];

    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Physical addresses of this register for port A and port B.
    pub const fn addresses(self, mode: AddressingMode) -> (u8, u8) {
        let index = self.index();
        match mode {
            AddressingMode::Banked8 => (index, index + 0x10),
            AddressingMode::Linked16 => (index * 2, index * 2 + 1),
        }
    }

    /// Where and how wide an access to this register is.
    ///
    /// In [`AddressingMode::Linked16`] the port is irrelevant: the access always starts at the
    /// port A address and covers both ports.
    pub const fn access(self, mode: AddressingMode, port: Port) -> Access {
        let (a, b) = self.addresses(mode);
        let address = match (mode, port) {
            (AddressingMode::Banked8, Port::B) => b,
            _ => a,
        };
        Access {
            address,
            width: mode.width(),
        }
    }

    /// Registers the chip does not accept writes to through the plain register path.
    pub const fn is_writable(self) -> bool {
        !matches!(self, Register::Iocon | Register::Intf | Register::Intcap)
    }
}

impl TryFrom<i32> for Register {
    type Error = InvalidRegister;

    fn try_from(index: i32) -> Result<Self, Self::Error> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Register::ALL.get(i).copied())
            .ok_or(InvalidRegister(index))
    }
}

impl From<Register> for u8 {
    fn from(r: Register) -> u8 {
        r as u8
    }
}

/// Physical address and transfer width of one register access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Access {
    pub address: u8,
    pub width: Width,
}

/// Resolve a raw register index.
pub fn resolve(index: i32, mode: AddressingMode, port: Port) -> Result<Access, InvalidRegister> {
    Register::try_from(index).map(|r| r.access(mode, port))
}

/// Decide the addressing mode from the bit 0 values read back after the IOCON probe.
///
/// Bit 0 of IOCON is unimplemented and reads as 0 even after writing a 1, so the candidate pair
/// that reads back zero on both addresses is the live IOCON.  When neither or both pairs qualify
/// the chip is assumed to be in its reset state.
pub fn decide_mode(linked16_bits: [u8; 2], banked8_bits: [u8; 2]) -> AddressingMode {
    let linked16 = linked16_bits == [0, 0];
    let banked8 = banked8_bits == [0, 0];
    if banked8 && !linked16 {
        AddressingMode::Banked8
    } else {
        AddressingMode::Linked16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banked8_addresses() {
        for i in 0..=10 {
            let a = resolve(i, AddressingMode::Banked8, Port::A).unwrap();
            let b = resolve(i, AddressingMode::Banked8, Port::B).unwrap();
            assert_eq!(a.address, i as u8);
            assert_eq!(b.address, i as u8 + 0x10);
            assert_eq!(a.width, Width::Byte);
            assert_eq!(b.width, Width::Byte);
        }
    }

    #[test]
    fn linked16_addresses() {
        for i in 0..=10 {
            for port in [Port::A, Port::B] {
                let access = resolve(i, AddressingMode::Linked16, port).unwrap();
                assert_eq!(access.address, i as u8 * 2);
                assert_eq!(access.width, Width::Word);
            }
        }
    }

    #[test]
    fn index_bounds() {
        for mode in [AddressingMode::Linked16, AddressingMode::Banked8] {
            for port in [Port::A, Port::B] {
                assert_eq!(resolve(11, mode, port), Err(InvalidRegister(11)));
                assert_eq!(resolve(-1, mode, port), Err(InvalidRegister(-1)));
                assert!(resolve(0, mode, port).is_ok());
                assert!(resolve(10, mode, port).is_ok());
            }
        }
    }

    #[test]
    fn named_registers_match_datasheet() {
        assert_eq!(Register::Gpio.addresses(AddressingMode::Linked16), (0x12, 0x13));
        assert_eq!(Register::Gpio.addresses(AddressingMode::Banked8), (0x09, 0x19));
        assert_eq!(
            Register::Iocon.addresses(AddressingMode::Linked16),
            (IOCON_LINKED16[0], IOCON_LINKED16[1])
        );
        assert_eq!(
            Register::Iocon.addresses(AddressingMode::Banked8),
            (IOCON_BANKED8[0], IOCON_BANKED8[1])
        );
        assert_eq!(Register::Olat.addresses(AddressingMode::Banked8), (0x0a, 0x1a));
        assert_eq!(Register::try_from(6), Ok(Register::Gppu));
    }

    #[test]
    fn mode_decision() {
        assert_eq!(decide_mode([0, 0], [1, 1]), AddressingMode::Linked16);
        assert_eq!(decide_mode([1, 0], [0, 0]), AddressingMode::Banked8);
        assert_eq!(decide_mode([1, 1], [1, 1]), AddressingMode::Linked16);
        assert_eq!(decide_mode([0, 0], [0, 0]), AddressingMode::Linked16);
        assert_eq!(decide_mode([0, 1], [1, 0]), AddressingMode::Linked16);
    }
}
