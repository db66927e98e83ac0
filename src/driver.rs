//! Register-level driver for one MCP23017.
//!
//! [`Driver`] tracks the addressing mode of the chip and the port register accesses go to, and
//! turns every logical register access into the right physical transfer:
//!
//! - In [`AddressingMode::Linked16`] a register is one 16-bit value spanning port A and port B.
//!   It is transferred as two bytes starting at the port A address, in the configured
//!   [`ByteOrder`](crate::ByteOrder).
//! - In [`AddressingMode::Banked8`] a register is the 8-bit value of the active port.
use crate::bus::{ByteOrder, RegisterBus, RegisterBusExt};
use crate::config::Config;
use crate::error::Error;
use crate::regmap::{self, AddressingMode, Port, Register, Width};

/// Valid I2C addresses of the MCP23017.
pub const ADDRESS_RANGE: core::ops::RangeInclusive<u8> = 0x20..=0x27;

/// Bits set by the addressing mode probe.  Bit 0 of IOCON always reads back as 0.
const PROBE_BITS: u8 = 0x03;

pub struct Driver<B> {
    bus: B,
    addr: u8,
    mode: AddressingMode,
    port: Port,
    config: Config,
}

impl<B: RegisterBus> Driver<B> {
    /// Create a driver for the chip at `addr` and detect its current addressing mode.
    pub fn new(bus: B, addr: u8) -> Result<Self, Error<B::BusError>> {
        Self::with_config(bus, addr, Config::default())
    }

    /// Create a driver for the chip whose address pins are strapped to `a0`, `a1` and `a2`.
    pub fn from_pins(bus: B, a0: bool, a1: bool, a2: bool) -> Result<Self, Error<B::BusError>> {
        let addr = 0x20 | ((a2 as u8) << 2) | ((a1 as u8) << 1) | (a0 as u8);
        Self::new(bus, addr)
    }

    /// Create a driver with a non-default configuration.
    ///
    /// The configuration is only stored here.  It is written to the chip on the next call to
    /// [`Driver::set_addressing_mode`] that changes the mode, or by [`Driver::set_config`].
    pub fn with_config(bus: B, addr: u8, config: Config) -> Result<Self, Error<B::BusError>> {
        if !ADDRESS_RANGE.contains(&addr) {
            return Err(Error::InvalidAddress(addr));
        }
        let mut driver = Self {
            bus,
            addr,
            mode: AddressingMode::Linked16,
            port: Port::A,
            config,
        };
        driver.detect_addressing_mode()?;
        Ok(driver)
    }

    /// Give back the bus.
    pub fn release(self) -> B {
        self.bus
    }

    pub fn address(&self) -> u8 {
        self.addr
    }

    pub fn config(&self) -> Config {
        self.config
    }

    pub fn addressing_mode(&self) -> AddressingMode {
        self.mode
    }

    pub fn active_port(&self) -> Port {
        self.port
    }

    /// Select the port register accesses go to.
    ///
    /// In [`AddressingMode::Linked16`] there is only one logical port, so the port stays
    /// [`Port::A`] whatever is requested.
    pub fn set_active_port(&mut self, port: Port) {
        self.port = match self.mode {
            AddressingMode::Linked16 => Port::A,
            AddressingMode::Banked8 => port,
        };
    }

    /// Find out which addressing mode the chip is in.
    ///
    /// Each of the four addresses IOCON can live at is read, written back with bits 0 and 1
    /// set, and read again.  IOCON bit 0 is unimplemented and reads as 0, so the pair of addresses
    /// that reads back 0 twice is the live IOCON.  If the result is ambiguous, the chip is assumed
    /// to be in its reset state ([`AddressingMode::Linked16`]).
    ///
    /// The probe leaves bits 0 and 1 set in whatever registers sit at the inactive pair of
    /// addresses.
    pub fn detect_addressing_mode(&mut self) -> Result<AddressingMode, Error<B::BusError>> {
        let [l0, l1] = regmap::IOCON_LINKED16;
        let [b0, b1] = regmap::IOCON_BANKED8;
        let linked16 = [self.probe_bit0(l0)?, self.probe_bit0(l1)?];
        let banked8 = [self.probe_bit0(b0)?, self.probe_bit0(b1)?];

        let mode = regmap::decide_mode(linked16, banked8);
        log::debug!(
            "mcp23017@0x{:02x}: probe linked16={:?} banked8={:?} -> {:?}",
            self.addr,
            linked16,
            banked8,
            mode
        );
        self.mode = mode;
        self.set_active_port(self.port);
        Ok(mode)
    }

    fn probe_bit0(&mut self, reg: u8) -> Result<u8, Error<B::BusError>> {
        let val = self.read_byte(reg)?;
        self.write_byte(reg, val | PROBE_BITS)?;
        Ok(self.read_byte(reg)? & 0x01)
    }

    /// Switch the chip to another addressing mode.
    ///
    /// The new IOCON value is written to both IOCON addresses of the current mode before the
    /// driver starts using the new map.  Nothing is written if the chip already is in `mode`.
    pub fn set_addressing_mode(&mut self, mode: AddressingMode) -> Result<(), Error<B::BusError>> {
        if mode == self.mode {
            return Ok(());
        }
        let val = self.config.iocon(mode);
        for reg in self.mode.iocon_addresses() {
            self.write_byte(reg, val)?;
        }
        log::debug!(
            "mcp23017@0x{:02x}: addressing mode {:?} -> {:?} (iocon=0x{:02x})",
            self.addr,
            self.mode,
            mode,
            val
        );
        self.mode = mode;
        self.set_active_port(self.port);
        Ok(())
    }

    /// Write `config` to IOCON, keeping the current addressing mode.
    pub fn set_config(&mut self, config: Config) -> Result<(), Error<B::BusError>> {
        let val = config.iocon(self.mode);
        for reg in self.mode.iocon_addresses() {
            self.write_byte(reg, val)?;
        }
        log::debug!("mcp23017@0x{:02x}: iocon=0x{:02x}", self.addr, val);
        self.config = config;
        Ok(())
    }

    /// Read a register of the active port (or both ports in 16-bit mode).
    pub fn read_register(&mut self, reg: Register) -> Result<u16, Error<B::BusError>> {
        let access = reg.access(self.mode, self.port);
        let value = self
            .bus
            .read_value(self.addr, access.address, access.width, self.config.byte_order)
            .map_err(Error::Bus)?;
        log::trace!(
            "mcp23017@0x{:02x}: read {:?} @0x{:02x} = 0x{:x}",
            self.addr,
            reg,
            access.address,
            value
        );
        Ok(value)
    }

    /// Write a register of the active port (or both ports in 16-bit mode).
    ///
    /// IOCON, INTF and INTCAP are rejected.  In 8-bit mode `value` must fit into one byte.
    pub fn write_register(&mut self, reg: Register, value: u16) -> Result<(), Error<B::BusError>> {
        if !reg.is_writable() {
            return Err(Error::NotWritable(reg));
        }
        let access = reg.access(self.mode, self.port);
        if access.width == Width::Byte && value > 0xff {
            return Err(Error::ValueTooWide(value));
        }
        log::trace!(
            "mcp23017@0x{:02x}: write {:?} @0x{:02x} = 0x{:x}",
            self.addr,
            reg,
            access.address,
            value
        );
        self.bus
            .write_value(
                self.addr,
                access.address,
                value,
                access.width,
                self.config.byte_order,
            )
            .map_err(Error::Bus)
    }

    /// Read a register by its raw index (0..=10).
    pub fn read_index(&mut self, index: i32) -> Result<u16, Error<B::BusError>> {
        self.read_register(Register::try_from(index)?)
    }

    /// Write a register by its raw index (0..=10).
    pub fn write_index(&mut self, index: i32, value: u16) -> Result<(), Error<B::BusError>> {
        self.write_register(Register::try_from(index)?, value)
    }

    /// IODIR: 1 = input, 0 = output.
    pub fn io_dir(&mut self) -> Result<u16, Error<B::BusError>> {
        self.read_register(Register::Iodir)
    }

    pub fn set_io_dir(&mut self, value: u16) -> Result<(), Error<B::BusError>> {
        self.write_register(Register::Iodir, value)
    }

    /// IPOL: 1 = GPIO reflects the inverted pin level.
    pub fn input_polarity(&mut self) -> Result<u16, Error<B::BusError>> {
        self.read_register(Register::Ipol)
    }

    pub fn set_input_polarity(&mut self, value: u16) -> Result<(), Error<B::BusError>> {
        self.write_register(Register::Ipol, value)
    }

    /// GPINTEN: interrupt-on-change enable.
    pub fn interrupt_enable(&mut self) -> Result<u16, Error<B::BusError>> {
        self.read_register(Register::Gpinten)
    }

    pub fn set_interrupt_enable(&mut self, value: u16) -> Result<(), Error<B::BusError>> {
        self.write_register(Register::Gpinten, value)
    }

    /// DEFVAL: compare value for interrupt-on-change.
    pub fn default_value(&mut self) -> Result<u16, Error<B::BusError>> {
        self.read_register(Register::Defval)
    }

    pub fn set_default_value(&mut self, value: u16) -> Result<(), Error<B::BusError>> {
        self.write_register(Register::Defval, value)
    }

    /// INTCON: 1 = compare against DEFVAL, 0 = compare against previous value.
    pub fn interrupt_control(&mut self) -> Result<u16, Error<B::BusError>> {
        self.read_register(Register::Intcon)
    }

    pub fn set_interrupt_control(&mut self, value: u16) -> Result<(), Error<B::BusError>> {
        self.write_register(Register::Intcon, value)
    }

    pub fn iocon(&mut self) -> Result<u16, Error<B::BusError>> {
        self.read_register(Register::Iocon)
    }

    /// GPPU: 1 = weak pull-up enabled.
    pub fn pull_up(&mut self) -> Result<u16, Error<B::BusError>> {
        self.read_register(Register::Gppu)
    }

    pub fn set_pull_up(&mut self, value: u16) -> Result<(), Error<B::BusError>> {
        self.write_register(Register::Gppu, value)
    }

    pub fn interrupt_flags(&mut self) -> Result<u16, Error<B::BusError>> {
        self.read_register(Register::Intf)
    }

    pub fn interrupt_capture(&mut self) -> Result<u16, Error<B::BusError>> {
        self.read_register(Register::Intcap)
    }

    /// Current pin levels.
    pub fn gpio(&mut self) -> Result<u16, Error<B::BusError>> {
        self.read_register(Register::Gpio)
    }

    pub fn set_gpio(&mut self, value: u16) -> Result<(), Error<B::BusError>> {
        self.write_register(Register::Gpio, value)
    }

    pub fn output_latch(&mut self) -> Result<u16, Error<B::BusError>> {
        self.read_register(Register::Olat)
    }

    pub fn set_output_latch(&mut self, value: u16) -> Result<(), Error<B::BusError>> {
        self.write_register(Register::Olat, value)
    }

    /// Read a register of both ports at once, independent of the active port.
    ///
    /// The result has port A in the lower and port B in the upper byte.  In 8-bit mode only the
    /// ports touched by `mask` are read; the others read as 0.
    pub(crate) fn read_ports(
        &mut self,
        reg: Register,
        mask: u16,
    ) -> Result<u16, Error<B::BusError>> {
        let (a, b) = reg.addresses(self.mode);
        match self.mode {
            AddressingMode::Linked16 => self
                .bus
                .read_value(self.addr, a, Width::Word, ByteOrder::LittleEndian)
                .map_err(Error::Bus),
            AddressingMode::Banked8 => {
                let lo = if mask & 0x00ff != 0 {
                    self.read_byte(a)?
                } else {
                    0
                };
                let hi = if mask & 0xff00 != 0 {
                    self.read_byte(b)?
                } else {
                    0
                };
                Ok(((hi as u16) << 8) | lo as u16)
            }
        }
    }

    /// Write a register of both ports at once, port A in the lower byte of `value`.
    ///
    /// In 8-bit mode only the ports touched by `mask` are written.
    pub(crate) fn write_ports(
        &mut self,
        reg: Register,
        value: u16,
        mask: u16,
    ) -> Result<(), Error<B::BusError>> {
        let (a, b) = reg.addresses(self.mode);
        match self.mode {
            AddressingMode::Linked16 => self
                .bus
                .write_value(self.addr, a, value, Width::Word, ByteOrder::LittleEndian)
                .map_err(Error::Bus),
            AddressingMode::Banked8 => {
                if mask & 0x00ff != 0 {
                    self.write_byte(a, (value & 0xff) as u8)?;
                }
                if mask & 0xff00 != 0 {
                    self.write_byte(b, (value >> 8) as u8)?;
                }
                Ok(())
            }
        }
    }

    pub(crate) fn update_ports(
        &mut self,
        reg: Register,
        mask_set: u16,
        mask_clear: u16,
    ) -> Result<(), Error<B::BusError>> {
        let mask = mask_set | mask_clear;
        let mut val = self.read_ports(reg, mask)?;
        val |= mask_set;
        val &= !mask_clear;
        self.write_ports(reg, val, mask)
    }

    fn read_byte(&mut self, reg: u8) -> Result<u8, Error<B::BusError>> {
        let mut buf = [0x00];
        self.bus
            .read_register(self.addr, reg, &mut buf)
            .map_err(Error::Bus)?;
        Ok(buf[0])
    }

    fn write_byte(&mut self, reg: u8, value: u8) -> Result<(), Error<B::BusError>> {
        self.bus
            .write_register(self.addr, reg, &[value])
            .map_err(Error::Bus)
    }
}
