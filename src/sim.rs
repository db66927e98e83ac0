//! Simulated MCP23017 for tests.
//!
//! Models both register maps, the address pointer behavior, IOCON bit 0 reading as 0 and the
//! GPIO/OLAT relationship closely enough to run the driver against it.
use embedded_hal::i2c::{self, ErrorKind, NoAcknowledgeSource, Operation};

const IODIR: usize = 0;
const IPOL: usize = 1;
const IOCON: usize = 5;
const INTF: usize = 7;
const INTCAP: usize = 8;
const GPIO: usize = 9;
const OLAT: usize = 10;

pub struct SimChip {
    addr: u8,
    /// Register file, indexed by register and then by port.
    regs: [[u8; 2]; 11],
    /// Logic levels applied to the pins, port A in the lower byte.
    inputs: u16,
    last_read: Option<(u8, usize)>,
    last_write: Option<(u8, usize)>,
}

impl SimChip {
    pub fn new(addr: u8) -> Self {
        let mut regs = [[0x00; 2]; 11];
        regs[IODIR] = [0xff, 0xff];
        Self {
            addr,
            regs,
            inputs: 0x0000,
            last_read: None,
            last_write: None,
        }
    }

    pub fn set_inputs(&mut self, inputs: u16) {
        self.inputs = inputs;
    }

    pub fn is_banked(&self) -> bool {
        self.regs[IOCON][0] & 0x80 != 0
    }

    /// Output latches, port A in the lower byte.
    pub fn latch(&self) -> u16 {
        u16::from_le_bytes(self.regs[OLAT])
    }

    /// Start address and length of the last read.
    pub fn last_read(&self) -> Option<(u8, usize)> {
        self.last_read
    }

    /// Start address and length of the last write.
    pub fn last_write(&self) -> Option<(u8, usize)> {
        self.last_write
    }

    fn locate(&self, address: u8) -> Option<(usize, usize)> {
        let address = address as usize;
        if self.is_banked() {
            match address {
                0x00..=0x0a => Some((address, 0)),
                0x10..=0x1a => Some((address - 0x10, 1)),
                _ => None,
            }
        } else if address < 22 {
            Some((address / 2, address % 2))
        } else {
            None
        }
    }

    fn next(&self, address: u8) -> u8 {
        let seqop = self.regs[IOCON][0] & 0x20 != 0;
        match (seqop, self.is_banked()) {
            (false, _) => address.wrapping_add(1),
            (true, false) => address ^ 0x01,
            (true, true) => address,
        }
    }

    fn read_reg(&self, address: u8) -> u8 {
        match self.locate(address) {
            None => 0x00,
            Some((IOCON, _)) => self.regs[IOCON][0] & !0x01,
            Some((GPIO, port)) => {
                let iodir = self.regs[IODIR][port];
                let pins = (self.inputs >> (8 * port)) as u8 ^ self.regs[IPOL][port];
                (self.regs[OLAT][port] & !iodir) | (pins & iodir)
            }
            Some((reg, port)) => self.regs[reg][port],
        }
    }

    fn write_reg(&mut self, address: u8, value: u8) {
        match self.locate(address) {
            None => {}
            Some((IOCON, _)) => self.regs[IOCON] = [value & !0x01; 2],
            Some((GPIO, port)) => self.regs[OLAT][port] = value,
            Some((INTF, _)) | Some((INTCAP, _)) => {}
            Some((reg, port)) => self.regs[reg][port] = value,
        }
    }
}

impl i2c::ErrorType for SimChip {
    type Error = ErrorKind;
}

impl i2c::I2c for SimChip {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if address != self.addr {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }
        let mut pointer = None;
        for op in operations {
            match op {
                Operation::Write(bytes) => {
                    let data = match pointer {
                        Some(_) => &bytes[..],
                        None => match bytes.split_first() {
                            Some((reg, rest)) => {
                                pointer = Some(*reg);
                                rest
                            }
                            None => continue,
                        },
                    };
                    let mut ptr = pointer.unwrap_or(0);
                    if !data.is_empty() {
                        self.last_write = Some((ptr, data.len()));
                    }
                    for b in data {
                        self.write_reg(ptr, *b);
                        ptr = self.next(ptr);
                    }
                    pointer = Some(ptr);
                }
                Operation::Read(buf) => {
                    let mut ptr = pointer.unwrap_or(0);
                    self.last_read = Some((ptr, buf.len()));
                    for b in buf.iter_mut() {
                        *b = self.read_reg(ptr);
                        ptr = self.next(ptr);
                    }
                    pointer = Some(ptr);
                }
            }
        }
        Ok(())
    }
}
