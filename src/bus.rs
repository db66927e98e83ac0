use embedded_hal::i2c as hal_i2c;

use crate::regmap::Width;

/// Largest transfer the MCP23017 register map ever needs (one register pair).
pub const MAX_TRANSFER: usize = 2;

/// Order in which the two bytes of a 16-bit value travel over the bus.
///
/// The first byte on the wire always lands in the port A register of the pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteOrder {
    /// High byte first, so port A receives the upper eight bits.
    #[default]
    BigEndian,
    /// Low byte first, so port A receives the lower eight bits.
    LittleEndian,
}

impl ByteOrder {
    pub(crate) fn encode(self, value: u16, width: Width) -> ([u8; MAX_TRANSFER], usize) {
        match width {
            Width::Byte => ([value as u8, 0], 1),
            Width::Word => match self {
                ByteOrder::BigEndian => (value.to_be_bytes(), 2),
                ByteOrder::LittleEndian => (value.to_le_bytes(), 2),
            },
        }
    }

    pub(crate) fn decode(self, bytes: &[u8]) -> u16 {
        let shift_in = |acc: u16, b: &u8| (acc << 8) | *b as u16;
        match self {
            ByteOrder::BigEndian => bytes.iter().fold(0, shift_in),
            ByteOrder::LittleEndian => bytes.iter().rev().fold(0, shift_in),
        }
    }
}

/// Byte-register bus adapter.
///
/// Everything the driver needs from the bus: read or write bytes starting at a register address
/// of the device at `addr`.  Implementations must report every bus-level problem (missing
/// acknowledge, arbitration loss, ...) as an error; the driver never retries.
///
/// A blanket implementation exists for every [`embedded_hal::i2c::I2c`] bus.  Implement this
/// trait directly to put the driver on top of some other transport.
pub trait RegisterBus {
    type BusError;

    /// Fill `buf` with the bytes starting at register `reg`.
    fn read_register(&mut self, addr: u8, reg: u8, buf: &mut [u8]) -> Result<(), Self::BusError>;

    /// Write `bytes` starting at register `reg`.
    ///
    /// The driver itself never passes more than [`MAX_TRANSFER`] bytes.
    fn write_register(&mut self, addr: u8, reg: u8, bytes: &[u8]) -> Result<(), Self::BusError>;
}

impl<I2C: hal_i2c::I2c> RegisterBus for I2C {
    type BusError = I2C::Error;

    fn read_register(&mut self, addr: u8, reg: u8, buf: &mut [u8]) -> Result<(), Self::BusError> {
        self.write_read(addr, &[reg], buf)
    }

    fn write_register(&mut self, addr: u8, reg: u8, bytes: &[u8]) -> Result<(), Self::BusError> {
        if bytes.len() > MAX_TRANSFER {
            // Adjacent writes go out back to back, without a repeated start.
            return self.transaction(
                addr,
                &mut [hal_i2c::Operation::Write(&[reg]), hal_i2c::Operation::Write(bytes)],
            );
        }
        let mut buf = [0x00; MAX_TRANSFER + 1];
        buf[0] = reg;
        buf[1..=bytes.len()].copy_from_slice(bytes);
        self.write(addr, &buf[..=bytes.len()])
    }
}

/// Register values of one or two bytes on top of a [`RegisterBus`].
///
/// Callers check that a [`Width::Byte`] value fits into eight bits.
pub(crate) trait RegisterBusExt: RegisterBus {
    fn read_value(
        &mut self,
        addr: u8,
        reg: u8,
        width: Width,
        order: ByteOrder,
    ) -> Result<u16, Self::BusError> {
        let mut buf = [0x00; MAX_TRANSFER];
        let buf = &mut buf[..width.byte_count()];
        self.read_register(addr, reg, buf)?;
        Ok(order.decode(buf))
    }

    fn write_value(
        &mut self,
        addr: u8,
        reg: u8,
        value: u16,
        width: Width,
        order: ByteOrder,
    ) -> Result<(), Self::BusError> {
        debug_assert!(width == Width::Word || value <= 0xff);
        let (bytes, len) = order.encode(value, width);
        self.write_register(addr, reg, &bytes[..len])
    }
}

impl<B: RegisterBus + ?Sized> RegisterBusExt for B {}
