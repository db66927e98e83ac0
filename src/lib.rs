//! Driver for the MCP23017 16-bit I2C I/O expander.
//!
//! The chip can lay out its registers in two ways, selected by IOCON.BANK: with ports A and B
//! interleaved as one 16-bit port ([`AddressingMode::Linked16`], the reset state) or as two
//! separate 8-bit banks ([`AddressingMode::Banked8`]).  [`Driver`] detects the mode the chip is
//! in, can switch between both, and resolves every logical register access to the right
//! physical address and width.
//!
//! ```
//! # use embedded_hal_mock::eh1::i2c::{Mock, Transaction};
//! # let mut expectations = Vec::new();
//! # for (reg, after) in [(0x0a, 0x02), (0x0b, 0x02), (0x05, 0x03), (0x15, 0x03)] {
//! #     expectations.push(Transaction::write_read(0x27, vec![reg], vec![0x00]));
//! #     expectations.push(Transaction::write(0x27, vec![reg, 0x03]));
//! #     expectations.push(Transaction::write_read(0x27, vec![reg], vec![after]));
//! # }
//! # expectations.push(Transaction::write(0x27, vec![0x0a, 0x80]));
//! # expectations.push(Transaction::write(0x27, vec![0x0b, 0x80]));
//! # expectations.push(Transaction::write(0x27, vec![0x10, 0x00]));
//! # expectations.push(Transaction::write(0x27, vec![0x19, 0xff]));
//! # let mut i2c = Mock::new(&expectations);
//! use mcp23017_regmap::{AddressingMode, Driver, Port};
//!
//! let mut mcp = Driver::new(i2c.clone(), 0x27)?;
//! mcp.set_addressing_mode(AddressingMode::Banked8)?;
//! mcp.set_active_port(Port::B);
//! mcp.set_io_dir(0x00)?;
//! mcp.set_gpio(0xff)?;
//! # i2c.done();
//! # Ok::<(), mcp23017_regmap::Error<embedded_hal::i2c::ErrorKind>>(())
//! ```
//!
//! For pin-level access, [`Mcp23017`] puts the driver behind a [`PortMutex`] and splits it into
//! [`Pin`]s implementing the `embedded-hal` digital traits.
#![cfg_attr(not(test), no_std)]

#[cfg(all(feature = "std", not(test)))]
extern crate std;

mod bus;
mod common;
mod config;
mod driver;
mod error;
mod mcp23017;
mod mutex;
mod pin;
mod poll;
pub mod regmap;
#[cfg(test)]
mod sim;

pub use bus::{ByteOrder, RegisterBus, MAX_TRANSFER};
pub use common::mode;
pub use common::{
    Direction, PortDriver, PortDriverPolarity, PortDriverPullUp, PortDriverTotemPole,
};
pub use config::Config;
pub use driver::{Driver, ADDRESS_RANGE};
pub use error::Error;
pub use mcp23017::{Mcp23017, Parts};
pub use mutex::PortMutex;
pub use pin::Pin;
pub use poll::Poller;
pub use regmap::{resolve, Access, AddressingMode, Port, Register, Width};
