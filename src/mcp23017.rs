//! Pin-level access to the `MCP23017` "16-Bit I/O Expander with Serial Interface"
//!
//! The MCP23017 offers two eight-bit GPIO ports.  It has three address pins, so eight devices
//! can coexist on an I2C bus.
//!
//! When passing 16-bit values to the pins, the upper byte corresponds to port B (pins 7..0) and
//! the lower byte corresponds to port A (pins 7..0).  This holds in both addressing modes and
//! is independent of the configured byte order, which only applies to the register API of
//! [`Driver`].
use crate::common::{
    Direction, PortDriver, PortDriverPolarity, PortDriverPullUp, PortDriverTotemPole,
};
use crate::regmap::Register;
use crate::{Driver, Error, PortMutex, RegisterBus};

/// `MCP23017` with its driver behind a mutex, ready to be split into pins.
pub struct Mcp23017<M>(M);

impl<B> Mcp23017<core::cell::RefCell<Driver<B>>>
where
    B: RegisterBus,
{
    /// Create a new instance for the chip at `addr`.
    pub fn new(bus: B, addr: u8) -> Result<Self, Error<B::BusError>> {
        Driver::new(bus, addr).map(Self::with_mutex)
    }
}

impl<B, M> Mcp23017<M>
where
    B: RegisterBus,
    M: PortMutex<Port = Driver<B>>,
{
    pub fn with_mutex(driver: Driver<B>) -> Self {
        Self(M::create(driver))
    }

    /// Run `f` with exclusive access to the register-level driver.
    pub fn lock<R>(&self, f: impl FnOnce(&mut Driver<B>) -> R) -> R {
        self.0.lock(f)
    }

    pub fn split(&mut self) -> Parts<'_, B, M> {
        Parts {
            gpa0: crate::Pin::new(0, &self.0),
            gpa1: crate::Pin::new(1, &self.0),
            gpa2: crate::Pin::new(2, &self.0),
            gpa3: crate::Pin::new(3, &self.0),
            gpa4: crate::Pin::new(4, &self.0),
            gpa5: crate::Pin::new(5, &self.0),
            gpa6: crate::Pin::new(6, &self.0),
            gpa7: crate::Pin::new(7, &self.0),
            gpb0: crate::Pin::new(8, &self.0),
            gpb1: crate::Pin::new(9, &self.0),
            gpb2: crate::Pin::new(10, &self.0),
            gpb3: crate::Pin::new(11, &self.0),
            gpb4: crate::Pin::new(12, &self.0),
            gpb5: crate::Pin::new(13, &self.0),
            gpb6: crate::Pin::new(14, &self.0),
            gpb7: crate::Pin::new(15, &self.0),
        }
    }
}

pub struct Parts<'a, B, M = core::cell::RefCell<Driver<B>>>
where
    B: RegisterBus,
    M: PortMutex<Port = Driver<B>>,
{
    pub gpa0: crate::Pin<'a, crate::mode::Input, M>,
    pub gpa1: crate::Pin<'a, crate::mode::Input, M>,
    pub gpa2: crate::Pin<'a, crate::mode::Input, M>,
    pub gpa3: crate::Pin<'a, crate::mode::Input, M>,
    pub gpa4: crate::Pin<'a, crate::mode::Input, M>,
    pub gpa5: crate::Pin<'a, crate::mode::Input, M>,
    pub gpa6: crate::Pin<'a, crate::mode::Input, M>,
    pub gpa7: crate::Pin<'a, crate::mode::Input, M>,
    pub gpb0: crate::Pin<'a, crate::mode::Input, M>,
    pub gpb1: crate::Pin<'a, crate::mode::Input, M>,
    pub gpb2: crate::Pin<'a, crate::mode::Input, M>,
    pub gpb3: crate::Pin<'a, crate::mode::Input, M>,
    pub gpb4: crate::Pin<'a, crate::mode::Input, M>,
    pub gpb5: crate::Pin<'a, crate::mode::Input, M>,
    pub gpb6: crate::Pin<'a, crate::mode::Input, M>,
    pub gpb7: crate::Pin<'a, crate::mode::Input, M>,
}

// Output state is always read back from OLAT, there is no shadow copy.
impl<B: RegisterBus> PortDriver for Driver<B> {
    type Error = Error<B::BusError>;

    fn set(&mut self, mask_high: u16, mask_low: u16) -> Result<(), Self::Error> {
        self.update_ports(Register::Olat, mask_high, mask_low)
    }

    fn is_set(&mut self, mask_high: u16, mask_low: u16) -> Result<u16, Self::Error> {
        let out = self.read_ports(Register::Olat, mask_high | mask_low)?;
        Ok((out & mask_high) | (!out & mask_low))
    }

    fn get(&mut self, mask_high: u16, mask_low: u16) -> Result<u16, Self::Error> {
        let in_ = self.read_ports(Register::Gpio, mask_high | mask_low)?;
        Ok((in_ & mask_high) | (!in_ & mask_low))
    }
}

impl<B: RegisterBus> PortDriverTotemPole for Driver<B> {
    fn set_direction(&mut self, mask: u16, dir: Direction, state: bool) -> Result<(), Self::Error> {
        match dir {
            Direction::Input => self.update_ports(Register::Iodir, mask, 0),
            Direction::Output => {
                if state {
                    self.set(mask, 0)?;
                } else {
                    self.set(0, mask)?;
                }
                self.update_ports(Register::Iodir, 0, mask)
            }
        }
    }
}

impl<B: RegisterBus> PortDriverPullUp for Driver<B> {
    fn set_pull_up(&mut self, mask: u16, enable: bool) -> Result<(), Self::Error> {
        if enable {
            self.update_ports(Register::Gppu, mask, 0)
        } else {
            self.update_ports(Register::Gppu, 0, mask)
        }
    }
}

impl<B: RegisterBus> PortDriverPolarity for Driver<B> {
    fn set_polarity(&mut self, mask: u16, inverted: bool) -> Result<(), Self::Error> {
        if inverted {
            self.update_ports(Register::Ipol, mask, 0)
        } else {
            self.update_ports(Register::Ipol, 0, mask)
        }
    }
}
