use core::marker::PhantomData;
use embedded_hal::digital as hal_digital;

use crate::common::{
    Direction, PortDriver, PortDriverPolarity, PortDriverPullUp, PortDriverTotemPole,
};
use crate::PortMutex;

/// Representation of an expander pin.
///
/// `Pin` is not constructed directly, this type is created by instanciating an expander and
/// then getting access to all its pins using the `.split()` method.
pub struct Pin<'a, MODE, MUTEX> {
    pin_mask: u16,
    port_driver: &'a MUTEX,
    _m: PhantomData<MODE>,
}

impl<'a, MODE, MUTEX, PD> Pin<'a, MODE, MUTEX>
where
    PD: PortDriver,
    MUTEX: PortMutex<Port = PD>,
{
    pub(crate) fn new(pin_number: u8, port_driver: &'a MUTEX) -> Self {
        assert!(pin_number < 16);
        Self {
            pin_mask: 1 << pin_number,
            port_driver,
            _m: PhantomData,
        }
    }

    pub fn pin_mask(&self) -> u16 {
        self.pin_mask
    }

    fn with_mode<M>(self) -> Pin<'a, M, MUTEX> {
        Pin {
            pin_mask: self.pin_mask,
            port_driver: self.port_driver,
            _m: PhantomData,
        }
    }
}

impl<'a, MODE, MUTEX, PD> Pin<'a, MODE, MUTEX>
where
    PD: PortDriver + PortDriverTotemPole,
    MUTEX: PortMutex<Port = PD>,
{
    pub fn into_input(self) -> Result<Pin<'a, crate::mode::Input, MUTEX>, PD::Error> {
        self.port_driver
            .lock(|drv| drv.set_direction(self.pin_mask, Direction::Input, false))?;
        Ok(self.with_mode())
    }

    /// Turn the pin into an output, driven LOW.
    pub fn into_output(self) -> Result<Pin<'a, crate::mode::Output, MUTEX>, PD::Error> {
        self.port_driver
            .lock(|drv| drv.set_direction(self.pin_mask, Direction::Output, false))?;
        Ok(self.with_mode())
    }

    /// Turn the pin into an output, driven HIGH.
    pub fn into_output_high(self) -> Result<Pin<'a, crate::mode::Output, MUTEX>, PD::Error> {
        self.port_driver
            .lock(|drv| drv.set_direction(self.pin_mask, Direction::Output, true))?;
        Ok(self.with_mode())
    }
}

impl<'a, MODE: crate::mode::HasInput, MUTEX, PD> Pin<'a, MODE, MUTEX>
where
    PD: PortDriver + PortDriverPullUp,
    MUTEX: PortMutex<Port = PD>,
{
    pub fn enable_pull_up(&mut self, enable: bool) -> Result<(), PD::Error> {
        self.port_driver
            .lock(|drv| drv.set_pull_up(self.pin_mask, enable))
    }
}

impl<'a, MODE: crate::mode::HasInput, MUTEX, PD> Pin<'a, MODE, MUTEX>
where
    PD: PortDriver + PortDriverPolarity,
    MUTEX: PortMutex<Port = PD>,
{
    /// Report the inverted pin level from now on.
    pub fn set_inverted(&mut self, inverted: bool) -> Result<(), PD::Error> {
        self.port_driver
            .lock(|drv| drv.set_polarity(self.pin_mask, inverted))
    }
}

impl<'a, MODE: crate::mode::HasInput, MUTEX, PD> Pin<'a, MODE, MUTEX>
where
    PD: PortDriver,
    MUTEX: PortMutex<Port = PD>,
{
    pub fn is_high(&self) -> Result<bool, PD::Error> {
        self.port_driver
            .lock(|drv| drv.get(self.pin_mask, 0).map(|v| v == self.pin_mask))
    }

    pub fn is_low(&self) -> Result<bool, PD::Error> {
        self.port_driver
            .lock(|drv| drv.get(0, self.pin_mask).map(|v| v == self.pin_mask))
    }
}

impl<'a, MODE: crate::mode::HasOutput, MUTEX, PD> Pin<'a, MODE, MUTEX>
where
    PD: PortDriver,
    MUTEX: PortMutex<Port = PD>,
{
    pub fn set_high(&mut self) -> Result<(), PD::Error> {
        self.port_driver.lock(|drv| drv.set(self.pin_mask, 0))
    }

    pub fn set_low(&mut self) -> Result<(), PD::Error> {
        self.port_driver.lock(|drv| drv.set(0, self.pin_mask))
    }

    pub fn is_set_high(&self) -> Result<bool, PD::Error> {
        self.port_driver
            .lock(|drv| drv.is_set(self.pin_mask, 0).map(|v| v == self.pin_mask))
    }

    pub fn is_set_low(&self) -> Result<bool, PD::Error> {
        self.port_driver
            .lock(|drv| drv.is_set(0, self.pin_mask).map(|v| v == self.pin_mask))
    }

    pub fn toggle(&mut self) -> Result<(), PD::Error> {
        self.port_driver.lock(|drv| drv.toggle(self.pin_mask))
    }
}

impl<'a, MODE, MUTEX, PD> hal_digital::ErrorType for Pin<'a, MODE, MUTEX>
where
    PD: PortDriver,
    PD::Error: hal_digital::Error,
    MUTEX: PortMutex<Port = PD>,
{
    type Error = PD::Error;
}

impl<'a, MODE: crate::mode::HasInput, MUTEX, PD> hal_digital::InputPin for Pin<'a, MODE, MUTEX>
where
    PD: PortDriver,
    PD::Error: hal_digital::Error,
    MUTEX: PortMutex<Port = PD>,
{
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Pin::is_high(self)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Pin::is_low(self)
    }
}

impl<'a, MODE: crate::mode::HasOutput, MUTEX, PD> hal_digital::OutputPin for Pin<'a, MODE, MUTEX>
where
    PD: PortDriver,
    PD::Error: hal_digital::Error,
    MUTEX: PortMutex<Port = PD>,
{
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Pin::set_low(self)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Pin::set_high(self)
    }
}

impl<'a, MODE: crate::mode::HasOutput, MUTEX, PD> hal_digital::StatefulOutputPin
    for Pin<'a, MODE, MUTEX>
where
    PD: PortDriver,
    PD::Error: hal_digital::Error,
    MUTEX: PortMutex<Port = PD>,
{
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Pin::is_set_high(self)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Pin::is_set_low(self)
    }

    fn toggle(&mut self) -> Result<(), Self::Error> {
        Pin::toggle(self)
    }
}
