//! Pin-level view of the expander.
//!
//! Pins are addressed by a 16-bit mask: bits 0..=7 are GPA0..GPA7, bits 8..=15 are GPB0..GPB7,
//! whatever the addressing mode of the chip.

pub trait PortDriver {
    type Error;

    /// Set all pins in `mask_high` to HIGH and all pins in `mask_low` to LOW.
    ///
    /// Pins of one port change state at the same time.  In 16-bit mode both ports do.
    fn set(&mut self, mask_high: u16, mask_low: u16) -> Result<(), Self::Error>;

    /// Check whether pins in `mask_high` were set HIGH and pins in `mask_low` were set LOW.
    ///
    /// This reflects the output latches (OLAT), not the pin levels.  For each pin in either of
    /// the masks, the returned `u16` has a 1 if it meets the expected state and a 0 otherwise.
    /// All other bits stay 0.
    fn is_set(&mut self, mask_high: u16, mask_low: u16) -> Result<u16, Self::Error>;

    /// Check whether pins in `mask_high` are driven HIGH and pins in `mask_low` are driven LOW.
    ///
    /// Same contract as [`PortDriver::is_set`], but for the pin levels as seen in GPIO.
    fn get(&mut self, mask_high: u16, mask_low: u16) -> Result<u16, Self::Error>;

    fn toggle(&mut self, mask: u16) -> Result<(), Self::Error> {
        // for all pins which are currently low, make them high.
        let mask_high = self.is_set(0, mask)?;
        // for all pins which are currently high, make them low.
        let mask_low = self.is_set(mask, 0)?;
        self.set(mask_high, mask_low)
    }
}

pub trait PortDriverTotemPole: PortDriver {
    /// Set the direction for all pins in `mask` to direction `dir`.
    ///
    /// When making pins outputs, the latch is loaded with `state` first so the pins come up at
    /// the requested level.
    fn set_direction(&mut self, mask: u16, dir: Direction, state: bool) -> Result<(), Self::Error>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Input,
    Output,
}

pub trait PortDriverPolarity: PortDriver {
    /// Invert (or stop inverting) the GPIO reading of all pins in `mask`.
    fn set_polarity(&mut self, mask: u16, inverted: bool) -> Result<(), Self::Error>;
}

pub trait PortDriverPullUp: PortDriver {
    /// Enable the 100k pull-ups of all pins in `mask`, or leave them floating.
    fn set_pull_up(&mut self, mask: u16, enable: bool) -> Result<(), Self::Error>;
}

/// Pin Modes
pub mod mode {
    /// Trait for pin-modes which can be used to set a logic level.
    pub trait HasOutput {}
    /// Trait for pin-modes which can be used to read a logic level.
    pub trait HasInput {}

    /// Pin configured as an input.
    pub struct Input;
    impl HasInput for Input {}

    /// Pin configured as an output.
    pub struct Output;
    impl HasOutput for Output {}
}
