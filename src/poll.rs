//! Caller-owned polling of the GPIO register.
//!
//! The driver never sleeps on its own.  [`Poller`] combines a driver, a delay provider and an
//! interval into a loop whose lifetime is decided by the caller's closure:
//!
//! ```
//! # use core::ops::ControlFlow;
//! # use embedded_hal::delay::DelayNs;
//! # struct NoDelay;
//! # impl DelayNs for NoDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # fn demo<B: mcp23017_regmap::RegisterBus>(driver: &mut mcp23017_regmap::Driver<B>)
//! #     -> Result<(), mcp23017_regmap::Error<B::BusError>> {
//! let mut poller = mcp23017_regmap::Poller::new(NoDelay, 500);
//! let mut count = 0;
//! poller.run(driver, |state| {
//!     count += 1;
//!     if state & 0x01 == 0 || count > 50 {
//!         ControlFlow::Break(())
//!     } else {
//!         ControlFlow::Continue(())
//!     }
//! })?;
//! # Ok(())
//! # }
//! ```
use core::ops::ControlFlow;

use embedded_hal::delay::DelayNs;

use crate::{Driver, Error, RegisterBus};

pub struct Poller<D> {
    delay: D,
    interval_ms: u32,
}

impl<D: DelayNs> Poller<D> {
    pub fn new(delay: D, interval_ms: u32) -> Self {
        Self { delay, interval_ms }
    }

    /// Give back the delay provider.
    pub fn release(self) -> D {
        self.delay
    }

    /// Read GPIO and hand it to `f` until `f` breaks.
    ///
    /// The first read happens immediately, every following one after the interval.  A bus error
    /// ends the loop and is returned as is.
    pub fn run<B, F>(&mut self, driver: &mut Driver<B>, mut f: F) -> Result<(), Error<B::BusError>>
    where
        B: RegisterBus,
        F: FnMut(u16) -> ControlFlow<()>,
    {
        loop {
            let state = driver.gpio()?;
            if f(state).is_break() {
                return Ok(());
            }
            self.delay.delay_ms(self.interval_ms);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimChip;
    use crate::{AddressingMode, Port};
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c as mock_i2c;

    #[derive(Default)]
    struct CountingDelay {
        total_ns: u64,
        calls: usize,
    }

    impl DelayNs for CountingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += ns as u64;
            self.calls += 1;
        }
    }

    #[test]
    fn polls_until_cancelled() {
        let mut chip = SimChip::new(0x27);
        chip.set_inputs(0x5a00);
        let mut driver = Driver::new(chip, 0x27).unwrap();
        driver
            .set_addressing_mode(AddressingMode::Banked8)
            .unwrap();
        driver.set_active_port(Port::B);

        let mut poller = Poller::new(CountingDelay::default(), 500);
        let mut seen = Vec::new();
        poller
            .run(&mut driver, |state| {
                seen.push(state);
                if seen.len() == 3 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            })
            .unwrap();

        assert_eq!(seen, [0x5a, 0x5a, 0x5a]);
        let delay = poller.release();
        assert_eq!(delay.total_ns, 2 * 500_000_000);
        assert!(delay.calls >= 2);
    }

    #[test]
    fn bus_error_stops_polling() {
        let mut expectations = Vec::new();
        for (reg, after) in [(0x0a, 0x02), (0x0b, 0x02), (0x05, 0x03), (0x15, 0x03)] {
            expectations.push(mock_i2c::Transaction::write_read(0x20, vec![reg], vec![0x00]));
            expectations.push(mock_i2c::Transaction::write(0x20, vec![reg, 0x03]));
            expectations.push(mock_i2c::Transaction::write_read(0x20, vec![reg], vec![after]));
        }
        expectations.push(mock_i2c::Transaction::write_read(
            0x20,
            vec![0x12],
            vec![0xff, 0x00],
        ));
        expectations.push(
            mock_i2c::Transaction::write_read(0x20, vec![0x12], vec![0x00, 0x00])
                .with_error(ErrorKind::Bus),
        );
        let mut bus = mock_i2c::Mock::new(&expectations);
        let mut driver = Driver::new(bus.clone(), 0x20).unwrap();

        let mut poller = Poller::new(CountingDelay::default(), 10);
        let mut seen = Vec::new();
        let res = poller.run(&mut driver, |state| {
            seen.push(state);
            ControlFlow::Continue(())
        });
        assert_eq!(res, Err(Error::Bus(ErrorKind::Bus)));
        assert_eq!(seen, [0xff00]);
        bus.done();
    }
}
