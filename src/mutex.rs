/// Lock around a shared MCP23017 [`Driver`](crate::Driver).
///
/// [`Mcp23017::split`](crate::Mcp23017::split) hands out sixteen pins that all talk to the same
/// driver, so the driver lives inside one of these.  Which one to pick depends on who else
/// touches the chip:
///
/// | Lock | Feature | Use it when |
/// | --- | --- | --- |
/// | [`core::cell::RefCell`] | _always available_ | pins stay in one execution context |
/// | [`std::sync::Mutex`][mutex-std] | `std` | pins move between threads |
/// | [`critical_section::Mutex`][mutex-cs] | `critical-section` | pins are used from interrupt handlers |
///
/// [mutex-std]: https://doc.rust-lang.org/std/sync/struct.Mutex.html
/// [mutex-cs]: https://docs.rs/critical-section/latest/critical_section/struct.Mutex.html
///
/// A poisoned `std::sync::Mutex` is still locked and used.  The driver commits its addressing
/// mode and active port only after the bus transfer that changes them succeeded, so a panic in
/// another pin's closure cannot leave them out of step with the chip.
///
/// Foreign lock types need a newtype wrapper:
///
/// ```
/// struct SpinLock<T>(std::sync::Mutex<T>);
///
/// impl<T> mcp23017_regmap::PortMutex for SpinLock<T> {
///     type Port = T;
///
///     fn create(driver: T) -> Self {
///         Self(std::sync::Mutex::new(driver))
///     }
///
///     fn lock<R, F: FnOnce(&mut T) -> R>(&self, f: F) -> R {
///         let mut guard = self.0.lock().unwrap();
///         f(&mut guard)
///     }
/// }
/// ```
pub trait PortMutex {
    /// The driver behind the lock.
    type Port;

    fn create(driver: Self::Port) -> Self;

    /// Run `f` with exclusive access to the driver.
    fn lock<R, F: FnOnce(&mut Self::Port) -> R>(&self, f: F) -> R;
}

impl<T> PortMutex for core::cell::RefCell<T> {
    type Port = T;

    fn create(driver: T) -> Self {
        Self::new(driver)
    }

    fn lock<R, F: FnOnce(&mut T) -> R>(&self, f: F) -> R {
        f(&mut self.borrow_mut())
    }
}

#[cfg(any(test, feature = "std"))]
impl<T> PortMutex for std::sync::Mutex<T> {
    type Port = T;

    fn create(driver: T) -> Self {
        Self::new(driver)
    }

    fn lock<R, F: FnOnce(&mut T) -> R>(&self, f: F) -> R {
        let mut guard = self
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        f(&mut guard)
    }
}

#[cfg(feature = "critical-section")]
impl<T> PortMutex for critical_section::Mutex<core::cell::RefCell<T>> {
    type Port = T;

    fn create(driver: T) -> Self {
        Self::new(core::cell::RefCell::new(driver))
    }

    fn lock<R, F: FnOnce(&mut T) -> R>(&self, f: F) -> R {
        critical_section::with(|cs| f(&mut self.borrow_ref_mut(cs)))
    }
}
