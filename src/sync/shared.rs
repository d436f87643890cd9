//! ISR-safe driver wrapper using critical sections.

use super::primitives::CriticalSectionCell;
use crate::driver::config::Enc28j60Config;
use crate::driver::enc28j60::Enc28j60;
use crate::hal::SpiTransport;

/// ISR-safe driver wrapper using critical sections.
///
/// All access goes through `critical_section::with()`, disabling interrupts
/// for the duration of the closure, so an interrupt handler and thread-mode
/// code never interleave SPI transactions or bank switches.
///
/// # Example
///
/// ```ignore
/// static NIC: SharedEnc28j60<MyTransport> =
///     SharedEnc28j60::new(MyTransport::new(), Enc28j60Config::new());
///
/// NIC.with(|nic| nic.init(&mut delay))?;
///
/// #[interrupt]
/// fn EXTI0() {
///     NIC.with(|nic| {
///         if let Ok(status) = nic.interrupt_status() {
///             nic.clear_interrupt_flags(status).ok();
///         }
///     });
/// }
/// ```
pub struct SharedEnc28j60<T> {
    inner: CriticalSectionCell<Enc28j60<T>>,
}

impl<T: SpiTransport> SharedEnc28j60<T> {
    /// Create a shared driver (const, suitable for static initialization).
    pub const fn new(transport: T, config: Enc28j60Config) -> Self {
        Self::from_driver(Enc28j60::new(transport, config))
    }

    /// Wrap an existing driver, for example one already initialized.
    pub const fn from_driver(nic: Enc28j60<T>) -> Self {
        Self {
            inner: CriticalSectionCell::new(nic),
        }
    }

    /// Execute a closure with exclusive access to the driver.
    ///
    /// Interrupts are disabled for the duration of the closure.
    #[inline]
    pub fn with<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut Enc28j60<T>) -> R,
    {
        self.inner.with(f)
    }

    /// Try to execute a closure, returning `None` if already borrowed.
    #[inline]
    pub fn try_with<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut Enc28j60<T>) -> R,
    {
        self.inner.try_with(f)
    }
}
