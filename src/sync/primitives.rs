//! Interrupt-safe cell backing the shared driver.
//!
//! An SPI transaction on the ENC28J60 spans several exchanges and may sit
//! inside a bank switch, so the INT pin handler must never run in the middle
//! of one issued from thread mode. Every access here holds a critical
//! section for the whole closure.

use core::cell::RefCell;
use critical_section::Mutex;

/// Value that thread mode and interrupt handlers both reach through closures
///
/// Built on `critical_section::Mutex<RefCell<T>>`; the cell is `Sync` when
/// `T: Send`.
pub struct CriticalSectionCell<T> {
    inner: Mutex<RefCell<T>>,
}

impl<T> CriticalSectionCell<T> {
    /// Wrap `value`; usable in a `static` initializer
    pub const fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(value)),
        }
    }

    /// Run `f` on the contents inside a critical section
    ///
    /// # Panics
    ///
    /// Re-entering the same cell from inside `f` panics. An interrupt handler
    /// that can fire while thread mode holds the cell should use
    /// [`try_with`](Self::try_with).
    #[inline]
    pub fn with<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        critical_section::with(|cs| f(&mut self.inner.borrow_ref_mut(cs)))
    }

    /// Like [`with`](Self::with), but yields `None` instead of panicking when
    /// the contents are already in use
    #[inline]
    pub fn try_with<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut T) -> R,
    {
        critical_section::with(|cs| {
            let mut guard = self.inner.borrow(cs).try_borrow_mut().ok()?;
            Some(f(&mut guard))
        })
    }

    /// Swap in `value` and hand back what was stored
    pub fn replace(&self, value: T) -> T {
        critical_section::with(|cs| self.inner.replace(cs, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_mutates_contents() {
        let cell: CriticalSectionCell<u32> = CriticalSectionCell::new(0);
        cell.with(|v| *v += 10);
        assert_eq!(cell.with(|v| *v), 10);
    }

    #[test]
    fn try_with_when_free() {
        let cell: CriticalSectionCell<u32> = CriticalSectionCell::new(42);
        assert_eq!(cell.try_with(|v| *v), Some(42));
    }

    #[test]
    fn try_with_while_held_is_none() {
        let cell: CriticalSectionCell<u32> = CriticalSectionCell::new(1);
        let inner = cell.with(|_| cell.try_with(|v| *v));
        assert_eq!(inner, None);
    }

    #[test]
    fn replace_returns_previous() {
        let cell: CriticalSectionCell<u32> = CriticalSectionCell::new(1);
        assert_eq!(cell.replace(2), 1);
        assert_eq!(cell.with(|v| *v), 2);
    }

    #[test]
    fn usable_as_static() {
        static CELL: CriticalSectionCell<u32> = CriticalSectionCell::new(0);
        CELL.with(|v| *v = 100);
        assert_eq!(CELL.with(|v| *v), 100);
    }
}
