//! Bank context
//!
//! ECON1.BSEL selects which of the four banks the low 27 addresses refer to.
//! [`CommandBus::with_bank`] selects a bank for the length of a closure and
//! puts the previous selection back afterwards, on the error path too, so a
//! public operation never leaves the chip in a different bank than it found.

use super::command::CommandBus;
use super::transport::SpiTransport;
use crate::driver::error::{IoError, IoResult};
use crate::internal::register::{Bank, ECON1, Register, Register16, econ1};

impl<T: SpiTransport> CommandBus<T> {
    /// Bank currently selected in ECON1
    pub fn current_bank(&mut self) -> IoResult<Bank> {
        Ok(Bank::from_bits(self.read_register(ECON1)?))
    }

    /// Select `bank` by clearing then setting ECON1.BSEL
    pub fn select_bank(&mut self, bank: Bank) -> IoResult<()> {
        self.clear_bits(ECON1, econ1::BSEL_MASK)?;
        if bank.bits() != 0 {
            self.set_bits(ECON1, bank.bits())?;
        }
        Ok(())
    }

    /// Run `f` with `bank` selected, then restore the previous bank
    ///
    /// The restore runs whether or not `f` succeeds. When both fail, the
    /// error from `f` is returned.
    pub fn with_bank<R, E, F>(&mut self, bank: Bank, f: F) -> Result<R, E>
    where
        F: FnOnce(&mut Self) -> Result<R, E>,
        E: From<IoError>,
    {
        let saved = self.current_bank()?;

        let result = match self.select_bank(bank) {
            Ok(()) => f(self),
            Err(e) => Err(e.into()),
        };

        let restored = self.select_bank(saved);
        match (result, restored) {
            (Err(e), _) => Err(e),
            (Ok(_), Err(e)) => Err(e.into()),
            (Ok(value), Ok(())) => Ok(value),
        }
    }

    // =========================================================================
    // Bank-aware access
    // =========================================================================

    /// Read any register, switching banks when it is not common
    pub fn read(&mut self, reg: Register) -> IoResult<u8> {
        match reg.bank() {
            None => self.read_register(reg),
            Some(bank) => self.with_bank(bank, |bus| bus.read_register(reg)),
        }
    }

    /// Write any register, switching banks when it is not common
    pub fn write(&mut self, reg: Register, value: u8) -> IoResult<()> {
        match reg.bank() {
            None => self.write_register(reg, value),
            Some(bank) => self.with_bank(bank, |bus| bus.write_register(reg, value)),
        }
    }

    /// Read a register pair, switching banks when needed
    pub fn read16(&mut self, reg: Register16) -> IoResult<u16> {
        match reg.bank() {
            None => self.read_register16(reg),
            Some(bank) => self.with_bank(bank, |bus| bus.read_register16(reg)),
        }
    }

    /// Write a register pair, switching banks when needed
    pub fn write16(&mut self, reg: Register16, value: u16) -> IoResult<()> {
        match reg.bank() {
            None => self.write_register16(reg, value),
            Some(bank) => self.with_bank(bank, |bus| bus.write_register16(reg, value)),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::config::PollLimits;
    use crate::driver::error::{Error, FrameError};
    use crate::internal::register::{EIE, EPKTCNT, ERXST, MACON1, MAADR1};
    use crate::testing::MockChip;

    fn bus() -> CommandBus<MockChip> {
        CommandBus::new(MockChip::new(), PollLimits::new())
    }

    #[test]
    fn with_bank_restores_previous_bank() {
        for start in [Bank::Bank0, Bank::Bank1, Bank::Bank2, Bank::Bank3] {
            for target in [Bank::Bank0, Bank::Bank1, Bank::Bank2, Bank::Bank3] {
                let mut bus = bus();
                bus.transport_mut().set_bank(start);

                let seen = bus
                    .with_bank(target, |b| b.current_bank())
                    .unwrap();

                assert_eq!(seen, target);
                assert_eq!(bus.transport().bank(), start);
            }
        }
    }

    #[test]
    fn with_bank_restores_on_error() {
        let mut bus = bus();
        bus.transport_mut().set_bank(Bank::Bank3);

        let result: Result<(), Error> =
            bus.with_bank(Bank::Bank0, |_| Err(FrameError::TooLarge { length: 1600 }.into()));

        assert_eq!(result, Err(Error::Frame(FrameError::TooLarge { length: 1600 })));
        assert_eq!(bus.transport().bank(), Bank::Bank3);
    }

    #[test]
    fn nested_scopes_unwind_in_order() {
        let mut bus = bus();
        bus.transport_mut().set_bank(Bank::Bank1);

        bus.with_bank(Bank::Bank2, |b| {
            b.with_bank(Bank::Bank3, |inner| {
                assert_eq!(inner.transport().bank(), Bank::Bank3);
                Ok::<(), IoError>(())
            })?;
            assert_eq!(b.transport().bank(), Bank::Bank2);
            Ok::<(), IoError>(())
        })
        .unwrap();

        assert_eq!(bus.transport().bank(), Bank::Bank1);
    }

    #[test]
    fn common_register_access_skips_bank_switch() {
        let mut bus = bus();
        bus.transport_mut().set_bank(Bank::Bank2);
        bus.transport_mut().clear_trace();

        bus.write(EIE, 0xC0).unwrap();
        assert_eq!(bus.read(EIE).unwrap(), 0xC0);

        assert_eq!(bus.transport().trace().len(), 2);
    }

    #[test]
    fn banked_access_reaches_the_right_bank() {
        let mut bus = bus();
        bus.transport_mut().poke(EPKTCNT, 3);
        bus.transport_mut().poke(MACON1, 0x0D);

        assert_eq!(bus.read(EPKTCNT).unwrap(), 3);
        assert_eq!(bus.read(MACON1).unwrap(), 0x0D);

        bus.write(MAADR1, 0xA0).unwrap();
        assert_eq!(bus.transport().peek(MAADR1), 0xA0);

        bus.write16(ERXST, 0x0102).unwrap();
        assert_eq!(bus.read16(ERXST).unwrap(), 0x0102);
        assert_eq!(bus.transport().bank(), Bank::Bank0);
    }
}
