//! Register read-back
//!
//! After bring-up every value the driver wrote is read back and compared.
//! The result is a [`VerifyReport`] naming the first register that did not
//! hold its value, which is usually enough to spot a wiring or clocking
//! problem on the SPI bus.

use super::config::Duplex;
use super::enc28j60::Enc28j60;
use super::error::{ConfigError, ConfigResult, IoError, Result};
use crate::hal::{PhyBus, SpiTransport};
use crate::internal::phy_regs::{phcon2, phy_reg};
use crate::internal::register::{
    Bank, EIE, ERDPT, ERXFCON, ERXND, ERXRDPT, ERXST, ETXND, ETXST, EWRPT, MAADR, MABBIPG,
    MACON1, MACON3, MACON4, MAIPGH, MAIPGL, MAMXFL,
};

// =============================================================================
// Report
// =============================================================================

/// A register that did not read back as written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Mismatch {
    /// Register name as in the datasheet
    pub register: &'static str,
    /// Value written
    pub expected: u16,
    /// Value read back
    pub actual: u16,
}

/// Outcome of a read-back pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[must_use]
pub struct VerifyReport {
    checks: u8,
    mismatches: u8,
    first: Option<Mismatch>,
}

impl VerifyReport {
    /// Every register read back as written
    pub fn passed(&self) -> bool {
        self.mismatches == 0
    }

    /// Number of registers compared
    pub fn checks(&self) -> u8 {
        self.checks
    }

    /// Number of registers that differed
    pub fn mismatches(&self) -> u8 {
        self.mismatches
    }

    /// First register that differed
    pub fn first_mismatch(&self) -> Option<&Mismatch> {
        self.first.as_ref()
    }

    /// [`ConfigError::VerificationFailed`] unless every check passed
    pub fn ensure(&self) -> ConfigResult<()> {
        if self.passed() {
            Ok(())
        } else {
            Err(ConfigError::VerificationFailed)
        }
    }

    fn check(&mut self, register: &'static str, expected: u16, actual: u16) {
        self.checks = self.checks.saturating_add(1);
        if expected == actual {
            return;
        }

        #[cfg(feature = "defmt")]
        defmt::warn!(
            "{} read back {=u16:#x}, expected {=u16:#x}",
            register,
            actual,
            expected
        );

        self.mismatches = self.mismatches.saturating_add(1);
        if self.first.is_none() {
            self.first = Some(Mismatch {
                register,
                expected,
                actual,
            });
        }
    }
}

// =============================================================================
// Read-back
// =============================================================================

impl<T: SpiTransport> Enc28j60<T> {
    /// Compare the chip's configuration registers against the active
    /// configuration
    ///
    /// Covers the ring extents, receive filter, MAC control and gap
    /// registers, station address, PHY duplex and interrupt enables. Pointers
    /// that move with traffic are only checked by [`init`](Self::init).
    pub fn verify(&mut self) -> Result<VerifyReport> {
        self.verify_all(false)
    }

    pub(super) fn verify_all(&mut self, pointers: bool) -> Result<VerifyReport> {
        let config = self.config;
        let layout = config.buffer;
        let mut report = VerifyReport::default();

        self.bus.with_bank(Bank::Bank0, |bus| {
            report.check(ERXST.name(), layout.rx_start, bus.read_register16(ERXST)?);
            report.check(ERXND.name(), layout.rx_end, bus.read_register16(ERXND)?);
            report.check(ETXST.name(), layout.tx_start, bus.read_register16(ETXST)?);
            if pointers {
                report.check(
                    ERXRDPT.name(),
                    layout.rx_read_pointer_for(layout.rx_start),
                    bus.read_register16(ERXRDPT)?,
                );
                report.check(ERDPT.name(), layout.rx_start, bus.read_register16(ERDPT)?);
                report.check(ETXND.name(), layout.tx_end, bus.read_register16(ETXND)?);
                report.check(EWRPT.name(), layout.tx_start, bus.read_register16(EWRPT)?);
            }
            Ok::<(), IoError>(())
        })?;

        let erxfcon = self.bus.read(ERXFCON)?;
        report.check(
            ERXFCON.name(),
            config.receive_filter.to_erxfcon().into(),
            erxfcon.into(),
        );

        self.bus.with_bank(Bank::Bank2, |bus| {
            report.check(MACON1.name(), config.macon1().into(), bus.read_register(MACON1)?.into());
            report.check(MACON3.name(), config.macon3().into(), bus.read_register(MACON3)?.into());
            report.check(MACON4.name(), config.macon4().into(), bus.read_register(MACON4)?.into());
            report.check(MAMXFL.name(), config.max_frame_len, bus.read_register16(MAMXFL)?);
            report.check(
                MABBIPG.name(),
                config.mabbipg().into(),
                bus.read_register(MABBIPG)?.into(),
            );
            report.check(MAIPGL.name(), config.maipgl().into(), bus.read_register(MAIPGL)?.into());
            if let Some(high) = config.maipgh() {
                report.check(MAIPGH.name(), high.into(), bus.read_register(MAIPGH)?.into());
            }
            Ok::<(), IoError>(())
        })?;

        self.bus.with_bank(Bank::Bank3, |bus| {
            for (&byte, reg) in config.mac_address.iter().zip(MAADR) {
                report.check(reg.name(), byte.into(), bus.read_register(reg)?.into());
            }
            Ok::<(), IoError>(())
        })?;

        report.check("PHCON1", config.phcon1(), self.bus.read_phy(phy_reg::PHCON1)?);
        if matches!(config.duplex, Duplex::Half) {
            let value = self.bus.read_phy(phy_reg::PHCON2)?;
            report.check("PHCON2", phcon2::HDLDIS, value);
        }

        let eie = self.bus.read_register(EIE)?;
        report.check(EIE.name(), config.interrupts.to_eie().into(), eie.into());

        Ok(report)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
