//! MII management access to the internal PHY
//!
//! PHY registers sit behind the MAC's MII management interface:
//!
//! - read: MIREGADR = addr, MICMD.MIIRD = 1, wait for MISTAT.BUSY to clear,
//!   MICMD.MIIRD = 0, then MIRDL/MIRDH hold the value
//! - write: MIREGADR = addr, MIWRL, then MIWRH (which starts the write), then
//!   wait for MISTAT.BUSY to clear
//!
//! MIREGADR, MICMD and MIWR/MIRD are in bank 2 but MISTAT is in bank 3, so the
//! busy poll runs in a nested bank 3 scope.

use super::command::CommandBus;
use super::transport::SpiTransport;
use crate::driver::error::{IoError, IoResult};
use crate::internal::phy_regs::phy_reg;
use crate::internal::register::{Bank, MICMD, MIRD, MIREGADR, MISTAT, MIWR, micmd, mistat};

// =============================================================================
// PHY Bus Trait
// =============================================================================

/// Access to 16-bit PHY registers
///
/// Implemented by the command bus and the device handle, so the PHY helpers in
/// [`crate::phy`] work with either.
pub trait PhyBus {
    /// Read a PHY register
    fn read_phy(&mut self, reg: u8) -> IoResult<u16>;

    /// Write a PHY register
    fn write_phy(&mut self, reg: u8, value: u16) -> IoResult<()>;

    /// Read-modify-write: set `mask` bits
    fn set_phy_bits(&mut self, reg: u8, mask: u16) -> IoResult<()> {
        let value = self.read_phy(reg)?;
        self.write_phy(reg, value | mask)
    }

    /// Read-modify-write: clear `mask` bits
    fn clear_phy_bits(&mut self, reg: u8, mask: u16) -> IoResult<()> {
        let value = self.read_phy(reg)?;
        self.write_phy(reg, value & !mask)
    }
}

// =============================================================================
// MII Controller
// =============================================================================

impl<T: SpiTransport> CommandBus<T> {
    /// Wait for MISTAT.BUSY to clear; expects bank 2 to be selected
    fn wait_mii_idle(&mut self) -> IoResult<()> {
        let limit = self.limits.phy;
        self.with_bank(Bank::Bank3, |bus| {
            for _ in 0..limit {
                if bus.read_register(MISTAT)? & mistat::BUSY == 0 {
                    return Ok(());
                }
            }

            #[cfg(feature = "defmt")]
            defmt::warn!("MII management interface stayed busy");

            Err(IoError::Timeout)
        })
    }
}

impl<T: SpiTransport> PhyBus for CommandBus<T> {
    fn read_phy(&mut self, reg: u8) -> IoResult<u16> {
        if !phy_reg::is_valid(reg) {
            return Err(IoError::InvalidPhyRegister);
        }

        self.with_bank(Bank::Bank2, |bus| {
            bus.write_register(MIREGADR, reg)?;
            bus.write_register(MICMD, micmd::MIIRD)?;

            let waited = bus.wait_mii_idle();
            // MIIRD must be cleared even when the poll timed out
            let cleared = bus.write_register(MICMD, 0);
            waited?;
            cleared?;

            bus.read_register16(MIRD)
        })
    }

    fn write_phy(&mut self, reg: u8, value: u16) -> IoResult<()> {
        if !phy_reg::is_valid(reg) {
            return Err(IoError::InvalidPhyRegister);
        }

        self.with_bank(Bank::Bank2, |bus| {
            bus.write_register(MIREGADR, reg)?;
            bus.write_register16(MIWR, value)?;
            bus.wait_mii_idle()
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
