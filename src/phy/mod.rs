//! Internal PHY
//!
//! The ENC28J60 integrates a fixed 10BASE-T PHY with no auto-negotiation.
//! Its registers are reached through the MII management interface, so the
//! helpers here work with anything implementing [`PhyBus`]: the
//! [`Enc28j60`](crate::Enc28j60) handle or a bare
//! [`CommandBus`](crate::hal::CommandBus).
//!
//! Duplex is fixed at bring-up from the driver configuration (PHCON1.PDPXMD
//! must match MACON3.FULDPX), so nothing here changes it.
//!
//! # Example
//!
//! ```ignore
//! use ph_enc28j60::phy::{InternalPhy, LedConfig, LedMode};
//!
//! InternalPhy::verify_id(&mut nic)?;
//! InternalPhy::set_led_config(
//!     &mut nic,
//!     LedConfig::new(LedMode::LinkStatus, LedMode::TransmitReceive),
//! )?;
//!
//! if InternalPhy::is_link_up(&mut nic)? {
//!     // ...
//! }
//! ```

use crate::driver::error::{IoError, IoResult};
use crate::hal::PhyBus;
use crate::internal::phy_regs::{
    phcon1, phie, phir, phlcon, phstat1, phstat2, phy_id, phy_reg,
};

// =============================================================================
// LED Configuration
// =============================================================================

/// Function of one of the two LED outputs (PHLCON.LACFG / LBCFG)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum LedMode {
    /// Transmit activity (stretchable)
    TransmitActivity = 0x1,
    /// Receive activity (stretchable)
    ReceiveActivity = 0x2,
    /// Collision activity (stretchable)
    Collision = 0x3,
    /// Link status
    LinkStatus = 0x4,
    /// Duplex status
    Duplex = 0x5,
    /// Transmit and receive activity (stretchable)
    TransmitReceive = 0x7,
    /// Always on
    On = 0x8,
    /// Always off
    Off = 0x9,
    /// Blink fast
    BlinkFast = 0xA,
    /// Blink slow
    BlinkSlow = 0xB,
    /// Link status and receive activity (always stretched)
    LinkReceive = 0xC,
    /// Link status and transmit/receive activity (always stretched)
    LinkTransmitReceive = 0xD,
    /// Duplex status and collision activity (always stretched)
    DuplexCollision = 0xE,
}

/// LED pulse stretch duration (PHLCON.LFRQ)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedStretch {
    /// About 40 ms
    #[default]
    Normal,
    /// About 70 ms
    Medium,
    /// About 140 ms
    Long,
}

impl LedStretch {
    const fn bits(self) -> u16 {
        match self {
            LedStretch::Normal => 0,
            LedStretch::Medium => 1,
            LedStretch::Long => 2,
        }
    }
}

/// PHLCON contents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedConfig {
    /// LEDA function
    pub led_a: LedMode,
    /// LEDB function
    pub led_b: LedMode,
    /// Stretch duration for activity events
    pub stretch: LedStretch,
    /// Stretch activity events at all
    pub stretch_enabled: bool,
}

impl LedConfig {
    /// Both LEDs with stretched pulses of the normal length
    #[must_use]
    pub const fn new(led_a: LedMode, led_b: LedMode) -> Self {
        Self {
            led_a,
            led_b,
            stretch: LedStretch::Normal,
            stretch_enabled: true,
        }
    }

    /// Set the stretch duration
    #[must_use]
    pub const fn with_stretch(mut self, stretch: LedStretch) -> Self {
        self.stretch = stretch;
        self
    }

    /// Enable or disable pulse stretching
    #[must_use]
    pub const fn with_stretch_enabled(mut self, enabled: bool) -> Self {
        self.stretch_enabled = enabled;
        self
    }

    /// PHLCON register value
    #[must_use]
    pub const fn to_phlcon(&self) -> u16 {
        let mut value = phlcon::RESERVED
            | ((self.led_a as u16 & phlcon::LCFG_MASK) << phlcon::LACFG_SHIFT)
            | ((self.led_b as u16 & phlcon::LCFG_MASK) << phlcon::LBCFG_SHIFT)
            | (self.stretch.bits() << phlcon::LFRQ_SHIFT);
        if self.stretch_enabled {
            value |= phlcon::STRCH;
        }
        value
    }
}

// =============================================================================
// PHY Helpers
// =============================================================================

/// Operations on the integrated PHY
///
/// Stateless; every call goes to the PHY registers.
#[derive(Debug, Clone, Copy, Default)]
pub struct InternalPhy;

impl InternalPhy {
    /// PHID1 in the upper half, PHID2 in the lower half
    pub fn phy_id<B: PhyBus>(bus: &mut B) -> IoResult<u32> {
        let id1 = bus.read_phy(phy_reg::PHID1)?;
        let id2 = bus.read_phy(phy_reg::PHID2)?;
        Ok((u32::from(id1) << 16) | u32::from(id2))
    }

    /// Check the PHY identifier, ignoring the revision bits
    ///
    /// A mismatch usually means the SPI bus is not talking to an ENC28J60.
    pub fn verify_id<B: PhyBus>(bus: &mut B) -> IoResult<()> {
        let id = Self::phy_id(bus)?;
        let id1 = (id >> 16) as u16;
        let id2 = id as u16 & phy_id::PHID2_MASK;
        if id1 != phy_id::PHID1 || id2 != phy_id::PHID2 {
            #[cfg(feature = "defmt")]
            defmt::warn!("unexpected PHY id {=u32:#x}", id);

            return Err(IoError::UnexpectedPhyId);
        }
        Ok(())
    }

    /// Current link state (PHSTAT2.LSTAT)
    pub fn is_link_up<B: PhyBus>(bus: &mut B) -> IoResult<bool> {
        Ok(bus.read_phy(phy_reg::PHSTAT2)? & phstat2::LSTAT != 0)
    }

    /// Latched link state (PHSTAT1.LLSTAT)
    ///
    /// Reads false if the link has dropped at any point since the last read.
    pub fn link_held<B: PhyBus>(bus: &mut B) -> IoResult<bool> {
        Ok(bus.read_phy(phy_reg::PHSTAT1)? & phstat1::LLSTAT != 0)
    }

    /// Whether the PHY is configured for full duplex (PHSTAT2.DPXSTAT)
    pub fn is_full_duplex<B: PhyBus>(bus: &mut B) -> IoResult<bool> {
        Ok(bus.read_phy(phy_reg::PHSTAT2)? & phstat2::DPXSTAT != 0)
    }

    /// Program the LED outputs
    pub fn set_led_config<B: PhyBus>(bus: &mut B, config: LedConfig) -> IoResult<()> {
        bus.write_phy(phy_reg::PHLCON, config.to_phlcon())
    }

    /// Route link changes to EIR.LINKIF
    ///
    /// EIE.LINKIE must also be set for the INT pin to follow.
    pub fn enable_link_interrupt<B: PhyBus>(bus: &mut B) -> IoResult<()> {
        bus.set_phy_bits(phy_reg::PHIE, phie::PGEIE | phie::PLNKIE)
    }

    /// Stop reporting link changes
    pub fn disable_link_interrupt<B: PhyBus>(bus: &mut B) -> IoResult<()> {
        bus.clear_phy_bits(phy_reg::PHIE, phie::PGEIE | phie::PLNKIE)
    }

    /// Acknowledge a link change; returns whether one was pending
    ///
    /// Reading PHIR clears it, which also clears EIR.LINKIF.
    pub fn clear_link_interrupt<B: PhyBus>(bus: &mut B) -> IoResult<bool> {
        Ok(bus.read_phy(phy_reg::PHIR)? & phir::PLNKIF != 0)
    }

    /// Reset the PHY and wait for PHCON1.PRST to clear
    ///
    /// PHCON1 returns to its reset value, so the duplex setting must be
    /// programmed again (re-run [`Enc28j60::init`](crate::Enc28j60::init)).
    pub fn soft_reset<B: PhyBus>(bus: &mut B, max_attempts: u32) -> IoResult<()> {
        bus.write_phy(phy_reg::PHCON1, phcon1::PRST)?;

        for _ in 0..max_attempts {
            if bus.read_phy(phy_reg::PHCON1)? & phcon1::PRST == 0 {
                return Ok(());
            }
        }

        Err(IoError::Timeout)
    }

    /// Enter or leave PHY power-down
    pub fn set_power_down<B: PhyBus>(bus: &mut B, power_down: bool) -> IoResult<()> {
        if power_down {
            bus.set_phy_bits(phy_reg::PHCON1, phcon1::PPWRSV)
        } else {
            bus.clear_phy_bits(phy_reg::PHCON1, phcon1::PPWRSV)
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
