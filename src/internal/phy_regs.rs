//! Internal PHY Register Definitions
//!
//! The ENC28J60 PHY is not on the SPI register map. It is reached indirectly
//! through the MII management registers (MIREGADR, MICMD, MIWR, MIRD) and only
//! implements the subset of registers below, all 16 bits wide.
//!
//! | Address | Name | Description |
//! |---------|------|-------------|
//! | 0x00 | PHCON1 | PHY control 1 |
//! | 0x01 | PHSTAT1 | Physical layer status 1 |
//! | 0x02 | PHID1 | PHY identifier 1 |
//! | 0x03 | PHID2 | PHY identifier 2 |
//! | 0x10 | PHCON2 | PHY control 2 |
//! | 0x11 | PHSTAT2 | Physical layer status 2 |
//! | 0x12 | PHIE | PHY interrupt enable |
//! | 0x13 | PHIR | PHY interrupt request |
//! | 0x14 | PHLCON | LED configuration |

// =============================================================================
// PHY Register Addresses
// =============================================================================

/// PHY register addresses
pub mod phy_reg {
    /// PHY control 1
    pub const PHCON1: u8 = 0x00;
    /// Physical layer status 1
    pub const PHSTAT1: u8 = 0x01;
    /// PHY identifier 1
    pub const PHID1: u8 = 0x02;
    /// PHY identifier 2
    pub const PHID2: u8 = 0x03;
    /// PHY control 2
    pub const PHCON2: u8 = 0x10;
    /// Physical layer status 2
    pub const PHSTAT2: u8 = 0x11;
    /// PHY interrupt enable
    pub const PHIE: u8 = 0x12;
    /// PHY interrupt request (read clears)
    pub const PHIR: u8 = 0x13;
    /// LED configuration
    pub const PHLCON: u8 = 0x14;

    /// Whether `addr` names a register the PHY implements
    pub const fn is_valid(addr: u8) -> bool {
        matches!(
            addr,
            PHCON1 | PHSTAT1 | PHID1 | PHID2 | PHCON2 | PHSTAT2 | PHIE | PHIR | PHLCON
        )
    }
}

/// PHCON1 bits
pub mod phcon1 {
    /// PHY software reset
    pub const PRST: u16 = 1 << 15;
    /// PHY loopback
    pub const PLOOPBK: u16 = 1 << 14;
    /// PHY power down
    pub const PPWRSV: u16 = 1 << 11;
    /// PHY full duplex (must match MACON3.FULDPX)
    pub const PDPXMD: u16 = 1 << 8;
}

/// PHSTAT1 bits
pub mod phstat1 {
    /// Full duplex capable
    pub const PFDPX: u16 = 1 << 12;
    /// Half duplex capable
    pub const PHDPX: u16 = 1 << 11;
    /// Latched link status (stays low after a link failure until read)
    pub const LLSTAT: u16 = 1 << 2;
    /// Latched jabber status
    pub const JBSTAT: u16 = 1 << 1;
}

/// PHCON2 bits
pub mod phcon2 {
    /// Force link up
    pub const FRCLNK: u16 = 1 << 14;
    /// Twisted pair transmitter disable
    pub const TXDIS: u16 = 1 << 13;
    /// Jabber correction disable
    pub const JABBER: u16 = 1 << 10;
    /// Half duplex loopback disable
    pub const HDLDIS: u16 = 1 << 8;
}

/// PHSTAT2 bits
pub mod phstat2 {
    /// Transmitting
    pub const TXSTAT: u16 = 1 << 13;
    /// Receiving
    pub const RXSTAT: u16 = 1 << 12;
    /// Collision
    pub const COLSTAT: u16 = 1 << 11;
    /// Link is up (not latched)
    pub const LSTAT: u16 = 1 << 10;
    /// Full duplex configured
    pub const DPXSTAT: u16 = 1 << 9;
    /// Polarity reversed
    pub const PLRITY: u16 = 1 << 5;
}

/// PHIE bits
pub mod phie {
    /// Link change interrupt enable
    pub const PLNKIE: u16 = 1 << 4;
    /// Global PHY interrupt enable
    pub const PGEIE: u16 = 1 << 1;
}

/// PHIR bits
pub mod phir {
    /// Link change interrupt flag
    pub const PLNKIF: u16 = 1 << 4;
    /// Global PHY interrupt flag
    pub const PGIF: u16 = 1 << 2;
}

/// PHLCON field layout
pub mod phlcon {
    /// Reserved bits that must be written as 1 (bits 13:12)
    pub const RESERVED: u16 = 0x3000;
    /// LED A configuration shift (bits 11:8)
    pub const LACFG_SHIFT: u16 = 8;
    /// LED B configuration shift (bits 7:4)
    pub const LBCFG_SHIFT: u16 = 4;
    /// LED configuration field mask (before shifting)
    pub const LCFG_MASK: u16 = 0x0F;
    /// Stretch duration shift (bits 3:2)
    pub const LFRQ_SHIFT: u16 = 2;
    /// Pulse stretching enable
    pub const STRCH: u16 = 1 << 1;
}

/// Expected PHY identifier (PHID1, PHID2 with the revision nibble masked)
pub mod phy_id {
    /// PHID1 value for the ENC28J60 PHY
    pub const PHID1: u16 = 0x0083;
    /// PHID2 value with the revision bits cleared
    pub const PHID2: u16 = 0x1400;
    /// Mask removing the revision bits from PHID2
    pub const PHID2_MASK: u16 = 0xFFF0;
}
