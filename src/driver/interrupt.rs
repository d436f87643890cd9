//! Interrupt configuration and status for the ENC28J60.
//!
//! [`InterruptConfig`] selects the sources programmed into EIE during bring-up;
//! [`InterruptStatus`] parses the flags latched in EIR.

use crate::internal::register::{eie, eir};

// =============================================================================
// Interrupt Configuration
// =============================================================================

/// Interrupt sources to enable in EIE
///
/// INTIE (the global enable that drives the INT pin) is set whenever any
/// source is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterruptConfig {
    /// Receive packet pending (PKTIE)
    pub packet: bool,
    /// Link state change (LINKIE, also enables the PHY interrupt)
    pub link: bool,
    /// Transmit done (TXIE)
    pub transmit: bool,
    /// Transmit error (TXERIE)
    pub transmit_error: bool,
    /// Receive error (RXERIE)
    pub receive_error: bool,
}

impl Default for InterruptConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl InterruptConfig {
    /// Packet pending only
    #[must_use]
    pub const fn new() -> Self {
        Self {
            packet: true,
            link: false,
            transmit: false,
            transmit_error: false,
            receive_error: false,
        }
    }

    /// No interrupt sources
    #[must_use]
    pub const fn none() -> Self {
        Self {
            packet: false,
            link: false,
            transmit: false,
            transmit_error: false,
            receive_error: false,
        }
    }

    /// Enable or disable the link change interrupt
    #[must_use]
    pub const fn with_link(mut self, enabled: bool) -> Self {
        self.link = enabled;
        self
    }

    /// Enable or disable the transmit interrupts
    #[must_use]
    pub const fn with_transmit(mut self, enabled: bool) -> Self {
        self.transmit = enabled;
        self.transmit_error = enabled;
        self
    }

    /// Enable or disable the receive error interrupt
    #[must_use]
    pub const fn with_receive_error(mut self, enabled: bool) -> Self {
        self.receive_error = enabled;
        self
    }

    /// EIE value
    #[must_use]
    pub const fn to_eie(&self) -> u8 {
        let mut value = 0;
        if self.packet {
            value |= eie::PKTIE;
        }
        if self.link {
            value |= eie::LINKIE;
        }
        if self.transmit {
            value |= eie::TXIE;
        }
        if self.transmit_error {
            value |= eie::TXERIE;
        }
        if self.receive_error {
            value |= eie::RXERIE;
        }
        if value != 0 {
            value |= eie::INTIE;
        }
        value
    }
}

// =============================================================================
// Interrupt Status
// =============================================================================

/// Interrupt flags parsed from EIR.
///
/// # Example
///
/// ```ignore
/// let status = nic.interrupt_status()?;
/// if status.link_changed {
///     let up = nic.link_up()?;
/// }
/// nic.clear_interrupt_flags(status)?;
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterruptStatus {
    /// At least one frame waits in the receive ring (PKTIF, read-only)
    pub packet_pending: bool,
    /// DMA copy or checksum finished (DMAIF)
    pub dma_done: bool,
    /// PHY reported a link change (LINKIF, read-only, cleared through PHIR)
    pub link_changed: bool,
    /// Transmission finished (TXIF)
    pub tx_complete: bool,
    /// Transmission aborted (TXERIF)
    pub tx_error: bool,
    /// Receive buffer overflow or packet counter saturation (RXERIF)
    pub rx_error: bool,
}

impl InterruptStatus {
    /// Create from raw EIR value
    #[inline]
    pub fn from_raw(status: u8) -> Self {
        Self {
            packet_pending: (status & eir::PKTIF) != 0,
            dma_done: (status & eir::DMAIF) != 0,
            link_changed: (status & eir::LINKIF) != 0,
            tx_complete: (status & eir::TXIF) != 0,
            tx_error: (status & eir::TXERIF) != 0,
            rx_error: (status & eir::RXERIF) != 0,
        }
    }

    /// Convert back to raw EIR bits
    #[inline]
    pub fn to_raw(&self) -> u8 {
        let mut val = 0u8;
        if self.packet_pending {
            val |= eir::PKTIF;
        }
        if self.dma_done {
            val |= eir::DMAIF;
        }
        if self.link_changed {
            val |= eir::LINKIF;
        }
        if self.tx_complete {
            val |= eir::TXIF;
        }
        if self.tx_error {
            val |= eir::TXERIF;
        }
        if self.rx_error {
            val |= eir::RXERIF;
        }
        val
    }

    /// Bits software can clear with BFC; PKTIF and LINKIF are not among them
    #[inline]
    pub fn clearable(&self) -> u8 {
        self.to_raw() & !(eir::PKTIF | eir::LINKIF)
    }

    /// Check if any interrupt occurred
    #[inline]
    pub fn any(&self) -> bool {
        self.to_raw() != 0
    }

    /// Check if any error occurred
    #[inline]
    pub fn has_error(&self) -> bool {
        self.tx_error || self.rx_error
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
