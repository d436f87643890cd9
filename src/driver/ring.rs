//! Packet buffer layout and ring pointers
//!
//! The 8 KiB buffer memory is split into a receive ring and a transmit area:
//!
//! ```text
//! 0x0000          rx_end  tx_start              tx_end      0x1FFF
//!   |<---- receive ring ---->|  |<- control + frame ->|<- TSV ->|
//! ```
//!
//! The chip writes received frames into the ring at ERXWRPT and never past
//! ERXRDPT. Software reads at ERDPT and hands space back by moving ERXRDPT.

use super::error::{ConfigError, ConfigResult, IoResult};
use crate::hal::{CommandBus, SpiTransport};
use crate::internal::constants::{
    BUFFER_MEMORY_END, DEFAULT_RX_END, DEFAULT_RX_START, DEFAULT_TX_END, DEFAULT_TX_START,
    MAX_FRAME_LEN, TSV_LEN, TX_CONTROL_LEN,
};
use crate::internal::register::{ERDPT, ERXND, ERXRDPT, ERXST, ETXND, ETXST, EWRPT};

// =============================================================================
// Buffer Layout
// =============================================================================

/// Receive and transmit extents in buffer memory (inclusive bounds)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BufferLayout {
    /// First byte of the receive ring (ERXST)
    pub rx_start: u16,
    /// Last byte of the receive ring (ERXND)
    pub rx_end: u16,
    /// First byte of the transmit area (ETXST)
    pub tx_start: u16,
    /// Last byte available to a transmitted frame; the status vector is
    /// written in the 7 bytes above it
    pub tx_end: u16,
}

impl Default for BufferLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl BufferLayout {
    /// Receive 0x0000..=0x17FF, transmit 0x1900..=0x1FF8
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rx_start: DEFAULT_RX_START,
            rx_end: DEFAULT_RX_END,
            tx_start: DEFAULT_TX_START,
            tx_end: DEFAULT_TX_END,
        }
    }

    /// Size of the receive ring in bytes
    #[must_use]
    pub const fn rx_capacity(&self) -> usize {
        (self.rx_end as usize) - (self.rx_start as usize) + 1
    }

    /// Bytes available between `tx_start` and `tx_end`, control byte included
    #[must_use]
    pub const fn tx_capacity(&self) -> usize {
        (self.tx_end as usize) - (self.tx_start as usize) + 1
    }

    /// Check that the regions are ordered, disjoint, inside buffer memory,
    /// and that the transmit area holds a maximum-size frame
    pub const fn validate(&self) -> ConfigResult<()> {
        if self.rx_start > self.rx_end || self.tx_start > self.tx_end {
            return Err(ConfigError::InvalidBufferLayout);
        }

        // status vector lands right after tx_end
        let tx_last = self.tx_end as usize + TSV_LEN;
        if self.rx_end > BUFFER_MEMORY_END || tx_last > BUFFER_MEMORY_END as usize {
            return Err(ConfigError::InvalidBufferLayout);
        }

        let disjoint = self.rx_end < self.tx_start || tx_last < self.rx_start as usize;
        if !disjoint {
            return Err(ConfigError::InvalidBufferLayout);
        }

        if self.tx_capacity() < TX_CONTROL_LEN + MAX_FRAME_LEN {
            return Err(ConfigError::InvalidBufferLayout);
        }

        Ok(())
    }

    /// ERXRDPT value that releases everything before `next`
    ///
    /// ERXRDPT must sit one byte behind the next unread frame. An even value
    /// there can corrupt the ring (silicon erratum), and next-packet pointers
    /// are always even, so `next - 1` is odd. At the start of the ring the
    /// byte behind is `rx_end`; a `next` outside the ring also maps there.
    #[must_use]
    pub const fn rx_read_pointer_for(&self, next: u16) -> u16 {
        if next <= self.rx_start || next > self.rx_end {
            self.rx_end
        } else {
            next - 1
        }
    }

    /// Whether `ptr` is a valid position inside the receive ring
    #[must_use]
    pub const fn contains_rx(&self, ptr: u16) -> bool {
        ptr >= self.rx_start && ptr <= self.rx_end
    }

    /// Whether `next` can be a next-packet pointer written by the hardware
    ///
    /// Frames start on even addresses inside the receive ring.
    #[must_use]
    pub const fn is_valid_next_pointer(&self, next: u16) -> bool {
        self.contains_rx(next) && next & 1 == 0
    }
}

// =============================================================================
// Pointer Programming
// =============================================================================

/// Program the ring extents and reset the read/write pointers
///
/// Caller must have bank 0 selected.
pub(crate) fn program_pointers<T: SpiTransport>(
    bus: &mut CommandBus<T>,
    layout: &BufferLayout,
) -> IoResult<()> {
    bus.write_register16(ERXST, layout.rx_start)?;
    bus.write_register16(ERXND, layout.rx_end)?;
    bus.write_register16(ERDPT, layout.rx_start)?;
    bus.write_register16(ERXRDPT, layout.rx_read_pointer_for(layout.rx_start))?;
    bus.write_register16(ETXST, layout.tx_start)?;
    bus.write_register16(ETXND, layout.tx_end)?;
    bus.write_register16(EWRPT, layout.tx_start)
}

// =============================================================================
// Unit Tests
// =============================================================================
