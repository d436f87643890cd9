//! Centralized Constants
//!
//! This module provides a single source of truth for all magic numbers and
//! configuration constants used throughout the ENC28J60 driver.
//!
//! # Organization
//!
//! Constants are grouped by category:
//! - **Frame sizes**: Ethernet frame dimensions
//! - **Buffer memory**: The 8 KiB packet memory and its default partition
//! - **Buffer-memory records**: Sizes of the records the chip stores around frames
//! - **Timing**: Poll limits and delays
//! - **Default configuration**: MAC address and MAC register defaults
//!
//! # Note
//!
//! Register addresses and bit definitions live in `internal::register` and
//! `internal::phy_regs`.

// =============================================================================
// Frame Sizes
// =============================================================================

/// Maximum Ethernet frame length accepted and produced by the driver
/// (1500 payload + 14 header + 4 CRC)
pub const MAX_FRAME_LEN: usize = 1518;

/// Standard Ethernet MTU (Maximum Transmission Unit)
pub const MTU: usize = 1500;

/// Ethernet header size (dst MAC + src MAC + EtherType)
pub const ETH_HEADER_SIZE: usize = 14;

/// CRC/FCS size at end of frame
pub const CRC_SIZE: usize = 4;

/// Minimum Ethernet frame size (excluding CRC)
pub const MIN_FRAME_SIZE: usize = 60;

// =============================================================================
// Buffer Memory
// =============================================================================

/// Size of the on-chip packet buffer memory (8 KiB)
pub const BUFFER_MEMORY_SIZE: usize = 0x2000;

/// Highest valid buffer memory address
pub const BUFFER_MEMORY_END: u16 = 0x1FFF;

/// Default receive region start (ERXST)
pub const DEFAULT_RX_START: u16 = 0x0000;

/// Default receive region end (ERXND), inclusive
pub const DEFAULT_RX_END: u16 = 0x17FF;

/// Default transmit region start (ETXST)
pub const DEFAULT_TX_START: u16 = 0x1900;

/// Default transmit region end (ETXND); the 7 bytes above it hold the
/// transmit status vector
pub const DEFAULT_TX_END: u16 = 0x1FF8;

// =============================================================================
// Buffer-Memory Records
// =============================================================================

/// Size of the next-packet pointer that precedes every received frame
pub const NEXT_PACKET_PTR_LEN: usize = 2;

/// Size of the receive status vector that follows the next-packet pointer
pub const RSV_LEN: usize = 4;

/// Size of the transmit status vector written after ETXND
pub const TSV_LEN: usize = 7;

/// Size of the per-packet control byte written before each transmitted frame
pub const TX_CONTROL_LEN: usize = 1;

/// Per-packet control byte: POVERRIDE | PCRCEN | PPADEN
///
/// Overrides MACON3 for this frame, appends a CRC and pads short frames.
pub const TX_CONTROL_BYTE: u8 = 0x07;

// =============================================================================
// Timing
// =============================================================================

/// Delay after the system reset opcode, in microseconds
///
/// CLKRDY is not reliable immediately after a reset command; the chip needs
/// 1 ms before it is polled.
pub const RESET_DELAY_US: u32 = 1_000;

/// Interval between oscillator-ready polls, in microseconds
pub const OSCILLATOR_POLL_INTERVAL_US: u32 = 10;

/// Maximum oscillator-ready polls (with the interval above, ~10 ms)
pub const OSCILLATOR_TIMEOUT_POLLS: u32 = 1_000;

/// Maximum iterations waiting for the serial bus to go idle
pub const BUS_BUSY_TIMEOUT: u32 = 10_000;

/// Maximum iterations waiting for MISTAT.BUSY to clear
pub const MII_BUSY_TIMEOUT: u32 = 10_000;

/// Maximum iterations waiting for ECON1.TXRTS to clear
pub const TX_BUSY_TIMEOUT: u32 = 100_000;

// =============================================================================
// Default Configuration
// =============================================================================

/// Default MAC address (A0:CD:EF:01:23:45)
///
/// Bit 0 of the first byte is clear, so this is a unicast address.
pub const DEFAULT_MAC_ADDR: [u8; 6] = [0xA0, 0xCD, 0xEF, 0x01, 0x23, 0x45];

/// MAC address length in bytes
pub const MAC_ADDR_LEN: usize = 6;

/// Back-to-back inter-packet gap for full duplex (9.6 us)
pub const BBIPG_FULL_DUPLEX: u8 = 0x15;

/// Back-to-back inter-packet gap for half duplex (9.6 us)
pub const BBIPG_HALF_DUPLEX: u8 = 0x12;

/// Non-back-to-back inter-packet gap, low byte
pub const NBBIPG_LOW: u8 = 0x12;

/// Non-back-to-back inter-packet gap, high byte (half duplex only)
pub const NBBIPG_HIGH: u8 = 0x0C;
