//! Receive and transmit status vectors
//!
//! The chip stores a 4-byte receive status vector (RSV) in front of every
//! received frame and writes a 7-byte transmit status vector (TSV) right after
//! ETXND when a transmission finishes. Both are little-endian bit fields.

use crate::internal::constants::{RSV_LEN, TSV_LEN};

// =============================================================================
// Receive Status Vector
// =============================================================================

/// RSV bit positions (byte count occupies bits 15:0)
mod rsv {
    pub const LONG_EVENT: u32 = 1 << 16;
    pub const CARRIER_EVENT: u32 = 1 << 18;
    pub const CRC_ERROR: u32 = 1 << 20;
    pub const LENGTH_CHECK_ERROR: u32 = 1 << 21;
    pub const LENGTH_OUT_OF_RANGE: u32 = 1 << 22;
    pub const RECEIVED_OK: u32 = 1 << 23;
    pub const MULTICAST: u32 = 1 << 24;
    pub const BROADCAST: u32 = 1 << 25;
    pub const DRIBBLE_NIBBLE: u32 = 1 << 26;
    pub const CONTROL_FRAME: u32 = 1 << 27;
    pub const PAUSE_FRAME: u32 = 1 << 28;
    pub const UNKNOWN_OPCODE: u32 = 1 << 29;
    pub const VLAN: u32 = 1 << 30;
}

/// Receive status vector of one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RxStatusVector {
    raw: u32,
}

impl RxStatusVector {
    /// Decode the 4 bytes that follow the next-packet pointer
    #[must_use]
    pub const fn from_bytes(bytes: [u8; RSV_LEN]) -> Self {
        Self {
            raw: u32::from_le_bytes(bytes),
        }
    }

    /// Raw 32-bit vector
    #[must_use]
    pub const fn raw(&self) -> u32 {
        self.raw
    }

    /// Received byte count, destination address through CRC
    #[must_use]
    pub const fn byte_count(&self) -> u16 {
        (self.raw & 0xFFFF) as u16
    }

    /// Frame had a valid CRC, no symbol errors, and a valid length
    #[must_use]
    pub const fn received_ok(&self) -> bool {
        self.raw & rsv::RECEIVED_OK != 0
    }

    /// Packet over 50000 bit times or a dropped packet preceded this one
    #[must_use]
    pub const fn long_event(&self) -> bool {
        self.raw & rsv::LONG_EVENT != 0
    }

    /// A carrier event was seen since the last frame
    #[must_use]
    pub const fn carrier_event(&self) -> bool {
        self.raw & rsv::CARRIER_EVENT != 0
    }

    /// CRC did not match
    #[must_use]
    pub const fn crc_error(&self) -> bool {
        self.raw & rsv::CRC_ERROR != 0
    }

    /// Type/length field did not match the byte count
    #[must_use]
    pub const fn length_check_error(&self) -> bool {
        self.raw & rsv::LENGTH_CHECK_ERROR != 0
    }

    /// Type/length field above 1500 (usually an EtherType, not an error)
    #[must_use]
    pub const fn length_out_of_range(&self) -> bool {
        self.raw & rsv::LENGTH_OUT_OF_RANGE != 0
    }

    /// Destination was a multicast address
    #[must_use]
    pub const fn multicast(&self) -> bool {
        self.raw & rsv::MULTICAST != 0
    }

    /// Destination was the broadcast address
    #[must_use]
    pub const fn broadcast(&self) -> bool {
        self.raw & rsv::BROADCAST != 0
    }

    /// Extra bits after the frame end
    #[must_use]
    pub const fn dribble_nibble(&self) -> bool {
        self.raw & rsv::DRIBBLE_NIBBLE != 0
    }

    /// MAC control frame
    #[must_use]
    pub const fn control_frame(&self) -> bool {
        self.raw & rsv::CONTROL_FRAME != 0
    }

    /// PAUSE control frame
    #[must_use]
    pub const fn pause_frame(&self) -> bool {
        self.raw & rsv::PAUSE_FRAME != 0
    }

    /// Control frame with an unknown opcode
    #[must_use]
    pub const fn unknown_opcode(&self) -> bool {
        self.raw & rsv::UNKNOWN_OPCODE != 0
    }

    /// VLAN tagged frame
    #[must_use]
    pub const fn vlan(&self) -> bool {
        self.raw & rsv::VLAN != 0
    }
}

// =============================================================================
// Transmit Status Vector
// =============================================================================

/// TSV bit positions
mod tsv {
    pub const COLLISION_SHIFT: u64 = 16;
    pub const COLLISION_MASK: u64 = 0x0F;
    pub const CRC_ERROR: u64 = 1 << 20;
    pub const LENGTH_CHECK_ERROR: u64 = 1 << 21;
    pub const LENGTH_OUT_OF_RANGE: u64 = 1 << 22;
    pub const DONE: u64 = 1 << 23;
    pub const MULTICAST: u64 = 1 << 24;
    pub const BROADCAST: u64 = 1 << 25;
    pub const DEFERRED: u64 = 1 << 26;
    pub const EXCESSIVE_DEFER: u64 = 1 << 27;
    pub const EXCESSIVE_COLLISION: u64 = 1 << 28;
    pub const LATE_COLLISION: u64 = 1 << 29;
    pub const GIANT: u64 = 1 << 30;
    pub const UNDERRUN: u64 = 1 << 31;
    pub const WIRE_BYTES_SHIFT: u64 = 32;
    pub const CONTROL_FRAME: u64 = 1 << 48;
    pub const PAUSE_FRAME: u64 = 1 << 49;
    pub const BACKPRESSURE: u64 = 1 << 50;
    pub const VLAN: u64 = 1 << 51;
}

/// Transmit status vector of the last transmitted frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TxStatusVector {
    raw: u64,
}

impl TxStatusVector {
    /// Decode the 7 bytes written after ETXND
    #[must_use]
    pub const fn from_bytes(bytes: [u8; TSV_LEN]) -> Self {
        let mut wide = [0u8; 8];
        let mut i = 0;
        while i < TSV_LEN {
            wide[i] = bytes[i];
            i += 1;
        }
        Self {
            raw: u64::from_le_bytes(wide),
        }
    }

    /// Raw 56-bit vector
    #[must_use]
    pub const fn raw(&self) -> u64 {
        self.raw
    }

    /// Bytes in the frame, padding included, collisions excluded
    #[must_use]
    pub const fn byte_count(&self) -> u16 {
        (self.raw & 0xFFFF) as u16
    }

    /// Collisions seen while transmitting
    #[must_use]
    pub const fn collision_count(&self) -> u8 {
        ((self.raw >> tsv::COLLISION_SHIFT) & tsv::COLLISION_MASK) as u8
    }

    /// Transmission completed successfully
    #[must_use]
    pub const fn done(&self) -> bool {
        self.raw & tsv::DONE != 0
    }

    /// CRC in the frame did not match the computed one
    #[must_use]
    pub const fn crc_error(&self) -> bool {
        self.raw & tsv::CRC_ERROR != 0
    }

    /// Type/length field did not match the byte count
    #[must_use]
    pub const fn length_check_error(&self) -> bool {
        self.raw & tsv::LENGTH_CHECK_ERROR != 0
    }

    /// Type/length field above 1500
    #[must_use]
    pub const fn length_out_of_range(&self) -> bool {
        self.raw & tsv::LENGTH_OUT_OF_RANGE != 0
    }

    /// Destination was a multicast address
    #[must_use]
    pub const fn multicast(&self) -> bool {
        self.raw & tsv::MULTICAST != 0
    }

    /// Destination was the broadcast address
    #[must_use]
    pub const fn broadcast(&self) -> bool {
        self.raw & tsv::BROADCAST != 0
    }

    /// Transmission was deferred at least once
    #[must_use]
    pub const fn deferred(&self) -> bool {
        self.raw & tsv::DEFERRED != 0
    }

    /// Deferred longer than 24287 bit times; frame aborted
    #[must_use]
    pub const fn excessive_defer(&self) -> bool {
        self.raw & tsv::EXCESSIVE_DEFER != 0
    }

    /// More collisions than the retransmission limit; frame aborted
    #[must_use]
    pub const fn excessive_collision(&self) -> bool {
        self.raw & tsv::EXCESSIVE_COLLISION != 0
    }

    /// Collision after the collision window; frame aborted
    #[must_use]
    pub const fn late_collision(&self) -> bool {
        self.raw & tsv::LATE_COLLISION != 0
    }

    /// Byte count above MAMXFL
    #[must_use]
    pub const fn giant(&self) -> bool {
        self.raw & tsv::GIANT != 0
    }

    /// Transmit underrun
    #[must_use]
    pub const fn underrun(&self) -> bool {
        self.raw & tsv::UNDERRUN != 0
    }

    /// Bytes put on the wire, collided attempts included
    #[must_use]
    pub const fn total_wire_bytes(&self) -> u16 {
        ((self.raw >> tsv::WIRE_BYTES_SHIFT) & 0xFFFF) as u16
    }

    /// MAC control frame
    #[must_use]
    pub const fn control_frame(&self) -> bool {
        self.raw & tsv::CONTROL_FRAME != 0
    }

    /// PAUSE control frame
    #[must_use]
    pub const fn pause_frame(&self) -> bool {
        self.raw & tsv::PAUSE_FRAME != 0
    }

    /// Carrier sense back-pressure was applied
    #[must_use]
    pub const fn backpressure(&self) -> bool {
        self.raw & tsv::BACKPRESSURE != 0
    }

    /// VLAN tagged frame
    #[must_use]
    pub const fn vlan(&self) -> bool {
        self.raw & tsv::VLAN != 0
    }

    /// The frame was aborted rather than sent
    #[must_use]
    pub const fn aborted(&self) -> bool {
        self.excessive_defer() || self.excessive_collision() || self.late_collision()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
