//! SPI command framing
//!
//! Every exchange with the controller is one of seven instructions. The
//! first byte carries a 3-bit opcode and a 5-bit argument (register address,
//! or the constants 0x1A / 0x1F for buffer memory and reset). Chip select is
//! asserted for exactly one instruction at a time.
//!
//! | Instruction | First byte | Follow-up |
//! |-------------|------------|-----------|
//! | RCR | `0x00 \| addr` | data out (MAC/MII: dummy, then data) |
//! | RBM | `0x3A` | N data bytes out |
//! | WCR | `0x40 \| addr` | data in |
//! | WBM | `0x7A` | N data bytes in |
//! | BFS | `0x80 \| addr` | mask in |
//! | BFC | `0xA0 \| addr` | mask in |
//! | SRC | `0xFF` | - |
//!
//! The methods here are bank-agnostic: the caller has already selected the
//! bank of any non-common register it names. See [`bank`](super::bank) for
//! the bank-aware accessors.

use super::transport::SpiTransport;
use crate::driver::config::PollLimits;
use crate::driver::error::{IoError, IoResult};
use crate::internal::register::{Register, Register16, opcode};

/// Instruction framing over a [`SpiTransport`]
#[derive(Debug)]
pub struct CommandBus<T> {
    transport: T,
    pub(crate) limits: PollLimits,
}

impl<T: SpiTransport> CommandBus<T> {
    /// Wrap a transport
    pub const fn new(transport: T, limits: PollLimits) -> Self {
        Self { transport, limits }
    }

    /// Borrow the transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Mutably borrow the transport
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Give back the transport
    pub fn release(self) -> T {
        self.transport
    }

    /// Poll limits used by this bus
    pub fn limits(&self) -> &PollLimits {
        &self.limits
    }

    // =========================================================================
    // Framing
    // =========================================================================

    /// Run one instruction with chip select asserted around it
    ///
    /// The bus is drained before chip select is released, and chip select is
    /// released even when the exchange fails.
    fn transaction<R>(&mut self, f: impl FnOnce(&mut T) -> IoResult<R>) -> IoResult<R> {
        self.transport.assert_select(true)?;

        let result = f(&mut self.transport);
        let result = match result {
            Ok(value) => self.wait_bus_idle().map(|()| value),
            Err(e) => Err(e),
        };

        let released = self.transport.assert_select(false);
        match (result, released) {
            (Err(e), _) => Err(e),
            (Ok(_), Err(e)) => Err(e),
            (Ok(value), Ok(())) => Ok(value),
        }
    }

    fn wait_bus_idle(&mut self) -> IoResult<()> {
        for _ in 0..self.limits.bus {
            if !self.transport.bus_busy()? {
                return Ok(());
            }
        }

        #[cfg(feature = "defmt")]
        defmt::warn!("serial bus stayed busy");

        Err(IoError::Timeout)
    }

    // =========================================================================
    // Instructions
    // =========================================================================

    /// Read control register (RCR)
    ///
    /// MAC and MII registers shift out a dummy byte first, which is discarded.
    pub fn read_register(&mut self, reg: Register) -> IoResult<u8> {
        let first = opcode::RCR | (reg.addr() & opcode::ARG_MASK);
        let dummy = reg.needs_dummy_byte();
        self.transaction(|t| {
            t.exchange_byte(first)?;
            if dummy {
                t.exchange_byte(opcode::DUMMY)?;
            }
            t.exchange_byte(opcode::DUMMY)
        })
    }

    /// Write control register (WCR)
    pub fn write_register(&mut self, reg: Register, value: u8) -> IoResult<()> {
        let first = opcode::WCR | (reg.addr() & opcode::ARG_MASK);
        self.transaction(|t| t.write_bytes(&[first, value]))
    }

    /// Read a low/high register pair, low byte first
    pub fn read_register16(&mut self, reg: Register16) -> IoResult<u16> {
        let low = self.read_register(reg.low())?;
        let high = self.read_register(reg.high())?;
        Ok(u16::from_le_bytes([low, high]))
    }

    /// Write a low/high register pair, low byte first
    ///
    /// Order matters for MIWR (writing the high byte starts the PHY write)
    /// and ERXRDPT (the chip latches the pointer on the high byte).
    pub fn write_register16(&mut self, reg: Register16, value: u16) -> IoResult<()> {
        let [low, high] = value.to_le_bytes();
        self.write_register(reg.low(), low)?;
        self.write_register(reg.high(), high)
    }

    /// Bit field set (BFS); ETH registers only
    pub fn set_bits(&mut self, reg: Register, mask: u8) -> IoResult<()> {
        debug_assert!(!reg.needs_dummy_byte(), "BFS is only defined for ETH registers");
        let first = opcode::BFS | (reg.addr() & opcode::ARG_MASK);
        self.transaction(|t| t.write_bytes(&[first, mask]))
    }

    /// Bit field clear (BFC); ETH registers only
    pub fn clear_bits(&mut self, reg: Register, mask: u8) -> IoResult<()> {
        debug_assert!(!reg.needs_dummy_byte(), "BFC is only defined for ETH registers");
        let first = opcode::BFC | (reg.addr() & opcode::ARG_MASK);
        self.transaction(|t| t.write_bytes(&[first, mask]))
    }

    /// Read buffer memory (RBM) at ERDPT into `buf`
    pub fn read_buffer(&mut self, buf: &mut [u8]) -> IoResult<()> {
        self.transaction(|t| {
            t.exchange_byte(opcode::RBM | opcode::BUFFER_ARG)?;
            buf.fill(opcode::DUMMY);
            t.transfer_in_place(buf)
        })
    }

    /// Write buffer memory (WBM) at EWRPT
    pub fn write_buffer(&mut self, data: &[u8]) -> IoResult<()> {
        self.transaction(|t| {
            t.exchange_byte(opcode::WBM | opcode::BUFFER_ARG)?;
            t.write_bytes(data)
        })
    }

    /// System reset command (SRC)
    ///
    /// The caller must wait before touching the chip again; see
    /// [`Enc28j60::init`](crate::Enc28j60::init).
    pub fn reset(&mut self) -> IoResult<()> {
        self.transaction(|t| {
            t.exchange_byte(opcode::SRC | opcode::RESET_ARG)?;
            Ok(())
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
