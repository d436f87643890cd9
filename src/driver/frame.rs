//! Frame engine
//!
//! Receive: each frame in the ring starts with a 2-byte next-packet pointer
//! and a 4-byte receive status vector, followed by the frame (FCS included).
//! After a frame is consumed ERDPT moves to the next frame and ERXRDPT is
//! advanced so the hardware may reuse the space.
//!
//! Transmit: the frame is staged at ETXST behind a one-byte per-packet
//! control, ETXND marks its last byte, and ECON1.TXRTS starts the MAC. The
//! hardware appends a 7-byte transmit status vector at ETXND + 1.
//!
//! ```text
//! ETXST      ETXST+1                ETXND  ETXND+1
//! +---------+----------------------+------+--------------+
//! | control |  destination ... data       |  TSV (7 B)   |
//! +---------+----------------------+------+--------------+
//! ```

use super::enc28j60::Enc28j60;
use super::error::{Error, FrameError, IoError, IoResult, Result};
use super::status::{RxStatusVector, TxStatusVector};
use crate::hal::{CommandBus, SpiTransport};
use crate::internal::constants::{
    CRC_SIZE, NEXT_PACKET_PTR_LEN, RSV_LEN, TSV_LEN, TX_CONTROL_BYTE,
};
use crate::internal::register::{
    Bank, ECON1, EIR, ERDPT, ERXRDPT, ETXND, ETXST, EWRPT, econ1, eir,
};

impl<T: SpiTransport> Enc28j60<T> {
    // =========================================================================
    // Receive
    // =========================================================================

    /// Receive one frame if the ring holds any
    ///
    /// Checks EPKTCNT, copies the next frame into `buf` and releases it from
    /// the packet counter. Returns `None` when no frame is waiting.
    ///
    /// A frame that does not fit in `buf` is dropped and reported as
    /// [`IoError::BufferTooSmall`].
    pub fn receive(&mut self, buf: &mut [u8]) -> Result<Option<usize>> {
        if self.packet_count()? == 0 {
            return Ok(None);
        }

        match self.read_frame(buf) {
            Ok(len) => {
                self.decrement_packet_count()?;
                Ok(Some(len))
            }
            Err(Error::Io(IoError::BufferTooSmall)) => {
                self.decrement_packet_count()?;
                Err(IoError::BufferTooSmall.into())
            }
            Err(e) => Err(e),
        }
    }

    /// Copy the next frame out of the receive ring
    ///
    /// The caller must have seen a non-zero [`packet_count`](Self::packet_count)
    /// and is responsible for [`decrement_packet_count`](Self::decrement_packet_count)
    /// afterwards. Returns the frame length including the FCS.
    pub fn read_frame(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.read_frame_with_status(buf).map(|(len, _)| len)
    }

    /// [`read_frame`](Self::read_frame), also returning the receive status
    /// vector
    ///
    /// After the frame, ERDPT moves to the header's next-packet pointer and
    /// ERXRDPT is written one byte behind it (the ring end when the next
    /// frame starts at the ring start), not to the pointer itself. ERXRDPT
    /// must hold an odd address or the hardware can overwrite unread data
    /// (silicon erratum).
    ///
    /// # Errors
    ///
    /// - [`FrameError::CorruptHeader`] when the next-packet pointer is odd or
    ///   outside the receive ring. Nothing is copied, the pointers are left
    ///   as they were and reception is disabled.
    /// - [`FrameError::TooLarge`] when the status vector reports more bytes
    ///   than the configured maximum. Nothing is copied, the frame is left in
    ///   the ring and reception is disabled; the ring must be reinitialized.
    /// - [`IoError::BufferTooSmall`] when `buf` cannot hold the frame. The
    ///   frame is skipped.
    pub fn read_frame_with_status(&mut self, buf: &mut [u8]) -> Result<(usize, RxStatusVector)> {
        let layout = self.config.buffer;
        let max_len = self.config.max_frame_len;
        let start = self.next_frame_pointer;

        let (next, status, copied) = self.bus.with_bank(
            Bank::Bank0,
            |bus| -> Result<(u16, RxStatusVector, bool)> {
                bus.write_register16(ERDPT, start)?;

                let mut header = [0u8; NEXT_PACKET_PTR_LEN + RSV_LEN];
                bus.read_buffer(&mut header)?;
                let next = u16::from_le_bytes([header[0], header[1]]);
                let status =
                    RxStatusVector::from_bytes([header[2], header[3], header[4], header[5]]);

                if !layout.is_valid_next_pointer(next) {
                    bus.clear_bits(ECON1, econ1::RXEN)?;

                    #[cfg(feature = "defmt")]
                    defmt::warn!("next-packet pointer {=u16:#x} invalid, receive disabled", next);

                    return Err(FrameError::CorruptHeader { next }.into());
                }

                let length = status.byte_count();
                if length > max_len {
                    bus.clear_bits(ECON1, econ1::RXEN)?;

                    #[cfg(feature = "defmt")]
                    defmt::warn!("frame of {} bytes in receive ring, receive disabled", length);

                    return Err(FrameError::TooLarge { length }.into());
                }

                let len = usize::from(length);
                let copied = len <= buf.len();
                if copied {
                    bus.read_buffer(&mut buf[..len])?;
                }

                bus.write_register16(ERDPT, next)?;
                bus.write_register16(ERXRDPT, layout.rx_read_pointer_for(next))?;
                Ok((next, status, copied))
            },
        )?;

        self.next_frame_pointer = next;

        if !copied {
            #[cfg(feature = "defmt")]
            defmt::debug!("dropped {} byte frame, buffer too small", status.byte_count());

            return Err(IoError::BufferTooSmall.into());
        }

        Ok((usize::from(status.byte_count()), status))
    }

    // =========================================================================
    // Transmit
    // =========================================================================

    /// Stage `frame` in the transmit area and start transmission
    ///
    /// `frame` runs from the destination address through the payload; the MAC
    /// pads it and appends the FCS. Waits for any transmission still in
    /// progress first.
    ///
    /// With the FCS added the frame must fit the configured maximum frame
    /// length (MAMXFL); the MAC aborts longer frames.
    pub fn write_frame(&mut self, frame: &[u8]) -> Result<()> {
        let len = frame.len();
        let layout = self.config.buffer;
        let max_len = usize::from(self.config.max_frame_len).saturating_sub(CRC_SIZE);
        if len == 0
            || len > max_len
            || usize::from(layout.tx_start) + len > usize::from(layout.tx_end)
        {
            return Err(FrameError::InvalidLength { length: len }.into());
        }

        self.wait_transmit_idle()?;
        self.recover_transmit_logic()?;

        self.bus.with_bank(Bank::Bank0, |bus| -> IoResult<()> {
            let start = bus.read_register16(ETXST)?;
            bus.write_register16(EWRPT, start)?;
            // bounded by the tx_end check above
            bus.write_register16(ETXND, start.wrapping_add(len as u16))?;
            bus.write_buffer(&[TX_CONTROL_BYTE])?;
            bus.write_buffer(frame)?;
            bus.set_bits(ECON1, econ1::TXRTS)
        })?;

        Ok(())
    }

    /// Whether a transmission is in progress (ECON1.TXRTS)
    pub fn is_transmitting(&mut self) -> Result<bool> {
        Ok(self.bus.read_register(ECON1)? & econ1::TXRTS != 0)
    }

    /// Raw transmit status vector of the last transmission
    ///
    /// Waits for the transmission to finish, reads the seven bytes at
    /// ETXND + 1 and puts ERDPT back where it was.
    pub fn transmit_status_bytes(&mut self) -> Result<[u8; TSV_LEN]> {
        self.wait_transmit_idle()?;

        let tsv = self.bus.with_bank(Bank::Bank0, |bus| -> IoResult<[u8; TSV_LEN]> {
            let saved = bus.read_register16(ERDPT)?;
            let end = bus.read_register16(ETXND)?;

            let mut tsv = [0u8; TSV_LEN];
            let read = bus
                .write_register16(ERDPT, end.wrapping_add(1))
                .and_then(|()| bus.read_buffer(&mut tsv));
            let restored = bus.write_register16(ERDPT, saved);
            read?;
            restored?;
            Ok(tsv)
        })?;

        Ok(tsv)
    }

    /// Parsed transmit status vector of the last transmission
    pub fn transmit_status(&mut self) -> Result<TxStatusVector> {
        self.transmit_status_bytes().map(TxStatusVector::from_bytes)
    }

    fn wait_transmit_idle(&mut self) -> IoResult<()> {
        wait_transmit_idle(&mut self.bus)
    }

    /// Reset the transmit logic after a transmit error
    ///
    /// After TXERIF the transmit logic can stall with TXRTS never clearing
    /// (silicon erratum); pulsing ECON1.TXRST brings it back.
    fn recover_transmit_logic(&mut self) -> IoResult<()> {
        if self.bus.read_register(EIR)? & eir::TXERIF == 0 {
            return Ok(());
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("transmit error pending, resetting transmit logic");

        self.bus.set_bits(ECON1, econ1::TXRST)?;
        self.bus.clear_bits(ECON1, econ1::TXRST)?;
        self.bus.clear_bits(EIR, eir::TXERIF)
    }
}

fn wait_transmit_idle<T: SpiTransport>(bus: &mut CommandBus<T>) -> IoResult<()> {
    for _ in 0..bus.limits().transmit {
        if bus.read_register(ECON1)? & econ1::TXRTS == 0 {
            return Ok(());
        }
    }

    #[cfg(feature = "defmt")]
    defmt::warn!("transmission did not complete");

    Err(IoError::Timeout)
}

// =============================================================================
// Unit Tests
// =============================================================================
