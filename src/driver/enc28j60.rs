//! ENC28J60 device handle
//!
//! [`Enc28j60`] owns the SPI transport and the driver-side state: the active
//! configuration, the cached MAC address and the position of the next unread
//! frame in the receive ring. Bring-up and the control operations live here;
//! the frame engine is in [`frame`](super::frame) and the read-back check in
//! [`verify`](super::verify).
//!
//! Every operation that touches a banked register selects the bank it needs
//! and restores the caller's bank before returning.

use embedded_hal::delay::DelayNs;

use super::config::{Duplex, Enc28j60Config};
use super::error::{IoError, IoResult, Result};
use super::interrupt::InterruptStatus;
use super::ring::program_pointers;
use super::verify::VerifyReport;
use crate::hal::{CommandBus, PhyBus, SpiTransport};
use crate::internal::constants::{OSCILLATOR_POLL_INTERVAL_US, RESET_DELAY_US};
use crate::internal::phy_regs::{phcon2, phie, phy_reg};
use crate::internal::register::{
    Bank, ECON1, ECON2, EIE, EIR, EPKTCNT, EREVID, ERXFCON, ERXRDPT, ESTAT, MABBIPG, MAADR,
    MACON1, MACON3, MACON4, MAIPGH, MAIPGL, MAMXFL, econ1, econ2, eie, estat,
};

// =============================================================================
// Device Handle
// =============================================================================

/// ENC28J60 driver
///
/// # Example
///
/// ```ignore
/// use ph_enc28j60::{Enc28j60, Enc28j60Config, HalTransport};
///
/// let transport = HalTransport::new(spi, cs);
/// let config = Enc28j60Config::new().with_mac_address([0x02, 0, 0, 0, 0, 1]);
/// let mut nic = Enc28j60::new(transport, config);
///
/// let report = nic.init(&mut delay)?;
/// report.ensure()?;
/// nic.enable_receive()?;
///
/// let mut frame = [0u8; 1518];
/// if let Some(len) = nic.receive(&mut frame)? {
///     // frame[..len] holds the frame including its FCS
/// }
/// ```
#[derive(Debug)]
pub struct Enc28j60<T> {
    /// Instruction framing and bank handling
    pub(super) bus: CommandBus<T>,
    /// Configuration programmed by `init`
    pub(super) config: Enc28j60Config,
    /// MAC address last written to MAADR
    pub(super) mac_addr: [u8; 6],
    /// Start of the next unread frame in the receive ring
    pub(super) next_frame_pointer: u16,
}

impl<T: SpiTransport> Enc28j60<T> {
    /// Create a driver; nothing is sent to the chip until [`init`](Self::init)
    pub const fn new(transport: T, config: Enc28j60Config) -> Self {
        Self {
            bus: CommandBus::new(transport, config.poll_limits),
            mac_addr: config.mac_address,
            next_frame_pointer: config.buffer.rx_start,
            config,
        }
    }

    /// Active configuration
    #[inline(always)]
    pub fn config(&self) -> &Enc28j60Config {
        &self.config
    }

    /// MAC address as last programmed, without reading the chip
    #[inline(always)]
    pub fn cached_mac_address(&self) -> &[u8; 6] {
        &self.mac_addr
    }

    /// Start of the next unread frame in the receive ring
    #[inline(always)]
    pub fn next_frame_pointer(&self) -> u16 {
        self.next_frame_pointer
    }

    /// Borrow the transport
    pub fn transport(&self) -> &T {
        self.bus.transport()
    }

    /// Mutably borrow the transport
    pub fn transport_mut(&mut self) -> &mut T {
        self.bus.transport_mut()
    }

    /// Raw instruction access
    ///
    /// Register writes made here bypass the driver's cached state.
    pub fn bus_mut(&mut self) -> &mut CommandBus<T> {
        &mut self.bus
    }

    /// Give back the transport
    pub fn release(self) -> T {
        self.bus.release()
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Reset and configure the controller
    ///
    /// Sequence:
    /// 1. System reset, then wait for the oscillator start-up time
    /// 2. Receive ring and transmit area extents (bank 0)
    /// 3. Receive filter (bank 1)
    /// 4. Interrupt enables
    /// 5. Wait for ESTAT.CLKRDY
    /// 6. MAC control, maximum frame length and inter-packet gaps (bank 2)
    /// 7. Station address (bank 3)
    /// 8. PHY duplex and interrupt enables
    /// 9. Read back everything written
    ///
    /// Reception stays disabled; call [`enable_receive`](Self::enable_receive)
    /// afterwards. The read-back result is returned rather than treated as an
    /// error so the caller can log the first mismatch; use
    /// [`VerifyReport::ensure`] to turn a failed check into an error.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<VerifyReport> {
        self.config.validate()?;
        let config = self.config;

        self.bus.transport_mut().init_peripheral()?;
        self.bus.reset()?;
        delay.delay_us(RESET_DELAY_US);

        self.bus
            .with_bank(Bank::Bank0, |bus| program_pointers(bus, &config.buffer))?;
        self.next_frame_pointer = config.buffer.rx_start;

        self.bus
            .write(ERXFCON, config.receive_filter.to_erxfcon())?;

        self.bus.write_register(EIE, config.interrupts.to_eie())?;

        self.wait_oscillator(delay)?;

        self.bus.with_bank(Bank::Bank2, |bus| {
            bus.write_register(MACON1, config.macon1())?;
            bus.write_register(MACON3, config.macon3())?;
            bus.write_register(MACON4, config.macon4())?;
            bus.write_register16(MAMXFL, config.max_frame_len)?;
            bus.write_register(MABBIPG, config.mabbipg())?;
            bus.write_register(MAIPGL, config.maipgl())?;
            if let Some(high) = config.maipgh() {
                bus.write_register(MAIPGH, high)?;
            }
            Ok::<(), IoError>(())
        })?;

        self.write_mac_registers(&config.mac_address)?;

        self.bus.write_phy(phy_reg::PHCON1, config.phcon1())?;
        if matches!(config.duplex, Duplex::Half) {
            // keep transmitted frames off the receive path
            self.bus.write_phy(phy_reg::PHCON2, phcon2::HDLDIS)?;
        }
        if config.interrupts.link {
            self.bus
                .write_phy(phy_reg::PHIE, phie::PGEIE | phie::PLNKIE)?;
        }

        self.bus
            .clear_bits(ECON1, econ1::TXRST | econ1::RXRST)?;

        #[cfg(feature = "defmt")]
        defmt::info!(
            "ENC28J60 configured: rx {:#x}..={:#x}, tx {:#x}..={:#x}",
            config.buffer.rx_start,
            config.buffer.rx_end,
            config.buffer.tx_start,
            config.buffer.tx_end
        );

        let report = self.verify_all(true)?;

        #[cfg(feature = "defmt")]
        if !report.passed() {
            defmt::warn!(
                "register read-back: {} of {} checks failed",
                report.mismatches(),
                report.checks()
            );
        }

        Ok(report)
    }

    fn wait_oscillator<D: DelayNs>(&mut self, delay: &mut D) -> IoResult<()> {
        for _ in 0..self.config.poll_limits.oscillator {
            if self.bus.read_register(ESTAT)? & estat::CLKRDY != 0 {
                return Ok(());
            }
            delay.delay_us(OSCILLATOR_POLL_INTERVAL_US);
        }

        #[cfg(feature = "defmt")]
        defmt::warn!("oscillator did not start");

        Err(IoError::Timeout)
    }

    // =========================================================================
    // Receive Control
    // =========================================================================

    /// Start accepting frames into the receive ring (ECON1.RXEN)
    ///
    /// Returns [`IoError::NotEffective`] when the bit does not read back set.
    pub fn enable_receive(&mut self) -> Result<()> {
        self.bus.set_bits(ECON1, econ1::RXEN)?;
        if !self.is_receive_enabled()? {
            return Err(IoError::NotEffective.into());
        }
        Ok(())
    }

    /// Stop accepting frames; frames already in the ring stay readable
    pub fn disable_receive(&mut self) -> Result<()> {
        self.bus.clear_bits(ECON1, econ1::RXEN)?;
        if self.is_receive_enabled()? {
            return Err(IoError::NotEffective.into());
        }
        Ok(())
    }

    /// Whether ECON1.RXEN is set
    pub fn is_receive_enabled(&mut self) -> Result<bool> {
        Ok(self.bus.read_register(ECON1)? & econ1::RXEN != 0)
    }

    /// Frames waiting in the receive ring (EPKTCNT)
    pub fn packet_count(&mut self) -> Result<u8> {
        Ok(self.bus.read(EPKTCNT)?)
    }

    /// Release one frame from EPKTCNT (ECON2.PKTDEC)
    pub fn decrement_packet_count(&mut self) -> Result<()> {
        self.bus.set_bits(ECON2, econ2::PKTDEC)?;
        Ok(())
    }

    /// Free the receive ring up to the next unread frame
    ///
    /// Writes ERXRDPT one byte behind the next-frame pointer, wrapping to the
    /// ring end when the next frame starts at the ring start.
    pub fn advance_read_pointer(&mut self) -> Result<()> {
        let value = self
            .config
            .buffer
            .rx_read_pointer_for(self.next_frame_pointer);
        self.bus.write16(ERXRDPT, value)?;
        Ok(())
    }

    // =========================================================================
    // Interrupts
    // =========================================================================

    /// Set the global interrupt enable (EIE.INTIE)
    pub fn enable_interrupts(&mut self) -> Result<()> {
        self.bus.set_bits(EIE, eie::INTIE)?;
        Ok(())
    }

    /// Clear the global interrupt enable (EIE.INTIE)
    pub fn disable_interrupts(&mut self) -> Result<()> {
        self.bus.clear_bits(EIE, eie::INTIE)?;
        Ok(())
    }

    /// Raw EIR value
    pub fn interrupt_flags(&mut self) -> Result<u8> {
        Ok(self.bus.read_register(EIR)?)
    }

    /// Parsed EIR flags
    pub fn interrupt_status(&mut self) -> Result<InterruptStatus> {
        Ok(InterruptStatus::from_raw(self.interrupt_flags()?))
    }

    /// Clear the flags in `status` that software may clear
    ///
    /// PKTIF follows EPKTCNT and LINKIF is cleared by reading PHIR, so both
    /// are left alone.
    pub fn clear_interrupt_flags(&mut self, status: InterruptStatus) -> Result<()> {
        let mask = status.clearable();
        if mask != 0 {
            self.bus.clear_bits(EIR, mask)?;
        }
        Ok(())
    }

    // =========================================================================
    // Identity
    // =========================================================================

    /// Read the station address from MAADR1..MAADR6
    pub fn mac_address(&mut self) -> Result<[u8; 6]> {
        let addr = self.bus.with_bank(Bank::Bank3, |bus| {
            let mut addr = [0u8; 6];
            for (byte, reg) in addr.iter_mut().zip(MAADR) {
                *byte = bus.read_register(reg)?;
            }
            Ok::<_, IoError>(addr)
        })?;
        Ok(addr)
    }

    /// Program a new station address
    pub fn set_mac_address(&mut self, addr: &[u8; 6]) -> Result<()> {
        self.write_mac_registers(addr)?;
        self.mac_addr = *addr;
        self.config.mac_address = *addr;
        Ok(())
    }

    fn write_mac_registers(&mut self, addr: &[u8; 6]) -> IoResult<()> {
        self.bus.with_bank(Bank::Bank3, |bus| {
            for (&byte, reg) in addr.iter().zip(MAADR) {
                bus.write_register(reg, byte)?;
            }
            Ok(())
        })
    }

    /// Silicon revision (EREVID)
    pub fn revision(&mut self) -> Result<u8> {
        Ok(self.bus.read(EREVID)?)
    }

    /// Current link state from PHSTAT2.LSTAT
    pub fn link_up(&mut self) -> Result<bool> {
        Ok(crate::phy::InternalPhy::is_link_up(self)?)
    }
}

impl<T: SpiTransport> PhyBus for Enc28j60<T> {
    fn read_phy(&mut self, reg: u8) -> IoResult<u16> {
        self.bus.read_phy(reg)
    }

    fn write_phy(&mut self, reg: u8, value: u16) -> IoResult<()> {
        self.bus.write_phy(reg, value)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
