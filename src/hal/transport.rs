//! Serial transport seam
//!
//! The command layer only needs byte exchange and chip-select control from
//! the platform. [`SpiTransport`] is that seam; [`HalTransport`] implements it
//! for any `embedded-hal` 1.0 SPI bus plus an output pin used as chip select.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use crate::driver::error::{IoError, IoResult};

// =============================================================================
// Transport Trait
// =============================================================================

/// Byte-level access to the controller's serial port
///
/// Implementations exchange one byte at a time in SPI mode 0 and drive the
/// chip-select line. The block methods have byte-by-byte defaults; backends
/// with a native block transfer should override them.
pub trait SpiTransport {
    /// Prepare the peripheral once, before the first exchange
    fn init_peripheral(&mut self) -> IoResult<()> {
        Ok(())
    }

    /// Shift `tx` out and return the byte shifted in
    fn exchange_byte(&mut self, tx: u8) -> IoResult<u8>;

    /// Assert (`true`) or release (`false`) chip select
    fn assert_select(&mut self, selected: bool) -> IoResult<()>;

    /// Whether the bus still has an exchange in flight
    fn bus_busy(&mut self) -> IoResult<bool> {
        Ok(false)
    }

    /// Exchange a block in place, clocking `buf` out and storing what comes back
    fn transfer_in_place(&mut self, buf: &mut [u8]) -> IoResult<()> {
        for byte in buf.iter_mut() {
            *byte = self.exchange_byte(*byte)?;
        }
        Ok(())
    }

    /// Write a block, discarding the bytes shifted in
    fn write_bytes(&mut self, data: &[u8]) -> IoResult<()> {
        for &byte in data {
            self.exchange_byte(byte)?;
        }
        Ok(())
    }
}

impl<T: SpiTransport + ?Sized> SpiTransport for &mut T {
    fn init_peripheral(&mut self) -> IoResult<()> {
        (**self).init_peripheral()
    }

    fn exchange_byte(&mut self, tx: u8) -> IoResult<u8> {
        (**self).exchange_byte(tx)
    }

    fn assert_select(&mut self, selected: bool) -> IoResult<()> {
        (**self).assert_select(selected)
    }

    fn bus_busy(&mut self) -> IoResult<bool> {
        (**self).bus_busy()
    }

    fn transfer_in_place(&mut self, buf: &mut [u8]) -> IoResult<()> {
        (**self).transfer_in_place(buf)
    }

    fn write_bytes(&mut self, data: &[u8]) -> IoResult<()> {
        (**self).write_bytes(data)
    }
}

// =============================================================================
// embedded-hal Adapter
// =============================================================================

/// [`SpiTransport`] over an `embedded-hal` SPI bus and an active-low CS pin
///
/// The bus must be configured for mode 0 and at most 20 MHz.
///
/// # Example
///
/// ```ignore
/// let transport = HalTransport::new(spi, cs);
/// let mut nic = Enc28j60::new(transport, Enc28j60Config::new());
/// nic.init(&mut delay)?;
/// ```
#[derive(Debug)]
pub struct HalTransport<SPI, CS> {
    spi: SPI,
    cs: CS,
}

impl<SPI, CS> HalTransport<SPI, CS>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
{
    /// Wrap a bus and a chip-select pin
    pub const fn new(spi: SPI, cs: CS) -> Self {
        Self { spi, cs }
    }

    /// Give back the bus and the pin
    pub fn release(self) -> (SPI, CS) {
        (self.spi, self.cs)
    }
}

impl<SPI, CS> SpiTransport for HalTransport<SPI, CS>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
{
    fn init_peripheral(&mut self) -> IoResult<()> {
        self.cs.set_high().map_err(|_| IoError::Bus)
    }

    fn exchange_byte(&mut self, tx: u8) -> IoResult<u8> {
        let mut buf = [tx];
        self.spi.transfer_in_place(&mut buf).map_err(|_| IoError::Bus)?;
        Ok(buf[0])
    }

    fn assert_select(&mut self, selected: bool) -> IoResult<()> {
        if selected {
            self.cs.set_low().map_err(|_| IoError::Bus)
        } else {
            self.cs.set_high().map_err(|_| IoError::Bus)
        }
    }

    fn bus_busy(&mut self) -> IoResult<bool> {
        // flush blocks until the bus is idle
        self.spi.flush().map_err(|_| IoError::Bus)?;
        Ok(false)
    }

    fn transfer_in_place(&mut self, buf: &mut [u8]) -> IoResult<()> {
        self.spi.transfer_in_place(buf).map_err(|_| IoError::Bus)
    }

    fn write_bytes(&mut self, data: &[u8]) -> IoResult<()> {
        self.spi.write(data).map_err(|_| IoError::Bus)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
