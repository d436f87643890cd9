//! smoltcp Network Stack Integration
#![cfg_attr(docsrs, doc(cfg(feature = "smoltcp")))]
//!
//! Implements `smoltcp::phy::Device` for [`Enc28j60`], so the driver can be
//! handed directly to a smoltcp `Interface`.
//!
//! # Example
//!
//! ```ignore
//! use smoltcp::iface::{Config, Interface, SocketSet};
//! use smoltcp::wire::{IpAddress, IpCidr};
//! use ph_enc28j60::integration::ethernet_address;
//!
//! let mut nic = Enc28j60::new(transport, Enc28j60Config::new());
//! nic.init(&mut delay)?.ensure()?;
//! nic.enable_receive()?;
//!
//! let config = Config::new(ethernet_address(&nic).into());
//! let mut iface = Interface::new(config, &mut nic, smoltcp::time::Instant::ZERO);
//! iface.update_ip_addrs(|addrs| {
//!     addrs.push(IpCidr::new(IpAddress::v4(192, 168, 1, 100), 24)).unwrap();
//! });
//! ```
//!
//! # Token Model
//!
//! The chip cannot hand out a reference into its buffer memory, so the
//! receive token copies the frame out when `receive()` is called and owns
//! the bytes. Only the transmit token borrows the driver, which lets
//! `receive()` return both tokens without aliasing.

use crate::driver::enc28j60::Enc28j60;
use crate::hal::SpiTransport;
use crate::internal::constants::{CRC_SIZE, MAX_FRAME_LEN};

use smoltcp::phy::{ChecksumCapabilities, Device, DeviceCapabilities, Medium};
use smoltcp::time::Instant;

/// Largest frame smoltcp may hand over: header and payload, no FCS
const MAX_PAYLOAD_FRAME: usize = MAX_FRAME_LEN - CRC_SIZE;

// =============================================================================
// RX Token
// =============================================================================

/// Receive token holding one frame copied out of the receive ring
///
/// The FCS has already been stripped.
pub struct Enc28j60RxToken {
    buffer: [u8; MAX_FRAME_LEN],
    len: usize,
}

impl smoltcp::phy::RxToken for Enc28j60RxToken {
    fn consume<R, F>(self, f: F) -> R
    where
        F: FnOnce(&[u8]) -> R,
    {
        f(&self.buffer[..self.len])
    }
}

// =============================================================================
// TX Token
// =============================================================================

/// Transmit token borrowing the driver
pub struct Enc28j60TxToken<'a, T> {
    nic: &'a mut Enc28j60<T>,
}

impl<T: SpiTransport> smoltcp::phy::TxToken for Enc28j60TxToken<'_, T> {
    fn consume<R, F>(self, len: usize, f: F) -> R
    where
        F: FnOnce(&mut [u8]) -> R,
    {
        let len = len.min(MAX_PAYLOAD_FRAME);
        let mut buffer = [0u8; MAX_PAYLOAD_FRAME];

        let result = f(&mut buffer[..len]);

        // smoltcp retransmits at a higher layer; a failed send is a lost frame
        if let Err(_e) = self.nic.write_frame(&buffer[..len]) {
            #[cfg(feature = "defmt")]
            defmt::warn!("transmit failed: {}", _e);
        }

        result
    }
}

// =============================================================================
// Device Implementation
// =============================================================================

impl<T: SpiTransport> Device for Enc28j60<T> {
    type RxToken<'a>
        = Enc28j60RxToken
    where
        Self: 'a;
    type TxToken<'a>
        = Enc28j60TxToken<'a, T>
    where
        Self: 'a;

    fn receive(&mut self, _timestamp: Instant) -> Option<(Self::RxToken<'_>, Self::TxToken<'_>)> {
        let mut buffer = [0u8; MAX_FRAME_LEN];

        let len = match Enc28j60::receive(self, &mut buffer) {
            Ok(Some(len)) => len,
            Ok(None) => return None,
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("receive failed: {}", _e);

                return None;
            }
        };

        Some((
            Enc28j60RxToken {
                buffer,
                len: len.saturating_sub(CRC_SIZE),
            },
            Enc28j60TxToken { nic: self },
        ))
    }

    fn transmit(&mut self, _timestamp: Instant) -> Option<Self::TxToken<'_>> {
        Some(Enc28j60TxToken { nic: self })
    }

    fn capabilities(&self) -> DeviceCapabilities {
        let mut caps = DeviceCapabilities::default();
        caps.medium = Medium::Ethernet;
        // for Ethernet smoltcp counts the 14-byte header in the MTU
        caps.max_transmission_unit =
            usize::from(self.config().max_frame_len).saturating_sub(CRC_SIZE);
        caps.max_burst_size = Some(1);
        // the chip has no checksum offload usable from here
        caps.checksum = ChecksumCapabilities::default();
        caps
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// The driver's MAC address as a smoltcp `EthernetAddress`
pub fn ethernet_address<T>(nic: &Enc28j60<T>) -> smoltcp::wire::EthernetAddress
where
    T: SpiTransport,
{
    smoltcp::wire::EthernetAddress(*nic.cached_mac_address())
}
