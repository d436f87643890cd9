//! ENC28J60 Ethernet Driver
//!
//! A `no_std`, `no_alloc` Rust driver for the Microchip ENC28J60 stand-alone
//! 10BASE-T Ethernet controller, attached over SPI.
//!
//! The controller holds everything in its own 8 KB buffer memory: a receive
//! ring filled by hardware and a transmit region the host stages frames in.
//! The host never sees DMA or descriptors, only an instruction stream over
//! the serial bus.
//!
//! # Architecture
//!
//! The driver is organized into three layers:
//!
//! 1. **Driver Layer** ([`driver`]): the [`Enc28j60`] handle with bring-up,
//!    frame reception and transmission, interrupts and read-back verification
//! 2. **PHY Layer** ([`phy`]): helpers for the integrated 10BASE-T PHY
//! 3. **HAL Layer** ([`hal`]): SPI instruction framing, register banks and
//!    MII access over a [`SpiTransport`]
//!
//! ## Standard Compliance
//!
//! - **IEEE 802.3**: Frame sizes, inter-packet gaps, pause frames
//! - **ENC28J60 data sheet (DS39662)**: Register map, SPI instruction set,
//!   bring-up sequence
//! - **ENC28J60 silicon errata**: receive read pointer must be odd, transmit
//!   logic reset after a transmit error
//!
//! # Features
//!
//! - `defmt`: Enable defmt formatting for error types and driver logging
//! - `smoltcp`: Enable smoltcp network stack integration
//! - `critical-section`: Enable ISR-safe `SharedEnc28j60` wrapper
//!
//! # Example
//!
//! ```ignore
//! use ph_enc28j60::{Enc28j60, Enc28j60Config, HalTransport};
//! use embedded_hal::delay::DelayNs;
//!
//! // SPI bus and chip-select pin from your HAL
//! let transport = HalTransport::new(spi, cs);
//!
//! let config = Enc28j60Config::new()
//!     .with_mac_address([0x02, 0x00, 0x00, 0x12, 0x34, 0x56]);
//!
//! let mut nic = Enc28j60::new(transport, config);
//! nic.init(&mut delay)?.ensure()?;
//! nic.enable_receive()?;
//!
//! let mut frame = [0u8; 1518];
//! if let Some(len) = nic.receive(&mut frame)? {
//!     // frame[..len] holds one frame including its FCS
//! }
//! nic.write_frame(&outgoing)?;
//! ```
//!
//! # Memory Layout
//!
//! With the default [`BufferLayout`]:
//! - Receive ring: `0x0000..=0x17FF` (6 KB)
//! - Transmit region: `0x1900..=0x1FF8`, room for one maximum-size frame
//!   plus its control byte and status vector

#![no_std]
#![deny(missing_docs)]
#![forbid(unsafe_code)]
// Clippy lint levels live here and in Cargo.toml.
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::too_many_arguments,
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    clippy::type_complexity,
    clippy::must_use_candidate,
    clippy::assertions_on_constants,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_lossless,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::items_after_statements,
    clippy::let_underscore_future
)]

// =============================================================================
// Modules
// =============================================================================

pub mod driver;
pub mod hal;
pub mod phy;

// Internal implementation details (pub(crate) only)
mod internal;

#[cfg(feature = "smoltcp")]
#[cfg_attr(docsrs, doc(cfg(feature = "smoltcp")))]
pub mod integration;

#[cfg(feature = "critical-section")]
#[cfg_attr(docsrs, doc(cfg(feature = "critical-section")))]
pub mod sync;

// Test utilities (only available during testing)
#[cfg(test)]
pub mod testing;

// =============================================================================
// Re-exports
// =============================================================================

pub use driver::config::{Duplex, Enc28j60Config, PollLimits, ReceiveFilter};
pub use driver::enc28j60::Enc28j60;
pub use driver::error::{
    ConfigError, ConfigResult, Error, FrameError, FrameResult, IoError, IoResult, Result,
};
pub use driver::interrupt::{InterruptConfig, InterruptStatus};
pub use driver::ring::BufferLayout;
pub use driver::status::{RxStatusVector, TxStatusVector};
pub use driver::verify::{Mismatch, VerifyReport};

pub use hal::{CommandBus, HalTransport, PhyBus, SpiTransport};

// Re-export PHY types
pub use phy::{InternalPhy, LedConfig, LedMode, LedStretch};

// Re-export sync types when critical-section is enabled
#[cfg(feature = "critical-section")]
pub use sync::SharedEnc28j60;

/// Register map for low-level access through [`CommandBus`].
///
/// These are separated from the primary facade. Most users should prefer
/// the driver APIs; writing registers directly bypasses the driver's ring
/// pointer bookkeeping.
pub mod registers {
    pub use crate::internal::register::*;

    /// PHY registers reached through [`PhyBus`](crate::PhyBus)
    pub mod phy {
        pub use crate::internal::phy_regs::*;
    }
}

/// Shared driver constants.
///
/// These are grouped into a dedicated module to keep the top-level facade
/// focused on driver types and integration points.
pub mod constants {
    pub use crate::internal::constants::{
        // Frame sizes
        CRC_SIZE,
        ETH_HEADER_SIZE,
        MAX_FRAME_LEN,
        MIN_FRAME_SIZE,
        MTU,
        // Buffer memory
        BUFFER_MEMORY_END,
        BUFFER_MEMORY_SIZE,
        DEFAULT_RX_END,
        DEFAULT_RX_START,
        DEFAULT_TX_END,
        DEFAULT_TX_START,
        // Ring and transmit framing
        NEXT_PACKET_PTR_LEN,
        RSV_LEN,
        TSV_LEN,
        TX_CONTROL_BYTE,
        // MAC address
        DEFAULT_MAC_ADDR,
        MAC_ADDR_LEN,
        // Timing
        BUS_BUSY_TIMEOUT,
        MII_BUSY_TIMEOUT,
        OSCILLATOR_POLL_INTERVAL_US,
        OSCILLATOR_TIMEOUT_POLLS,
        RESET_DELAY_US,
        TX_BUSY_TIMEOUT,
    };
}
