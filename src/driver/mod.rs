//! Core driver components for the ENC28J60 controller.
//!
//! - [`config`] - Configuration types and builder patterns
//! - [`error`] - Error types and result aliases
//! - [`enc28j60`] - The driver handle: bring-up and receive/interrupt control
//! - [`frame`] - Frame reception from the receive ring and transmission
//! - [`ring`] - Buffer memory partitioning and ring pointer arithmetic
//! - [`interrupt`] - Interrupt enable configuration and decoded flags
//! - [`status`] - Receive and transmit status vectors
//! - [`verify`] - Configuration read-back
//!
//! # Example
//!
//! ```ignore
//! use ph_enc28j60::driver::{Enc28j60, Enc28j60Config, Duplex};
//!
//! let config = Enc28j60Config::new()
//!     .with_mac_address([0x02, 0x00, 0x00, 0x00, 0x00, 0x01])
//!     .with_duplex(Duplex::Full);
//! let mut nic = Enc28j60::new(transport, config);
//! nic.init(&mut delay)?.ensure()?;
//! ```

// Submodules
pub mod config;
pub mod enc28j60;
pub mod error;
pub mod frame;
pub mod interrupt;
pub mod ring;
pub mod status;
pub mod verify;

// Re-exports for convenience
pub use config::{Duplex, Enc28j60Config, PollLimits, ReceiveFilter};
pub use enc28j60::Enc28j60;
pub use error::{
    ConfigError, ConfigResult, Error, FrameError, FrameResult, IoError, IoResult, Result,
};
pub use interrupt::{InterruptConfig, InterruptStatus};
pub use ring::BufferLayout;
pub use status::{RxStatusVector, TxStatusVector};
pub use verify::{Mismatch, VerifyReport};
