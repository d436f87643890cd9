//! External Stack Integrations
//!
//! - **smoltcp** (`smoltcp`): implements `smoltcp::phy::Device` for the
//!   driver, with owned receive tokens and borrowed transmit tokens.
//!   Requires the `smoltcp` feature.
//!
//! # Example
//!
//! ```ignore
//! use smoltcp::phy::Device;
//! let caps = nic.capabilities();
//! ```

#[cfg(feature = "smoltcp")]
pub mod smoltcp;

#[cfg(feature = "smoltcp")]
pub use smoltcp::{Enc28j60RxToken, Enc28j60TxToken, ethernet_address};
