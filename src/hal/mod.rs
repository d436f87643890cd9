//! Hardware Abstraction Layer
//!
//! This module turns byte exchange on a serial bus into controller operations:
//!
//! - [`transport`]: the [`SpiTransport`] seam and an `embedded-hal` adapter
//! - [`command`]: instruction framing with chip-select bracketing
//! - [`bank`]: bank selection with scoped restore, bank-aware register access
//! - [`mii`]: indirect PHY register access and the [`PhyBus`] trait
//!
//! # Delay Integration
//!
//! Types that require delays use `embedded_hal::delay::DelayNs` directly.
//! Pass any delay implementation from your HAL.

pub mod bank;
pub mod command;
pub mod mii;
pub mod transport;

pub use command::CommandBus;
pub use mii::PhyBus;
pub use transport::{HalTransport, SpiTransport};
