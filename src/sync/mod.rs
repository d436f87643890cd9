//! Synchronization Support
//!
//! - [`CriticalSectionCell`]: ISR-safe interior mutability
//! - [`SharedEnc28j60`]: critical-section protected driver for sharing
//!   between thread mode and the INT pin handler
//!
//! The driver itself takes no locks; every operation assumes exclusive
//! access to the chip. Wrap it here when more than one context uses it.
//!
//! Requires the `critical-section` feature.

mod primitives;
mod shared;

pub use primitives::CriticalSectionCell;
pub use shared::SharedEnc28j60;
