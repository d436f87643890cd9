//! Internal Implementation Details
//!
//! This module contains implementation details that are not part of the public API.
//! Types in this module may change without notice between minor versions.
//!
//! # Contents
//!
//! - [`register`]: SPI control register map, bank model and opcodes
//! - [`phy_regs`]: PHY register definitions reached through MII
//! - [`constants`]: Internal constants and magic numbers
//!
//! # Stability
//!
//! **WARNING:** This module is `pub(crate)` only. The pieces external code
//! needs are re-exported from the crate root and [`crate::registers`].

pub(crate) mod constants;
pub(crate) mod phy_regs;
pub(crate) mod register;
