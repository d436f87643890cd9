//! Configuration types for the ENC28J60 driver

use super::error::{ConfigError, ConfigResult};
use super::interrupt::InterruptConfig;
use super::ring::BufferLayout;
use crate::internal::constants::{
    BBIPG_FULL_DUPLEX, BBIPG_HALF_DUPLEX, BUS_BUSY_TIMEOUT, CRC_SIZE, DEFAULT_MAC_ADDR,
    MAX_FRAME_LEN, MII_BUSY_TIMEOUT, MIN_FRAME_SIZE, NBBIPG_HIGH, NBBIPG_LOW,
    OSCILLATOR_TIMEOUT_POLLS, TX_BUSY_TIMEOUT,
};
use crate::internal::phy_regs::phcon1;
use crate::internal::register::{erxfcon, macon1, macon3, macon4};

/// Ethernet duplex mode
///
/// The chip does not auto-negotiate; MAC and PHY are both forced to this mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Duplex {
    /// Half duplex
    Half,
    /// Full duplex
    #[default]
    Full,
}

// =============================================================================
// Receive Filter
// =============================================================================

/// Receive filter (ERXFCON)
///
/// With every filter disabled the chip accepts all frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReceiveFilter {
    /// Accept frames addressed to our MAC address
    pub unicast: bool,
    /// Accept multicast frames
    pub multicast: bool,
    /// Accept broadcast frames
    pub broadcast: bool,
    /// Drop frames with a bad CRC before they reach the ring
    pub crc_check: bool,
}

impl Default for ReceiveFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReceiveFilter {
    /// Unicast and broadcast
    #[must_use]
    pub const fn new() -> Self {
        Self {
            unicast: true,
            multicast: false,
            broadcast: true,
            crc_check: false,
        }
    }

    /// Accept everything
    #[must_use]
    pub const fn promiscuous() -> Self {
        Self {
            unicast: false,
            multicast: false,
            broadcast: false,
            crc_check: false,
        }
    }

    /// Enable or disable multicast reception
    #[must_use]
    pub const fn with_multicast(mut self, enabled: bool) -> Self {
        self.multicast = enabled;
        self
    }

    /// Enable or disable the post-filter CRC check
    #[must_use]
    pub const fn with_crc_check(mut self, enabled: bool) -> Self {
        self.crc_check = enabled;
        self
    }

    /// ERXFCON value
    #[must_use]
    pub const fn to_erxfcon(&self) -> u8 {
        let mut value = 0;
        if self.unicast {
            value |= erxfcon::UCEN;
        }
        if self.crc_check {
            value |= erxfcon::CRCEN;
        }
        if self.multicast {
            value |= erxfcon::MCEN;
        }
        if self.broadcast {
            value |= erxfcon::BCEN;
        }
        value
    }
}

// =============================================================================
// Poll Limits
// =============================================================================

/// Upper bounds for every busy-wait the driver performs
///
/// The chip has no hardware timeouts; a poll that runs out of iterations
/// returns [`IoError::Timeout`](super::error::IoError::Timeout).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PollLimits {
    /// Bus-idle polls after each instruction
    pub bus: u32,
    /// ESTAT.CLKRDY polls after reset (one delay interval apart)
    pub oscillator: u32,
    /// MISTAT.BUSY polls per PHY access
    pub phy: u32,
    /// ECON1.TXRTS polls before a transmit or status read
    pub transmit: u32,
}

impl Default for PollLimits {
    fn default() -> Self {
        Self::new()
    }
}

impl PollLimits {
    /// Default limits
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bus: BUS_BUSY_TIMEOUT,
            oscillator: OSCILLATOR_TIMEOUT_POLLS,
            phy: MII_BUSY_TIMEOUT,
            transmit: TX_BUSY_TIMEOUT,
        }
    }

    /// Set the bus-idle limit
    #[must_use]
    pub const fn with_bus(mut self, polls: u32) -> Self {
        self.bus = polls;
        self
    }

    /// Set the oscillator-ready limit
    #[must_use]
    pub const fn with_oscillator(mut self, polls: u32) -> Self {
        self.oscillator = polls;
        self
    }

    /// Set the MII busy limit
    #[must_use]
    pub const fn with_phy(mut self, polls: u32) -> Self {
        self.phy = polls;
        self
    }

    /// Set the transmit busy limit
    #[must_use]
    pub const fn with_transmit(mut self, polls: u32) -> Self {
        self.transmit = polls;
        self
    }
}

// =============================================================================
// Driver Configuration
// =============================================================================

/// Complete controller configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Enc28j60Config {
    /// MAC address (6 bytes, wire order)
    pub mac_address: [u8; 6],
    /// Receive ring and transmit area
    pub buffer: BufferLayout,
    /// Receive filter
    pub receive_filter: ReceiveFilter,
    /// Duplex mode for MAC and PHY
    pub duplex: Duplex,
    /// Send and honour PAUSE frames (MACON1.TXPAUS/RXPAUS)
    pub flow_control: bool,
    /// Pass control frames to the receive ring (MACON1.PASSALL)
    pub pass_all: bool,
    /// Maximum frame length programmed into MAMXFL
    pub max_frame_len: u16,
    /// Interrupt sources enabled in EIE
    pub interrupts: InterruptConfig,
    /// Busy-wait bounds
    pub poll_limits: PollLimits,
}

impl Default for Enc28j60Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Enc28j60Config {
    /// Create a new configuration with defaults
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mac_address: DEFAULT_MAC_ADDR,
            buffer: BufferLayout::new(),
            receive_filter: ReceiveFilter::new(),
            duplex: Duplex::Full,
            flow_control: true,
            pass_all: true,
            max_frame_len: MAX_FRAME_LEN as u16,
            interrupts: InterruptConfig::new(),
            poll_limits: PollLimits::new(),
        }
    }

    // =========================================================================
    // Builder Methods
    // =========================================================================

    /// Set the MAC address
    #[must_use]
    pub const fn with_mac_address(mut self, addr: [u8; 6]) -> Self {
        self.mac_address = addr;
        self
    }

    /// Set the buffer layout
    #[must_use]
    pub const fn with_buffer_layout(mut self, layout: BufferLayout) -> Self {
        self.buffer = layout;
        self
    }

    /// Set the receive filter
    #[must_use]
    pub const fn with_receive_filter(mut self, filter: ReceiveFilter) -> Self {
        self.receive_filter = filter;
        self
    }

    /// Set the duplex mode
    #[must_use]
    pub const fn with_duplex(mut self, duplex: Duplex) -> Self {
        self.duplex = duplex;
        self
    }

    /// Enable or disable PAUSE frame flow control
    #[must_use]
    pub const fn with_flow_control(mut self, enabled: bool) -> Self {
        self.flow_control = enabled;
        self
    }

    /// Pass control frames through to the receive ring
    #[must_use]
    pub const fn with_pass_all(mut self, enabled: bool) -> Self {
        self.pass_all = enabled;
        self
    }

    /// Set the maximum frame length
    #[must_use]
    pub const fn with_max_frame_len(mut self, len: u16) -> Self {
        self.max_frame_len = len;
        self
    }

    /// Set the enabled interrupt sources
    #[must_use]
    pub const fn with_interrupts(mut self, interrupts: InterruptConfig) -> Self {
        self.interrupts = interrupts;
        self
    }

    /// Set the busy-wait bounds
    #[must_use]
    pub const fn with_poll_limits(mut self, limits: PollLimits) -> Self {
        self.poll_limits = limits;
        self
    }

    /// Check the configuration before it is programmed
    pub const fn validate(&self) -> ConfigResult<()> {
        if let Err(e) = self.buffer.validate() {
            return Err(e);
        }
        if (self.max_frame_len as usize) < MIN_FRAME_SIZE + CRC_SIZE
            || (self.max_frame_len as usize) > MAX_FRAME_LEN
        {
            return Err(ConfigError::InvalidMaxFrameLength);
        }
        Ok(())
    }

    // =========================================================================
    // Derived Register Values
    // =========================================================================

    /// MACON1: receive enable, pass-all and pause handling
    #[must_use]
    pub const fn macon1(&self) -> u8 {
        let mut value = macon1::MARXEN;
        if self.pass_all {
            value |= macon1::PASSALL;
        }
        if self.flow_control {
            value |= macon1::TXPAUS | macon1::RXPAUS;
        }
        value
    }

    /// MACON3: pad to 60 bytes, append CRC, check length, duplex
    #[must_use]
    pub const fn macon3(&self) -> u8 {
        let mut value = macon3::PADCFG0 | macon3::TXCRCEN | macon3::FRMLNEN;
        if matches!(self.duplex, Duplex::Full) {
            value |= macon3::FULDPX;
        }
        value
    }

    /// MACON4: defer transmission on a busy medium
    #[must_use]
    pub const fn macon4(&self) -> u8 {
        macon4::DEFER
    }

    /// MABBIPG: back-to-back inter-packet gap for the duplex mode
    #[must_use]
    pub const fn mabbipg(&self) -> u8 {
        match self.duplex {
            Duplex::Full => BBIPG_FULL_DUPLEX,
            Duplex::Half => BBIPG_HALF_DUPLEX,
        }
    }

    /// MAIPGL: non-back-to-back inter-packet gap
    #[must_use]
    pub const fn maipgl(&self) -> u8 {
        NBBIPG_LOW
    }

    /// MAIPGH, only programmed in half duplex
    #[must_use]
    pub const fn maipgh(&self) -> Option<u8> {
        match self.duplex {
            Duplex::Full => None,
            Duplex::Half => Some(NBBIPG_HIGH),
        }
    }

    /// PHCON1: PHY duplex must match MACON3.FULDPX
    #[must_use]
    pub const fn phcon1(&self) -> u16 {
        match self.duplex {
            Duplex::Full => phcon1::PDPXMD,
            Duplex::Half => 0,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_values() {
        let config = Enc28j60Config::new();

        assert_eq!(config.mac_address, [0xA0, 0xCD, 0xEF, 0x01, 0x23, 0x45]);
        assert_eq!(config.buffer, BufferLayout::new());
        assert_eq!(config.duplex, Duplex::Full);
        assert_eq!(config.max_frame_len, 1518);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn config_default_trait_matches_new() {
        assert_eq!(Enc28j60Config::default(), Enc28j60Config::new());
    }

    #[test]
    fn default_mac_register_values() {
        let config = Enc28j60Config::new();

        assert_eq!(config.macon1(), 0x0F);
        assert_eq!(config.macon3(), 0x33);
        assert_eq!(config.macon4(), 0x40);
        assert_eq!(config.mabbipg(), 0x15);
        assert_eq!(config.maipgl(), 0x12);
        assert_eq!(config.maipgh(), None);
        assert_eq!(config.phcon1(), 0x0100);
    }

    #[test]
    fn half_duplex_register_values() {
        let config = Enc28j60Config::new().with_duplex(Duplex::Half);

        assert_eq!(config.macon3(), 0x32);
        assert_eq!(config.mabbipg(), 0x12);
        assert_eq!(config.maipgh(), Some(0x0C));
        assert_eq!(config.phcon1(), 0);
    }

    #[test]
    fn macon1_follows_flags() {
        let config = Enc28j60Config::new()
            .with_flow_control(false)
            .with_pass_all(false);
        assert_eq!(config.macon1(), macon1::MARXEN);
    }

    #[test]
    fn default_receive_filter_is_unicast_and_broadcast() {
        assert_eq!(ReceiveFilter::new().to_erxfcon(), 0x81);
        assert_eq!(ReceiveFilter::promiscuous().to_erxfcon(), 0x00);
        assert_eq!(
            ReceiveFilter::new().with_multicast(true).with_crc_check(true).to_erxfcon(),
            0xA3
        );
    }

    #[test]
    fn max_frame_len_bounds() {
        let config = Enc28j60Config::new().with_max_frame_len(1519);
        assert_eq!(config.validate(), Err(ConfigError::InvalidMaxFrameLength));

        let config = Enc28j60Config::new().with_max_frame_len(63);
        assert_eq!(config.validate(), Err(ConfigError::InvalidMaxFrameLength));

        let config = Enc28j60Config::new().with_max_frame_len(64);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn invalid_layout_fails_validation() {
        let layout = BufferLayout {
            rx_end: 0x1A00,
            ..BufferLayout::new()
        };
        let config = Enc28j60Config::new().with_buffer_layout(layout);
        assert_eq!(config.validate(), Err(ConfigError::InvalidBufferLayout));
    }

    #[test]
    fn poll_limits_builder() {
        let limits = PollLimits::new()
            .with_bus(1)
            .with_oscillator(2)
            .with_phy(3)
            .with_transmit(4);

        assert_eq!(limits.bus, 1);
        assert_eq!(limits.oscillator, 2);
        assert_eq!(limits.phy, 3);
        assert_eq!(limits.transmit, 4);
    }
}
