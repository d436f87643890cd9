//! Error types for the ENC28J60 driver
//!
//! Errors are organized by domain for better diagnostics:
//! - [`ConfigError`]: Configuration and bring-up failures
//! - [`IoError`]: Bus, polling and runtime failures
//! - [`FrameError`]: Frames the receive or transmit path refuses
//!
//! The unified [`Error`] enum wraps all domain errors and is returned
//! by most driver methods.

// =============================================================================
// Configuration Errors
// =============================================================================

/// Configuration and initialization errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Receive/transmit regions overlap, leave the 8 KiB memory, or the
    /// transmit region cannot hold a maximum-size frame
    InvalidBufferLayout,
    /// Maximum frame length outside 64..=1518
    InvalidMaxFrameLength,
    /// Read-back verification after bring-up found a mismatch
    VerificationFailed,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ConfigError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConfigError::InvalidBufferLayout => "invalid buffer layout",
            ConfigError::InvalidMaxFrameLength => "invalid maximum frame length",
            ConfigError::VerificationFailed => "register verification failed",
        }
    }
}

// =============================================================================
// I/O Errors
// =============================================================================

/// Bus and runtime errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IoError {
    /// A bounded poll ran out (bus, oscillator, MII or transmit busy)
    Timeout,
    /// The serial bus or chip-select pin reported an error
    Bus,
    /// Destination buffer too small for the received frame (frame dropped)
    BufferTooSmall,
    /// A control bit did not read back with the requested value
    NotEffective,
    /// PHY register address not implemented by the chip
    InvalidPhyRegister,
    /// PHY identifier registers did not hold the ENC28J60 values
    UnexpectedPhyId,
}

impl core::fmt::Display for IoError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl IoError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            IoError::Timeout => "operation timed out",
            IoError::Bus => "serial bus error",
            IoError::BufferTooSmall => "buffer too small for frame",
            IoError::NotEffective => "register write did not take effect",
            IoError::InvalidPhyRegister => "invalid PHY register",
            IoError::UnexpectedPhyId => "unexpected PHY identifier",
        }
    }
}

// =============================================================================
// Frame Errors
// =============================================================================

/// Frames rejected by the receive or transmit path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// The receive status vector reported a byte count above the maximum
    /// frame length. Receive has been disabled and the payload was not read.
    TooLarge {
        /// Byte count taken from the receive status vector
        length: u16,
    },
    /// The next-packet pointer in a frame header lies outside the receive
    /// ring or is odd. Receive has been disabled and the ring pointers were
    /// left unchanged.
    CorruptHeader {
        /// Next-packet pointer read from the header
        next: u16,
    },
    /// Transmit length is zero, exceeds the maximum frame length less the
    /// FCS, or does not fit the transmit region
    InvalidLength {
        /// Requested frame length
        length: usize,
    },
}

impl core::fmt::Display for FrameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FrameError::TooLarge { length } => write!(f, "{} ({} bytes)", self.as_str(), length),
            FrameError::CorruptHeader { next } => write!(f, "{} ({:#06x})", self.as_str(), next),
            FrameError::InvalidLength { length } => {
                write!(f, "{} ({} bytes)", self.as_str(), length)
            }
        }
    }
}

impl FrameError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            FrameError::TooLarge { .. } => "received frame too large",
            FrameError::CorruptHeader { .. } => "corrupt next-packet pointer",
            FrameError::InvalidLength { .. } => "invalid frame length",
        }
    }
}

// =============================================================================
// Unified Error Type
// =============================================================================

/// This enum wraps all domain-specific errors for unified error handling.
///
/// Match on the inner domain error for specific handling:
/// ```ignore
/// match nic.read_frame(&mut buf) {
///     Err(Error::Frame(FrameError::TooLarge { length })) => { /* re-enable receive */ }
///     Err(Error::Io(IoError::Timeout)) => { /* chip stopped answering */ }
///     _ => {}
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Configuration error
    Config(ConfigError),
    /// I/O error
    Io(IoError),
    /// Frame error
    Frame(FrameError),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Config(e) => write!(f, "config: {}", e.as_str()),
            Error::Io(e) => write!(f, "io: {}", e.as_str()),
            Error::Frame(e) => write!(f, "frame: {}", e),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<IoError> for Error {
    fn from(e: IoError) -> Self {
        Error::Io(e)
    }
}

impl From<FrameError> for Error {
    fn from(e: FrameError) -> Self {
        Error::Frame(e)
    }
}

/// Result type alias for driver operations
pub type Result<T> = core::result::Result<T, Error>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = core::result::Result<T, ConfigError>;

/// Result type alias for I/O operations
pub type IoResult<T> = core::result::Result<T, IoError>;

/// Result type alias for frame validation
pub type FrameResult<T> = core::result::Result<T, FrameError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    extern crate std;
    use std::format;

    use super::*;

    #[test]
    fn config_error_as_str_non_empty() {
        let variants = [
            ConfigError::InvalidBufferLayout,
            ConfigError::InvalidMaxFrameLength,
            ConfigError::VerificationFailed,
        ];

        for variant in variants {
            assert!(!variant.as_str().is_empty(), "ConfigError::{:?} has empty string", variant);
        }
    }

    #[test]
    fn io_error_as_str_non_empty() {
        let variants = [
            IoError::Timeout,
            IoError::Bus,
            IoError::BufferTooSmall,
            IoError::NotEffective,
            IoError::InvalidPhyRegister,
            IoError::UnexpectedPhyId,
        ];

        for variant in variants {
            assert!(!variant.as_str().is_empty(), "IoError::{:?} has empty string", variant);
        }
    }

    #[test]
    fn io_error_display() {
        assert_eq!(format!("{}", IoError::Timeout), "operation timed out");
    }

    #[test]
    fn frame_error_display_carries_length() {
        let display = format!("{}", FrameError::TooLarge { length: 1519 });
        assert!(display.contains("too large"));
        assert!(display.contains("1519"));

        let display = format!("{}", FrameError::InvalidLength { length: 0 });
        assert!(display.contains("invalid frame length"));

        let display = format!("{}", FrameError::CorruptHeader { next: 0x1A00 });
        assert!(display.contains("next-packet pointer"));
        assert!(display.contains("0x1a00"));
    }

    #[test]
    fn error_from_domain_errors() {
        assert_eq!(
            Error::from(ConfigError::VerificationFailed),
            Error::Config(ConfigError::VerificationFailed)
        );
        assert_eq!(Error::from(IoError::Bus), Error::Io(IoError::Bus));
        assert_eq!(
            Error::from(FrameError::TooLarge { length: 2000 }),
            Error::Frame(FrameError::TooLarge { length: 2000 })
        );
    }

    #[test]
    fn error_display_prefixes_domain() {
        let display = format!("{}", Error::Config(ConfigError::InvalidBufferLayout));
        assert!(display.starts_with("config:"));

        let display = format!("{}", Error::Io(IoError::NotEffective));
        assert!(display.starts_with("io:"));

        let display = format!("{}", Error::Frame(FrameError::TooLarge { length: 1600 }));
        assert!(display.starts_with("frame:"));
        assert!(display.contains("1600"));
    }

    #[test]
    fn frame_error_equality_compares_length() {
        assert_eq!(FrameError::TooLarge { length: 1519 }, FrameError::TooLarge { length: 1519 });
        assert_ne!(FrameError::TooLarge { length: 1519 }, FrameError::TooLarge { length: 1520 });
    }

    #[test]
    fn result_aliases_work() {
        fn io() -> IoResult<u8> {
            Err(IoError::Timeout)
        }
        fn frame() -> FrameResult<u8> {
            Err(FrameError::InvalidLength { length: 0 })
        }
        fn unified() -> Result<u8> {
            io()?;
            Ok(1)
        }

        assert!(frame().is_err());
        assert_eq!(unified(), Err(Error::Io(IoError::Timeout)));
    }
}
